use syn::spanned::Spanned;
use syn::{Attribute, Error, LitStr, Path};

pub(crate) static XML_ATTRIBUTE_NAME: &str = "xml";

// -----------------------------------------------------------------------------
// MemberForm

/// How a member is written, mirrors `xs_serial::members::MemberForm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Form {
    #[default]
    Element,
    Attribute,
    Text,
}

impl Form {
    fn set(&mut self, form: Form, span: proc_macro2::Span) -> syn::Result<()> {
        if *self != Form::Element {
            return Err(Error::new(span, "`attribute` and `text` are exclusive"));
        }
        *self = form;
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// PropertyAttribute

/// `#[xml(property(name = "...", getter = path, attribute, namespace = "..."))]`
#[derive(Debug)]
pub(crate) struct PropertyAttribute {
    pub name: LitStr,
    pub getter: Path,
    pub form: Form,
    pub namespace: Option<LitStr>,
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// Container attributes.
#[derive(Debug, Default)]
pub(crate) struct TypeAttributes {
    /// `rename = "..."`: element name of the type.
    pub rename: Option<LitStr>,
    /// `namespace = "..."`: namespace of the type's element.
    pub namespace: Option<LitStr>,
    /// Computed members, in declaration order.
    pub properties: Vec<PropertyAttribute>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident(XML_ATTRIBUTE_NAME)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    out.rename = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("namespace") {
                    out.namespace = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("property") {
                    out.properties.push(parse_property(&meta)?);
                } else {
                    return Err(meta.error("expected `rename`, `namespace` or `property`"));
                }
                Ok(())
            })?;
        }
        Ok(out)
    }
}

fn parse_property(meta: &syn::meta::ParseNestedMeta) -> syn::Result<PropertyAttribute> {
    let mut name: Option<LitStr> = None;
    let mut getter: Option<Path> = None;
    let mut form = Form::Element;
    let mut namespace: Option<LitStr> = None;

    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("name") {
            name = Some(inner.value()?.parse()?);
        } else if inner.path.is_ident("getter") {
            getter = Some(inner.value()?.parse()?);
        } else if inner.path.is_ident("attribute") {
            form.set(Form::Attribute, inner.path.span())?;
        } else if inner.path.is_ident("namespace") {
            namespace = Some(inner.value()?.parse()?);
        } else {
            return Err(inner.error("expected `name`, `getter`, `attribute` or `namespace`"));
        }
        Ok(())
    })?;

    let name = name.ok_or_else(|| meta.error("property requires `name = \"...\"`"))?;
    let getter = getter.ok_or_else(|| meta.error("property requires `getter = path`"))?;
    if namespace.is_some() && form != Form::Attribute {
        return Err(meta.error("`namespace` only applies to attribute members"));
    }
    Ok(PropertyAttribute {
        name,
        getter,
        form,
        namespace,
    })
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Field attributes.
#[derive(Debug, Default)]
pub(crate) struct FieldAttributes {
    /// `skip`: not a member.
    pub skip: bool,
    /// `base`: the field holds the base part of the value.
    pub base: bool,
    /// `rename = "..."`: member name.
    pub rename: Option<LitStr>,
    /// `attribute` / `text`
    pub form: Form,
    /// `namespace = "..."`, attributes only.
    pub namespace: Option<LitStr>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident(XML_ATTRIBUTE_NAME)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    out.skip = true;
                } else if meta.path.is_ident("base") {
                    out.base = true;
                } else if meta.path.is_ident("rename") {
                    out.rename = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("attribute") {
                    out.form.set(Form::Attribute, meta.path.span())?;
                } else if meta.path.is_ident("text") {
                    out.form.set(Form::Text, meta.path.span())?;
                } else if meta.path.is_ident("namespace") {
                    out.namespace = Some(meta.value()?.parse()?);
                } else {
                    return Err(meta.error(
                        "expected `skip`, `base`, `rename`, `attribute`, `text` or `namespace`",
                    ));
                }
                Ok(())
            })?;

            if out.namespace.is_some() && out.form != Form::Attribute {
                return Err(Error::new(
                    attr.span(),
                    "`namespace` only applies to attribute members",
                ));
            }
            if out.base && (out.skip || out.rename.is_some() || out.form != Form::Element) {
                return Err(Error::new(attr.span(), "`base` takes no other option"));
            }
        }
        Ok(out)
    }
}
