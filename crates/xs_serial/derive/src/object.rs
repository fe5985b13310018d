use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Error, Fields, GenericParam, Ident, LitStr, Member, Type};

use crate::attributes::{FieldAttributes, Form, PropertyAttribute, TypeAttributes};

// -----------------------------------------------------------------------------
// Parsed input

struct MemberField {
    member: Member,
    ty: Type,
    name: LitStr,
    form: Form,
    namespace: Option<LitStr>,
}

struct BaseField {
    member: Member,
    ty: Type,
}

pub(crate) struct XmlObject<'a> {
    input: &'a DeriveInput,
    attrs: TypeAttributes,
    fields: Vec<MemberField>,
    base: Option<BaseField>,
    type_params: Vec<&'a Ident>,
    xs_serial: syn::Path,
}

impl<'a> XmlObject<'a> {
    pub fn parse(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;

        let data = match &input.data {
            Data::Struct(data) => data,
            Data::Enum(data) => {
                return Err(Error::new(
                    data.enum_token.span,
                    "`XmlObject` can only be derived for structs",
                ));
            }
            Data::Union(data) => {
                return Err(Error::new(
                    data.union_token.span,
                    "`XmlObject` can only be derived for structs",
                ));
            }
        };

        let mut type_params = Vec::new();
        for param in &input.generics.params {
            match param {
                GenericParam::Type(param) => type_params.push(&param.ident),
                GenericParam::Lifetime(param) => {
                    return Err(Error::new(
                        param.span(),
                        "`XmlObject` types must be `'static`, lifetime parameters are not supported",
                    ));
                }
                GenericParam::Const(param) => {
                    return Err(Error::new(param.span(), "const parameters are not supported"));
                }
            }
        }

        let mut fields = Vec::new();
        let mut base: Option<BaseField> = None;
        match &data.fields {
            Fields::Named(named) => {
                for field in &named.named {
                    let field_attrs = FieldAttributes::parse_attrs(&field.attrs)?;
                    if field_attrs.skip {
                        continue;
                    }
                    let Some(ident) = &field.ident else {
                        continue;
                    };
                    let member = Member::Named(ident.clone());

                    if field_attrs.base {
                        if base.is_some() {
                            return Err(Error::new(field.span(), "only one field can be `base`"));
                        }
                        base = Some(BaseField {
                            member,
                            ty: field.ty.clone(),
                        });
                        continue;
                    }

                    let name = field_attrs.rename.unwrap_or_else(|| {
                        LitStr::new(ident.to_string().trim_start_matches("r#"), ident.span())
                    });
                    fields.push(MemberField {
                        member,
                        ty: field.ty.clone(),
                        name,
                        form: field_attrs.form,
                        namespace: field_attrs.namespace,
                    });
                }
            }
            Fields::Unnamed(unnamed) => {
                return Err(Error::new(
                    unnamed.span(),
                    "`XmlObject` needs named fields, members are written by name",
                ));
            }
            Fields::Unit => {}
        }

        let text_members = fields.iter().filter(|field| field.form == Form::Text).count();
        if text_members > 1 {
            return Err(Error::new(input.ident.span(), "at most one field can be `text`"));
        }

        Ok(Self {
            input,
            attrs,
            fields,
            base,
            type_params,
            xs_serial: crate::path::xs_serial(),
        })
    }

    pub fn expand(&self) -> TokenStream {
        let type_path = self.impl_type_path();
        let typed = self.impl_typed();
        quote! {
            const _: () = {
                #type_path
                #typed
            };
        }
    }

    // -------------------------------------------------------------------------
    // TypePath

    fn impl_type_path(&self) -> TokenStream {
        let xs = &self.xs_serial;
        let ident = &self.input.ident;
        let ident_str = LitStr::new(&ident.to_string(), ident.span());
        let (impl_generics, ty_generics, where_clause) = self.split_generics(quote!(#xs::info::TypePath));

        let (type_path, type_name) = if self.type_params.is_empty() {
            (
                quote! { ::core::concat!(::core::module_path!(), "::", #ident_str) },
                quote! { #ident_str },
            )
        } else {
            let params = &self.type_params;
            let generic_name = |head: TokenStream, part: Ident| {
                let mut parts = vec![head, quote!("<")];
                for (index, param) in params.iter().enumerate() {
                    if index > 0 {
                        parts.push(quote!(", "));
                    }
                    parts.push(quote!(<#param as #xs::info::TypePath>::#part()));
                }
                parts.push(quote!(">"));
                quote! {
                    static CELL: #xs::info::GenericTypePathCell = #xs::info::GenericTypePathCell::new();
                    CELL.get_or_insert::<Self>(|| #xs::info::concat(&[#(#parts),*]))
                }
            };
            (
                generic_name(
                    quote! { ::core::concat!(::core::module_path!(), "::", #ident_str) },
                    format_ident!("type_path"),
                ),
                generic_name(quote! { #ident_str }, format_ident!("type_name")),
            )
        };

        quote! {
            impl #impl_generics #xs::info::TypePath for #ident #ty_generics #where_clause {
                fn type_path() -> &'static str {
                    #type_path
                }

                fn type_name() -> &'static str {
                    #type_name
                }

                #[inline]
                fn type_ident() -> &'static str {
                    #ident_str
                }

                #[inline]
                fn module_path() -> ::core::option::Option<&'static str> {
                    ::core::option::Option::Some(::core::module_path!())
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Typed

    fn impl_typed(&self) -> TokenStream {
        let xs = &self.xs_serial;
        let ident = &self.input.ident;
        let (impl_generics, ty_generics, where_clause) =
            self.split_generics(quote!(#xs::XmlValue + #xs::info::TypePath));

        let fields = self.fields.iter().map(|field| self.field_descriptor(field));
        let properties = self
            .attrs
            .properties
            .iter()
            .map(|property| self.property_descriptor(property));

        let mut builder = quote! {
            #xs::info::TypeInfo::object::<Self>(#xs::info::ObjectInfo::new(
                || ::std::vec![#(#fields),*],
                || ::std::vec![#(#properties),*],
            ))
        };

        if !self.type_params.is_empty() {
            let params = &self.type_params;
            builder = quote! {
                #builder.with_generics(&[#(#xs::info::Type::of::<#params>()),*])
            };
        }
        if let Some(base) = &self.base {
            let base_ty = &base.ty;
            let member = &base.member;
            builder = quote! {
                #builder.with_base(#xs::info::BaseInfo::new(
                    <#base_ty as #xs::info::Typed>::type_info,
                    |value| value
                        .downcast_ref::<Self>()
                        .map(|this| &this.#member as &dyn ::core::any::Any),
                ))
            };
        }
        if let Some(rename) = &self.attrs.rename {
            builder = quote! { #builder.with_element_name(#rename) };
        }
        if let Some(namespace) = &self.attrs.namespace {
            builder = quote! { #builder.with_namespace(#namespace) };
        }

        let cell = if self.type_params.is_empty() {
            quote! {
                static CELL: #xs::info::NonGenericTypeInfoCell = #xs::info::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| #builder)
            }
        } else {
            quote! {
                static CELL: #xs::info::GenericTypeInfoCell = #xs::info::GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| #builder)
            }
        };

        quote! {
            impl #impl_generics #xs::info::Typed for #ident #ty_generics #where_clause {
                fn type_info() -> &'static #xs::info::TypeInfo {
                    #cell
                }
            }
        }
    }

    fn field_descriptor(&self, field: &MemberField) -> TokenStream {
        let xs = &self.xs_serial;
        let MemberField {
            member,
            ty,
            name,
            form,
            namespace,
        } = field;

        let descriptor = quote! {
            #xs::members::MemberDescriptor::new(
                #name,
                #xs::info::Type::of::<Self>(),
                <#ty as #xs::members::MemberRef>::declared_type(),
                |owner| owner
                    .downcast_ref::<Self>()
                    .and_then(|this| #xs::members::MemberRef::member_ref(&this.#member)),
            )
        };
        self.with_form_and_namespace(descriptor, *form, namespace.as_ref())
    }

    fn property_descriptor(&self, property: &PropertyAttribute) -> TokenStream {
        let xs = &self.xs_serial;
        let PropertyAttribute {
            name,
            getter,
            form,
            namespace,
        } = property;

        let descriptor = quote! {
            #xs::members::MemberDescriptor::new(
                #name,
                #xs::info::Type::of::<Self>(),
                #xs::members::property_type::<Self, _>(#getter),
                |owner| owner
                    .downcast_ref::<Self>()
                    .and_then(|this| #xs::members::OwnedMember::into_member(#getter(this))),
            )
        };
        self.with_form_and_namespace(descriptor, *form, namespace.as_ref())
    }

    fn with_form_and_namespace(
        &self,
        mut descriptor: TokenStream,
        form: Form,
        namespace: Option<&LitStr>,
    ) -> TokenStream {
        let xs = &self.xs_serial;
        match form {
            Form::Element => {}
            Form::Attribute => {
                descriptor = quote! {
                    #descriptor.with_form(#xs::members::MemberForm::Attribute)
                };
            }
            Form::Text => {
                descriptor = quote! { #descriptor.with_form(#xs::members::MemberForm::Text) };
            }
        }
        if let Some(namespace) = namespace {
            descriptor = quote! { #descriptor.with_namespace(#namespace) };
        }
        descriptor
    }

    // -------------------------------------------------------------------------
    // Generics

    /// Splits the generics, bounding every type parameter by `bound`.
    fn split_generics(&self, bound: TokenStream) -> (TokenStream, TokenStream, TokenStream) {
        let generics = &self.input.generics;
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

        let mut predicates = Vec::new();
        if let Some(where_clause) = where_clause {
            predicates.extend(where_clause.predicates.iter().map(|predicate| quote!(#predicate)));
        }
        for param in &self.type_params {
            predicates.push(quote!(#param: #bound));
        }

        let where_clause = if predicates.is_empty() {
            TokenStream::new()
        } else {
            quote! { where #(#predicates),* }
        };
        (quote!(#impl_generics), quote!(#ty_generics), where_clause)
    }
}
