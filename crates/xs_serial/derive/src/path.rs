/// Path of the `xs_serial` crate as seen by the deriving crate.
///
/// `::xs_serial` for direct dependents, `::xs_core::serial` through the
/// facade. Reading the manifest is not free, so the path is resolved once
/// per derive and passed around.
pub(crate) fn xs_serial() -> syn::Path {
    xs_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("xs_serial"))
}
