use proc_macro::TokenStream;

mod bean;

/// Derive `propcopy::traits::Bean` for a struct with named fields.
///
/// Field attributes, all under `#[bean(...)]`:
/// `ignore`, `alias = "name"`, `skip`, `read_only`, `write_only`,
/// `getter = "method"`, `setter = "method"`, `chained`.
///
/// Container attribute: `#[bean(path = "...")]` overrides the diagnostic
/// type path.
#[proc_macro_derive(Bean, attributes(bean))]
pub fn derive_bean(input: TokenStream) -> TokenStream {
    bean::derive_bean(input.into()).into()
}
