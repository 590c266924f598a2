use darling::{FromDeriveInput, FromField, ast::Data, util::Ignored};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Generics, Ident, Type, ext::IdentExt};

///
/// BeanInput
///

#[derive(FromDeriveInput)]
#[darling(attributes(bean), supports(struct_named))]
struct BeanInput {
    ident: Ident,
    generics: Generics,
    data: Data<Ignored, BeanField>,

    #[darling(default)]
    path: Option<String>,
}

///
/// BeanField
///

#[derive(FromField)]
#[darling(attributes(bean))]
struct BeanField {
    ident: Option<Ident>,
    ty: Type,

    #[darling(default)]
    ignore: bool,

    #[darling(default)]
    alias: Option<String>,

    #[darling(default)]
    skip: bool,

    #[darling(default)]
    read_only: bool,

    #[darling(default)]
    write_only: bool,

    #[darling(default)]
    getter: Option<Ident>,

    #[darling(default)]
    setter: Option<Ident>,

    #[darling(default)]
    chained: bool,
}

impl BeanField {
    fn validate(&self, ident: &Ident) -> darling::Result<()> {
        let mut errors = darling::Error::accumulator();

        if self.read_only && self.write_only {
            errors.push(
                darling::Error::custom("`read_only` and `write_only` are mutually exclusive")
                    .with_span(ident),
            );
        }
        if self.chained && self.setter.is_none() {
            errors.push(
                darling::Error::custom("`chained` requires `setter = \"...\"`").with_span(ident),
            );
        }
        if self.read_only && self.setter.is_some() {
            errors.push(
                darling::Error::custom("`setter` has no effect on a `read_only` property")
                    .with_span(ident),
            );
        }
        if self.write_only && self.getter.is_some() {
            errors.push(
                darling::Error::custom("`getter` has no effect on a `write_only` property")
                    .with_span(ident),
            );
        }

        errors.finish()
    }

    // descriptor
    // One `PropertyDescriptor` builder chain for this field.
    fn descriptor(&self, ident: &Ident) -> TokenStream {
        let name = ident.unraw().to_string();
        let ty = &self.ty;

        let reader = (!self.write_only).then(|| {
            let read = self.getter.as_ref().map_or_else(
                || quote!(::propcopy::traits::FieldValue::to_value(&bean.#ident)),
                |getter| quote!(bean.#getter().to_value()),
            );

            quote! {
                .with_reader(|bean: &Self| {
                    use ::propcopy::traits::FieldValue as _;
                    #read
                })
            }
        });

        let writer = (!self.read_only).then(|| match &self.setter {
            Some(setter) => quote! {
                .with_writer(|bean: &mut Self, value: ::propcopy::value::Value| {
                    let Some(v) = <#ty as ::propcopy::traits::FieldValue>::from_value(&value) else {
                        return Err(value);
                    };
                    bean.#setter(v);
                    Ok(())
                })
            },
            None => quote! {
                .with_writer(|bean: &mut Self, value: ::propcopy::value::Value| {
                    ::propcopy::traits::assign(&mut bean.#ident, value)
                })
            },
        });

        let chained = self.chained.then(|| quote!(.chained()));

        let copy = (self.ignore || self.alias.is_some()).then(|| {
            let ignore = self.ignore;
            let alias = self.alias.as_deref().unwrap_or_default();

            quote! {
                .with_copy(::propcopy::model::CopyProperty {
                    ignore: #ignore,
                    alias: #alias,
                })
            }
        });

        quote! {
            ::propcopy::model::PropertyDescriptor::<Self>::new(
                #name,
                <#ty as ::propcopy::traits::FieldValue>::kind(),
            )
            #reader
            #writer
            #chained
            #copy
        }
    }
}

// derive_bean
pub fn derive_bean(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    match expand(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.write_errors(),
    }
}

fn expand(input: &DeriveInput) -> darling::Result<TokenStream> {
    let bean = BeanInput::from_derive_input(input)?;
    let ident = &bean.ident;
    let (impl_generics, ty_generics, where_clause) = bean.generics.split_for_impl();

    let Data::Struct(fields) = &bean.data else {
        return Err(darling::Error::unsupported_shape("enum").with_span(ident));
    };

    let mut errors = darling::Error::accumulator();
    let mut descriptors = Vec::new();

    for field in fields.iter().filter(|field| !field.skip) {
        let Some(field_ident) = field.ident.as_ref() else {
            errors.push(darling::Error::unsupported_shape("tuple field").with_span(ident));
            continue;
        };

        if errors.handle(field.validate(field_ident)).is_some() {
            descriptors.push(field.descriptor(field_ident));
        }
    }

    errors.finish()?;

    let path = bean.path.as_ref().map_or_else(
        || quote!(concat!(module_path!(), "::", stringify!(#ident))),
        |path| quote!(#path),
    );

    Ok(quote! {
        impl #impl_generics ::propcopy::traits::Bean for #ident #ty_generics #where_clause {
            const PATH: &'static str = #path;

            fn properties() -> ::core::result::Result<
                ::std::vec::Vec<::propcopy::model::PropertyDescriptor<Self>>,
                ::propcopy::error::GenerationError,
            > {
                ::core::result::Result::Ok(::std::vec![#(#descriptors),*])
            }
        }
    })
}
