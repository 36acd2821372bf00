use proc_macro2::TokenStream;
use quote::quote;

use crate::parse::{TaggedField, TaggedStruct};

pub(crate) fn expand(model: &TaggedStruct) -> TokenStream {
    let ident = &model.ident;
    let name = ident.to_string();
    let (impl_generics, ty_generics, where_clause) = model.generics.split_for_impl();
    let fields = model.fields.iter().map(expand_field);

    // The table does not depend on type parameters, so the static inside
    // the generic fn is shared across instantiations.
    quote! {
        #[automatically_derived]
        impl #impl_generics ::tag_assert::Tagged for #ident #ty_generics #where_clause {
            fn schema() -> ::tag_assert::Schema {
                static SCHEMA: ::std::sync::LazyLock<::tag_assert::StructSchema> =
                    ::std::sync::LazyLock::new(|| {
                        ::tag_assert::StructSchema::builder(#name)
                            #(.field(#fields))*
                            .build()
                    });
                ::tag_assert::Schema::Struct(&*SCHEMA)
            }
        }
    }
}

fn expand_field(field: &TaggedField) -> TokenStream {
    let name = &field.name;
    let mut tokens = quote! { ::tag_assert::FieldSchema::new(#name) };
    if !field.public {
        tokens = quote! { #tokens.private() };
    }
    for (key, value) in &field.tags {
        tokens = quote! { #tokens.tag(#key, #value) };
    }
    if let Some(ty) = &field.embed {
        tokens = quote! { #tokens.embed(<#ty as ::tag_assert::Tagged>::schema) };
    }
    tokens
}
