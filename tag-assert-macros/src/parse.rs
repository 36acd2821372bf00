use proc_macro2::{TokenStream, TokenTree};
use quote::ToTokens;
use syn::{
    Data, DeriveInput, Error, Fields, GenericParam, Generics, Ident, LitStr, Result, Type,
    Visibility,
};

/// Everything the expansion needs, extracted from the derive input.
pub(crate) struct TaggedStruct {
    pub(crate) ident: Ident,
    pub(crate) generics: Generics,
    pub(crate) fields: Vec<TaggedField>,
}

pub(crate) struct TaggedField {
    pub(crate) name: String,
    pub(crate) public: bool,
    pub(crate) tags: Vec<(String, String)>,
    /// The field's type, when marked `#[tag(embed)]`.
    pub(crate) embed: Option<Type>,
}

pub(crate) fn tagged_struct(input: &DeriveInput) -> Result<TaggedStruct> {
    let Data::Struct(data) = &input.data else {
        return Err(Error::new_spanned(
            &input.ident,
            "#[derive(Tagged)] only supports structs",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(Error::new_spanned(
            &input.ident,
            "#[derive(Tagged)] requires a struct with named fields",
        ));
    };

    let mut fields = Vec::with_capacity(named.named.len());
    for field in &named.named {
        let ident = field
            .ident
            .as_ref()
            .expect("named fields always carry an ident");

        let mut tags = Vec::new();
        let mut embed = None;
        for attr in &field.attrs {
            if !attr.path().is_ident("tag") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("embed") {
                    embed = Some(field.ty.clone());
                    return Ok(());
                }
                let Some(key) = meta.path.get_ident() else {
                    return Err(meta.error("expected `key = \"value\"` or `embed`"));
                };
                let key = key.to_string();
                let value: LitStr = meta.value()?.parse()?;
                tags.push((key, value.value()));
                Ok(())
            })?;
        }

        if let Some(ty) = &embed {
            if mentions_generic_param(ty, &input.generics) {
                return Err(Error::new_spanned(
                    ty,
                    "#[tag(embed)] requires a concrete type; \
                     generic parameters cannot appear in the schema table",
                ));
            }
        }

        fields.push(TaggedField {
            name: ident.to_string(),
            public: matches!(field.vis, Visibility::Public(_)),
            tags,
            embed,
        });
    }

    Ok(TaggedStruct {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        fields,
    })
}

/// An embed hook expands to `<Ty as Tagged>::schema` inside the `static`
/// table initializer, where the struct's own generic parameters cannot
/// appear.
fn mentions_generic_param(ty: &Type, generics: &Generics) -> bool {
    let params: Vec<String> = generics
        .params
        .iter()
        .filter_map(|param| match param {
            GenericParam::Type(param) => Some(param.ident.to_string()),
            GenericParam::Const(param) => Some(param.ident.to_string()),
            GenericParam::Lifetime(_) => None,
        })
        .collect();
    if params.is_empty() {
        return false;
    }
    contains_any_ident(ty.to_token_stream(), &params)
}

fn contains_any_ident(stream: TokenStream, names: &[String]) -> bool {
    stream.into_iter().any(|tree| match tree {
        TokenTree::Ident(ident) => names.iter().any(|name| ident == name.as_str()),
        TokenTree::Group(group) => contains_any_ident(group.stream(), names),
        _ => false,
    })
}
