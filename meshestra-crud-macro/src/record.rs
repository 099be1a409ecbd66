use darling::{ast, FromDeriveInput, FromField};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    ext::IdentExt, parse_macro_input, punctuated::Punctuated, Attribute, DeriveInput, Expr,
    ExprLit, Generics, Ident, Lit, Meta, Token, Type,
};

#[derive(FromDeriveInput)]
#[darling(attributes(record), forward_attrs(serde), supports(struct_named))]
struct RecordInput {
    ident: Ident,
    generics: Generics,
    attrs: Vec<Attribute>,
    data: ast::Data<(), RecordField>,
}

#[derive(FromField)]
#[darling(attributes(record), forward_attrs(serde))]
struct RecordField {
    ident: Option<Ident>,
    ty: Type,
    attrs: Vec<Attribute>,
    #[darling(default)]
    id: bool,
    #[darling(default)]
    readonly: bool,
}

/// What the derive needs from a field's `#[serde(...)]` attributes
#[derive(Default)]
struct SerdeField {
    rename: Option<String>,
    skip: bool,
}

impl RecordField {
    /// The key this field has in JSON, which is what a patch addresses
    fn wire_name(&self, rename_all: Option<RenameRule>) -> darling::Result<Option<String>> {
        let Some(ident) = &self.ident else {
            return Ok(None);
        };
        let serde = SerdeField::parse(&self.attrs)?;
        let name = match (serde.rename, rename_all) {
            (Some(rename), _) => rename,
            (None, Some(rule)) => rule.apply(&ident.unraw().to_string()),
            (None, None) => ident.unraw().to_string(),
        };
        Ok(Some(name))
    }

    fn skips_deserializing(&self) -> darling::Result<bool> {
        Ok(SerdeField::parse(&self.attrs)?.skip)
    }
}

impl SerdeField {
    fn parse(attrs: &[Attribute]) -> darling::Result<Self> {
        let mut field = Self::default();
        for meta in serde_metas(attrs)? {
            match &meta {
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    field.rename = Some(string_value(&nv.value)?);
                }
                Meta::List(list) if list.path.is_ident("rename") => {
                    if let Some(name) = deserialize_name(list)? {
                        field.rename = Some(name);
                    }
                }
                Meta::Path(path)
                    if path.is_ident("skip") || path.is_ident("skip_deserializing") =>
                {
                    field.skip = true;
                }
                _ => {}
            }
        }
        Ok(field)
    }
}

/// serde's `rename_all` rules, as applied to field names
#[derive(Clone, Copy)]
enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl RenameRule {
    fn from_container(attrs: &[Attribute]) -> darling::Result<Option<Self>> {
        let mut rule = None;
        for meta in serde_metas(attrs)? {
            let value = match &meta {
                Meta::NameValue(nv) if nv.path.is_ident("rename_all") => {
                    Some(string_value(&nv.value)?)
                }
                Meta::List(list) if list.path.is_ident("rename_all") => deserialize_name(list)?,
                _ => None,
            };
            if let Some(value) = value {
                rule = Some(Self::parse(&value).ok_or_else(|| {
                    darling::Error::custom(format!("unknown rename_all rule `{value}`"))
                })?);
            }
        }
        Ok(rule)
    }

    fn parse(rule: &str) -> Option<Self> {
        Some(match rule {
            "lowercase" => Self::Lower,
            "UPPERCASE" => Self::Upper,
            "PascalCase" => Self::Pascal,
            "camelCase" => Self::Camel,
            "snake_case" => Self::Snake,
            "SCREAMING_SNAKE_CASE" => Self::ScreamingSnake,
            "kebab-case" => Self::Kebab,
            "SCREAMING-KEBAB-CASE" => Self::ScreamingKebab,
            _ => return None,
        })
    }

    fn apply(self, field: &str) -> String {
        match self {
            Self::Lower | Self::Snake => field.to_string(),
            Self::Upper | Self::ScreamingSnake => field.to_ascii_uppercase(),
            Self::Pascal => pascal_case(field),
            Self::Camel => {
                let pascal = pascal_case(field);
                let mut chars = pascal.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
                    None => pascal,
                }
            }
            Self::Kebab => field.replace('_', "-"),
            Self::ScreamingKebab => field.to_ascii_uppercase().replace('_', "-"),
        }
    }
}

fn pascal_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut capitalize = true;
    for ch in field.chars() {
        if ch == '_' {
            capitalize = true;
        } else if capitalize {
            out.push(ch.to_ascii_uppercase());
            capitalize = false;
        } else {
            out.push(ch);
        }
    }
    out
}

fn serde_metas(attrs: &[Attribute]) -> darling::Result<Vec<Meta>> {
    let mut metas = Vec::new();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        let nested = attr
            .parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
            .map_err(darling::Error::from)?;
        metas.extend(nested);
    }
    Ok(metas)
}

fn string_value(expr: &Expr) -> darling::Result<String> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s.value()),
        _ => Err(darling::Error::custom("expected a string literal").with_span(expr)),
    }
}

/// `rename(deserialize = "...")` and `rename_all(deserialize = "...")`
fn deserialize_name(list: &syn::MetaList) -> darling::Result<Option<String>> {
    let nested = list
        .parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
        .map_err(darling::Error::from)?;
    for meta in nested {
        if let Meta::NameValue(nv) = meta {
            if nv.path.is_ident("deserialize") {
                return string_value(&nv.value).map(Some);
            }
        }
    }
    Ok(None)
}

pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let expanded = RecordInput::from_derive_input(&input)
        .and_then(|record| generate_record_impl(&record))
        .unwrap_or_else(|e| e.write_errors());
    TokenStream::from(expanded)
}

fn generate_record_impl(input: &RecordInput) -> darling::Result<TokenStream2> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match input.data.as_ref().take_struct() {
        Some(fields) => fields.fields,
        None => {
            return Err(darling::Error::custom("#[derive(Record)] only supports structs")
                .with_span(struct_name))
        }
    };

    let rename_all = RenameRule::from_container(&input.attrs)?;
    let id_field = find_id_field(&fields).map_err(|e| e.with_span(struct_name))?;
    let id_ident = &id_field.ident;
    let id_type = &id_field.ty;
    let id_name = id_field.wire_name(rename_all)?.unwrap_or_default();

    // The id field never takes part in partial updates
    let mut mutable = Vec::new();
    for field in fields.iter().copied() {
        if field.readonly || field.ident == id_field.ident || field.skips_deserializing()? {
            continue;
        }
        if let Some(name) = field.wire_name(rename_all)? {
            mutable.push((field, name));
        }
    }

    let mutable_names: Vec<&String> = mutable.iter().map(|(_, name)| name).collect();
    let assignments = mutable.iter().map(|(field, name)| {
        let ident = &field.ident;
        quote! {
            #name => {
                self.#ident = ::meshestra_crud::__private::serde_json::from_value(value)
                    .map_err(|e| ::meshestra_crud::PatchError::invalid_value(field, e))?;
                Ok(())
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::meshestra_crud::Record for #struct_name #ty_generics #where_clause {
            type Id = #id_type;

            const ID_FIELD: &'static str = #id_name;
            const MUTABLE_FIELDS: &'static [&'static str] = &[#(#mutable_names),*];

            fn id(&self) -> &Self::Id {
                &self.#id_ident
            }

            #[allow(unused_variables)]
            fn apply_field(
                &mut self,
                field: &str,
                value: ::meshestra_crud::__private::serde_json::Value,
            ) -> ::std::result::Result<(), ::meshestra_crud::PatchError> {
                match field {
                    #(#assignments)*
                    _ => Err(::meshestra_crud::PatchError::InvalidField {
                        field: field.to_string(),
                    }),
                }
            }
        }
    })
}

fn find_id_field<'a>(fields: &[&'a RecordField]) -> darling::Result<&'a RecordField> {
    let marked: Vec<&RecordField> = fields.iter().copied().filter(|f| f.id).collect();
    match marked.as_slice() {
        [field] => Ok(*field),
        [] => fields
            .iter()
            .copied()
            .find(|f| f.ident.as_ref().is_some_and(|ident| ident.unraw() == "id"))
            .ok_or_else(|| {
                darling::Error::custom(
                    "#[derive(Record)] needs a field named `id` or one marked #[record(id)]",
                )
            }),
        _ => Err(darling::Error::custom(
            "#[derive(Record)] allows only one field marked #[record(id)]",
        )),
    }
}
