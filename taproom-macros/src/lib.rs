//! Procedural macros for Taproom
//!
//! This crate provides macros to reduce boilerplate in the Taproom backend:
//!
//! - `#[derive(Entity)]` - Generate table metadata, column definitions and row decoding
//!   for a store-backed entity struct

use convert_case::{Case, Casing};
use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse_macro_input, Data, DeriveInput, Fields, GenericArgument, LitStr, PathArguments, Type,
};

/// Derive the ORM traits (`DatabaseEntity`, `DatabaseSchema`, `HasForeignKey`, `FromSqlRow`)
/// for a struct.
///
/// # Usage
///
/// ```ignore
/// #[derive(Entity)]
/// #[entity(table = "users", default_sort = "id")]
/// pub struct User {
///     #[entity(primary_key)]
///     pub id: i64,
///
///     #[entity(unique)]
///     pub email: String,
///
///     #[entity(sql_type = "TEXT", default = "'client'")]
///     pub status: UserStatus,
///
///     // Filled by eager loading, never read from the row
///     #[entity(relation)]
///     pub notifications: Vec<Notification>,
/// }
/// ```
///
/// Struct attributes:
/// - `table` - SQL table name (defaults to the snake_case struct name plus `s`)
/// - `default_sort` - column used when a query has no explicit order (defaults to the primary key)
///
/// Field attributes:
/// - `primary_key` - marks the primary key column
/// - `unique` - adds a UNIQUE constraint
/// - `relation` - not a column; initialised with `Default::default()` when decoding
/// - `sql_type = "..."` - overrides the inferred SQLite type
/// - `default = "..."` - SQL default expression
/// - `references = "table(column)"` - foreign key target
/// - `column = "..."` - column name when it differs from the field name
///
/// Generated code refers to `crate::orm`, so the derive is only usable inside the backend crate.
#[proc_macro_derive(Entity, attributes(entity))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_entity(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

#[derive(Default)]
struct EntityOptions {
    table: Option<String>,
    default_sort: Option<String>,
}

#[derive(Default)]
struct FieldOptions {
    primary_key: bool,
    unique: bool,
    relation: bool,
    sql_type: Option<String>,
    default: Option<String>,
    references: Option<String>,
    column: Option<String>,
}

fn expand_entity(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Entity can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Entity can only be derived for structs",
            ))
        }
    };

    let options = parse_entity_options(input)?;
    let table = options
        .table
        .unwrap_or_else(|| format!("{}s", name.to_string().to_case(Case::Snake)));

    let mut primary_key: Option<String> = None;
    let mut column_names = Vec::new();
    let mut column_defs = Vec::new();
    let mut decoders = Vec::new();
    let mut key_arms = Vec::new();

    for field in fields {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
        let field_options = parse_field_options(field)?;

        if field_options.relation {
            decoders.push(quote! { #ident: ::core::default::Default::default() });
            continue;
        }

        let column = field_options
            .column
            .clone()
            .unwrap_or_else(|| ident.to_string());

        if field_options.primary_key {
            if primary_key.is_some() {
                return Err(syn::Error::new_spanned(
                    ident,
                    "only one field may be marked primary_key",
                ));
            }
            primary_key = Some(column.clone());
        }

        let nullable = option_inner(&field.ty).is_some();
        let sql_type = field_options
            .sql_type
            .clone()
            .unwrap_or_else(|| infer_sql_type(option_inner(&field.ty).unwrap_or(&field.ty)).to_string());
        let is_primary_key = field_options.primary_key;
        let unique = field_options.unique;
        let default = match &field_options.default {
            Some(expr) => quote! { ::core::option::Option::Some(#expr) },
            None => quote! { ::core::option::Option::None },
        };
        let references = match &field_options.references {
            Some(target) => quote! { ::core::option::Option::Some(#target) },
            None => quote! { ::core::option::Option::None },
        };

        column_defs.push(quote! {
            crate::orm::ColumnDef {
                name: #column,
                sql_type: #sql_type,
                nullable: #nullable,
                is_primary_key: #is_primary_key,
                unique: #unique,
                default: #default,
                references: #references,
            }
        });
        decoders.push(quote! { #ident: ::sqlx::Row::try_get(row, #column)? });
        match option_inner(&field.ty) {
            Some(inner) if is_i64(inner) => key_arms.push(quote! { #column => self.#ident }),
            None if is_i64(&field.ty) => {
                key_arms.push(quote! { #column => ::core::option::Option::Some(self.#ident) })
            }
            _ => {}
        }
        column_names.push(column);
    }

    let primary_key = primary_key.ok_or_else(|| {
        syn::Error::new_spanned(name, "Entity requires one field marked #[entity(primary_key)]")
    })?;
    let default_sort = options.default_sort.unwrap_or_else(|| primary_key.clone());

    Ok(quote! {
        impl crate::orm::DatabaseEntity for #name {
            const TABLE_NAME: &'static str = #table;
            const PRIMARY_KEY: &'static str = #primary_key;
            const DEFAULT_SORT: &'static str = #default_sort;

            fn column_names() -> &'static [&'static str] {
                &[#(#column_names),*]
            }
        }

        impl crate::orm::DatabaseSchema for #name {
            fn columns() -> &'static [crate::orm::ColumnDef] {
                const COLUMNS: &[crate::orm::ColumnDef] = &[#(#column_defs),*];
                COLUMNS
            }
        }

        impl crate::orm::HasForeignKey for #name {
            fn get_fk_value(&self, column: &str) -> ::core::option::Option<i64> {
                match column {
                    #(#key_arms,)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl crate::orm::FromSqlRow for #name {
            fn from_row(row: &::sqlx::sqlite::SqliteRow) -> ::core::result::Result<Self, ::sqlx::Error> {
                ::core::result::Result::Ok(Self {
                    #(#decoders),*
                })
            }
        }
    })
}

fn parse_entity_options(input: &DeriveInput) -> syn::Result<EntityOptions> {
    let mut options = EntityOptions::default();
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("entity")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                options.table = Some(meta.value()?.parse::<LitStr>()?.value());
                Ok(())
            } else if meta.path.is_ident("default_sort") {
                options.default_sort = Some(meta.value()?.parse::<LitStr>()?.value());
                Ok(())
            } else {
                Err(meta.error("unsupported entity attribute"))
            }
        })?;
    }
    Ok(options)
}

fn parse_field_options(field: &syn::Field) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("entity")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("primary_key") {
                options.primary_key = true;
            } else if meta.path.is_ident("unique") {
                options.unique = true;
            } else if meta.path.is_ident("relation") {
                options.relation = true;
            } else if meta.path.is_ident("sql_type") {
                options.sql_type = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("default") {
                options.default = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("references") {
                options.references = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("column") {
                options.column = Some(meta.value()?.parse::<LitStr>()?.value());
            } else {
                return Err(meta.error("unsupported entity field attribute"));
            }
            Ok(())
        })?;
    }
    Ok(options)
}

/// Returns `T` when `ty` is `Option<T>`.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => args.args.iter().find_map(|arg| match arg {
            GenericArgument::Type(inner) => Some(inner),
            _ => None,
        }),
        _ => None,
    }
}

/// SQLite storage class for a Rust field type. Anything unrecognised is stored as TEXT.
fn infer_sql_type(ty: &Type) -> &'static str {
    let Type::Path(path) = ty else {
        return "TEXT";
    };
    let Some(segment) = path.path.segments.last() else {
        return "TEXT";
    };
    match segment.ident.to_string().as_str() {
        "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" | "bool" => "INTEGER",
        "f32" | "f64" => "REAL",
        "Vec" => "BLOB",
        _ => "TEXT",
    }
}

fn is_i64(ty: &Type) -> bool {
    matches!(ty, Type::Path(path) if path.path.is_ident("i64"))
}
