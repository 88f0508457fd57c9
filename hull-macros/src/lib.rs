mod decode_column;
mod decode_table;

use decode_table::decode_table;
use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemStruct, parse_macro_input};

/// Implements `hull::Entity` for a struct with named fields.
///
/// Every field is a column unless its type is `Related<_>` (a relation
/// collection), `Status` (the provenance flag) or it is marked `#[hull(skip)]`.
/// Every field type implements `Default`, blank instances are built from it.
#[proc_macro_derive(Entity, attributes(hull))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let item: ItemStruct = parse_macro_input!(input as ItemStruct);
    let table = decode_table(&item);
    let name = &item.ident;
    let type_name = name.to_string();
    let table_name = &table.name;
    let primary_key = &table.fields[table.primary_key].name;
    let column_defs = table.columns().map(|c| {
        let column = &c.name;
        let ty = &c.ty;
        let nullable = c.nullable;
        let is_primary_key = c.ident == table.fields[table.primary_key].ident;
        let references = match &c.references {
            Some(v) => quote!(Some(#v)),
            None => quote!(None),
        };
        quote! {
            ::hull::ColumnDef {
                name: #column,
                value: <#ty as ::hull::AsValue>::as_empty_value(),
                nullable: #nullable,
                primary_key: #is_primary_key,
                references: #references,
            }
        }
    });
    let fields = table.columns().map(|c| {
        let column = &c.name;
        let ident = &c.ident;
        let ty = &c.ty;
        quote! {
            ::hull::Field::<#name> {
                name: #column,
                get: |entity: &#name| {
                    ::hull::AsValue::as_value(::std::clone::Clone::clone(&entity.#ident))
                },
                set: |entity: &mut #name, value: ::hull::Value| {
                    entity.#ident = <#ty as ::hull::AsValue>::try_from_value(value)?;
                    ::std::result::Result::Ok(())
                },
            }
        }
    });
    let idents = table.fields.iter().map(|v| &v.ident);
    let relations = table.relations().enumerate().map(|(i, v)| {
        let ident = &v.ident;
        quote!(#i => ::std::option::Option::Some(&mut self.#ident as &mut dyn ::hull::RelationSet))
    });
    let status = table.status().map(|v| &v.ident);
    quote! {
        impl ::hull::Entity for #name {
            fn table() -> &'static ::hull::TableModel {
                static TABLE: ::std::sync::LazyLock<::hull::TableModel> =
                    ::std::sync::LazyLock::new(|| ::hull::TableModel {
                        name: #table_name,
                        type_name: #type_name,
                        type_path: ::std::any::type_name::<#name>(),
                        columns: vec![#(#column_defs),*],
                        primary_key: #primary_key,
                        type_tag: 0,
                    });
                &TABLE
            }

            fn table_name() -> &'static str {
                #table_name
            }

            fn fields() -> &'static [::hull::Field<Self>] {
                static FIELDS: ::std::sync::LazyLock<Box<[::hull::Field<#name>]>> =
                    ::std::sync::LazyLock::new(|| vec![#(#fields),*].into_boxed_slice());
                &FIELDS
            }

            fn new_instance() -> Self {
                Self {
                    #(#idents: ::std::default::Default::default()),*
                }
            }

            fn status(&self) -> ::hull::Status {
                self.#status
            }

            fn set_status(&mut self, status: ::hull::Status) {
                self.#status = status;
            }

            fn relation_mut(
                &mut self,
                index: usize,
            ) -> ::std::option::Option<&mut dyn ::hull::RelationSet> {
                match index {
                    #(#relations,)*
                    _ => ::std::option::Option::None,
                }
            }
        }
    }
    .into()
}
