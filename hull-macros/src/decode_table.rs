use crate::decode_column::{ColumnMetadata, FieldKind, decode_column};
use convert_case::{Case, Casing};
use quote::ToTokens;
use syn::{Fields, ItemStruct, LitStr, parse::ParseBuffer};

pub(crate) struct TableMetadata {
    pub(crate) fields: Vec<ColumnMetadata>,
    pub(crate) name: String,
    /// Index into `fields` of the primary key.
    pub(crate) primary_key: usize,
}

impl TableMetadata {
    pub(crate) fn columns(&self) -> impl Iterator<Item = &ColumnMetadata> {
        self.fields
            .iter()
            .filter(|v| matches!(v.kind, FieldKind::Column))
    }
    pub(crate) fn relations(&self) -> impl Iterator<Item = &ColumnMetadata> {
        self.fields
            .iter()
            .filter(|v| matches!(v.kind, FieldKind::Relation))
    }
    pub(crate) fn status(&self) -> Option<&ColumnMetadata> {
        self.fields
            .iter()
            .find(|v| matches!(v.kind, FieldKind::Status))
    }
}

pub fn decode_table(item: &ItemStruct) -> TableMetadata {
    let Fields::Named(..) = item.fields else {
        panic!("Entity `{}` must be a struct with named fields", item.ident);
    };
    let fields: Vec<_> = item.fields.iter().map(decode_column).collect();
    let mut name = item.ident.to_string().to_case(Case::Snake);
    if name.starts_with('_') {
        name.remove(0);
    }
    for attr in &item.attrs {
        let meta = &attr.meta;
        if meta.path().is_ident("hull") {
            let Ok(list) = meta.require_list() else {
                panic!("Error while parsing `hull`, use it like: `#[hull(attribute = value, ..)]`");
            };
            let _ = list.parse_nested_meta(|arg| {
                if arg.path.is_ident("name") {
                    let Ok(value) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!("Error while parsing `name`, use it like: `#[hull(name = \"my_table\")]`");
                    };
                    name = value.value();
                } else {
                    panic!(
                        "Unknown attribute `{}` inside hull macro",
                        arg.path.to_token_stream()
                    );
                }
                Ok(())
            });
        }
    }
    let is_column = |v: &ColumnMetadata| matches!(v.kind, FieldKind::Column);
    let declared: Vec<_> = fields
        .iter()
        .enumerate()
        .filter(|(_, v)| is_column(v) && v.primary_key)
        .map(|(i, _)| i)
        .collect();
    let primary_key = match declared.as_slice() {
        [i] => *i,
        [] => fields
            .iter()
            .position(|v| is_column(v) && v.name == "id")
            .unwrap_or_else(|| {
                panic!(
                    "Entity `{}` has no primary key, mark a field with `#[hull(primary_key)]` or name it `id`",
                    item.ident
                )
            }),
        _ => panic!(
            "Entity `{}` declares more than one primary key, composite keys are not supported",
            item.ident
        ),
    };
    if fields
        .iter()
        .filter(|v| matches!(v.kind, FieldKind::Status))
        .count()
        != 1
    {
        panic!(
            "Entity `{}` must declare exactly one field of type `hull::Status`",
            item.ident
        );
    }
    TableMetadata {
        fields,
        name,
        primary_key,
    }
}
