use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Expr, ExprLit, ExprPath, Field, Ident, Lit, LitStr, Type, parse::ParseBuffer};

/// What a struct field maps to.
pub(crate) enum FieldKind {
    Column,
    Relation,
    Status,
    Skip,
}

pub(crate) struct ColumnMetadata {
    pub(crate) ident: Ident,
    pub(crate) ty: Type,
    pub(crate) kind: FieldKind,
    pub(crate) name: String,
    pub(crate) nullable: bool,
    pub(crate) primary_key: bool,
    /// Expression evaluating to the referenced table name.
    pub(crate) references: Option<TokenStream>,
}

fn last_segment(ty: &Type) -> Option<String> {
    let Type::Path(path) = ty else {
        return None;
    };
    path.path.segments.last().map(|v| v.ident.to_string())
}

pub fn decode_column(field: &Field) -> ColumnMetadata {
    let ident = field
        .ident
        .clone()
        .expect("Entity fields are expected to have a name");
    let segment = last_segment(&field.ty);
    let kind = match segment.as_deref() {
        Some("Related") => FieldKind::Relation,
        Some("Status") => FieldKind::Status,
        _ => FieldKind::Column,
    };
    let mut name = ident.to_string();
    if name.starts_with('_') {
        name.remove(0);
    }
    let mut metadata = ColumnMetadata {
        ident,
        ty: field.ty.clone(),
        kind,
        name,
        nullable: segment.as_deref() == Some("Option"),
        primary_key: false,
        references: None,
    };
    for attr in &field.attrs {
        let meta = &attr.meta;
        if meta.path().is_ident("hull") {
            let Ok(list) = meta.require_list() else {
                panic!("Error while parsing `hull`, use it like: `#[hull(attribute = value, ..)]`");
            };
            let _ = list.parse_nested_meta(|arg| {
                if arg.path.is_ident("name") {
                    let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!("Error while parsing `name`, use it like: `#[hull(name = \"my_column\")]`");
                    };
                    metadata.name = v.value();
                } else if arg.path.is_ident("primary_key") {
                    let Err(..) = arg.value() else {
                        // value() is Err for Meta::Path
                        panic!("Error while parsing `primary_key`, use it like: `#[hull(primary_key)]`");
                    };
                    metadata.primary_key = true;
                } else if arg.path.is_ident("references") {
                    let reference = match arg.value().and_then(ParseBuffer::parse::<Expr>) {
                        Ok(Expr::Lit(ExprLit {
                            lit: Lit::Str(v), ..
                        })) => v.to_token_stream(),
                        Ok(Expr::Path(ExprPath { path, .. })) => {
                            quote!(<#path as ::hull::Entity>::table_name())
                        }
                        _ => panic!(
                            "Error while parsing `references`, use it like: `#[hull(references = Entity)]` or `#[hull(references = \"table\")]`"
                        ),
                    };
                    metadata.references = Some(reference);
                } else if arg.path.is_ident("skip") {
                    let Err(..) = arg.value() else {
                        panic!("Error while parsing `skip`, use it like: `#[hull(skip)]`");
                    };
                    metadata.kind = FieldKind::Skip;
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
    metadata
}
