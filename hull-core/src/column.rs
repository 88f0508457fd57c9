use crate::{Expression, OpPrecedence, Value, writer::Context, writer::SqlWriter};
use std::borrow::Cow;

/// Reference to a column, optionally qualified by its table.
///
/// An empty `table` resolves to the table the query selects from.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub name: Cow<'static, str>,
    pub table: Cow<'static, str>,
}

impl ColumnRef {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            table: Cow::Borrowed(""),
        }
    }
    pub fn qualified(
        table: impl Into<Cow<'static, str>>,
        name: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
        }
    }
}

/// Declarative description of one mapped column.
#[derive(Default, Debug, Clone)]
pub struct ColumnDef {
    /// Column name.
    pub name: &'static str,
    /// `Value` prototype carrying the column type.
    pub value: Value,
    pub nullable: bool,
    pub primary_key: bool,
    /// Table whose primary key this column points to.
    pub references: Option<&'static str>,
}

impl ColumnDef {
    pub fn column_ref(&self, table: &'static str) -> ColumnRef {
        ColumnRef::qualified(table, self.name)
    }
}

impl OpPrecedence for ColumnRef {
    fn precedence(&self, _writer: &dyn SqlWriter) -> i32 {
        1_000_000
    }
}

impl Expression for ColumnRef {
    fn write_query(&self, writer: &dyn SqlWriter, context: &mut Context, out: &mut String) {
        writer.write_column_ref(context, out, self);
    }
    fn visit_columns(&self, visitor: &mut dyn FnMut(&ColumnRef)) {
        visitor(self);
    }
}
