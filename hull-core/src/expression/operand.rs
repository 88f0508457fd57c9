use crate::{
    AsValue, ColumnRef, Expression, OpPrecedence, Value, writer::Context, writer::SqlWriter,
};
use std::borrow::Cow;

/// Leaf of an expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Column(ColumnRef),
    Variable(Value),
    Asterisk,
    /// Function call, the name is written verbatim.
    Call(&'static str, Vec<Operand>),
    /// SQL written verbatim, never inspected.
    Raw(Cow<'static, str>),
    Null,
}

/// Column of the selected table.
pub fn col(name: impl Into<Cow<'static, str>>) -> Operand {
    Operand::Column(ColumnRef::new(name))
}

/// Column qualified by its table, used to reach the joined table.
pub fn col_of(
    table: impl Into<Cow<'static, str>>,
    name: impl Into<Cow<'static, str>>,
) -> Operand {
    Operand::Column(ColumnRef::qualified(table, name))
}

/// Raw SQL fragment.
pub fn raw(sql: impl Into<Cow<'static, str>>) -> Operand {
    Operand::Raw(sql.into())
}

impl OpPrecedence for Operand {
    fn precedence(&self, _writer: &dyn SqlWriter) -> i32 {
        1_000_000_000
    }
}

impl Expression for Operand {
    fn write_query(&self, writer: &dyn SqlWriter, context: &mut Context, out: &mut String) {
        writer.write_expression_operand(context, out, self)
    }
    fn visit_columns(&self, visitor: &mut dyn FnMut(&ColumnRef)) {
        match self {
            Operand::Column(v) => visitor(v),
            Operand::Call(_, args) => {
                for arg in args {
                    arg.visit_columns(visitor);
                }
            }
            _ => {}
        }
    }
}

impl<T: AsValue> From<T> for Operand {
    fn from(value: T) -> Self {
        Operand::Variable(value.as_value())
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::Variable(value.into())
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Variable(value)
    }
}

impl From<ColumnRef> for Operand {
    fn from(value: ColumnRef) -> Self {
        Operand::Column(value)
    }
}
