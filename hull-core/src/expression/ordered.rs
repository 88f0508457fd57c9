use crate::{ColumnRef, Expression, OpPrecedence, writer::Context, writer::SqlWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    ASC,
    DESC,
}

/// Expression carrying a sort direction, the direction is written only in `ORDER BY`.
#[derive(Debug)]
pub struct Ordered<E: Expression> {
    pub order: Order,
    pub expression: E,
}

impl<E: Expression> OpPrecedence for Ordered<E> {
    fn precedence(&self, writer: &dyn SqlWriter) -> i32 {
        self.expression.precedence(writer)
    }
}

impl<E: Expression> Expression for Ordered<E> {
    fn write_query(&self, writer: &dyn SqlWriter, context: &mut Context, out: &mut String) {
        writer.write_expression_ordered(
            context,
            out,
            &Ordered {
                order: self.order,
                expression: &self.expression as &dyn Expression,
            },
        )
    }
    fn visit_columns(&self, visitor: &mut dyn FnMut(&ColumnRef)) {
        self.expression.visit_columns(visitor);
    }
}
