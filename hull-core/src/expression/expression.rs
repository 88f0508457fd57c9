use crate::{
    BinaryOp, BinaryOpType, ColumnRef, OpPrecedence, Operand, Order, Ordered, UnaryOp,
    UnaryOpType, writer::Context, writer::SqlWriter,
};
use std::fmt::Debug;

/// A renderable SQL expression node.
pub trait Expression: OpPrecedence + Send + Sync + Debug {
    /// Serialize the expression into `out` using the sql writer.
    fn write_query(&self, writer: &dyn SqlWriter, context: &mut Context, out: &mut String);
    /// Calls `visitor` on every column referenced by the expression.
    fn visit_columns(&self, _visitor: &mut dyn FnMut(&ColumnRef)) {}
}

impl<T: Expression + ?Sized> Expression for &T {
    fn write_query(&self, writer: &dyn SqlWriter, context: &mut Context, out: &mut String) {
        (**self).write_query(writer, context, out);
    }
    fn visit_columns(&self, visitor: &mut dyn FnMut(&ColumnRef)) {
        (**self).visit_columns(visitor);
    }
}

impl Expression for Box<dyn Expression> {
    fn write_query(&self, writer: &dyn SqlWriter, context: &mut Context, out: &mut String) {
        self.as_ref().write_query(writer, context, out);
    }
    fn visit_columns(&self, visitor: &mut dyn FnMut(&ColumnRef)) {
        self.as_ref().visit_columns(visitor);
    }
}

/// Builder methods available on every expression.
///
/// ```rust
/// use hull_core::{ExpressionExt, col};
/// let condition = col("score").greater(10).and(col("title").like("%rust%"));
/// # let _ = condition;
/// ```
pub trait ExpressionExt: Expression + Sized {
    fn binary<R: Expression>(self, op: BinaryOpType, rhs: R) -> BinaryOp<Self, R> {
        BinaryOp { op, lhs: self, rhs }
    }
    fn equal(self, rhs: impl Into<Operand>) -> BinaryOp<Self, Operand> {
        self.binary(BinaryOpType::Equal, rhs.into())
    }
    fn not_equal(self, rhs: impl Into<Operand>) -> BinaryOp<Self, Operand> {
        self.binary(BinaryOpType::NotEqual, rhs.into())
    }
    fn less(self, rhs: impl Into<Operand>) -> BinaryOp<Self, Operand> {
        self.binary(BinaryOpType::Less, rhs.into())
    }
    fn less_equal(self, rhs: impl Into<Operand>) -> BinaryOp<Self, Operand> {
        self.binary(BinaryOpType::LessEqual, rhs.into())
    }
    fn greater(self, rhs: impl Into<Operand>) -> BinaryOp<Self, Operand> {
        self.binary(BinaryOpType::Greater, rhs.into())
    }
    fn greater_equal(self, rhs: impl Into<Operand>) -> BinaryOp<Self, Operand> {
        self.binary(BinaryOpType::GreaterEqual, rhs.into())
    }
    fn like(self, pattern: impl Into<Operand>) -> BinaryOp<Self, Operand> {
        self.binary(BinaryOpType::Like, pattern.into())
    }
    fn is_null(self) -> BinaryOp<Self, Operand> {
        self.binary(BinaryOpType::Is, Operand::Null)
    }
    fn is_not_null(self) -> BinaryOp<Self, Operand> {
        self.binary(BinaryOpType::IsNot, Operand::Null)
    }
    fn and<R: Expression>(self, rhs: R) -> BinaryOp<Self, R> {
        self.binary(BinaryOpType::And, rhs)
    }
    fn or<R: Expression>(self, rhs: R) -> BinaryOp<Self, R> {
        self.binary(BinaryOpType::Or, rhs)
    }
    fn not(self) -> UnaryOp<Self> {
        UnaryOp {
            op: UnaryOpType::Not,
            arg: self,
        }
    }
    fn asc(self) -> Ordered<Self> {
        Ordered {
            order: Order::ASC,
            expression: self,
        }
    }
    fn desc(self) -> Ordered<Self> {
        Ordered {
            order: Order::DESC,
            expression: self,
        }
    }
}

impl<E: Expression> ExpressionExt for E {}
