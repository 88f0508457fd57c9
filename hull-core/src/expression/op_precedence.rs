use crate::{Expression, SqlWriter};

/// Numeric binding strength of an expression, writers use it to insert parentheses.
pub trait OpPrecedence {
    /// Lower numbers bind weaker.
    fn precedence(&self, writer: &dyn SqlWriter) -> i32;
}

impl<T: OpPrecedence + ?Sized> OpPrecedence for &T {
    fn precedence(&self, writer: &dyn SqlWriter) -> i32 {
        (**self).precedence(writer)
    }
}

impl OpPrecedence for Box<dyn Expression> {
    fn precedence(&self, writer: &dyn SqlWriter) -> i32 {
        self.as_ref().precedence(writer)
    }
}
