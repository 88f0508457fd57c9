use crate::{
    Aggregate, BinaryOp, BinaryOpType, ColumnRef, Expression, Operand, Order, Ordered,
    PredicateState, QueryError, Result, SelectKind, TableModel, UnaryOp, UnaryOpType, Value,
    possibly_parenthesized, separated_by,
    writer::{Context, Fragment},
};
use std::fmt::Write;
use time::{Date, PrimitiveDateTime, Time};

macro_rules! write_integer {
    ($out:ident, $value:expr) => {{
        let mut buffer = itoa::Buffer::new();
        $out.push_str(buffer.format($value));
    }};
}
macro_rules! write_float {
    ($this:ident, $context:ident, $out:ident, $value:expr) => {{
        if $value.is_infinite() {
            $this.write_value_infinity($context, $out, $value.is_sign_negative());
        } else if $value.is_nan() {
            $this.write_value_nan($context, $out);
        } else {
            let mut buffer = ryu::Buffer::new();
            $out.push_str(buffer.format($value));
        }
    }};
}

/// Dialect printer converting queries into SQL text.
///
/// Every method has a default generic implementation, drivers override the
/// ones their backend spells differently.
pub trait SqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter;

    /// Escape occurrences of `search` with `replace` while copying into `out`.
    fn write_escaped(
        &self,
        _context: &mut Context,
        out: &mut String,
        value: &str,
        search: char,
        replace: &str,
    ) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    /// Quote identifiers ("name") doubling inner quotes.
    fn write_identifier_quoted(&self, context: &mut Context, out: &mut String, value: &str) {
        out.push('"');
        self.write_escaped(context, out, value, '"', "\"\"");
        out.push('"');
    }

    /// Render a column reference, qualified by its table when the context asks for it.
    fn write_column_ref(&self, context: &mut Context, out: &mut String, value: &ColumnRef) {
        if context.qualify_columns {
            let table = if value.table.is_empty() {
                context.default_table
            } else {
                value.table.as_ref()
            };
            if !table.is_empty() {
                self.write_identifier_quoted(context, out, table);
                out.push('.');
            }
        }
        self.write_identifier_quoted(context, out, &value.name);
    }

    /// Render a concrete value, quoted and escaped.
    fn write_value(&self, context: &mut Context, out: &mut String, value: &Value) {
        match value {
            v if v.is_null() => self.write_value_none(context, out),
            Value::Boolean(Some(v)) => self.write_value_bool(context, out, *v),
            Value::Int8(Some(v)) => write_integer!(out, *v),
            Value::Int16(Some(v)) => write_integer!(out, *v),
            Value::Int32(Some(v)) => write_integer!(out, *v),
            Value::Int64(Some(v)) => write_integer!(out, *v),
            Value::UInt8(Some(v)) => write_integer!(out, *v),
            Value::UInt16(Some(v)) => write_integer!(out, *v),
            Value::UInt32(Some(v)) => write_integer!(out, *v),
            Value::UInt64(Some(v)) => write_integer!(out, *v),
            Value::Float32(Some(v)) => write_float!(self, context, out, *v),
            Value::Float64(Some(v)) => write_float!(self, context, out, *v),
            Value::Decimal(Some(v)) => drop(write!(out, "{}", v)),
            Value::Varchar(Some(v)) => self.write_value_string(context, out, v),
            Value::Blob(Some(v)) => self.write_value_blob(context, out, v.as_ref()),
            Value::Date(Some(v)) => self.write_value_date(context, out, v, false),
            Value::Time(Some(v)) => self.write_value_time(context, out, v, false),
            Value::Timestamp(Some(v)) => self.write_value_timestamp(context, out, v),
            Value::Uuid(Some(v)) => drop(write!(out, "'{}'", v)),
            _ => log::error!("Cannot write {:?}", value),
        };
    }

    fn write_value_none(&self, _context: &mut Context, out: &mut String) {
        out.push_str("NULL");
    }

    fn write_value_bool(&self, _context: &mut Context, out: &mut String, value: bool) {
        out.push_str(["false", "true"][value as usize]);
    }

    fn write_value_infinity(&self, _context: &mut Context, out: &mut String, negative: bool) {
        out.push_str(if negative {
            "CAST('-Infinity' AS DOUBLE)"
        } else {
            "CAST('Infinity' AS DOUBLE)"
        });
    }

    fn write_value_nan(&self, _context: &mut Context, out: &mut String) {
        out.push_str("CAST('NaN' AS DOUBLE)");
    }

    /// Render a string literal using single quotes.
    fn write_value_string(&self, context: &mut Context, out: &mut String, value: &str) {
        out.push('\'');
        self.write_escaped(context, out, value, '\'', "''");
        out.push('\'');
    }

    fn write_value_blob(&self, _context: &mut Context, out: &mut String, value: &[u8]) {
        out.push('\'');
        for b in value {
            let _ = write!(out, "\\x{:02X}", b);
        }
        out.push('\'');
    }

    /// Render a date, bare when part of a timestamp.
    fn write_value_date(
        &self,
        _context: &mut Context,
        out: &mut String,
        value: &Date,
        timestamp: bool,
    ) {
        let b = if timestamp { "" } else { "'" };
        let _ = write!(
            out,
            "{b}{:04}-{:02}-{:02}{b}",
            value.year(),
            value.month() as u8,
            value.day()
        );
    }

    /// Render a time, bare when part of a timestamp.
    fn write_value_time(
        &self,
        _context: &mut Context,
        out: &mut String,
        value: &Time,
        timestamp: bool,
    ) {
        let b = if timestamp { "" } else { "'" };
        let _ = write!(
            out,
            "{b}{:02}:{:02}:{:02}",
            value.hour(),
            value.minute(),
            value.second(),
        );
        let mut subsecond = value.nanosecond();
        if subsecond != 0 {
            let mut width = 9;
            while subsecond % 10 == 0 {
                subsecond /= 10;
                width -= 1;
            }
            let _ = write!(out, ".{:0width$}", subsecond);
        }
        out.push_str(b);
    }

    fn write_value_timestamp(
        &self,
        context: &mut Context,
        out: &mut String,
        value: &PrimitiveDateTime,
    ) {
        out.push('\'');
        self.write_value_date(context, out, &value.date(), true);
        out.push('T');
        self.write_value_time(context, out, &value.time(), true);
        out.push('\'');
    }

    /// Precedence table for unary operators.
    fn expression_unary_op_precedence(&self, value: &UnaryOpType) -> i32 {
        match value {
            UnaryOpType::Negative => 1250,
            UnaryOpType::Not => 250,
        }
    }

    /// Precedence table for binary operators.
    fn expression_binary_op_precedence(&self, value: &BinaryOpType) -> i32 {
        match value {
            BinaryOpType::Or => 100,
            BinaryOpType::And => 200,
            BinaryOpType::Equal
            | BinaryOpType::NotEqual
            | BinaryOpType::Less
            | BinaryOpType::Greater
            | BinaryOpType::LessEqual
            | BinaryOpType::GreaterEqual => 300,
            BinaryOpType::Is | BinaryOpType::IsNot | BinaryOpType::Like | BinaryOpType::NotLike => {
                400
            }
            BinaryOpType::Subtraction | BinaryOpType::Addition => 800,
            BinaryOpType::Multiplication | BinaryOpType::Division | BinaryOpType::Remainder => 900,
        }
    }

    fn write_expression_operand(&self, context: &mut Context, out: &mut String, value: &Operand) {
        match value {
            Operand::Column(v) => self.write_column_ref(context, out, v),
            Operand::Variable(v) => self.write_value(context, out, v),
            Operand::Asterisk => out.push('*'),
            Operand::Call(function, args) => {
                out.push_str(function);
                out.push('(');
                separated_by(
                    out,
                    args,
                    |out, v| {
                        v.write_query(self.as_dyn(), context, out);
                    },
                    ", ",
                );
                out.push(')');
            }
            Operand::Raw(v) => out.push_str(v),
            Operand::Null => self.write_value_none(context, out),
        };
    }

    fn write_expression_unary_op(
        &self,
        context: &mut Context,
        out: &mut String,
        value: &UnaryOp<&dyn Expression>,
    ) {
        match value.op {
            UnaryOpType::Negative => out.push('-'),
            UnaryOpType::Not => out.push_str("NOT "),
        };
        possibly_parenthesized!(
            out,
            value.arg.precedence(self.as_dyn()) <= self.expression_unary_op_precedence(&value.op),
            value.arg.write_query(self.as_dyn(), context, out)
        );
    }

    /// Render a binary operation, parenthesizing operands that bind weaker.
    fn write_expression_binary_op(
        &self,
        context: &mut Context,
        out: &mut String,
        value: &BinaryOp<&dyn Expression, &dyn Expression>,
    ) {
        let infix = match value.op {
            BinaryOpType::Multiplication => " * ",
            BinaryOpType::Division => " / ",
            BinaryOpType::Remainder => " % ",
            BinaryOpType::Addition => " + ",
            BinaryOpType::Subtraction => " - ",
            BinaryOpType::Is => " IS ",
            BinaryOpType::IsNot => " IS NOT ",
            BinaryOpType::Like => " LIKE ",
            BinaryOpType::NotLike => " NOT LIKE ",
            BinaryOpType::Equal => " = ",
            BinaryOpType::NotEqual => " != ",
            BinaryOpType::Less => " < ",
            BinaryOpType::LessEqual => " <= ",
            BinaryOpType::Greater => " > ",
            BinaryOpType::GreaterEqual => " >= ",
            BinaryOpType::And => " AND ",
            BinaryOpType::Or => " OR ",
        };
        let precedence = self.expression_binary_op_precedence(&value.op);
        possibly_parenthesized!(
            out,
            value.lhs.precedence(self.as_dyn()) < precedence,
            value.lhs.write_query(self.as_dyn(), context, out)
        );
        out.push_str(infix);
        possibly_parenthesized!(
            out,
            value.rhs.precedence(self.as_dyn()) <= precedence,
            value.rhs.write_query(self.as_dyn(), context, out)
        );
    }

    /// Render an ordered expression, the direction appears only inside ORDER BY.
    fn write_expression_ordered(
        &self,
        context: &mut Context,
        out: &mut String,
        value: &Ordered<&dyn Expression>,
    ) {
        value.expression.write_query(self.as_dyn(), context, out);
        if context.fragment == Fragment::SqlSelectOrderBy {
            self.write_order(context, out, value.order);
        }
    }

    fn write_order(&self, _context: &mut Context, out: &mut String, order: Order) {
        out.push_str(match order {
            Order::ASC => " ASC",
            Order::DESC => " DESC",
        });
    }

    /// Render the projection: parent columns then child columns, each in field order.
    fn write_select_columns(
        &self,
        context: &mut Context,
        out: &mut String,
        table: &TableModel,
        join: Option<&TableModel>,
    ) {
        let columns = table
            .columns
            .iter()
            .map(|c| c.column_ref(table.name))
            .chain(
                join.into_iter()
                    .flat_map(|j| j.columns.iter().map(move |c| c.column_ref(j.name))),
            );
        separated_by(
            out,
            columns,
            |out, v| {
                self.write_column_ref(context, out, &v);
            },
            ", ",
        );
    }

    /// Render an aggregate projection.
    fn write_aggregate(
        &self,
        context: &mut Context,
        out: &mut String,
        aggregate: &Aggregate,
        table: &TableModel,
        joined: bool,
    ) {
        out.push_str(aggregate.function());
        out.push('(');
        match aggregate.field() {
            None if joined => {
                out.push_str("DISTINCT ");
                self.write_column_ref(context, out, &ColumnRef::new(table.primary_key));
            }
            None => out.push('*'),
            Some(field) => {
                self.write_column_ref(context, out, &ColumnRef::new(field.to_owned()))
            }
        }
        out.push(')');
    }

    /// Render the `LEFT JOIN` clause matching the child foreign key with the parent key.
    fn write_join(
        &self,
        context: &mut Context,
        out: &mut String,
        table: &TableModel,
        child: &TableModel,
    ) -> Result<()> {
        let Some(foreign_key) = child.foreign_key_to(table.name) else {
            return Err(QueryError::MissingJoinKey {
                parent: table.name.into(),
                child: child.name.into(),
            }
            .into());
        };
        out.push_str("LEFT JOIN ");
        self.write_identifier_quoted(context, out, child.name);
        out.push_str(" ON ");
        self.write_column_ref(context, out, &foreign_key.column_ref(child.name));
        out.push_str(" = ");
        self.write_column_ref(context, out, &ColumnRef::qualified(table.name, table.primary_key));
        Ok(())
    }

    /// Render the filters joined by `AND`.
    fn write_filters(
        &self,
        context: &mut Context,
        out: &mut String,
        filters: &[Box<dyn Expression>],
    ) {
        let and = self.expression_binary_op_precedence(&BinaryOpType::And);
        separated_by(
            out,
            filters,
            |out, v| {
                possibly_parenthesized!(
                    out,
                    filters.len() > 1 && v.precedence(self.as_dyn()) < and,
                    v.write_query(self.as_dyn(), context, out)
                );
            },
            " AND ",
        );
    }

    /// Render the ordering keys: field pairs, then expressions, then the parent key when joined.
    fn write_order_by(
        &self,
        context: &mut Context,
        out: &mut String,
        state: &PredicateState,
        table: &TableModel,
        joined: bool,
    ) {
        let len = out.len();
        separated_by(
            out,
            &state.orders,
            |out, (field, order)| {
                self.write_column_ref(context, out, &ColumnRef::new(field.clone()));
                self.write_order(context, out, *order);
            },
            ", ",
        );
        for expression in &state.order_expressions {
            if out.len() > len {
                out.push_str(", ");
            }
            expression.write_query(self.as_dyn(), context, out);
        }
        if joined {
            if out.len() > len {
                out.push_str(", ");
            }
            self.write_column_ref(context, out, &ColumnRef::new(table.primary_key));
        }
    }

    /// Emit a SELECT over `table`, joined with `join` when given.
    ///
    /// Fails without writing anything when a referenced column does not exist.
    fn write_select(
        &self,
        out: &mut String,
        kind: &SelectKind,
        state: &PredicateState,
        table: &TableModel,
        join: Option<&TableModel>,
    ) -> Result<()> {
        if let SelectKind::Aggregate(aggregate) = kind {
            if let Some(field) = aggregate.field() {
                if !table.has_column(field) {
                    return Err(QueryError::UnknownColumn {
                        table: table.name.into(),
                        column: field.into(),
                    }
                    .into());
                }
            }
        }
        state.validate(table, join)?;
        let columns = table.columns.len() + join.map_or(0, |v| v.columns.len());
        out.reserve(128 + columns * 32);
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("SELECT ");
        let mut context = Context::new(Fragment::SqlSelect, join.is_some(), table.name);
        match kind {
            SelectKind::All => self.write_select_columns(&mut context, out, table, join),
            SelectKind::Aggregate(aggregate) => {
                self.write_aggregate(&mut context, out, aggregate, table, join.is_some())
            }
        }
        out.push_str("\nFROM ");
        self.write_identifier_quoted(
            &mut context.switch_fragment(Fragment::SqlSelectFrom),
            out,
            table.name,
        );
        if let Some(child) = join {
            out.push('\n');
            self.write_join(
                &mut context.switch_fragment(Fragment::SqlJoin),
                out,
                table,
                child,
            )?;
        }
        if !state.filters.is_empty() {
            out.push_str("\nWHERE ");
            self.write_filters(
                &mut context.switch_fragment(Fragment::SqlSelectWhere),
                out,
                &state.filters,
            );
        }
        if *kind == SelectKind::All && (state.has_ordering() || join.is_some()) {
            out.push_str("\nORDER BY ");
            self.write_order_by(
                &mut context.switch_fragment(Fragment::SqlSelectOrderBy),
                out,
                state,
                table,
                join.is_some(),
            );
        }
        out.push(';');
        Ok(())
    }

    /// Emit a DELETE over `table` restricted by the filters, join and ordering are ignored.
    fn write_delete(
        &self,
        out: &mut String,
        state: &PredicateState,
        table: &TableModel,
    ) -> Result<()> {
        state.validate_filters(table)?;
        out.reserve(64 + table.name.len());
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("DELETE FROM ");
        let mut context = Context::new(Fragment::SqlDeleteFrom, false, table.name);
        self.write_identifier_quoted(&mut context, out, table.name);
        if !state.filters.is_empty() {
            out.push_str("\nWHERE ");
            self.write_filters(
                &mut context.switch_fragment(Fragment::SqlDeleteFromWhere),
                out,
                &state.filters,
            );
        }
        out.push(';');
        Ok(())
    }
}

/// Generic SQL writer, used when the backend needs no dialect tweaks.
#[derive(Default, Debug, Clone, Copy)]
pub struct GenericSqlWriter;

impl GenericSqlWriter {
    pub fn new() -> Self {
        Self
    }
}

impl SqlWriter for GenericSqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }
}
