use crate::{ColumnRef, Expression, Order, QueryError, Result, TableModel};
use std::borrow::Cow;

/// Aggregate function computed by a scalar select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Aggregate {
    Count,
    Max(Cow<'static, str>),
    Min(Cow<'static, str>),
    Average(Cow<'static, str>),
}

impl Aggregate {
    pub fn function(&self) -> &'static str {
        match self {
            Aggregate::Count => "COUNT",
            Aggregate::Max(..) => "MAX",
            Aggregate::Min(..) => "MIN",
            Aggregate::Average(..) => "AVG",
        }
    }
    /// The aggregated column, `None` for `COUNT`.
    pub fn field(&self) -> Option<&str> {
        match self {
            Aggregate::Count => None,
            Aggregate::Max(v) | Aggregate::Min(v) | Aggregate::Average(v) => Some(v),
        }
    }
}

/// What a select projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectKind {
    /// Every column of the table, followed by the joined table ones.
    All,
    Aggregate(Aggregate),
}

/// The child type whose rows are attached to the selected parents.
#[derive(Debug, Clone)]
pub struct JoinTarget {
    /// Type name of the child entity.
    pub child_type: Cow<'static, str>,
    /// Model known at build time, otherwise resolved through the registry.
    pub model: Option<&'static TableModel>,
}

/// Filters, ordering and join accumulated by a query.
#[derive(Default, Debug)]
pub struct PredicateState {
    /// Conjoined with `AND`.
    pub filters: Vec<Box<dyn Expression>>,
    pub orders: Vec<(Cow<'static, str>, Order)>,
    pub order_expressions: Vec<Box<dyn Expression>>,
    pub join: Option<JoinTarget>,
}

impl PredicateState {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn has_ordering(&self) -> bool {
        !self.orders.is_empty() || !self.order_expressions.is_empty()
    }

    /// Checks every referenced column against `table` and, when joined, `join`.
    pub fn validate(&self, table: &TableModel, join: Option<&TableModel>) -> Result<()> {
        if let Some(child) = join {
            if child.foreign_key_to(table.name).is_none() {
                return Err(QueryError::MissingJoinKey {
                    parent: table.name.into(),
                    child: child.name.into(),
                }
                .into());
            }
        }
        for (field, _) in &self.orders {
            if !table.has_column(field) {
                return Err(unknown_column(table.name, field));
            }
        }
        check_columns(
            self.filters.iter().chain(&self.order_expressions),
            table,
            join,
        )
    }

    /// Checks the filters alone, against `table`.
    pub fn validate_filters(&self, table: &TableModel) -> Result<()> {
        check_columns(self.filters.iter(), table, None)
    }
}

fn check_columns<'a>(
    expressions: impl Iterator<Item = &'a Box<dyn Expression>>,
    table: &TableModel,
    join: Option<&TableModel>,
) -> Result<()> {
    for expression in expressions {
        let mut result = Ok(());
        expression.visit_columns(&mut |column| {
            if result.is_ok() {
                result = resolve_column(column, table, join);
            }
        });
        result?;
    }
    Ok(())
}

fn unknown_column(table: &str, column: &str) -> crate::Error {
    QueryError::UnknownColumn {
        table: table.into(),
        column: column.into(),
    }
    .into()
}

fn resolve_column(column: &ColumnRef, table: &TableModel, join: Option<&TableModel>) -> Result<()> {
    let target = if column.table.is_empty() || column.table == table.name {
        Some(table)
    } else {
        join.filter(|v| v.name == column.table)
    };
    match target {
        Some(target) if target.has_column(&column.name) => Ok(()),
        Some(target) => Err(unknown_column(target.name, &column.name)),
        None => Err(unknown_column(&column.table, &column.name)),
    }
}
