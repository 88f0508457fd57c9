use crate::{Result, Value};
use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

/// Effect of a modifying statement.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowsAffected {
    /// Total number of rows impacted.
    pub rows_affected: u64,
    /// Backend specific last inserted identifier when available.
    pub last_affected_id: Option<i64>,
}

impl Extend<RowsAffected> for RowsAffected {
    fn extend<T: IntoIterator<Item = RowsAffected>>(&mut self, iter: T) {
        for elem in iter {
            self.rows_affected += elem.rows_affected;
            if elem.last_affected_id.is_some() {
                self.last_affected_id = elem.last_affected_id;
            }
        }
    }
}

/// Column labels shared by every row of one result.
pub type RowNames = Arc<[String]>;
/// Values of one row, aligned by index with its `RowNames`.
pub type Row = Box<[Value]>;

/// A result row with its column labels.
#[derive(Debug, Clone)]
pub struct RowLabeled {
    pub labels: RowNames,
    pub values: Row,
}

impl RowLabeled {
    pub fn new(labels: RowNames, values: Row) -> Self {
        Self { labels, values }
    }
    pub fn names(&self) -> &[String] {
        &self.labels
    }
    pub fn values(&self) -> &[Value] {
        &self.values
    }
    pub fn get_column(&self, name: &str) -> Option<&Value> {
        self.labels
            .iter()
            .position(|v| v == name)
            .map(|i| &self.values[i])
    }
}

impl From<RowLabeled> for Row {
    fn from(value: RowLabeled) -> Self {
        value.values
    }
}

/// Forward only, single pass sequence of rows produced by an executor.
///
/// Backend resources held by the cursor are released when it is dropped.
pub struct RowCursor<'a> {
    rows: Box<dyn Iterator<Item = Result<RowLabeled>> + 'a>,
}

impl<'a> RowCursor<'a> {
    pub fn new(rows: impl Iterator<Item = Result<RowLabeled>> + 'a) -> Self {
        Self {
            rows: Box::new(rows),
        }
    }
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }
}

impl<'a> Iterator for RowCursor<'a> {
    type Item = Result<RowLabeled>;
    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next()
    }
}

impl<'a> Debug for RowCursor<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("RowCursor")
    }
}
