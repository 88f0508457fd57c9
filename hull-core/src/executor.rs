use crate::{Driver, Result, RowCursor, RowsAffected};

/// Runs command text against a backend.
pub trait Executor {
    type Driver: Driver;

    fn driver(&self) -> &Self::Driver;

    /// Execute the query and return its rows.
    ///
    /// The cursor borrows the executor, one cursor at a time can be alive.
    fn fetch<'s>(&'s mut self, query: &str) -> Result<RowCursor<'s>>;

    /// Execute the query and return the total number of rows affected.
    fn execute(&mut self, query: &str) -> Result<RowsAffected>;
}
