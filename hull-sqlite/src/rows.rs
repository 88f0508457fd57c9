use crate::{
    CBox, SqliteConnection, error_message_from_ptr,
    extract::{extract_name, extract_value},
};
use hull_core::{Error, Result, Row, RowLabeled, RowNames};
use libsqlite3_sys::{
    SQLITE_DONE, SQLITE_ROW, sqlite3_column_count, sqlite3_db_handle, sqlite3_errmsg,
    sqlite3_step, sqlite3_stmt,
};
use std::{ffi::c_int, marker::PhantomData};

/// Rows of a prepared statement, stepped one at a time.
///
/// The statement is finalized when the value is dropped, consumed or not.
pub struct SqliteRows<'c> {
    statement: CBox<*mut sqlite3_stmt>,
    labels: RowNames,
    count: c_int,
    done: bool,
    _connection: PhantomData<&'c mut SqliteConnection>,
}

impl<'c> SqliteRows<'c> {
    pub(crate) fn new(statement: CBox<*mut sqlite3_stmt>) -> Result<Self> {
        let count = unsafe { sqlite3_column_count(*statement) };
        let labels = (0..count)
            .map(|i| extract_name(*statement, i))
            .collect::<Result<RowNames>>()?;
        Ok(Self {
            statement,
            labels,
            count,
            done: false,
            _connection: PhantomData,
        })
    }

    pub fn labels(&self) -> &RowNames {
        &self.labels
    }
}

impl<'c> Iterator for SqliteRows<'c> {
    type Item = Result<RowLabeled>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match unsafe { sqlite3_step(*self.statement) } {
            SQLITE_DONE => {
                self.done = true;
                None
            }
            SQLITE_ROW => {
                let statement = *self.statement;
                let values = (0..self.count)
                    .map(|i| extract_value(statement, i))
                    .collect::<Result<Row>>();
                Some(values.map(|v| RowLabeled::new(self.labels.clone(), v)))
            }
            _ => {
                self.done = true;
                let error = Error::msg(
                    error_message_from_ptr(&unsafe {
                        sqlite3_errmsg(sqlite3_db_handle(*self.statement))
                    })
                    .to_string(),
                );
                log::error!("{}", error);
                Some(Err(error))
            }
        }
    }
}
