use crate::{CBox, SqliteDriver, SqliteRows, error_message_from_ptr};
use hull_core::{
    Connection, Context, Driver, Error, Executor, Result, RowCursor, RowsAffected, truncate_long,
};
use libsqlite3_sys::{
    SQLITE_DONE, SQLITE_OK, SQLITE_OPEN_CREATE, SQLITE_OPEN_READWRITE,
    SQLITE_OPEN_URI, SQLITE_ROW, sqlite3, sqlite3_busy_timeout, sqlite3_close, sqlite3_errmsg,
    sqlite3_finalize, sqlite3_last_insert_rowid, sqlite3_open_v2, sqlite3_prepare_v2,
    sqlite3_step, sqlite3_stmt, sqlite3_stmt_readonly, sqlite3_total_changes64,
};
use std::{
    ffi::{CStr, CString, c_char, c_int},
    ptr,
    time::Duration,
};

/// How long a statement waits on a locked database before failing.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection to a SQLite database file or an in memory database.
pub struct SqliteConnection {
    pub(crate) connection: CBox<*mut sqlite3>,
}

fn is_blank(sql: *const c_char) -> bool {
    sql.is_null()
        || unsafe { CStr::from_ptr(sql) }
            .to_bytes()
            .iter()
            .all(u8::is_ascii_whitespace)
}

impl SqliteConnection {
    /// Sets how long statements wait for a lock held by another connection.
    pub fn set_busy_timeout(&mut self, timeout: Duration) -> Result<()> {
        let millis = c_int::try_from(timeout.as_millis()).unwrap_or(c_int::MAX);
        let rc = unsafe { sqlite3_busy_timeout(*self.connection, millis) };
        if rc != SQLITE_OK {
            return Err(self.last_error());
        }
        Ok(())
    }

    fn last_error(&self) -> Error {
        let error = Error::msg(
            error_message_from_ptr(&unsafe { sqlite3_errmsg(*self.connection) }).to_string(),
        );
        log::error!("{}", error);
        error
    }

    /// Prepare the first statement found in `sql`, returns it along with the remaining text.
    fn prepare(&self, sql: *const c_char) -> Result<(CBox<*mut sqlite3_stmt>, *const c_char)> {
        let mut statement: CBox<*mut sqlite3_stmt> = CBox::new(ptr::null_mut(), |p| unsafe {
            sqlite3_finalize(p);
        });
        let mut tail = ptr::null();
        let rc = unsafe {
            sqlite3_prepare_v2(*self.connection, sql, -1, &mut *statement, &mut tail)
        };
        if rc != SQLITE_OK {
            return Err(self.last_error());
        }
        Ok((statement, tail))
    }

    fn step_to_end(&self, statement: &CBox<*mut sqlite3_stmt>) -> Result<()> {
        loop {
            match unsafe { sqlite3_step(**statement) } {
                SQLITE_ROW => continue,
                SQLITE_DONE => return Ok(()),
                _ => return Err(self.last_error()),
            }
        }
    }
}

impl Executor for SqliteConnection {
    type Driver = SqliteDriver;

    fn driver(&self) -> &Self::Driver {
        &SqliteDriver {}
    }

    fn fetch<'s>(&'s mut self, query: &str) -> Result<RowCursor<'s>> {
        let sql = CString::new(query)
            .with_context(|| format!("Query contains a nul byte:\n{}", truncate_long!(query)))?;
        let (statement, tail) = self.prepare(sql.as_ptr())?;
        if !is_blank(tail) {
            let error = Error::msg("Cannot fetch from more than one statement at a time");
            log::error!("{}", error);
            return Err(error);
        }
        if statement.is_null() {
            return Ok(RowCursor::empty());
        }
        Ok(RowCursor::new(SqliteRows::new(statement)?))
    }

    fn execute(&mut self, query: &str) -> Result<RowsAffected> {
        let sql = CString::new(query)
            .with_context(|| format!("Query contains a nul byte:\n{}", truncate_long!(query)))?;
        let mut result = RowsAffected::default();
        let mut head = sql.as_ptr();
        while !is_blank(head) {
            let (statement, tail) = self.prepare(head)?;
            if statement.is_null() {
                // Only comments left
                break;
            }
            head = tail;
            let before = unsafe { sqlite3_total_changes64(*self.connection) };
            self.step_to_end(&statement)?;
            unsafe {
                if sqlite3_stmt_readonly(*statement) == 0 {
                    let changes = sqlite3_total_changes64(*self.connection) - before;
                    result.rows_affected += changes as u64;
                    if changes > 0 {
                        result.last_affected_id =
                            Some(sqlite3_last_insert_rowid(*self.connection));
                    }
                }
            }
        }
        Ok(result)
    }
}

impl Connection for SqliteConnection {
    fn connect(url: &str) -> Result<SqliteConnection> {
        let prefix = format!("{}://", <Self::Driver as Driver>::NAME);
        let Some(path) = url.strip_prefix(&prefix) else {
            let error = Error::msg(format!(
                "Expected sqlite connection url to start with `{}`",
                &prefix
            ));
            log::error!("{}", error);
            return Err(error);
        };
        let path = if path.contains('?') && !path.starts_with("file:") {
            format!("file:{}", path)
        } else {
            path.to_string()
        };
        let context = || format!("Error while decoding connection URL: `{}`", url);
        let path = CString::new(path).with_context(context)?;
        let mut connection: CBox<*mut sqlite3> = CBox::new(ptr::null_mut(), |p| unsafe {
            sqlite3_close(p);
        });
        let rc = unsafe {
            sqlite3_open_v2(
                path.as_ptr(),
                &mut *connection,
                SQLITE_OPEN_URI | SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE,
                ptr::null(),
            )
        };
        let mut result = Self { connection };
        if rc != SQLITE_OK {
            return Err(result.last_error().context(context()));
        }
        result.set_busy_timeout(DEFAULT_BUSY_TIMEOUT)?;
        log::debug!("Connected to {}", url);
        Ok(result)
    }
}
