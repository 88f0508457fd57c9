use crate::SqlWriter;

/// Backend description: its name and the SQL dialect it speaks.
pub trait Driver {
    type SqlWriter: SqlWriter;

    const NAME: &'static str;

    fn sql_writer(&self) -> Self::SqlWriter;
}
