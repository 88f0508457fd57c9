use thiserror::Error;

/// Failures raised by the query layer itself, as opposed to the backend.
///
/// Carried inside [`crate::Error`], either as the error or as context, so
/// callers classify with `error.downcast_ref::<QueryError>()`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A filter, ordering or aggregate names a column the table does not have.
    #[error("Column `{column}` does not exist in table `{table}`")]
    UnknownColumn { table: String, column: String },
    /// The joined child declares no foreign key to the parent.
    #[error("Table `{child}` has no column referencing `{parent}`")]
    MissingJoinKey { parent: String, child: String },
    /// The join names a type that was never registered.
    #[error("Type `{type_name}` is not registered")]
    UnknownType { type_name: String },
    /// The parent has no relation collection accepting the joined child.
    #[error("Entity `{parent}` has no relation accepting `{child}`")]
    MissingRelation { parent: String, child: String },
    /// The backend rejected the statement.
    #[error("Error while executing the query:\n{query}")]
    Execution { query: String },
}
