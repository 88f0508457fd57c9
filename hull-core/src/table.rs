use crate::{ColumnDef, Error, QueryError, Result};

/// Metadata for one entity type: where it lives and what it is made of.
#[derive(Default, Debug, Clone)]
pub struct TableModel {
    /// Table name.
    pub name: &'static str,
    /// Rust type name of the entity, used to resolve join targets.
    pub type_name: &'static str,
    /// Fully qualified path of the entity type, identifies it in the registry.
    pub type_path: &'static str,
    /// Mapped columns, in field order.
    pub columns: Vec<ColumnDef>,
    /// Name of the primary key column.
    pub primary_key: &'static str,
    /// Numeric tag assigned on registration, `0` while unregistered.
    pub type_tag: u32,
}

impl TableModel {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.name)
    }

    /// Position of the primary key in the column list.
    pub fn primary_key_index(&self) -> Result<usize> {
        self.column_index(self.primary_key).ok_or_else(|| {
            QueryError::UnknownColumn {
                table: self.name.into(),
                column: self.primary_key.into(),
            }
            .into()
        })
    }

    /// The column of this table referencing the primary key of `table`.
    pub fn foreign_key_to(&self, table: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.references == Some(table))
    }

    /// Whether both models describe the same Rust type.
    pub fn same_type(&self, other: &TableModel) -> bool {
        self.type_path == other.type_path
    }

    /// Checks the invariants the registry relies on.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::msg(format!(
                "Entity {} does not declare a table name",
                self.type_name
            )));
        }
        self.primary_key_index()
            .map_err(|e| e.context(format!("Table {} has no primary key column", self.name)))?;
        for (i, column) in self.columns.iter().enumerate() {
            if self.columns[..i].iter().any(|c| c.name == column.name) {
                return Err(Error::msg(format!(
                    "Column {} is declared twice in table {}",
                    column.name, self.name
                )));
            }
        }
        Ok(())
    }
}
