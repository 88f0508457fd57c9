use crate::{Context, Error, RelationSet, Result, Row, RowLabeled, TableModel, Value};
use std::fmt::{self, Debug, Formatter};

/// Where an entity instance comes from.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Constructed by the caller.
    #[default]
    New,
    /// Materialized from a backend row.
    Fetched,
}

/// Accessor pair for one mapped field.
pub struct Field<E> {
    pub name: &'static str,
    pub get: fn(&E) -> Value,
    pub set: fn(&mut E, Value) -> Result<()>,
}

impl<E> Clone for Field<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Field<E> {}

impl<E> Debug for Field<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field").field("name", &self.name).finish()
    }
}

/// A Rust type mapped to one table.
///
/// Usually derived with `#[derive(Entity)]`. The accessor table returned by
/// [`Entity::fields`] is in the same order as [`TableModel::columns`], which is
/// also the order of the columns generated for a select.
pub trait Entity: Sized + 'static {
    fn table() -> &'static TableModel;

    /// Name of the table, without building the model.
    fn table_name() -> &'static str {
        Self::table().name
    }

    fn fields() -> &'static [Field<Self>];

    /// A blank instance ready to be populated.
    fn new_instance() -> Self;

    fn status(&self) -> Status;

    fn set_status(&mut self, status: Status);

    /// Relation collection at `index`, `None` past the last one.
    fn relation_mut(&mut self, _index: usize) -> Option<&mut dyn RelationSet> {
        None
    }

    /// Assigns the values positionally, in field order.
    fn set_values(&mut self, values: impl IntoIterator<Item = Value>) -> Result<()> {
        let mut values = values.into_iter();
        for field in Self::fields() {
            let Some(value) = values.next() else {
                return Err(Error::msg(format!(
                    "Missing value for column `{}` of table `{}`",
                    field.name,
                    Self::table().name
                )));
            };
            (field.set)(self, value).with_context(|| {
                format!(
                    "While setting field `{}` of `{}`",
                    field.name,
                    Self::table().type_name
                )
            })?;
        }
        Ok(())
    }

    fn from_values(values: impl IntoIterator<Item = Value>) -> Result<Self> {
        let mut result = Self::new_instance();
        result.set_values(values)?;
        Ok(result)
    }

    /// Builds an instance matching the columns by label.
    fn from_row(row: &RowLabeled) -> Result<Self> {
        let mut result = Self::new_instance();
        for field in Self::fields() {
            let value = row.get_column(field.name).ok_or_else(|| {
                Error::msg(format!(
                    "Column `{}` is missing from the row, available: {:?}",
                    field.name,
                    row.names()
                ))
            })?;
            (field.set)(&mut result, value.clone())?;
        }
        Ok(result)
    }

    fn primary_key(&self) -> Value {
        let name = Self::table().primary_key;
        Self::fields()
            .iter()
            .find(|f| f.name == name)
            .map(|f| (f.get)(self))
            .unwrap_or_default()
    }

    fn row(&self) -> Row {
        Self::fields().iter().map(|f| (f.get)(self)).collect()
    }
}
