use crate::{Entity, Error, QueryError, Result, RowLabeled, Status, TableModel, Value};

/// Rebuilds entities, and their attached children when joined, from a row stream.
///
/// Rows carry the parent columns first, in field order, followed by the child
/// columns when a child model is given. Rows of one parent must be contiguous:
/// a new parent is materialized every time the parent key changes.
#[derive(Debug, Clone, Copy)]
pub struct Hydrator<'m> {
    parent: &'m TableModel,
    child: Option<&'m TableModel>,
    limit: Option<usize>,
}

impl<'m> Hydrator<'m> {
    pub fn new(parent: &'m TableModel) -> Self {
        Self {
            parent,
            child: None,
            limit: None,
        }
    }

    pub fn join(mut self, child: Option<&'m TableModel>) -> Self {
        self.child = child;
        self
    }

    /// Maximum number of parents, `None` and `Some(0)` mean unlimited.
    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Checks that `E` can hold the joined children, before any row is read.
    pub fn check<E: Entity>(&self) -> Result<()> {
        if let Some(child) = self.child {
            find_relation(&mut E::new_instance(), child)?;
        }
        Ok(())
    }

    /// Consumes the rows in a single forward pass.
    ///
    /// Stops reading as soon as a parent past the limit would be created, so the
    /// last admitted parent keeps all of its children. Any error discards what
    /// was built so far.
    pub fn hydrate<E: Entity>(
        &self,
        rows: impl IntoIterator<Item = Result<RowLabeled>>,
    ) -> Result<Vec<E>> {
        let parent_columns = self.parent.columns.len();
        let parent_key = self.parent.primary_key_index()?;
        let child = match self.child {
            Some(child) => Some((child, child.primary_key_index()?)),
            None => None,
        };
        let width = parent_columns + child.map_or(0, |(c, _)| c.columns.len());
        let cap = self.limit.filter(|v| *v > 0);
        let mut result: Vec<E> = Vec::new();
        let mut last_key: Option<Value> = None;
        let mut relation = 0;
        let mut read = 0;
        for row in rows {
            let row = row?;
            read += 1;
            if row.values.len() < width {
                return Err(Error::msg(format!(
                    "Row {} has {} columns, expected {} for `{}`",
                    read,
                    row.values.len(),
                    width,
                    self.parent.name
                )));
            }
            let mut values = row.values.into_vec();
            let child_values = values.split_off(parent_columns);
            let key = values[parent_key].clone();
            if last_key.as_ref() != Some(&key) {
                if cap.is_some_and(|cap| result.len() >= cap) {
                    break;
                }
                let mut parent = E::new_instance();
                parent.set_values(values)?;
                parent.set_status(Status::Fetched);
                if let Some((child, _)) = child {
                    relation = find_relation(&mut parent, child)?;
                }
                result.push(parent);
            }
            if let (Some((child, child_key)), Some(parent)) = (child, result.last_mut()) {
                if !child_values[child_key].is_null() {
                    let Some(set) = parent.relation_mut(relation) else {
                        return Err(missing_relation::<E>(child));
                    };
                    set.attach(
                        &key,
                        &mut child_values.into_iter().take(child.columns.len()),
                    )?;
                }
            }
            last_key = Some(key);
        }
        log::trace!(
            "Hydrated {} `{}` from {} rows",
            result.len(),
            self.parent.type_name,
            read
        );
        Ok(result)
    }
}

/// Index of the relation of `parent` accepting entities of `child`.
fn find_relation<E: Entity>(parent: &mut E, child: &TableModel) -> Result<usize> {
    let mut index = 0;
    while let Some(set) = parent.relation_mut(index) {
        if set.child_path() == child.type_path {
            return Ok(index);
        }
        index += 1;
    }
    Err(missing_relation::<E>(child))
}

fn missing_relation<E: Entity>(child: &TableModel) -> Error {
    QueryError::MissingRelation {
        parent: E::table().type_name.into(),
        child: child.type_name.into(),
    }
    .into()
}
