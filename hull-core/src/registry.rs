use crate::{Entity, Error, Result, TableModel};

/// Maps entity types to their table metadata.
///
/// Each registered model receives a distinct numeric tag starting from `1`.
/// Type name, table name and tag always resolve to the same model.
#[derive(Default, Debug, Clone)]
pub struct Registry {
    tables: Vec<TableModel>,
}

impl Registry {
    pub fn new() -> Self {
        Default::default()
    }

    /// Registers `E`, registering it again returns the existing model.
    ///
    /// Fails when the table or the short type name already belongs to another type.
    pub fn register<E: Entity>(&mut self) -> Result<&TableModel> {
        let table = E::table();
        if let Some(i) = self.tables.iter().position(|t| t.same_type(table)) {
            return Ok(&self.tables[i]);
        }
        let conflict = if let Some(existing) = self.model_for_table(table.name) {
            Some(format!(
                "Table `{}` is already mapped by `{}`, cannot register `{}`",
                table.name, existing.type_path, table.type_path
            ))
        } else {
            self.model_for_type(table.type_name).map(|existing| {
                format!(
                    "Type name `{}` is ambiguous, `{}` is already registered, cannot register `{}`",
                    table.type_name, existing.type_path, table.type_path
                )
            })
        };
        if let Some(message) = conflict {
            let error = Error::msg(message);
            log::error!("{:#}", error);
            return Err(error);
        }
        table.validate()?;
        let mut model = table.clone();
        model.type_tag = self.tables.len() as u32 + 1;
        log::debug!(
            "Registered `{}` as table `{}` with tag {}",
            model.type_name,
            model.name,
            model.type_tag
        );
        self.tables.push(model);
        Ok(&self.tables[self.tables.len() - 1])
    }

    pub fn model_for_table(&self, table: &str) -> Option<&TableModel> {
        self.tables.iter().find(|t| t.name == table)
    }

    /// The model registered for `E`.
    pub fn model_for<E: Entity>(&self) -> Option<&TableModel> {
        self.model_like(E::table())
    }

    /// The model registered for `model`'s type.
    pub fn model_like(&self, model: &TableModel) -> Option<&TableModel> {
        self.tables.iter().find(|t| t.same_type(model))
    }

    pub fn model_for_type(&self, type_name: &str) -> Option<&TableModel> {
        self.tables.iter().find(|t| t.type_name == type_name)
    }

    pub fn model_for_tag(&self, tag: u32) -> Option<&TableModel> {
        self.tables.iter().find(|t| t.type_tag == tag)
    }

    pub fn table_name_for_type(&self, type_name: &str) -> Option<&'static str> {
        self.model_for_type(type_name).map(|t| t.name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableModel> {
        self.tables.iter()
    }
}
