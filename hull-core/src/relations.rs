use crate::{Entity, Result, Status, Value};
use std::slice;

/// Type erased view of a relation collection, used by the hydrator.
pub trait RelationSet {
    /// Type name of the entities this collection accepts.
    fn child_type(&self) -> &'static str;
    /// Fully qualified path of the accepted type.
    fn child_path(&self) -> &'static str;
    /// Builds a child from `values` (in the child's field order) and appends it.
    fn attach(&mut self, owner: &Value, values: &mut dyn Iterator<Item = Value>) -> Result<()>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One to many collection of `C` owned by a parent entity.
#[derive(Debug)]
pub struct Related<C: Entity> {
    owner: Option<Value>,
    items: Vec<C>,
}

impl<C: Entity> Default for Related<C> {
    fn default() -> Self {
        Self {
            owner: None,
            items: Vec::new(),
        }
    }
}

impl<C: Entity> Related<C> {
    pub fn new() -> Self {
        Default::default()
    }
    /// Primary key of the parent that owns the attached children.
    pub fn owner(&self) -> Option<&Value> {
        self.owner.as_ref()
    }
    pub fn add(&mut self, item: C) {
        self.items.push(item);
    }
    pub fn iter(&self) -> slice::Iter<'_, C> {
        self.items.iter()
    }
    pub fn len(&self) -> usize {
        self.items.len()
    }
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
    pub fn get(&self, index: usize) -> Option<&C> {
        self.items.get(index)
    }
    pub fn as_slice(&self) -> &[C] {
        &self.items
    }
    pub fn into_vec(self) -> Vec<C> {
        self.items
    }
}

impl<C: Entity> RelationSet for Related<C> {
    fn child_type(&self) -> &'static str {
        C::table().type_name
    }
    fn child_path(&self) -> &'static str {
        C::table().type_path
    }
    fn attach(&mut self, owner: &Value, values: &mut dyn Iterator<Item = Value>) -> Result<()> {
        let mut child = C::new_instance();
        child.set_values(values)?;
        child.set_status(Status::Fetched);
        if self.owner.as_ref() != Some(owner) {
            self.owner = Some(owner.clone());
        }
        self.items.push(child);
        Ok(())
    }
    fn len(&self) -> usize {
        self.items.len()
    }
}

impl<'a, C: Entity> IntoIterator for &'a Related<C> {
    type Item = &'a C;
    type IntoIter = slice::Iter<'a, C>;
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
