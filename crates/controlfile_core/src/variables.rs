//! Workspace variable registry.

use std::collections::HashMap;

use crate::errors::RegistryError;
use crate::group::Group;

/// Identity of a workspace variable inside its [`VariableRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(u32);

impl VarId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDescriptor {
    pub name: String,
    pub group: Group,
}

/// Name-keyed table of workspace variables.
///
/// ## Notes
/// - Ids are dense and assigned in insertion order.
/// - [`VariableRegistry::get`] indexes directly; ids from another registry are a
///   caller bug.
#[derive(Debug, Default, Clone)]
pub struct VariableRegistry {
    variables: Vec<VariableDescriptor>,
    by_name: HashMap<String, VarId>,
}

impl VariableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, group: Group) -> Result<VarId, RegistryError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(RegistryError::DuplicateVariable(name));
        }
        let id = VarId(self.variables.len() as u32);
        self.by_name.insert(name.clone(), id);
        self.variables.push(VariableDescriptor { name, group });
        Ok(id)
    }

    pub fn lookup(&self, name: &str) -> Option<(VarId, &VariableDescriptor)> {
        self.by_name.get(name).map(|&id| (id, self.get(id)))
    }

    pub fn get(&self, id: VarId) -> &VariableDescriptor {
        &self.variables[id.index()]
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VarId, &VariableDescriptor)> {
        self.variables.iter().enumerate().map(|(i, v)| (VarId(i as u32), v))
    }
}
