//! Method descriptors and the two-phase method registry.
//!
//! A method's formal slots are either fixed to a [`Group`] or polymorphic. A
//! descriptor with any polymorphic slot is *generic*: it names a family of
//! concrete *specializations*, one per group, and the parser picks one once the
//! first bound variable fixes the group.
//!
//! ## Notes
//! - The generic view is keyed by base name ([`MethodRegistry::lookup_generic`]).
//! - The resolved view is keyed by `(base, group)` ([`MethodRegistry::resolve`]).
//!   Specializations carry their own display name (conventionally
//!   [`specialized_name`]) but are never looked up by it.

use std::collections::HashMap;

use crate::errors::RegistryError;
use crate::group::Group;
use crate::value::ValueKind;

/// Identity of a method descriptor inside its [`MethodRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId(u32);

impl MethodId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The declared group of one input or output slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormalGroup {
    Fixed(Group),
    Polymorphic,
}

impl FormalGroup {
    pub fn is_polymorphic(&self) -> bool {
        matches!(self, FormalGroup::Polymorphic)
    }
}

/// A named, typed, optionally defaulted parameter of a method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordDescriptor {
    pub name: String,
    pub kind: ValueKind,
    /// Default literal, in control-file syntax. Parsed with the keyword's kind
    /// whenever the keyword is omitted.
    pub default: Option<String>,
}

impl KeywordDescriptor {
    pub fn required(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
        }
    }

    pub fn with_default(name: impl Into<String>, kind: ValueKind, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            default: Some(default.into()),
        }
    }
}

/// Signature of a method as seen by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: String,
    pub outputs: Vec<FormalGroup>,
    pub inputs: Vec<FormalGroup>,
    pub keywords: Vec<KeywordDescriptor>,
    /// Takes a nested agenda instead of keyword bindings as its body.
    pub agenda_bodied: bool,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outputs: Vec::new(),
            inputs: Vec::new(),
            keywords: Vec::new(),
            agenda_bodied: false,
        }
    }

    pub fn with_output(mut self, formal: FormalGroup) -> Self {
        self.outputs.push(formal);
        self
    }

    pub fn with_input(mut self, formal: FormalGroup) -> Self {
        self.inputs.push(formal);
        self
    }

    pub fn with_keyword(mut self, keyword: KeywordDescriptor) -> Self {
        self.keywords.push(keyword);
        self
    }

    pub fn with_agenda_body(mut self) -> Self {
        self.agenda_bodied = true;
        self
    }

    pub fn is_generic(&self) -> bool {
        self.slots().any(FormalGroup::is_polymorphic)
    }

    pub fn slot_count(&self) -> usize {
        self.outputs.len() + self.inputs.len()
    }

    /// Outputs followed by inputs, in declaration order.
    pub fn slots(&self) -> impl Iterator<Item = &FormalGroup> {
        self.outputs.iter().chain(self.inputs.iter())
    }

    /// The formal at a position of [`MethodDescriptor::slots`].
    pub fn slot(&self, index: usize) -> Option<&FormalGroup> {
        if index < self.outputs.len() {
            self.outputs.get(index)
        } else {
            self.inputs.get(index - self.outputs.len())
        }
    }

    pub fn keyword_index(&self, name: &str) -> Option<usize> {
        self.keywords.iter().position(|k| k.name == name)
    }

    /// True when the body braces may be omitted: every keyword has a default.
    pub fn all_keywords_defaulted(&self) -> bool {
        self.keywords.iter().all(|k| k.default.is_some())
    }

    fn validate(&self) -> Result<(), RegistryError> {
        if self.agenda_bodied && !self.keywords.is_empty() {
            return Err(RegistryError::AgendaWithKeywords(self.name.clone()));
        }
        for (i, keyword) in self.keywords.iter().enumerate() {
            if self.keywords[..i].iter().any(|k| k.name == keyword.name) {
                return Err(RegistryError::DuplicateKeyword {
                    method: self.name.clone(),
                    keyword: keyword.name.clone(),
                });
            }
        }
        if self.is_generic() && self.slot_count() == 0 {
            return Err(RegistryError::GenericWithoutSlots(self.name.clone()));
        }
        Ok(())
    }
}

/// Conventional display name of the specialization of `base` for `group`.
pub fn specialized_name(base: &str, group: &Group) -> String {
    format!("{base}_{group}")
}

/// Outcome of looking at a method found in the generic view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The descriptor is already concrete.
    Concrete(MethodId),
    /// Generic; resolve with [`MethodRegistry::resolve`] once a group is bound.
    Pending(MethodId),
}

/// Method table with a generic (by base name) and a resolved (by base and group) view.
#[derive(Debug, Default, Clone)]
pub struct MethodRegistry {
    descriptors: Vec<MethodDescriptor>,
    generic: HashMap<String, MethodId>,
    resolved: HashMap<(MethodId, Group), MethodId>,
    base_of: HashMap<MethodId, MethodId>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a method under its own name in the generic view.
    pub fn insert(&mut self, descriptor: MethodDescriptor) -> Result<MethodId, RegistryError> {
        descriptor.validate()?;
        if self.generic.contains_key(&descriptor.name) {
            return Err(RegistryError::DuplicateMethod(descriptor.name));
        }
        let name = descriptor.name.clone();
        let id = self.push(descriptor);
        self.generic.insert(name, id);
        Ok(id)
    }

    /// Register the concrete variant of generic `base` dispatched to for `group`.
    pub fn insert_specialization(
        &mut self,
        base: MethodId,
        group: Group,
        descriptor: MethodDescriptor,
    ) -> Result<MethodId, RegistryError> {
        descriptor.validate()?;
        let base_desc = self.get(base);
        if !base_desc.is_generic() {
            return Err(RegistryError::NotGeneric(base_desc.name.clone()));
        }
        if descriptor.is_generic() {
            return Err(RegistryError::SpecializationNotConcrete(descriptor.name));
        }
        if descriptor.outputs.len() != base_desc.outputs.len() || descriptor.inputs.len() != base_desc.inputs.len() {
            return Err(RegistryError::SlotCountMismatch {
                base: base_desc.name.clone(),
                specialization: descriptor.name,
            });
        }
        if self.resolved.contains_key(&(base, group.clone())) {
            return Err(RegistryError::DuplicateSpecialization {
                base: base_desc.name.clone(),
                group,
            });
        }
        let id = self.push(descriptor);
        self.resolved.insert((base, group), id);
        self.base_of.insert(id, base);
        Ok(id)
    }

    fn push(&mut self, descriptor: MethodDescriptor) -> MethodId {
        let id = MethodId(self.descriptors.len() as u32);
        self.descriptors.push(descriptor);
        id
    }

    pub fn lookup_generic(&self, name: &str) -> Option<MethodId> {
        self.generic.get(name).copied()
    }

    pub fn resolution(&self, id: MethodId) -> Resolution {
        if self.get(id).is_generic() {
            Resolution::Pending(id)
        } else {
            Resolution::Concrete(id)
        }
    }

    /// The specialization of generic `base` for `group`, if registered.
    pub fn resolve(&self, base: MethodId, group: &Group) -> Option<MethodId> {
        self.resolved.get(&(base, group.clone())).copied()
    }

    /// The generic method a specialization was registered under.
    pub fn base_of(&self, id: MethodId) -> Option<MethodId> {
        self.base_of.get(&id).copied()
    }

    pub fn get(&self, id: MethodId) -> &MethodDescriptor {
        &self.descriptors[id.index()]
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MethodId, &MethodDescriptor)> {
        self.descriptors.iter().enumerate().map(|(i, d)| (MethodId(i as u32), d))
    }
}
