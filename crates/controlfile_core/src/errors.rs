//! Registry construction errors.
//!
//! These are raised while a loader populates the registries, before any control
//! file is parsed. Parse-time failures live in the syntax crate.

use thiserror::Error;

use crate::group::Group;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("method `{0}` is already registered")]
    DuplicateMethod(String),

    #[error("workspace variable `{0}` is already registered")]
    DuplicateVariable(String),

    #[error("method `{0}` takes an agenda body and cannot declare keywords")]
    AgendaWithKeywords(String),

    #[error("method `{method}` declares keyword `{keyword}` more than once")]
    DuplicateKeyword { method: String, keyword: String },

    #[error("generic method `{0}` declares no input or output slot to resolve it by")]
    GenericWithoutSlots(String),

    #[error("method `{0}` is not generic and cannot be specialized")]
    NotGeneric(String),

    #[error("specialization `{0}` still declares a polymorphic slot")]
    SpecializationNotConcrete(String),

    #[error("specialization `{specialization}` of `{base}` declares a different number of slots")]
    SlotCountMismatch { base: String, specialization: String },

    #[error("method `{base}` already has a specialization for group `{group}`")]
    DuplicateSpecialization { base: String, group: Group },
}
