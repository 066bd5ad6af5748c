//! Registry vocabulary shared by the control-file parser and its loaders.
//!
//! A control file binds *workspace variables* to the slots of *methods*. Both are
//! described by registries populated ahead of parsing. This crate holds those
//! registries and the small value types they are built from:
//!
//! - [`Group`]: the type tag of a variable or formal slot
//! - [`ValueKind`] / [`Value`]: keyword value shapes and parsed keyword values
//! - [`MethodDescriptor`] / [`MethodRegistry`]: method signatures, generic and resolved views
//! - [`VariableDescriptor`] / [`VariableRegistry`]: workspace variables
//!
//! ## Notes
//! - This crate has no knowledge of the textual syntax; it only answers lookups.
//! - Registries are read-only once handed to the parser. Consistency rules that
//!   can be checked at insertion time are enforced there (see [`RegistryError`]).
//!
//! ## Examples
//! ```rust
//! use controlfile_core::{FormalGroup, Group, MethodDescriptor, MethodRegistry, Resolution};
//!
//! let vector = Group::new("Vector");
//! let mut methods = MethodRegistry::new();
//! let copy = methods
//!     .insert(
//!         MethodDescriptor::new("Copy")
//!             .with_output(FormalGroup::Polymorphic)
//!             .with_input(FormalGroup::Polymorphic),
//!     )
//!     .unwrap();
//! let copy_vector = methods
//!     .insert_specialization(
//!         copy,
//!         vector.clone(),
//!         MethodDescriptor::new("Copy_Vector")
//!             .with_output(FormalGroup::Fixed(vector.clone()))
//!             .with_input(FormalGroup::Fixed(vector.clone())),
//!     )
//!     .unwrap();
//!
//! assert_eq!(methods.resolution(copy), Resolution::Pending(copy));
//! assert_eq!(methods.resolve(copy, &vector), Some(copy_vector));
//! ```

pub mod errors;
pub mod group;
pub mod methods;
pub mod value;
pub mod variables;

pub use errors::RegistryError;
pub use group::Group;
pub use methods::{
    FormalGroup, KeywordDescriptor, MethodDescriptor, MethodId, MethodRegistry, Resolution, specialized_name,
};
pub use value::{Value, ValueKind};
pub use variables::{VarId, VariableDescriptor, VariableRegistry};
