//! Registry manifests: the JSON description of groups, workspace variables and
//! methods that a control file is checked against.
//!
//! ```json
//! {
//!   "groups": ["Vector", "Matrix"],
//!   "variables": [{ "name": "a", "group": "Vector" }],
//!   "methods": [
//!     { "name": "Arts", "agenda": true },
//!     { "name": "Copy", "outputs": ["*"], "inputs": ["*"],
//!       "specializations": [{ "group": "Vector", "outputs": ["Vector"], "inputs": ["Vector"] }] }
//!   ]
//! }
//! ```
//!
//! `"*"` marks a polymorphic slot. Specializations are registered under
//! `<base>_<group>` and inherit the keywords of their base unless they list their own.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use controlfile_core::{
    FormalGroup, Group, KeywordDescriptor, MethodDescriptor, MethodRegistry, RegistryError, ValueKind,
    VariableRegistry, specialized_name,
};

/// Spelling of a polymorphic slot in a manifest.
pub const POLYMORPHIC: &str = "*";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("cannot read registry manifest `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid registry manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{context} refers to undeclared group `{group}`")]
    UnknownGroup { context: String, group: String },

    #[error("keyword `{keyword}` of method `{method}` has unknown kind `{kind}`")]
    UnknownKind {
        method: String,
        keyword: String,
        kind: String,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub variables: Vec<VariableEntry>,
    #[serde(default)]
    pub methods: Vec<MethodEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableEntry {
    pub name: String,
    pub group: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodEntry {
    pub name: String,
    #[serde(default)]
    pub outputs: Vec<String>,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<KeywordEntry>,
    /// Takes a nested agenda instead of keywords.
    #[serde(default)]
    pub agenda: bool,
    #[serde(default)]
    pub specializations: Vec<SpecializationEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeywordEntry {
    pub name: String,
    pub kind: String,
    /// Literal in control-file syntax, parsed when the keyword is omitted.
    #[serde(default)]
    pub default: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecializationEntry {
    pub group: String,
    #[serde(default)]
    pub outputs: Vec<String>,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub keywords: Option<Vec<KeywordEntry>>,
}

/// Method and variable registries built from one manifest.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub methods: MethodRegistry,
    pub variables: VariableRegistry,
}

impl Registry {
    pub fn from_json(text: &str) -> Result<Self, ManifestError> {
        Manifest::from_json(text)?.build()
    }

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let registry = Self::from_json(&text)?;
        tracing::debug!(
            path = %path.display(),
            methods = registry.methods.len(),
            variables = registry.variables.len(),
            "loaded registry manifest"
        );
        Ok(registry)
    }
}

impl Manifest {
    pub fn from_json(text: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Populate fresh registries. Every group a variable or slot names must be declared.
    pub fn build(&self) -> Result<Registry, ManifestError> {
        let groups = DeclaredGroups(self.groups.iter().map(String::as_str).collect());

        let mut registry = Registry::default();
        for variable in &self.variables {
            let group = groups.get(&variable.group, || format!("variable `{}`", variable.name))?;
            registry.variables.insert(variable.name.clone(), group)?;
        }

        for entry in &self.methods {
            let context = || format!("method `{}`", entry.name);
            let keywords = keyword_descriptors(&entry.name, &entry.keywords)?;
            let mut descriptor = MethodDescriptor::new(entry.name.clone());
            for output in &entry.outputs {
                descriptor = descriptor.with_output(groups.formal(output, context)?);
            }
            for input in &entry.inputs {
                descriptor = descriptor.with_input(groups.formal(input, context)?);
            }
            for keyword in &keywords {
                descriptor = descriptor.with_keyword(keyword.clone());
            }
            if entry.agenda {
                descriptor = descriptor.with_agenda_body();
            }
            let base = registry.methods.insert(descriptor)?;

            for specialization in &entry.specializations {
                let target = groups.get(&specialization.group, context)?;
                let name = specialized_name(&entry.name, &target);
                let concrete_context = || format!("method `{name}`");
                let mut concrete = MethodDescriptor::new(name.clone());
                for output in &specialization.outputs {
                    concrete = concrete.with_output(groups.formal(output, concrete_context)?);
                }
                for input in &specialization.inputs {
                    concrete = concrete.with_input(groups.formal(input, concrete_context)?);
                }
                let concrete_keywords = match &specialization.keywords {
                    Some(own) => keyword_descriptors(&name, own)?,
                    None => keywords.clone(),
                };
                for keyword in concrete_keywords {
                    concrete = concrete.with_keyword(keyword);
                }
                if entry.agenda {
                    concrete = concrete.with_agenda_body();
                }
                registry.methods.insert_specialization(base, target, concrete)?;
            }
        }
        Ok(registry)
    }
}

struct DeclaredGroups<'m>(HashSet<&'m str>);

impl DeclaredGroups<'_> {
    fn get(&self, name: &str, context: impl FnOnce() -> String) -> Result<Group, ManifestError> {
        if self.0.contains(name) {
            Ok(Group::new(name))
        } else {
            Err(ManifestError::UnknownGroup {
                context: context(),
                group: name.to_string(),
            })
        }
    }

    fn formal(&self, name: &str, context: impl FnOnce() -> String) -> Result<FormalGroup, ManifestError> {
        if name == POLYMORPHIC {
            Ok(FormalGroup::Polymorphic)
        } else {
            self.get(name, context).map(FormalGroup::Fixed)
        }
    }
}

fn keyword_descriptors(method: &str, entries: &[KeywordEntry]) -> Result<Vec<KeywordDescriptor>, ManifestError> {
    entries
        .iter()
        .map(|entry| {
            let kind = ValueKind::from_name(&entry.kind).ok_or_else(|| ManifestError::UnknownKind {
                method: method.to_string(),
                keyword: entry.name.clone(),
                kind: entry.kind.clone(),
            })?;
            Ok(match &entry.default {
                Some(default) => KeywordDescriptor::with_default(entry.name.clone(), kind, default.clone()),
                None => KeywordDescriptor::required(entry.name.clone(), kind),
            })
        })
        .collect()
}
