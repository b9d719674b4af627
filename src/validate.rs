//! Mapping validation
//!
//! Runs before any declaration is built. All issues are collected so the
//! caller sees every problem of a mapping at once.

use crate::config::BuilderConfig;
use crate::declaration::Annotation;
use crate::mapping::{MappingDescription, ParameterGroup, StructureMapping, TableMapping};
use crate::naming::{is_java_identifier, is_java_package, type_name_for};
use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;

/// A single problem found in the builder inputs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("class name is empty")]
    EmptyClassName,

    #[error("package is empty")]
    EmptyPackage,

    #[error("'{0}' is not a valid Java class name")]
    InvalidClassName(String),

    #[error("'{0}' is not a valid Java package")]
    InvalidPackage(String),

    #[error("'{name}' in {declaration} is not a valid Java field name")]
    InvalidFieldName { declaration: String, name: String },

    #[error("field '{name}' is declared more than once in {declaration}")]
    DuplicateField { declaration: String, name: String },

    #[error("scalar parameter '{remote_name}' has no value type")]
    MissingValueType { remote_name: String },

    #[error("structures '{first}' and '{second}' both map to type {type_name} with different fields")]
    StructureCollision {
        type_name: String,
        first: String,
        second: String,
    },

    #[error("structure '{remote_name}' maps to type {type_name}, which is already taken by {taken_by}")]
    TypeNameTaken {
        type_name: String,
        remote_name: String,
        taken_by: String,
    },
}

/// Every issue found for one builder invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// `Ok(())` when valid, the report as error otherwise
    pub fn into_result(self) -> crate::Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self.into())
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.issues.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join("; "))
    }
}

/// Check builder inputs for a BAPI class
pub fn validate(
    class_name: &str,
    package: &str,
    mapping: &MappingDescription,
    config: &BuilderConfig,
) -> ValidationReport {
    let mut issues = Vec::new();

    if class_name.is_empty() {
        issues.push(ValidationIssue::EmptyClassName);
    } else if !is_java_identifier(class_name) {
        issues.push(ValidationIssue::InvalidClassName(class_name.to_string()));
    }

    if package.is_empty() {
        issues.push(ValidationIssue::EmptyPackage);
    } else if !is_java_package(package) {
        issues.push(ValidationIssue::InvalidPackage(package.to_string()));
    }

    // The three groups share one class, so names must be unique across them.
    let top_level: Vec<&ParameterGroup> = mapping.all_parameters().map(|(_, g)| g).collect();
    check_members(class_name, &top_level, &mut issues);

    let taken = taken_type_names(class_name, mapping, config);
    let mut seen: HashMap<String, &StructureMapping> = HashMap::new();
    for group in &top_level {
        collect_structures(group, config, &taken, &mut seen, &mut issues);
    }

    ValidationReport { issues }
}

fn check_members(declaration: &str, groups: &[&ParameterGroup], issues: &mut Vec<ValidationIssue>) {
    let mut names = HashSet::new();
    for group in groups {
        let entry = group.entry();
        if !is_java_identifier(&entry.local_name) {
            issues.push(ValidationIssue::InvalidFieldName {
                declaration: declaration.to_string(),
                name: entry.local_name.clone(),
            });
        }
        if !names.insert(entry.local_name.as_str()) {
            issues.push(ValidationIssue::DuplicateField {
                declaration: declaration.to_string(),
                name: entry.local_name.clone(),
            });
        }
        match group {
            ParameterGroup::Scalar(e) if e.value_type.is_none() => {
                issues.push(ValidationIssue::MissingValueType {
                    remote_name: e.remote_name.clone(),
                });
            }
            ParameterGroup::Scalar(_) => {}
            ParameterGroup::Structure(s) => check_structure(s, issues),
            ParameterGroup::Table(t) => check_structure(&t.row, issues),
        }
    }
}

fn check_structure(structure: &StructureMapping, issues: &mut Vec<ValidationIssue>) {
    let members: Vec<&ParameterGroup> = structure.fields.iter().collect();
    check_members(&structure.entry.remote_name, &members, issues);
}

/// Simple names a derived structure type must not shadow, with their owner
fn taken_type_names(
    class_name: &str,
    mapping: &MappingDescription,
    config: &BuilderConfig,
) -> HashMap<String, String> {
    fn value_types(group: &ParameterGroup, taken: &mut HashMap<String, String>) {
        let members = match group {
            ParameterGroup::Scalar(entry) => {
                if let Some(value_type) = &entry.value_type {
                    taken
                        .entry(value_type.simple_name().to_string())
                        .or_insert_with(|| format!("value type {value_type}"));
                }
                return;
            }
            ParameterGroup::Structure(s) => &s.fields,
            ParameterGroup::Table(t) => &t.row.fields,
        };
        for member in members {
            value_types(member, taken);
        }
    }

    let mut taken = HashMap::new();
    taken.insert(class_name.to_string(), "the BAPI class".to_string());
    for name in Annotation::TYPE_NAMES {
        taken
            .entry(name.to_string())
            .or_insert_with(|| format!("annotation type {name}"));
    }
    let collection = &config.collection_type;
    let collection_name = collection.rsplit_once('.').map_or(collection.as_str(), |(_, n)| n);
    taken
        .entry(collection_name.to_string())
        .or_insert_with(|| format!("collection type {collection}"));
    for (_, group) in mapping.all_parameters() {
        value_types(group, &mut taken);
    }
    taken
}

fn collect_structures<'a>(
    group: &'a ParameterGroup,
    config: &BuilderConfig,
    taken: &HashMap<String, String>,
    seen: &mut HashMap<String, &'a StructureMapping>,
    issues: &mut Vec<ValidationIssue>,
) {
    let structure = match group {
        ParameterGroup::Scalar(_) => return,
        ParameterGroup::Structure(s) => s,
        ParameterGroup::Table(t) => &t.row,
    };

    let type_name = type_name_for(&structure.entry.local_name, &config.local_name_prefix);
    match seen.get(&type_name) {
        // Without companion declarations a shared name is only a shared reference.
        Some(previous) if config.generate_structures && !same_shape(previous, structure) => {
            issues.push(ValidationIssue::StructureCollision {
                type_name,
                first: previous.entry.remote_name.clone(),
                second: structure.entry.remote_name.clone(),
            });
        }
        Some(_) => {}
        None => {
            if !is_java_identifier(&type_name) {
                issues.push(ValidationIssue::InvalidClassName(type_name.clone()));
            } else if let Some(taken_by) = taken.get(&type_name) {
                issues.push(ValidationIssue::TypeNameTaken {
                    type_name: type_name.clone(),
                    remote_name: structure.entry.remote_name.clone(),
                    taken_by: taken_by.clone(),
                });
            }
            seen.insert(type_name, structure);
        }
    }

    for member in &structure.fields {
        collect_structures(member, config, taken, seen, issues);
    }
}

/// Two structures produce the same declaration when their members match
///
/// Members are unordered at every depth.
pub(crate) fn same_shape(a: &StructureMapping, b: &StructureMapping) -> bool {
    canonical(a) == canonical(b)
}

fn canonical(structure: &StructureMapping) -> StructureMapping {
    fn canonical_group(group: &ParameterGroup) -> ParameterGroup {
        match group {
            ParameterGroup::Scalar(entry) => ParameterGroup::Scalar(entry.clone()),
            ParameterGroup::Structure(s) => ParameterGroup::Structure(canonical(s)),
            ParameterGroup::Table(t) => ParameterGroup::Table(TableMapping {
                entry: t.entry.clone(),
                row: canonical(&t.row),
            }),
        }
    }

    let mut fields: Vec<ParameterGroup> = structure.fields.iter().map(canonical_group).collect();
    fields.sort_by_cached_key(|g| format!("{g:?}"));
    StructureMapping {
        entry: structure.entry.clone(),
        fields,
    }
}
