//! Parameter bindings: what a generated field is bound to on the SAP side
//!
//! Each generated field carries one `ParameterBinding`: the direction
//! marker (if the field sits on the BAPI class), the remote name, and the
//! parameter type discriminator. Bindings are lowered to the annotation
//! pair written on the field.

use crate::declaration::Annotation;
use crate::mapping::{Direction, ParameterGroup};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction marker written on BAPI class fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterKind {
    Import,
    Export,
    Table,
}

impl From<Direction> for ParameterKind {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Import => ParameterKind::Import,
            Direction::Export => ParameterKind::Export,
            Direction::Table => ParameterKind::Table,
        }
    }
}

/// Discriminator for the `type` attribute of the `Parameter` annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParameterType {
    #[default]
    Simple,
    Structure,
    TableStructure,
}

impl ParameterType {
    /// Enum type name as referenced in Java
    pub const JAVA_TYPE: &'static str = "ParameterType";

    /// Constant name in the Java enum
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterType::Simple => "SIMPLE",
            ParameterType::Structure => "STRUCTURE",
            ParameterType::TableStructure => "TABLE_STRUCTURE",
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tagged descriptor attached to one generated field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterBinding {
    /// `None` for members of a structure declaration
    pub kind: Option<ParameterKind>,
    pub remote_name: String,
    pub parameter_type: ParameterType,
}

impl ParameterBinding {
    /// Binding for a top-level group of the BAPI class
    ///
    /// Structures keep their direction marker and are tagged `STRUCTURE`;
    /// tables are tagged with the table marker only.
    pub fn for_parameter(direction: Direction, group: &ParameterGroup) -> Self {
        let parameter_type = match group {
            ParameterGroup::Structure(_) => ParameterType::Structure,
            ParameterGroup::Scalar(_) | ParameterGroup::Table(_) => ParameterType::Simple,
        };
        Self {
            kind: Some(direction.into()),
            remote_name: group.remote_name().to_string(),
            parameter_type,
        }
    }

    /// Binding for a member of a structure declaration
    pub fn for_member(group: &ParameterGroup) -> Self {
        let parameter_type = match group {
            ParameterGroup::Scalar(_) => ParameterType::Simple,
            ParameterGroup::Structure(_) => ParameterType::Structure,
            ParameterGroup::Table(_) => ParameterType::TableStructure,
        };
        Self {
            kind: None,
            remote_name: group.remote_name().to_string(),
            parameter_type,
        }
    }

    /// Annotations in write order: marker first, then the descriptor
    pub fn annotations(&self) -> Vec<Annotation> {
        let marker = self.kind.map(|kind| match kind {
            ParameterKind::Import => Annotation::Import,
            ParameterKind::Export => Annotation::Export,
            ParameterKind::Table => Annotation::Table,
        });
        let descriptor = Annotation::Parameter {
            value: self.remote_name.clone(),
            parameter_type: self.parameter_type,
        };
        marker.into_iter().chain(std::iter::once(descriptor)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{ParameterEntry, StructureMapping, TableMapping};

    fn structure() -> ParameterGroup {
        StructureMapping::new("PRICE_INFO", "_priceInfo", []).into()
    }

    #[test]
    fn test_scalar_import_binding() {
        let group: ParameterGroup = ParameterEntry::scalar("java.util.Date", "FLIGHTDATE", "_flightdate").into();
        let binding = ParameterBinding::for_parameter(Direction::Import, &group);
        assert_eq!(binding.kind, Some(ParameterKind::Import));
        assert_eq!(binding.parameter_type, ParameterType::Simple);

        let annotations = binding.annotations();
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0], Annotation::Import);
        assert_eq!(annotations[1].string_value("value"), Some("FLIGHTDATE"));
        assert_eq!(annotations[1].enum_value("type"), None);
    }

    #[test]
    fn test_structure_keeps_direction() {
        let binding = ParameterBinding::for_parameter(Direction::Export, &structure());
        assert_eq!(binding.kind, Some(ParameterKind::Export));
        assert_eq!(binding.parameter_type, ParameterType::Structure);
        assert_eq!(binding.annotations()[1].enum_value("type"), Some("STRUCTURE"));
    }

    #[test]
    fn test_table_binding() {
        let row = StructureMapping::new("EXTENSION_OUT", "_extensionOut", []);
        let group: ParameterGroup = TableMapping::new("EXTENSION_OUT", "_extensionOut", row).into();
        let binding = ParameterBinding::for_parameter(Direction::Table, &group);
        assert_eq!(binding.annotations()[0], Annotation::Table);
        assert_eq!(binding.parameter_type, ParameterType::Simple);
    }

    #[test]
    fn test_member_binding_has_descriptor_only() {
        let binding = ParameterBinding::for_member(&structure());
        let annotations = binding.annotations();
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].enum_value("type"), Some("STRUCTURE"));

        let row = StructureMapping::new("ROWS", "_rows", []);
        let table: ParameterGroup = TableMapping::new("ROWS", "_rows", row).into();
        assert_eq!(
            ParameterBinding::for_member(&table).parameter_type,
            ParameterType::TableStructure
        );
    }
}
