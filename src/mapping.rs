//! Mapping description: the BAPI parameter model
//!
//! A `MappingDescription` names a remote function module and lists its
//! parameters in three groups: imports, exports and tables. It is built
//! once (in code or from YAML/JSON) and only read by the builder.
//!
//! ## Example Mapping
//!
//! ```yaml
//! bapi: BAPI_FLCONN_GETDETAIL
//! imports:
//!   - kind: scalar
//!     remote_name: FLIGHTDATE
//!     local_name: _flightdate
//!     value_type: java.util.Date
//! exports:
//!   - kind: structure
//!     remote_name: PRICE_INFO
//!     local_name: _priceInfo
//!     fields:
//!       - kind: scalar
//!         remote_name: CURR
//!         local_name: _curr
//!         value_type: java.lang.String
//! tables:
//!   - kind: table
//!     remote_name: EXTENSION_OUT
//!     local_name: _extensionOut
//!     row:
//!       remote_name: EXTENSION_OUT
//!       local_name: _extensionOut
//!       fields: []
//! ```

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;

/// A Java type reference by qualified name (`java.util.Date`, `int`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct JavaType(String);

impl JavaType {
    pub fn new(qualified: impl Into<String>) -> Self {
        Self(qualified.into())
    }

    /// Fully qualified name as given
    pub fn qualified_name(&self) -> &str {
        &self.0
    }

    /// Name without package (`java.util.Date` -> `Date`)
    pub fn simple_name(&self) -> &str {
        self.0.rsplit_once('.').map_or(self.0.as_str(), |(_, n)| n)
    }

    /// Package part, `None` for primitives and unqualified names
    pub fn package(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(p, _)| p)
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JavaType {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Names shared by every parameter kind
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct ParameterEntry {
    /// Name on the SAP side (`FLIGHTDATE`)
    pub remote_name: String,

    /// Java field name (`_flightdate`)
    pub local_name: String,

    /// Value type, scalars only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<JavaType>,
}

impl ParameterEntry {
    pub fn new(remote_name: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            remote_name: remote_name.into(),
            local_name: local_name.into(),
            value_type: None,
        }
    }

    pub fn scalar(
        value_type: impl Into<JavaType>,
        remote_name: impl Into<String>,
        local_name: impl Into<String>,
    ) -> Self {
        Self {
            value_type: Some(value_type.into()),
            ..Self::new(remote_name, local_name)
        }
    }
}

/// A composite parameter whose members are further groups
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct StructureMapping {
    #[serde(flatten)]
    pub entry: ParameterEntry,

    /// Nested members, order not significant
    #[serde(default)]
    pub fields: Vec<ParameterGroup>,
}

impl StructureMapping {
    pub fn new(
        remote_name: impl Into<String>,
        local_name: impl Into<String>,
        fields: impl IntoIterator<Item = ParameterGroup>,
    ) -> Self {
        Self {
            entry: ParameterEntry::new(remote_name, local_name),
            fields: fields.into_iter().collect(),
        }
    }
}

/// A repeated parameter; each row has the shape of `row`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct TableMapping {
    #[serde(flatten)]
    pub entry: ParameterEntry,

    pub row: StructureMapping,
}

impl TableMapping {
    pub fn new(
        remote_name: impl Into<String>,
        local_name: impl Into<String>,
        row: StructureMapping,
    ) -> Self {
        Self {
            entry: ParameterEntry::new(remote_name, local_name),
            row,
        }
    }
}

/// One parameter of a BAPI
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParameterGroup {
    Scalar(ParameterEntry),
    Structure(StructureMapping),
    Table(TableMapping),
}

impl ParameterGroup {
    pub fn entry(&self) -> &ParameterEntry {
        match self {
            ParameterGroup::Scalar(entry) => entry,
            ParameterGroup::Structure(s) => &s.entry,
            ParameterGroup::Table(t) => &t.entry,
        }
    }

    pub fn remote_name(&self) -> &str {
        &self.entry().remote_name
    }

    pub fn local_name(&self) -> &str {
        &self.entry().local_name
    }
}

impl From<ParameterEntry> for ParameterGroup {
    fn from(entry: ParameterEntry) -> Self {
        ParameterGroup::Scalar(entry)
    }
}

impl From<StructureMapping> for ParameterGroup {
    fn from(s: StructureMapping) -> Self {
        ParameterGroup::Structure(s)
    }
}

impl From<TableMapping> for ParameterGroup {
    fn from(t: TableMapping) -> Self {
        ParameterGroup::Table(t)
    }
}

/// Which top-level group a parameter was declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Import,
    Export,
    Table,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Import => f.write_str("imports"),
            Direction::Export => f.write_str("exports"),
            Direction::Table => f.write_str("tables"),
        }
    }
}

/// Parameter contract of one remote function module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "BAPI Mapping", description = "Parameter mapping of a SAP function module")]
pub struct MappingDescription {
    /// Function module name (`BAPI_FLCONN_GETDETAIL`)
    #[serde(rename = "bapi")]
    pub remote_procedure_name: String,

    #[serde(default, rename = "imports")]
    pub import_parameters: Vec<ParameterGroup>,

    #[serde(default, rename = "exports")]
    pub export_parameters: Vec<ParameterGroup>,

    #[serde(default, rename = "tables")]
    pub table_parameters: Vec<ParameterGroup>,
}

impl MappingDescription {
    pub fn new(remote_procedure_name: impl Into<String>) -> Self {
        Self {
            remote_procedure_name: remote_procedure_name.into(),
            ..Default::default()
        }
    }

    pub fn add_import_parameter(&mut self, group: impl Into<ParameterGroup>) -> &mut Self {
        self.import_parameters.push(group.into());
        self
    }

    pub fn add_export_parameter(&mut self, group: impl Into<ParameterGroup>) -> &mut Self {
        self.export_parameters.push(group.into());
        self
    }

    pub fn add_table_parameter(&mut self, group: impl Into<ParameterGroup>) -> &mut Self {
        self.table_parameters.push(group.into());
        self
    }

    /// Groups of one direction
    pub fn parameters(&self, direction: Direction) -> &[ParameterGroup] {
        match direction {
            Direction::Import => &self.import_parameters,
            Direction::Export => &self.export_parameters,
            Direction::Table => &self.table_parameters,
        }
    }

    /// Every top-level group with its direction
    pub fn all_parameters(&self) -> impl Iterator<Item = (Direction, &ParameterGroup)> {
        [Direction::Import, Direction::Export, Direction::Table]
            .into_iter()
            .flat_map(move |d| self.parameters(d).iter().map(move |g| (d, g)))
    }

    /// Number of top-level groups across all directions
    pub fn parameter_count(&self) -> usize {
        self.import_parameters.len() + self.export_parameters.len() + self.table_parameters.len()
    }

    /// Parse a mapping from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_norway::from_str(yaml).map_err(|e| Error::MappingParse(e.to_string()))
    }

    /// Parse a mapping from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::MappingParse(e.to_string()))
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_norway::to_string(self).map_err(|e| Error::MappingParse(e.to_string()))
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }

    /// SHA256 of the canonical JSON form, truncated to 16 hex chars
    pub fn hash(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_default();
        let digest = Sha256::digest(json.as_bytes());
        hex::encode(&digest[..8])
    }
}

/// JSON schema for mapping files
pub fn mapping_schema() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(MappingDescription)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLIGHT_YAML: &str = r#"
bapi: BAPI_FLCONN_GETDETAIL
imports:
  - kind: scalar
    remote_name: FLIGHTDATE
    local_name: _flightdate
    value_type: java.util.Date
exports:
  - kind: structure
    remote_name: PRICE_INFO
    local_name: _priceInfo
    fields:
      - kind: scalar
        remote_name: CURR
        local_name: _curr
        value_type: java.lang.String
tables:
  - kind: table
    remote_name: EXTENSION_OUT
    local_name: _extensionOut
    row:
      remote_name: EXTENSION_OUT
      local_name: _extensionOut
      fields:
        - kind: scalar
          remote_name: STRUCTURE
          local_name: _structure
          value_type: java.lang.String
"#;

    #[test]
    fn test_parse_yaml() {
        let mapping = MappingDescription::from_yaml(FLIGHT_YAML).unwrap();
        assert_eq!(mapping.remote_procedure_name, "BAPI_FLCONN_GETDETAIL");
        assert_eq!(mapping.parameter_count(), 3);

        let ParameterGroup::Scalar(date) = &mapping.import_parameters[0] else {
            panic!("expected scalar import");
        };
        assert_eq!(date.value_type.as_ref().unwrap().simple_name(), "Date");

        let ParameterGroup::Structure(price) = &mapping.export_parameters[0] else {
            panic!("expected structure export");
        };
        assert_eq!(price.entry.remote_name, "PRICE_INFO");
        assert_eq!(price.fields.len(), 1);

        let ParameterGroup::Table(table) = &mapping.table_parameters[0] else {
            panic!("expected table");
        };
        assert_eq!(table.row.fields[0].local_name(), "_structure");
    }

    #[test]
    fn test_yaml_and_json_agree() {
        let from_yaml = MappingDescription::from_yaml(FLIGHT_YAML).unwrap();
        let json = serde_json::to_string(&from_yaml).unwrap();
        let from_json = MappingDescription::from_json(&json).unwrap();
        assert_eq!(from_yaml, from_json);
        assert_eq!(from_yaml.hash(), from_json.hash());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = MappingDescription::from_yaml("imports: [").unwrap_err();
        assert!(matches!(err, Error::MappingParse(_)));
    }

    #[test]
    fn test_all_parameters_carries_direction() {
        let mapping = MappingDescription::from_yaml(FLIGHT_YAML).unwrap();
        let directions: Vec<_> = mapping.all_parameters().map(|(d, _)| d).collect();
        assert_eq!(
            directions,
            vec![Direction::Import, Direction::Export, Direction::Table]
        );
    }

    #[test]
    fn test_java_type_names() {
        let date = JavaType::new("java.util.Date");
        assert_eq!(date.simple_name(), "Date");
        assert_eq!(date.package(), Some("java.util"));

        let int = JavaType::new("int");
        assert_eq!(int.simple_name(), "int");
        assert_eq!(int.package(), None);
    }

    #[test]
    fn test_hash_changes_with_content() {
        let mut a = MappingDescription::new("BAPI_A");
        let b = a.clone();
        a.add_import_parameter(ParameterEntry::scalar("int", "X", "_x"));
        assert_ne!(a.hash(), b.hash());
        assert_eq!(a.hash().len(), 16);
    }

    #[test]
    fn test_schema_has_title() {
        let schema = mapping_schema();
        assert_eq!(schema["title"], "BAPI Mapping");
    }
}
