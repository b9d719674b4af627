//! Source rendering: turn built declarations into Java files
//!
//! The builder output is representation-neutral. This module is the adapter
//! that writes it as Java compilation units, one per declaration.

mod java;

use crate::builder::SapEntity;
use crate::config::GeneratorConfig;
use crate::declaration::EntityDeclaration;
use crate::error::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Render an entity with the given configuration
pub fn render_entity(entity: &SapEntity, config: &GeneratorConfig) -> Result<Vec<SourceFile>> {
    Renderer::new(config).render_entity(entity)
}

/// A rendered compilation unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the source root (`com/example/Flight.java`)
    pub path: PathBuf,
    pub contents: String,
}

/// Render configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RenderConfig {
    /// Package of the Hibersap annotations and `ParameterType`
    #[serde(default = "default_annotation_package")]
    pub annotation_package: String,

    /// Include provenance header
    #[serde(default = "default_true")]
    pub provenance: bool,

    /// Emit getters and setters for every field
    #[serde(default = "default_true")]
    pub accessors: bool,

    /// Indentation width in spaces
    #[serde(default = "default_indent")]
    pub indent: usize,
}

fn default_annotation_package() -> String {
    "org.hibersap.annotations".to_string()
}

fn default_true() -> bool {
    true
}

fn default_indent() -> usize {
    4
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            annotation_package: default_annotation_package(),
            provenance: true,
            accessors: true,
            indent: default_indent(),
        }
    }
}

/// Where a declaration came from, for the provenance header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub bapi: String,
    pub mapping_hash: String,
}

/// Java renderer
pub struct Renderer {
    config: RenderConfig,
    local_name_prefix: String,
}

impl Renderer {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            config: config.render.clone(),
            local_name_prefix: config.builder.local_name_prefix.clone(),
        }
    }

    /// Render the BAPI class and every structure declaration
    pub fn render_entity(&self, entity: &SapEntity) -> Result<Vec<SourceFile>> {
        let provenance = Provenance {
            bapi: entity
                .bapi_class()
                .annotation("Bapi")
                .and_then(|a| a.string_value("value"))
                .unwrap_or_default()
                .to_string(),
            mapping_hash: entity.mapping_hash().to_string(),
        };

        entity
            .declarations()
            .map(|decl| -> Result<SourceFile> {
                let contents = self.render_declaration(decl, Some(&provenance))?;
                Ok(SourceFile {
                    path: source_path(decl),
                    contents,
                })
            })
            .collect()
    }

    /// Render one declaration to Java source
    pub fn render_declaration(
        &self,
        decl: &EntityDeclaration,
        provenance: Option<&Provenance>,
    ) -> Result<String> {
        java::render(decl, provenance, &self.config, &self.local_name_prefix)
    }
}

fn source_path(decl: &EntityDeclaration) -> PathBuf {
    let mut path: PathBuf = decl.package().split('.').filter(|s| !s.is_empty()).collect();
    path.push(format!("{}.java", decl.name()));
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_entity;
    use crate::mapping::{MappingDescription, ParameterEntry, ParameterGroup, StructureMapping};

    fn sample_entity() -> SapEntity {
        let mut mapping = MappingDescription::new("BAPI_SAMPLE");
        mapping.add_import_parameter(ParameterEntry::scalar("int", "COUNT", "_count"));
        mapping.add_export_parameter(StructureMapping::new(
            "RETURN",
            "_return",
            [ParameterGroup::Scalar(ParameterEntry::scalar(
                "java.lang.String",
                "MESSAGE",
                "_message",
            ))],
        ));
        build_entity("Sample", "com.example.sap", &mapping).unwrap()
    }

    #[test]
    fn test_one_file_per_declaration() {
        let files = render_entity(&sample_entity(), &GeneratorConfig::default()).unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("com/example/sap/Sample.java"),
                PathBuf::from("com/example/sap/Return.java"),
            ]
        );
    }

    #[test]
    fn test_provenance_header() {
        let entity = sample_entity();
        let files = render_entity(&entity, &GeneratorConfig::default()).unwrap();
        assert!(files[0].contents.contains("// GENERATED FROM BAPI: BAPI_SAMPLE"));
        assert!(files[0]
            .contents
            .contains(&format!("// MAPPING HASH: {}", entity.mapping_hash())));

        let mut config = GeneratorConfig::default();
        config.render.provenance = false;
        let files = render_entity(&entity, &config).unwrap();
        assert!(!files[0].contents.contains("GENERATED"));
    }
}
