//! Entity builder: mapping description to BAPI class declaration
//!
//! One pass over the import, export and table groups of a mapping. Each
//! top-level group becomes exactly one field:
//!
//! | Group | Field type | Annotations |
//! |-------|------------|-------------|
//! | scalar import/export | value type | `@Import`/`@Export`, `@Parameter("NAME")` |
//! | structure | type derived from the local name | direction, `@Parameter(value = "NAME", type = STRUCTURE)` |
//! | table | collection of the row type | `@Table`, `@Parameter("NAME")` |
//!
//! Structure members are not flattened into the BAPI class. Each structure
//! (and each table row) gets its own declaration, collected in
//! [`SapEntity::structures`].

use crate::binding::ParameterBinding;
use crate::config::BuilderConfig;
use crate::declaration::{Annotation, DeclarationSink, EntityDeclaration, TypeRef};
use crate::error::Result;
use crate::mapping::{MappingDescription, ParameterGroup, StructureMapping};
use crate::naming::type_name_for;
use crate::validate::validate;
use std::collections::HashSet;
use tracing::{debug, trace, warn};

/// Fallback for scalars without value type; never reached after validation
const OBJECT_TYPE: &str = "java.lang.Object";

/// Result of one builder invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SapEntity {
    bapi_class: EntityDeclaration,
    structures: Vec<EntityDeclaration>,
    mapping_hash: String,
}

impl SapEntity {
    /// The class annotated with `@Bapi`
    pub fn bapi_class(&self) -> &EntityDeclaration {
        &self.bapi_class
    }

    /// Declarations for structures and table rows, one per type name
    pub fn structures(&self) -> &[EntityDeclaration] {
        &self.structures
    }

    pub fn structure(&self, name: &str) -> Option<&EntityDeclaration> {
        self.structures.iter().find(|s| s.name() == name)
    }

    /// BAPI class first, then structures
    pub fn declarations(&self) -> impl Iterator<Item = &EntityDeclaration> {
        std::iter::once(&self.bapi_class).chain(self.structures.iter())
    }

    /// Hash of the mapping the entity was built from
    pub fn mapping_hash(&self) -> &str {
        &self.mapping_hash
    }

    pub fn into_bapi_class(self) -> EntityDeclaration {
        self.bapi_class
    }
}

/// Build a BAPI entity with the default configuration
pub fn build_entity(
    class_name: &str,
    package: &str,
    mapping: &MappingDescription,
) -> Result<SapEntity> {
    EntityBuilder::new().create_new(class_name, package, mapping)
}

/// Entity builder
#[derive(Debug, Clone, Default)]
pub struct EntityBuilder {
    config: BuilderConfig,
}

impl EntityBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Validate the inputs and build the BAPI class plus its structures
    pub fn create_new(
        &self,
        class_name: &str,
        package: &str,
        mapping: &MappingDescription,
    ) -> Result<SapEntity> {
        self.check(class_name, package, mapping)?;

        let mut bapi_class = EntityDeclaration::default();
        self.populate(&mut bapi_class, class_name, package, mapping);

        let structures = if self.config.generate_structures {
            self.structure_declarations(package, mapping)
        } else {
            Vec::new()
        };

        debug!(
            bapi = %mapping.remote_procedure_name,
            class = %bapi_class.qualified_name(),
            fields = bapi_class.field_count(),
            structures = structures.len(),
            "built BAPI entity"
        );

        Ok(SapEntity {
            bapi_class,
            structures,
            mapping_hash: mapping.hash(),
        })
    }

    /// Validate the inputs and write the BAPI class into `sink`
    ///
    /// Structure declarations are not produced here.
    pub fn create_into<S: DeclarationSink>(
        &self,
        sink: &mut S,
        class_name: &str,
        package: &str,
        mapping: &MappingDescription,
    ) -> Result<()> {
        self.check(class_name, package, mapping)?;
        self.populate(sink, class_name, package, mapping);
        Ok(())
    }

    /// Declared type of the field generated for `group`
    pub fn field_type(&self, group: &ParameterGroup) -> TypeRef {
        match group {
            ParameterGroup::Scalar(entry) => entry
                .value_type
                .as_ref()
                .map_or_else(|| TypeRef::qualified(OBJECT_TYPE), TypeRef::from),
            ParameterGroup::Structure(structure) => self.structure_type(structure),
            ParameterGroup::Table(table) => TypeRef::qualified(&self.config.collection_type)
                .with_argument(self.structure_type(&table.row)),
        }
    }

    fn structure_type(&self, structure: &StructureMapping) -> TypeRef {
        TypeRef::new(
            None,
            type_name_for(&structure.entry.local_name, &self.config.local_name_prefix),
        )
    }

    fn check(&self, class_name: &str, package: &str, mapping: &MappingDescription) -> Result<()> {
        let report = validate(class_name, package, mapping, &self.config);
        if !report.is_valid() {
            warn!(
                bapi = %mapping.remote_procedure_name,
                issues = report.issues.len(),
                "rejected mapping: {report}"
            );
        }
        report.into_result()
    }

    fn populate<S: DeclarationSink>(
        &self,
        sink: &mut S,
        class_name: &str,
        package: &str,
        mapping: &MappingDescription,
    ) {
        sink.declare(class_name, package);
        sink.add_annotation(Annotation::Bapi {
            name: mapping.remote_procedure_name.clone(),
        });

        for (direction, group) in mapping.all_parameters() {
            let binding = ParameterBinding::for_parameter(direction, group);
            self.add_field(sink, group, &binding);
        }
    }

    fn add_field<S: DeclarationSink>(
        &self,
        sink: &mut S,
        group: &ParameterGroup,
        binding: &ParameterBinding,
    ) {
        let type_ref = self.field_type(group);
        trace!(field = group.local_name(), field_type = %type_ref, "adding field");
        let field = sink.add_field(group.local_name(), type_ref);
        for annotation in binding.annotations() {
            sink.annotate_field(field, annotation);
        }
    }

    fn structure_declarations(
        &self,
        package: &str,
        mapping: &MappingDescription,
    ) -> Vec<EntityDeclaration> {
        let mut built = HashSet::new();
        let mut declarations = Vec::new();
        for (_, group) in mapping.all_parameters() {
            self.collect_structure(group, package, &mut built, &mut declarations);
        }
        declarations
    }

    fn collect_structure(
        &self,
        group: &ParameterGroup,
        package: &str,
        built: &mut HashSet<String>,
        declarations: &mut Vec<EntityDeclaration>,
    ) {
        let structure = match group {
            ParameterGroup::Scalar(_) => return,
            ParameterGroup::Structure(s) => s,
            ParameterGroup::Table(t) => &t.row,
        };

        let type_ref = self.structure_type(structure);
        // Same type name means same shape here; validation rejected the rest.
        if !built.insert(type_ref.name().to_string()) {
            return;
        }

        let mut declaration = EntityDeclaration::new(type_ref.name(), package);
        declaration.add_annotation(Annotation::BapiStructure);
        for member in &structure.fields {
            self.add_field(&mut declaration, member, &ParameterBinding::for_member(member));
        }
        declarations.push(declaration);

        for member in &structure.fields {
            self.collect_structure(member, package, built, declarations);
        }
    }
}
