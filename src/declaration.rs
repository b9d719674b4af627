//! Declaration model: the class under construction
//!
//! The builder never touches a concrete source representation. It talks to
//! a [`DeclarationSink`], which can create a declaration, annotate it, add
//! fields and annotate those fields. [`EntityDeclaration`] is the in-memory
//! sink used by default and the input of the Java renderer.

use crate::binding::ParameterType;
use crate::mapping::JavaType;
use std::collections::HashMap;
use std::fmt;

/// Output collaborator of the builder
pub trait DeclarationSink {
    /// Handle to a field added to the declaration
    type Field: Copy;

    /// Start the declaration with its name and package
    fn declare(&mut self, name: &str, package: &str);

    /// Add a marker annotation to the declaration itself
    fn add_annotation(&mut self, annotation: Annotation);

    /// Add a field of the given type
    fn add_field(&mut self, name: &str, type_ref: TypeRef) -> Self::Field;

    /// Add an annotation to a field returned by [`DeclarationSink::add_field`]
    fn annotate_field(&mut self, field: Self::Field, annotation: Annotation);
}

/// Annotations the builder can write
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Annotation {
    /// Class marker naming the function module
    Bapi { name: String },
    /// Class marker of a structure declaration
    BapiStructure,
    Import,
    Export,
    Table,
    /// Field descriptor with the remote name and type discriminator
    Parameter {
        value: String,
        parameter_type: ParameterType,
    },
}

/// Attribute value of an annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationValue<'a> {
    String(&'a str),
    Enum {
        type_name: &'static str,
        constant: &'static str,
    },
}

impl Annotation {
    /// Every type a rendered annotation refers to
    pub const TYPE_NAMES: [&'static str; 7] = [
        "Bapi",
        "BapiStructure",
        "Import",
        "Export",
        "Table",
        "Parameter",
        ParameterType::JAVA_TYPE,
    ];

    /// Simple name of the annotation type
    pub fn name(&self) -> &'static str {
        match self {
            Annotation::Bapi { .. } => "Bapi",
            Annotation::BapiStructure => "BapiStructure",
            Annotation::Import => "Import",
            Annotation::Export => "Export",
            Annotation::Table => "Table",
            Annotation::Parameter { .. } => "Parameter",
        }
    }

    /// Named attributes; `SIMPLE` is the annotation default and is omitted
    pub fn attributes(&self) -> Vec<(&'static str, AnnotationValue<'_>)> {
        match self {
            Annotation::Bapi { name } => vec![("value", AnnotationValue::String(name))],
            Annotation::Parameter {
                value,
                parameter_type,
            } => {
                let mut attrs = vec![("value", AnnotationValue::String(value.as_str()))];
                if *parameter_type != ParameterType::Simple {
                    attrs.push((
                        "type",
                        AnnotationValue::Enum {
                            type_name: ParameterType::JAVA_TYPE,
                            constant: parameter_type.as_str(),
                        },
                    ));
                }
                attrs
            }
            Annotation::BapiStructure
            | Annotation::Import
            | Annotation::Export
            | Annotation::Table => Vec::new(),
        }
    }

    /// String attribute by key
    pub fn string_value(&self, key: &str) -> Option<&str> {
        self.attributes().into_iter().find_map(|(k, v)| match v {
            AnnotationValue::String(s) if k == key => Some(s),
            _ => None,
        })
    }

    /// Enum constant attribute by key
    pub fn enum_value(&self, key: &str) -> Option<&'static str> {
        self.attributes().into_iter().find_map(|(k, v)| match v {
            AnnotationValue::Enum { constant, .. } if k == key => Some(constant),
            _ => None,
        })
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name())
    }
}

/// Reference to a Java type, possibly generic
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    package: Option<String>,
    name: String,
    arguments: Vec<TypeRef>,
}

impl TypeRef {
    /// Type in the given package (`None` for primitives or same-package types)
    pub fn new(package: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            package: package.map(str::to_string),
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    /// Type from a qualified name (`java.util.List`)
    pub fn qualified(qualified: &str) -> Self {
        match qualified.rsplit_once('.') {
            Some((package, name)) => Self::new(Some(package), name),
            None => Self::new(None, qualified),
        }
    }

    pub fn with_argument(mut self, argument: TypeRef) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Simple name without package or generic arguments
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn arguments(&self) -> &[TypeRef] {
        &self.arguments
    }

    pub fn qualified_name(&self) -> String {
        match &self.package {
            Some(p) => format!("{}.{}", p, self.name),
            None => self.name.clone(),
        }
    }
}

impl From<&JavaType> for TypeRef {
    fn from(t: &JavaType) -> Self {
        TypeRef::new(t.package(), t.simple_name())
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.arguments.is_empty() {
            let args: Vec<String> = self.arguments.iter().map(ToString::to_string).collect();
            write!(f, "<{}>", args.join(", "))?;
        }
        Ok(())
    }
}

/// One generated field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDeclaration {
    name: String,
    type_ref: TypeRef,
    annotations: Vec<Annotation>,
}

impl FieldDeclaration {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    /// Simple type name (`Date`, `PriceInfo`, `List`)
    pub fn type_name(&self) -> &str {
        self.type_ref.name()
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Annotation by simple name
    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.name() == name)
    }
}

/// A generated class declaration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityDeclaration {
    name: String,
    package: String,
    annotations: Vec<Annotation>,
    fields: Vec<FieldDeclaration>,
}

impl EntityDeclaration {
    pub fn new(name: &str, package: &str) -> Self {
        let mut decl = Self::default();
        decl.declare(name, package);
        decl
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Class annotation by simple name
    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.name() == name)
    }

    /// Fields in insertion order; the order carries no meaning
    pub fn fields(&self) -> &[FieldDeclaration] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDeclaration> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Compare name, package, annotations and fields ignoring field order
    pub fn same_content(&self, other: &Self) -> bool {
        fn counts(d: &EntityDeclaration) -> HashMap<&FieldDeclaration, usize> {
            let mut counts = HashMap::new();
            for field in &d.fields {
                *counts.entry(field).or_insert(0) += 1;
            }
            counts
        }

        self.name == other.name
            && self.package == other.package
            && self.annotations == other.annotations
            && counts(self) == counts(other)
    }
}

impl DeclarationSink for EntityDeclaration {
    type Field = usize;

    fn declare(&mut self, name: &str, package: &str) {
        self.name = name.to_string();
        self.package = package.to_string();
    }

    fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    fn add_field(&mut self, name: &str, type_ref: TypeRef) -> usize {
        self.fields.push(FieldDeclaration {
            name: name.to_string(),
            type_ref,
            annotations: Vec::new(),
        });
        self.fields.len() - 1
    }

    fn annotate_field(&mut self, field: usize, annotation: Annotation) {
        if let Some(f) = self.fields.get_mut(field) {
            f.annotations.push(annotation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_builds_declaration() {
        let mut decl = EntityDeclaration::new("Flight", "com.example");
        decl.add_annotation(Annotation::Bapi {
            name: "BAPI_FLIGHT".into(),
        });
        let field = decl.add_field("_date", TypeRef::qualified("java.util.Date"));
        decl.annotate_field(field, Annotation::Import);

        assert_eq!(decl.qualified_name(), "com.example.Flight");
        assert_eq!(decl.field_count(), 1);
        let date = decl.field("_date").unwrap();
        assert_eq!(date.type_name(), "Date");
        assert_eq!(date.type_ref().package(), Some("java.util"));
        assert!(date.annotation("Import").is_some());
        assert!(decl.field("_missing").is_none());
    }

    #[test]
    fn test_parameter_attributes() {
        let simple = Annotation::Parameter {
            value: "CURR".into(),
            parameter_type: ParameterType::Simple,
        };
        assert_eq!(simple.attributes().len(), 1);
        assert_eq!(simple.string_value("value"), Some("CURR"));
        assert_eq!(simple.string_value("type"), None);

        let structure = Annotation::Parameter {
            value: "PRICE_INFO".into(),
            parameter_type: ParameterType::Structure,
        };
        assert_eq!(structure.enum_value("type"), Some("STRUCTURE"));
        assert_eq!(structure.enum_value("value"), None);
    }

    #[test]
    fn test_generic_type_display() {
        let list = TypeRef::qualified("java.util.List").with_argument(TypeRef::new(None, "Row"));
        assert_eq!(list.name(), "List");
        assert_eq!(list.to_string(), "List<Row>");
        assert_eq!(list.qualified_name(), "java.util.List");
    }

    #[test]
    fn test_same_content_ignores_field_order() {
        let mut a = EntityDeclaration::new("A", "p");
        a.add_field("x", TypeRef::new(None, "int"));
        a.add_field("y", TypeRef::new(None, "long"));

        let mut b = EntityDeclaration::new("A", "p");
        b.add_field("y", TypeRef::new(None, "long"));
        b.add_field("x", TypeRef::new(None, "int"));

        assert_ne!(a, b);
        assert!(a.same_content(&b));

        b.add_field("z", TypeRef::new(None, "int"));
        assert!(!a.same_content(&b));
    }

    #[test]
    fn test_same_content_counts_repeated_fields() {
        let mut a = EntityDeclaration::new("A", "p");
        a.add_field("x", TypeRef::new(None, "int"));
        a.add_field("x", TypeRef::new(None, "int"));
        a.add_field("y", TypeRef::new(None, "long"));

        let mut b = EntityDeclaration::new("A", "p");
        b.add_field("x", TypeRef::new(None, "int"));
        b.add_field("y", TypeRef::new(None, "long"));
        b.add_field("y", TypeRef::new(None, "long"));

        assert!(!a.same_content(&b));
        assert!(a.same_content(&a.clone()));
    }
}
