//! Java code generation using genco

use crate::declaration::{Annotation, AnnotationValue, EntityDeclaration, FieldDeclaration, TypeRef};
use crate::error::Result;
use crate::naming::{getter_name, property_name, setter_name};
use chrono::Utc;
use genco::fmt;
use genco::lang::Java;
use genco::prelude::*;

use super::{Provenance, RenderConfig};

/// Render one declaration to a Java compilation unit
pub fn render(
    decl: &EntityDeclaration,
    provenance: Option<&Provenance>,
    config: &RenderConfig,
    local_name_prefix: &str,
) -> Result<String> {
    let tokens = JavaRenderer {
        config,
        local_name_prefix,
    }
    .render(decl, provenance);

    let mut java_config = java::Config::default();
    if !decl.package().is_empty() {
        java_config = java_config.with_package(decl.package().to_string());
    }
    let format = fmt::Config::from_lang::<Java>()
        .with_indentation(fmt::Indentation::Space(config.indent));

    let mut w = fmt::FmtWriter::new(String::new());
    tokens.format_file(&mut w.as_formatter(&format), &java_config)?;
    Ok(w.into_inner())
}

struct JavaRenderer<'a> {
    config: &'a RenderConfig,
    local_name_prefix: &'a str,
}

impl<'a> JavaRenderer<'a> {
    fn render(&self, decl: &EntityDeclaration, provenance: Option<&Provenance>) -> java::Tokens {
        let header = self.render_header(provenance);
        let annotations: Vec<_> = decl
            .annotations()
            .iter()
            .map(|a| self.render_annotation(a))
            .collect();
        let fields: Vec<_> = decl.fields().iter().map(|f| self.render_field(f)).collect();
        let accessors: Vec<_> = if self.config.accessors {
            decl.fields().iter().map(|f| self.render_accessors(f)).collect()
        } else {
            Vec::new()
        };

        quote! {
            $header
            $(for a in annotations join ($['\r']) => $a)
            public class $(decl.name().to_string()) {
                $(for f in fields join ($['\n']) => $f)
                $(if !accessors.is_empty() {
                    $['\n']
                    $(for a in accessors join ($['\n']) => $a)
                })
            }
        }
    }

    fn render_header(&self, provenance: Option<&Provenance>) -> java::Tokens {
        match provenance {
            Some(p) if self.config.provenance => quote! {
                $(format!("// GENERATED FROM BAPI: {}", p.bapi))
                $(format!("// MAPPING HASH: {}", p.mapping_hash))
                $(format!("// GENERATED: {}", Utc::now().to_rfc3339()))
                $("// DO NOT EDIT, regenerate from mapping")
                $['\n']
            },
            _ => java::Tokens::new(),
        }
    }

    fn render_field(&self, field: &FieldDeclaration) -> java::Tokens {
        let annotations: Vec<_> = field
            .annotations()
            .iter()
            .map(|a| self.render_annotation(a))
            .collect();
        let ty = self.render_type(field.type_ref());

        quote! {
            $(for a in annotations join ($['\r']) => $a)
            private $ty $(field.name().to_string());
        }
    }

    fn render_accessors(&self, field: &FieldDeclaration) -> java::Tokens {
        let ty = self.render_type(field.type_ref());
        let name = field.name().to_string();
        let getter = getter_name(&name, self.local_name_prefix);
        let setter = setter_name(&name, self.local_name_prefix);
        let param = property_name(&name, self.local_name_prefix);

        quote! {
            public $(ty.clone()) $getter() {
                return $(&name);
            }
            $['\n']
            public void $setter(final $ty $(&param)) {
                this.$(&name) = $(&param);
            }
        }
    }

    /// `@Name`, `@Name("v")` or `@Name(k = v, ...)`
    fn render_annotation(&self, annotation: &Annotation) -> java::Tokens {
        let mut tokens = java::Tokens::new();
        tokens.append("@");
        tokens.append(java::import(
            self.config.annotation_package.clone(),
            annotation.name(),
        ));

        let attributes = annotation.attributes();
        match attributes.as_slice() {
            [] => {}
            [("value", value)] => {
                tokens.append("(");
                tokens.append(self.render_value(value));
                tokens.append(")");
            }
            _ => {
                tokens.append("(");
                for (i, (key, value)) in attributes.iter().enumerate() {
                    if i > 0 {
                        tokens.append(",");
                        tokens.space();
                    }
                    tokens.append(*key);
                    tokens.space();
                    tokens.append("=");
                    tokens.space();
                    tokens.append(self.render_value(value));
                }
                tokens.append(")");
            }
        }
        tokens
    }

    fn render_value(&self, value: &AnnotationValue<'_>) -> java::Tokens {
        match value {
            AnnotationValue::String(s) => quote!($(quoted(s.to_string()))),
            AnnotationValue::Enum {
                type_name,
                constant,
            } => {
                let mut tokens = java::Tokens::new();
                tokens.append(java::import(
                    self.config.annotation_package.clone(),
                    *type_name,
                ));
                tokens.append(".");
                tokens.append(*constant);
                tokens
            }
        }
    }

    fn render_type(&self, typ: &TypeRef) -> java::Tokens {
        let mut tokens = java::Tokens::new();
        match typ.package() {
            Some(package) => tokens.append(java::import(package.to_string(), typ.name().to_string())),
            None => tokens.append(typ.name().to_string()),
        }
        if !typ.arguments().is_empty() {
            tokens.append("<");
            for (i, argument) in typ.arguments().iter().enumerate() {
                if i > 0 {
                    tokens.append(",");
                    tokens.space();
                }
                tokens.append(self.render_type(argument));
            }
            tokens.append(">");
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::ParameterType;
    use crate::declaration::DeclarationSink;

    fn config() -> RenderConfig {
        RenderConfig {
            provenance: false,
            ..RenderConfig::default()
        }
    }

    fn flight_class() -> EntityDeclaration {
        let mut decl = EntityDeclaration::new("Flight", "com.example");
        decl.add_annotation(Annotation::Bapi {
            name: "BAPI_FLIGHT".into(),
        });
        let date = decl.add_field("_flightdate", TypeRef::qualified("java.util.Date"));
        decl.annotate_field(date, Annotation::Import);
        decl.annotate_field(
            date,
            Annotation::Parameter {
                value: "FLIGHTDATE".into(),
                parameter_type: ParameterType::Simple,
            },
        );
        let price = decl.add_field("_priceInfo", TypeRef::new(None, "PriceInfo"));
        decl.annotate_field(price, Annotation::Export);
        decl.annotate_field(
            price,
            Annotation::Parameter {
                value: "PRICE_INFO".into(),
                parameter_type: ParameterType::Structure,
            },
        );
        decl
    }

    #[test]
    fn test_render_class_annotations() {
        let code = render(&flight_class(), None, &config(), "_").unwrap();
        assert!(code.contains("package com.example;"), "{code}");
        assert!(code.contains("import org.hibersap.annotations.Bapi;"), "{code}");
        assert!(code.contains("import java.util.Date;"), "{code}");
        assert!(code.contains("@Bapi(\"BAPI_FLIGHT\")"), "{code}");
        assert!(code.contains("public class Flight {"), "{code}");
    }

    #[test]
    fn test_render_field_annotations() {
        let code = render(&flight_class(), None, &config(), "_").unwrap();
        assert!(code.contains("@Import"), "{code}");
        assert!(code.contains("@Parameter(\"FLIGHTDATE\")"), "{code}");
        assert!(code.contains("private Date _flightdate;"), "{code}");
        assert!(
            code.contains("@Parameter(value = \"PRICE_INFO\", type = ParameterType.STRUCTURE)"),
            "{code}"
        );
        assert!(code.contains("private PriceInfo _priceInfo;"), "{code}");
    }

    #[test]
    fn test_render_accessors() {
        let code = render(&flight_class(), None, &config(), "_").unwrap();
        assert!(code.contains("public Date getFlightdate() {"), "{code}");
        assert!(code.contains("public void setPriceInfo(final PriceInfo priceInfo) {"), "{code}");

        let without = RenderConfig {
            accessors: false,
            ..config()
        };
        let code = render(&flight_class(), None, &without, "_").unwrap();
        assert!(!code.contains("getFlightdate"), "{code}");
    }

    #[test]
    fn test_render_generic_table_type() {
        let mut decl = EntityDeclaration::new("Rows", "com.example");
        let rows = decl.add_field(
            "_rows",
            TypeRef::qualified("java.util.List").with_argument(TypeRef::new(None, "Row")),
        );
        decl.annotate_field(rows, Annotation::Table);
        let code = render(&decl, None, &config(), "_").unwrap();
        assert!(code.contains("import java.util.List;"), "{code}");
        assert!(code.contains("private List<Row> _rows;"), "{code}");
        assert!(code.contains("@Table"), "{code}");
    }
}
