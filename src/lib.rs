// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # bapigen: BAPI entity generation
//!
//! Builds Hibersap entity declarations from the parameter mapping of a SAP
//! function module (a BAPI).
//!
//! ## Core Concept
//!
//! A [`MappingDescription`] names a function module and lists its import,
//! export and table parameters. The [`EntityBuilder`] walks it once and
//! produces a class declaration with one field per top-level parameter:
//!
//! - scalar parameters keep their value type
//! - structures get a type named after their local name (`_priceInfo` → `PriceInfo`)
//! - tables become a collection of their row type
//!
//! Every field carries a direction marker (`@Import`, `@Export`, `@Table`)
//! and a `@Parameter` descriptor with the SAP-side name. The class carries
//! a single `@Bapi` marker.
//!
//! ## Quick Start
//!
//! ```rust
//! use bapigen::{build_entity, MappingDescription, ParameterEntry};
//!
//! let mut mapping = MappingDescription::new("BAPI_FLCONN_GETDETAIL");
//! mapping.add_import_parameter(ParameterEntry::scalar(
//!     "java.util.Date",
//!     "FLIGHTDATE",
//!     "_flightdate",
//! ));
//!
//! let entity = build_entity("FlightDetail", "com.example.sap", &mapping)?;
//! let field = entity.bapi_class().field("_flightdate").unwrap();
//! assert_eq!(field.type_name(), "Date");
//! assert_eq!(
//!     field.annotation("Parameter").unwrap().string_value("value"),
//!     Some("FLIGHTDATE")
//! );
//! # Ok::<(), bapigen::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                                                             │
//! │  MAPPING (code / YAML / JSON)                               │
//! │       │                                                     │
//! │       ├──► validate(...) ──► ValidationReport               │
//! │       │                                                     │
//! │       └──► EntityBuilder::create_new(...) ──► SapEntity     │
//! │                    │                                        │
//! │                    └──► DeclarationSink (any representation)│
//! │                                                             │
//! │  SapEntity ──► render_entity(...) ──► Java SourceFiles      │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod binding;
pub mod builder;
pub mod config;
pub mod declaration;
pub mod error;
pub mod mapping;
pub mod naming;
pub mod render;
pub mod validate;

// Re-exports
pub use binding::{ParameterBinding, ParameterKind, ParameterType};
pub use builder::{build_entity, EntityBuilder, SapEntity};
pub use config::{BuilderConfig, GeneratorConfig};
pub use declaration::{
    Annotation, AnnotationValue, DeclarationSink, EntityDeclaration, FieldDeclaration, TypeRef,
};
pub use error::{Error, Result};
pub use mapping::{
    mapping_schema, Direction, JavaType, MappingDescription, ParameterEntry, ParameterGroup,
    StructureMapping, TableMapping,
};
pub use render::{render_entity, Provenance, RenderConfig, Renderer, SourceFile};
pub use validate::{validate, ValidationIssue, ValidationReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
