//! # tinyjson-core
//!
//! A small JSON value model with a recursive-descent parser and a compact
//! serializer.
//!
//! Text goes through [`parse`] into a [`Value`] tree, can be read and edited
//! in place with map/array ergonomics, and comes back out as JSON text via
//! `to_string()`.
//!
//! ## Quick start
//!
//! ```rust
//! use tinyjson_core::{parse, Value};
//!
//! let mut doc = parse(r#"{"company":{"name":"Tech Innovators Inc.","employees":[]}}"#).unwrap();
//! assert!(doc.is_member("company"));
//! assert_eq!(doc["company"]["name"], "Tech Innovators Inc.");
//!
//! let mut hire = Value::new();
//! hire["name"] = "John Doe".into();
//! hire["age"] = 30.into();
//! doc["company"]["employees"].push_back(hire).unwrap();
//!
//! assert_eq!(
//!     doc.to_string(),
//!     r#"{"company":{"employees":[{"age":30,"name":"John Doe"}],"name":"Tech Innovators Inc."}}"#
//! );
//! ```
//!
//! ## Modules
//!
//! - [`value`]: `Value` tree, typed access, promotion on first write
//! - [`parser`]: text → `Value`, with depth limiting and byte-offset errors
//! - [`serializer`]: `Value` → compact or indented text
//! - [`limits`]: parser limits (nesting ceiling)
//! - [`error`]: error type shared by parsing and value access

pub mod error;
pub mod limits;
pub mod parser;
pub mod serializer;
pub mod value;

pub use error::{JsonError, Result};
pub use limits::{Limits, DEFAULT_MAX_DEPTH};
pub use parser::{parse, Parser};
pub use value::{Array, Object, Payload, Value, ValueType};
