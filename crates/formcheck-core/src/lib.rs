//! # formcheck core
//!
//! Declarative form validation driven by `data-*` attributes. This crate holds
//! everything that does not need a browser: the field model, rule compilation,
//! the value predicates and the form-level binder logic written against the
//! [`InputElement`] / [`FormElement`] traits. `formcheck-wasm` implements those
//! traits for real DOM nodes.
//!
//! ## Attributes
//!
//! - `data-required`: empty values fail
//! - `data-validator`: `number`, `letters` or `regexp`
//! - `data-validator-min` / `data-validator-max`: strict numeric bounds for `number`
//! - `data-validator-pattern`: regular expression for `regexp`
//!
//! ## Example
//!
//! ```rust
//! use formcheck_core::{evaluate, Field, ValidatorKind};
//!
//! let age = Field::new("15").validator(ValidatorKind::Number).min("10");
//! assert!(evaluate(&age).unwrap());
//!
//! let empty = Field::new("").required();
//! assert!(!evaluate(&empty).unwrap());
//! ```

pub mod binder;
pub mod config;
pub mod error;
pub mod field;
pub mod rules;
pub mod validators;

pub use binder::{BoundInput, FormBinder, FormElement, FormState, InputElement};
pub use config::FormConfig;
pub use error::{BindError, ConfigError, RuleError};
pub use field::{AttributeSource, Field, ValidatorKind};
pub use rules::{evaluate, FieldRules, Rule};
