//! # Fluent Builders
//!
//! Four independent ways of constructing a value step by step. Pick one per
//! target type; none of them depends on another.
//!
//! ## Patterns Covered
//!
//! 1. **Faceted Builder** ([`faceted`])
//!    - Root builder hands out facets, each owning a slice of the target
//!    - Facets can be switched at any point without losing state
//!
//! 2. **Self-Typed Recursive Builder** ([`recursive`])
//!    - Layered traits whose setters return the concrete `Self`
//!    - New layers stack on top without touching existing builders
//!
//! 3. **Functional Builder** ([`functional`])
//!    - Records deferred operations, replays them on every `build()`
//!    - New setters added from outside via extension traits
//!
//! 4. **Stepwise Builder** ([`stepwise`])
//!    - Typestate wizard: out-of-order calls do not compile
//!    - Wheel size validated against a per-car-type rule table
//!
//! ## Running Examples
//!
//! ```bash
//! cargo run --bin p1_faceted_builder
//! cargo run --bin p2_recursive_builder
//! cargo run --bin p3_functional_builder
//! RUST_LOG=debug cargo run --bin p4_stepwise_builder
//! ```

pub mod error;
pub mod faceted;
pub mod functional;
pub mod logging;
pub mod recursive;
pub mod stepwise;

pub use error::{ConfigError, ValidationError};
