//! Template hierarchy generator and benchmark utilities for `tmplcycle`.
//!
//! This crate provides deterministic generation of template lists with a
//! controllable shape (layered hierarchies, long chains, wide fans) for
//! benchmarking and property-based testing of `tmplcycle-core`.

pub mod correctness;
pub mod generator;

pub use generator::shapes::{deep_chain, wide_fan};
pub use generator::{GeneratorConfig, SizeTier, generate_templates, to_json};
