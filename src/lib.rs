//! Cafekase - conversational drink recommendations.
//!
//! A guided dialogue asks a handful of open questions, then recommends
//! exactly one drink from a closed catalog. Collaborator output is never
//! trusted: every recommendation is validated, repaired once, and replaced by
//! a deterministic rule-based pick if it still misses the catalog.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
