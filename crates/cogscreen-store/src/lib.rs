//! cogscreen-store — Persistent log of completed test attempts.
//!
//! An append-mostly collection of `TestResult` records behind a pluggable
//! async storage backend. Persistence granularity is whole-collection
//! rewrite on every mutation; the store is the single writer by design.

pub mod backend;
pub mod error;
pub mod result;
pub mod store;
