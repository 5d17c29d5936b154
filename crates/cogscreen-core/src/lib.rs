//! cogscreen-core — Test catalog, session state machine, and scoring.
//!
//! This crate defines the fundamental data model, the built-in catalog of
//! cognitive assessment instruments, the session flow that collects answers,
//! and the presence-based scoring engine that the rest of cogscreen builds on.

pub mod catalog;
pub mod error;
pub mod model;
pub mod parser;
pub mod scoring;
pub mod session;
