//! Common test utilities for catsync contract and scenario tests.
//!
//! - `TestCatalog`: a publishing tree (library, templates, sidecars,
//!   descriptor, bundles) laid out in a temp folder
//! - `TestEnv`: isolated cache root and settings for library-level flows
//! - `CliEnv`: runs the `catsync` binary against an isolated config

#![allow(dead_code)]

pub mod catalog;
pub mod env;

pub use catalog::*;
pub use env::*;
