//! # qf-core
//!
//! Core types shared by the qfilter crates.
//!
//! This crate provides:
//! - Common error types and the `QfResult` alias
//! - Configuration types (field schema, logging) and their loading

pub mod error;
pub mod config;

pub use error::*;
