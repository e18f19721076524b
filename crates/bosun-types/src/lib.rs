//! Foundation types for the bosun command engine.
//!
//! This crate contains the host-agnostic core types shared by all bosun
//! crates: the caller capability model, permission requirements, engine
//! configuration, and error types. The engine itself lives in
//! `bosun-engine`; hosts implement the capabilities declared here.

pub mod caller;
pub mod config;
pub mod error;
