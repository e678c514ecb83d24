//! core
//!
//! Domain types and configuration shared by the bootstrap and the
//! application.
//!
//! # Modules
//!
//! - [`build`] - Static build metadata and the version line
//! - [`config`] - User config schema and [`config::AppConfig`]
//! - [`env`] - Export of resolved git paths to the process environment
//! - [`types`] - Strong types for object ids and branch names

pub mod build;
pub mod config;
pub mod env;
pub mod types;
