//! mealfinder - Meal ideas from the ingredients you already have
//!
//! This crate wraps a public recipe database behind a small HTTP API: submit
//! a list of ingredients and optional dietary tags, get matching meals back.
//!
//! # Overview
//!
//! All searching happens on the remote service. This crate issues the calls,
//! normalizes the loosely shaped JSON into typed [`mealdb::Meal`] records and
//! applies the client-side dietary tag filter. Remote failures never reach the
//! caller as errors; they show up as "no results".
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface definitions
//! - [`config`] - Configuration file parsing and validation
//! - [`error`] - Error types and error handling
//! - [`mealdb`] - Recipe service client and meal types
//! - [`server`] - Local HTTP API

pub mod cli;
pub mod config;
pub mod error;
pub mod mealdb;
pub mod server;

// Re-exports for convenience
pub use cli::Cli;
pub use config::Config;
pub use error::{ErrorCode, MealFinderError, Result};
pub use mealdb::{MealDbClient, MealSource};
pub use server::serve;
