//! # Guitar Tuner Common Library
//!
//! Shared code for the guitar tuner backend:
//! - Song and chord models and the chord list codec
//! - Storage adapters (SQLite, optionally MySQL) behind the [`Store`] trait
//! - The store-agnostic [`Catalog`] operations
//! - Configuration loading and schema/seed setup

pub mod catalog;
pub mod codec;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod store;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use store::Store;
