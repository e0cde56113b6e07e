//! Core types for the ABR lookup workspace.
//!
//! This crate has no HTTP or XML dependencies. It owns the
//! effective-dated record model, the [`entity::Entity`] aggregate, the mapper
//! that builds an entity from raw field groups, and the flattened views handed
//! to callers. Every "current value" computation takes an explicit evaluation
//! date.

pub mod effective;
pub mod entity;
pub mod error;
pub mod exception;
pub mod field;
pub mod key;
pub mod lookup;
pub mod mapper;
pub mod registry;
pub mod search;

pub use error::{Error, Result};
