//! # Quill Core
//!
//! The domain layer of the Quill blog.
//! Posts, their authors, and the ports infrastructure has to implement.
//! This crate has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::DomainError;
