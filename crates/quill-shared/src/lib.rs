//! # Quill Shared
//!
//! Wire-level types: the forms browsers submit and the problem details
//! rendered on error pages.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
