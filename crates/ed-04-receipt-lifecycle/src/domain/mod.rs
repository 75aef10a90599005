//! # Domain Layer
//!
//! Receipt files, upload metadata, size formatting and errors.

pub mod errors;
pub mod file;
pub mod messages;
pub mod upload;

pub use errors::*;
pub use file::*;
pub use upload::*;
