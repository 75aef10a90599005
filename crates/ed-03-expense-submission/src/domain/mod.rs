//! # Domain Layer
//!
//! The expense draft, its validation rules and the submission errors.

pub mod draft;
pub mod errors;
pub mod messages;
pub mod validation;

pub use draft::*;
pub use errors::*;
pub use validation::*;
