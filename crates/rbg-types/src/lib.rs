#![forbid(unsafe_code)]
#![doc = "Common types, error codes and security-strength classes for the rbg workspace."]

pub mod error;
pub mod strength;

pub use error::*;
pub use strength::*;
