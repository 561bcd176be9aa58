//! Core types for the silt cache engine
//!
//! This crate defines the two things every other layer agrees on:
//! - [`Error`] / [`Result`]: the configuration-vs-backend failure taxonomy
//! - [`CacheValue`]: the canonical payload and key-contribution model
//!
//! Everything else (keys, stores, decorators, transactional buffering) lives
//! in `silt-cache` and `silt-session`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod value;

pub use error::{Error, Result};
pub use value::CacheValue;
