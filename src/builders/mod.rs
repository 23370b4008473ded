//! # Builders
//!
//! Fluent configuration for container operations.
//!
//! ## Modules
//!
//! - [`pbe_builder`] - algorithm and iteration defaults, with finishers for
//!   every engine and file helper

pub mod pbe_builder;

pub use pbe_builder::PbeBuilder;
