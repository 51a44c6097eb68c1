//! # Builders
//!
//! - [`options_builder`] - fluent construction of [`UnsealOptions`](options_builder::UnsealOptions)

pub mod options_builder;
