// File: ./src/loader/mod.rs
pub mod core;
pub mod error;
pub mod middleware;

pub use crate::loader::core::{DataSource, Loader};
pub use crate::loader::error::{LoadError, LoadResultExt};
