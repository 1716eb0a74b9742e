//! Core traits, settings, and module registry shared by every roster crate.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{DbPool, InitCtx, Migration, Module};
pub use registry::ModuleRegistry;
