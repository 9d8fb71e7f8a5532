//! Whole-file persistence for small collections.

pub mod file_handler;
pub mod operations;

pub use file_handler::{FileHandler, FileHandlerImpl, InMemoryFileHandler};
pub use operations::{DbOperations, DbOperationsImpl};
