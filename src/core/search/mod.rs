//! Search handlers and their registry

pub mod handler;
pub mod registry;

pub use handler::{SearchConfig, SearchHandler, SearchHandlerKey};
pub use registry::SearchHandlerRegistry;
