//! Data store layer
//!
//! Resources read records through the [`DataStore`] trait, which stands in for
//! the platform's service layer. [`InMemoryStore`] is loaded from a JSON
//! dictionary fixture.

pub mod memory;
pub mod traits;

pub use memory::{DictionaryFixture, InMemoryStore};
pub use traits::DataStore;
