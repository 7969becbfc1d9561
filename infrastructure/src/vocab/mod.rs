//! Controlled vocabulary loading.

mod loader;

pub use loader::{load_list, load_vocabulary};
