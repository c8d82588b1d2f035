//! Headless search core (panel state + services).

pub mod search;
pub mod services;

pub use search::{SearchGroup, SearchPanel, SearchResultItem};
