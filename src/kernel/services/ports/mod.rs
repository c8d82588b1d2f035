//! Service ports: traits + data contracts.

pub mod history;
pub mod search;
pub mod settings;

pub use history::{
    HistoryEntry, KeyValueStore, Result as StoreResult, SearchSnippet, StoreError,
    DEFAULT_HISTORY_LIMIT, HISTORY_KEY, SNIPPETS_KEY,
};
pub use search::{
    file_extension, Direction, Document, GlobalSearchMessage, MatchKind, MatchLocation,
    MatchSink, SearchFilters, SearchMatch, SearchOutcome,
};
pub use settings::{SearchSettings, Settings};
