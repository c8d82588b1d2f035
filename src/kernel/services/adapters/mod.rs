//! Service adapters: search engine, persistence and OS specific paths.

pub mod history;
pub mod paths;
pub mod search;
pub mod settings;
pub mod storage;

pub use history::HistoryStore;
pub use paths::{ensure_log_dir, get_cache_dir, get_log_dir, get_storage_dir};
pub use search::{
    available_file_types, classify, is_comment_line, CompiledPattern, GlobalSearchService,
    GlobalSearchTask, Matcher, PatternError, PatternOptions, SearchEngine, Span,
};
pub use settings::{ensure_settings_file, get_settings_path, load_settings, load_settings_from};
pub use storage::{JsonFileStore, MemoryStore};
