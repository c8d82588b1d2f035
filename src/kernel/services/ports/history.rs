use super::search::SearchFilters;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

pub const HISTORY_KEY: &str = "searchHistory";
pub const SNIPPETS_KEY: &str = "searchSnippets";
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid stored json: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// 宿主提供的键值持久化（localStorage 一类）
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    /// 毫秒级 unix 时间戳
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<SearchFilters>,
}

impl HistoryEntry {
    pub fn new(query: impl Into<String>, filters: Option<SearchFilters>) -> Self {
        Self {
            query: query.into(),
            timestamp: now_millis(),
            filters,
        }
    }
}

pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// 命名的查询预设，存储格式为 `{ query, caseSensitive, ... }` 平铺
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSnippet {
    pub query: String,
    #[serde(flatten)]
    pub filters: SearchFilters,
}
