use super::history::DEFAULT_HISTORY_LIMIT;
use super::search::SearchFilters;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_REGEX_SIZE_LIMIT: usize = 1 << 20;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub search: SearchSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_history_limit", alias = "historyLimit")]
    pub history_limit: usize,
    #[serde(default, alias = "defaultFilters")]
    pub default_filters: SearchFilters,
    /// 编译后正则的大小上限，超出按非法正则处理（退化为字面量）
    #[serde(default = "default_regex_size_limit", alias = "regexSizeLimit")]
    pub regex_size_limit: usize,
    #[serde(
        default,
        alias = "storageDir",
        skip_serializing_if = "Option::is_none"
    )]
    pub storage_dir: Option<PathBuf>,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_regex_size_limit() -> usize {
    DEFAULT_REGEX_SIZE_LIMIT
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            default_filters: SearchFilters::default(),
            regex_size_limit: DEFAULT_REGEX_SIZE_LIMIT,
            storage_dir: None,
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
