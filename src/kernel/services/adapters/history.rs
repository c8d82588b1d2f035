//! 搜索历史与命名预设
//!
//! 历史按 query 去重、新的在前、最多 `limit` 条；预设按名字 upsert。
//! 读写失败只记日志：读失败当作空历史，写失败保留内存状态。

use crate::core::Service;
use crate::kernel::services::ports::history::{
    HistoryEntry, KeyValueStore, SearchSnippet, DEFAULT_HISTORY_LIMIT, HISTORY_KEY, SNIPPETS_KEY,
};
use crate::kernel::services::ports::search::SearchFilters;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct HistoryState {
    entries: Vec<HistoryEntry>,
    snippets: BTreeMap<String, SearchSnippet>,
}

pub struct HistoryStore {
    store: Box<dyn KeyValueStore>,
    limit: usize,
    state: Mutex<HistoryState>,
}

impl HistoryStore {
    /// 启动时读取一次持久化的历史和预设
    pub fn load(store: Box<dyn KeyValueStore>, limit: usize) -> Self {
        let limit = limit.max(1);
        let mut entries: Vec<HistoryEntry> = read_key(store.as_ref(), HISTORY_KEY);
        dedup_entries(&mut entries);
        entries.truncate(limit);
        let snippets: BTreeMap<String, SearchSnippet> = read_key(store.as_ref(), SNIPPETS_KEY);

        tracing::debug!(
            history = entries.len(),
            snippets = snippets.len(),
            "search history loaded"
        );

        Self {
            store,
            limit,
            state: Mutex::new(HistoryState { entries, snippets }),
        }
    }

    pub fn with_default_limit(store: Box<dyn KeyValueStore>) -> Self {
        Self::load(store, DEFAULT_HISTORY_LIMIT)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// 空查询不记录，返回 false
    pub fn record_query(&self, entry: HistoryEntry) -> bool {
        if entry.query.trim().is_empty() {
            return false;
        }
        let mut state = self.lock();
        state.entries.retain(|e| e.query != entry.query);
        state.entries.insert(0, entry);
        state.entries.truncate(self.limit);
        self.persist(HISTORY_KEY, &state.entries);
        true
    }

    /// 新的在前
    pub fn list_history(&self) -> Vec<HistoryEntry> {
        self.lock().entries.clone()
    }

    pub fn clear_history(&self) {
        let mut state = self.lock();
        state.entries.clear();
        self.persist(HISTORY_KEY, &state.entries);
    }

    /// 同名覆盖；名字或查询为空时不保存
    pub fn save_snippet(&self, name: &str, query: &str, filters: SearchFilters) -> bool {
        let name = name.trim();
        if name.is_empty() || query.trim().is_empty() {
            return false;
        }
        let mut state = self.lock();
        state.snippets.insert(
            name.to_string(),
            SearchSnippet {
                query: query.to_string(),
                filters,
            },
        );
        self.persist(SNIPPETS_KEY, &state.snippets);
        true
    }

    pub fn load_snippet(&self, name: &str) -> Option<(String, SearchFilters)> {
        self.lock()
            .snippets
            .get(name.trim())
            .map(|s| (s.query.clone(), s.filters.clone()))
    }

    pub fn delete_snippet(&self, name: &str) -> bool {
        let mut state = self.lock();
        if state.snippets.remove(name.trim()).is_none() {
            return false;
        }
        self.persist(SNIPPETS_KEY, &state.snippets);
        true
    }

    /// 名字按字典序
    pub fn list_snippets(&self) -> Vec<String> {
        self.lock().snippets.keys().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, HistoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn persist<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let data = match serde_json::to_string(value) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to encode search history");
                return;
            }
        };
        if let Err(e) = self.store.set(key, &data) {
            tracing::warn!(key, error = %e, "failed to persist search history");
        }
    }
}

impl Service for HistoryStore {
    fn name(&self) -> &'static str {
        "HistoryStore"
    }
}

fn read_key<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    let data = match store.get(key) {
        Ok(Some(data)) => data,
        Ok(None) => return T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read search history");
            return T::default();
        }
    };
    serde_json::from_str(&data).unwrap_or_else(|e| {
        tracing::warn!(key, error = %e, "corrupted search history, starting empty");
        T::default()
    })
}

fn dedup_entries(entries: &mut Vec<HistoryEntry>) {
    let mut seen = rustc_hash::FxHashSet::default();
    entries.retain(|e| seen.insert(e.query.clone()));
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/history.rs"]
mod tests;
