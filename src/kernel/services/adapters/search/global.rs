//! 异步全局搜索服务
//!
//! - 在 blocking 线程上跑 SearchEngine，不阻塞调用方
//! - 取消点在文档之间（不在行之间）
//! - 新搜索不会自动取消旧任务，由调用方持有 GlobalSearchTask 决定

use super::engine::SearchEngine;
use crate::core::Service;
use crate::kernel::services::ports::search::{Document, GlobalSearchMessage, SearchFilters};
use crate::kernel::services::ports::settings::SearchSettings;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::SyncSender;
use std::sync::Arc;

static GLOBAL_SEARCH_ID: AtomicU64 = AtomicU64::new(0);

fn next_global_search_id() -> u64 {
    GLOBAL_SEARCH_ID.fetch_add(1, Ordering::Relaxed)
}

const PROGRESS_EVERY: usize = 100;

pub struct GlobalSearchTask {
    id: u64,
    cancelled: Arc<AtomicBool>,
}

impl GlobalSearchTask {
    pub fn new() -> Self {
        Self {
            id: next_global_search_id(),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    fn cancelled_flag(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }
}

impl Default for GlobalSearchTask {
    fn default() -> Self {
        Self::new()
    }
}

pub struct GlobalSearchService {
    runtime: tokio::runtime::Handle,
    engine: Arc<SearchEngine>,
}

impl GlobalSearchService {
    pub fn new(runtime: tokio::runtime::Handle) -> Self {
        Self {
            runtime,
            engine: Arc::new(SearchEngine::new()),
        }
    }

    pub fn with_settings(runtime: tokio::runtime::Handle, settings: &SearchSettings) -> Self {
        Self {
            runtime,
            engine: Arc::new(SearchEngine::with_settings(settings)),
        }
    }

    pub fn search_documents(
        &self,
        documents: Vec<Document>,
        query: String,
        filters: SearchFilters,
        tx: SyncSender<GlobalSearchMessage>,
    ) -> GlobalSearchTask {
        let task = GlobalSearchTask::new();
        let search_id = task.id();
        let cancelled = task.cancelled_flag();
        let engine = Arc::clone(&self.engine);

        self.runtime.spawn(async move {
            let cancelled_for_blocking = cancelled.clone();
            let tx_for_blocking = tx.clone();
            let result = tokio::task::spawn_blocking(move || {
                search_blocking(
                    &engine,
                    &documents,
                    &query,
                    &filters,
                    search_id,
                    &cancelled_for_blocking,
                    &tx_for_blocking,
                )
            })
            .await;

            if let Err(e) = result {
                tracing::error!(search_id, error = %e, "global search task failed");
                let _ = tx.send(GlobalSearchMessage::Cancelled { search_id });
            }
        });

        task
    }
}

impl Service for GlobalSearchService {
    fn name(&self) -> &'static str {
        "GlobalSearchService"
    }
}

fn search_blocking(
    engine: &SearchEngine,
    documents: &[Document],
    query: &str,
    filters: &SearchFilters,
    search_id: u64,
    cancelled: &AtomicBool,
    tx: &SyncSender<GlobalSearchMessage>,
) {
    let total_documents = documents.len();
    let outcome = engine.search_with(documents, query, filters, |index| {
        if cancelled.load(Ordering::Relaxed) {
            return ControlFlow::Break(());
        }
        if index > 0 && index.is_multiple_of(PROGRESS_EVERY) {
            let _ = tx.send(GlobalSearchMessage::Progress {
                search_id,
                documents_searched: index,
                total_documents,
            });
        }
        ControlFlow::Continue(())
    });

    match outcome {
        Some(outcome) if !cancelled.load(Ordering::Relaxed) => {
            let _ = tx.send(GlobalSearchMessage::Complete { search_id, outcome });
        }
        _ => {
            let _ = tx.send(GlobalSearchMessage::Cancelled { search_id });
        }
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/global.rs"]
mod tests;
