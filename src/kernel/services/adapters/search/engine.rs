//! 内存多文件搜索
//!
//! 输入是打开文件的快照（文件名 + 内容），逐行扫描，分类每个匹配，
//! 最后按 (文件名, 行号) 稳定排序。

use super::classify::{classify, is_comment_line};
use super::searcher::{CompiledPattern, PatternOptions};
use crate::core::Service;
use crate::kernel::services::ports::search::{Document, SearchFilters, SearchMatch, SearchOutcome};
use crate::kernel::services::ports::settings::{SearchSettings, DEFAULT_REGEX_SIZE_LIMIT};
use rustc_hash::FxHashSet;
use std::ops::ControlFlow;
use std::time::Instant;

pub struct SearchEngine {
    regex_size_limit: usize,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self {
            regex_size_limit: DEFAULT_REGEX_SIZE_LIMIT,
        }
    }

    pub fn with_settings(settings: &SearchSettings) -> Self {
        Self {
            regex_size_limit: settings.regex_size_limit,
        }
    }

    pub fn compile(&self, query: &str, filters: &SearchFilters) -> Option<CompiledPattern> {
        let options = PatternOptions::from_filters(filters).with_size_limit(self.regex_size_limit);
        CompiledPattern::compile(query, options)
    }

    /// 空查询返回空结果；没有文档、没有匹配、非法正则都不会报错
    pub fn search(
        &self,
        documents: &[Document],
        query: &str,
        filters: &SearchFilters,
    ) -> SearchOutcome {
        self.search_with(documents, query, filters, |_| ControlFlow::Continue(()))
            .unwrap_or_default()
    }

    /// `before_document(index)` 在每个文档开始前调用，返回 Break 时放弃剩余文档并返回 None
    pub fn search_with<F>(
        &self,
        documents: &[Document],
        query: &str,
        filters: &SearchFilters,
        mut before_document: F,
    ) -> Option<SearchOutcome>
    where
        F: FnMut(usize) -> ControlFlow<()>,
    {
        let Some(pattern) = self.compile(query, filters) else {
            return Some(SearchOutcome::default());
        };

        let started = Instant::now();
        let mut matches = Vec::new();
        let mut total_count = 0usize;
        let mut seen = FxHashSet::default();

        for (index, doc) in documents.iter().enumerate() {
            if before_document(index).is_break() {
                tracing::debug!(query, searched = index, "search abandoned");
                return None;
            }
            if !seen.insert(doc.filename.as_str()) {
                tracing::debug!(filename = %doc.filename, "duplicate document skipped");
                continue;
            }
            if !filters.accepts(&doc.filename) {
                tracing::debug!(filename = %doc.filename, "document filtered by file type");
                continue;
            }
            total_count += search_document(doc, &pattern, filters, &mut matches);
        }

        matches.sort_by(|a, b| a.filename.cmp(&b.filename).then(a.line.cmp(&b.line)));

        tracing::info!(
            query,
            documents = documents.len(),
            matches = total_count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search complete"
        );

        Some(SearchOutcome {
            matches,
            total_count,
            regex_fallback: pattern.fell_back().map(str::to_string),
        })
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Service for SearchEngine {
    fn name(&self) -> &'static str {
        "SearchEngine"
    }
}

fn search_document(
    doc: &Document,
    pattern: &CompiledPattern,
    filters: &SearchFilters,
    out: &mut Vec<SearchMatch>,
) -> usize {
    let mut found = 0usize;

    for (line_index, line) in doc.content.split('\n').enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if filters.exclude_comments && is_comment_line(line) {
            continue;
        }

        for span in pattern.spans(line) {
            found += 1;
            let column = line[..span.start].chars().count() + 1;
            let match_length = line[span.start..span.end()].chars().count();
            out.push(SearchMatch {
                filename: doc.filename.clone(),
                line: line_index + 1,
                column,
                content: if filters.include_content {
                    line.to_string()
                } else {
                    String::new()
                },
                match_length,
                kind: classify(line, span),
            });
        }
    }

    found
}

/// 文档中出现过的扩展名（小写，按首次出现顺序去重）
pub fn available_file_types(documents: &[Document]) -> Vec<String> {
    let mut seen = FxHashSet::default();
    let mut types = Vec::new();
    for ext in documents.iter().filter_map(Document::extension) {
        if seen.insert(ext.clone()) {
            types.push(ext);
        }
    }
    types
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/engine.rs"]
mod tests;
