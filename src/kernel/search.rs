//! 搜索面板状态
//!
//! 查询 + 过滤条件 + 结果，以及按文件分组的展开/折叠和上下导航。
//! 状态由宿主显式持有，选中匹配时通过 MatchSink 通知宿主跳转。

use crate::kernel::services::adapters::{HistoryStore, SearchEngine};
use crate::kernel::services::ports::{
    Direction, Document, GlobalSearchMessage, HistoryEntry, MatchLocation, MatchSink,
    SearchFilters, SearchMatch, SearchOutcome,
};

/// 一个文件的结果区间：`matches[start..end]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchGroup {
    pub filename: String,
    pub start: usize,
    pub end: usize,
    pub expanded: bool,
}

impl SearchGroup {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchResultItem {
    FileHeader { group_index: usize },
    MatchLine { group_index: usize, match_index: usize },
}

#[derive(Default)]
pub struct SearchPanel {
    query: String,
    filters: SearchFilters,
    outcome: SearchOutcome,
    groups: Vec<SearchGroup>,
    active_index: Option<usize>,
    searched: bool,
    searching: bool,
    active_search_id: Option<u64>,
    sink: Option<Box<dyn MatchSink + Send>>,
}

impl SearchPanel {
    pub fn new(filters: SearchFilters) -> Self {
        Self {
            filters,
            ..Self::default()
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: SearchFilters) {
        self.filters = filters;
    }

    pub fn set_sink(&mut self, sink: impl MatchSink + Send + 'static) {
        self.sink = Some(Box::new(sink));
    }

    /// 清空查询和结果，保留过滤条件
    pub fn clear(&mut self) {
        self.query.clear();
        self.outcome = SearchOutcome::default();
        self.groups.clear();
        self.active_index = None;
        self.searched = false;
        self.searching = false;
        self.active_search_id = None;
    }

    /// 提交一次搜索。空查询是 no-op（不写历史），返回 false
    pub fn run(
        &mut self,
        documents: &[Document],
        engine: &SearchEngine,
        history: Option<&HistoryStore>,
    ) -> bool {
        if !self.begin_search(history) {
            return false;
        }
        let outcome = engine.search(documents, &self.query, &self.filters);
        self.apply_outcome(outcome);
        true
    }

    /// 异步搜索前调用：记录历史并清空旧结果
    pub fn begin_search(&mut self, history: Option<&HistoryStore>) -> bool {
        if self.query.trim().is_empty() {
            return false;
        }
        if let Some(history) = history {
            history.record_query(HistoryEntry::new(
                self.query.clone(),
                Some(self.filters.clone()),
            ));
        }
        self.outcome = SearchOutcome::default();
        self.groups.clear();
        self.active_index = None;
        self.searching = true;
        self.active_search_id = None;
        true
    }

    pub fn set_active_search_id(&mut self, search_id: u64) -> bool {
        if self.active_search_id == Some(search_id) {
            return false;
        }
        self.active_search_id = Some(search_id);
        true
    }

    /// 只接受当前任务的消息，过期任务的结果直接丢弃
    pub fn apply_message(&mut self, msg: GlobalSearchMessage) -> bool {
        if self.active_search_id != Some(msg.search_id()) {
            return false;
        }
        match msg {
            GlobalSearchMessage::Progress { .. } => false,
            GlobalSearchMessage::Complete { outcome, .. } => {
                self.apply_outcome(outcome);
                true
            }
            GlobalSearchMessage::Cancelled { .. } => {
                let changed = self.searching;
                self.searching = false;
                changed
            }
        }
    }

    /// 新结果：第一个文件展开，其余折叠，清除当前选中
    pub fn apply_outcome(&mut self, outcome: SearchOutcome) {
        self.groups = build_groups(&outcome.matches);
        if let Some(first) = self.groups.first_mut() {
            first.expanded = true;
        }
        self.outcome = outcome;
        self.active_index = None;
        self.searched = true;
        self.searching = false;
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// 区分“没搜过”和“搜了但没有结果”
    pub fn has_searched(&self) -> bool {
        self.searched
    }

    pub fn outcome(&self) -> &SearchOutcome {
        &self.outcome
    }

    pub fn matches(&self) -> &[SearchMatch] {
        &self.outcome.matches
    }

    pub fn total_count(&self) -> usize {
        self.outcome.total_count
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &[SearchMatch], bool)> + '_ {
        self.groups.iter().map(move |g| {
            (
                g.filename.as_str(),
                &self.outcome.matches[g.start..g.end],
                g.expanded,
            )
        })
    }

    pub fn group(&self, filename: &str) -> Option<&[SearchMatch]> {
        self.groups
            .iter()
            .find(|g| g.filename == filename)
            .map(|g| &self.outcome.matches[g.start..g.end])
    }

    pub fn is_expanded(&self, filename: &str) -> bool {
        self.groups
            .iter()
            .any(|g| g.filename == filename && g.expanded)
    }

    pub fn toggle_group(&mut self, filename: &str) -> bool {
        let Some(group) = self.groups.iter_mut().find(|g| g.filename == filename) else {
            return false;
        };
        group.expanded = !group.expanded;
        true
    }

    pub fn expand_all(&mut self) {
        self.set_all_expanded(true);
    }

    pub fn collapse_all(&mut self) {
        self.set_all_expanded(false);
    }

    pub fn all_expanded(&self) -> bool {
        self.groups.iter().all(|g| g.expanded)
    }

    /// 全部展开时折叠，否则全部展开
    pub fn toggle_all(&mut self) {
        if self.all_expanded() {
            self.collapse_all();
        } else {
            self.expand_all();
        }
    }

    fn set_all_expanded(&mut self, expanded: bool) {
        for group in &mut self.groups {
            group.expanded = expanded;
        }
    }

    /// 可见行：每个文件一个表头，展开的文件后面跟它的匹配
    pub fn rows(&self) -> Vec<SearchResultItem> {
        let mut rows = Vec::with_capacity(self.groups.len());
        for (group_index, group) in self.groups.iter().enumerate() {
            rows.push(SearchResultItem::FileHeader { group_index });
            if group.expanded {
                rows.extend((group.start..group.end).map(|match_index| {
                    SearchResultItem::MatchLine {
                        group_index,
                        match_index,
                    }
                }));
            }
        }
        rows
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn active_match(&self) -> Option<&SearchMatch> {
        self.active_index.and_then(|i| self.outcome.matches.get(i))
    }

    /// 选中第 index 个匹配并通知宿主
    pub fn select(&mut self, index: usize) -> Option<MatchLocation> {
        let location = self.outcome.matches.get(index)?.location();
        self.active_index = Some(index);
        if let Some(sink) = self.sink.as_mut() {
            sink.match_selected(&location);
        }
        Some(location)
    }

    /// 按位置选中（点击结果行）
    pub fn select_match(&mut self, target: &SearchMatch) -> Option<MatchLocation> {
        let index = self
            .outcome
            .matches
            .iter()
            .position(|m| m.is_same_position(target))?;
        self.select(index)
    }

    /// 循环导航；没有结果时是 no-op
    pub fn navigate(&mut self, direction: Direction) -> Option<MatchLocation> {
        let len = self.outcome.matches.len();
        if len == 0 {
            return None;
        }
        let next = match (direction, self.active_index) {
            (Direction::Next, Some(i)) if i + 1 < len => i + 1,
            (Direction::Next, _) => 0,
            (Direction::Prev, Some(i)) if i > 0 && i < len => i - 1,
            (Direction::Prev, _) => len - 1,
        };
        self.select(next)
    }

    /// 从历史回放：恢复查询，条目带过滤条件时一并恢复
    pub fn apply_history(&mut self, entry: &HistoryEntry) {
        self.query = entry.query.clone();
        if let Some(filters) = &entry.filters {
            self.filters = filters.clone();
        }
    }

    pub fn apply_snippet(&mut self, name: &str, history: &HistoryStore) -> bool {
        let Some((query, filters)) = history.load_snippet(name) else {
            return false;
        };
        self.query = query;
        self.filters = filters;
        true
    }

    /// 把当前查询和过滤条件存为命名预设
    pub fn save_snippet(&self, name: &str, history: &HistoryStore) -> bool {
        history.save_snippet(name, &self.query, self.filters.clone())
    }
}

fn build_groups(matches: &[SearchMatch]) -> Vec<SearchGroup> {
    let mut groups: Vec<SearchGroup> = Vec::new();
    for (index, m) in matches.iter().enumerate() {
        match groups.last_mut() {
            Some(group) if group.filename == m.filename => group.end = index + 1,
            _ => groups.push(SearchGroup {
                filename: m.filename.clone(),
                start: index,
                end: index + 1,
                expanded: false,
            }),
        }
    }
    groups
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/search.rs"]
mod tests;
