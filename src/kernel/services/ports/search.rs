use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 一个被搜索的打开文件快照（文件名 + 全文）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub filename: String,
    pub content: String,
}

impl Document {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// 最后一个 `.` 之后的部分（小写）；没有 `.` 时为 None
    pub fn extension(&self) -> Option<String> {
        file_extension(&self.filename)
    }
}

pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rfind('.')
        .map(|idx| filename[idx + 1..].to_lowercase())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(default, alias = "case_sensitive")]
    pub case_sensitive: bool,
    #[serde(default, alias = "whole_word")]
    pub whole_word: bool,
    #[serde(default, alias = "use_regex")]
    pub use_regex: bool,
    #[serde(default = "default_include_content", alias = "include_content")]
    pub include_content: bool,
    /// 扩展名白名单，空集表示不过滤
    #[serde(default, alias = "file_types")]
    pub file_types: BTreeSet<String>,
    #[serde(default, alias = "exclude_comments")]
    pub exclude_comments: bool,
}

fn default_include_content() -> bool {
    true
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            whole_word: false,
            use_regex: false,
            include_content: true,
            file_types: BTreeSet::new(),
            exclude_comments: false,
        }
    }
}

impl SearchFilters {
    pub fn with_file_type(mut self, ext: impl Into<String>) -> Self {
        self.file_types.insert(ext.into());
        self
    }

    /// 扩展名过滤：白名单为空或文件没有扩展名时总是放行
    pub fn accepts(&self, filename: &str) -> bool {
        if self.file_types.is_empty() {
            return true;
        }
        match file_extension(filename) {
            Some(ext) => self.file_types.contains(&ext),
            None => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Code,
    Comment,
    String,
    Keyword,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Code => "code",
            MatchKind::Comment => "comment",
            MatchKind::String => "string",
            MatchKind::Keyword => "keyword",
        }
    }
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个匹配。line / column 从 1 开始，column 与 match_length 以字符计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    pub filename: String,
    pub line: usize,
    pub column: usize,
    pub content: String,
    pub match_length: usize,
    #[serde(rename = "type")]
    pub kind: MatchKind,
}

impl SearchMatch {
    pub fn location(&self) -> MatchLocation {
        MatchLocation {
            filename: self.filename.clone(),
            line: self.line,
            column: self.column,
            match_length: self.match_length,
        }
    }

    pub fn is_same_position(&self, other: &SearchMatch) -> bool {
        self.filename == other.filename && self.line == other.line && self.column == other.column
    }

    /// 把行内容切成 (匹配前, 匹配, 匹配后)，未包含内容时返回 None
    pub fn highlight(&self) -> Option<(&str, &str, &str)> {
        if self.content.is_empty() {
            return None;
        }
        let start = char_to_byte(&self.content, self.column.saturating_sub(1))?;
        let len = char_to_byte(&self.content[start..], self.match_length)?;
        let end = start + len;
        Some((
            &self.content[..start],
            &self.content[start..end],
            &self.content[end..],
        ))
    }
}

fn char_to_byte(s: &str, chars: usize) -> Option<usize> {
    if chars == 0 {
        return Some(0);
    }
    match s.char_indices().nth(chars) {
        Some((idx, _)) => Some(idx),
        None if s.chars().count() == chars => Some(s.len()),
        None => None,
    }
}

/// 选中匹配时交给宿主的跳转坐标
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchLocation {
    pub filename: String,
    pub line: usize,
    pub column: usize,
    pub match_length: usize,
}

/// 宿主侧的跳转回调（编辑器滚动/高亮）
pub trait MatchSink {
    fn match_selected(&mut self, location: &MatchLocation);
}

impl<F> MatchSink for F
where
    F: FnMut(&MatchLocation),
{
    fn match_selected(&mut self, location: &MatchLocation) {
        self(location)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub matches: Vec<SearchMatch>,
    pub total_count: usize,
    /// 正则编译失败、已退化为字面量搜索时的错误信息
    pub regex_fallback: Option<String>,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn file_count(&self) -> usize {
        let mut count = 0usize;
        let mut last: Option<&str> = None;
        for m in &self.matches {
            if last != Some(m.filename.as_str()) {
                count += 1;
                last = Some(m.filename.as_str());
            }
        }
        count
    }

    pub fn summary(&self) -> String {
        let files = self.file_count();
        format!(
            "{} {} across {} {}",
            self.total_count,
            if self.total_count == 1 { "match" } else { "matches" },
            files,
            if files == 1 { "file" } else { "files" },
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

#[derive(Debug, Clone)]
pub enum GlobalSearchMessage {
    Progress {
        search_id: u64,
        documents_searched: usize,
        total_documents: usize,
    },
    Complete {
        search_id: u64,
        outcome: SearchOutcome,
    },
    Cancelled {
        search_id: u64,
    },
}

impl GlobalSearchMessage {
    pub fn search_id(&self) -> u64 {
        match self {
            GlobalSearchMessage::Progress { search_id, .. }
            | GlobalSearchMessage::Complete { search_id, .. }
            | GlobalSearchMessage::Cancelled { search_id } => *search_id,
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/search.rs"]
mod tests;
