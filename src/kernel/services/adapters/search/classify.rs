//! 匹配上下文的行级启发式分类（不是词法分析）
//!
//! 顺序：comment -> string -> keyword -> code，命中即返回。

use super::searcher::Span;
use crate::kernel::services::ports::search::MatchKind;
use memchr::memchr;
use regex::Regex;
use std::sync::OnceLock;

const COMMENT_PREFIXES: [&str; 4] = ["//", "/*", "*", "#"];
const QUOTES: [u8; 3] = [b'"', b'\'', b'`'];
const KEYWORDS: [&str; 9] = [
    "function",
    "const",
    "let",
    "var",
    "class",
    "import",
    "export",
    "interface",
    "type",
];

/// 去掉首尾空白后以注释前缀开头
pub fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim();
    COMMENT_PREFIXES.iter().any(|p| trimmed.starts_with(p))
}

pub fn classify(line: &str, span: Span) -> MatchKind {
    if is_comment_line(line) || line.contains("/*") {
        return MatchKind::Comment;
    }
    if inside_quotes(line.as_bytes(), span.start) {
        return MatchKind::String;
    }
    if has_keyword_before(line, span.end()) {
        return MatchKind::Keyword;
    }
    MatchKind::Code
}

/// 只看每种引号在行内的第一次出现，以及匹配起点之后（含起点）的第一次出现
fn inside_quotes(line: &[u8], start: usize) -> bool {
    QUOTES.iter().any(|&q| {
        let Some(first) = memchr(q, line) else {
            return false;
        };
        if first >= start {
            return false;
        }
        matches!(memchr(q, &line[start..]), Some(offset) if offset > 0)
    })
}

fn has_keyword_before(line: &str, end: usize) -> bool {
    let end = floor_char_boundary(line, end.min(line.len()));
    keyword_regex().is_match(&line[..end])
}

fn keyword_regex() -> &'static Regex {
    static KEYWORD_RE: OnceLock<Regex> = OnceLock::new();
    KEYWORD_RE.get_or_init(|| {
        let pattern = format!(r"\b(?:{})\b", KEYWORDS.join("|"));
        Regex::new(&pattern).expect("keyword pattern is valid")
    })
}

fn floor_char_boundary(s: &str, mut idx: usize) -> usize {
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/classify.rs"]
mod tests;
