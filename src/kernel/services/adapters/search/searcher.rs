//! 查询编译器
//!
//! - Literal 模式：大小写敏感的纯文本查询，memchr Finder
//! - Regex 模式：正则 / 全词 / 大小写不敏感的字面量，统一走 regex
//!
//! 非法正则不会中断搜索，退化为对原始查询串的字面量匹配。

use crate::kernel::services::ports::search::SearchFilters;
use crate::kernel::services::ports::settings::DEFAULT_REGEX_SIZE_LIMIT;
use memchr::memmem::Finder;
use regex::{Regex, RegexBuilder};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid regex: {0}")]
pub struct PatternError(#[from] regex::Error);

/// 行内匹配区间（字节偏移）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternOptions {
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub use_regex: bool,
    pub size_limit: usize,
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            whole_word: false,
            use_regex: false,
            size_limit: DEFAULT_REGEX_SIZE_LIMIT,
        }
    }
}

impl PatternOptions {
    pub fn from_filters(filters: &SearchFilters) -> Self {
        Self {
            case_sensitive: filters.case_sensitive,
            whole_word: filters.whole_word,
            use_regex: filters.use_regex,
            ..Self::default()
        }
    }

    pub fn with_size_limit(mut self, size_limit: usize) -> Self {
        self.size_limit = size_limit;
        self
    }
}

#[derive(Debug, Clone)]
pub enum Matcher {
    Literal { finder: Finder<'static> },
    Regex { regex: Regex },
}

/// 编译好的查询，可在任意行上重复使用
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    matcher: Matcher,
    fell_back: Option<String>,
}

impl CompiledPattern {
    /// 去掉首尾空白后为空的查询返回 None（no-op，不是错误）
    pub fn compile(query: &str, options: PatternOptions) -> Option<Self> {
        if query.trim().is_empty() {
            return None;
        }

        if options.use_regex {
            return Some(match build_regex(query, &options) {
                Ok(regex) => Self {
                    matcher: Matcher::Regex { regex },
                    fell_back: None,
                },
                Err(e) => {
                    tracing::warn!(query, error = %e, "invalid regex, falling back to literal search");
                    Self {
                        matcher: literal_matcher(query, &options),
                        fell_back: Some(e.to_string()),
                    }
                }
            });
        }

        if options.whole_word {
            let pattern = format!(r"\b{}\b", regex::escape(query));
            return Some(match build_regex(&pattern, &options) {
                Ok(regex) => Self {
                    matcher: Matcher::Regex { regex },
                    fell_back: None,
                },
                Err(e) => {
                    tracing::warn!(query, error = %e, "whole-word pattern rejected, falling back to literal search");
                    Self {
                        matcher: literal_matcher(query, &options),
                        fell_back: Some(e.to_string()),
                    }
                }
            });
        }

        Some(Self {
            matcher: literal_matcher(query, &options),
            fell_back: None,
        })
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn is_regex(&self) -> bool {
        matches!(self.matcher, Matcher::Regex { .. })
    }

    pub fn fell_back(&self) -> Option<&str> {
        self.fell_back.as_deref()
    }

    /// 从行首开始扫描，每次从上一个匹配的末尾继续，结果互不重叠且长度 > 0
    pub fn spans(&self, line: &str) -> Vec<Span> {
        let mut spans = Vec::new();
        match &self.matcher {
            Matcher::Literal { finder } => {
                let needle_len = finder.needle().len();
                if needle_len == 0 {
                    return spans;
                }
                let haystack = line.as_bytes();
                let mut pos = 0usize;
                while pos < haystack.len() {
                    let Some(found) = finder.find(&haystack[pos..]) else {
                        break;
                    };
                    let start = pos + found;
                    spans.push(Span {
                        start,
                        len: needle_len,
                    });
                    pos = start + needle_len;
                }
            }
            Matcher::Regex { regex } => {
                // 空匹配（如 `a*`）跳过，find_iter 自身保证前进
                spans.extend(
                    regex
                        .find_iter(line)
                        .filter(|m| !m.is_empty())
                        .map(|m| Span {
                            start: m.start(),
                            len: m.len(),
                        }),
                );
            }
        }
        spans
    }
}

fn build_regex(pattern: &str, options: &PatternOptions) -> Result<Regex, PatternError> {
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(!options.case_sensitive)
        .size_limit(options.size_limit)
        .build()?;
    Ok(regex)
}

/// 纯字面量：大小写敏感走 Finder，否则转义后交给 regex
fn literal_matcher(query: &str, options: &PatternOptions) -> Matcher {
    if !options.case_sensitive {
        match build_regex(&regex::escape(query), options) {
            Ok(regex) => return Matcher::Regex { regex },
            Err(e) => {
                tracing::warn!(error = %e, "escaped literal rejected, matching exact case");
            }
        }
    }
    Matcher::Literal {
        finder: Finder::new(query.as_bytes()).into_owned(),
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/searcher.rs"]
mod tests;
