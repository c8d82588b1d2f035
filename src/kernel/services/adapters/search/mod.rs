//! 搜索服务模块
//!
//! - CompiledPattern: 查询编译（字面量 / 全词 / 正则，非法正则退化为字面量）
//! - classify: 匹配上下文的行级启发式分类
//! - SearchEngine: 同步多文档搜索
//! - GlobalSearchService: 异步多文档搜索（可在文档之间取消）

mod classify;
mod engine;
mod global;
mod searcher;

pub use classify::{classify, is_comment_line};
pub use engine::{available_file_types, SearchEngine};
pub use global::{GlobalSearchService, GlobalSearchTask};
pub use searcher::{CompiledPattern, Matcher, PatternError, PatternOptions, Span};
