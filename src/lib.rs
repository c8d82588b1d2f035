//! zcode-search - 打开文件的内存多文件搜索
//!
//! 模块结构：
//! - core: 服务注册（Service, ServiceRegistry）
//! - kernel::services::ports: 数据契约（Document, SearchFilters, SearchMatch, HistoryEntry）
//! - kernel::services::adapters: 查询编译、分类、搜索引擎、历史存储
//! - kernel::search: 搜索面板状态（分组、展开折叠、上下导航）

pub mod core;
pub mod kernel;
