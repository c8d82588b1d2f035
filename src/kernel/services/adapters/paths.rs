//! 平台目录
//!
//! 数据目录（日志、历史 json）：
//! - macOS: ~/Library/Application Support/zcode
//! - Linux: $XDG_DATA_HOME/zcode 或 ~/.local/share/zcode
//! - Windows: %APPDATA%\zcode
//!
//! 缓存目录（setting.json 所在）：
//! - macOS: ~/Library/Caches
//! - Linux: $XDG_CACHE_HOME 或 ~/.cache
//! - Windows: %LOCALAPPDATA%，退回 %APPDATA%

use std::path::PathBuf;

const APP_NAME: &str = "zcode";
const LOG_DIR: &str = "logs";
const STORAGE_DIR: &str = "search";

#[derive(Clone, Copy)]
enum DirKind {
    Data,
    Cache,
}

fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn home_join(rel: &str) -> Option<PathBuf> {
    env_dir("HOME").map(|home| home.join(rel))
}

#[cfg(target_os = "macos")]
fn platform_dir(kind: DirKind) -> Option<PathBuf> {
    match kind {
        DirKind::Data => home_join("Library/Application Support"),
        DirKind::Cache => home_join("Library/Caches"),
    }
}

#[cfg(target_os = "linux")]
fn platform_dir(kind: DirKind) -> Option<PathBuf> {
    match kind {
        DirKind::Data => env_dir("XDG_DATA_HOME").or_else(|| home_join(".local/share")),
        DirKind::Cache => env_dir("XDG_CACHE_HOME").or_else(|| home_join(".cache")),
    }
}

#[cfg(target_os = "windows")]
fn platform_dir(kind: DirKind) -> Option<PathBuf> {
    match kind {
        DirKind::Data => env_dir("APPDATA"),
        DirKind::Cache => env_dir("LOCALAPPDATA").or_else(|| env_dir("APPDATA")),
    }
}

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
fn platform_dir(_kind: DirKind) -> Option<PathBuf> {
    None
}

pub fn get_cache_dir() -> Option<PathBuf> {
    platform_dir(DirKind::Cache)
}

fn get_app_data_dir() -> Option<PathBuf> {
    platform_dir(DirKind::Data).map(|dir| dir.join(APP_NAME))
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(LOG_DIR))
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = get_log_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine log directory",
        )
    })?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// 历史 / 预设 json 的默认目录
pub fn get_storage_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(STORAGE_DIR))
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/paths.rs"]
mod tests;
