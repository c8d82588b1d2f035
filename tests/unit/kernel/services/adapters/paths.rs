use super::*;

#[test]
fn test_get_log_dir() {
    let dir = get_log_dir();
    // 在测试环境中应该能获取到目录
    assert!(dir.is_some());
    let dir = dir.unwrap();
    assert!(dir.to_string_lossy().contains(APP_NAME));
    assert!(dir.ends_with(LOG_DIR));
}

#[test]
fn test_get_storage_dir() {
    let dir = get_storage_dir().unwrap();
    assert!(dir.to_string_lossy().contains(APP_NAME));
    assert!(dir.ends_with(STORAGE_DIR));
}

#[test]
fn test_cache_dir_is_outside_app_dir() {
    let cache = get_cache_dir().unwrap();
    assert!(!cache.ends_with(APP_NAME));
}
