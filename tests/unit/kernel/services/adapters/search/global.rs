use super::*;
use std::sync::mpsc;
use std::time::Duration;

fn create_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap()
}

fn docs(count: usize, content: &str) -> Vec<Document> {
    (0..count)
        .map(|i| Document::new(format!("file{i:03}.ts"), content))
        .collect()
}

#[test]
fn test_global_search_complete() {
    let rt = create_runtime();
    let service = GlobalSearchService::new(rt.handle().clone());
    let (tx, rx) = mpsc::sync_channel(64);

    let documents = vec![
        Document::new("b.ts", "hello world"),
        Document::new("a.ts", "say hello\nhello again"),
        Document::new("c.ts", "goodbye"),
    ];
    let task = service.search_documents(
        documents,
        "hello".to_string(),
        SearchFilters::default(),
        tx,
    );

    loop {
        match rx.recv_timeout(Duration::from_secs(5)) {
            Ok(GlobalSearchMessage::Complete { search_id, outcome }) => {
                assert_eq!(search_id, task.id());
                assert_eq!(outcome.total_count, 3);
                assert_eq!(outcome.matches[0].filename, "a.ts");
                assert_eq!(outcome.matches[2].filename, "b.ts");
                break;
            }
            Ok(GlobalSearchMessage::Progress { .. }) => continue,
            Ok(GlobalSearchMessage::Cancelled { .. }) => panic!("Unexpected cancel"),
            Err(_) => panic!("Timeout"),
        }
    }
}

#[test]
fn test_global_search_reports_progress() {
    let rt = create_runtime();
    let service = GlobalSearchService::new(rt.handle().clone());
    let (tx, rx) = mpsc::sync_channel(64);

    let _task = service.search_documents(
        docs(250, "let hello = 1;"),
        "hello".to_string(),
        SearchFilters::default(),
        tx,
    );

    let mut progress = Vec::new();
    loop {
        match rx.recv_timeout(Duration::from_secs(5)) {
            Ok(GlobalSearchMessage::Progress {
                documents_searched,
                total_documents,
                ..
            }) => {
                assert_eq!(total_documents, 250);
                progress.push(documents_searched);
            }
            Ok(GlobalSearchMessage::Complete { outcome, .. }) => {
                assert_eq!(outcome.total_count, 250);
                break;
            }
            Ok(GlobalSearchMessage::Cancelled { .. }) => panic!("Unexpected cancel"),
            Err(_) => panic!("Timeout"),
        }
    }

    assert_eq!(progress, vec![100, 200]);
}

#[test]
fn test_empty_query_completes_empty() {
    let rt = create_runtime();
    let service = GlobalSearchService::new(rt.handle().clone());
    let (tx, rx) = mpsc::sync_channel(8);

    let _task = service.search_documents(docs(3, "x"), " ".to_string(), SearchFilters::default(), tx);

    match rx.recv_timeout(Duration::from_secs(5)) {
        Ok(GlobalSearchMessage::Complete { outcome, .. }) => assert!(outcome.is_empty()),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_cancel_search() {
    let rt = create_runtime();
    let service = GlobalSearchService::new(rt.handle().clone());
    let (tx, rx) = mpsc::sync_channel(64);

    let task = service.search_documents(
        docs(5_000, "hello world\n".repeat(20).as_str()),
        "hello".to_string(),
        SearchFilters::default(),
        tx,
    );
    task.cancel();
    assert!(task.is_cancelled());

    loop {
        match rx.recv_timeout(Duration::from_secs(10)) {
            Ok(GlobalSearchMessage::Cancelled { search_id }) => {
                assert_eq!(search_id, task.id());
                break;
            }
            // 取消前已经跑完也是合法结果
            Ok(GlobalSearchMessage::Complete { .. }) => break,
            Ok(GlobalSearchMessage::Progress { .. }) => continue,
            Err(_) => panic!("Timeout"),
        }
    }
}

#[test]
fn test_task_ids_increase() {
    let a = GlobalSearchTask::new();
    let b = GlobalSearchTask::new();
    assert!(b.id() > a.id());
}
