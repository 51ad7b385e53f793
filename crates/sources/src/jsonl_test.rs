use super::*;
use std::io::Write;

fn line(id: u64) -> String {
    format!(
        r#"{{"id": {}, "author_id": 1, "author_handle": "ada", "text": "t", "created_at": "2024-05-01T00:00:00Z"}}"#,
        id
    )
}

#[tokio::test]
async fn test_replays_posts_in_order() {
    let input = format!("{}\n{}\n{}\n", line(1), line(2), line(3));
    let (tx, mut rx) = mpsc::channel(16);
    let source = JsonlSource::new("sample", input.as_bytes(), tx);

    let snapshot = source.run(CancellationToken::new()).await.unwrap();
    assert_eq!(snapshot.posts_read, 3);
    assert_eq!(snapshot.malformed_lines, 0);

    let ids: Vec<u64> = std::iter::from_fn(|| rx.try_recv().ok()).map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    // Sender dropped with the source: end of stream for the pipeline.
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn test_malformed_lines_are_counted_and_skipped() {
    let input = format!("{}\nnot json\n\n{}\n", line(1), line(2));
    let (tx, mut rx) = mpsc::channel(16);
    let source = JsonlSource::new("sample", input.as_bytes(), tx);

    let snapshot = source.run(CancellationToken::new()).await.unwrap();
    assert_eq!(snapshot.posts_read, 2);
    assert_eq!(snapshot.malformed_lines, 1);

    assert_eq!(rx.recv().await.unwrap().id, 1);
    assert_eq!(rx.recv().await.unwrap().id, 2);
}

#[tokio::test]
async fn test_stops_when_pipeline_goes_away() {
    let input = format!("{}\n{}\n", line(1), line(2));
    let (tx, rx) = mpsc::channel(16);
    drop(rx);

    let source = JsonlSource::new("sample", input.as_bytes(), tx);
    // Must return cleanly, not error, when the receiver is gone.
    source.run(CancellationToken::new()).await.unwrap();
}

#[tokio::test]
async fn test_open_reader_reads_files() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{}", line(9)).unwrap();

    let reader = open_reader(file.path().to_str().unwrap()).await.unwrap();
    let (tx, mut rx) = mpsc::channel(16);
    let source = JsonlSource::new("sample", reader, tx);

    let snapshot = source.run(CancellationToken::new()).await.unwrap();
    assert_eq!(snapshot.posts_read, 1);
    assert_eq!(rx.recv().await.unwrap().id, 9);
}

#[tokio::test]
async fn test_missing_file_is_an_io_error() {
    let result = open_reader("/definitely/not/here.jsonl").await;
    assert!(matches!(result, Err(SourceError::Io(_))));
}
