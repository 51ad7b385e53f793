use super::*;
use chrono::{TimeZone, Utc};

fn post(id: u64) -> Post {
    Post {
        id,
        author_id: 1,
        author_handle: "ada".into(),
        text: "t".into(),
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
        lang: None,
    }
}

async fn send_posts(tx: &mpsc::Sender<Post>, ids: std::ops::Range<u64>) {
    for id in ids {
        tx.send(post(id)).await.unwrap();
    }
}

#[tokio::test(start_paused = true)]
async fn test_count_trigger_closes_window() {
    let (tx, rx) = mpsc::channel(512);
    let mut windower = Windower::new(rx, 100, Duration::from_secs(10));
    let cancel = CancellationToken::new();

    // 250 posts arriving in a burst: two full batches immediately, the
    // remainder only once the window times out.
    send_posts(&tx, 0..250).await;

    let first = windower.next_batch(&cancel).await.unwrap();
    assert_eq!(first.len(), 100);
    assert_eq!(first[0].id, 0);

    let second = windower.next_batch(&cancel).await.unwrap();
    assert_eq!(second.len(), 100);
    assert_eq!(second[0].id, 100);

    let started = Instant::now();
    let third = windower.next_batch(&cancel).await.unwrap();
    assert_eq!(third.len(), 50);
    assert!(started.elapsed() >= Duration::from_secs(10));
}

#[tokio::test(start_paused = true)]
async fn test_time_trigger_closes_window() {
    let (tx, rx) = mpsc::channel(512);
    let mut windower = Windower::new(rx, 100, Duration::from_secs(10));
    let cancel = CancellationToken::new();

    send_posts(&tx, 0..3).await;

    let batch = windower.next_batch(&cancel).await.unwrap();
    assert_eq!(batch.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_batch_never_exceeds_max_count() {
    let (tx, rx) = mpsc::channel(512);
    let mut windower = Windower::new(rx, 7, Duration::from_secs(10));
    let cancel = CancellationToken::new();

    send_posts(&tx, 0..20).await;

    while let Some(batch) = windower.next_batch(&cancel).await {
        assert!(!batch.is_empty());
        assert!(batch.len() <= 7);
        if batch.len() < 7 {
            // Partial batch: must be the timeout flush of the tail.
            assert_eq!(batch.len(), 20 % 7);
            break;
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_end_of_stream_flushes_partial_window() {
    let (tx, rx) = mpsc::channel(512);
    let mut windower = Windower::new(rx, 100, Duration::from_secs(10));
    let cancel = CancellationToken::new();

    send_posts(&tx, 0..30).await;
    drop(tx);

    let tail = windower.next_batch(&cancel).await.unwrap();
    assert_eq!(tail.len(), 30);

    assert!(windower.next_batch(&cancel).await.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_idle_window_emits_nothing() {
    let (tx, rx) = mpsc::channel::<Post>(512);
    let mut windower = Windower::new(rx, 100, Duration::from_millis(50));
    let cancel = CancellationToken::new();

    // No posts at all: end of stream without any batch.
    drop(tx);
    assert!(windower.next_batch(&cancel).await.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_while_idle_returns_none() {
    let (_tx, rx) = mpsc::channel::<Post>(512);
    let mut windower = Windower::new(rx, 100, Duration::from_secs(10));
    let cancel = CancellationToken::new();
    cancel.cancel();

    assert!(windower.next_batch(&cancel).await.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_mid_window_flushes_buffer() {
    let (tx, rx) = mpsc::channel(512);
    let mut windower = Windower::new(rx, 100, Duration::from_secs(60));
    let cancel = CancellationToken::new();

    send_posts(&tx, 0..5).await;

    let windower_cancel = cancel.clone();
    let handle = tokio::spawn(async move {
        let mut windower = windower;
        windower.next_batch(&windower_cancel).await
    });

    // Let the windower buffer the posts, then cancel.
    tokio::time::sleep(Duration::from_millis(10)).await;
    cancel.cancel();

    let batch = handle.await.unwrap().unwrap();
    assert_eq!(batch.len(), 5);
}
