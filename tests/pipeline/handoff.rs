//! Hand-off queue behaviour across OS threads

use drainpipe::core::shutdown::CancellationSignal;
use drainpipe::queue::{HandoffQueue, Message};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_fifo_between_producer_and_taker_threads() {
    let queue = Arc::new(HandoffQueue::new("input"));
    let cancel = CancellationSignal::new();

    let producer = {
        let queue = queue.clone();
        tokio::spawn(async move {
            for n in 0..500 {
                queue.put(Message::new(n.to_string())).unwrap();
                if n % 50 == 0 {
                    tokio::task::yield_now().await;
                }
            }
        })
    };

    let mut taken = Vec::new();
    for _ in 0..500 {
        taken.push(queue.take(&cancel).await.unwrap().into_data());
    }
    producer.await.unwrap();

    let expected: Vec<String> = (0..500).map(|n| n.to_string()).collect();
    assert_eq!(taken, expected);
    assert!(queue.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_interrupted_take_races_never_lose_messages() {
    for round in 0..50 {
        let queue = Arc::new(HandoffQueue::new("output"));
        let cancel = CancellationSignal::new();

        let taker = {
            let queue = queue.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move {
                let mut taken = Vec::new();
                while let Ok(message) = queue.take(&cancel).await {
                    taken.push(message.into_data());
                }
                taken.extend(queue.drain_all().unwrap().into_iter().map(Message::into_data));
                taken
            })
        };

        for n in 0..10 {
            queue.put(Message::new(format!("{}-{}", round, n))).unwrap();
        }
        cancel.cancel();

        let taken = tokio::time::timeout(Duration::from_secs(5), taker)
            .await
            .unwrap()
            .unwrap();
        let unique: HashSet<&String> = taken.iter().collect();

        assert_eq!(taken.len(), 10, "round {}: {:?}", round, taken);
        assert_eq!(unique.len(), 10);
        let expected: Vec<String> = (0..10).map(|n| format!("{}-{}", round, n)).collect();
        assert_eq!(taken, expected);
    }
}
