//! Host shutdown and consumer cancellation through the public API

use drainpipe::core::shutdown::CancellationSignal;
use drainpipe::pipeline::api::{
    spawn_consumer, ConsumerState, MemorySink, Pipeline, PipelineSettings, StopReason,
};
use drainpipe::queue::{HandoffQueue, Message};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_host_shutdown_stops_an_endless_run() {
    // The sentinel is never produced, so only the host can end this run.
    let settings = PipelineSettings {
        sentinel: "never".to_string(),
        late_messages: Vec::new(),
        ..PipelineSettings::default()
    };
    let pipeline = Pipeline::new(settings).unwrap();
    let sink = Arc::new(MemorySink::new());
    let host_shutdown = CancellationSignal::new();

    let trigger = {
        let host_shutdown = host_shutdown.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(2_600)).await;
            host_shutdown.cancel();
        })
    };

    let report = pipeline.run(sink.clone(), &host_shutdown).await.unwrap();
    trigger.await.unwrap();

    assert_eq!(report.stop_reason, StopReason::HostShutdown);
    assert_eq!(report.processed, 11);

    let expected: Vec<String> = (0..11).map(|n| format!("Transformed {}", n)).collect();
    assert_eq!(sink.written_data(), expected);
}

#[tokio::test(start_paused = true)]
async fn test_consumer_handle_lifecycle() {
    let queue = Arc::new(HandoffQueue::new("output"));
    let sink = Arc::new(MemorySink::with_delay(Duration::from_millis(500)));
    let consumer = spawn_consumer(queue.clone(), sink.clone());

    queue.put(Message::from("Transformed 0")).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(consumer.state(), ConsumerState::Running);
    assert!(!consumer.is_cancel_requested());

    queue.put(Message::from("Transformed 1")).unwrap();
    assert!(consumer.cancel());
    assert!(!consumer.cancel());

    let report = consumer.join().await.unwrap();
    assert_eq!(report.taken, 1);
    assert_eq!(report.drained, 1);
    assert_eq!(sink.written_data(), vec!["Transformed 0", "Transformed 1"]);
}
