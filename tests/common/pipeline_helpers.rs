//! Helpers shared by the pipeline integration tests

use drainpipe::pipeline::api::PipelineSettings;
use std::time::Duration;

/// Settings with millisecond-scale delays for real-time runs
pub fn fast_settings() -> PipelineSettings {
    PipelineSettings {
        generator_interval: Duration::from_millis(2),
        sink_delay: Duration::from_millis(3),
        late_put_gap: Duration::from_millis(1),
        ..PipelineSettings::default()
    }
}

/// Check what any run of the reference pipeline may sink
///
/// The first six messages are the transformed `"0"` to `"5"` in order;
/// anything after them is one of the late messages, each at most once.
pub fn assert_allowed_output(written: &[String], late_messages: &[String]) {
    assert!(written.len() >= 6, "too few messages sunk: {:?}", written);
    for (n, data) in written.iter().take(6).enumerate() {
        assert_eq!(data, &format!("Transformed {}", n));
    }

    let extras = &written[6..];
    for (index, data) in extras.iter().enumerate() {
        assert!(
            late_messages.contains(data),
            "unexpected message sunk: {}",
            data
        );
        assert!(
            !extras[..index].contains(data),
            "message sunk twice: {}",
            data
        );
    }
}
