//! Test utilities: a scriptable client that records every native call.
//!
//! [`RecordingConnection`] implements all native traits, including callable
//! statements, so pipeline behaviour can be asserted call by call without a
//! database.

mod recording;

pub use recording::{Call, Operation, RecordingConnection, RecordingPrepared, RecordingStatement};

/// Install a `tracing` subscriber writing to the test harness once.
pub fn init_test_logging() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}
