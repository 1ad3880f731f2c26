pub mod fake_backend;
pub mod memory_store;
pub mod process;

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

pub use fake_backend::FakeProcessBackend;
pub use memory_store::MemoryStateStore;

static INIT: Once = Once::new();

/// Install a test-captured subscriber once per test binary.
///
/// Supervisor and store events are at `info`; set `RUST_LOG=gazer=debug` to
/// also see state file reads and signal delivery of a failing test.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("gazer=info,warn"));

        fmt().with_env_filter(filter).with_test_writer().init();
    });
}
