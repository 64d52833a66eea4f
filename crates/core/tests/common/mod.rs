//! Shared setup for the integration tests
//!
//! Installs a tracing subscriber once per test binary so solver logs show
//! up with `RUST_LOG=smoke_sim_core=debug cargo test -- --nocapture`.

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
