use std::time::Duration;

/// A timer that completes after a given duration.
///
/// The core stays runtime-agnostic: the browser widget plugs in its own
/// timers and the server plugs in tokio's.
#[allow(async_fn_in_trait)]
pub trait Delay {
    async fn sleep(&self, duration: Duration);
}
