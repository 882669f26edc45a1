use std::time::Duration;

use faq_widget_core::Delay;

/// Browser timer (`setTimeout`) based delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerDelay;

impl Delay for TimerDelay {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}
