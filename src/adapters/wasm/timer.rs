use crate::ports::TimerPort;
use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTimer;

impl GlooTimer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl TimerPort for GlooTimer {
    async fn sleep(&self, millis: u32) {
        TimeoutFuture::new(millis).await;
    }
}
