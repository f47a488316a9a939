use async_trait::async_trait;

/// Port for the delay between two poll cycles.
#[async_trait(?Send)]
pub trait TimerPort {
    async fn sleep(&self, millis: u32);
}
