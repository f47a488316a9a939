use crate::ports::TimerPort;
use async_trait::async_trait;
use std::cell::RefCell;

/// Timer that returns immediately and remembers every requested delay.
#[derive(Debug, Default)]
pub struct RecordingTimer {
    sleeps: RefCell<Vec<u32>>,
}

impl RecordingTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sleeps(&self) -> Vec<u32> {
        self.sleeps.borrow().clone()
    }
}

#[async_trait(?Send)]
impl TimerPort for RecordingTimer {
    async fn sleep(&self, millis: u32) {
        self.sleeps.borrow_mut().push(millis);
    }
}
