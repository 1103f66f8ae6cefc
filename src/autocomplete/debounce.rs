use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// 单槽定时任务：重新布置会取消上一个尚未触发的任务
#[derive(Debug, Default)]
pub struct DebounceSlot {
    handle: Option<JoinHandle<()>>,
}

impl DebounceSlot {
    pub fn new() -> Self {
        Self { handle: None }
    }

    pub fn arm<F>(&mut self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for DebounceSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}
