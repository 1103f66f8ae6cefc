use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::Mutex;

use super::debounce::DebounceSlot;
use super::source::LocationSource;
use super::state::{AutocompleteState, KeystrokeOutcome, SearchQuery};
use crate::models::SuggestionItem;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// 自动补全协调器
///
/// 把按键流转换为防抖后的请求，只渲染最近一次发出的请求的结果。
/// 被覆盖的在途请求不会被中止，它们完成后由序号检查丢弃。
#[derive(Clone)]
pub struct SearchCoordinator {
    shared: Arc<Shared>,
}

struct Shared {
    inner: Mutex<Inner>,
    source: Arc<dyn LocationSource>,
    debounce: Duration,
}

struct Inner {
    state: AutocompleteState,
    timer: DebounceSlot,
}

impl SearchCoordinator {
    pub fn new(source: Arc<dyn LocationSource>) -> Self {
        Self::with_debounce(source, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(source: Arc<dyn LocationSource>, debounce: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    state: AutocompleteState::new(),
                    timer: DebounceSlot::new(),
                }),
                source,
                debounce,
            }),
        }
    }

    pub async fn on_keystroke(&self, text: &str) {
        let mut inner = self.shared.inner.lock().await;

        // 持锁布置计时器，旧任务拿不到锁就会被取消
        let outcome = inner.state.on_keystroke(text);
        match outcome {
            KeystrokeOutcome::Cleared => inner.timer.cancel(),
            KeystrokeOutcome::Armed(ticket) => {
                let shared = Arc::downgrade(&self.shared);
                inner.timer.arm(self.shared.debounce, fire(shared, ticket));
            }
        }
    }

    pub async fn select(&self, item: &SuggestionItem) {
        let mut inner = self.shared.inner.lock().await;
        inner.timer.cancel();
        inner.state.select(item);
        tracing::debug!("Location {} selected", item.code);
    }

    /// 输入框和候选面板之外的指针按下
    pub async fn dismiss(&self) {
        let mut inner = self.shared.inner.lock().await;
        inner.timer.cancel();
        inner.state.dismiss();
    }

    pub async fn reset(&self) {
        let mut inner = self.shared.inner.lock().await;
        inner.timer.cancel();
        inner.state.reset();
    }

    pub async fn toggle_expanded(&self, id: &str) {
        self.shared.inner.lock().await.state.toggle_expanded(id);
    }

    /// 当前状态的快照
    pub async fn snapshot(&self) -> AutocompleteState {
        self.shared.inner.lock().await.state.clone()
    }

    pub async fn code(&self) -> Option<String> {
        self.shared
            .inner
            .lock()
            .await
            .state
            .code()
            .map(str::to_string)
    }
}

// 计时器触发：分配序号并在独立任务中发请求，计时任务本身立即结束
async fn fire(shared: Weak<Shared>, ticket: u64) {
    let Some(shared) = shared.upgrade() else {
        return;
    };

    let query = shared.inner.lock().await.state.begin_fetch(ticket);
    let Some(query) = query else {
        return;
    };

    tracing::debug!(
        "Searching locations for {:?} (#{})",
        query.keyword,
        query.sequence_number
    );
    tokio::spawn(fetch(shared, query));
}

async fn fetch(shared: Arc<Shared>, query: SearchQuery) {
    let result = shared.source.search(&query.keyword).await;
    if let Err(err) = &result {
        tracing::warn!("Location search for {:?} failed: {}", query.keyword, err);
    }

    let mut inner = shared.inner.lock().await;
    if !inner.state.apply_response(query.sequence_number, result) {
        tracing::debug!(
            "Discarding stale response #{} for {:?}",
            query.sequence_number,
            query.keyword
        );
    }
}
