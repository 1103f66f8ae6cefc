use crate::models::SuggestionItem;

/// 触发搜索所需的最少字符数
pub const MIN_QUERY_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// 输入不足两个字符，没有候选
    Idle,
    /// 已收到按键，防抖计时中
    Debouncing,
    /// 请求已发出
    Fetching,
    /// 最新请求的结果已展示
    Showing,
    /// 用户选中候选或点击了外部区域
    Dismissed,
}

/// 一次已发出的搜索请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    pub sequence_number: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeystrokeOutcome {
    /// 输入过短，候选已清空，计时器应取消
    Cleared,
    /// 需要（重新）启动防抖计时器，计时结束时凭此编号发起请求
    Armed(u64),
}

/// 三个字母的输入直接视为地点代码
pub fn is_location_code(text: &str) -> bool {
    text.len() == 3 && text.chars().all(|c| c.is_ascii_alphabetic())
}

/// 自动补全输入框的状态机，不涉及计时和网络
///
/// 所有作废操作（新输入过短、选中、点击外部、重置）都会推进 `latest_seq`，
/// 使仍在途中的请求结果在回来时被丢弃。
#[derive(Debug, Clone)]
pub struct AutocompleteState {
    input: String,
    code: Option<String>,
    suggestions: Vec<SuggestionItem>,
    phase: Phase,
    visible: bool,
    loading: bool,
    expanded: Option<String>,
    latest_seq: u64,
    next_ticket: u64,
    pending_ticket: Option<u64>,
}

impl Default for AutocompleteState {
    fn default() -> Self {
        Self::new()
    }
}

impl AutocompleteState {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            code: None,
            suggestions: Vec::new(),
            phase: Phase::Idle,
            visible: false,
            loading: false,
            expanded: None,
            latest_seq: 0,
            next_ticket: 0,
            pending_ticket: None,
        }
    }

    pub fn on_keystroke(&mut self, text: &str) -> KeystrokeOutcome {
        self.input = text.to_string();
        self.expanded = None;
        self.code = is_location_code(text).then(|| text.to_ascii_uppercase());

        if text.chars().count() < MIN_QUERY_LEN {
            self.invalidate();
            self.suggestions.clear();
            self.visible = false;
            self.phase = Phase::Idle;
            return KeystrokeOutcome::Cleared;
        }

        self.next_ticket += 1;
        self.pending_ticket = Some(self.next_ticket);
        self.phase = Phase::Debouncing;
        KeystrokeOutcome::Armed(self.next_ticket)
    }

    /// 计时器触发。编号不是最近一次按键的（已被取消或覆盖）时不发请求
    pub fn begin_fetch(&mut self, ticket: u64) -> Option<SearchQuery> {
        if self.pending_ticket != Some(ticket) {
            return None;
        }
        self.pending_ticket = None;
        self.latest_seq += 1;
        self.phase = Phase::Fetching;
        self.loading = true;

        Some(SearchQuery {
            keyword: self.input.clone(),
            sequence_number: self.latest_seq,
        })
    }

    /// 应用响应，返回 false 表示响应已过期被丢弃
    pub fn apply_response<E>(
        &mut self,
        sequence_number: u64,
        result: Result<Vec<SuggestionItem>, E>,
    ) -> bool {
        if sequence_number != self.latest_seq {
            return false;
        }
        self.loading = false;

        match result {
            Ok(items) => {
                self.suggestions = items;
                self.visible = true;
                // 新的按键正在计时时保持 Debouncing，等它自己的请求
                if self.pending_ticket.is_none() {
                    self.phase = Phase::Showing;
                }
            }
            Err(_) => {
                self.suggestions.clear();
                self.visible = false;
                if self.pending_ticket.is_none() {
                    self.phase = Phase::Idle;
                }
            }
        }
        true
    }

    pub fn select(&mut self, item: &SuggestionItem) {
        self.invalidate();
        self.code = Some(item.code.clone());
        self.input = item.label();
        self.suggestions.clear();
        self.visible = false;
        self.expanded = None;
        self.phase = Phase::Dismissed;
    }

    /// 点击输入框和候选面板之外的区域
    pub fn dismiss(&mut self) {
        if self.phase == Phase::Idle {
            return;
        }
        self.invalidate();
        self.visible = false;
        self.expanded = None;
        self.phase = Phase::Dismissed;
    }

    /// 表单重置
    pub fn reset(&mut self) {
        self.invalidate();
        self.input.clear();
        self.code = None;
        self.suggestions.clear();
        self.visible = false;
        self.expanded = None;
        self.phase = Phase::Idle;
    }

    pub fn toggle_expanded(&mut self, id: &str) {
        if self.expanded.as_deref() == Some(id) {
            self.expanded = None;
        } else if self.suggestions.iter().any(|s| s.id == id) {
            self.expanded = Some(id.to_string());
        }
    }

    // 取消待触发的计时器，并让在途请求过期
    fn invalidate(&mut self) {
        self.pending_ticket = None;
        self.latest_seq += 1;
        self.loading = false;
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// 权威值：只有解析出的地点代码才是有效的搜索参数
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn suggestions(&self) -> &[SuggestionItem] {
        &self.suggestions
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    pub fn latest_sequence(&self) -> u64 {
        self.latest_seq
    }

    pub fn has_pending_timer(&self) -> bool {
        self.pending_ticket.is_some()
    }

    /// 对应 "No locations found"
    pub fn shows_no_results(&self) -> bool {
        self.visible && !self.loading && self.suggestions.is_empty()
    }
}
