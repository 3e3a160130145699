//! 外部命令列表与帮助文本状态

use multiflexi_core::types::CommandInfo;

/// 命令列表状态
#[derive(Debug, Default)]
pub struct CommandsState {
    pub commands: Vec<CommandInfo>,
    /// 当前选中的索引
    pub selected: usize,
    pub loading: bool,
    pub error: Option<String>,
}

impl CommandsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 是否需要（重新）加载
    pub fn needs_load(&self) -> bool {
        !self.loading && (self.commands.is_empty() || self.error.is_some())
    }

    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn select_next(&mut self) {
        if !self.commands.is_empty() && self.selected < self.commands.len() - 1 {
            self.selected += 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.commands.len().saturating_sub(1);
    }

    pub fn selected_command(&self) -> Option<&CommandInfo> {
        self.commands.get(self.selected)
    }

    pub fn set_commands(&mut self, commands: Vec<CommandInfo>) {
        self.commands = commands;
        self.selected = 0;
        self.loading = false;
        self.error = None;
    }
}

/// 帮助文本查看器状态
#[derive(Debug, Default)]
pub struct HelpState {
    /// 命令名，空字符串表示工具本身
    pub command: String,
    pub lines: Vec<String>,
    pub error: Option<String>,
    pub loading: bool,
    /// 首个可见行
    pub scroll: usize,
    /// 可见行数
    pub viewport: usize,
}

impl HelpState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开始加载某个命令的帮助
    pub fn begin(&mut self, command: impl Into<String>) {
        self.command = command.into();
        self.lines.clear();
        self.error = None;
        self.loading = true;
        self.scroll = 0;
    }

    pub fn title(&self) -> String {
        if self.command.is_empty() {
            "multiflexi-cli".to_string()
        } else {
            format!("multiflexi-cli {}", self.command)
        }
    }

    pub fn set_content(&mut self, content: &str) {
        self.lines = content.lines().map(str::to_string).collect();
        self.loading = false;
        self.error = None;
        self.scroll = 0;
    }

    pub fn set_error(&mut self, error: String) {
        self.lines.clear();
        self.loading = false;
        self.error = Some(error);
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.viewport.max(1))
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll = self.scroll.saturating_sub(rows);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll = (self.scroll + rows).min(self.max_scroll());
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    /// 窗口大小变化后重新约束滚动位置
    pub fn set_viewport(&mut self, rows: usize) {
        self.viewport = rows;
        self.scroll = self.scroll.min(self.max_scroll());
    }
}
