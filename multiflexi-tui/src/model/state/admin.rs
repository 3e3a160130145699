//! 管理页面状态：清理与加密

use multiflexi_core::services::DEFAULT_PRUNE_KEEP;
use multiflexi_core::Action;

/// 清理页面的焦点行
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PruneField {
    #[default]
    Logs,
    Jobs,
    Keep,
    Run,
}

impl PruneField {
    const ORDER: [Self; 4] = [Self::Logs, Self::Jobs, Self::Keep, Self::Run];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1).min(Self::ORDER.len() - 1)]
    }

    #[must_use]
    pub fn previous(self) -> Self {
        Self::ORDER[self.index().saturating_sub(1)]
    }
}

/// 清理页面状态
#[derive(Debug)]
pub struct PruneState {
    pub logs: bool,
    pub jobs: bool,
    /// 保留条数输入
    pub keep: String,
    pub focused: PruneField,
    pub running: bool,
    /// 最近一次执行结果
    pub result: Option<String>,
    pub error: Option<String>,
}

impl PruneState {
    pub fn new() -> Self {
        Self {
            logs: false,
            jobs: false,
            keep: DEFAULT_PRUNE_KEEP.to_string(),
            focused: PruneField::default(),
            running: false,
            result: None,
            error: None,
        }
    }

    /// 切换当前复选框
    pub fn toggle(&mut self) {
        match self.focused {
            PruneField::Logs => self.logs = !self.logs,
            PruneField::Jobs => self.jobs = !self.jobs,
            PruneField::Keep | PruneField::Run => {}
        }
    }

    /// 保留条数只接受数字
    pub fn input(&mut self, c: char) {
        if self.focused == PruneField::Keep && c.is_ascii_digit() {
            self.keep.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.focused == PruneField::Keep {
            self.keep.pop();
        }
    }

    /// 根据当前输入构建清理操作
    pub fn action(&self) -> Result<Action, String> {
        let keep = self
            .keep
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("Keep must be a whole number, got '{}'", self.keep))?;
        Ok(Action::Prune {
            logs: self.logs,
            jobs: self.jobs,
            keep,
        })
    }
}

impl Default for PruneState {
    fn default() -> Self {
        Self::new()
    }
}

/// 加密页面状态
#[derive(Debug, Default)]
pub struct EncryptionState {
    pub running: bool,
    pub result: Option<String>,
    pub error: Option<String>,
}

impl EncryptionState {
    pub fn new() -> Self {
        Self::default()
    }
}
