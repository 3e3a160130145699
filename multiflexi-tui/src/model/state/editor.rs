//! 编辑器与调度器状态

use multiflexi_core::{CoreResult, Item};

/// 可编辑字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorField {
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
}

/// 编辑器状态
#[derive(Debug, Clone)]
pub struct EditorState {
    /// 编辑前的记录
    pub item: Item,
    pub fields: Vec<EditorField>,
    /// 当前焦点字段
    pub focused: usize,
    /// 校验错误
    pub error: Option<String>,
}

impl EditorState {
    pub fn new(item: Item) -> Self {
        let fields = item
            .editable_fields()
            .iter()
            .map(|&(key, label)| EditorField {
                key,
                label,
                value: item.value(key).unwrap_or_default(),
            })
            .collect();
        Self {
            item,
            fields,
            focused: 0,
            error: None,
        }
    }

    /// 下一个字段（循环）
    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    /// 上一个字段（循环）
    pub fn previous_field(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn input(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.value.push(c);
            self.error = None;
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.value.pop();
            self.error = None;
        }
    }

    /// 将编辑结果写回记录副本
    pub fn build(&self) -> CoreResult<Item> {
        let mut item = self.item.clone();
        for field in &self.fields {
            item.set_field(field.key, &field.value)?;
        }
        Ok(item)
    }
}

/// 运行模板调度状态
#[derive(Debug, Clone)]
pub struct SchedulerState {
    pub item: Item,
    /// 间隔代码输入
    pub interval: String,
    pub error: Option<String>,
}

impl SchedulerState {
    pub fn new(item: Item) -> Self {
        let interval = item.value("interv").unwrap_or_default();
        Self {
            item,
            interval,
            error: None,
        }
    }

    pub fn input(&mut self, c: char) {
        self.interval.push(c);
        self.error = None;
    }

    pub fn backspace(&mut self) {
        self.interval.pop();
        self.error = None;
    }

    pub fn build(&self) -> CoreResult<Item> {
        let mut item = self.item.clone();
        item.set_field("interv", &self.interval)?;
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiflexi_core::types::{Company, RunTemplate};
    use multiflexi_core::CoreError;

    fn company() -> Item {
        Item::Company(Company {
            id: 4,
            name: "Acme".to_string(),
            email: "info@acme.test".to_string(),
            ..Company::default()
        })
    }

    #[test]
    fn fields_start_from_record_values() {
        let editor = EditorState::new(company());
        let names: Vec<_> = editor.fields.iter().map(|f| f.key).collect();
        assert_eq!(names, vec!["name", "email", "ic", "slug"]);
        assert_eq!(editor.fields[0].value, "Acme");
    }

    #[test]
    fn typing_edits_focused_field_only() {
        let mut editor = EditorState::new(company());
        editor.next_field();
        editor.backspace();
        editor.input('z');
        let item = editor.build().unwrap();
        assert_eq!(item.value("email").as_deref(), Some("info@acme.tesz"));
        assert_eq!(item.value("name").as_deref(), Some("Acme"));
        assert_eq!(editor.item.value("email").as_deref(), Some("info@acme.test"));
    }

    #[test]
    fn field_focus_wraps() {
        let mut editor = EditorState::new(company());
        editor.previous_field();
        assert_eq!(editor.focused, 3);
        editor.next_field();
        assert_eq!(editor.focused, 0);
    }

    #[test]
    fn scheduler_rejects_unknown_interval() {
        let template = Item::RunTemplate(RunTemplate {
            id: 2,
            interv: "d".to_string(),
            ..RunTemplate::default()
        });
        let mut scheduler = SchedulerState::new(template);
        assert_eq!(scheduler.interval, "d");
        scheduler.backspace();
        scheduler.input('x');
        assert!(matches!(scheduler.build(), Err(CoreError::InvalidInput { .. })));
        scheduler.backspace();
        scheduler.input('w');
        assert_eq!(scheduler.build().unwrap().value("interv").as_deref(), Some("w"));
    }
}
