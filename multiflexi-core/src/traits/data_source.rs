//! Data source abstract Trait

use std::fmt;

use async_trait::async_trait;

use crate::error::CoreResult;

/// A structured invocation of the external tool.
///
/// Rendered as `<noun> [<operation>] [--format=..] [--order=..] [--limit=..] [--offset=..] [extra..]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SourceRequest {
    /// Entity noun or top level command (`job`, `status`, `describe`, ...)
    pub noun: String,
    /// Sub-operation (`list`, `update`, ...); empty for top level commands
    pub operation: String,
    /// Output format hint
    pub format: Option<String>,
    pub order: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    /// Additional raw arguments (`--id=3`, `--logs`, ...)
    pub extra: Vec<String>,
}

impl SourceRequest {
    pub fn new(noun: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            noun: noun.into(),
            operation: operation.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.extra.push(arg.into());
        self
    }

    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra.extend(args.into_iter().map(Into::into));
        self
    }

    /// Command line arguments, without the program name.
    ///
    /// Empty noun/format/order are skipped, as are a zero limit and a zero offset.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if !self.noun.is_empty() {
            args.push(self.noun.clone());
        }
        if !self.operation.is_empty() {
            args.push(self.operation.clone());
        }
        if let Some(format) = self.format.as_deref().filter(|f| !f.is_empty()) {
            args.push(format!("--format={format}"));
        }
        if let Some(order) = self.order.as_deref().filter(|o| !o.is_empty()) {
            args.push(format!("--order={order}"));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            args.push(format!("--limit={limit}"));
        }
        if let Some(offset) = self.offset.filter(|o| *o > 0) {
            args.push(format!("--offset={offset}"));
        }
        args.extend(self.extra.iter().cloned());
        args
    }
}

impl fmt::Display for SourceRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_args().join(" "))
    }
}

/// Data source Trait
///
/// Invokes the external tool and returns its standard output. Implementations
/// map their transport failures onto `CoreError::RemoteExecution`; decoding
/// the output is left to the caller.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Run one request
    ///
    /// # Arguments
    /// * `request` - Structured invocation
    async fn invoke(&self, request: &SourceRequest) -> CoreResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_request_renders_pagination_arguments() {
        let request = SourceRequest {
            noun: "job".to_string(),
            operation: "list".to_string(),
            format: Some("json".to_string()),
            order: Some("D".to_string()),
            limit: Some(10),
            offset: Some(20),
            extra: Vec::new(),
        };
        assert_eq!(
            request.to_args(),
            vec!["job", "list", "--format=json", "--order=D", "--limit=10", "--offset=20"]
        );
    }

    #[test]
    fn zero_offset_and_empty_parts_are_omitted() {
        let mut request = SourceRequest::new("status", "").with_format("json");
        request.offset = Some(0);
        request.order = Some(String::new());
        assert_eq!(request.to_args(), vec!["status", "--format=json"]);
        assert_eq!(request.to_string(), "status --format=json");
    }

    #[test]
    fn empty_noun_leaves_only_switches() {
        let request = SourceRequest::new("", "").with_arg("--help");
        assert_eq!(request.to_args(), vec!["--help"]);
    }

    #[test]
    fn extra_arguments_come_last() {
        let request = SourceRequest::new("prune", "")
            .with_arg("--logs")
            .with_args(["--keep", "1000"]);
        assert_eq!(request.to_args(), vec!["prune", "--logs", "--keep", "1000"]);
    }
}
