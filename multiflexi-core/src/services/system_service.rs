//! 系统状态与命令目录服务

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{CoreError, CoreResult};
use crate::fetcher::parse_json;
use crate::traits::{DataSource, SourceRequest};
use crate::types::{CommandInfo, StatusInfo};

/// `describe` 输出中的单个命令
#[derive(Deserialize)]
struct DescribedCommand {
    #[serde(default)]
    description: String,
}

/// 系统服务
pub struct SystemService {
    source: Arc<dyn DataSource>,
    timeout: Duration,
}

impl SystemService {
    /// 创建系统服务实例
    #[must_use]
    pub fn new(source: Arc<dyn DataSource>, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    /// 获取系统状态快照
    pub async fn status(&self) -> CoreResult<StatusInfo> {
        let request = SourceRequest::new("status", "").with_format("json");
        let command = request.to_string();
        let output = self.invoke(&request).await?;
        let value = parse_json(&command, &output)?;
        StatusInfo::from_value(value).map_err(|e| CoreError::Decode {
            command,
            message: e.to_string(),
        })
    }

    /// 获取状态快照，失败时返回占位快照
    pub async fn status_or_placeholder(&self) -> StatusInfo {
        match self.status().await {
            Ok(status) => status,
            Err(e) => {
                log::warn!("[system] status unavailable: {e}");
                StatusInfo::placeholder(&e.to_string())
            }
        }
    }

    /// 列出外部命令（按名称排序，跳过以 `_` 开头的内部命令）
    pub async fn commands(&self) -> CoreResult<Vec<CommandInfo>> {
        let request = SourceRequest::new("describe", "");
        let command = request.to_string();
        let output = self.invoke(&request).await?;

        let described: BTreeMap<String, DescribedCommand> =
            serde_json::from_value(parse_json(&command, &output)?).map_err(|e| {
                CoreError::Decode {
                    command,
                    message: e.to_string(),
                }
            })?;

        Ok(described
            .into_iter()
            .filter(|(name, _)| !name.starts_with('_'))
            .map(|(name, info)| CommandInfo {
                name,
                description: info.description,
            })
            .collect())
    }

    /// 获取 `<command> --help` 文本，`command` 为空时获取工具本身的帮助
    pub async fn help(&self, command: &str) -> CoreResult<String> {
        let request = SourceRequest::new(command.trim(), "").with_arg("--help");
        let output = self.invoke(&request).await?;
        Ok(output.trim().to_string())
    }

    async fn invoke(&self, request: &SourceRequest) -> CoreResult<String> {
        tokio::time::timeout(self.timeout, self.source.invoke(request))
            .await
            .map_err(|_| CoreError::timed_out(request.to_string(), self.timeout))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteFailure;
    use crate::test_utils::MockDataSource;

    fn service(source: &Arc<MockDataSource>) -> SystemService {
        SystemService::new(source.clone(), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn status_decodes_snapshot() {
        let source = Arc::new(MockDataSource::new());
        source
            .respond("status", r#"{"version-cli":"2.1.0","companies":3}"#)
            .await;
        let status = service(&source).status().await.unwrap();
        assert_eq!(status.version, "2.1.0");
        assert_eq!(status.companies, 3);
        assert_eq!(
            source.requests().await[0].to_args(),
            vec!["status", "--format=json"]
        );
    }

    #[tokio::test]
    async fn status_failure_yields_placeholder() {
        let source = Arc::new(MockDataSource::new());
        source
            .fail("status", RemoteFailure::Unavailable("not installed".to_string()))
            .await;
        let status = service(&source).status_or_placeholder().await;
        assert!(status.is_placeholder());
        assert!(!status.user.is_empty());
    }

    #[tokio::test]
    async fn commands_are_sorted_without_internal_ones() {
        let source = Arc::new(MockDataSource::new());
        source
            .respond(
                "describe",
                r#"{"prune":{"description":"Prune"},"_complete":{"description":"x"},"app":{"description":"Apps","options":{}}}"#,
            )
            .await;
        let commands = service(&source).commands().await.unwrap();
        let names: Vec<_> = commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["app", "prune"]);
        assert_eq!(commands[0].description, "Apps");
    }

    #[tokio::test]
    async fn commands_reject_non_object_output() {
        let source = Arc::new(MockDataSource::new());
        source.respond("describe", "[1,2]").await;
        let err = service(&source).commands().await.unwrap_err();
        assert!(matches!(err, CoreError::Decode { .. }));
    }

    #[tokio::test]
    async fn help_is_trimmed() {
        let source = Arc::new(MockDataSource::new());
        source.respond("job", "\nUsage: job <op>\n\n").await;
        let help = service(&source).help("job").await.unwrap();
        assert_eq!(help, "Usage: job <op>");
        assert_eq!(source.requests().await[0].to_args(), vec!["job", "--help"]);
    }
}
