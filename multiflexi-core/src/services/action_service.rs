//! 管理操作服务
//!
//! 删除、更新、清理、加密初始化与队列清空统一为 [`Action`]，
//! 每个操作对应一次外部工具调用，失败统一包装为 `CoreError::Action`。

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};
use crate::registry::EntityRegistry;
use crate::traits::{DataSource, SourceRequest};
use crate::types::{EntityKind, Item};

/// 默认保留条数
pub const DEFAULT_PRUNE_KEEP: u32 = 1000;

/// 管理操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Delete { kind: EntityKind, id: i64 },
    Update(Item),
    Prune { logs: bool, jobs: bool, keep: u32 },
    InitEncryption,
    TruncateQueue,
}

impl Action {
    /// 受影响的实体类型（用于缓存失效）
    #[must_use]
    pub fn affected_kind(&self) -> Option<EntityKind> {
        match self {
            Self::Delete { kind, .. } => Some(*kind),
            Self::Update(item) => Some(item.kind()),
            Self::TruncateQueue => Some(EntityKind::Queue),
            Self::Prune { .. } | Self::InitEncryption => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delete { kind, id } => write!(f, "Delete {kind} #{id}"),
            Self::Update(item) => write!(f, "Update {}", item.label()),
            Self::Prune { .. } => f.write_str("Prune"),
            Self::InitEncryption => f.write_str("Encryption init"),
            Self::TruncateQueue => f.write_str("Queue truncate"),
        }
    }
}

/// 管理操作服务
pub struct ActionService {
    source: Arc<dyn DataSource>,
    registry: Arc<EntityRegistry>,
    timeout: Duration,
}

impl ActionService {
    /// 创建操作服务实例
    #[must_use]
    pub fn new(
        source: Arc<dyn DataSource>,
        registry: Arc<EntityRegistry>,
        timeout: Duration,
    ) -> Self {
        Self {
            source,
            registry,
            timeout,
        }
    }

    /// 执行操作，返回工具输出（已去除首尾空白）
    pub async fn run(&self, action: &Action) -> CoreResult<String> {
        let label = action.to_string();
        let result = match self.request_for(action) {
            Ok(request) => self.invoke(&request).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(output) => {
                log::info!("[action] {label} succeeded");
                Ok(output.trim().to_string())
            }
            Err(e) => {
                let e = e.into_action(label);
                if e.is_expected() {
                    log::warn!("[action] {e}");
                } else {
                    log::error!("[action] {e}");
                }
                Err(e)
            }
        }
    }

    /// 构造操作对应的请求；不支持的实体类型不会调用外部工具
    fn request_for(&self, action: &Action) -> CoreResult<SourceRequest> {
        match action {
            Action::Delete { kind, id } => {
                let spec = self.registry.get(*kind)?;
                if !spec.deletable {
                    return Err(CoreError::UnsupportedItemKind {
                        operation: "Delete".to_string(),
                        kind: kind.to_string(),
                    });
                }
                Ok(SourceRequest::new(kind.noun(), "remove").with_arg(format!("--id={id}")))
            }
            Action::Update(item) => {
                let spec = self.registry.get(item.kind())?;
                if !spec.editable {
                    return Err(CoreError::UnsupportedItemKind {
                        operation: "Update".to_string(),
                        kind: item.kind().to_string(),
                    });
                }
                Ok(SourceRequest::new(item.kind().noun(), "update").with_args(item.update_params()?))
            }
            Action::Prune { logs, jobs, keep } => {
                let mut request = SourceRequest::new("prune", "");
                if *logs {
                    request = request.with_arg("--logs");
                }
                if *jobs {
                    request = request.with_arg("--jobs");
                }
                Ok(request.with_args(["--keep".to_string(), keep.to_string()]))
            }
            Action::InitEncryption => Ok(SourceRequest::new("encryption", "init")),
            Action::TruncateQueue => Ok(SourceRequest::new("queue", "truncate")),
        }
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
    use crate::types::{Company, QueueEntry};

    fn service(source: &Arc<MockDataSource>) -> ActionService {
        ActionService::new(
            source.clone(),
            Arc::new(EntityRegistry::with_defaults()),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn delete_issues_remove_with_id() {
        let source = Arc::new(MockDataSource::new());
        source.respond("company", "Company 4 removed\n").await;
        let output = service(&source)
            .run(&Action::Delete {
                kind: EntityKind::Company,
                id: 4,
            })
            .await
            .unwrap();
        assert_eq!(output, "Company 4 removed");
        assert_eq!(
            source.requests().await[0].to_args(),
            vec!["company", "remove", "--id=4"]
        );
    }

    #[tokio::test]
    async fn delete_of_read_only_kind_never_invokes_tool() {
        let source = Arc::new(MockDataSource::new());
        let err = service(&source)
            .run(&Action::Delete {
                kind: EntityKind::Queue,
                id: 1,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedItemKind { .. }));
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn update_of_read_only_kind_is_unsupported() {
        let source = Arc::new(MockDataSource::new());
        let item = Item::Queue(QueueEntry::default());
        let err = service(&source).run(&Action::Update(item)).await.unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedItemKind { .. }));
    }

    #[tokio::test]
    async fn update_passes_editable_fields() {
        let source = Arc::new(MockDataSource::new());
        source.respond("company", "").await;
        let item = Item::Company(Company {
            id: 2,
            name: "Beta".to_string(),
            ..Company::default()
        });
        service(&source).run(&Action::Update(item)).await.unwrap();
        let args = source.requests().await[0].to_args();
        assert_eq!(&args[..3], &["company", "update", "--id=2"]);
        assert!(args.contains(&"--name=Beta".to_string()));
    }

    #[tokio::test]
    async fn prune_arguments() {
        let source = Arc::new(MockDataSource::new());
        source.respond("prune", "").await;
        service(&source)
            .run(&Action::Prune {
                logs: true,
                jobs: false,
                keep: 250,
            })
            .await
            .unwrap();
        assert_eq!(
            source.requests().await[0].to_args(),
            vec!["prune", "--logs", "--keep", "250"]
        );
    }

    #[tokio::test]
    async fn failures_are_wrapped_as_action_errors() {
        let source = Arc::new(MockDataSource::new());
        source
            .fail(
                "queue",
                RemoteFailure::Exited {
                    code: Some(1),
                    stderr: "locked".to_string(),
                },
            )
            .await;
        let err = service(&source).run(&Action::TruncateQueue).await.unwrap_err();
        match err {
            CoreError::Action { action, source } => {
                assert_eq!(action, "Queue truncate");
                assert!(source.to_string().contains("locked"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_action_times_out() {
        let source = Arc::new(MockDataSource::new());
        source.respond("encryption", "").await;
        source.delay("encryption", Duration::from_secs(30)).await;
        let err = service(&source)
            .run(&Action::InitEncryption)
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }

    #[test]
    fn affected_kinds() {
        assert_eq!(Action::TruncateQueue.affected_kind(), Some(EntityKind::Queue));
        assert_eq!(Action::InitEncryption.affected_kind(), None);
    }
}
