//! 测试辅助模块
//!
//! 提供 mock 数据源和便捷的测试工厂方法。

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult, RemoteFailure};
use crate::fetcher::DataFetcher;
use crate::traits::{DataSource, SourceRequest};
use crate::types::{decode_rows, Item, Token};

// ===== MockDataSource =====

/// 按 noun 返回预设输出的数据源
pub struct MockDataSource {
    responses: RwLock<HashMap<String, CoreResult<String>>>,
    delays: RwLock<HashMap<String, Duration>>,
    calls: AtomicUsize,
    requests: RwLock<Vec<SourceRequest>>,
}

impl MockDataSource {
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            delays: RwLock::new(HashMap::new()),
            calls: AtomicUsize::new(0),
            requests: RwLock::new(Vec::new()),
        }
    }

    /// 设置 noun 的成功输出
    pub async fn respond(&self, noun: &str, output: &str) {
        self.responses
            .write()
            .await
            .insert(noun.to_string(), Ok(output.to_string()));
    }

    /// 设置 noun 的失败结果
    pub async fn fail(&self, noun: &str, failure: RemoteFailure) {
        self.responses.write().await.insert(
            noun.to_string(),
            Err(CoreError::RemoteExecution {
                command: noun.to_string(),
                failure,
            }),
        );
    }

    /// 设置 noun 的响应延迟（配合 `start_paused` 使用）
    pub async fn delay(&self, noun: &str, delay: Duration) {
        self.delays.write().await.insert(noun.to_string(), delay);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn requests(&self) -> Vec<SourceRequest> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    async fn invoke(&self, request: &SourceRequest) -> CoreResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.write().await.push(request.clone());

        let delay = self.delays.read().await.get(&request.noun).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match self.responses.read().await.get(&request.noun) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(CoreError::RemoteExecution { failure, .. })) => {
                Err(CoreError::RemoteExecution {
                    command: request.to_string(),
                    failure: failure.clone(),
                })
            }
            Some(Err(e)) => Err(CoreError::Config(e.to_string())),
            None => Err(CoreError::RemoteExecution {
                command: request.to_string(),
                failure: RemoteFailure::Exited {
                    code: Some(1),
                    stderr: "no scripted response".to_string(),
                },
            }),
        }
    }
}

// ===== 工厂方法 =====

/// 把任意行解码为 token 记录
pub fn token_decoder(value: Value) -> Result<Vec<Item>, String> {
    decode_rows::<Token>(value).map(|rows| rows.into_iter().map(Item::Token).collect())
}

/// 生成 `count` 条 JSON 行，id 从 `first_id` 开始
pub fn rows(first_id: i64, count: usize) -> String {
    let rows: Vec<Value> = (0..count)
        .map(|i| {
            let id = first_id + i64::try_from(i).unwrap_or(0);
            json!({"id": id, "name": format!("row {id}")})
        })
        .collect();
    Value::Array(rows).to_string()
}

/// 创建 mock 数据源 + fetcher
pub fn create_fetcher() -> (Arc<MockDataSource>, Arc<DataFetcher>) {
    let source = Arc::new(MockDataSource::new());
    let fetcher = Arc::new(DataFetcher::new(source.clone()));
    (source, fetcher)
}
