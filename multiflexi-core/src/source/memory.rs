//! In-memory data source

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult, RemoteFailure};
use crate::traits::{DataSource, SourceRequest};

/// Serves listings and canned documents from memory.
///
/// Understands `<noun> list` with limit/offset, `<noun> remove --id=N` and
/// `<noun> update --id=N --key=value..`; every other request is answered from
/// the documents registered with [`InMemoryDataSource::with_document`], keyed
/// by the rendered command line. Used by integration tests and for offline
/// runs of the dashboard.
#[derive(Default)]
pub struct InMemoryDataSource {
    rows: RwLock<HashMap<String, Vec<Value>>>,
    documents: RwLock<HashMap<String, String>>,
    failures: RwLock<HashMap<String, RemoteFailure>>,
    delays: RwLock<HashMap<String, Duration>>,
    calls: AtomicUsize,
    history: RwLock<Vec<SourceRequest>>,
}

impl InMemoryDataSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows listed for `noun`, in the order they are served
    #[must_use]
    pub fn with_rows(mut self, noun: &str, rows: Vec<Value>) -> Self {
        self.rows.get_mut().insert(noun.to_string(), rows);
        self
    }

    /// Raw output for a full command line such as `status --format=json`
    #[must_use]
    pub fn with_document(mut self, command_line: &str, output: impl Into<String>) -> Self {
        self.documents
            .get_mut()
            .insert(command_line.to_string(), output.into());
        self
    }

    /// Every request for `noun` fails with `failure`
    #[must_use]
    pub fn with_failure(mut self, noun: &str, failure: RemoteFailure) -> Self {
        self.failures.get_mut().insert(noun.to_string(), failure);
        self
    }

    /// Every request for `noun` sleeps before answering
    #[must_use]
    pub fn with_delay(mut self, noun: &str, delay: Duration) -> Self {
        self.delays.get_mut().insert(noun.to_string(), delay);
        self
    }

    pub async fn set_failure(&self, noun: &str, failure: Option<RemoteFailure>) {
        let mut failures = self.failures.write().await;
        match failure {
            Some(failure) => failures.insert(noun.to_string(), failure),
            None => failures.remove(noun),
        };
    }

    pub async fn push_row(&self, noun: &str, row: Value) {
        self.rows
            .write()
            .await
            .entry(noun.to_string())
            .or_default()
            .push(row);
    }

    /// Number of invocations so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// All requests received, oldest first
    pub async fn history(&self) -> Vec<SourceRequest> {
        self.history.read().await.clone()
    }

    async fn list(&self, request: &SourceRequest) -> String {
        let rows = self.rows.read().await;
        let all = rows.get(&request.noun).map(Vec::as_slice).unwrap_or_default();
        let offset = request.offset.unwrap_or(0).min(all.len());
        let end = match request.limit {
            Some(limit) if limit > 0 => (offset + limit).min(all.len()),
            _ => all.len(),
        };
        Value::Array(all[offset..end].to_vec()).to_string()
    }

    async fn remove(&self, request: &SourceRequest) -> CoreResult<String> {
        let id = required_id(request)?;
        let mut rows = self.rows.write().await;
        let list = rows.entry(request.noun.clone()).or_default();
        let before = list.len();
        list.retain(|row| row_id(row) != Some(id));
        if list.len() == before {
            return Err(not_found(request, id));
        }
        Ok(format!("{} {id} removed", request.noun))
    }

    async fn update(&self, request: &SourceRequest) -> CoreResult<String> {
        let id = required_id(request)?;
        let mut rows = self.rows.write().await;
        let row = rows
            .get_mut(&request.noun)
            .and_then(|list| list.iter_mut().find(|row| row_id(row) == Some(id)))
            .ok_or_else(|| not_found(request, id))?;

        if let Value::Object(map) = row {
            for (key, value) in request.extra.iter().filter_map(|arg| parse_option(arg)) {
                if key != "id" {
                    map.insert(key.to_string(), Value::String(value.to_string()));
                }
            }
        }
        Ok(format!("{} {id} updated", request.noun))
    }
}

#[async_trait]
impl DataSource for InMemoryDataSource {
    async fn invoke(&self, request: &SourceRequest) -> CoreResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.history.write().await.push(request.clone());

        let delay = self.delays.read().await.get(&request.noun).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(failure) = self.failures.read().await.get(&request.noun).cloned() {
            return Err(CoreError::RemoteExecution {
                command: request.to_string(),
                failure,
            });
        }

        match request.operation.as_str() {
            "list" => Ok(self.list(request).await),
            "remove" => self.remove(request).await,
            "update" => self.update(request).await,
            _ => self
                .documents
                .read()
                .await
                .get(&request.to_string())
                .cloned()
                .ok_or_else(|| CoreError::RemoteExecution {
                    command: request.to_string(),
                    failure: RemoteFailure::Exited {
                        code: Some(1),
                        stderr: format!("Command \"{}\" is not defined.", request.noun),
                    },
                }),
        }
    }
}

fn parse_option(arg: &str) -> Option<(&str, &str)> {
    arg.strip_prefix("--")?.split_once('=')
}

fn row_id(row: &Value) -> Option<i64> {
    match row.get("id")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn required_id(request: &SourceRequest) -> CoreResult<i64> {
    request
        .extra
        .iter()
        .filter_map(|arg| parse_option(arg))
        .find(|(key, _)| *key == "id")
        .and_then(|(_, value)| value.parse().ok())
        .ok_or_else(|| CoreError::RemoteExecution {
            command: request.to_string(),
            failure: RemoteFailure::Exited {
                code: Some(1),
                stderr: "Missing --id".to_string(),
            },
        })
}

fn not_found(request: &SourceRequest, id: i64) -> CoreError {
    CoreError::RemoteExecution {
        command: request.to_string(),
        failure: RemoteFailure::Exited {
            code: Some(1),
            stderr: format!("{} {id} not found", request.noun),
        },
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn tokens(n: i64) -> Vec<Value> {
        (1..=n).map(|id| json!({"id": id, "user": format!("u{id}")})).collect()
    }

    fn list(limit: usize, offset: usize) -> SourceRequest {
        SourceRequest {
            limit: Some(limit),
            offset: Some(offset),
            ..SourceRequest::new("token", "list")
        }
    }

    #[tokio::test]
    async fn list_slices_pages() {
        let source = InMemoryDataSource::new().with_rows("token", tokens(12));

        let page: Vec<Value> =
            serde_json::from_str(&source.invoke(&list(10, 10)).await.unwrap()).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0]["id"], 11);

        let past_end: Vec<Value> =
            serde_json::from_str(&source.invoke(&list(10, 40)).await.unwrap()).unwrap();
        assert!(past_end.is_empty());
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn update_and_remove_modify_rows() {
        let source = InMemoryDataSource::new().with_rows("token", tokens(2));

        let update = SourceRequest::new("token", "update").with_args(["--id=2", "--user=root"]);
        source.invoke(&update).await.unwrap();
        let remove = SourceRequest::new("token", "remove").with_arg("--id=1");
        source.invoke(&remove).await.unwrap();

        let rows: Vec<Value> =
            serde_json::from_str(&source.invoke(&list(10, 0)).await.unwrap()).unwrap();
        assert_eq!(rows, vec![json!({"id": 2, "user": "root"})]);

        let err = source.invoke(&remove).await.unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn documents_and_failures() {
        let source = InMemoryDataSource::new()
            .with_document("status --format=json", "{}")
            .with_failure(
                "queue",
                RemoteFailure::Exited {
                    code: Some(255),
                    stderr: "db down".to_string(),
                },
            );

        let status = SourceRequest::new("status", "").with_format("json");
        assert_eq!(source.invoke(&status).await.unwrap(), "{}");
        assert!(source
            .invoke(&SourceRequest::new("queue", "truncate"))
            .await
            .is_err());
        assert!(source
            .invoke(&SourceRequest::new("describe", ""))
            .await
            .is_err());

        source.set_failure("queue", None).await;
        assert!(source
            .invoke(&SourceRequest::new("queue", "list"))
            .await
            .is_ok());
        assert_eq!(source.history().await.len(), 4);
    }
}
