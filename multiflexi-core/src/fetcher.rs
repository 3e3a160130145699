//! Cached, timeout-bounded fetches against a [`DataSource`]

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde_json::Value;
use tokio::time::Instant;

use crate::cache::{CacheStats, FetchCache, RequestSignature};
use crate::error::{CoreError, CoreResult};
use crate::traits::{DataSource, SourceRequest};
use crate::types::Item;

/// Default output format requested from the tool
pub const DEFAULT_FORMAT: &str = "json";
/// Default ordering, newest first
pub const DEFAULT_ORDER: &str = "D";
/// Default page size
pub const DEFAULT_LIMIT: usize = 10;
/// Default per-call deadline
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default cache TTL
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30);

/// Turns the decoded JSON output into records.
pub type Decoder = fn(Value) -> Result<Vec<Item>, String>;

/// Request shape of one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchParams {
    pub noun: String,
    pub operation: String,
    pub format: String,
    pub order: String,
    pub limit: usize,
    pub offset: usize,
}

impl FetchParams {
    /// `<noun> list` with the default format and order.
    pub fn list(noun: impl Into<String>, limit: usize, offset: usize) -> Self {
        Self {
            noun: noun.into(),
            operation: "list".to_string(),
            format: DEFAULT_FORMAT.to_string(),
            order: DEFAULT_ORDER.to_string(),
            limit,
            offset,
        }
    }

    #[must_use]
    pub fn signature(&self) -> RequestSignature {
        RequestSignature::new(
            &self.noun,
            &self.operation,
            &self.format,
            &self.order,
            self.limit,
            self.offset,
        )
    }

    #[must_use]
    pub fn to_request(&self) -> SourceRequest {
        SourceRequest {
            noun: self.noun.clone(),
            operation: self.operation.clone(),
            format: Some(self.format.clone()),
            order: Some(self.order.clone()),
            limit: Some(self.limit),
            offset: Some(self.offset),
            extra: Vec::new(),
        }
    }
}

/// Per-call deadline and cache lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub ttl: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            ttl: DEFAULT_CACHE_TTL,
        }
    }
}

/// Result of a successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub items: Vec<Item>,
    /// Served from the cache without invoking the tool
    pub cached: bool,
    pub elapsed: Duration,
}

/// One member of a batch; `key` correlates it with its result.
#[derive(Debug, Clone)]
pub struct BatchRequest<K> {
    pub key: K,
    pub params: FetchParams,
    pub options: FetchOptions,
    pub decode: Decoder,
}

#[derive(Debug)]
pub struct BatchResult<K> {
    pub key: K,
    pub result: CoreResult<Fetched>,
}

/// Cached fetch front of a data source
pub struct DataFetcher {
    source: Arc<dyn DataSource>,
    cache: FetchCache<Vec<Item>>,
}

impl DataFetcher {
    #[must_use]
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            cache: FetchCache::new(),
        }
    }

    /// Shared handle to the underlying data source
    #[must_use]
    pub fn source(&self) -> Arc<dyn DataSource> {
        Arc::clone(&self.source)
    }

    /// Fetch one page, from the cache while it is live.
    ///
    /// On a miss the source is invoked under `options.timeout`; a decoded
    /// result is cached for `options.ttl` unless the noun was invalidated
    /// (or the cache cleared) while the call was running. Failures are never
    /// cached.
    pub async fn fetch(
        &self,
        params: &FetchParams,
        options: FetchOptions,
        decode: Decoder,
    ) -> CoreResult<Fetched> {
        let started = Instant::now();
        let signature = params.signature();

        if let Some(items) = self.cache.get(&signature).await {
            let elapsed = started.elapsed();
            log::debug!("[fetch] {signature} cache hit ({} items)", items.len());
            return Ok(Fetched {
                items,
                cached: true,
                elapsed,
            });
        }

        let generation = self.cache.generation(&params.noun).await;
        let request = params.to_request();
        let result = self.invoke_and_decode(&request, options.timeout, decode).await;
        let elapsed = started.elapsed();

        match result {
            Ok(items) => {
                log::debug!(
                    "[fetch] {signature} fetched {} items in {}ms",
                    items.len(),
                    elapsed.as_millis()
                );
                let stored = self
                    .cache
                    .insert_if_current(signature.clone(), items.clone(), options.ttl, generation)
                    .await;
                if !stored {
                    log::debug!("[fetch] {signature} invalidated while in flight, not cached");
                }
                Ok(Fetched {
                    items,
                    cached: false,
                    elapsed,
                })
            }
            Err(e) => {
                if e.is_expected() {
                    log::warn!("[fetch] {signature} failed: {e}");
                } else {
                    log::error!("[fetch] {signature} failed: {e}");
                }
                Err(e)
            }
        }
    }

    /// Run independent fetches concurrently.
    ///
    /// Every request yields its own result; one failure does not affect the
    /// others. Results come back in request order.
    pub async fn fetch_batch<K>(&self, requests: Vec<BatchRequest<K>>) -> Vec<BatchResult<K>> {
        log::debug!("[fetch] batch of {} requests", requests.len());
        let futures = requests.into_iter().map(|request| async move {
            let result = self
                .fetch(&request.params, request.options, request.decode)
                .await;
            BatchResult {
                key: request.key,
                result,
            }
        });
        join_all(futures).await
    }

    async fn invoke_and_decode(
        &self,
        request: &SourceRequest,
        timeout: Duration,
        decode: Decoder,
    ) -> CoreResult<Vec<Item>> {
        let output = tokio::time::timeout(timeout, self.source.invoke(request))
            .await
            .map_err(|_| CoreError::timed_out(request.to_string(), timeout))??;

        let value = parse_json(&request.to_string(), &output)?;
        decode(value).map_err(|message| CoreError::Decode {
            command: request.to_string(),
            message,
        })
    }

    pub async fn clear_cache(&self) -> usize {
        let removed = self.cache.clear().await;
        log::debug!("[fetch] cache cleared ({removed} entries)");
        removed
    }

    pub async fn sweep_expired(&self) -> usize {
        let removed = self.cache.sweep_expired().await;
        log::debug!("[fetch] swept {removed} expired entries");
        removed
    }

    /// Drop cached pages of one noun, e.g. after a record changed.
    pub async fn invalidate(&self, noun: &str) -> usize {
        self.cache.invalidate_noun(noun).await
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}

/// Parse tool output as JSON; blank output decodes as `null`.
pub(crate) fn parse_json(command: &str, output: &str) -> CoreResult<Value> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(trimmed).map_err(|e| CoreError::Decode {
        command: command.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteFailure;
    use crate::test_utils::{token_decoder, MockDataSource};

    fn fetcher(source: &Arc<MockDataSource>) -> DataFetcher {
        DataFetcher::new(source.clone())
    }

    #[tokio::test]
    async fn second_identical_fetch_is_served_from_cache() {
        let source = Arc::new(MockDataSource::new());
        source.respond("token", r#"[{"id":1,"user":"a"}]"#).await;
        let fetcher = fetcher(&source);
        let params = FetchParams::list("token", 10, 0);

        let first = fetcher
            .fetch(&params, FetchOptions::default(), token_decoder)
            .await
            .unwrap();
        let second = fetcher
            .fetch(&params, FetchOptions::default(), token_decoder)
            .await
            .unwrap();

        assert!(!first.cached);
        assert!(second.cached);
        assert_eq!(first.items, second.items);
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn different_offsets_are_cached_separately() {
        let source = Arc::new(MockDataSource::new());
        source.respond("token", "[]").await;
        let fetcher = fetcher(&source);

        for offset in [0, 10, 0, 10] {
            fetcher
                .fetch(
                    &FetchParams::list("token", 10, offset),
                    FetchOptions::default(),
                    token_decoder,
                )
                .await
                .unwrap();
        }
        assert_eq!(source.call_count(), 2);
        assert_eq!(fetcher.cache_stats().await.total, 2);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let source = Arc::new(MockDataSource::new());
        source
            .fail(
                "token",
                RemoteFailure::Exited {
                    code: Some(1),
                    stderr: "db".to_string(),
                },
            )
            .await;
        let fetcher = fetcher(&source);
        let params = FetchParams::list("token", 10, 0);

        assert!(fetcher
            .fetch(&params, FetchOptions::default(), token_decoder)
            .await
            .is_err());
        source.respond("token", "[]").await;
        let ok = fetcher
            .fetch(&params, FetchOptions::default(), token_decoder)
            .await
            .unwrap();
        assert!(!ok.cached);
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn malformed_output_is_a_decode_error() {
        let source = Arc::new(MockDataSource::new());
        source.respond("token", "Warning: something\n[").await;
        let err = fetcher(&source)
            .fetch(
                &FetchParams::list("token", 10, 0),
                FetchOptions::default(),
                token_decoder,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Decode { .. }));
    }

    #[tokio::test]
    async fn blank_output_is_an_empty_page() {
        let source = Arc::new(MockDataSource::new());
        source.respond("token", "  \n").await;
        let fetched = fetcher(&source)
            .fetch(
                &FetchParams::list("token", 10, 0),
                FetchOptions::default(),
                token_decoder,
            )
            .await
            .unwrap();
        assert!(fetched.items.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_source_times_out() {
        let source = Arc::new(MockDataSource::new());
        source.respond("token", "[]").await;
        source.delay("token", Duration::from_secs(60)).await;
        let options = FetchOptions {
            timeout: Duration::from_secs(2),
            ..FetchOptions::default()
        };

        let err = fetcher(&source)
            .fetch(&FetchParams::list("token", 10, 0), options, token_decoder)
            .await
            .unwrap_err();
        assert!(err.is_timeout());
        assert!(err.to_string().contains("token list"));
    }

    #[tokio::test]
    async fn batch_reports_each_result_under_its_key() {
        let source = Arc::new(MockDataSource::new());
        source.respond("token", "[]").await;
        source.respond("user", "[]").await;
        source
            .fail("queue", RemoteFailure::Unavailable("gone".to_string()))
            .await;
        let fetcher = fetcher(&source);

        let requests = ["token", "queue", "user"]
            .into_iter()
            .map(|noun| BatchRequest {
                key: noun,
                params: FetchParams::list(noun, 10, 0),
                options: FetchOptions::default(),
                decode: token_decoder,
            })
            .collect();
        let results = fetcher.fetch_batch(requests).await;

        let keys: Vec<_> = results.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec!["token", "queue", "user"]);
        assert!(results[0].result.is_ok());
        assert!(results[1].result.is_err());
        assert!(results[2].result.is_ok());
    }

    #[tokio::test]
    async fn invalidate_drops_only_one_noun() {
        let source = Arc::new(MockDataSource::new());
        source.respond("token", "[]").await;
        source.respond("user", "[]").await;
        let fetcher = fetcher(&source);
        for noun in ["token", "user"] {
            fetcher
                .fetch(
                    &FetchParams::list(noun, 10, 0),
                    FetchOptions::default(),
                    token_decoder,
                )
                .await
                .unwrap();
        }

        assert_eq!(fetcher.invalidate("token").await, 1);
        assert_eq!(fetcher.cache_stats().await.total, 1);
        assert_eq!(fetcher.clear_cache().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn invalidation_during_fetch_is_not_undone() {
        let source = Arc::new(MockDataSource::new());
        source.respond("token", r#"[{"id":1,"user":"a"}]"#).await;
        source.delay("token", Duration::from_secs(2)).await;
        let fetcher = Arc::new(fetcher(&source));
        let params = FetchParams::list("token", 10, 0);

        let in_flight = tokio::spawn({
            let fetcher = Arc::clone(&fetcher);
            let params = params.clone();
            async move {
                fetcher
                    .fetch(&params, FetchOptions::default(), token_decoder)
                    .await
            }
        });

        tokio::time::sleep(Duration::from_secs(1)).await;
        fetcher.invalidate("token").await;
        let first = in_flight.await.unwrap().unwrap();
        assert!(!first.cached);
        assert_eq!(fetcher.cache_stats().await.total, 0);

        let next = fetcher
            .fetch(&params, FetchOptions::default(), token_decoder)
            .await
            .unwrap();
        assert!(!next.cached);
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_during_fetch_is_not_undone() {
        let source = Arc::new(MockDataSource::new());
        source.respond("token", "[]").await;
        source.delay("token", Duration::from_secs(2)).await;
        let fetcher = Arc::new(fetcher(&source));

        let in_flight = tokio::spawn({
            let fetcher = Arc::clone(&fetcher);
            async move {
                fetcher
                    .fetch(
                        &FetchParams::list("token", 10, 0),
                        FetchOptions::default(),
                        token_decoder,
                    )
                    .await
            }
        });

        tokio::time::sleep(Duration::from_secs(1)).await;
        fetcher.clear_cache().await;
        assert!(in_flight.await.unwrap().is_ok());
        assert_eq!(fetcher.cache_stats().await.total, 0);
    }
}
