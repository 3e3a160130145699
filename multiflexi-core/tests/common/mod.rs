//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::sync::Arc;

use multiflexi_core::source::InMemoryDataSource;
use multiflexi_core::{DataFetcher, EntityRegistry, ListingController};
use serde_json::{json, Value};

/// 生成 `count` 个 job 行（id 递减，模拟 `--order=D`）
pub fn job_rows(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            let id = 1000 - i64::try_from(i).unwrap_or(0);
            json!({
                "id": id,
                "app": 7,
                "command": format!("job-{id}"),
                "exitcode": 0,
                "schedule_type": "daily",
            })
        })
        .collect()
}

/// 基于内存数据源创建 listing 控制器
pub fn listing_over(source: InMemoryDataSource) -> (Arc<InMemoryDataSource>, ListingController) {
    let source = Arc::new(source);
    let fetcher = Arc::new(DataFetcher::new(source.clone()));
    let listing = ListingController::new(fetcher, Arc::new(EntityRegistry::with_defaults()));
    (source, listing)
}
