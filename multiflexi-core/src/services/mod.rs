//! 业务逻辑服务层

mod action_service;
mod system_service;

pub use action_service::{Action, ActionService, DEFAULT_PRUNE_KEEP};
pub use system_service::SystemService;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::fetcher::DataFetcher;
use crate::listing::ListingController;
use crate::registry::EntityRegistry;
use crate::traits::DataSource;

/// 服务上下文 - 持有所有依赖
///
/// 平台层创建数据源后，由此上下文组装 fetcher、listing 与各服务。
pub struct ServiceContext {
    /// 分页加载控制器
    pub listing: ListingController,
    /// 系统状态服务
    pub system: Arc<SystemService>,
    /// 管理操作服务
    pub actions: Arc<ActionService>,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(source: Arc<dyn DataSource>, registry: EntityRegistry, config: &AppConfig) -> Self {
        let registry = Arc::new(registry);
        let timeout = config.default_timeout();
        let fetcher = Arc::new(DataFetcher::new(Arc::clone(&source)));
        Self {
            listing: ListingController::new(fetcher, Arc::clone(&registry))
                .with_query(config.format.clone(), config.order.clone()),
            system: Arc::new(SystemService::new(Arc::clone(&source), timeout)),
            actions: Arc::new(ActionService::new(source, registry, timeout)),
        }
    }

    /// 从配置组装：应用实体覆盖后创建上下文
    pub fn from_config(
        source: Arc<dyn DataSource>,
        config: &AppConfig,
    ) -> crate::error::CoreResult<Self> {
        let mut registry = EntityRegistry::with_defaults();
        config.apply_to(&mut registry)?;
        Ok(Self::new(source, registry, config))
    }
}
