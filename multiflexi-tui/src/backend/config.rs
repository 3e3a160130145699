//! 配置与日志路径

use std::path::PathBuf;

use multiflexi_core::{AppConfig, CoreResult};

/// 应用目录名
const APP_DIR: &str = "multiflexi-tui";

/// 获取配置目录路径
fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// 获取配置文件路径
pub fn get_config_file() -> PathBuf {
    get_config_dir().join("config.json")
}

/// 获取日志目录路径
pub fn get_log_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("logs")
}

/// 加载配置：文件缺失时使用默认值，再应用环境变量覆盖
pub fn load_config() -> CoreResult<AppConfig> {
    let config = AppConfig::load(&get_config_file())?.with_env(|key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_live_under_app_dir() {
        assert!(get_config_file().ends_with("multiflexi-tui/config.json"));
        assert!(get_log_dir().ends_with("multiflexi-tui/logs"));
    }
}
