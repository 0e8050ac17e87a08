//! 全局检测器单例管理
use once_cell::sync::Lazy;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::detector::SpamDetector;
use crate::error::{RslResult, RspamlexError};
use crate::config::{ConfigManager, GlobalConfig};

/// 全局检测器实例
static GLOBAL_DETECTOR: Lazy<Arc<OnceCell<SpamDetector>>> = Lazy::new(|| {
    Arc::new(OnceCell::new())
});

/// 初始化全局检测器（默认配置）
pub async fn init_spam_detector() -> RslResult<()> {
    init_spam_detector_with_config(ConfigManager::get_default()).await
}

/// 带自定义配置初始化全局检测器
pub async fn init_spam_detector_with_config(config: GlobalConfig) -> RslResult<()> {
    if GLOBAL_DETECTOR.get().is_some() {
        return Ok(());
    }

    let detector = SpamDetector::new(config).await?;
    GLOBAL_DETECTOR.set(detector).map_err(|_| {
        RspamlexError::DetectorNotInitialized
    })?;

    Ok(())
}

/// 获取全局检测器
pub(crate) fn get_global_detector() -> RslResult<&'static SpamDetector> {
    GLOBAL_DETECTOR.get()
        .ok_or(RspamlexError::DetectorNotInitialized)
}
