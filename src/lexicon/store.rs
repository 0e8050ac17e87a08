//! 模式词库持久化
//! 仅处理词库文本的本地序列化（JSON数组，顺序敏感）和反序列化

use std::path::Path;
use tracing::debug;

use super::defaults::DEFAULT_PATTERN_TEXTS;
use crate::error::RslResult;

/// 词库存取管理器
pub struct LexiconStore;

impl LexiconStore {
    /// 从本地JSON文件加载词库文本
    /// 文件不存在时回退到内置默认词库（显式回退策略，不是错误）；
    /// 文件内容损坏时错误向上传播，损坏的词库不可安全降级
    pub async fn load(path: impl AsRef<Path>) -> RslResult<Vec<String>> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("词库文件不存在，回退到内置默认词库：{}", path.display());
            return Ok(Self::default_texts());
        }

        let data = tokio::fs::read(path).await?;
        let texts: Vec<String> = serde_json::from_slice(&data)?;

        debug!("词库文件加载成功，模式数：{}", texts.len());
        Ok(texts)
    }

    /// 将词库文本保存为本地JSON数组（保持顺序）
    pub async fn save(path: impl AsRef<Path>, texts: &[String]) -> RslResult<()> {
        let data = serde_json::to_vec_pretty(texts)?;
        tokio::fs::write(path.as_ref(), data).await?;
        Ok(())
    }

    /// 获取内置默认词库文本
    pub fn default_texts() -> Vec<String> {
        DEFAULT_PATTERN_TEXTS.iter().map(|s| s.to_string()).collect()
    }
}
