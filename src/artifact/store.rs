//! 工件持久化
//! 仅处理工件束的本地序列化（MessagePack，保留字段名以支持结构化探测）

use std::path::Path;
use tracing::debug;

use super::loader::ArtifactBundle;
use crate::error::{RslResult, RspamlexError};

/// 工件存取管理器
pub struct ArtifactStore;

impl ArtifactStore {
    /// 将工件束写入本地
    /// 使用命名字段编码：加载侧按字段名探测束外形，位置编码无法探测
    pub async fn save(path: impl AsRef<Path>, bundle: &ArtifactBundle) -> RslResult<()> {
        let data = rmp_serde::to_vec_named(bundle)
            .map_err(|e| RspamlexError::MsgPackError(format!("序列化失败：{e}")))?;

        debug!("工件序列化成功，序列化后数据大小：{} 字节", data.len());

        tokio::fs::write(path.as_ref(), data).await?;
        Ok(())
    }

    /// 清除本地工件
    pub async fn clear(path: impl AsRef<Path>) -> RslResult<()> {
        let path = path.as_ref();
        if path.exists() {
            tokio::fs::remove_file(path).await?;
        }
        Ok(())
    }
}
