//! 全局错误类型定义

use thiserror::Error;
use regex::Error as RegexError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;
use std::path::PathBuf;

#[derive(Error, Debug)]
pub enum RspamlexError {
    // 模式相关错误
    #[error("模式编译失败：{pattern}，错误：{source}")]
    PatternCompileError { pattern: String, source: RegexError },

    // 工件相关错误
    #[error("模型工件不存在：{}", .0.display())]
    ArtifactNotFound(PathBuf),
    #[error("MessagePack序列化/反序列化失败：{0}")]
    MsgPackError(String),

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),

    // 检测相关错误
    #[error("检测器未初始化")]
    DetectorNotInitialized,

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
    #[error("无效输入：{0}")]
    InvalidInput(String),
}

// 全局Result类型
pub type RslResult<T> = Result<T, RspamlexError>;
