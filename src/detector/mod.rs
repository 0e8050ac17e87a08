//! 检测模块：垃圾文本检测核心逻辑
pub mod global;
pub mod detector;

// 导出核心接口
pub use self::global::{init_spam_detector, init_spam_detector_with_config};
pub use self::detector::{
    SpamDetector, DetectionResult,
    detect, detect_spam, match_spam_rules,
};
