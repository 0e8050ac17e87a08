//! rspamlex - 基于模式词库与统计分类器的垃圾文本检测引擎

// 导出全局错误类型
pub use self::error::{RspamlexError, RslResult};

// 导出配置模块
pub use self::config::{GlobalConfig, ConfigManager, CustomConfigBuilder};

// 导出词库模块核心接口
pub use self::lexicon::{DEFAULT_PATTERN_TEXTS, LexiconStore};

// 导出编译模块核心接口
pub use self::compiler::{Pattern, PatternSet, PatternCompiler, compile_patterns};

// 导出特征提取模块核心接口
pub use self::extractor::{
    FeatureExtractor, FeatureVector, extract_features,
    FEATURE_LEN_CHARS, FEATURE_NUM_TOKENS, PATTERN_FEATURE_PREFIX,
};

// 导出工件模块核心接口
pub use self::artifact::{
    ArtifactBundle, ArtifactLoader, ArtifactStore, ClassifierModel,
    ForestModel, LabelClassifier, LinearModel, RecognizerSpec,
    TreeModel, TreeNode, load_artifact,
};

// 导出检测模块核心接口（含兼容原有调用的简化接口）
pub use self::detector::{
    SpamDetector, DetectionResult,
    init_spam_detector, init_spam_detector_with_config,
    detect, detect_spam, match_spam_rules,
};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod lexicon;
pub mod compiler;
pub mod extractor;
pub mod artifact;
pub mod detector;
