//! 特征提取模块：文本到固定列序特征向量的转换
pub mod feature_extractor;

pub use self::feature_extractor::{
    FeatureExtractor, FeatureVector, extract_features,
    FEATURE_LEN_CHARS, FEATURE_NUM_TOKENS, PATTERN_FEATURE_PREFIX,
};
