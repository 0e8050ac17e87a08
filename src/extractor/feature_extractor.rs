//! 特征提取器
//! 将单条文本与模式集转换为固定列序的特征向量

use serde::Serialize;

use crate::compiler::PatternSet;

/// 模式特征名前缀
pub const PATTERN_FEATURE_PREFIX: &str = "pattern:";
/// 派生标量特征名：归一化文本字符数
pub const FEATURE_LEN_CHARS: &str = "len_chars";
/// 派生标量特征名：空白切分词数
pub const FEATURE_NUM_TOKENS: &str = "num_tokens";

/// 特征向量：按固定顺序排列的(特征名, 数值)对
/// 同一模式集下所有向量的键序完全一致，分类器按此列序拟合；
/// 键序不一致的向量会让分类器给错误的列打分且不报任何错
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    entries: Vec<(String, f64)>,
}

impl FeatureVector {
    /// 特征数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 向量是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按顺序返回特征名
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// 按顺序返回特征值
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, value)| *value).collect()
    }

    /// 按名称查找特征值
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| *value)
    }

    /// 以切片形式访问全部条目
    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }
}

/// 特征提取器
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// 提取单条文本的特征向量
    /// 归一化仅做小写化（停用词剔除、URL改写属于上游预处理，不在此处），
    /// 与检测侧的命中判定共用同一匹配规则
    pub fn extract(text: &str, patterns: &PatternSet) -> FeatureVector {
        // 1. 归一化：仅小写化
        let lowered = text.to_lowercase();
        let mut entries = Vec::with_capacity(patterns.len() + 2);

        // 2. 按模式集顺序逐条求值（独立识别器组，不合并自动机）
        for pattern in patterns.iter() {
            let hit = if pattern.is_match(&lowered) { 1.0 } else { 0.0 };
            entries.push((format!("{}{}", PATTERN_FEATURE_PREFIX, pattern.text), hit));
        }

        // 3. 追加派生标量特征（固定顺序：字符数、词数）
        entries.push((FEATURE_LEN_CHARS.to_string(), lowered.chars().count() as f64));
        entries.push((
            FEATURE_NUM_TOKENS.to_string(),
            lowered.split_whitespace().count() as f64,
        ));

        FeatureVector { entries }
    }

    /// 批量提取特征向量
    /// 逐条套用单文本流程，无跨文本状态，调用方可自行并行切分
    pub fn extract_many(texts: &[String], patterns: &PatternSet) -> Vec<FeatureVector> {
        texts.iter().map(|t| Self::extract(t, patterns)).collect()
    }
}

/// 便捷接口：批量提取特征
pub fn extract_features(texts: &[String], patterns: &PatternSet) -> Vec<FeatureVector> {
    FeatureExtractor::extract_many(texts, patterns)
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::PatternCompiler;

    fn sample_set() -> PatternSet {
        PatternCompiler::compile(&[r"\bfree\b", r"\bprize\b", r"\bclick here\b"]).unwrap()
    }

    #[test]
    fn test_extract_is_deterministic() {
        // 测试场景：相同输入两次提取，结果完全一致
        let patterns = sample_set();
        let text = "Claim your FREE prize now";

        let first = FeatureExtractor::extract(text, &patterns);
        let second = FeatureExtractor::extract(text, &patterns);
        assert_eq!(first, second);
    }

    #[test]
    fn test_feature_names_follow_pattern_order() {
        // 测试场景：模式特征按模式集顺序排列，派生标量固定排在末尾
        let patterns = sample_set();
        let vector = FeatureExtractor::extract("anything", &patterns);

        assert_eq!(
            vector.names(),
            vec![
                "pattern:\\bfree\\b",
                "pattern:\\bprize\\b",
                "pattern:\\bclick here\\b",
                FEATURE_LEN_CHARS,
                FEATURE_NUM_TOKENS,
            ]
        );
    }

    #[test]
    fn test_order_sensitivity_of_key_sequence() {
        // 测试场景：同一批模式、不同顺序，键序列不同但键集合与逐键取值相同
        let forward = PatternCompiler::compile(&[r"\bfree\b", r"\bprize\b"]).unwrap();
        let reversed = PatternCompiler::compile(&[r"\bprize\b", r"\bfree\b"]).unwrap();
        let text = "free prize";

        let v1 = FeatureExtractor::extract(text, &forward);
        let v2 = FeatureExtractor::extract(text, &reversed);

        assert_ne!(v1.names(), v2.names());

        let mut sorted1 = v1.names();
        let mut sorted2 = v2.names();
        sorted1.sort_unstable();
        sorted2.sort_unstable();
        assert_eq!(sorted1, sorted2);

        for name in v1.names() {
            assert_eq!(v1.get(name), v2.get(name));
        }
    }

    #[test]
    fn test_pattern_features_agree_with_matched_rules() {
        // 测试场景：取值为1的模式特征与命中规则完全双向一致
        let patterns = PatternCompiler::compile_default().unwrap();
        let texts = [
            "Congratulations, you have won a free prize! Click here to claim your cash reward.",
            "See you at the meeting tomorrow at 3pm.",
            "URGENT: verify your account password now",
        ];

        for text in texts {
            let vector = FeatureExtractor::extract(text, &patterns);
            let matched = patterns.matched_rules(text);

            let hot: Vec<String> = vector
                .entries()
                .iter()
                .filter(|(name, value)| name.starts_with(PATTERN_FEATURE_PREFIX) && *value == 1.0)
                .map(|(name, _)| name[PATTERN_FEATURE_PREFIX.len()..].to_string())
                .collect();

            assert_eq!(hot, matched, "inconsistent for: {text}");
        }
    }

    #[test]
    fn test_derived_scalar_features() {
        // 测试场景：字符数按归一化文本统计，词数按空白切分
        let patterns = sample_set();
        let vector = FeatureExtractor::extract("Hello  WORLD", &patterns);

        assert_eq!(vector.get(FEATURE_LEN_CHARS), Some(12.0));
        assert_eq!(vector.get(FEATURE_NUM_TOKENS), Some(2.0));
    }

    #[test]
    fn test_extract_many_matches_single() {
        // 测试场景：批量提取与逐条提取逐一等价
        let patterns = sample_set();
        let texts = vec!["free stuff".to_string(), "hello".to_string()];

        let batch = FeatureExtractor::extract_many(&texts, &patterns);
        assert_eq!(batch.len(), 2);
        for (text, vector) in texts.iter().zip(&batch) {
            assert_eq!(vector, &FeatureExtractor::extract(text, &patterns));
        }
    }
}
