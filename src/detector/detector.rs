//! 检测器核心：整合特征提取与分类器调用，输出检测结果
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::artifact::{ArtifactLoader, ClassifierModel, LabelClassifier};
use crate::compiler::PatternSet;
use crate::config::GlobalConfig;
use crate::error::RslResult;
use crate::extractor::FeatureExtractor;

/// 单次检测结果（每次调用新建，不可变）
#[derive(Debug, Clone, Serialize)]
pub struct DetectionResult {
    /// 预测标签：1=垃圾，0=正常
    pub prediction: i64,
    /// 垃圾类概率；分类器无概率能力时缺省（缺省≠概率为0）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prob_spam: Option<f64>,
    /// 命中的模式文本（顺序与模式集一致）
    pub matched_rules: Vec<String>,
    /// 原始输入文本（未归一化，供展示/审计）
    pub input: String,
}

/// 纯函数检测接口：输出完全由三个输入决定，无共享状态、无副作用
pub fn detect<C>(text: &str, classifier: &C, patterns: &PatternSet) -> DetectionResult
where
    C: LabelClassifier + ?Sized,
{
    // 1. 计算命中规则（与特征提取共用同一匹配规则）
    let matched_rules = patterns.matched_rules(text);

    // 2. 构建特征向量
    let features = FeatureExtractor::extract(text, patterns);

    // 3. 标签预测，强制归一到0/1
    let prediction = (classifier.predict(&features) != 0) as i64;

    // 4. 概率估计（能力缺失时为None，不视为错误）
    let prob_spam = classifier.predict_proba(&features);

    DetectionResult {
        prediction,
        prob_spam,
        matched_rules,
        input: text.to_string(),
    }
}

/// 垃圾文本检测器
/// 持有加载后的(分类器, 模式集)，进程生命周期内只读共享
#[derive(Debug, Clone)]
pub struct SpamDetector {
    classifier: Arc<ClassifierModel>,
    patterns: Arc<PatternSet>,
    config: GlobalConfig,
}

impl SpamDetector {
    /// 创建检测器（从配置指定的工件路径加载）
    pub async fn new(config: GlobalConfig) -> RslResult<Self> {
        // 1. 加载工件
        let (classifier, patterns) = ArtifactLoader::load(&config.model_path).await?;

        debug!(
            "检测器初始化完成：模型={}，模式数={}",
            classifier.kind(),
            patterns.len()
        );

        Ok(Self {
            classifier: Arc::new(classifier),
            patterns: Arc::new(patterns),
            config,
        })
    }

    /// 核心检测接口
    pub fn detect(&self, text: &str) -> DetectionResult {
        detect(text, self.classifier.as_ref(), self.patterns.as_ref())
    }

    /// 查询命中规则（仅解释性输出，不做预测）
    pub fn matched_rules(&self, text: &str) -> Vec<String> {
        self.patterns.matched_rules(text)
    }

    /// 当前模式集
    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// 当前配置
    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }
}

// 对外暴露的简化接口（共享全局检测器）
pub fn detect_spam(text: &str) -> RslResult<DetectionResult> {
    let detector = super::global::get_global_detector()?;
    Ok(detector.detect(text))
}

pub fn match_spam_rules(text: &str) -> RslResult<Vec<String>> {
    let detector = super::global::get_global_detector()?;
    Ok(detector.matched_rules(text))
}
