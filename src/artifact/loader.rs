//! 工件加载管理器
//! 负责解码持久化工件，并将三种历史模式编码归一化为同一模式集

use std::path::Path;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::model::{ClassifierModel, LabelClassifier};
use crate::compiler::{Pattern, PatternCompiler, PatternSet};
use crate::error::{RslResult, RspamlexError};

/// 持久化工件束
/// 训练侧写入 {classifier, patterns}；patterns字段保持松散类型，
/// 由加载侧按历史编码形态归一化
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactBundle {
    pub classifier: ClassifierModel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patterns: Option<Value>,
    /// 可选schema版本号（历史工件均无此字段，结构化探测仍是权威）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u32>,
}

/// 内嵌识别器的序列化形态（pair列表条目的第二元素）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizerSpec {
    pub source: String,
}

/// 模式字段的三种历史编码，归一化前的中间表示
#[derive(Debug)]
enum PatternSource {
    /// 字段缺失
    Absent,
    /// 纯模式文本列表
    TextList(Vec<String>),
    /// (文本, 识别器)对列表，可能混入异类条目
    PairList(Vec<Value>),
}

impl PatternSource {
    /// 从原始patterns字段归类编码形态
    fn classify(patterns: Option<Value>) -> RslResult<Self> {
        match patterns {
            None | Some(Value::Null) => Ok(Self::Absent),
            Some(Value::Array(items)) => {
                if items.iter().all(Value::is_string) {
                    let texts = items
                        .into_iter()
                        .filter_map(|item| match item {
                            Value::String(text) => Some(text),
                            _ => None,
                        })
                        .collect();
                    Ok(Self::TextList(texts))
                } else {
                    Ok(Self::PairList(items))
                }
            }
            Some(other) => Err(RspamlexError::InvalidInput(format!(
                "无法识别的patterns字段形态：{other}"
            ))),
        }
    }

    /// 将任一编码形态归一化为同一模式集（保持原始顺序）
    fn into_pattern_set(self) -> RslResult<PatternSet> {
        match self {
            Self::Absent => {
                debug!("工件未内嵌模式，回退编译内置默认词库");
                PatternCompiler::compile_default()
            }
            Self::TextList(texts) => PatternCompiler::compile(&texts),
            Self::PairList(items) => {
                let mut patterns = Vec::with_capacity(items.len());
                for item in items {
                    patterns.push(Self::coerce_entry(item)?);
                }
                Ok(PatternSet::new(patterns))
            }
        }
    }

    /// 归一化pair列表中的单个条目
    fn coerce_entry(item: Value) -> RslResult<Pattern> {
        match item {
            // (文本, 识别器)对：原样复用内嵌识别器源，保留训练侧的识别器变体
            Value::Array(pair) if pair.len() >= 2 => {
                let text = match &pair[0] {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                };

                match serde_json::from_value::<RecognizerSpec>(pair[1].clone()) {
                    Ok(spec) => PatternCompiler::compile_with_source(&text, &spec.source),
                    // 第二元素不是识别器，回退按文本编译
                    Err(_) => PatternCompiler::compile_single(&text),
                }
            }
            // 裸文本条目
            Value::String(text) => PatternCompiler::compile_single(&text),
            // 兜底：强转字符串表示后编译
            other => {
                let text = other.to_string();
                warn!("无法识别的模式条目，按字符串表示编译：{text}");
                PatternCompiler::compile_single(&text)
            }
        }
    }
}

/// 工件加载管理器
pub struct ArtifactLoader;

impl ArtifactLoader {
    /// 加载工件，返回(分类器, 模式集)
    /// 工件可以是完整束 {classifier, patterns} 或裸分类器对象，
    /// 三种历史模式编码归一化后均保持原始顺序
    pub async fn load(path: impl AsRef<Path>) -> RslResult<(ClassifierModel, PatternSet)> {
        let path = path.as_ref();

        // 1. 路径校验
        if !path.exists() {
            return Err(RspamlexError::ArtifactNotFound(path.to_path_buf()));
        }

        // 2. 读取并解码为松散结构（MessagePack自描述，结构化探测外形）
        let data = tokio::fs::read(path).await?;
        let raw: Value = rmp_serde::from_slice(&data)
            .map_err(|e| RspamlexError::MsgPackError(format!("反序列化失败：{e}")))?;

        // 3. 拆束：带classifier字段的映射按束处理，否则按裸分类器处理
        let (classifier_value, patterns_value, schema_version) = match raw {
            Value::Object(mut map) if map.contains_key("classifier") => {
                let classifier = map.remove("classifier").unwrap_or(Value::Null);
                let patterns = map.remove("patterns");
                let schema_version = map
                    .remove("schema_version")
                    .and_then(|v| v.as_u64())
                    .map(|v| v as u32);
                (classifier, patterns, schema_version)
            }
            other => (other, None, None),
        };

        let classifier: ClassifierModel = serde_json::from_value(classifier_value)
            .map_err(|e| RspamlexError::MsgPackError(format!("分类器解析失败：{e}")))?;

        // 4. 归一化模式编码
        let pattern_set = PatternSource::classify(patterns_value)?.into_pattern_set()?;

        debug!(
            "工件加载成功：模型={}，模式数={}，schema版本={:?}",
            classifier.kind(),
            pattern_set.len(),
            schema_version
        );

        Ok((classifier, pattern_set))
    }
}

/// 便捷接口：加载工件
pub async fn load_artifact(path: impl AsRef<Path>) -> RslResult<(ClassifierModel, PatternSet)> {
    ArtifactLoader::load(path).await
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::model::LinearModel;
    use crate::artifact::store::ArtifactStore;
    use serde_json::json;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("rspamlex_artifact_{name}.mp"))
    }

    fn sample_classifier() -> ClassifierModel {
        ClassifierModel::LogisticRegression(LinearModel {
            means: vec![0.0; 4],
            stds: vec![1.0; 4],
            weights: vec![1.0, 1.0, 0.0, 0.0],
            intercept: -0.5,
        })
    }

    async fn write_bundle(name: &str, patterns: Option<Value>) -> std::path::PathBuf {
        let path = temp_path(name);
        let bundle = ArtifactBundle {
            classifier: sample_classifier(),
            patterns,
            schema_version: None,
        };
        ArtifactStore::save(&path, &bundle).await.unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_missing_artifact() {
        // 测试场景：路径不存在，应返回ArtifactNotFound
        let result = ArtifactLoader::load("/nonexistent/model.mp").await;
        assert!(matches!(result, Err(RspamlexError::ArtifactNotFound(_))));
    }

    #[tokio::test]
    async fn test_load_bundle_with_text_list() {
        // 测试场景：patterns为纯文本列表，逐条编译且顺序保持
        let path = write_bundle(
            "text_list",
            Some(json!([r"\bprize\b", r"\bfree\b"])),
        )
        .await;

        let (classifier, patterns) = ArtifactLoader::load(&path).await.unwrap();
        assert_eq!(classifier.kind(), "LogisticRegression");
        assert_eq!(patterns.texts(), vec![r"\bprize\b", r"\bfree\b"]);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_load_bundle_without_patterns_uses_default() {
        // 测试场景：patterns字段缺失，回退编译内置默认词库
        let path = write_bundle("absent", None).await;

        let (_, patterns) = ArtifactLoader::load(&path).await.unwrap();
        assert_eq!(patterns.len(), crate::lexicon::DEFAULT_PATTERN_TEXTS.len());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_load_bare_classifier() {
        // 测试场景：工件是裸分类器对象（无束包装），透明拆封并回退默认词库
        let path = temp_path("bare");
        let data = rmp_serde::to_vec_named(&sample_classifier()).unwrap();
        tokio::fs::write(&path, data).await.unwrap();

        let (classifier, patterns) = ArtifactLoader::load(&path).await.unwrap();
        assert_eq!(classifier.kind(), "LogisticRegression");
        assert_eq!(patterns.len(), crate::lexicon::DEFAULT_PATTERN_TEXTS.len());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_load_pair_list_reuses_embedded_recognizer() {
        // 测试场景：pair列表条目内嵌识别器源与展示文本不同，应复用识别器源
        let path = write_bundle(
            "pair_list",
            Some(json!([
                ["free", { "source": r"\bfree\b" }],
                ["prize", { "source": r"\bprize\b" }],
            ])),
        )
        .await;

        let (_, patterns) = ArtifactLoader::load(&path).await.unwrap();
        assert_eq!(patterns.texts(), vec!["free", "prize"]);
        // 识别器来自内嵌源：词边界生效，"freedom"不应命中
        assert!(patterns.matched_rules("freedom fighter").is_empty());
        assert_eq!(patterns.matched_rules("free prize"), vec!["free", "prize"]);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_load_pair_list_coerces_malformed_entries() {
        // 测试场景：pair第二元素不是识别器、裸数字条目，均兜底编译且顺序保持
        let path = write_bundle(
            "coerce",
            Some(json!([
                ["free", 42],
                [r"\bprize\b", { "source": r"\bprize\b" }],
                100,
            ])),
        )
        .await;

        let (_, patterns) = ArtifactLoader::load(&path).await.unwrap();
        assert_eq!(patterns.texts(), vec!["free", r"\bprize\b", "100"]);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_legacy_shapes_agree_on_matched_rules() {
        // 测试场景：同一逻辑词库的三种历史编码，对代表性语料给出一致的命中结果
        let texts = crate::lexicon::LexiconStore::default_texts();

        let absent = write_bundle("eq_absent", None).await;
        let text_list = write_bundle("eq_text", Some(json!(texts.clone()))).await;
        let pair_list = write_bundle(
            "eq_pair",
            Some(Value::Array(
                texts
                    .iter()
                    .map(|t| json!([t, { "source": t }]))
                    .collect(),
            )),
        )
        .await;

        let (_, p_absent) = ArtifactLoader::load(&absent).await.unwrap();
        let (_, p_text) = ArtifactLoader::load(&text_list).await.unwrap();
        let (_, p_pair) = ArtifactLoader::load(&pair_list).await.unwrap();

        let corpus = [
            "Congratulations, you have won a free prize! Click here to claim your cash reward.",
            "See you at the meeting tomorrow at 3pm.",
            "URGENT: claim your lottery winnings, 100% guaranteed",
            "lunch at noon?",
        ];

        for text in corpus {
            let expected = p_absent.matched_rules(text);
            assert_eq!(p_text.matched_rules(text), expected, "text list differs: {text}");
            assert_eq!(p_pair.matched_rules(text), expected, "pair list differs: {text}");
        }

        for path in [absent, text_list, pair_list] {
            let _ = std::fs::remove_file(path);
        }
    }
}
