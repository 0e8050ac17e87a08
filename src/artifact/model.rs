//! 分类器模型定义
//! 模型对检测引擎而言是能力多态的黑盒：标签预测为必选能力，
//! 概率估计为可选能力，缺失时按正常结果处理而非错误

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::extractor::FeatureVector;

/// 分类器能力接口
/// 必选：标签预测；可选：垃圾类概率估计（默认无此能力）
pub trait LabelClassifier {
    /// 预测标签（1=垃圾，0=正常）
    fn predict(&self, features: &FeatureVector) -> i64;

    /// 估计垃圾类概率；无此能力时返回None（区别于概率为0）
    fn predict_proba(&self, _features: &FeatureVector) -> Option<f64> {
        None
    }

    /// 模型种类描述
    fn kind(&self) -> &'static str;
}

/// 线性模型参数（标准化缩放 + 线性决策函数）
/// 权重按特征向量列序对齐，训练侧导出时必须使用同一列序
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub means: Vec<f64>,
    pub stds: Vec<f64>,
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    /// 计算线性决策值
    fn decision(&self, features: &FeatureVector) -> f64 {
        let mut z = self.intercept;

        for (index, (_, value)) in features.entries().iter().enumerate() {
            let Some(weight) = self.weights.get(index) else {
                break;
            };
            let mean = self.means.get(index).copied().unwrap_or(0.0);
            let std = self.stds.get(index).copied().unwrap_or(1.0);
            // 零方差列不提供信息，缩放后按0处理
            let scaled = if std > 0.0 { (value - mean) / std } else { 0.0 };
            z += weight * scaled;
        }

        z
    }
}

/// 决策树节点（扁平数组存储，下标0为根）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    /// 分裂节点：特征列值 <= threshold 走left，否则走right
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// 叶节点：垃圾类概率
    Leaf { prob: f64 },
}

/// 单棵决策树
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeModel {
    pub nodes: Vec<TreeNode>,
}

impl TreeModel {
    /// 自根向下求叶概率
    /// 步数超过节点数说明树结构损坏（索引成环），按无信号处理
    fn proba(&self, values: &[f64]) -> f64 {
        let mut index = 0;
        let mut steps = 0;

        loop {
            steps += 1;
            if steps > self.nodes.len() {
                warn!("决策树遍历步数超过节点数，疑似索引成环，强制终止");
                return 0.0;
            }

            match self.nodes.get(index) {
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = values.get(*feature).copied().unwrap_or(0.0);
                    index = if value <= *threshold { *left } else { *right };
                }
                Some(TreeNode::Leaf { prob }) => return *prob,
                None => return 0.0,
            }
        }
    }
}

/// 随机森林模型
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestModel {
    pub trees: Vec<TreeModel>,
}

impl ForestModel {
    /// 森林概率 = 各树叶概率均值
    fn proba(&self, features: &FeatureVector) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }

        let values = features.values();
        let sum: f64 = self.trees.iter().map(|tree| tree.proba(&values)).sum();
        sum / self.trees.len() as f64
    }
}

/// 可持久化的分类器模型
/// 训练侧产出的全部模型形态；检测引擎只通过LabelClassifier能力调用
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ClassifierModel {
    /// 逻辑回归（支持概率估计）
    LogisticRegression(LinearModel),
    /// 线性SVM（仅标签预测，无概率能力）
    LinearSvm(LinearModel),
    /// 随机森林（支持概率估计）
    RandomForest(ForestModel),
}

impl LabelClassifier for ClassifierModel {
    fn predict(&self, features: &FeatureVector) -> i64 {
        match self {
            Self::LogisticRegression(model) => (sigmoid(model.decision(features)) >= 0.5) as i64,
            Self::LinearSvm(model) => (model.decision(features) > 0.0) as i64,
            Self::RandomForest(model) => (model.proba(features) >= 0.5) as i64,
        }
    }

    fn predict_proba(&self, features: &FeatureVector) -> Option<f64> {
        match self {
            Self::LogisticRegression(model) => Some(sigmoid(model.decision(features))),
            Self::LinearSvm(_) => None, // 无概率估计能力
            Self::RandomForest(model) => Some(model.proba(features)),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::LogisticRegression(_) => "LogisticRegression",
            Self::LinearSvm(_) => "LinearSvm",
            Self::RandomForest(_) => "RandomForest",
        }
    }
}

/// sigmoid函数
fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
