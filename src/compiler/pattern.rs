//! 编译后模式模型
//! 模式集顺序是特征列顺序的唯一权威

use std::collections::HashSet;
use regex::Regex;

/// 单条已编译模式
/// text是模式的规范标识，同时用作特征名后缀与命中规则标签；
/// 识别器对已小写化的文本做匹配判定，词边界策略由模式文本自身携带
#[derive(Debug, Clone)]
pub struct Pattern {
    pub text: String,
    pub recognizer: Regex,
}

impl Pattern {
    /// 判断模式是否命中已小写化的文本
    pub fn is_match(&self, lowered: &str) -> bool {
        self.recognizer.is_match(lowered)
    }
}

/// 有序模式集（构造后不可变，任何修改产生新的模式集）
/// 模式位置决定特征向量列位置：同一批模式、不同顺序的两个模式集
/// 对分类器而言不可互换
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// 从已编译模式构造（按text去重，保留首个出现位置）
    pub(crate) fn new(patterns: Vec<Pattern>) -> Self {
        let mut seen = HashSet::new();
        let patterns = patterns
            .into_iter()
            .filter(|p| seen.insert(p.text.clone()))
            .collect();
        Self { patterns }
    }

    /// 模式数量
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// 模式集是否为空
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// 按顺序遍历模式
    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    /// 按顺序返回模式文本
    pub fn texts(&self) -> Vec<String> {
        self.patterns.iter().map(|p| p.text.clone()).collect()
    }

    /// 返回命中输入文本的模式文本列表（顺序与模式集一致）
    /// 与特征提取共用同一匹配规则：先小写化，再逐条独立判定
    pub fn matched_rules(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.patterns
            .iter()
            .filter(|p| p.is_match(&lowered))
            .map(|p| p.text.clone())
            .collect()
    }
}
