//! 模式编译器核心
//! 仅负责将模式文本编译为可执行的识别器

use std::time::Instant;
use regex::Regex;
use tracing::debug;

use super::pattern::{Pattern, PatternSet};
use crate::error::{RslResult, RspamlexError};
use crate::lexicon::DEFAULT_PATTERN_TEXTS;

/// 模式编译器
pub struct PatternCompiler;

impl PatternCompiler {
    /// 编译模式文本列表
    /// 每条模式独立编译，任一失败立即返回错误并标明出错文本，
    /// 不会静默丢弃其余模式
    pub fn compile<S: AsRef<str>>(texts: &[S]) -> RslResult<PatternSet> {
        let start = Instant::now();
        let mut patterns = Vec::with_capacity(texts.len());

        for text in texts {
            patterns.push(Self::compile_single(text.as_ref())?);
        }

        let set = PatternSet::new(patterns);
        debug!("模式编译完成，总耗时{:?}，模式数：{}", start.elapsed(), set.len());

        Ok(set)
    }

    /// 编译内置默认词库
    pub fn compile_default() -> RslResult<PatternSet> {
        Self::compile(DEFAULT_PATTERN_TEXTS)
    }

    /// 编译单条模式（模式文本同时作为识别器的正则源）
    pub fn compile_single(text: &str) -> RslResult<Pattern> {
        let recognizer = Self::compile_recognizer(text, text)?;
        Ok(Pattern {
            text: text.to_string(),
            recognizer,
        })
    }

    /// 以指定正则源编译模式（用于复用工件内嵌识别器，保留训练侧的识别器变体）
    pub fn compile_with_source(text: &str, source: &str) -> RslResult<Pattern> {
        let recognizer = Self::compile_recognizer(text, source)?;
        Ok(Pattern {
            text: text.to_string(),
            recognizer,
        })
    }

    /// 编译识别器正则，错误中携带模式的规范标识
    fn compile_recognizer(text: &str, source: &str) -> RslResult<Regex> {
        Regex::new(source).map_err(|e| RspamlexError::PatternCompileError {
            pattern: text.to_string(),
            source: e,
        })
    }
}

/// 便捷接口：编译模式集，未提供文本时使用内置默认词库
pub fn compile_patterns(texts: Option<&[String]>) -> RslResult<PatternSet> {
    match texts {
        Some(texts) => PatternCompiler::compile(texts),
        None => PatternCompiler::compile_default(),
    }
}
