//! 编译模块：将模式文本编译为可执行的识别器
pub mod pattern;
pub mod compiler;

pub use self::pattern::{Pattern, PatternSet};
pub use self::compiler::{PatternCompiler, compile_patterns};
