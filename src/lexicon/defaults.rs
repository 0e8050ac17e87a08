//! 内置默认模式词库
//! 词库是配置数据而非行为，调用方可整体替换或从JSON文件加载

/// 默认垃圾文本模式词库（词边界敏感的正则文本）
/// 顺序即特征列顺序：训练与推理必须使用同一顺序，不可随意调整
/// `\burl\b` 与 `\bcur\b` 对应预处理阶段的URL/货币占位符
pub const DEFAULT_PATTERN_TEXTS: &[&str] = &[
    r"\burl\b", r"\bcur\b",
    r"\bfree\b", r"\bwin(?:ner|s|ning)?\b", r"\bprize\b", r"\bclaim\b", r"\bcongrat",
    r"\burgent\b", r"\bclick\b", r"\boffer\b", r"\bbuy\b", r"\bcheap\b", r"\bdiscount\b",
    r"\blimited time\b", r"\bact now\b", r"\bcall now\b", r"\bcash\b", r"\bloan\b", r"\bcredit\b",
    r"\binvest(?:ment|or)?\b", r"\bearn\b", r"\bincome\b", r"\bguarantee\b", r"\brisk free\b", r"\blottery\b",
    r"\bwinner\b", r"\bcongratulations\b", r"\bsubscribe\b", r"\bunsubscribe\b", r"\bviagra\b", r"\bdeal\b",
    r"\binsurance\b", r"\bpassword\b", r"\baccount\b", r"\bverify\b", r"\bimportant\b",
    r"\bclick here\b", r"\bexclusive\b", r"\bapply now\b", r"\b100%\b", r"\bguaranteed\b", r"\bbonus\b",
    r"\bmillions?\b", r"\bdonation\b", r"\bsex\b", r"\bcheaply\b",
];
