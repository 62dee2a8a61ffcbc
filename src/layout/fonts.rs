//! Bundled font tables: family aliases and rendering compensation.

/// Font stack used when a family name has no alias.
pub const DEFAULT_FONT_STACK: &str = "\"黑体\", \"SimHei\", sans-serif";

/// Logical family name → concrete font stack.
static FONT_STACKS: &[(&str, &str)] = &[
    ("黑体", DEFAULT_FONT_STACK),
    ("宋体", "\"宋体\", \"SimSun\", serif"),
    ("楷体", "\"楷体\", \"KaiTi\", cursive"),
    ("微软雅黑", "\"微软雅黑\", \"Microsoft YaHei\", sans-serif"),
    ("苹方", "\"苹方\", \"PingFang SC\", sans-serif"),
    (
        "思源黑体",
        "\"思源黑体\", \"Source Han Sans\", \"Noto Sans CJK\", sans-serif",
    ),
    (
        "思源宋体",
        "\"思源宋体\", \"Source Han Serif\", \"Noto Serif CJK\", serif",
    ),
    ("华文黑体", "\"华文黑体\", \"STHeiti\", sans-serif"),
    ("华文宋体", "\"华文宋体\", \"STSong\", serif"),
    ("华文楷体", "\"华文楷体\", \"STKaiti\", cursive"),
    ("方正黑体", "\"方正黑体\", \"FZHei-B01S\", sans-serif"),
    ("方正宋体", "\"方正宋体\", \"FZShuSong-Z01S\", serif"),
    ("Arial", "Arial, sans-serif"),
    ("Helvetica", "Helvetica, Arial, sans-serif"),
    ("Times New Roman", "\"Times New Roman\", Times, serif"),
    ("Georgia", "Georgia, serif"),
    ("Courier New", "\"Courier New\", Courier, monospace"),
];

/// Substring of a normalized font stack → width multiplier. First match wins.
static COMPENSATION: &[(&str, f32)] = &[
    ("simhei", 1.1),
    ("simsun", 1.05),
    ("microsoftyahei", 1.08),
    ("arial", 0.95),
    ("helvetica", 0.95),
    ("times", 1.0),
    ("courier", 1.2),
];

/// Resolve a logical family name to its font stack.
///
/// Unknown names resolve to [`DEFAULT_FONT_STACK`].
pub fn font_stack(family: &str) -> &'static str {
    FONT_STACKS
        .iter()
        .find(|(name, _)| *name == family)
        .map_or(DEFAULT_FONT_STACK, |(_, stack)| *stack)
}

/// Names of all families with a bundled alias.
pub fn known_families() -> impl Iterator<Item = &'static str> {
    FONT_STACKS.iter().map(|(name, _)| *name)
}

/// Width compensation multiplier for a family, applied to the wrap width.
///
/// The family's font stack is lowercased and stripped of whitespace before
/// matching, so "Microsoft YaHei" matches `microsoftyahei`. Returns 1.0 when
/// no entry matches.
pub fn compensation(family: &str) -> f32 {
    let stack: String = font_stack(family)
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    COMPENSATION
        .iter()
        .find(|(key, _)| stack.contains(key))
        .map_or(1.0, |(_, factor)| *factor)
}

/// Check if a family resolves to a monospace stack.
pub fn is_monospace(family: &str) -> bool {
    let stack = font_stack(family).to_lowercase();
    stack.contains("monospace") || stack.contains("courier")
}
