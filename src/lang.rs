/// The fixed set of Python keywords the highlighter recognizes.
/// The table is defined once and never changes at runtime.
pub const KEYWORDS: &[&str] = &[
    "def", "class", "import", "from", "as", "return", "if", "elif", "else", "while", "for",
    "break", "continue", "try", "except", "finally", "raise", "with", "lambda", "yield",
];

/// Keywords that introduce a named definition (`def name`, `class Name`).
pub const DEFINITION_KEYWORDS: &[&str] = &["def", "class"];
