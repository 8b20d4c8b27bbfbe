use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Folds text for accent- and case-insensitive matching.
///
/// NFKD splits "ã" into "a" + U+0303; the combining marks are dropped and the
/// rest is lowercased. Non-Latin scripts survive untouched apart from case.
pub fn normalize_text(text: &str) -> String {
    text.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}
