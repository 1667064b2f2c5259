use std::borrow::Cow;
use unicode_normalization::{is_nfkc_quick, IsNormalized, UnicodeNormalization};

/// Prepares one raw line for classification: strips a stray `\r` and trailing
/// whitespace, and optionally applies NFKC.
pub fn line(raw: &str, nfkc: bool) -> Cow<'_, str> {
    let trimmed = raw.trim_end();
    if nfkc && is_nfkc_quick(trimmed.chars()) != IsNormalized::Yes {
        Cow::Owned(trimmed.nfkc().collect::<String>().trim_end().to_string())
    } else {
        Cow::Borrowed(trimmed)
    }
}
