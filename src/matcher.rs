//! Per-configuration patterns used by the scanner to classify a line.

use crate::config::Config;
use crate::error::Result;
use crate::record::MarkerKind;
use regex::Regex;

/// Compiled form of a [`Config`]. Build once, share across any number of
/// scans.
#[derive(Debug, Clone)]
pub struct Matcher {
    leaders: Vec<String>,
    block_open: Option<String>,
    block_close: Option<String>,
    marker: Option<Regex>,
    block_start: Regex,
    block_end: Regex,
    block_end_token: Regex,
    block_end_bare: Regex,
    multiline: Vec<String>,
    char_literals: bool,
    pub(crate) strict: bool,
    pub(crate) nfkc: bool,
}

/// How one line splits into code and comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSplit<'l> {
    pub comment: Option<&'l str>,
    /// Multi-line string (index into the configured delimiters) still open at
    /// the end of the line.
    pub open_string: Option<usize>,
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `\b` only makes sense next to a word character.
fn bounded(token: &str) -> String {
    let mut out = String::new();
    if token.chars().next().is_some_and(is_word) {
        out.push_str(r"\b");
    }
    out.push_str(&regex::escape(token));
    if token.chars().last().is_some_and(is_word) {
        out.push_str(r"\b");
    }
    out
}

fn flags(case_sensitive: bool) -> &'static str {
    if case_sensitive {
        ""
    } else {
        "(?i)"
    }
}

/// Index of the quote closing the literal opened at `open`, honoring
/// backslash escapes.
fn closing_quote(bytes: &[u8], open: usize) -> Option<usize> {
    let quote = bytes[open];
    let mut j = open + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b if b == quote => return Some(j),
            _ => j += 1,
        }
    }
    None
}

/// Index of the `'` closing a character literal opened at `open`: `'x'` or an
/// escape such as `'\n'` or `'\u{1F600}'`. Lifetimes and apostrophes yield
/// `None`.
fn char_literal_end(line: &str, open: usize) -> Option<usize> {
    let rest = &line[open + 1..];
    let mut chars = rest.chars();
    let first = chars.next()?;
    if first == '\\' {
        let escaped = chars.next()?;
        let after = 1 + escaped.len_utf8();
        let close = rest[after..].find('\'')?;
        (close <= 10).then_some(open + 1 + after + close)
    } else if first != '\'' && chars.next() == Some('\'') {
        Some(open + 1 + first.len_utf8())
    } else {
        None
    }
}

impl Matcher {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let mut leaders = vec![config.comment_leader.trim().to_string()];
        if let Some(block) = &config.block_comment {
            leaders.push(block.open.trim().to_string());
        }
        // Longest first so `///` wins over `//` in the alternation.
        leaders.sort_by_key(|l| std::cmp::Reverse(l.len()));
        leaders.dedup();

        let leader_alt = leaders
            .iter()
            .map(|l| regex::escape(l))
            .collect::<Vec<_>>()
            .join("|");
        let flag = flags(config.case_sensitive);

        let marker = if config.kinds.is_empty() {
            None
        } else {
            let mut tokens: Vec<&str> = config.kinds.iter().map(|k| k.token()).collect();
            tokens.sort_by_key(|t| std::cmp::Reverse(t.len()));
            tokens.dedup();
            // ASCII-only folding: every match must map back to a kind token.
            let kind_flag = if config.case_sensitive { "" } else { "i-u" };
            Some(Regex::new(&format!(
                r"(?:{leader_alt})[ \t]*\b(?P<kind>(?{kind_flag}:{}))\b",
                tokens.join("|")
            ))?)
        };

        let start_token = bounded(config.block_start.trim());
        let end_token = bounded(config.block_end.trim());
        let block_start = Regex::new(&format!(r"{flag}(?:{leader_alt})[ \t]*{start_token}"))?;
        let block_end = Regex::new(&format!(r"{flag}(?:{leader_alt})[ \t]*{end_token}"))?;
        let block_end_token = Regex::new(&format!("{flag}{end_token}"))?;
        let block_end_bare = Regex::new(&format!(r"{flag}^[ \t]*(?:\*[ \t]*)?{end_token}"))?;

        Ok(Matcher {
            leaders,
            block_open: config
                .block_comment
                .as_ref()
                .map(|b| b.open.trim().to_string()),
            block_close: config
                .block_comment
                .as_ref()
                .map(|b| b.close.trim().to_string()),
            marker,
            block_start,
            block_end,
            block_end_token,
            block_end_bare,
            multiline: config.multiline_strings.clone(),
            char_literals: config.char_literals,
            strict: config.strict,
            nfkc: config.normalize_unicode,
        })
    }

    /// Splits `line` at its first comment leader that is not inside a string
    /// literal. `open_string` is the multi-line string left open by the
    /// previous line, if any. Quotes left open on the line are taken as plain
    /// characters (apostrophes, lifetimes).
    pub fn split<'l>(&self, line: &'l str, open_string: Option<usize>) -> LineSplit<'l> {
        let unterminated = |d| LineSplit {
            comment: None,
            open_string: Some(d),
        };
        let bytes = line.as_bytes();
        let mut i = 0;
        if let Some(d) = open_string {
            let delim = self.multiline[d].as_str();
            match line.find(delim) {
                Some(pos) => i = pos + delim.len(),
                None => return unterminated(d),
            }
        }

        while i < bytes.len() {
            if let Some(d) = self
                .multiline
                .iter()
                .position(|m| bytes[i..].starts_with(m.as_bytes()))
            {
                let delim = self.multiline[d].as_str();
                let body = i + delim.len();
                match line[body..].find(delim) {
                    Some(pos) => {
                        i = body + pos + delim.len();
                        continue;
                    }
                    None => return unterminated(d),
                }
            }

            let end = match bytes[i] {
                b'\'' if self.char_literals => char_literal_end(line, i),
                b'"' | b'\'' | b'`' => closing_quote(bytes, i),
                _ => None,
            };
            if let Some(end) = end {
                i = end + 1;
                continue;
            }
            if self
                .leaders
                .iter()
                .any(|l| bytes[i..].starts_with(l.as_bytes()))
            {
                return LineSplit {
                    comment: Some(&line[i..]),
                    open_string: None,
                };
            }
            i += 1;
        }
        LineSplit {
            comment: None,
            open_string: None,
        }
    }

    /// The comment part of a line that starts outside any string.
    pub fn comment<'l>(&self, line: &'l str) -> Option<&'l str> {
        self.split(line, None).comment
    }

    /// Offset just past the block-start token when `comment` opens a block.
    pub fn block_start(&self, comment: &str) -> Option<usize> {
        self.block_start.find(comment).map(|m| m.end())
    }

    /// Body of a block opened and closed on the same line, given the text
    /// after the start token.
    pub fn inline_block(&self, rest: &str) -> Option<String> {
        let m = self.block_end_token.find(rest)?;
        Some(self.strip_close(rest[..m.start()].trim()).to_string())
    }

    /// Whether `comment` opens a block comment that stays open past the line.
    pub fn opens_comment(&self, comment: &str) -> bool {
        match (&self.block_open, &self.block_close) {
            (Some(open), Some(close)) => comment
                .strip_prefix(open.as_str())
                .is_some_and(|rest| !rest.contains(close.as_str())),
            _ => false,
        }
    }

    /// Whether `text` contains the block comment closer.
    pub fn ends_comment(&self, text: &str) -> bool {
        self.block_close
            .as_deref()
            .is_some_and(|close| text.contains(close))
    }

    /// End token on a line inside a block. It must follow a comment leader,
    /// unless the block sits inside an open block comment, where a line may
    /// start with the bare token.
    pub fn closes_block(&self, line: &str, in_comment: bool) -> bool {
        if in_comment && self.block_end_bare.is_match(line) {
            return true;
        }
        self.comment(line)
            .is_some_and(|c| self.block_end.is_match(c))
    }

    /// Every marker in `comment`, in order, with the text that follows it up
    /// to the next marker.
    pub fn markers(&self, comment: &str) -> Vec<(MarkerKind, String)> {
        let Some(re) = &self.marker else {
            return Vec::new();
        };
        let found: Vec<_> = re
            .captures_iter(comment)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let kind = MarkerKind::from_token(caps.name("kind")?.as_str())?;
                Some((kind, whole.start(), whole.end()))
            })
            .collect();

        found
            .iter()
            .enumerate()
            .map(|(i, &(kind, _, end))| {
                let stop = found.get(i + 1).map_or(comment.len(), |next| next.1);
                (kind, self.body(&comment[end..stop]))
            })
            .collect()
    }

    fn body(&self, raw: &str) -> String {
        let text = raw.trim_start();
        let text = text.strip_prefix(':').unwrap_or(text);
        self.strip_close(text.trim()).to_string()
    }

    fn strip_close<'t>(&self, text: &'t str) -> &'t str {
        match &self.block_close {
            Some(close) => text.strip_suffix(close.as_str()).map_or(text, str::trim_end),
            None => text,
        }
    }

    /// Text of a line inside a block or brace region with comment syntax
    /// removed.
    pub fn content(&self, line: &str) -> String {
        let text = line.trim();
        let text = self
            .leaders
            .iter()
            .find_map(|l| text.strip_prefix(l.as_str()))
            .or_else(|| {
                let close = self.block_close.as_deref()?;
                if text.starts_with(close) {
                    None
                } else {
                    text.strip_prefix('*')
                }
            })
            .unwrap_or(text);
        self.strip_close(text.trim()).to_string()
    }
}
