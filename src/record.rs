use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarkerKind {
    Todo,
    Fixme,
    Xxx,
    Note,
    Hack,
    Block,
}

impl MarkerKind {
    /// Kinds recognized as single-line markers when nothing else is configured.
    pub const SINGLE_LINE: [MarkerKind; 5] = [
        MarkerKind::Todo,
        MarkerKind::Fixme,
        MarkerKind::Xxx,
        MarkerKind::Note,
        MarkerKind::Hack,
    ];

    pub fn token(self) -> &'static str {
        match self {
            MarkerKind::Todo => "TODO",
            MarkerKind::Fixme => "FIXME",
            MarkerKind::Xxx => "XXX",
            MarkerKind::Note => "NOTE",
            MarkerKind::Hack => "HACK",
            MarkerKind::Block => "BLOCK",
        }
    }

    pub fn from_token(token: &str) -> Option<MarkerKind> {
        match token.to_ascii_uppercase().as_str() {
            "TODO" => Some(MarkerKind::Todo),
            "FIXME" => Some(MarkerKind::Fixme),
            "XXX" => Some(MarkerKind::Xxx),
            "NOTE" => Some(MarkerKind::Note),
            "HACK" => Some(MarkerKind::Hack),
            "BLOCK" => Some(MarkerKind::Block),
            _ => None,
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// One annotation found in a source text.
///
/// `line_number` is 1-based and always points at the opening marker, even for
/// records whose body spans several lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationRecord {
    kind: MarkerKind,
    body: String,
    line_number: usize,
    is_block: bool,
}

impl AnnotationRecord {
    pub(crate) fn single(kind: MarkerKind, body: String, line_number: usize) -> Self {
        AnnotationRecord {
            kind,
            body,
            line_number,
            is_block: false,
        }
    }

    pub(crate) fn region(kind: MarkerKind, lines: &[String], line_number: usize) -> Self {
        AnnotationRecord {
            kind,
            body: lines.join("\n"),
            line_number,
            is_block: true,
        }
    }

    pub fn kind(&self) -> MarkerKind {
        self.kind
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn is_block(&self) -> bool {
        self.is_block
    }
}
