use crate::error::ScanError;
use crate::matcher::Matcher;
use crate::normalize;
use crate::record::{AnnotationRecord, MarkerKind};
use std::collections::VecDeque;
use std::iter::{Enumerate, FusedIterator};
use std::str::Lines;

#[derive(Debug, Clone)]
enum State {
    Normal,
    /// Inside a multi-line string literal; holds the delimiter index.
    InString {
        delim: usize,
    },
    InBlock {
        start: usize,
        lines: Vec<String>,
        in_comment: bool,
    },
    InBraceContinuation {
        start: usize,
        kind: MarkerKind,
        lines: Vec<String>,
    },
}

/// Lazy scan of one text. Yields records in file order; an unterminated
/// region ends the sequence with a single `Err`.
///
/// Scanning is pure: cloning a fresh scanner, or building a new one over the
/// same text, replays the same sequence.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    matcher: &'a Matcher,
    lines: Enumerate<Lines<'a>>,
    state: State,
    pending: VecDeque<AnnotationRecord>,
    warnings: Vec<ScanError>,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str, matcher: &'a Matcher) -> Self {
        Scanner {
            matcher,
            lines: text.lines().enumerate(),
            state: State::Normal,
            pending: VecDeque::new(),
            warnings: Vec::new(),
            done: false,
        }
    }

    /// Strict-mode warnings for the lines consumed so far.
    pub fn warnings(&self) -> &[ScanError] {
        &self.warnings
    }

    fn step(&mut self, line_no: usize, raw: &str) {
        let line = normalize::line(raw, self.matcher.nfkc);
        match self.state {
            State::Normal => return self.classify(line_no, &line, None),
            State::InString { delim } => return self.classify(line_no, &line, Some(delim)),
            _ => {}
        }
        match &mut self.state {
            State::Normal | State::InString { .. } => {}
            State::InBlock {
                start,
                lines,
                in_comment,
            } => {
                if self.matcher.closes_block(&line, *in_comment) {
                    let record = AnnotationRecord::region(MarkerKind::Block, lines, *start);
                    self.state = State::Normal;
                    self.pending.push_back(record);
                } else {
                    if self.matcher.ends_comment(&line) {
                        *in_comment = false;
                    }
                    lines.push(self.matcher.content(&line));
                }
            }
            State::InBraceContinuation { start, kind, lines } => {
                let content = self.matcher.content(&line);
                if content.starts_with('}') {
                    let record = AnnotationRecord::region(*kind, lines, *start);
                    self.state = State::Normal;
                    self.pending.push_back(record);
                } else {
                    lines.push(content);
                }
            }
        }
    }

    fn classify(&mut self, line_no: usize, line: &str, open_string: Option<usize>) {
        let split = self.matcher.split(line, open_string);
        self.state = match split.open_string {
            Some(delim) => State::InString { delim },
            None => State::Normal,
        };
        let Some(comment) = split.comment else {
            return;
        };
        if let Some(end) = self.matcher.block_start(comment) {
            match self.matcher.inline_block(&comment[end..]) {
                Some(body) => self.pending.push_back(AnnotationRecord::region(
                    MarkerKind::Block,
                    &[body],
                    line_no,
                )),
                None => {
                    self.state = State::InBlock {
                        start: line_no,
                        lines: Vec::new(),
                        in_comment: self.matcher.opens_comment(comment),
                    }
                }
            }
            return;
        }

        let markers = self.matcher.markers(comment);
        let last = markers.len().saturating_sub(1);
        for (i, (kind, body)) in markers.into_iter().enumerate() {
            if i == last && body == "{" {
                self.state = State::InBraceContinuation {
                    start: line_no,
                    kind,
                    lines: Vec::new(),
                };
                continue;
            }
            let body = inline_brace(&body).map_or(body.clone(), str::to_string);
            if body.is_empty() && self.matcher.strict {
                let warning = ScanError::MalformedMarker {
                    line: line_no,
                    kind,
                };
                log::warn!("{}", warning);
                self.warnings.push(warning);
            }
            self.pending
                .push_back(AnnotationRecord::single(kind, body, line_no));
        }
    }

    fn finish(&mut self) -> Option<ScanError> {
        match std::mem::replace(&mut self.state, State::Normal) {
            State::Normal | State::InString { .. } => None,
            State::InBlock { start, .. } => Some(ScanError::UnterminatedBlock {
                line: start,
                kind: MarkerKind::Block,
            }),
            State::InBraceContinuation { start, kind, .. } => {
                Some(ScanError::UnterminatedBlock { line: start, kind })
            }
        }
    }
}

/// `{ text }` written on a single line.
fn inline_brace(body: &str) -> Option<&str> {
    let inner = body.strip_prefix('{')?.strip_suffix('}')?;
    Some(inner.trim())
}

impl Iterator for Scanner<'_> {
    type Item = Result<AnnotationRecord, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.pending.pop_front() {
                return Some(Ok(record));
            }
            if self.done {
                return None;
            }
            match self.lines.next() {
                Some((idx, raw)) => self.step(idx + 1, raw),
                None => {
                    self.done = true;
                    return self.finish().map(Err);
                }
            }
        }
    }
}

impl FusedIterator for Scanner<'_> {}

/// Everything a scan produced. When `error` is set the scan stopped early and
/// `records` holds what was found before that point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutcome {
    pub records: Vec<AnnotationRecord>,
    pub warnings: Vec<ScanError>,
    pub error: Option<ScanError>,
}

impl ScanOutcome {
    pub fn collect(mut scanner: Scanner<'_>) -> Self {
        let mut records = Vec::new();
        let mut error = None;
        for item in scanner.by_ref() {
            match item {
                Ok(record) => records.push(record),
                Err(e) => {
                    error = Some(e);
                    break;
                }
            }
        }
        ScanOutcome {
            records,
            warnings: scanner.warnings,
            error,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> Result<Vec<AnnotationRecord>, ScanError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.records),
        }
    }
}
