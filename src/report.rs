use crate::error::Result;
use crate::record::{AnnotationRecord, MarkerKind};
use indexmap::IndexMap;
use serde::Serialize;

/// Annotation counts per kind, in the order each kind first appears.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub by_kind: IndexMap<MarkerKind, usize>,
}

impl Summary {
    pub fn from_records<'r>(records: impl IntoIterator<Item = &'r AnnotationRecord>) -> Self {
        let mut summary = Summary::default();
        for record in records {
            summary.total += 1;
            *summary.by_kind.entry(record.kind()).or_insert(0) += 1;
        }
        summary
    }

    pub fn count(&self, kind: MarkerKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }
}

pub fn to_json(records: &[AnnotationRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
