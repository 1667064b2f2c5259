use crate::error::{Error, Result};
use crate::languages;
use crate::record::MarkerKind;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Opening and closing delimiters of a multi-line comment, e.g. `/*` and `*/`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BlockComment {
    pub open: String,
    pub close: String,
}

impl BlockComment {
    pub fn new(open: &str, close: &str) -> Self {
        BlockComment {
            open: open.to_string(),
            close: close.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_comment_leader")]
    pub comment_leader: String,

    #[serde(default)]
    pub block_comment: Option<BlockComment>,

    #[serde(default = "default_kinds")]
    pub kinds: Vec<MarkerKind>,

    #[serde(default = "default_block_start")]
    pub block_start: String,

    #[serde(default = "default_block_end")]
    pub block_end: String,

    #[serde(default = "default_case_sensitive")]
    pub case_sensitive: bool,

    #[serde(default)]
    pub strict: bool,

    #[serde(default = "default_normalize_unicode")]
    pub normalize_unicode: bool,

    /// Treat `'` as a one-character literal delimiter rather than a string
    /// quote.
    #[serde(default)]
    pub char_literals: bool,

    #[serde(default = "default_multiline_strings")]
    pub multiline_strings: Vec<String>,
}

fn default_comment_leader() -> String {
    "#".to_string()
}
fn default_kinds() -> Vec<MarkerKind> {
    MarkerKind::SINGLE_LINE.to_vec()
}
fn default_block_start() -> String {
    "TODOS.START".to_string()
}
fn default_block_end() -> String {
    "TODOS.END".to_string()
}
fn default_case_sensitive() -> bool {
    true
}
fn default_normalize_unicode() -> bool {
    true
}
fn default_multiline_strings() -> Vec<String> {
    vec!["\"\"\"".to_string(), "'''".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Config {
            comment_leader: default_comment_leader(),
            block_comment: None,
            kinds: default_kinds(),
            block_start: default_block_start(),
            block_end: default_block_end(),
            case_sensitive: true,
            strict: false,
            normalize_unicode: true,
            char_literals: false,
            multiline_strings: default_multiline_strings(),
        }
    }
}

impl Config {
    /// Default config with a different line-comment leader.
    pub fn with_leader(leader: &str) -> Self {
        Config {
            comment_leader: leader.to_string(),
            ..Config::default()
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Copy of this config using the comment syntax registered for the
    /// file's extension. Unknown extensions keep the configured syntax.
    pub fn for_path(&self, path: &Path) -> Config {
        let mut config = self.clone();
        if let Some(syntax) = languages::syntax_for_path(path) {
            config.comment_leader = syntax.leader.to_string();
            config.block_comment = syntax
                .block
                .map(|(open, close)| BlockComment::new(open, close));
            config.char_literals = syntax.char_literals;
            config.multiline_strings = syntax
                .multiline_strings
                .iter()
                .map(|d| d.to_string())
                .collect();
        }
        config
    }

    pub fn validate(&self) -> Result<()> {
        if self.comment_leader.trim().is_empty() {
            return Err(Error::Config("comment_leader must not be empty".into()));
        }
        if let Some(block) = &self.block_comment {
            if block.open.trim().is_empty() || block.close.trim().is_empty() {
                return Err(Error::Config("block_comment delimiters must not be empty".into()));
            }
        }
        if self.block_start.trim().is_empty() || self.block_end.trim().is_empty() {
            return Err(Error::Config("block_start and block_end must not be empty".into()));
        }
        if self.block_start == self.block_end {
            return Err(Error::Config(format!(
                "block_start and block_end are both {:?}",
                self.block_start
            )));
        }
        if self.multiline_strings.iter().any(|d| d.is_empty()) {
            return Err(Error::Config("multiline_strings entries must not be empty".into()));
        }
        if self.kinds.contains(&MarkerKind::Block) {
            return Err(Error::Config("BLOCK is not a single-line marker kind".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.comment_leader, "#");
        assert!(config.block_comment.is_none());
        assert_eq!(config.kinds, MarkerKind::SINGLE_LINE.to_vec());
        assert_eq!(config.block_start, "TODOS.START");
        assert_eq!(config.block_end, "TODOS.END");
        assert!(config.case_sensitive);
        assert!(!config.strict);
        assert!(config.normalize_unicode);
        assert!(!config.char_literals);
        assert_eq!(config.multiline_strings, vec!["\"\"\"", "'''"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_full_config() {
        let json = r#"{
            "comment_leader": "//",
            "block_comment": {"open": "/*", "close": "*/"},
            "kinds": ["TODO", "FIXME"],
            "block_start": "NOTES.BEGIN",
            "block_end": "NOTES.FINISH",
            "case_sensitive": false,
            "strict": true,
            "normalize_unicode": false
        }"#;
        let config = Config::from_json(json).unwrap();
        assert_eq!(config.comment_leader, "//");
        assert_eq!(config.block_comment, Some(BlockComment::new("/*", "*/")));
        assert_eq!(config.kinds, vec![MarkerKind::Todo, MarkerKind::Fixme]);
        assert_eq!(config.block_start, "NOTES.BEGIN");
        assert!(!config.case_sensitive);
        assert!(config.strict);
        assert!(!config.normalize_unicode);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config = Config::from_json(r#"{"comment_leader": "--"}"#).unwrap();
        assert_eq!(config.comment_leader, "--");
        assert_eq!(config.kinds.len(), 5);
        assert!(config.case_sensitive);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = Config::from_json(r#"{"kinds": ["REVIEW"]}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(Config::from_json(r#"{"comment_leader": "  "}"#).is_err());
        assert!(Config::from_json(r#"{"kinds": ["BLOCK"]}"#).is_err());
        assert!(Config::from_json(r#"{"block_start": "X", "block_end": "X"}"#).is_err());
        assert!(Config::from_json(r#"{"multiline_strings": [""]}"#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"comment_leader": "//", "strict": true}}"#).unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.comment_leader, "//");
        assert!(config.strict);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/notescan.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_for_path_picks_language_syntax() {
        let config = Config::default();
        let c = config.for_path(Path::new("src/sample.c"));
        assert_eq!(c.comment_leader, "//");
        assert_eq!(c.block_comment, Some(BlockComment::new("/*", "*/")));
        assert!(c.char_literals);
        assert!(c.multiline_strings.is_empty());

        let rb = config.for_path(Path::new("utils.rb"));
        assert_eq!(rb.comment_leader, "#");
        assert!(rb.multiline_strings.is_empty());

        let unknown = config.for_path(Path::new("notes.unknownext"));
        assert_eq!(unknown, config);
    }
}
