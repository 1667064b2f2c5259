use std::path::Path;

/// Comment and string syntax of one language family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSyntax {
    pub leader: &'static str,
    pub block: Option<(&'static str, &'static str)>,
    /// `'` delimits one-character literals (and lifetimes), not strings.
    pub char_literals: bool,
    /// String delimiters whose literals may span lines.
    pub multiline_strings: &'static [&'static str],
}

const PYTHON: CommentSyntax = CommentSyntax {
    leader: "#",
    block: None,
    char_literals: false,
    multiline_strings: &["\"\"\"", "'''"],
};

const HASH: CommentSyntax = CommentSyntax {
    leader: "#",
    block: None,
    char_literals: false,
    multiline_strings: &[],
};

const C_LIKE: CommentSyntax = CommentSyntax {
    leader: "//",
    block: Some(("/*", "*/")),
    char_literals: true,
    multiline_strings: &[],
};

const JVM_LIKE: CommentSyntax = CommentSyntax {
    leader: "//",
    block: Some(("/*", "*/")),
    char_literals: true,
    multiline_strings: &["\"\"\""],
};

const JS_LIKE: CommentSyntax = CommentSyntax {
    leader: "//",
    block: Some(("/*", "*/")),
    char_literals: false,
    multiline_strings: &[],
};

const DASH: CommentSyntax = CommentSyntax {
    leader: "--",
    block: None,
    char_literals: false,
    multiline_strings: &[],
};

static TABLE: &[(&[&str], CommentSyntax)] = &[
    (&["py", "pyi", "toml"], PYTHON),
    (
        &["rb", "sh", "bash", "zsh", "pl", "r", "yaml", "yml", "nix", "ex", "exs"],
        HASH,
    ),
    (&["c", "h", "cc", "cpp", "hpp", "rs", "go", "cs"], C_LIKE),
    (&["java", "kt", "scala", "swift"], JVM_LIKE),
    (&["js", "jsx", "ts", "tsx", "dart", "php"], JS_LIKE),
    (&["sql", "lua", "hs"], DASH),
];

pub fn syntax_for_extension(ext: &str) -> Option<CommentSyntax> {
    let ext = ext.to_ascii_lowercase();
    TABLE
        .iter()
        .find(|(exts, _)| exts.contains(&ext.as_str()))
        .map(|(_, syntax)| *syntax)
}

pub fn syntax_for_path(path: &Path) -> Option<CommentSyntax> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(syntax_for_extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(syntax_for_extension("py"), Some(PYTHON));
        assert_eq!(syntax_for_extension("JS"), Some(JS_LIKE));
        assert_eq!(syntax_for_extension("rs"), Some(C_LIKE));
        assert_eq!(syntax_for_extension("sql"), Some(DASH));
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(syntax_for_extension("md"), None);
        assert_eq!(syntax_for_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_path_lookup() {
        let syntax = syntax_for_path(Path::new("tests/fixtures/utils.rb")).unwrap();
        assert_eq!(syntax.leader, "#");
        assert!(syntax.block.is_none());
        assert!(syntax.multiline_strings.is_empty());
    }

    #[test]
    fn test_quote_rules() {
        assert!(syntax_for_extension("rs").unwrap().char_literals);
        assert!(!syntax_for_extension("js").unwrap().char_literals);
        assert_eq!(syntax_for_extension("kt").unwrap().multiline_strings, &["\"\"\""]);
    }
}
