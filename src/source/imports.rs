use regex_lite::Regex;
use std::sync::OnceLock;

/// An import path found in source text, located by line and character columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportMatch {
    /// Zero-based line index.
    pub line: usize,
    /// Character column of the first character of the path (inside the quotes).
    pub start_col: usize,
    /// Character column one past the last character of the path.
    pub end_col: usize,
    pub path: String,
}

fn import_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // import "p"; | import "p" as X; | import * as X from "p"; | import {A} from "p";
        Regex::new(r#"\bimport\s+(?:[^;"']*?\bfrom\s+)?["']([^"'\n]+)["']"#)
            .expect("import pattern is valid")
    })
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    Code,
    Str(char),
    LineComment,
    BlockComment,
}

/// Blank out `//` and `/* */` comments, one space per character, so line and
/// character positions are unchanged. Quoted strings are left alone.
fn mask_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut state = Lexeme::Code;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match state {
            Lexeme::Code => match ch {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    out.push_str("  ");
                    state = Lexeme::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    out.push_str("  ");
                    state = Lexeme::BlockComment;
                }
                '"' | '\'' => {
                    out.push(ch);
                    state = Lexeme::Str(ch);
                }
                _ => out.push(ch),
            },
            Lexeme::Str(quote) => {
                out.push(ch);
                if ch == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if ch == quote || ch == '\n' {
                    state = Lexeme::Code;
                }
            }
            Lexeme::LineComment => {
                if ch == '\n' {
                    out.push(ch);
                    state = Lexeme::Code;
                } else {
                    out.push(' ');
                }
            }
            Lexeme::BlockComment => {
                if ch == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    out.push_str("  ");
                    state = Lexeme::Code;
                } else if ch == '\n' {
                    out.push(ch);
                } else {
                    out.push(' ');
                }
            }
        }
    }
    out
}

/// Find the quoted path of every import statement in `text`, skipping
/// imports that are commented out.
pub fn scan_imports(text: &str) -> Vec<ImportMatch> {
    let masked = mask_comments(text);
    let text = masked.as_str();
    import_regex()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| {
            let before = &text[..m.start()];
            let line = before.matches('\n').count();
            let line_start = before.rfind('\n').map(|pos| pos + 1).unwrap_or(0);
            let start_col = text[line_start..m.start()].chars().count();
            let end_col = start_col + m.as_str().chars().count();
            ImportMatch {
                line,
                start_col,
                end_col,
                path: m.as_str().to_string(),
            }
        })
        .collect()
}

fn is_relative(import_path: &str) -> bool {
    import_path == "."
        || import_path == ".."
        || import_path.starts_with("./")
        || import_path.starts_with("../")
}

fn push_segments<'a>(segments: &mut Vec<&'a str>, path: &'a str) {
    for seg in path.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
}

/// Compute the path of the file named by `import_path` as written in
/// `current_file`.
///
/// Relative imports are resolved against the directory of `current_file`;
/// `..` never climbs above the root. Other imports are already rooted and are
/// only normalised.
pub fn resolve_import_path(current_file: &str, import_path: &str) -> String {
    let mut segments = Vec::new();
    let rooted = if is_relative(import_path) {
        if let Some((dir, _)) = current_file.rsplit_once('/') {
            push_segments(&mut segments, dir);
        }
        current_file.starts_with('/')
    } else {
        import_path.starts_with('/')
    };
    push_segments(&mut segments, import_path);

    let joined = segments.join("/");
    if rooted { format!("/{joined}") } else { joined }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_parent_directory() {
        assert_eq!(
            resolve_import_path("contracts/a/b/Foo.sol", "../Bar.sol"),
            "contracts/a/Bar.sol"
        );
    }

    #[test]
    fn test_resolve_current_directory() {
        assert_eq!(
            resolve_import_path("contracts/a/b/Foo.sol", "./Baz.sol"),
            "contracts/a/b/Baz.sol"
        );
    }

    #[test]
    fn test_resolve_nested_segments() {
        assert_eq!(
            resolve_import_path("contracts/a/b/Foo.sol", "../../x/./y/../Z.sol"),
            "contracts/x/Z.sol"
        );
    }

    #[test]
    fn test_resolve_clamps_at_root() {
        assert_eq!(resolve_import_path("a/Foo.sol", "../../../B.sol"), "B.sol");
        assert_eq!(resolve_import_path("/a/Foo.sol", "../../B.sol"), "/B.sol");
    }

    #[test]
    fn test_resolve_file_at_top_level() {
        assert_eq!(resolve_import_path("A.sol", "./B.sol"), "B.sol");
    }

    #[test]
    fn test_resolve_rooted_imports_are_normalised() {
        assert_eq!(
            resolve_import_path(
                "contracts/Token.sol",
                "@openzeppelin/contracts/token/ERC20/ERC20.sol"
            ),
            "@openzeppelin/contracts/token/ERC20/ERC20.sol"
        );
        assert_eq!(resolve_import_path("x/Y.sol", "/lib//./A.sol"), "/lib/A.sol");
    }

    #[test]
    fn test_scan_simple_import() {
        let found = scan_imports("pragma solidity ^0.8.0;\nimport \"./B.sol\";\n");
        assert_eq!(
            found,
            vec![ImportMatch {
                line: 1,
                start_col: 8,
                end_col: 15,
                path: "./B.sol".to_string(),
            }]
        );
    }

    #[test]
    fn test_scan_all_import_forms() {
        let text = "\
import \"./A.sol\";
import './B.sol' as B;
import * as C from \"../C.sol\";
import {D, E as F} from '@lib/D.sol';
import {
    G
} from \"./G.sol\";
";
        let paths: Vec<String> = scan_imports(text).into_iter().map(|m| m.path).collect();
        assert_eq!(
            paths,
            vec!["./A.sol", "./B.sol", "../C.sol", "@lib/D.sol", "./G.sol"]
        );
    }

    #[test]
    fn test_scan_reports_line_of_path_for_multiline_import() {
        let text = "import {\n    G\n} from \"./G.sol\";";
        let found = scan_imports(text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 2);
        assert_eq!(found[0].start_col, 8);
        assert_eq!(found[0].end_col, 15);
    }

    #[test]
    fn test_scan_skips_commented_imports() {
        let text = "\
// import \"./A.sol\";
/* import {X} from \"./X.sol\";
   import \"./Y.sol\"; */
import \"./B.sol\"; // import \"./C.sol\";
string constant URL = \"http://x\"; import \"./D.sol\";
";
        let found = scan_imports(text);
        let paths: Vec<&str> = found.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(paths, vec!["./B.sol", "./D.sol"]);
        assert_eq!(found[0].line, 3);
        assert_eq!(found[0].start_col, 8);
        assert_eq!(found[1].line, 4);
    }

    #[test]
    fn test_mask_comments_keeps_positions() {
        let text = "a /* 注 */ b // c\nd";
        let masked = mask_comments(text);
        assert_eq!(masked.chars().count(), text.chars().count());
        assert_eq!(masked, "a         b     \nd");
    }

    #[test]
    fn test_scan_ignores_non_imports() {
        let text = "contract reimport { string s = \"./A.sol\"; }";
        assert!(scan_imports(text).is_empty());
    }
}
