//! Line scanner for include directives.
//!
//! This is deliberately textual: it knows about `//` line comments and the
//! two delimiter styles, nothing about block comments, macros or `#if`.
use regex::Regex;

/// Include directive recognised on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `<...>`: an opaque leaf, never opened.
    System(String),
    /// `"..."`: resolved against the including file's directory.
    Local(String),
}

/// Outcome of scanning a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// No guard text, or the line is a `//` comment.
    Plain,
    Directive(Directive),
    /// Guard text present but followed by something that is neither `<...>` nor `"..."`.
    Malformed(String),
}

pub const DEFAULT_INCLUDE_GUARD: &str = "#include";
const COMMENT_MARKER: &str = "//";

#[derive(Debug)]
pub struct RegexPatterns {
    pub system: Regex,
    pub local: Regex,
}

impl RegexPatterns {
    #[allow(clippy::missing_panics_doc)]
    #[must_use]
    pub fn compile() -> Self {
        // Anchored on the leading token only; trailing text (e.g. a comment) is ignored
        let system = Regex::new(r"^<(?P<spec>[^<>]+)>").unwrap();
        let local = Regex::new(r#"^"(?P<spec>[^"]+)""#).unwrap();
        Self { system, local }
    }
}

impl Default for RegexPatterns {
    fn default() -> Self {
        Self::compile()
    }
}

#[derive(Debug)]
pub struct IncludeParser {
    guard: String,
    patterns: RegexPatterns,
}

impl Default for IncludeParser {
    fn default() -> Self {
        Self::new(DEFAULT_INCLUDE_GUARD)
    }
}

impl IncludeParser {
    #[must_use]
    pub fn new(guard: &str) -> Self {
        Self { guard: guard.to_string(), patterns: RegexPatterns::compile() }
    }

    #[must_use]
    pub fn guard(&self) -> &str {
        &self.guard
    }

    /// Classify one line. Only the first occurrence of the guard text is honoured.
    #[must_use]
    pub fn scan_line(&self, line: &str) -> LineKind {
        if line.trim_start().starts_with(COMMENT_MARKER) {
            return LineKind::Plain;
        }
        let Some(pos) = line.find(self.guard.as_str()) else {
            return LineKind::Plain;
        };
        let rest = line[pos + self.guard.len()..].trim();
        if let Some(cap) = self.patterns.system.captures(rest) {
            return LineKind::Directive(Directive::System(cap["spec"].trim().to_string()));
        }
        if let Some(cap) = self.patterns.local.captures(rest) {
            return LineKind::Directive(Directive::Local(cap["spec"].trim().to_string()));
        }
        LineKind::Malformed(rest.to_string())
    }

    /// Convenience wrapper over [`IncludeParser::scan_line`] that drops malformed lines.
    #[must_use]
    pub fn parse_line(&self, line: &str) -> Option<Directive> {
        match self.scan_line(line) {
            LineKind::Directive(d) => Some(d),
            LineKind::Plain | LineKind::Malformed(_) => None,
        }
    }

    /// All directives of `content`, in source order.
    #[must_use]
    pub fn parse_content(&self, content: &str) -> Vec<Directive> {
        content.lines().filter_map(|l| self.parse_line(l)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_and_angle_directives() {
        let p = IncludeParser::default();
        assert_eq!(p.parse_line("#include \"a.h\""), Some(Directive::Local("a.h".into())));
        assert_eq!(p.parse_line("#include <vector>"), Some(Directive::System("vector".into())));
        assert_eq!(
            p.parse_line("  #include   <SFML/Graphics.hpp>  "),
            Some(Directive::System("SFML/Graphics.hpp".into()))
        );
        assert_eq!(
            p.parse_line("#include \"meta/glutil.hpp\" // helpers"),
            Some(Directive::Local("meta/glutil.hpp".into()))
        );
    }

    #[test]
    fn test_line_comment_is_skipped() {
        let p = IncludeParser::default();
        assert_eq!(p.scan_line("// #include \"x.h\""), LineKind::Plain);
        assert_eq!(p.scan_line("    //#include <x>"), LineKind::Plain);
        // Code before the comment marker defeats the check
        assert_eq!(
            p.parse_line("int a; // #include \"x.h\""),
            Some(Directive::Local("x.h".into()))
        );
    }

    #[test]
    fn test_malformed_and_plain_lines() {
        let p = IncludeParser::default();
        assert_eq!(p.scan_line("int main() {}"), LineKind::Plain);
        assert_eq!(p.scan_line("#include BOOST_PP_ITERATE()"), LineKind::Malformed("BOOST_PP_ITERATE()".into()));
        assert_eq!(p.scan_line("#include \"\""), LineKind::Malformed("\"\"".into()));
        assert_eq!(p.scan_line("#include <>"), LineKind::Malformed("<>".into()));
        assert_eq!(p.parse_line("#include_next <stdlib.h>"), None);
    }

    #[test]
    fn test_only_first_guard_is_honoured() {
        let p = IncludeParser::default();
        let got = p.parse_line("#include \"a.h\" #include \"b.h\"");
        assert_eq!(got, Some(Directive::Local("a.h".into())));
    }

    #[test]
    fn test_custom_guard_text() {
        let p = IncludeParser::new("@import");
        assert_eq!(p.guard(), "@import");
        assert_eq!(p.parse_line("@import \"theme.css\";"), Some(Directive::Local("theme.css".into())));
        assert_eq!(p.parse_line("#include \"a.h\""), None);
    }

    #[test]
    fn test_parse_content_keeps_source_order() {
        let src = "#include <b>\n// #include \"skip.h\"\nint x;\n#include \"a.h\"\n";
        let got = IncludeParser::default().parse_content(src);
        assert_eq!(got, vec![Directive::System("b".into()), Directive::Local("a.h".into())]);
    }
}
