//! Line patterns used to locate structure in raw document text.
//!
//! Patterns are compiled once per configuration and passed explicitly to
//! every function that scans text. Each matcher is independent and only
//! reports offsets; none of them keeps state between documents.

use crate::IndexerError;
use regex::Regex;

/// Marker line closing the generated header when none is configured.
pub const DEFAULT_HEADER_END_MARKER: &str = "//header end";

/// Options that shape the compiled patterns.
#[derive(Debug, Clone)]
pub struct PatternOptions {
    /// Text of the line that ends the header region
    pub header_end_marker: String,
    /// Also accept headings hidden behind a `//` comment prefix
    pub commented_headings: bool,
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            header_end_marker: DEFAULT_HEADER_END_MARKER.to_string(),
            commented_headings: false,
        }
    }
}

/// Compiled line patterns for one configuration.
#[derive(Debug, Clone)]
pub struct Patterns {
    heading: Regex,
    alias: Regex,
    header_end: Regex,
    header_end_marker: String,
}

impl Patterns {
    /// Compile the patterns for the given options.
    pub fn new(options: &PatternOptions) -> Result<Self, IndexerError> {
        let marker = options.header_end_marker.trim();
        if marker.is_empty() || marker.contains('\n') {
            return Err(IndexerError::InvalidMarker(
                options.header_end_marker.clone(),
            ));
        }

        let heading = if options.commented_headings {
            Regex::new(r"(?m)^(?://[ \t]*)?={1,5}[ \t]+(.+)$")?
        } else {
            Regex::new(r"(?m)^={1,5}[ \t]+(.+)$")?
        };
        let alias = Regex::new(r"(?m)^// *ALIAS:(.+)$")?;
        let header_end = Regex::new(&format!(r"(?m)^[ \t]*{}[ \t]*\r?$", regex::escape(marker)))?;

        Ok(Self {
            heading,
            alias,
            header_end,
            header_end_marker: marker.to_string(),
        })
    }

    /// The marker line text, as written when a header is first inserted.
    pub fn header_end_marker(&self) -> &str {
        &self.header_end_marker
    }

    /// First heading in the content: its line offset and trimmed text.
    pub fn find_title(&self, content: &str) -> Option<(usize, String)> {
        let caps = self.heading.captures(content)?;
        let start = caps.get(0)?.start();
        let title = caps.get(1)?.as_str().trim().to_string();
        Some((start, title))
    }

    /// Alias declarations starting strictly before `before`, in source order.
    pub fn find_aliases(&self, content: &str, before: usize) -> Vec<String> {
        self.alias
            .captures_iter(content)
            .take_while(|caps| caps.get(0).map_or(false, |m| m.start() < before))
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .collect()
    }

    /// Offset of the first header-end marker line, anywhere in the content.
    pub fn find_header_end(&self, content: &str) -> Option<usize> {
        self.header_end.find(content).map(|m| m.start())
    }

    /// Whether a single line is an alias declaration.
    pub fn is_alias_line(&self, line: &str) -> bool {
        self.alias.is_match(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> Patterns {
        Patterns::new(&PatternOptions::default()).unwrap()
    }

    #[test]
    fn test_find_title_uses_first_heading() {
        let content = "// comment\n= Lorem \n\n== Section\n";
        let (start, title) = patterns().find_title(content).unwrap();
        assert_eq!(title, "Lorem");
        assert_eq!(start, "// comment\n".len());
    }

    #[test]
    fn test_find_title_accepts_levels_one_to_five() {
        assert!(patterns().find_title("===== Deep\n").is_some());
        assert!(patterns().find_title("====== Too deep\n").is_none());
        assert!(patterns().find_title("====\nblock\n====\n").is_none());
    }

    #[test]
    fn test_find_title_trims_crlf() {
        let (_, title) = patterns().find_title("= Windows\r\nbody\r\n").unwrap();
        assert_eq!(title, "Windows");
    }

    #[test]
    fn test_commented_headings_are_opt_in() {
        let content = "//= Hidden\n";
        assert!(patterns().find_title(content).is_none());

        let options = PatternOptions {
            commented_headings: true,
            ..PatternOptions::default()
        };
        let (_, title) = Patterns::new(&options).unwrap().find_title(content).unwrap();
        assert_eq!(title, "Hidden");
    }

    #[test]
    fn test_find_aliases_stops_at_title() {
        let content = "//ALIAS: lorem\n// ALIAS: finibus lorem\n= Lorem\n//ALIAS: late\n";
        let p = patterns();
        let (start, _) = p.find_title(content).unwrap();
        assert_eq!(p.find_aliases(content, start), vec!["lorem", "finibus lorem"]);
    }

    #[test]
    fn test_find_header_end_matches_whole_line() {
        let p = patterns();
        let content = "a\n  //header end  \nb\n";
        assert_eq!(p.find_header_end(content), Some(2));
        assert_eq!(p.find_header_end("x //header end\n"), None);
        assert_eq!(p.find_header_end("//header ending\n"), None);
    }

    #[test]
    fn test_header_end_marker_is_escaped() {
        let options = PatternOptions {
            header_end_marker: "// end (header) [*]".to_string(),
            ..PatternOptions::default()
        };
        let p = Patterns::new(&options).unwrap();
        assert_eq!(p.find_header_end("// end (header) [*]\n"), Some(0));
        assert_eq!(p.find_header_end("// end header *\n"), None);
    }

    #[test]
    fn test_empty_marker_is_rejected() {
        let options = PatternOptions {
            header_end_marker: "   ".to_string(),
            ..PatternOptions::default()
        };
        assert!(matches!(
            Patterns::new(&options),
            Err(IndexerError::InvalidMarker(_))
        ));
    }
}
