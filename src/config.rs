/// Options for parsing a pattern and generating strings from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The most extra iterations an unbounded repetition (`*`, `+`, `{m,}`) gets on top of
    /// its minimum. With `0`, unbounded repetitions always repeat exactly their minimum.
    pub max_unbounded_repeat: u32,

    /// `(?i)`: literals and classes match either case.
    pub case_insensitive: bool,

    /// `(?m)`: `^` and `$` match at line boundaries instead of only at the ends of the text.
    pub multi_line: bool,

    /// `(?s)`: `.` can generate a newline.
    pub dot_matches_new_line: bool,

    /// `(?u)`: classes and case folding are Unicode aware.
    ///
    /// Without it, classes and escapes work on bytes, so `.`, `[^a]` and `\xFF` are accepted
    /// and bytes above `0x7F` are generated as the Latin-1 character with the same value.
    pub unicode: bool,
}

impl Config {
    pub(crate) fn parser(&self) -> regex_syntax::Parser {
        regex_syntax::ParserBuilder::new()
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_matches_new_line)
            .unicode(self.unicode)
            .utf8(self.unicode)
            .build()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_unbounded_repeat: 32,
            case_insensitive: false,
            multi_line: false,
            dot_matches_new_line: false,
            unicode: true,
        }
    }
}
