//! The regular expression tree that generation walks.

use std::fmt;

/// A node of a parsed regular expression.
///
/// Nodes are plain data: building one by hand is as valid as getting one from
/// [`crate::Regex`]. Operators that take sub-expressions hold an ordered list of
/// children which are generated one after another (i.e. an implicit concatenation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Matches nothing. Generates nothing.
    NoMatch,
    /// Matches the empty string.
    EmptyMatch,
    /// A fixed sequence of characters.
    Literal(String),
    /// Inclusive `(lo, hi)` character ranges, sorted and non-overlapping.
    Class(Vec<(char, char)>),
    /// `.` without the `s` flag.
    AnyCharNotNl,
    /// `.` with the `s` flag.
    AnyChar,
    /// `^` in multi-line mode.
    BeginLine,
    /// `$` in multi-line mode.
    EndLine,
    /// `^` or `\A`.
    BeginText,
    /// `$` or `\z`.
    EndText,
    /// `\b`
    WordBoundary,
    /// `\B`
    NoWordBoundary,
    /// A capturing group. Transparent during generation.
    Capture {
        index: u32,
        name: Option<String>,
        subs: Vec<Node>,
    },
    /// `x*`
    Star(Vec<Node>),
    /// `x+`
    Plus(Vec<Node>),
    /// `x?`
    Quest(Vec<Node>),
    /// `x{min,max}`, where a `max` of `None` is unbounded.
    Repeat {
        min: u32,
        max: Option<u32>,
        subs: Vec<Node>,
    },
    Concat(Vec<Node>),
    Alternate(Vec<Node>),
}

impl Node {
    /// A literal run of characters.
    pub fn literal(s: impl Into<String>) -> Self {
        Self::Literal(s.into())
    }

    /// Returns the operator tag of this node.
    pub fn op(&self) -> Op {
        match self {
            Self::NoMatch => Op::NoMatch,
            Self::EmptyMatch => Op::EmptyMatch,
            Self::Literal(_) => Op::Literal,
            Self::Class(_) => Op::CharClass,
            Self::AnyCharNotNl => Op::AnyCharNotNl,
            Self::AnyChar => Op::AnyChar,
            Self::BeginLine => Op::BeginLine,
            Self::EndLine => Op::EndLine,
            Self::BeginText => Op::BeginText,
            Self::EndText => Op::EndText,
            Self::WordBoundary => Op::WordBoundary,
            Self::NoWordBoundary => Op::NoWordBoundary,
            Self::Capture { .. } => Op::Capture,
            Self::Star(_) => Op::Star,
            Self::Plus(_) => Op::Plus,
            Self::Quest(_) => Op::Quest,
            Self::Repeat { .. } => Op::Repeat,
            Self::Concat(_) => Op::Concat,
            Self::Alternate(_) => Op::Alternate,
        }
    }

    /// Returns the children of this node, empty for leaves.
    pub fn subs(&self) -> &[Node] {
        match self {
            Self::Capture { subs, .. }
            | Self::Star(subs)
            | Self::Plus(subs)
            | Self::Quest(subs)
            | Self::Repeat { subs, .. }
            | Self::Concat(subs)
            | Self::Alternate(subs) => subs,
            _ => &[],
        }
    }
}

/// The operator of a [`Node`], without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, enum_iterator::Sequence)]
pub enum Op {
    NoMatch,
    EmptyMatch,
    Literal,
    CharClass,
    AnyCharNotNl,
    AnyChar,
    BeginLine,
    EndLine,
    BeginText,
    EndText,
    WordBoundary,
    NoWordBoundary,
    Capture,
    Star,
    Plus,
    Quest,
    Repeat,
    Concat,
    Alternate,
}

impl Op {
    /// Every operator, in declaration order.
    pub fn all() -> impl Iterator<Item = Self> {
        enum_iterator::all::<Self>()
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoMatch => "no_match",
            Self::EmptyMatch => "empty_match",
            Self::Literal => "literal",
            Self::CharClass => "class",
            Self::AnyCharNotNl => "any_char_not_nl",
            Self::AnyChar => "any_char",
            Self::BeginLine => "begin_line",
            Self::EndLine => "end_line",
            Self::BeginText => "begin_text",
            Self::EndText => "end_text",
            Self::WordBoundary => "word_boundary",
            Self::NoWordBoundary => "no_word_boundary",
            Self::Capture => "capture",
            Self::Star => "star",
            Self::Plus => "plus",
            Self::Quest => "quest",
            Self::Repeat => "repeat",
            Self::Concat => "concat",
            Self::Alternate => "alternate",
        }
    }
}

fn fmt_w_name(name: &str, x: &[Node], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
        f,
        "{}({})",
        name,
        x.iter()
            .map(|x| x.to_string())
            .collect::<Vec<String>>()
            .join(", ")
    )
}

/// Pretty prints the tree, e.g. `concat("foo", repeat{4}(capture("-", alternate("bar", "baz"))))`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => write!(f, "{:?}", s),
            Self::Class(ranges) => {
                let ranges: Vec<String> = ranges
                    .iter()
                    .map(|&(lo, hi)| match lo == hi {
                        true => format!("{:?}", lo),
                        false => format!("{:?}-{:?}", lo, hi),
                    })
                    .collect();
                write!(f, "class[{}]", ranges.join(" "))
            }
            Self::Capture {
                name: Some(name),
                subs,
                ..
            } => fmt_w_name(&format!("capture<{}>", name), subs, f),
            Self::Repeat { min, max, subs } => {
                let name = match max {
                    Some(max) if max == min => format!("repeat{{{}}}", min),
                    Some(max) => format!("repeat{{{},{}}}", min, max),
                    None => format!("repeat{{{},}}", min),
                };
                fmt_w_name(&name, subs, f)
            }
            Self::Capture { subs, .. }
            | Self::Star(subs)
            | Self::Plus(subs)
            | Self::Quest(subs)
            | Self::Concat(subs)
            | Self::Alternate(subs) => fmt_w_name(self.op().as_str(), subs, f),
            leaf => f.write_str(leaf.op().as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn op_names_are_unique() {
        let names: HashSet<_> = Op::all().map(|op| op.as_str()).collect();
        assert_eq!(names.len(), Op::all().count());
    }

    #[test]
    fn display() {
        let node = Node::Concat(vec![
            Node::literal("foo"),
            Node::Repeat {
                min: 4,
                max: Some(4),
                subs: vec![Node::Capture {
                    index: 1,
                    name: None,
                    subs: vec![Node::Alternate(vec![
                        Node::literal("bar"),
                        Node::Class(vec![('a', 'c'), ('x', 'x')]),
                    ])],
                }],
            },
            Node::Star(vec![Node::AnyChar]),
            Node::EndText,
        ]);
        assert_eq!(
            node.to_string(),
            r#"concat("foo", repeat{4}(capture(alternate("bar", class['a'-'c' 'x']))), star(any_char), end_text)"#
        );

        let node = Node::Repeat {
            min: 2,
            max: None,
            subs: vec![Node::Capture {
                index: 1,
                name: Some("x".into()),
                subs: vec![Node::literal("x")],
            }],
        };
        assert_eq!(node.to_string(), r#"repeat{2,}(capture<x>("x"))"#);
    }

    #[test]
    fn subs_of_leaves_are_empty() {
        for node in [Node::NoMatch, Node::literal("abc"), Node::Class(vec![])] {
            assert!(node.subs().is_empty());
        }
        let node = Node::Quest(vec![Node::AnyChar, Node::EndLine]);
        assert_eq!(node.subs().len(), 2);
        assert_eq!(node.op(), Op::Quest);
    }
}
