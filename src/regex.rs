use crate::{generate, Config, Error, Flow, FromUnstructured, Node, Output, Selector};

use arbitrary::Unstructured;
use regex_syntax::hir::{self, Class, Dot, Hir, HirKind, Look};
use std::{fmt, str::FromStr};
use tracing::{debug, trace};

/// A parsed regular expression that produces random matching strings.
///
/// # Implementation
/// ## Construction
/// - `regex-syntax` parses the pattern into its high-level IR (`Hir`), honoring the flags in [`Config`].
/// - The `Hir` is lowered to a [`Node`] tree. `.` and `[^\n]` become the "any character" operators,
///   other classes keep their ranges, and repetitions are split into `*`, `+`, `?` and `{m,n}`.
///
/// ## Generation
/// A [`Selector`] makes every random choice while [`generate`] walks the tree and writes to
/// an [`Output`]. End-of-text markers (`$` without `(?m)`, `\z`) end generation early, keeping
/// whatever was written so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regex {
    node: Node,
    max_unbounded_repeat: u32,
}

impl Regex {
    /// Parses `pattern` with the default [`Config`].
    pub fn new(pattern: &str) -> Result<Self, Error> {
        Self::with_config(pattern, &Config::default())
    }

    /// Parses `pattern` with the flags and repetition ceiling in `config`.
    pub fn with_config(pattern: &str, config: &Config) -> Result<Self, Error> {
        let hir = config.parser().parse(pattern)?;
        debug!(
            pattern,
            max_unbounded_repeat = config.max_unbounded_repeat,
            "compiled pattern"
        );
        Ok(Self::from_hir(&hir, config))
    }

    /// Builds from an expression that was already parsed by `regex-syntax`.
    pub fn from_hir(hir: &Hir, config: &Config) -> Self {
        Self::from_node(Node::from(hir), config.max_unbounded_repeat)
    }

    /// Wraps a hand-built tree.
    pub fn from_node(node: Node, max_unbounded_repeat: u32) -> Self {
        Self {
            node,
            max_unbounded_repeat,
        }
    }

    /// The lowered expression tree.
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Returns a new random string matching this expression.
    ///
    /// On error nothing is returned, since the output may have been cut off mid-construct.
    pub fn generate<O: Output, S: Selector + ?Sized>(&self, selector: &mut S) -> Result<O, Error> {
        let mut out = O::new();
        self.generate_into(&mut out, selector)?;
        Ok(out)
    }

    /// Appends a random string matching this expression to `out`.
    ///
    /// Unlike [`Regex::generate`], whatever was written before an error stays in `out`.
    pub fn generate_into<O, S>(&self, out: &mut O, selector: &mut S) -> Result<(), Error>
    where
        O: Output + ?Sized,
        S: Selector + ?Sized,
    {
        if generate(&self.node, out, selector, self.max_unbounded_repeat)? == Flow::Stop {
            trace!("reached end of text");
        }
        Ok(())
    }

    /// Returns a string driven by fuzzer input, for use in `Arbitrary` implementations.
    ///
    /// Expressions that can't be generated, e.g. ones with word boundaries, are
    /// reported as `IncorrectFormat`.
    pub fn arbitrary<O: Output>(&self, u: &mut Unstructured<'_>) -> arbitrary::Result<O> {
        self.generate(&mut FromUnstructured(u))
            .map_err(|_| arbitrary::Error::IncorrectFormat)
    }
}

/// Pretty prints the expression tree.
impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node.fmt(f)
    }
}

impl FromStr for Regex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<&Hir> for Node {
    fn from(hir: &Hir) -> Self {
        match hir.kind() {
            HirKind::Empty => Self::EmptyMatch,
            HirKind::Literal(hir::Literal(bytes)) => match std::str::from_utf8(bytes) {
                Ok(s) => Self::Literal(s.to_owned()),
                // Byte literals from `(?-u)`.
                Err(_) => Self::Literal(bytes.iter().map(|&b| char::from(b)).collect()),
            },
            HirKind::Class(class) => from_class(hir, class),
            HirKind::Look(look) => from_look(*look),
            HirKind::Repetition(rep) => {
                let subs = vec![Self::from(&*rep.sub)];
                match (rep.min, rep.max) {
                    (0, None) => Self::Star(subs),
                    (1, None) => Self::Plus(subs),
                    (0, Some(1)) => Self::Quest(subs),
                    (min, max) => Self::Repeat { min, max, subs },
                }
            }
            HirKind::Capture(cap) => Self::Capture {
                index: cap.index,
                name: cap.name.as_deref().map(String::from),
                subs: vec![Self::from(&*cap.sub)],
            },
            HirKind::Concat(x) => Self::Concat(x.iter().map(Self::from).collect()),
            HirKind::Alternation(x) => Self::Alternate(x.iter().map(Self::from).collect()),
        }
    }
}

fn from_class(hir: &Hir, class: &Class) -> Node {
    let is = |dot: Dot| *hir == Hir::dot(dot);
    if is(Dot::AnyCharExceptLF)
        || is(Dot::AnyCharExceptCRLF)
        || is(Dot::AnyByteExceptLF)
        || is(Dot::AnyByteExceptCRLF)
    {
        return Node::AnyCharNotNl;
    }
    if is(Dot::AnyChar) || is(Dot::AnyByte) {
        return Node::AnyChar;
    }

    let ranges: Vec<(char, char)> = match class {
        Class::Unicode(c) => c.ranges().iter().map(|r| (r.start(), r.end())).collect(),
        Class::Bytes(c) => c
            .ranges()
            .iter()
            .map(|r| (char::from(r.start()), char::from(r.end())))
            .collect(),
    };
    match ranges.is_empty() {
        true => Node::NoMatch,
        false => Node::Class(ranges),
    }
}

fn from_look(look: Look) -> Node {
    match look {
        Look::Start => Node::BeginText,
        Look::End => Node::EndText,
        Look::StartLF | Look::StartCRLF => Node::BeginLine,
        Look::EndLF | Look::EndCRLF => Node::EndLine,
        Look::WordAsciiNegate | Look::WordUnicodeNegate => Node::NoWordBoundary,
        _ => Node::WordBoundary,
    }
}
