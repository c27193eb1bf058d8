use crate::error::ErrorRepr;
use crate::{Error, Node, Output, Selector};

/// Whether generation should go on after a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// An end-of-text marker was reached. Nothing else is appended to the enclosing sequence.
    Stop,
}

/// Printable ASCII, `' '..='~'`. Stands in for "any character".
const PRINTABLE: u64 = 95;

const SURROGATES: (u32, u32) = (0xD800, 0xDFFF);

/// Writes a random string matching `node` to `out`.
///
/// # Parameters
/// `max_unbounded_repeat` is the most extra iterations an unbounded repetition
/// (`*`, `+`, `{m,}`) gets on top of its minimum.
///
/// # Errors
/// Word boundaries (`\b`, `\B`) are not supported, and a failing `selector` aborts
/// generation. In both cases `out` keeps whatever was written before the failure.
pub fn generate<O, S>(
    node: &Node,
    out: &mut O,
    selector: &mut S,
    max_unbounded_repeat: u32,
) -> Result<Flow, Error>
where
    O: Output + ?Sized,
    S: Selector + ?Sized,
{
    Generator {
        out,
        selector,
        max_unbounded_repeat,
    }
    .node(node)
}

struct Generator<'a, O: ?Sized, S: ?Sized> {
    out: &'a mut O,
    selector: &'a mut S,
    max_unbounded_repeat: u32,
}

impl<O: Output + ?Sized, S: Selector + ?Sized> Generator<'_, O, S> {
    fn node(&mut self, node: &Node) -> Result<Flow, Error> {
        match node {
            Node::NoMatch | Node::EmptyMatch | Node::BeginText => (),
            Node::Literal(s) => self.out.push_str(s),
            Node::Class(ranges) => self.class(ranges)?,
            Node::AnyCharNotNl => {
                let i = self.selector.uniform(PRINTABLE)?;
                self.out.push_char(printable(i));
            }
            Node::AnyChar => {
                // one slot past the printable window is a newline
                let i = self.selector.uniform(PRINTABLE + 1)?;
                let c = if i == PRINTABLE { '\n' } else { printable(i) };
                self.out.push_char(c);
            }
            Node::BeginLine => {
                if !self.out.is_empty() {
                    self.out.push_char('\n');
                }
            }
            Node::EndLine => {
                if self.out.is_empty() {
                    return Ok(Flow::Stop);
                }
                self.out.push_char('\n');
            }
            Node::EndText => return Ok(Flow::Stop),
            Node::WordBoundary | Node::NoWordBoundary => {
                return Err(Error(ErrorRepr::Unsupported(node.op())));
            }
            Node::Star(subs) => return self.repeat(0, None, subs),
            Node::Plus(subs) => return self.repeat(1, None, subs),
            Node::Repeat { min, max, subs } => return self.repeat(*min, *max, subs),
            Node::Quest(subs) => {
                if self.selector.coin()? {
                    return self.all(subs);
                }
            }
            Node::Concat(subs) | Node::Capture { subs, .. } => return self.all(subs),
            Node::Alternate(subs) => {
                let i = self.selector.uniform(subs.len() as u64)?;
                if let Some(sub) = subs.get(i as usize) {
                    return self.node(sub);
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// Generates each of `subs` in order, until one of them stops.
    fn all(&mut self, subs: &[Node]) -> Result<Flow, Error> {
        for sub in subs {
            if self.node(sub)? == Flow::Stop {
                return Ok(Flow::Stop);
            }
        }
        Ok(Flow::Continue)
    }

    /// Generates `subs` a uniformly chosen number of times in `[min, max]`.
    /// An unbounded `max` is `min + max_unbounded_repeat`.
    fn repeat(&mut self, min: u32, max: Option<u32>, subs: &[Node]) -> Result<Flow, Error> {
        let min = min as u64;
        let max = max.map_or(min + self.max_unbounded_repeat as u64, u64::from);
        let reps = min + self.selector.uniform(max.saturating_sub(min) + 1)?;
        for _ in 0..reps {
            if self.all(subs)? == Flow::Stop {
                return Ok(Flow::Stop);
            }
        }
        Ok(Flow::Continue)
    }

    /// Picks a member of `ranges` with every member equally likely, so wider ranges
    /// are picked proportionally more often.
    fn class(&mut self, ranges: &[(char, char)]) -> Result<(), Error> {
        let total: u64 = ranges.iter().map(|&(lo, hi)| width(lo, hi)).sum();
        if total == 0 {
            return Ok(());
        }
        let mut nth = self.selector.uniform(total)?;
        for &(lo, hi) in ranges {
            let w = width(lo, hi);
            if nth < w {
                self.out.push_char(nth_in_range(lo, nth));
                return Ok(());
            }
            nth -= w;
        }
        unreachable!("ordinal is below the total class width")
    }
}

fn printable(i: u64) -> char {
    char::from(b' ' + i as u8)
}

/// Number of `char`s in `lo..=hi`. Surrogates are not `char`s and don't count.
fn width(lo: char, hi: char) -> u64 {
    let (lo, hi) = (lo as u32, hi as u32);
    if hi < lo {
        return 0;
    }
    let overlap = hi.min(SURROGATES.1).saturating_add(1).saturating_sub(lo.max(SURROGATES.0));
    (hi - lo + 1 - overlap) as u64
}

/// The `nth` `char` counting from `lo`, skipping surrogates.
fn nth_in_range(lo: char, nth: u64) -> char {
    let mut c = lo as u32 + nth as u32;
    if (lo as u32) < SURROGATES.0 && c >= SURROGATES.0 {
        c += SURROGATES.1 - SURROGATES.0 + 1;
    }
    char::from_u32(c).unwrap_or(lo)
}
