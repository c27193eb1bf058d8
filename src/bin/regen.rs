//! Generates random strings matching regular expressions.
//!
//! Run with: `regen [OPTIONS] <PATTERN>...`

use std::io::{self, BufWriter, IsTerminal, Write};

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::{OsRng, StdRng};
use rand::SeedableRng;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use regen::{Config, Regex, Selector};

const AFTER_HELP: &str = "\
<PATTERN> must be a valid RE2-style regular expression, see
<https://docs.rs/regex/latest/regex/#syntax>.

Word boundaries (\\b, \\B) are not supported. `$` without (?m) ends the string.";

#[derive(Parser)]
#[command(name = "regen")]
#[command(about = "Generate random strings that match regular expressions")]
#[command(version, after_help = AFTER_HELP)]
struct Cli {
    /// Regular expressions to generate strings from
    #[arg(value_name = "PATTERN")]
    patterns: Vec<String>,

    /// The number of strings to generate per pattern
    #[arg(short, value_name = "NUMBER", default_value_t = 1)]
    n: u32,

    /// The max repetitions to use for unlimited repetitions
    #[arg(long, value_name = "REPETITIONS", default_value_t = 32)]
    max: u32,

    /// Interleave patterns instead of going pattern by pattern
    #[arg(long)]
    zip: bool,

    /// Match letters in either case
    #[arg(short = 'i', long)]
    case_insensitive: bool,

    /// Make ^ and $ match at line boundaries
    #[arg(short = 'm', long)]
    multi_line: bool,

    /// Let . produce newlines
    #[arg(short = 's', long)]
    dot_matches_new_line: bool,

    /// Disable Unicode classes and case folding
    #[arg(long)]
    no_unicode: bool,

    /// Seed a deterministic generator instead of using OS entropy
    #[arg(long)]
    seed: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            max_unbounded_repeat: self.max,
            case_insensitive: self.case_insensitive,
            multi_line: self.multi_line,
            dot_matches_new_line: self.dot_matches_new_line,
            unicode: !self.no_unicode,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    if cli.patterns.is_empty() {
        warn!("no pattern given");
        return Ok(());
    }

    // parse everything up front so a bad pattern fails before any output
    let regexes = compile(&cli.patterns, &cli.config())?;

    let mut selector: Box<dyn Selector> = match cli.seed {
        Some(seed) => {
            debug!(seed, "using seeded generator");
            Box::new(StdRng::seed_from_u64(seed))
        }
        None => Box::new(OsRng),
    };

    let stdout = io::stdout();
    let tty = stdout.is_terminal();
    let mut w = BufWriter::new(stdout.lock());
    write_strings(&mut w, &regexes, cli.n as usize, cli.zip, tty, &mut *selector)?;
    w.flush()?;
    Ok(())
}

fn compile<'a>(patterns: &'a [String], config: &Config) -> Result<Vec<(&'a str, Regex)>> {
    patterns
        .iter()
        .map(|p| {
            let regex = Regex::with_config(p, config)
                .with_context(|| format!("error parsing regular expression {:?}", p))?;
            Ok((p.as_str(), regex))
        })
        .collect()
}

/// Writes `n` strings per pattern separated by newlines, pattern by pattern or, with `zip`,
/// round by round. A trailing newline is only written to a terminal.
fn write_strings<W: Write>(
    w: &mut W,
    regexes: &[(&str, Regex)],
    n: usize,
    zip: bool,
    tty: bool,
    selector: &mut dyn Selector,
) -> Result<()> {
    let order: Vec<&(&str, Regex)> = if zip {
        (0..n).flat_map(|_| regexes.iter()).collect()
    } else {
        regexes
            .iter()
            .flat_map(|r| std::iter::repeat(r).take(n))
            .collect()
    };

    let mut buf = String::new();
    for (i, (pattern, regex)) in order.into_iter().enumerate() {
        if i > 0 {
            w.write_all(b"\n")?;
        }
        buf.clear();
        regex
            .generate_into(&mut buf, &mut *selector)
            .with_context(|| format!("error generating string for {:?}", pattern))?;
        w.write_all(buf.as_bytes())?;
    }

    if tty {
        w.write_all(b"\n")?;
    }
    Ok(())
}
