use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use suffix_tree::{SuffixTree, TreeConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "suffix-tree", about = "Build and query generalized suffix trees")]
struct Cli {
    /// Log more (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Validate the tree after every inserted string.
    #[arg(long, global = true)]
    validate: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Find every occurrence of the patterns among the lines of a file.
    Find {
        /// Text file, one string per line.
        input: PathBuf,
        /// Patterns to search for.
        #[arg(required = true)]
        patterns: Vec<String>,
    },
    /// Report which input files contain each pattern.
    Common {
        /// Input files, each one string.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Pattern to test (repeatable).
        #[arg(short, long = "pattern", required = true)]
        patterns: Vec<String>,
    },
    /// Print node counts of the tree over the lines of a file.
    Stats {
        /// Text file, one string per line.
        input: PathBuf,
    },
}

/// Input byte, or the terminator closing string `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Byte(u8),
    End(usize),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Find { input, patterns } => run_find(&input, &patterns, cli.validate)?,
        Commands::Common { inputs, patterns } => run_common(&inputs, &patterns, cli.validate)?,
        Commands::Stats { input } => run_stats(&input, cli.validate)?,
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_find(input: &Path, patterns: &[String], validate: bool) -> Result<()> {
    let strings = read_lines(input)?;
    let tree = build_tree(&strings, TreeConfig::plain().with_validation(validate))?;

    for pattern in patterns {
        let query = encode_pattern(pattern);
        let found = tree.find_all(&query);
        if found.is_empty() {
            println!("{}\tnot found", pattern);
            continue;
        }
        for occurrence in found {
            println!(
                "{}\tline {}\toffset {}",
                pattern,
                occurrence.string + 1,
                occurrence.offset
            );
        }
    }

    Ok(())
}

fn run_common(inputs: &[PathBuf], patterns: &[String], validate: bool) -> Result<()> {
    let mut strings = Vec::with_capacity(inputs.len());
    for (ordinal, path) in inputs.iter().enumerate() {
        let contents =
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        strings.push(encode(&contents, ordinal));
    }
    let config = TreeConfig::generalized(inputs.len()).with_validation(validate);
    let tree = build_tree(&strings, config)?;

    for pattern in patterns {
        let query = encode_pattern(pattern);
        let Some(position) = tree.find_suffix(&query) else {
            println!("{}\t0/{}", pattern, inputs.len());
            continue;
        };
        let bits = tree
            .membership(position.node())
            .context("membership missing on generalized tree")?;
        let files: Vec<String> = bits
            .ones()
            .map(|ordinal| inputs[ordinal].display().to_string())
            .collect();
        println!(
            "{}\t{}/{}\t{}",
            pattern,
            bits.total_set(),
            inputs.len(),
            files.join(",")
        );
    }

    Ok(())
}

fn run_stats(input: &Path, validate: bool) -> Result<()> {
    let strings = read_lines(input)?;
    let tree = build_tree(&strings, TreeConfig::plain().with_validation(validate))?;
    if !validate {
        tree.validate().context("tree failed validation")?;
    }

    let stats = tree.stats();
    println!("strings\t{}", stats.strings);
    println!("nodes\t{}", stats.nodes);
    println!("leaves\t{}", stats.leaves);
    println!("internal\t{}", stats.internal);
    println!("suffix_links\t{}", stats.suffix_links);

    Ok(())
}

fn build_tree(strings: &[Vec<Token>], config: TreeConfig) -> Result<SuffixTree<'_, Token>> {
    let mut tree = SuffixTree::new(config);
    for (ordinal, string) in strings.iter().enumerate() {
        tree.extend(string)
            .with_context(|| format!("failed to insert string {}", ordinal + 1))?;
    }
    info!(strings = strings.len(), nodes = tree.len(), "tree built");
    Ok(tree)
}

/// Non-empty lines of `path`, each closed by its own terminator.
fn read_lines(path: &Path) -> Result<Vec<Vec<Token>>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let strings: Vec<Vec<Token>> = contents
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(ordinal, line)| encode(line.as_bytes(), ordinal))
        .collect();
    if strings.is_empty() {
        bail!("{} holds no non-empty lines", path.display());
    }
    debug!(path = %path.display(), strings = strings.len(), "read input");
    Ok(strings)
}

fn encode(bytes: &[u8], ordinal: usize) -> Vec<Token> {
    bytes
        .iter()
        .map(|&byte| Token::Byte(byte))
        .chain(std::iter::once(Token::End(ordinal)))
        .collect()
}

fn encode_pattern(pattern: &str) -> Vec<Token> {
    pattern.bytes().map(Token::Byte).collect()
}
