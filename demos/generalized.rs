//! Build a generalized suffix tree over a few words and ask which of them
//! share some substrings.
//!
//! Run with `RUST_LOG=debug cargo run --example generalized` to see the
//! construction log.

use anyhow::Result;
use suffix_tree::SuffixTree;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let words: [&[u8]; 3] = [b"xabxa$", b"babxba#", b"abba%"];
    let mut tree = SuffixTree::generalized(words.len());
    for word in words {
        tree.extend(word)?;
    }
    tree.validate()?;

    for query in [&b"ab"[..], b"bx", b"bb", b"xa", b"q"] {
        match tree.find_suffix(query) {
            Some(position) => {
                let bits = tree.membership(position.node())?;
                let owners: Vec<String> = bits
                    .ones()
                    .map(|ordinal| String::from_utf8_lossy(words[ordinal]).into_owned())
                    .collect();
                println!(
                    "{:>3}: {} of {} ({})",
                    String::from_utf8_lossy(query),
                    bits.total_set(),
                    words.len(),
                    owners.join(", ")
                );
            }
            None => println!("{:>3}: absent", String::from_utf8_lossy(query)),
        }
    }

    let stats = tree.stats();
    println!(
        "{} nodes ({} leaves, {} internal, {} suffix links)",
        stats.nodes, stats.leaves, stats.internal, stats.suffix_links
    );
    Ok(())
}
