use std::io::{self, Write};

use gz_gen_core::ScoredCandidate;

/// How a submitted line's ranking is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `1. word, Compressed Size: 123` lines followed by a blank line.
    Text,
    /// One JSON array of `{"word", "compressed_size"}` objects per line.
    Json,
}

/// Writes the top of a ranking, best first.
pub fn write_listing<W: Write>(
    out: &mut W,
    candidates: &[ScoredCandidate],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            for (rank, candidate) in candidates.iter().enumerate() {
                writeln!(
                    out,
                    "{}. {}, Compressed Size: {}",
                    rank + 1,
                    candidate.word,
                    candidate.compressed_size
                )?;
            }
            writeln!(out)?;
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, candidates)?;
            writeln!(out)?;
        }
    }
    out.flush()
}
