use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use gz_gen_core::{ContextMode, Corpus, Scorer, ScoringInput, WordTokenizer};

use crate::render::OutputFormat;
use crate::shell::{Shell, ShellOptions};

mod editor;
mod render;
mod shell;

/// Predicts the next word of a sentence: the vocabulary word whose addition
/// gzips smallest after the training text wins.
#[derive(Parser, Debug)]
#[command(name = "gz-gen", version, about)]
struct Args {
    /// UTF-8 training text. Parenthetical spans are ignored.
    training_file: PathBuf,

    /// Number of ranked words printed after each line.
    #[arg(short = 'k', long, default_value_t = 5)]
    top_k: usize,

    /// Gzip compression level (0-9).
    #[arg(short, long, default_value_t = ScoringInput::DEFAULT_COMPRESSION_LEVEL)]
    level: u32,

    /// Scoring threads; 0 uses one per CPU.
    #[arg(short, long, default_value_t = 0)]
    threads: usize,

    /// Compress only the prompt and the candidate, not the training text.
    #[arg(long)]
    prompt_only: bool,

    /// Listing format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Never show the best word while typing.
    #[arg(long)]
    no_inline: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut input = ScoringInput::default();
    input.set_compression_level(args.level)?;
    input.set_threads(args.threads)?;
    if args.prompt_only {
        input.context_mode = ContextMode::PromptOnly;
    }

    let corpus = Corpus::load(&args.training_file, &WordTokenizer)?;
    if corpus.vocabulary().is_empty() {
        log::warn!("{} has no words; nothing can be predicted", args.training_file.display());
    }
    let scorer = Scorer::new(corpus, WordTokenizer, input);

    let options = ShellOptions {
        top_k: args.top_k,
        format: args.format,
        inline: !args.no_inline,
    };
    let interactive = io::stdin().is_terminal() && io::stdout().is_terminal();

    println!("Enter a sentence to predict the next word ->");
    let mut shell = Shell::new(&scorer, options);
    if interactive && options.inline {
        shell.run_terminal()?;
    } else {
        shell.run_lines(io::stdin().lock(), &mut io::stdout().lock(), interactive)?;
    }
    Ok(())
}
