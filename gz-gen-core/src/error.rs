use std::path::PathBuf;

use thiserror::Error;

/// Failure to load the training corpus. Fatal at startup.
#[derive(Error, Debug)]
pub enum CorpusError {
	/// The file does not exist or could not be read.
	#[error("cannot read training file {}: {source}", path.display())]
	NotFound {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The file is not valid UTF-8 text.
	#[error("training file {} is not valid UTF-8: {source}", path.display())]
	Decode {
		path: PathBuf,
		#[source]
		source: std::string::FromUtf8Error,
	},
}

/// Failure while scoring a single candidate.
///
/// The first failing candidate aborts the whole ranking call.
#[derive(Error, Debug)]
pub enum ScoringError {
	/// The compressor rejected the candidate text.
	#[error("compression failed for candidate {word:?}: {source}")]
	Compression {
		word: String,
		#[source]
		source: std::io::Error,
	},
}

/// Invalid value passed to a `ScoringInput` setter.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
	#[error("compression level must be between 0 and 9, got {0}")]
	CompressionLevel(u32),

	#[error("thread count must be at most {max}, got {got}")]
	Threads { got: usize, max: usize },
}
