use std::fs;
use std::path::Path;

use crate::error::CorpusError;

/// Reads a whole text file as strict UTF-8.
///
/// - Missing or unreadable file → `CorpusError::NotFound`
/// - Invalid UTF-8 → `CorpusError::Decode`
pub(crate) fn read_text<P: AsRef<Path>>(filename: P) -> Result<String, CorpusError> {
	let path = filename.as_ref();
	let bytes = fs::read(path).map_err(|source| CorpusError::NotFound {
		path: path.to_path_buf(),
		source,
	})?;
	String::from_utf8(bytes).map_err(|source| CorpusError::Decode {
		path: path.to_path_buf(),
		source,
	})
}
