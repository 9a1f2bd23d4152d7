pub mod convert;
pub mod parse;

use std::path::Path;

/// File name component of `path`, used as the statement's source name.
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
