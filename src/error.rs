use std::path::PathBuf;

use thiserror::Error;

/// File-level failures while loading an inflation table.
///
/// Row-level problems (an unparseable rate, a duplicate country) never show up
/// here; they drop the row and are recorded in the
/// [`LoadReport`](crate::data::model::LoadReport) instead.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The source does not exist or cannot be opened.
    #[error("data file '{}' is unavailable: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source opened but its structure could not be parsed.
    #[error("data file '{}' is malformed: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    /// The extension names a format we have no reader for.
    #[error("data file '{}' has unsupported extension '.{extension}'", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },
}

/// Coarse classification the presentation layer branches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unavailable,
    Malformed,
}

impl DatasetError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DatasetError::Unavailable { .. } => ErrorKind::Unavailable,
            DatasetError::Malformed { .. } | DatasetError::UnsupportedFormat { .. } => {
                ErrorKind::Malformed
            }
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, err: &anyhow::Error) -> Self {
        DatasetError::Malformed {
            path: path.into(),
            reason: format!("{err:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_format_counts_as_malformed() {
        let err = DatasetError::UnsupportedFormat {
            path: PathBuf::from("rates.numbers"),
            extension: "numbers".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Malformed);
        assert!(err.to_string().contains(".numbers"));
    }

    #[test]
    fn malformed_keeps_context_chain() {
        let inner = anyhow::anyhow!("expected 4 columns, found 3").context("reading CSV headers");
        let err = DatasetError::malformed("rates.csv", &inner);
        let msg = err.to_string();
        assert!(msg.contains("reading CSV headers"));
        assert!(msg.contains("expected 4 columns, found 3"));
    }
}
