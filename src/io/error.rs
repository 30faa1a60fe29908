use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "I/O error for {path_desc}: {source}",
        path_desc = PathDisplay(path)
    )]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "failed to parse frame {path_desc}: {details} (line {line}, column {column})",
        path_desc = PathDisplay(path)
    )]
    Parse {
        path: Option<PathBuf>,
        line: usize,
        column: usize,
        details: String,
    },

    #[error(
        "inconsistent data in frame {path_desc}: {details}",
        path_desc = PathDisplay(path)
    )]
    InconsistentData {
        path: Option<PathBuf>,
        details: String,
    },
}

impl Error {
    pub fn from_io(source: std::io::Error, path: Option<PathBuf>) -> Self {
        Self::Io { path, source }
    }

    /// Maps a JSON decoding error, keeping its position; read failures stay I/O errors.
    pub fn from_json(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        if source.is_io() {
            let kind = source.io_error_kind().unwrap_or(std::io::ErrorKind::Other);
            return Self::Io {
                path,
                source: std::io::Error::new(kind, source),
            };
        }
        Self::Parse {
            path,
            line: source.line(),
            column: source.column(),
            details: source.to_string(),
        }
    }

    pub fn inconsistent_data(path: Option<PathBuf>, details: impl Into<String>) -> Self {
        Self::InconsistentData {
            path,
            details: details.into(),
        }
    }

    /// Attaches the file the frame was read from.
    pub fn with_path(self, file: impl Into<PathBuf>) -> Self {
        let file = Some(file.into());
        match self {
            Self::Io { source, .. } => Self::Io { path: file, source },
            Self::Parse {
                line,
                column,
                details,
                ..
            } => Self::Parse {
                path: file,
                line,
                column,
                details,
            },
            Self::InconsistentData { details, .. } => Self::InconsistentData {
                path: file,
                details,
            },
        }
    }
}

struct PathDisplay<'a>(&'a Option<PathBuf>);

impl<'a> fmt::Display for PathDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(p) => write!(f, "file '{}'", p.display()),
            None => write!(f, "stream source"),
        }
    }
}
