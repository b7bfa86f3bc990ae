use std::path::{Path, PathBuf};

pub type FolioResult<T> = Result<T, FolioError>;

#[derive(thiserror::Error, Debug)]
pub enum FolioError {
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },
    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialise config")]
    Serialise(#[from] toml::ser::Error),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl FolioError {
    pub fn io_with_context(source: std::io::Error, context: impl Into<String>) -> Self {
        Self::Io {
            source,
            context: context.into(),
        }
    }

    pub fn parse(path: &Path, source: toml::de::Error) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// Read a TOML file into `T`.  Shared by the config and content loaders.
pub fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> FolioResult<T> {
    if !path.is_file() {
        return Err(FolioError::invalid_argument(format!(
            "not a regular file: {}",
            path.display()
        )));
    }
    let raw = std::fs::read_to_string(path).map_err(|source| {
        FolioError::io_with_context(source, format!("failed to read {}", path.display()))
    })?;
    toml::from_str(&raw).map_err(|source| FolioError::parse(path, source))
}

#[cfg(test)]
mod tests {
    use super::FolioError;

    #[test]
    fn io_error_keeps_context_and_source() {
        let err = FolioError::io_with_context(
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            "failed to read content.toml",
        );
        assert_eq!(err.to_string(), "I/O error: failed to read content.toml");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn reading_a_directory_is_rejected() {
        let err = super::read_toml::<toml::Table>(&std::env::temp_dir())
            .expect_err("directories are not config files");
        assert!(matches!(err, FolioError::InvalidArgument(_)));
    }
}
