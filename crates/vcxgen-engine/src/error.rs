use std::path::PathBuf;

/// Errors produced while decoding, transforming or writing project documents.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed document: {0}")]
    MalformedDocument(String),
    #[error("Failed to write document: {0}")]
    SinkWrite(#[from] std::io::Error),
    #[error("Cannot resolve {path} relative to {root}")]
    PathResolution { path: PathBuf, root: PathBuf },
    #[error("Invalid identifier namespace {value:?}: {source}")]
    NamespaceParse { value: String, source: uuid::Error },
    #[error("Failed to read template {path}: {source}")]
    TemplateRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::MalformedDocument(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::MalformedDocument(err.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
