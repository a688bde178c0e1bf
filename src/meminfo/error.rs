use std::path::PathBuf;

use crate::fsutil;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    FileRead(#[from] fsutil::FileReadError),
    #[error("failed to parse line in file `{path}`: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: super::parser::ParseError,
    },
    #[error("no `MemTotal` entry in file `{path}`")]
    MissingMemTotal { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;
