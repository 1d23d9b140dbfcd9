use std::path::PathBuf;

use bstr::BString;

use crate::digest::Digest;
use crate::storable::ObjectKind;

/// Failures while decoding the canonical bytes of an object.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed object header: {0}")]
    MalformedHeader(&'static str),

    #[error("invalid object size: {0:?}")]
    InvalidSize(BString),

    #[error("object declares {declared} bytes of content but {actual} follow the header")]
    TruncatedContent { declared: usize, actual: usize },

    #[error("malformed tree entry at offset {offset}: {reason}")]
    MalformedTreeEntry { offset: usize, reason: &'static str },

    #[error("malformed commit: {0}")]
    MalformedCommit(&'static str),

    #[error("unsupported object type: {0:?}")]
    UnsupportedObjectType(BString),
}

/// The bytes handed to the codec are not a valid zlib stream.
#[derive(Debug, thiserror::Error)]
#[error("invalid zlib stream")]
pub struct CorruptStream(#[source] pub std::io::Error);

/// Errors from the object store and everything built on it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("object not found: {oid:x}")]
    NotFound { oid: Digest },

    #[error("object {oid:x} could not be decompressed")]
    CorruptStream {
        oid: Digest,
        #[source]
        source: CorruptStream,
    },

    #[error("object {oid:x} is malformed")]
    Malformed {
        oid: Digest,
        #[source]
        source: ParseError,
    },

    #[error("object {oid:x} is a {actual}, expected a {expected}")]
    UnexpectedKind {
        oid: Digest,
        expected: ObjectKind,
        actual: ObjectKind,
    },

    #[error("not a repository (no object database found): '{}'", .path.display())]
    NotARepository { path: PathBuf },

    #[error("I/O failure at '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Attach the failing path to an [`std::io::Error`].
pub trait IoContext<T> {
    fn at_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn at_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| Error::Io {
            path: path.into(),
            source,
        })
    }
}
