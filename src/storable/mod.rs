//! The three object kinds and their canonical byte layout.
//!
//! Every object is stored as `"{type} {len}\0{content}"`, where `len` is the length of
//! `content` in bytes. The SHA-1 of exactly these bytes is the object's id.

pub mod blob;
pub mod commit;
mod header;
pub mod tree;

use std::fmt::Display;

use crate::digest::Digest;
use crate::error::ParseError;

use blob::Blob;
use commit::Commit;
use tree::Tree;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    Blob,
    Tree,
    Commit,
}

impl ObjectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Blob => "blob",
            ObjectKind::Tree => "tree",
            ObjectKind::Commit => "commit",
        }
    }

    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"blob" => Some(ObjectKind::Blob),
            b"tree" => Some(ObjectKind::Tree),
            b"commit" => Some(ObjectKind::Commit),
            _ => None,
        }
    }
}

impl Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait Storable {
    fn kind(&self) -> ObjectKind;

    /// Length of the content, not counting the `"{type} {len}\0"` header.
    fn encoded_size(&self) -> usize;

    /// Append the content (without header) to `out`.
    fn write_content(&self, out: &mut Vec<u8>);

    /// Returns the storable uncompressed but formatted `"{type} {len}\0{data}"`.
    /// e.g.
    /// a blob `"hello\n"` becomes `"blob 6\0hello\n"`
    fn format(&self) -> Vec<u8> {
        let size = self.encoded_size();
        let mut formatted = Vec::with_capacity(size + 16);
        formatted.extend_from_slice(self.kind().as_str().as_bytes());
        formatted.push(b' ');
        formatted.extend_from_slice(size.to_string().as_bytes());
        formatted.push(b'\0');

        let header_len = formatted.len();
        self.write_content(&mut formatted);
        debug_assert_eq!(formatted.len() - header_len, size);

        formatted
    }
}

/// An object together with its formatted bytes and the id derived from them.
pub struct DatabaseObject<'a, T: Storable + ?Sized> {
    inner: &'a T,
    formatted: Vec<u8>,
    oid: Digest,
}

impl<'a, T: Storable + ?Sized> DatabaseObject<'a, T> {
    pub fn new(inner: &'a T) -> Self {
        let formatted = inner.format();
        let oid = Digest::new(&formatted);
        Self {
            inner,
            formatted,
            oid,
        }
    }

    pub fn formatted(&self) -> &[u8] {
        &self.formatted
    }

    pub fn oid(&self) -> &Digest {
        &self.oid
    }

    pub fn into_oid(self) -> Digest {
        self.oid
    }

    pub fn kind(&self) -> ObjectKind {
        self.inner.kind()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
}

impl Object {
    /// Parse the decompressed bytes of an object, header included.
    pub fn parse(bytes: &[u8]) -> Result<Self, ParseError> {
        let (tag, content) = header::parse(bytes)?;

        match ObjectKind::from_tag(tag) {
            Some(ObjectKind::Blob) => Ok(Object::Blob(Blob::new(content.to_vec()))),
            Some(ObjectKind::Tree) => Tree::parse(content).map(Object::Tree),
            Some(ObjectKind::Commit) => Commit::parse(content).map(Object::Commit),
            None => Err(ParseError::UnsupportedObjectType(tag.into())),
        }
    }

    pub fn into_blob(self) -> Option<Blob> {
        if let Self::Blob(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn into_tree(self) -> Option<Tree> {
        if let Self::Tree(v) = self {
            Some(v)
        } else {
            None
        }
    }

    #[cfg(test)]
    pub fn into_commit(self) -> Option<Commit> {
        if let Self::Commit(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn pretty_print(&self) -> std::io::Result<()> {
        match self {
            Object::Blob(blob) => blob.pretty_print(),
            Object::Tree(tree) => tree.pretty_print(),
            Object::Commit(commit) => commit.pretty_print(),
        }
    }
}

impl Storable for Object {
    fn kind(&self) -> ObjectKind {
        match self {
            Object::Blob(_) => ObjectKind::Blob,
            Object::Tree(_) => ObjectKind::Tree,
            Object::Commit(_) => ObjectKind::Commit,
        }
    }

    fn encoded_size(&self) -> usize {
        match self {
            Object::Blob(blob) => blob.encoded_size(),
            Object::Tree(tree) => tree.encoded_size(),
            Object::Commit(commit) => commit.encoded_size(),
        }
    }

    fn write_content(&self, out: &mut Vec<u8>) {
        match self {
            Object::Blob(blob) => blob.write_content(out),
            Object::Tree(tree) => tree.write_content(out),
            Object::Commit(commit) => commit.write_content(out),
        }
    }
}
