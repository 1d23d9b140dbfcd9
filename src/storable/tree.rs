use std::cmp::Ordering;
use std::io::Write;

use bstr::{BStr, BString, ByteSlice};
use tap::Tap;

use crate::digest::{Digest, DIGEST_LEN};
use crate::error::ParseError;
use crate::filemode::FileMode;

use super::{ObjectKind, Storable};

/// One member of a directory: `"{mode} {name}\0{oid}"` on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    mode: FileMode,
    name: BString,
    oid: Digest,
}

impl TreeEntry {
    pub fn new(mode: FileMode, name: impl Into<BString>, oid: Digest) -> Self {
        Self {
            mode,
            name: name.into(),
            oid,
        }
    }

    pub fn mode(&self) -> FileMode {
        self.mode
    }

    pub fn name(&self) -> &BStr {
        self.name.as_bstr()
    }

    pub fn oid(&self) -> &Digest {
        &self.oid
    }

    fn mode_text(&self) -> String {
        format!("{:o}", self.mode)
    }

    fn encoded_len(&self) -> usize {
        self.mode_text().len() + 1 + self.name.len() + 1 + DIGEST_LEN
    }

    /// git's tree order: byte-wise by name, with directories compared as though their name
    /// ended in `/`.
    pub fn cmp_canonical(&self, other: &Self) -> Ordering {
        fn key(entry: &TreeEntry) -> impl Iterator<Item = &u8> {
            let slash = entry.mode.is_directory().then_some(&b'/');
            entry.name.iter().chain(slash)
        }
        key(self).cmp(key(other))
    }
}

/// A single directory level. Entries are kept in the order they were given or parsed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new(entries: Vec<TreeEntry>) -> Self {
        Self { entries }
    }

    /// Build a tree whose entries are in git's canonical order, so that its id matches the one
    /// git would compute for the same directory.
    pub fn canonical(entries: Vec<TreeEntry>) -> Self {
        Self {
            entries: entries.tap_mut(|v| v.sort_unstable_by(TreeEntry::cmp_canonical)),
        }
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &BStr> + '_ {
        self.entries.iter().map(TreeEntry::name)
    }

    /// Parse the content of a tree object, which is a sequence of `"{mode} {name}\0{oid}"`
    /// with `oid` being 20 raw bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self, ParseError> {
        let mut entries = Vec::new();
        let mut offset = 0;

        while offset < bytes.len() {
            let (entry, len) = TreeEntry::parse(&bytes[offset..], offset)?;
            entries.push(entry);
            offset += len;
        }

        Ok(Self { entries })
    }

    pub fn pretty_print(&self) -> std::io::Result<()> {
        let mut stdout = std::io::stdout().lock();
        for entry in &self.entries {
            writeln!(
                stdout,
                "{:06o} {} {:x}\t{}",
                entry.mode,
                entry.mode.kind(),
                entry.oid,
                entry.name
            )?;
        }
        stdout.flush()
    }
}

impl TreeEntry {
    /// Parse the entry at the start of `bytes`, returning it and the number of bytes it used.
    fn parse(bytes: &[u8], offset: usize) -> Result<(Self, usize), ParseError> {
        let malformed = |reason| ParseError::MalformedTreeEntry { offset, reason };

        let nul_idx =
            memchr::memchr(b'\0', bytes).ok_or_else(|| malformed("entry is not NUL-terminated"))?;
        let header = &bytes[..nul_idx];

        let space_idx = memchr::memchr(b' ', header)
            .ok_or_else(|| malformed("missing space between mode and name"))?;
        let (mode, name) = (&header[..space_idx], &header[space_idx + 1..]);

        // A padded mode would not serialize back to the same bytes.
        if mode.len() > 1 && mode[0] == b'0' {
            return Err(malformed("mode has leading zeros"));
        }
        let mode = FileMode::parse_octal(mode).ok_or_else(|| malformed("mode is not octal"))?;
        if name.is_empty() {
            return Err(malformed("empty name"));
        }

        let oid_start = nul_idx + 1;
        let oid = bytes
            .get(oid_start..oid_start + DIGEST_LEN)
            .and_then(Digest::from_slice)
            .ok_or_else(|| malformed("fewer than 20 bytes left for the object id"))?;

        Ok((Self::new(mode, name, oid), oid_start + DIGEST_LEN))
    }
}

impl Storable for Tree {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Tree
    }

    fn encoded_size(&self) -> usize {
        self.entries.iter().map(TreeEntry::encoded_len).sum()
    }

    fn write_content(&self, out: &mut Vec<u8>) {
        for entry in &self.entries {
            out.extend_from_slice(entry.mode_text().as_bytes());
            out.push(b' ');
            out.extend_from_slice(&entry.name);
            out.push(b'\0');
            out.extend_from_slice(&*entry.oid);
        }
    }
}
