use std::io::Write;

use once_cell::sync::Lazy;
use regex::bytes::Regex;

use crate::digest::{Digest, DIGEST_LEN};
use crate::error::ParseError;

use super::{ObjectKind, Storable};

/// A snapshot reference: one tree, its parent commits and a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    tree_id: Digest,
    parents: Vec<Digest>,
    message: String,
}

impl Commit {
    pub fn new(tree_id: Digest, parents: Vec<Digest>, message: String) -> Self {
        Self {
            tree_id,
            parents,
            message,
        }
    }

    #[cfg(test)]
    pub fn tree_id(&self) -> &Digest {
        &self.tree_id
    }

    #[cfg(test)]
    pub fn parents(&self) -> &[Digest] {
        self.parents.as_ref()
    }

    #[cfg(test)]
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// Parse the content of a commit.
    ///
    /// ## Example
    /// ```text
    /// tree 090c4c5dd61d2e84c832c4cd306b66bf2fabc1f5
    /// parent e6a49274aa0893ce2e2928589100387aee220c5b
    /// parent 14a9d8464caef987f3b5c3cf26f56db825459abd
    ///
    /// Merge remote-tracking branch 'origin/renovate/clap-3.x' into develop
    ///
    /// ```
    pub fn parse(bytes: &[u8]) -> Result<Self, ParseError> {
        let (line, mut rest) =
            split_line(bytes).ok_or(ParseError::MalformedCommit("missing tree line"))?;
        let tree_id = match parse_header_line(line) {
            Some((b"tree", oid)) => oid,
            _ => {
                return Err(ParseError::MalformedCommit(
                    "first line must be `tree <hex>`",
                ))
            }
        };

        let mut parents = Vec::new();
        loop {
            let (line, after) = split_line(rest).ok_or(ParseError::MalformedCommit(
                "missing blank line before message",
            ))?;
            rest = after;
            if line.is_empty() {
                break;
            }
            match parse_header_line(line) {
                Some((b"parent", oid)) => parents.push(oid),
                _ => {
                    return Err(ParseError::MalformedCommit(
                        "expected `parent <hex>` or a blank line",
                    ))
                }
            }
        }

        let message = rest.strip_suffix(b"\n").ok_or(ParseError::MalformedCommit(
            "message is missing its trailing newline",
        ))?;
        let message = String::from_utf8(message.to_vec())
            .map_err(|_| ParseError::MalformedCommit("message is not valid UTF-8"))?;

        Ok(Self {
            tree_id,
            parents,
            message,
        })
    }

    pub fn pretty_print(&self) -> std::io::Result<()> {
        let mut content = Vec::with_capacity(self.encoded_size());
        self.write_content(&mut content);

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&content)?;
        stdout.flush()
    }
}

fn split_line(bytes: &[u8]) -> Option<(&[u8], &[u8])> {
    let newline_idx = memchr::memchr(b'\n', bytes)?;
    Some((&bytes[..newline_idx], &bytes[newline_idx + 1..]))
}

/// Parse a `tree <hex>` or `parent <hex>` line.
fn parse_header_line(line: &[u8]) -> Option<(&[u8], Digest)> {
    static HEADER_REGEX: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^(tree|parent) ([0-9a-f]{40})$").unwrap());

    let groups = HEADER_REGEX.captures(line)?;
    let key = groups.get(1)?.as_bytes();
    let oid = std::str::from_utf8(groups.get(2)?.as_bytes()).ok()?;
    Some((key, oid.parse().ok()?))
}

impl Storable for Commit {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Commit
    }

    fn encoded_size(&self) -> usize {
        const TREE_LINE: usize = "tree ".len() + DIGEST_LEN * 2 + 1;
        const PARENT_LINE: usize = "parent ".len() + DIGEST_LEN * 2 + 1;
        TREE_LINE + PARENT_LINE * self.parents.len() + 1 + self.message.len() + 1
    }

    fn write_content(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(format!("tree {:x}\n", self.tree_id).as_bytes());
        for parent in &self.parents {
            out.extend_from_slice(format!("parent {parent:x}\n").as_bytes());
        }
        out.push(b'\n');
        out.extend_from_slice(self.message.as_bytes());
        out.push(b'\n');
    }
}
