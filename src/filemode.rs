use std::fs::Metadata;
use std::os::unix::fs::PermissionsExt;

/// The mode of a tree entry, rendered in octal without leading zeros (`40000`, `100644`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(transparent)]
pub struct FileMode(pub u32);

impl std::fmt::Octal for FileMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Octal::fmt(&self.0, f)
    }
}

impl FileMode {
    pub const DIRECTORY: FileMode = FileMode(0o040000);
    pub const EXECUTABLE: FileMode = FileMode(0o100755);
    pub const REGULAR: FileMode = FileMode(0o100644);
    pub const SYMLINK: FileMode = FileMode(0o120000);

    /// The mode a regular file is stored with: `EXECUTABLE` if the owner may execute it,
    /// `REGULAR` otherwise. Group and other bits are ignored, as in git.
    pub fn of_file(metadata: &Metadata) -> Self {
        if metadata.permissions().mode() & libc::S_IXUSR != 0 {
            Self::EXECUTABLE
        } else {
            Self::REGULAR
        }
    }

    pub fn is_directory(self) -> bool {
        self == Self::DIRECTORY
    }

    /// The object type an entry with this mode points at.
    pub fn kind(self) -> &'static str {
        if self.is_directory() {
            "tree"
        } else {
            "blob"
        }
    }

    /// Parse the octal text of a tree entry's mode.
    pub fn parse_octal(bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() || !bytes.iter().all(|b| (b'0'..=b'7').contains(b)) {
            return None;
        }
        let text = std::str::from_utf8(bytes).ok()?;
        u32::from_str_radix(text, 8).ok().map(FileMode)
    }
}
