use std::io::Write;

use super::{ObjectKind, Storable};

/// Raw file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    data: Vec<u8>,
}

impl Storable for Blob {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Blob
    }

    fn encoded_size(&self) -> usize {
        self.data.len()
    }

    fn write_content(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.data);
    }
}

impl Blob {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Pretty-printing a blob is simple - just dump the contents of the file to stdout
    pub fn pretty_print(&self) -> std::io::Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&self.data)?;
        stdout.flush()?;
        Ok(())
    }
}
