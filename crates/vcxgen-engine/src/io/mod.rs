use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use crate::document::{EncodeOptions, Node, decode, encode_to};
use crate::error::{Error, Result};

/// Read and decode a whole document from disk.
pub fn read_document(path: &Path) -> Result<Node> {
    let bytes = fs::read(path).map_err(|source| Error::TemplateRead {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&bytes)
}

/// Encode `node` into a file, replacing any existing content.
pub fn write_document(path: &Path, node: &Node, options: &EncodeOptions) -> Result<()> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    encode_to(BufWriter::new(file), node, options)
}
