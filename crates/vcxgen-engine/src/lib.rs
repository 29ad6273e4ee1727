pub mod classify;
pub mod document;
pub mod error;
pub mod export;
pub mod filters;
pub mod io;
pub mod paths;
pub mod rewrite;
pub mod scan;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use classify::{ExtensionMap, FileKind};
pub use document::{Attribute, Child, EncodeOptions, Node, QName, decode, encode, encode_with};
pub use error::{Error, Result};
pub use export::*;
pub use filters::{CategoryPath, DEFAULT_NAMESPACE, FilterOptions, build_filters, parse_namespace};
pub use io::*;
pub use rewrite::{RewritePolicy, rewrite_section, rewrite_template};
pub use scan::{local_name_is, scan};
