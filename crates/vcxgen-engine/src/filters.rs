//! # Filter Document
//!
//! Builds the `.vcxproj.filters` companion document, which groups project
//! items into a folder tree in the IDE.
//!
//! Every file lands in a category path such as `Source Files/src/net`: the
//! top-level folder for its [`FileKind`] followed by its directory relative to
//! the project root. Each distinct category path and each of its ancestors is
//! declared once, with an identifier derived from the path alone so that
//! regenerating the document never changes identifiers the IDE has stored.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use relative_path::{Component, RelativePath};
use uuid::Uuid;

use crate::classify::{ExtensionMap, FileKind};
use crate::document::Node;
use crate::error::{Error, Result};
use crate::paths::{relative_dir, to_native};
use crate::rewrite::{INCLUDE_ATTRIBUTE, SECTION_ELEMENT};

/// Namespace the filter identifiers are derived from unless configured otherwise.
pub const DEFAULT_NAMESPACE: &str = "10758f2f-f8bc-4d6b-aeaa-8131bf78a862";
pub const MSBUILD_NAMESPACE: &str = "http://schemas.microsoft.com/developer/msbuild/2003";
pub const TOOLS_VERSION: &str = "4.0";

const FILTER_ELEMENT: &str = "Filter";
const IDENTIFIER_ELEMENT: &str = "UniqueIdentifier";

pub fn parse_namespace(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|source| Error::NamespaceParse {
        value: value.to_string(),
        source,
    })
}

/// Identifier for a category path: a version 5 UUID of the path's UTF-8 bytes.
pub fn stable_identifier(namespace: &Uuid, path: &str) -> Uuid {
    Uuid::new_v5(namespace, path.as_bytes())
}

/// Brace-delimited form used in `<UniqueIdentifier>`.
pub fn format_identifier(id: &Uuid) -> String {
    format!("{{{}}}", id.hyphenated())
}

/// A logical folder path like `Header Files/include/net`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPath {
    path: String,
    separator: char,
}

impl CategoryPath {
    pub fn new(folder: &str, dir: &RelativePath, separator: char) -> Self {
        let mut path = folder.to_string();
        for component in dir.components() {
            if let Component::Normal(segment) = component {
                path.push(separator);
                path.push_str(segment);
            }
        }
        Self { path, separator }
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// The path itself followed by each ancestor, ending at the top folder.
    pub fn ancestors(&self) -> impl Iterator<Item = &str> {
        let separator = self.separator;
        std::iter::successors(Some(self.path.as_str()), move |path| {
            let path: &str = *path;
            path.rfind(separator).map(|idx| &path[..idx])
        })
        .filter(|path| !path.is_empty())
    }
}

/// Inputs to the filter builder that stay fixed for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    pub namespace: Uuid,
    /// Directory category paths are computed relative to.
    pub root: PathBuf,
    pub separator: char,
}

impl FilterOptions {
    pub fn new(namespace: Uuid, root: impl Into<PathBuf>) -> Self {
        Self {
            namespace,
            root: root.into(),
            separator: MAIN_SEPARATOR,
        }
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }
}

/// The path a filter declaration stands for.
///
/// Declarations are always written with the path as their first attribute,
/// and this accessor relies on that position rather than on the attribute's
/// name. Deduplication goes through here.
pub fn declared_path(declaration: &Node) -> Option<&str> {
    declaration
        .first_attribute()
        .map(|attr| attr.value.as_str())
}

/// Build the filter document for `files`.
///
/// Every file gets an entry except those whose directory cannot be
/// expressed relative to the root.
pub fn build_filters<S: AsRef<str>>(
    files: &[S],
    options: &FilterOptions,
    extensions: &ExtensionMap,
) -> Node {
    let mut project = Node::with_namespace("Project", MSBUILD_NAMESPACE);
    project.add_attribute("ToolsVersion", TOOLS_VERSION);

    let mut filters = Node::new(SECTION_ELEMENT);
    let mut entries = Node::new(SECTION_ELEMENT);

    for file in files {
        let file = to_native(file.as_ref());
        let dir = match relative_dir(&options.root, Path::new(&file)) {
            Ok(dir) => dir,
            Err(err) => {
                log::debug!("Leaving {file} out of filters: {err}");
                continue;
            }
        };
        // Anything that is not a recognised header is filed as a source.
        let kind = extensions.classify(&file).unwrap_or(FileKind::Source);

        let category = CategoryPath::new(kind.folder(), &dir, options.separator);
        add_entry(&mut entries, kind, &file, &category);
        for path in category.ancestors() {
            declare_filter(&mut filters, path, &options.namespace);
        }
    }

    project.push_element(filters);
    project.push_element(entries);
    project
}

fn add_entry(entries: &mut Node, kind: FileKind, file: &str, category: &CategoryPath) {
    let entry = entries.add_child(kind.tag());
    entry.add_attribute(INCLUDE_ATTRIBUTE, file);
    entry.add_child(FILTER_ELEMENT).add_text(category.as_str());
}

/// Add a declaration for `path` unless one already exists.
fn declare_filter(filters: &mut Node, path: &str, namespace: &Uuid) {
    if filters
        .elements()
        .any(|declaration| declared_path(declaration) == Some(path))
    {
        return;
    }

    let declaration = filters.add_child(FILTER_ELEMENT);
    declaration.add_attribute(INCLUDE_ATTRIBUTE, path);
    declaration
        .add_child(IDENTIFIER_ELEMENT)
        .add_text(format_identifier(&stable_identifier(namespace, path)));
}
