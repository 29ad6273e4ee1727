//! Template section rewriting.
//!
//! A template marks the places to fill with `<ItemGroup Label="Sources">` and
//! `<ItemGroup Label="Headers">`. Each marked group is emptied and refilled
//! with one item per matching input file, in input order.

use crate::classify::{ExtensionMap, FileKind};
use crate::document::Node;
use crate::paths::to_native;
use crate::scan::{local_name_is, scan};

/// Element name of the groups a template may mark for rewriting.
pub const SECTION_ELEMENT: &str = "ItemGroup";
/// Attribute whose value selects the rewrite policy.
pub const LABEL_ATTRIBUTE: &str = "Label";
/// Attribute carrying a file path on generated items.
pub const INCLUDE_ATTRIBUTE: &str = "Include";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewritePolicy {
    Sources,
    Headers,
}

impl RewritePolicy {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Sources" => Some(RewritePolicy::Sources),
            "Headers" => Some(RewritePolicy::Headers),
            _ => None,
        }
    }

    pub fn kind(self) -> FileKind {
        match self {
            RewritePolicy::Sources => FileKind::Source,
            RewritePolicy::Headers => FileKind::Header,
        }
    }
}

/// Replace everything in `section` with items for the files `policy` selects.
///
/// Original attributes and children are discarded. Each item is followed by a
/// newline text child. Paths are neither deduplicated nor reordered.
pub fn rewrite_section<S: AsRef<str>>(
    section: &mut Node,
    policy: RewritePolicy,
    files: &[S],
    extensions: &ExtensionMap,
) {
    section.clear_attributes();
    section.clear_children();

    let kind = policy.kind();
    for file in files {
        let file = to_native(file.as_ref());
        if extensions.classify(&file) != Some(kind) {
            continue;
        }

        section
            .add_child(kind.tag())
            .add_attribute(INCLUDE_ATTRIBUTE, file);
        section.add_text("\n");
    }
}

/// Rewrite every labelled section of a template. Returns how many were rewritten.
pub fn rewrite_template<S: AsRef<str>>(
    root: &mut Node,
    files: &[S],
    extensions: &ExtensionMap,
) -> usize {
    let mut rewritten = 0;
    scan(root, &local_name_is(SECTION_ELEMENT), &mut |section: &mut Node| {
        let Some(policy) = section
            .attribute(LABEL_ATTRIBUTE)
            .and_then(RewritePolicy::from_label)
        else {
            return;
        };

        log::debug!("Rewriting {policy:?} section");
        rewrite_section(section, policy, files, extensions);
        rewritten += 1;
    });
    rewritten
}
