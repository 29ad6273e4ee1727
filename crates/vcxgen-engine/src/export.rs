//! Project export: the rewritten template plus its filter document.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::classify::ExtensionMap;
use crate::document::{EncodeOptions, decode, encode_with};
use crate::error::Result;
use crate::filters::{FilterOptions, build_filters};
use crate::io::{read_document, write_document};
use crate::rewrite::rewrite_template;

pub const PROJECT_EXTENSION: &str = "vcxproj";
pub const FILTERS_SUFFIX: &str = ".filters";

/// Everything one export run needs.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub template: PathBuf,
    pub files: Vec<String>,
    pub out_dir: PathBuf,
    pub project_name: String,
    pub filters: FilterOptions,
    pub extensions: ExtensionMap,
}

/// Paths written by [`export_project`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOutputs {
    pub project: PathBuf,
    pub filters: PathBuf,
}

pub fn project_path(out_dir: &Path, project_name: &str) -> PathBuf {
    out_dir.join(format!("{project_name}.{PROJECT_EXTENSION}"))
}

/// `<project path>.filters`
pub fn filters_path(project: &Path) -> PathBuf {
    let mut path = OsString::from(project.as_os_str());
    path.push(FILTERS_SUFFIX);
    PathBuf::from(path)
}

/// Rewrite a template held in memory and encode the result.
pub fn render_project<S: AsRef<str>>(
    template: &[u8],
    files: &[S],
    extensions: &ExtensionMap,
) -> Result<Vec<u8>> {
    let mut root = decode(template)?;
    rewrite_template(&mut root, files, extensions);
    encode_with(&root, &project_encoding())
}

/// Build the filter document and encode it.
pub fn render_filters<S: AsRef<str>>(
    files: &[S],
    options: &FilterOptions,
    extensions: &ExtensionMap,
) -> Result<Vec<u8>> {
    encode_with(&build_filters(files, options, extensions), &filters_encoding())
}

/// Write `<out_dir>/<name>.vcxproj` from the template and the matching
/// `.vcxproj.filters` next to it.
pub fn export_project(request: &ExportRequest) -> Result<ProjectOutputs> {
    let mut root = read_document(&request.template)?;
    let rewritten = rewrite_template(&mut root, &request.files, &request.extensions);
    if rewritten == 0 {
        log::warn!(
            "Template {} has no Sources or Headers item groups",
            request.template.display()
        );
    }

    let project = project_path(&request.out_dir, &request.project_name);
    write_document(&project, &root, &project_encoding())?;
    log::info!("Wrote {}", project.display());

    let filters = filters_path(&project);
    let document = build_filters(&request.files, &request.filters, &request.extensions);
    write_document(&filters, &document, &filters_encoding())?;
    log::info!("Wrote {}", filters.display());

    Ok(ProjectOutputs { project, filters })
}

fn project_encoding() -> EncodeOptions {
    EncodeOptions::default().with_declaration()
}

fn filters_encoding() -> EncodeOptions {
    EncodeOptions::indented(2).with_declaration()
}
