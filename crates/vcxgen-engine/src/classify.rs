use std::path::Path;

/// The two kinds of file a Visual C++ project lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Source,
    Header,
}

impl FileKind {
    /// Item element name used for entries of this kind.
    pub fn tag(self) -> &'static str {
        match self {
            FileKind::Source => "ClCompile",
            FileKind::Header => "ClInclude",
        }
    }

    /// Top-level filter folder for this kind.
    pub fn folder(self) -> &'static str {
        match self {
            FileKind::Source => "Source Files",
            FileKind::Header => "Header Files",
        }
    }
}

/// Extension lookup deciding which files are sources and which are headers.
///
/// Extensions are stored without the leading dot and compared exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionMap {
    sources: Vec<String>,
    headers: Vec<String>,
}

impl Default for ExtensionMap {
    fn default() -> Self {
        Self::new(["cpp", "cxx"], ["h"])
    }
}

impl ExtensionMap {
    pub fn new<S, H>(sources: S, headers: H) -> Self
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        H: IntoIterator,
        H::Item: AsRef<str>,
    {
        fn normalize<I>(exts: I) -> Vec<String>
        where
            I: IntoIterator,
            I::Item: AsRef<str>,
        {
            exts.into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_string())
                .collect()
        }

        Self {
            sources: normalize(sources),
            headers: normalize(headers),
        }
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Classify `path` by its extension. Unknown extensions yield `None`.
    pub fn classify(&self, path: &str) -> Option<FileKind> {
        let ext = Path::new(path).extension()?.to_str()?;
        if self.sources.iter().any(|known| known == ext) {
            Some(FileKind::Source)
        } else if self.headers.iter().any(|known| known == ext) {
            Some(FileKind::Header)
        } else {
            None
        }
    }
}
