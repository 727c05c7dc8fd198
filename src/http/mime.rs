use std::collections::HashMap;
use std::path::Path;

/// Allow-list of file extensions the server is willing to serve.
///
/// Lookups are case-insensitive and exact. There is no fallback type: an
/// extension missing from the table means the file is forbidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeTable {
    types: HashMap<String, String>,
}

impl Default for MimeTable {
    fn default() -> Self {
        Self::from_entries([
            ("html", "text/html"),
            ("css", "text/css"),
            ("js", "application/javascript"),
        ])
    }
}

impl MimeTable {
    /// Builds a table from `(extension, content type)` pairs.
    ///
    /// Extensions may be given with or without the leading dot and in any case.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let types = entries
            .into_iter()
            .map(|(ext, mime)| (normalize_extension(ext.as_ref()), mime.into()))
            .collect();
        Self { types }
    }

    /// Returns the content type for `extension`, or `None` if it is not allowed.
    ///
    /// # Example
    ///
    /// ```
    /// # use docserve::http::mime::MimeTable;
    /// let table = MimeTable::default();
    /// assert_eq!(table.classify(".HTML"), Some("text/html"));
    /// assert_eq!(table.classify("txt"), None);
    /// ```
    pub fn classify(&self, extension: &str) -> Option<&str> {
        self.types
            .get(&normalize_extension(extension))
            .map(String::as_str)
    }

    /// Classifies a path by its extension. Paths without one are never allowed.
    pub fn classify_path(&self, path: &Path) -> Option<&str> {
        let ext = path.extension()?.to_str()?;
        self.classify(ext)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.strip_prefix('.').unwrap_or(ext).to_ascii_lowercase()
}
