//! Mapping request targets onto the document root.
//!
//! Containment is always decided on the lexically normalized absolute path.
//! Comparing the raw joined string would let `/../` sequences through.

use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

use percent_encoding::percent_decode_str;

/// Result of resolving a request target against the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Normalized absolute path the target points at
    pub path: PathBuf,
    /// True if `path` lies inside the document root
    pub safe: bool,
}

/// Percent-decodes a request target, dropping any query string first.
///
/// Cutting the query is an addition to plain decode-and-join resolution: a
/// target such as `/index.html?v=2` serves `index.html` instead of looking for
/// a file literally named `index.html?v=2`.
///
/// Malformed escapes such as `%zz` are kept literally and invalid UTF-8 is
/// replaced, so decoding itself never fails.
pub fn decode_target(raw: &str) -> String {
    let path = raw.split_once('?').map_or(raw, |(path, _)| path);
    percent_decode_str(path).decode_utf8_lossy().into_owned()
}

/// Collapses `.` and `..` segments without touching the filesystem.
///
/// `..` at the filesystem root stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if out.file_name().is_some() {
                    out.pop();
                }
            }
            Component::Normal(segment) => out.push(segment),
        }
    }
    out
}

/// Reports whether `path` is `root` itself or somewhere below it.
///
/// Both sides are normalized first. The prefix must end on a separator
/// boundary, so `/srv/www-evil` is not inside `/srv/www`.
pub fn is_within(root: &Path, path: &Path) -> bool {
    let root = normalize(root);
    let path = normalize(path);

    let root = root.to_string_lossy();
    let root = root.trim_end_matches(MAIN_SEPARATOR);
    let path = path.to_string_lossy();

    match path.strip_prefix(root) {
        Some(rest) => rest.is_empty() || rest.starts_with(MAIN_SEPARATOR),
        None => false,
    }
}

/// Resolves a raw (still percent-encoded) target against `root`.
///
/// # Example
///
/// ```
/// # use docserve::files::resolver::resolve;
/// # use std::path::Path;
/// let ok = resolve(Path::new("/srv/www"), "/css/site.css");
/// assert_eq!(ok.path, Path::new("/srv/www/css/site.css"));
/// assert!(ok.safe);
///
/// let escape = resolve(Path::new("/srv/www"), "/..%2fsecret.txt");
/// assert!(!escape.safe);
/// ```
pub fn resolve(root: &Path, raw_target: &str) -> Resolved {
    let decoded = decode_target(raw_target);
    let relative = decoded.strip_prefix('/').unwrap_or(&decoded);

    let path = normalize(&root.join(relative));
    let safe = is_within(root, &path);

    Resolved { path, safe }
}
