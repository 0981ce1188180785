//! Lexical path helpers.
//!
//! Nothing here touches the file system; paths are cleaned with `path-clean`
//! and compared component-wise.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;

/// Compute the path of `to` relative to the directory `from_dir`.
///
/// Both paths are cleaned first. When they share no prefix (different roots on
/// Windows), or only one of them is absolute, `to` is returned unchanged.
///
/// ```rust
/// use wxdep_graph::paths::relative_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(
///     relative_path(Path::new("/p/.wxdep"), Path::new("/p/src/app.js")),
///     PathBuf::from("../src/app.js")
/// );
/// ```
pub fn relative_path(from_dir: &Path, to: &Path) -> PathBuf {
    let from = from_dir.clean();
    let to = to.clean();

    if from.has_root() != to.has_root() {
        return to;
    }

    let from_parts: Vec<Component<'_>> = from.components().collect();
    let to_parts: Vec<Component<'_>> = to.components().collect();

    let common = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    if common == 0 && from.has_root() {
        return to;
    }

    let mut result = PathBuf::new();
    for _ in common..from_parts.len() {
        result.push("..");
    }
    for part in &to_parts[common..] {
        result.push(part.as_os_str());
    }
    result
}

/// Render a relative path as a forward-slash specifier usable in `require()`.
///
/// A relative specifier that does not start with `.` gets a `./` prefix so the
/// host bundler never mistakes it for a package name. Absolute paths are kept.
pub fn to_import_specifier(relative: &Path) -> String {
    let text = relative.to_string_lossy().replace('\\', "/");
    if text.starts_with('.') || relative.has_root() {
        text
    } else {
        format!("./{text}")
    }
}

/// Forward-slash form of a path, used for asset keys.
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Append `.ext` to a path stem without replacing an existing dot segment.
///
/// `Path::with_extension` replaces a trailing dot segment (`comp.v2` becomes
/// `comp.js`), and page prefixes may contain dots.
pub fn append_extension(stem: &Path, ext: &str) -> PathBuf {
    let mut os: OsString = stem.as_os_str().to_owned();
    os.push(".");
    os.push(ext);
    PathBuf::from(os)
}

/// Extension of a path without the leading dot, if any.
pub fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_to_sibling_tree() {
        let rel = relative_path(
            Path::new("/project/.wxdep"),
            Path::new("/project/src/pages/index/index.js"),
        );
        assert_eq!(rel, PathBuf::from("../src/pages/index/index.js"));
    }

    #[test]
    fn relative_path_to_descendant() {
        let rel = relative_path(Path::new("/project"), Path::new("/project/src/app.json"));
        assert_eq!(rel, PathBuf::from("src/app.json"));
    }

    #[test]
    fn relative_path_cleans_dot_segments() {
        let rel = relative_path(
            Path::new("/project/./dist/../dist"),
            Path::new("/project/.wxdep/runtime"),
        );
        assert_eq!(rel, PathBuf::from("../.wxdep/runtime"));
    }

    #[test]
    fn relative_path_does_not_mix_relative_and_absolute() {
        assert_eq!(
            relative_path(Path::new(".wxdep"), Path::new("/project/src/app.json")),
            PathBuf::from("/project/src/app.json")
        );
        assert_eq!(
            to_import_specifier(Path::new("/project/src/app.json")),
            "/project/src/app.json"
        );
    }

    #[test]
    fn import_specifier_prefixes_bare_paths() {
        assert_eq!(to_import_specifier(Path::new("src/app")), "./src/app");
        assert_eq!(to_import_specifier(Path::new("../src/app")), "../src/app");
    }

    #[test]
    fn append_extension_keeps_dotted_stems() {
        assert_eq!(
            append_extension(Path::new("/src/comp.v2/index"), "js"),
            PathBuf::from("/src/comp.v2/index.js")
        );
        assert_eq!(
            append_extension(Path::new("/src/comp.v2"), "wxml"),
            PathBuf::from("/src/comp.v2.wxml")
        );
    }
}
