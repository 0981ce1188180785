//! Specifier resolution.
//!
//! Turns a raw reference string plus the referencing file into an absolute
//! path. Three forms are understood:
//!
//! - alias-prefixed (`@/utils/x`): the first configured alias whose symbol
//!   occurs anywhere in the specifier is replaced by `.` and the result is
//!   resolved against the alias target
//! - root-relative (`/utils/x`): resolved against the source root
//! - everything else: resolved against the referencing file's directory

use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::options::AliasInfo;

/// Resolve a specifier through the configured aliases.
///
/// Aliases are tried in configuration order and the first symbol contained in
/// the specifier wins, so with `["@", "@@"]` the specifier `@@/x` matches `@`.
/// Only the first occurrence of the symbol is substituted.
pub fn resolve_alias(specifier: &str, aliases: &[AliasInfo]) -> Option<PathBuf> {
    let alias = aliases
        .iter()
        .find(|alias| !alias.symbol.is_empty() && specifier.contains(alias.symbol.as_str()))?;

    let rewritten = specifier.replacen(alias.symbol.as_str(), ".", 1);
    Some(alias.path.join(rewritten).clean())
}

/// Resolve a root-relative or relative specifier.
pub fn resolve_root_or_relative(importer: &Path, specifier: &str, src_dir: &Path) -> PathBuf {
    if let Some(rooted) = specifier.strip_prefix('/') {
        return src_dir.join(rooted).clean();
    }

    let base = importer.parent().unwrap_or(Path::new(""));
    base.join(specifier).clean()
}

/// Alias resolution first, root/relative resolution otherwise.
pub fn resolve_specifier(
    importer: &Path,
    specifier: &str,
    src_dir: &Path,
    aliases: &[AliasInfo],
) -> PathBuf {
    resolve_alias(specifier, aliases)
        .unwrap_or_else(|| resolve_root_or_relative(importer, specifier, src_dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_relative_uses_source_root() {
        let resolved = resolve_root_or_relative(
            Path::new("/project/src/pages/index/index.wxml"),
            "/templates/header.wxml",
            Path::new("/project/src"),
        );
        assert_eq!(resolved, PathBuf::from("/project/src/templates/header.wxml"));
    }

    #[test]
    fn relative_uses_importer_directory() {
        let resolved = resolve_root_or_relative(
            Path::new("/project/src/pages/index/index.js"),
            "../../utils/util",
            Path::new("/project/src"),
        );
        assert_eq!(resolved, PathBuf::from("/project/src/utils/util"));
    }

    #[test]
    fn bare_specifier_is_relative() {
        let resolved = resolve_root_or_relative(
            Path::new("/project/src/app.js"),
            "utils/util",
            Path::new("/project/src"),
        );
        assert_eq!(resolved, PathBuf::from("/project/src/utils/util"));
    }

    #[test]
    fn alias_is_substituted() {
        let aliases = vec![AliasInfo::new("@", "/project/src")];
        let resolved = resolve_alias("@/utils/util", &aliases);
        assert_eq!(resolved, Some(PathBuf::from("/project/src/utils/util")));
    }

    #[test]
    fn no_alias_match_returns_none() {
        let aliases = vec![AliasInfo::new("@", "/project/src")];
        assert_eq!(resolve_alias("./utils/util", &aliases), None);
        assert_eq!(resolve_alias("@anything", &[]), None);
    }

    #[test]
    fn first_configured_alias_wins_on_overlap() {
        let aliases = vec![AliasInfo::new("@", "/src"), AliasInfo::new("@@", "/lib")];

        // "@@/x" contains "@", so the first alias matches and only its first
        // occurrence is replaced.
        let resolved = resolve_alias("@@/x", &aliases);
        assert_eq!(resolved, Some(PathBuf::from("/src/.@/x")));
    }

    #[test]
    fn longer_alias_wins_when_listed_first() {
        let aliases = vec![AliasInfo::new("@@", "/lib"), AliasInfo::new("@", "/src")];

        assert_eq!(resolve_alias("@@/x", &aliases), Some(PathBuf::from("/lib/x")));
        assert_eq!(resolve_alias("@/x", &aliases), Some(PathBuf::from("/src/x")));
    }

    #[test]
    fn alias_symbol_anywhere_in_specifier() {
        let aliases = vec![AliasInfo::new("~lib", "/project/lib")];
        let resolved = resolve_alias("prefix/~lib/x", &aliases);
        assert_eq!(resolved, Some(PathBuf::from("/project/lib/prefix/x")));
    }

    #[test]
    fn resolve_specifier_prefers_alias() {
        let aliases = vec![AliasInfo::new("@", "/project/src")];
        let importer = Path::new("/project/src/pages/a/a.js");

        assert_eq!(
            resolve_specifier(importer, "@/utils/x", Path::new("/project/src"), &aliases),
            PathBuf::from("/project/src/utils/x")
        );
        assert_eq!(
            resolve_specifier(importer, "./b", Path::new("/project/src"), &aliases),
            PathBuf::from("/project/src/pages/a/b")
        );
    }
}
