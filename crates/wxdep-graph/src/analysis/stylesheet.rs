//! Stylesheet analyzer.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use regex::Regex;

use super::resolver::resolve_root_or_relative;
use super::{AnalysisContext, FileAnalyzer, FileType, captures, static_regex};
use crate::error::Result;
use crate::graph::FileRecord;
use crate::paths::extension_of;

/// Extension of the only stylesheet flavour whose imports are followed.
const NATIVE_EXTENSION: &str = "wxss";

/// Scans `@import` rules of native `.wxss` files.
///
/// Preprocessor sources (`scss`, `less`, ...) resolve their imports themselves
/// and are recorded without dependencies. Aliases are not applied; stylesheets
/// use root paths instead.
#[derive(Debug)]
pub struct StylesheetAnalyzer {
    comment: Regex,
    import: Regex,
}

impl StylesheetAnalyzer {
    pub fn new() -> Self {
        Self {
            comment: static_regex(r"(?s)/\*.*?\*/"),
            import: static_regex(r#"@import\s+["']([^\s"']+?)["']\s*;"#),
        }
    }

    pub fn specifiers(&self, source: &str) -> Vec<String> {
        let content = self.comment.replace_all(source, "");
        captures(&self.import, &content)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

impl Default for StylesheetAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl FileAnalyzer for StylesheetAnalyzer {
    fn file_type(&self) -> FileType {
        FileType::Stylesheet
    }

    fn analyze(
        &self,
        path: &Path,
        ctx: &AnalysisContext<'_>,
        additional: Option<&BTreeSet<PathBuf>>,
    ) -> Result<FileRecord> {
        let mut record = ctx.new_record(path, true, additional);
        if extension_of(path) != Some(NATIVE_EXTENSION) {
            return Ok(record);
        }

        let source = ctx.runtime.read_to_string(path)?;
        for specifier in self.specifiers(&source) {
            let target = resolve_root_or_relative(path, &specifier, &ctx.system.src_dir);
            let resolved = ctx
                .extensions
                .resolve_with_extension(&target, FileType::Stylesheet, ctx.runtime)
                .unwrap_or(target);
            record.dependencies.insert(resolved);
        }

        tracing::debug!(
            path = %path.display(),
            dependencies = record.dependencies.len(),
            "analyzed stylesheet"
        );
        Ok(record)
    }
}
