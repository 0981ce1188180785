//! Script analyzer (`.js` / `.ts`).

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use regex::Regex;

use super::resolver::resolve_specifier;
use super::{AnalysisContext, FileAnalyzer, FileType, captures, static_regex};
use crate::error::{MissingFileError, Result};
use crate::graph::FileRecord;

/// Scans `import`, re-export and `require()` references.
///
/// Comments are stripped first so commented-out imports are ignored. Specifiers
/// are resolved through aliases, then root/relative rules, then the script
/// extension candidates.
#[derive(Debug)]
pub struct ScriptAnalyzer {
    block_comment: Regex,
    line_comment: Regex,
    patterns: [Regex; 4],
}

impl ScriptAnalyzer {
    pub fn new() -> Self {
        Self {
            block_comment: static_regex(r"(?s)/\*.*?\*/"),
            line_comment: static_regex(r"//[^\n]*"),
            patterns: [
                static_regex(r#"import\s+[^'"]+?\s+from\s+['"]([^\s'"]+?)['"]"#),
                static_regex(r#"import\s+['"]([^\s'"]+?)['"]"#),
                static_regex(r#"export\s+[^'";]+?\s+from\s+['"]([^\s'"]+?)['"]"#),
                static_regex(r#"require\(\s*['"]([^\s'"]+?)['"]"#),
            ],
        }
    }

    /// Raw reference strings found in `source`, comments excluded.
    pub fn specifiers(&self, source: &str) -> Vec<String> {
        let without_blocks = self.block_comment.replace_all(source, "");
        let content = self.line_comment.replace_all(&without_blocks, "");

        let mut found = Vec::new();
        for pattern in &self.patterns {
            for specifier in captures(pattern, &content) {
                found.push(specifier.to_string());
            }
        }
        found
    }
}

impl Default for ScriptAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl FileAnalyzer for ScriptAnalyzer {
    fn file_type(&self) -> FileType {
        FileType::Script
    }

    fn analyze(
        &self,
        path: &Path,
        ctx: &AnalysisContext<'_>,
        additional: Option<&BTreeSet<PathBuf>>,
    ) -> Result<FileRecord> {
        let source = ctx.runtime.read_to_string(path)?;
        let mut record = ctx.new_record(path, false, additional);

        for specifier in self.specifiers(&source) {
            let target = resolve_specifier(
                path,
                &specifier,
                &ctx.system.src_dir,
                &ctx.system.aliases,
            );

            let resolved = ctx
                .extensions
                .resolve_with_extension(&target, FileType::Script, ctx.runtime)
                .ok_or_else(|| MissingFileError::UnresolvedScript {
                    specifier: specifier.clone(),
                    importer: path.to_path_buf(),
                    candidates: ctx
                        .extensions
                        .candidates(FileType::Script)
                        .iter()
                        .map(|ext| format!("{}.{}", target.display(), ext))
                        .collect(),
                })?;

            record.dependencies.insert(resolved);
        }

        tracing::debug!(
            path = %path.display(),
            dependencies = record.dependencies.len(),
            "analyzed script"
        );
        Ok(record)
    }
}
