//! Markup analyzer (`.wxml`).

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use regex::Regex;

use super::resolver::resolve_root_or_relative;
use super::{AnalysisContext, FileAnalyzer, FileType, captures, static_regex};
use crate::error::Result;
use crate::graph::FileRecord;

/// Scans `<import>`, `<include>` and `<wxs>` references.
///
/// Markup may use root paths, so aliases are not applied. A reference without
/// extension is completed with the markup candidates when one exists; an
/// unresolved reference is kept as-is and dropped later by the engine.
#[derive(Debug)]
pub struct MarkupAnalyzer {
    comment: Regex,
    template: Regex,
    module: Regex,
}

impl MarkupAnalyzer {
    pub fn new() -> Self {
        Self {
            comment: static_regex(r"(?s)<!--.*?-->"),
            template: static_regex(r#"<(?:import|include)\s+src=["']([^"']+?)["']\s*/?>"#),
            module: static_regex(r#"<wxs\s+[^>]*?src=["']([^"']+?)["']"#),
        }
    }

    /// Raw reference strings found in `source`, comments excluded.
    pub fn specifiers(&self, source: &str) -> Vec<String> {
        let content = self.comment.replace_all(source, "");

        captures(&self.template, &content)
            .into_iter()
            .chain(captures(&self.module, &content))
            .map(str::to_string)
            .collect()
    }
}

impl Default for MarkupAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl FileAnalyzer for MarkupAnalyzer {
    fn file_type(&self) -> FileType {
        FileType::Markup
    }

    fn analyze(
        &self,
        path: &Path,
        ctx: &AnalysisContext<'_>,
        additional: Option<&BTreeSet<PathBuf>>,
    ) -> Result<FileRecord> {
        let source = ctx.runtime.read_to_string(path)?;
        let mut record = ctx.new_record(path, true, additional);

        for specifier in self.specifiers(&source) {
            let target = resolve_root_or_relative(path, &specifier, &ctx.system.src_dir);
            let resolved = ctx
                .extensions
                .resolve_with_extension(&target, FileType::Markup, ctx.runtime)
                .unwrap_or(target);
            record.dependencies.insert(resolved);
        }

        tracing::debug!(
            path = %path.display(),
            dependencies = record.dependencies.len(),
            "analyzed markup"
        );
        Ok(record)
    }
}
