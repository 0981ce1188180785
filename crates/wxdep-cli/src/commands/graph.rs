//! Graph command implementation.

use std::path::Path;

use wxdep_graph::paths::{relative_path, to_slash};
use wxdep_graph::{DependencyGraph, compute_liveness};

use crate::cli::GraphArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};
use crate::ui::{self, GraphLine};

/// Execute the graph command.
///
/// Runs the initial cycle (including the fake importer rewrite) and prints
/// every remaining record, sorted by path.
pub async fn execute(args: GraphArgs) -> Result<()> {
    let (project, _) = utils::start(&args.project)?;
    let graph = project
        .plugin
        .graph()
        .ok_or_else(|| CliError::Custom("the build did not start".to_string()))?;

    let lines = graph_lines(graph, &project.config.src_dir);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else {
        ui::print_graph(&lines);
    }

    Ok(())
}

/// One line per record, paths relative to `src_dir`.
pub fn graph_lines(graph: &DependencyGraph, src_dir: &Path) -> Vec<GraphLine> {
    let view = compute_liveness(graph);
    let display = |path: &Path| to_slash(&relative_path(src_dir, path));

    graph
        .paths()
        .iter()
        .filter_map(|path| graph.get(path))
        .map(|record| GraphLine {
            path: display(record.absolute_path.as_path()),
            import_path: record.import_path.clone(),
            references: view.count(record.absolute_path.as_path()),
            dependencies: record.dependencies.iter().map(|dep| display(dep.as_path())).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wxdep_graph::FileRecord;

    #[test]
    fn test_graph_lines_are_relative_and_counted() {
        let mut graph = DependencyGraph::new("/project/src/app.json");
        graph.insert(
            FileRecord::new("/project/src/app.json", "../src/app.json")
                .with_dependency("/project/src/app.js"),
        );
        graph.insert(FileRecord::new("/project/src/app.js", "../src/app"));

        let lines = graph_lines(&graph, Path::new("/project/src"));

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].path, "app.js");
        // floor of one for files the root declares, plus the root's reference
        assert_eq!(lines[0].references, 2);
        assert_eq!(lines[1].path, "app.json");
        assert_eq!(lines[1].dependencies, vec!["app.js".to_string()]);
        assert_eq!(lines[1].references, 1);
    }
}
