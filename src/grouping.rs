//! The grouping engine: joins a flat workflow list against a folder config.
//!
//! Pure and total. Identical inputs always yield identical output, and every
//! input descriptor lands in exactly one bucket.

use std::collections::HashMap;

use crate::models::{FolderBucket, FolderConfig, GroupedWorkflows, WorkflowDescriptor};

/// Group workflows into the folders that claim their filenames.
///
/// The filename lookup is built by iterating config folders in declaration
/// order; when two folders list the same filename, the later folder's claim
/// wins (matching the observed behavior of duplicate listings; the fetcher
/// flags these as a diagnostic, the engine just resolves them).
///
/// Workflows are visited in their received order. Matched descriptors append
/// to their folder's bucket, the rest to `uncategorized`. Buckets come out
/// in config declaration order; folders that matched nothing are omitted.
pub fn group(config: &FolderConfig, workflows: &[WorkflowDescriptor]) -> GroupedWorkflows {
    let mut claims: HashMap<&str, usize> = HashMap::new();
    for (index, folder) in config.folders.iter().enumerate() {
        for filename in &folder.workflows {
            claims.insert(filename.as_str(), index);
        }
    }

    let mut buckets: Vec<Vec<WorkflowDescriptor>> = vec![Vec::new(); config.folders.len()];
    let mut uncategorized = Vec::new();
    for workflow in workflows {
        match claims.get(workflow.filename.as_str()) {
            Some(&index) => buckets[index].push(workflow.clone()),
            None => uncategorized.push(workflow.clone()),
        }
    }

    let folders = config
        .folders
        .iter()
        .zip(buckets)
        .filter(|(_, bucket)| !bucket.is_empty())
        .map(|(definition, workflows)| FolderBucket {
            name: definition.name.clone(),
            workflows,
        })
        .collect();

    GroupedWorkflows {
        folders,
        uncategorized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(json: &str) -> FolderConfig {
        FolderConfig::parse(json).unwrap()
    }

    fn workflows(specs: &[(&str, &str)]) -> Vec<WorkflowDescriptor> {
        specs
            .iter()
            .map(|(name, path)| WorkflowDescriptor::new(*name, *path))
            .collect()
    }

    #[test]
    fn test_example_scenario() {
        let config = config(
            r#"{"folders":[
                {"name":"Build","workflows":["ci.yml"]},
                {"name":"Deploy","workflows":["deploy.yml"]}
            ]}"#,
        );
        let input = workflows(&[
            ("CI", ".github/workflows/ci.yml"),
            ("Lint", ".github/workflows/lint.yml"),
        ]);

        let result = group(&config, &input);

        assert_eq!(result.folders.len(), 1);
        assert_eq!(result.folders[0].name, "Build");
        assert_eq!(result.folders[0].workflows, vec![input[0].clone()]);
        assert_eq!(result.uncategorized, vec![input[1].clone()]);
    }

    #[test]
    fn test_empty_config_everything_uncategorized() {
        let config = config(r#"{"folders":[]}"#);
        let input = workflows(&[
            ("B", "b.yml"),
            ("A", "a.yml"),
            ("C", "c.yml"),
        ]);

        let result = group(&config, &input);

        assert!(result.folders.is_empty());
        assert_eq!(result.uncategorized, input);
    }

    #[test]
    fn test_partition_is_total_and_exclusive() {
        let config = config(
            r#"{"folders":[
                {"name":"One","workflows":["a.yml","c.yml"]},
                {"name":"Two","workflows":["e.yml"]}
            ]}"#,
        );
        let input = workflows(&[
            ("A", "a.yml"),
            ("B", "b.yml"),
            ("C", "c.yml"),
            ("D", "d.yml"),
            ("E", "e.yml"),
        ]);

        let result = group(&config, &input);

        assert_eq!(result.len(), input.len());

        // Exclusivity: no filename appears in two places.
        let mut seen = std::collections::HashSet::new();
        for bucket in &result.folders {
            for workflow in &bucket.workflows {
                assert!(seen.insert(workflow.filename.clone()));
            }
        }
        for workflow in &result.uncategorized {
            assert!(seen.insert(workflow.filename.clone()));
        }
    }

    #[test]
    fn test_deterministic() {
        let config = config(
            r#"{"folders":[
                {"name":"One","workflows":["a.yml"]},
                {"name":"Two","workflows":["b.yml"]}
            ]}"#,
        );
        let input = workflows(&[("A", "a.yml"), ("B", "b.yml"), ("C", "c.yml")]);

        assert_eq!(group(&config, &input), group(&config, &input));
    }

    #[test]
    fn test_later_folder_wins_on_duplicate_listing() {
        let config = config(
            r#"{"folders":[
                {"name":"A","workflows":["x.yml"]},
                {"name":"B","workflows":["x.yml"]}
            ]}"#,
        );
        let input = workflows(&[("X", "x.yml")]);

        let result = group(&config, &input);

        assert_eq!(result.folders.len(), 1);
        assert_eq!(result.folders[0].name, "B");
        assert!(result.uncategorized.is_empty());
    }

    #[test]
    fn test_folders_keep_declaration_order() {
        let config = config(
            r#"{"folders":[
                {"name":"First","workflows":["z.yml"]},
                {"name":"Second","workflows":["a.yml"]}
            ]}"#,
        );
        // "Second"'s workflow arrives before "First"'s.
        let input = workflows(&[("A", "a.yml"), ("Z", "z.yml")]);

        let result = group(&config, &input);

        assert_eq!(result.folders[0].name, "First");
        assert_eq!(result.folders[1].name, "Second");
    }

    #[test]
    fn test_within_folder_order_is_source_order() {
        let config = config(r#"{"folders":[{"name":"All","workflows":["a.yml","b.yml","c.yml"]}]}"#);
        let input = workflows(&[("C", "c.yml"), ("A", "a.yml"), ("B", "b.yml")]);

        let result = group(&config, &input);

        let names: Vec<&str> = result.folders[0]
            .workflows
            .iter()
            .map(|w| w.name.as_str())
            .collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_filename_match_is_case_sensitive() {
        let config = config(r#"{"folders":[{"name":"Build","workflows":["CI.yml"]}]}"#);
        let input = workflows(&[("CI", "ci.yml")]);

        let result = group(&config, &input);

        assert!(result.folders.is_empty());
        assert_eq!(result.uncategorized.len(), 1);
    }

    #[test]
    fn test_empty_workflow_list() {
        let config = config(r#"{"folders":[{"name":"Build","workflows":["ci.yml"]}]}"#);
        let result = group(&config, &[]);

        assert!(result.folders.is_empty());
        assert!(result.uncategorized.is_empty());
        assert!(result.is_empty());
    }
}
