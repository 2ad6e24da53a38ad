//! Performance benchmarks for the grouping engine.
//!
//! Tests grouping time for different workflow counts and folder shapes.
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use wfold::grouping::group;
use wfold::models::{FolderConfig, FolderDefinition, WorkflowDescriptor};

/// Generate a workflow list of the given size.
fn generate_workflows(count: usize) -> Vec<WorkflowDescriptor> {
    (0..count)
        .map(|i| {
            WorkflowDescriptor::new(
                format!("Workflow {}", i),
                format!(".github/workflows/wf-{}.yml", i),
            )
        })
        .collect()
}

/// Generate a config that claims every other workflow, spread over the
/// given number of folders.
fn generate_config(workflow_count: usize, folder_count: usize) -> FolderConfig {
    let folders = (0..folder_count)
        .map(|f| FolderDefinition {
            name: format!("Folder {}", f),
            workflows: (0..workflow_count)
                .filter(|i| i % 2 == 0 && i % folder_count == f)
                .map(|i| format!("wf-{}.yml", i))
                .collect(),
        })
        .collect();
    FolderConfig { folders }
}

fn bench_group_by_workflow_count(c: &mut Criterion) {
    let mut group_bench = c.benchmark_group("group_by_workflow_count");

    for size in [10, 100, 1000].iter() {
        let workflows = generate_workflows(*size);
        let config = generate_config(*size, 10);
        group_bench.throughput(Throughput::Elements(*size as u64));

        group_bench.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_workflows", size)),
            &(&config, &workflows),
            |b, &(config, workflows)| {
                b.iter(|| black_box(group(black_box(config), black_box(workflows))));
            },
        );
    }

    group_bench.finish();
}

fn bench_group_by_folder_count(c: &mut Criterion) {
    let mut group_bench = c.benchmark_group("group_by_folder_count");

    let workflows = generate_workflows(500);
    for folders in [1, 10, 50].iter() {
        let config = generate_config(500, *folders);

        group_bench.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_folders", folders)),
            &config,
            |b, config| {
                b.iter(|| black_box(group(black_box(config), black_box(&workflows))));
            },
        );
    }

    group_bench.finish();
}

criterion_group!(
    benches,
    bench_group_by_workflow_count,
    bench_group_by_folder_count
);
criterion_main!(benches);
