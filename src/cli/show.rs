//! The main command: fetch, group and print a repository's workflows.

use color_eyre::eyre::eyre;
use color_eyre::Result;
use tokio::runtime::Runtime;

use crate::auth::CredentialsManager;
use crate::config::{CacheStore, ConfigOrigin};
use crate::github::GithubClient;
use crate::models::{GroupedWorkflows, RepoId, SourceTrust, WorkflowListing};
use crate::pipeline::{Organizer, OrganizeOutcome};
use crate::settings::{Settings, SettingsStore};
use crate::workflows::WorkflowSource;

/// Run the pipeline for `owner/name` and print the result.
pub fn handle_show_command(repo: &str, runtime: &Runtime) -> Result<()> {
    let repo = RepoId::parse(repo)
        .ok_or_else(|| eyre!("expected <owner>/<name>, got: {}", repo))?;

    let credentials = CredentialsManager::new()
        .map(|manager| manager.load())
        .unwrap_or_default();
    let settings_store = SettingsStore::new();
    let mut settings = settings_store
        .as_ref()
        .map(|store| store.load())
        .unwrap_or_default();
    let cache_store = CacheStore::new();
    let cache = cache_store
        .as_ref()
        .map(|store| store.load())
        .unwrap_or_default();

    let client = GithubClient::new().with_token(credentials.token);

    if !settings.is_enabled(&repo) {
        // Organization is off for this repository: show the plain listing.
        let source = WorkflowSource::new(client);
        match runtime.block_on(source.fetch(&repo)) {
            Ok(listing) => {
                println!(
                    "Folder organization is disabled for {} (wfold enable {} to turn it on).\n",
                    repo, repo
                );
                print_flat(&listing);
            }
            Err(_) => println!("No workflow data available for {}.", repo),
        }
        return Ok(());
    }

    let mut organizer = Organizer::new(client, cache);
    let outcome = runtime.block_on(organizer.organize(&repo));

    match outcome {
        OrganizeOutcome::Organized {
            grouped,
            trust,
            origin,
        } => print_grouped(&repo, &grouped, trust, &origin, &settings),
        OrganizeOutcome::Unconfigured {
            listing,
            can_create_config,
        } => {
            println!("{} has no folder config.", repo);
            if can_create_config {
                println!(
                    "You have write access: add {} to organize these workflows.",
                    crate::github::CONFIG_PATH
                );
            }
            println!();
            print_flat(&listing);
        }
        OrganizeOutcome::Unavailable => {
            println!("No workflow data available for {}.", repo);
        }
    }

    // Persist what the run learned: refreshed cache entries and the latest
    // quota reading.
    if let Some(store) = cache_store {
        store.save(organizer.cache());
    }
    if let Some(remaining) = organizer.last_rate_limit() {
        settings.rate_limit_remaining = Some(remaining);
        if let Some(store) = settings_store {
            store.save(&settings);
        }
    }

    Ok(())
}

fn print_grouped(
    repo: &RepoId,
    grouped: &GroupedWorkflows,
    trust: SourceTrust,
    origin: &ConfigOrigin,
    settings: &Settings,
) {
    match origin {
        ConfigOrigin::Cache => println!("{} (config from cache)", repo),
        ConfigOrigin::Branch(branch) => println!("{} (config from {})", repo, branch),
    }
    if trust == SourceTrust::BestEffort {
        println!("listing scraped from page; may be incomplete");
    }
    println!();

    for folder in &grouped.folders {
        if settings.is_expanded(repo, &folder.name) {
            println!("v {} ({})", folder.name, folder.workflows.len());
            for workflow in &folder.workflows {
                println!("    {}  [{}]", workflow.name, workflow.filename);
            }
        } else {
            println!("> {} ({})", folder.name, folder.workflows.len());
        }
    }

    if !grouped.uncategorized.is_empty() {
        println!("  Uncategorized ({})", grouped.uncategorized.len());
        for workflow in &grouped.uncategorized {
            println!("    {}  [{}]", workflow.name, workflow.filename);
        }
    }
}

fn print_flat(listing: &WorkflowListing) {
    if listing.trust == SourceTrust::BestEffort {
        println!("listing scraped from page; may be incomplete");
    }
    if listing.workflows.is_empty() {
        println!("No workflows found.");
        return;
    }
    for workflow in &listing.workflows {
        println!("  {}  [{}]", workflow.name, workflow.filename);
    }
}
