use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tutorials_app::{AddTutorialModel, TutorialDetailsModel, TutorialsListModel};
use tutorials_http::{TutorialApi, TutorialClient};
use tutorials_kernel::settings::Settings;
use tutorials_kernel::{LogNavigator, Tutorial, TutorialId};

/// Manage tutorials on a tutorials REST backend.
#[derive(Debug, Parser)]
#[command(name = "tutorials", version, about)]
struct Cli {
    /// Base URL of the tutorials collection (overrides `api.endpoint`)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every tutorial
    List,
    /// List tutorials whose title matches
    Search { title: String },
    /// Show one tutorial
    Show { id: String },
    /// Create a tutorial
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        published: bool,
    },
    /// Change the title or description of a tutorial
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Mark a tutorial as published
    Publish { id: String },
    /// Mark a tutorial as pending
    Unpublish { id: String },
    /// Delete one tutorial
    Delete { id: String },
    /// Delete every tutorial
    DeleteAll,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load tutorials settings")?;
    if let Some(endpoint) = cli.endpoint {
        settings.api.endpoint = endpoint;
    }
    tutorials_telemetry::init(&settings.telemetry);

    let client = TutorialClient::from_settings(&settings.api)
        .with_context(|| "failed to build HTTP client")?;
    tracing::debug!(endpoint = %client.base_url(), "using tutorials endpoint");
    let api: Arc<dyn TutorialApi> = Arc::new(client);

    run(cli.command, api).await
}

async fn run(command: Command, api: Arc<dyn TutorialApi>) -> anyhow::Result<()> {
    match command {
        Command::List => {
            let mut list = TutorialsListModel::new(api);
            list.init().await.context("failed to retrieve tutorials")?;
            print_list(list.tutorials());
        }
        Command::Search { title } => {
            let mut list = TutorialsListModel::new(api);
            list.title = title;
            list.search_title()
                .await
                .context("failed to search tutorials")?;
            print_list(list.tutorials());
        }
        Command::Show { id } => {
            let details = open(api, &id).await?;
            print_tutorial(details.current_tutorial());
        }
        Command::Add {
            title,
            description,
            published,
        } => {
            let mut add = AddTutorialModel::new(api);
            add.set_title(title);
            add.set_description(description);
            add.set_published(published);
            add.save_tutorial()
                .await
                .context("failed to create tutorial")?;
            if let Some(id) = &add.tutorial().id {
                println!("You submitted successfully! id={id}");
            }
        }
        Command::Update {
            id,
            title,
            description,
        } => {
            let mut details = open(api, &id).await?;
            if let Some(title) = title {
                details.set_title(title);
            }
            if let Some(description) = description {
                details.set_description(description);
            }
            details
                .update_tutorial()
                .await
                .context("failed to update tutorial")?;
            print_message(&details);
        }
        Command::Publish { id } => set_published(api, &id, true).await?,
        Command::Unpublish { id } => set_published(api, &id, false).await?,
        Command::Delete { id } => {
            let mut details = open(api, &id).await?;
            details
                .delete_tutorial()
                .await
                .context("failed to delete tutorial")?;
            println!("Deleted tutorial {id}");
        }
        Command::DeleteAll => {
            let mut list = TutorialsListModel::new(api);
            list.remove_all_tutorials()
                .await
                .context("failed to remove all tutorials")?;
            println!("Removed all tutorials ({} left)", list.tutorials().len());
        }
    }

    Ok(())
}

async fn open(api: Arc<dyn TutorialApi>, id: &str) -> anyhow::Result<TutorialDetailsModel> {
    let mut details = TutorialDetailsModel::new(api, Arc::new(LogNavigator));
    details
        .get_tutorial(&TutorialId::from(id))
        .await
        .with_context(|| format!("failed to load tutorial {id}"))?;
    Ok(details)
}

async fn set_published(api: Arc<dyn TutorialApi>, id: &str, status: bool) -> anyhow::Result<()> {
    let mut details = open(api, id).await?;
    details
        .update_published(status)
        .await
        .context("failed to update publish status")?;
    print_message(&details);
    Ok(())
}

fn print_list(tutorials: &[Tutorial]) {
    if tutorials.is_empty() {
        println!("No tutorials.");
        return;
    }
    for (index, tutorial) in tutorials.iter().enumerate() {
        let id = tutorial
            .id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        println!("{:>3}. [{}] {}", index + 1, id, tutorial.title);
    }
}

fn print_tutorial(tutorial: &Tutorial) {
    let status = if tutorial.published {
        "Published"
    } else {
        "Pending"
    };
    println!("Title:       {}", tutorial.title);
    println!("Description: {}", tutorial.description);
    println!("Status:      {}", status);
}

fn print_message(details: &TutorialDetailsModel) {
    if let Some(message) = details.message() {
        println!("{message}");
    }
}
