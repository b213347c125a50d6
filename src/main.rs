use anyhow::Result;
use clap::{Parser, Subcommand};
use portfolio_ai_flows::app::App;
use portfolio_ai_flows::catalog::Catalog;
use portfolio_ai_flows::models::{ContactMessage, ImageRequest, RecommendationRequest};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "portfolio-ai-flows")]
#[command(about = "Run the portfolio's AI image and recommendation flows")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate an image from a 3-200 character prompt.
    Image {
        #[arg(value_name = "PROMPT")]
        prompt: String,
    },
    /// Recommend existing projects and new ideas for a set of interests.
    Recommend {
        /// Comma-separated interests, e.g. "data visualization, machine learning".
        #[arg(value_name = "INTERESTS")]
        interests: String,
        /// Candidate project name; repeat for several. Defaults to the catalog titles.
        #[arg(long = "project", value_name = "NAME")]
        projects: Vec<String>,
    },
    /// List the project catalog.
    Projects,
    /// List skills, highest level first.
    Skills,
    /// Validate a contact form submission.
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Image { prompt } => {
            let app = App::new()?;
            let result = app.generate_image(&ImageRequest::new(prompt)).await?;
            print_json(&result)
        }
        Command::Recommend {
            interests,
            projects,
        } => {
            let project_list = if projects.is_empty() {
                Catalog::embedded()?.project_names()
            } else {
                projects
            };
            let app = App::new()?;
            let result = app
                .recommend_projects(&RecommendationRequest::new(interests, project_list))
                .await?;
            if result.is_empty() {
                info!("No suggestions found for these interests");
            }
            print_json(&result)
        }
        Command::Projects => print_json(&Catalog::embedded()?.projects()),
        Command::Skills => print_json(&Catalog::embedded()?.skills_by_level()),
        Command::Contact {
            name,
            email,
            message,
        } => {
            let contact = ContactMessage {
                name,
                email,
                message,
            };
            contact.validate()?;
            info!("Contact message from {} is valid", contact.name);
            print_json(&contact)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio_ai_flows=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    match run(args.command).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
