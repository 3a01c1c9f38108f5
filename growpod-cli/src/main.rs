mod app;
mod commands;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::app::App;

#[derive(Parser)]
#[command(name = "growpod")]
#[command(about = "Find, join and run community gardens from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with Google
    Login {
        /// Register a GrowPod profile after signing in
        #[arg(long)]
        sign_up: bool,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// List accounts that have signed in on this machine
    Users,
    /// Register a GrowPod profile for the signed-in account
    SignUp {
        #[arg(long)]
        biography: Option<String>,

        #[arg(long)]
        zip: Option<String>,
    },
    /// Show a user profile (defaults to the signed-in user)
    Profile { user_id: Option<String> },
    /// Find gardens near a zip code (defaults to your own)
    Find {
        #[arg(short, long)]
        zip: Option<String>,
    },
    /// Join a garden
    Join { garden_id: String },
    /// Gardens you administer and belong to
    Gardens,
    /// Leave a garden
    Leave { garden_id: String },
    /// Create a garden with you as its admin
    CreateGarden {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        zip: Option<String>,
    },
    /// Manage a garden you administer
    Admin {
        garden_id: Option<String>,

        #[command(subcommand)]
        action: Option<AdminAction>,
    },
    /// Show a garden and the day's calendar events
    Schedule {
        garden_id: Option<String>,

        /// Day to show (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Add an event to your Google Calendar
    Event {
        title: Option<String>,

        /// Start date/time (e.g., "2025-03-20 15:00" or "tomorrow 9am")
        #[arg(short, long)]
        start: Option<String>,

        /// Duration (e.g., "1h", "90m")
        #[arg(long)]
        duration: Option<String>,

        /// IANA time zone (default: system time zone)
        #[arg(long)]
        timezone: Option<String>,

        /// Participant email, repeatable
        #[arg(short = 'w', long = "with")]
        participants: Vec<String>,

        #[arg(long)]
        description: Option<String>,
    },
    /// Show the garden task
    Task {
        /// Read /task instead of /schedule
        #[arg(long)]
        raw: bool,
    },
    /// Show configuration paths and settings
    Config,
}

#[derive(Subcommand)]
pub enum AdminAction {
    /// Remove a member from the garden
    RemoveUser { user_id: String },
    /// Add a plant to the garden
    AddPlant {
        #[arg(long)]
        nickname: Option<String>,

        #[arg(long)]
        count: Option<String>,

        #[arg(long)]
        plant_type: Option<String>,
    },
    /// Remove a plant from the garden
    RemovePlant { plant_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::Config = cli.command {
        return commands::config::run();
    }

    let mut app = App::init().await?;

    match cli.command {
        Commands::Login { sign_up } => commands::auth::login(&mut app, sign_up).await,
        Commands::Logout => commands::auth::logout(&mut app).await,
        Commands::Whoami => commands::auth::whoami(&app),
        Commands::Users => commands::auth::users(&app),
        Commands::SignUp { biography, zip } => {
            commands::auth::sign_up(&app, biography, zip).await
        }
        Commands::Profile { user_id } => commands::profile::run(&app, user_id.as_deref()).await,
        Commands::Find { zip } => commands::gardens::find(&app, zip.as_deref()).await,
        Commands::Join { garden_id } => commands::gardens::join(&app, &garden_id).await,
        Commands::Gardens => commands::gardens::mine(&app).await,
        Commands::Leave { garden_id } => commands::gardens::leave(&app, &garden_id).await,
        Commands::CreateGarden {
            name,
            description,
            zip,
        } => commands::gardens::create(&app, name, description, zip).await,
        Commands::Admin { garden_id, action } => {
            commands::admin::run(&app, garden_id.as_deref(), action).await
        }
        Commands::Schedule { garden_id, date } => {
            commands::schedule::run(&app, garden_id.as_deref(), date.as_deref()).await
        }
        Commands::Event {
            title,
            start,
            duration,
            timezone,
            participants,
            description,
        } => {
            let args = commands::event::EventArgs {
                title,
                start,
                duration,
                timezone,
                participants,
                description,
            };
            commands::event::run(&app, args).await
        }
        Commands::Task { raw } => commands::task::run(&app, raw).await,
        Commands::Config => Ok(()),
    }
}
