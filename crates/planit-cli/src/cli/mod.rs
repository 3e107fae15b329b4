//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use planit_core::config::Config;
use planit_core::context::AppContext;
use planit_core::logging;

mod commands;

#[derive(Parser)]
#[command(name = "planit")]
#[command(version)]
#[command(about = "PlanIt task and calendar client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Security posture: secure or vulnerable (overrides PLANIT_POSTURE and config)
    #[arg(long, global = true, value_name = "POSTURE")]
    posture: Option<String>,

    /// Base URL of the PlanIt API (overrides PLANIT_API_URL and config)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sign in and store the session
    Login {
        /// Account name (defaults to the remembered one)
        #[arg(short, long)]
        username: Option<String>,

        /// Password (prompted for without echo when omitted; PLANIT_PASSWORD or piped stdin also work)
        #[arg(long, env = "PLANIT_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Remember this login on this device
        #[arg(long)]
        remember: bool,

        /// Forget any remembered login
        #[arg(long, conflicts_with = "remember")]
        forget: bool,
    },

    /// Create a new account
    Register {
        /// Account name
        #[arg(short, long)]
        username: String,

        /// Password (prompted for when omitted)
        #[arg(long, env = "PLANIT_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Password confirmation (prompted for when omitted)
        #[arg(long)]
        confirm: Option<String>,
    },

    /// Drop the stored session
    Logout {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show who is signed in
    Whoami,

    /// Print the admin key embedded in the vulnerable build
    Secret,

    /// Manage tasks
    Tasks {
        #[command(subcommand)]
        command: TaskCommands,
    },

    /// Manage calendar events
    Events {
        #[command(subcommand)]
        command: EventCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum TaskCommands {
    /// List all tasks
    List {
        /// List another user's tasks (vulnerable posture only)
        #[arg(long, value_name = "ID")]
        user_id: Option<i64>,
    },
    /// Search task titles and descriptions
    Search {
        #[arg(value_name = "QUERY")]
        query: String,
    },
    /// Add a task
    Add {
        #[arg(short, long)]
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Flip a task between done and not done
    Toggle {
        #[arg(value_name = "TASK_ID")]
        id: i64,
    },
    /// Delete a task
    Delete {
        #[arg(value_name = "TASK_ID")]
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(clap::Subcommand)]
enum EventCommands {
    /// List all events
    List {
        /// List another user's events (vulnerable posture only)
        #[arg(long, value_name = "ID")]
        user_id: Option<i64>,
    },
    /// Add an event
    Add {
        #[arg(short, long)]
        title: String,

        /// Date in YYYY-MM-DD format
        #[arg(short, long)]
        date: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Save the API base URL to the config file
    SetApiUrl {
        #[arg(value_name = "URL")]
        url: String,
    },
    /// Save the default posture to the config file
    SetPosture {
        #[arg(value_name = "POSTURE")]
        posture: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load().context("load config")?;
    let _log_guard = logging::init(&config, cli.verbose)?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli, config).await })
}

async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    let Cli {
        command,
        posture,
        api_url,
        verbose: _,
    } = cli;

    let context = || -> Result<AppContext> {
        let posture = config.resolve_posture(posture.as_deref())?;
        let api_url = config.resolve_api_url(api_url.as_deref())?;
        tracing::debug!(%posture, %api_url, "client context");
        AppContext::from_config(&config, &api_url, posture)
    };

    match command {
        Commands::Login {
            username,
            password,
            remember,
            forget,
        } => {
            commands::auth::login(
                &context()?,
                commands::auth::LoginOptions {
                    username,
                    password,
                    remember,
                    forget,
                },
            )
            .await
        }
        Commands::Register {
            username,
            password,
            confirm,
        } => commands::auth::register(&context()?, &username, password, confirm).await,
        Commands::Logout { yes } => commands::auth::logout(&context()?, yes),
        Commands::Whoami => commands::auth::whoami(&context()?),
        Commands::Secret => commands::auth::secret(&context()?),

        Commands::Tasks { command } => {
            let ctx = context()?;
            match command {
                TaskCommands::List { user_id } => commands::tasks::list(&ctx, user_id).await,
                TaskCommands::Search { query } => commands::tasks::search(&ctx, &query).await,
                TaskCommands::Add { title, description } => {
                    commands::tasks::add(&ctx, &title, &description).await
                }
                TaskCommands::Toggle { id } => commands::tasks::toggle(&ctx, id).await,
                TaskCommands::Delete { id, yes } => commands::tasks::delete(&ctx, id, yes).await,
            }
        }

        Commands::Events { command } => {
            let ctx = context()?;
            match command {
                EventCommands::List { user_id } => commands::events::list(&ctx, user_id).await,
                EventCommands::Add { title, date } => {
                    commands::events::add(&ctx, &title, &date).await
                }
            }
        }

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::SetApiUrl { url } => commands::config::set_api_url(&url),
            ConfigCommands::SetPosture { posture } => commands::config::set_posture(&posture),
        },
    }
}
