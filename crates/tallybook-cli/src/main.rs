mod commands;
mod config;
mod state;

use std::sync::Arc;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tallybook::{Page, User, user};
use tallybook_github::GithubStore;

use crate::state::AppState;

#[derive(Parser)]
#[command(name = "tallybook")]
#[command(about = "Inventory and billing books kept in a GitHub repository")]
struct Cli {
    /// Username for role-gated commands
    #[arg(long, global = true)]
    user: Option<String>,

    /// Password matching --user
    #[arg(long, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Collection counts at a glance
    Dashboard,
    /// Manage the product catalog
    Products {
        #[command(subcommand)]
        action: commands::products::Action,
    },
    /// Record and review stock movements
    Stock {
        #[command(subcommand)]
        action: commands::stock::Action,
    },
    /// Draft and send estimates
    Estimates {
        #[command(subcommand)]
        action: commands::estimates::Action,
    },
    /// Raise and settle invoices
    Invoices {
        #[command(subcommand)]
        action: commands::invoices::Action,
    },
    /// Inventory and billing summaries
    Report,
    /// Manage login accounts
    Users {
        #[command(subcommand)]
        action: commands::users::Action,
    },
    /// Application and repository settings
    Settings {
        #[command(subcommand)]
        action: commands::settings::Action,
    },
}

fn page_for(command: &Command) -> Page {
    match command {
        Command::Dashboard => Page::Dashboard,
        Command::Products { .. } => Page::Products,
        Command::Stock { .. } => Page::Stock,
        Command::Estimates { .. } => Page::Estimates,
        Command::Invoices { .. } => Page::Invoices,
        Command::Report => Page::Reports,
        Command::Users { .. } => Page::Users,
        Command::Settings { .. } => Page::Settings,
    }
}

/// Login plus the role table decide who may run what. Until the first
/// account exists only the setup surfaces (users, settings) are open.
fn ensure_access(
    users: &[User],
    page: Page,
    username: Option<&str>,
    password: Option<&str>,
) -> Result<()> {
    if users.is_empty() {
        if matches!(page, Page::Users | Page::Settings) {
            return Ok(());
        }
        bail!("no users exist yet — create the first admin with `tallybook users add`");
    }

    let (Some(username), Some(password)) = (username, password) else {
        bail!("this command requires --user and --password");
    };

    let Some(account) = user::authenticate(users, username, password) else {
        bail!("invalid username or password");
    };

    if !page.allowed_for(account.role) {
        bail!(
            "{} ({}) is not permitted to open {}",
            account.username,
            account.role,
            page.label()
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let local_settings = config::load_settings();

    // First-run path: until the repository is connected, only `settings`
    // commands are available and they run from the local blob alone.
    if !local_settings.is_repo_configured() {
        return match cli.command {
            Command::Settings { action } => commands::settings::run(action, local_settings).await,
            _ => bail!(
                "GitHub is not configured yet. Run `tallybook settings init --token <token> --repo <owner/name>`."
            ),
        };
    }

    let store = GithubStore::new(
        local_settings.github_token.clone(),
        &local_settings.github_repo,
    )?;
    let mut state = AppState::load(Arc::new(store), local_settings).await?;

    ensure_access(
        &state.users,
        page_for(&cli.command),
        cli.user.as_deref(),
        cli.password.as_deref(),
    )?;

    match cli.command {
        Command::Dashboard => commands::dashboard::run(&state),
        Command::Products { action } => commands::products::run(&mut state, action).await,
        Command::Stock { action } => commands::stock::run(&mut state, action).await,
        Command::Estimates { action } => commands::estimates::run(&mut state, action).await,
        Command::Invoices { action } => commands::invoices::run(&mut state, action).await,
        Command::Report => commands::report::run(&state),
        Command::Users { action } => commands::users::run(&mut state, action).await,
        Command::Settings { action } => {
            commands::settings::run(action, state.settings.clone()).await
        }
    }
}
