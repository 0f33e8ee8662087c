use anyhow::{Context, Result, bail};
use clap::Subcommand;
use tallybook::{AppSettings, DataFile, RemoteStore, Theme};
use tallybook_github::GithubStore;

use crate::config;

#[derive(Debug, Subcommand)]
pub enum Action {
    /// Print the current settings (token redacted)
    Show,
    /// First-run setup: connect a repository
    Init {
        /// GitHub access token
        #[arg(long)]
        token: String,
        /// Repository in "owner/name" form
        #[arg(long)]
        repo: String,
    },
    /// Update individual settings
    Set {
        #[arg(long)]
        company_name: Option<String>,
        #[arg(long)]
        address1: Option<String>,
        #[arg(long)]
        address2: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        contact: Option<String>,
        #[arg(long)]
        gstin: Option<String>,
        #[arg(long)]
        invoice_prefix: Option<String>,
        #[arg(long)]
        low_stock_threshold: Option<i64>,
        /// "light" or "dark"
        #[arg(long)]
        theme: Option<String>,
        #[arg(long)]
        token: Option<String>,
        #[arg(long)]
        repo: Option<String>,
    },
}

/// Runs against whichever settings the caller has in hand: the remote
/// document once the repository is connected, the local blob before that.
pub async fn run(action: Action, mut settings: AppSettings) -> Result<()> {
    match action {
        Action::Show => {
            print_settings(&settings);
            Ok(())
        }
        Action::Init { token, repo } => {
            settings.github_token = token;
            settings.github_repo = repo;
            persist(settings).await
        }
        Action::Set {
            company_name,
            address1,
            address2,
            email,
            contact,
            gstin,
            invoice_prefix,
            low_stock_threshold,
            theme,
            token,
            repo,
        } => {
            if let Some(name) = company_name {
                settings.company_details.name = name;
            }
            if let Some(address1) = address1 {
                settings.company_details.address1 = address1;
            }
            if let Some(address2) = address2 {
                settings.company_details.address2 = address2;
            }
            if let Some(email) = email {
                settings.company_details.email = email;
            }
            if let Some(contact) = contact {
                settings.company_details.contact = contact;
            }
            if let Some(gstin) = gstin {
                settings.company_details.gstin = gstin;
            }
            if let Some(prefix) = invoice_prefix {
                settings.invoice_prefix = prefix;
            }
            if let Some(threshold) = low_stock_threshold {
                settings.low_stock_threshold = threshold;
            }
            if let Some(theme) = theme {
                settings.theme = Theme::parse(&theme)
                    .ok_or_else(|| anyhow::anyhow!("unknown theme {theme:?} (use \"light\" or \"dark\")"))?;
            }
            if let Some(token) = token {
                settings.github_token = token;
            }
            if let Some(repo) = repo {
                settings.github_repo = repo;
            }
            persist(settings).await
        }
    }
}

/// Settings are saved remote-first, then cached locally, so a failed push
/// leaves the cached blob untouched.
async fn persist(settings: AppSettings) -> Result<()> {
    if !settings.is_repo_configured() {
        bail!(
            "GitHub is not configured yet. Run `tallybook settings init --token <token> --repo <owner/name>`."
        );
    }

    let store = GithubStore::new(settings.github_token.clone(), &settings.github_repo)?;
    let json = serde_json::to_string_pretty(&settings).context("failed to encode settings")?;
    store
        .upsert(DataFile::Settings.path(), &json, "update settings")
        .await
        .context("failed to save settings to GitHub")?;

    config::store_settings(&settings)?;
    println!("Settings saved.");
    Ok(())
}

fn print_settings(settings: &AppSettings) {
    let company = &settings.company_details;
    println!("Company:             {}", company.name);
    println!("Address:             {}, {}", company.address1, company.address2);
    println!("Email:               {}", company.email);
    println!("Contact:             {}", company.contact);
    println!("GSTIN:               {}", company.gstin);
    println!("Invoice prefix:      {}", settings.invoice_prefix);
    println!("Low-stock threshold: {}", settings.low_stock_threshold);
    println!(
        "Theme:               {}",
        match settings.theme {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    );
    println!(
        "Repository:          {}",
        if settings.github_repo.is_empty() {
            "(not set)"
        } else {
            &settings.github_repo
        }
    );
    println!("Token:               {}", redact(&settings.github_token));
}

fn redact(token: &str) -> String {
    if token.is_empty() {
        return "(not set)".into();
    }
    let prefix: String = token.chars().take(7).collect();
    format!("{prefix}…")
}
