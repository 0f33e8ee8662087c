use anyhow::{Result, bail};
use clap::Subcommand;
use tallybook::{UserRole, user};

use crate::state::AppState;

use super::format;

#[derive(Debug, Subcommand)]
pub enum Action {
    /// List accounts
    List,
    /// Create an account
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        /// admin | executive | store-manager | team-leader
        #[arg(long, default_value = "executive")]
        role: String,
    },
    /// Edit an account
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        username: Option<String>,
        /// New password; omit to keep the current one
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        role: Option<String>,
    },
    /// Delete an account
    Remove { id: String },
}

fn parse_role(s: &str) -> Result<UserRole> {
    UserRole::parse(s)
        .ok_or_else(|| anyhow::anyhow!("unknown role {s:?} (use admin, executive, store-manager or team-leader)"))
}

pub async fn run(state: &mut AppState, action: Action) -> Result<()> {
    match action {
        Action::List => {
            format::print_users(&state.users);
            Ok(())
        }
        Action::Add {
            name,
            username,
            password,
            role,
        } => {
            let requested = parse_role(&role)?;
            let was_empty = state.users.is_empty();

            let created = user::add_user(&mut state.users, name, username, password, requested)?;
            if was_empty && requested != created.role {
                eprintln!("warning: the first account is always created as Admin");
            }
            println!("Added {} ({})", created.username, created.role);
            state.save_users().await
        }
        Action::Update {
            id,
            name,
            username,
            password,
            role,
        } => {
            let role = role.as_deref().map(parse_role).transpose()?;
            user::update_user(&mut state.users, &id, name, username, password, role)?;
            println!("Updated {id}");
            state.save_users().await
        }
        Action::Remove { id } => {
            if state.users.len() == 1 {
                bail!("cannot remove the last account");
            }
            user::remove_user(&mut state.users, &id)?;
            println!("Removed {id}");
            state.save_users().await
        }
    }
}
