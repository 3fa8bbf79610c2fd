//! Profile commands for the logged-in user

use clap::Subcommand;

use super::{confirm, password_or_prompt, CliContext, CliResult};
use crate::client::ClientError;
use crate::display::format_user_details;

#[derive(Subcommand)]
pub enum UserCommands {
    /// Show your profile
    Show,

    /// Change name or email
    Edit {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,
    },

    /// Change your password
    Password {
        /// Current password (prompted when omitted)
        #[arg(long, hide = true)]
        current: Option<String>,

        /// New password (prompted when omitted)
        #[arg(long, hide = true)]
        new: Option<String>,
    },

    /// Delete your account and all of its records
    Delete {
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn handle_user_command(ctx: &mut CliContext, cmd: UserCommands) -> CliResult<()> {
    let id = ctx.user_id().await?;
    let users = ctx.client.users();

    match cmd {
        UserCommands::Show => {
            let user = users.get(id).await?;
            print!("{}", format_user_details(&user, &ctx.display));
        }

        UserCommands::Edit { name, email } => {
            if name.is_none() && email.is_none() {
                println!("Nothing to change.");
                return Ok(());
            }

            let mut dto = users.get(id).await?;
            dto.name = name.or(dto.name);
            let new_email = email.clone();
            dto.email = email.or(dto.email);
            dto.password = None;
            dto.current_password = None;

            let updated = users.update(id, &dto).await?;
            println!("Profile updated:");
            print!("{}", format_user_details(&updated, &ctx.display));

            // The stored session is keyed by email
            if let (Some(email), Some(mut stored)) = (new_email, ctx.tokens.load()?) {
                stored.email = updated.email.clone().unwrap_or(email);
                ctx.tokens.save(&stored)?;
            }
        }

        UserCommands::Password { current, new } => {
            let current = password_or_prompt(current, "Current password: ")?;
            let new = match new {
                Some(new) => new,
                None => {
                    let first = password_or_prompt(None, "New password: ")?;
                    let again = password_or_prompt(None, "Repeat new password: ")?;
                    if first != again {
                        return Err(ClientError::InvalidRequest(
                            "passwords do not match".into(),
                        ));
                    }
                    first
                }
            };

            let mut dto = users.get(id).await?;
            dto.password = Some(new);
            dto.current_password = Some(current);
            users.update(id, &dto).await?;
            println!("Password changed.");
        }

        UserCommands::Delete { yes } => {
            let user = users.get(id).await?;
            let prompt = format!(
                "Delete account {} and all of its expenses, incomes, payments and savings?",
                user.email.as_deref().unwrap_or("")
            );
            if !confirm(&prompt, yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            users.delete(id).await?;
            ctx.tokens.clear()?;
            ctx.client.set_token(None);
            println!("Account deleted.");
        }
    }

    Ok(())
}
