//! Account session commands: register, login, logout, whoami

use clap::Args;
use tracing::{debug, warn};

use super::{password_or_prompt, CliContext, CliResult};
use crate::client::{ClientError, StoredToken};
use crate::display::format_user_details;
use crate::models::{LoginRequest, RegisterRequest};

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Display name
    #[arg(short, long)]
    pub name: String,

    /// Email address used to log in
    #[arg(short, long)]
    pub email: String,

    /// Password (prompted when omitted)
    #[arg(long, env = "FINTRACK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(short, long)]
    pub email: String,

    /// Password (prompted when omitted)
    #[arg(long, env = "FINTRACK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

pub async fn handle_register(ctx: &CliContext, args: RegisterArgs) -> CliResult<()> {
    let password = password_or_prompt(args.password, "Password: ")?;
    let response = ctx
        .client
        .auth()
        .register(&RegisterRequest {
            name: Some(args.name),
            email: Some(args.email.clone()),
            password: Some(password),
        })
        .await?;

    println!("{}", response.message);
    println!("Run 'fintrack login --email {}' to sign in.", args.email);
    Ok(())
}

pub async fn handle_login(ctx: &mut CliContext, args: LoginArgs) -> CliResult<()> {
    let password = password_or_prompt(args.password, "Password: ")?;
    let response = ctx
        .client
        .auth()
        .login(&LoginRequest {
            email: Some(args.email.clone()),
            password: Some(password),
        })
        .await?;

    let mut stored = StoredToken::new(response.token.clone(), args.email.trim());
    stored.expires_at = response.expires_at;
    ctx.tokens.save(&stored)?;
    ctx.client.set_token(Some(response.token));

    // Cache the user id right away; a failure here is not fatal
    match ctx.user_id().await {
        Ok(id) => debug!(user = %id, "resolved user id after login"),
        Err(e) => warn!(error = %e, "could not resolve user id after login"),
    }

    println!("Logged in as {}", stored.email);
    if let Some(expires_at) = stored.expires_at {
        println!("Session valid until {}", expires_at.format("%Y-%m-%d %H:%M UTC"));
    }
    Ok(())
}

pub async fn handle_logout(ctx: &mut CliContext) -> CliResult<()> {
    if ctx.tokens.load()?.is_none() {
        println!("Not logged in.");
        return Ok(());
    }

    match ctx.client.auth().logout().await {
        Ok(()) => {}
        // The server already forgot the session
        Err(ClientError::Api(e)) if e.is_unauthorized() => {}
        Err(e) => return Err(e),
    }

    ctx.tokens.clear()?;
    ctx.client.set_token(None);
    println!("Logged out.");
    Ok(())
}

pub async fn handle_whoami(ctx: &CliContext) -> CliResult<()> {
    let id = ctx.user_id().await?;
    let user = ctx.client.users().get(id).await?;
    print!("{}", format_user_details(&user, &ctx.display));
    Ok(())
}
