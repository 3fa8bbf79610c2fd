//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the REST client. Every handler talks to a
//! running fintrack server; only `init`, `config` and `serve` work locally.

pub mod activity;
pub mod auth;
pub mod expense;
pub mod income;
pub mod payment;
pub mod report;
pub mod saving;
pub mod user;

pub use activity::handle_activity_command;
pub use auth::{handle_login, handle_logout, handle_register, handle_whoami, LoginArgs, RegisterArgs};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use income::{handle_income_command, IncomeCommands};
pub use payment::{handle_payment_command, PaymentCommands};
pub use report::{handle_report_command, ReportCommands};
pub use saving::{handle_saving_command, SavingCommands};
pub use user::{handle_user_command, UserCommands};

use std::io::{self, Write};
use std::time::Duration;

use chrono::NaiveDate;
use clap::Args;

use crate::client::{resolve_user_id, ClientError, FinanceClient, TokenStore};
use crate::config::{FinancePaths, Settings};
use crate::display::DisplayOptions;
use crate::error::FinanceError;
use crate::models::dates::parse_date;
use crate::models::{ListFilter, Money, SortOrder, UserId};

/// Result type of CLI handlers
pub type CliResult<T> = Result<T, ClientError>;

/// Everything a command needs: settings, the client and the stored session
pub struct CliContext {
    pub paths: FinancePaths,
    pub settings: Settings,
    pub client: FinanceClient,
    pub tokens: TokenStore,
    pub display: DisplayOptions,
}

impl CliContext {
    /// Build a client for `settings.client.server_url`, authenticated with
    /// the stored token if there is one
    pub fn new(paths: FinancePaths, settings: Settings) -> CliResult<Self> {
        let tokens = TokenStore::new(&paths);
        let mut client = FinanceClient::with_timeout(
            settings.client.server_url.clone(),
            Duration::from_secs(settings.client.timeout_secs.max(1)),
        )?;
        if let Some(stored) = tokens.load()? {
            client.set_token(Some(stored.token));
        }
        let display = DisplayOptions::from_settings(&settings);

        Ok(Self {
            paths,
            settings,
            client,
            tokens,
            display,
        })
    }

    /// Fail early when no session is stored
    pub fn require_login(&self) -> CliResult<()> {
        match self.client.token() {
            Some(_) => Ok(()),
            None => Err(ClientError::NotLoggedIn(
                "run `fintrack login` first".into(),
            )),
        }
    }

    /// Id of the logged-in user
    pub async fn user_id(&self) -> CliResult<UserId> {
        resolve_user_id(&self.client, &self.tokens).await
    }

    pub fn currency(&self) -> &str {
        &self.display.currency
    }
}

/// Filter and sort options shared by every `list` command
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Only records on or after this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// Only records on or before this date
    #[arg(long, value_parser = parse_date)]
    pub to: Option<NaiveDate>,

    /// Only records on exactly this date
    #[arg(long, value_parser = parse_date)]
    pub on: Option<NaiveDate>,

    /// Case-insensitive text search
    #[arg(short, long)]
    pub search: Option<String>,

    /// id, date_desc, date_asc, amount_desc or amount_asc
    #[arg(long, default_value_t = SortOrder::Id)]
    pub sort: SortOrder,

    /// Maximum number of records
    #[arg(short, long)]
    pub limit: Option<usize>,
}

impl ListArgs {
    pub fn to_filter(&self) -> ListFilter {
        ListFilter {
            from: self.from,
            to: self.to,
            on: self.on,
            search: self.search.clone(),
            sort: self.sort,
            limit: self.limit,
        }
    }
}

/// clap value parser for amounts such as "42", "42.5" or "$42.50"
pub fn parse_amount(input: &str) -> Result<Money, String> {
    Money::parse(input).map_err(|e| e.to_string())
}

/// Ask a yes/no question; `assume_yes` skips the prompt
pub fn confirm(prompt: &str, assume_yes: bool) -> CliResult<bool> {
    if assume_yes {
        return Ok(true);
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush().map_err(FinanceError::from)?;

    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .map_err(FinanceError::from)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Use the given password or read one without echo
pub fn password_or_prompt(given: Option<String>, prompt: &str) -> CliResult<String> {
    match given {
        Some(password) => Ok(password),
        None => rpassword::prompt_password(prompt)
            .map_err(|e| ClientError::Local(FinanceError::Io(e.to_string()))),
    }
}
