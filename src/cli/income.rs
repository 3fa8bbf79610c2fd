//! Income CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::{confirm, parse_amount, CliContext, CliResult, ListArgs};
use crate::display::{format_income_details, format_income_list};
use crate::models::dates::parse_date;
use crate::models::{Frequency, IncomeDto, IncomeId, Money};
use crate::services::today;

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Record income
    Add {
        #[arg(short, long, value_parser = parse_amount)]
        amount: Money,

        /// Where the money came from (e.g., "Salary")
        #[arg(short, long)]
        source: String,

        /// Defaults to today
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        #[arg(long)]
        description: Option<String>,

        #[arg(short, long, default_value_t = Frequency::OneTime)]
        frequency: Frequency,

        #[arg(long, value_parser = parse_date)]
        end_date: Option<NaiveDate>,
    },

    /// List incomes
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one income
    Show { id: IncomeId },

    /// Change an income; omitted options keep their value
    Edit {
        id: IncomeId,

        #[arg(short, long, value_parser = parse_amount)]
        amount: Option<Money>,

        #[arg(short, long)]
        source: Option<String>,

        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        #[arg(long)]
        description: Option<String>,

        #[arg(short, long)]
        frequency: Option<Frequency>,

        #[arg(long, value_parser = parse_date)]
        end_date: Option<NaiveDate>,
    },

    /// Delete an income
    #[command(alias = "rm")]
    Delete {
        id: IncomeId,

        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn handle_income_command(ctx: &CliContext, cmd: IncomeCommands) -> CliResult<()> {
    ctx.require_login()?;
    let api = ctx.client.incomes();

    match cmd {
        IncomeCommands::Add {
            amount,
            source,
            date,
            description,
            frequency,
            end_date,
        } => {
            let dto = IncomeDto {
                amount: Some(amount),
                source: Some(source),
                date: Some(date.unwrap_or_else(today)),
                description,
                frequency: Some(frequency),
                end_date,
                ..Default::default()
            };
            dto.validate(today())?;

            let created = api.create(&dto).await?;
            println!("Created income:");
            print!("{}", format_income_details(&created, &ctx.display));
        }

        IncomeCommands::List(args) => {
            let incomes = api.list(&args.to_filter()).await?;
            print!("{}", format_income_list(&incomes, &ctx.display));
        }

        IncomeCommands::Show { id } => {
            let income = api.get(id).await?;
            print!("{}", format_income_details(&income, &ctx.display));
        }

        IncomeCommands::Edit {
            id,
            amount,
            source,
            date,
            description,
            frequency,
            end_date,
        } => {
            let mut dto = api.get(id).await?;
            dto.amount = amount.or(dto.amount);
            dto.source = source.or(dto.source);
            dto.date = date.or(dto.date);
            dto.description = description.or(dto.description);
            dto.frequency = frequency.or(dto.frequency);
            dto.end_date = end_date.or(dto.end_date);
            dto.validate(today())?;

            let updated = api.update(id, &dto).await?;
            println!("Updated income:");
            print!("{}", format_income_details(&updated, &ctx.display));
        }

        IncomeCommands::Delete { id, yes } => {
            let income = api.get(id).await?;
            let prompt = format!(
                "Delete income {} ({}, {})?",
                id,
                income.source.as_deref().unwrap_or(""),
                ctx.display.money(income.amount)
            );
            if !confirm(&prompt, yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            api.delete(id).await?;
            println!("Deleted income {}", id);
        }
    }

    Ok(())
}
