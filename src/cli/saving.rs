//! Savings CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::{confirm, parse_amount, CliContext, CliResult, ListArgs};
use crate::display::{format_saving_details, format_saving_list};
use crate::models::dates::parse_date;
use crate::models::{Money, SavingDto, SavingId};
use crate::services::today;

#[derive(Subcommand)]
pub enum SavingCommands {
    /// Record money put aside
    Add {
        #[arg(short, long, value_parser = parse_amount)]
        amount: Money,

        /// What the money is for (e.g., "Emergency fund")
        #[arg(short, long)]
        goal: String,

        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        #[arg(long)]
        description: Option<String>,
    },

    /// List savings
    #[command(alias = "ls")]
    List(ListArgs),

    Show { id: SavingId },

    /// Change a saving; omitted options keep their value
    Edit {
        id: SavingId,

        #[arg(short, long, value_parser = parse_amount)]
        amount: Option<Money>,

        #[arg(short, long)]
        goal: Option<String>,

        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        #[arg(long)]
        description: Option<String>,
    },

    #[command(alias = "rm")]
    Delete {
        id: SavingId,

        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn handle_saving_command(ctx: &CliContext, cmd: SavingCommands) -> CliResult<()> {
    ctx.require_login()?;
    let api = ctx.client.savings();

    match cmd {
        SavingCommands::Add {
            amount,
            goal,
            date,
            description,
        } => {
            let dto = SavingDto {
                amount: Some(amount),
                goal: Some(goal),
                date: Some(date.unwrap_or_else(today)),
                description,
                ..Default::default()
            };
            dto.validate(today())?;

            let created = api.create(&dto).await?;
            println!("Created saving:");
            print!("{}", format_saving_details(&created, &ctx.display));
        }

        SavingCommands::List(args) => {
            let savings = api.list(&args.to_filter()).await?;
            print!("{}", format_saving_list(&savings, &ctx.display));
        }

        SavingCommands::Show { id } => {
            let saving = api.get(id).await?;
            print!("{}", format_saving_details(&saving, &ctx.display));
        }

        SavingCommands::Edit {
            id,
            amount,
            goal,
            date,
            description,
        } => {
            let mut dto = api.get(id).await?;
            dto.amount = amount.or(dto.amount);
            dto.goal = goal.or(dto.goal);
            dto.date = date.or(dto.date);
            dto.description = description.or(dto.description);
            dto.validate(today())?;

            let updated = api.update(id, &dto).await?;
            println!("Updated saving:");
            print!("{}", format_saving_details(&updated, &ctx.display));
        }

        SavingCommands::Delete { id, yes } => {
            let saving = api.get(id).await?;
            let prompt = format!(
                "Delete saving {} ({}, {})?",
                id,
                saving.goal.as_deref().unwrap_or(""),
                ctx.display.money(saving.amount)
            );
            if !confirm(&prompt, yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            api.delete(id).await?;
            println!("Deleted saving {}", id);
        }
    }

    Ok(())
}
