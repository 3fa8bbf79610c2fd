//! Expense CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::{confirm, parse_amount, CliContext, CliResult, ListArgs};
use crate::display::{format_expense_details, format_expense_list};
use crate::models::dates::parse_date;
use crate::models::{ExpenseDto, ExpenseId, Frequency, Money, PaymentMethod};
use crate::services::today;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount (e.g., "42.50")
        #[arg(short, long, value_parser = parse_amount)]
        amount: Money,

        #[arg(short, long)]
        category: String,

        /// Date of the expense (defaults to today)
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        #[arg(long)]
        description: Option<String>,

        /// one-time, monthly or yearly
        #[arg(short, long, default_value_t = Frequency::OneTime)]
        frequency: Frequency,

        /// Last date of a recurring expense
        #[arg(long, value_parser = parse_date)]
        end_date: Option<NaiveDate>,

        /// Next due date (computed for recurring expenses when omitted)
        #[arg(long, value_parser = parse_date)]
        next_due: Option<NaiveDate>,

        /// card or transfer
        #[arg(short, long, default_value_t = PaymentMethod::Card)]
        method: PaymentMethod,
    },

    /// List expenses
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one expense
    Show { id: ExpenseId },

    /// Change an expense; omitted options keep their value
    Edit {
        id: ExpenseId,

        #[arg(short, long, value_parser = parse_amount)]
        amount: Option<Money>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        #[arg(long)]
        description: Option<String>,

        #[arg(short, long)]
        frequency: Option<Frequency>,

        #[arg(long, value_parser = parse_date)]
        end_date: Option<NaiveDate>,

        #[arg(long, value_parser = parse_date)]
        next_due: Option<NaiveDate>,

        #[arg(short, long)]
        method: Option<PaymentMethod>,
    },

    /// Delete an expense and its payment
    #[command(alias = "rm")]
    Delete {
        id: ExpenseId,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Handle an expense command
pub async fn handle_expense_command(ctx: &CliContext, cmd: ExpenseCommands) -> CliResult<()> {
    ctx.require_login()?;
    let api = ctx.client.expenses();

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
            description,
            frequency,
            end_date,
            next_due,
            method,
        } => {
            let dto = ExpenseDto {
                amount: Some(amount),
                category: Some(category),
                date: Some(date.unwrap_or_else(today)),
                description,
                frequency: Some(frequency),
                end_date,
                next_due_date: next_due,
                payment_method: Some(method),
                ..Default::default()
            };
            dto.validate(today())?;

            let created = api.create(&dto).await?;
            println!("Created expense:");
            print!("{}", format_expense_details(&created, &ctx.display));
        }

        ExpenseCommands::List(args) => {
            let expenses = api.list(&args.to_filter()).await?;
            print!("{}", format_expense_list(&expenses, &ctx.display));
        }

        ExpenseCommands::Show { id } => {
            let expense = api.get(id).await?;
            print!("{}", format_expense_details(&expense, &ctx.display));
        }

        ExpenseCommands::Edit {
            id,
            amount,
            category,
            date,
            description,
            frequency,
            end_date,
            next_due,
            method,
        } => {
            let mut dto = api.get(id).await?;
            dto.amount = amount.or(dto.amount);
            dto.category = category.or(dto.category);
            dto.date = date.or(dto.date);
            dto.description = description.or(dto.description);
            dto.frequency = frequency.or(dto.frequency);
            dto.end_date = end_date.or(dto.end_date);
            dto.next_due_date = next_due.or(dto.next_due_date);
            dto.payment_method = method.or(dto.payment_method);
            dto.validate(today())?;

            let updated = api.update(id, &dto).await?;
            println!("Updated expense:");
            print!("{}", format_expense_details(&updated, &ctx.display));
        }

        ExpenseCommands::Delete { id, yes } => {
            let expense = api.get(id).await?;
            let prompt = format!(
                "Delete expense {} ({}, {})? Its payment is deleted too.",
                id,
                expense.category.as_deref().unwrap_or(""),
                ctx.display.money(expense.amount)
            );
            if !confirm(&prompt, yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            api.delete(id).await?;
            println!("Deleted expense {}", id);
        }
    }

    Ok(())
}
