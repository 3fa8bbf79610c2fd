//! Payment CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::{confirm, parse_amount, CliContext, CliResult, ListArgs};
use crate::display::{format_payment_details, format_payment_list};
use crate::models::dates::parse_date;
use crate::models::{ExpenseId, Money, PaymentDto, PaymentId, PaymentStatus};
use crate::services::today;

#[derive(Subcommand)]
pub enum PaymentCommands {
    /// Record the payment of an expense
    Add {
        /// Expense this payment settles
        #[arg(short, long)]
        expense: ExpenseId,

        #[arg(short, long)]
        name: String,

        /// Defaults to the expense amount
        #[arg(short, long, value_parser = parse_amount)]
        amount: Option<Money>,

        /// pending, paid or failed
        #[arg(short, long, default_value_t = PaymentStatus::Pending)]
        status: PaymentStatus,

        /// Defaults to today
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// List payments
    #[command(alias = "ls")]
    List(ListArgs),

    Show { id: PaymentId },

    /// Change a payment; omitted options keep their value
    Edit {
        id: PaymentId,

        /// Move the payment to another expense
        #[arg(short, long)]
        expense: Option<ExpenseId>,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long, value_parser = parse_amount)]
        amount: Option<Money>,

        #[arg(short, long)]
        status: Option<PaymentStatus>,

        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    #[command(alias = "rm")]
    Delete {
        id: PaymentId,

        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn handle_payment_command(ctx: &CliContext, cmd: PaymentCommands) -> CliResult<()> {
    ctx.require_login()?;
    let api = ctx.client.payments();

    match cmd {
        PaymentCommands::Add {
            expense,
            name,
            amount,
            status,
            date,
        } => {
            let amount = match amount {
                Some(amount) => Some(amount),
                None => ctx.client.expenses().get(expense).await?.amount,
            };
            let dto = PaymentDto {
                expense_id: Some(expense),
                name: Some(name),
                amount,
                status: Some(status),
                payment_date: Some(date.unwrap_or_else(today)),
                ..Default::default()
            };
            dto.validate(today())?;

            let created = api.create(&dto).await?;
            println!("Created payment:");
            print!("{}", format_payment_details(&created, &ctx.display));
        }

        PaymentCommands::List(args) => {
            let payments = api.list(&args.to_filter()).await?;
            print!("{}", format_payment_list(&payments, &ctx.display));
        }

        PaymentCommands::Show { id } => {
            let payment = api.get(id).await?;
            print!("{}", format_payment_details(&payment, &ctx.display));
        }

        PaymentCommands::Edit {
            id,
            expense,
            name,
            amount,
            status,
            date,
        } => {
            let mut dto = api.get(id).await?;
            if let Some(expense) = expense {
                dto.expense_id = Some(expense);
                dto.expense = None;
            }
            dto.name = name.or(dto.name);
            dto.amount = amount.or(dto.amount);
            dto.status = status.or(dto.status);
            dto.payment_date = date.or(dto.payment_date);
            dto.validate(today())?;

            let updated = api.update(id, &dto).await?;
            println!("Updated payment:");
            print!("{}", format_payment_details(&updated, &ctx.display));
        }

        PaymentCommands::Delete { id, yes } => {
            let payment = api.get(id).await?;
            let prompt = format!(
                "Delete payment {} ({}, {})?",
                id,
                payment.name.as_deref().unwrap_or(""),
                ctx.display.money(payment.amount)
            );
            if !confirm(&prompt, yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            api.delete(id).await?;
            println!("Deleted payment {}", id);
        }
    }

    Ok(())
}
