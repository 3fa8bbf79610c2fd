//! Report commands
//!
//! Reports fetch the caller's records through the list endpoints (honouring
//! the usual filters) and summarise them locally.

use clap::Subcommand;

use super::{CliContext, CliResult, ListArgs};
use crate::reports::{Dashboard, ExpenseOverview, IncomeOverview, PaymentOverview, SavingsOverview};

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Expense totals by month and category
    Expenses(ListArgs),

    /// Income totals by source and month
    Incomes(ListArgs),

    /// Payment counts by status
    Payments(ListArgs),

    /// Savings by goal bucket
    Savings(ListArgs),

    /// Income, expenses, savings and cash flow at a glance
    Dashboard(ListArgs),
}

pub async fn handle_report_command(ctx: &CliContext, cmd: ReportCommands) -> CliResult<()> {
    ctx.require_login()?;
    let client = &ctx.client;
    let currency = ctx.currency();

    let report = match cmd {
        ReportCommands::Expenses(args) => {
            let expenses = client.expenses().list(&args.to_filter()).await?;
            ExpenseOverview::generate(&expenses).format_terminal(currency)
        }
        ReportCommands::Incomes(args) => {
            let incomes = client.incomes().list(&args.to_filter()).await?;
            IncomeOverview::generate(&incomes).format_terminal(currency)
        }
        ReportCommands::Payments(args) => {
            let payments = client.payments().list(&args.to_filter()).await?;
            PaymentOverview::generate(&payments).format_terminal(currency)
        }
        ReportCommands::Savings(args) => {
            let savings = client.savings().list(&args.to_filter()).await?;
            SavingsOverview::generate(&savings).format_terminal(currency)
        }
        ReportCommands::Dashboard(args) => {
            let filter = args.to_filter();
            let (income_api, expense_api, saving_api) =
                (client.incomes(), client.expenses(), client.savings());
            let (incomes, expenses, savings) = tokio::try_join!(
                income_api.list(&filter),
                expense_api.list(&filter),
                saving_api.list(&filter),
            )?;
            Dashboard::generate(&incomes, &expenses, &savings).format_terminal(currency)
        }
    };

    print!("{}", report);
    Ok(())
}
