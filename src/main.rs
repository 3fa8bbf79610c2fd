use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fintrack::cli::{
    handle_activity_command, handle_expense_command, handle_income_command, handle_login,
    handle_logout, handle_payment_command, handle_register, handle_report_command,
    handle_saving_command, handle_user_command, handle_whoami, CliContext, ExpenseCommands,
    IncomeCommands, LoginArgs, PaymentCommands, RegisterArgs, ReportCommands, SavingCommands,
    UserCommands,
};
use fintrack::client::ClientError;
use fintrack::config::{paths::FinancePaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Personal finance tracker",
    long_about = "fintrack keeps track of expenses, incomes, payments and savings. \
                  Run `fintrack serve` to start the REST API, then use the other \
                  commands to work with your records through it."
)]
struct Cli {
    /// Server URL (overrides the config file and FINTRACK_SERVER_URL)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Run the REST API server
    Serve {
        /// Address to bind (overrides FINTRACK_BIND)
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on (overrides FINTRACK_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Create an account
    Register(RegisterArgs),

    /// Log in and remember the session
    Login(LoginArgs),

    /// End the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Income management commands
    #[command(subcommand)]
    Income(IncomeCommands),

    /// Savings management commands
    #[command(subcommand)]
    Saving(SavingCommands),

    /// Payment management commands
    #[command(subcommand, alias = "pay")]
    Payment(PaymentCommands),

    /// Profile commands
    #[command(subcommand)]
    User(UserCommands),

    /// Show recent activity
    Activity {
        /// Number of entries (server default when omitted)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Overviews and dashboard
    #[command(subcommand)]
    Report(ReportCommands),
}

fn init_tracing(serving: bool) {
    let default = if serving { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Some(Commands::Serve { .. })));

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let paths = FinancePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    settings.apply_env_overrides()?;
    if let Some(server) = cli.server {
        settings.client.server_url = server;
    }

    let Some(command) = cli.command else {
        println!("fintrack - personal finance tracker");
        println!();
        println!("Run 'fintrack --help' for usage information.");
        println!("Run 'fintrack serve' to start the API server.");
        return Ok(());
    };

    match command {
        Commands::Init => {
            println!("Initializing fintrack at: {}", paths.base_dir().display());
            fintrack::storage::init::initialize_storage(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'fintrack serve' to start the server, then 'fintrack register'.");
        }
        Commands::Config => {
            println!("fintrack Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Activity log:     {}", paths.activity_log().display());
            println!();
            println!("Server:");
            println!("  Listen address: {}", settings.server.socket_address());
            println!("  CORS origins:   {}", settings.server.cors_origins.join(", "));
            println!("  Session TTL:    {}h", settings.server.session_ttl_hours);
            println!("Client:");
            println!("  Server URL:     {}", settings.client.server_url);
            println!("  Timeout:        {}s", settings.client.timeout_secs);
            println!("Currency symbol:  {}", settings.currency_symbol);
            println!("Date format:      {}", settings.date_format);
        }
        Commands::Serve { bind, port } => {
            if let Some(bind) = bind {
                settings.server.bind_address = bind;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            fintrack::api::serve(paths, settings).await?;
        }
        command => {
            let mut ctx = CliContext::new(paths, settings)?;
            run_client_command(&mut ctx, command).await?;
        }
    }

    Ok(())
}

async fn run_client_command(ctx: &mut CliContext, command: Commands) -> Result<(), ClientError> {
    match command {
        Commands::Register(args) => handle_register(ctx, args).await,
        Commands::Login(args) => handle_login(ctx, args).await,
        Commands::Logout => handle_logout(ctx).await,
        Commands::Whoami => handle_whoami(ctx).await,
        Commands::Expense(cmd) => handle_expense_command(ctx, cmd).await,
        Commands::Income(cmd) => handle_income_command(ctx, cmd).await,
        Commands::Saving(cmd) => handle_saving_command(ctx, cmd).await,
        Commands::Payment(cmd) => handle_payment_command(ctx, cmd).await,
        Commands::User(cmd) => handle_user_command(ctx, cmd).await,
        Commands::Activity { limit } => handle_activity_command(ctx, limit).await,
        Commands::Report(cmd) => handle_report_command(ctx, cmd).await,
        Commands::Init | Commands::Config | Commands::Serve { .. } => Ok(()),
    }
}

/// Print the server's message and field details for API errors
fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<ClientError>() {
        Some(client_err) => match client_err.exception() {
            Some(exception) => {
                eprintln!("Error: {}", exception.message);
                for detail in exception.details() {
                    eprintln!("  - {}", detail);
                }
            }
            None => eprintln!("Error: {}", client_err),
        },
        None => eprintln!("Error: {:#}", err),
    }
}
