use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "shopdesk", about = "Admin console for the shop backend")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and start a session
    Login(commands::auth::LoginArgs),
    /// End the current session
    Logout,
    /// Show who is logged in
    Whoami,
    /// Navigate to a console page
    Open(commands::open::OpenArgs),
    /// Reset or change a password
    Password(commands::password::PasswordArgs),
    /// Manage product categories
    Categories(commands::categories::CategoriesArgs),
    /// Manage inventory
    Inventory(commands::inventory::InventoryArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Login(args) => commands::auth::login(args).await,
        Commands::Logout => commands::auth::logout().await,
        Commands::Whoami => commands::auth::whoami().await,
        Commands::Open(args) => commands::open::run(args).await,
        Commands::Password(args) => commands::password::run(args).await,
        Commands::Categories(args) => commands::categories::run(args).await,
        Commands::Inventory(args) => commands::inventory::run(args).await,
        Commands::Config(args) => commands::config::run(args),
    }
}
