//! Session commands: login, logout, whoami

use anyhow::{Result, bail};
use clap::Args;
use dialoguer::{Input, Password, theme::ColorfulTheme};
use shopdesk_core::{AuthState, LoginCredentials};
use tracing::debug;

use super::open_console;

/// Login arguments
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email (prompted when omitted)
    #[arg(long)]
    pub email: Option<String>,

    /// Account password (prompted when omitted)
    #[arg(long)]
    pub password: Option<String>,

    /// Page to continue to after login, e.g. the returnUrl from `open`
    #[arg(long)]
    pub return_to: Option<String>,
}

/// Log in, then resume navigation at the return location or home
pub async fn login(args: LoginArgs) -> Result<()> {
    let console = open_console().await?;

    let email = match args.email {
        Some(email) => email,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Email")
            .interact_text()?,
    };
    let password = match args.password {
        Some(password) => password,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .interact()?,
    };
    if email.trim().is_empty() || password.is_empty() {
        bail!("Email and password are required");
    }

    let session = console
        .auth
        .login(&LoginCredentials::new(email.trim(), password))
        .await?;
    println!("Logged in as {}", session.identity().display_name());

    let target = args
        .return_to
        .unwrap_or_else(|| console.config.home_route.clone());
    debug!(target = %target, "Resuming navigation");
    let location = console.router.navigate(&target);
    println!("Now at {}", location.location());
    Ok(())
}

/// End the local session
pub async fn logout() -> Result<()> {
    let console = open_console().await?;
    if !console.store.is_authenticated() {
        println!("Not logged in");
        return Ok(());
    }
    console.auth.logout().await?;
    println!("Logged out");
    Ok(())
}

/// Print the restored identity
pub async fn whoami() -> Result<()> {
    let console = open_console().await?;
    match console.state() {
        AuthState::Anonymous => println!("Not logged in"),
        AuthState::Authenticated(session) => {
            let identity = session.identity();
            println!("{}", identity.display_name());
            if let Some(email) = &identity.email {
                println!("  Email: {}", email);
            }
            if let Some(role) = &identity.role {
                println!("  Role:  {}", role);
            }
        }
    }
    Ok(())
}
