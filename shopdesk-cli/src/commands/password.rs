//! Password reset and change

use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{Password, theme::ColorfulTheme};
use shopdesk_core::{PasswordChange, PasswordReset};

use super::open_console;

#[derive(Args, Debug)]
pub struct PasswordArgs {
    #[command(subcommand)]
    pub command: PasswordCommands,
}

#[derive(Subcommand, Debug)]
pub enum PasswordCommands {
    /// Email a reset link
    Forgot {
        /// Account email
        email: String,
    },
    /// Set a new password with the token from a reset link
    Reset {
        /// Token from the reset link
        #[arg(long)]
        token: String,
    },
    /// Change the logged-in user's password
    Change,
}

pub async fn run(args: PasswordArgs) -> Result<()> {
    let console = open_console().await?;
    match args.command {
        PasswordCommands::Forgot { email } => {
            console.auth.forgot_password(&email).await?;
            println!("If {} has an account, a reset link is on its way", email);
        }
        PasswordCommands::Reset { token } => {
            let (new_password, confirm_password) = prompt_new_password()?;
            console
                .auth
                .reset_password(&PasswordReset::new(token, new_password, confirm_password))
                .await?;
            println!("Password reset, you can log in now");
        }
        PasswordCommands::Change => {
            let old_password = Password::with_theme(&ColorfulTheme::default())
                .with_prompt("Current password")
                .interact()?;
            let (new_password, confirm_password) = prompt_new_password()?;
            console
                .auth
                .change_password(&PasswordChange::new(
                    old_password,
                    new_password,
                    confirm_password,
                ))
                .await?;
            println!("Password changed");
        }
    }
    Ok(())
}

/// New password and its confirmation; the service checks they match
fn prompt_new_password() -> Result<(String, String)> {
    let theme = ColorfulTheme::default();
    let new_password = Password::with_theme(&theme)
        .with_prompt("New password")
        .interact()?;
    let confirm_password = Password::with_theme(&theme)
        .with_prompt("Confirm new password")
        .interact()?;
    Ok((new_password, confirm_password))
}
