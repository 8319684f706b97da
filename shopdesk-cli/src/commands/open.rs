//! Navigate to a console page through the route guard

use anyhow::Result;
use clap::Args;
use shopdesk_core::Navigation;
use shopdesk_core::navigation::{Resolution, return_url};

use super::open_console;

#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Page path, e.g. /dashboard or /orders
    pub path: String,
}

pub async fn run(args: OpenArgs) -> Result<()> {
    let console = open_console().await?;
    match console.router.navigate(&args.path) {
        Navigation::Arrived(location) => {
            match console.router.table().resolve(&location) {
                Resolution::Page(route) => println!("Opened {} ({})", location, route.title),
                Resolution::Redirect(_) => println!("Opened {}", location),
            }
        }
        Navigation::Denied { redirect } => {
            println!("Login required, redirected to {}", redirect);
            if let Some(target) = return_url(&redirect) {
                println!("Continue with: shopdesk login --return-to {}", target);
            }
        }
    }
    Ok(())
}
