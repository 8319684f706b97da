//! Inventory commands

use anyhow::Result;
use clap::{Args, Subcommand};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use shopdesk_core::catalog::InventoryStatus;
use shopdesk_core::{InventoryItem, RentalFilter};

use super::open_console;

#[derive(Args, Debug)]
pub struct InventoryArgs {
    #[command(subcommand)]
    pub command: InventoryCommands,
}

#[derive(Subcommand, Debug)]
pub enum InventoryCommands {
    /// List all inventory items
    List,
    /// List items offered for online rental
    Rentals {
        /// Size to include; repeat for several
        #[arg(long = "size")]
        sizes: Vec<String>,

        /// Rental price range as MIN-MAX, e.g. 0-50
        #[arg(long, value_parser = parse_price_range)]
        price: Option<(u32, u32)>,

        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Show one item
    Show { id: i64 },
    /// Delete an item
    Delete { id: i64 },
    /// Flip a flag of an item
    Toggle {
        id: i64,
        /// Flag name as the backend knows it, e.g. availableOnline
        field: String,
    },
    /// List an item in the online store
    EnableOnline { id: i64 },
    /// Make an item available for rent
    EnableRental { id: i64 },
}

pub async fn run(args: InventoryArgs) -> Result<()> {
    let console = open_console().await?;
    let inventory = &console.inventory;

    match args.command {
        InventoryCommands::List => {
            let items = inventory.list().await?;
            print_items(&items);
        }
        InventoryCommands::Rentals {
            sizes,
            price,
            page,
            limit,
        } => {
            let mut filter = RentalFilter::new(page, limit);
            for size in sizes {
                filter = filter.with_size(size);
            }
            if let Some((min, max)) = price {
                filter = filter.with_price_range(min, max);
            }
            let items = inventory.online_rentals(&filter).await?;
            print_items(&items);
        }
        InventoryCommands::Show { id } => {
            let item = inventory.get(id).await?;
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
        InventoryCommands::Delete { id } => {
            inventory.delete(id).await?;
            println!("Deleted item {}", id);
        }
        InventoryCommands::Toggle { id, field } => {
            inventory.toggle(id, &field).await?;
            println!("Toggled {} on item {}", field, id);
        }
        InventoryCommands::EnableOnline { id } => {
            inventory.enable_online(id).await?;
            println!("Item {} is now available online", id);
        }
        InventoryCommands::EnableRental { id } => {
            inventory.enable_rental(id).await?;
            println!("Item {} is now available for rent", id);
        }
    }
    Ok(())
}

fn parse_price_range(value: &str) -> Result<(u32, u32), String> {
    let (min, max) = value
        .split_once('-')
        .ok_or_else(|| format!("expected MIN-MAX, got {}", value))?;
    let min = min.trim().parse::<u32>().map_err(|e| e.to_string())?;
    let max = max.trim().parse::<u32>().map_err(|e| e.to_string())?;
    Ok((min, max))
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn print_items(items: &[InventoryItem]) {
    if items.is_empty() {
        println!("No inventory items.");
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Product").fg(Color::Cyan),
        Cell::new("Brand").fg(Color::Cyan),
        Cell::new("Segment").fg(Color::Cyan),
        Cell::new("Price").fg(Color::Cyan),
        Cell::new("Online").fg(Color::Cyan),
        Cell::new("Rent").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
    ]);

    for item in items {
        let status = match item.status {
            Some(InventoryStatus::Active) => Cell::new("Active").fg(Color::Green),
            Some(InventoryStatus::Inactive) => Cell::new("Inactive").fg(Color::Red),
            None => Cell::new("-"),
        };
        table.add_row(vec![
            Cell::new(item.id.map(|id| id.to_string()).unwrap_or_default()),
            Cell::new(&item.product_name),
            Cell::new(&item.brand),
            Cell::new(item.category.map(|c| c.to_string()).unwrap_or_default()),
            Cell::new(format!("{:.2}", item.prices)),
            Cell::new(yes_no(item.available_online)),
            Cell::new(yes_no(item.is_available_on_rent)),
            status,
        ]);
    }

    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_range_parses_min_max() {
        assert_eq!(parse_price_range("0-50"), Ok((0, 50)));
        assert_eq!(parse_price_range(" 10 - 20 "), Ok((10, 20)));
        assert!(parse_price_range("50").is_err());
        assert!(parse_price_range("a-b").is_err());
    }
}
