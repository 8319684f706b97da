//! Category management commands

use anyhow::Result;
use clap::{Args, Subcommand};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use shopdesk_core::{Category, ListQuery, NewCategory, Page};

use super::open_console;

#[derive(Args, Debug)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub command: CategoriesCommands,
}

#[derive(Subcommand, Debug)]
pub enum CategoriesCommands {
    /// List one page of categories
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 10)]
        limit: u32,

        /// Search term
        #[arg(long, short)]
        query: Option<String>,
    },
    /// Create an active category
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        icon: String,

        /// Parent category id for a subcategory
        #[arg(long)]
        parent: Option<i64>,

        /// Image URL
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a category
    Delete { id: i64 },
}

pub async fn run(args: CategoriesArgs) -> Result<()> {
    let console = open_console().await?;
    let categories = &console.categories;

    match args.command {
        CategoriesCommands::List { page, limit, query } => {
            let mut list_query = ListQuery::new(page, limit);
            if let Some(query) = query {
                list_query = list_query.with_search(query);
            }
            let page = categories.list(&list_query).await?;
            print_page(&page);
        }
        CategoriesCommands::Create {
            name,
            icon,
            parent,
            image,
        } => {
            let mut category = NewCategory::new(name, icon);
            if let Some(parent) = parent {
                category = category.with_parent(parent);
            }
            category.image = image;
            categories.create(&category).await?;
            println!("Created category {}", category.name);
        }
        CategoriesCommands::Delete { id } => {
            categories.delete(id).await?;
            println!("Deleted category {}", id);
        }
    }
    Ok(())
}

fn print_page(page: &Page<Category>) {
    if page.items.is_empty() {
        println!("No categories found.");
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Name").fg(Color::Cyan),
        Cell::new("Icon").fg(Color::Cyan),
        Cell::new("Parent").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
    ]);

    for category in &page.items {
        table.add_row(vec![
            Cell::new(category.id),
            Cell::new(&category.name),
            Cell::new(category.icon.as_deref().unwrap_or("-")),
            Cell::new(
                category
                    .parent_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(&category.status),
        ]);
    }

    println!("{table}");
    let p = &page.pagination;
    println!("Page {} of {} ({} total)", p.page, p.total_pages, p.total);
}
