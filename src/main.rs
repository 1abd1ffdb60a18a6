use carta::config::{self, AppConfig};
use carta::imaging::RustBackend;
use carta::model::{CategoryForm, ItemFilter, MenuItemForm};
use carta::workflow::Workflow;
use carta::{db, output, view};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "carta")]
#[command(about = "Menu management for a small restaurant")]
#[command(long_about = "\
Menu management for a small restaurant

Staff maintain categories and dishes; customers get a read-only menu grouped
by category, reachable through a QR code on the table.

Data lives in a single SQLite file. Dish photos are copied into the media
directory and downsampled in place so stored assets stay small.

Run 'carta gen-config' to generate a documented carta.toml.")]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = "carta.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the database and media directory
    Init,
    /// Print the customer menu with its QR data URI
    Menu,
    /// Show the admin dashboard overview
    Stats,
    /// Print a stock carta.toml with all options documented
    GenConfig,
    /// Manage menu categories
    Category {
        #[command(subcommand)]
        command: CategoryCommand,
    },
    /// Manage menu items
    Item {
        #[command(subcommand)]
        command: ItemCommand,
    },
}

#[derive(Subcommand)]
enum CategoryCommand {
    /// List categories with their item counts
    List,
    /// Add a category
    Add {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Edit a category
    Edit {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Delete a category and all of its items
    Rm {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(clap::Args, Clone)]
struct ItemFields {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long)]
    category: i64,
    /// Price in decimal form, e.g. 4.50
    #[arg(long)]
    price: String,
    #[arg(long)]
    unavailable: bool,
    /// One of: mild, medium, spicy, extra_spicy
    #[arg(long, default_value = "")]
    spice_level: String,
    #[arg(long)]
    vegetarian: bool,
    /// Preparation time in whole minutes
    #[arg(long, default_value = "")]
    prep_time: String,
    /// Photo to attach (jpg, jpeg or png)
    #[arg(long)]
    image: Option<PathBuf>,
}

impl ItemFields {
    fn into_form(self) -> (MenuItemForm, Option<PathBuf>) {
        let form = MenuItemForm {
            name: self.name,
            description: self.description,
            category_id: self.category,
            price: self.price,
            is_available: !self.unavailable,
            spice_level: self.spice_level,
            is_vegetarian: self.vegetarian,
            preparation_time: self.prep_time,
        };
        (form, self.image)
    }
}

#[derive(Subcommand)]
enum ItemCommand {
    /// List menu items
    List {
        /// Restrict to one category
        #[arg(long)]
        category: Option<i64>,
        /// Only available items
        #[arg(long, conflicts_with = "unavailable")]
        available: bool,
        /// Only unavailable items
        #[arg(long)]
        unavailable: bool,
    },
    /// Add a menu item
    Add(ItemFields),
    /// Edit a menu item
    Edit {
        id: i64,
        #[command(flatten)]
        fields: ItemFields,
    },
    /// Delete a menu item
    Rm { id: i64 },
    /// Flip an item's availability
    Toggle { id: i64 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = AppConfig::load(&cli.config)?;
    let pool = db::connect(&config.database_url).await?;
    let workflow = Workflow::new(
        pool.clone(),
        RustBackend,
        PathBuf::from(&config.media_dir),
        config.downsample_config(),
    );

    match cli.command {
        Command::Init => {
            std::fs::create_dir_all(&config.media_dir)?;
            println!("Database ready: {}", config.database_url);
            println!("Media directory: {}", config.media_dir);
        }
        Command::Menu => {
            let menu = view::menu(&pool, &config.menu_url).await?;
            output::print_menu(&menu);
        }
        Command::Stats => {
            let stats = workflow.dashboard().await?;
            output::print_dashboard(&stats);
        }
        Command::GenConfig => unreachable!("handled before config load"),
        Command::Category { command } => match command {
            CategoryCommand::List => {
                let listing = workflow.list_categories().await?;
                output::print_categories(&listing);
            }
            CategoryCommand::Add { name, description } => {
                let saved = workflow
                    .add_category(&CategoryForm { name, description })
                    .await?;
                println!("{} (id {})", saved.message, saved.record.id);
            }
            CategoryCommand::Edit {
                id,
                name,
                description,
            } => {
                let saved = workflow
                    .edit_category(id, &CategoryForm { name, description })
                    .await?;
                println!("{}", saved.message);
            }
            CategoryCommand::Rm { id, yes } => {
                if !yes {
                    return Err("deleting a category removes all of its items; \
                         pass --yes to confirm"
                        .into());
                }
                let removed = workflow.remove_category(id).await?;
                println!("{} ({} items removed)", removed.message, removed.record);
            }
        },
        Command::Item { command } => match command {
            ItemCommand::List {
                category,
                available,
                unavailable,
            } => {
                let filter = ItemFilter {
                    category_id: category,
                    availability: match (available, unavailable) {
                        (true, _) => Some(true),
                        (_, true) => Some(false),
                        _ => None,
                    },
                };
                let listing = workflow.list_items(&filter).await?;
                output::print_items(&listing);
            }
            ItemCommand::Add(fields) => {
                let (form, image) = fields.into_form();
                let saved = workflow.add_item(&form, image.as_deref()).await?;
                println!("{} (id {})", saved.message, saved.record.id);
            }
            ItemCommand::Edit { id, fields } => {
                let (form, image) = fields.into_form();
                let saved = workflow.edit_item(id, &form, image.as_deref()).await?;
                println!("{}", saved.message);
            }
            ItemCommand::Rm { id } => {
                let removed = workflow.remove_item(id).await?;
                println!("{}", removed.message);
            }
            ItemCommand::Toggle { id } => {
                let outcome = workflow.toggle_item(id).await?;
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            }
        },
    }

    Ok(())
}
