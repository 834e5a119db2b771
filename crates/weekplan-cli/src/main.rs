mod config;
mod plan_cmd;
mod recipe_cmds;
#[cfg(test)]
mod test_util;

use clap::{Parser, Subcommand, ValueEnum};
use sqlx::SqlitePool;

use weekplan_db::models::{Day, RecipeId};
use weekplan_db::pool;

use config::WeekplanConfig;

#[derive(Parser)]
#[command(name = "weekplan", about = "Weekly meal planner and shopping list")]
struct Cli {
    /// Database URL (overrides WEEKPLAN_DATABASE_URL env var)
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a weekplan config file (no database required)
    Init {
        /// SQLite connection URL
        #[arg(long, default_value = "sqlite://recipes.db")]
        db_url: String,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Create and migrate the recipe database
    DbInit,
    /// Recipe book management
    Recipe {
        #[command(subcommand)]
        command: RecipeCommands,
    },
    /// Generate a weekly plan and its shopping list
    Plan {
        /// Comma-separated days to plan (e.g. mon,wed,fri); defaults to the
        /// config file's days, else the whole week
        #[arg(long, value_delimiter = ',')]
        days: Option<Vec<Day>>,
        /// Seed for reproducible picks
        #[arg(long)]
        seed: Option<u64>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Skip the shopping list
        #[arg(long)]
        no_shopping_list: bool,
    },
}

#[derive(Subcommand)]
pub enum RecipeCommands {
    /// Add a recipe
    Add {
        /// Recipe name
        #[arg(long)]
        name: String,
        /// Day of the week the recipe belongs to
        #[arg(long)]
        day: Day,
        /// Exclude the recipe from plan generation
        #[arg(long)]
        inactive: bool,
        /// Comma-separated ingredients (e.g. "Egg, Flour, Milk")
        #[arg(long)]
        ingredients: Option<String>,
    },
    /// Edit a recipe; omitted fields keep their stored values
    Edit {
        /// Recipe ID
        id: RecipeId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        day: Option<Day>,
        /// true or false
        #[arg(long)]
        active: Option<bool>,
        /// Comma-separated ingredients; replaces the current list
        #[arg(long)]
        ingredients: Option<String>,
    },
    /// Show a recipe with its ingredients
    Show {
        /// Recipe ID
        id: RecipeId,
    },
    /// List recipes
    List {
        /// Only recipes for this day
        #[arg(long)]
        day: Option<Day>,
        /// Only recipes eligible for planning
        #[arg(long)]
        active_only: bool,
    },
    /// Delete a recipe
    Delete {
        /// Recipe ID
        id: RecipeId,
    },
    /// Make a recipe eligible for planning
    Activate {
        /// Recipe ID
        id: RecipeId,
    },
    /// Exclude a recipe from planning
    Deactivate {
        /// Recipe ID
        id: RecipeId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn cmd_init(db_url: &str, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        database: config::DatabaseSection {
            url: db_url.to_string(),
        },
        planner: config::PlannerSection::default(),
    };

    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  database.url = {db_url}");
    println!();
    println!("Next: run `weekplan db-init` to create and migrate the database.");

    Ok(())
}

async fn cmd_db_init(cli_db_url: Option<&str>) -> anyhow::Result<()> {
    let resolved = WeekplanConfig::resolve(cli_db_url)?;

    println!("Initializing weekplan database...");

    if pool::ensure_database_exists(&resolved.db_config).await? {
        println!("Created {}", resolved.db_config.database_url);
    }

    let db_pool = pool::create_pool(&resolved.db_config).await?;
    let result = async {
        pool::run_migrations(&db_pool).await?;

        let counts = pool::table_counts(&db_pool).await?;
        println!("Database ready. Tables:");
        for (table, count) in &counts {
            println!("  {table}: {count} rows");
        }
        anyhow::Ok(())
    }
    .await;
    db_pool.close().await;
    result?;

    println!("weekplan db-init complete.");
    Ok(())
}

/// Open the pool and bring the schema up to date, so recipe and plan
/// commands also work on a database that never saw `db-init`.
async fn connect(resolved: &WeekplanConfig) -> anyhow::Result<SqlitePool> {
    let db_pool = pool::create_pool(&resolved.db_config).await?;
    if let Err(e) = pool::run_migrations(&db_pool).await {
        db_pool.close().await;
        return Err(e);
    }
    Ok(db_pool)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Init { db_url, force } => {
            cmd_init(&db_url, force)?;
        }
        Commands::DbInit => {
            cmd_db_init(cli.database_url.as_deref()).await?;
        }
        Commands::Recipe { command } => {
            let resolved = WeekplanConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = connect(&resolved).await?;
            let result = recipe_cmds::run_recipe_command(command, &db_pool).await;
            db_pool.close().await;
            result?;
        }
        Commands::Plan {
            days,
            seed,
            format,
            no_shopping_list,
        } => {
            let resolved = WeekplanConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = connect(&resolved).await?;
            let options = plan_cmd::PlanOptions {
                days: days.unwrap_or_else(|| resolved.default_days.clone()),
                seed,
                format,
                shopping_list: !no_shopping_list,
            };
            let result = plan_cmd::run_plan(&db_pool, &options).await;
            db_pool.close().await;
            result?;
        }
    }

    Ok(())
}
