mod config;
mod error;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use enterprise::{Capabilities, build_capabilities_with, gates};
use nav::User;
use notebook::DefaultPalette;
use query::{LimitOps, Mbql, MbqlQuery, has_limit, parse_limit};
use registry::FeatureSource;
use serde_json::{Value, json};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use config::Config;
use error::Result;

const CONFIG_FILE: &str = "capgate.toml";

#[derive(Parser)]
#[command(name = "capgate")]
#[command(about = "Inspect capability-gated admin registries", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Extra feature flags to enable (comma separated)
    #[arg(long, env = "CAPGATE_FEATURES", global = true)]
    features: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show feature flags and whether their gates apply
    Features,
    /// Show the admin menu items a user may see
    Menu {
        /// Named user from the config file
        #[arg(short, long, conflicts_with_all = ["superuser", "grant"])]
        user: Option<String>,
        /// Check as a superuser
        #[arg(long)]
        superuser: bool,
        /// Grant a permission to an ad-hoc user (repeatable)
        #[arg(short, long, value_enum)]
        grant: Vec<Permission>,
    },
    /// List notebook steps in display order
    Steps {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Inspect or change the row limit of a query file
    Limit {
        /// JSON query file
        file: PathBuf,
        /// New row limit (positive integer)
        #[arg(long, conflicts_with = "clear")]
        set: Option<String>,
        /// Remove the row limit
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Permission {
    DataModel,
    DbManagement,
    Settings,
    Monitoring,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?.with_extra_features(cli.features.as_deref());
    init_logging(&config.log.level);
    debug!(path = %cli.config.display(), "configuration loaded");

    // Capabilities are built once; later flag changes need a restart.
    let caps = build_capabilities_with(&config.features, config.nav_items.clone())?;

    match cli.command {
        Some(Commands::Features) | None => cmd_features(&config),
        Some(Commands::Menu {
            user,
            superuser,
            grant,
        }) => {
            let user = match user {
                Some(name) => config.user(&name)?.clone(),
                None => ad_hoc_user(superuser, &grant),
            };
            cmd_menu(&caps, &user)
        }
        Some(Commands::Steps { json }) => cmd_steps(&caps, json),
        Some(Commands::Limit { file, set, clear }) => cmd_limit(&file, set.as_deref(), clear),
    }
}

fn init_logging(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        Ok(Config::load(path)?)
    } else {
        Ok(Config::default_config())
    }
}

fn ad_hoc_user(superuser: bool, grants: &[Permission]) -> User {
    let mut user = if superuser {
        User::superuser(0)
    } else {
        User::new(0)
    };
    for grant in grants {
        match grant {
            Permission::DataModel => user.can_access_data_model = true,
            Permission::DbManagement => user.can_access_db_management = true,
            Permission::Settings => user.can_access_settings = true,
            Permission::Monitoring => user.can_access_monitoring = true,
        }
    }
    user
}

fn cmd_features(config: &Config) -> Result<()> {
    let gates = gates();

    println!("{:<24}  STATUS", "FEATURE");
    println!("{}", "-".repeat(40));

    for flag in gates.flags() {
        let status = if config.features.has_feature(flag) {
            "enabled"
        } else {
            "disabled"
        };
        println!("{flag:<24}  {status}");
    }

    for flag in config.features.iter() {
        if !gates.flags().any(|known| known == flag) {
            println!("{flag:<24}  enabled (no gate)");
        }
    }

    Ok(())
}

fn cmd_menu(caps: &Capabilities, user: &User) -> Result<()> {
    let items = caps.navigation.allowed_menu_items(user);

    if items.is_empty() {
        println!("No admin menu items available.");
        return Ok(());
    }

    println!("{:<20}  PATH", "NAME");
    println!("{}", "-".repeat(48));
    for item in items {
        println!("{:<20}  {}", item.name, item.path);
    }

    Ok(())
}

fn cmd_steps(caps: &Capabilities, as_json: bool) -> Result<()> {
    let steps = caps.steps.by_priority();

    if as_json {
        let rendered: Vec<Value> = steps
            .iter()
            .map(|(kind, ui)| {
                json!({
                    "kind": kind,
                    "ui": ui,
                    "resolved_color": ui.resolve_color(&DefaultPalette),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rendered)?);
        return Ok(());
    }

    println!(
        "{:<12}  {:<14}  {:<16}  {:<8}  {:<10}  STYLE",
        "KIND", "TITLE", "ICON", "PRIORITY", "COLOR"
    );
    println!("{}", "-".repeat(80));

    for (kind, ui) in steps {
        let mut style = Vec::new();
        if ui.is_transparent() {
            style.push("transparent");
        }
        if ui.is_compact() {
            style.push("compact");
        }
        println!(
            "{:<12}  {:<14}  {:<16}  {:<8}  {:<10}  {}",
            kind.as_str(),
            ui.title(),
            ui.icon().unwrap_or("-"),
            ui.priority(),
            ui.color().as_str(),
            style.join(",")
        );
    }

    Ok(())
}

fn cmd_limit(file: &Path, set: Option<&str>, clear: bool) -> Result<()> {
    let content = std::fs::read_to_string(file)?;
    let query = MbqlQuery::parse(&content)?;

    let new_limit = match (set, clear) {
        (Some(value), _) => Some(parse_limit(value)?),
        (None, true) => Some(Value::Null),
        (None, false) => None,
    };

    match new_limit {
        Some(limit) => {
            let updated = Mbql.try_limit(query, limit)?;
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
        None => {
            println!("limit: {}", Mbql.current_limit(&query));
            println!("has_limit: {}", has_limit(&Mbql, &query));
        }
    }

    Ok(())
}
