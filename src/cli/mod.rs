mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use spendtrack::config::{resolve_caller, Config};
use spendtrack::services::{JsonRecordStore, JsonUserStore, SummaryService};
use spendtrack::types::{IdentityProfile, NewRecord, SummaryResponse};

/// Personal expense tracker
#[derive(Parser)]
#[command(name = "spendtrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Data directory (default: $SPENDTRACK_DATA_DIR or ~/.spendtrack)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show total spend and days with spend
    Summary {
        /// Signed-in user id (default: $SPENDTRACK_USER)
        #[arg(long)]
        user: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show daily spend by category
    Daily {
        /// Signed-in user id (default: $SPENDTRACK_USER)
        #[arg(long)]
        user: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record an expense
    Add {
        #[arg(long)]
        user: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        amount: f64,

        #[arg(long)]
        category: Option<String>,

        /// Expense date (YYYY-MM-DD or RFC 3339); defaults to now
        #[arg(long)]
        date: Option<String>,

        /// Free-form description
        #[arg(long)]
        text: Option<String>,
    },

    /// Find or create the local user for an identity-provider id
    User {
        /// Identity-provider user id
        #[arg(long)]
        id: String,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        /// Email address (repeatable; the first one is kept)
        #[arg(long)]
        email: Vec<String>,

        #[arg(long)]
        image_url: Option<String>,
    },
}

impl Cli {
    /// Resolve configuration before anything else so logging can be set up from it
    pub fn config(&self) -> spendtrack::types::Result<Config> {
        Config::resolve(self.data_dir.clone())
    }

    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        match self.command {
            Commands::Summary { user, json } => {
                let service = SummaryService::new(JsonRecordStore::new(&config.data_dir));
                let caller = resolve_caller(user);
                let result = service.get_user_record(caller.as_deref());

                if json {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&SummaryResponse::from(result))?
                    );
                    return Ok(());
                }
                match result {
                    Ok(summary) => println!("{}", report::render_summary(&summary)),
                    Err(e) => anyhow::bail!(e),
                }
                Ok(())
            }
            Commands::Daily { user, json } => {
                let service = SummaryService::new(JsonRecordStore::new(&config.data_dir));
                let caller = resolve_caller(user);
                let matrix = match service.get_daily_breakdown(caller.as_deref()) {
                    Ok(m) => m,
                    Err(e) if json => {
                        println!("{}", serde_json::json!({ "error": e.to_string() }));
                        return Ok(());
                    }
                    Err(e) => anyhow::bail!(e),
                };

                if json {
                    println!("{}", serde_json::to_string_pretty(&matrix)?);
                } else {
                    println!("{}", report::render_daily(&matrix));
                }
                Ok(())
            }
            Commands::Add {
                user,
                amount,
                category,
                date,
                text,
            } => {
                let Some(caller) = resolve_caller(user) else {
                    anyhow::bail!("User not found");
                };
                let store = JsonRecordStore::new(&config.data_dir);
                let record = store.add_record(
                    &caller,
                    NewRecord {
                        amount,
                        category,
                        date,
                        text,
                    },
                )?;
                println!(
                    "Added {} ({}: ${:.2} on {})",
                    record.id,
                    record.category,
                    record.amount,
                    record.day_key()
                );
                Ok(())
            }
            Commands::User {
                id,
                first_name,
                last_name,
                email,
                image_url,
            } => {
                let store = JsonUserStore::new(&config.data_dir);
                let profile = IdentityProfile {
                    external_id: id,
                    first_name,
                    last_name,
                    image_url,
                    email_addresses: email,
                };
                let checked = store.check_user(Some(&profile))?;
                println!("{}", serde_json::to_string_pretty(&checked)?);
                Ok(())
            }
        }
    }
}
