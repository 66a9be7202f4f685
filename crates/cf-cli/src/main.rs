//! Operator CLI: database lifecycle and occupancy maintenance.

use anyhow::Result;
use cf_store::Store;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cf")]
#[command(about = "CoilFlow inventory operations CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database commands
    Db {
        #[command(subcommand)]
        cmd: DbCmd,
    },

    /// Location occupancy maintenance
    Occupancy {
        #[command(subcommand)]
        cmd: OccupancyCmd,
    },
}

#[derive(Subcommand)]
enum DbCmd {
    /// Connectivity + schema presence check
    Status,

    /// Apply SQL migrations
    Migrate,
}

#[derive(Subcommand)]
enum OccupancyCmd {
    /// Overwrite occupancy counters from the live coil counts.
    /// Corrects drift left by crashes between the coil and location writes.
    Reconcile {
        /// Single location code; omit to reconcile every known location.
        #[arg(long)]
        code: Option<String>,
    },

    /// Overwrite the capacity ceiling of one location
    SetCapacity {
        #[arg(long)]
        code: String,
        #[arg(long)]
        capacity: i32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Db { cmd } => match cmd {
            DbCmd::Status => {
                let pool = cf_db::connect_from_env().await?;
                let st = cf_db::status(&pool).await?;
                println!("ok: {}", st.ok);
                println!("has_coils_table: {}", st.has_coils_table);
            }
            DbCmd::Migrate => {
                let pool = cf_db::connect_from_env().await?;
                cf_db::migrate(&pool).await?;
                println!("migrations applied");
            }
        },

        Commands::Occupancy { cmd } => match cmd {
            OccupancyCmd::Reconcile { code } => {
                let pool = cf_db::connect_from_env().await?;
                let store = cf_db::PgStore::new(pool);
                let codes: Vec<String> = match code {
                    Some(code) => vec![code],
                    None => store
                        .list_locations()
                        .await?
                        .into_iter()
                        .map(|l| l.location_code)
                        .collect(),
                };
                for code in codes {
                    let loc = cf_core::reconcile_occupancy(&store, &code).await?;
                    println!("{}: occupied={}", loc.location_code, loc.occupied);
                }
            }
            OccupancyCmd::SetCapacity { code, capacity } => {
                let pool = cf_db::connect_from_env().await?;
                let store = cf_db::PgStore::new(pool);
                let loc = cf_core::set_capacity(&store, &code, capacity).await?;
                println!(
                    "{}: capacity={} occupied={}",
                    loc.location_code, loc.capacity, loc.occupied
                );
            }
        },
    }

    Ok(())
}
