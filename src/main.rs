//! rigcheck
//!
//! Browse a PC part catalog, keep a build and check it for compatibility.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use rusqlite::Connection;
use tracing_subscriber::{EnvFilter, fmt as tracing_fmt, prelude::*};

use rigcheck::models::Category;
use rigcheck::{compat, db, export, ingest, power, sample};

#[derive(Parser)]
#[command(name = "rigcheck")]
#[command(about = "PC part catalog and build compatibility checker")]
struct Cli {
    /// Path to the SQLite database
    #[arg(
        short,
        long,
        global = true,
        env = "RIGCHECK_DATABASE",
        default_value = "rigcheck.db"
    )]
    database: PathBuf,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize empty database with schema
    Init,

    /// Ingest a pc-part-dataset JSON directory
    Ingest {
        /// Directory holding cpu.json, video-card.json, ...
        dataset_dir: PathBuf,

        /// Clear the existing catalog and selection first
        #[arg(long)]
        clear: bool,
    },

    /// Replace the catalog with the built-in sample parts
    LoadSample,

    /// List catalog parts that fit the current build
    Parts {
        /// Category (cpu, gpu, motherboard, ram, storage, psu, case, cooler)
        category: Category,

        /// Show every part, ignoring the current build
        #[arg(long)]
        all: bool,

        /// Maximum number of parts to show
        #[arg(short, long, default_value = "25")]
        limit: usize,
    },

    /// Put a catalog part into the build
    Select {
        category: Category,

        /// Exact part name
        name: String,
    },

    /// Empty one slot of the build
    Remove { category: Category },

    /// Empty every slot of the build
    ClearBuild,

    /// Show the build with cost, power and issues
    Status,

    /// Check the build, failing when there are issues
    Check,

    /// Export the build
    Export {
        #[arg(short, long, value_enum, default_value = "text")]
        format: ExportFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Text,
    Json,
}

fn init_tracing(verbose: u8) -> Result<()> {
    let filter = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::try_from_default_env()?
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::new(format!("error,rigcheck={level}"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let mut conn = Connection::open(&cli.database)
        .with_context(|| format!("opening database {}", cli.database.display()))?;
    db::init_schema(&conn)?;

    match cli.command {
        Commands::Init => {
            println!("Database initialized at: {}", cli.database.display());
        }

        Commands::Ingest { dataset_dir, clear } => {
            if clear {
                println!("Clearing existing catalog...");
                db::clear_catalog(&conn)?;
            }

            let stats = ingest::ingest_directory(&mut conn, &dataset_dir)
                .with_context(|| format!("ingesting {}", dataset_dir.display()))?;
            println!("\n{}", stats);
        }

        Commands::LoadSample => {
            let stats = sample::load_sample(&mut conn)?;
            let stored: usize = stats.iter().map(|c| c.stored).sum();
            println!("Sample catalog loaded: {} parts.", stored);
        }

        Commands::Parts {
            category,
            all,
            limit,
        } => {
            let catalog = db::list_parts(&conn, category)?;
            if catalog.is_empty() {
                println!("No {} parts in database. Run 'ingest' or 'load-sample' first.", category);
                return Ok(());
            }

            let build = db::load_build(&conn)?;
            let shown: Vec<_> = if all {
                catalog.iter().collect()
            } else {
                compat::compatible_candidates(&build, &catalog)
            };

            println!("{:<50} {:>10}  Details", category.label(), "Price");
            println!("{}", "-".repeat(80));
            for part in shown.iter().take(limit) {
                println!("{:<50} {:>10.2}  {}", part.name(), part.info().price, part.summary());
            }
            if shown.len() > limit {
                println!("... {} more", shown.len() - limit);
            }
            if !all && shown.len() < catalog.len() {
                println!(
                    "({} incompatible with the current build hidden, use --all to show)",
                    catalog.len() - shown.len()
                );
            }
        }

        Commands::Select { category, name } => {
            let part = db::select_part(&conn, category, &name)?;
            println!("Selected {}: {}", category.label(), part.name());

            let build = db::load_build(&conn)?;
            for issue in compat::validate_build(&build) {
                println!("  ! {}", issue);
            }
        }

        Commands::Remove { category } => {
            db::remove_selection(&conn, category)?;
            println!("Removed {}", category.label());
        }

        Commands::ClearBuild => {
            db::clear_selection(&conn)?;
            println!("Build cleared");
        }

        Commands::Status => {
            let build = db::load_build(&conn)?;

            println!("Build:");
            for category in Category::ALL {
                match build.get(category) {
                    Some(info) => println!(
                        "  {:<12} {:<50} ${:.2}",
                        category.label(),
                        info.name,
                        info.price
                    ),
                    None => println!("  {:<12} -", category.label()),
                }
            }

            let missing = build.missing();
            if !missing.is_empty() {
                let names: Vec<_> = missing.iter().map(|c| c.label()).collect();
                println!("\nMissing: {}", names.join(", "));
            }

            println!("\nTotal cost: ${:.2}", build.total_cost());

            println!("\nPower:");
            for (category, watts) in power::power_breakdown(&build) {
                println!("  {:<12} {:>5}W", category.label(), watts);
            }
            println!("  {:<12} {:>5}W", "Total", power::estimate_system_wattage(&build));

            let issues = compat::validate_build(&build);
            if issues.is_empty() {
                println!("\nNo known compatibility issues.");
            } else {
                println!("\nIssues:");
                for issue in issues {
                    println!("  ! {}", issue);
                }
            }
        }

        Commands::Check => {
            let build = db::load_build(&conn)?;
            let issues = compat::validate_build(&build);
            if issues.is_empty() {
                println!("No known compatibility issues.");
            } else {
                for issue in &issues {
                    println!("{}", issue);
                }
                bail!("{} compatibility issue(s) found", issues.len());
            }
        }

        Commands::Export { format, output } => {
            let build = db::load_build(&conn)?;
            let rendered = match format {
                ExportFormat::Text => export::text_summary(&build),
                ExportFormat::Json => export::to_json(&build)?,
            };

            match output {
                Some(path) => {
                    fs::write(&path, rendered)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Build exported to: {}", path.display());
                }
                None => println!("{}", rendered.trim_end()),
            }
        }
    }

    Ok(())
}
