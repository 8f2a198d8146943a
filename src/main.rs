use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use leadhub::config::Config;
use leadhub::leads::loader::load_leads;
use leadhub::leads::registry;
use leadhub::output::{terminal, write_csv, write_json};
use leadhub::scoring::enrich::{self, EnrichmentWeights};
use leadhub::scoring::matcher::best_match;
use leadhub::scoring::outreach::{build_shortlist, csv_rows, ShortlistCriteria, ShortlistDocument};
use leadhub::scoring::signal::compute_signal;
use leadhub::tenders::aggregate::aggregate;
use leadhub::tenders::export::{build_export, StrictClassifier};
use leadhub::tenders::loader::{load_records, load_rows};

/// Leadhub: rank algorithm-registry organizations as sales leads.
///
/// Matches registry leads against public tender data and boosts the ones
/// that are actively buying AI, governance or ICT services.
#[derive(Parser)]
#[command(name = "leadhub", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the leads file from an algorithm-registry CSV export
    Registry {
        /// The registry CSV export
        csv: PathBuf,

        /// Where to write the leads (default: LEADHUB_LEADS_PATH)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Enrich registry leads with tender buying signals
    Enrich {
        /// Where to write the enriched leads (default: LEADHUB_OUTPUT_PATH)
        #[arg(long)]
        output: Option<PathBuf>,

        /// How many top leads to print (default: 10)
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Show which tender profile a lead name matches
    Match {
        /// The organization name as it appears in the registry
        name: String,
    },

    /// Export AI/governance/ICT tenders for the tender explorer
    Tenders {
        /// Where to write the export (default: LEADHUB_TENDER_EXPORT_PATH)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Build the quick-win and strategic outreach shortlists
    Shortlist {
        /// Date to measure registry recency against (YYYY-MM-DD, default: today)
        #[arg(long)]
        reference_date: Option<String>,
    },

    /// Show which input and output files are present
    Status,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("leadhub=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let today = Local::now().date_naive();

    match cli.command {
        Commands::Registry { csv, output } => {
            let rows = registry::load_rows(&csv)?;
            let source_file = csv
                .file_name()
                .map(|name| name.to_string_lossy().into_owned());
            let dataset = registry::build_dataset(&rows, source_file, Local::now().naive_local())?;

            let output = output.unwrap_or_else(|| config.leads_path.clone());
            write_json(&output, &dataset)?;
            info!(path = %output.display(), "Wrote registry leads");

            terminal::display_registry_summary(&dataset, 10);
            println!("\n{}", format!("Leads saved to: {}", output.display()).bold());
        }

        Commands::Enrich { output, top } => {
            config.require_leads()?;
            config.require_tenders()?;

            let dataset = load_leads(&config.leads_path)?;
            println!("Loaded {} registry leads", dataset.leads.len());

            let tenders = load_records(&config.tenders_path)?;
            println!("Loaded {} tenders", tenders.len());

            let weights = EnrichmentWeights::default();
            let enriched = enrich::run(&dataset, &tenders, &weights, today);

            let output = output.unwrap_or_else(|| config.output_path.clone());
            write_json(&output, &enriched)?;
            info!(path = %output.display(), "Wrote enriched leads");

            terminal::display_enrichment_summary(&enriched);
            terminal::display_top_leads(&enriched.leads, top);
            println!(
                "\n{}",
                format!("Enriched leads saved to: {}", output.display()).bold()
            );
        }

        Commands::Match { name } => {
            config.require_tenders()?;

            let tenders = load_records(&config.tenders_path)?;
            let weights = EnrichmentWeights::default();
            let profiles = aggregate(&tenders, &weights.keywords);

            let found = best_match(&name, &profiles, &weights.matching);
            let signal = found
                .as_ref()
                .map(|m| compute_signal(m.profile, &weights.signal));
            terminal::display_match(&name, found.as_ref(), signal.as_ref());
        }

        Commands::Tenders { output } => {
            config.require_tenders()?;

            let rows = load_rows(&config.tenders_path)?;
            let classifier = StrictClassifier::new()?;
            let export = build_export(&rows, &classifier, today);

            let output = output.unwrap_or_else(|| config.tender_export_path.clone());
            write_json(&output, &export)?;

            terminal::display_export_summary(&export);
            println!("\n{}", format!("Tender export saved to: {}", output.display()).bold());
        }

        Commands::Shortlist { reference_date } => {
            config.require_leads()?;

            let reference = match reference_date {
                Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .with_context(|| format!("Invalid --reference-date {raw:?}, expected YYYY-MM-DD"))?,
                None => today,
            };

            let dataset = load_leads(&config.leads_path)?;
            let criteria = ShortlistCriteria::default();
            let shortlist = build_shortlist(&dataset.leads, reference, &criteria);
            terminal::display_shortlist(&shortlist, dataset.leads.len());

            let csv_path = config.export_dir.join("top-20-leads.csv");
            write_csv(&csv_path, &csv_rows(&shortlist))?;
            println!("\n{}", format!("Shortlist CSV saved to: {}", csv_path.display()).bold());

            let path = config.export_dir.join("top-20-leads.json");
            let document = ShortlistDocument::new(shortlist, criteria, today, reference);
            write_json(&path, &document)?;
            println!("{}", format!("Shortlist saved to: {}", path.display()).bold());
        }

        Commands::Status => {
            leadhub::status::show(&config)?;
        }
    }

    Ok(())
}
