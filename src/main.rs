use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod analysis;
mod cleaning;
mod constants;
mod error;
mod lexicon;
mod loader;
mod models;
mod report;
mod sentiment;

use loader::{RawTable, SourceInfo};

#[derive(Parser)]
#[command(name = "review-analyzer")]
#[command(about = "Sentiment and issue report for scraped restaurant reviews", long_about = None)]
struct Cli {
    /// Review table with restaurant_name, comment_text, date and rating columns ("-" for stdin)
    #[arg(long, env = "REVIEWS_CSV", global = true)]
    csv: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print overall statistics and the top restaurants by score
    Analyze {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// List restaurants by average rating
    List {
        /// Case-insensitive filter on the restaurant name
        #[arg(long)]
        search: Option<String>,
    },
    /// Show detailed statistics and a summary for one restaurant
    Show {
        #[arg(long)]
        restaurant: String,
    },
    /// Generate a markdown report
    Report {
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Export the full analysis as JSON
    Export {
        #[arg(long, default_value = "analysis.json")]
        out: PathBuf,
    },
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_reviews(path: &Path) -> anyhow::Result<Vec<models::Review>> {
    let table = if path == Path::new("-") {
        RawTable::from_reader(std::io::stdin().lock())?
    } else {
        RawTable::from_path(path)?
    };
    let reviews = cleaning::clean(&table)
        .with_context(|| format!("cannot analyze {}", path.display()))?;
    Ok(reviews)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let csv_path = cli
        .csv
        .context("--csv or REVIEWS_CSV must point to a review table")?;
    let reviews = load_reviews(&csv_path)?;
    let analysis = analysis::analyze(&reviews);

    match cli.command {
        Commands::Analyze { limit } => {
            let stats = &analysis.stats;
            println!("Comments: {}", stats.total_comments);
            println!("Restaurants: {}", stats.restaurant_count);
            println!("Comments with a valid rating: {}", stats.valid_ratings);
            println!("Average rating: {:.2}", stats.average_rating);
            print!("{}", report::render_overview(&analysis::restaurant_overview(&reviews)));

            match &analysis.best_restaurant {
                Some(name) => println!("Best restaurant: {name}"),
                None => {
                    println!("No reviews found in this table.");
                    return Ok(());
                }
            }

            println!("Top restaurants by score:");
            for score in analysis::score_restaurants(&analysis.restaurants)
                .iter()
                .take(limit)
            {
                println!(
                    "- {} score {:.2} (rating {:.2}, {:.1}% positive, {} comments)",
                    score.restaurant_name,
                    score.score,
                    score.average_rating,
                    score.positive_percentage,
                    score.total_comments
                );
            }
        }
        Commands::List { search } => {
            let ranked = analysis::rank_by_rating(&analysis.restaurants, search.as_deref());
            if ranked.is_empty() {
                println!("No matching restaurants.");
                return Ok(());
            }
            for (name, restaurant) in ranked {
                println!(
                    "{}\t{:.1}\t{}",
                    name, restaurant.average_rating, restaurant.total_comments
                );
            }
        }
        Commands::Show { restaurant } => {
            let view = report::restaurant_report(&analysis, &restaurant)
                .with_context(|| format!("no reviews found for restaurant '{restaurant}'"))?;
            println!("{}", report::render_summary(&view));
            print!("{}", report::render_stats(&view));
        }
        Commands::Report { out } => {
            let source = SourceInfo::from_path(&csv_path).ok();
            let output = report::build_report(&analysis, source.as_ref());
            std::fs::write(&out, output)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Export { out } => {
            let source = SourceInfo::from_path(&csv_path).ok();
            let export = serde_json::json!({
                "source": source,
                "analysis": analysis,
            });
            let json = serde_json::to_string_pretty(&export)?;
            std::fs::write(&out, json)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Analysis exported to {}.", out.display());
        }
    }

    Ok(())
}
