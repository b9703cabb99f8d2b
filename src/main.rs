use clap::{Parser, Subcommand};
use chrono::Utc;
use hansardbot::hansard::{self, HansardClient};
use hansardbot::lexicon::Lexicon;
use hansardbot::prelude::*;
use hansardbot::report;
use hansardbot::verify::VerificationResults;
use std::path::PathBuf;

/// Sentiment classification and cross-validation for parliamentary AI mentions
#[derive(Parser, Debug)]
#[command(name = "hansardbot")]
#[command(about = "Classify and verify AI-mention sentiment in parliamentary contributions")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify mention records from a directory of JSON batch shards
    Classify {
        /// Directory containing batch shard files
        batch_dir: PathBuf,

        /// Sort order for shard files: ASC or DESC
        #[arg(long, default_value = "ASC", value_parser = ["ASC", "DESC"])]
        sort: String,

        /// Limit number of shards processed
        #[arg(long)]
        limit: Option<usize>,

        /// YAML file overriding the context scoring vocabulary
        #[arg(long)]
        lexicon: Option<PathBuf>,

        /// Write classification results as JSON to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write a stats summary (counts and percentages) to this file
        #[arg(long = "stats-output")]
        stats_output: Option<PathBuf>,
    },

    /// Re-analyze a persisted sentiment store and report discrepancies
    Verify {
        /// Path to the persisted sentiment store file
        store: PathBuf,

        /// Write the Markdown verification report to this file
        #[arg(long)]
        report: Option<PathBuf>,

        /// Write the full verification results as JSON to this file
        #[arg(long)]
        results: Option<PathBuf>,
    },

    /// Run the recommendation rules over a saved verification run
    Review {
        /// JSON results file produced by the verify command
        results: PathBuf,

        /// Write the Markdown review report to this file instead of stdout
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Fetch contributions from the Hansard search API into batch shards
    Fetch {
        /// Search term, quoted for exact matching (e.g. "AI")
        term: String,

        /// Only contributions on or after this date (YYYY-MM-DD)
        #[arg(long = "start-date", default_value = "2025-01-01")]
        start_date: String,

        /// Directory to write batch shard files into
        #[arg(long, default_value = "batches")]
        output: PathBuf,

        /// Mentions per shard file
        #[arg(long = "batch-size", default_value_t = 20)]
        batch_size: usize,
    },
}

fn print_available_commands() {
    println!("Available commands:");
    println!("  classify  Classify mention records from JSON batch shards");
    println!("  verify    Re-analyze a persisted sentiment store");
    println!("  review    Run recommendation rules over saved verification results");
    println!("  fetch     Fetch contributions from the Hansard search API");
}

async fn run_classify_command(cmd: Command) -> anyhow::Result<()> {
    let Command::Classify {
        batch_dir,
        sort,
        limit,
        lexicon,
        output,
        stats_output,
    } = cmd
    else {
        unreachable!()
    };

    let mut builder = ConfigBuilder::new(&batch_dir).sort_order_str(&sort);
    if let Some(limit) = limit {
        builder = builder.limit(limit);
    }
    let config = builder.build()?;

    let classifier = match lexicon {
        Some(path) => MentionClassifier::with_lexicon(Lexicon::from_yaml_file(path)?)?,
        None => MentionClassifier::new()?,
    };

    let processor = BatchProcessor::new(config);
    let mentions = processor.collect_mentions().await?;
    let results = classifier.classify_batch(&mentions);

    let tally = report::SentimentTally::from_results(&results);
    eprint!("{}", report::render_classification_summary(&tally));

    let json = serde_json::to_string_pretty(&results)?;
    match output {
        Some(path) => std::fs::write(&path, json)?,
        None => println!("{}", json),
    }

    if let Some(path) = stats_output {
        let stats = report::StatsSummary::from_tally(&tally);
        std::fs::write(&path, serde_json::to_string_pretty(&stats)?)?;
    }

    Ok(())
}

async fn run_verify_command(cmd: Command) -> anyhow::Result<()> {
    let Command::Verify {
        store,
        report: report_path,
        results: results_path,
    } = cmd
    else {
        unreachable!()
    };

    let store = SentimentStore::load(&store)?;
    let analyzer = MetadataAnalyzer::new();
    let results = reconcile(&store, &analyzer);

    let rendered = report::render_verification_report(&results, Utc::now());
    match report_path {
        Some(path) => {
            std::fs::write(&path, &rendered)?;
            eprintln!(
                "Verified {} entries, agreement rate {:.1}%",
                results.summary.total_analyses, results.summary.agreement_rate
            );
        }
        None => println!("{}", rendered),
    }

    if let Some(path) = results_path {
        std::fs::write(&path, serde_json::to_string_pretty(&results)?)?;
    }

    Ok(())
}

async fn run_review_command(cmd: Command) -> anyhow::Result<()> {
    let Command::Review {
        results,
        report: report_path,
    } = cmd
    else {
        unreachable!()
    };

    let content = std::fs::read_to_string(&results)?;
    let results: VerificationResults = serde_json::from_str(&content)?;
    let reviews = report::review_discrepancies(&results);

    let rendered = report::render_review_report(&results, &reviews, Utc::now());
    match report_path {
        Some(path) => {
            std::fs::write(&path, &rendered)?;
            eprintln!(
                "Reviewed {} discrepancies, effective agreement {:.1}%",
                reviews.len(),
                report::effective_agreement_rate(&results, &reviews)
            );
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

async fn run_fetch_command(cmd: Command) -> anyhow::Result<()> {
    let Command::Fetch {
        term,
        start_date,
        output,
        batch_size,
    } = cmd
    else {
        unreachable!()
    };

    // reqwest's blocking client must not run on the async runtime threads
    let mentions = tokio::task::spawn_blocking(move || -> Result<Vec<Mention>> {
        let client = HansardClient::new()?;
        client.search_mentions(&term, &start_date)
    })
    .await??;

    let shards = hansard::write_shards(&mentions, &output, batch_size)?;
    eprintln!(
        "Fetched {} mentions into {} shard(s) under {}",
        mentions.len(),
        shards,
        output.display()
    );

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Some(cmd @ Command::Classify { .. }) => run_classify_command(cmd).await,
        Some(cmd @ Command::Verify { .. }) => run_verify_command(cmd).await,
        Some(cmd @ Command::Review { .. }) => run_review_command(cmd).await,
        Some(cmd @ Command::Fetch { .. }) => run_fetch_command(cmd).await,
        None => {
            print_available_commands();
            Ok(())
        }
    }
}
