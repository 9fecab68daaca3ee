use clap::{Parser, Subcommand};
use edubot::prelude::*;
use edubot::taxonomy::default_taxonomy;
use std::io::{self, BufRead};
use std::path::PathBuf;

/// Classify and filter education legislation records
#[derive(Parser, Debug)]
#[command(name = "edubot")]
#[command(about = "Filter and categorize education legislation from bill record feeds")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify bill records and write one JSON entry per line
    Classify {
        /// Input files (JSON array, master list object, or NDJSON)
        #[arg(num_args = 0..)]
        inputs: Vec<PathBuf>,

        /// Taxonomy override file (edubot.yml)
        #[arg(long)]
        taxonomy: Option<PathBuf>,

        /// Sort order over last-action dates: ASC or DESC
        #[arg(long, default_value = "DESC", value_parser = ["ASC", "DESC"])]
        sort: String,

        /// Limit number of results
        #[arg(long)]
        limit: Option<usize>,

        /// Keep only these categories (comma-separated ids)
        #[arg(long, default_value = "")]
        categories: String,

        /// Keep only these education types (comma-separated ids)
        #[arg(long, default_value = "")]
        types: String,

        /// Relevance filter alias: default or none
        #[arg(long, default_value = "default", value_parser = ["default", "none"])]
        filter: String,

        /// Read NDJSON records from stdin instead of input files
        /// Useful for stdio pipelines: curl ... | edubot classify --stdin
        #[arg(long)]
        stdin: bool,
    },

    /// Print the category taxonomy
    Categories {
        /// Emit JSON instead of a text table
        #[arg(long)]
        json: bool,
    },
}

fn print_available_commands() {
    println!("Available commands:");
    println!("  classify    Classify bill records and write one JSON entry per line");
    println!("  categories  Print the category taxonomy");
}

async fn run_classify_command(cmd: Command) -> anyhow::Result<()> {
    let Command::Classify {
        inputs,
        taxonomy,
        sort,
        limit,
        categories,
        types,
        filter,
        stdin,
    } = cmd
    else {
        unreachable!()
    };

    // Build configuration
    let mut builder = ConfigBuilder::new()
        .inputs(inputs)
        .filter_alias_str(&filter)
        .sort_order_str(&sort)?
        .categories_str(&categories)?
        .education_types_str(&types)?;

    if let Some(taxonomy) = taxonomy {
        builder = builder.taxonomy_path(taxonomy);
    }

    if let Some(limit) = limit {
        builder = builder.limit(limit);
    }

    let config = builder.build()?;

    let processor = BillProcessor::new(config.clone());

    if stdin {
        // Read NDJSON records from stdin (one per line)
        let stdin = io::stdin();
        let lines = stdin
            .lock()
            .lines()
            .filter_map(|line| line.ok())
            .filter(|line| !line.trim().is_empty());

        let mut stream = BillProcessor::process_from_stdin(&config, lines);

        // Write JSON to stdout (one per line)
        while let Some(result) = stream.next().await {
            match result {
                Ok(entry) => {
                    let json = serde_json::to_string(&entry)?;
                    println!("{}", json);
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                }
            }
        }
    } else {
        // Process records from the configured input files
        let mut stream = processor.process();

        // Write JSON to stdout (one per line)
        while let Some(result) = stream.next().await {
            match result {
                Ok(entry) => {
                    let json = serde_json::to_string(&entry)?;
                    println!("{}", json);
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                }
            }
        }
    }

    Ok(())
}

fn run_categories_command(json: bool) -> anyhow::Result<()> {
    let taxonomy = default_taxonomy();

    if json {
        let entries: Vec<serde_json::Value> = Category::all()
            .iter()
            .map(|category| {
                let info = category_info(*category);
                serde_json::json!({
                    "id": info.id,
                    "label": info.label,
                    "color": info.color,
                    "keywords": taxonomy.category_keywords(*category),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for category in Category::all() {
            let info = category_info(*category);
            let keywords = taxonomy.category_keywords(*category);
            println!(
                "{:<16} {:<26} {:<8} {} keywords",
                info.id,
                info.label,
                info.color,
                keywords.len()
            );
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Some(cmd @ Command::Classify { .. }) => run_classify_command(cmd).await,
        Some(Command::Categories { json }) => run_categories_command(json),
        None => {
            print_available_commands();
            Ok(())
        }
    }
}
