use std::env;
use std::path::Path;
use std::process::ExitCode;

use log::error;

use recipe_cloner::pipeline::read_url_batch;
use recipe_cloner::{CloneConfig, CloneError, IngestionPipeline, Source};

const USAGE: &str = "Usage: recipe-cloner <command>

Commands:
  scrape <urls-file>   Clone recipes from a newline-delimited URL file
  import <file.json>   Clone recipes from a JSON file
  api <url>            Clone recipes from a JSON API endpoint
  list                 List all stored recipes
  stats                Show cookbook statistics
  clear --yes          Delete every stored recipe and ingredient";

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), CloneError> {
    let config = CloneConfig::load()?;

    match args.get(1).map(String::as_str) {
        Some("scrape") => {
            let path = require_arg(args, "a URL file path")?;
            let sources = read_url_batch(Path::new(&path))?;
            let total = sources.len();
            let mut pipeline = IngestionPipeline::new(&config)?;
            let succeeded = pipeline.ingest_batch(&sources);
            println!("{succeeded} of {total} sources yielded a new recipe");
        }
        Some("import") => {
            let path = require_arg(args, "a JSON file path")?;
            let mut pipeline = IngestionPipeline::new(&config)?;
            let succeeded = pipeline.ingest(&Source::JsonFile(path.into()));
            println!("Imported {succeeded} new recipes");
        }
        Some("api") => {
            let url = require_arg(args, "an API URL")?;
            let mut pipeline = IngestionPipeline::new(&config)?;
            let succeeded = pipeline.ingest(&Source::Api(url));
            println!("Imported {succeeded} new recipes");
        }
        Some("list") => {
            let pipeline = IngestionPipeline::new(&config)?;
            let recipes = pipeline.store().list_all()?;
            println!("{} recipes:", recipes.len());
            for recipe in recipes {
                println!(
                    "  {} [{}] {} min, {} ingredients, {} steps (from {})",
                    recipe.title,
                    recipe.recipe_type,
                    recipe.duration_in_minutes,
                    recipe.ingredients.len(),
                    recipe.steps.len(),
                    recipe.source,
                );
            }
        }
        Some("stats") => {
            let pipeline = IngestionPipeline::new(&config)?;
            let stats = pipeline.store().statistics()?;
            println!("Total recipes:     {}", stats.total_recipes);
            println!("Total ingredients: {}", stats.total_ingredients);
            println!("By type:");
            for (label, count) in &stats.by_type {
                println!("  {label}: {count}");
            }
            println!("By source:");
            for (label, count) in &stats.by_source {
                println!("  {label}: {count}");
            }
        }
        Some("clear") => {
            if args.get(2).map(String::as_str) != Some("--yes") {
                return Err(CloneError::ParseError(
                    "clear is irreversible; pass --yes to confirm".to_string(),
                ));
            }
            let pipeline = IngestionPipeline::new(&config)?;
            pipeline.store().clear_all()?;
            println!("Cookbook cleared");
        }
        _ => {
            eprintln!("{USAGE}");
        }
    }

    Ok(())
}

fn require_arg(args: &[String], what: &str) -> Result<String, CloneError> {
    args.get(2)
        .cloned()
        .ok_or_else(|| CloneError::ParseError(format!("Expected {what} as an argument")))
}
