//! mealfinder - Meal ideas from the ingredients you already have
//!
//! Entry point for the mealfinder application.

use clap::Parser;
use mealfinder::cli::{Cli, Commands, ConfigCommands, LookupArgs, SearchArgs, ServeArgs};
use mealfinder::config::Config;
use mealfinder::error::exit_code;
use mealfinder::mealdb::{DietaryFilter, IngredientQuery, Meal, MealDbClient, MealSource};
use mealfinder::MealFinderError;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            if matches!(cli.command, Commands::Config(ConfigCommands::Validate)) {
                println!("✗ Configuration is invalid: {}", e);
            } else {
                eprintln!("Failed to load configuration: {}", e);
            }
            return ExitCode::from(e.exit_code() as u8);
        }
    };

    if let Err(e) = config.logging.init(cli.log_level_override()) {
        eprintln!("{}", e);
        return ExitCode::from(exit_code::GENERAL_ERROR as u8);
    }

    match run(&cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Main application logic.
fn run(cli: &Cli, config: Config) -> mealfinder::Result<()> {
    match &cli.command {
        Commands::Serve(args) => cmd_serve(config, args),
        Commands::Random => cmd_random(&config),
        Commands::Lookup(args) => cmd_lookup(&config, args),
        Commands::Search(args) => cmd_search(&config, args),
        Commands::Config(subcmd) => cmd_config(&config, subcmd),
    }
}

fn runtime() -> mealfinder::Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().map_err(MealFinderError::from)
}

/// Handle the `serve` command.
fn cmd_serve(mut config: Config, args: &ServeArgs) -> mealfinder::Result<()> {
    if let Some(bind) = &args.bind {
        config.server.bind = bind.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;

    tracing::info!(
        bind = %config.server.bind,
        port = %config.server.port,
        upstream = %config.mealdb.base_url,
        "Starting mealfinder server"
    );

    runtime()?.block_on(mealfinder::serve(&config))
}

/// Handle the `random` command.
fn cmd_random(config: &Config) -> mealfinder::Result<()> {
    runtime()?.block_on(async {
        let client = MealDbClient::from_config(&config.mealdb)?;
        match client.try_random_meal().await? {
            Some(meal) => {
                print_meal_details(&meal);
                Ok(())
            }
            None => Err(MealFinderError::MealNotFound {
                id: "random".to_string(),
            }),
        }
    })
}

/// Handle the `lookup` command.
fn cmd_lookup(config: &Config, args: &LookupArgs) -> mealfinder::Result<()> {
    runtime()?.block_on(async {
        let client = MealDbClient::from_config(&config.mealdb)?;
        match client.try_lookup(&args.id).await? {
            Some(meal) => {
                print_meal_details(&meal);
                Ok(())
            }
            None => Err(MealFinderError::MealNotFound {
                id: args.id.clone(),
            }),
        }
    })
}

/// Handle the `search` command.
fn cmd_search(config: &Config, args: &SearchArgs) -> mealfinder::Result<()> {
    let ingredients = IngredientQuery::parse(&args.ingredients);
    if ingredients.is_empty() {
        return Err(MealFinderError::invalid_request(
            "at least one ingredient is required",
        ));
    }
    let filter = DietaryFilter::new(&args.tags);

    tracing::info!(ingredients = %ingredients, tags = ?filter.tags(), "Searching meals");

    runtime()?.block_on(async {
        let client = MealDbClient::from_config(&config.mealdb)?;
        let meals = client.filtered_meals(&ingredients, &filter).await;

        if meals.is_empty() {
            println!("No matching meals found.");
            return Ok::<(), MealFinderError>(());
        }

        for meal in &meals {
            println!("{:>8}  {}", meal.id, meal.display_name());
        }
        println!("\n{} meal(s)", meals.len());
        Ok::<(), MealFinderError>(())
    })
}

/// Handle the `config` subcommand.
fn cmd_config(config: &Config, subcmd: &ConfigCommands) -> mealfinder::Result<()> {
    match subcmd {
        ConfigCommands::Validate => {
            println!("✓ Configuration is valid");
            tracing::debug!(?config, "Validated configuration");
            Ok(())
        }
        ConfigCommands::Show => {
            let yaml = serde_yaml::to_string(config).map_err(|e| {
                MealFinderError::config_with_source("Failed to serialize configuration", e)
            })?;
            println!("{}", yaml);
            Ok(())
        }
    }
}

fn print_meal_details(meal: &Meal) {
    println!("{} ({})", meal.display_name(), meal.id);
    println!("{}", "=".repeat(meal.display_name().len() + meal.id.len() + 3));

    if let Some(category) = &meal.category {
        println!("Category: {}", category);
    }
    if let Some(area) = &meal.area {
        println!("Area: {}", area);
    }
    let tags = meal.tag_list();
    if !tags.is_empty() {
        println!("Tags: {}", tags.join(", "));
    }
    if let Some(thumbnail) = &meal.thumbnail {
        println!("Image: {}", thumbnail);
    }

    if !meal.ingredients.is_empty() {
        println!("\nIngredients:");
        for line in &meal.ingredients {
            match &line.measure {
                Some(measure) => println!("  - {} ({})", line.name, measure),
                None => println!("  - {}", line.name),
            }
        }
    }

    if let Some(instructions) = &meal.instructions {
        println!("\nInstructions:\n{}", instructions);
    }
    if let Some(source) = &meal.source {
        println!("\nSource: {}", source);
    }
}

/// Load configuration with error handling.
fn load_config(cli: &Cli) -> mealfinder::Result<Config> {
    Config::load(cli.config.as_deref())
}
