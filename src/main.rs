use clap::{Parser, Subcommand};
use log::{error, info};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use recipe_genie::{
    relay, Controller, GenieConfig, GenieError, Key, KeyPress, RecipeGenerator, RecipeSource,
    RelayClient, ViewState, EXAMPLE_INGREDIENTS,
};

#[derive(Parser, Debug)]
#[command(
    name = "recipe-genie",
    version,
    about = "Turn the ingredients you have into a recipe"
)]
struct Cli {
    /// Generate through a relay server instead of calling the model directly
    #[arg(long, global = true, env = "RECIPE_GENIE_RELAY_URL")]
    relay_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one recipe and print it
    Generate {
        /// Ingredients, comma separated
        #[arg(required = true)]
        ingredients: Vec<String>,
    },
    /// Prompt for ingredients until `:q`
    Interactive,
    /// Run the HTTP relay that keeps the API key on the server
    Serve {
        /// Address to listen on (defaults to the configured server.addr)
        #[arg(long)]
        addr: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = GenieConfig::load().map_err(GenieError::from)?;

    match cli.command {
        Command::Generate { ingredients } => {
            let source = recipe_source(&config, cli.relay_url.as_deref())?;
            let mut controller = Controller::new(source);
            controller.set_input(ingredients.join(" "));
            controller.submit().await;

            print!("{}", controller.render());
            if let ViewState::Error(_) = controller.state() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Interactive => {
            let source = recipe_source(&config, cli.relay_url.as_deref())?;
            interactive(source).await?;
        }
        Command::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| config.server.addr.clone());
            let generator: Option<Arc<dyn RecipeSource>> =
                match RecipeGenerator::from_config(&config) {
                    Ok(generator) => Some(Arc::new(generator)),
                    Err(e) => {
                        error!("{}", e);
                        None
                    }
                };
            relay::serve(&addr, generator).await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Pick the relay client or a direct model connection.
///
/// A missing credential is reported here, before any request is attempted.
fn recipe_source(
    config: &GenieConfig,
    relay_url: Option<&str>,
) -> Result<Arc<dyn RecipeSource>, GenieError> {
    match relay_url {
        Some(url) => {
            info!("Using relay at {}", url);
            Ok(Arc::new(RelayClient::new(url)))
        }
        None => Ok(Arc::new(RecipeGenerator::from_config(config)?)),
    }
}

/// Line-based front end for the controller.
///
/// Enter submits the line; a trailing `\` continues on the next line.
async fn interactive(source: Arc<dyn RecipeSource>) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = Controller::new(Arc::clone(&source));
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout.write_all(controller.render().as_bytes()).await?;
    stdout.write_all(examples_help().as_bytes()).await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();

        if trimmed == ":q" {
            break;
        }
        if let Some(index) = trimmed
            .strip_prefix(':')
            .and_then(|n| n.parse::<usize>().ok())
        {
            if index > 0 && controller.use_example(index - 1) {
                stdout
                    .write_all(format!("> {}\n", controller.input()).as_bytes())
                    .await?;
                submit(&mut controller, &source, &mut stdout).await?;
            } else {
                stdout.write_all(examples_help().as_bytes()).await?;
            }
            stdout.flush().await?;
            continue;
        }

        let (text, continues) = match line.strip_suffix('\\') {
            Some(text) => (text, true),
            None => (line.as_str(), false),
        };
        for c in text.chars() {
            controller.on_key(KeyPress::new(Key::Char(c))).await;
        }

        if continues {
            controller.on_key(KeyPress::with_shift(Key::Enter)).await;
        } else {
            submit(&mut controller, &source, &mut stdout).await?;
            controller.set_input("");
        }
        stdout.flush().await?;
    }

    Ok(())
}

async fn submit(
    controller: &mut Controller,
    source: &Arc<dyn RecipeSource>,
    stdout: &mut tokio::io::Stdout,
) -> std::io::Result<()> {
    let Some(ingredients) = controller.begin() else {
        return stdout.write_all(controller.render().as_bytes()).await;
    };

    stdout.write_all(controller.render().as_bytes()).await?;
    stdout.flush().await?;

    let result = source.generate(&ingredients).await;
    controller.finish(result);
    stdout.write_all(controller.render().as_bytes()).await
}

fn examples_help() -> String {
    let mut help = String::from("Ou tente um exemplo:\n");
    for (index, example) in EXAMPLE_INGREDIENTS.iter().enumerate() {
        help.push_str(&format!("  :{} {}\n", index + 1, example));
    }
    help.push_str("  :q sair\n");
    help
}
