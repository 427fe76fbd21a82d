use std::process::ExitCode;

use anyhow::Context;
use citycast_core::{API_KEY_ENV, Config, FetchStatus, WeatherController};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use tracing::debug;

use crate::render::{LOADING_LINE, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "citycast", version, about = "Current weather for any city")]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store an API key and default city in the config file.
    Configure,

    /// Show current weather for a city once.
    Show {
        /// City name, e.g. "Kyiv".
        city: String,
    },

    /// Interactive widget: loads the default city, then prompts for searches.
    Watch {
        /// City to load on start instead of the configured default.
        #[arg(long)]
        city: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => show(&city).await,
            Command::Watch { city } => watch(city).await,
        }
    }
}

fn configure() -> anyhow::Result<ExitCode> {
    let mut cfg = Config::load()?;

    let api_key = match Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
    {
        Ok(key) => key,
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => return Err(e).context("Failed to read API key"),
    };

    let city = Text::new("Default city:")
        .with_default(cfg.default_city())
        .prompt_skippable()
        .context("Failed to read default city")?;

    let replaced = cfg.set_credentials(api_key, city);
    let path = cfg.save()?;

    println!("Saved configuration to {}", path.display());
    if !replaced {
        println!("No API key entered; the stored key was left unchanged.");
    }
    println!("Note: {API_KEY_ENV} takes precedence over the stored key when set.");
    Ok(ExitCode::SUCCESS)
}

async fn show(city: &str) -> anyhow::Result<ExitCode> {
    let cfg = Config::load()?;
    let mut controller = WeatherController::from_config(&cfg);
    controller.set_query(city);

    let state = controller.submit_query(city).await;
    println!("{}", render(state));

    Ok(exit_code(controller.status()))
}

async fn watch(start_city: Option<String>) -> anyhow::Result<ExitCode> {
    let mut cfg = Config::load()?;
    if start_city.is_some() {
        cfg.default_city = start_city;
    }
    let mut controller = WeatherController::from_config(&cfg);

    println!("{LOADING_LINE} ({})", controller.default_city());
    controller.activate().await;
    println!("{}\n", render(controller.state()));

    loop {
        // The prompt is only offered once the previous lookup has settled.
        let input = match Text::new("City:")
            .with_placeholder(controller.query())
            .with_help_message("Enter to search, Esc to quit")
            .prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read city"),
        };

        controller.set_query(input.clone());

        if let Ok(ticket) = controller.begin(&input) {
            println!("{}", render(controller.state()));
            let outcome = controller.fetch(&ticket).await;
            controller.complete(&ticket, outcome);
        }
        println!("{}\n", render(controller.state()));
    }

    debug!(status = %controller.status(), "Leaving watch loop");
    Ok(exit_code(controller.status()))
}

fn exit_code(status: FetchStatus) -> ExitCode {
    match status {
        FetchStatus::Error => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_show_with_verbosity() {
        let cli = Cli::try_parse_from(["citycast", "-vv", "show", "New York"]).expect("parse");
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Show { ref city } if city == "New York"));
    }

    #[test]
    fn parses_watch_with_start_city() {
        let cli = Cli::try_parse_from(["citycast", "watch", "--city", "Lviv"]).expect("parse");
        assert!(matches!(cli.command, Command::Watch { city: Some(ref c) } if c == "Lviv"));
    }

    #[test]
    fn show_requires_city() {
        assert!(Cli::try_parse_from(["citycast", "show"]).is_err());
    }

    #[test]
    fn only_error_status_fails_the_process() {
        let code = |status| format!("{:?}", exit_code(status));

        assert_eq!(code(FetchStatus::Error), format!("{:?}", ExitCode::FAILURE));
        assert_eq!(code(FetchStatus::Success), format!("{:?}", ExitCode::SUCCESS));
        assert_eq!(code(FetchStatus::Idle), format!("{:?}", ExitCode::SUCCESS));
    }
}
