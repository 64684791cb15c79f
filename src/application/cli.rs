#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::env;
use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use owo_colors::OwoColorize;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::MODEL_CATALOG;

const HOTKEYS: &str = "HOTKEYS:
- Enter: Send the question in the input box.
- Shift+Enter / Alt+Enter: Insert a new line.
- Alt+1..4: Ask one of the suggested questions while the chat is empty.
- Tab: Open or close the model selector. Up/Down to move, Enter to choose, Esc to close.
- Up/Down, PageUp/PageDown, CTRL+U/CTRL+D, mouse wheel: Scroll the transcript.
- CTRL+C: Cancel the question being answered, otherwise quit.";

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

pub fn log_path() -> path::PathBuf {
    if let Ok(dir) = env::var("CHATWINDOW_LOG_DIR") {
        return path::PathBuf::from(dir).join("debug.log");
    }

    return dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("chatwindow/debug.log");
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default().as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for the chat window")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running with environment variable RUST_LOG=chatwindow")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        )
        .subcommand(
            Command::new("models").about("List the model catalog offered by the model selector.")
        );
}

fn arg_string(key: ConfigKey, env_name: &'static str, help: String) -> Arg {
    return Arg::new(key.to_string())
        .long(key.to_string())
        .env(env_name)
        .num_args(1)
        .help(help)
        .global(true);
}

pub fn build() -> Command {
    let hotkeys_text = HOTKEYS
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("HOTKEYS:") {
                return format!("CHAT {line}").underline().bold().to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("chatwindow")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(hotkeys_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .arg(arg_string(
            ConfigKey::ApiBaseUrl,
            "CHATWINDOW_API_BASE_URL",
            format!(
                "Base URL of the chat API. [default: {}]",
                Config::default(ConfigKey::ApiBaseUrl)
            ),
        ))
        .arg(arg_string(
            ConfigKey::Location,
            "CHATWINDOW_LOCATION",
            format!(
                "Shareable location to start from. Its `llm` query parameter picks the model. [default: {}]",
                Config::default(ConfigKey::Location)
            ),
        ))
        .arg(
            arg_string(
                ConfigKey::Username,
                "CHATWINDOW_USERNAME",
                "Your user name displayed in your chat bubbles. Defaults to $USER.".to_string(),
            ),
        )
        .arg(
            arg_string(
                ConfigKey::ConfigFile,
                "CHATWINDOW_CONFIG_FILE",
                format!(
                    "Path to configuration file [default: {}]",
                    Config::default(ConfigKey::ConfigFile)
                ),
            )
            .short('c'),
        );
}

/// Parses arguments and runs any one-shot subcommand. Returns true when the
/// chat window should be started.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    println!("{}", log_path().to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    println!("{}", ConfigKey::VARIANTS.join("\n"));
                }
                Some(("models", _)) => {
                    let res = MODEL_CATALOG
                        .iter()
                        .map(|e| return format!("{}\t{}", e.id, e.display_name))
                        .collect::<Vec<String>>()
                        .join("\n");
                    println!("{res}");
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default());
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        _ => {
            Config::load(vec![&matches]).await?;
        }
    }

    return Ok(true);
}
