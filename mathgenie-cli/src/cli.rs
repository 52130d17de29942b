//! CLI command definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use mathgenie_core::Difficulty;

/// Output format for generated quizzes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Numbered questions, solutions on request
    #[default]
    Text,
    /// The quiz items as pretty-printed JSON
    Json,
}

/// CLI arguments for mathgenie
#[derive(Parser, Debug)]
#[command(name = "mathgenie")]
#[command(author, version, about = "Generate math word-problem quizzes with an LLM")]
#[command(long_about = r#"
MathGenie asks an LLM for math word problems and prints them with answers
and step-by-step solutions.

Gemini endpoints (googleapis.com) and any OpenAI-compatible chat completions
API (OpenAI, Groq, DeepSeek, local gateways) are supported.

Connection settings are saved with `mathgenie settings set` and reused:
  mathgenie settings set --base-url https://api.openai.com/v1 --model gpt-4o --api-key sk-...
  mathgenie generate -t algebra -t percentage -d intermediate -n 5 --reveal
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file (defaults to ./mathgenie.toml when present)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Path to the settings database (overrides general.settings_path)
    #[arg(long, value_name = "PATH", global = true)]
    pub settings: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a quiz
    Generate(GenerateArgs),

    /// Show or change saved connection settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// List built-in topics and difficulty levels
    Topics,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Topic to draw problems from (repeatable)
    #[arg(short, long = "topic", value_name = "TOPIC", required = true)]
    pub topics: Vec<String>,

    /// Difficulty: beginner, intermediate, advanced or olympiad
    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    /// Number of questions (1-10)
    #[arg(short = 'n', long)]
    pub count: Option<u8>,

    /// Print answers and step-by-step solutions
    #[arg(short, long)]
    pub reveal: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Connection fields that may override the saved settings.
#[derive(Args, Debug, Default, Clone)]
pub struct ConnectionArgs {
    /// API base URL, e.g. https://api.openai.com/v1
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// API key
    #[arg(long, value_name = "KEY", env = "MATHGENIE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name, e.g. gpt-4o or gemini-1.5-flash
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,
}

impl ConnectionArgs {
    /// Whether any field was supplied.
    pub fn is_empty(&self) -> bool {
        self.base_url.is_none() && self.api_key.is_none() && self.model.is_none()
    }
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Print the saved settings (API key masked)
    Show,
    /// Update saved settings; omitted fields keep their value
    Set(ConnectionArgs),
    /// Delete saved settings
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generate() {
        let cli = Cli::try_parse_from([
            "mathgenie", "generate", "-t", "algebra", "-t", "geometry", "-d", "olympiad", "-n",
            "3", "--reveal",
        ])
        .expect("parse");

        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.topics, ["algebra", "geometry"]);
        assert_eq!(args.difficulty, Some(Difficulty::Olympiad));
        assert_eq!(args.count, Some(3));
        assert!(args.reveal);
        assert_eq!(args.output, OutputFormat::Text);
    }

    #[test]
    fn generate_requires_a_topic() {
        assert!(Cli::try_parse_from(["mathgenie", "generate"]).is_err());
    }

    #[test]
    fn rejects_unknown_difficulty() {
        assert!(
            Cli::try_parse_from(["mathgenie", "generate", "-t", "algebra", "-d", "expert"]).is_err()
        );
    }

    #[test]
    fn parses_settings_set() {
        let cli = Cli::try_parse_from([
            "mathgenie", "-vv", "settings", "set", "--model", "gpt-4o-mini",
        ])
        .expect("parse");

        assert_eq!(cli.verbose, 2);
        let Command::Settings(SettingsCommand::Set(args)) = cli.command else {
            panic!("expected settings set");
        };
        assert_eq!(args.model.as_deref(), Some("gpt-4o-mini"));
        assert!(args.base_url.is_none());
    }

    #[test]
    fn global_paths_after_subcommand() {
        let cli = Cli::try_parse_from(["mathgenie", "topics", "--settings", "/tmp/s.db"])
            .expect("parse");
        assert_eq!(cli.settings, Some(PathBuf::from("/tmp/s.db")));
    }
}
