use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use recstore_entity::RecordId;

#[derive(Parser, Debug)]
#[command(
    name = "recstore",
    about = "Inspect and edit a directory of recstore JSON records",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the record entries
    #[arg(short, long, global = true, default_value = ".")]
    pub dir: PathBuf,

    /// Logical type name of the records (overrides the config file)
    #[arg(short = 't', long = "type", global = true)]
    pub type_name: Option<String>,

    /// TOML store configuration
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every record
    List,
    /// Show one record
    Show(IdArgs),
    /// Create a record from JSON and save it
    Put(PutArgs),
    /// Replace a record's contents and save it; an unknown id is added
    Update(UpdateArgs),
    /// Delete a record and save
    Delete(IdArgs),
    /// Count records per type in the directory
    Status,
}

#[derive(Args, Debug)]
pub struct IdArgs {
    pub id: RecordId,
}

#[derive(Args, Debug)]
pub struct PutArgs {
    /// Record contents as JSON
    pub json: String,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    pub id: RecordId,
    /// Record contents as JSON
    pub json: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "recstore", "show", "7", "--dir", "data", "--type", "Note", "--format", "json",
        ])
        .unwrap();
        assert_eq!(cli.dir, PathBuf::from("data"));
        assert_eq!(cli.type_name.as_deref(), Some("Note"));
        assert!(matches!(cli.format, OutputFormat::Json));
        match cli.command {
            Command::Show(args) => assert_eq!(args.id, RecordId::new(7)),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["recstore", "delete", "seven"]).is_err());
    }

    #[test]
    fn update_takes_id_and_json() {
        let cli = Cli::try_parse_from(["recstore", "update", "3", "{\"a\":1}"]).unwrap();
        match cli.command {
            Command::Update(args) => {
                assert_eq!(args.id, RecordId::new(3));
                assert_eq!(args.json, "{\"a\":1}");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
