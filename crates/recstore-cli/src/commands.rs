use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{bail, Context as _};
use colored::Colorize;
use recstore_codec::{Codec, JsonCodec};
use recstore_entity::{Entity, RecordId};
use recstore_medium::{FsMedium, StorageMedium};
use recstore_store::{RecordStore, SaveReport, StoreConfig};
use serde_json::{json, Value};
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let session = Session::from_cli(&cli)?;
    match cli.command {
        Command::List => cmd_list(&session),
        Command::Show(args) => cmd_show(&session, args.id),
        Command::Put(args) => cmd_put(&session, &args.json),
        Command::Update(args) => cmd_update(&session, args.id, &args.json),
        Command::Delete(args) => cmd_delete(&session, args.id),
        Command::Status => cmd_status(&session),
    }
}

/// Everything a command needs to open the record directory.
struct Session {
    location: String,
    medium: Arc<dyn StorageMedium>,
    config: StoreConfig,
    format: OutputFormat,
}

impl Session {
    fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => StoreConfig::load(path)?,
            None => StoreConfig::default(),
        };
        if let Some(type_name) = &cli.type_name {
            config.type_name = Some(type_name.clone());
        }
        Ok(Self {
            location: cli.dir.to_string_lossy().into_owned(),
            medium: Arc::new(FsMedium::new()),
            config,
            format: cli.format.clone(),
        })
    }

    fn open(&self) -> anyhow::Result<RecordStore<Value>> {
        let store =
            RecordStore::open_with_config(&self.location, self.medium.clone(), self.config.clone())
                .with_context(|| format!("opening records in {}", self.location))?;
        debug!(
            location = %self.location,
            type_name = store.naming().type_name(),
            records = store.len(),
            "opened record store"
        );
        Ok(store)
    }

    fn json_output(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }
}

fn parse_json(text: &str) -> anyhow::Result<Value> {
    serde_json::from_str(text).with_context(|| format!("invalid JSON record: {text}"))
}

fn put_record(store: &mut RecordStore<Value>, contents: Value) -> anyhow::Result<RecordId> {
    let entity = store.create()?.with_decoded(contents);
    store.add(&entity)?;
    store.save()?;
    Ok(entity.id())
}

fn update_record(
    store: &mut RecordStore<Value>,
    id: RecordId,
    contents: Value,
) -> anyhow::Result<SaveReport> {
    let entity = Entity::new(id).with_decoded(contents);
    store.update(&entity)?;
    Ok(store.save()?)
}

fn delete_record(store: &mut RecordStore<Value>, id: RecordId) -> anyhow::Result<SaveReport> {
    let Some(entity) = store.get(id) else {
        bail!("record {id} not found");
    };
    store.delete(&entity)?;
    Ok(store.save()?)
}

/// Record counts per type name among entries shaped like `<digits>_<type>.<ext>`.
fn count_by_type(names: &[String], extension: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for name in names {
        let Some(stem) = name
            .strip_suffix(extension)
            .and_then(|s| s.strip_suffix('.'))
        else {
            continue;
        };
        let Some((digits, type_name)) = stem.split_once('_') else {
            continue;
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) || type_name.is_empty()
        {
            continue;
        }
        *counts.entry(type_name.to_string()).or_insert(0) += 1;
    }
    counts
}

fn cmd_list(session: &Session) -> anyhow::Result<()> {
    let store = session.open()?;
    let records: Vec<(RecordId, Value)> = store
        .entities()
        .into_iter()
        .map(|e| (e.id(), e.into_decoded().unwrap_or(Value::Null)))
        .collect();

    if session.json_output() {
        let out: Vec<Value> = records
            .iter()
            .map(|(id, value)| json!({ "id": id, "value": value }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if records.is_empty() {
        println!(
            "No {} records in {}.",
            store.naming().type_name().cyan(),
            store.location()
        );
        return Ok(());
    }
    for (id, value) in &records {
        println!("{} {}", format!("#{id}").yellow().bold(), value);
    }
    println!("{} record(s)", records.len().to_string().bold());
    Ok(())
}

fn cmd_show(session: &Session, id: RecordId) -> anyhow::Result<()> {
    let store = session.open()?;
    let Some(entity) = store.get(id) else {
        bail!("record {id} not found");
    };
    let value = entity.into_decoded().unwrap_or(Value::Null);
    if session.json_output() {
        println!("{}", json!({ "id": id, "value": value }));
    } else {
        println!(
            "Record {} ({})",
            format!("#{id}").yellow().bold(),
            store.naming().entry_name(id).dimmed()
        );
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}

fn cmd_put(session: &Session, text: &str) -> anyhow::Result<()> {
    let contents = parse_json(text)?;
    let mut store = session.open()?;
    let id = put_record(&mut store, contents)?;
    if session.json_output() {
        println!("{}", json!({ "id": id }));
    } else {
        println!("{} Created record {}", "✓".green().bold(), format!("#{id}").yellow());
    }
    Ok(())
}

fn cmd_update(session: &Session, id: RecordId, text: &str) -> anyhow::Result<()> {
    let contents = parse_json(text)?;
    let mut store = session.open()?;
    let report = update_record(&mut store, id, contents)?;
    if session.json_output() {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{} Updated record {}", "✓".green().bold(), format!("#{id}").yellow());
    }
    Ok(())
}

fn cmd_delete(session: &Session, id: RecordId) -> anyhow::Result<()> {
    let mut store = session.open()?;
    let report = delete_record(&mut store, id)?;
    if session.json_output() {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{} Deleted record {}", "✓".green().bold(), format!("#{id}").yellow());
    }
    Ok(())
}

fn cmd_status(session: &Session) -> anyhow::Result<()> {
    let names = session.medium.list(&session.location)?;
    let counts = count_by_type(&names, JsonCodec::default().extension());
    if session.json_output() {
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }
    println!("Records in {}", session.location.bold());
    if counts.is_empty() {
        println!("  (none)");
    }
    for (type_name, count) in &counts {
        println!("  {:<24} {}", type_name.cyan(), count);
    }
    let foreign = names.len() - counts.values().sum::<usize>();
    if foreign > 0 {
        let noun = if foreign == 1 { "entry" } else { "entries" };
        println!("  {} other {noun}", foreign.to_string().dimmed());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(dir: &tempfile::TempDir) -> Session {
        Session {
            location: dir.path().to_string_lossy().into_owned(),
            medium: Arc::new(FsMedium::new()),
            config: StoreConfig::named("Note"),
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn put_then_update_then_delete() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir);

        let id = put_record(&mut session.open().unwrap(), json!({ "title": "first" })).unwrap();
        assert_eq!(id, RecordId::FIRST);
        assert!(dir.path().join("0000000001_Note.json").is_file());

        update_record(&mut session.open().unwrap(), id, json!({ "title": "second" })).unwrap();
        let store = session.open().unwrap();
        assert_eq!(
            store.get(id).unwrap().into_decoded(),
            Some(json!({ "title": "second" }))
        );
        drop(store);

        let report = delete_record(&mut session.open().unwrap(), id).unwrap();
        assert_eq!(report.removed, 1);
        assert!(session.open().unwrap().is_empty());
    }

    #[test]
    fn update_of_unknown_record_adds_it() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir);
        let mut store = session.open().unwrap();
        let report = update_record(&mut store, RecordId::new(9), json!(1)).unwrap();
        assert_eq!(report.written, 1);
        drop(store);

        let mut store = session.open().unwrap();
        assert_eq!(
            store.get(RecordId::new(9)).unwrap().into_decoded(),
            Some(json!(1))
        );
        assert_eq!(store.next_id(), RecordId::new(10));
        assert!(put_record(&mut store, json!(2)).is_ok());
        assert!(dir.path().join("0000000010_Note.json").is_file());
    }

    #[test]
    fn delete_missing_record_fails() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir);
        let mut store = session.open().unwrap();
        assert!(delete_record(&mut store, RecordId::new(9)).is_err());
    }

    #[test]
    fn parse_json_reports_bad_input() {
        assert!(parse_json("{not json").is_err());
        assert_eq!(parse_json("[1,2]").unwrap(), json!([1, 2]));
    }

    #[test]
    fn count_by_type_groups_record_entries() {
        let names: Vec<String> = [
            "0000000001_Note.json",
            "0000000002_Note.json",
            "0000000001_Task.json",
            "monkey.txt",
            "blahblahNote.json",
            "_Note.json",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let counts = count_by_type(&names, "json");
        assert_eq!(counts.get("Note"), Some(&2));
        assert_eq!(counts.get("Task"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn session_type_flag_overrides_config() {
        let cli = <Cli as clap::Parser>::try_parse_from(["recstore", "--type", "Task", "list"])
            .unwrap();
        let session = Session::from_cli(&cli).unwrap();
        assert_eq!(session.config.type_name.as_deref(), Some("Task"));
    }
}
