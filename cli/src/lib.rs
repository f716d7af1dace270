//! Command-line front end for dtokit.
//!
//! `merge` folds record files into one [`IndexedCollection`] keyed by a
//! chosen field, so later records fill in or override earlier ones.
//! `inspect` reports the shape of the records without merging them.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use dtokit_collection::IndexedCollection;
use dtokit_model::{Dto, Record, Schema};
use dtokit_store::{Mapping, RecordFormat, StoreOptions, read_records, write_records};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Type name given to schemas derived from record files.
pub const RECORD_TYPE: &str = "record";

#[derive(Parser, Debug)]
#[command(name = "dtokit")]
#[command(about = "Merge and inspect JSON/CSV record files", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge records sharing the same index value
    Merge(MergeArgs),
    /// Print the derived schema and record counts
    Inspect(InspectArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct MergeArgs {
    /// Field whose value identifies a record
    #[arg(short, long)]
    pub index: String,

    /// Input files (.json or .csv)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Write merged records here instead of printing them
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Indent JSON output
    #[arg(long)]
    pub pretty: bool,

    /// CSV field delimiter
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,
}

#[derive(clap::Args, Debug, Clone)]
pub struct InspectArgs {
    /// Input files (.json or .csv)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// CSV field delimiter
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,
}

fn parse_delimiter(raw: &str) -> std::result::Result<u8, String> {
    match raw.as_bytes() {
        [byte] => Ok(*byte),
        _ => Err(format!("delimiter must be a single byte, got {raw:?}")),
    }
}

/// Outcome of [`run_merge`].
#[derive(Debug)]
pub struct MergeReport {
    /// Records read across all inputs.
    pub read: usize,
    /// Records left out because they were empty or had no index value.
    pub skipped: usize,
    /// The merged records, in first-seen order.
    pub merged: IndexedCollection<Record>,
}

impl MergeReport {
    /// One compact JSON object per merged record.
    pub fn rendered(&self) -> Vec<String> {
        self.merged.iter().map(Dto::render).collect()
    }
}

/// Outcome of [`run_inspect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectReport {
    pub fields: Vec<String>,
    pub records: usize,
    pub complete: usize,
    pub distinct: usize,
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "fields:   {}", self.fields.join(", "))?;
        writeln!(f, "records:  {}", self.records)?;
        writeln!(f, "complete: {}", self.complete)?;
        write!(f, "distinct: {}", self.distinct)
    }
}

/// Reads every input in order and concatenates their records.
///
/// Empty CSV cells become `null`, so they count as unset when merging.
pub fn load(inputs: &[PathBuf], options: &StoreOptions) -> Result<Vec<Mapping>> {
    let mut records = Vec::new();
    for path in inputs {
        let mut batch = read_records(path, options)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if RecordFormat::from_path(path)? == RecordFormat::Csv {
            batch.iter_mut().for_each(blank_cells_to_null);
        }
        debug!(path = %path.display(), records = batch.len(), "input loaded");
        records.extend(batch);
    }
    Ok(records)
}

fn blank_cells_to_null(record: &mut Mapping) {
    for value in record.values_mut() {
        if value.as_str().is_some_and(str::is_empty) {
            *value = Value::Null;
        }
    }
}

/// A runtime schema holding every key seen in `records`, in first-seen order.
pub fn derive_schema(records: &[Mapping]) -> Result<Arc<Schema<Record>>> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for key in records.iter().flat_map(|record| record.keys()) {
        if seen.insert(key.as_str()) {
            names.push(key.clone());
        }
    }
    if names.is_empty() {
        bail!("no fields found in input");
    }
    Ok(Record::define(RECORD_TYPE, names)?)
}

fn hydrate_all(schema: &Arc<Schema<Record>>, records: &[Mapping]) -> Result<Vec<Record>> {
    records
        .iter()
        .enumerate()
        .filter(|(_, mapping)| !mapping.is_empty())
        .map(|(i, mapping)| {
            Record::from_mapping(Arc::clone(schema), mapping)
                .with_context(|| format!("Invalid record #{i}"))
        })
        .collect()
}

/// Merges all inputs on `args.index`, writing to `args.output` when given.
pub fn run_merge(args: &MergeArgs) -> Result<MergeReport> {
    let options = StoreOptions {
        pretty: args.pretty,
        delimiter: args.delimiter,
    };
    let mappings = load(&args.inputs, &options)?;
    let schema = derive_schema(&mappings)?;
    if !schema.contains(&args.index) {
        bail!(
            "index field {:?} not found; available fields: {}",
            args.index,
            schema.fields().join(", ")
        );
    }

    let records = hydrate_all(&schema, &mappings)?;
    let mut skipped = mappings.len() - records.len();
    let mut merged = IndexedCollection::new(args.index.clone())?;
    for record in records {
        if record.get(&args.index)?.is_null() {
            warn!(index = %args.index, "record without index value skipped");
            skipped += 1;
            continue;
        }
        merged.add(record)?;
    }
    info!(
        read = mappings.len(),
        merged = merged.len(),
        skipped,
        "records merged"
    );

    if let Some(output) = &args.output {
        write_records(&merged.to_mappings(), output, &options)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        info!(path = %output.display(), "merged records written");
    }

    Ok(MergeReport {
        read: mappings.len(),
        skipped,
        merged,
    })
}

/// Describes the records in all inputs.
pub fn run_inspect(args: &InspectArgs) -> Result<InspectReport> {
    let options = StoreOptions {
        delimiter: args.delimiter,
        ..StoreOptions::default()
    };
    let mappings = load(&args.inputs, &options)?;
    let schema = derive_schema(&mappings)?;
    let records = hydrate_all(&schema, &mappings)?;

    let complete = records.iter().filter(|record| record.is_complete()).count();
    let distinct = records.iter().collect::<HashSet<_>>().len();
    Ok(InspectReport {
        fields: schema.fields().into_iter().map(str::to_string).collect(),
        records: records.len(),
        complete,
        distinct,
    })
}
