//! Administrative CLI for VRNT student records.

mod config;
mod output;

use anyhow::{Context, Result};
use bytes::Bytes;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use vrnt_core::config::AppConfig;
use vrnt_core::{DocumentKind, StudentId, StudentPatch, UploadPolicy};
use vrnt_records::{MemoryStore, RecordStore, search_students, update_student};
use vrnt_storage::{MemoryBackend, ObjectStore, delete_document, run_storage_check, upload_document};

#[derive(Parser)]
#[command(name = "vrntctl")]
#[command(about = "Administrative CLI for VRNT student records")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, env = "VRNT_CONFIG", default_value = "config/vrnt.toml", global = true)]
    config: PathBuf,

    /// Print JSON instead of tables
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search students by UID (case-insensitive substring)
    Search {
        /// UID fragment
        query: String,
    },
    /// Show one student record
    Show {
        /// Record id
        id: String,
    },
    /// Update fields of one student
    Update {
        /// Record id
        id: String,
        /// Field assignment, e.g. --set school="Sri Veda Patasala" (repeatable).
        /// An empty value stores an empty string.
        #[arg(long = "set", value_name = "COLUMN=VALUE", required_unless_present = "clears")]
        assignments: Vec<String>,
        /// Column to set to NULL (repeatable)
        #[arg(long = "clear", value_name = "COLUMN")]
        clears: Vec<String>,
    },
    /// Upload a document and attach it to a student
    Upload {
        /// Record id
        id: String,
        /// Document kind: photo, certificate or id-proof
        #[arg(long)]
        kind: DocumentKind,
        /// File to upload
        #[arg(long)]
        file: PathBuf,
        /// MIME type (guessed from the file extension if omitted)
        #[arg(long)]
        mime: Option<String>,
        /// Upload only; leave the record untouched
        #[arg(long, default_value_t = false)]
        no_attach: bool,
    },
    /// Remove a document by storage path or public URL
    DeleteDocument {
        /// Object path or public URL
        path_or_url: String,
    },
    /// Import students from a spreadsheet
    Import {
        /// Workbook path (xlsx, xls or ods)
        #[arg(long)]
        file: PathBuf,
        /// Run against in-memory stores; nothing is written
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Add the bundled sample students that are not present yet
    Seed,
    /// Verify the document bucket: existence, upload, public read, cleanup
    CheckStorage,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Cli {
        config,
        json,
        command,
    } = Cli::parse();

    match command {
        Commands::Search { query } => handle_search(&config, &query, json).await,
        Commands::Show { id } => handle_show(&config, &id, json).await,
        Commands::Update {
            id,
            assignments,
            clears,
        } => handle_update(&config, &id, &assignments, &clears, json).await,
        Commands::Upload {
            id,
            kind,
            file,
            mime,
            no_attach,
        } => handle_upload(&config, &id, kind, &file, mime.as_deref(), no_attach).await,
        Commands::DeleteDocument { path_or_url } => {
            handle_delete_document(&config, &path_or_url).await
        }
        Commands::Import { file, dry_run } => handle_import(&config, &file, dry_run, json).await,
        Commands::Seed => handle_seed(&config, json).await,
        Commands::CheckStorage => handle_check_storage(&config, json).await,
    }
}

fn load(config_path: &Path) -> Result<AppConfig> {
    config::load_config(config_path)
}

fn record_store(config: &AppConfig) -> Result<Arc<dyn RecordStore>> {
    vrnt_records::from_config(&config.store).context("failed to initialize record store")
}

fn object_store(config: &AppConfig) -> Result<Arc<dyn ObjectStore>> {
    vrnt_storage::from_config(&config.store).context("failed to initialize object store")
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn handle_search(config_path: &Path, query: &str, json: bool) -> Result<()> {
    let config = load(config_path)?;
    let store = record_store(&config)?;
    let results = search_students(store.as_ref(), query)
        .await
        .context("search failed")?;
    if json {
        return print_json(&results);
    }
    output::print_search_results(&results);
    Ok(())
}

async fn handle_show(config_path: &Path, id: &str, json: bool) -> Result<()> {
    let id = StudentId::new(id)?;
    let config = load(config_path)?;
    let store = record_store(&config)?;
    let record = store
        .get(&id)
        .await
        .with_context(|| format!("failed to load student {id}"))?;
    if json {
        return print_json(&record);
    }
    output::print_record(&record);
    Ok(())
}

async fn handle_update(
    config_path: &Path,
    id: &str,
    assignments: &[String],
    clears: &[String],
    json: bool,
) -> Result<()> {
    let id = StudentId::new(id)?;
    let patch = StudentPatch::from_changes(
        assignments.iter().map(String::as_str),
        clears.iter().map(String::as_str),
    )?;

    let config = load(config_path)?;
    let store = record_store(&config)?;
    let record = update_student(store.as_ref(), &id, &patch)
        .await
        .with_context(|| format!("failed to update student {id}"))?;
    if json {
        return print_json(&record);
    }
    println!("Student updated ({} field(s)).\n", patch.len());
    output::print_record(&record);
    Ok(())
}

async fn handle_upload(
    config_path: &Path,
    id: &str,
    kind: DocumentKind,
    file: &Path,
    mime: Option<&str>,
    no_attach: bool,
) -> Result<()> {
    let id = StudentId::new(id)?;
    let mime = match mime {
        Some(mime) => mime.to_string(),
        None => mime_guess::from_path(file)
            .first_or_octet_stream()
            .essence_str()
            .to_string(),
    };
    let size = tokio::fs::metadata(file)
        .await
        .with_context(|| format!("cannot read {}", file.display()))?
        .len();
    // Reject before reading or connecting.
    UploadPolicy::default().validate(kind, &mime, size)?;

    let config = load(config_path)?;
    let storage = object_store(&config)?;
    let data = tokio::fs::read(file)
        .await
        .with_context(|| format!("cannot read {}", file.display()))?;
    let uploaded = upload_document(
        storage.as_ref(),
        &UploadPolicy::default(),
        &id,
        Bytes::from(data),
        kind,
        &mime,
        size,
    )
    .await
    .context("upload failed")?;
    println!("Uploaded: {}", uploaded.path);
    println!("URL: {}", uploaded.public_url);

    if !no_attach {
        let mut patch = StudentPatch::default();
        patch.set_document_url(kind, uploaded.public_url.clone());
        let store = record_store(&config)?;
        update_student(store.as_ref(), &id, &patch)
            .await
            .with_context(|| format!("uploaded, but failed to attach URL to student {id}"))?;
        println!("Attached to {} on student {id}", kind.url_column());
    }
    Ok(())
}

async fn handle_delete_document(config_path: &Path, path_or_url: &str) -> Result<()> {
    let config = load(config_path)?;
    let storage = object_store(&config)?;
    let key = delete_document(storage.as_ref(), path_or_url)
        .await
        .context("delete failed")?;
    println!("Removed: {key}");
    Ok(())
}

async fn handle_import(config_path: &Path, file: &Path, dry_run: bool, json: bool) -> Result<()> {
    let policy = UploadPolicy::default();
    let report = if dry_run {
        tracing::info!("dry run: importing into in-memory stores");
        let records = MemoryStore::new();
        let storage = MemoryBackend::default();
        vrnt_import::import_workbook(&records, &storage, &policy, file).await
    } else {
        let config = load(config_path)?;
        let records = record_store(&config)?;
        let storage = object_store(&config)?;
        vrnt_import::import_workbook(records.as_ref(), storage.as_ref(), &policy, file).await
    }
    .context("import failed")?;

    if json {
        return print_json(&report);
    }
    output::print_import_report(&report);
    Ok(())
}

async fn handle_seed(config_path: &Path, json: bool) -> Result<()> {
    let config = load(config_path)?;
    let store = record_store(&config)?;
    let report = vrnt_import::seed_samples(store.as_ref())
        .await
        .context("seeding failed")?;
    if json {
        return print_json(&report);
    }
    output::print_seed_report(&report);
    Ok(())
}

async fn handle_check_storage(config_path: &Path, json: bool) -> Result<()> {
    let config = load(config_path)?;
    let storage = object_store(&config)?;
    let report = run_storage_check(storage.as_ref()).await;
    if json {
        print_json(&report)?;
    } else {
        output::print_storage_check(storage.bucket(), &report);
    }
    if !report.passed() {
        anyhow::bail!("storage check failed with {} error(s)", report.errors.len());
    }
    Ok(())
}
