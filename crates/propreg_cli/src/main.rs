//! Command-line front end over a local listing store.
//!
//! # Responsibility
//! - Wire a SQLite store and a JSON catalog snapshot into the services.
//! - Print every result as pretty JSON on stdout.
//!
//! # Invariants
//! - The catalog is always accessed through the caching decorator.
//! - Logging goes to files only, and only when `--log-dir` is given.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::error;
use propreg_core::{
    default_log_level, init_logging, open_db, CachedCatalogClient, CategoryType, DocumentType,
    EngineConfig, NewProperty, PropertyDocument, PropertyEditService, PropertyOwner,
    PropertyRegService, PropertyUpdate, PropertyViewService, SnapshotCatalog,
    SqlitePropertyRepository,
};
use rusqlite::Connection;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "propreg")]
#[command(about = "Property listing store with catalog-enriched views")]
struct Cli {
    /// SQLite listing store (created and migrated when missing)
    #[arg(long)]
    db: PathBuf,

    /// Catalog snapshot JSON file
    #[arg(long)]
    catalog: PathBuf,

    /// Engine config JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Absolute directory for rotated log files
    #[arg(long)]
    log_dir: Option<String>,

    /// Display language for resolved names
    #[arg(long)]
    lang: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register a listing from a JSON document file
    Add {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, default_value = "HOTEL_JSON")]
        doc_type: String,
        #[arg(long)]
        user: i64,
        #[arg(long)]
        property_type: i64,
        #[arg(long)]
        category: i64,
    },

    /// Public view of one listing
    Get { id: i64 },

    /// Public views of every listing, newest first
    List,

    /// Listings at `country[,city]`, optionally of one category type
    Query {
        #[arg(long)]
        cc: String,
        /// HOTEL, HOSTEL, GUEST_HOUSE, MOTEL or APARTMENT
        #[arg(long)]
        category: Option<String>,
    },

    /// Owner edit view of one listing
    Edit {
        #[arg(long)]
        user: i64,
        id: i64,
    },

    /// Owner listing list
    Owned {
        #[arg(long)]
        user: i64,
    },

    /// Activate or deactivate an owned listing
    Activate {
        #[arg(long)]
        user: i64,
        id: i64,
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        active: bool,
    },

    /// Replace the document of an owned listing
    Update {
        #[arg(long)]
        user: i64,
        id: i64,
        #[arg(long)]
        file: PathBuf,
        #[arg(long, default_value = "HOTEL_JSON")]
        doc_type: String,
    },
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        error!("event=cli_command module=cli status=error error={err:#}");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(log_dir) = &cli.log_dir {
        init_logging(default_log_level(), log_dir).context("failed to start logging")?;
    }

    let config = match &cli.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    let catalog = Arc::new(CachedCatalogClient::new(load_catalog(&cli.catalog)?));
    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open store `{}`", cli.db.display()))?;
    let lang = cli.lang.as_deref();

    match cli.command {
        Command::Add {
            file,
            doc_type,
            user,
            property_type,
            category,
        } => {
            let service = PropertyRegService::new(SqlitePropertyRepository::new(&conn));
            let id = service.add_property(&NewProperty {
                document: read_document(&file, &doc_type)?,
                owner: PropertyOwner {
                    property_type_id: property_type,
                    category_id: category,
                    user_id: user,
                },
            })?;
            print_json(&serde_json::json!({ "propertyId": id }))
        }
        Command::Get { id } => {
            let service = view_service(&conn, &catalog, config);
            print_json(&service.get_view(id, lang)?)
        }
        Command::List => {
            let service = view_service(&conn, &catalog, config);
            print_json(&service.list_views(lang)?)
        }
        Command::Query { cc, category } => {
            let category_type = category.as_deref().map(parse_category_type).transpose()?;
            let service = view_service(&conn, &catalog, config);
            print_json(&service.query_views(lang, Some(&cc), category_type)?)
        }
        Command::Edit { user, id } => {
            let service = edit_service(&conn, &catalog, config);
            print_json(&service.get_edit_view(user, id, lang)?)
        }
        Command::Owned { user } => {
            let service = edit_service(&conn, &catalog, config);
            print_json(&service.list_owned(user)?)
        }
        Command::Activate { user, id, active } => {
            let service = edit_service(&conn, &catalog, config);
            service.set_active(user, id, active)?;
            print_json(&serde_json::json!({ "propertyId": id, "isActive": active }))
        }
        Command::Update {
            user,
            id,
            file,
            doc_type,
        } => {
            let service = edit_service(&conn, &catalog, config);
            service.update_property(
                user,
                id,
                &PropertyUpdate {
                    document: read_document(&file, &doc_type)?,
                },
            )?;
            print_json(&serde_json::json!({ "propertyId": id, "updated": true }))
        }
    }
}

type Catalog = Arc<CachedCatalogClient<SnapshotCatalog>>;

fn view_service<'conn>(
    conn: &'conn Connection,
    catalog: &Catalog,
    config: EngineConfig,
) -> PropertyViewService<SqlitePropertyRepository<'conn>, Catalog> {
    PropertyViewService::new(SqlitePropertyRepository::new(conn), Arc::clone(catalog), config)
}

fn edit_service<'conn>(
    conn: &'conn Connection,
    catalog: &Catalog,
    config: EngineConfig,
) -> PropertyEditService<SqlitePropertyRepository<'conn>, Catalog> {
    PropertyEditService::new(SqlitePropertyRepository::new(conn), Arc::clone(catalog), config)
}

fn load_catalog(path: &Path) -> Result<SnapshotCatalog> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog `{}`", path.display()))?;
    SnapshotCatalog::from_json_str(&json)
        .with_context(|| format!("invalid catalog snapshot `{}`", path.display()))
}

fn read_document(path: &Path, doc_type: &str) -> Result<PropertyDocument> {
    let Some(doc_type) = DocumentType::parse(doc_type) else {
        bail!("unknown document type `{doc_type}`");
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read document `{}`", path.display()))?;
    Ok(PropertyDocument::new(json, doc_type))
}

fn parse_category_type(value: &str) -> Result<CategoryType> {
    match CategoryType::parse(value) {
        Some(category_type) => Ok(category_type),
        None => bail!("unknown category type `{value}`"),
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
