//! Operations dashboard CLI
//!
//! Renders the filtered dashboard table to a standalone HTML page, exports
//! the filtered rows as CSV and inspects the data file's columns, using the
//! same core as the browser app.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use ops_dashboard::columns::ColumnSelection;
use ops_dashboard::{
    Command as DashboardCommand, DashboardConfig, Effect, FileConfig, FilterCriteria, Session, export, loader, render,
};

/// Default config file path
const CONFIG_FILE: &str = "dashboard.toml";

/// Title of the rendered page
const PAGE_TITLE: &str = "Operations Dashboard";

#[derive(Parser, Debug)]
#[command(name = "ops-dashboard")]
#[command(about = "Filter, render and export the operations dashboard data")]
struct Args {
    /// Config file (optional; defaults apply when missing)
    #[arg(short, long, default_value = CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Directory the data file paths are resolved against
    #[arg(short, long, default_value = ".", global = true)]
    data_dir: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Filter options shared by render and export
#[derive(clap::Args, Debug)]
struct FilterArgs {
    /// Start date, inclusive (e.g., 2024-05-01)
    #[arg(long)]
    from: Option<String>,

    /// End date, inclusive
    #[arg(long)]
    to: Option<String>,

    /// Category id (exact match, e.g., measurement)
    #[arg(long)]
    category: Option<String>,
}

impl FilterArgs {
    fn criteria(&self) -> Result<FilterCriteria> {
        let criteria = FilterCriteria::parse(
            self.from.as_deref().unwrap_or_default(),
            self.to.as_deref().unwrap_or_default(),
            self.category.as_deref().unwrap_or_default(),
        )?;
        Ok(criteria)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the filtered table as a standalone HTML page
    Render {
        #[command(flatten)]
        filter: FilterArgs,

        /// Columns to show, comma separated (default: preferred columns)
        #[arg(long, value_delimiter = ',', conflicts_with = "all_columns")]
        columns: Option<Vec<String>>,

        /// Show every column in the file
        #[arg(long)]
        all_columns: bool,

        /// Output HTML file
        #[arg(short, long, default_value = "dashboard.html")]
        output: PathBuf,
    },

    /// Write the filtered rows as CSV
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output file (default: export file name from config, in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the columns found in the data file
    Columns {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write an empty data file with the preferred columns
    Template {
        /// Output CSV file
        #[arg(short, long, default_value = "data.csv")]
        output: PathBuf,
    },
}

#[derive(Serialize, Debug)]
struct ColumnInfo<'a> {
    index: usize,
    name: &'a str,
    role: String,
    visible: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// Load the config file if present, otherwise use defaults
fn load_config(path: &Path) -> Result<DashboardConfig> {
    if !path.exists() {
        debug!("Config file '{}' not found, using defaults", path.display());
        return Ok(DashboardConfig::default());
    }

    let file_config = FileConfig::load(path)?;
    Ok(DashboardConfig::from_file(&file_config))
}

/// Locate, read and parse the data file into a ready session
fn load_session(config: DashboardConfig, data_dir: &Path) -> Result<Session> {
    let candidates = loader::candidate_paths(&config, None);
    let (source, text) = loader::read_from_dir(data_dir, &candidates)
        .with_context(|| format!("Failed to load data from {}", data_dir.display()))?;

    let mut session = Session::new(config);
    session
        .load(&source, &text)
        .with_context(|| format!("Failed to parse {}", data_dir.join(&source).display()))?;
    Ok(session)
}

/// Apply a command that must change the view; alerts become errors
fn apply(session: &mut Session, command: DashboardCommand) -> Result<()> {
    match session.dispatch(command) {
        Effect::Alert(message) => anyhow::bail!(message),
        Effect::Render | Effect::Download(_) | Effect::Unchanged => Ok(()),
    }
}

fn run_render(
    session: &mut Session,
    filter: &FilterArgs,
    columns: Option<&[String]>,
    all_columns: bool,
    output: &Path,
) -> Result<()> {
    apply(session, DashboardCommand::Search(filter.criteria()?))?;

    if all_columns {
        apply(session, DashboardCommand::SelectAllColumns)?;
    } else if let Some(names) = columns {
        let schema = session.dataset().map(|d| d.schema().clone()).unwrap_or_default();
        let mut indices = Vec::with_capacity(names.len());
        for name in names {
            let column = schema
                .columns()
                .iter()
                .find(|c| ops_dashboard::config::header_matches(&c.name, name))
                .with_context(|| format!("Unknown column '{}'. Available: {}", name, schema.names().collect::<Vec<_>>().join(", ")))?;
            indices.push(column.index);
        }

        apply(session, DashboardCommand::SelectNoColumns)?;
        for index in indices {
            apply(session, DashboardCommand::ToggleColumn { index, checked: true })?;
        }
    }

    let page = render::render_page(PAGE_TITLE, &session.summary(), &session.table());
    std::fs::write(output, page).with_context(|| format!("Failed to write {}", output.display()))?;

    info!("{} -> {}", session.summary(), output.display());
    Ok(())
}

fn run_export(session: &mut Session, filter: &FilterArgs, output: Option<&Path>) -> Result<()> {
    apply(session, DashboardCommand::Search(filter.criteria()?))?;

    let download = match session.dispatch(DashboardCommand::Export) {
        Effect::Download(download) => download,
        Effect::Alert(message) => anyhow::bail!(message),
        Effect::Render | Effect::Unchanged => anyhow::bail!("Export produced no file"),
    };

    let path = match output {
        Some(path) => {
            std::fs::write(path, download.contents.as_bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            path.to_path_buf()
        }
        None => export::write_to_dir(&download, Path::new("."))?,
    };

    info!("Wrote {} rows to {}", session.filtered_rows().len(), path.display());
    Ok(())
}

fn run_columns(session: &Session, json: bool) -> Result<()> {
    let Some(dataset) = session.dataset() else {
        anyhow::bail!("No data loaded");
    };
    let selection = ColumnSelection::with_defaults(dataset.schema(), session.config());

    let infos: Vec<ColumnInfo> = dataset
        .schema()
        .columns()
        .iter()
        .map(|column| ColumnInfo {
            index: column.index,
            name: &column.name,
            role: format!("{:?}", column.role).to_lowercase(),
            visible: selection.is_checked(column.index),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    println!("INDEX  NAME                     ROLE       VISIBLE");
    for info in &infos {
        println!(
            "{:<6} {:<24} {:<10} {}",
            info.index,
            info.name,
            info.role,
            if info.visible { "yes" } else { "no" }
        );
    }
    Ok(())
}

fn run_template(config: &DashboardConfig, output: &Path) -> Result<()> {
    if output.exists() {
        anyhow::bail!("{} already exists; refusing to overwrite", output.display());
    }

    let text = export::template(&config.preferred_columns)?;
    std::fs::write(output, text).with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Wrote template with {} columns to {}", config.preferred_columns.len(), output.display());
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args.config)?;

    match &args.command {
        Command::Template { output } => run_template(&config, output),
        Command::Render {
            filter,
            columns,
            all_columns,
            output,
        } => {
            let mut session = load_session(config, &args.data_dir)?;
            run_render(&mut session, filter, columns.as_deref(), *all_columns, output)
        }
        Command::Export { filter, output } => {
            let mut session = load_session(config, &args.data_dir)?;
            run_export(&mut session, filter, output.as_deref())
        }
        Command::Columns { json } => {
            let session = load_session(config, &args.data_dir)?;
            run_columns(&session, *json)
        }
    }
}
