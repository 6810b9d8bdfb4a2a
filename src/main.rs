use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use repo_trends::config::{self, SiteConfig};
use repo_trends::source::{self, GithubSource, Offline, RecordSource, SourceOutcome};
use repo_trends::types::RawRecord;
use repo_trends::{generate, output};
use std::path::PathBuf;

/// Shared flags for commands that gather records.
#[derive(clap::Args, Clone)]
struct SourceArgs {
    /// Skip the network and build from the embedded fallback dataset
    #[arg(long)]
    offline: bool,
}

#[derive(Parser)]
#[command(name = "repo-trends")]
#[command(about = "Static site generator for trending GitHub repositories")]
#[command(long_about = "\
Static site generator for trending GitHub repositories

Fetches the most-starred repositories created in the last weeks from the
GitHub search API (or uses the embedded demo dataset when the API is
unreachable) and renders a cross-linked static site.

Output structure:

  dist/
  ├── index.html                   # Stats, language grid, trending cards
  ├── sitemap.xml                  # Every page, absolute URLs
  ├── categories/
  │   ├── index.html               # All languages, alphabetical
  │   └── <language>.html          # Repositories in one language, by stars
  └── repos/
      └── <owner>-<name>.html      # Detail page with similar repositories

Run 'repo-trends gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Site config file (optional; missing file means stock defaults)
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Override site.base_url for this run
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch records and write the full site
    Build(SourceArgs),
    /// Run the full pipeline without writing anything
    Check(SourceArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Build(source_args) => {
            let site_config = config::load_config(&cli.config, cli_overrides(&cli))?;
            init_thread_pool(&site_config.processing);
            let today = Local::now().date_naive();

            println!("==> Gathering records");
            let (records, outcome) = gather_records(&site_config, source_args.offline, today)?;
            output::print_source_outcome(&outcome);

            println!("==> Generating site → {}", cli.output.display());
            let site = generate::build_site(records, &site_config, today)?;
            generate::write_site(&site.manifest, &cli.output)?;
            output::print_generate_output(&site.report);
            println!("{}", output::format_written(site.manifest.len(), &cli.output));

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check(source_args) => {
            let site_config = config::load_config(&cli.config, cli_overrides(&cli))?;
            init_thread_pool(&site_config.processing);
            let today = Local::now().date_naive();

            println!("==> Checking");
            let (records, outcome) = gather_records(&site_config, source_args.offline, today)?;
            output::print_source_outcome(&outcome);
            let site = generate::build_site(records, &site_config, today)?;
            output::print_generate_output(&site.report);
            println!("==> Site is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// CLI flags that override config values, as a TOML overlay.
fn cli_overrides(cli: &Cli) -> Option<toml::Value> {
    let base_url = cli.base_url.as_ref()?;
    let mut site = toml::map::Map::new();
    site.insert(
        "base_url".to_string(),
        toml::Value::String(base_url.clone()),
    );
    let mut root = toml::map::Map::new();
    root.insert("site".to_string(), toml::Value::Table(site));
    Some(toml::Value::Table(root))
}

/// Fetch from GitHub unless disabled, falling back to the embedded dataset.
fn gather_records(
    site_config: &SiteConfig,
    offline: bool,
    today: NaiveDate,
) -> Result<(Vec<RawRecord>, SourceOutcome), source::SourceError> {
    if offline || !site_config.source.enabled {
        return source::fetch_or_fallback(&Offline);
    }
    let github = GithubSource::new(&site_config.source, today);
    println!("    Querying {}", github.origin());
    source::fetch_or_fallback(&github)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
