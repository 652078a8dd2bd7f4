use blockpress::client::ContentClient;
use blockpress::contact::{ContactPayload, ContactRelay, FormState};
use blockpress::fetch::{self, SNAPSHOT_FILE};
use blockpress::{config, generate, output};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "blockpress")]
#[command(about = "Static front end for a headless WordPress marketing site")]
#[command(long_about = "\
Static front end for a headless WordPress marketing site

The CMS is the data source. Pages are built from Gutenberg block trees:
named groups become page sections, and everything else falls back to
empty values, so a half-edited page still renders.

Two stages:

  fetch      backend   →  .blockpress-temp/snapshot.json
  generate   snapshot  →  dist/

Pages:

  /                 home      (slug from [pages] home)
  /nosotros/        about     (slug from [pages] about)
  /contacto/        contact   (slug from [pages] contact)
  /{slug}/          placeholder for every other published page

Environment (overrides config.toml):
  WP_SITE_URL, WP_USERNAME, WP_PASSWORD
  CF7_FEEDBACK_URL, CF7_FORM_ID, CF7_VERSION, CF7_LOCALE,
  CF7_UNIT_TAG, CF7_CONTAINER_POST
  RUST_LOG (log filter, default info)

Run 'blockpress gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site configuration file
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (snapshot)
    #[arg(long, default_value = ".blockpress-temp", global = true)]
    temp_dir: PathBuf,

    /// Static assets copied into the output's assets/ directory
    #[arg(long, default_value = "assets", global = true)]
    assets: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Contact form values.
#[derive(clap::Args, Clone)]
struct ContactArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "")]
    tel: String,
    #[arg(long, default_value = "")]
    subject: String,
    #[arg(long, default_value = "")]
    message: String,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch header, footer, and pages from the backend into a snapshot
    Fetch,
    /// Produce the HTML site from the snapshot
    Generate,
    /// Run both stages: fetch → generate
    Build,
    /// Validate the configuration without fetching
    Check,
    /// Submit a message through the contact form relay
    Contact(ContactArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();
    let snapshot_path = cli.temp_dir.join(SNAPSHOT_FILE);

    match cli.command {
        Command::Fetch => {
            let site_config = config::load_config(&cli.config)?;
            run_fetch(&site_config, &cli.temp_dir)?;
        }
        Command::Generate => {
            let site_config = config::load_config(&cli.config)?;
            let report =
                generate::generate_from_file(&snapshot_path, &site_config, &cli.output, Some(&cli.assets))?;
            output::print_generate_output(&report, &cli.output);
        }
        Command::Build => {
            let site_config = config::load_config(&cli.config)?;

            println!("==> Stage 1: Fetching content");
            let snapshot = run_fetch(&site_config, &cli.temp_dir)?;

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let report = generate::generate(&snapshot, &site_config, &cli.output, Some(&cli.assets))?;
            output::print_generate_output(&report, &cli.output);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.config.display());
            let site_config = config::load_config(&cli.config)?;
            output::print_check_output(&site_config, &cli.config);
        }
        Command::Contact(args) => {
            let site_config = config::load_config(&cli.config)?;
            let relay = ContactRelay::new(&site_config.contact)?;
            let mut form = FormState::new(ContactPayload {
                full_name: args.name,
                email: args.email,
                tel: args.tel,
                subject: args.subject,
                message: args.message,
            });
            form.begin_submit();
            let outcome = relay.submit(&form.values);
            form.apply(outcome);
            output::print_contact_output(&form);
            if form.error.is_some() {
                std::process::exit(1);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Fetch everything into a snapshot, save it, and print the inventory.
fn run_fetch(
    site_config: &config::SiteConfig,
    temp_dir: &Path,
) -> Result<fetch::Snapshot, Box<dyn std::error::Error>> {
    init_thread_pool(&site_config.processing);
    let client = ContentClient::new(&site_config.backend)?;
    let snapshot = fetch::fetch_snapshot(&client, &site_config.pages);
    let path = fetch::save_snapshot(&snapshot, temp_dir)?;
    output::print_fetch_output(&snapshot, &path);
    Ok(snapshot)
}

/// Logs go to stderr so stdout stays clean for command output.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the config can lower it, not raise it.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
