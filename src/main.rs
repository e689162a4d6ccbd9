use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use pagewright::content::RichValue;
use pagewright::links::{compact_label, resolve_link_label};
use pagewright::segmenter::DEFAULT_KEY_PREFIX;
use pagewright::{
    linkify_plain_text, linkify_portable_value, plain_text, FaqBlock, HeaderModel, LinkValue, Navigation,
    ResolvedLink, SiteSettings,
};

#[derive(Parser, Debug)]
#[command(name = "pagewright")]
#[command(about = "Normalize CMS content: plain text, email links, link targets, FAQ data and header models")]
#[command(version)]
struct Args {
    /// Site title used for brand detection and the header brand
    #[arg(long, global = true)]
    site_title: Option<String>,

    /// Site settings JSON file
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the plain text of any CMS value
    Text {
        /// JSON input file
        input: PathBuf,
    },
    /// Turn email addresses into mailto links
    Linkify {
        input: PathBuf,
        /// Key prefix for plain-string fragments
        #[arg(long, default_value = DEFAULT_KEY_PREFIX)]
        key_prefix: String,
    },
    /// Resolve a link value to an href and display label
    Resolve {
        input: PathBuf,
        /// Explicit label as a JSON value, e.g. '"About"'
        #[arg(long)]
        label: Option<String>,
    },
    /// Build the FAQ view and its structured data
    Faq { input: PathBuf },
    /// Build the site header model from a navigation document
    Header { input: PathBuf },
}

#[derive(Debug, Serialize)]
struct ResolveOutput {
    href: String,
    is_valid: bool,
    label: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: logs go to stderr so stdout stays clean JSON for piping
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let args = Args::parse();
    debug!(?args, "Parsed CLI arguments");

    let mut settings = match &args.settings {
        Some(path) => SiteSettings::load(path).await?,
        None => SiteSettings::default(),
    };
    // WHY: an explicit flag beats the settings file
    if let Some(title) = &args.site_title {
        settings.site_title = title.clone();
    }

    match &args.command {
        Command::Text { input } => {
            let value = read_json(input).await?;
            println!("{}", plain_text(&value));
        }
        Command::Linkify { input, key_prefix } => {
            if key_prefix.trim().is_empty() {
                bail!("--key-prefix must not be empty");
            }
            let value = read_json(input).await?;
            let output = match &value {
                Value::String(text) => serde_json::to_value(linkify_plain_text(text, key_prefix))?,
                Value::Array(_) => linkify_portable_value(&value),
                other => {
                    warn!("Input {} is neither a string nor a document, passing it through", input.display());
                    other.clone()
                }
            };
            print_json(&output, args.pretty)?;
        }
        Command::Resolve { input, label } => {
            let link = LinkValue::from(read_json(input).await?);
            let label = match label {
                Some(raw) => parse_label(raw),
                None => RichValue::Empty,
            };

            let resolved = ResolvedLink::resolve(&link);
            let label = resolve_link_label(&label, &link, &settings.site_title);
            let output = ResolveOutput {
                href: resolved.href,
                is_valid: resolved.is_valid,
                label: compact_label(&RichValue::Text(label), &settings.label_rules),
            };
            print_json(&output, args.pretty)?;
        }
        Command::Faq { input } => {
            let block: FaqBlock = serde_json::from_value(read_json(input).await?)
                .with_context(|| format!("Invalid FAQ block in {}", input.display()))?;
            match block.prepare() {
                Some(view) => print_json(&view, args.pretty)?,
                None => {
                    info!("FAQ block has no items");
                    print_json(&Value::Null, args.pretty)?;
                }
            }
        }
        Command::Header { input } => {
            let navigation: Navigation = serde_json::from_value(read_json(input).await?)
                .with_context(|| format!("Invalid navigation document in {}", input.display()))?;
            let header = HeaderModel::build(&navigation, &settings, &settings.site_title);
            print_json(&header, args.pretty)?;
        }
    }

    Ok(())
}

async fn read_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read input file {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Input file {} is not valid JSON", path.display()))
}

/// Bare words are accepted as string labels
fn parse_label(raw: &str) -> RichValue {
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    RichValue::from(value)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
