//! rfcmd - Convert IETF RFCs to Markdown

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgGroup, Parser};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use rfcmd::fetch::{
    Document, DocumentSource, HttpSource, RfcId, Variant, cited_rfcs, fetch_primary,
    fetch_recursive,
};
use rfcmd::{Converter, Error, Format, HtmlConfig, HtmlConverter, SegmentMode, XmlConverter};

#[derive(Parser)]
#[command(name = "rfcmd")]
#[command(version, about = "Convert IETF RFC documents to Markdown", long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["rfc", "file"])))]
#[command(after_help = "EXAMPLES:
    rfcmd --rfc RFC9514
    rfcmd --rfc 9514 9552 --extra pdf text --output-dir downloads
    rfcmd --file rfc9514.xml --output custom.md
    rfcmd --rfc 9514 --recursive --max-depth 2 --extra xml html")]
struct Cli {
    /// RFC number(s) to fetch, e.g. RFC9514 or 9514
    #[arg(long, num_args = 1.., value_parser = parse_rfc_id)]
    rfc: Vec<RfcId>,

    /// Local RFC file (.xml, .html or .htm)
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Directory for downloaded and generated files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Markdown file name (single document only)
    #[arg(long)]
    output: Option<String>,

    /// Also save these renderings of each fetched RFC
    #[arg(long, num_args = 1.., value_enum, conflicts_with = "file")]
    extra: Vec<Variant>,

    /// Also fetch the RFCs cited by each requested RFC
    #[arg(long, conflicts_with = "file")]
    recursive: bool,

    /// How many levels of citations to follow with --recursive
    #[arg(long, default_value_t = 1)]
    max_depth: usize,

    /// Render ASCII tables in legacy HTML as Markdown tables
    #[arg(long)]
    classify: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn parse_rfc_id(input: &str) -> Result<RfcId, String> {
    RfcId::parse(input).ok_or_else(|| format!("not an RFC number: {input}"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether at least one document was converted.
fn run(cli: &Cli) -> Result<bool, Error> {
    fs::create_dir_all(&cli.output_dir)?;
    info!("Output directory: {}", cli.output_dir.display());

    let converters = Converters::new(cli.classify);

    if let Some(path) = &cli.file {
        let name = match &cli.output {
            Some(name) => name.clone(),
            None => format!("{}.md", file_stem(path)),
        };
        let format = Format::from_path(path)?;
        info!("Converting {} as {format:?}", path.display());
        let markdown = converters.get(format).convert_file(path)?;
        write_markdown(&cli.output_dir.join(name), &markdown)?;
        return Ok(true);
    }

    let source = HttpSource::new();
    let documents = if cli.recursive {
        fetch_all_recursive(&source, &cli.rfc, cli.max_depth)
    } else {
        fetch_all(&source, &cli.rfc)
    };
    if documents.is_empty() {
        error!("No RFC could be fetched");
        return Ok(false);
    }

    let single = documents.len() == 1;
    let mut converted = 0;
    for doc in &documents {
        let name = match (&cli.output, single) {
            (Some(name), true) => name.clone(),
            _ => format!("{}.md", doc.id),
        };
        match convert_document(&converters, doc, &cli.output_dir.join(name)) {
            Ok(()) => converted += 1,
            Err(e) => error!("Failed to convert {}: {e}", doc.id),
        }
        save_extras(&source, doc, &cli.extra, &cli.output_dir);
    }

    info!("Converted {converted}/{} RFC(s)", documents.len());
    Ok(converted > 0)
}

struct Converters {
    xml: XmlConverter,
    html: HtmlConverter,
}

impl Converters {
    fn new(classify: bool) -> Self {
        let mode = if classify {
            SegmentMode::Classified
        } else {
            SegmentMode::Opaque
        };
        Self {
            xml: XmlConverter::new(),
            html: HtmlConverter::with_config(HtmlConfig::default().with_segment_mode(mode)),
        }
    }

    fn get(&self, format: Format) -> &dyn Converter {
        match format {
            Format::Xml => &self.xml,
            Format::Html => &self.html,
        }
    }
}

fn fetch_all(source: &HttpSource, ids: &[RfcId]) -> Vec<Document> {
    ids.iter()
        .filter_map(|&id| match fetch_primary(source, id) {
            Ok(doc) => Some(doc),
            Err(e) => {
                error!("Failed to fetch {id}: {e}");
                None
            }
        })
        .collect()
}

fn fetch_all_recursive(source: &HttpSource, ids: &[RfcId], max_depth: usize) -> Vec<Document> {
    let mut seen = HashSet::new();
    let mut documents = Vec::new();
    for &id in ids {
        info!("Fetching {id} recursively (max depth {max_depth})");
        match fetch_recursive(source, id, max_depth, cited_rfcs) {
            Ok(docs) => documents.extend(docs.into_iter().filter(|d| seen.insert(d.id))),
            Err(e) => error!("Failed to fetch {id}: {e}"),
        }
    }
    documents
}

fn convert_document(converters: &Converters, doc: &Document, output: &Path) -> Result<(), Error> {
    let format = doc
        .variant
        .format()
        .ok_or_else(|| Error::UnsupportedFormat(doc.variant.extension().to_string()))?;
    info!("Converting {} ({format:?})", doc.id);
    let markdown = converters.get(format).convert(&doc.bytes)?;
    write_markdown(output, &markdown)
}

/// Save the requested renderings next to the Markdown. The primary
/// document is reused when it is one of them.
fn save_extras(source: &HttpSource, doc: &Document, extras: &[Variant], dir: &Path) {
    for &variant in extras {
        let path = dir.join(variant.local_name(doc.id));
        let bytes = if variant == doc.variant {
            Some(doc.bytes.clone())
        } else {
            match source.fetch(doc.id, variant) {
                Ok(found) => found.map(|d| d.bytes),
                Err(e) => {
                    warn!("Failed to fetch {} {}: {e}", doc.id, variant.extension());
                    continue;
                }
            }
        };
        match bytes {
            Some(bytes) => match fs::write(&path, bytes) {
                Ok(()) => info!("Saved {}", path.display()),
                Err(e) => warn!("Cannot write {}: {e}", path.display()),
            },
            None => warn!("{} has no {} rendering", doc.id, variant.extension()),
        }
    }
}

fn write_markdown(path: &Path, markdown: &str) -> Result<(), Error> {
    fs::write(path, markdown)?;
    info!("Wrote {}", path.display());
    Ok(())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string())
}
