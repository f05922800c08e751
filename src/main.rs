//! epub-text - print the reading text of an EPUB

use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use epub_text::{Container, EntrySource, EpubFile, ExtractOptions, Package, ParagraphExtractor};

#[derive(Parser)]
#[command(name = "epub-text")]
#[command(version, about = "Extract plain reading text from an EPUB", long_about = None)]
#[command(after_help = "EXAMPLES:
    epub-text book.epub                 Print the book's text
    epub-text --package-dir book.epub   Resolve content next to the package document
    epub-text -i book.epub              Show container and package structure")]
struct Cli {
    /// Input EPUB file
    #[arg(value_name = "INPUT")]
    input: String,

    /// Show container and package structure instead of text
    #[arg(short, long)]
    info: bool,

    /// Print --info output as JSON
    #[arg(long, requires = "info")]
    json: bool,

    /// Resolve hrefs against the package document's directory instead of OEBPS/
    #[arg(long, conflicts_with = "root")]
    package_dir: bool,

    /// Fixed directory hrefs are resolved against
    #[arg(long, value_name = "DIR")]
    root: Option<String>,

    /// Leave out spine items marked linear="no"
    #[arg(long)]
    skip_non_linear: bool,

    /// Also select these elements as paragraphs (repeatable)
    #[arg(long = "block", value_name = "TAG")]
    blocks: Vec<String>,

    /// Log resolution steps to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> ExtractOptions {
        let options = ExtractOptions::new().with_skip_non_linear(self.skip_non_linear);
        match (&self.root, self.package_dir) {
            (Some(root), _) => options.with_fixed_root(root.clone()),
            (None, true) => options.with_package_directory(),
            (None, false) => options,
        }
    }

    fn extractor(&self) -> ParagraphExtractor {
        if self.blocks.is_empty() {
            ParagraphExtractor::new()
        } else {
            ParagraphExtractor::with_block_tags(
                std::iter::once("p".to_string()).chain(self.blocks.iter().cloned()),
            )
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = if cli.info {
        show_info(&cli)
    } else {
        print_text(&cli)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "epub_text=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_text(cli: &Cli) -> Result<(), String> {
    let epub = EpubFile::open(&cli.input).map_err(|e| e.to_string())?;
    let text = epub
        .text_with(&cli.options(), &cli.extractor())
        .map_err(|e| e.to_string())?;

    if text.is_empty() {
        return Err(format!("no text found in {}", cli.input));
    }

    println!("{text}");
    Ok(())
}

#[derive(Serialize)]
struct Info<'a> {
    file: &'a str,
    entries: usize,
    container: &'a Container,
    package: Option<&'a Package>,
    content_documents: Vec<String>,
}

fn show_info(cli: &Cli) -> Result<(), String> {
    let epub = EpubFile::open(&cli.input).map_err(|e| e.to_string())?;

    let content_documents = match epub.content_documents(&cli.options()) {
        Ok(docs) => docs.into_iter().map(|d| d.path).collect(),
        Err(e) => {
            tracing::warn!("cannot resolve content documents: {e}");
            Vec::new()
        }
    };

    let info = Info {
        file: &cli.input,
        entries: epub.source().entry_names().len(),
        container: epub.container(),
        package: epub.package(),
        content_documents,
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&info).map_err(|e| e.to_string())?;
        println!("{json}");
        return Ok(());
    }

    println!("File: {}", info.file);
    println!("Entries: {}", info.entries);
    for root in &info.container.root_files {
        println!("Root file: {} ({})", root.full_path, root.media_type);
    }

    let Some(package) = info.package else {
        println!("Package: none");
        return Ok(());
    };

    if let Some(metadata) = &package.metadata {
        if let Some(title) = metadata.title() {
            println!("Title: {title}");
        }
        if !metadata.creators.is_empty() {
            println!("Creators: {}", metadata.creators.join(", "));
        }
        if let Some(language) = metadata.language() {
            println!("Language: {language}");
        }
    }
    match &package.manifest {
        Some(manifest) => println!("Manifest items: {}", manifest.len()),
        None => println!("Manifest: none"),
    }
    match &package.spine {
        Some(spine) => println!("Spine items: {}", spine.item_refs.len()),
        None => println!("Spine: none"),
    }
    println!("Content documents: {}", info.content_documents.len());
    for path in &info.content_documents {
        println!("  {path}");
    }

    Ok(())
}
