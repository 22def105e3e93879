// src/main.rs
mod extractors;
mod source;
mod storage;
mod utils;

use clap::Parser;
use extractors::section::SectionExtractor;
use source::RemoteDocumentSource;
use storage::StorageManager;
use utils::AppError;

/// Command Line Interface for the statute section extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Section identifier to extract (e.g. "10", "115BAC")
    #[arg(short, long)]
    section: String,

    /// URL of the document manifest (JSON: title, page_count, page_url_template)
    #[arg(short, long)]
    manifest_url: String,

    /// Label used for output file naming (defaults to the manifest title)
    #[arg(short, long)]
    label: Option<String>,

    /// Output directory for extracted content
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Debug mode - save an annotated fragment-stream dump
    #[arg(short, long)]
    debug: bool,

    /// Override the accumulation safety ceiling, in characters
    #[arg(long)]
    safety_ceiling: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting extraction for args: {:?}", args);

    // 3. Initialize storage
    let storage = StorageManager::new(&args.output_dir)?;

    // 4. Connect to the document source
    let doc_source = RemoteDocumentSource::connect(&args.manifest_url).await?;
    let label = args
        .label
        .clone()
        .or_else(|| doc_source.title().map(str::to_string))
        .unwrap_or_else(|| "document".to_string());
    tracing::info!("Document label: {}", label);

    // 5. Optional debug dump of the fragment stream with anchor annotations
    if args.debug {
        let dump_path = format!(
            "{}/{}_section_{}_scan_dump.txt",
            args.output_dir, label, args.section
        );
        if let Err(e) = utils::scan_debug::dump_fragment_stream(
            &doc_source,
            &args.section,
            &dump_path,
        )
        .await
        {
            tracing::warn!("Failed to create fragment stream dump: {}", e);
        } else {
            tracing::info!("Created fragment stream dump: {}", dump_path);
        }
    }

    // 6. Initialize the section extractor
    let extractor = match args.safety_ceiling {
        Some(ceiling) => SectionExtractor::with_safety_ceiling(ceiling),
        None => SectionExtractor::new(),
    };

    // 7. Run the extraction
    match extractor.extract_section(&args.section, &doc_source).await {
        Ok(result) => {
            tracing::info!(
                "Successfully extracted section {} ({} bytes, {:?}/{:?})",
                args.section,
                result.text.len(),
                result.source_classification,
                result.confidence
            );

            match storage.save_section(&label, &args.section, &result) {
                Ok(path) => tracing::info!("Saved section text to: {}", path.display()),
                Err(e) => tracing::error!("Failed to save section text: {}", e),
            }

            match storage.save_section_metadata(&label, &args.section, &result) {
                Ok(path) => tracing::info!("Saved section metadata to: {}", path.display()),
                Err(e) => tracing::error!("Failed to save section metadata: {}", e),
            }

            Ok(())
        }
        Err(e) => {
            tracing::error!("Failed to extract section {}: {}", args.section, e);
            Err(AppError::Extraction(e))
        }
    }
}
