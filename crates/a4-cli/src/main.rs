use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use a4_layout::{
    DocumentDraft, DocumentStore, EditorOptions, ExportWarning, JsonFileStore, OwnerId,
    PaperSize, SignaturePlacement,
};
use a4_signature::SignatureOptions;

#[derive(Parser)]
#[command(name = "a4d", about = "A4Docs page layout tools", version)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export an editor document to a single-page PDF
    Export {
        /// Document JSON file ({"title": ..., "blocks": [...]})
        #[arg(
            short,
            long,
            required_unless_present = "document",
            conflicts_with = "document"
        )]
        input: Option<PathBuf>,

        /// Id of a document in the local store instead of a file
        #[arg(long)]
        document: Option<String>,

        #[command(flatten)]
        store: StoreArgs,

        /// Output PDF file (defaults to the document title)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output paper size, overrides the config file
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,

        /// Editor options JSON file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Stamp signature placements into an existing PDF
    Sign {
        /// PDF to sign
        #[arg(short, long)]
        input: PathBuf,

        /// Placements JSON file ([{"pageNumber": 1, "imageData": ..., "x": ...}])
        #[arg(short, long)]
        placements: PathBuf,

        /// Output PDF file (defaults to <input>_signed.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Turn a photo of a signature into a transparent PNG
    Signature {
        /// Photo or scan (PNG or JPEG)
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        /// Brightness above which pixels become transparent (100-255)
        #[arg(long, default_value = "200")]
        threshold: u8,

        /// Edge smoothing passes (0-5)
        #[arg(long, default_value = "1")]
        smoothing: u8,
    },

    /// Manage documents in the local store
    Docs {
        #[command(flatten)]
        store: StoreArgs,

        #[command(subcommand)]
        action: DocsAction,
    },
}

#[derive(Args)]
struct StoreArgs {
    /// Local document store file
    #[arg(long, default_value = "a4docs.json")]
    store: PathBuf,

    /// Owner whose documents are used
    #[arg(long, default_value = "local")]
    owner: String,
}

impl StoreArgs {
    fn open(&self) -> (JsonFileStore, OwnerId) {
        (JsonFileStore::new(&self.store), OwnerId::new(&self.owner))
    }
}

#[derive(Subcommand)]
enum DocsAction {
    /// List documents, most recently updated first
    List,
    /// Delete a document
    Delete { id: String },
    /// Import documents from a JSON array, keeping their creation times
    Import { file: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    A5,
    Letter,
    Legal,
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
        }
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_warnings(warnings: &[ExportWarning]) {
    for warning in warnings {
        println!("  warning: {}", warning);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    match cli.command {
        Commands::Export {
            input,
            document,
            store,
            output,
            paper,
            config,
        } => {
            let mut options = match config {
                Some(path) => EditorOptions::load(&path).await?,
                None => EditorOptions::default(),
            };
            if let Some(paper) = paper {
                options.paper = paper.into();
            }

            let draft: DocumentDraft = match (input, document) {
                (Some(path), _) => read_json(&path).await?,
                (None, Some(id)) => {
                    let (docs, owner) = store.open();
                    let found = docs
                        .load(&owner)
                        .await?
                        .into_iter()
                        .find(|d| d.id.0 == id)
                        .with_context(|| {
                            format!("No document {} in {}", id, docs.path().display())
                        })?;
                    DocumentDraft::new(found.title, found.blocks)
                }
                (None, None) => bail!("Either --input or --document is required"),
            };

            let title = draft.effective_title();
            let output =
                output.unwrap_or_else(|| PathBuf::from(a4_layout::export_file_name(&title)));
            let report = a4_layout::export_document(draft.blocks, options, &output).await?;
            print_warnings(&report.warnings);
            println!("Exported \"{}\" → {}", title, output.display());
        }

        Commands::Sign {
            input,
            placements,
            output,
        } => {
            let pdf = a4_layout::load_pdf(&input).await?;
            let placements: Vec<SignaturePlacement> = read_json(&placements).await?;
            println!(
                "Loaded {} ({} pages, {} placements)",
                input.display(),
                pdf.page_count(),
                placements.len()
            );

            let output = output
                .unwrap_or_else(|| input.with_file_name(a4_layout::signed_file_name(&input)));
            let report = a4_layout::export_signed_pdf(pdf.bytes, placements, &output).await?;
            print_warnings(&report.warnings);
            println!("Signed → {}", output.display());
        }

        Commands::Signature {
            input,
            output,
            threshold,
            smoothing,
        } => {
            let options = SignatureOptions {
                threshold,
                smoothing_passes: smoothing,
            };
            let signature = a4_signature::process_file(&input, &options).await?;
            a4_signature::save_png(&signature, &output).await?;
            println!(
                "Signature {}x{} → {}",
                signature.width,
                signature.height,
                output.display()
            );
        }

        Commands::Docs { store, action } => {
            let (docs, owner) = store.open();
            match action {
                DocsAction::List => {
                    let documents = docs.load(&owner).await?;
                    if documents.is_empty() {
                        println!("No documents for {}", owner.0);
                    }
                    for doc in documents {
                        let updated = chrono::DateTime::from_timestamp_millis(doc.updated_at)
                            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                            .unwrap_or_default();
                        println!(
                            "{:>4}  {:<32} {:>3} blocks  {}",
                            doc.id,
                            doc.title,
                            doc.blocks.len(),
                            updated
                        );
                    }
                }
                DocsAction::Delete { id } => {
                    let id = a4_layout::DocumentId(id);
                    if !docs.delete(&owner, &id).await? {
                        bail!("Document {} not found", id);
                    }
                    println!("Deleted {}", id);
                }
                DocsAction::Import { file } => {
                    let drafts: Vec<DocumentDraft> = read_json(&file).await?;
                    let imported = docs.import(&owner, drafts).await?;
                    println!(
                        "Imported {} documents → {}",
                        imported.len(),
                        docs.path().display()
                    );
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_export_needs_a_source() {
        assert!(Cli::try_parse_from(["a4d", "export"]).is_err());
        assert!(Cli::try_parse_from(["a4d", "export", "-i", "a.json", "--document", "1"]).is_err());
        assert!(Cli::try_parse_from(["a4d", "export", "--document", "1", "--paper", "letter"]).is_ok());
    }

    #[test]
    fn test_docs_defaults() {
        let cli = Cli::try_parse_from(["a4d", "-v", "docs", "delete", "7"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Docs { store, action } => {
                assert_eq!(store.store, PathBuf::from("a4docs.json"));
                assert_eq!(store.owner, "local");
                assert!(matches!(action, DocsAction::Delete { id } if id == "7"));
            }
            _ => panic!("expected docs command"),
        }
    }
}
