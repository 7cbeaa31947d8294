//! Inselect: scanned images with annotated, croppable regions.
//!
//! A document pairs a large scanned image with a set of items, each a
//! rectangle in resolution-independent normalised space plus arbitrary
//! metadata. This crate loads and saves documents, converts item rects to
//! pixel space, and exports one cropped image per item.
//!
//! # Modules
//!
//! - [`model`]: Rect and item value types
//! - [`validation`]: Normalised-space and bounds checks
//! - [`image_handle`]: Lazily decoded images, coordinate conversion, crops
//! - [`document`]: Document load/save lifecycle and crop export
//! - [`template`]: Metadata templates for new items
//! - [`error`]: Error types for inselect operations

pub mod document;
pub mod error;
pub mod image_handle;
pub mod model;
pub mod template;
pub mod validation;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use document::Document;
pub use error::InselectError;
pub use image_handle::ImageHandle;

/// The inselect CLI application.
#[derive(Parser)]
#[command(name = "inselect")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Summarise a document and list its items.
    Info(DocumentArgs),
    /// Check every item against normalised space and the scanned image.
    Validate(DocumentArgs),
    /// Export one cropped image per item.
    Crops(CropsArgs),
}

#[derive(clap::Args)]
struct DocumentArgs {
    /// Metadata file of the document.
    document: PathBuf,
}

#[derive(clap::Args)]
struct CropsArgs {
    /// Metadata file of the document.
    document: PathBuf,

    /// Directory under which the crop directory is created.
    #[arg(long, env = "INSELECT_CROPS_DIR")]
    output_dir: Option<PathBuf>,
}

/// Run the inselect CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), InselectError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Info(args)) => run_info(args),
        Some(Commands::Validate(args)) => run_validate(args),
        Some(Commands::Crops(args)) => run_crops(args),
        None => {
            println!("inselect {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Scanned images with annotated, croppable regions.");
            println!();
            println!("Run 'inselect --help' for usage information.");
            Ok(())
        }
    }
}

fn run_info(args: DocumentArgs) -> Result<(), InselectError> {
    let doc = Document::load(&args.document)?;

    println!("{}", doc);
    match doc.thumbnail() {
        Some(thumbnail) => println!("Thumbnail: {}", thumbnail.path().display()),
        None => println!("Thumbnail: none"),
    }
    for (index, item) in doc.items().iter().enumerate() {
        println!("  {:>4}  {}  {} field(s)", index + 1, item.rect, item.fields.len());
    }
    Ok(())
}

fn run_validate(args: DocumentArgs) -> Result<(), InselectError> {
    let doc = Document::load(&args.document)?;
    let rects: Vec<_> = doc.items().iter().map(|item| item.rect).collect();

    validation::validate_normalised(&rects)?;
    let boxes: Vec<_> = doc.scanned().from_normalised(&rects)?.collect();
    doc.scanned().validate_in_bounds(&boxes)?;

    println!("Validation passed: {} item(s)", rects.len());
    Ok(())
}

fn run_crops(args: CropsArgs) -> Result<(), InselectError> {
    let doc = Document::load(&args.document)?;
    let dir = match args.output_dir {
        Some(parent) => doc.save_crops_in(&parent)?,
        None => doc.save_crops()?,
    };
    println!("{}", dir.display());
    Ok(())
}
