//! mdtrack - Markdown progress tracker
//!
//! A CLI around the mdtrack core: scan directories for markdown files,
//! inspect the trackable items of a document, and recover the exact source
//! text behind any item.

#![deny(unsafe_code)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use mdtrack::document_model::{parse_document, ParsedDocument};
use mdtrack::item_model::{ItemKind, TrackableItem};
use mdtrack::pipeline;
use std::path::Path;

/// Main entry point for the mdtrack CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { path, verbose } => {
            init_logging(verbose);
            handle_scan_command(&path)?;
        }

        Commands::Items {
            file,
            tree,
            verbose,
        } => {
            init_logging(verbose);
            handle_items_command(&file, tree)?;
        }

        Commands::Slice { file, id, verbose } => {
            init_logging(verbose);
            handle_slice_command(&file, &id)?;
        }
    }

    Ok(())
}

/// Initialize logging when verbose output is requested
fn init_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    }
}

/// Handle the scan command
fn handle_scan_command(path: &Path) -> Result<()> {
    let documents = pipeline::scan_sources(path)
        .with_context(|| format!("Failed to scan {}", path.display()))?;

    println!("Scanned {} markdown files", documents.len());

    let mut total_items = 0;
    let mut total_boxes = 0;
    let mut total_checked = 0;

    for document in &documents {
        print_document_summary(document);
        total_items += document.item_count;
        total_boxes += document.checkbox_count();
        total_checked += document.checked_count();
    }

    println!();
    println!(
        "✓ {} items total, {}/{} checkboxes complete",
        total_items, total_checked, total_boxes
    );

    Ok(())
}

/// Print one scanned file's summary line
fn print_document_summary(document: &ParsedDocument) {
    let path = document
        .source_path
        .as_ref()
        .map_or_else(|| "<string>".to_string(), |p| p.display().to_string());

    println!(
        "  {} - {} items, {}/{} checkboxes",
        path,
        document.item_count,
        document.checked_count(),
        document.checkbox_count()
    );
}

/// Handle the items command
fn handle_items_command(file: &Path, tree: bool) -> Result<()> {
    let document = parse_file(file)?;

    if tree {
        for item in &document.tree {
            print_item_recursive(item, 0);
        }
    } else {
        for item in &document.items {
            print_item_line(item, 0);
        }
    }

    println!();
    println!(
        "✓ {} items, {}/{} checkboxes complete",
        document.item_count,
        document.checked_count(),
        document.checkbox_count()
    );

    Ok(())
}

/// Handle the slice command
fn handle_slice_command(file: &Path, id: &str) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let document = parse_document(&content, Some(file));

    let item = document.find_item(id).with_context(|| {
        format!(
            "No item with ID '{}' in {} (run 'mdtrack items' to list IDs)",
            id,
            file.display()
        )
    })?;

    let slice = document
        .slice_item(&content, item)
        .with_context(|| format!("Failed to extract slice for item '{}'", id))?;

    println!("{}", slice);

    Ok(())
}

/// Parse a single markdown file into a snapshot
fn parse_file(file: &Path) -> Result<ParsedDocument> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    Ok(parse_document(&content, Some(file)))
}

/// Print an item and its subtree with indentation
fn print_item_recursive(item: &TrackableItem, indent: usize) {
    print_item_line(item, indent);
    for child in &item.children {
        print_item_recursive(child, indent + 1);
    }
}

/// Print a single item line
fn print_item_line(item: &TrackableItem, indent: usize) {
    let marker = match item.kind {
        ItemKind::Header => "#".repeat(item.depth as usize),
        ItemKind::Checkbox { checked: true, .. } => "[x]".to_string(),
        ItemKind::Checkbox { checked: false, .. } => "[ ]".to_string(),
        ItemKind::ListItem { ordered: true } => "1.".to_string(),
        ItemKind::ListItem { ordered: false } => "-".to_string(),
    };

    println!(
        "{}{} {} {} (line {})",
        "  ".repeat(indent),
        item.id,
        marker,
        item.content,
        item.position.line
    );
}
