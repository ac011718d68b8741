use std::cell::RefCell;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use picsort_core::{Event, OrganizeOptions, OrganizeSummary};

#[derive(Parser)]
#[command(
    name = "picsort",
    version,
    about = "Organize pictures into Year/Month/Day folders by capture date"
)]
struct Cli {
    /// Directory to organize (default: the user's Pictures folder)
    source: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(source) = cli.source.or_else(dirs::picture_dir) else {
        eprintln!("Could not determine the pictures directory; pass one explicitly.");
        return Ok(());
    };

    println!("Picture Organization Tool");
    println!("{}", "=".repeat(50));
    println!("This will organize pictures into Year/Month/Day folders");
    println!("while preserving their original capture dates.\n");

    println!("Running dry run first to preview changes...\n");
    let dry = OrganizeOptions {
        source: source.clone(),
        dry_run: true,
    };
    match run_pass(&dry) {
        Ok(summary) => print_summary(&summary),
        Err(e) => {
            eprintln!("{}", e);
            return Ok(());
        }
    }

    println!("\n{}", "=".repeat(50));
    print!("\nProceed with moving files? (yes/no): ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;

    if !matches!(answer.trim().to_lowercase().as_str(), "yes" | "y") {
        println!("\nOperation cancelled.");
        return Ok(());
    }

    println!("\nOrganizing pictures...\n");
    let real = OrganizeOptions {
        source,
        dry_run: false,
    };
    match run_pass(&real) {
        Ok(summary) => {
            print_summary(&summary);
            println!("\n✓ Done! Your pictures are now organized by year, month, and day.");
        }
        Err(e) => eprintln!("{}", e),
    }

    Ok(())
}

/// Run one organize pass, rendering events through a progress bar so the
/// per-file lines are not clobbered by the bar redraws.
fn run_pass(options: &OrganizeOptions) -> anyhow::Result<OrganizeSummary> {
    let pb: RefCell<Option<ProgressBar>> = RefCell::new(None);

    let emit = |line: String| {
        match pb.borrow().as_ref() {
            Some(bar) => bar.println(line),
            None => println!("{}", line),
        }
    };
    let tick = || {
        if let Some(bar) = pb.borrow().as_ref() {
            bar.inc(1);
        }
    };

    let summary = picsort_core::organize(options, &|event| match event {
        Event::Scanned { root, count } => {
            println!("Found {} image files in {}", count, root.display());
            let bar = ProgressBar::new(*count);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("[{bar:40}] {pos}/{len} processing")
                    .unwrap(),
            );
            *pb.borrow_mut() = Some(bar);
        }
        Event::Duplicate { filename, renamed } => {
            emit(format!(
                "⚠️  Duplicate found for {} - saving as {}",
                filename, renamed
            ));
        }
        Event::WouldMove { filename, folder } => {
            emit(format!("Would move: {} -> {}/", filename, folder));
            tick();
        }
        Event::Moved {
            filename,
            folder,
            date,
        } => {
            emit(format!(
                "✓ Moved: {} -> {}/ (Date: {})",
                filename,
                folder,
                date.format("%Y-%m-%d")
            ));
            tick();
        }
        Event::AlreadyInPlace { .. } => tick(),
        Event::Error { filename, message } => {
            emit(format!("❌ Error processing {}: {}", filename, message));
            tick();
        }
    });

    if let Some(bar) = pb.borrow_mut().take() {
        bar.finish_and_clear();
    }
    summary
}

fn print_summary(summary: &OrganizeSummary) {
    println!("\n{}", "=".repeat(50));
    println!("Summary:");
    println!("  Total images found: {}", summary.found);
    println!("  Successfully moved: {}", summary.moved);
    println!("  Errors: {}", summary.errors);
    println!("  Skipped: {}", summary.skipped);
}
