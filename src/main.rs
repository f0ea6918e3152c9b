use anyhow::Context;
use clap::{error::ErrorKind, Parser};
use mdx_migrate::{BatchStats, Config, FileOutcome, Pipeline};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "mdx-migrate",
    version,
    about = "Convert Docusaurus Markdown pages into Fern MDX",
    long_about = "Convert Docusaurus Markdown pages into Fern-compatible MDX.\n\n\
    Drops Docusaurus frontmatter, turns the leading heading into a title, rewrites \
    admonitions into <Callout> components, fixes /img/ links and adds an SPDX notice.\n\n\
    USAGE EXAMPLES:\n  \
      # Convert a single page\n  \
      mdx-migrate docs/intro.md fern/pages/intro.mdx\n\n  \
      # Convert a whole docs tree\n  \
      mdx-migrate docs fern/pages --batch"
)]
struct Cli {
    /// Source file, or source directory with --batch
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// Destination file, or destination directory with --batch
    #[arg(value_name = "DEST")]
    dest: PathBuf,

    /// Convert every .md file below SOURCE into DEST
    #[arg(long)]
    batch: bool,

    /// Run the conversion without writing any file
    #[arg(long)]
    dry_run: bool,

    /// Replacement for the /img/ prefix in image links
    #[arg(long, value_name = "PREFIX")]
    image_prefix: Option<String>,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::MissingRequiredArgument => {
            print_usage();
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => e.exit(),
    };

    setup_tracing(cli.verbose);

    let mut builder = Config::builder()
        .source(&cli.source)
        .destination(&cli.dest)
        .batch(cli.batch)
        .dry_run(cli.dry_run);

    if let Some(prefix) = cli.image_prefix {
        builder = builder.image_prefix(prefix);
    }

    let config = builder.build().context("Failed to build configuration")?;

    let pipeline = Pipeline::new(config).context("Failed to create pipeline")?;

    if cli.batch {
        let stats = pipeline.run_with(report_file);
        println!("\n{}", stats.summary_line());
        return Ok(ExitCode::SUCCESS);
    }

    let stats = pipeline.run();
    Ok(report_single(&stats, &cli.source, &cli.dest))
}

fn print_usage() {
    println!("Usage: mdx-migrate <source_file> <dest_file>");
    println!("   or: mdx-migrate <source_dir> <dest_dir> --batch");
}

fn report_file(outcome: &FileOutcome) {
    let mark = if outcome.success { '✓' } else { '✗' };
    println!("{mark} {}", outcome.source.display());
}

fn report_single(stats: &BatchStats, source: &std::path::Path, dest: &std::path::Path) -> ExitCode {
    match stats.outcomes.first() {
        Some(outcome) if outcome.success => {
            println!("✓ Converted {} -> {}", source.display(), dest.display());
            ExitCode::SUCCESS
        }
        _ => {
            println!("✗ Failed to convert {}", source.display());
            ExitCode::FAILURE
        }
    }
}

fn setup_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::new("mdx_migrate=info"),
        1 => EnvFilter::new("mdx_migrate=debug"),
        _ => EnvFilter::new("mdx_migrate=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
