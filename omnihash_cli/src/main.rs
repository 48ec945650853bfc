use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use colored::Colorize;
use omnihash_core::{Criteria, DigesterRegistry, produce_digests};

mod output;
mod source;
mod terminal;

use output::Renderer;

#[derive(Parser)]
#[command(name = "omnihash")]
#[command(author, version, about = "Hash a file, string, URL or stdin with every digest algorithm at once", long_about = None)]
struct Cli {
    /// Files, URLs or strings to hash
    #[arg(value_name = "HASHME")]
    inputs: Vec<String>,

    /// Hash inputs as strings, even if files with those names exist
    #[arg(short = 's', long = "string")]
    string: bool,

    /// Calculate CRC checksums as well
    #[arg(short = 'c', long = "crc")]
    crc: bool,

    /// Select a family of algorithms: include only algos having TEXT in their names
    /// (repeat to select more families)
    #[arg(short = 'f', long = "family", value_name = "TEXT")]
    family: Vec<String>,

    /// Exclude a family of algorithms: skip algos having TEXT in their names
    /// (repeat to exclude more families)
    #[arg(short = 'x', long = "exclude", value_name = "TEXT")]
    exclude: Vec<String>,

    /// Report only digests containing TEXT
    #[arg(short = 'm', long = "match", value_name = "TEXT")]
    match_fragment: Option<String>,

    /// Output results in JSON format
    #[arg(short = 'j', long = "json")]
    json: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on debug flag
    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("omnihash_core", log::LevelFilter::Debug)
            .filter_module("omnihash_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let criteria = Criteria::new(cli.family.clone(), cli.exclude.clone());
    let registry = DigesterRegistry::collect(criteria, cli.crc);
    log::debug!("{} algorithms active", registry.len());

    let matcher = cli.match_fragment.as_deref();
    let mut renderer = Renderer::new(cli.json);

    if cli.inputs.is_empty() {
        // If no stdin either, just help and quit
        if terminal::stdin_is_interactive() {
            Cli::command().print_help()?;
            return Ok(());
        }
        let stdin = source::stdin_source();
        renderer.banner(stdin.kind.noun(), None, false);
        let report = produce_digests(stdin.chunks, stdin.declared_len, &registry, matcher)
            .await
            .context("failed while hashing standard input")?;
        renderer.report(None, &report);
        renderer.finish()?;
        return Ok(());
    }

    let many = cli.inputs.len() > 1;
    let mut failures = 0usize;
    for input in &cli.inputs {
        if let Err(err) = hash_one(input, &cli, &registry, matcher, many, &mut renderer).await {
            failures += 1;
            eprintln!("{} {input}: {err:#}", "error:".red().bold());
        }
    }
    renderer.finish()?;

    if failures > 0 {
        anyhow::bail!("{failures} of {} input(s) failed", cli.inputs.len());
    }
    Ok(())
}

/// Hash a single input item; failures here never abort sibling items.
async fn hash_one(
    input: &str,
    cli: &Cli,
    registry: &DigesterRegistry,
    matcher: Option<&str>,
    many: bool,
    renderer: &mut Renderer,
) -> Result<()> {
    let Some(resolved) = source::resolve(input, cli.string).await? else {
        renderer.skipping(input);
        return Ok(());
    };

    renderer.banner(resolved.kind.noun(), Some(input), many);
    let report = produce_digests(resolved.chunks, resolved.declared_len, registry, matcher)
        .await
        .context("read failed mid-hash, no digests reported")?;
    renderer.report(Some(input), &report);
    Ok(())
}
