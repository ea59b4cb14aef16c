use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use schema_splice::MergeHint;
use schema_splice::MergeOptions;
use schema_splice::ResolverBinding;
use tracing_subscriber::EnvFilter;

/// CLI arguments. See <https://docs.rs/clap/latest/clap/_derive/index.html>
#[derive(Parser)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Splices the resolver-bound fields of a new schema, and the types they need, into an old schema
    Merge(MergeArgs),
}

#[derive(clap::Args)]
struct MergeArgs {
    /// The path to the currently deployed schema, or `-` for stdin
    #[arg(long)]
    old: PathBuf,
    /// The path to the newly authored schema
    #[arg(long)]
    new: PathBuf,
    /// A field that is backed by a resolver. Can be repeated
    #[arg(long = "binding", value_name = "TYPE.FIELD")]
    bindings: Vec<ResolverBinding>,
    /// A JSON array of resolver descriptors, each with a `typeName` and a `fieldName`.
    /// Applied before the `--binding` flags
    #[arg(long = "bindings", value_name = "FILE")]
    bindings_file: Option<PathBuf>,
    /// A type the new schema may reference without defining it. Can be repeated
    #[arg(long = "implicit-type", value_name = "NAME")]
    implicit_types: Vec<String>,
    /// Only accept the GraphQL built-in scalars as implicit types, not the AppSync ones
    #[arg(long)]
    builtins_only: bool,
    /// Where to write the merged schema, instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match args.command {
        Command::Merge(merge_args) => {
            let merged = merge(&merge_args)?;
            match &merge_args.output {
                Some(path) => fs::write(path, merged)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => println!("{merged}"),
            }
        }
    }
    Ok(())
}

fn merge(args: &MergeArgs) -> anyhow::Result<String> {
    let old_sdl = read_input(&args.old)?;
    let new_sdl = read_input(&args.new)?;
    let bindings = collect_bindings(args)?;

    let merged = schema_splice::merge_schemas(&old_sdl, &new_sdl, &bindings, &options(args))
        .context("failed to merge schemas")?;
    for hint in &merged.hints {
        match hint {
            MergeHint::SkippedBinding { .. } => tracing::warn!("{hint}"),
            MergeHint::ImportedType { .. } => tracing::info!("{hint}"),
        }
    }
    Ok(merged.sdl)
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        io::read_to_string(io::stdin()).context("failed to read stdin")
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

fn collect_bindings(args: &MergeArgs) -> anyhow::Result<Vec<ResolverBinding>> {
    let mut bindings = match &args.bindings_file {
        Some(path) => {
            let contents = read_input(path)?;
            serde_json::from_str::<Vec<ResolverBinding>>(&contents)
                .with_context(|| format!("invalid resolver descriptors in {}", path.display()))?
        }
        None => Vec::new(),
    };
    bindings.extend(args.bindings.iter().cloned());
    Ok(bindings)
}

fn options(args: &MergeArgs) -> MergeOptions {
    let options = if args.builtins_only {
        MergeOptions::graphql_builtins()
    } else {
        MergeOptions::default()
    };
    options.with_implicit_types(args.implicit_types.iter().cloned())
}
