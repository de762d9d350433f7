use anyhow::Result;
use clap::Parser;
use mksyscalls::cli::Cli;
use mksyscalls::config::GeneratorConfig;
use mksyscalls::fetch::{HttpFetcher, LocalTree};
use mksyscalls::generator::{generate, GenerateOptions};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; --debug forces TRACE, otherwise RUST_LOG
/// applies with `info` as the default
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Cli) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(url) = args.base_url {
        config.base_url = url;
    }
    config.validate()?;

    if args.dump_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let options = GenerateOptions {
        linux_version: args.linux_version,
        output: args.out,
        format: args.format,
    };

    // Dropping the fetcher removes its scratch directory
    match args.source_dir {
        Some(dir) => {
            generate(&mut LocalTree::new(dir), &config, &options)?;
        }
        None => {
            let mut fetcher = HttpFetcher::new(&config.base_url, &options.linux_version)?;
            generate(&mut fetcher, &config, &options)?;
        }
    }

    Ok(())
}

fn main() {
    let args = Cli::parse();

    init_tracing(args.debug);

    if let Err(e) = run(args) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
