mod catalog;
mod cli;
mod error;
mod render;
mod session;

use crate::cli::{Cli, Command, Layout};
use crate::error::{ErrorKind, Result};
use crate::session::Session;
use clap::Parser;
use exn::ResultExt;
use std::path::PathBuf;
use std::process::ExitCode;
use tablepack_archive::cli::Preference;
use tablepack_config::Config;
use tablepack_organize::{
    ArchiveNamer, AssembleOptions, OrganizationTemplate, assemble, build_tree, check_ready, format_size, plan,
    summarize,
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn,tablepack=info",
        1 => "info,tablepack=debug,tablepack_organize=debug",
        _ => "debug,tablepack=trace,tablepack_organize=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        },
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Templates => list_templates(),
        Command::Presets => list_presets(),
        Command::Build { layout, compression, output, quiet } => {
            let config = load_config(cli.config)?;
            let preference =
                Preference::try_from(compression).or_raise(|| ErrorKind::Usage("invalid --compression".into()))?;
            build(&config, &layout, preference, output, quiet).await
        },
        Command::Preview { layout, json, flat } => {
            let config = load_config(cli.config)?;
            let session = Session::load(&layout, config.default_quality).await?;
            if flat {
                for entry in plan(&session.items, &session.primary).iter().filter(|e| !e.is_placeholder()) {
                    println!("{}", entry.path);
                }
            } else if json {
                let tree = build_tree(&session.items, &session.primary);
                println!("{}", serde_json::to_string_pretty(&tree).or_raise(|| ErrorKind::Build)?);
            } else {
                print!("{}", render::tree(&build_tree(&session.items, &session.primary)));
            }
            Ok(())
        },
        Command::Summary { layout, json } => {
            let config = load_config(cli.config)?;
            let session = Session::load(&layout, config.default_quality).await?;
            let summary = summarize(&session.items);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary).or_raise(|| ErrorKind::Build)?);
            } else {
                print!("{}", render::summary(&summary));
            }
            Ok(())
        },
        Command::ExportTemplate { layout, template_name, output } => {
            let config = load_config(cli.config)?;
            let session = Session::load(&layout, config.default_quality).await?;
            let template = OrganizationTemplate::export(&session.items, template_name);
            let json = template.to_json().or_raise(|| ErrorKind::Build)?;
            let path = output.unwrap_or_else(|| PathBuf::from(template.file_name()));
            tokio::fs::write(&path, json).await.or_raise(|| ErrorKind::Output(path.clone()))?;
            println!("{}", path.display());
            Ok(())
        },
    }
}

fn load_config(explicit: Option<PathBuf>) -> Result<Config> {
    let config = Config::load(explicit.as_deref()).or_raise(|| ErrorKind::Config)?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

async fn build(
    config: &Config,
    layout: &Layout,
    preference: Preference,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let session = Session::load(layout, config.default_quality).await?;
    check_ready(&session.items, &session.primary).or_raise(|| ErrorKind::Build)?;

    let output = match output {
        Some(path) => path,
        None => {
            let namer: ArchiveNamer = config.archive_name.parse::<ArchiveNamer>().or_raise(|| ErrorKind::Config)?;
            config.output_dir.join(namer.render(&session.primary).or_raise(|| ErrorKind::Config)?)
        },
    };

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, stopping after the current file");
            on_interrupt.cancel();
        }
    });

    let options = AssembleOptions::new(preference.resolve(&config.compression)).with_cancel(cancel);
    let bar = render::progress_bar(quiet);
    let package = assemble(&session.items, &session.primary, &options, |progress| {
        bar.set_position(u64::from(progress));
    })
    .await;
    match &package {
        Ok(_) => bar.finish_and_clear(),
        Err(_) => bar.abandon(),
    }
    let package = package.or_raise(|| ErrorKind::Build)?;

    if !package.warnings.is_empty() {
        tracing::warn!(count = package.warnings.len(), "some images were packaged without conversion");
    }
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.or_raise(|| ErrorKind::Output(output.clone()))?;
    }
    tokio::fs::write(&output, &package.bytes).await.or_raise(|| ErrorKind::Output(output.clone()))?;
    println!(
        "{} ({}, {} files)",
        output.display(),
        format_size(package.size()),
        package.entries.len()
    );
    Ok(())
}

fn list_templates() -> Result<()> {
    for key in catalog::template_keys() {
        let template = catalog::template(&key)?;
        let description = template.metadata.as_ref().and_then(|m| m.description.as_deref()).unwrap_or_default();
        println!("{key:<20} {:<24} {description}", template.name);
    }
    Ok(())
}

fn list_presets() -> Result<()> {
    let catalog = catalog::presets()?;
    for category in catalog.categories() {
        println!("{} ({})", category.name, category.parent_path);
        for item in &category.items {
            println!("  {:<28} {:<8} {:<28} {}", item.id, item.kind.to_string(), item.default_location, item.label);
        }
    }
    Ok(())
}
