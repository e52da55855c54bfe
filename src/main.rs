use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::{info, warn};
use rayon::prelude::*;

use boxpack::arrange::{Admission, Arranger};
use boxpack::cli::{CheckArgs, CliArgs, Command, CommonArgs, InitArgs};
use boxpack::config::{BoxpackConfig, LoadedConfig, make_relative, save_config};
use boxpack::error::BoxpackError;
use boxpack::output::{LayoutReport, cannot_organize_message, write_layout_json};
use boxpack::packing::{BinAlgo, Heuristic};
use boxpack::request::{LoadedRequest, load_requests};

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because logger may not be initialized
        // (e.g., config loading fails before logger init)
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse();

    match cli.command {
        Command::Pack(args) => {
            let merged = merge_config_with_args(&args)?;
            init_logging(merged.verbose);
            pack(&merged)
        }
        Command::Check(args) => {
            let merged = merge_config_with_args(&args.common)?;
            init_logging(merged.verbose);
            check(&merged, &args)
        }
        Command::Init(args) => {
            init_logging(false);
            init_config(&args)
        }
        Command::Heuristics { menu } => {
            list_heuristics(menu);
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    info!("Boxpack organizer v{}", env!("CARGO_PKG_VERSION"));
}

fn pack(merged: &MergedConfig) -> Result<()> {
    if !merged.output.exists() {
        fs::create_dir_all(&merged.output)?;
    }

    let requests = load_requests(&merged.input)?;
    info!("Loaded {} layout request(s)", requests.len());

    let arranged: Vec<_> = requests
        .par_iter()
        .map(|loaded| -> Result<_> {
            let arranger = merged.arranger_for(loaded)?;
            let items = loaded.request.packable_items()?;
            let result = arranger.arrange(items);
            Ok(LayoutReport::new(&loaded.request, &arranger, &result))
        })
        .collect::<Result<_>>()?;

    for (loaded, report) in requests.iter().zip(&arranged) {
        let path = write_layout_json(report, &merged.output, &loaded.name)?;
        match &report.message {
            Some(message) => warn!("{}: {}", loaded.name, message),
            None => info!(
                "{}: organized {} item(s)",
                loaded.name,
                report.fitted.len()
            ),
        }
        info!("Saved {}", path.display());
    }

    info!("Done!");

    Ok(())
}

fn check(merged: &MergedConfig, args: &CheckArgs) -> Result<()> {
    let requests = load_requests(&merged.input)?;
    let autosort = args.autosort(merged.autosort);
    let mut rejected = Vec::new();

    for loaded in &requests {
        let arranger = merged.arranger_for(loaded)?;
        let mut items = loaded.request.packable_items()?;
        let position = items
            .iter()
            .position(|item| item.id == args.candidate)
            .ok_or_else(|| BoxpackError::UnknownItem(args.candidate.clone()))?;
        let candidate = items.remove(position);

        match arranger.admit(&items, candidate) {
            Admission::Fits(arrangement) => {
                info!(
                    "{}: '{}' fits",
                    loaded.name,
                    loaded.request.label_for(&args.candidate)
                );
                if autosort {
                    if !merged.output.exists() {
                        fs::create_dir_all(&merged.output)?;
                    }
                    let report = LayoutReport::new(&loaded.request, &arranger, &Ok(arrangement));
                    let path = write_layout_json(&report, &merged.output, &loaded.name)?;
                    info!("Saved {}", path.display());
                }
            }
            Admission::NoSpace { overlapped } => {
                let labels = overlapped
                    .iter()
                    .map(|item| loaded.request.label_for(&item.id));
                let message = cannot_organize_message(labels).unwrap_or_default();
                warn!("{}: no space ({})", loaded.name, message);
                rejected.push(loaded.name.clone());
            }
        }
    }

    if rejected.is_empty() {
        Ok(())
    } else {
        Err(anyhow!(
            "'{}' does not fit in: {}",
            args.candidate,
            rejected.join(", ")
        ))
    }
}

fn init_config(args: &InitArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(anyhow!(
            "{} already exists (use --force to overwrite)",
            args.path.display()
        ));
    }

    // Paths are stored relative to the config file
    let base = match args.path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let config = BoxpackConfig {
        input: args
            .inputs
            .iter()
            .map(|path| make_relative(path, &base))
            .collect(),
        output_dir: args
            .output
            .as_ref()
            .map(|path| make_relative(path, &base))
            .unwrap_or_else(|| ".".to_string()),
        heuristic: args.heuristic.name().to_string(),
        algorithm: args.algorithm.name().to_string(),
        rotation: args.rotate,
        sorting: !args.no_sort,
        autosort: !args.no_autosort,
        best: args.best,
        ..BoxpackConfig::default()
    };

    save_config(&config, &args.path)?;
    info!("Saved {}", args.path.display());

    Ok(())
}

#[allow(clippy::print_stdout)]
fn list_heuristics(menu: bool) {
    let heuristics: &[Heuristic] = if menu {
        &Heuristic::MENU
    } else {
        &Heuristic::ALL
    };

    for heuristic in heuristics {
        let marker = if *heuristic == Heuristic::default() {
            " (default)"
        } else {
            ""
        };
        println!("{:<18} {}{}", heuristic.name(), heuristic.title(), marker);
    }
}

/// Merged configuration from CLI args and optional config file.
struct MergedConfig {
    input: Vec<PathBuf>,
    output: PathBuf,
    heuristic: Heuristic,
    algorithm: BinAlgo,
    rotation: bool,
    sorting: bool,
    best: bool,
    autosort: bool,
    verbose: bool,
}

impl MergedConfig {
    fn arranger_for(&self, loaded: &LoadedRequest) -> Result<Arranger> {
        let (width, height) = loaded
            .request
            .container_meters()
            .with_context(|| format!("invalid container in {}", loaded.path.display()))?;

        Ok(Arranger::new(width, height)
            .bin_algo(self.algorithm)
            .heuristic(self.heuristic)
            .rotation(self.rotation)
            .sorting(self.sorting)
            .best(self.best))
    }
}

/// Merge config file values with CLI arguments.
/// CLI arguments always take precedence over config values.
fn merge_config_with_args(args: &CommonArgs) -> Result<MergedConfig> {
    let loaded_config = if let Some(config_path) = &args.config {
        Some(
            LoadedConfig::load(config_path)
                .with_context(|| format!("failed to load config: {}", config_path.display()))?,
        )
    } else {
        None
    };

    // Determine input files: CLI args override config
    let input = if !args.input.is_empty() {
        args.input.clone()
    } else if let Some(ref lc) = loaded_config {
        lc.resolve_inputs()
            .context("failed to resolve input files from config")?
    } else {
        // This shouldn't happen due to clap's required_unless_present
        Vec::new()
    };

    // Determine output directory: CLI > config > default
    let output = args.output.clone().unwrap_or_else(|| {
        loaded_config
            .as_ref()
            .map(|lc| lc.resolve_output_dir())
            .unwrap_or_else(|| PathBuf::from("."))
    });

    let heuristic = match (args.heuristic, &loaded_config) {
        (Some(h), _) => h,
        (None, Some(lc)) => lc.heuristic()?,
        (None, None) => Heuristic::default(),
    };

    let algorithm = match (args.algorithm, &loaded_config) {
        (Some(a), _) => a,
        (None, Some(lc)) => lc.algorithm()?,
        (None, None) => BinAlgo::default(),
    };

    // Boolean flags: CLI presence wins, otherwise use config
    let config = loaded_config.as_ref().map(|lc| &lc.config);
    let rotation = args.rotate || config.is_some_and(|c| c.rotation);
    let sorting = !args.no_sort && config.is_none_or(|c| c.sorting);
    let best = args.best || config.is_some_and(|c| c.best);
    // Saved preference; `check --no-autosort` can still turn it off
    let autosort = config.is_none_or(|c| c.autosort);

    Ok(MergedConfig {
        input,
        output,
        heuristic,
        algorithm,
        rotation,
        sorting,
        best,
        autosort,
        verbose: args.verbose,
    })
}
