use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use itertools::Itertools;
use log::{error, info};
use std::path::PathBuf;
use std::{error, fs, io, process};
use teimeta::aggregate;
use teimeta::charts;
use teimeta::config::Config;
use teimeta::driver;
use teimeta::errors::Result;
use teimeta::output::{self, OError};

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Directory with the TEI files
    #[arg(default_value = "level1")]
    indir: PathBuf,
    /// Output directory
    #[arg(default_value = "metadata")]
    outdir: PathBuf,
    /// Skip files whose name contains this
    #[arg(long, default_value = "schemas")]
    exclude: String,
    /// Also write the reports as JSON files
    #[arg(long)]
    json: bool,
    /// Produce compact JSON files
    #[arg(long)]
    compact: bool,
    /// Print the composition report
    #[arg(long)]
    print: bool,
    /// Print chart series
    #[arg(long)]
    charts: bool,
    /// Report errors as a JSON file
    #[arg(long)]
    error_file: Option<String>,
    /// Verbosity
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn process(args: &Args) -> Result<()> {
    let config = Config::eltec(&args.indir, &args.outdir)?.with_exclude(&args.exclude);
    info!(target: "teimeta", "read: {}", config.input_dir.display());
    let outcome = driver::run(&config)?;
    if args.json {
        output::save_json(
            &outcome.composition,
            &config.composition_path().with_extension("json"),
            args.compact,
        )?;
        output::save_json(
            &outcome.full,
            &config.full_path().with_extension("json"),
            args.compact,
        )?;
    }
    if args.print {
        println!("{}", output::wrapped(&outcome.composition, 30));
    }
    if args.charts {
        for chart in charts::all(&outcome.full) {
            println!("{chart}");
        }
        if let Some((min, max, mean)) = aggregate::length_summary(&outcome.full) {
            println!("Text lengths (words): {min}-{max}, mean {mean}");
        }
    }
    if !outcome.skipped.is_empty() {
        info!(
            target: "teimeta",
            "skipped: {}",
            outcome.skipped.iter().map(|f| &f.stem).join(", ")
        );
    }
    Ok(())
}

fn store_error(error_file: &str, e: &dyn error::Error) -> Result<()> {
    let error = OError {
        error: format!("{e}"),
    };
    let file = fs::File::create(error_file)?;
    let writer = io::BufWriter::new(file);
    serde_json::to_writer(writer, &error)?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(args.verbose.log_level_filter())
        .init();
    match process(&args) {
        Ok(()) => (),
        Err(e) => {
            match args.error_file {
                Some(filename) => match store_error(&filename, &*e) {
                    Ok(()) => {
                        info!(target: "teimeta", "error reported: {e}");
                    }
                    Err(e2) => {
                        error!(target: "teimeta", "{e}");
                        error!(target: "teimeta", "{e2}");
                    }
                },
                None => error!(target: "teimeta", "{e}"),
            }
            process::exit(1);
        }
    }
}
