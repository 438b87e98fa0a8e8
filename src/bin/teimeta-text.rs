use anyhow::{Context, Result, anyhow};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};
use teimeta::input::{self, SourceFile};
use teimeta::query::TeiDocument;
use teimeta::text::TextConverter;

/// Convert TEI files to plain text
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Directory with the TEI files
    #[arg(default_value = "level1")]
    indir: PathBuf,
    /// Output directory
    #[arg(default_value = "txt")]
    outdir: PathBuf,
    /// Skip files whose name contains this
    #[arg(long, default_value = "schemas")]
    exclude: String,
    /// Print the number of words in each text
    #[arg(long)]
    count: bool,
    /// Verbosity
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn convert(converter: &TextConverter, file: &SourceFile, outdir: &Path) -> Result<usize> {
    let xml = fs::read_to_string(&file.path)
        .with_context(|| format!("cannot read {}", file.path.display()))?;
    let doc = TeiDocument::parse(&xml)
        .map_err(|e| anyhow!("cannot parse {}: {e}", file.path.display()))?;
    let text = converter.convert(&doc);
    let outfile = outdir.join(format!("{}.txt", file.stem));
    fs::write(&outfile, &text).with_context(|| format!("cannot write {}", outfile.display()))?;
    Ok(converter.count_words(&text))
}

fn main() -> Result<()> {
    let args = Args::parse();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(args.verbose.log_level_filter())
        .init();
    let files = input::enumerate(&args.indir, "*.xml", &args.exclude)
        .map_err(|e| anyhow!("{e}"))?;
    fs::create_dir_all(&args.outdir)
        .with_context(|| format!("cannot create {}", args.outdir.display()))?;
    let converter = TextConverter::new();
    let mut failed = 0;
    for file in &files {
        match convert(&converter, file, &args.outdir) {
            Ok(words) => {
                info!(target: "teimeta", "{}: {words} words", file.stem);
                if args.count {
                    println!("{} {}", file.stem, words);
                }
            }
            Err(e) => {
                error!(target: "teimeta", "{e:#}");
                failed += 1;
            }
        }
    }
    info!(
        target: "teimeta",
        "converted {} of {} files",
        files.len() - failed,
        files.len()
    );
    Ok(())
}
