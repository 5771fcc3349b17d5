use anyhow::Result;
use clap::Parser;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use assetgz::RootSource;

#[derive(Parser)]
#[command(
    name = "assetgz",
    about = "Pre-compress static web assets into .gz sidecars",
    version
)]
struct Cli {
    /// Project root supplied by the build hook; assets are read from <DIR>/data.
    /// Without it, assets are read from ../data relative to this executable.
    #[arg(long = "project-dir", env = "PROJECT_DIR", value_name = "DIR")]
    project_dir: Option<PathBuf>,

    /// Log discovery details to stderr (repeat for more)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let source = match cli.project_dir {
        Some(dir) => RootSource::Project(dir),
        None => RootSource::current_exe()?,
    };

    let stdout = io::stdout().lock();
    let mut out = BufWriter::new(stdout);
    assetgz::run(&source, &mut out)?;
    out.flush()?;

    Ok(())
}
