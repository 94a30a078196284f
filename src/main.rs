//! CLI entry point for dirlist

use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use dirlist::{Lister, ListingConfig};

#[derive(Parser, Debug)]
#[command(name = "dirlist")]
#[command(about = "List files and directories")]
#[command(version)]
struct Args {
    /// Files and directories to list (default: the current directory)
    paths: Vec<PathBuf>,

    /// List hidden files and the pseudo-directories . and ..
    #[arg(short, long)]
    all: bool,

    /// Show permissions, links, owner, group, size and modification time
    #[arg(short = 'l')]
    long: bool,

    /// List subdirectories recursively
    #[arg(short = 'R', long = "recursive")]
    recursive: bool,

    /// Print only the number of entries that would be listed (overrides -l)
    #[arg(short = 'n', long = "count")]
    count: bool,

    /// One entry per line (always the case; accepted for compatibility)
    #[arg(short = '1')]
    #[allow(dead_code)]
    one_per_line: bool,
}

impl From<&Args> for ListingConfig {
    fn from(args: &Args) -> Self {
        ListingConfig {
            show_hidden: args.all,
            long_format: args.long,
            recursive: args.recursive,
            count_only: args.count,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let args = Args::parse();
    let config = ListingConfig::from(&args);

    let stdout = io::stdout().lock();
    let stderr = io::stderr().lock();
    let mut lister = Lister::new(config, stdout, stderr);

    match lister.list_roots(&args.paths) {
        Ok(status) => process::exit(status.exit_code()),
        Err(e) => {
            drop(lister);
            eprintln!("dirlist: error writing output: {}", e);
            process::exit(1);
        }
    }
}
