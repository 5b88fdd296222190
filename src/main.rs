#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use plapak::pak;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "plapak", version, about = "Asset compiler and .pla archive packer")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compile one asset into a compiled asset file.
    Compile {
        /// Key used to encipher shader sources.
        #[arg(long)]
        encryption_key: String,
        /// Absolute directory of the assets.
        #[arg(long)]
        base: PathBuf,
        /// Path of the asset, relative to --base. Becomes the asset's name.
        #[arg(long)]
        asset: String,
        /// Destination compiled asset file.
        #[arg(long)]
        dst: PathBuf,
        /// Use maximum compression.
        #[arg(long, default_value_t = false)]
        optimize: bool,
    },

    /// Compile every file under a directory into <output>/<name>.asset.
    CompileDir {
        #[arg(long)]
        encryption_key: String,
        #[arg(long)]
        base: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Skip names containing this substring (repeatable).
        #[arg(long)]
        exclude: Vec<String>,
        #[arg(long, default_value_t = false)]
        optimize: bool,
    },

    /// Pack compiled asset files, in the given order, into one archive.
    Pack {
        /// Key used to encipher entry names.
        #[arg(long)]
        encryption_key: String,
        /// Destination archive.
        #[arg(long)]
        dst: PathBuf,
        /// Accepted for compatibility; packing copies compiled payloads as they are.
        #[arg(long, default_value_t = false)]
        optimize: bool,
        /// Compiled asset files.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// List entries in an archive.
    List {
        #[arg(long)]
        encryption_key: String,
        #[arg(long)]
        archive: PathBuf,
        /// Print version, compressed size and kind too.
        #[arg(long, default_value_t = false)]
        verbose: bool,
    },

    /// Extract the original files from an archive.
    Extract {
        #[arg(long)]
        encryption_key: String,
        #[arg(long)]
        archive: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Only extract entries that contain this substring (repeatable).
        #[arg(long)]
        filter: Vec<String>,
    },

    /// Inflate and decode every entry of an archive.
    Verify {
        #[arg(long)]
        encryption_key: String,
        #[arg(long)]
        archive: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let res = match cli.cmd {
        Command::Compile {
            encryption_key,
            base,
            asset,
            dst,
            optimize,
        } => pak::compile(&encryption_key, &base, &asset, &dst, optimize),
        Command::CompileDir {
            encryption_key,
            base,
            output,
            exclude,
            optimize,
        } => pak::compile_dir(&encryption_key, &base, &output, &exclude, optimize).map(|_| ()),
        Command::Pack {
            encryption_key,
            dst,
            optimize,
            files,
        } => pak::pack(&encryption_key, &dst, optimize, &files).map(|_| ()),
        Command::List {
            encryption_key,
            archive,
            verbose,
        } => pak::list(&archive, &encryption_key, verbose),
        Command::Extract {
            encryption_key,
            archive,
            output,
            filter,
        } => pak::extract(&archive, &encryption_key, &output, &filter).map(|_| ()),
        Command::Verify {
            encryption_key,
            archive,
        } => pak::verify(&archive, &encryption_key).map(|_| ()),
    };

    if let Err(e) = res {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
