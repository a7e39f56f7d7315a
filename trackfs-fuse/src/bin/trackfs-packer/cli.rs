use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
pub struct Cli {
    /// Floppy image
    #[arg(long, short)]
    pub image: PathBuf,

    /// Cylinders in the image
    #[arg(long, default_value_t = trackfs_fuse::DEFAULT_CYLINDERS)]
    pub cylinders: usize,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a blank image with an empty file record
    Format,

    /// Copy every file in a host directory into the image
    Pack {
        /// Host source directory
        #[arg(long, short)]
        source: PathBuf,
    },

    /// Create a file from the given words, joined by spaces
    Create {
        name: String,
        #[arg(trailing_var_arg = true)]
        words: Vec<String>,
    },

    /// Print the content of a file
    Print { name: String },

    /// List file names
    List,
}
