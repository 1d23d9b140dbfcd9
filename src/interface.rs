use camino::Utf8PathBuf;
use clap::Parser;
use clap::Subcommand;

use crate::digest::Digest;

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Create an empty repository
    Init,

    /// Compute the id of a file's content, optionally storing it as a blob
    HashObject {
        /// Actually write the object into the database
        #[arg(short)]
        write: bool,

        #[arg(value_name = "file")]
        path: Utf8PathBuf,
    },

    #[command(subcommand)]
    CatFile(CatFile),

    /// List the contents of a tree object
    LsTree {
        /// List only file names
        #[arg(long)]
        name_only: bool,

        #[arg(value_name = "tree")]
        tree: Digest,
    },

    /// Snapshot the working directory as a tree object
    WriteTree,

    /// Create a commit object from a tree
    CommitTree {
        #[arg(value_name = "tree")]
        tree: Digest,

        /// A parent commit, may be given more than once
        #[arg(short, value_name = "parent")]
        parent: Vec<Digest>,

        #[arg(short, long, env = "CAIRN_COMMIT_MESSAGE")]
        message: String,
    },
}

#[derive(Clone, Debug, Subcommand)]
pub enum CatFile {
    /// Exit with status `ExitCode::SUCCESS` if `object` exists and is a valid object. If
    /// `object` is of an invalid format, exit with status `ExitCode::FAILURE`, and print an
    /// error to stderr.
    #[command(short_flag = 'e')]
    Exists {
        #[arg(value_name = "object")]
        object: Digest,
    },

    /// Pretty-print the contents of `object` based on its type
    #[command(short_flag = 'p')]
    PrettyPrint {
        #[arg(value_name = "object")]
        object: Digest,
    },

    /// Print the type of `object` to stdout
    #[command(short_flag = 't')]
    Type {
        #[arg(value_name = "object")]
        object: Digest,
    },

    /// Print the size of `object` to stdout
    #[command(short_flag = 's')]
    Size {
        #[arg(value_name = "object")]
        object: Digest,
    },

    /// Write the raw content of the blob `object` to stdout. Fails if `object` is not a blob.
    Blob {
        #[arg(value_name = "object")]
        object: Digest,
    },
}

#[derive(Debug, Parser)]
#[command(version, about = "A content-addressed object store")]
pub struct Opt {
    #[command(subcommand)]
    pub command: Command,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The repository directory to use instead of the current one.
    #[arg(short = 'C', global = true)]
    pub path: Option<Utf8PathBuf>,

    /// zlib level used for new objects, 0 (none) to 9 (best)
    #[arg(
        long,
        global = true,
        env = "CAIRN_COMPRESSION_LEVEL",
        default_value_t = 6,
        value_parser = clap::value_parser!(u32).range(0..=9)
    )]
    pub compression_level: u32,
}
