#[cfg(test)]
mod test;

mod cat_file;
mod compress;
mod digest;
mod error;
mod filemode;
mod interface;
mod repo;
mod storable;
mod util;

use std::process::ExitCode;

use bstr::ByteSlice;
use color_eyre::eyre::Context;
pub use color_eyre::Result;

use crate::interface::*;
use crate::repo::Repo;

use camino::Utf8PathBuf;
use clap::Parser;
use flate2::Compression;
use once_cell::sync::Lazy;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

static ARGS: Lazy<Opt> = Lazy::new(Opt::parse);

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    Lazy::force(&ARGS);

    let default_level = if ARGS.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let path = match ARGS.path {
        Some(ref path) => path
            .canonicalize_utf8()
            .wrap_err(format!("Directory not found: '{path}'"))?,
        None => Utf8PathBuf::try_from(std::env::current_dir()?)?.canonicalize_utf8()?,
    };

    let compression = Compression::new(ARGS.compression_level);

    if matches!(ARGS.command, Command::Init) {
        Repo::init(&path)?;
        let repo = Repo::open(path, compression)?;
        println!("Initialized empty repository in {}", repo.git_dir());
        return Ok(ExitCode::SUCCESS);
    }

    let repo = Repo::open(path, compression)?;

    match &ARGS.command {
        Command::Init => unreachable!(),
        Command::HashObject { write, path } => {
            let oid = repo
                .hash_file(path, *write)
                .wrap_err_with(|| format!("Failed to hash '{path}'"))?;
            println!("{oid}");
        }
        Command::CatFile(args) => return cat_file::handle(&repo, args),
        Command::LsTree { name_only, tree } => {
            if *name_only {
                for name in repo.list_tree_names(tree)? {
                    println!("{}", name.to_str_lossy());
                }
            } else {
                repo.read_tree(tree)?.pretty_print()?;
            }
        }
        Command::WriteTree => {
            println!("{}", repo.write_tree()?);
        }
        Command::CommitTree {
            tree,
            parent,
            message,
        } => {
            let oid = repo.commit_tree(*tree, parent.clone(), message)?;
            println!("{oid}");
        }
    }

    Ok(ExitCode::SUCCESS)
}
