use std::io::Write;
use std::process::ExitCode;

use crate::interface::CatFile;
use crate::repo::Repo;
use crate::storable::Storable;
use crate::Result;

pub fn handle(repo: &Repo, args: &CatFile) -> Result<ExitCode> {
    match args {
        CatFile::Exists { object } => {
            if !repo.database.exists(object) {
                eprintln!("Object does not exist: {object:x}");
                return Ok(ExitCode::FAILURE);
            }
            match repo.read_object(object) {
                Ok(_) => Ok(ExitCode::SUCCESS),
                Err(e) => {
                    eprintln!("Object is corrupt: {object:x}: {e}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        CatFile::PrettyPrint { object } => {
            repo.read_object(object)?.pretty_print()?;
            Ok(ExitCode::SUCCESS)
        }
        CatFile::Type { object } => {
            println!("{}", repo.read_object(object)?.kind());
            Ok(ExitCode::SUCCESS)
        }
        CatFile::Size { object } => {
            println!("{}", repo.read_object(object)?.encoded_size());
            Ok(ExitCode::SUCCESS)
        }
        CatFile::Blob { object } => {
            let data = repo.read_blob(object)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&data)?;
            stdout.flush()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
