use std::{ffi::OsStr, io, path::Path, process::Command};

use chrono::Local;

use crate::error::{PentadError, Result};

/// Stages, commits, and pushes the history file with git. Invoked
/// explicitly by the user; a failure is reported and never touches local
/// state.
pub fn sync_history(history_path: &Path) -> Result<()> {
    let repo_dir = history_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = history_path
        .file_name()
        .ok_or_else(|| PentadError::Sync("history path has no file name".to_string()))?;

    run_git(repo_dir, &[OsStr::new("add"), file_name])?;

    let message = format!(
        "Update habit data for {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    run_git(
        repo_dir,
        &[OsStr::new("commit"), OsStr::new("-m"), OsStr::new(&message)],
    )?;

    run_git(repo_dir, &[OsStr::new("push")])?;

    println!("Synced habit data to the remote repository.");
    Ok(())
}

fn run_git(dir: &Path, args: &[&OsStr]) -> Result<()> {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => {
                PentadError::Sync("git is not installed or not on PATH".to_string())
            }
            _ => PentadError::Sync(e.to_string()),
        })?;

    if status.success() {
        Ok(())
    } else {
        let subcommand = args
            .first()
            .map(|a| a.to_string_lossy().into_owned())
            .unwrap_or_default();
        Err(PentadError::Sync(format!(
            "git {} exited with {}",
            subcommand, status
        )))
    }
}
