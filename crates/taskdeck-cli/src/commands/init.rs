use anyhow::{Context, Result};
use std::env;
use taskdeck_store::Workspace;

pub fn run() -> Result<()> {
    let cwd = env::current_dir().context("failed to get current directory")?;
    let workspace = Workspace::init(&cwd).context("failed to initialize workspace")?;
    println!(
        "Initialized empty taskdeck workspace in {}",
        workspace.dir().display()
    );
    Ok(())
}
