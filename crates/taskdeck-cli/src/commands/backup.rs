use super::open_store;
use anyhow::{Context, Result};
use std::fs;
use std::io;

pub fn backup(output: Option<String>) -> Result<()> {
    let store = open_store()?;
    let json = store.backup()?;
    match output {
        Some(path) => {
            fs::write(&path, format!("{}\n", json))
                .with_context(|| format!("failed to write backup to {}", path))?;
            eprintln!("Backed up {} tasks to {}", store.tasks().len(), path);
        }
        None => println!("{}", json),
    }
    Ok(())
}

pub fn restore(path: String) -> Result<()> {
    let text = if path == "-" {
        io::read_to_string(io::stdin()).context("failed to read backup from stdin")?
    } else {
        fs::read_to_string(&path).with_context(|| format!("failed to read {}", path))?
    };

    let mut store = open_store()?;
    let count = store.restore(&text).context("could not restore backup")?;
    println!("Restored {} tasks", count);
    Ok(())
}
