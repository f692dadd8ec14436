use super::{open_store, resolve};
use anyhow::{bail, Result};
use taskdeck_store::{CommitOutcome, InlineEditController};

pub fn run(id: String, text: String) -> Result<()> {
    let mut store = open_store()?;
    let id = resolve(&store, &id)?;

    let mut editor = InlineEditController::new();
    if !editor.start_edit(&mut store, &id)? {
        bail!("no task matches '{}'", id);
    }
    editor.set_draft(text);

    match editor.commit(&mut store)? {
        CommitOutcome::Saved => {
            if let Some(task) = store.get(&id) {
                println!("Updated {}: {}", task.id.short(), task.text);
            }
        }
        CommitOutcome::Discarded => println!("Empty text; {} left unchanged", id.short()),
        CommitOutcome::Missing | CommitOutcome::NotEditing => {
            bail!("no task matches '{}'", id)
        }
    }
    Ok(())
}
