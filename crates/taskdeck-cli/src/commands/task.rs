use super::{format_task, open_store, resolve, today};
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use taskdeck_core::Priority;

pub fn add(text: String, priority: String, due: Option<String>, json: bool) -> Result<()> {
    let mut store = open_store()?;

    let priority: Priority = priority.parse()?;
    let due_date = due
        .map(|d| {
            NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d")
                .with_context(|| format!("invalid due date '{}': expected YYYY-MM-DD", d))
        })
        .transpose()?;

    let task = store.add(&text, priority, due_date)?;
    if json {
        println!("{}", serde_json::to_string_pretty(task)?);
    } else {
        println!("Added {}", format_task(task, today()));
    }
    Ok(())
}

pub fn toggle(id: String) -> Result<()> {
    let mut store = open_store()?;
    let id = resolve(&store, &id)?;
    if !store.toggle_completed(&id) {
        bail!("no task matches '{}'", id);
    }
    if let Some(task) = store.get(&id) {
        let verb = if task.completed { "Completed" } else { "Reopened" };
        println!("{} {}: {}", verb, task.id.short(), task.text);
    }
    Ok(())
}

pub fn remove(id: String) -> Result<()> {
    let mut store = open_store()?;
    let id = resolve(&store, &id)?;
    if !store.remove(&id) {
        bail!("no task matches '{}'", id);
    }
    println!("Removed {}", id.short());
    Ok(())
}

pub fn clear_completed() -> Result<()> {
    let mut store = open_store()?;
    let removed = store.clear_completed();
    match removed {
        1 => println!("Removed 1 completed task"),
        n => println!("Removed {} completed tasks", n),
    }
    Ok(())
}
