use super::{format_task, open_store, today};
use anyhow::{anyhow, Result};
use taskdeck_core::Task;
use taskdeck_store::Filter;

pub fn run(filter: String, search: String, json: bool) -> Result<()> {
    let mut store = open_store()?;
    let filter: Filter = filter.parse().map_err(|e: String| anyhow!(e))?;
    store.set_filter(filter);
    store.set_search(search);

    if json {
        let visible: Vec<&Task> = store.visible_tasks().collect();
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    let today = today();
    let mut shown = 0;
    for task in store.visible_tasks() {
        println!("{}", format_task(task, today));
        shown += 1;
    }
    if shown == 0 {
        if store.tasks().is_empty() {
            println!("No tasks yet");
        } else {
            println!("No {} tasks match", store.view().filter);
        }
    }
    Ok(())
}

pub fn stats(json: bool) -> Result<()> {
    let store = open_store()?;
    let counts = store.counts();
    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
    } else {
        println!(
            "{} total, {} active, {} completed",
            counts.total, counts.active, counts.completed
        );
    }
    Ok(())
}
