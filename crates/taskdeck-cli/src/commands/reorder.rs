use super::{open_store, resolve};
use anyhow::Result;
use taskdeck_store::DragReorderController;

pub fn run(id: String, before: String) -> Result<()> {
    let mut store = open_store()?;
    let source = resolve(&store, &id)?;
    let target = resolve(&store, &before)?;

    let mut drag = DragReorderController::new();
    drag.begin_drag(source.clone());
    if drag.drop_on(&mut store, &target) {
        println!("Moved {} before {}", source.short(), target.short());
    } else {
        println!("Nothing to move");
    }
    Ok(())
}
