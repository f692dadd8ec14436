use super::open_store;
use anyhow::{bail, Result};
use taskdeck_store::Theme;

pub fn run(value: Option<String>, json: bool) -> Result<()> {
    let mut store = open_store()?;

    let theme = match value.as_deref() {
        None => store.theme(),
        Some("toggle") => store.toggle_theme(),
        Some(other) => match Theme::parse(other) {
            Some(theme) => {
                store.set_theme(theme);
                theme
            }
            None => bail!("unknown theme '{}' (expected light, dark, or toggle)", other),
        },
    };

    if json {
        println!("{}", serde_json::json!({ "theme": theme.as_str() }));
    } else {
        println!("{}", theme);
    }
    Ok(())
}
