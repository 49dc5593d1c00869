use anyhow::Result;

use crate::app::App;
use crate::render::terminal::render_stats;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let stats = app.store.stats();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Plain => {
            println!("{}", render_stats(&stats, use_color));
        }
    }

    Ok(())
}
