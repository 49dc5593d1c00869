use anyhow::Result;

use crate::app::App;
use crate::render::terminal::render_record_table;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let records = app.store.records();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(records)?);
        }
        OutputFormat::Plain => {
            if records.is_empty() {
                println!("No mnemonics yet. Import some with `mnemo import <file>`.");
                return Ok(());
            }

            let rows: Vec<_> = records.iter().collect();
            println!("{}", render_record_table(&rows));
            println!("\n{} mnemonics total", records.len());
        }
    }

    Ok(())
}
