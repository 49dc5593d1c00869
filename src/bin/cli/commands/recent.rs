use anyhow::Result;

use crate::app::App;
use crate::render::terminal::render_record;
use crate::OutputFormat;

pub fn run(app: &App, n: usize, format: &OutputFormat, use_color: bool) -> Result<()> {
    let recent = app.store.recent(n);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(recent)?);
        }
        OutputFormat::Plain => {
            if recent.is_empty() {
                println!("No mnemonics yet.");
                return Ok(());
            }

            for record in recent {
                println!("{}\n", render_record(record, use_color));
            }
        }
    }

    Ok(())
}
