use anyhow::Result;

use crate::app::App;
use crate::render::terminal::render_record;
use crate::OutputFormat;

pub fn run(
    app: &App,
    queries: &[String],
    case_sensitive: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let matches = app.store.recall_all(queries, case_sensitive);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "queries": queries,
                "total": matches.len(),
                "matches": matches,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            // Report queries that found nothing on their own
            for query in queries {
                if app.store.recall(query, case_sensitive).is_empty() {
                    println!("No mnemonics found containing '{}'.", query);
                }
            }

            for record in &matches {
                println!("{}\n", render_record(record, use_color));
            }

            println!("{} distinct matches", matches.len());
        }
    }

    Ok(())
}
