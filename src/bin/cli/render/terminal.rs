use chrono::Local;
use mnemo_lib::mnemonics::{MnemonicRecord, StoreStats};

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap `text` in `style` when colors are on
pub fn paint(text: &str, style: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", style, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Render one record as a recall card
pub fn render_record(record: &MnemonicRecord, use_color: bool) -> String {
    let mut lines = Vec::new();

    let heading = if record.transliteration.is_empty() {
        record.word.clone()
    } else {
        format!("{} ({})", record.word, record.transliteration)
    };
    lines.push(format!(
        "{} {}",
        paint(&heading, Color::BOLD, use_color),
        paint(&format!("- {}", record.meaning), Color::CYAN, use_color)
    ));

    for (label, value) in [
        ("Mnemonic", &record.mnemonic),
        ("Visual", &record.visual),
        ("Notes", &record.notes),
    ] {
        if value.trim().is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(paint(label, Color::DIM, use_color));
        lines.extend(wrap_lines(value, "  ", 80));
    }

    if let Some(added) = record.created_at_utc() {
        lines.push(String::new());
        let added = added.with_timezone(&Local).format("Added %Y-%m-%d %H:%M").to_string();
        lines.push(paint(&added, Color::GRAY, use_color));
    }

    lines.join("\n")
}

/// Render records as an aligned table
pub fn render_record_table(records: &[&MnemonicRecord]) -> String {
    let word_w = column_width(records.iter().map(|r| r.word.as_str()), 4, 20);
    let translit_w = column_width(records.iter().map(|r| r.transliteration.as_str()), 15, 20);
    let meaning_w = column_width(records.iter().map(|r| r.meaning.as_str()), 7, 30);

    let mut lines = vec![
        format!(
            "{:<word_w$} {:<translit_w$} {:<meaning_w$} {}",
            "Word", "Transliteration", "Meaning", "Added",
        ),
        format!(
            "{} {} {} {}",
            "\u{2500}".repeat(word_w),
            "\u{2500}".repeat(translit_w),
            "\u{2500}".repeat(meaning_w),
            "\u{2500}".repeat(10)
        ),
    ];

    for r in records {
        let added = r
            .created_at_utc()
            .map(|d| d.with_timezone(&Local).format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!(
            "{:<word_w$} {:<translit_w$} {:<meaning_w$} {}",
            truncate(&r.word, word_w),
            truncate(&r.transliteration, translit_w),
            truncate(&r.meaning, meaning_w),
            added
        ));
    }

    lines.join("\n")
}

/// Render the statistics report
pub fn render_stats(stats: &StoreStats, use_color: bool) -> String {
    let most_recent = stats
        .most_recent_session
        .map(|d| d.with_timezone(&Local).format("%B %d, %Y at %I:%M:%S %p").to_string())
        .unwrap_or_else(|| "N/A".to_string());

    let rows = [
        ("Total mnemonics", stats.total_records.to_string()),
        ("Distinct words", stats.distinct_words.to_string()),
        ("Distinct meanings", stats.distinct_meanings.to_string()),
        ("Missing notes", stats.missing_notes.to_string()),
        ("Study sessions", stats.session_count.to_string()),
        ("Most recent session", most_recent),
        ("Days between sessions", metric(stats.mean_session_gap_days, "days")),
        ("Session spread (std)", metric(stats.session_spread_days, "days")),
        ("Words per day", metric(stats.records_per_day, "words/day")),
        ("Words per session", metric(stats.records_per_session, "words/session")),
        ("Words per week", metric(stats.records_per_week, "words/week")),
    ];

    let label_w = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(label, value)| {
            format!(
                "{} {}",
                paint(&format!("{:<label_w$}", label), Color::BOLD, use_color),
                value
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn metric(value: Option<f64>, unit: &str) -> String {
    value
        .map(|v| format!("{:.2} {}", v, unit))
        .unwrap_or_else(|| "N/A".to_string())
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: usize, max: usize) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(header, max.max(header))
}

/// Shorten to `width` characters, marking the cut with "..."
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Simple word-wrapping for terminal output
fn wrap_lines(text: &str, prefix: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let effective_width = max_width.saturating_sub(prefix.len());

    for line in text.lines() {
        if line.chars().count() <= effective_width {
            lines.push(format!("{}{}", prefix, line));
            continue;
        }

        let mut current_line = String::new();
        for word in line.split_whitespace() {
            if current_line.is_empty() {
                current_line = word.to_string();
            } else if current_line.chars().count() + 1 + word.chars().count() <= effective_width {
                current_line.push(' ');
                current_line.push_str(word);
            } else {
                lines.push(format!("{}{}", prefix, current_line));
                current_line = word.to_string();
            }
        }
        if !current_line.is_empty() {
            lines.push(format!("{}{}", prefix, current_line));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("안녕하세요", 10), "안녕하세요");
        assert_eq!(truncate("감사합니다감사합니다", 5), "감사...");
    }

    #[test]
    fn test_wrap_lines() {
        let lines = wrap_lines("one two three four", "  ", 12);
        assert_eq!(lines, vec!["  one two", "  three four"]);
    }

    #[test]
    fn test_render_record_skips_empty_fields() {
        let record = MnemonicRecord::new("물", "water").with_mnemonic("Mull it over");
        let text = render_record(&record, false);

        assert!(text.starts_with("물 - water"));
        assert!(text.contains("Mull it over"));
        assert!(!text.contains("Notes"));
    }

    #[test]
    fn test_render_stats_marks_undefined() {
        let text = render_stats(&StoreStats::default(), false);
        assert!(text.contains("Most recent session"));
        assert!(text.contains("N/A"));
    }
}
