use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use mnemo_lib::mnemonics::MnemonicRecord;

use crate::app::App;
use crate::render::terminal::{paint, render_record, Color};
use crate::OutputFormat;

/// What the user did at a quiz prompt
#[derive(Debug, PartialEq, Eq)]
enum Ack {
    Reveal,
    Quit,
}

pub fn run(
    app: &App,
    n: usize,
    bias: f64,
    english_first: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let mut rng = rand::thread_rng();
    let picks = app
        .store
        .sample(n, bias, &mut rng)
        .context("Failed to draw a quiz sample")?;

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&picks)?);
        return Ok(());
    }

    if picks.is_empty() {
        println!("No mnemonics to quiz on yet.");
        return Ok(());
    }

    let total = picks.len();
    let mut seen = 0;
    for (i, record) in picks.iter().enumerate() {
        let prompt = prompt_for(record, english_first);
        println!(
            "{} {}",
            paint(&format!("[{}/{}]", i + 1, total), Color::GRAY, use_color),
            paint(prompt, Color::BOLD, use_color)
        );
        print!("{}", paint("(press a key to reveal, q to stop) ", Color::DIM, use_color));
        io::stdout().flush()?;

        if wait_for_ack()? == Ack::Quit {
            println!();
            break;
        }

        println!("\n{}\n", render_record(record, use_color));
        seen += 1;
    }

    println!("Reviewed {} of {} cards.", seen, total);
    Ok(())
}

fn prompt_for(record: &MnemonicRecord, english_first: bool) -> &str {
    if english_first {
        &record.meaning
    } else {
        &record.word
    }
}

fn wait_for_ack() -> Result<Ack> {
    #[cfg(feature = "tui")]
    {
        use std::io::IsTerminal;
        if io::stdin().is_terminal() {
            return wait_for_key();
        }
    }
    wait_for_line(io::stdin().lock())
}

/// Single keypress acknowledgment in raw mode
#[cfg(feature = "tui")]
fn wait_for_key() -> Result<Ack> {
    use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
    use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

    enable_raw_mode()?;
    let result = loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                let ctrl_c = key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL);
                let quit = matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) || ctrl_c;
                break Ok(if quit { Ack::Quit } else { Ack::Reveal });
            }
            Ok(_) => continue,
            Err(e) => break Err(e.into()),
        }
    };
    disable_raw_mode()?;
    result
}

/// Line-based acknowledgment; `q` or end of input stops the quiz
fn wait_for_line<R: BufRead>(mut input: R) -> Result<Ack> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(Ack::Quit);
    }
    if line.trim().eq_ignore_ascii_case("q") {
        Ok(Ack::Quit)
    } else {
        Ok(Ack::Reveal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_for_line() {
        assert_eq!(wait_for_line("\n".as_bytes()).unwrap(), Ack::Reveal);
        assert_eq!(wait_for_line("Q\n".as_bytes()).unwrap(), Ack::Quit);
        assert_eq!(wait_for_line("".as_bytes()).unwrap(), Ack::Quit);
    }

    #[test]
    fn test_prompt_side() {
        let record = MnemonicRecord::new("물", "water");
        assert_eq!(prompt_for(&record, false), "물");
        assert_eq!(prompt_for(&record, true), "water");
    }
}
