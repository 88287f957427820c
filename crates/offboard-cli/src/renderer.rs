//! Terminal output for the service's markdown.
//!
//! Rich mode styles the markdown with termimad, colors outcome lines and
//! draws a bar under every progress line. Plain mode prints the markdown
//! unchanged for scripts and tests.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

const BAR_WIDTH: usize = 20;

pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            if line.starts_with('#') {
                println!("\x1b[34m{line}\x1b[0m");
            } else if let Some(rest) = line.strip_prefix("Success: ") {
                println!("\x1b[32mSuccess:\x1b[0m {rest}");
            } else if let Some(rest) = line.strip_prefix("Error: ") {
                println!("\x1b[31mError:\x1b[0m {rest}");
            } else {
                self.skin.print_inline(line);
                println!();
                if let Some(percentage) = progress_percentage(line) {
                    println!("  {}", progress_bar(percentage));
                }
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Percentage from a `Progress: 42% (...)` line, bold or not; estimates
/// (`~50%`) count too.
fn progress_percentage(line: &str) -> Option<u8> {
    let line = line.replace("**", "");
    let (_, value) = line.split_once("Progress:")?;
    let digits: String = value
        .trim_start()
        .trim_start_matches('~')
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse::<u8>().ok().map(|p| p.min(100))
}

fn progress_bar(percentage: u8) -> String {
    let filled = usize::from(percentage) * BAR_WIDTH / 100;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
        assert!(renderer.render("# 1. Plain\n").is_ok());
    }

    #[test]
    fn test_default_is_rich() {
        assert!(TerminalRenderer::default().rich_enabled);
    }

    #[test]
    fn test_progress_percentage() {
        assert_eq!(
            progress_percentage("- **Progress**: 40% (2/5 tasks)"),
            Some(40)
        );
        assert_eq!(
            progress_percentage("- **Progress**: ~50% (estimated from status)"),
            Some(50)
        );
        assert_eq!(progress_percentage("- Progress: 100% (5/5 tasks)"), Some(100));
        assert_eq!(progress_percentage("- **Status**: active / high"), None);
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0), format!("[{}]", "-".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(100), format!("[{}]", "#".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(50).matches('#').count(), BAR_WIDTH / 2);
    }
}
