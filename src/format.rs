//! Terminal rendering of generated plans.
//!
//! Plans come back as lightly structured text: `#`/`##`/`###` headings,
//! `- ` bullets, `1. ` numbered items and `**bold**` spans. Not a full
//! markdown parser.

use colored::Colorize;
use regex::Regex;
use std::sync::LazyLock;

static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.\s+(.*)$").expect("valid numbered-item regex"));

/// Structural role of one plan line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanLine<'a> {
    Blank,
    Heading(usize, &'a str),
    Bullet(&'a str),
    Numbered(&'a str, &'a str),
    Text(&'a str),
}

pub fn classify_line(line: &str) -> PlanLine<'_> {
    let trimmed = line.trim_end();
    if trimmed.trim().is_empty() {
        return PlanLine::Blank;
    }
    for (prefix, level) in [("### ", 3), ("## ", 2), ("# ", 1)] {
        if let Some(rest) = trimmed.strip_prefix(prefix) {
            return PlanLine::Heading(level, rest.trim());
        }
    }
    let indented = trimmed.trim_start();
    if let Some(rest) = indented
        .strip_prefix("- ")
        .or_else(|| indented.strip_prefix("* "))
    {
        return PlanLine::Bullet(rest);
    }
    if let Some(caps) = NUMBERED_ITEM.captures(indented) {
        if let (Some(n), Some(rest)) = (caps.get(1), caps.get(2)) {
            return PlanLine::Numbered(n.as_str(), rest.as_str());
        }
    }
    PlanLine::Text(trimmed)
}

/// Renders a plan for the terminal.
pub fn render_plan(text: &str) -> String {
    let mut output = String::new();
    for line in text.lines() {
        let rendered = match classify_line(line) {
            PlanLine::Blank => String::new(),
            PlanLine::Heading(1, title) => format!("\n{}", title.to_uppercase().bold().green()),
            PlanLine::Heading(2, title) => format!("\n{}", title.bold().cyan()),
            PlanLine::Heading(_, title) => format!("{}", title.bold()),
            PlanLine::Bullet(item) => format!("  • {}", render_inline(item)),
            PlanLine::Numbered(n, item) => format!("  {}. {}", n, render_inline(item)),
            PlanLine::Text(body) => render_inline(body),
        };
        output.push_str(&rendered);
        output.push('\n');
    }

    if output.ends_with('\n') {
        output.pop();
    }
    output
}

/// Handle **bold** spans within a single line.
fn render_inline(line: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();
    let mut i = 0;

    while i < len {
        if i + 1 < len && chars[i] == '*' && chars[i + 1] == '*' {
            if let Some(end) = find_closing(&chars, i + 2, "**") {
                let bold_text: String = chars[i + 2..end].iter().collect();
                result.push_str(&bold_text.bold().to_string());
                i = end + 2;
                continue;
            }
        }

        result.push(chars[i]);
        i += 1;
    }

    result
}

fn find_closing(chars: &[char], start: usize, pattern: &str) -> Option<usize> {
    let pat: Vec<char> = pattern.chars().collect();
    if chars.len() < pat.len() {
        return None;
    }
    (start..=chars.len() - pat.len()).find(|&i| chars[i..i + pat.len()] == pat[..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_headings() {
        assert_eq!(classify_line("# Piano"), PlanLine::Heading(1, "Piano"));
        assert_eq!(classify_line("## Giorno 1"), PlanLine::Heading(2, "Giorno 1"));
        assert_eq!(classify_line("### Colazione "), PlanLine::Heading(3, "Colazione"));
        assert_eq!(classify_line("#hashtag"), PlanLine::Text("#hashtag"));
    }

    #[test]
    fn test_classify_list_items() {
        assert_eq!(classify_line("- Yogurt"), PlanLine::Bullet("Yogurt"));
        assert_eq!(classify_line("  * Noci"), PlanLine::Bullet("Noci"));
        assert_eq!(classify_line("3. Squat"), PlanLine::Numbered("3", "Squat"));
        assert_eq!(classify_line("   "), PlanLine::Blank);
    }

    #[test]
    fn test_render_keeps_plain_text() {
        colored::control::set_override(false);
        let out = render_plan("# Piano\n\nTesto con **grassetto**\n- voce");
        assert_eq!(out, "\nPIANO\n\nTesto con grassetto\n  • voce");
    }

    #[test]
    fn test_unclosed_bold_is_literal() {
        colored::control::set_override(false);
        assert_eq!(render_inline("a **b"), "a **b");
        assert_eq!(render_inline("*"), "*");
    }
}
