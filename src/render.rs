//! Text Rendering
//!
//! Number and text formatting shared by the dashboard cards and the terminal
//! transcript.

use crate::chat::{ChatMessage, Sender};

/// Split reply text into display lines.
///
/// Backends sometimes send an escaped `\n` instead of a real newline; both
/// break the line.
pub fn format_text(text: &str) -> Vec<String> {
    text.replace("\\n", "\n")
        .split('\n')
        .map(str::to_string)
        .collect()
}

/// Plain number display: integral values without a fraction, others in the
/// shortest round-tripping form.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Grouped display with thousands separators and at most three fraction digits
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return format!("{}", value);
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let frac = frac_part.trim_end_matches('0');
    let mut out = String::new();
    if value < 0.0 && (grouped != "0" || !frac.is_empty()) {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// `$1.23`
pub fn format_currency(value: f64) -> String {
    format!("${:.2}", value)
}

/// Ratio in [0, 1] as `45.0%`
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Horizontal bar filled in proportion to `ratio`
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
    let filled = (ratio * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// One transcript entry as terminal text
pub fn render_message(message: &ChatMessage) -> String {
    let label = match (message.sender, message.is_error) {
        (Sender::User, _) => "You",
        (Sender::Bot, false) => "Assistant",
        (Sender::Bot, true) => "Assistant (error)",
    };

    let mut out = format!("{} [{}]:", label, message.created_at.format("%H:%M:%S"));
    for line in format_text(&message.text) {
        out.push_str("\n  ");
        out.push_str(&line);
    }
    if message.has_graph() {
        out.push_str("\n  [graph attached]");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_text_handles_escaped_newlines() {
        assert_eq!(format_text("a\\nb\nc"), vec!["a", "b", "c"]);
        assert_eq!(format_text("single"), vec!["single"]);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(999.0), "999");
        assert_eq!(format_grouped(1234.0), "1,234");
        assert_eq!(format_grouped(1234567.0), "1,234,567");
        assert_eq!(format_grouped(1234.5678), "1,234.568");
        assert_eq!(format_grouped(-98765.25), "-98,765.25");
    }

    #[test]
    fn test_currency_and_percent() {
        assert_eq!(format_currency(2.0), "$2.00");
        assert_eq!(format_currency(1.234), "$1.23");
        assert_eq!(format_percent(0.456), "45.6%");
        assert_eq!(format_percent(0.0), "0.0%");
    }

    #[test]
    fn test_progress_bar_clamps() {
        assert_eq!(progress_bar(0.5, 4), "[##--]");
        assert_eq!(progress_bar(1.7, 4), "[####]");
        assert_eq!(progress_bar(-1.0, 4), "[----]");
        assert_eq!(progress_bar(f64::NAN, 2), "[--]");
    }

    #[test]
    fn test_render_message_marks_errors_and_graphs() {
        let err = ChatMessage::error(1);
        assert!(render_message(&err).starts_with("Assistant (error)"));

        let bot = ChatMessage::bot(2, "line one\\nline two", Some("UE5H".to_string()));
        let rendered = render_message(&bot);
        assert!(rendered.contains("\n  line one\n  line two"));
        assert!(rendered.ends_with("[graph attached]"));
    }
}
