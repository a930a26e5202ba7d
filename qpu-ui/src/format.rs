//! Display formatting for dashboard values and chat text.

/// Plain number, integers without a decimal point
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Thousands separators, at most three decimals
pub fn format_grouped(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let text = format!("{:.3}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((&text, ""));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let frac = frac_part.trim_end_matches('0');
    let sign = if rounded < 0.0 { "-" } else { "" };
    if frac.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac)
    }
}

pub fn format_currency(value: f64) -> String {
    format!("${:.2}", value)
}

/// Ratio in [0, 1] as a one-decimal percentage
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Split reply text on real and escaped (`\n` literal) line breaks
pub fn text_lines(text: &str) -> Vec<String> {
    text.replace("\\n", "\n").split('\n').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped() {
        assert_eq!(format_grouped(1234567.0), "1,234,567");
        assert_eq!(format_grouped(4166.6667), "4,166.667");
        assert_eq!(format_grouped(12.5), "12.5");
        assert_eq!(format_grouped(0.0), "0");
    }

    #[test]
    fn test_currency_and_percent() {
        assert_eq!(format_currency(2.0), "$2.00");
        assert_eq!(format_percent(0.456), "45.6%");
    }

    #[test]
    fn test_text_lines() {
        assert_eq!(text_lines("a\\nb\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_number() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(41.5), "41.5");
    }
}
