use regex::Regex;
use scraper::ElementRef;

pub fn extract_text(node: ElementRef) -> String {
    node.text().collect::<String>()
}

/// Drop everything but ASCII digits, e.g. "12 kanceláří" -> "12",
/// "1 340 m²" -> "1340". Returns an empty string when no digits remain.
pub fn strip_non_digits(raw: &str) -> String {
    let pattern = Regex::new(r"[^0-9]").unwrap();
    pattern.replace_all(raw, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_units_and_grouping() {
        assert_eq!(strip_non_digits("12 kanceláří"), "12");
        assert_eq!(strip_non_digits("1 340 m²"), "1340");
        assert_eq!(strip_non_digits("0"), "0");
    }

    #[test]
    fn no_digits_leaves_empty() {
        assert_eq!(strip_non_digits("m²"), "");
    }
}
