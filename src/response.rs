//! Response parser — gocode CSV lines into suggestion records.
//!
//! One record per non-blank line, fields `kind,?,text,?,description`.
//! Fields 1 and 3 are daemon-internal and ignored. Missing fields become
//! empty strings, never errors; the daemon's output order is its relevance
//! ranking and is preserved exactly — no sorting, dedup, or filtering.

/// One candidate completion as returned by the daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Opaque category string (`func`, `var`, `type`, ...).
    pub kind: String,
    /// The literal text to insert.
    pub text: String,
    /// Free-form signature / doc string for display.
    pub description: String,
}

/// Parse raw transport lines into ordered suggestion records.
pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Vec<Suggestion> {
    lines
        .iter()
        .filter_map(|line| parse_line(line.as_ref()))
        .collect()
}

fn parse_line(line: &str) -> Option<Suggestion> {
    if line.trim().is_empty() {
        return None;
    }
    // The description is the final field; splitn keeps the commas gocode
    // emits inside signatures like `(n int, err error)`.
    let mut fields = line.splitn(5, ',');
    let kind = fields.next().unwrap_or("").to_string();
    let _ = fields.next();
    let text = fields.next().unwrap_or("").to_string();
    let _ = fields.next();
    let description = fields.next().unwrap_or("").to_string();
    Some(Suggestion {
        kind,
        text,
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_record_with_commas_in_description() {
        let lines = ["func,,Println,,func Println(a ...interface{}) (n int, err error)"];
        let parsed = parse_lines(&lines);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].kind, "func");
        assert_eq!(parsed[0].text, "Println");
        assert_eq!(
            parsed[0].description,
            "func Println(a ...interface{}) (n int, err error)"
        );
    }

    #[test]
    fn missing_trailing_fields_default_empty() {
        let parsed = parse_lines(&["var,,x,,"]);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].kind, "var");
        assert_eq!(parsed[0].text, "x");
        assert_eq!(parsed[0].description, "");
    }

    #[test]
    fn short_line_is_not_an_error() {
        let parsed = parse_lines(&["func"]);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].kind, "func");
        assert_eq!(parsed[0].text, "");
        assert_eq!(parsed[0].description, "");
    }

    #[test]
    fn empty_suggestion_text_is_retained() {
        let parsed = parse_lines(&["keyword,,,,some description"]);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].text, "");
        assert_eq!(parsed[0].description, "some description");
    }

    #[test]
    fn blank_lines_skipped_order_preserved() {
        let lines = ["func,,Print,,", "", "   ", "func,,Println,,", "var,,a,,"];
        let parsed = parse_lines(&lines);
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].text, "Print");
        assert_eq!(parsed[1].text, "Println");
        assert_eq!(parsed[2].text, "a");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let parsed = parse_lines::<&str>(&[]);
        assert!(parsed.is_empty());
    }

    #[test]
    fn length_matches_nonblank_input() {
        let lines = ["a,,b,,c", "", "d,,e,,f", "g", ""];
        let parsed = parse_lines(&lines);
        let nonblank = lines.iter().filter(|l| !l.trim().is_empty()).count();
        assert_eq!(parsed.len(), nonblank);
    }
}
