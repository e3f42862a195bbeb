//! Quote-minimizing string literal formatting.
//!
//! Picks whichever quote character needs fewer backslash escapes, matching
//! the quote-minimization real JS minifiers do, and optionally breaks up
//! `</script`, `<!--`, `-->` so the string can't prematurely close a
//! surrounding inline `<script>` tag.

/// Render `value` as a JS string literal, choosing `'` or `"` by whichever
/// needs fewer escapes.
pub fn format_string(value: &str, inline_safe_strings: bool) -> String {
    let double_quotes = value.matches('"').count();
    let single_quotes = value.matches('\'').count();
    let quote = if double_quotes > single_quotes { '\'' } else { '"' };

    let lower = value.to_ascii_lowercase();
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);

    let mut i = 0;
    while i < value.len() {
        if inline_safe_strings && lower[i..].starts_with("</script") {
            out.push('<');
            out.push('\\');
            i += 1;
            continue;
        }
        if inline_safe_strings && value[i..].starts_with("<!--") {
            out.push_str("<!\\-");
            i += 4;
            continue;
        }
        if inline_safe_strings && value[i..].starts_with("-->") {
            out.push_str("--\\>");
            i += 3;
            continue;
        }
        let c = value[i..].chars().next().expect("i is a char boundary");
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
        i += c.len_utf8();
    }
    out.push(quote);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_double_quotes_when_value_has_more_single_quotes() {
        assert_eq!(format_string("it's", false), "\"it's\"");
    }

    #[test]
    fn prefers_single_quotes_when_value_has_more_double_quotes() {
        assert_eq!(format_string(r#"say "hi" "there""#, false), "'say \"hi\" \"there\"'");
    }

    #[test]
    fn escapes_backslashes_and_newlines() {
        assert_eq!(format_string("a\\b\nc", false), "\"a\\\\b\\nc\"");
    }

    #[test]
    fn breaks_up_closing_script_tag_when_inline_safe() {
        assert_eq!(format_string("</script>", true), "\"<\\/script>\"");
    }

    #[test]
    fn leaves_closing_script_tag_alone_when_not_inline_safe() {
        assert_eq!(format_string("</script>", false), "\"</script>\"");
    }
}
