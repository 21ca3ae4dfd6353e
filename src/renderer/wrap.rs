//! Greedy word wrap driven by an arbitrary width function.
//!
//! Text is cut into tokens right after each break character, so a token
//! keeps its trailing delimiter and the next token keeps any leading space.
//! Joining the returned lines with no separator gives back the input.

/// Split `text` after every occurrence of a break character.
pub(crate) fn tokenize<'a>(text: &'a str, break_chars: &[char]) -> Vec<&'a str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if break_chars.contains(&c) {
            let end = i + c.len_utf8();
            tokens.push(&text[start..end]);
            start = end;
        }
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

/// Wrap `text` into lines no wider than `max_width`.
///
/// `start_offset` is already-used width on the first line only. A token
/// that alone is wider than `max_width` gets a line to itself, unsplit. If
/// the first token fits on a fresh line but not after `start_offset`, the
/// first line comes back empty. The result always has at least one line.
pub fn wrap<F>(
    text: &str,
    max_width: f64,
    start_offset: f64,
    break_chars: &[char],
    width: F,
) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut offset = start_offset;

    for token in tokenize(text, break_chars) {
        let candidate = format!("{current}{token}");
        if offset + width(&candidate) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        } else if offset > 0.0 && width(token) <= max_width {
            // Nothing fits after the offset; leave the first line empty
            lines.push(String::new());
        }
        offset = 0.0;

        if width(token) <= max_width {
            current.push_str(token);
        } else {
            lines.push(token.to_string());
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One unit per character.
    fn chars(s: &str) -> f64 {
        s.chars().count() as f64
    }

    #[test]
    fn tokens_keep_delimiters() {
        assert_eq!(tokenize("A, B, C", &[',']), vec!["A,", " B,", " C"]);
        assert_eq!(tokenize("A,", &[',']), vec!["A,"]);
        assert!(tokenize("", &[',']).is_empty());
    }

    #[test]
    fn short_text_is_one_line() {
        assert_eq!(wrap("Forward 4", 20.0, 0.0, &[','], chars), vec!["Forward 4"]);
    }

    #[test]
    fn empty_text_yields_one_empty_line() {
        assert_eq!(wrap("", 20.0, 0.0, &[','], chars), vec![""]);
    }

    #[test]
    fn breaks_at_delimiters() {
        let lines = wrap("Left 2, Forward 2, Right 8", 12.0, 0.0, &[','], chars);
        assert_eq!(lines, vec!["Left 2,", " Forward 2,", " Right 8"]);
    }

    #[test]
    fn boundary_is_inclusive() {
        // "abc," + " de" is exactly 7 wide
        assert_eq!(wrap("abc, de", 7.0, 0.0, &[','], chars), vec!["abc, de"]);
        assert_eq!(wrap("abc, de", 6.0, 0.0, &[','], chars), vec!["abc,", " de"]);
    }

    #[test]
    fn offset_applies_to_first_line_only() {
        let lines = wrap("aa, bb, cc", 8.0, 4.0, &[','], chars);
        // First line has 4 units left: only "aa," fits
        assert_eq!(lines, vec!["aa,", " bb, cc"]);
    }

    #[test]
    fn first_line_left_empty_when_offset_leaves_no_room() {
        let lines = wrap("abcdef, g", 8.0, 5.0, &[','], chars);
        assert_eq!(lines, vec!["", "abcdef,", " g"]);
    }

    #[test]
    fn oversize_token_gets_own_line() {
        let lines = wrap("a, verylongtoken, b", 5.0, 0.0, &[','], chars);
        assert_eq!(lines, vec!["a,", " verylongtoken,", " b"]);
    }

    #[test]
    fn oversize_first_token_with_offset_does_not_loop() {
        let lines = wrap("verylongtoken", 5.0, 3.0, &[','], chars);
        assert_eq!(lines, vec!["verylongtoken"]);
    }

    #[test]
    fn width_bound_holds_except_for_oversize_tokens() {
        let text = "Forward 8, Left 4, Mark Time 4, Backward 16, Halt 2, Right Slide 8";
        for max in [6.0, 10.0, 14.0, 25.0, 80.0] {
            let lines = wrap(text, max, 0.0, &[','], chars);
            for line in &lines {
                let single_token = tokenize(line, &[',']).len() == 1;
                assert!(chars(line) <= max || single_token, "{line:?} exceeds {max}");
            }
        }
    }

    #[test]
    fn lines_reconstruct_input() {
        let text = "Forward 8, Left 4, Mark Time 4, Backward 16, Halt 2";
        for (max, offset) in [(5.0, 0.0), (12.0, 3.0), (20.0, 19.0), (200.0, 0.0)] {
            let lines = wrap(text, max, offset, &[','], chars);
            assert_eq!(lines.concat(), text);
        }
    }
}
