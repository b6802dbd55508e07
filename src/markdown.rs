use std::sync::LazyLock;

use regex::Regex;

/// Marker the renderer uses for line breaks, both while splitting and in its output.
pub const LINE_BREAK: &str = "<br>";

/// Whitespace as browsers define it for `trim()` and `\s`: unlike Rust's
/// `char::is_whitespace`, it includes U+FEFF and excludes U+0085.
const SPACE_CLASS: &str =
    r"[\t\n\x0B\x0C\r \xA0\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]";

static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\*{SPACE_CLASS}+")).expect("list item pattern is valid")
});

// Bold runs never cross a line terminator.
static BOLD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*([^\n\r\x{2028}\x{2029}]+?)\*\*").expect("bold pattern is valid")
});

fn is_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{b}'
            | '\u{c}'
            | '\r'
            | ' '
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}

fn trim(text: &str) -> &str {
    text.trim_matches(is_space)
}

/// Convert the markdown subset used by bot replies into HTML.
///
/// Recognizes escaped `\n` sequences as line breaks, `* ` bullet lines as a
/// single-level list, and `**bold**` runs. Text outside those constructs is
/// passed through untouched, it is not HTML-escaped.
///
/// Bold conversion runs after list structuring so a bullet's leading `*`
/// is never paired with a bold delimiter.
pub fn render_markdown(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let html = text.replace("\\n", LINE_BREAK);
    let lines: Vec<&str> = html.split(LINE_BREAK).collect();
    let last = lines.len() - 1;

    let mut out = String::with_capacity(html.len() + 16);
    let mut in_list = false;

    for (i, line) in lines.iter().enumerate() {
        let trimmed = trim(line);

        if let Some(marker) = LIST_ITEM.find(trimmed) {
            if !in_list {
                out.push_str("<ul>");
                in_list = true;
            }
            out.push_str("<li>");
            out.push_str(trim(&trimmed[marker.end()..]));
            out.push_str("</li>");
            continue;
        }

        if in_list {
            out.push_str("</ul>");
            in_list = false;
        }

        if !trimmed.is_empty() {
            out.push_str(trimmed);
        } else if i < last {
            out.push_str(LINE_BREAK);
        }
    }

    if in_list {
        out.push_str("</ul>");
    }

    BOLD.replace_all(&out, "<strong>${1}</strong>").into_owned()
}

/// Escape text for insertion as HTML, matching what a DOM `textContent`
/// assignment serializes back to.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_run_becomes_strong() {
        assert_eq!(render_markdown("Hello **world**"), "Hello <strong>world</strong>");
    }

    #[test]
    fn bold_uses_shortest_match() {
        assert_eq!(
            render_markdown("**a** and **b**"),
            "<strong>a</strong> and <strong>b</strong>"
        );
    }

    #[test]
    fn consecutive_bullets_share_one_list() {
        let html = render_markdown(r"* one\n* two");
        assert_eq!(html, "<ul><li>one</li><li>two</li></ul>");
        assert_eq!(html.matches("<ul>").count(), 1);
        assert!(!html.contains(LINE_BREAK));
    }

    #[test]
    fn list_closes_at_first_plain_line() {
        assert_eq!(
            render_markdown(r"Skills:\n* Rust\n* Go\nAsk me more"),
            "Skills:<ul><li>Rust</li><li>Go</li></ul>Ask me more"
        );
    }

    #[test]
    fn separate_runs_get_separate_lists() {
        assert_eq!(
            render_markdown(r"* a\nmiddle\n* b"),
            "<ul><li>a</li></ul>middle<ul><li>b</li></ul>"
        );
    }

    #[test]
    fn bullet_marker_needs_whitespace() {
        assert_eq!(render_markdown("*not a list"), "*not a list");
        assert_eq!(render_markdown("*   "), "*");
    }

    #[test]
    fn bullet_content_is_trimmed() {
        assert_eq!(render_markdown("  *   spaced out   "), "<ul><li>spaced out</li></ul>");
    }

    #[test]
    fn bold_inside_bullet() {
        assert_eq!(
            render_markdown(r"* **Rust** for systems"),
            "<ul><li><strong>Rust</strong> for systems</li></ul>"
        );
    }

    #[test]
    fn byte_order_mark_counts_as_whitespace() {
        assert_eq!(render_markdown("\u{feff}* item"), "<ul><li>item</li></ul>");
        assert_eq!(render_markdown("*\u{feff}item\u{feff}"), "<ul><li>item</li></ul>");
    }

    #[test]
    fn next_line_char_is_not_trimmed() {
        assert_eq!(render_markdown("\u{85}hi"), "\u{85}hi");
    }

    #[test]
    fn bold_does_not_span_line_terminators() {
        assert_eq!(render_markdown("**a\rb**"), "**a\rb**");
        assert_eq!(render_markdown("**a\u{2028}b**"), "**a\u{2028}b**");
        assert_eq!(render_markdown("**a\u{2029}b**"), "**a\u{2029}b**");
    }

    #[test]
    fn empty_middle_line_is_one_break() {
        assert_eq!(render_markdown(r"a\n\nb"), "a<br>b");
    }

    #[test]
    fn leading_empty_lines_each_break() {
        assert_eq!(render_markdown(r"\n\na"), "<br><br>a");
    }

    #[test]
    fn trailing_empty_line_adds_no_break() {
        assert_eq!(render_markdown(r"a\n"), "a");
    }

    #[test]
    fn adjacent_text_lines_are_joined() {
        assert_eq!(render_markdown(r"first\nsecond"), "firstsecond");
    }

    #[test]
    fn real_newlines_are_not_line_markers() {
        assert_eq!(render_markdown("a\nb"), "a\nb");
    }

    #[test]
    fn existing_break_tags_split_lines() {
        assert_eq!(render_markdown("* a<br>* b"), "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn html_passes_through_unescaped() {
        assert_eq!(render_markdown("<em>hi</em>"), "<em>hi</em>");
    }

    #[test]
    fn empty_input_renders_empty() {
        assert_eq!(render_markdown(""), "");
    }

    #[test]
    fn rendering_is_deterministic() {
        let input = r"Hi!\n\n* **one**\n* two\nbye";
        assert_eq!(render_markdown(input), render_markdown(input));
        assert_eq!(
            render_markdown(input),
            "Hi!<br><ul><li><strong>one</strong></li><li>two</li></ul>bye"
        );
    }

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html("<script>alert('x') & \"y\"</script>"),
            "&lt;script&gt;alert('x') &amp; \"y\"&lt;/script&gt;"
        );
    }

    #[test]
    fn escape_html_leaves_plain_text() {
        assert_eq!(escape_html("what do you build?"), "what do you build?");
    }
}
