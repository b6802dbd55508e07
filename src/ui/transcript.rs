//! Turns the HTML carried by transcript messages into terminal lines.
//!
//! Understands the tags the markdown renderer emits (`br`, `ul`, `li`,
//! `strong`) plus `b`, and the entities `escape_html` produces. Any other
//! tag is shown as literal text.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

const BULLET: &str = "  • ";

const ENTITIES: [(&str, char); 6] = [
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#39;", '\''),
    ("&nbsp;", '\u{a0}'),
];

pub fn html_to_lines(html: &str, base: Style) -> Vec<Line<'static>> {
    let mut builder = LineBuilder::new(base);
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        builder.push_text(&rest[..start]);
        let tail = &rest[start..];
        match tail.find('>') {
            Some(end) => {
                if !builder.apply_tag(&tail[1..end]) {
                    builder.push_literal(&tail[..=end]);
                }
                rest = &tail[end + 1..];
            }
            None => {
                builder.push_literal(tail);
                rest = "";
            }
        }
    }
    builder.push_text(rest);
    builder.finish()
}

pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(i) = rest.find('&') {
        out.push_str(&rest[..i]);
        let tail = &rest[i..];
        match ENTITIES.iter().find(|(name, _)| tail.starts_with(name)) {
            Some((name, c)) => {
                out.push(*c);
                rest = &tail[name.len()..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

struct LineBuilder {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    bold: bool,
    base: Style,
}

impl LineBuilder {
    fn new(base: Style) -> Self {
        Self {
            lines: Vec::new(),
            current: Vec::new(),
            bold: false,
            base,
        }
    }

    fn style(&self) -> Style {
        if self.bold {
            self.base.add_modifier(Modifier::BOLD)
        } else {
            self.base
        }
    }

    fn push_text(&mut self, text: &str) {
        if !text.is_empty() {
            self.push_literal(&decode_entities(text));
        }
    }

    fn push_literal(&mut self, text: &str) {
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                self.break_line();
            }
            if !part.is_empty() {
                self.current.push(Span::styled(part.to_string(), self.style()));
            }
        }
    }

    fn break_line(&mut self) {
        self.lines.push(Line::from(std::mem::take(&mut self.current)));
    }

    fn end_block(&mut self) {
        if !self.current.is_empty() {
            self.break_line();
        }
    }

    /// Returns false for tags this view does not understand.
    fn apply_tag(&mut self, tag: &str) -> bool {
        let name = tag
            .trim()
            .trim_end_matches('/')
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();

        match name.as_str() {
            "br" => self.break_line(),
            "ul" | "/ul" | "/li" => self.end_block(),
            "li" => {
                self.end_block();
                self.current.push(Span::styled(BULLET, self.base));
            }
            "strong" | "b" => self.bold = true,
            "/strong" | "/b" => self.bold = false,
            _ => return false,
        }
        true
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.end_block();
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn strong_is_bold_span() {
        let lines = html_to_lines("Hello <strong>world</strong>", Style::default());
        assert_eq!(plain(&lines), vec!["Hello world"]);
        let world = &lines[0].spans[1];
        assert!(world.style.add_modifier.contains(Modifier::BOLD));
        assert!(!lines[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn list_items_get_bullets() {
        let lines = html_to_lines(
            "Hi<br><ul><li>a</li><li>b</li></ul>bye",
            Style::default(),
        );
        assert_eq!(plain(&lines), vec!["Hi", "  • a", "  • b", "bye"]);
    }

    #[test]
    fn entities_are_decoded() {
        let lines = html_to_lines("&lt;b&gt; &amp; &quot;q&quot; &copy;", Style::default());
        assert_eq!(plain(&lines), vec!["<b> & \"q\" &copy;"]);
    }

    #[test]
    fn unknown_tags_stay_literal() {
        let lines = html_to_lines("<em>x</em> and 1 < 2", Style::default());
        assert_eq!(plain(&lines), vec!["<em>x</em> and 1 < 2"]);
    }

    #[test]
    fn break_variants_are_recognized() {
        let lines = html_to_lines("a<br/>b<BR>c", Style::default());
        assert_eq!(plain(&lines), vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_html_has_no_lines() {
        assert!(html_to_lines("", Style::default()).is_empty());
    }
}
