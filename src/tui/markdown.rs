//! Line-level markdown styling for the summary pane.
//!
//! Not a markdown renderer: headings, bullets, fenced code, `**bold**`,
//! `` `code` `` and `[label](url)` links get styled, everything else passes
//! through as plain text. Input is expected to be sanitized already.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::theme::Palette;

pub fn render_markdown(text: &str, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut in_code_block = false;

    for raw_line in text.lines() {
        if raw_line.trim_start().starts_with("```") {
            in_code_block = !in_code_block;
            continue;
        }

        if in_code_block {
            lines.push(Line::from(Span::styled(
                format!("  {}", raw_line),
                Style::default().fg(palette.accent),
            )));
            continue;
        }

        let trimmed = raw_line.trim_start();
        let heading_level = trimmed.chars().take_while(|c| *c == '#').count();
        if (1..=6).contains(&heading_level) && trimmed[heading_level..].starts_with(' ') {
            let heading = trimmed[heading_level..].trim();
            let mut style = palette.accent();
            if heading_level <= 2 {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            lines.push(Line::from(Span::styled(heading.to_string(), style)));
            continue;
        }

        if let Some(item) = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* ")) {
            let indent = raw_line.len() - trimmed.len();
            let mut spans = vec![Span::raw(format!("{}• ", " ".repeat(indent)))];
            spans.extend(render_inline(item, palette));
            lines.push(Line::from(spans));
            continue;
        }

        lines.push(Line::from(render_inline(raw_line, palette)));
    }

    lines
}

/// Inline formatting for a single line
fn render_inline(text: &str, palette: &Palette) -> Vec<Span<'static>> {
    let base = Style::default().fg(palette.fg);
    let bold = base.add_modifier(Modifier::BOLD);
    let code = Style::default().fg(palette.accent);
    let link = Style::default().fg(palette.accent).add_modifier(Modifier::UNDERLINED);

    let mut spans = Vec::new();
    let mut current = String::new();
    let mut rest = text;

    let flush = |current: &mut String, spans: &mut Vec<Span<'static>>| {
        if !current.is_empty() {
            spans.push(Span::styled(std::mem::take(current), base));
        }
    };

    while let Some(ch) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix("**")
            && let Some(end) = after.find("**")
        {
            flush(&mut current, &mut spans);
            spans.push(Span::styled(after[..end].to_string(), bold));
            rest = &after[end + 2..];
            continue;
        }

        if let Some(after) = rest.strip_prefix('`')
            && let Some(end) = after.find('`')
        {
            flush(&mut current, &mut spans);
            spans.push(Span::styled(after[..end].to_string(), code));
            rest = &after[end + 1..];
            continue;
        }

        if let Some((label, consumed)) = parse_link(rest) {
            flush(&mut current, &mut spans);
            spans.push(Span::styled(label.to_string(), link));
            rest = &rest[consumed..];
            continue;
        }

        current.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    flush(&mut current, &mut spans);
    spans
}

/// `[label](target)` at the start of `text`: returns the label and bytes consumed
fn parse_link(text: &str) -> Option<(&str, usize)> {
    let after_open = text.strip_prefix('[')?;
    let label_end = after_open.find(']')?;
    let label = &after_open[..label_end];
    let after_label = after_open[label_end + 1..].strip_prefix('(')?;
    let target_end = after_label.find(')')?;

    if label.is_empty() {
        return None;
    }
    // '[' + label + "](" + target + ')'
    Some((label, 1 + label_end + 2 + target_end + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ThemeMode;

    fn palette() -> Palette {
        Palette::for_mode(ThemeMode::Dark)
    }

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_heading_strips_hashes() {
        let lines = render_markdown("## Key Findings", &palette());
        assert_eq!(plain(&lines[0]), "Key Findings");
        assert!(lines[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_hashtag_is_not_heading() {
        let lines = render_markdown("#rustlang rocks", &palette());
        assert_eq!(plain(&lines[0]), "#rustlang rocks");
    }

    #[test]
    fn test_bullets() {
        let lines = render_markdown("- first\n  * nested", &palette());
        assert_eq!(plain(&lines[0]), "• first");
        assert_eq!(plain(&lines[1]), "  • nested");
    }

    #[test]
    fn test_link_shows_label_only() {
        let lines = render_markdown("See [LoRA paper](https://arxiv.org/abs/2106.09685) now", &palette());
        assert_eq!(plain(&lines[0]), "See LoRA paper now");
        let link = &lines[0].spans[1];
        assert!(link.style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_bold_and_code() {
        let lines = render_markdown("**rank** is `r=8`", &palette());
        assert_eq!(plain(&lines[0]), "rank is r=8");
        assert!(lines[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_unclosed_markers_are_literal() {
        let lines = render_markdown("a ** b ` c [d](e", &palette());
        assert_eq!(plain(&lines[0]), "a ** b ` c [d](e");
    }

    #[test]
    fn test_code_fence_hidden_and_body_indented() {
        let lines = render_markdown("```python\nprint(1)\n```\nafter", &palette());
        assert_eq!(lines.len(), 2);
        assert_eq!(plain(&lines[0]), "  print(1)");
        assert_eq!(plain(&lines[1]), "after");
    }

    #[test]
    fn test_multibyte_text() {
        let lines = render_markdown("Özet: **güçlü** 🚀", &palette());
        assert_eq!(plain(&lines[0]), "Özet: güçlü 🚀");
    }
}
