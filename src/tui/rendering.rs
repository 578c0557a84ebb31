use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use super::app::{MessageType, Overlay, StatusMessage};
use super::layout::{AppLayout, centered_rect, drawer_rect, split_home, split_result};
use super::markdown::render_markdown;
use super::theme::Palette;
use super::timestamps::format_timestamp;
use crate::models::{HistoryItem, ResearchCategory, ResearchResult};
use crate::utils::strip_ansi_codes;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Categories shown as cards on the start screen; general is the fallback
const CARD_CATEGORIES: [ResearchCategory; 3] =
    [ResearchCategory::Arxiv, ResearchCategory::Github, ResearchCategory::Models];

/// Everything a frame needs, borrowed from the app for one draw
pub struct RenderState<'a> {
    pub palette: Palette,
    pub query: &'a str,
    pub category: ResearchCategory,
    pub loading: bool,
    pub spinner_frame: usize,
    pub result: Option<&'a ResearchResult>,
    pub history: &'a [HistoryItem],
    pub suggestions: &'a [&'a str],
    pub overlay: Overlay,
    pub history_selected: usize,
    pub source_selected: usize,
    pub summary_scroll: u16,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let area = frame.area();
    frame.render_widget(Block::default().style(state.palette.base()), area);

    let layout = AppLayout::new(area);

    render_header(frame, layout.header_area, state);
    render_search_bar(frame, layout.search_area, state);
    match state.result {
        Some(result) => render_result(frame, layout.main_area, result, state),
        None => render_home(frame, layout.main_area, state),
    }
    render_status_bar(frame, layout.status_area, state);

    match state.overlay {
        Overlay::None => {}
        Overlay::History => render_history_drawer(frame, layout.main_area, state),
        Overlay::ConfirmClear => render_confirm_clear(frame, area, state),
    }

    if state.loading {
        render_loading(frame, area, state);
    }
}

fn category_icon(category: ResearchCategory) -> &'static str {
    match category {
        ResearchCategory::Arxiv => "📄",
        ResearchCategory::Github => "🐙",
        ResearchCategory::Models => "🧠",
        ResearchCategory::General => "🔎",
    }
}

fn placeholder(category: ResearchCategory) -> String {
    match category {
        ResearchCategory::General => "What do you want to explore?".to_string(),
        other => format!("Search in {}...", other.label()),
    }
}

fn bordered<'a>(title: impl Into<Line<'a>>, palette: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border())
        .style(palette.base())
        .title(title)
}

fn render_header(frame: &mut Frame, area: Rect, state: &RenderState) {
    let palette = &state.palette;
    let line = Line::from(vec![
        Span::styled(" ◆ Tech Researcher ", palette.accent()),
        Span::styled("│ ", palette.muted()),
        Span::raw(format!("{} {} ", category_icon(state.category), state.category.label())),
        Span::styled("│ ", palette.muted()),
        Span::raw(format!("{} saved", state.history.len())),
    ]);

    frame.render_widget(Paragraph::new(line).style(palette.status_bar()), area);
}

fn render_search_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let palette = &state.palette;
    let content = if state.query.is_empty() {
        Line::from(Span::styled(placeholder(state.category), palette.muted()))
    } else {
        Line::from(vec![
            Span::styled(state.query.to_string(), Style::default().fg(palette.fg)),
            Span::styled("▏", palette.accent()),
        ])
    };

    let title = format!(" Search · {} ", state.category.tag());
    frame.render_widget(Paragraph::new(content).block(bordered(title, palette)), area);
}

fn render_home(frame: &mut Frame, area: Rect, state: &RenderState) {
    let palette = &state.palette;
    let (chips_area, card_areas) = split_home(area);

    let mut chips = Vec::new();
    for (idx, suggestion) in state.suggestions.iter().enumerate() {
        chips.push(Span::styled(format!(" F{} ", idx + 1), palette.selected()));
        chips.push(Span::styled(format!(" {}  ", suggestion), Style::default().fg(palette.fg)));
    }
    frame.render_widget(
        Paragraph::new(Line::from(chips)).block(bordered(" Suggestions ", palette)),
        chips_area,
    );

    for (category, card_area) in CARD_CATEGORIES.iter().zip(card_areas) {
        let is_active = *category == state.category;
        let title_style = if is_active { palette.selected() } else { palette.accent() };
        let border_style = if is_active { palette.accent() } else { palette.border() };

        let text = Text::from(vec![
            Line::from(Span::styled(
                format!(" {} {} ", category_icon(*category), category.label()),
                title_style,
            )),
            Line::from(""),
            Line::from(Span::styled(category.description(), Style::default().fg(palette.fg))),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(palette.base());
        frame.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: true }), card_area);
    }
}

fn render_result(frame: &mut Frame, area: Rect, result: &ResearchResult, state: &RenderState) {
    let palette = &state.palette;
    let (summary_area, sources_area) = split_result(area);

    let summary = strip_ansi_codes(&result.summary);
    let paragraph = Paragraph::new(Text::from(render_markdown(&summary, palette)))
        .block(bordered(" Summary ", palette))
        .wrap(Wrap { trim: false })
        .scroll((state.summary_scroll, 0));
    frame.render_widget(paragraph, summary_area);

    let title = format!(" Sources ({}) ", result.sources.len());
    if result.sources.is_empty() {
        let empty = Paragraph::new(Span::styled("No sources cited", palette.muted()))
            .block(bordered(title, palette));
        frame.render_widget(empty, sources_area);
        return;
    }

    let items: Vec<ListItem> = result
        .sources
        .iter()
        .enumerate()
        .map(|(idx, source)| {
            let selected = idx == state.source_selected;
            let title_style = if selected { palette.selected() } else { palette.accent() };
            ListItem::new(vec![
                Line::from(Span::styled(strip_ansi_codes(&source.title), title_style)),
                Line::from(Span::styled(strip_ansi_codes(&source.uri), palette.muted())),
            ])
        })
        .collect();

    let mut list_state = ListState::default().with_selected(Some(state.source_selected));
    frame.render_stateful_widget(List::new(items).block(bordered(title, palette)), sources_area, &mut list_state);
}

fn render_history_drawer(frame: &mut Frame, area: Rect, state: &RenderState) {
    let palette = &state.palette;
    let drawer = drawer_rect(area);
    frame.render_widget(Clear, drawer);

    let title = format!(" History ({}) ", state.history.len());
    let block = bordered(title, palette).border_style(palette.accent());

    if state.history.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No searches yet", palette.muted())),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, drawer);
        return;
    }

    let items: Vec<ListItem> = state
        .history
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let style = if idx == state.history_selected {
                palette.selected()
            } else {
                Style::default().fg(palette.fg)
            };

            let query = strip_ansi_codes(item.query.lines().next().unwrap_or(""));
            ListItem::new(vec![
                Line::from(Span::styled(format!("{} {}", category_icon(item.category), query), style)),
                Line::from(Span::styled(
                    format!("   {} · {}", item.category.tag(), format_timestamp(item.timestamp)),
                    palette.muted(),
                )),
            ])
        })
        .collect();

    let mut list_state = ListState::default().with_selected(Some(state.history_selected));
    frame.render_stateful_widget(List::new(items).block(block), drawer, &mut list_state);
}

fn render_confirm_clear(frame: &mut Frame, area: Rect, state: &RenderState) {
    let palette = &state.palette;
    let dialog = centered_rect(50, 20, area);
    frame.render_widget(Clear, dialog);

    let text = Text::from(vec![
        Line::from(Span::styled(
            format!("Delete all {} history entries?", state.history.len()),
            Style::default().fg(palette.fg),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" y ", palette.selected()),
            Span::raw(" clear   "),
            Span::styled(" n ", palette.selected()),
            Span::raw(" cancel"),
        ]),
    ]);

    let block = bordered(" Clear history ", palette).border_style(Style::default().fg(palette.error));
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).block(block).wrap(Wrap { trim: true }),
        dialog,
    );
}

fn render_loading(frame: &mut Frame, area: Rect, state: &RenderState) {
    let palette = &state.palette;
    let width = 34.min(area.width);
    let height = 3.min(area.height);
    let dialog = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    frame.render_widget(Clear, dialog);

    let spinner = SPINNER_FRAMES[state.spinner_frame % SPINNER_FRAMES.len()];
    let line = Line::from(vec![
        Span::styled(format!("{} ", spinner), palette.accent()),
        Span::styled("Researching...", Style::default().fg(palette.fg)),
    ]);

    let block = bordered("", palette).border_style(palette.accent());
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center).block(block), dialog);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let palette = &state.palette;

    let (status_text, style) = if let Some(msg) = state.status_message {
        let color = match msg.message_type {
            MessageType::Success => palette.success,
            MessageType::Error => palette.error,
        };
        (format!(" {} ", msg.text), palette.status_bar().fg(color))
    } else {
        let hints: &[&str] = match state.overlay {
            Overlay::History => {
                &["↑↓: select", "Enter: open", "Del: remove", "Ctrl+X: clear all", "Esc: close"]
            }
            Overlay::ConfirmClear => &["y: clear", "n/Esc: cancel"],
            Overlay::None if state.result.is_some() => &[
                "↑↓: source",
                "PgUp/PgDn: scroll",
                "Ctrl+Y: copy link",
                "Ctrl+R: history",
                "Esc: back",
            ],
            Overlay::None => &[
                "Enter: search",
                "Tab: category",
                "F1-F4: suggestion",
                "Ctrl+R: history",
                "Ctrl+T: theme",
                "Ctrl+C: quit",
            ],
        };
        (format!(" {} ", hints.join(" | ")), palette.status_bar())
    };

    frame.render_widget(Paragraph::new(status_text).style(style), area);
}
