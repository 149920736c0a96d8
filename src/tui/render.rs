use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};
use ratatui::Frame;

use crate::state::Filters;
use crate::theme::{Palette, Theme};
use crate::tui::input::Focus;

pub const HEADER_ROWS: u16 = 4;
pub const FOOTER_ROWS: u16 = 2;
/// Rows one band card occupies in the list (name, members, note, spacer).
pub const CARD_ROWS: u16 = 4;

/// One entry in the member-tag panel.
#[derive(Debug, Clone)]
pub struct MemberTag {
    pub name: String,
    pub band_count: usize,
    /// This tag is the current selection (the `active` class).
    pub selected: bool,
}

/// One visible band card. Hidden bands are not included at all.
#[derive(Debug, Clone)]
pub struct BandCard {
    pub name: String,
    pub tags: Vec<String>,
    pub members: String,
    pub note: String,
    pub active: bool,
    pub highlighted: bool,
}

#[derive(Debug)]
pub struct RenderData<'a> {
    pub query: &'a str,
    pub query_cursor: usize,
    /// Ctrl+K select-all: the whole buffer is marked, next char replaces.
    pub query_selected: bool,
    pub filters: Filters,
    pub theme: Theme,
    pub focus: Focus,
    pub members: &'a [MemberTag],
    pub member_cursor: usize,
    pub member_scroll: usize,
    pub bands: &'a [BandCard],
    /// Scroll offset into `bands`, in cards.
    pub band_scroll: usize,
    pub visible_count: usize,
    pub total_count: usize,
    pub show_back_to_top: bool,
    pub message: Option<&'a str>,
}

pub fn draw(frame: &mut Frame, data: &RenderData) {
    let palette = data.theme.palette();
    let rows = Layout::vertical([
        Constraint::Length(HEADER_ROWS),
        Constraint::Min(1),
        Constraint::Length(FOOTER_ROWS),
    ])
    .split(frame.area());

    draw_header(frame, rows[0], data, &palette);

    let body = Layout::horizontal([Constraint::Length(30), Constraint::Min(1)]).split(rows[1]);
    draw_members(frame, body[0], data, &palette);
    draw_bands(frame, body[1], data, &palette);

    draw_footer(frame, rows[2], data, &palette);
}

fn draw_header(frame: &mut Frame, area: Rect, data: &RenderData, palette: &Palette) {
    let focused = data.focus == Focus::Search;
    let caret_style = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK);
    let text_style = if data.query_selected {
        Style::default().fg(palette.fg).add_modifier(Modifier::REVERSED)
    } else {
        Style::default().fg(palette.fg)
    };

    let search_line = if focused {
        line_with_cursor(
            data.query,
            data.query_cursor,
            "search bands, members, notes...",
            text_style,
            Style::default().fg(palette.dim),
            caret_style,
        )
    } else if data.query.is_empty() {
        Line::from(Span::styled(
            "search bands, members, notes...",
            Style::default().fg(palette.dim),
        ))
    } else {
        Line::from(Span::styled(data.query.to_string(), text_style))
    };

    let mut search_spans = vec![Span::styled("/ ", Style::default().fg(palette.dim))];
    search_spans.extend(search_line.spans);
    let lines = vec![
        Line::from(search_spans),
        Line::from(filter_spans(&data.filters, data.theme, palette)),
    ];

    let border_style = if focused {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.border)
    };
    let panel = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(
                " MILITANT BLACK METAL MAP ",
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::new(1, 1, 0, 0)),
    );
    frame.render_widget(panel, area);
}

fn filter_spans(filters: &Filters, theme: Theme, palette: &Palette) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (label, on) in [
        ("[1] active only", filters.active),
        ("[2] core only", filters.core),
        ("[3] hide external", filters.external),
    ] {
        let style = if on {
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.dim)
        };
        let mark = if on { "x" } else { " " };
        spans.push(Span::styled(format!("({mark}) {label}"), style));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(
        format!("theme: {}", theme.as_str()),
        Style::default().fg(palette.dim),
    ));
    spans
}

fn draw_members(frame: &mut Frame, area: Rect, data: &RenderData, palette: &Palette) {
    let focused = data.focus == Focus::Members;
    let inner_rows = area.height.saturating_sub(2) as usize;
    let mut lines = Vec::new();

    for (idx, tag) in data
        .members
        .iter()
        .enumerate()
        .skip(data.member_scroll)
        .take(inner_rows)
    {
        let under_cursor = focused && idx == data.member_cursor;
        let indicator = if under_cursor { ">" } else { " " };
        let mut style = if tag.selected {
            Style::default().fg(palette.highlight).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.fg)
        };
        if under_cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let marker = if tag.selected { "*" } else { " " };
        lines.push(Line::from(Span::styled(
            format!("{indicator}{marker}{} ({})", tag.name, tag.band_count),
            style,
        )));
    }
    if data.members.is_empty() {
        lines.push(Line::from(Span::styled(
            " no members listed",
            Style::default().fg(palette.dim),
        )));
    }

    let border_style = if focused {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.border)
    };
    let panel = Paragraph::new(lines).block(
        Block::default()
            .title(" members ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style),
    );
    frame.render_widget(panel, area);
}

fn draw_bands(frame: &mut Frame, area: Rect, data: &RenderData, palette: &Palette) {
    let focused = data.focus == Focus::Bands;
    let cards_per_page = cards_per_page(area.height);
    let mut lines = Vec::new();

    for card in data.bands.iter().skip(data.band_scroll).take(cards_per_page) {
        let name_style = if card.highlighted {
            Style::default()
                .fg(palette.highlight)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(palette.fg).add_modifier(Modifier::BOLD)
        };
        let mut name_spans = vec![Span::styled(card.name.clone(), name_style)];
        for tag in &card.tags {
            name_spans.push(Span::raw(" "));
            name_spans.push(Span::styled(
                format!("[{tag}]"),
                Style::default().fg(palette.accent),
            ));
        }
        if card.active {
            name_spans.push(Span::raw(" "));
            name_spans.push(Span::styled("[active]", Style::default().fg(palette.highlight)));
        }
        lines.push(Line::from(name_spans));

        let members = if card.members.is_empty() {
            "members: —".to_string()
        } else {
            format!("members: {}", card.members)
        };
        lines.push(Line::from(Span::styled(
            format!("  {members}"),
            Style::default().fg(palette.dim),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", card.note),
            Style::default().fg(palette.dim),
        )));
        lines.push(Line::from(""));
    }
    if data.bands.is_empty() {
        lines.push(Line::from(Span::styled(
            " nothing matches",
            Style::default().fg(palette.dim),
        )));
    }

    let border_style = if focused {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.border)
    };
    let title = format!(" bands {}/{} ", data.visible_count, data.total_count);
    let panel = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::new(1, 1, 0, 0)),
    );
    frame.render_widget(panel, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, data: &RenderData, palette: &Palette) {
    let mut lines = Vec::new();
    if let Some(message) = data.message {
        lines.push(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(palette.highlight).add_modifier(Modifier::BOLD),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "[Tab] pane  [Ctrl+K] search  [1/2/3] filters  [Enter] member  [Esc] clear  [Ctrl+T] theme  [q] quit",
            Style::default().fg(palette.dim),
        )));
    }
    if data.show_back_to_top {
        lines.push(Line::from(Span::styled(
            "▲ back to top: [Home] or [g]",
            Style::default().fg(palette.accent),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

/// How many band cards fit in a pane of `height` rows (borders excluded).
pub fn cards_per_page(height: u16) -> usize {
    (height.saturating_sub(2) / CARD_ROWS).max(1) as usize
}

fn line_with_cursor(
    text: &str,
    cursor: usize,
    placeholder: &str,
    text_style: Style,
    placeholder_style: Style,
    caret_style: Style,
) -> Line<'static> {
    let mut spans = Vec::new();
    let char_len = text.chars().count();
    let clamped = cursor.min(char_len);

    if char_len == 0 {
        spans.push(Span::styled("▌", caret_style));
        if !placeholder.is_empty() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(placeholder.to_string(), placeholder_style));
        }
        return Line::from(spans);
    }

    let split = byte_index_for_cursor(text, clamped);
    let (left, right) = text.split_at(split);
    if !left.is_empty() {
        spans.push(Span::styled(left.to_string(), text_style));
    }
    spans.push(Span::styled("▌", caret_style));
    if !right.is_empty() {
        spans.push(Span::styled(right.to_string(), text_style));
    }
    Line::from(spans)
}

fn byte_index_for_cursor(text: &str, cursor: usize) -> usize {
    text.char_indices()
        .nth(cursor)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}
