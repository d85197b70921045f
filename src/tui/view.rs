// File: src/tui/view.rs
use crate::controller::LogView;
use crate::model::{CategoryFilter, LogStatus, NormalizedItem};
use crate::tui::state::{AppState, InputMode, Tab};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
};
use rust_i18n::t;
use strum::IntoEnumIterator;
use unicode_width::UnicodeWidthStr;

/// Pads `text` with spaces to `width` terminal columns. Hangul is double width.
fn pad_to(text: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(w)))
}

fn item_lines<'a>(items: &'a [NormalizedItem], show_category: bool) -> Vec<ListItem<'a>> {
    let code_width = items
        .iter()
        .map(|it| UnicodeWidthStr::width(it.code.as_str()))
        .max()
        .unwrap_or(0);
    items
        .iter()
        .map(|it| {
            let mut spans = vec![Span::styled(
                pad_to(&it.code, code_width),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )];
            if show_category {
                spans.push(Span::styled(
                    format!(" [{}]", it.category),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            spans.push(Span::raw("  "));
            spans.push(Span::raw(it.title.as_str()));
            ListItem::new(Line::from(spans))
        })
        .collect()
}

fn log_lines(state: &AppState) -> Vec<ListItem<'_>> {
    let LogView::Records(records) = &state.view().logs else {
        return Vec::new();
    };
    records
        .iter()
        .map(|r| {
            let status = r.status();
            let pill_color = match status {
                LogStatus::Changed => Color::LightRed,
                LogStatus::NoChange => Color::Green,
            };
            let mut head = vec![
                Span::styled(r.date.as_str(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" "),
                Span::styled(
                    format!("[{}]", status.label()),
                    Style::default().fg(pill_color),
                ),
                Span::raw(format!(" {}", r.summary)),
            ];
            if r.report.is_some() {
                head.push(Span::styled(
                    format!("  ({})", t!("report")),
                    Style::default().fg(Color::Blue),
                ));
            }
            let counts = Line::from(Span::styled(
                format!(
                    "    {}",
                    t!(
                        "log_counts",
                        added = r.added.to_string(),
                        removed = r.removed.to_string()
                    )
                ),
                Style::default().fg(Color::Gray),
            ));
            ListItem::new(vec![Line::from(head), counts])
        })
        .collect()
}

/// Hint shown instead of an empty list.
fn empty_hint(state: &AppState) -> Option<String> {
    if state.len_of(state.tab) > 0 {
        return None;
    }
    let view = state.view();
    Some(match state.tab {
        Tab::Logs => match view.logs {
            LogView::Unavailable if !state.loading => t!("hint_log_missing").to_string(),
            LogView::Unavailable => t!("status_loading").to_string(),
            LogView::Records(_) => t!("hint_no_logs").to_string(),
        },
        Tab::Banners => t!("hint_no_banners").to_string(),
        Tab::Standards => t!("hint_no_results").to_string(),
    })
}

fn filter_bar(state: &AppState) -> Paragraph<'_> {
    let view = state.view();
    let query_text = if state.mode == InputMode::Searching {
        state.input_buffer.clone()
    } else {
        view.filter.query.clone()
    };

    let mut spans = vec![
        Span::styled(format!(" {}: ", t!("search")), Style::default().fg(Color::Yellow)),
        Span::raw(query_text),
        Span::raw("   "),
    ];

    let chip = |label: String, active: bool| {
        if active {
            Span::styled(
                format!(" {} ", label),
                Style::default().bg(Color::Blue).fg(Color::White),
            )
        } else {
            Span::raw(format!(" {} ", label))
        }
    };
    spans.push(chip(
        t!("category_all").to_string(),
        view.filter.category == CategoryFilter::All,
    ));
    for tag in &view.categories {
        spans.push(chip(
            tag.to_string(),
            view.filter.category == CategoryFilter::Only(tag.clone()),
        ));
    }
    if let Some(last) = &view.listing_last {
        spans.push(Span::styled(
            format!("   {}", t!("last_collected", date = last.clone())),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let border = if state.mode == InputMode::Searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_style(border))
}

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    // --- Tabs ---
    let titles: Vec<Line> = Tab::iter()
        .map(|tab| {
            Line::from(format!(
                "{} ({})",
                tab.title(),
                state.len_of(tab)
            ))
        })
        .collect();
    let selected = Tab::iter().position(|t| t == state.tab).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", t!("app_title"))),
        )
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, v_chunks[0]);

    // --- Filter bar ---
    f.render_widget(filter_bar(state), v_chunks[1]);
    if state.mode == InputMode::Searching {
        let prefix = format!(" {}: ", t!("search"));
        let before: String = state.input_buffer.chars().take(state.cursor_position).collect();
        let x = v_chunks[1].x
            + 1
            + UnicodeWidthStr::width(prefix.as_str()) as u16
            + UnicodeWidthStr::width(before.as_str()) as u16;
        f.set_cursor_position((x, v_chunks[1].y + 1));
    }

    // --- Main list ---
    let main_block = Block::default().borders(Borders::ALL);
    if let Some(hint) = empty_hint(state) {
        let p = Paragraph::new(hint)
            .block(main_block)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true });
        f.render_widget(p, v_chunks[2]);
    } else {
        let mut list_state = state.list_state().clone();
        let items = match state.tab {
            Tab::Logs => log_lines(state),
            Tab::Banners => item_lines(&state.view().banners, false),
            Tab::Standards => item_lines(&state.view().standards, true),
        };
        let list = List::new(items)
            .block(main_block)
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("> ");
        f.render_stateful_widget(list, v_chunks[2], &mut list_state);
        *state.list_state() = list_state;
    }

    // --- Footer ---
    let footer_area = v_chunks[3];
    f.render_widget(Clear, footer_area);
    let status_style = if state.loading {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(footer_area);
    let status = Paragraph::new(state.message.as_str())
        .style(status_style)
        .block(Block::default().borders(Borders::ALL));
    let help = Paragraph::new(t!("help_line").to_string())
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[0]);
    f.render_widget(help, chunks[1]);

    // --- Acknowledgement popup ---
    if let Some(message) = &state.ack_message {
        let area = centered_rect(60, 30, f.area());
        let mut lines: Vec<Line> = vec![Line::from("")];
        lines.extend(message.lines().map(|l| Line::from(l.to_string())));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            t!("ack_press_any_key").to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        let p = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::LightGreen)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(Clear, area);
        f.render_widget(p, area);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_counts_terminal_columns() {
        assert_eq!(pad_to("ab", 4), "ab  ");
        assert_eq!(pad_to("소화", 6), "소화  ");
        assert_eq!(pad_to("toolong", 3), "toolong");
    }
}
