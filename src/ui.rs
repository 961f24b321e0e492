//! UI rendering with ratatui.

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Position, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::{App, InputMode};
use crate::fit::Attempt;
use crate::label::Published;
use crate::text::{char_len, display_width};

/// Height of the bordered container box.
const BOX_HEIGHT: u16 = 3;

/// Split the terminal area into title, box, diagnostics and status rows.
fn main_chunks(area: Rect) -> [Rect; 4] {
    Layout::vertical([
        Constraint::Length(1),          // Title bar
        Constraint::Length(BOX_HEIGHT), // Container box
        Constraint::Min(3),             // Diagnostics
        Constraint::Length(1),          // Status bar
    ])
    .areas(area)
}

/// Outer rect of the container box for a requested inner width.
fn container_box(area: Rect, requested: Option<u16>) -> Rect {
    let [_, row, _, _] = main_chunks(area);
    let width = match requested {
        Some(inner) => inner.saturating_add(2).min(row.width),
        None => row.width,
    };
    Rect::new(row.x, row.y, width, row.height)
}

/// Inner rect the label is laid out in.
pub fn label_area(area: Rect, requested: Option<u16>) -> Rect {
    container_block().inner(container_box(area, requested))
}

fn container_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let [title, _, diagnostics, status] = main_chunks(frame.area());

    render_title_bar(frame, title, app);
    render_container(frame, app);
    render_diagnostics(frame, diagnostics, app);
    render_status_bar(frame, status, app);

    // Render input overlay if in input mode
    if app.is_input_mode() {
        render_input_overlay(frame, app);
    }

    // Render help modal on top if visible
    if app.show_help {
        render_help(frame);
    }
}

/// Render the title bar.
fn render_title_bar(frame: &mut Frame, area: Rect, app: &App) {
    let follow = if app.requested_width.is_some() {
        "fixed"
    } else {
        "follow terminal"
    };
    let title = format!(" midtrunc - ellipsis {:?} ({follow}) ", app.label.ellipsis());
    let title_bar = Paragraph::new(title).style(Style::default().bg(Color::Blue).fg(Color::White));
    frame.render_widget(title_bar, area);
}

/// Render the bordered container with the fitted label inside.
fn render_container(frame: &mut Frame, app: &App) {
    let outer = container_box(frame.area(), app.requested_width);
    let width = outer.width.saturating_sub(2);
    let block = container_block().title(format!(" {width} "));
    let inner = block.inner(outer);
    frame.render_widget(block, outer);

    let label = Paragraph::new(app.label.display()).style(app.label.style());
    frame.render_widget(label, inner);
}

/// Render the last published run.
fn render_diagnostics(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Last run ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(published) = app.label.published() else {
        let message = if app.label.context().is_laid_out() {
            " fitting..."
        } else {
            " waiting for layout..."
        };
        let waiting = Paragraph::new(message).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(waiting, inner);
        return;
    };

    let chosen = published.fit.chosen;
    let mut items = vec![ListItem::new(summary_line(published, app.label.text()))];
    items.extend(
        published
            .fit
            .attempts
            .iter()
            .enumerate()
            .map(|(i, a)| attempt_item(a, chosen == Some(i), published.container_width)),
    );
    frame.render_widget(List::new(items), inner);
}

/// One-line summary of a published run.
fn summary_line<'a>(published: &Published, text: &str) -> Line<'a> {
    let fit = &published.fit;
    let full = fit
        .full_width
        .map(|w| format!("{w}"))
        .unwrap_or_else(|| "-".to_string());
    let outcome = if fit.is_truncated() {
        "truncated"
    } else {
        "fits"
    };
    Line::from(vec![
        Span::styled(
            format!(" run {} ", published.id),
            Style::default().fg(Color::Magenta).bold(),
        ),
        Span::raw(format!(
            "{outcome}  container {}  text {} chars / {} cells (measured {full})  {} measurements",
            published.container_width,
            char_len(text),
            display_width(text),
            fit.measurements,
        )),
    ])
}

/// A row of the attempts table; the chosen candidate is highlighted.
fn attempt_item<'a>(attempt: &Attempt, chosen: bool, container_width: u16) -> ListItem<'a> {
    let fits = attempt.width < f64::from(container_width);
    let marker = if chosen { ">" } else { " " };
    let width_style = if fits {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Red)
    };
    let candidate_style = if chosen {
        Style::default().bold()
    } else {
        Style::default().fg(Color::Gray)
    };

    ListItem::new(Line::from(vec![
        Span::styled(format!(" {marker} "), Style::default().fg(Color::Yellow)),
        Span::raw(format!("offset {:>3}  ", attempt.offset)),
        Span::styled(format!("width {:>4}  ", attempt.width), width_style),
        Span::styled(format!("{:?}", attempt.candidate), candidate_style),
    ]))
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let help = if app.label.needs_fit() {
        " fitting... ".to_string()
    } else {
        " h/l: resize  H/L: resize x10  0: follow  t: text  e: ellipsis  q: quit  ?: help "
            .to_string()
    };
    let status_bar =
        Paragraph::new(help).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

/// Render the help modal.
fn render_help(frame: &mut Frame) {
    let area = centered_rect(frame.area(), 50, 80);

    // Clear the area first to avoid background bleed-through
    frame.render_widget(Clear, area);

    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));
    let help_lines = vec![
        Line::styled(
            "─── Keyboard Shortcuts ───",
            Style::default().fg(Color::Cyan).bold(),
        ),
        Line::raw(""),
        Line::styled("  Container", Style::default().bold()),
        Line::from(vec![key("  h / ←      "), Span::raw("Shrink by 1")]),
        Line::from(vec![key("  l / →      "), Span::raw("Grow by 1")]),
        Line::from(vec![key("  H / L      "), Span::raw("Shrink / grow by 10")]),
        Line::from(vec![key("  0          "), Span::raw("Follow terminal width")]),
        Line::raw(""),
        Line::styled("  Label", Style::default().bold()),
        Line::from(vec![key("  t          "), Span::raw("Edit text")]),
        Line::from(vec![key("  e          "), Span::raw("Edit ellipsis")]),
        Line::raw(""),
        Line::styled("  General", Style::default().bold()),
        Line::from(vec![key("  q / Esc    "), Span::raw("Quit")]),
        Line::from(vec![key("  ?          "), Span::raw("Toggle this help")]),
    ];

    let help_widget = Paragraph::new(help_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help "),
    );

    frame.render_widget(help_widget, area);
}

/// Calculate a centered rectangle with given percentage of width and height.
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

/// Render the input overlay for text entry.
fn render_input_overlay(frame: &mut Frame, app: &App) {
    let Some(mode) = &app.input_mode else {
        return;
    };

    // Calculate centered area for input box
    let area = frame.area();
    let width = (area.width / 10 * 6).max(40).min(area.width.saturating_sub(4));
    let height = 3;
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    let input_area = Rect::new(x, y, width, height);

    // Clear the area behind the input box
    frame.render_widget(Clear, input_area);

    let title = match mode {
        InputMode::Text => " Text ",
        InputMode::Ellipsis => " Ellipsis ",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title)
        .title_style(Style::default().fg(Color::Cyan).bold());

    let inner_area = block.inner(input_area);
    frame.render_widget(block, input_area);

    // Render the input text
    let input_value = app.input.value();
    let display_text = if input_value.is_empty() {
        Span::styled(mode.placeholder(), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(input_value)
    };

    // Calculate scroll for long input
    let scroll = app.input.visual_scroll(inner_area.width as usize);
    let input_paragraph = Paragraph::new(Line::from(display_text)).scroll((0, scroll as u16));
    frame.render_widget(input_paragraph, inner_area);

    let cursor_x = app.input.visual_cursor().saturating_sub(scroll);
    frame.set_cursor_position(Position::new(inner_area.x + cursor_x as u16, inner_area.y));
}
