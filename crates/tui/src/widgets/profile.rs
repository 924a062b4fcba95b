//! Profile page widget.
//!
//! Shows the task counters, a per-category bar chart, and the created and
//! completed task histories with relative dates.

use chrono::NaiveDateTime;
use eisen_protocol::Task;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Paragraph, Widget},
};

use crate::request::ProfileData;

/// Height of the row of counter cards.
const CARD_HEIGHT: u16 = 3;

/// Height of the category chart.
const CHART_HEIGHT: u16 = 8;

/// Width of one bar, wide enough for the longest category name.
const BAR_WIDTH: u16 = 8;

/// Formats a timestamp relative to `now` by calendar day.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use eisen_tui::widgets::format_relative;
///
/// let at = |d, h, m| NaiveDate::from_ymd_opt(2024, 6, d).unwrap().and_hms_opt(h, m, 0).unwrap();
/// let now = at(10, 12, 0);
///
/// assert_eq!(format_relative(at(10, 8, 5), now), "today 08:05");
/// assert_eq!(format_relative(at(9, 23, 59), now), "yesterday 23:59");
/// assert_eq!(format_relative(at(5, 12, 0), now), "5 days ago");
/// assert_eq!(format_relative(at(1, 9, 30), now), "2024-06-01 09:30");
/// ```
#[must_use]
pub fn format_relative(then: NaiveDateTime, now: NaiveDateTime) -> String {
    let days = (now.date() - then.date()).num_days();
    match days {
        0 => format!("today {}", then.format("%H:%M")),
        1 => format!("yesterday {}", then.format("%H:%M")),
        2..=7 => format!("{days} days ago"),
        _ => then.format("%Y-%m-%d %H:%M").to_string(),
    }
}

/// Renders the profile page, or a loading message until data arrives.
pub fn render_profile(
    profile: Option<&ProfileData>,
    now: NaiveDateTime,
    area: Rect,
    buf: &mut Buffer,
) {
    let block = Block::default()
        .title(Span::styled(
            " Profile ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    block.render(area, buf);

    let Some(profile) = profile else {
        Paragraph::new(Span::styled(
            "Loading profile…",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center)
        .render(inner, buf);
        return;
    };

    let [cards, chart, history] = Layout::vertical([
        Constraint::Length(CARD_HEIGHT),
        Constraint::Length(CHART_HEIGHT),
        Constraint::Min(0),
    ])
    .areas(inner);

    render_cards(profile, cards, buf);
    render_category_chart(profile, chart, buf);

    let [created, completed] =
        Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).areas(history);
    let created_lines = profile
        .history
        .created_tasks
        .iter()
        .map(|task| history_line(task, task.created_at, now))
        .collect();
    render_history(" Created ", created_lines, created, buf);
    let completed_lines = profile
        .history
        .completed_tasks
        .iter()
        .map(|task| history_line(task, task.completed_at.or(task.created_at), now))
        .collect();
    render_history(" Completed ", completed_lines, completed, buf);
}

fn render_cards(profile: &ProfileData, area: Rect, buf: &mut Buffer) {
    let stats = &profile.stats;
    let cards = [
        ("Total", stats.total_tasks.to_string(), Color::White),
        ("Completed", stats.completed_tasks.to_string(), Color::Green),
        ("Pending", stats.pending_tasks.to_string(), Color::Yellow),
        (
            "Completion",
            format!("{:.1}%", stats.completion_rate),
            Color::Cyan,
        ),
    ];
    let areas: [Rect; 4] = Layout::horizontal([Constraint::Ratio(1, 4); 4]).areas(area);
    for ((title, value, color), card) in cards.into_iter().zip(areas) {
        Paragraph::new(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(Span::styled(
                    format!(" {title} "),
                    Style::default().fg(Color::Gray),
                ))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .render(card, buf);
    }
}

fn render_category_chart(profile: &ProfileData, area: Rect, buf: &mut Buffer) {
    let bars: Vec<Bar> = profile
        .categories
        .iter()
        .map(|(category, count)| {
            Bar::default()
                .value(count)
                .label(Line::from(category.display_name()))
                .style(Style::default().fg(Color::Cyan))
        })
        .collect();

    BarChart::default()
        .block(
            Block::default()
                .title(Span::styled(
                    " By category ",
                    Style::default().fg(Color::Gray),
                ))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(BAR_WIDTH)
        .bar_gap(2)
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        .label_style(Style::default().fg(Color::Gray))
        .render(area, buf);
}

fn history_line(task: &Task, at: Option<NaiveDateTime>, now: NaiveDateTime) -> Line<'_> {
    let when = at.map_or_else(|| "unknown".to_string(), |at| format_relative(at, now));
    Line::from(vec![
        Span::styled(format!("{when}  "), Style::default().fg(Color::DarkGray)),
        Span::styled(task.title.as_str(), Style::default().fg(Color::White)),
    ])
}

fn render_history(title: &'static str, lines: Vec<Line<'_>>, area: Rect, buf: &mut Buffer) {
    let lines = if lines.is_empty() {
        vec![Line::from(Span::styled(
            "  Nothing yet",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        lines
    };
    Paragraph::new(lines)
        .block(
            Block::default()
                .title(Span::styled(title, Style::default().fg(Color::Gray)))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .render(area, buf);
}
