use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::{
    app::state::{AppState, FormField},
    orders::{
        Notices, NoticeLevel, Order, ServiceChoice, draft::MAX_DETAILS_CHARS,
        model::format_timestamp,
    },
};

const PANEL_BG: Color = Color::Rgb(16, 18, 24);
const MUTED: Color = Color::Rgb(140, 146, 160);
const ACCENT: Color = Color::Rgb(120, 190, 255);

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .style(Style::default().bg(PANEL_BG).fg(Color::White))
}

pub fn render_order_list(frame: &mut Frame, area: Rect, state: &AppState) {
    let query = state.desk.orders();
    let lines: Vec<Line> = if let Some(err) = query.error() {
        vec![Line::styled(err.to_string(), Style::default().fg(Color::LightRed))]
    } else {
        match query.data() {
            None => vec![Line::styled("Loading orders...", Style::default().fg(MUTED))],
            Some(orders) if orders.is_empty() => vec![
                Line::from("No orders yet"),
                Line::styled(
                    "Press n to create your first service order.",
                    Style::default().fg(MUTED),
                ),
            ],
            Some(orders) => orders.iter().rev().flat_map(order_lines).collect(),
        }
    };

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .block(panel("My Orders"))
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn order_lines(order: &Order) -> [Line<'_>; 3] {
    [
        Line::from(vec![
            Span::styled(
                order.service_type.label(),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  #{}", order.id), Style::default().fg(MUTED)),
        ]),
        Line::styled(
            format_timestamp(order.timestamp),
            Style::default().fg(MUTED),
        ),
        Line::from(order.details.as_str()),
    ]
}

pub fn render_order_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let draft = &state.draft;
    let focus_style = |field: FormField| {
        if state.focus == field {
            Style::default().fg(Color::Black).bg(ACCENT)
        } else {
            Style::default()
        }
    };

    let mut lines = vec![Line::from("Service type")];
    for (idx, choice) in ServiceChoice::ALL.iter().enumerate() {
        let selected = draft.choice == Some(*choice);
        let marker = if selected { "(•)" } else { "( )" };
        let style = if selected {
            focus_style(FormField::Service)
        } else {
            Style::default().fg(MUTED)
        };
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{marker} {} {}", idx + 1, choice.label()), style),
        ]));
    }
    lines.push(Line::default());

    if draft.choice == Some(ServiceChoice::Other) {
        lines.push(Line::from(vec![
            Span::raw("Specify service type: "),
            Span::styled(
                format!("{}_", draft.other_text),
                focus_style(FormField::OtherText),
            ),
        ]));
        lines.push(Line::default());
    }
    lines.push(Line::from(vec![
        Span::raw("Service details "),
        Span::styled(
            format!("({})", draft.details_counter()),
            if draft.details.chars().count() > MAX_DETAILS_CHARS {
                Style::default().fg(Color::LightRed)
            } else {
                Style::default().fg(MUTED)
            },
        ),
    ]));
    lines.push(Line::styled(
        format!("{}_", draft.details),
        focus_style(FormField::Details),
    ));
    lines.push(Line::default());
    lines.push(Line::styled(
        "Tab next field · ←/→ service type · Enter submit · Esc close",
        Style::default().fg(MUTED),
    ));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .block(panel("New Service Order"))
            .wrap(Wrap { trim: false }),
        area,
    );
}

pub fn render_profile_prompt(frame: &mut Frame, area: Rect, state: &AppState) {
    let lines = vec![
        Line::from("Please tell us your name to get started."),
        Line::default(),
        Line::from(vec![
            Span::raw("Name: "),
            Span::styled(
                format!("{}_", state.profile_name),
                Style::default().fg(Color::Black).bg(ACCENT),
            ),
        ]),
        Line::default(),
        Line::styled("Enter save · Esc later", Style::default().fg(MUTED)),
    ];
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(panel("Welcome")), area);
}

/// Stacks notices in the top-right corner, newest at the bottom.
pub fn render_notices(frame: &mut Frame, area: Rect, notices: &Notices) {
    for (row, notice) in notices.iter().enumerate() {
        let Ok(offset) = u16::try_from(row) else {
            break;
        };
        if offset + 1 >= area.height {
            break;
        }
        let (prefix, color) = match notice.level {
            NoticeLevel::Success => ("✓ ", Color::LightGreen),
            NoticeLevel::Error => ("✗ ", Color::LightRed),
        };
        let text = format!("{prefix}{}", notice.message);
        let width = u16::try_from(text.chars().count() + 2)
            .unwrap_or(u16::MAX)
            .min(area.width);
        let badge = Rect {
            x: area.right().saturating_sub(width + 1),
            y: area.y + 1 + offset,
            width,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Line::from(format!(" {text} "))).style(
                Style::default()
                    .fg(color)
                    .bg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            ),
            badge,
        );
    }
}

pub fn split_body(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    (chunks[0], chunks[1])
}
