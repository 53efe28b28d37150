pub mod backdrop;
pub mod orders;
pub mod raster;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    app::state::{AppMode, AppState},
    cli::Cli,
};

pub fn render(frame: &mut Frame, state: &AppState, cli: &Cli) {
    let area = frame.area();

    if area.width < 40 || area.height < 12 {
        let warning = Paragraph::new("Terminal too small. Resize to at least 40x12.")
            .block(Block::default().borders(Borders::ALL).title("orderdesk"));
        frame.render_widget(warning, area);
        return;
    }

    let (top, bottom) = backdrop::sky(state.animator.variant());
    frame.render_widget(
        backdrop::Backdrop {
            top,
            bottom,
            raster: state.backdrop_raster(),
        },
        area,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, rows[0], state, cli);
    let body = inset(rows[1], 2, 1);
    if state.mode == AppMode::Composing {
        let (list, form) = orders::split_body(body);
        orders::render_order_list(frame, list, state);
        orders::render_order_form(frame, form, state);
    } else {
        let (list, _) = orders::split_body(body);
        orders::render_order_list(frame, list, state);
    }
    render_footer(frame, rows[2], state);

    if state.mode == AppMode::ProfileSetup {
        orders::render_profile_prompt(frame, centered_rect(60, 40, area), state);
    }
    orders::render_notices(frame, area, state.desk.notices());
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState, cli: &Cli) {
    let role = state.desk.role().map_or("…", |role| role.label());
    let motion = if state.settings.reduced_motion {
        "reduced motion"
    } else {
        "full motion"
    };
    let line = Line::from(vec![
        Span::styled(" orderdesk ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(
            "· {} · {motion} · {} ({role})",
            state.animator.variant().label(),
            cli.user.trim()
        )),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().fg(Color::White).bg(Color::Black)),
        area,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let hints = match state.mode {
        AppMode::Composing => " Enter submit · Esc close form · Ctrl-C quit",
        AppMode::ProfileSetup => " Enter save profile · Esc skip",
        _ => " n new order · r refresh · e effect · m motion · p profile · q quit",
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::Gray).bg(Color::Black)),
        area,
    );
}

fn inset(area: Rect, horizontal: u16, vertical: u16) -> Rect {
    Rect {
        x: area.x + horizontal.min(area.width / 2),
        y: area.y + vertical.min(area.height / 2),
        width: area.width.saturating_sub(horizontal * 2),
        height: area.height.saturating_sub(vertical * 2),
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
