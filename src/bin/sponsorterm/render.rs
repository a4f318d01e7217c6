//! ratatui drawing for the widget: avatar, thought bubble, speech bubble, buttons.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use sponsorterm::{AvatarState, WidgetState};

use crate::buttons::{ButtonAction, ButtonRow};

const TITLE: &str = " Did you call your sponsor first? ";
const FOOTER: &str = "1-7 ask · p panic · ←/→ focus · enter press · q quit";

pub(crate) fn avatar_face(state: AvatarState) -> &'static str {
    match state {
        AvatarState::Idle => "( -_- )",
        AvatarState::Processing => "( o_O )",
        AvatarState::Responding => "( ¬‿¬ )",
    }
}

fn avatar_style(state: AvatarState) -> Style {
    match state {
        AvatarState::Idle => Style::default().fg(Color::Gray),
        AvatarState::Processing => Style::default().fg(Color::Yellow),
        AvatarState::Responding => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    }
}

pub(crate) fn draw(frame: &mut Frame, view: &WidgetState, buttons: &ButtonRow) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(TITLE);
    let inner = outer.inner(frame.area());
    frame.render_widget(outer, frame.area());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(inner);

    draw_thought(frame, rows[0], view);
    draw_avatar(frame, rows[1], view.avatar);
    draw_speech(frame, rows[2], view);
    draw_diagnostic(frame, rows[3], view);
    draw_buttons(frame, rows[5], view.inputs_enabled, buttons);
    frame.render_widget(
        Paragraph::new(FOOTER)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        rows[6],
    );
}

fn draw_thought(frame: &mut Frame, area: Rect, view: &WidgetState) {
    let Some(thought) = view.thought.as_deref() else {
        return;
    };
    let bubble = Paragraph::new(Line::from(Span::styled(
        thought,
        Style::default().add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" thinking… "),
    );
    frame.render_widget(bubble, area);
}

fn draw_avatar(frame: &mut Frame, area: Rect, avatar: AvatarState) {
    let lines = vec![
        Line::from(Span::styled(avatar_face(avatar), avatar_style(avatar))),
        Line::from(Span::styled(
            avatar.label(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(lines)).alignment(Alignment::Center),
        area,
    );
}

fn draw_speech(frame: &mut Frame, area: Rect, view: &WidgetState) {
    let Some(response) = view.response.as_deref() else {
        return;
    };
    let bubble = Paragraph::new(response)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title(" sponsor "),
        );
    frame.render_widget(bubble, area);
}

fn draw_diagnostic(frame: &mut Frame, area: Rect, view: &WidgetState) {
    let Some(diagnostic) = view.diagnostic.as_deref() else {
        return;
    };
    let line = Line::from(vec![
        Span::styled("» ", Style::default().fg(Color::Cyan)),
        Span::styled(diagnostic, Style::default().fg(Color::Cyan)),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_buttons(frame: &mut Frame, area: Rect, enabled: bool, buttons: &ButtonRow) {
    let mut spans = Vec::new();
    for (idx, button) in buttons.buttons().iter().enumerate() {
        let mut style = match button.action {
            ButtonAction::Panic => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ButtonAction::Category(_) if enabled => Style::default().fg(Color::White),
            ButtonAction::Category(_) => Style::default().fg(Color::DarkGray),
        };
        if idx == buttons.focused() {
            style = style.add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::styled(
            format!("[{}] {}", button.shortcut, button.label),
            style,
        ));
        spans.push(Span::raw("  "));
    }
    let row = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);
    frame.render_widget(row, area);
}
