use linkmark_engine::{InlineHost, InlineNode, SurfaceSignal};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, Mode};

pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.area());

    // Editor line
    let editor = Paragraph::new(editor_line(app))
        .block(Block::default().borders(Borders::ALL).title("Scratchpad"));
    f.render_widget(editor, chunks[0]);

    if app.mode == Mode::Editing {
        let caret = app.doc.range().end;
        let text = app.doc.text();
        let column = text.get(..caret).map_or(0, |t| t.chars().count());
        f.set_cursor_position(Position::new(
            chunks[0].x + 1 + column as u16,
            chunks[0].y + 1,
        ));
    }

    // Markup the host would store
    let markup = Paragraph::new(app.doc.to_markup())
        .block(Block::default().borders(Borders::ALL).title("Markup"))
        .wrap(ratatui::widgets::Wrap { trim: false });
    f.render_widget(markup, chunks[1]);

    // Status and link editing surface
    let status = match &app.mode {
        Mode::LinkPrompt { url, .. } => Line::from(vec![
            Span::styled("url: ", Style::default().fg(Color::Yellow)),
            Span::raw(url.clone()),
        ]),
        Mode::Editing => Line::from(vec![
            Span::raw(format!("{} | ", app.status)),
            Span::styled(surface_label(app), Style::default().fg(Color::Cyan)),
        ]),
    };
    let status = Paragraph::new(vec![status]).block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[2]);

    if let Mode::LinkPrompt { url, .. } = &app.mode {
        f.set_cursor_position(Position::new(
            chunks[2].x + 1 + 5 + url.chars().count() as u16,
            chunks[2].y + 1,
        ));
    }

    // Instructions
    let help_text = Line::from(vec![
        Span::raw("Esc: Quit | "),
        Span::raw("Ctrl+K: Toggle link | "),
        Span::raw("Shift+←/→: Select | "),
        Span::raw("Home/End"),
    ]);
    f.render_widget(Paragraph::new(vec![help_text]), chunks[3]);
}

/// The paragraph with links underlined and the selection reversed.
fn editor_line(app: &App) -> Line<'static> {
    let selection = app.doc.range();
    let mut spans = Vec::new();
    let mut pos = 0;

    for (_, node) in app.doc.nodes() {
        let base = match node {
            InlineNode::Text(_) => Style::default(),
            InlineNode::Element(_) => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
        };
        for c in node.text_content().chars() {
            let style = if selection.contains(&pos) {
                base.add_modifier(Modifier::REVERSED)
            } else {
                base
            };
            spans.push(Span::styled(c.to_string(), style));
            pos += c.len_utf8();
        }
    }

    Line::from(spans)
}

fn surface_label(app: &App) -> String {
    match app.last_signal() {
        Some(SurfaceSignal::Show(id)) => match app.doc.element(id).and_then(|el| el.attr("href")) {
            Some(href) => format!("link {id}: {href}"),
            None => format!("link {id}"),
        },
        Some(SurfaceSignal::Hide(_)) | None => "no link".to_string(),
    }
}
