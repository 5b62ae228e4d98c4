// ============================================================================
// Shell - Cadre commun de l'interface
// ============================================================================
// Barre d'onglets en haut, écran courant au centre, raccourcis en bas,
// et popup de notification par-dessus le tout
//
// CONCEPTS RATATUI :
// 1. Layout : découpage header / contenu / footer
// 2. Clear : efface une zone avant d'y dessiner un popup
// 3. Spans multiples dans une Line : plusieurs couleurs sur une ligne
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Screen};
use crate::ui::signals_view::render_signals;
use crate::ui::stocks_view::render_stocks;

/// Dessine l'interface complète
///
/// CONCEPT RUST : Routing avec match sur enum
/// - Le compilateur garantit que chaque écran est géré
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_tabs(frame, app, chunks[0]);

    match app.current_screen {
        Screen::Signals => render_signals(frame, app, chunks[1]),
        Screen::Stocks => render_stocks(frame, app, chunks[1]),
    }

    render_footer(frame, app, chunks[2]);

    if let Some(message) = app.notification.as_deref() {
        render_notification(frame, message);
    }
}

/// Crée le layout principal (onglets, contenu, footer)
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Onglets
            Constraint::Min(0),    // Écran courant
            Constraint::Length(3), // Footer
        ])
        .split(area)
        .to_vec()
}

// ============================================================================
// Header : onglets
// ============================================================================

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();

    for (i, screen) in Screen::ALL.iter().enumerate() {
        let label = format!(" [{}] {} ", i + 1, screen.title());
        let style = if *screen == app.current_screen {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw("  "));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Signalboard ")
        .title_alignment(Alignment::Center);

    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Footer : raccourcis, confirmation de sortie, chargement
// ============================================================================

fn key_style(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Contenu du footer selon l'état
///
/// Priorité : confirmation de sortie, puis chargement, puis raccourcis
fn footer_line(app: &App) -> Line<'static> {
    if app.is_awaiting_quit_confirmation() {
        return Line::from(vec![
            Span::styled("⚠  Press ", key_style(Color::Yellow)),
            Span::styled(
                "[q]",
                key_style(Color::Red).add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " again to quit, any other key to cancel ⚠",
                key_style(Color::Yellow),
            ),
        ]);
    }

    if app.is_loading_data() {
        let message = app
            .loading_message
            .clone()
            .unwrap_or_else(|| "Loading...".to_string());
        return Line::from(vec![
            Span::styled("⏳ ", key_style(Color::Yellow)),
            Span::styled(message, key_style(Color::Yellow)),
        ]);
    }

    Line::from(vec![
        Span::styled("[q]", key_style(Color::Yellow)),
        Span::raw(" Quit  "),
        Span::styled("[1/2/Tab]", key_style(Color::Yellow)),
        Span::raw(" Screen  "),
        Span::styled("[r]", key_style(Color::Green)),
        Span::raw(" Refresh  "),
        Span::styled("[↑↓ / j k]", key_style(Color::Yellow)),
        Span::raw(" Scroll"),
    ])
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(footer_line(app))
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Popup de notification
// ============================================================================

/// Zone centrée de `percent_x`% de large et `height` lignes de haut
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_notification(frame: &mut Frame, message: &str) {
    let area = centered_rect(60, 7, frame.size());

    let text = vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter/Esc]", key_style(Color::Yellow)),
            Span::raw(" Close"),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .title(" Notification "),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests unitaires
// ============================================================================
