// ============================================================================
// Écran Signals
// ============================================================================
// En-tête "Last trigger", tableau des 10 dernières chandelles,
// puis le graphique : panneau prix + volume (70%) et oscillateur (30%)
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::{App, SIGNAL_TABLE_ROWS};
use crate::chart::layout::{OSCILLATOR_PANEL_PERCENT, PRICE_PANEL_PERCENT};
use crate::chart::build_series;
use crate::format::{format_flag, format_optional, format_price};
use crate::models::{Bar, SignalsFeed};
use crate::styling::{classify_signal, SignalColumn};
use crate::ui::oscillator::render_oscillator;
use crate::ui::price_panel::{render_price_panel, visible_start};
use crate::ui::table::{cell_style, header_style, selected_style};

/// Hauteur du tableau : bordures + en-tête + lignes
const TABLE_HEIGHT: u16 = SIGNAL_TABLE_ROWS as u16 + 3;

/// Dessine l'écran des signaux
pub fn render_signals(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Last trigger
            Constraint::Length(TABLE_HEIGHT), // Tableau
            Constraint::Min(0),               // Graphique
        ])
        .split(area);

    let Some(feed) = app.signals.as_ref() else {
        render_header(frame, None, chunks[0]);
        render_waiting(frame, chunks[1].union(chunks[2]));
        return;
    };

    render_header(frame, Some(feed), chunks[0]);
    render_table(frame, feed, app.selected_index, chunks[1]);
    render_chart(frame, feed, &app.chart_title, chunks[2]);
}

fn render_header(frame: &mut Frame, feed: Option<&SignalsFeed>, area: Rect) {
    let label = feed.map(|f| f.last_triggered_label()).unwrap_or("N/A");

    let line = Line::from(vec![
        Span::styled("Last trigger: ", Style::default().fg(Color::Gray)),
        Span::styled(
            label.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ]);

    let paragraph = Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Texte d'une cellule du tableau des signaux
fn cell_text(bar: &Bar, column: SignalColumn) -> String {
    match column {
        SignalColumn::Name => bar.name.clone(),
        SignalColumn::Category => bar.category.clone(),
        SignalColumn::Source => bar.source.clone(),
        SignalColumn::Time => bar.time.clone(),
        SignalColumn::Open => format_price(bar.open),
        SignalColumn::High => format_price(bar.high),
        SignalColumn::Low => format_price(bar.low),
        SignalColumn::Close => format_price(bar.close),
        SignalColumn::Volume => format_price(bar.volume),
        SignalColumn::Sma => format_optional(bar.sma),
        SignalColumn::Ema => format_optional(bar.ema),
        SignalColumn::Rsi => format_optional(bar.rsi),
        SignalColumn::MaRsi => format_optional(bar.ma_rsi),
        SignalColumn::Buy => format_flag(bar.buy).to_string(),
        SignalColumn::Sell => format_flag(bar.sell).to_string(),
    }
}

/// Largeur de colonne
fn column_width(column: SignalColumn) -> Constraint {
    match column {
        SignalColumn::Time => Constraint::Length(19),
        SignalColumn::Name | SignalColumn::Category | SignalColumn::Source => Constraint::Min(6),
        SignalColumn::Buy | SignalColumn::Sell => Constraint::Length(4),
        _ => Constraint::Length(9),
    }
}

fn render_table(frame: &mut Frame, feed: &SignalsFeed, selected: usize, area: Rect) {
    let header = Row::new(SignalColumn::ALL.iter().map(|c| Cell::from(c.header())))
        .style(header_style());

    let rows: Vec<Row> = feed
        .last_rows(SIGNAL_TABLE_ROWS)
        .iter()
        .enumerate()
        .map(|(index, bar)| {
            let cells = SignalColumn::ALL.iter().map(|&column| {
                Cell::from(cell_text(bar, column)).style(cell_style(classify_signal(bar, column)))
            });
            let row = Row::new(cells);
            if index == selected {
                row.style(selected_style())
            } else {
                row
            }
        })
        .collect();

    let widths: Vec<Constraint> = SignalColumn::ALL.iter().map(|&c| column_width(c)).collect();

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" Signals ({} rows) ", feed.total)),
    );

    frame.render_widget(table, area);
}

fn render_chart(frame: &mut Frame, feed: &SignalsFeed, title: &str, area: Rect) {
    let series = build_series(&feed.data, title);

    let panels = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(PRICE_PANEL_PERCENT),
            Constraint::Percentage(OSCILLATOR_PANEL_PERCENT),
        ])
        .split(area);

    // Une seule fenêtre de l'axe X pour les deux panneaux
    let start = visible_start(series.len(), panels[0]);
    render_price_panel(frame, &series, start, panels[0]);
    render_oscillator(frame, &series, start, panels[1]);
}

fn render_waiting(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        "Waiting for data...",
        Style::default().fg(Color::Gray),
    )))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
