// ============================================================================
// Écran Stocks
// ============================================================================
// En-tête "Last Filtered ... UTC" + total, puis le tableau du screener
//
// CONCEPT RATATUI : TableState
// - Le tableau peut dépasser la hauteur de l'écran
// - render_stateful_widget fait défiler jusqu'à la ligne sélectionnée
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::format::format_value;
use crate::models::{Stock, StocksFeed};
use crate::styling::{classify_stock, StockColumn};
use crate::ui::table::{cell_style, header_style, selected_style};

/// Dessine l'écran du screener
pub fn render_stocks(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_header(frame, app.stocks.as_ref(), chunks[0]);

    match app.stocks.as_ref() {
        Some(feed) => render_table(frame, feed, app.selected_index, chunks[1]),
        None => {
            let paragraph = Paragraph::new(Span::styled(
                "Waiting for data...",
                Style::default().fg(Color::Gray),
            ))
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
            frame.render_widget(paragraph, chunks[1]);
        }
    }
}

fn render_header(frame: &mut Frame, feed: Option<&StocksFeed>, area: Rect) {
    let label = feed.map(|f| f.last_filtered_label()).unwrap_or("N/A");
    let total = feed.map(|f| f.total).unwrap_or(0);
    let bold = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::styled("Last Filtered: ", Style::default().fg(Color::Gray)),
        Span::styled(format!("{} UTC", label), bold),
        Span::raw("    "),
        Span::styled("Total: ", Style::default().fg(Color::Gray)),
        Span::styled(total.to_string(), bold),
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

/// Texte d'une cellule du screener
///
/// Les métriques passent par le formateur : "N/A" → cellule vide
fn cell_text(stock: &Stock, column: StockColumn) -> String {
    match column {
        StockColumn::Ticker => stock.ticker.clone(),
        StockColumn::HasFinancialReport => stock.report_label(),
        _ => column.value(stock).map(format_value).unwrap_or_default(),
    }
}

fn render_table(frame: &mut Frame, feed: &StocksFeed, selected: usize, area: Rect) {
    let header = Row::new(StockColumn::ALL.iter().map(|c| Cell::from(c.header())))
        .style(header_style())
        .height(1);

    let rows: Vec<Row> = feed
        .filtered_stocks
        .iter()
        .map(|stock| {
            Row::new(StockColumn::ALL.iter().map(|&column| {
                Cell::from(cell_text(stock, column)).style(cell_style(classify_stock(stock, column)))
            }))
        })
        .collect();

    let widths: Vec<Constraint> = StockColumn::ALL
        .iter()
        .map(|column| Constraint::Min(column.header().len().min(12) as u16))
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .highlight_style(selected_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" Filtered stocks ({}) ", feed.len())),
        );

    let mut state = TableState::default();
    if !feed.is_empty() {
        state.select(Some(selected));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawValue;

    #[test]
    fn test_cell_text() {
        let mut stock = Stock::new("FPT");
        stock.has_financial_report = RawValue::from("Yes");
        stock.net_margin = RawValue::from(12.3456);
        stock.eps_growth_1y = RawValue::from("N/A");

        assert_eq!(cell_text(&stock, StockColumn::Ticker), "FPT");
        assert_eq!(cell_text(&stock, StockColumn::HasFinancialReport), "Yes");
        assert_eq!(cell_text(&stock, StockColumn::NetMargin), "12.35");
        assert_eq!(cell_text(&stock, StockColumn::EpsGrowth1Year), "");
        assert_eq!(cell_text(&stock, StockColumn::RelativeStrength1Month), "");
    }
}
