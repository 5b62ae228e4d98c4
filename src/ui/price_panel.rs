// ============================================================================
// Panneau prix - Rendu texte ligne par ligne
// ============================================================================
// Panneau supérieur du graphique des signaux, dessiné en caractères Unicode :
// - chandeliers japonais (algorithme à 3 zones, seuils 0.25 / 0.75)
// - SMA et EMA en points, avec des trous là où l'indicateur manque
// - volume en barres sur les lignes du bas, avec sa propre échelle
// - marqueurs ▲ (achat, sous la chandelle) et ▼ (vente, au-dessus)
//
// Priorité d'affichage dans une cellule :
// marqueur > moyenne mobile > chandelier > volume
//
// CARACTÈRES UNICODE :
// ┃ Corps plein          │ Mèche pleine
// ╻ Demi-corps (bas)     ╹ Demi-corps (haut)
// ╽ Transition top       ╿ Transition bottom
// ╷ Demi-mèche sup       ╵ Demi-mèche inf
// ============================================================================

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::chart::ChartSeries;

// ============================================================================
// Constantes
// ============================================================================

const UNICODE_VOID: char = ' ';
const UNICODE_BODY: char = '┃';
const UNICODE_HALF_BODY_BOTTOM: char = '╻';
const UNICODE_HALF_BODY_TOP: char = '╹';
const UNICODE_WICK: char = '│';
const UNICODE_TOP: char = '╽';
const UNICODE_BOTTOM: char = '╿';
const UNICODE_UPPER_WICK: char = '╷';
const UNICODE_LOWER_WICK: char = '╵';

const MOVING_AVERAGE_DOT: char = '•';
const BUY_MARKER: char = '▲';
const SELL_MARKER: char = '▼';

/// Barres de volume par huitièmes
const VOLUME_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub const BULLISH_COLOR: Color = Color::Rgb(52, 208, 88);
pub const BEARISH_COLOR: Color = Color::Rgb(234, 74, 90);
pub const SMA_COLOR: Color = Color::Yellow;
pub const EMA_COLOR: Color = Color::Cyan;
const VOLUME_COLOR: Color = Color::Rgb(90, 90, 110);

/// Largeur de l'axe Y (prix)
const Y_AXIS_WIDTH: u16 = 12;

/// Lignes réservées sous le graphique (labels de l'axe X)
const X_AXIS_HEIGHT: u16 = 1;

/// Part des lignes du panneau occupée par le volume (1/5)
const VOLUME_ROWS_DIVISOR: u16 = 5;

/// Marge verticale autour des prix
const PRICE_MARGIN_RATIO: f64 = 0.02;

// ============================================================================
// Structure principale
// ============================================================================

/// Renderer du panneau prix
pub struct PricePanel<'a> {
    series: &'a ChartSeries,
    /// Premier index visible (les derniers points qui tiennent à l'écran)
    start: usize,
    min_price: f64,
    max_price: f64,
    max_volume: Option<f64>,
    /// Ordonnée des marqueurs par index de chandelle
    buy_y: Vec<Option<f64>>,
    sell_y: Vec<Option<f64>>,
    height: u16,
    width: u16,
}

/// Bloc du panneau prix (bordures + légende)
fn panel_block<'a>(title: Line<'a>) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(title)
}

/// Premier index visible quand le panneau prix occupe `area` (bordures comprises)
///
/// Les derniers points qui tiennent en largeur. L'oscillateur reçoit le même
/// index : les deux panneaux partagent la même fenêtre de l'axe X.
pub fn visible_start(len: usize, area: Rect) -> usize {
    let inner = panel_block(Line::default()).inner(area);
    let width = inner.width.saturating_sub(Y_AXIS_WIDTH);
    len.saturating_sub(width as usize)
}

impl<'a> PricePanel<'a> {
    /// Crée le renderer pour une zone intérieure (sans bordures)
    ///
    /// `start` est relevé si la fenêtre demandée ne tient pas en largeur
    pub fn new(series: &'a ChartSeries, start: usize, area: Rect) -> Self {
        let width = area.width.saturating_sub(Y_AXIS_WIDTH);
        let start = start
            .max(series.len().saturating_sub(width as usize))
            .min(series.len());

        let (min_price, max_price) = match series.price_bounds() {
            Some((min, max)) => {
                let margin = (max - min) * PRICE_MARGIN_RATIO;
                (min - margin, max + margin)
            }
            None => (0.0, 1.0),
        };

        let mut buy_y = vec![None; series.len()];
        let mut sell_y = vec![None; series.len()];
        for marker in &series.markers.buy {
            if let Some(i) = series.index_of(&marker.time) {
                buy_y[i] = Some(marker.y);
            }
        }
        for marker in &series.markers.sell {
            if let Some(i) = series.index_of(&marker.time) {
                sell_y[i] = Some(marker.y);
            }
        }

        Self {
            series,
            start,
            min_price,
            max_price,
            max_volume: series.max_volume().filter(|v| *v > 0.0),
            buy_y,
            sell_y,
            height: area.height.saturating_sub(X_AXIS_HEIGHT),
            width,
        }
    }

    /// Convertit un prix en coordonnée de hauteur (0 → bas, height → haut)
    fn price_to_height(&self, price: f64) -> f64 {
        if self.max_price == self.min_price {
            return self.height as f64 / 2.0;
        }

        (price - self.min_price) / (self.max_price - self.min_price) * self.height as f64
    }

    /// Ligne (1..=height) la plus proche d'un prix, None pour un trou
    fn row_of(&self, price: f64) -> Option<u16> {
        if !price.is_finite() {
            return None;
        }
        let row = self.price_to_height(price).round().clamp(1.0, self.height as f64);
        Some(row as u16)
    }

    fn is_bullish(&self, index: usize) -> bool {
        self.series.price.close[index] >= self.series.price.open[index]
    }

    fn candle_color(&self, index: usize) -> Color {
        if self.is_bullish(index) {
            BULLISH_COLOR
        } else {
            BEARISH_COLOR
        }
    }

    /// Caractère du chandelier `index` à la ligne `y`
    ///
    /// Une chandelle avec un prix illisible (NaN) n'est pas dessinée
    fn render_candle(&self, index: usize, y: u16) -> char {
        let price = &self.series.price;
        let (open, high, low, close) = (
            price.open[index],
            price.high[index],
            price.low[index],
            price.close[index],
        );
        if ![open, high, low, close].iter().all(|v| v.is_finite()) {
            return UNICODE_VOID;
        }

        let height_unit = y as f64;
        let high_y = self.price_to_height(high);
        let low_y = self.price_to_height(low);
        let max_y = self.price_to_height(open.max(close));
        let min_y = self.price_to_height(close.min(open));

        // Mèche supérieure
        if high_y.ceil() >= height_unit && height_unit >= max_y.floor() {
            if max_y - height_unit > 0.75 {
                UNICODE_BODY
            } else if max_y - height_unit > 0.25 {
                if high_y - height_unit > 0.75 {
                    UNICODE_TOP
                } else {
                    UNICODE_HALF_BODY_BOTTOM
                }
            } else if high_y - height_unit > 0.75 {
                UNICODE_WICK
            } else if high_y - height_unit > 0.25 {
                UNICODE_UPPER_WICK
            } else {
                UNICODE_VOID
            }
        }
        // Corps
        else if max_y.floor() >= height_unit && height_unit >= min_y.ceil() {
            UNICODE_BODY
        }
        // Mèche inférieure
        else if min_y.ceil() >= height_unit && height_unit >= low_y.floor() {
            if min_y - height_unit < 0.25 {
                UNICODE_BODY
            } else if min_y - height_unit < 0.75 {
                if low_y - height_unit < 0.25 {
                    UNICODE_BOTTOM
                } else {
                    UNICODE_HALF_BODY_TOP
                }
            } else if low_y - height_unit < 0.25 {
                UNICODE_WICK
            } else if low_y - height_unit < 0.75 {
                UNICODE_LOWER_WICK
            } else {
                UNICODE_VOID
            }
        } else {
            UNICODE_VOID
        }
    }

    /// Nombre de lignes du bas réservées au volume
    fn volume_rows(&self) -> u16 {
        (self.height / VOLUME_ROWS_DIVISOR).max(1)
    }

    /// Barre de volume de la chandelle `index` à la ligne `y`
    ///
    /// Échelle propre : le plus gros volume remplit toutes les lignes de volume
    fn volume_char(&self, index: usize, y: u16) -> Option<char> {
        let max_volume = self.max_volume?;
        let volume = self.series.volume[index];
        if !volume.is_finite() || volume <= 0.0 {
            return None;
        }

        let rows = self.volume_rows();
        let level = volume / max_volume * rows as f64;
        let fill = level - (y as f64 - 1.0);

        if fill >= 1.0 {
            Some(VOLUME_LEVELS[7])
        } else if fill > 0.0 {
            let eighth = ((fill * 8.0).ceil() as usize).clamp(1, 8);
            Some(VOLUME_LEVELS[eighth - 1])
        } else {
            None
        }
    }

    /// Cellule (caractère + style) de la chandelle `index` à la ligne `y`
    fn cell(&self, index: usize, y: u16) -> (char, Style) {
        if self.buy_y[index].and_then(|v| self.row_of(v)) == Some(y) {
            return (BUY_MARKER, Style::default().fg(BULLISH_COLOR).add_modifier(Modifier::BOLD));
        }
        if self.sell_y[index].and_then(|v| self.row_of(v)) == Some(y) {
            return (SELL_MARKER, Style::default().fg(BEARISH_COLOR).add_modifier(Modifier::BOLD));
        }
        if self.series.ema[index].and_then(|v| self.row_of(v)) == Some(y) {
            return (MOVING_AVERAGE_DOT, Style::default().fg(EMA_COLOR));
        }
        if self.series.sma[index].and_then(|v| self.row_of(v)) == Some(y) {
            return (MOVING_AVERAGE_DOT, Style::default().fg(SMA_COLOR));
        }

        let candle = self.render_candle(index, y);
        if candle != UNICODE_VOID {
            return (candle, Style::default().fg(self.candle_color(index)));
        }

        if y <= self.volume_rows() {
            if let Some(bar) = self.volume_char(index, y) {
                return (bar, Style::default().fg(VOLUME_COLOR));
            }
        }

        (UNICODE_VOID, Style::default())
    }

    /// Rend une ligne de l'axe Y avec le prix (toutes les 4 lignes)
    fn render_y_axis(&self, y: u16) -> String {
        if y % 4 == 0 {
            let price = self.min_price
                + (y as f64 * (self.max_price - self.min_price) / self.height as f64);
            format!("{:>9.2} │ ", price)
        } else {
            format!("{:>9} │ ", "")
        }
    }

    /// Colonne de chaque point visible
    ///
    /// CONCEPT : Accumulator pattern pour éviter le drift
    /// - Chaque position = index × spacing
    /// - Un point unique est centré
    fn compute_columns(chart_width: usize, count: usize) -> Vec<usize> {
        match count {
            0 => Vec::new(),
            1 => vec![chart_width / 2],
            _ => {
                let spacing = chart_width as f64 / count as f64;
                (0..count)
                    .map(|i| ((i as f64 * spacing).round() as usize).min(chart_width.saturating_sub(1)))
                    .collect()
            }
        }
    }

    /// Génère toutes les lignes du panneau (graphique + axe X)
    pub fn render_lines(&self) -> Vec<Line<'static>> {
        let width = self.width as usize;
        let visible = self.start..self.series.len();
        if visible.is_empty() || width == 0 || self.height == 0 {
            return Vec::new();
        }

        let columns = Self::compute_columns(width, visible.len());
        let mut lines = Vec::with_capacity(self.height as usize + 1);

        // De haut en bas
        for y in (1..=self.height).rev() {
            let mut row = vec![(UNICODE_VOID, Style::default()); width];
            for (offset, index) in visible.clone().enumerate() {
                row[columns[offset]] = self.cell(index, y);
            }

            let mut spans = vec![Span::styled(self.render_y_axis(y), Style::default().fg(Color::Gray))];
            spans.extend(row.into_iter().map(|(ch, style)| Span::styled(ch.to_string(), style)));
            lines.push(Line::from(spans));
        }

        lines.push(self.render_x_axis());
        lines
    }

    /// Premier et dernier label visibles, aux deux extrémités de l'axe
    fn render_x_axis(&self) -> Line<'static> {
        let first = self.series.x.get(self.start).cloned().unwrap_or_default();
        let last = self.series.x.last().cloned().unwrap_or_default();
        let width = self.width as usize;

        let axis = if first == last || first.len() + last.len() + 1 > width {
            format!("{:<width$}", last, width = width)
        } else {
            format!("{}{:>pad$}", first, last, pad = width - first.len())
        };

        Line::from(vec![
            Span::raw(" ".repeat(Y_AXIS_WIDTH as usize)),
            Span::styled(axis, Style::default().fg(Color::Gray)),
        ])
    }
}

// ============================================================================
// Fonction de rendu
// ============================================================================

/// Dessine le panneau prix + volume avec sa légende, à partir de l'index `start`
pub fn render_price_panel(frame: &mut Frame, series: &ChartSeries, start: usize, area: Rect) {
    let names = &series.names;
    let title = Line::from(vec![
        Span::styled(format!(" {} ", series.layout.title), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("┃ {} ", names.price), Style::default().fg(BULLISH_COLOR)),
        Span::styled(format!("• {} ", names.sma), Style::default().fg(SMA_COLOR)),
        Span::styled(format!("• {} ", names.ema), Style::default().fg(EMA_COLOR)),
        Span::styled(format!("▆ {} ", names.volume), Style::default().fg(VOLUME_COLOR)),
        Span::styled(format!("▲ {} ", names.buy), Style::default().fg(BULLISH_COLOR)),
        Span::styled(format!("▼ {} ", names.sell), Style::default().fg(BEARISH_COLOR)),
    ]);

    let block = panel_block(title);

    let inner = block.inner(area);
    let lines = if series.is_empty() {
        vec![Line::from(Span::styled("No data", Style::default().fg(Color::Gray)))]
    } else {
        PricePanel::new(series, start, inner).render_lines()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::build_series;
    use crate::models::Bar;

    fn series() -> ChartSeries {
        let bars = vec![
            Bar::new("t1", 100.0, 110.0, 95.0, 108.0, 1000.0)
                .with_indicators(None, Some(104.0), None, None)
                .with_signals(true, false),
            Bar::new("t2", 108.0, 112.0, 100.0, 101.0, 500.0)
                .with_indicators(Some(105.0), Some(103.0), None, None)
                .with_signals(false, true),
            Bar::default(),
        ];
        build_series(&bars, "Test")
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_render_lines_dimensions() {
        let series = series();
        let panel = PricePanel::new(&series, 0, Rect::new(0, 0, 40, 20));
        let lines = panel.render_lines();

        // 19 lignes de graphique + 1 ligne d'axe X
        assert_eq!(lines.len(), 20);
        assert!(text(&lines[19]).contains("t1"));
    }

    #[test]
    fn test_markers_are_drawn() {
        let series = series();
        let panel = PricePanel::new(&series, 0, Rect::new(0, 0, 40, 20));
        let all: String = panel.render_lines().iter().map(text).collect();

        assert!(all.contains(BUY_MARKER));
        assert!(all.contains(SELL_MARKER));
    }

    #[test]
    fn test_nan_candle_is_blank() {
        let series = series();
        let panel = PricePanel::new(&series, 0, Rect::new(0, 0, 40, 20));
        for y in 1..=panel.height {
            assert_eq!(panel.render_candle(2, y), UNICODE_VOID);
        }
    }

    #[test]
    fn test_volume_uses_own_scale() {
        let series = series();
        let panel = PricePanel::new(&series, 0, Rect::new(0, 0, 40, 21));

        // Plus gros volume : barre pleine sur la première ligne
        assert_eq!(panel.volume_char(0, 1), Some('█'));
        // Volume NaN : rien
        assert_eq!(panel.volume_char(2, 1), None);
        // Au-dessus des lignes de volume : rien
        assert_eq!(panel.volume_char(0, panel.volume_rows() + 1), None);
    }

    #[test]
    fn test_compute_columns() {
        assert!(PricePanel::compute_columns(10, 0).is_empty());
        assert_eq!(PricePanel::compute_columns(10, 1), vec![5]);
        assert_eq!(PricePanel::compute_columns(10, 5), vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_narrow_area_renders_nothing() {
        let series = series();
        let panel = PricePanel::new(&series, 0, Rect::new(0, 0, 10, 10));
        assert!(panel.render_lines().is_empty());
    }

    #[test]
    fn test_visible_start_matches_panel_window() {
        let bars: Vec<Bar> = (0..100)
            .map(|i| Bar::new(format!("t{:03}", i), 100.0, 101.0, 99.0, 100.5, 10.0))
            .collect();
        let series = build_series(&bars, "Test");
        let area = Rect::new(0, 0, 60, 20);

        // 60 - 2 bordures - 12 d'axe Y = 46 colonnes
        let start = visible_start(series.len(), area);
        assert_eq!(start, 54);

        let inner = Rect::new(1, 1, 58, 18);
        let panel = PricePanel::new(&series, start, inner);
        assert_eq!(panel.start, start);
        assert!(text(panel.render_lines().last().unwrap()).contains("t054"));

        // Une fenêtre trop large est ramenée à ce qui tient à l'écran
        assert_eq!(PricePanel::new(&series, 0, inner).start, start);
    }

    #[test]
    fn test_visible_start_short_series() {
        assert_eq!(visible_start(3, Rect::new(0, 0, 60, 20)), 0);
        assert_eq!(visible_start(0, Rect::new(0, 0, 5, 5)), 0);
    }
}
