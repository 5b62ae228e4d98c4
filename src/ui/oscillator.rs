// ============================================================================
// Panneau oscillateur - RSI / MA-RSI
// ============================================================================
// Panneau inférieur du graphique des signaux : widget Chart de ratatui
// sur une échelle fixe [0, 100], avec les lignes pointillées 30 et 70
//
// CONCEPTS RATATUI :
// 1. Chart widget : plusieurs Dataset sur les mêmes axes
// 2. Un Dataset par segment continu : un trou dans la série reste un trou
// 3. GraphType::Scatter pour simuler une ligne pointillée
// ============================================================================

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use crate::chart::layout::{RSI_OVERBOUGHT, RSI_OVERSOLD};
use crate::chart::ChartSeries;

const RSI_COLOR: Color = Color::Magenta;
const MA_RSI_COLOR: Color = Color::LightBlue;
const REFERENCE_COLOR: Color = Color::DarkGray;

/// Pas entre deux points d'une ligne pointillée (en unités de l'axe X)
const DASH_STEP: f64 = 0.5;

/// Découpe une série à trous en segments continus de points (x, y)
///
/// Seuls les points à partir de `start` sont gardés, avec leur index d'origine
/// comme abscisse.
///
/// CONCEPT RUST : Option dans un itérateur
/// - Some(v) prolonge le segment courant
/// - None ferme le segment : la ligne n'est jamais tracée à travers un trou
pub fn contiguous_segments(values: &[Option<f64>], start: usize) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();

    for (i, value) in values.iter().enumerate().skip(start) {
        match value.filter(|v| v.is_finite()) {
            Some(v) => current.push((i as f64, v)),
            None => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Points d'une ligne horizontale pointillée entre `x_min` et `x_max`
fn dashed_line(level: f64, [x_min, x_max]: [f64; 2]) -> Vec<(f64, f64)> {
    let steps = ((x_max - x_min) / DASH_STEP).floor() as usize;
    (0..=steps).map(|i| (x_min + i as f64 * DASH_STEP, level)).collect()
}

/// Bornes de l'axe X pour la fenêtre `start..len`
///
/// Mêmes index que le panneau prix ; une fenêtre d'un seul point reste large de 1
pub fn x_bounds(len: usize, start: usize) -> [f64; 2] {
    let last = len.saturating_sub(1);
    let first = start.min(last);
    [first as f64, last.max(first + 1) as f64]
}

/// Dessine le panneau RSI / MA-RSI pour les points à partir de `start`
pub fn render_oscillator(frame: &mut Frame, series: &ChartSeries, start: usize, area: Rect) {
    let layout = &series.layout;
    let bounds = x_bounds(series.len(), start);

    // Données possédées d'abord : les Dataset ne font qu'emprunter
    let rsi_segments = contiguous_segments(&series.rsi, start);
    let ma_rsi_segments = contiguous_segments(&series.ma_rsi, start);
    let reference_lines: Vec<Vec<(f64, f64)>> = layout
        .reference_lines
        .iter()
        .map(|line| dashed_line(line.y, bounds))
        .collect();

    let mut datasets = Vec::new();

    for points in &reference_lines {
        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(REFERENCE_COLOR))
                .data(points),
        );
    }

    for (segments, name, color) in [
        (&rsi_segments, series.names.rsi, RSI_COLOR),
        (&ma_rsi_segments, series.names.ma_rsi, MA_RSI_COLOR),
    ] {
        for (i, points) in segments.iter().enumerate() {
            let mut dataset = Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(color))
                .data(points);
            // Un seul nom par série dans la légende
            if i == 0 {
                dataset = dataset.name(name);
            }
            datasets.push(dataset);
        }
    }

    let [y_min, y_max] = layout.rsi_axis.range.unwrap_or([0.0, 100.0]);

    let x_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds(bounds);

    let y_axis = Axis::default()
        .title(layout.rsi_axis.title.as_str())
        .style(Style::default().fg(Color::Gray))
        .bounds([y_min, y_max])
        .labels(
            [y_min, RSI_OVERSOLD, RSI_OVERBOUGHT, y_max]
                .iter()
                .map(|v| Span::raw(format!("{:.0}", v)))
                .collect(),
        );

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} / {} ", series.names.rsi, series.names.ma_rsi)),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_split_on_gaps() {
        let values = [Some(50.0), Some(55.0), None, Some(60.0), None, None, Some(40.0), Some(45.0)];
        let segments = contiguous_segments(&values, 0);

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], vec![(0.0, 50.0), (1.0, 55.0)]);
        assert_eq!(segments[1], vec![(3.0, 60.0)]);
        assert_eq!(segments[2], vec![(6.0, 40.0), (7.0, 45.0)]);
    }

    #[test]
    fn test_segments_keep_zero() {
        let segments = contiguous_segments(&[Some(0.0), Some(0.0)], 0);
        assert_eq!(segments, vec![vec![(0.0, 0.0), (1.0, 0.0)]]);
    }

    #[test]
    fn test_segments_empty() {
        assert!(contiguous_segments(&[], 0).is_empty());
        assert!(contiguous_segments(&[None, None], 0).is_empty());
    }

    #[test]
    fn test_dashed_line() {
        let points = dashed_line(30.0, [0.0, 2.0]);
        assert_eq!(points.len(), 5);
        assert!(points.iter().all(|&(_, y)| y == 30.0));
        assert_eq!(points.last(), Some(&(2.0, 30.0)));

        let points = dashed_line(70.0, [52.0, 53.0]);
        assert_eq!(points.first(), Some(&(52.0, 70.0)));
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn test_segments_start_at_window() {
        let values = [Some(10.0), Some(20.0), None, Some(40.0), Some(50.0)];
        let segments = contiguous_segments(&values, 3);
        assert_eq!(segments, vec![vec![(3.0, 40.0), (4.0, 50.0)]]);
    }

    #[test]
    fn test_x_bounds() {
        assert_eq!(x_bounds(100, 54), [54.0, 99.0]);
        assert_eq!(x_bounds(100, 0), [0.0, 99.0]);
        assert_eq!(x_bounds(1, 0), [0.0, 1.0]);
        assert_eq!(x_bounds(0, 0), [0.0, 1.0]);
    }

    #[test]
    fn test_both_panels_share_the_window() {
        use crate::chart::build_series;
        use crate::models::Bar;
        use crate::ui::price_panel::visible_start;

        let bars: Vec<Bar> = (0..100)
            .map(|i| {
                Bar::new(format!("t{:03}", i), 100.0, 101.0, 99.0, 100.5, 10.0)
                    .with_indicators(None, None, Some(50.0), None)
            })
            .collect();
        let series = build_series(&bars, "Test");

        let start = visible_start(series.len(), Rect::new(0, 0, 60, 20));
        assert!(start > 0);

        let [x_min, x_max] = x_bounds(series.len(), start);
        assert_eq!(x_min, start as f64);
        assert_eq!(x_max, 99.0);

        // Aucun point RSI hors de la fenêtre du panneau prix
        let segments = contiguous_segments(&series.rsi, start);
        assert!(segments.iter().flatten().all(|&(x, _)| x >= x_min && x <= x_max));
        assert_eq!(segments.iter().map(Vec::len).sum::<usize>(), 100 - start);
    }
}
