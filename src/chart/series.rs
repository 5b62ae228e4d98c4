// ============================================================================
// Construction des séries du graphique
// ============================================================================
// Transforme la liste de chandelles en séries nommées, toutes alignées
// par index sur le même axe X (les labels "time", dans l'ordre reçu)
//
// CONCEPTS RUST :
// 1. Option<f64> dans les séries : un trou reste un trou, jamais 0
// 2. Iterator::map + collect : une passe par série, pas de boucle d'index
// ============================================================================

use serde::Serialize;
use tracing::debug;

use crate::chart::layout::ChartLayout;
use crate::chart::markers::{extract_markers, Markers};
use crate::models::Bar;

/// Séries OHLC alignées par index
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceSeries {
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
}

/// Noms affichés des séries (légende)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesNames {
    pub price: &'static str,
    pub sma: &'static str,
    pub ema: &'static str,
    pub volume: &'static str,
    pub buy: &'static str,
    pub sell: &'static str,
    pub rsi: &'static str,
    pub ma_rsi: &'static str,
}

impl Default for SeriesNames {
    fn default() -> Self {
        Self {
            price: "OHLC",
            sma: "SMA",
            ema: "EMA",
            volume: "Volume",
            buy: "Buy",
            sell: "Sell",
            rsi: "RSI",
            ma_rsi: "MA-RSI",
        }
    }
}

/// Ensemble complet prêt à dessiner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    /// Domaine X partagé
    pub x: Vec<String>,
    pub price: PriceSeries,
    pub sma: Vec<Option<f64>>,
    pub ema: Vec<Option<f64>>,
    pub volume: Vec<f64>,
    pub rsi: Vec<Option<f64>>,
    pub ma_rsi: Vec<Option<f64>>,
    pub markers: Markers,
    pub names: SeriesNames,
    pub layout: ChartLayout,
}

impl ChartSeries {
    /// Nombre de points sur l'axe X
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Bornes (min, max) des prix et moyennes mobiles, en ignorant les trous
    ///
    /// None si aucune valeur finie
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        let values = self
            .price
            .high
            .iter()
            .chain(&self.price.low)
            .copied()
            .chain(self.sma.iter().flatten().copied())
            .chain(self.ema.iter().flatten().copied())
            .chain(self.markers.buy.iter().map(|m| m.y))
            .chain(self.markers.sell.iter().map(|m| m.y));
        finite_bounds(values)
    }

    /// Plus gros volume fini (None si aucun)
    pub fn max_volume(&self) -> Option<f64> {
        finite_bounds(self.volume.iter().copied()).map(|(_, max)| max)
    }

    /// Index d'une catégorie X
    pub fn index_of(&self, time: &str) -> Option<usize> {
        self.x.iter().position(|t| t == time)
    }
}

/// Construit toutes les séries à partir des chandelles
///
/// # Exemple
/// let series = build_series(&feed.data, "VN30F1M Chart");
/// assert_eq!(series.len(), feed.data.len());
pub fn build_series(bars: &[Bar], title: &str) -> ChartSeries {
    let price = PriceSeries {
        open: bars.iter().map(|b| b.open).collect(),
        high: bars.iter().map(|b| b.high).collect(),
        low: bars.iter().map(|b| b.low).collect(),
        close: bars.iter().map(|b| b.close).collect(),
    };

    let markers = extract_markers(bars, &price.high, &price.low);

    debug!(
        bars = bars.len(),
        buy_markers = markers.buy.len(),
        sell_markers = markers.sell.len(),
        "Built chart series"
    );

    ChartSeries {
        x: bars.iter().map(|b| b.time.clone()).collect(),
        sma: bars.iter().map(|b| b.sma).collect(),
        ema: bars.iter().map(|b| b.ema).collect(),
        volume: bars.iter().map(|b| b.volume).collect(),
        rsi: bars.iter().map(|b| b.rsi).collect(),
        ma_rsi: bars.iter().map(|b| b.ma_rsi).collect(),
        price,
        markers,
        names: SeriesNames::default(),
        layout: ChartLayout::new(title),
    }
}

/// Min / max des valeurs finies d'un itérateur
fn finite_bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bars() -> Vec<Bar> {
        vec![
            Bar::new("2024-05-02 09:00:00", 100.0, 110.0, 100.0, 105.0, 1000.0)
                .with_indicators(None, Some(104.0), None, None)
                .with_signals(true, false),
            Bar::new("2024-05-02 10:00:00", 105.0, 112.0, 103.0, 108.0, 1500.0)
                .with_indicators(Some(106.0), Some(106.5), Some(55.0), None),
            Bar::new("2024-05-02 11:00:00", 108.0, 109.0, 101.0, 102.0, 900.0)
                .with_indicators(Some(105.0), Some(104.0), Some(45.0), Some(50.0))
                .with_signals(true, false),
        ]
    }

    #[test]
    fn test_all_series_share_length() {
        let bars = sample_bars();
        let series = build_series(&bars, "Test");

        assert_eq!(series.len(), 3);
        assert_eq!(series.price.open.len(), 3);
        assert_eq!(series.price.close.len(), 3);
        assert_eq!(series.sma.len(), 3);
        assert_eq!(series.ema.len(), 3);
        assert_eq!(series.volume.len(), 3);
        assert_eq!(series.rsi.len(), 3);
        assert_eq!(series.ma_rsi.len(), 3);
    }

    #[test]
    fn test_x_domain_keeps_input_order() {
        let bars = sample_bars();
        let series = build_series(&bars, "Test");

        let expected: Vec<String> = bars.iter().map(|b| b.time.clone()).collect();
        assert_eq!(series.x, expected);
        assert_eq!(series.index_of("2024-05-02 10:00:00"), Some(1));
    }

    #[test]
    fn test_missing_indicators_stay_gaps() {
        let series = build_series(&sample_bars(), "Test");

        assert_eq!(series.sma[0], None);
        assert_eq!(series.sma[1], Some(106.0));
        assert_eq!(series.ma_rsi, vec![None, None, Some(50.0)]);
    }

    #[test]
    fn test_markers_end_to_end() {
        let series = build_series(&sample_bars(), "Test");

        // 3 chandelles dont 2 achats
        assert_eq!(series.markers.buy.len(), 2);
        assert_eq!(series.markers.sell.len(), 0);
        assert!((series.markers.buy[0].y - 99.7).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_keeps_layout() {
        let series = build_series(&[], "VN30F1M Chart");

        assert!(series.is_empty());
        assert!(series.markers.is_empty());
        assert_eq!(series.layout.title, "VN30F1M Chart");
        assert_eq!(series.price_bounds(), None);
        assert_eq!(series.max_volume(), None);
    }

    #[test]
    fn test_bounds_skip_nan() {
        let mut bars = sample_bars();
        bars.push(Bar::default());
        let series = build_series(&bars, "Test");

        let (min, max) = series.price_bounds().unwrap();
        assert!((min - 99.7).abs() < 1e-9);
        assert_eq!(max, 112.0);
        assert_eq!(series.max_volume(), Some(1500.0));
    }

    #[test]
    fn test_series_serialize_with_names() {
        let json = serde_json::to_value(build_series(&sample_bars(), "Test")).unwrap();

        assert_eq!(json["names"]["ma_rsi"], "MA-RSI");
        assert_eq!(json["sma"][0], serde_json::Value::Null);
        assert_eq!(json["layout"]["title"], "Test");
    }
}
