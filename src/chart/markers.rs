// ============================================================================
// Marqueurs Buy / Sell
// ============================================================================
// Un marqueur par chandelle signalée, décalé de 3% de l'amplitude :
// - achat : sous le plus bas   → low  - 0.03 × (high - low)
// - vente : au-dessus du haut  → high + 0.03 × (high - low)
// ============================================================================

use serde::Serialize;
use tracing::warn;

use crate::models::Bar;

/// Décalage relatif des marqueurs par rapport à l'amplitude de la chandelle
pub const MARKER_OFFSET_RATIO: f64 = 0.03;

/// Position d'un marqueur sur le graphique
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// Catégorie de l'axe X (le label de la chandelle)
    pub time: String,
    pub y: f64,
}

/// Les deux listes de marqueurs, dans l'ordre des chandelles
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Markers {
    pub buy: Vec<Marker>,
    pub sell: Vec<Marker>,
}

impl Markers {
    pub fn len(&self) -> usize {
        self.buy.len() + self.sell.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buy.is_empty() && self.sell.is_empty()
    }
}

/// Extrait les marqueurs à partir des chandelles et des séries high/low
///
/// Les séries `high` et `low` sont alignées par index sur `bars`.
/// Une chandelle portant les deux drapeaux produit les deux marqueurs.
pub fn extract_markers(bars: &[Bar], high: &[f64], low: &[f64]) -> Markers {
    let mut markers = Markers::default();

    for ((bar, &h), &l) in bars.iter().zip(high).zip(low) {
        if bar.has_conflicting_signals() {
            warn!(time = %bar.time, "Bar carries both Buy and Sell signals");
        }

        let offset = MARKER_OFFSET_RATIO * (h - l);

        if bar.buy {
            markers.buy.push(Marker {
                time: bar.time.clone(),
                y: l - offset,
            });
        }
        if bar.sell {
            markers.sell.push(Marker {
                time: bar.time.clone(),
                y: h + offset,
            });
        }
    }

    markers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn bar(time: &str) -> Bar {
        Bar::new(time, 105.0, 110.0, 100.0, 106.0, 500.0)
    }

    #[test]
    fn test_buy_marker_below_low() {
        let bars = vec![bar("t1").with_signals(true, false)];
        let markers = extract_markers(&bars, &[110.0], &[100.0]);

        assert_eq!(markers.buy.len(), 1);
        assert!(markers.sell.is_empty());
        assert_eq!(markers.buy[0].time, "t1");
        assert!(approx(markers.buy[0].y, 99.7));
    }

    #[test]
    fn test_sell_marker_above_high() {
        let bars = vec![bar("t1").with_signals(false, true)];
        let markers = extract_markers(&bars, &[110.0], &[100.0]);

        assert!(markers.buy.is_empty());
        assert!(approx(markers.sell[0].y, 110.3));
    }

    #[test]
    fn test_no_flag_no_marker() {
        let bars = vec![bar("t1"), bar("t2")];
        let markers = extract_markers(&bars, &[110.0, 110.0], &[100.0, 100.0]);
        assert!(markers.is_empty());
    }

    #[test]
    fn test_conflicting_bar_emits_both() {
        let bars = vec![bar("t1").with_signals(true, true)];
        let markers = extract_markers(&bars, &[110.0], &[100.0]);
        assert_eq!(markers.buy.len(), 1);
        assert_eq!(markers.sell.len(), 1);
    }

    #[test]
    fn test_order_follows_bars() {
        let bars = vec![
            bar("t1").with_signals(true, false),
            bar("t2").with_signals(false, true),
            bar("t3").with_signals(true, false),
        ];
        let markers = extract_markers(&bars, &[110.0; 3], &[100.0; 3]);

        let times: Vec<&str> = markers.buy.iter().map(|m| m.time.as_str()).collect();
        assert_eq!(times, vec!["t1", "t3"]);
        assert!(markers.len() <= bars.len());
    }
}
