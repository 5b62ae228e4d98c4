// ============================================================================
// Module : chart
// ============================================================================
// Données du graphique indépendantes du rendu terminal :
// séries alignées, marqueurs Buy/Sell et descripteur de mise en page
// ============================================================================

pub mod layout;  // Axes, panneaux, lignes de référence
pub mod markers; // Position des marqueurs Buy / Sell
pub mod series;  // Séries prix, moyennes, volume, RSI

pub use layout::{ChartLayout, DEFAULT_CHART_TITLE};
pub use markers::{extract_markers, Marker, Markers, MARKER_OFFSET_RATIO};
pub use series::{build_series, ChartSeries, PriceSeries};
