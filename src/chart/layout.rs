// ============================================================================
// Descripteur de mise en page du graphique
// ============================================================================
// Deux panneaux partagent le même axe X (catégories) :
// - haut (70%) : prix (axe droit) + volume (axe gauche, superposé)
// - bas (30%)  : RSI / MA-RSI, échelle fixe [0, 100], lignes 30 et 70
// ============================================================================

use serde::Serialize;

/// Titre par défaut du graphique
pub const DEFAULT_CHART_TITLE: &str = "VN30F1M Chart";

/// Part de hauteur du panneau prix + volume (en %)
pub const PRICE_PANEL_PERCENT: u16 = 70;

/// Part de hauteur du panneau oscillateur (en %)
pub const OSCILLATOR_PANEL_PERCENT: u16 = 30;

/// Bornes fixes de l'axe RSI
pub const RSI_RANGE: [f64; 2] = [0.0, 100.0];

/// Lignes de référence survente / surachat
pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;

/// Côté d'affichage d'un axe Y
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisSide {
    Left,
    Right,
}

/// Type d'axe X
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    /// Catégories discrètes : pas de trous pour les week-ends
    Category,
}

/// Axe Y
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YAxis {
    pub title: String,
    /// Portion verticale occupée [bas, haut] dans [0, 1]
    pub domain: [f64; 2],
    /// Échelle fixe, None → automatique
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    pub side: AxisSide,
    /// Nom de l'axe superposé ("price" pour le volume)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlaying: Option<String>,
}

/// Ligne horizontale pointillée sur l'axe RSI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub y: f64,
    pub dashed: bool,
}

/// Mise en page complète
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub title: String,
    pub x_axis: AxisKind,
    pub price_axis: YAxis,
    pub volume_axis: YAxis,
    pub rsi_axis: YAxis,
    pub reference_lines: Vec<ReferenceLine>,
    /// Hauteurs relatives [prix, oscillateur] en %
    pub panel_heights: [u16; 2],
}

impl ChartLayout {
    /// Construit la mise en page standard pour un titre donné
    pub fn new(title: impl Into<String>) -> Self {
        let price_domain = [OSCILLATOR_PANEL_PERCENT as f64 / 100.0, 1.0];

        Self {
            title: title.into(),
            x_axis: AxisKind::Category,
            price_axis: YAxis {
                title: "Price".to_string(),
                domain: price_domain,
                range: None,
                side: AxisSide::Right,
                overlaying: None,
            },
            volume_axis: YAxis {
                title: "Volume".to_string(),
                domain: price_domain,
                range: None,
                side: AxisSide::Left,
                overlaying: Some("price".to_string()),
            },
            rsi_axis: YAxis {
                title: "RSI".to_string(),
                domain: [0.0, OSCILLATOR_PANEL_PERCENT as f64 / 100.0],
                range: Some(RSI_RANGE),
                side: AxisSide::Right,
                overlaying: None,
            },
            reference_lines: vec![
                ReferenceLine { y: RSI_OVERSOLD, dashed: true },
                ReferenceLine { y: RSI_OVERBOUGHT, dashed: true },
            ],
            panel_heights: [PRICE_PANEL_PERCENT, OSCILLATOR_PANEL_PERCENT],
        }
    }
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self::new(DEFAULT_CHART_TITLE)
    }
}
