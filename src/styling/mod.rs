// ============================================================================
// Module : styling
// ============================================================================
// Décide quel style s'applique à quelle cellule des tableaux
//
// Le module ne fait que la DÉCISION (CellClass). La traduction en couleurs
// terminal est faite dans ui::table.
// ============================================================================

pub mod signals; // Règles du tableau des signaux
pub mod stocks;  // Règles du tableau du screener

pub use signals::{classify_signal, classify_signal_by_id, SignalColumn};
pub use stocks::{classify_stock, classify_stock_by_id, StockColumn};

/// Catégorie de mise en évidence d'une cellule
///
/// CONCEPT RUST : Enum sans données + Copy
/// - Petit type valeur, copié librement
/// - Le match exhaustif garantit qu'aucune catégorie n'est oubliée
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellClass {
    /// Pas de style particulier
    #[default]
    None,
    /// Fond positif (vert)
    PositiveHighlight,
    /// Fond négatif (rouge)
    NegativeHighlight,
    /// Texte positif (vert)
    PositiveText,
    /// Texte négatif (rouge)
    NegativeText,
}

impl CellClass {
    /// Nom de classe CSS équivalent (stable, utile pour un rendu externe)
    pub fn css_class(&self) -> &'static str {
        match self {
            CellClass::None => "",
            CellClass::PositiveHighlight => "positive-bg",
            CellClass::NegativeHighlight => "negative-bg",
            CellClass::PositiveText => "positive-text",
            CellClass::NegativeText => "negative-text",
        }
    }

    pub fn is_none(&self) -> bool {
        *self == CellClass::None
    }
}
