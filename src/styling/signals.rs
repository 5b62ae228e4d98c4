// ============================================================================
// Règles de style : tableau des signaux
// ============================================================================
// Table explicite colonne → règle. Chaque colonne est évaluée
// indépendamment : une même Bar peut être mise en évidence dans
// plusieurs colonnes.
//
// Comparaisons strictes (>) : à égalité, aucune des deux colonnes n'est
// mise en évidence. Opérande manquant → None.
// ============================================================================

use std::str::FromStr;

use anyhow::bail;

use crate::models::Bar;
use crate::styling::CellClass;

/// Colonnes du tableau des signaux, dans l'ordre d'affichage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalColumn {
    Name,
    Category,
    Source,
    Time,
    Open,
    High,
    Low,
    Close,
    Volume,
    Sma,
    Ema,
    Rsi,
    MaRsi,
    Buy,
    Sell,
}

impl SignalColumn {
    /// Toutes les colonnes, dans l'ordre du tableau
    pub const ALL: [SignalColumn; 15] = [
        SignalColumn::Name,
        SignalColumn::Category,
        SignalColumn::Source,
        SignalColumn::Time,
        SignalColumn::Open,
        SignalColumn::High,
        SignalColumn::Low,
        SignalColumn::Close,
        SignalColumn::Volume,
        SignalColumn::Sma,
        SignalColumn::Ema,
        SignalColumn::Rsi,
        SignalColumn::MaRsi,
        SignalColumn::Buy,
        SignalColumn::Sell,
    ];

    /// Identifiant de colonne (clé du feed)
    pub fn id(&self) -> &'static str {
        match self {
            SignalColumn::Name => "name",
            SignalColumn::Category => "category",
            SignalColumn::Source => "source",
            SignalColumn::Time => "time",
            SignalColumn::Open => "open",
            SignalColumn::High => "high",
            SignalColumn::Low => "low",
            SignalColumn::Close => "close",
            SignalColumn::Volume => "volume",
            SignalColumn::Sma => "sma",
            SignalColumn::Ema => "ema",
            SignalColumn::Rsi => "rsi",
            SignalColumn::MaRsi => "ma_rsi",
            SignalColumn::Buy => "Buy",
            SignalColumn::Sell => "Sell",
        }
    }

    /// En-tête affiché dans le tableau
    pub fn header(&self) -> &'static str {
        match self {
            SignalColumn::Name => "Name",
            SignalColumn::Category => "Category",
            SignalColumn::Source => "Source",
            SignalColumn::Time => "Time",
            SignalColumn::Open => "Open",
            SignalColumn::High => "High",
            SignalColumn::Low => "Low",
            SignalColumn::Close => "Close",
            SignalColumn::Volume => "Volume",
            SignalColumn::Sma => "SMA",
            SignalColumn::Ema => "EMA",
            SignalColumn::Rsi => "RSI",
            SignalColumn::MaRsi => "MA RSI",
            SignalColumn::Buy => "Buy",
            SignalColumn::Sell => "Sell",
        }
    }
}

impl FromStr for SignalColumn {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match SignalColumn::ALL.iter().find(|column| column.id() == s) {
            Some(column) => Ok(*column),
            None => bail!("Colonne de signal inconnue : {}", s),
        }
    }
}

/// Règle de style : fonction pure Bar → CellClass
type SignalRule = fn(&Bar) -> CellClass;

/// Table des règles
///
/// CONCEPT : Table de dispatch
/// - Remplace une chaîne de if par une association explicite
/// - Une colonne absente de la table n'a jamais de style
const SIGNAL_RULES: &[(SignalColumn, SignalRule)] = &[
    (SignalColumn::Buy, buy_rule),
    (SignalColumn::Sell, sell_rule),
    (SignalColumn::Close, close_rule),
    (SignalColumn::Sma, sma_rule),
    (SignalColumn::Ema, ema_rule),
    (SignalColumn::Rsi, rsi_rule),
    (SignalColumn::MaRsi, ma_rsi_rule),
];

/// Classe une cellule du tableau des signaux
pub fn classify_signal(bar: &Bar, column: SignalColumn) -> CellClass {
    SIGNAL_RULES
        .iter()
        .find(|(rule_column, _)| *rule_column == column)
        .map(|(_, rule)| rule(bar))
        .unwrap_or(CellClass::None)
}

/// Variante par identifiant texte : colonne inconnue → None
pub fn classify_signal_by_id(bar: &Bar, column_id: &str) -> CellClass {
    column_id
        .parse::<SignalColumn>()
        .map(|column| classify_signal(bar, column))
        .unwrap_or(CellClass::None)
}

fn buy_rule(bar: &Bar) -> CellClass {
    if bar.buy {
        CellClass::PositiveHighlight
    } else {
        CellClass::None
    }
}

fn sell_rule(bar: &Bar) -> CellClass {
    if bar.sell {
        CellClass::NegativeHighlight
    } else {
        CellClass::None
    }
}

/// Buy est prioritaire sur Sell (les deux ne devraient jamais coexister)
fn close_rule(bar: &Bar) -> CellClass {
    if bar.buy {
        CellClass::PositiveHighlight
    } else if bar.sell {
        CellClass::NegativeHighlight
    } else {
        CellClass::None
    }
}

fn sma_rule(bar: &Bar) -> CellClass {
    when_greater(bar.sma, bar.ema, CellClass::NegativeText)
}

fn ema_rule(bar: &Bar) -> CellClass {
    when_greater(bar.ema, bar.sma, CellClass::PositiveText)
}

fn rsi_rule(bar: &Bar) -> CellClass {
    when_greater(bar.rsi, bar.ma_rsi, CellClass::PositiveText)
}

fn ma_rsi_rule(bar: &Bar) -> CellClass {
    when_greater(bar.ma_rsi, bar.rsi, CellClass::NegativeText)
}

/// Retourne `class` si left > right strictement, les deux étant présents
fn when_greater(left: Option<f64>, right: Option<f64>, class: CellClass) -> CellClass {
    match (left, right) {
        (Some(l), Some(r)) if l > r => class,
        _ => CellClass::None,
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
