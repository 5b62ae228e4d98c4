// ============================================================================
// Structure : Stock et StocksFeed
// ============================================================================
// Un Stock = une ligne du screener fondamental (croissance, marges, force)
// Le StocksFeed est le snapshot renvoyé par GET /stocks
//
// Les métriques restent des RawValue : le backend peut envoyer "N/A"
// et le classifieur doit alors répondre "none" sans erreur
// ============================================================================

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::models::bar::{parse_timestamp, NOT_AVAILABLE};
use crate::models::value::{de_count, de_label, de_rows, de_timestamp_label, RawValue};

/// Valeur affirmative du champ "hasFinancialReport.en"
pub const REPORT_PRESENT: &str = "Yes";

/// Ligne du screener
///
/// CONCEPT RUST : #[serde(rename = "...")]
/// - Les clés JSON sont en camelCase (et une contient un point)
/// - Les noms Rust restent en snake_case lisible
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Stock {
    #[serde(deserialize_with = "de_label")]
    pub ticker: String,

    /// Label Yes/No indiquant si un rapport financier est publié
    #[serde(rename = "hasFinancialReport.en")]
    pub has_financial_report: RawValue,

    #[serde(rename = "revenueGrowth1Year")]
    pub revenue_growth_1y: RawValue,

    #[serde(rename = "revenueGrowth5Year")]
    pub revenue_growth_5y: RawValue,

    #[serde(rename = "epsGrowth1Year")]
    pub eps_growth_1y: RawValue,

    #[serde(rename = "epsGrowth5Year")]
    pub eps_growth_5y: RawValue,

    #[serde(rename = "lastQuarterProfitGrowth")]
    pub last_quarter_profit_growth: RawValue,

    #[serde(rename = "secondQuarterProfitGrowth")]
    pub second_quarter_profit_growth: RawValue,

    #[serde(rename = "netMargin")]
    pub net_margin: RawValue,

    #[serde(rename = "profitForTheLast4Quarters")]
    pub profit_last_4_quarters: RawValue,

    #[serde(rename = "avgTradingValue5Day")]
    pub avg_trading_value_5d: RawValue,

    #[serde(rename = "relativeStrength3Day")]
    pub relative_strength_3d: RawValue,

    #[serde(rename = "relativeStrength1Month")]
    pub relative_strength_1m: RawValue,
}

impl Stock {
    /// Crée un stock vide avec seulement son ticker
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            ..Self::default()
        }
    }

    /// Vrai si le label de rapport vaut exactement "Yes"
    pub fn has_report(&self) -> bool {
        matches!(&self.has_financial_report, RawValue::Text(label) if label == REPORT_PRESENT)
    }

    /// Label du rapport pour l'affichage ("Yes", "No", ou vide)
    pub fn report_label(&self) -> String {
        if self.has_financial_report.is_missing() {
            String::new()
        } else {
            self.has_financial_report.as_label()
        }
    }
}

/// Snapshot renvoyé par GET /stocks
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StocksFeed {
    /// Date du dernier filtrage (UTC)
    #[serde(deserialize_with = "de_timestamp_label")]
    pub last_filtered: Option<String>,

    /// Nombre total de stocks avant filtrage
    #[serde(deserialize_with = "de_count")]
    pub total: u64,

    /// Stocks retenus par le screener
    #[serde(deserialize_with = "de_rows")]
    pub filtered_stocks: Vec<Stock>,
}

impl StocksFeed {
    pub fn last_filtered_label(&self) -> &str {
        self.last_filtered.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn last_filtered_at(&self) -> Option<NaiveDateTime> {
        parse_timestamp(self.last_filtered.as_deref()?)
    }

    pub fn len(&self) -> usize {
        self.filtered_stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered_stocks.is_empty()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
