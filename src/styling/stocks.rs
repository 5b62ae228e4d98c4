// ============================================================================
// Règles de style : tableau du screener
// ============================================================================
// Seuils inclusifs (>=) par colonne :
// - croissance (CA, EPS, profits trimestriels) : 20
// - marge nette, valeur moyenne échangée sur 5 jours : 10
// - force relative (3 jours, 1 mois) : 80
// - rapport financier : "Yes" → positif, sinon → négatif (seule colonne
//   avec un état négatif par défaut)
// ============================================================================

use std::str::FromStr;

use anyhow::bail;

use crate::models::{RawValue, Stock};
use crate::styling::CellClass;

/// Seuil des colonnes de croissance
pub const GROWTH_THRESHOLD: f64 = 20.0;

/// Seuil marge nette / valeur échangée
pub const MARGIN_THRESHOLD: f64 = 10.0;

/// Seuil de force relative
pub const STRENGTH_THRESHOLD: f64 = 80.0;

/// Colonnes du tableau du screener, dans l'ordre d'affichage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockColumn {
    Ticker,
    HasFinancialReport,
    RevenueGrowth1Year,
    RevenueGrowth5Year,
    EpsGrowth1Year,
    EpsGrowth5Year,
    LastQuarterProfitGrowth,
    SecondQuarterProfitGrowth,
    NetMargin,
    ProfitLast4Quarters,
    AvgTradingValue5Day,
    RelativeStrength3Day,
    RelativeStrength1Month,
}

/// Règle de style d'une colonne
#[derive(Debug, Clone, Copy, PartialEq)]
enum StockRule {
    /// Surbrillance positive si la valeur >= seuil
    AtLeast(f64),
    /// Positif si le rapport est présent, négatif sinon
    ReportPresent,
}

impl StockColumn {
    pub const ALL: [StockColumn; 13] = [
        StockColumn::Ticker,
        StockColumn::HasFinancialReport,
        StockColumn::RevenueGrowth1Year,
        StockColumn::RevenueGrowth5Year,
        StockColumn::EpsGrowth1Year,
        StockColumn::EpsGrowth5Year,
        StockColumn::LastQuarterProfitGrowth,
        StockColumn::SecondQuarterProfitGrowth,
        StockColumn::NetMargin,
        StockColumn::ProfitLast4Quarters,
        StockColumn::AvgTradingValue5Day,
        StockColumn::RelativeStrength3Day,
        StockColumn::RelativeStrength1Month,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            StockColumn::Ticker => "ticker",
            StockColumn::HasFinancialReport => "hasFinancialReport",
            StockColumn::RevenueGrowth1Year => "revenueGrowth1Year",
            StockColumn::RevenueGrowth5Year => "revenueGrowth5Year",
            StockColumn::EpsGrowth1Year => "epsGrowth1Year",
            StockColumn::EpsGrowth5Year => "epsGrowth5Year",
            StockColumn::LastQuarterProfitGrowth => "lastQuarterProfitGrowth",
            StockColumn::SecondQuarterProfitGrowth => "secondQuarterProfitGrowth",
            StockColumn::NetMargin => "netMargin",
            StockColumn::ProfitLast4Quarters => "profitForTheLast4Quarters",
            StockColumn::AvgTradingValue5Day => "avgTradingValue5Day",
            StockColumn::RelativeStrength3Day => "relativeStrength3Day",
            StockColumn::RelativeStrength1Month => "relativeStrength1Month",
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            StockColumn::Ticker => "Ticker",
            StockColumn::HasFinancialReport => "Financial Report",
            StockColumn::RevenueGrowth1Year => "Revenue Growth (1Y)",
            StockColumn::RevenueGrowth5Year => "Revenue Growth (5Y)",
            StockColumn::EpsGrowth1Year => "EPS Growth (1Y)",
            StockColumn::EpsGrowth5Year => "EPS Growth (5Y)",
            StockColumn::LastQuarterProfitGrowth => "Last Q Profit Growth",
            StockColumn::SecondQuarterProfitGrowth => "2nd Q Profit Growth",
            StockColumn::NetMargin => "Net Margin",
            StockColumn::ProfitLast4Quarters => "Profit (Last 4Q)",
            StockColumn::AvgTradingValue5Day => "Avg Trading Value (5D)",
            StockColumn::RelativeStrength3Day => "RS (3D)",
            StockColumn::RelativeStrength1Month => "RS (1M)",
        }
    }

    /// Règle associée à la colonne (None : jamais de style)
    fn rule(&self) -> Option<StockRule> {
        match self {
            StockColumn::RevenueGrowth1Year
            | StockColumn::RevenueGrowth5Year
            | StockColumn::EpsGrowth1Year
            | StockColumn::EpsGrowth5Year
            | StockColumn::LastQuarterProfitGrowth
            | StockColumn::SecondQuarterProfitGrowth => Some(StockRule::AtLeast(GROWTH_THRESHOLD)),
            StockColumn::NetMargin | StockColumn::AvgTradingValue5Day => {
                Some(StockRule::AtLeast(MARGIN_THRESHOLD))
            }
            StockColumn::RelativeStrength3Day | StockColumn::RelativeStrength1Month => {
                Some(StockRule::AtLeast(STRENGTH_THRESHOLD))
            }
            StockColumn::HasFinancialReport => Some(StockRule::ReportPresent),
            StockColumn::Ticker | StockColumn::ProfitLast4Quarters => None,
        }
    }

    /// Cellule brute du stock pour cette colonne (None pour le ticker)
    pub fn value<'a>(&self, stock: &'a Stock) -> Option<&'a RawValue> {
        let value = match self {
            StockColumn::Ticker => return None,
            StockColumn::HasFinancialReport => &stock.has_financial_report,
            StockColumn::RevenueGrowth1Year => &stock.revenue_growth_1y,
            StockColumn::RevenueGrowth5Year => &stock.revenue_growth_5y,
            StockColumn::EpsGrowth1Year => &stock.eps_growth_1y,
            StockColumn::EpsGrowth5Year => &stock.eps_growth_5y,
            StockColumn::LastQuarterProfitGrowth => &stock.last_quarter_profit_growth,
            StockColumn::SecondQuarterProfitGrowth => &stock.second_quarter_profit_growth,
            StockColumn::NetMargin => &stock.net_margin,
            StockColumn::ProfitLast4Quarters => &stock.profit_last_4_quarters,
            StockColumn::AvgTradingValue5Day => &stock.avg_trading_value_5d,
            StockColumn::RelativeStrength3Day => &stock.relative_strength_3d,
            StockColumn::RelativeStrength1Month => &stock.relative_strength_1m,
        };
        Some(value)
    }
}

impl FromStr for StockColumn {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match StockColumn::ALL.iter().find(|column| column.id() == s) {
            Some(column) => Ok(*column),
            None => bail!("Colonne de stock inconnue : {}", s),
        }
    }
}

/// Classe une cellule du tableau du screener
pub fn classify_stock(stock: &Stock, column: StockColumn) -> CellClass {
    match column.rule() {
        Some(StockRule::AtLeast(threshold)) => {
            let value = column.value(stock).and_then(RawValue::as_f64);
            match value {
                Some(v) if v >= threshold => CellClass::PositiveHighlight,
                _ => CellClass::None,
            }
        }
        Some(StockRule::ReportPresent) => {
            if stock.has_report() {
                CellClass::PositiveHighlight
            } else {
                CellClass::NegativeHighlight
            }
        }
        None => CellClass::None,
    }
}

/// Variante par identifiant texte : colonne inconnue → None
pub fn classify_stock_by_id(stock: &Stock, column_id: &str) -> CellClass {
    column_id
        .parse::<StockColumn>()
        .map(|column| classify_stock(stock, column))
        .unwrap_or(CellClass::None)
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_threshold_is_inclusive() {
        let mut stock = Stock::new("FPT");

        stock.revenue_growth_1y = RawValue::from(20.0);
        assert_eq!(classify_stock(&stock, StockColumn::RevenueGrowth1Year), CellClass::PositiveHighlight);

        stock.revenue_growth_1y = RawValue::from(19.99);
        assert_eq!(classify_stock(&stock, StockColumn::RevenueGrowth1Year), CellClass::None);
    }

    #[test]
    fn test_margin_and_strength_thresholds() {
        let mut stock = Stock::new("MWG");
        stock.net_margin = RawValue::from(10.0);
        stock.avg_trading_value_5d = RawValue::from(9.5);
        stock.relative_strength_3d = RawValue::from(80.0);
        stock.relative_strength_1m = RawValue::from(79.9);

        assert_eq!(classify_stock(&stock, StockColumn::NetMargin), CellClass::PositiveHighlight);
        assert_eq!(classify_stock(&stock, StockColumn::AvgTradingValue5Day), CellClass::None);
        assert_eq!(classify_stock(&stock, StockColumn::RelativeStrength3Day), CellClass::PositiveHighlight);
        assert_eq!(classify_stock(&stock, StockColumn::RelativeStrength1Month), CellClass::None);
    }

    #[test]
    fn test_numeric_strings_are_compared() {
        let mut stock = Stock::new("HPG");
        stock.eps_growth_5y = RawValue::from("25.5");
        assert_eq!(classify_stock(&stock, StockColumn::EpsGrowth5Year), CellClass::PositiveHighlight);
    }

    #[test]
    fn test_missing_values_are_unstyled() {
        let mut stock = Stock::new("VIC");
        stock.eps_growth_1y = RawValue::from("N/A");
        stock.net_margin = RawValue::from("abc");

        assert_eq!(classify_stock(&stock, StockColumn::EpsGrowth1Year), CellClass::None);
        assert_eq!(classify_stock(&stock, StockColumn::NetMargin), CellClass::None);
        assert_eq!(classify_stock(&stock, StockColumn::LastQuarterProfitGrowth), CellClass::None);
    }

    #[test]
    fn test_financial_report() {
        let mut stock = Stock::new("FPT");
        // Absent → négatif
        assert_eq!(classify_stock(&stock, StockColumn::HasFinancialReport), CellClass::NegativeHighlight);

        stock.has_financial_report = RawValue::from("Yes");
        assert_eq!(classify_stock(&stock, StockColumn::HasFinancialReport), CellClass::PositiveHighlight);

        stock.has_financial_report = RawValue::from("No");
        assert_eq!(classify_stock(&stock, StockColumn::HasFinancialReport), CellClass::NegativeHighlight);

        stock.has_financial_report = RawValue::from("yes");
        assert_eq!(classify_stock(&stock, StockColumn::HasFinancialReport), CellClass::NegativeHighlight);
    }

    #[test]
    fn test_unstyled_columns() {
        let mut stock = Stock::new("FPT");
        stock.profit_last_4_quarters = RawValue::from(1_000_000.0);
        assert_eq!(classify_stock(&stock, StockColumn::Ticker), CellClass::None);
        assert_eq!(classify_stock(&stock, StockColumn::ProfitLast4Quarters), CellClass::None);
    }

    #[test]
    fn test_classify_by_id() {
        let stock: Stock = serde_json::from_str(
            r#"{"ticker": "FPT", "revenueGrowth1Year": 20, "hasFinancialReport.en": "Yes"}"#,
        )
        .unwrap();

        assert_eq!(classify_stock_by_id(&stock, "revenueGrowth1Year"), CellClass::PositiveHighlight);
        assert_eq!(classify_stock_by_id(&stock, "hasFinancialReport"), CellClass::PositiveHighlight);
        assert_eq!(classify_stock_by_id(&stock, "marketCap"), CellClass::None);
    }
}
