// ============================================================================
// Structure : Bar et SignalsFeed
// ============================================================================
// Une Bar = une chandelle (OHLCV) + ses indicateurs calculés par le backend
// Le SignalsFeed est le snapshot complet renvoyé par GET /signals
//
// CONCEPTS RUST :
// 1. f64 NaN pour un prix illisible : s'affiche vide, ignoré par le graphique
// 2. Option<f64> pour les indicateurs : None pendant la période de chauffe
// 3. impl Default manuel : les prix par défaut sont NaN, pas 0
// ============================================================================

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::models::value::{
    de_count, de_flag, de_indicator, de_label, de_price, de_rows, de_timestamp_label,
};

/// Format des timestamps renvoyés par le backend (UTC)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Label affiché quand un timestamp est absent
pub const NOT_AVAILABLE: &str = "N/A";

/// Une chandelle avec ses indicateurs et signaux
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Bar {
    /// Label de la chandelle (catégorie de l'axe X, unique dans le feed)
    #[serde(deserialize_with = "de_label")]
    pub time: String,

    #[serde(deserialize_with = "de_price")]
    pub open: f64,

    #[serde(deserialize_with = "de_price")]
    pub high: f64,

    #[serde(deserialize_with = "de_price")]
    pub low: f64,

    #[serde(deserialize_with = "de_price")]
    pub close: f64,

    #[serde(deserialize_with = "de_price")]
    pub volume: f64,

    /// Moyenne mobile simple du close
    #[serde(deserialize_with = "de_indicator")]
    pub sma: Option<f64>,

    /// Moyenne mobile exponentielle du close
    #[serde(deserialize_with = "de_indicator")]
    pub ema: Option<f64>,

    /// RSI, borné [0, 100]
    #[serde(deserialize_with = "de_indicator")]
    pub rsi: Option<f64>,

    /// Moyenne mobile du RSI
    #[serde(deserialize_with = "de_indicator")]
    pub ma_rsi: Option<f64>,

    /// Signal d'achat sur cette chandelle
    #[serde(rename = "Buy", alias = "buy", deserialize_with = "de_flag")]
    pub buy: bool,

    /// Signal de vente sur cette chandelle
    #[serde(rename = "Sell", alias = "sell", deserialize_with = "de_flag")]
    pub sell: bool,

    #[serde(deserialize_with = "de_label")]
    pub name: String,

    #[serde(deserialize_with = "de_label")]
    pub category: String,

    #[serde(deserialize_with = "de_label")]
    pub source: String,
}

impl Default for Bar {
    fn default() -> Self {
        Self {
            time: String::new(),
            open: f64::NAN,
            high: f64::NAN,
            low: f64::NAN,
            close: f64::NAN,
            volume: f64::NAN,
            sma: None,
            ema: None,
            rsi: None,
            ma_rsi: None,
            buy: false,
            sell: false,
            name: String::new(),
            category: String::new(),
            source: String::new(),
        }
    }
}

impl Bar {
    /// Constructeur : chandelle OHLCV sans indicateurs ni signaux
    pub fn new(time: impl Into<String>, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            time: time.into(),
            open,
            high,
            low,
            close,
            volume,
            ..Self::default()
        }
    }

    /// Ajoute les indicateurs (builder pattern)
    pub fn with_indicators(
        mut self,
        sma: Option<f64>,
        ema: Option<f64>,
        rsi: Option<f64>,
        ma_rsi: Option<f64>,
    ) -> Self {
        self.sma = sma;
        self.ema = ema;
        self.rsi = rsi;
        self.ma_rsi = ma_rsi;
        self
    }

    /// Ajoute les signaux (builder pattern)
    pub fn with_signals(mut self, buy: bool, sell: bool) -> Self {
        self.buy = buy;
        self.sell = sell;
        self
    }

    /// Vrai si la chandelle porte à la fois un achat et une vente
    ///
    /// Ne devrait jamais arriver : c'est un problème de qualité des données
    pub fn has_conflicting_signals(&self) -> bool {
        self.buy && self.sell
    }
}

/// Snapshot renvoyé par GET /signals
///
/// CONCEPT : Fallback "objet vide"
/// - #[serde(default)] : "{}" se parse en feed vide
/// - Default est aussi la valeur renvoyée par le client en cas d'erreur
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SignalsFeed {
    /// Date du dernier calcul des signaux ("N/A" côté backend → None)
    #[serde(deserialize_with = "de_timestamp_label")]
    pub last_triggered: Option<String>,

    /// Nombre de lignes côté backend
    #[serde(deserialize_with = "de_count")]
    pub total: u64,

    /// Chandelles, triées par temps croissant
    #[serde(deserialize_with = "de_rows")]
    pub data: Vec<Bar>,
}

impl SignalsFeed {
    /// Label à afficher pour "Last trigger"
    pub fn last_triggered_label(&self) -> &str {
        self.last_triggered.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Timestamp parsé du dernier calcul, si le format est valide
    pub fn last_triggered_at(&self) -> Option<NaiveDateTime> {
        parse_timestamp(self.last_triggered.as_deref()?)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Retourne les `count` dernières chandelles (pour le tableau)
    ///
    /// CONCEPT RUST : Slicing
    /// - saturating_sub évite un underflow quand le feed est plus court
    pub fn last_rows(&self, count: usize) -> &[Bar] {
        let start = self.data.len().saturating_sub(count);
        &self.data[start..]
    }
}

/// Parse un timestamp backend ("%Y-%m-%d %H:%M:%S")
pub fn parse_timestamp(label: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(label.trim(), TIMESTAMP_FORMAT).ok()
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_from_backend_json() {
        let json = r#"{
            "time": "2024-05-02 10:00:00", "open": 1250.5, "high": "1260", "low": 1245,
            "close": 1255.1, "volume": 10234, "sma": "N/A", "ema": 1251.2,
            "rsi": 0, "ma_rsi": null, "Buy": true, "Sell": false,
            "name": "VN30F1M", "category": "derivative", "source": "tcbs"
        }"#;

        let bar: Bar = serde_json::from_str(json).unwrap();

        assert_eq!(bar.time, "2024-05-02 10:00:00");
        assert_eq!(bar.high, 1260.0);
        assert_eq!(bar.low, 1245.0);
        assert_eq!(bar.sma, None);
        assert_eq!(bar.ema, Some(1251.2));
        // Un RSI à 0 est une vraie valeur
        assert_eq!(bar.rsi, Some(0.0));
        assert_eq!(bar.ma_rsi, None);
        assert!(bar.buy);
        assert!(!bar.sell);
        assert_eq!(bar.source, "tcbs");
    }

    #[test]
    fn test_bar_missing_fields() {
        let bar: Bar = serde_json::from_str(r#"{"time": "t1", "close": "abc"}"#).unwrap();

        assert_eq!(bar.time, "t1");
        assert!(bar.open.is_nan());
        assert!(bar.close.is_nan());
        assert!(!bar.buy && !bar.sell);
        assert_eq!(bar.name, "");
    }

    #[test]
    fn test_flags_are_strict() {
        let bar: Bar = serde_json::from_str(r#"{"Buy": "True", "Sell": 1}"#).unwrap();
        assert!(!bar.buy);
        assert!(!bar.sell);

        let bar: Bar = serde_json::from_str(r#"{"buy": true}"#).unwrap();
        assert!(bar.buy);
    }

    #[test]
    fn test_conflicting_signals() {
        let bar = Bar::new("t", 1.0, 2.0, 0.5, 1.5, 10.0).with_signals(true, true);
        assert!(bar.has_conflicting_signals());
    }

    #[test]
    fn test_signals_feed_empty_object() {
        let feed: SignalsFeed = serde_json::from_str("{}").unwrap();
        assert!(feed.is_empty());
        assert_eq!(feed.last_triggered_label(), "N/A");
        assert_eq!(feed, SignalsFeed::default());
    }

    #[test]
    fn test_signals_feed_last_triggered() {
        let feed: SignalsFeed = serde_json::from_str(
            r#"{"last_triggered": "2024-05-02 03:15:00", "total": 0, "data": []}"#,
        )
        .unwrap();
        assert_eq!(feed.last_triggered_label(), "2024-05-02 03:15:00");
        assert!(feed.last_triggered_at().is_some());

        let feed: SignalsFeed = serde_json::from_str(r#"{"last_triggered": "N/A"}"#).unwrap();
        assert_eq!(feed.last_triggered, None);
        assert_eq!(feed.last_triggered_label(), "N/A");
    }

    #[test]
    fn test_signals_feed_bad_total_keeps_bars() {
        let feed: SignalsFeed =
            serde_json::from_str(r#"{"total": null, "data": [{"time": "t1", "close": 1}]}"#).unwrap();
        assert_eq!(feed.total, 0);
        assert_eq!(feed.data.len(), 1);
        assert_eq!(feed.data[0].close, 1.0);

        let feed: SignalsFeed =
            serde_json::from_str(r#"{"total": "N/A", "data": [{"time": "t1"}]}"#).unwrap();
        assert_eq!(feed.total, 0);
        assert_eq!(feed.data.len(), 1);

        let feed: SignalsFeed = serde_json::from_str(r#"{"total": "42"}"#).unwrap();
        assert_eq!(feed.total, 42);
    }

    #[test]
    fn test_signals_feed_null_data() {
        let feed: SignalsFeed =
            serde_json::from_str(r#"{"last_triggered": "2024-05-02 03:15:00", "total": 5, "data": null}"#)
                .unwrap();
        assert!(feed.is_empty());
        assert_eq!(feed.total, 5);
        assert_eq!(feed.last_triggered_label(), "2024-05-02 03:15:00");
    }

    #[test]
    fn test_last_rows() {
        let mut feed = SignalsFeed::default();
        for i in 0..3 {
            feed.data.push(Bar::new(format!("t{}", i), 1.0, 2.0, 0.5, 1.5, 10.0));
        }

        // min(10, 3) = 3 lignes
        assert_eq!(feed.last_rows(10).len(), 3);

        let rows = feed.last_rows(2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].time, "t1");
        assert_eq!(rows[1].time, "t2");
    }
}
