// ============================================================================
// Structure : RawValue
// ============================================================================
// Représente une cellule brute telle que renvoyée par le backend
//
// Le backend remplace les cellules vides par la chaîne "N/A" avant de
// sérialiser. Une colonne numérique peut donc contenir :
// - un nombre JSON         → 12.5
// - une chaîne numérique   → "12.5"
// - la sentinelle          → "N/A"
// - null ou champ absent
//
// CONCEPTS RUST :
// 1. #[serde(untagged)] : serde essaie chaque variant dans l'ordre
// 2. deserialize_with : décodage lenient champ par champ
// 3. Option<f64> : "absent" est distinct de "zéro"
// ============================================================================

use serde::{Deserialize, Deserializer, Serialize};

/// Sentinelle utilisée par le backend pour les cellules manquantes
pub const MISSING_SENTINEL: &str = "N/A";

/// Cellule brute d'un feed
///
/// CONCEPT RUST : Enum untagged
/// - Number : nombre JSON
/// - Text : chaîne (numérique ou non)
/// - Flag : booléen JSON
/// - Missing : null (ou champ absent grâce à Default)
/// - Other : objet/tableau, gardé pour ne jamais faire échouer le parsing
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Flag(bool),
    #[default]
    Missing,
    Other(serde_json::Value),
}

impl RawValue {
    /// Retourne la valeur numérique si la cellule en contient une
    ///
    /// - Number : retourné tel quel s'il est fini
    /// - Text : parsé après trim ("N/A", "" et "abc" → None)
    /// - le reste : None
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            RawValue::Number(n) => *n,
            RawValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() || trimmed == MISSING_SENTINEL {
                    return None;
                }
                trimmed.parse::<f64>().ok()?
            }
            RawValue::Flag(_) | RawValue::Missing | RawValue::Other(_) => return None,
        };

        value.is_finite().then_some(value)
    }

    /// Vrai si la cellule est absente ou vaut la sentinelle "N/A"
    pub fn is_missing(&self) -> bool {
        match self {
            RawValue::Missing => true,
            RawValue::Text(s) => s.trim() == MISSING_SENTINEL,
            _ => false,
        }
    }

    /// Retourne la cellule comme texte (pour les labels et colonnes descriptives)
    pub fn as_label(&self) -> String {
        match self {
            RawValue::Text(s) => s.clone(),
            RawValue::Number(n) => n.to_string(),
            RawValue::Flag(b) => b.to_string(),
            RawValue::Missing => String::new(),
            RawValue::Other(v) => v.to_string(),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<Option<f64>> for RawValue {
    fn from(value: Option<f64>) -> Self {
        value.map(RawValue::Number).unwrap_or(RawValue::Missing)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

// ============================================================================
// Désérialiseurs lenients
// ============================================================================
// Utilisés avec #[serde(deserialize_with = "...")]
// Une cellule invalide ne doit jamais faire échouer tout le feed
// ============================================================================

/// Prix / volume : cellule invalide ou manquante → NaN (jamais 0)
pub fn de_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawValue::deserialize(deserializer)?;
    Ok(raw.as_f64().unwrap_or(f64::NAN))
}

/// Indicateur optionnel : manquant → None, un vrai 0 reste Some(0.0)
pub fn de_indicator<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawValue::deserialize(deserializer)?;
    Ok(raw.as_f64())
}

/// Drapeau Buy/Sell : vrai uniquement pour un booléen JSON true
pub fn de_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawValue::deserialize(deserializer)?;
    Ok(matches!(raw, RawValue::Flag(true)))
}

/// Label texte : nombre ou chaîne acceptés, le reste → chaîne vide
pub fn de_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawValue::deserialize(deserializer)?;
    Ok(raw.as_label())
}

/// Compteur (total) : nombre entier positif, tout le reste → 0
pub fn de_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawValue::deserialize(deserializer)?;
    Ok(raw
        .as_f64()
        .filter(|v| *v >= 0.0)
        .map(|v| v.round() as u64)
        .unwrap_or(0))
}

/// Liste de lignes : null → liste vide
pub fn de_rows<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Timestamp optionnel : "N/A", null ou chaîne vide → None
pub fn de_timestamp_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawValue::deserialize(deserializer)?;
    if raw.is_missing() {
        return Ok(None);
    }
    let label = raw.as_label();
    Ok((!label.trim().is_empty()).then_some(label))
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_value_decoding() {
        let values: Vec<RawValue> =
            serde_json::from_str(r#"[1.5, "2.25", "N/A", null, true, {"a": 1}]"#).unwrap();

        assert_eq!(values[0], RawValue::Number(1.5));
        assert_eq!(values[1], RawValue::Text("2.25".to_string()));
        assert_eq!(values[2], RawValue::Text("N/A".to_string()));
        assert_eq!(values[3], RawValue::Missing);
        assert_eq!(values[4], RawValue::Flag(true));
        assert!(matches!(values[5], RawValue::Other(_)));
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(RawValue::Number(3.0).as_f64(), Some(3.0));
        assert_eq!(RawValue::from(" 4.5 ").as_f64(), Some(4.5));
        assert_eq!(RawValue::from("N/A").as_f64(), None);
        assert_eq!(RawValue::from("abc").as_f64(), None);
        assert_eq!(RawValue::from("").as_f64(), None);
        assert_eq!(RawValue::Number(f64::NAN).as_f64(), None);
        assert_eq!(RawValue::Flag(true).as_f64(), None);
        assert_eq!(RawValue::Missing.as_f64(), None);
    }

    #[test]
    fn test_zero_is_not_missing() {
        // Un indicateur à 0 est une vraie valeur, pas une absence
        assert_eq!(RawValue::Number(0.0).as_f64(), Some(0.0));
        assert!(!RawValue::Number(0.0).is_missing());
    }

    #[test]
    fn test_is_missing() {
        assert!(RawValue::Missing.is_missing());
        assert!(RawValue::from("N/A").is_missing());
        assert!(!RawValue::from("abc").is_missing());
    }
}
