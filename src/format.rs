// ============================================================================
// Formatage des cellules
// ============================================================================
// Transforme une cellule brute en texte à 2 décimales pour les tableaux
//
// Règles :
// - "N/A", null, absent, texte non numérique → ""
// - nombre (ou chaîne numérique) → arrondi à 2 décimales, demi loin de zéro
// - jamais d'erreur : une valeur illisible donne une cellule vide
// ============================================================================

use crate::models::RawValue;

/// Nombre de décimales affichées dans les tableaux
pub const DISPLAY_DECIMALS: i32 = 2;

/// Au-delà, un f64 n'a plus de précision au centime : pas d'arrondi préalable
const ROUNDING_LIMIT: f64 = 1e15;

/// Formate une cellule brute pour l'affichage
///
/// # Exemple
/// format_value(&RawValue::from(3.14159)) == "3.14"
/// format_value(&RawValue::from("N/A")) == ""
pub fn format_value(value: &RawValue) -> String {
    value.as_f64().map(format_number).unwrap_or_default()
}

/// Formate un indicateur optionnel (None → "")
pub fn format_optional(value: Option<f64>) -> String {
    value
        .filter(|v| v.is_finite())
        .map(format_number)
        .unwrap_or_default()
}

/// Formate un prix (NaN → "")
pub fn format_price(value: f64) -> String {
    format_optional(Some(value))
}

/// Arrondi "half away from zero" puis affichage à 2 décimales
///
/// CONCEPT RUST : f64::round
/// - round() arrondit déjà loin de zéro sur les demis (2.5 → 3, -2.5 → -3)
/// - format! seul arrondit au pair le plus proche, d'où le round() préalable
fn format_number(value: f64) -> String {
    if value.abs() >= ROUNDING_LIMIT {
        return format!("{:.*}", DISPLAY_DECIMALS as usize, value);
    }

    let factor = 10f64.powi(DISPLAY_DECIMALS);
    let mut rounded = (value * factor).round() / factor;

    // Évite "-0.00"
    if rounded == 0.0 {
        rounded = 0.0;
    }

    format!("{:.*}", DISPLAY_DECIMALS as usize, rounded)
}

/// Affichage Yes/No des drapeaux Buy/Sell
pub fn format_flag(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values_are_blank() {
        assert_eq!(format_value(&RawValue::from("N/A")), "");
        assert_eq!(format_value(&RawValue::Missing), "");
        assert_eq!(format_value(&RawValue::from("abc")), "");
        assert_eq!(format_value(&RawValue::from("")), "");
        assert_eq!(format_value(&RawValue::Flag(true)), "");
    }

    #[test]
    fn test_two_decimals() {
        assert_eq!(format_value(&RawValue::from(3.14159)), "3.14");
        assert_eq!(format_value(&RawValue::from(1250.0)), "1250.00");
        assert_eq!(format_value(&RawValue::from("12.5")), "12.50");
        assert_eq!(format_value(&RawValue::from(-7.126)), "-7.13");
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(format_value(&RawValue::from(0.125)), "0.13");
        assert_eq!(format_value(&RawValue::from(-0.125)), "-0.13");
        assert_eq!(format_value(&RawValue::from(-0.001)), "0.00");
    }

    #[test]
    fn test_formatted_value_parses_back() {
        for x in [0.0, 1.0, 2.345678, 99.999, -15.5, 1234567.891] {
            let text = format_value(&RawValue::from(x));
            let parsed: f64 = text.parse().unwrap();
            let expected = (x * 100.0_f64).round() / 100.0;
            assert!((parsed - expected).abs() < 1e-9, "{} -> {}", x, text);
        }
    }

    #[test]
    fn test_format_optional_and_price() {
        assert_eq!(format_optional(None), "");
        assert_eq!(format_optional(Some(0.0)), "0.00");
        assert_eq!(format_price(f64::NAN), "");
        assert_eq!(format_price(f64::INFINITY), "");
        assert_eq!(format_price(10.0), "10.00");
    }

    #[test]
    fn test_format_flag() {
        assert_eq!(format_flag(true), "Yes");
        assert_eq!(format_flag(false), "No");
    }

    #[test]
    fn test_huge_values_stay_finite() {
        let text = format_value(&RawValue::from(1.7e308));
        assert!(!text.contains("inf"));
        assert!(text.starts_with('1') && text.len() > 300);
        assert!(text.ends_with(".00"));

        assert_eq!(format_price(-1e300).chars().next(), Some('-'));
        assert!(!format_price(-1e300).contains("inf"));
        assert_eq!(format_price(1e15), "1000000000000000.00");
    }
}
