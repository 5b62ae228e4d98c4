// ============================================================================
// Réponses des endpoints déclencheurs : /build et /filter
// ============================================================================
// Ces endpoints ont un effet de bord côté backend (recalcul des signaux,
// relance du screener). Leur message est affiché tel quel à l'utilisateur,
// avec un message de repli si le champ est absent ou vide.
// ============================================================================

use serde::Deserialize;

/// Message affiché si /build ne renvoie pas de description
pub const BUILD_FALLBACK_MESSAGE: &str = "Data retrieval triggered ERROR";

/// Message affiché si /filter ne renvoie pas de message
pub const FILTER_FALLBACK_MESSAGE: &str = "Stock filter triggered ERROR";

/// Réponse de GET /build
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BuildResponse {
    /// Vrai si la dernière chandelle porte un signal
    pub triggered: Option<bool>,

    /// Action du signal ("BUY" / "SELL")
    pub action: Option<String>,

    pub content: Option<String>,

    /// Texte à afficher à l'utilisateur
    pub description: Option<String>,
}

impl BuildResponse {
    /// Message pour la notification (description ou repli)
    pub fn user_message(&self) -> String {
        non_empty_or(self.description.as_deref(), BUILD_FALLBACK_MESSAGE)
    }
}

/// Réponse de GET /filter
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterResponse {
    /// Nombre de stocks analysés
    pub total: Option<u64>,

    /// Texte à afficher à l'utilisateur
    pub message: Option<String>,
}

impl FilterResponse {
    pub fn user_message(&self) -> String {
        non_empty_or(self.message.as_deref(), FILTER_FALLBACK_MESSAGE)
    }
}

fn non_empty_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_message() {
        let response: BuildResponse = serde_json::from_str(
            r#"{"triggered": false, "description": "__2024-05-02 10:00__ VN30F1M No signal"}"#,
        )
        .unwrap();
        assert_eq!(response.user_message(), "__2024-05-02 10:00__ VN30F1M No signal");
        assert_eq!(response.triggered, Some(false));
    }

    #[test]
    fn test_build_fallback() {
        assert_eq!(BuildResponse::default().user_message(), BUILD_FALLBACK_MESSAGE);

        let response: BuildResponse = serde_json::from_str(r#"{"description": ""}"#).unwrap();
        assert_eq!(response.user_message(), BUILD_FALLBACK_MESSAGE);
    }

    #[test]
    fn test_filter_message() {
        let response: FilterResponse =
            serde_json::from_str(r#"{"total": 1600, "message": "[2024-05-02] Filtered data saved."}"#)
                .unwrap();
        assert_eq!(response.user_message(), "[2024-05-02] Filtered data saved.");
        assert_eq!(FilterResponse::default().user_message(), FILTER_FALLBACK_MESSAGE);
    }
}
