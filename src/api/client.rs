// ============================================================================
// API Client : backend des signaux
// ============================================================================
// Quatre endpoints GET, tous relatifs à l'URL de base configurée :
// - /signals : SignalsFeed (chandelles + indicateurs)
// - /stocks  : StocksFeed (résultat du screener)
// - /build   : relance le calcul des signaux (effet de bord)
// - /filter  : relance le screener (effet de bord)
//
// CONCEPTS RUST :
// 1. Generics + trait bounds : un seul fetch pour tous les types de réponse
// 2. Result interne, fallback externe : les erreurs sont loggées puis
//    converties en valeur par défaut, l'UI ne voit jamais d'Err
// ============================================================================

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument};

use crate::config::AppConfig;
use crate::models::{BuildResponse, FilterResponse, SignalsFeed, StocksFeed};

/// User-Agent envoyé au backend
const USER_AGENT: &str = concat!("signalboard/", env!("CARGO_PKG_VERSION"));

/// Client HTTP du backend
///
/// CONCEPT RUST : Clone bon marché
/// - reqwest::Client contient un Arc interne
/// - Cloner le client partage le même pool de connexions
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: AppConfig,
}

impl ApiClient {
    /// Crée le client à partir de la configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        Self::from_builder(config, reqwest::Client::builder())
    }

    pub(crate) fn from_builder(config: &AppConfig, builder: reqwest::ClientBuilder) -> Result<Self> {
        let http = builder
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout())
            .build()
            .context("Échec de la création du client HTTP")?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.api_base_url
    }

    // ========================================================================
    // Endpoints publics (jamais d'erreur)
    // ========================================================================

    /// GET /signals → feed vide en cas d'échec
    pub async fn signals(&self) -> SignalsFeed {
        self.fetch_or_default("signals").await
    }

    /// GET /stocks → feed vide en cas d'échec
    pub async fn stocks(&self) -> StocksFeed {
        self.fetch_or_default("stocks").await
    }

    /// GET /build → réponse vide en cas d'échec (message de fallback)
    pub async fn trigger_build(&self) -> BuildResponse {
        self.fetch_or_default("build").await
    }

    /// GET /filter → réponse vide en cas d'échec (message de fallback)
    pub async fn trigger_filter(&self) -> FilterResponse {
        self.fetch_or_default("filter").await
    }

    // ========================================================================
    // Plomberie
    // ========================================================================

    /// Fetch + fallback : toute erreur est loggée puis remplacée par Default
    async fn fetch_or_default<T>(&self, path: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        match self.fetch_json(path).await {
            Ok(value) => value,
            Err(e) => {
                error!(endpoint = %path, error = ?e, "Request failed, using empty fallback");
                T::default()
            }
        }
    }

    /// GET + vérification du statut + parsing JSON
    ///
    /// CONCEPT RUST : DeserializeOwned
    /// - Le type T ne garde aucune référence vers le corps de la réponse
    /// - Nécessaire car le corps est libéré à la fin de la fonction
    #[instrument(skip(self), fields(base_url = %self.config.api_base_url))]
    async fn fetch_json<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        debug!(url = %url, "Sending HTTP request");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Échec de la requête HTTP vers {}", url))?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        if !status.is_success() {
            error!(status = %status, "Backend returned error status");
            anyhow::bail!("Le backend a retourné une erreur : HTTP {}", status);
        }

        let value = response
            .json::<T>()
            .await
            .with_context(|| format!("Échec du parsing JSON de {}", url))?;

        info!(endpoint = %path, "Request succeeded");
        Ok(value)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
