// ============================================================================
// Module : api
// ============================================================================
// Client HTTP du backend (signaux, screener et déclencheurs)
// ============================================================================

pub mod client; // Client du backend

#[cfg(test)]
pub(crate) mod test_server; // Serveur HTTP local pour les tests

pub use client::ApiClient;
