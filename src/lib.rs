// ============================================================================
// Signalboard - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;     // Client HTTP du backend (feeds + déclencheurs)
pub mod app;     // État de l'application
pub mod chart;   // Séries, marqueurs et mise en page du graphique
pub mod config;  // configs.json + variables d'environnement
pub mod format;  // Formatage des cellules
pub mod input;   // Touches → état + commandes
pub mod models;  // Structures de données
pub mod styling; // Classification des cellules
pub mod ui;      // Interface utilisateur
pub mod worker;  // Worker thread (runtime tokio)
