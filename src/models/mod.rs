// ============================================================================
// Module : models
// ============================================================================
// Structures de données des feeds renvoyés par le backend
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module public
// - "pub use" : re-export pour simplifier les imports
// ============================================================================

pub mod value;   // Cellule brute (nombre, texte, "N/A") + désérialiseurs lenients
pub mod bar;     // Bar + SignalsFeed (GET /signals)
pub mod stock;   // Stock + StocksFeed (GET /stocks)
pub mod trigger; // Réponses de /build et /filter

// Au lieu de : use signalboard::models::bar::Bar;
// On peut faire : use signalboard::models::Bar;
pub use bar::{Bar, SignalsFeed};
pub use stock::{Stock, StocksFeed};
pub use trigger::{BuildResponse, FilterResponse};
pub use value::RawValue;
