// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod events;       // Gestion des événements clavier
pub mod shell;        // Onglets, footer, popup de notification
pub mod signals_view; // Écran Signals : tableau + graphique
pub mod stocks_view;  // Écran Stocks : screener
pub mod price_panel;  // Chandeliers, moyennes, volume, marqueurs (Unicode text)
pub mod oscillator;   // RSI / MA-RSI
pub mod table;        // Styles des cellules classifiées

// Re-exports pour simplifier les imports
pub use events::{Event, EventHandler};
pub use shell::render;
