// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Option<Feed> : None tant que la vue n'a reçu aucun snapshot
//
// PATTERN : "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Le worker écrit dans App uniquement via les méthodes ci-dessous
// ============================================================================

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::chart::DEFAULT_CHART_TITLE;
use crate::models::{SignalsFeed, StocksFeed};

/// Nombre de chandelles affichées dans le tableau des signaux
pub const SIGNAL_TABLE_ROWS: usize = 10;

// ============================================================================
// Enum : Screen
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Un seul écran actif à la fois
// - Le compilateur force à gérer tous les cas
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Signaux : tableau des dernières chandelles + graphique
    Signals,

    /// Screener : tableau des stocks filtrés
    Stocks,
}

impl Screen {
    pub const ALL: [Screen; 2] = [Screen::Signals, Screen::Stocks];

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Signals => "Signals",
            Screen::Stocks => "Stocks",
        }
    }

    /// Écran suivant (cycle avec Tab)
    pub fn next(&self) -> Screen {
        match self {
            Screen::Signals => Screen::Stocks,
            Screen::Stocks => Screen::Signals,
        }
    }
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Compteur incrémenté à chaque montage d'écran
    ///
    /// CONCEPT : Epoch de vue
    /// - Chaque commande envoyée au worker porte l'epoch de la vue émettrice
    /// - Un résultat dont l'epoch n'est plus courante est ignoré
    pub view_epoch: u64,

    /// Dernier snapshot du feed des signaux (None : pas encore reçu)
    pub signals: Option<SignalsFeed>,

    /// Dernier snapshot du screener (None : pas encore reçu)
    pub stocks: Option<StocksFeed>,

    /// Ligne sélectionnée dans le tableau courant
    pub selected_index: usize,

    /// Titre du graphique (configurable)
    pub chart_title: String,

    /// Two-step quit : première pression de 'q' → true, seconde → quit
    pub confirm_quit: bool,

    /// Indicateur de chargement (mis et retiré explicitement par le worker)
    pub is_loading: bool,

    /// Message affiché pendant le chargement
    pub loading_message: Option<String>,

    /// Notification bloquante (message du backend après un déclencheur)
    ///
    /// Tant qu'elle est affichée, seules Enter/Esc agissent
    pub notification: Option<String>,
}

impl App {
    /// Crée l'état initial sur l'écran des signaux (epoch 0, non monté)
    pub fn new(chart_title: impl Into<String>) -> Self {
        Self {
            running: true,
            current_screen: Screen::Signals,
            view_epoch: 0,
            signals: None,
            stocks: None,
            selected_index: 0,
            chart_title: chart_title.into(),
            confirm_quit: false,
            is_loading: false,
            loading_message: None,
            notification: None,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // ========================================================================
    // Montage des écrans
    // ========================================================================

    /// Monte un écran : nouvelle epoch, snapshot vidé, sélection remise à 0
    ///
    /// Retourne l'epoch à joindre à la commande de chargement
    pub fn mount(&mut self, screen: Screen) -> u64 {
        self.view_epoch += 1;
        self.current_screen = screen;
        self.selected_index = 0;

        match screen {
            Screen::Signals => self.signals = None,
            Screen::Stocks => self.stocks = None,
        }

        debug!(screen = screen.title(), epoch = self.view_epoch, "Screen mounted");
        self.view_epoch
    }

    /// Monte l'écran suivant
    pub fn mount_next(&mut self) -> u64 {
        self.mount(self.current_screen.next())
    }

    /// Vrai si un résultat portant cette epoch concerne encore la vue affichée
    pub fn is_current(&self, epoch: u64, screen: Screen) -> bool {
        self.view_epoch == epoch && self.current_screen == screen
    }

    /// Remplace le snapshot des signaux si l'epoch est courante
    pub fn apply_signals(&mut self, epoch: u64, feed: SignalsFeed) -> bool {
        if !self.is_current(epoch, Screen::Signals) {
            return false;
        }
        self.signals = Some(feed);
        self.clamp_selection();
        true
    }

    /// Remplace le snapshot du screener si l'epoch est courante
    pub fn apply_stocks(&mut self, epoch: u64, feed: StocksFeed) -> bool {
        if !self.is_current(epoch, Screen::Stocks) {
            return false;
        }
        self.stocks = Some(feed);
        self.clamp_selection();
        true
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Nombre de lignes du tableau de l'écran courant
    pub fn row_count(&self) -> usize {
        match self.current_screen {
            Screen::Signals => self
                .signals
                .as_ref()
                .map(|feed| feed.last_rows(SIGNAL_TABLE_ROWS).len())
                .unwrap_or(0),
            Screen::Stocks => self.stocks.as_ref().map(|feed| feed.len()).unwrap_or(0),
        }
    }

    /// CONCEPT RUST : Saturating arithmetic
    /// - saturating_sub() ne descend pas en dessous de 0
    pub fn navigate_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn navigate_down(&mut self) {
        let max_index = self.row_count().saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(max_index);
    }

    fn clamp_selection(&mut self) {
        let max_index = self.row_count().saturating_sub(1);
        self.selected_index = self.selected_index.min(max_index);
    }

    // ========================================================================
    // Quit en deux temps
    // ========================================================================

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    // ========================================================================
    // Chargement
    // ========================================================================

    /// Démarre le chargement avec un message optionnel
    pub fn start_loading(&mut self, message: Option<String>) {
        self.is_loading = true;
        self.loading_message = message;
    }

    /// Termine le chargement
    pub fn stop_loading(&mut self) {
        self.is_loading = false;
        self.loading_message = None;
    }

    pub fn is_loading_data(&self) -> bool {
        self.is_loading
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    pub fn show_notification(&mut self, message: impl Into<String>) {
        self.notification = Some(message.into());
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    pub fn has_notification(&self) -> bool {
        self.notification.is_some()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(DEFAULT_CHART_TITLE)
    }
}

/// Verrouille l'état partagé
///
/// CONCEPT RUST : PoisonError
/// - Un mutex est "empoisonné" si un thread a paniqué en le tenant
/// - App ne contient que des données simples : on récupère la garde
pub fn lock_app(app: &Mutex<App>) -> MutexGuard<'_, App> {
    app.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Tests unitaires
// ============================================================================
