// ============================================================================
// Background Worker
// ============================================================================
// CONCEPT RUST : Background async worker avec channels
// - Thread séparé qui possède un runtime tokio
// - Reçoit des AppCommand via un channel, une à la fois (jamais en parallèle)
// - Renvoie des AppResult que l'event loop applique à App
//
// L'indicateur de chargement est mis AVANT chaque requête et retiré APRÈS,
// sur tous les chemins (les appels du client ne renvoient jamais d'erreur).
// ============================================================================

use std::sync::{mpsc, Arc, Mutex};
use std::thread::JoinHandle;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::api::ApiClient;
use crate::app::{lock_app, App, Screen};
use crate::models::{SignalsFeed, StocksFeed};

/// Commandes envoyées au worker
///
/// Chaque commande porte l'epoch de la vue qui l'a émise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Charger le feed des signaux (montage de l'écran)
    LoadSignals { epoch: u64 },

    /// /build puis rechargement des signaux
    RefreshSignals { epoch: u64 },

    /// Charger le screener (montage de l'écran)
    LoadStocks { epoch: u64 },

    /// /filter puis rechargement du screener
    FilterStocks { epoch: u64 },
}

impl AppCommand {
    /// Commande de chargement pour un écran fraîchement monté
    pub fn load(screen: Screen, epoch: u64) -> Self {
        match screen {
            Screen::Signals => AppCommand::LoadSignals { epoch },
            Screen::Stocks => AppCommand::LoadStocks { epoch },
        }
    }

    /// Commande de rafraîchissement (touche 'r') pour un écran
    pub fn refresh(screen: Screen, epoch: u64) -> Self {
        match screen {
            Screen::Signals => AppCommand::RefreshSignals { epoch },
            Screen::Stocks => AppCommand::FilterStocks { epoch },
        }
    }
}

/// Résultats renvoyés par le worker
#[derive(Debug, Clone, PartialEq)]
pub enum AppResult {
    SignalsLoaded { epoch: u64, feed: SignalsFeed },
    StocksLoaded { epoch: u64, feed: StocksFeed },
    /// Message du backend après un déclencheur (ou message de repli)
    Notify { message: String },
}

/// Exécute une commande : requêtes HTTP + envoi des résultats
///
/// CONCEPT : Lock scope minimisé
/// - Le mutex n'est jamais tenu pendant un .await
pub async fn execute(
    client: &ApiClient,
    command: AppCommand,
    app: &Arc<Mutex<App>>,
    result_tx: &mpsc::Sender<AppResult>,
) {
    info!(?command, "Worker received command");

    match command {
        AppCommand::LoadSignals { epoch } => {
            lock_app(app).start_loading(Some("Loading signals...".to_string()));
            let feed = client.signals().await;
            lock_app(app).stop_loading();

            let _ = result_tx.send(AppResult::SignalsLoaded { epoch, feed });
        }

        AppCommand::RefreshSignals { epoch } => {
            lock_app(app).start_loading(Some("Retrieving data...".to_string()));
            let response = client.trigger_build().await;
            let _ = result_tx.send(AppResult::Notify {
                message: response.user_message(),
            });

            // Le rechargement a lieu même si le déclencheur a échoué
            let feed = client.signals().await;
            lock_app(app).stop_loading();

            let _ = result_tx.send(AppResult::SignalsLoaded { epoch, feed });
        }

        AppCommand::LoadStocks { epoch } => {
            lock_app(app).start_loading(Some("Loading stocks...".to_string()));
            let feed = client.stocks().await;
            lock_app(app).stop_loading();

            let _ = result_tx.send(AppResult::StocksLoaded { epoch, feed });
        }

        AppCommand::FilterStocks { epoch } => {
            lock_app(app).start_loading(Some("Filtering stocks...".to_string()));
            let response = client.trigger_filter().await;
            let _ = result_tx.send(AppResult::Notify {
                message: response.user_message(),
            });

            let feed = client.stocks().await;
            lock_app(app).stop_loading();

            let _ = result_tx.send(AppResult::StocksLoaded { epoch, feed });
        }
    }
}

/// Applique un résultat à l'état (côté UI)
///
/// Retourne false si le résultat concerne une vue qui n'est plus montée
pub fn apply_result(app: &mut App, result: AppResult) -> bool {
    match result {
        AppResult::SignalsLoaded { epoch, feed } => {
            let bars = feed.data.len();
            let applied = app.apply_signals(epoch, feed);
            if applied {
                info!(epoch, bars, "Signals snapshot updated");
            } else {
                debug!(epoch, current = app.view_epoch, "Discarding stale signals result");
            }
            applied
        }
        AppResult::StocksLoaded { epoch, feed } => {
            let stocks = feed.filtered_stocks.len();
            let applied = app.apply_stocks(epoch, feed);
            if applied {
                info!(epoch, stocks, "Stocks snapshot updated");
            } else {
                debug!(epoch, current = app.view_epoch, "Discarding stale stocks result");
            }
            applied
        }
        AppResult::Notify { message } => {
            info!(message = %message, "Showing notification");
            app.show_notification(message);
            true
        }
    }
}

/// Lance le worker thread
///
/// CONCEPT RUST : Thread + async runtime
/// - Le runtime est créé avant le thread : une erreur remonte à l'appelant
/// - block_on() bloque le thread worker, pas l'UI
/// - La boucle s'arrête quand le Sender des commandes est libéré
pub fn spawn_background_worker(
    client: ApiClient,
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
    app: Arc<Mutex<App>>,
) -> Result<JoinHandle<()>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Échec de la création du runtime tokio")?;

    let handle = std::thread::Builder::new()
        .name("signalboard-worker".to_string())
        .spawn(move || {
            while let Ok(command) = command_rx.recv() {
                runtime.block_on(execute(&client, command, &app, &result_tx));
            }
            info!("Worker thread exiting (channel closed)");
        })
        .context("Échec du lancement du worker thread")?;

    Ok(handle)
}

// ============================================================================
// Tests unitaires
// ============================================================================
