// ============================================================================
// Gestion des entrées clavier
// ============================================================================
// Traduit un Event en changement d'état + commandes pour le worker
//
// Ordre de priorité :
// 1. Popup de notification : seules Enter/Esc agissent (fermeture)
// 2. 'q' : quit en deux temps
// 3. Changement d'écran (Tab, '1', '2') : montage + chargement
// 4. 'r' : déclencheur + rechargement de l'écran courant (ignoré pendant un chargement)
// 5. Navigation ↑↓ / j k
// 6. Toute autre touche annule la confirmation de quit
// ============================================================================

use std::sync::mpsc;

use tracing::{debug, error, info};

use crate::app::{App, Screen};
use crate::ui::events::{
    is_down_event, is_enter_event, is_escape_event, is_quit_event, is_refresh_event,
    is_tab_event, is_up_event, screen_from_event, Event,
};
use crate::worker::AppCommand;

/// Envoie une commande au worker (un worker mort est loggé, pas fatal)
fn send(command_tx: &mpsc::Sender<AppCommand>, command: AppCommand) {
    if command_tx.send(command).is_err() {
        error!(?command, "Worker channel closed, command dropped");
    }
}

/// Monte un écran et demande son chargement
///
/// CONCEPT : Epoch de vue
/// - mount() renvoie l'epoch que la commande transporte
pub fn mount_screen(app: &mut App, screen: Screen, command_tx: &mpsc::Sender<AppCommand>) {
    let epoch = app.mount(screen);
    info!(screen = screen.title(), epoch, "Mounting screen");
    send(command_tx, AppCommand::load(screen, epoch));
}

/// Traite un événement et met à jour l'état de l'application
///
/// CONCEPT RUST : Pattern matching avec guards
/// - Les guards (if) sélectionnent l'intention de la touche
/// - L'ordre des bras fixe les priorités
pub fn handle_event(app: &mut App, event: Event, command_tx: &mpsc::Sender<AppCommand>) {
    // Popup bloquante : tout le reste est ignoré
    if app.has_notification() {
        if is_enter_event(&event) || is_escape_event(&event) {
            debug!("User dismissed notification");
            app.dismiss_notification();
        }
        return;
    }

    match event {
        Event::Key(_) if is_quit_event(&event) => {
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
        }

        Event::Key(_) if is_tab_event(&event) => {
            app.cancel_quit();
            let next = app.current_screen.next();
            mount_screen(app, next, command_tx);
        }

        Event::Key(_) if screen_from_event(&event).is_some() => {
            app.cancel_quit();
            if let Some(screen) = screen_from_event(&event) {
                mount_screen(app, screen, command_tx);
            }
        }

        Event::Key(_) if is_refresh_event(&event) => {
            app.cancel_quit();
            // Une seule requête en cours : pas de nouveau déclencheur pendant le chargement
            if app.is_loading_data() {
                debug!("Refresh ignored while loading");
                return;
            }
            info!(screen = app.current_screen.title(), "User requested refresh");
            send(
                command_tx,
                AppCommand::refresh(app.current_screen, app.view_epoch),
            );
            // Posé tout de suite : une 2e pression avant que le worker démarre est ignorée
            app.start_loading(None);
        }

        Event::Key(_) if is_up_event(&event) => {
            app.cancel_quit();
            app.navigate_up();
        }

        Event::Key(_) if is_down_event(&event) => {
            app.cancel_quit();
            app.navigate_down();
        }

        Event::Key(_) => {
            app.cancel_quit();
        }

        Event::Tick => {}
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
