// ============================================================================
// Serveur HTTP de test
// ============================================================================
// Petit serveur local (tokio TcpListener) qui répond des réponses figées
// par chemin et enregistre l'ordre des requêtes reçues
// ============================================================================

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::config::AppConfig;

/// Réponse figée : (code HTTP, corps)
pub type CannedResponse = (u16, &'static str);

pub struct TestServer {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    /// Démarre le serveur sur un port libre
    ///
    /// Un chemin inconnu répond 404
    pub async fn start(routes: Vec<(&'static str, CannedResponse)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let routes: Arc<HashMap<&'static str, CannedResponse>> = Arc::new(routes.into_iter().collect());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let log = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let routes = routes.clone();
                let log = log.clone();

                tokio::spawn(async move {
                    let mut buffer = vec![0u8; 4096];
                    let mut read = 0;
                    // Lit jusqu'à la fin des en-têtes (les requêtes GET n'ont pas de corps)
                    while !buffer[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut buffer[read..]).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => read += n,
                        }
                        if read == buffer.len() {
                            break;
                        }
                    }

                    let request = String::from_utf8_lossy(&buffer[..read]).to_string();
                    let path = request
                        .split_whitespace()
                        .nth(1)
                        .unwrap_or("/")
                        .to_string();
                    log.lock().unwrap().push(path.clone());

                    let (status, body) = routes.get(path.as_str()).copied().unwrap_or((404, ""));
                    let response = format!(
                        "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self {
            base_url: format!("http://{}/", address),
            requests,
        }
    }

    pub fn config(&self) -> AppConfig {
        AppConfig {
            api_base_url: self.base_url.clone(),
            request_timeout_secs: 5,
            ..AppConfig::default()
        }
    }

    /// Chemins reçus, dans l'ordre
    pub fn received(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Adresse sur laquelle rien n'écoute
pub async fn refused_config() -> AppConfig {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    AppConfig {
        api_base_url: format!("http://{}/", address),
        request_timeout_secs: 5,
        ..AppConfig::default()
    }
}
