/*!
 * Common test utilities for the gnome-l10n test suite
 */

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use gnome_l10n::stats::cache::Clock;
use gnome_l10n::stats::{Dataset, LanguageStat, Module};

/// Route logs through env_logger so `RUST_LOG=debug cargo test` shows them
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(Utc::now()),
        })
    }

    pub fn advance(&self, secs: i64) {
        let mut now = self.now.lock();
        *now = *now + Duration::seconds(secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// Build a one-language module
pub fn module(name: &str, language: &str, translated: u32, fuzzy: u32, untranslated: u32) -> Module {
    Module::with_stat(
        name,
        "gnome-49",
        "master",
        LanguageStat::new(language, translated, fuzzy, untranslated),
    )
}

/// A small Swedish dataset with a spread of completeness and states
pub fn sample_dataset() -> Dataset {
    let mut gedit = module("gedit", "sv", 80, 10, 10);
    gedit.stats[0].state = "Translating".to_string();

    let mut nautilus = module("nautilus", "sv", 500, 0, 0);
    nautilus.stats[0].state = "Translated".to_string();

    let gnome_shell = module("gnome-shell", "sv", 300, 50, 150);
    let gtk = module("GTK", "sv", 900, 0, 100);

    let mut evince = module("evince", "sv", 10, 5, 5);
    evince.stats[0].state = "Committed".to_string();

    Dataset::new("gnome-49", "sv", vec![gedit, nautilus, gnome_shell, gtk, evince])
}

/// Minimal HTTP/1.1 server answering GET requests from a fixed route table
///
/// Unknown paths get a 404. Returns the base URL (`http://127.0.0.1:port`)
/// and a counter of handled requests.
pub async fn spawn_stub_server(routes: Vec<(&str, u16, String)>) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub server");
    let addr = listener.local_addr().expect("stub server address");
    let routes: Arc<HashMap<String, (u16, String)>> = Arc::new(
        routes
            .into_iter()
            .map(|(path, status, body)| (path.to_string(), (status, body)))
            .collect(),
    );
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_clone = hits.clone();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let routes = routes.clone();
            let hits = hits_clone.clone();

            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                loop {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => {
                            request.extend_from_slice(&buf[..n]);
                            if request.windows(4).any(|w| w == b"\r\n\r\n") {
                                break;
                            }
                        }
                    }
                }

                let request = String::from_utf8_lossy(&request);
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();
                hits.fetch_add(1, Ordering::SeqCst);

                let (status, body) = routes
                    .get(&path)
                    .cloned()
                    .unwrap_or((404, r#"{"detail":"Not found."}"#.to_string()));
                let reason = match status {
                    200 => "OK",
                    404 => "Not Found",
                    _ => "Error",
                };
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (format!("http://{}", addr), hits)
}

/// A local address nothing listens on
pub async fn unused_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind probe");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{}", addr)
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> anyhow::Result<tempfile::TempDir> {
    Ok(tempfile::TempDir::new()?)
}
