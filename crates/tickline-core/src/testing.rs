//! Test doubles shared by the auth and api unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::oneshot;

use crate::auth::{Session, SessionPersistence};
use crate::error::{Error, Result};

/// In-memory [`SessionPersistence`] double.
#[derive(Clone, Default)]
pub struct MemoryStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
    fail_reads: bool,
}

impl MemoryStore {
    /// A store whose reads always fail, for degraded-storage tests.
    pub fn failing() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }
}

impl SessionPersistence for MemoryStore {
    fn load_session(&self) -> Result<Option<Session>> {
        if self.fail_reads {
            return Err(Error::Storage("store offline".to_string()));
        }
        let guard = self.slots.lock().expect("store lock");
        guard
            .get("session")
            .map(|raw| serde_json::from_str(raw).map_err(Error::from))
            .transpose()
    }

    fn save_session(&self, session: &Session) -> Result<()> {
        let raw = serde_json::to_string(session)?;
        let mut guard = self.slots.lock().expect("store lock");
        guard.insert("session".to_string(), raw);
        Ok(())
    }

    fn clear_session(&self) -> Result<()> {
        let mut guard = self.slots.lock().expect("store lock");
        guard.remove("session");
        Ok(())
    }
}

/// Serve one canned HTTP response on an ephemeral port, returning the base URL.
pub async fn spawn_one_shot_server(status_line: &str, body: &str) -> String {
    let (base_url, _) = spawn_capture_server(status_line, body).await;
    base_url
}

/// Like [`spawn_one_shot_server`], but also hands back the raw request text so
/// tests can assert on outgoing headers.
pub async fn spawn_capture_server(
    status_line: &str,
    body: &str,
) -> (String, oneshot::Receiver<String>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test server");
    let address = listener.local_addr().expect("local address");
    let body = body.to_string();
    let response = format!(
        "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    let (request_sender, request_receiver) = oneshot::channel();

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let request = read_full_request(&mut socket).await;
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = request_sender.send(request);
        }
    });

    (format!("http://{address}"), request_receiver)
}

/// Read one HTTP request, headers plus any Content-Length body.
async fn read_full_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut raw = Vec::new();
    let mut chunk = [0_u8; 4096];

    loop {
        let Ok(read) = socket.read(&mut chunk).await else {
            break;
        };
        if read == 0 {
            break;
        }
        raw.extend_from_slice(&chunk[..read]);

        let text = String::from_utf8_lossy(&raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            continue;
        };
        let content_length = text
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())?
            })
            .unwrap_or(0);
        if raw.len() >= header_end + 4 + content_length {
            break;
        }
    }

    String::from_utf8_lossy(&raw).into_owned()
}
