#![allow(dead_code)]

use odo_site::{router, AppState, LeadIntake};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serves the API on an ephemeral port and returns its base URL.
pub async fn spawn_app(intake: LeadIntake) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router(AppState::new(intake)))
            .await
            .unwrap();
    });

    format!("http://{}", address)
}

pub fn minimal_lead(name: &str) -> Value {
    json!({"name": name, "email": "a@b.com", "message": "hi"})
}

/// Accepts one SMTP session on an ephemeral port and answers every command
/// with success. The handle yields every line the client sent, DATA
/// included. No STARTTLS or AUTH is advertised.
pub async fn spawn_fake_smtp() -> (u16, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let (reader, mut writer) = stream.into_split();
        let mut lines = BufReader::new(reader).lines();
        let mut transcript = Vec::new();
        let mut in_data = false;

        writer.write_all(b"220 fake.relay ESMTP\r\n").await.unwrap();
        while let Ok(Some(line)) = lines.next_line().await {
            transcript.push(line.clone());
            let reply: &[u8] = if in_data {
                if line != "." {
                    continue;
                }
                in_data = false;
                b"250 2.0.0 queued\r\n"
            } else {
                let verb = line
                    .split_whitespace()
                    .next()
                    .unwrap_or_default()
                    .to_ascii_uppercase();
                match verb.as_str() {
                    "EHLO" | "HELO" => b"250 fake.relay\r\n",
                    "DATA" => {
                        in_data = true;
                        b"354 end data with <CR><LF>.<CR><LF>\r\n"
                    }
                    "QUIT" => {
                        let _ = writer.write_all(b"221 bye\r\n").await;
                        break;
                    }
                    _ => b"250 OK\r\n",
                }
            };
            writer.write_all(reply).await.unwrap();
        }
        transcript
    });

    (port, handle)
}
