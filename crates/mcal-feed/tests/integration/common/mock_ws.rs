//! Mock WebSocket server for integration tests.
//!
//! Serves scripted frames, closes right after the handshake, or rejects
//! connections outright, while counting every accepted dial.

use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, Mutex};
use tokio_tungstenite::{accept_async, tungstenite::Message};

/// What the server does with each accepted connection.
#[derive(Debug, Clone)]
pub enum ServerBehavior {
    /// Complete the handshake, send the scripted frames, stay open.
    Serve(Vec<String>),
    /// Complete the handshake, then close immediately.
    CloseAfterHandshake,
    /// Drop the TCP stream before the handshake.
    Reject,
}

/// A mock push-feed server on an ephemeral local port.
pub struct MockFeedServer {
    addr: SocketAddr,
    shutdown_tx: mpsc::Sender<()>,
    connections: Arc<Mutex<u32>>,
}

impl MockFeedServer {
    pub async fn start(behavior: ServerBehavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let connections: Arc<Mutex<u32>> = Arc::new(Mutex::new(0));
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let connections_clone = connections.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    Ok((stream, _)) = listener.accept() => {
                        {
                            let mut count = connections_clone.lock().await;
                            *count += 1;
                        }
                        tokio::spawn(handle_connection(stream, behavior.clone()));
                    }
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                }
            }
        });

        Self {
            addr,
            shutdown_tx,
            connections,
        }
    }

    /// Base WebSocket URL; the client appends its stream path.
    pub fn url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Number of accepted dials so far.
    pub async fn connection_count(&self) -> u32 {
        *self.connections.lock().await
    }

    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

async fn handle_connection(stream: TcpStream, behavior: ServerBehavior) {
    let frames = match behavior {
        // Drop the TCP stream before the handshake completes.
        ServerBehavior::Reject => return,
        ServerBehavior::CloseAfterHandshake => None,
        ServerBehavior::Serve(frames) => Some(frames),
    };

    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(_) => return,
    };

    let (mut write, mut read) = ws_stream.split();

    let Some(frames) = frames else {
        let _ = write.send(Message::Close(None)).await;
        return;
    };

    for frame in frames {
        if write.send(Message::Text(frame)).await.is_err() {
            return;
        }
    }

    // Stay open, answering pings, until the peer goes away.
    while let Some(msg) = read.next().await {
        match msg {
            Ok(Message::Ping(data)) => {
                let _ = write.send(Message::Pong(data)).await;
            }
            Ok(Message::Close(_)) | Err(_) => break,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_server_starts() {
        let server = MockFeedServer::start(ServerBehavior::Serve(Vec::new())).await;
        assert!(server.url().starts_with("ws://127.0.0.1:"));
        server.shutdown().await;
    }
}
