use crate::config::Config;
use crate::connection::{write_frame_async, FrameReader};
use crate::error::{DnsError, Result};
use crate::handler::Responder;
use crate::master::MasterFile;
use crate::protocol::Message;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tokio::time::{timeout, Duration};

pub async fn run(config: &Config, master: Arc<dyn MasterFile>) -> Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("name server listening on {}", listener.local_addr()?);
    serve(
        listener,
        Responder::new(master),
        Duration::from_secs(config.idle_timeout_secs),
    )
    .await
}

/// Accepts connections forever, one task each.
pub async fn serve(listener: TcpListener, responder: Responder, idle_timeout: Duration) -> Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        debug!("accepted connection from {}", peer);
        let responder = responder.clone();
        tokio::spawn(async move {
            match serve_connection(stream, &responder, idle_timeout).await {
                Ok(()) => debug!("{} closed the connection", peer),
                Err(DnsError::Timeout(e)) => info!("drop idle connection from {}: {}", peer, e),
                Err(e) => error!("connection with {} failed: {}", peer, e),
            }
        });
    }
}

/// Answers frames in the order they arrive until the peer closes, stays idle
/// past `idle_timeout`, or the stream breaks.
pub async fn serve_connection<S>(stream: S, responder: &Responder, idle_timeout: Duration) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (reader, mut writer) = tokio::io::split(stream);
    let mut frames = FrameReader::new(reader);
    loop {
        let frame = match timeout(idle_timeout, frames.next_frame()).await {
            Ok(frame) => frame?,
            Err(_) => {
                return Err(DnsError::Timeout(format!(
                    "no frame within {}ms",
                    idle_timeout.as_millis()
                )))
            }
        };
        let frame = match frame {
            Some(frame) => frame,
            None => return Ok(()),
        };
        let message = match Message::decode(&frame) {
            Ok(message) => message,
            Err(e) => {
                warn!("skip undecodable frame of {} byte(s): {}", frame.len(), e);
                continue;
            }
        };
        debug!("received {} {} for {}", kind(&message), message.id(), message.query());
        let response = responder.respond(&message).await?;
        write_frame_async(&mut writer, &response.encode()).await?;
        debug!(
            "answered {} with {} and {} answer(s)",
            response.id(),
            response.rcode(),
            response.answers().len()
        );
    }
}

fn kind(message: &Message) -> &'static str {
    if message.is_response() {
        "response"
    } else {
        "query"
    }
}
