//! UDP commands: listen and send

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use codec::{decode_message, Message};
use config::PuncherConfig;
use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Log every message received on `bind` until the idle timeout (if any) fires
pub async fn listen(config: &PuncherConfig, bind: Option<SocketAddr>) -> Result<u64> {
    let bind_address = bind.unwrap_or(config.listen.bind_address);
    let socket = UdpSocket::bind(bind_address)
        .await
        .with_context(|| format!("Failed to bind UDP socket on {bind_address}"))?;
    info!("Listening for puncher messages on {}", socket.local_addr()?);

    let mut buf = vec![0u8; config.codec.recv_buffer_size];
    let mut received = 0u64;

    loop {
        let (n, peer) = match recv(&socket, &mut buf, config.listen.read_timeout()).await? {
            Some(datagram) => datagram,
            None => {
                info!(received, "No datagram within read timeout, stopping");
                return Ok(received);
            }
        };
        received += 1;

        match decode_message(&buf[..n]) {
            Ok(message) => log_message(peer, n, &message),
            // one bad datagram must not stop the sniffer
            Err(e) => warn!(%peer, bytes = n, raw = %hex::encode(&buf[..n]), "{}", e),
        }
    }
}

/// Send one message to `target`; with `wait`, also print the first reply
pub async fn send(
    config: &PuncherConfig,
    target: SocketAddr,
    message: &Message,
    wait: bool,
) -> Result<Option<Message>> {
    let bytes = message
        .to_bytes()
        .with_context(|| format!("Failed to encode {}", message.message_type()))?;

    let local: SocketAddr = if target.is_ipv4() {
        ([0u8; 4], 0).into()
    } else {
        ([0u16; 8], 0).into()
    };
    let socket = UdpSocket::bind(local)
        .await
        .context("Failed to bind local UDP socket")?;
    socket
        .send_to(&bytes, target)
        .await
        .with_context(|| format!("Failed to send to {target}"))?;
    info!(%target, bytes = bytes.len(), "sent {}", message);

    if !wait {
        return Ok(None);
    }

    let mut buf = vec![0u8; config.codec.recv_buffer_size];
    let wait_for = config
        .listen
        .read_timeout()
        .unwrap_or(Duration::from_secs(5));
    let Some((n, peer)) = recv(&socket, &mut buf, Some(wait_for)).await? else {
        bail!("No reply from {target} within {wait_for:?}");
    };
    let reply = decode_message(&buf[..n]).with_context(|| format!("Bad reply from {peer}"))?;
    log_message(peer, n, &reply);
    Ok(Some(reply))
}

async fn recv(
    socket: &UdpSocket,
    buf: &mut [u8],
    idle: Option<Duration>,
) -> Result<Option<(usize, SocketAddr)>> {
    let datagram = match idle {
        Some(limit) => match timeout(limit, socket.recv_from(buf)).await {
            Ok(result) => result,
            Err(_) => return Ok(None),
        },
        None => socket.recv_from(buf).await,
    };
    let (n, peer) = datagram.context("Failed to receive datagram")?;
    debug!(%peer, bytes = n, "datagram received");
    Ok(Some((n, peer)))
}

fn log_message(peer: SocketAddr, bytes: usize, message: &Message) {
    match message {
        Message::CReq(creq) => {
            info!(%peer, bytes, punch = ?creq.addr.to_socket_addr(), "{}", message)
        }
        Message::CReqTcp(creq) => info!(
            %peer,
            bytes,
            source = ?creq.source.to_socket_addr(),
            destination = ?creq.destination.to_socket_addr(),
            "{}",
            message
        ),
        Message::IdReq(_) => info!(%peer, bytes, "{} (session ID requested)", message),
        _ => info!(%peer, bytes, session = ?message.session_id(), "{}", message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codec::{AssId, IdReq};

    fn loopback_config() -> PuncherConfig {
        let mut config = PuncherConfig::default();
        config.listen.read_timeout_ms = Some(2000);
        config
    }

    #[tokio::test]
    async fn test_send_and_receive_reply() {
        let puncher = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let puncher_addr = puncher.local_addr().unwrap();

        // minimal puncher: answer any IDReq with AssID 1337
        let responder = tokio::spawn(async move {
            let mut buf = [0u8; codec::MAX_PACKET_SIZE];
            let (n, peer) = puncher.recv_from(&mut buf).await.unwrap();
            assert_eq!(decode_message(&buf[..n]).unwrap(), Message::from(IdReq::new()));
            let reply = Message::from(AssId::new(1337u32)).to_bytes().unwrap();
            puncher.send_to(&reply, peer).await.unwrap();
        });

        let config = loopback_config();
        let reply = send(&config, puncher_addr, &IdReq::new().into(), true)
            .await
            .unwrap();
        assert_eq!(reply, Some(Message::from(AssId::new(1337u32))));
        responder.await.unwrap();
    }

    #[tokio::test]
    async fn test_listen_stops_after_idle_timeout() {
        let mut config = PuncherConfig::default();
        config.listen.read_timeout_ms = Some(50);
        let received = listen(&config, Some("127.0.0.1:0".parse().unwrap()))
            .await
            .unwrap();
        assert_eq!(received, 0);
    }
}
