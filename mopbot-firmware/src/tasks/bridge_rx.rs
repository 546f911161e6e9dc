//! Bridge UART receive task
//!
//! Parses frames from the network bridge. Every report goes through the
//! bridge mirror; command tokens and stream events go on to the control task.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use mopbot_core::{Command, Input};
use mopbot_protocol::{BridgeMessage, FrameParser};

use crate::bridge;
use crate::channels::INPUT_CHANNEL;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

#[embassy_executor::task]
pub async fn bridge_rx_task(mut rx: BufferedUartRx) {
    info!("Bridge RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) => {
                trace!("Bridge RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match BridgeMessage::from_frame(&frame) {
                            Ok(message) => handle_message(message),
                            Err(e) => warn!("Failed to parse bridge message: {:?}", e),
                        },
                        Ok(None) => {}
                        Err(e) => warn!("Frame parse error: {:?}", e),
                    }
                }
            }
            Err(e) => {
                warn!("Bridge read error: {:?}", e);
            }
        }
    }
}

fn handle_message(message: BridgeMessage) {
    bridge::apply(&message);

    match message {
        BridgeMessage::Command(token) => {
            // Empty and idle tokens are the bridge echoing our own reset
            let Some(command) = Command::from_token(token.as_str()) else {
                trace!("Idle command slot");
                return;
            };
            debug!("Remote command: {}", command.name());
            forward(Input::from(command));
        }
        BridgeMessage::Speed(value) => {
            debug!("Remote speed slot: {}", value);
        }
        BridgeMessage::SpeedUnavailable => {
            debug!("Remote speed slot unavailable");
        }
        BridgeMessage::Link { up } => {
            info!("Bridge link {}", if up { "up" } else { "down" });
        }
        BridgeMessage::StreamLost { timeout } => {
            warn!(
                "Command stream {}",
                if timeout { "timed out" } else { "disconnected" }
            );
            forward(Input::StreamLost { timeout });
        }
    }
}

fn forward(input: Input) {
    if INPUT_CHANNEL.try_send(input).is_err() {
        warn!("Input channel full, dropping {:?}", input);
    }
}
