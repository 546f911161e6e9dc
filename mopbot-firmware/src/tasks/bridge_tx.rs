//! Bridge UART transmit task

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use mopbot_protocol::frame::MAX_FRAME_SIZE;

use crate::channels::BRIDGE_TX;

#[embassy_executor::task]
pub async fn bridge_tx_task(mut tx: BufferedUartTx) {
    info!("Bridge TX task started");

    let mut buf = [0u8; MAX_FRAME_SIZE];

    loop {
        let message = BRIDGE_TX.receive().await;
        let frame = message.to_frame();

        match frame.encode(&mut buf) {
            Ok(len) => match tx.write_all(&buf[..len]).await {
                Ok(()) => trace!("Sent {:?}", message),
                Err(e) => warn!("Failed to send {:?}: {:?}", message, e),
            },
            Err(e) => warn!("Failed to encode {:?}: {:?}", message, e),
        }
    }
}
