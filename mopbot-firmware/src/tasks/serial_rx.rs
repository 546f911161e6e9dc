//! Local serial receive task
//!
//! Each received byte is one command. Unknown bytes still become
//! [`Command::Unrecognized`] so the controller can stop a manual drive;
//! line terminators are skipped.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use mopbot_core::{Command, Input};

use crate::channels::INPUT_CHANNEL;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 16;

#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: BufferedUartRx) {
    info!("Serial RX task started");

    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) => {
                for command in buf[..n].iter().filter_map(|&byte| Command::from_byte(byte)) {
                    debug!("Serial command: {}", command.name());
                    // Wait for room so a burst of bytes is not lost
                    INPUT_CHANNEL.send(Input::from(command)).await;
                }
            }
            Err(e) => {
                warn!("Serial read error: {:?}", e);
            }
        }
    }
}
