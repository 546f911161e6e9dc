//! Remote channel over the network bridge link
//!
//! The bridge owns the network session and the database client. It pushes
//! link state, the speed slot and command tokens over UART1; the bridge RX
//! task feeds the reports into the shared [`BridgeState`]. Requests from the
//! control loop are queued on [`BRIDGE_TX`] and never wait for an answer.

use core::cell::RefCell;

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use mopbot_core::link::BridgeState;
use mopbot_core::traits::{RemoteChannel, RemoteError};
use mopbot_protocol::{BridgeMessage, RobotMessage};

use crate::channels::BRIDGE_TX;

/// Bridge mirror shared by the bridge RX task and the control task
static STATE: Mutex<CriticalSectionRawMutex, RefCell<BridgeState>> =
    Mutex::new(RefCell::new(BridgeState::new()));

fn with_state<T>(f: impl FnOnce(&mut BridgeState) -> T) -> T {
    STATE.lock(|state| f(&mut state.borrow_mut()))
}

/// Queue a request, keeping a refused resubscribe pending
fn send(message: RobotMessage) -> Result<(), RemoteError> {
    if BRIDGE_TX.try_send(message).is_err() {
        if message == RobotMessage::Resubscribe {
            with_state(BridgeState::defer_resubscribe);
        }
        return Err(RemoteError::Busy);
    }
    Ok(())
}

/// Record a bridge report and flush a request it unblocked
pub fn apply(message: &BridgeMessage) {
    if let Some(request) = with_state(|state| state.apply(message)) {
        info!("Link up, sending deferred {:?}", request);
        if send(request).is_err() {
            warn!("Bridge TX full, {:?} stays pending", request);
        }
    }
}

/// [`RemoteChannel`] backed by the bridge mirror
#[derive(Debug, Default)]
pub struct BridgeRemote;

impl BridgeRemote {
    fn request(&self, message: RobotMessage) -> Result<(), RemoteError> {
        match with_state(|state| state.request(message))? {
            Some(message) => send(message),
            None => Ok(()),
        }
    }
}

impl RemoteChannel for BridgeRemote {
    fn fetch_speed(&mut self) -> Result<i32, RemoteError> {
        with_state(|state| state.fetch_speed())
    }

    fn reset_command(&mut self) -> Result<(), RemoteError> {
        self.request(RobotMessage::ResetCommand)
    }

    fn is_alive(&mut self) -> bool {
        // The periodic check also retries a resubscribe the TX queue refused
        let (alive, pending) = with_state(|state| (state.is_link_up(), state.take_pending()));
        if let Some(request) = pending {
            let _ = send(request);
        }
        alive
    }

    fn reconnect(&mut self) -> Result<(), RemoteError> {
        self.request(RobotMessage::Reconnect)
    }

    fn resubscribe(&mut self) -> Result<(), RemoteError> {
        self.request(RobotMessage::Resubscribe)
    }
}
