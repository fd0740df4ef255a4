//! Boundary to the LoRaWAN stack and the standard join-then-uplink flow
//!
//! The stack (radio driver, MAC, crypto, duty cycle) lives outside this
//! crate. [`LoRaWanStack`] is the narrow surface the node needs from it, and
//! [`Starter`] drives that surface with a [`NodeConfig`]: bring up the radio,
//! hand over the credentials, join, then send uplinks at the configured
//! interval.

use core::fmt::Write;

use embedded_hal::blocking::delay::DelayMs;
use heapless::Vec;

use crate::{
    config::{AESKey, NodeConfig},
    console::Console,
    status::{self, Status},
};

/// Largest application payload of any region
pub const MAX_PAYLOAD_SIZE: usize = 242;

/// Application payload buffer, uplink or downlink
pub type Payload = Vec<u8, MAX_PAYLOAD_SIZE>;

/// Entry points of the external LoRaWAN stack.
///
/// Every call returns the stack's raw status code, see [`crate::status`].
pub trait LoRaWanStack {
    /// Initialise the radio hardware
    fn begin_radio(&mut self) -> i16;

    /// Load OTAA credentials into the node
    fn begin_otaa(
        &mut self,
        join_eui: u64,
        dev_eui: u64,
        nwk_key: &AESKey,
        app_key: &AESKey,
    ) -> i16;

    /// Restore a session or perform an OTAA join.
    ///
    /// Succeeds with [`Status::NewSession`] or [`Status::SessionRestored`].
    fn activate_otaa(&mut self) -> i16;

    /// Send an uplink on `fport` and listen for a downlink.
    ///
    /// Returns a negative code on error, `0` when nothing was received, or
    /// the receive window (1 or 2) that delivered `downlink`.
    fn send_receive(&mut self, uplink: &[u8], fport: u8, downlink: &mut Payload) -> i16;
}

/// Result of one uplink cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Uplink {
    /// Sent, no downlink in either window
    Sent,
    /// Sent, downlink received in `window`
    Downlink {
        /// Receive window that delivered the payload
        window: u8,
        /// Application payload
        payload: Payload,
    },
    /// Stack reported an error, already logged
    Failed(i16),
}

/// Drives a [`LoRaWanStack`] through setup and periodic uplinks
pub struct Starter<S, W, D>
where
    S: LoRaWanStack,
    W: Write,
    D: DelayMs<u32>,
{
    stack: S,
    console: Console<W, D>,
    config: NodeConfig,
}

impl<S, W, D> Starter<S, W, D>
where
    S: LoRaWanStack,
    W: Write,
    D: DelayMs<u32>,
{
    /// Create a starter for `config`
    pub fn new(stack: S, console: Console<W, D>, config: NodeConfig) -> Self {
        Self {
            stack,
            console,
            config,
        }
    }

    /// Bring up the radio and join. Any failure halts in [`Console::halt`].
    pub fn setup(&mut self) {
        info!(
            "{} ({}) on {}",
            self.config.board.name,
            self.config.board.radio.name(),
            self.config.band.name()
        );
        if let Err(e) = self.config.validate() {
            error!("invalid configuration");
            self.console
                .println(format_args!("Invalid configuration: {}", e));
            self.console.halt();
        }

        self.console.println("Initialise the radio");
        let state = self.stack.begin_radio();
        self.console
            .debug(state != Status::Success.code(), "Initialise radio failed", state, true);

        let creds = self.config.credentials;
        self.console.println("Initialise LoRaWAN node");
        let state = self
            .stack
            .begin_otaa(creds.join_eui, creds.dev_eui, &creds.nwk_key, &creds.app_key);
        self.console
            .debug(state != Status::Success.code(), "Initialise node failed", state, true);

        self.console.println("Join ('login') the LoRaWAN Network");
        let state = self.stack.activate_otaa();
        self.console
            .debug(!status::is_joined(state), "Join failed", state, true);

        info!("joined: {}", status::decode(state));
        self.console.println("Ready!");
    }

    /// Send one uplink and report what came back. Errors are logged, never fatal.
    pub fn uplink(&mut self, payload: &[u8], fport: u8) -> Uplink {
        let mut downlink = Payload::new();
        let state = self.stack.send_receive(payload, fport, &mut downlink);
        self.console
            .debug(state < Status::Success.code(), "Error in sendReceive", state, false);

        if state < 0 {
            return Uplink::Failed(state);
        }
        if state == 0 {
            debug!("no downlink received");
            self.console.println("No downlink received");
            return Uplink::Sent;
        }

        self.console.println("Downlink received");
        self.console.array_dump(&downlink);
        let window = u8::try_from(state).unwrap_or(u8::MAX);
        debug!("downlink of {} bytes in window {}", downlink.len(), window);
        Uplink::Downlink {
            window,
            payload: downlink,
        }
    }

    /// Run uplinks forever, `make_payload` filling each one, pausing
    /// `uplink_interval` in between.
    pub fn run<F>(&mut self, fport: u8, mut make_payload: F) -> !
    where
        F: FnMut(&mut Payload),
    {
        let interval_ms =
            u32::try_from(self.config.uplink_interval.as_millis()).unwrap_or(u32::MAX);
        let mut payload = Payload::new();
        loop {
            payload.clear();
            make_payload(&mut payload);
            self.uplink(&payload, fport);
            trace!("next uplink in {} ms", interval_ms);
            self.console.delay_ms(interval_ms);
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Borrow the console
    pub fn console(&self) -> &Console<W, D> {
        &self.console
    }

    /// Borrow the stack
    pub fn stack(&self) -> &S {
        &self.stack
    }
}
