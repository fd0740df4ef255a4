#![allow(dead_code)]

use embedded_hal::blocking::delay::DelayMs;
use heapless::Deque;
use lorawan_node::{
    config::AESKey,
    node::{LoRaWanStack, Payload},
};

/// Mock stack returning scripted status codes
pub struct MockStack {
    pub radio_state: i16,
    pub begin_state: i16,
    pub activate_state: i16,
    /// Status and downlink for each `send_receive`, consumed front to back
    pub replies: Deque<(i16, Payload), 8>,
    pub credentials: Option<(u64, u64, AESKey, AESKey)>,
    pub last_uplink: Option<(u8, Payload)>,
    pub uplinks: usize,
}

impl MockStack {
    /// Stack where every step succeeds with a fresh session
    pub fn new() -> Self {
        Self {
            radio_state: 0,
            begin_state: 0,
            activate_state: -1118,
            replies: Deque::new(),
            credentials: None,
            last_uplink: None,
            uplinks: 0,
        }
    }

    /// Queue the result of the next `send_receive`
    pub fn reply(mut self, state: i16, downlink: &[u8]) -> Self {
        let mut data = Payload::new();
        data.extend_from_slice(downlink).unwrap();
        self.replies.push_back((state, data)).unwrap();
        self
    }
}

impl LoRaWanStack for MockStack {
    fn begin_radio(&mut self) -> i16 {
        self.radio_state
    }

    fn begin_otaa(
        &mut self,
        join_eui: u64,
        dev_eui: u64,
        nwk_key: &AESKey,
        app_key: &AESKey,
    ) -> i16 {
        self.credentials = Some((join_eui, dev_eui, *nwk_key, *app_key));
        self.begin_state
    }

    fn activate_otaa(&mut self) -> i16 {
        self.activate_state
    }

    fn send_receive(&mut self, uplink: &[u8], fport: u8, downlink: &mut Payload) -> i16 {
        self.uplinks += 1;
        let mut sent = Payload::new();
        sent.extend_from_slice(uplink).unwrap();
        self.last_uplink = Some((fport, sent));

        match self.replies.pop_front() {
            Some((state, data)) => {
                downlink.extend_from_slice(&data).unwrap();
                state
            }
            None => 0,
        }
    }
}

/// Delay that records how long it was asked to wait.
///
/// With a budget it panics on the first wait past it, which is how tests
/// get out of the halt trap and of `Starter::run`.
pub struct MockDelay {
    pub total_ms: u64,
    pub waits: usize,
    budget: Option<usize>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self {
            total_ms: 0,
            waits: 0,
            budget: None,
        }
    }

    /// Allow `waits` calls, then panic
    pub fn with_budget(waits: usize) -> Self {
        Self {
            budget: Some(waits),
            ..Self::new()
        }
    }
}

impl DelayMs<u32> for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        if self.budget == Some(self.waits) {
            panic!(
                "delay_ms({}) after {} waits totalling {} ms",
                ms, self.waits, self.total_ms
            );
        }
        self.waits += 1;
        self.total_ms += u64::from(ms);
    }
}
