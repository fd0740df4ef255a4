//! Configuration and console helpers for a LoRaWAN end device
//!
//! This crate holds the per-deployment side of a LoRaWAN node: who the device
//! is, which board and radio it runs on, which regional band it uses and how
//! often it reports. The LoRaWAN stack itself (join, session keys, MAC
//! commands, duty cycle, frame crypto) is external and reached through the
//! [`node::LoRaWanStack`] trait.
//!
//! # Features
//! - `board-heltec-v3` (default): Heltec V3, SX1262 wiring
//! - `board-rak3172`: RAK3172, integrated STM32WLx radio
//! - `defmt` / `log`: internal logging backend
//! - `std`: `std::error::Error` for the error types
//!
//! Credentials can be overridden at build time with the `LORAWAN_JOIN_EUI`,
//! `LORAWAN_DEV_EUI`, `LORAWAN_APP_KEY` and `LORAWAN_NWK_KEY` environment
//! variables.
//!
//! # Example
//! ```no_run
//! use lorawan_node::{config, console::Console, node::Starter};
//!
//! # struct Uart;
//! # impl core::fmt::Write for Uart {
//! #     fn write_str(&mut self, _: &str) -> core::fmt::Result { Ok(()) }
//! # }
//! # struct Delay;
//! # impl embedded_hal::blocking::delay::DelayMs<u32> for Delay {
//! #     fn delay_ms(&mut self, _: u32) {}
//! # }
//! # struct Stack;
//! # impl lorawan_node::node::LoRaWanStack for Stack {
//! #     fn begin_radio(&mut self) -> i16 { 0 }
//! #     fn begin_otaa(&mut self, _: u64, _: u64, _: &[u8; 16], _: &[u8; 16]) -> i16 { 0 }
//! #     fn activate_otaa(&mut self) -> i16 { -1118 }
//! #     fn send_receive(&mut self, _: &[u8], _: u8, _: &mut lorawan_node::node::Payload) -> i16 { 0 }
//! # }
//! let console = Console::new(Uart, Delay);
//! let mut node = Starter::new(Stack, console, config::ACTIVE);
//! node.setup();
//!
//! let mut count = 0u8;
//! node.run(1, |payload| {
//!     count = count.wrapping_add(1);
//!     payload.push(count).ok();
//! });
//! ```

#![warn(missing_docs)]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod fmt;

/// Device and network configuration
pub mod config;

/// Serial console helpers
pub mod console;

/// Stack boundary and join/uplink flow
pub mod node;

/// Stack status codes
pub mod status;
