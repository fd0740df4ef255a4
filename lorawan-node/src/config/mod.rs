//! Device and network configuration
//!
//! This module holds everything that is fixed per deployment:
//! - Device credentials (JoinEUI, DevEUI, root keys)
//! - Radio module and pin wiring of the board
//! - Regional band and sub-band
//! - Uplink interval
//!
//! A build targets one board. [`ACTIVE`] is the preset picked by the
//! `board-*` cargo feature, with the `LORAWAN_*` credential overrides applied.

use core::time::Duration;

/// Radio module and pin wiring
pub mod board;

/// Device credentials
pub mod device;

/// Regional band and sub-band selection
pub mod region;

pub use board::{Board, RadioModule, RadioPins};
pub use device::{parse_eui, parse_key, AESKey, Credentials, LoRaWanVersion, ParseError, EUI64};
pub use region::{Band, SubBand};

#[cfg(not(any(feature = "board-heltec-v3", feature = "board-rak3172")))]
compile_error!("You must enable a board! eg: `board-heltec-v3`, `board-rak3172`");

/// Configuration rejected by [`NodeConfig::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Sub-band index not defined for the band
    #[error("sub-band {sub_band} is out of range for {band} (max {max})")]
    SubBandOutOfRange {
        /// Selected band
        band: Band,
        /// Requested sub-band
        sub_band: u8,
        /// Highest sub-band the band defines
        max: u8,
    },
    /// Uplink interval of zero
    #[error("uplink interval must be non-zero")]
    ZeroUplinkInterval,
    /// DevEUI left at all zeros
    #[error("DevEUI is not set")]
    MissingDevEui,
}

/// Complete parameter set of one end device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeConfig {
    /// Board and radio wiring
    pub board: Board,
    /// OTAA credentials
    pub credentials: Credentials,
    /// Regional band
    pub band: Band,
    /// Sub-band (fixed channel plans only)
    pub sub_band: SubBand,
    /// Time between uplinks. Mind regional duty cycle and network fair-use limits.
    pub uplink_interval: Duration,
}

impl NodeConfig {
    /// Heltec V3 test device on EU868, LoRaWAN 1.0.3
    pub const HELTEC_V3: NodeConfig = NodeConfig {
        board: Board::HELTEC_V3,
        credentials: Credentials::new_v1_0(
            0x16ED77AD6ABFE51D,
            0x49351A037F5327AA,
            [
                0x55, 0x26, 0x0C, 0xF5, 0xE9, 0x32, 0xF9, 0xA1, 0x4A, 0x39, 0x4D, 0x1D, 0xF4,
                0x2F, 0xED, 0x24,
            ],
        ),
        band: Band::EU868,
        sub_band: SubBand::NONE,
        uplink_interval: Duration::from_secs(60),
    };

    /// RAK3172 device on EU868
    pub const RAK3172: NodeConfig = NodeConfig {
        board: Board::RAK3172,
        credentials: Credentials::new(
            0x16ED77AD6ABFE51D,
            0x70B3D57ED0067002,
            [
                0xA1, 0xB2, 0xC3, 0xD4, 0xE5, 0xF6, 0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD,
                0xEF, 0x01, 0x23,
            ],
            [
                0xA1, 0xB2, 0xC3, 0xD4, 0xE5, 0xF6, 0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD,
                0xEF, 0x01, 0x23,
            ],
        ),
        band: Band::EU868,
        sub_band: SubBand::NONE,
        uplink_interval: Duration::from_secs(60),
    };

    /// Same configuration with the `LORAWAN_*` build overrides applied
    pub const fn with_build_overrides(self) -> Self {
        Self {
            credentials: self.credentials.with_build_overrides(),
            ..self
        }
    }

    /// Check the parameters the stack cannot check at construction time
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sub_band.is_valid_for(self.band) {
            return Err(ConfigError::SubBandOutOfRange {
                band: self.band,
                sub_band: self.sub_band.get(),
                max: self.band.max_sub_band(),
            });
        }
        if self.uplink_interval.is_zero() {
            return Err(ConfigError::ZeroUplinkInterval);
        }
        if self.credentials.dev_eui == 0 {
            return Err(ConfigError::MissingDevEui);
        }
        if self.band.has_sub_bands() && self.sub_band == SubBand::NONE {
            warn!("no sub-band selected for {}, stack default applies", self.band.name());
        }
        Ok(())
    }
}

/// Preset selected by the `board-*` feature
#[cfg(feature = "board-rak3172")]
pub const ACTIVE: NodeConfig = NodeConfig::RAK3172.with_build_overrides();

/// Preset selected by the `board-*` feature
#[cfg(not(feature = "board-rak3172"))]
pub const ACTIVE: NodeConfig = NodeConfig::HELTEC_V3.with_build_overrides();
