//! Status codes reported by the LoRaWAN stack
//!
//! Every stack entry point returns a raw `i16`. Zero is success, negative
//! values are errors, and a few LoRaWAN results use the negative range for
//! non-error outcomes (a new or restored session). This module only names
//! the codes; the stack defines and produces them.

use core::fmt;

/// Returned by [`decode`] for codes without a label
pub const UNKNOWN_STATUS: &str = "See https://jgromes.github.io/RadioLib/group__status__codes.html";

/// Status codes with a known label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(i16)]
pub enum Status {
    /// Success
    Success = 0,
    /// Radio did not answer on the SPI bus
    ChipNotFound = -2,
    /// Payload exceeds the maximum length
    PacketTooLong = -4,
    /// Receive timed out
    RxTimeout = -6,
    /// Received packet failed its CRC
    CrcMismatch = -7,
    /// Bandwidth not supported by the radio
    InvalidBandwidth = -8,
    /// Spreading factor not supported by the radio
    InvalidSpreadingFactor = -9,
    /// Coding rate not supported by the radio
    InvalidCodingRate = -10,
    /// Frequency outside the radio's range
    InvalidFrequency = -12,
    /// Output power outside the radio's range
    InvalidOutputPower = -13,
    /// Uplink attempted before a session exists
    NetworkNotJoined = -1101,
    /// Downlink could not be parsed
    DownlinkMalformed = -1102,
    /// No JoinAccept was received
    NoJoinAccept = -1116,
    /// Activation resumed a stored session
    SessionRestored = -1117,
    /// Activation completed a fresh join
    NewSession = -1118,
}

impl Status {
    const ALL: [Status; 15] = [
        Status::Success,
        Status::ChipNotFound,
        Status::PacketTooLong,
        Status::RxTimeout,
        Status::CrcMismatch,
        Status::InvalidBandwidth,
        Status::InvalidSpreadingFactor,
        Status::InvalidCodingRate,
        Status::InvalidFrequency,
        Status::InvalidOutputPower,
        Status::NetworkNotJoined,
        Status::DownlinkMalformed,
        Status::NoJoinAccept,
        Status::SessionRestored,
        Status::NewSession,
    ];

    /// Look up a raw code
    pub fn from_code(code: i16) -> Option<Status> {
        Self::ALL.iter().copied().find(|s| s.code() == code)
    }

    /// Raw code as returned by the stack
    pub const fn code(self) -> i16 {
        self as i16
    }

    /// Short label for console output
    pub const fn label(self) -> &'static str {
        match self {
            Status::Success => "ERR_NONE",
            Status::ChipNotFound => "ERR_CHIP_NOT_FOUND",
            Status::PacketTooLong => "ERR_PACKET_TOO_LONG",
            Status::RxTimeout => "ERR_RX_TIMEOUT",
            Status::CrcMismatch => "ERR_CRC_MISMATCH",
            Status::InvalidBandwidth => "ERR_INVALID_BANDWIDTH",
            Status::InvalidSpreadingFactor => "ERR_INVALID_SPREADING_FACTOR",
            Status::InvalidCodingRate => "ERR_INVALID_CODING_RATE",
            Status::InvalidFrequency => "ERR_INVALID_FREQUENCY",
            Status::InvalidOutputPower => "ERR_INVALID_OUTPUT_POWER",
            Status::NetworkNotJoined => "ERR_NETWORK_NOT_JOINED",
            Status::DownlinkMalformed => "ERR_DOWNLINK_MALFORMED",
            Status::NoJoinAccept => "ERR_NO_JOIN_ACCEPT (check keys/range)",
            Status::SessionRestored => "LORAWAN_SESSION_RESTORED",
            Status::NewSession => "LORAWAN_NEW_SESSION",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Label for a raw status code, or [`UNKNOWN_STATUS`]
pub fn decode(code: i16) -> &'static str {
    match Status::from_code(code) {
        Some(status) => status.label(),
        None => UNKNOWN_STATUS,
    }
}

/// Whether an activation result means the device has a session
pub fn is_joined(code: i16) -> bool {
    matches!(
        Status::from_code(code),
        Some(Status::NewSession) | Some(Status::SessionRestored)
    )
}
