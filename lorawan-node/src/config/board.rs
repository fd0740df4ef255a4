//! Radio module and pin wiring of the supported boards

/// Pins of an external SX126x wired to the MCU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioPins {
    /// SPI chip select (NSS)
    pub nss: u8,
    /// DIO1 interrupt line
    pub dio1: u8,
    /// Reset line
    pub reset: u8,
    /// BUSY line
    pub busy: u8,
}

/// Radio fitted on a board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioModule {
    /// Discrete SX1262 on the SPI bus
    Sx1262(RadioPins),
    /// SX126x die inside an STM32WLx SoC, wired internally
    Stm32Wlx,
}

impl RadioModule {
    /// External pin wiring, if the radio has any
    pub const fn pins(&self) -> Option<RadioPins> {
        match self {
            RadioModule::Sx1262(pins) => Some(*pins),
            RadioModule::Stm32Wlx => None,
        }
    }

    /// Short chip name for logs
    pub const fn name(&self) -> &'static str {
        match self {
            RadioModule::Sx1262(_) => "SX1262",
            RadioModule::Stm32Wlx => "STM32WLx",
        }
    }
}

/// A hardware board revision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Board {
    /// Human readable board name
    pub name: &'static str,
    /// Radio and its wiring
    pub radio: RadioModule,
}

impl Board {
    /// Heltec WiFi LoRa 32 V3 (ESP32-S3 + SX1262)
    pub const HELTEC_V3: Board = Board {
        name: "Heltec V3",
        radio: RadioModule::Sx1262(RadioPins {
            nss: 8,
            dio1: 14,
            reset: 12,
            busy: 13,
        }),
    };

    /// RAKwireless RAK3172 (STM32WLE5 with integrated SX126x)
    pub const RAK3172: Board = Board {
        name: "RAK3172",
        radio: RadioModule::Stm32Wlx,
    };
}
