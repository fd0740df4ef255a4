use core::fmt;

/// 125 kHz channel spacing of the fixed channel plans
const NARROW_SPACING_HZ: u32 = 200_000;
/// 500 kHz channel spacing of the fixed channel plans
const WIDE_SPACING_HZ: u32 = 1_600_000;
/// 125 kHz channels per sub-band
const CHANNELS_PER_SUB_BAND: u32 = 8;

/// Regional frequency plan handed to the LoRaWAN stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(non_camel_case_types, missing_docs)]
pub enum Band {
    EU868,
    US915,
    EU433,
    AU915,
    CN470,
    AS923,
    AS923_2,
    AS923_3,
    AS923_4,
    KR920,
    IN865,
}

/// Upstream layout of a fixed channel plan
#[derive(Debug, Clone, Copy)]
struct FixedPlan {
    /// First 125 kHz uplink channel
    narrow_base: u32,
    /// First 500 kHz uplink channel, if the plan has them
    wide_base: Option<u32>,
    sub_bands: u8,
}

impl Band {
    /// Name as used in regional parameter documents
    pub const fn name(self) -> &'static str {
        match self {
            Band::EU868 => "EU868",
            Band::US915 => "US915",
            Band::EU433 => "EU433",
            Band::AU915 => "AU915",
            Band::CN470 => "CN470",
            Band::AS923 => "AS923",
            Band::AS923_2 => "AS923-2",
            Band::AS923_3 => "AS923-3",
            Band::AS923_4 => "AS923-4",
            Band::KR920 => "KR920",
            Band::IN865 => "IN865",
        }
    }

    const fn fixed_plan(self) -> Option<FixedPlan> {
        match self {
            Band::US915 => Some(FixedPlan {
                narrow_base: 902_300_000,
                wide_base: Some(903_000_000),
                sub_bands: 8,
            }),
            Band::AU915 => Some(FixedPlan {
                narrow_base: 915_200_000,
                wide_base: Some(915_900_000),
                sub_bands: 8,
            }),
            Band::CN470 => Some(FixedPlan {
                narrow_base: 470_300_000,
                wide_base: None,
                sub_bands: 12,
            }),
            _ => None,
        }
    }

    /// Whether the plan is divided into sub-bands
    pub const fn has_sub_bands(self) -> bool {
        self.fixed_plan().is_some()
    }

    /// Highest valid sub-band, 0 for dynamic plans
    pub const fn max_sub_band(self) -> u8 {
        match self.fixed_plan() {
            Some(plan) => plan.sub_bands,
            None => 0,
        }
    }

    /// Uplink channel frequencies (Hz) enabled by `sub_band`.
    ///
    /// Yields the eight 125 kHz channels of the sub-band followed by its
    /// 500 kHz channel where the plan has one. Empty for dynamic plans,
    /// `SubBand::NONE` and out-of-range sub-bands.
    pub fn sub_band_channels(self, sub_band: SubBand) -> impl Iterator<Item = u32> {
        let selected = match (self.fixed_plan(), sub_band.get()) {
            (Some(plan), n) if (1..=plan.sub_bands).contains(&n) => {
                Some((plan, u32::from(n - 1)))
            }
            _ => None,
        };

        let narrow = selected.into_iter().flat_map(|(plan, idx)| {
            let first = idx * CHANNELS_PER_SUB_BAND;
            (first..first + CHANNELS_PER_SUB_BAND)
                .map(move |ch| plan.narrow_base + ch * NARROW_SPACING_HZ)
        });
        let wide = selected
            .and_then(|(plan, idx)| plan.wide_base.map(|base| base + idx * WIDE_SPACING_HZ));

        narrow.chain(wide)
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sub-band of a fixed channel plan, 1-based. `0` leaves the choice to the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SubBand(u8);

impl SubBand {
    /// No sub-band restriction
    pub const NONE: SubBand = SubBand(0);

    /// Wrap a raw sub-band index
    pub const fn new(index: u8) -> Self {
        SubBand(index)
    }

    /// Raw index as passed to the stack
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Whether this sub-band can be used with `band`
    pub const fn is_valid_for(self, band: Band) -> bool {
        self.0 <= band.max_sub_band()
    }
}
