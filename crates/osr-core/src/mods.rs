//! Gameplay mod bitmask decoding.
//!
//! Each bit of the 32-bit mask toggles one mod. Bits 0-30 map to the tokens
//! in [`MOD_TABLE`]; bit 31 is reserved and never set by the game.

use strum::{FromRepr, IntoStaticStr};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromRepr, IntoStaticStr)]
#[repr(u8)]
pub enum Mod {
    #[strum(serialize = "NF")]
    NoFail = 0,
    #[strum(serialize = "EZ")]
    Easy = 1,
    #[strum(serialize = "TD")]
    TouchDevice = 2,
    #[strum(serialize = "HD")]
    Hidden = 3,
    #[strum(serialize = "HR")]
    HardRock = 4,
    #[strum(serialize = "SD")]
    SuddenDeath = 5,
    #[strum(serialize = "DT")]
    DoubleTime = 6,
    #[strum(serialize = "RX")]
    Relax = 7,
    #[strum(serialize = "HT")]
    HalfTime = 8,
    #[strum(serialize = "NC")]
    Nightcore = 9,
    #[strum(serialize = "FL")]
    Flashlight = 10,
    #[strum(serialize = "AO")]
    Autoplay = 11,
    #[strum(serialize = "SO")]
    SpunOut = 12,
    #[strum(serialize = "AP")]
    Autopilot = 13,
    #[strum(serialize = "PF")]
    Perfect = 14,
    #[strum(serialize = "K4")]
    Key4 = 15,
    #[strum(serialize = "K5")]
    Key5 = 16,
    #[strum(serialize = "K6")]
    Key6 = 17,
    #[strum(serialize = "K7")]
    Key7 = 18,
    #[strum(serialize = "K8")]
    Key8 = 19,
    #[strum(serialize = "FI")]
    FadeIn = 20,
    #[strum(serialize = "RD")]
    Random = 21,
    #[strum(serialize = "CN")]
    Cinema = 22,
    #[strum(serialize = "TP")]
    TargetPractice = 23,
    #[strum(serialize = "K9")]
    Key9 = 24,
    #[strum(serialize = "CO")]
    KeyCoop = 25,
    #[strum(serialize = "K1")]
    Key1 = 26,
    #[strum(serialize = "K3")]
    Key3 = 27,
    #[strum(serialize = "K2")]
    Key2 = 28,
    #[strum(serialize = "V2")]
    ScoreV2 = 29,
    #[strum(serialize = "MR")]
    Mirror = 30,
}

/// Mods indexed by bit position.
pub const MOD_TABLE: [Mod; 31] = [
    Mod::NoFail,
    Mod::Easy,
    Mod::TouchDevice,
    Mod::Hidden,
    Mod::HardRock,
    Mod::SuddenDeath,
    Mod::DoubleTime,
    Mod::Relax,
    Mod::HalfTime,
    Mod::Nightcore,
    Mod::Flashlight,
    Mod::Autoplay,
    Mod::SpunOut,
    Mod::Autopilot,
    Mod::Perfect,
    Mod::Key4,
    Mod::Key5,
    Mod::Key6,
    Mod::Key7,
    Mod::Key8,
    Mod::FadeIn,
    Mod::Random,
    Mod::Cinema,
    Mod::TargetPractice,
    Mod::Key9,
    Mod::KeyCoop,
    Mod::Key1,
    Mod::Key3,
    Mod::Key2,
    Mod::ScoreV2,
    Mod::Mirror,
];

const RESERVED_BIT: u32 = 1 << 31;

impl Mod {
    pub fn from_bit(position: u8) -> Option<Self> {
        Self::from_repr(position)
    }

    pub fn bit_position(self) -> u8 {
        self as u8
    }

    pub fn mask(self) -> u32 {
        1 << self.bit_position()
    }

    /// Two-letter token, e.g. "HD".
    pub fn token(self) -> &'static str {
        self.into()
    }

    /// Key count for the mania key mods.
    pub fn key_count(self) -> Option<u8> {
        match self {
            Self::Key1 => Some(1),
            Self::Key2 => Some(2),
            Self::Key3 => Some(3),
            Self::Key4 => Some(4),
            Self::Key5 => Some(5),
            Self::Key6 => Some(6),
            Self::Key7 => Some(7),
            Self::Key8 => Some(8),
            Self::Key9 => Some(9),
            _ => None,
        }
    }

    pub fn is_set_in(self, mask: u32) -> bool {
        mask & self.mask() != 0
    }
}

impl std::fmt::Display for Mod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Expands a mod bitmask into mods ordered by ascending bit position.
///
/// The highest set bit is resolved first and prepended, so the lowest bit
/// ends up at the front.
///
/// # Errors
///
/// Returns `ReservedModBit` when bit 31 is set.
pub fn decode_mods(mask: u32) -> Result<Vec<Mod>> {
    if mask & RESERVED_BIT != 0 {
        return Err(Error::ReservedModBit { mask });
    }

    let mut bits = mask;
    let mut mods = Vec::with_capacity(bits.count_ones() as usize);

    while bits != 0 {
        let position = 31 - bits.leading_zeros();
        mods.insert(0, MOD_TABLE[position as usize]);
        bits ^= 1 << position;
    }

    Ok(mods)
}

/// Folds mods back into a bitmask.
pub fn encode_mods(mods: &[Mod]) -> u32 {
    mods.iter().fold(0, |mask, m| mask | m.mask())
}

/// Concatenates tokens, e.g. `[HD, HR]` -> "HDHR".
pub fn format_mods(mods: &[Mod]) -> String {
    mods.iter().map(|m| m.token()).collect()
}
