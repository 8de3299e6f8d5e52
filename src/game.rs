use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};

/// Record layout parameters shared by every generation that uses the
/// block-shuffle cipher: `[8-byte header][block_count blocks][party stats]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationProfile {
    pub party_size: usize,
    pub block_size: usize,
    pub block_count: usize,
}

impl GenerationProfile {
    pub const GEN6: GenerationProfile = GenerationProfile {
        party_size: 0x104,
        block_size: 56,
        block_count: 4,
    };
    pub const GEN8A: GenerationProfile = GenerationProfile {
        party_size: 0x178,
        block_size: 88,
        block_count: 4,
    };
    pub const GEN9: GenerationProfile = GenerationProfile {
        party_size: 0x158,
        block_size: 80,
        block_count: 4,
    };

    /// Size of the record without the trailing party stats.
    pub const fn stored_size(&self) -> usize {
        8 + self.block_count * self.block_size
    }
}

/// A game family. The discriminant is the bank file version code.
#[derive(FromPrimitive, ToPrimitive, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameType {
    ScarletViolet = 1,
    LegendsArceus = 2,
    LetsGo = 3,
    SwordShield = 4,
}

impl GameType {
    pub const ALL: [GameType; 4] = [
        GameType::ScarletViolet,
        GameType::LegendsArceus,
        GameType::LetsGo,
        GameType::SwordShield,
    ];

    pub fn from_version(version: u32) -> Option<Self> {
        GameType::from_u32(version)
    }

    pub fn version(self) -> u32 {
        self.to_u32().unwrap_or_default()
    }

    /// Looks a family up by its bank shape.
    pub fn from_shape(box_count: usize, slots_per_box: usize, slot_size: usize) -> Option<Self> {
        GameType::ALL.into_iter().find(|game| {
            game.box_count() == box_count
                && game.slots_per_box() == slots_per_box
                && game.slot_size() == slot_size
        })
    }

    pub fn profile(self) -> GenerationProfile {
        match self {
            GameType::ScarletViolet | GameType::SwordShield => GenerationProfile::GEN9,
            GameType::LegendsArceus => GenerationProfile::GEN8A,
            GameType::LetsGo => GenerationProfile::GEN6,
        }
    }

    pub fn box_count(self) -> usize {
        match self {
            GameType::ScarletViolet | GameType::LegendsArceus => 32,
            GameType::LetsGo | GameType::SwordShield => 40,
        }
    }

    pub fn slots_per_box(self) -> usize {
        match self {
            GameType::LetsGo => 25,
            _ => 30,
        }
    }

    pub fn slot_size(self) -> usize {
        self.profile().party_size
    }

    /// Name of this family's subdirectory under the bank root.
    pub fn dir_name(self) -> &'static str {
        match self {
            GameType::ScarletViolet => "sv",
            GameType::LegendsArceus => "pla",
            GameType::LetsGo => "lgpe",
            GameType::SwordShield => "swsh",
        }
    }

    pub fn from_dir_name(name: &str) -> Option<Self> {
        GameType::ALL
            .into_iter()
            .find(|game| game.dir_name().eq_ignore_ascii_case(name))
    }
}

impl Default for GameType {
    fn default() -> Self {
        GameType::ScarletViolet
    }
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match *self {
            GameType::ScarletViolet => "Scarlet/Violet",
            GameType::LegendsArceus => "Legends: Arceus",
            GameType::LetsGo => "Let's Go",
            GameType::SwordShield => "Sword/Shield",
        })
    }
}
