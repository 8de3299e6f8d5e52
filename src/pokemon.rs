use byteorder::{ByteOrder, LittleEndian};

use crate::{
    crypto,
    game::GameType,
    names::NameTables,
    species,
    text::{decode_utf16_field, encode_utf16_field},
    TrainerId,
};

const OFS_ENCRYPTION_CONSTANT: usize = 0x00;
const OFS_SPECIES: usize = 0x08;
const OFS_HELD_ITEM: usize = 0x0A;
const OFS_TID: usize = 0x0C;
const OFS_SID: usize = 0x0E;
const OFS_EXPERIENCE: usize = 0x10;
const OFS_ABILITY: usize = 0x14;
const OFS_PID: usize = 0x1C;
const OFS_NATURE: usize = 0x20;
const OFS_FATEFUL_GENDER: usize = 0x22;
const OFS_FORM: usize = 0x24;
const OFS_NICKNAME: usize = 0x58;
const NICKNAME_LENGTH: usize = 13 * 2;
const OFS_MOVES: usize = 0x72;
const OFS_IV32: usize = 0x8C;
const OFS_PARTY_LEVEL: usize = 0x148;

const IV32_EGG: u32 = 1 << 30;
const IV32_NICKNAMED: u32 = 1 << 31;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Genderless,
}

/// A decrypted entity record, read and written through fixed little-endian
/// offsets. Reads past the end of the buffer return zero and writes past it
/// are dropped, so the same accessors serve every record size.
#[derive(Clone, Debug)]
pub struct Pokemon {
    data: Vec<u8>,
    game: GameType,
}

impl Pokemon {
    /// An empty (all zero) record sized for `game`.
    pub fn new(game: GameType) -> Self {
        Pokemon {
            data: vec![0u8; game.slot_size()],
            game,
        }
    }

    /// Wraps already-decrypted bytes, zero-padding or truncating them to the
    /// record size of `game`.
    pub fn from_decrypted(data: &[u8], game: GameType) -> Self {
        let mut data = data[..data.len().min(game.slot_size())].to_vec();
        data.resize(game.slot_size(), 0);
        Pokemon { data, game }
    }

    /// Decrypts an encoded record using the cipher profile of `game`.
    pub fn from_encrypted(data: &[u8], game: GameType) -> Self {
        Pokemon {
            data: crypto::decrypt(data, game.profile()),
            game,
        }
    }

    /// Encodes this record using the cipher profile of its game.
    pub fn encrypted(&self) -> Vec<u8> {
        crypto::encrypt(&self.data, self.game.profile())
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn game(&self) -> GameType {
        self.game
    }

    pub fn with_game(mut self, game: GameType) -> Self {
        self.game = game;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.encryption_constant() == 0 && self.species_internal() == 0
    }

    fn read_u8(&self, offset: usize) -> u8 {
        self.data.get(offset).copied().unwrap_or(0)
    }

    fn read_u16(&self, offset: usize) -> u16 {
        self.data
            .get(offset..offset + 2)
            .map(LittleEndian::read_u16)
            .unwrap_or(0)
    }

    fn read_u32(&self, offset: usize) -> u32 {
        self.data
            .get(offset..offset + 4)
            .map(LittleEndian::read_u32)
            .unwrap_or(0)
    }

    fn write_u8(&mut self, offset: usize, value: u8) {
        if let Some(byte) = self.data.get_mut(offset) {
            *byte = value;
        }
    }

    fn write_u16(&mut self, offset: usize, value: u16) {
        if let Some(slice) = self.data.get_mut(offset..offset + 2) {
            LittleEndian::write_u16(slice, value);
        }
    }

    fn write_u32(&mut self, offset: usize, value: u32) {
        if let Some(slice) = self.data.get_mut(offset..offset + 4) {
            LittleEndian::write_u32(slice, value);
        }
    }

    pub fn encryption_constant(&self) -> u32 {
        self.read_u32(OFS_ENCRYPTION_CONSTANT)
    }

    pub fn set_encryption_constant(&mut self, value: u32) {
        self.write_u32(OFS_ENCRYPTION_CONSTANT, value)
    }

    /// Species id as stored, in the game's internal numbering.
    pub fn species_internal(&self) -> u16 {
        self.read_u16(OFS_SPECIES)
    }

    pub fn set_species_internal(&mut self, value: u16) {
        self.write_u16(OFS_SPECIES, value)
    }

    pub fn species_national(&self) -> u16 {
        species::get_national9(self.species_internal())
    }

    pub fn set_species_national(&mut self, national: u16) {
        self.set_species_internal(species::get_internal9(national))
    }

    pub fn held_item(&self) -> u16 {
        self.read_u16(OFS_HELD_ITEM)
    }

    pub fn set_held_item(&mut self, value: u16) {
        self.write_u16(OFS_HELD_ITEM, value)
    }

    pub fn trainer_id(&self) -> TrainerId {
        TrainerId {
            public_id: self.read_u16(OFS_TID),
            secret_id: self.read_u16(OFS_SID),
        }
    }

    pub fn set_trainer_id(&mut self, id: TrainerId) {
        self.write_u16(OFS_TID, id.public_id);
        self.write_u16(OFS_SID, id.secret_id);
    }

    pub fn experience(&self) -> u32 {
        self.read_u32(OFS_EXPERIENCE)
    }

    pub fn set_experience(&mut self, value: u32) {
        self.write_u32(OFS_EXPERIENCE, value)
    }

    pub fn ability(&self) -> u16 {
        self.read_u16(OFS_ABILITY)
    }

    pub fn set_ability(&mut self, value: u16) {
        self.write_u16(OFS_ABILITY, value)
    }

    pub fn pid(&self) -> u32 {
        self.read_u32(OFS_PID)
    }

    pub fn set_pid(&mut self, value: u32) {
        self.write_u32(OFS_PID, value)
    }

    pub fn nature(&self) -> u8 {
        self.read_u8(OFS_NATURE)
    }

    pub fn set_nature(&mut self, value: u8) {
        self.write_u8(OFS_NATURE, value)
    }

    pub fn fateful_encounter(&self) -> bool {
        self.read_u8(OFS_FATEFUL_GENDER) & 0b1 != 0
    }

    pub fn set_fateful_encounter(&mut self, value: bool) {
        let packed = self.read_u8(OFS_FATEFUL_GENDER) & !0b1;
        self.write_u8(OFS_FATEFUL_GENDER, packed | u8::from(value))
    }

    pub fn gender(&self) -> Gender {
        match (self.read_u8(OFS_FATEFUL_GENDER) >> 1) & 0b11 {
            0 => Gender::Male,
            1 => Gender::Female,
            _ => Gender::Genderless,
        }
    }

    pub fn set_gender(&mut self, gender: Gender) {
        let bits = match gender {
            Gender::Male => 0,
            Gender::Female => 1,
            Gender::Genderless => 2,
        };
        let packed = self.read_u8(OFS_FATEFUL_GENDER) & !0b110;
        self.write_u8(OFS_FATEFUL_GENDER, packed | (bits << 1))
    }

    pub fn form(&self) -> u8 {
        self.read_u8(OFS_FORM)
    }

    pub fn set_form(&mut self, value: u8) {
        self.write_u8(OFS_FORM, value)
    }

    pub fn nickname(&self) -> String {
        self.data
            .get(OFS_NICKNAME..OFS_NICKNAME + NICKNAME_LENGTH)
            .map(decode_utf16_field)
            .unwrap_or_default()
    }

    /// Stores `name` (at most 12 UTF-16 units) without touching the
    /// nicknamed flag.
    pub fn set_nickname(&mut self, name: &str) {
        if let Some(field) = self
            .data
            .get_mut(OFS_NICKNAME..OFS_NICKNAME + NICKNAME_LENGTH)
        {
            encode_utf16_field(name, field);
        }
    }

    pub fn moves(&self) -> [u16; 4] {
        let mut moves = [0u16; 4];
        for (idx, mv) in moves.iter_mut().enumerate() {
            *mv = self.read_u16(OFS_MOVES + 2 * idx);
        }
        moves
    }

    pub fn set_moves(&mut self, moves: [u16; 4]) {
        for (idx, mv) in moves.into_iter().enumerate() {
            self.write_u16(OFS_MOVES + 2 * idx, mv);
        }
    }

    pub fn iv32(&self) -> u32 {
        self.read_u32(OFS_IV32)
    }

    pub fn set_iv32(&mut self, value: u32) {
        self.write_u32(OFS_IV32, value)
    }

    /// HP, Atk, Def, Spe, SpA, SpD.
    pub fn ivs(&self) -> [u8; 6] {
        let iv32 = self.iv32();
        let mut ivs = [0u8; 6];
        (0..6).for_each(|idx| ivs[idx] = ((iv32 >> (5 * idx)) & 0b11111) as u8);
        ivs
    }

    pub fn is_egg(&self) -> bool {
        self.iv32() & IV32_EGG != 0
    }

    pub fn set_is_egg(&mut self, value: bool) {
        self.set_iv32_flag(IV32_EGG, value)
    }

    pub fn is_nicknamed(&self) -> bool {
        self.iv32() & IV32_NICKNAMED != 0
    }

    pub fn set_is_nicknamed(&mut self, value: bool) {
        self.set_iv32_flag(IV32_NICKNAMED, value)
    }

    fn set_iv32_flag(&mut self, flag: u32, value: bool) {
        let iv32 = if value {
            self.iv32() | flag
        } else {
            self.iv32() & !flag
        };
        self.set_iv32(iv32)
    }

    /// Party-only level byte; zero for records that do not carry it.
    pub fn level(&self) -> u8 {
        self.read_u8(OFS_PARTY_LEVEL)
    }

    pub fn set_level(&mut self, value: u8) {
        self.write_u8(OFS_PARTY_LEVEL, value)
    }

    pub fn is_shiny(&self) -> bool {
        let pid = self.pid();
        let id = self.trainer_id();
        let xor = (pid >> 16) ^ (pid & 0xFFFF) ^ u32::from(id.public_id) ^ u32::from(id.secret_id);
        xor < 16
    }

    pub fn display_name(&self, names: &NameTables) -> String {
        if self.is_empty() {
            String::new()
        } else if self.is_egg() {
            names.species(0).to_owned()
        } else if self.is_nicknamed() {
            self.nickname()
        } else {
            names.species(self.species_national()).to_owned()
        }
    }

    pub fn move_names<'a>(&self, names: &'a NameTables) -> [&'a str; 4] {
        self.moves().map(|mv| names.move_name(mv))
    }
}

/// Compares record bytes only; the game tag is metadata.
impl PartialEq for Pokemon {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for Pokemon {}

impl std::fmt::Display for Pokemon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return f.write_str("(empty)");
        }
        write!(
            f,
            "#{:04} form {} lv {}{}{}",
            self.species_national(),
            self.form(),
            self.level(),
            if self.is_shiny() { " shiny" } else { "" },
            if self.is_egg() { " egg" } else { "" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Pokemon {
        let mut pkmn = Pokemon::new(GameType::ScarletViolet);
        pkmn.set_encryption_constant(0xDEAD_BEEF);
        pkmn.set_species_internal(25);
        pkmn.set_pid(0x1234_5678);
        pkmn.set_trainer_id(TrainerId {
            public_id: 12345,
            secret_id: 54321,
        });
        pkmn.set_moves([85, 86, 98, 0]);
        pkmn.set_level(42);
        pkmn
    }

    #[test]
    fn empty_iff_constant_and_species_are_zero() {
        let mut pkmn = Pokemon::new(GameType::ScarletViolet);
        assert!(pkmn.is_empty());
        pkmn.set_held_item(4);
        pkmn.set_pid(99);
        assert!(pkmn.is_empty());
        pkmn.set_species_internal(1);
        assert!(!pkmn.is_empty());
        pkmn.set_species_internal(0);
        pkmn.set_encryption_constant(1);
        assert!(!pkmn.is_empty());
    }

    #[test]
    fn fields_live_at_fixed_offsets() {
        let pkmn = sample();
        let data = pkmn.data();
        assert_eq!(&data[0..4], &0xDEAD_BEEFu32.to_le_bytes());
        assert_eq!(&data[0x08..0x0A], &25u16.to_le_bytes());
        assert_eq!(&data[0x1C..0x20], &0x1234_5678u32.to_le_bytes());
        assert_eq!(&data[0x72..0x74], &85u16.to_le_bytes());
        assert_eq!(data[0x148], 42);
    }

    #[test]
    fn shiny_from_pid_and_ids() {
        let mut pkmn = Pokemon::new(GameType::ScarletViolet);
        pkmn.set_trainer_id(TrainerId {
            public_id: 0x1111,
            secret_id: 0x2222,
        });
        // high ^ low ^ tid ^ sid == 0
        pkmn.set_pid(0x3333_0000);
        assert!(pkmn.is_shiny());
        pkmn.set_pid(0x3333_000F);
        assert!(pkmn.is_shiny());
        pkmn.set_pid(0x3333_0010);
        assert!(!pkmn.is_shiny());
    }

    #[test]
    fn flags_share_the_iv_word() {
        let mut pkmn = sample();
        pkmn.set_iv32(0x3FFF_FFFF & 0b11111);
        pkmn.set_is_egg(true);
        assert!(pkmn.is_egg());
        assert!(!pkmn.is_nicknamed());
        pkmn.set_is_nicknamed(true);
        assert_eq!(pkmn.iv32() >> 30, 0b11);
        assert_eq!(pkmn.ivs()[0], 31);
        pkmn.set_is_egg(false);
        assert_eq!(pkmn.iv32() >> 30, 0b10);
    }

    #[test]
    fn gender_and_fateful_are_packed() {
        let mut pkmn = sample();
        pkmn.set_fateful_encounter(true);
        pkmn.set_gender(Gender::Genderless);
        assert_eq!(pkmn.data()[0x22], 0b101);
        assert_eq!(pkmn.gender(), Gender::Genderless);
        assert!(pkmn.fateful_encounter());
    }

    #[test]
    fn display_name_policy() {
        let names = NameTables::from_text("Egg\nBulbasaur", "", "", "");
        assert_eq!(Pokemon::new(GameType::ScarletViolet).display_name(&names), "");

        let mut pkmn = sample();
        pkmn.set_species_internal(1);
        assert_eq!(pkmn.display_name(&names), "Bulbasaur");

        pkmn.set_nickname("Sprout");
        pkmn.set_is_nicknamed(true);
        assert_eq!(pkmn.display_name(&names), "Sprout");

        pkmn.set_is_egg(true);
        assert_eq!(pkmn.display_name(&names), "Egg");
    }

    #[test]
    fn encrypted_round_trip() {
        let pkmn = sample();
        let encrypted = pkmn.encrypted();
        assert_ne!(&encrypted[8..], &pkmn.data()[8..]);
        let back = Pokemon::from_encrypted(&encrypted, GameType::ScarletViolet);
        assert_eq!(back, pkmn);
    }

    #[test]
    fn short_records_read_zero_past_end() {
        let mut pkmn = Pokemon::new(GameType::LetsGo);
        assert_eq!(pkmn.data().len(), 0x104);
        pkmn.set_level(50);
        assert_eq!(pkmn.level(), 0);
    }
}
