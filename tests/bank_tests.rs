use pkhouse::{bank::BANK_MAGIC, Bank, Error, GameType, Pokemon};

fn pokemon(game: GameType, seed: u32) -> Pokemon {
    let mut pkmn = Pokemon::new(game);
    pkmn.set_encryption_constant(seed.wrapping_mul(0x9E37_79B9) | 1);
    pkmn.set_species_internal((seed % 1000) as u16 + 1);
    pkmn.set_pid(seed);
    pkmn.set_nickname("Roamer");
    pkmn
}

#[test]
fn test_save_then_load_reproduces_every_slot() {
    for game in GameType::ALL {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.bin");

        let mut bank = Bank::new(game);
        for (idx, (box_number, slot)) in [(0, 0), (1, 5), (game.box_count() - 1, game.slots_per_box() - 1)]
            .into_iter()
            .enumerate()
        {
            bank.set_slot(box_number, slot, &pokemon(game, idx as u32 + 7));
        }
        bank.save(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], BANK_MAGIC);
        assert_eq!(bytes.len(), 16 + game.box_count() * game.slots_per_box() * game.slot_size());

        let mut loaded = Bank::default();
        loaded.load(&path).unwrap();
        assert_eq!(loaded.game_type(), game);
        assert_eq!(loaded.box_count(), bank.box_count());
        assert_eq!(loaded.slots_per_box(), bank.slots_per_box());
        assert_eq!(loaded.slot_size(), bank.slot_size());
        for box_number in 0..game.box_count() {
            for slot in 0..game.slots_per_box() {
                assert_eq!(loaded.get_slot(box_number, slot), bank.get_slot(box_number, slot));
            }
        }
        assert!(!dir.path().join("bank.bin.tmp").exists());
    }
}

#[test]
fn test_missing_file_keeps_default() {
    let dir = tempfile::tempdir().unwrap();
    let mut bank = Bank::default();
    bank.load(dir.path().join("nothing.bin")).unwrap();
    assert_eq!(bank.game_type(), GameType::ScarletViolet);
    assert_eq!(bank.box_count(), 32);
    assert_eq!(bank.slots_per_box(), 30);
}

#[test]
fn test_unknown_version_leaves_state_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.bin");
    let mut contents = BANK_MAGIC.to_vec();
    contents.extend_from_slice(&0xFFFF_FFFFu32.to_le_bytes());
    contents.extend_from_slice(&[0u8; 4]);
    contents.resize(contents.len() + 4096, 0xAB);
    std::fs::write(&path, contents).unwrap();

    let mut bank = Bank::new(GameType::LegendsArceus);
    let pkmn = pokemon(GameType::LegendsArceus, 3);
    bank.set_slot(2, 2, &pkmn);

    let result = bank.load(&path);
    assert!(matches!(result, Err(Error::UnsupportedVersion(0xFFFF_FFFF))));
    assert_eq!(bank.game_type(), GameType::LegendsArceus);
    assert_eq!(bank.get_slot(2, 2), pkmn);
}

#[test]
fn test_truncated_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.bin");
    let mut full = Vec::new();
    Bank::default().write_to(&mut full).unwrap();
    full.truncate(full.len() - 1);
    std::fs::write(&path, full).unwrap();

    let mut bank = Bank::default();
    assert!(matches!(bank.load(&path), Err(Error::Io(_))));
}

#[test]
fn test_reserved_header_bytes_are_ignored_on_read() {
    let mut bytes = Vec::new();
    Bank::default().write_to(&mut bytes).unwrap();
    bytes[12..16].copy_from_slice(&[1, 2, 3, 4]);
    let bank = Bank::from_bytes(&bytes).unwrap();
    assert_eq!(bank.occupied_count(), 0);
}
