use std::fs;

use gbcc_store::{CheatEntry, CheatStore, RomFiles, StoreError};
use tempfile::tempdir;

fn sample() -> Vec<CheatEntry> {
    vec![
        CheatEntry::new("Infinite health", "01FF26C1", true),
        CheatEntry::new("Moon jump", "0A1B2CD3E", false),
        CheatEntry::new("Max money = 9999", "01990CD0", true),
    ]
}

#[test]
fn open_missing_file_creates_empty_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("game.cheats");

    let store = CheatStore::open(&path).unwrap();

    assert!(store.is_empty());
    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
}

#[test]
fn open_fails_when_parent_directory_is_missing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config").join("game.cheats");

    assert!(matches!(
        CheatStore::open(&path),
        Err(StoreError::Io { .. })
    ));
}

#[test]
fn saved_entries_reload_in_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roundtrip.cheats");

    let mut store = CheatStore::open(&path).unwrap();
    for entry in sample() {
        store.add(entry);
    }
    store.save().unwrap();

    let reloaded = CheatStore::open(&path).unwrap();
    assert_eq!(reloaded.entries(), sample().as_slice());
}

#[test]
fn edge_entries_survive_save_and_reload() {
    let cases = [
        ("hash in description", CheatEntry::new("Level #2 # warp", "01FF26C1", true)),
        ("equals in description", CheatEntry::new("hp=max", "01FF26C1", false)),
        ("empty description", CheatEntry::new("", "0A1B2CD3E", true)),
        ("punctuation code", CheatEntry::new("odd", "!-?.;:+*", false)),
        ("semicolon description", CheatEntry::new("a;b", "01FF26C1", true)),
        ("leading hash description", CheatEntry::new("#comment-like", "00A17BC49", false)),
        ("unicode description", CheatEntry::new("Unendlich Münzen", "01990CD0", true)),
        ("surrounding spaces", CheatEntry::new("  padded  ", "01FF26C1", true)),
    ];

    let dir = tempdir().unwrap();
    for (name, entry) in &cases {
        let path = dir.path().join(format!("{}.cheats", name.replace(' ', "_")));
        let mut store = CheatStore::open(&path).unwrap();
        store.add(entry.clone());
        store.save().unwrap();

        let reloaded = CheatStore::open(&path).unwrap();
        assert_eq!(reloaded.entries(), std::slice::from_ref(entry), "case: {name}");
    }

    let path = dir.path().join("all.cheats");
    let mut store = CheatStore::open(&path).unwrap();
    for (_, entry) in &cases {
        store.add(entry.clone());
    }
    store.save().unwrap();

    let expected: Vec<_> = cases.iter().map(|(_, e)| e.clone()).collect();
    assert_eq!(CheatStore::open(&path).unwrap().entries(), expected.as_slice());
}

#[test]
fn entry_with_reserved_code_is_not_written() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reserved.cheats");
    fs::write(&path, "cheat=01FF26C1#keep me\n").unwrap();

    let mut store = CheatStore::open(&path).unwrap();
    store.add(CheatEntry::new("Lives", "0A=B2CD3E", true));

    assert!(matches!(
        store.save(),
        Err(StoreError::Unencodable { index: 1, .. })
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), "cheat=01FF26C1#keep me\n");
}

#[test]
fn non_utf8_file_is_reported_as_corrupt() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("binary.cheats");
    fs::write(&path, [b'c', b'h', 0xFF, 0xFE, b'\n']).unwrap();

    assert!(matches!(
        CheatStore::open(&path),
        Err(StoreError::Parse { line: 0, .. })
    ));
}

#[test]
fn inactive_line_loads_as_inactive() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("flags.cheats");
    fs::write(&path, "#cheat=ABCDEFGH#My Cheat\ncheat=ABCDEFGH#My Cheat\n").unwrap();

    let store = CheatStore::open(&path).unwrap();

    assert_eq!(
        store.get(0).unwrap(),
        &CheatEntry::new("My Cheat", "ABCDEFGH", false)
    );
    assert_eq!(
        store.get(1).unwrap(),
        &CheatEntry::new("My Cheat", "ABCDEFGH", true)
    );
}

#[test]
fn file_contents_match_line_format() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("format.cheats");

    let mut store = CheatStore::open(&path).unwrap();
    store.add(CheatEntry::new("Walk through walls", "010138CD", true));
    let idx = store.add(CheatEntry::new("Debug menu", "00A-17B-C49", true));
    store.set_active(idx, false).unwrap();
    store.save().unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "cheat=010138CD#Walk through walls\n#cheat=00A-17B-C49#Debug menu\n"
    );
}

#[test]
fn add_returns_previous_length() {
    let dir = tempdir().unwrap();
    let mut store = CheatStore::open(dir.path().join("a.cheats")).unwrap();

    for (expected, entry) in sample().into_iter().enumerate() {
        let idx = store.add(entry.clone());
        assert_eq!(idx, expected);
        assert_eq!(store.get(idx).unwrap(), &entry);
    }
}

#[test]
fn remove_shifts_later_entries_down() {
    let dir = tempdir().unwrap();
    let mut store = CheatStore::open(dir.path().join("r.cheats")).unwrap();
    let [a, b, c]: [CheatEntry; 3] = sample().try_into().unwrap();
    store.add(a.clone());
    store.add(b.clone());
    store.add(c.clone());

    assert_eq!(store.remove(0).unwrap(), a);
    assert_eq!(store.entries(), &[b.clone(), c]);
    assert_eq!(store.get(0).unwrap(), &b);
}

#[test]
fn out_of_range_index_leaves_store_untouched() {
    let dir = tempdir().unwrap();
    let mut store = CheatStore::open(dir.path().join("b.cheats")).unwrap();
    for entry in sample() {
        store.add(entry);
    }
    let len = store.len();
    let replacement = CheatEntry::new("x", "FFFFFFFF", true);

    for n in [len, len + 1, usize::MAX] {
        assert!(matches!(
            store.get(n),
            Err(StoreError::IndexOutOfRange { index, len: l }) if index == n && l == len
        ));
        assert!(store.update(n, replacement.clone()).is_err());
        assert!(store.remove(n).is_err());
        assert!(store.set_active(n, true).is_err());
    }

    assert_eq!(store.entries(), sample().as_slice());
}

#[test]
fn update_replaces_in_place() {
    let dir = tempdir().unwrap();
    let mut store = CheatStore::open(dir.path().join("u.cheats")).unwrap();
    for entry in sample() {
        store.add(entry);
    }

    let replacement = CheatEntry::new("Replaced", "FFFFFFFF", false);
    store.update(1, replacement.clone()).unwrap();

    assert_eq!(store.len(), 3);
    assert_eq!(store.get(1).unwrap(), &replacement);
}

#[test]
fn corrupt_line_fails_whole_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corrupt.cheats");
    fs::write(&path, "cheat=01FF26C1#ok\ncheat=NODESCRIPTION\ncheat=0A1B2CD3E#also ok\n").unwrap();

    match CheatStore::open(&path) {
        Err(StoreError::Parse { line, content, .. }) => {
            assert_eq!(line, 2);
            assert_eq!(content, "cheat=NODESCRIPTION");
        }
        other => panic!("expected parse error, got {other:?}"),
    }

    // The file is not rewritten by a failed load.
    assert!(fs::read_to_string(&path).unwrap().contains("NODESCRIPTION"));
}

#[test]
fn delete_removes_file_for_rom() {
    let dir = tempdir().unwrap();
    let files = RomFiles::new(dir.path(), "roms/Link's Awakening DX.gbc").unwrap();
    files.ensure_config_dir().unwrap();

    let mut store = CheatStore::open(files.cheats_path()).unwrap();
    store.add(CheatEntry::new("Infinite health", "01FF26C1", true));
    store.save().unwrap();
    assert!(files.cheats_path().exists());

    store.delete().unwrap();
    assert!(!files.cheats_path().exists());
}
