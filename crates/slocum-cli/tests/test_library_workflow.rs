//! End-to-end tests: library song to rendered assembly document.

use pretty_assertions::assert_eq;
use slocum_backend_asm::Assembler;
use slocum_cli::input::{load_note_table, load_song, SongSource};
use slocum_cli::library::{create_song, SongLibrary};
use slocum_cli::render::HandlebarsRenderer;
use slocum_cli::time::ChronoFormatter;
use slocum_song::{Pattern, Step};
use std::fs;

const NOTES: &str = r#"{
    "percussion": { "8": 17 },
    "tunings": [[ { "sound": 1, "note": "C", "octave": 2, "code": 31 } ]]
}"#;

#[test]
fn test_saved_song_compiles_to_document() {
    let tmp = tempfile::tempdir().unwrap();
    let library_path = tmp.path().join("songs.json");
    let notes_path = tmp.path().join("notes.json");
    fs::write(&notes_path, NOTES).unwrap();

    let mut song = create_song(1_460_000_000_000);
    song.meta.title = "Loop".to_string();
    song.patterns[0].channels[0].steps[0] = Step::new(1, "C", 2);
    song.patterns.push(song.patterns[0].clone());

    let mut library = SongLibrary::open(&library_path).unwrap();
    let id = library.save(song, 1_460_000_000_500).unwrap();

    let stored = load_song(SongSource::Library {
        library: &library_path,
        id: &id,
    })
    .unwrap();
    assert_eq!(stored.meta.modified, 1_460_000_000_500);

    let notes = load_note_table(&notes_path).unwrap();
    let renderer = HandlebarsRenderer::new().unwrap();
    let formatter = ChronoFormatter::default();
    let text = Assembler::new(&notes, &formatter, &renderer)
        .assemble(&stored)
        .unwrap();

    // the repeated pattern reuses both blocks
    assert_eq!(text.matches("Pattern1\n    byte 31, 255").count(), 1);
    assert!(!text.contains("Pattern3"));
    assert!(text.contains(
        "patternArrayH\n\
         \x20   word Pattern1, Pattern2, Pattern2, Pattern2 ; 0\n\
         \x20   word Pattern2, Pattern2, Pattern2, Pattern2 ; 1\n\
         \x20   word Pattern1, Pattern2, Pattern2, Pattern2 ; 2\n\
         \x20   word Pattern2, Pattern2, Pattern2, Pattern2 ; 3\n"
    ));
    assert!(text.contains("song1\n    byte 1\n    byte 3\n"));
    assert!(text.contains("song2\n    byte 2\n    byte 4\n"));
}

#[test]
fn test_compiling_does_not_touch_library() {
    let tmp = tempfile::tempdir().unwrap();
    let library_path = tmp.path().join("songs.json");

    let mut library = SongLibrary::open(&library_path).unwrap();
    let id = library.save(create_song(1_000), 2_000).unwrap();
    let before = fs::read_to_string(&library_path).unwrap();

    let song = library.get(&id).unwrap().clone();
    let notes = slocum_backend_asm::NoteTable::default();
    let renderer = HandlebarsRenderer::new().unwrap();
    let formatter = ChronoFormatter::default();
    Assembler::new(&notes, &formatter, &renderer)
        .assemble(&song)
        .unwrap();

    assert_eq!(fs::read_to_string(&library_path).unwrap(), before);
}

#[test]
fn test_legacy_library_file_loads() {
    let tmp = tempfile::tempdir().unwrap();
    let library_path = tmp.path().join("songs.json");

    let mut legacy = serde_json::json!([{
        "id": "legacy",
        "meta": { "title": "Old", "author": "", "created": 1, "modified": 2, "tempo": 4 },
        "patterns": [{ "steps": 16, "channel2attenuation": true, "channels": [[], []] }],
        "hats": { "start": 255, "volume": 5, "pitch": 0, "sound": 8, "pattern": [] }
    }]);
    let rests = vec![serde_json::Value::Null; 16];
    legacy[0]["patterns"][0]["channels"] = serde_json::json!([rests.clone(), rests]);
    legacy[0]["hats"]["pattern"] = serde_json::to_value(vec![0u8; 32]).unwrap();
    fs::write(&library_path, legacy.to_string()).unwrap();

    let library = SongLibrary::open(&library_path).unwrap();
    let song = library.get("legacy").unwrap();
    assert!(song.patterns[0].channels[1].attenuate);
    assert_eq!(song.patterns[0], {
        let mut expected = Pattern::empty(16);
        expected.channels[1].attenuate = true;
        expected
    });
}
