//! File-backed song library.
//!
//! The library is a single JSON array of songs. Saving a song replaces any
//! stored song with the same id and moves it to the end of the list.

use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use serde_json::Value;
use slocum_song::{SchemaError, Song};
use thiserror::Error;

/// Environment variable selecting the library file.
pub const LIBRARY_ENV: &str = "SLOCUM_LIBRARY";

/// File name of the default library.
pub const LIBRARY_FILE: &str = "songs.json";

/// Error type for library access.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("library {} is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("library {} must contain a JSON array of songs", path.display())]
    NotAnArray { path: PathBuf },

    #[error("song {index} in library is malformed: {source}")]
    Schema {
        index: usize,
        #[source]
        source: SchemaError,
    },

    #[error("failed to serialize library: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Default library location: the platform data directory, or the current
/// directory when there is none.
pub fn default_library_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("slocum").join(LIBRARY_FILE))
        .unwrap_or_else(|| PathBuf::from(LIBRARY_FILE))
}

/// Current time as Unix milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generates a song id: the creation time followed by a random hex suffix.
pub fn generate_song_id(now_millis: i64) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0x10000..0x20000);
    format!("{}{:x}", now_millis, suffix)
}

/// Creates a new song with default content and a fresh id.
pub fn create_song(now_millis: i64) -> Song {
    Song::new(generate_song_id(now_millis), now_millis)
}

/// Songs stored in one library file.
#[derive(Debug)]
pub struct SongLibrary {
    path: PathBuf,
    songs: Vec<Song>,
}

impl SongLibrary {
    /// Opens the library at `path`. A missing file is an empty library.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LibraryError> {
        let path = path.into();
        let songs = if path.exists() {
            load_songs(&path)?
        } else {
            tracing::debug!(path = %path.display(), "library file missing, starting empty");
            Vec::new()
        };
        Ok(Self { path, songs })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All songs in storage order.
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Looks up a song by id. The most recently saved match wins.
    pub fn get(&self, id: &str) -> Option<&Song> {
        self.songs
            .iter()
            .rev()
            .find(|song| song.id.as_deref() == Some(id))
    }

    /// Stores `song`, replacing any song with the same id, and writes the file.
    ///
    /// Songs without an id get one. `meta.modified` is set to `now_millis`.
    /// Returns the id the song was stored under.
    pub fn save(&mut self, mut song: Song, now_millis: i64) -> Result<String, LibraryError> {
        let id = song
            .id
            .get_or_insert_with(|| generate_song_id(now_millis))
            .clone();

        self.songs.retain(|s| s.id.as_deref() != Some(id.as_str()));
        song.meta.modified = now_millis;
        self.songs.push(song);

        self.persist()?;
        tracing::info!(id = %id, "saved song");
        Ok(id)
    }

    /// Removes the song with `id`. Returns whether a song was removed; the file
    /// is only rewritten when one was.
    pub fn delete(&mut self, id: &str) -> Result<bool, LibraryError> {
        let Some(index) = self
            .songs
            .iter()
            .rposition(|s| s.id.as_deref() == Some(id))
        else {
            return Ok(false);
        };

        self.songs.remove(index);
        self.persist()?;
        tracing::info!(id = %id, "deleted song");
        Ok(true)
    }

    fn persist(&self) -> Result<(), LibraryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| LibraryError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(&self.songs)?;
        fs::write(&self.path, json).map_err(|source| LibraryError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

fn load_songs(path: &Path) -> Result<Vec<Song>, LibraryError> {
    let content = fs::read_to_string(path).map_err(|source| LibraryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|source| LibraryError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = value.as_array().ok_or_else(|| LibraryError::NotAnArray {
        path: path.to_path_buf(),
    })?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            Song::from_value(entry).map_err(|source| LibraryError::Schema { index, source })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn song(id: &str, title: &str) -> Song {
        let mut song = Song::new(id, 1_000);
        song.meta.title = title.to_string();
        song
    }

    #[test]
    fn test_missing_file_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let library = SongLibrary::open(tmp.path().join("songs.json")).unwrap();
        assert!(library.songs().is_empty());
        assert!(library.get("nope").is_none());
    }

    #[test]
    fn test_save_and_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("songs.json");

        let mut library = SongLibrary::open(&path).unwrap();
        let id = library.save(song("a", "First"), 5_000).unwrap();
        assert_eq!(id, "a");

        let reopened = SongLibrary::open(&path).unwrap();
        let stored = reopened.get("a").unwrap();
        assert_eq!(stored.meta.title, "First");
        assert_eq!(stored.meta.created, 1_000);
        assert_eq!(stored.meta.modified, 5_000);
    }

    #[test]
    fn test_save_replaces_same_id() {
        let tmp = tempfile::tempdir().unwrap();
        let mut library = SongLibrary::open(tmp.path().join("songs.json")).unwrap();

        library.save(song("a", "First"), 2_000).unwrap();
        library.save(song("b", "Second"), 3_000).unwrap();
        library.save(song("a", "Renamed"), 4_000).unwrap();

        let ids: Vec<_> = library
            .songs()
            .iter()
            .map(|s| s.id.clone().unwrap())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(library.get("a").unwrap().meta.title, "Renamed");
    }

    #[test]
    fn test_save_assigns_missing_id() {
        let tmp = tempfile::tempdir().unwrap();
        let mut library = SongLibrary::open(tmp.path().join("songs.json")).unwrap();

        let mut anonymous = song("x", "Anon");
        anonymous.id = None;
        let id = library.save(anonymous, 1_460_000_000_000).unwrap();

        assert!(id.starts_with("1460000000000"));
        assert!(library.get(&id).is_some());
    }

    #[test]
    fn test_delete() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("songs.json");
        let mut library = SongLibrary::open(&path).unwrap();
        library.save(song("a", "First"), 2_000).unwrap();

        assert!(!library.delete("missing").unwrap());
        assert!(library.delete("a").unwrap());
        assert!(SongLibrary::open(&path).unwrap().songs().is_empty());
    }

    #[test]
    fn test_malformed_library_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("songs.json");

        fs::write(&path, "{}").unwrap();
        assert!(matches!(
            SongLibrary::open(&path),
            Err(LibraryError::NotAnArray { .. })
        ));

        fs::write(&path, r#"[{"meta": {}}]"#).unwrap();
        assert!(matches!(
            SongLibrary::open(&path),
            Err(LibraryError::Schema { index: 0, .. })
        ));
    }

    #[test]
    fn test_generated_id_shape() {
        let id = generate_song_id(1_460_000_000_000);
        let suffix = &id["1460000000000".len()..];
        assert_eq!(suffix.len(), 5);
        assert!(suffix.starts_with('1'));
        assert!(u32::from_str_radix(suffix, 16).is_ok());
    }
}
