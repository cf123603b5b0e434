//! Song and chord-diagram catalog
//!
//! The catalog is loaded once at startup from two flat JSON files and is
//! never mutated afterwards, so it can be shared freely across request
//! handlers behind an `Arc`.
//!
//! - `chords.json`: object mapping chord name → relative image path
//! - `songs.json`: object mapping lowercase song title → song record

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::info;

/// One entry in a song's chord timeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChordEvent {
    /// Playback position in seconds
    pub timestamp: f64,
    /// Chord name, e.g. "C" or "Em"
    pub chord: String,
}

/// A song record as stored in `songs.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    /// Display name (the JSON key is the lowercase lookup title)
    pub song: String,
    /// Section labels in playback order, e.g. "Intro", "Verse 1"
    pub sections: Vec<String>,
    /// Ordered chord timeline
    pub chords: Vec<ChordEvent>,
}

/// A chord timeline entry joined against the diagram map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedChord {
    pub timestamp: f64,
    pub chord: String,
    /// URL path of the diagram image, None when no diagram exists
    pub diagram: Option<String>,
}

/// Response shape for song lookups: the song record with each chord
/// annotated with its diagram path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongDetail {
    pub song: String,
    pub sections: Vec<String>,
    pub chords: Vec<AnnotatedChord>,
}

/// Read-only lookup tables over the song and diagram data
///
/// Songs are held in a `BTreeMap` so substring search has a defined
/// first-match order (lexicographic by key).
#[derive(Debug, Clone)]
pub struct Catalog {
    songs: BTreeMap<String, Song>,
    diagrams: HashMap<String, String>,
}

impl Catalog {
    /// Load the catalog from `chords.json` and `songs.json` in `data_dir`.
    ///
    /// Fails with `Error::Io` when a file is missing or unreadable,
    /// `Error::Json` on malformed JSON, and `Error::Config` when a song
    /// key violates the lowercase-key invariant.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let diagrams_path = data_dir.join("chords.json");
        let songs_path = data_dir.join("songs.json");

        let diagrams: HashMap<String, String> =
            serde_json::from_str(&std::fs::read_to_string(&diagrams_path)?)?;
        let songs: BTreeMap<String, Song> =
            serde_json::from_str(&std::fs::read_to_string(&songs_path)?)?;

        // Exact lookup lowercases the request, so keys must be lowercase
        // or the entry would be unreachable.
        for key in songs.keys() {
            if key.is_empty() {
                return Err(Error::Config("empty song key in songs.json".to_string()));
            }
            if *key != key.to_lowercase() {
                return Err(Error::Config(format!(
                    "song key must be lowercase: {:?}",
                    key
                )));
            }
        }

        info!(
            "Loaded catalog: {} songs, {} chord diagrams",
            songs.len(),
            diagrams.len()
        );

        Ok(Self { songs, diagrams })
    }

    /// Number of songs in the catalog
    pub fn song_count(&self) -> usize {
        self.songs.len()
    }

    /// Diagram URL path for a chord name, if a diagram exists
    pub fn diagram_path(&self, chord: &str) -> Option<String> {
        self.diagrams
            .get(chord)
            .map(|_| format!("/chords/{}.png", chord))
    }

    /// Case-insensitive substring search over song keys.
    ///
    /// Returns the first match in lexicographic key order. Ties between
    /// multiple matching songs resolve to the smallest key.
    pub fn search_song(&self, query: &str) -> Option<SongDetail> {
        let needle = query.to_lowercase();
        self.songs
            .iter()
            .find(|(key, _)| key.contains(&needle))
            .map(|(_, song)| self.annotate(song))
    }

    /// Exact-key lookup (request name is lowercased first)
    pub fn get_song(&self, name: &str) -> Option<SongDetail> {
        self.songs
            .get(&name.to_lowercase())
            .map(|song| self.annotate(song))
    }

    fn annotate(&self, song: &Song) -> SongDetail {
        let chords = song
            .chords
            .iter()
            .map(|event| AnnotatedChord {
                timestamp: event.timestamp,
                chord: event.chord.clone(),
                diagram: self.diagram_path(&event.chord),
            })
            .collect();

        SongDetail {
            song: song.song.clone(),
            sections: song.sections.clone(),
            chords,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_data(dir: &Path, chords: &str, songs: &str) {
        fs::write(dir.join("chords.json"), chords).unwrap();
        fs::write(dir.join("songs.json"), songs).unwrap();
    }

    fn sample_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        write_data(
            dir.path(),
            r#"{"C": "chords/C.png", "G": "chords/G.png", "Em": "chords/Em.png"}"#,
            r#"{
                "wonderwall": {
                    "song": "Wonderwall",
                    "sections": ["Intro", "Verse 1", "Chorus"],
                    "chords": [
                        {"timestamp": 0.0, "chord": "Em"},
                        {"timestamp": 2.5, "chord": "G"},
                        {"timestamp": 5.0, "chord": "Dsus4"}
                    ]
                },
                "wonderful tonight": {
                    "song": "Wonderful Tonight",
                    "sections": ["Intro", "Verse 1"],
                    "chords": [{"timestamp": 0.0, "chord": "G"}]
                }
            }"#,
        );
        dir
    }

    #[test]
    fn load_counts_entries() {
        let dir = sample_dir();
        let catalog = Catalog::load(dir.path()).unwrap();
        assert_eq!(catalog.song_count(), 2);
    }

    #[test]
    fn load_rejects_uppercase_keys() {
        let dir = TempDir::new().unwrap();
        write_data(
            dir.path(),
            "{}",
            r#"{"Wonderwall": {"song": "Wonderwall", "sections": [], "chords": []}}"#,
        );
        let err = Catalog::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = Catalog::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn load_malformed_json_is_json_error() {
        let dir = TempDir::new().unwrap();
        write_data(dir.path(), "not json", "{}");
        let err = Catalog::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn exact_lookup_is_case_insensitive() {
        let dir = sample_dir();
        let catalog = Catalog::load(dir.path()).unwrap();
        let detail = catalog.get_song("WONDERWALL").unwrap();
        assert_eq!(detail.song, "Wonderwall");
    }

    #[test]
    fn exact_lookup_unknown_song_is_none() {
        let dir = sample_dir();
        let catalog = Catalog::load(dir.path()).unwrap();
        assert!(catalog.get_song("nonexistentxyz").is_none());
    }

    #[test]
    fn search_matches_substring() {
        let dir = sample_dir();
        let catalog = Catalog::load(dir.path()).unwrap();
        let detail = catalog.search_song("wall").unwrap();
        assert_eq!(detail.song, "Wonderwall");
    }

    #[test]
    fn search_tie_break_is_lexicographic_first() {
        // Both keys contain "wonder"; "wonderful tonight" < "wonderwall"
        let dir = sample_dir();
        let catalog = Catalog::load(dir.path()).unwrap();
        let detail = catalog.search_song("wonder").unwrap();
        assert_eq!(detail.song, "Wonderful Tonight");
    }

    #[test]
    fn search_case_insensitive_results_match() {
        let dir = sample_dir();
        let catalog = Catalog::load(dir.path()).unwrap();
        let upper = catalog.search_song("WONDERWALL").unwrap();
        let lower = catalog.search_song("wonderwall").unwrap();
        assert_eq!(upper.song, lower.song);
        assert_eq!(upper.chords.len(), lower.chords.len());
    }

    #[test]
    fn annotation_marks_missing_diagrams_null() {
        let dir = sample_dir();
        let catalog = Catalog::load(dir.path()).unwrap();
        let detail = catalog.get_song("wonderwall").unwrap();

        let em = detail.chords.iter().find(|c| c.chord == "Em").unwrap();
        assert_eq!(em.diagram.as_deref(), Some("/chords/Em.png"));

        // Dsus4 has no entry in the diagram map
        let dsus4 = detail.chords.iter().find(|c| c.chord == "Dsus4").unwrap();
        assert!(dsus4.diagram.is_none());
    }

    #[test]
    fn chord_timeline_order_preserved() {
        let dir = sample_dir();
        let catalog = Catalog::load(dir.path()).unwrap();
        let detail = catalog.get_song("wonderwall").unwrap();
        let stamps: Vec<f64> = detail.chords.iter().map(|c| c.timestamp).collect();
        assert_eq!(stamps, vec![0.0, 2.5, 5.0]);
    }
}
