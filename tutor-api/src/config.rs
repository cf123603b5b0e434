//! Configuration for tutor-api
//!
//! All settings come from command-line arguments with environment-variable
//! fallbacks; the built-in defaults allow zero-config startup from a
//! checkout containing `data/` and `chords/` directories.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for tutor-api
#[derive(Parser, Debug)]
#[command(name = "tutor-api")]
#[command(about = "AI Guitar Tutor backend service")]
#[command(version)]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5000", env = "TUTOR_API_PORT")]
    pub port: u16,

    /// Folder containing chords.json and songs.json
    #[arg(short, long, default_value = "data", env = "TUTOR_DATA_FOLDER")]
    pub data_folder: PathBuf,

    /// Folder uploaded audio files are stored in (created if absent)
    #[arg(short, long, default_value = "uploads", env = "TUTOR_UPLOADS_FOLDER")]
    pub uploads_folder: PathBuf,

    /// Folder containing chord-diagram images
    #[arg(short = 'c', long, default_value = "chords", env = "TUTOR_CHORDS_FOLDER")]
    pub chords_folder: PathBuf,
}
