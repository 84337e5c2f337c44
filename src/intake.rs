use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::FileMetadata;

/// Hard cap on accepted files: 50 MiB.
pub const MAX_FILE_BYTES: u64 = 50 * 1024 * 1024;

/// Why a selected file was rejected. Both rejection variants block the
/// analysis until the user picks a valid file; nothing is retried.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// The media type guessed from the file name is not in the audio category.
    #[error("{name}: not an audio file (detected type {mime})")]
    InvalidType { name: String, mime: String },

    /// Larger than [`MAX_FILE_BYTES`].
    #[error("{name}: {byte_size} bytes exceeds the 50 MiB limit")]
    TooLarge { name: String, byte_size: u64 },

    #[error("failed to read {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Check whether the path's guessed media type falls in the audio category.
/// Extensions mapping to several candidate types count if any is audio.
pub fn is_audio(path: &Path) -> bool {
    mime_guess::from_path(path)
        .iter()
        .any(|mime| mime.type_() == mime_guess::mime::AUDIO)
}

/// Validate a file for analysis and return its metadata.
///
/// The media type is checked before the size, so an oversized non-audio
/// file reports [`IntakeError::InvalidType`]. The file's contents are
/// never opened; only directory metadata is consulted.
pub fn submit(path: &Path) -> Result<FileMetadata, IntakeError> {
    let name = file_name(path);

    if !is_audio(path) {
        let mime = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("unknown")
            .to_string();
        return Err(IntakeError::InvalidType { name, mime });
    }

    let byte_size = std::fs::metadata(path)
        .map_err(|source| IntakeError::Io {
            name: name.clone(),
            source,
        })?
        .len();

    if byte_size > MAX_FILE_BYTES {
        return Err(IntakeError::TooLarge { name, byte_size });
    }

    Ok(FileMetadata { name, byte_size })
}

/// Scan a directory for audio files, sorted by filename.
pub fn scan_audio_files(path: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(path)
        .into_iter()
        .flatten()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_audio(p))
        .collect();
    files.sort();
    files
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|f| f.to_str())
        .unwrap_or("unknown")
        .to_string()
}
