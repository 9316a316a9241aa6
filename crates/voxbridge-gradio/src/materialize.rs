//! Copying finished audio to the caller's destination.

use std::path::Path;

use tracing::{debug, warn};
use voxbridge_core::SynthesizedAudio;

/// Copy `source` to `destination`, creating missing parent directories.
///
/// Without a destination the source reference is returned as-is. A failed
/// copy is logged and also falls back to the source reference, so the audio
/// the remote engine produced is never lost. A destination that resolves to
/// the source file is left untouched.
pub async fn materialize(source: &str, destination: Option<&Path>) -> SynthesizedAudio {
    let Some(destination) = destination else {
        return SynthesizedAudio::at_source(source);
    };

    match copy_into(Path::new(source), destination).await {
        Ok(Placement::AlreadyInPlace) => {
            debug!(
                target: "voxbridge.gradio",
                source,
                destination = %destination.display(),
                "Destination is the source file, nothing to copy"
            );
            SynthesizedAudio::at_source(source)
        }
        Ok(Placement::Copied(bytes)) => {
            debug!(
                target: "voxbridge.gradio",
                source,
                destination = %destination.display(),
                bytes,
                "Audio copied"
            );
            SynthesizedAudio::materialized(destination)
        }
        Err(e) => {
            warn!(
                target: "voxbridge.gradio",
                source,
                destination = %destination.display(),
                error = %e,
                "Could not copy audio, returning the remote path"
            );
            SynthesizedAudio::at_source(source)
        }
    }
}

enum Placement {
    Copied(u64),
    AlreadyInPlace,
}

async fn copy_into(source: &Path, destination: &Path) -> std::io::Result<Placement> {
    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    // Copying a file onto itself truncates it before reading
    if same_file(source, destination).await? {
        return Ok(Placement::AlreadyInPlace);
    }
    tokio::fs::copy(source, destination).await.map(Placement::Copied)
}

/// Whether both paths resolve to one file. A destination that does not exist
/// yet cannot be the source.
async fn same_file(source: &Path, destination: &Path) -> std::io::Result<bool> {
    let source = tokio::fs::canonicalize(source).await?;
    match tokio::fs::canonicalize(destination).await {
        Ok(destination) => Ok(source == destination),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
