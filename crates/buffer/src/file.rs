//! Loading and saving buffer text

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use rope::{LineMetricsCalculator, Rope, RopeConfig};

/// Read a file into a rope, pre-chunked at the configured split length
pub fn load(path: &Path, config: RopeConfig) -> Result<Rope> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let chunks = rope::chunk_text(&content, config.split_length());
    let rope = Rope::from_chunks(chunks, LineMetricsCalculator, config);

    tracing::debug!(path = %path.display(), len = rope.len(), lines = rope.line_count(), "loaded file");
    Ok(rope)
}

/// Write a rope to disk leaf by leaf, without flattening it first
pub fn save(path: &Path, rope: &Rope) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for chunk in rope.chunks() {
        writer.write_all(chunk.as_bytes())?;
    }
    writer.flush()?;

    tracing::debug!(path = %path.display(), len = rope.len(), "saved file");
    Ok(())
}
