//! # Foxkit Buffer
//!
//! Editor text state on top of persistent ropes: edits, snapshot-based
//! undo/redo, change tracking and file I/O.

pub mod edit;
pub mod file;
pub mod history;
pub mod settings;
pub mod snapshot;

use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Context;
use parking_lot::RwLock;

use rope::{Point, Rope};
pub use edit::Edit;
pub use history::History;
pub use settings::BufferSettings;
pub use snapshot::Snapshot;

/// Buffer ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub u64);

impl BufferId {
    pub fn new() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for BufferId {
    fn default() -> Self {
        Self::new()
    }
}

/// Text buffer
pub struct Buffer {
    /// Unique ID
    pub id: BufferId,
    /// File path (if any)
    pub path: Option<PathBuf>,
    /// Text content
    text: Rope,
    /// Edit history
    history: History,
    /// Version (increments on each edit)
    version: u64,
    /// Saved version
    saved_version: u64,
    settings: BufferSettings,
}

impl Buffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self::with_settings(BufferSettings::default())
    }

    pub fn with_settings(settings: BufferSettings) -> Self {
        Self {
            id: BufferId::new(),
            path: None,
            text: Rope::with_config("", rope::LineMetricsCalculator, settings.rope),
            history: History::with_max_size(settings.history_limit),
            version: 0,
            saved_version: 0,
            settings,
        }
    }

    /// Create a buffer from text
    pub fn from_text(text: &str) -> Self {
        Self::from_text_with(text, BufferSettings::default())
    }

    pub fn from_text_with(text: &str, settings: BufferSettings) -> Self {
        let mut buffer = Self::with_settings(settings);
        buffer.text = Rope::with_config(text, rope::LineMetricsCalculator, settings.rope);
        buffer
    }

    /// Open a file into a new buffer
    pub fn open(path: impl AsRef<Path>, settings: BufferSettings) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let mut buffer = Self::with_settings(settings);
        buffer.text = file::load(path, settings.rope)?;
        buffer.path = Some(path.to_path_buf());
        Ok(buffer)
    }

    /// Save to the buffer's own path
    pub fn save(&mut self) -> anyhow::Result<()> {
        let path = self.path.clone().context("Buffer has no file path")?;
        file::save(&path, &self.text)?;
        self.mark_saved();
        Ok(())
    }

    /// Save to `path` and adopt it as the buffer's path
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        file::save(path, &self.text)?;
        self.path = Some(path.to_path_buf());
        self.mark_saved();
        Ok(())
    }

    /// Current rope. Cloning it is O(1).
    pub fn rope(&self) -> &Rope {
        &self.text
    }

    /// Flattened text
    pub fn text(&self) -> String {
        self.text.to_string()
    }

    pub fn settings(&self) -> &BufferSettings {
        &self.settings
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.text.line_count()
    }

    /// Line `line` with its trailing line break, if any
    pub fn line(&self, line: usize) -> rope::Result<String> {
        Ok(self.text.line(line)?.to_string())
    }

    pub fn lines(&self, from: usize, to: usize) -> rope::Result<String> {
        self.text.lines(from, to)
    }

    pub fn slice(&self, range: Range<usize>) -> rope::Result<String> {
        Ok(self.text.slice(range)?.to_string())
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Is the buffer modified since last save?
    pub fn is_modified(&self) -> bool {
        self.version != self.saved_version
    }

    pub fn mark_saved(&mut self) {
        self.saved_version = self.version;
    }

    /// Apply an edit and return the range its result now covers. On error
    /// the buffer is unchanged.
    pub fn apply_edit(&mut self, edit: &Edit) -> rope::Result<Range<usize>> {
        let edited = edit.apply(&self.text)?;
        let previous = std::mem::replace(&mut self.text, edited);
        self.history.push(previous);
        self.version += 1;
        Ok(edit.range())
    }

    pub fn insert(&mut self, offset: usize, text: &str) -> rope::Result<Range<usize>> {
        self.apply_edit(&Edit::insert(offset, text))
    }

    pub fn delete(&mut self, range: Range<usize>) -> rope::Result<Range<usize>> {
        self.apply_edit(&Edit::delete(range))
    }

    pub fn replace(&mut self, range: Range<usize>, text: &str) -> rope::Result<Range<usize>> {
        self.apply_edit(&Edit::replace(range, text))
    }

    /// Undo last edit. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.text.clone()) {
            Some(previous) => {
                self.text = previous;
                self.version += 1;
                tracing::debug!(buffer = self.id.0, version = self.version, "undo");
                true
            }
            None => false,
        }
    }

    /// Redo last undone edit
    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.text.clone()) {
            Some(next) => {
                self.text = next;
                self.version += 1;
                tracing::debug!(buffer = self.id.0, version = self.version, "redo");
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn offset_to_point(&self, offset: usize) -> rope::Result<Point> {
        self.text.offset_to_point(offset)
    }

    pub fn point_to_offset(&self, point: Point) -> rope::Result<usize> {
        self.text.point_to_offset(point)
    }

    /// Pull a point back inside the text: line to the last line, column to
    /// that line's length.
    pub fn clamp_point(&self, point: Point) -> Point {
        let line = point.line.min(self.text.line_count() - 1);
        let line_length = self.text.line_length(line).unwrap_or(0);
        Point::new(line, point.column.min(line_length))
    }

    /// Get a snapshot
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            id: self.id,
            version: self.version,
            rope: self.text.clone(),
        }
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe buffer handle
pub type SharedBuffer = Arc<RwLock<Buffer>>;

/// Create a shared buffer
pub fn shared_buffer(buffer: Buffer) -> SharedBuffer {
    Arc::new(RwLock::new(buffer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edits_bump_version() {
        let mut buffer = Buffer::from_text("hello");
        assert!(!buffer.is_modified());

        buffer.insert(5, " world").unwrap();
        buffer.replace(0..5, "howdy").unwrap();
        buffer.delete(5..11).unwrap();
        assert_eq!(buffer.text(), "howdy");
        assert_eq!(buffer.version(), 3);
        assert!(buffer.is_modified());

        buffer.mark_saved();
        assert!(!buffer.is_modified());
    }

    #[test]
    fn test_edit_returns_result_range() {
        let mut buffer = Buffer::from_text("abc");
        assert_eq!(buffer.insert(1, "é€").unwrap(), 1..3);
        assert_eq!(buffer.replace(0..3, "xy").unwrap(), 0..2);
        assert_eq!(buffer.delete(1..3).unwrap(), 1..1);
        assert_eq!(buffer.text(), "xc");
    }

    #[test]
    fn test_failed_edit_leaves_buffer_unchanged() {
        let mut buffer = Buffer::from_text("abc");
        assert!(buffer.insert(9, "x").is_err());
        #[allow(clippy::reversed_empty_ranges)]
        let reversed = 2..1;
        assert!(buffer.delete(reversed).is_err());
        assert_eq!(buffer.text(), "abc");
        assert_eq!(buffer.version(), 0);
        assert!(!buffer.can_undo());
    }

    #[test]
    fn test_undo_redo() {
        let mut buffer = Buffer::from_text("one");
        buffer.insert(3, " two").unwrap();
        buffer.insert(7, " three").unwrap();

        assert!(buffer.undo());
        assert_eq!(buffer.text(), "one two");
        assert!(buffer.undo());
        assert_eq!(buffer.text(), "one");
        assert!(!buffer.undo());

        assert!(buffer.redo());
        assert_eq!(buffer.text(), "one two");

        buffer.insert(0, ">").unwrap();
        assert!(!buffer.can_redo());
        assert_eq!(buffer.text(), ">one two");
    }

    #[test]
    fn test_history_limit_from_settings() {
        let settings = BufferSettings {
            history_limit: 2,
            ..Default::default()
        };
        let mut buffer = Buffer::with_settings(settings);
        for c in ["a", "b", "c", "d"] {
            let end = buffer.len();
            buffer.insert(end, c).unwrap();
        }
        assert!(buffer.undo());
        assert!(buffer.undo());
        assert!(!buffer.undo());
        assert_eq!(buffer.text(), "ab");
    }

    #[test]
    fn test_split_length_from_settings() {
        let settings = BufferSettings::from_toml("[rope]\nsplit_length = 4").unwrap();
        let buffer = Buffer::from_text_with("abcdefghijkl", settings);
        assert_eq!(buffer.rope().config().split_length(), 4);
        assert!(buffer.rope().chunks().all(|chunk| chunk.chars().count() <= 4));
    }

    #[test]
    fn test_snapshot_survives_edits() {
        let mut buffer = Buffer::from_text("line one\nline two");
        let snapshot = buffer.snapshot();
        buffer.delete(0..9).unwrap();

        assert_eq!(snapshot.text(), "line one\nline two");
        assert_eq!(snapshot.line_count(), 2);
        assert_eq!(snapshot.version, 0);
        assert_eq!(buffer.text(), "line two");
        assert_eq!(buffer.snapshot().version, 1);
    }

    #[test]
    fn test_points() {
        let buffer = Buffer::from_text("abc\nde\n");
        assert_eq!(buffer.offset_to_point(5).unwrap(), Point::new(1, 1));
        assert_eq!(buffer.point_to_offset(Point::new(2, 0)).unwrap(), 7);
        assert!(buffer.point_to_offset(Point::new(1, 3)).is_err());
    }

    #[test]
    fn test_clamp_point() {
        let buffer = Buffer::from_text("abc\nde");
        assert_eq!(buffer.clamp_point(Point::new(0, 10)), Point::new(0, 3));
        assert_eq!(buffer.clamp_point(Point::new(7, 7)), Point::new(1, 2));
        assert_eq!(buffer.clamp_point(Point::new(1, 1)), Point::new(1, 1));
        assert_eq!(Buffer::new().clamp_point(Point::new(3, 3)), Point::zero());
    }

    #[test]
    fn test_open_edit_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.rs");
        std::fs::write(&path, "fn main() {}\n").unwrap();

        let mut buffer = Buffer::open(&path, BufferSettings::default()).unwrap();
        assert_eq!(buffer.line_count(), 2);
        buffer.insert(11, "println!(); ").unwrap();
        assert!(buffer.is_modified());

        buffer.save().unwrap();
        assert!(!buffer.is_modified());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fn main() {println!(); }\n");
    }

    #[test]
    fn test_save_without_path() {
        let mut buffer = Buffer::from_text("scratch");
        assert!(buffer.save().is_err());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scratch.txt");
        buffer.save_as(&path).unwrap();
        assert_eq!(buffer.path.as_deref(), Some(path.as_path()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "scratch");
    }

    #[test]
    fn test_shared_buffer_readers() {
        let shared = shared_buffer(Buffer::from_text("shared"));
        let snapshot = shared.read().snapshot();
        std::thread::scope(|scope| {
            scope.spawn(|| {
                shared.write().insert(0, "not ").unwrap();
            });
            scope.spawn(|| {
                assert_eq!(snapshot.text(), "shared");
            });
        });
        assert_eq!(shared.read().text(), "not shared");
    }
}
