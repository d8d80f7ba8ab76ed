//! Line-oriented text resources backing the file-based repositories

use std::cell::RefCell;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Cursor, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Line separator used for reading and writing rows
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// How a resource is opened for writing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Keep existing content and write after it
    Append,
    /// Discard existing content
    Overwrite,
}

/// A text store that can be opened for reading or writing
///
/// Every handle is scoped to a single operation and released when dropped.
pub trait TextResource {
    fn reader(&self) -> io::Result<Box<dyn BufRead + '_>>;

    fn writer(&self, mode: WriteMode) -> io::Result<Box<dyn Write + '_>>;

    /// Human readable location, used in error messages
    fn describe(&self) -> String {
        "text resource".to_string()
    }
}

/// Resource stored in a file on disk
#[derive(Debug, Clone)]
pub struct FileResource {
    path: PathBuf,
}

impl FileResource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TextResource for FileResource {
    /// A missing file reads as empty
    fn reader(&self) -> io::Result<Box<dyn BufRead + '_>> {
        match File::open(&self.path) {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Box::new(io::empty())),
            Err(e) => Err(e),
        }
    }

    fn writer(&self, mode: WriteMode) -> io::Result<Box<dyn Write + '_>> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut options = OpenOptions::new();
        options.create(true);
        match mode {
            WriteMode::Append => options.append(true),
            WriteMode::Overwrite => options.write(true).truncate(true),
        };
        Ok(Box::new(BufWriter::new(options.open(&self.path)?)))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    buffer: Vec<u8>,
    reads: usize,
    writes: usize,
    appends: usize,
}

/// Resource held in a shared in-memory buffer
///
/// Clones share the same buffer, so a test can keep one handle while a
/// repository owns another. Opens are counted per kind.
#[derive(Debug, Clone, Default)]
pub struct MemoryResource {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryResource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        let resource = Self::new();
        resource.state.borrow_mut().buffer = contents.into().into_bytes();
        resource
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.state.borrow().buffer).into_owned()
    }

    /// Number of times the resource was opened for reading
    pub fn reads(&self) -> usize {
        self.state.borrow().reads
    }

    /// Number of times the resource was opened to overwrite
    pub fn writes(&self) -> usize {
        self.state.borrow().writes
    }

    /// Number of times the resource was opened to append
    pub fn appends(&self) -> usize {
        self.state.borrow().appends
    }
}

impl TextResource for MemoryResource {
    fn reader(&self) -> io::Result<Box<dyn BufRead + '_>> {
        let mut state = self.state.borrow_mut();
        state.reads += 1;
        Ok(Box::new(Cursor::new(state.buffer.clone())))
    }

    fn writer(&self, mode: WriteMode) -> io::Result<Box<dyn Write + '_>> {
        let mut state = self.state.borrow_mut();
        match mode {
            WriteMode::Append => state.appends += 1,
            WriteMode::Overwrite => {
                state.writes += 1;
                state.buffer.clear();
            }
        }
        Ok(Box::new(SharedWriter {
            state: Rc::clone(&self.state),
        }))
    }

    fn describe(&self) -> String {
        "in-memory resource".to_string()
    }
}

struct SharedWriter {
    state: Rc<RefCell<MemoryState>>,
}

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.state.borrow_mut().buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Read every line of the resource, separators stripped
pub(crate) fn read_lines(resource: &impl TextResource) -> io::Result<Vec<String>> {
    let reader = resource.reader()?;
    reader
        .lines()
        .map(|line| line.map(|l| l.trim_end_matches('\r').to_string()))
        .collect()
}

/// Append rows, each one preceded by the line separator
pub(crate) fn append_rows<I>(resource: &impl TextResource, rows: I) -> io::Result<()>
where
    I: IntoIterator<Item = String>,
{
    let mut writer = resource.writer(WriteMode::Append)?;
    for row in rows {
        write!(writer, "{LINE_ENDING}{row}")?;
    }
    writer.flush()
}

/// Replace the whole resource with the given lines
pub(crate) fn overwrite_lines<I>(resource: &impl TextResource, lines: I) -> io::Result<()>
where
    I: IntoIterator<Item = String>,
{
    let mut writer = resource.writer(WriteMode::Overwrite)?;
    for (i, line) in lines.into_iter().enumerate() {
        if i > 0 {
            writer.write_all(LINE_ENDING.as_bytes())?;
        }
        writer.write_all(line.as_bytes())?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_overwrite_replaces_contents() {
        let resource = MemoryResource::with_contents("old");
        overwrite_lines(&resource, vec!["a".to_string(), "b".to_string()]).unwrap();

        assert_eq!(resource.contents(), format!("a{LINE_ENDING}b"));
        assert_eq!(resource.writes(), 1);
        assert_eq!(resource.appends(), 0);
    }

    #[test]
    fn test_memory_append_prefixes_separator() {
        let resource = MemoryResource::with_contents("head");
        append_rows(&resource, vec!["x".to_string()]).unwrap();

        assert_eq!(resource.contents(), format!("head{LINE_ENDING}x"));
        assert_eq!(resource.appends(), 1);
    }

    #[test]
    fn test_clones_share_buffer() {
        let resource = MemoryResource::new();
        let handle = resource.clone();
        overwrite_lines(&resource, vec!["shared".to_string()]).unwrap();
        assert_eq!(handle.contents(), "shared");
    }

    #[test]
    fn test_read_lines_counts_reads() {
        let resource = MemoryResource::with_contents(format!("a{LINE_ENDING}b"));
        assert_eq!(read_lines(&resource).unwrap(), vec!["a", "b"]);
        assert_eq!(resource.reads(), 1);
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let resource = FileResource::new(dir.path().join("missing.csv"));
        assert!(read_lines(&resource).unwrap().is_empty());
    }

    #[test]
    fn test_file_append_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let resource = FileResource::new(dir.path().join("nested").join("data.csv"));

        overwrite_lines(&resource, vec!["header".to_string()]).unwrap();
        append_rows(&resource, vec!["row1".to_string(), "row2".to_string()]).unwrap();

        assert_eq!(read_lines(&resource).unwrap(), vec!["header", "row1", "row2"]);

        overwrite_lines(&resource, vec!["fresh".to_string()]).unwrap();
        assert_eq!(read_lines(&resource).unwrap(), vec!["fresh"]);
    }
}
