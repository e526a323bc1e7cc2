//! Multi-file output sink
//!
//! Tera renders a template into a single `Write` stream. [`MultiFileSink`]
//! splits that stream into named files: a template calls `SetFileName` and
//! every byte rendered afterwards lands in that file until the next switch.
//! Output produced before the first switch is dropped, which lets templates
//! start with whitespace or comments without failing.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::generation::GenerationError;

/// Permission bits for directories created below the output root
const NESTED_DIR_MODE: u32 = 0o770;

struct OpenFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

/// Routes rendered bytes to whichever output file was selected last
pub struct MultiFileSink {
    output_dir: PathBuf,
    current: Option<OpenFile>,
    files_written: Vec<PathBuf>,
}

impl MultiFileSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            current: None,
            files_written: Vec::new(),
        }
    }

    /// Switch output to `name`, resolved against the output directory.
    ///
    /// Missing parent directories are created and an existing file is
    /// truncated. The previously selected file is closed first; a failure to
    /// flush it aborts the switch.
    pub fn set_current_file(&mut self, name: &str) -> Result<PathBuf, GenerationError> {
        let relative = validate_relative_path(name)?;
        let path = self.output_dir.join(relative);

        if let Some(parent) = path.parent() {
            create_dir_all_with_mode(parent, NESTED_DIR_MODE).map_err(|e| {
                GenerationError::CreateDir {
                    path: parent.to_path_buf(),
                    source: e,
                }
            })?;
        }

        self.close_current()?;

        let file = File::create(&path).map_err(|e| GenerationError::CreateFile {
            path: path.clone(),
            source: e,
        })?;

        debug!(path = %path.display(), "Switched output file");
        self.files_written.push(path.clone());
        self.current = Some(OpenFile {
            path: path.clone(),
            writer: BufWriter::new(file),
        });
        Ok(path)
    }

    /// Close the open file, if any. Failures are logged, not returned, since
    /// this runs after the render outcome is already known.
    pub fn close(&mut self) {
        if let Err(e) = self.close_current() {
            warn!(error = %e, "Failure closing output file");
        }
    }

    /// The file currently receiving output
    pub fn current_file(&self) -> Option<&Path> {
        self.current.as_ref().map(|open| open.path.as_path())
    }

    /// Every file opened by this sink, in the order they were selected
    pub fn files_written(&self) -> &[PathBuf] {
        &self.files_written
    }

    fn close_current(&mut self) -> Result<(), GenerationError> {
        let Some(OpenFile { path, writer }) = self.current.take() else {
            return Ok(());
        };
        // Dropping the handle closes it; the flush is where write-back errors show up.
        let file = writer
            .into_inner()
            .map_err(|e| GenerationError::CloseFile {
                path: path.clone(),
                source: e.into_error(),
            })?;
        drop(file);
        Ok(())
    }
}

impl Write for MultiFileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.current.as_mut() {
            Some(open) => open.writer.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.current.as_mut() {
            Some(open) => open.writer.flush(),
            None => Ok(()),
        }
    }
}

/// Cloneable handle to a [`MultiFileSink`] shared between the Tera output
/// stream and the helpers that switch files.
#[derive(Clone)]
pub struct SharedSink {
    inner: Arc<Mutex<MultiFileSink>>,
}

impl SharedSink {
    pub fn new(sink: MultiFileSink) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sink)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MultiFileSink> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_current_file(&self, name: &str) -> Result<PathBuf, GenerationError> {
        self.lock().set_current_file(name)
    }

    pub fn close(&self) {
        self.lock().close();
    }

    pub fn current_file(&self) -> Option<PathBuf> {
        self.lock().current_file().map(Path::to_path_buf)
    }

    pub fn files_written(&self) -> Vec<PathBuf> {
        self.lock().files_written().to_vec()
    }
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().flush()
    }
}

/// Reject names that would land outside the output directory
fn validate_relative_path(name: &str) -> Result<&Path, GenerationError> {
    if name.trim().is_empty() {
        return Err(GenerationError::invalid_output_path(name, "file name is empty"));
    }
    let path = Path::new(name);
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(GenerationError::invalid_output_path(
                    name,
                    "parent directory components are not allowed",
                ));
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(GenerationError::invalid_output_path(
                    name,
                    "path must be relative to the output directory",
                ));
            }
        }
    }
    Ok(path)
}

/// `fs::create_dir_all` that applies `mode` to every directory it creates (unix only)
pub(crate) fn create_dir_all_with_mode(path: &Path, mode: u32) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    builder.create(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_switching_files_splits_output() {
        let temp_dir = TempDir::new().unwrap();
        let mut sink = MultiFileSink::new(temp_dir.path());

        sink.set_current_file("a/b.out").unwrap();
        sink.write_all(b"X").unwrap();
        sink.set_current_file("a/c.out").unwrap();
        sink.write_all(b"Y").unwrap();
        sink.close();

        assert_eq!(fs::read_to_string(temp_dir.path().join("a/b.out")).unwrap(), "X");
        assert_eq!(fs::read_to_string(temp_dir.path().join("a/c.out")).unwrap(), "Y");
        assert_eq!(
            sink.files_written(),
            &[temp_dir.path().join("a/b.out"), temp_dir.path().join("a/c.out")]
        );
        assert!(sink.current_file().is_none());
    }

    #[test]
    fn test_reselecting_a_file_truncates_it() {
        let temp_dir = TempDir::new().unwrap();

        for content in ["first run, longer", "second"] {
            let mut sink = MultiFileSink::new(temp_dir.path());
            sink.set_current_file("out.txt").unwrap();
            sink.write_all(content.as_bytes()).unwrap();
            sink.close();
        }

        assert_eq!(
            fs::read_to_string(temp_dir.path().join("out.txt")).unwrap(),
            "second"
        );
    }

    #[test]
    fn test_writes_before_selection_are_discarded() {
        let temp_dir = TempDir::new().unwrap();
        let mut sink = MultiFileSink::new(temp_dir.path());

        let written = sink.write(b"\n  preamble\n").unwrap();
        assert_eq!(written, 12);
        sink.flush().unwrap();
        sink.close();

        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
        assert!(sink.files_written().is_empty());
    }

    #[test]
    fn test_rejects_paths_outside_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let mut sink = MultiFileSink::new(temp_dir.path());

        for name in ["", "   ", "../escape.txt", "a/../../escape.txt", "/etc/passwd"] {
            let err = sink.set_current_file(name).unwrap_err();
            assert!(
                matches!(err, GenerationError::InvalidOutputPath { .. }),
                "expected InvalidOutputPath for {name:?}, got {err:?}"
            );
        }
        assert!(sink.files_written().is_empty());
    }

    #[test]
    fn test_create_dir_failure_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("blocker"), "not a directory").unwrap();
        let mut sink = MultiFileSink::new(temp_dir.path());

        let err = sink.set_current_file("blocker/file.txt").unwrap_err();
        assert!(matches!(err, GenerationError::CreateDir { .. }));
    }

    #[test]
    fn test_create_file_failure_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("d")).unwrap();
        let mut sink = MultiFileSink::new(temp_dir.path());

        let first = sink.set_current_file("a.txt").unwrap();
        sink.write_all(b"a").unwrap();

        let err = sink.set_current_file("d").unwrap_err();
        match err {
            GenerationError::CreateFile { path, .. } => {
                assert_eq!(path, temp_dir.path().join("d"))
            }
            other => panic!("Expected CreateFile error, got {other:?}"),
        }
        // The previous file was closed before the failed create
        assert!(sink.current_file().is_none());
        assert_eq!(fs::read_to_string(&first).unwrap(), "a");
        assert_eq!(sink.files_written(), &[first][..]);
    }

    #[test]
    fn test_shared_sink_routes_writes() {
        let temp_dir = TempDir::new().unwrap();
        let shared = SharedSink::new(MultiFileSink::new(temp_dir.path()));
        let mut writer = shared.clone();

        writer.write_all(b"dropped").unwrap();
        let path = shared.set_current_file("nested/dir/file.rs").unwrap();
        writer.write_all(b"kept").unwrap();
        assert_eq!(shared.current_file(), Some(path.clone()));
        shared.close();

        assert_eq!(fs::read_to_string(&path).unwrap(), "kept");
        assert_eq!(shared.files_written(), vec![path]);
    }

    #[cfg(unix)]
    #[test]
    fn test_nested_directories_are_group_accessible() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let mut sink = MultiFileSink::new(temp_dir.path());
        sink.set_current_file("pkg/file.go").unwrap();
        sink.close();

        let mode = fs::metadata(temp_dir.path().join("pkg"))
            .unwrap()
            .permissions()
            .mode();
        // umask may clear bits but never adds any outside the requested mode
        assert_eq!(mode & 0o007, 0);
        assert_eq!(mode & 0o700, 0o700);
    }
}
