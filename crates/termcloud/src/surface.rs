//! Drawing surfaces and container selection.
//!
//! A render pass draws into exactly one [`Surface`], picked from a
//! [`Surfaces`] registry by the configured container selector:
//!
//! | Selector | Matches |
//! |----------|---------|
//! | `#id` | the surface registered with that id |
//! | `.class` | every surface carrying that class |
//! | `*` | every surface |
//! | `id` | same as `#id` |

use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, error, info};

use crate::error::TermCloudError;

/// A sink for rendered documents.
pub trait Surface {
    /// Replaces the surface content with `document`.
    ///
    /// # Errors
    ///
    /// Returns an error when the document cannot be stored.
    fn draw(&mut self, document: &str) -> Result<(), TermCloudError>;

    /// The last drawn document, for surfaces that keep it in memory.
    fn document(&self) -> Option<&str> {
        None
    }
}

/// Keeps the last drawn document in memory.
#[derive(Debug, Clone, Default)]
pub struct SvgBuffer {
    content: Option<String>,
}

impl SvgBuffer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for SvgBuffer {
    fn draw(&mut self, document: &str) -> Result<(), TermCloudError> {
        self.content = Some(document.to_string());
        Ok(())
    }

    fn document(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

/// Writes each drawn document to a file, replacing earlier content.
#[derive(Debug, Clone)]
pub struct SvgFile {
    path: PathBuf,
}

impl SvgFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Surface for SvgFile {
    fn draw(&mut self, document: &str) -> Result<(), TermCloudError> {
        let file_name = self.path.display().to_string();
        info!(file_name; "Creating SVG file");
        let mut file = File::create(&self.path).map_err(|err| {
            error!(file_name, err:err; "Failed to create SVG file");
            err
        })?;
        file.write_all(document.as_bytes()).map_err(|err| {
            error!(file_name, err:err; "Failed to write SVG content");
            err
        })?;
        Ok(())
    }
}

struct Entry {
    id: String,
    classes: Vec<String>,
    surface: Box<dyn Surface>,
}

/// Registered surfaces addressable by id and class.
///
/// # Example
///
/// ```
/// # use termcloud::surface::{Surfaces, SvgBuffer};
/// let mut surfaces = Surfaces::new();
/// surfaces.register("cloud", ["panel"], SvgBuffer::new());
/// surfaces.register("legend", ["panel"], SvgBuffer::new());
///
/// assert!(surfaces.resolve("#cloud").is_ok());
/// assert!(surfaces.resolve(".panel").is_err());
/// ```
#[derive(Default)]
pub struct Surfaces {
    entries: Vec<Entry>,
}

impl Surfaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `surface` under `id` with the given classes.
    pub fn register<I, S>(
        &mut self,
        id: impl Into<String>,
        classes: I,
        surface: impl Surface + 'static,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = id.into();
        debug!(id; "Registering surface");
        self.entries.push(Entry {
            id,
            classes: classes.into_iter().map(Into::into).collect(),
            surface: Box::new(surface),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn matching(&self, selector: &str) -> Vec<usize> {
        let selector = selector.trim();
        let matches = |entry: &Entry| {
            if selector.is_empty() {
                false
            } else if selector == "*" {
                true
            } else if let Some(class) = selector.strip_prefix('.') {
                entry.classes.iter().any(|c| c == class)
            } else {
                entry.id == selector.strip_prefix('#').unwrap_or(selector)
            }
        };
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| matches(entry))
            .map(|(index, _)| index)
            .collect()
    }

    /// Finds the single surface matched by `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`TermCloudError::Container`] unless exactly one surface
    /// matches.
    pub fn resolve(&self, selector: &str) -> Result<&dyn Surface, TermCloudError> {
        let index = self.resolve_index(selector)?;
        Ok(self.entries[index].surface.as_ref())
    }

    /// Mutable variant of [`Surfaces::resolve`].
    ///
    /// # Errors
    ///
    /// Returns [`TermCloudError::Container`] unless exactly one surface
    /// matches.
    pub fn resolve_mut(&mut self, selector: &str) -> Result<&mut dyn Surface, TermCloudError> {
        let index = self.resolve_index(selector)?;
        Ok(self.entries[index].surface.as_mut())
    }

    fn resolve_index(&self, selector: &str) -> Result<usize, TermCloudError> {
        match self.matching(selector).as_slice() {
            [index] => Ok(*index),
            matches => Err(TermCloudError::container(selector, matches.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surfaces() -> Surfaces {
        let mut surfaces = Surfaces::new();
        surfaces
            .register("cloud", ["main"], SvgBuffer::new())
            .register("side", ["panel", "small"], SvgBuffer::new())
            .register("other", ["panel"], SvgBuffer::new());
        surfaces
    }

    #[test]
    fn test_resolve_by_id_and_bare_id() {
        let surfaces = surfaces();
        assert!(surfaces.resolve("#cloud").is_ok());
        assert!(surfaces.resolve("side").is_ok());
        assert_eq!(surfaces.len(), 3);
    }

    #[test]
    fn test_resolve_by_unique_class() {
        assert!(surfaces().resolve(".small").is_ok());
    }

    #[test]
    fn test_resolve_reports_match_count() {
        let surfaces = surfaces();
        assert!(matches!(
            surfaces.resolve("#missing"),
            Err(TermCloudError::Container { matches: 0, .. })
        ));
        assert!(matches!(
            surfaces.resolve(".panel"),
            Err(TermCloudError::Container { matches: 2, .. })
        ));
        assert!(matches!(
            surfaces.resolve("*"),
            Err(TermCloudError::Container { matches: 3, .. })
        ));
        assert!(matches!(
            surfaces.resolve("  "),
            Err(TermCloudError::Container { matches: 0, .. })
        ));
    }

    #[test]
    fn test_buffer_keeps_last_document() {
        let mut surfaces = surfaces();
        let surface = surfaces.resolve_mut("#cloud").unwrap();
        surface.draw("<svg/>").unwrap();
        surface.draw("<svg></svg>").unwrap();
        assert_eq!(surfaces.resolve("#cloud").unwrap().document(), Some("<svg></svg>"));
    }

    #[test]
    fn test_file_surface_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cloud.svg");
        let mut file = SvgFile::new(&path);
        file.draw("<svg/>").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<svg/>");
        assert!(file.document().is_none());
    }

    #[test]
    fn test_file_surface_reports_io_errors() {
        let mut file = SvgFile::new("/definitely/not/a/dir/cloud.svg");
        assert!(matches!(file.draw("<svg/>"), Err(TermCloudError::Io(_))));
    }
}
