use procimag_image::{ImageError, ImageSize, Raster};
use procimag_imgproc::resize::resize_nearest;

use crate::operation::Operation;

fn resample_to(source: &Raster, size: ImageSize) -> Result<Raster, ImageError> {
    if source.size() == size {
        return Ok(source.clone());
    }
    log::debug!("session: resample secondary {} -> {}", source.size(), size);
    let mut dst = Raster::from_size_val(size, 0)?;
    resize_nearest(source, &mut dst)?;
    Ok(dst)
}

/// An error type for the session.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SessionError {
    /// Error when an operation runs before any image was loaded.
    #[error("No image loaded")]
    NoImageLoaded,

    /// Error when a dual-raster operation runs without a secondary image.
    #[error("Operation {0:?} requires a secondary image")]
    MissingSecondary(Operation),

    /// Error raised by an image operation.
    #[error(transparent)]
    Image(#[from] ImageError),
}

/// The image state of an editing session.
///
/// A session holds the `current` image, an optional `secondary` image for the
/// dual-raster operations and the `edited` result of the operations run so
/// far. Operations chain: each one reads the edited image, or the current one
/// when nothing was edited yet. [`Session::commit`] makes the edited image
/// current, [`Session::reset`] drops the edits.
///
/// The secondary image is kept at the size of the current image: it is
/// resampled with nearest neighbor interpolation whenever either is loaded.
///
/// # Example
///
/// ```
/// use procimag::image::{ImageSize, Raster};
/// use procimag::{Operation, Session};
///
/// let mut session = Session::new();
/// session.load(Raster::from_size_pixel(ImageSize { width: 2, height: 2 }, [100, 0, 0, 255]).unwrap());
///
/// session.run(Operation::Negative).unwrap();
/// assert_eq!(session.working().unwrap().pixel(0, 0).unwrap(), &[155, 255, 255, 255]);
///
/// session.reset();
/// assert!(session.edited().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    current: Option<Raster>,
    // as loaded, before resampling
    secondary_source: Option<Raster>,
    secondary: Option<Raster>,
    edited: Option<Raster>,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a new current image, dropping any pending edits.
    pub fn load(&mut self, image: Raster) {
        log::debug!("session: load {}x{}", image.width(), image.height());
        self.current = Some(image);
        self.edited = None;
        self.resample_secondary();
    }

    /// Load the secondary image used by the dual-raster operations.
    pub fn load_secondary(&mut self, image: Raster) {
        log::debug!(
            "session: load secondary {}x{}",
            image.width(),
            image.height()
        );
        self.secondary_source = Some(image);
        self.resample_secondary();
    }

    /// Drop the secondary image.
    pub fn clear_secondary(&mut self) {
        self.secondary_source = None;
        self.secondary = None;
    }

    fn resample_secondary(&mut self) {
        self.secondary = match (&self.current, &self.secondary_source) {
            (Some(current), Some(source)) => match resample_to(source, current.size()) {
                Ok(secondary) => Some(secondary),
                Err(err) => {
                    log::warn!("session: cannot resample secondary image: {err}");
                    None
                }
            },
            _ => None,
        };
    }

    /// The current image.
    pub fn current(&self) -> Option<&Raster> {
        self.current.as_ref()
    }

    /// The secondary image, resampled to the size of the current image.
    pub fn secondary(&self) -> Option<&Raster> {
        self.secondary.as_ref()
    }

    /// The result of the operations run since the last load, commit or reset.
    pub fn edited(&self) -> Option<&Raster> {
        self.edited.as_ref()
    }

    /// The image the next operation reads: the edited image if any, else the
    /// current one.
    pub fn working(&self) -> Option<&Raster> {
        self.edited.as_ref().or(self.current.as_ref())
    }

    /// Run an operation on the working image and store the result as edited.
    ///
    /// # Errors
    ///
    /// Returns an error without touching the session if no image is loaded,
    /// if a dual-raster operation has no secondary image, or if the operation
    /// itself fails.
    pub fn run(&mut self, op: Operation) -> Result<&Raster, SessionError> {
        let src = self.working().ok_or(SessionError::NoImageLoaded)?;

        if op.needs_secondary() && self.secondary.is_none() {
            return Err(SessionError::MissingSecondary(op));
        }

        let out = op.apply(src, self.secondary.as_ref())?;
        log::debug!("session: applied {op:?}");

        Ok(self.edited.insert(out))
    }

    /// Make the edited image the current one.
    ///
    /// # Errors
    ///
    /// Returns an error if no image is loaded.
    pub fn commit(&mut self) -> Result<(), SessionError> {
        if self.current.is_none() {
            return Err(SessionError::NoImageLoaded);
        }
        if let Some(edited) = self.edited.take() {
            log::debug!("session: commit");
            self.current = Some(edited);
        }
        Ok(())
    }

    /// Drop the edits and go back to the current image.
    pub fn reset(&mut self) {
        log::debug!("session: reset");
        self.edited = None;
    }
}
