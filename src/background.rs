use image::imageops::{self, FilterType};
use image::RgbaImage;
use log::debug;
use std::borrow::Cow;
use std::sync::atomic::{AtomicUsize, Ordering};

// Static counter for generating unique IDs
static NEXT_IMAGE_ID: AtomicUsize = AtomicUsize::new(1);

/// Pre-decoded raster drawn beneath all strokes.
///
/// The surface never decodes files itself; hosts hand it pixels.
#[derive(Clone)]
pub struct BackgroundImage {
    id: usize,
    pixels: RgbaImage,
    // Copy stretched to the surface size, rebuilt only when that size changes
    fitted: Option<RgbaImage>,
}

// Skip dumping the pixel data
impl std::fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundImage")
            .field("id", &self.id)
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .finish()
    }
}

impl BackgroundImage {
    pub fn new(pixels: RgbaImage) -> Self {
        let id = NEXT_IMAGE_ID.fetch_add(1, Ordering::SeqCst);
        Self { id, pixels, fitted: None }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn size(&self) -> [u32; 2] {
        [self.pixels.width(), self.pixels.height()]
    }

    /// Prepare the stretched copy used by [`Self::scaled_to`] for `width` x `height`
    pub fn fit_to(&mut self, width: u32, height: u32) {
        if self.pixels.dimensions() == (width, height) {
            self.fitted = None;
            return;
        }
        if self.fitted.as_ref().is_some_and(|fitted| fitted.dimensions() == (width, height)) {
            return;
        }
        debug!("Fitting background image {} to {}x{}", self.id, width, height);
        self.fitted = Some(imageops::resize(&self.pixels, width, height, FilterType::Triangle));
    }

    /// The image stretched to exactly `width` x `height`. Borrows when the
    /// size matches the original or the copy prepared by [`Self::fit_to`].
    pub fn scaled_to(&self, width: u32, height: u32) -> Cow<'_, RgbaImage> {
        if self.pixels.dimensions() == (width, height) {
            return Cow::Borrowed(&self.pixels);
        }
        match &self.fitted {
            Some(fitted) if fitted.dimensions() == (width, height) => Cow::Borrowed(fitted),
            _ => Cow::Owned(imageops::resize(&self.pixels, width, height, FilterType::Triangle)),
        }
    }
}
