use std::{fmt, path::Path};

use crate::foundation::error::{StackError, StackResult};

/// Image dimensions as `(height, width, channels)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Shape {
    /// Rows.
    pub height: u32,
    /// Columns.
    pub width: u32,
    /// Samples per pixel (1 gray, 2 gray+alpha, 3 RGB, 4 RGBA).
    pub channels: u8,
}

impl Shape {
    /// Build a shape from `(height, width, channels)`.
    pub fn new(height: u32, width: u32, channels: u8) -> Self {
        Self {
            height,
            width,
            channels,
        }
    }

    /// Total number of samples in a raster of this shape.
    pub fn sample_count(&self) -> usize {
        self.height as usize * self.width as usize * usize::from(self.channels)
    }

    fn color_type(&self) -> image::ColorType {
        match self.channels {
            1 => image::ColorType::L8,
            2 => image::ColorType::La8,
            3 => image::ColorType::Rgb8,
            _ => image::ColorType::Rgba8,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.height, self.width, self.channels)
    }
}

/// Row-major, channel-interleaved 8-bit pixel grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    shape: Shape,
    data: Vec<u8>,
}

impl Raster {
    /// A raster of `shape` with every sample set to zero.
    pub fn zeros(shape: Shape) -> Self {
        Self {
            shape,
            data: vec![0u8; shape.sample_count()],
        }
    }

    /// Wrap raw samples. Returns `None` when `data` does not fit `shape` or the
    /// channel count is outside `1..=4`.
    pub fn from_raw(shape: Shape, data: Vec<u8>) -> Option<Self> {
        if !(1..=4).contains(&shape.channels) || data.len() != shape.sample_count() {
            return None;
        }
        Some(Self { shape, data })
    }

    /// Convert a decoded image, keeping its channel count and narrowing
    /// wider sample types to 8 bits.
    ///
    /// Palette PNGs arrive already expanded by the decoder, so they stack as
    /// RGB (or RGBA with a transparency chunk) rather than as palette indices.
    pub fn from_dynamic(img: image::DynamicImage) -> Self {
        let (width, height) = (img.width(), img.height());
        let (channels, data) = match img.color().channel_count() {
            1 => (1, img.into_luma8().into_raw()),
            2 => (2, img.into_luma_alpha8().into_raw()),
            3 => (3, img.into_rgb8().into_raw()),
            _ => (4, img.into_rgba8().into_raw()),
        };
        Self {
            shape: Shape::new(height, width, channels),
            data,
        }
    }

    /// Decode the PNG at `path`. The file handle lives only for this call.
    #[tracing::instrument(level = "debug")]
    pub fn load(path: &Path) -> StackResult<Self> {
        let mut reader = image::ImageReader::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StackError::missing_file(path)
            } else {
                StackError::io(path, e)
            }
        })?;
        reader.set_format(image::ImageFormat::Png);
        let img = reader.decode().map_err(|source| StackError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_dynamic(img))
    }

    /// Encode as PNG at `path`, replacing any existing file.
    pub fn save_png(&self, path: &Path) -> StackResult<()> {
        image::save_buffer_with_format(
            path,
            &self.data,
            self.shape.width,
            self.shape.height,
            self.shape.color_type(),
            image::ImageFormat::Png,
        )
        .map_err(|source| StackError::Encode {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fold `other` into `self`, keeping the larger sample at every position.
    ///
    /// Fails without touching `self` when the shapes differ.
    pub fn max_in_place(&mut self, other: &Raster) -> StackResult<()> {
        if self.shape != other.shape {
            return Err(StackError::ShapeMismatch {
                expected: self.shape,
                found: other.shape,
                path: None,
            });
        }
        self.fold_max(other);
        Ok(())
    }

    /// [`Raster::max_in_place`] for callers that already checked shapes.
    pub(crate) fn fold_max(&mut self, other: &Raster) {
        for (acc, &s) in self.data.iter_mut().zip(&other.data) {
            *acc = (*acc).max(s);
        }
    }

    /// Dimensions of this raster.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Raw samples, row-major and channel-interleaved.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
#[path = "../tests/unit/raster.rs"]
mod tests;
