use crate::error::ImageError;

/// Number of interleaved samples per pixel in a [`Raster`] (R, G, B, A).
pub const RASTER_CHANNELS: usize = 4;

/// An RGBA image with 8-bit samples, the unit of exchange of the engine.
pub type Raster = Image<u8, RASTER_CHANNELS>;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use procimag_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents an image with interleaved pixel data.
///
/// The samples are stored row-major with `CHANNELS` samples per pixel, so the
/// sample of channel `c` at `(x, y)` lives at `(y * width + x) * CHANNELS + c`.
///
/// An image always has a non-zero width and height, and its buffer length is
/// always `width * height * CHANNELS`.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Returns
    ///
    /// A new image with the given pixel data.
    ///
    /// # Errors
    ///
    /// If the size is zero in any dimension or the length of the pixel data
    /// does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use procimag_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 4>::new(
    ///    ImageSize {
    ///       width: 10,
    ///       height: 20,
    ///    },
    ///    vec![0u8; 10 * 20 * 4],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 4);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        if size.width == 0 || size.height == 0 {
            return Err(ImageError::EmptyImage(size.width, size.height));
        }

        // check if the data length matches the image size
        if data.len() != size.width * size.height * CHANNELS {
            return Err(ImageError::InvalidChannelShape(
                data.len(),
                size.width * size.height * CHANNELS,
            ));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and every sample set to `val`.
    ///
    /// # Errors
    ///
    /// If the size is zero in any dimension, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use procimag_image::{Image, ImageSize};
    ///
    /// let image = Image::<f32, 1>::from_size_val(
    ///   ImageSize {
    ///     width: 10,
    ///     height: 20,
    ///   }, 0.0).unwrap();
    ///
    /// assert_eq!(image.as_slice().len(), 200);
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let data = vec![val; size.width * size.height * CHANNELS];
        Image::new(size, data)
    }

    /// Create a new image with the given size and every pixel set to `pixel`.
    ///
    /// # Errors
    ///
    /// If the size is zero in any dimension, an error is returned.
    pub fn from_size_pixel(size: ImageSize, pixel: [T; CHANNELS]) -> Result<Self, ImageError>
    where
        T: Copy,
    {
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take(size.width * size.height * CHANNELS)
            .collect();
        Image::new(size, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Get the interleaved sample buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the interleaved sample buffer mutably.
    ///
    /// The buffer length cannot change through this view.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return its sample buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get a single sample by `[y, x, channel]` index.
    ///
    /// Returns `None` if any index is out of bounds.
    pub fn get(&self, index: [usize; 3]) -> Option<&T> {
        let [y, x, ch] = index;
        if x >= self.width() || y >= self.height() || ch >= CHANNELS {
            return None;
        }
        self.data.get((y * self.width() + x) * CHANNELS + ch)
    }

    /// Get the samples of the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// If the coordinates are outside the image, an error is returned.
    pub fn pixel(&self, x: usize, y: usize) -> Result<&[T], ImageError> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }
        let offset = (y * self.width() + x) * CHANNELS;
        Ok(&self.data[offset..offset + CHANNELS])
    }

    /// Overwrite the samples of the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// If the coordinates are outside the image, an error is returned and the
    /// image is left untouched.
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: [T; CHANNELS]) -> Result<(), ImageError>
    where
        T: Copy,
    {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }
        let offset = (y * self.width() + x) * CHANNELS;
        self.data[offset..offset + CHANNELS].copy_from_slice(&pixel);
        Ok(())
    }

    /// Clamp signed coordinates to the nearest valid pixel.
    ///
    /// This is the edge-replicate boundary policy shared by every
    /// neighborhood operator: out-of-bounds positions reuse the closest edge
    /// pixel, they never wrap around and are never zero padded.
    #[inline]
    pub fn clamp_coords(&self, x: isize, y: isize) -> (usize, usize) {
        let cx = x.clamp(0, self.width() as isize - 1) as usize;
        let cy = y.clamp(0, self.height() as isize - 1) as usize;
        (cx, cy)
    }

    /// Get the samples of the pixel at `(x, y)` with edge-replicate clamping.
    ///
    /// # Examples
    ///
    /// ```
    /// use procimag_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 1>::new(
    ///     ImageSize { width: 2, height: 2 },
    ///     vec![1, 2, 3, 4],
    /// ).unwrap();
    ///
    /// assert_eq!(image.pixel_clamped(-1, -1), &[1]);
    /// assert_eq!(image.pixel_clamped(5, 0), &[2]);
    /// ```
    #[inline]
    pub fn pixel_clamped(&self, x: isize, y: isize) -> &[T] {
        let (cx, cy) = self.clamp_coords(x, y);
        let offset = (cy * self.width() + cx) * CHANNELS;
        &self.data[offset..offset + CHANNELS]
    }

    /// Get a channel of the image.
    ///
    /// # Arguments
    ///
    /// * `channel` - The channel to get.
    ///
    /// # Returns
    ///
    /// A new single channel image with the given channel.
    ///
    /// # Errors
    ///
    /// If the channel index is out of bounds, an error is returned.
    pub fn channel(&self, channel: usize) -> Result<Image<T, 1>, ImageError>
    where
        T: Clone,
    {
        if channel >= CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(channel, CHANNELS));
        }

        let channel_data = self
            .data
            .chunks_exact(CHANNELS)
            .map(|pixel| pixel[channel].clone())
            .collect();

        Image::new(self.size, channel_data)
    }

    /// Split the image into its channels.
    ///
    /// # Returns
    ///
    /// A vector of images, each containing one channel of the original image.
    ///
    /// # Examples
    ///
    /// ```
    /// use procimag_image::{Raster, ImageSize};
    ///
    /// let raster = Raster::from_size_pixel(
    ///   ImageSize { width: 3, height: 2 },
    ///   [10, 20, 30, 255],
    /// ).unwrap();
    ///
    /// let planes = raster.split_channels().unwrap();
    /// assert_eq!(planes.len(), 4);
    /// assert_eq!(planes[1].as_slice(), &[20; 6]);
    /// ```
    pub fn split_channels(&self) -> Result<Vec<Image<T, 1>>, ImageError>
    where
        T: Clone,
    {
        (0..CHANNELS).map(|c| self.channel(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{Image, ImageError, ImageSize, Raster};

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert_eq!(ImageSize::from([10, 20]), image_size);
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Raster::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            vec![0u8; 10 * 20 * 4],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.num_channels(), 4);

        Ok(())
    }

    #[test]
    fn image_rejects_bad_shapes() {
        let zero = Raster::new(
            ImageSize {
                width: 0,
                height: 3,
            },
            vec![],
        );
        assert_eq!(zero, Err(ImageError::EmptyImage(0, 3)));

        let short = Raster::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0u8; 15],
        );
        assert_eq!(short, Err(ImageError::InvalidChannelShape(15, 16)));
    }

    #[test]
    fn image_pixel_access() -> Result<(), ImageError> {
        let mut image = Raster::from_size_pixel(
            ImageSize {
                width: 2,
                height: 2,
            },
            [1, 2, 3, 4],
        )?;
        image.set_pixel(1, 1, [9, 8, 7, 6])?;

        assert_eq!(image.pixel(1, 1)?, &[9, 8, 7, 6]);
        assert_eq!(image.get([1, 1, 2]), Some(&7));
        assert_eq!(image.get([2, 0, 0]), None);
        assert_eq!(
            image.pixel(2, 0),
            Err(ImageError::PixelIndexOutOfBounds(2, 0, 2, 2))
        );
        assert!(image.set_pixel(0, 5, [0; 4]).is_err());
        assert_eq!(image.pixel(0, 0)?, &[1, 2, 3, 4]);

        Ok(())
    }

    #[test]
    fn image_pixel_clamped_replicates_edges() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![0, 1, 2, 3, 4, 5],
        )?;

        // corner neighbours of (0, 0) all resolve to the corner itself
        for dy in -1..=0 {
            for dx in -1..=0 {
                assert_eq!(image.pixel_clamped(dx, dy), &[0]);
            }
        }
        assert_eq!(image.pixel_clamped(3, 1), &[5]);
        assert_eq!(image.pixel_clamped(1, 7), &[4]);

        Ok(())
    }

    #[test]
    fn image_channel() -> Result<(), ImageError> {
        let image = Image::<f32, 3>::new(
            ImageSize {
                height: 2,
                width: 1,
            },
            vec![0., 1., 2., 3., 4., 5.],
        )?;

        let channel = image.channel(2)?;
        assert_eq!(channel.get([1, 0, 0]), Some(&5.0f32));
        assert_eq!(
            image.channel(3),
            Err(ImageError::ChannelIndexOutOfBounds(3, 3))
        );

        Ok(())
    }

    #[test]
    fn image_split_channels() -> Result<(), ImageError> {
        let image = Image::<f32, 3>::new(
            ImageSize {
                height: 2,
                width: 1,
            },
            vec![0., 1., 2., 3., 4., 5.],
        )?;
        let channels = image.split_channels()?;
        assert_eq!(channels.len(), 3);
        assert_eq!(channels[0].get([1, 0, 0]), Some(&3.0f32));
        assert_eq!(channels[1].get([1, 0, 0]), Some(&4.0f32));
        assert_eq!(channels[2].get([1, 0, 0]), Some(&5.0f32));

        Ok(())
    }
}
