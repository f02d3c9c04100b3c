//! FImage - Floating-point intensity image
//!
//! `FImage` is a 2D array of `f64` intensity values, the pixel container
//! every measurement in this library operates on. Double precision is used
//! throughout so that the long summations behind correlation and regression
//! statistics do not accumulate single-precision rounding error.
//!
//! # Examples
//!
//! ```
//! use coloc_core::FImage;
//!
//! // Create a 100x100 intensity image
//! let mut image = FImage::new(100, 100).unwrap();
//!
//! // Set and get pixel values
//! image.set_pixel(10, 20, 0.5).unwrap();
//! assert_eq!(image.get_pixel(10, 20).unwrap(), 0.5);
//! ```

use crate::error::{Error, Result};

/// Floating-point intensity image
///
/// A 2D array of `f64` values.
///
/// # Memory Layout
///
/// Data is stored in row-major order with no padding. The pixel at (x, y)
/// is at index `y * width + x`.
#[derive(Debug, Clone)]
pub struct FImage {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Pixel data (row-major, no padding)
    data: Vec<f64>,
}

impl FImage {
    /// Create a new FImage with all pixels set to zero
    ///
    /// # Arguments
    ///
    /// * `width` - Width in pixels (must be > 0)
    /// * `height` - Height in pixels (must be > 0)
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use coloc_core::FImage;
    ///
    /// let image = FImage::new(640, 480).unwrap();
    /// assert_eq!(image.width(), 640);
    /// assert_eq!(image.height(), 480);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let size = (width as usize) * (height as usize);
        Ok(FImage {
            width,
            height,
            data: vec![0.0f64; size],
        })
    }

    /// Create a new FImage with all pixels set to the specified value
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new_with_value(width: u32, height: u32, value: f64) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let size = (width as usize) * (height as usize);
        Ok(FImage {
            width,
            height,
            data: vec![value; size],
        })
    }

    /// Create an FImage from raw data
    ///
    /// # Arguments
    ///
    /// * `width` - Width in pixels
    /// * `height` - Height in pixels
    /// * `data` - Pixel data in row-major order
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<f64>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let expected_size = (width as usize) * (height as usize);
        if data.len() != expected_size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected_size
            )));
        }

        Ok(FImage {
            width,
            height,
            data,
        })
    }

    /// Create an FImage by evaluating a function at every (x, y) position
    ///
    /// Useful for building synthetic gradients and test patterns.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> f64,
    {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let mut data = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }

        Ok(FImage {
            width,
            height,
            data,
        })
    }

    /// Get the image width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the image dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of pixels
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: zero-sized images cannot be constructed
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the pixel value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f64> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: self.data.len(),
            });
        }

        Ok(self.data[(y as usize) * (self.width as usize) + (x as usize)])
    }

    /// Set the pixel value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f64) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: self.data.len(),
            });
        }

        self.data[(y as usize) * (self.width as usize) + (x as usize)] = value;
        Ok(())
    }

    /// Get the pixel value at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> f64 {
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Set the pixel value at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: f64) {
        self.data[(y as usize) * (self.width as usize) + (x as usize)] = value;
    }

    /// Get raw access to the pixel data
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Get mutable access to the pixel data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Get a row of pixel data
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[f64] {
        let start = (y as usize) * (self.width as usize);
        &self.data[start..start + (self.width as usize)]
    }

    /// Set all pixels to the specified value
    pub fn set_all(&mut self, value: f64) {
        self.data.fill(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fimage_creation() {
        let image = FImage::new(100, 200).unwrap();
        assert_eq!(image.width(), 100);
        assert_eq!(image.height(), 200);
        assert_eq!(image.dimensions(), (100, 200));
        assert_eq!(image.len(), 20000);

        // Check all zeros
        for &val in image.data() {
            assert_eq!(val, 0.0);
        }
    }

    #[test]
    fn test_fimage_creation_with_value() {
        let image = FImage::new_with_value(50, 50, 0.5).unwrap();

        for &val in image.data() {
            assert_eq!(val, 0.5);
        }
    }

    #[test]
    fn test_fimage_invalid_dimensions() {
        assert!(FImage::new(0, 100).is_err());
        assert!(FImage::new(100, 0).is_err());
        assert!(FImage::new(0, 0).is_err());
    }

    #[test]
    fn test_fimage_from_data() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let image = FImage::from_data(3, 2, data).unwrap();

        assert_eq!(image.get_pixel(0, 0).unwrap(), 1.0);
        assert_eq!(image.get_pixel(2, 0).unwrap(), 3.0);
        assert_eq!(image.get_pixel(0, 1).unwrap(), 4.0);
        assert_eq!(image.get_pixel(2, 1).unwrap(), 6.0);
    }

    #[test]
    fn test_fimage_from_data_wrong_size() {
        let data = vec![1.0, 2.0, 3.0]; // Wrong size for 3x2
        assert!(FImage::from_data(3, 2, data).is_err());
    }

    #[test]
    fn test_fimage_from_fn() {
        let image = FImage::from_fn(4, 3, |x, y| (x + y) as f64).unwrap();

        assert_eq!(image.get_pixel(0, 0).unwrap(), 0.0);
        assert_eq!(image.get_pixel(3, 0).unwrap(), 3.0);
        assert_eq!(image.get_pixel(3, 2).unwrap(), 5.0);
    }

    #[test]
    fn test_fimage_pixel_access() {
        let mut image = FImage::new(10, 10).unwrap();

        image.set_pixel(5, 5, 1.5).unwrap();
        assert_eq!(image.get_pixel(5, 5).unwrap(), 1.5);

        image.set_pixel(0, 0, -0.5).unwrap();
        assert_eq!(image.get_pixel(0, 0).unwrap(), -0.5);
    }

    #[test]
    fn test_fimage_pixel_access_out_of_bounds() {
        let image = FImage::new(10, 10).unwrap();

        assert!(image.get_pixel(10, 0).is_err());
        assert!(image.get_pixel(0, 10).is_err());
        assert!(image.get_pixel(10, 10).is_err());
    }

    #[test]
    fn test_fimage_row_access() {
        let mut image = FImage::new(5, 3).unwrap();

        for x in 0..5 {
            image.set_pixel(x, 1, (x + 1) as f64).unwrap();
        }

        let row = image.row(1);
        assert_eq!(row, &[1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_fimage_set_all() {
        let mut image = FImage::new(10, 10).unwrap();

        image.set_all(5.0);
        for &val in image.data() {
            assert_eq!(val, 5.0);
        }
    }

    #[test]
    fn test_fimage_clone_independence() {
        let image1 = FImage::new_with_value(10, 10, 5.0).unwrap();
        let image2 = image1.clone();

        assert_eq!(image1.data(), image2.data());
        assert_ne!(image1.data().as_ptr(), image2.data().as_ptr());
    }
}
