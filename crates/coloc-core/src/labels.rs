//! LabelMap - Integer object label image
//!
//! A `LabelMap` partitions a frame into background (label 0) and numbered
//! object instances (positive labels). Label ids need not be contiguous;
//! enumeration of the objects present is the sorted set of distinct positive
//! values.

use crate::error::{Error, Result};

/// Object label image
///
/// A 2D array of `u32` labels with the same row-major layout as
/// [`FImage`](crate::FImage). Label 0 denotes background.
#[derive(Debug, Clone)]
pub struct LabelMap {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Label data (row-major, no padding)
    data: Vec<u32>,
}

impl LabelMap {
    /// Create a new LabelMap with every position set to background
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let size = (width as usize) * (height as usize);
        Ok(LabelMap {
            width,
            height,
            data: vec![0u32; size],
        })
    }

    /// Create a LabelMap from raw data
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<u32>) -> Result<Self> {
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

        Ok(LabelMap {
            width,
            height,
            data,
        })
    }

    /// Get the map width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the map height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the map dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of positions
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: zero-sized maps cannot be constructed
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the label at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Result<u32> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: self.data.len(),
            });
        }

        Ok(self.data[(y as usize) * (self.width as usize) + (x as usize)])
    }

    /// Set the label at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, label: u32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: self.data.len(),
            });
        }

        self.data[(y as usize) * (self.width as usize) + (x as usize)] = label;
        Ok(())
    }

    /// Fill a rectangular region with a label
    ///
    /// The region is clipped to the map bounds.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, w: u32, h: u32, label: u32) {
        let x1 = x0.saturating_add(w).min(self.width);
        let y1 = y0.saturating_add(h).min(self.height);
        if x0 >= x1 {
            return;
        }
        for y in y0..y1 {
            let start = (y as usize) * (self.width as usize);
            self.data[start + x0 as usize..start + x1 as usize].fill(label);
        }
    }

    /// Sorted set of distinct positive labels present in the map
    ///
    /// Background (0) is never included. Ids need not be contiguous.
    pub fn labels(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.data.iter().copied().filter(|&v| v > 0).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Largest label present, or 0 if the map is all background
    pub fn max_label(&self) -> u32 {
        self.data.iter().copied().max().unwrap_or(0)
    }

    /// Get raw access to the label data
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    /// Get mutable access to the label data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.data
    }
}
