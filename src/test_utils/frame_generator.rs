//! Synthetic I420 frame generation for testing
//!
//! Generates I420 frames with known content for pixel-exact test validation.
//!
//! # Example
//!
//! ```rust,ignore
//! use frame_color_lib::test_utils::{i420_solid_frame, GridFrameBuilder};
//! use frame_color_lib::yuv_conversion::{ColorRange, Rgb};
//!
//! // A solid red 640x480 frame
//! let frame = i420_solid_frame(640, 480, Rgb::RED, ColorRange::Limited);
//!
//! // A frame carrying the grid message "hello"
//! let frame = GridFrameBuilder::new("hello").build(64, 64, ColorRange::Limited);
//! ```

use crate::color_grid::{
    body_checksum, byte_to_cells, i32_to_cells, PaletteColor, CELL_SIZE, GRID_MAGIC,
};
use crate::yuv_conversion::{ColorRange, Rgb};

/// Size in bytes of an I420 frame (dimensions are not validated)
pub fn i420_len(width: u32, height: u32) -> usize {
    let y_size = width as usize * height as usize;
    y_size + y_size / 2
}

/// Generate an I420 frame filled with one color
pub fn i420_solid_frame(width: u32, height: u32, color: Rgb, range: ColorRange) -> Vec<u8> {
    let (y, u, v) = color.to_yuv(range);
    let y_size = width as usize * height as usize;
    let uv_size = y_size / 4;

    let mut data = Vec::with_capacity(y_size + uv_size * 2);
    data.resize(y_size, y);
    data.resize(y_size + uv_size, u);
    data.resize(y_size + uv_size * 2, v);
    data
}

/// Generate a horizontal grayscale gradient, black on the left to white on
/// the right
pub fn i420_gradient_frame(width: u32, height: u32) -> Vec<u8> {
    let mut data = vec![128u8; i420_len(width, height)];

    for row in 0..height as usize {
        for col in 0..width as usize {
            let idx = row * width as usize + col;
            data[idx] = (16 + (col as u64 * 219) / u64::from(width.max(1))) as u8;
        }
    }

    data
}

/// Generate a frame with `left` on the left half and `right` on the right half
///
/// `width` should be a multiple of 4 so the split falls on a chroma boundary.
pub fn i420_split_frame(
    width: u32,
    height: u32,
    left: Rgb,
    right: Rgb,
    range: ColorRange,
) -> Vec<u8> {
    let mut data = i420_solid_frame(width, height, left, range);
    fill_rect(&mut data, width, height, width / 2, 0, width / 2, height, right, range);
    data
}

/// Generate eight vertical color bars (white, yellow, cyan, green, magenta,
/// red, blue, black)
pub fn i420_color_bars_frame(width: u32, height: u32, range: ColorRange) -> Vec<u8> {
    let bars = [
        Rgb::WHITE,
        Rgb::YELLOW,
        Rgb::new(0, 255, 255),
        Rgb::GREEN,
        Rgb::new(255, 0, 255),
        Rgb::RED,
        Rgb::BLUE,
        Rgb::BLACK,
    ];

    let mut data = i420_solid_frame(width, height, Rgb::BLACK, range);
    let bar_width = (width / bars.len() as u32) & !1;
    for (i, color) in bars.iter().enumerate() {
        let x = i as u32 * bar_width;
        fill_rect(&mut data, width, height, x, 0, bar_width, height, *color, range);
    }
    data
}

/// Paint a rectangle into an I420 frame
///
/// Luma is written for every covered pixel; chroma for every 2x2 block whose
/// top-left pixel is covered. Use even coordinates and sizes for exact
/// results. The rectangle is clipped to the frame.
#[allow(clippy::too_many_arguments)]
pub fn fill_rect(
    data: &mut [u8],
    width: u32,
    height: u32,
    x: u32,
    y: u32,
    rect_width: u32,
    rect_height: u32,
    color: Rgb,
    range: ColorRange,
) {
    let (y_val, u_val, v_val) = color.to_yuv(range);
    let x_end = x.saturating_add(rect_width).min(width);
    let y_end = y.saturating_add(rect_height).min(height);
    let y_size = width as usize * height as usize;
    let uv_size = y_size / 4;
    let uv_width = (width / 2) as usize;

    for row in y..y_end {
        for col in x..x_end {
            data[row as usize * width as usize + col as usize] = y_val;

            if row % 2 == 0 && col % 2 == 0 {
                let uv_idx = (row / 2) as usize * uv_width + (col / 2) as usize;
                data[y_size + uv_idx] = u_val;
                data[y_size + uv_size + uv_idx] = v_val;
            }
        }
    }
}

/// Builds I420 frames carrying a color grid message
///
/// Header fields default to a valid message; the setters override them to
/// produce corrupt frames for negative tests.
#[derive(Debug, Clone)]
pub struct GridFrameBuilder {
    magic: [u8; 4],
    version: i32,
    body: Vec<u8>,
    body_len: Option<i32>,
    checksum: Option<i32>,
}

impl GridFrameBuilder {
    /// Start a valid version-1 message with a text body
    pub fn new(body: &str) -> Self {
        Self::from_bytes(body.as_bytes().to_vec())
    }

    /// Start a version-1 message with raw body bytes
    pub fn from_bytes(body: Vec<u8>) -> Self {
        Self {
            magic: GRID_MAGIC,
            version: 1,
            body,
            body_len: None,
            checksum: None,
        }
    }

    /// Override the magic bytes
    pub fn magic(mut self, magic: [u8; 4]) -> Self {
        self.magic = magic;
        self
    }

    /// Override the version field
    pub fn version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    /// Override the body length field (the body itself is unchanged)
    pub fn body_len(mut self, body_len: i32) -> Self {
        self.body_len = Some(body_len);
        self
    }

    /// Override the checksum field
    pub fn checksum(mut self, checksum: i32) -> Self {
        self.checksum = Some(checksum);
        self
    }

    /// The message as a cell sequence
    pub fn cells(&self) -> Vec<PaletteColor> {
        let body_len = self.body_len.unwrap_or(self.body.len() as i32);
        let checksum = self.checksum.unwrap_or_else(|| body_checksum(&self.body));

        let mut cells = Vec::new();
        for byte in self.magic {
            cells.extend(byte_to_cells(byte));
        }
        cells.extend(i32_to_cells(self.version));
        cells.extend(i32_to_cells(body_len));
        cells.extend(i32_to_cells(checksum));
        for &byte in &self.body {
            cells.extend(byte_to_cells(byte));
        }
        cells
    }

    /// Paint the message into a black I420 frame
    ///
    /// Cells that do not fit in the frame are dropped.
    pub fn build(&self, width: u32, height: u32, range: ColorRange) -> Vec<u8> {
        let mut data = i420_solid_frame(width, height, Rgb::BLACK, range);
        let cells_per_row = width / CELL_SIZE;
        let capacity = cells_per_row as usize * (height / CELL_SIZE) as usize;

        for (index, cell) in self.cells().into_iter().take(capacity).enumerate() {
            let x = (index as u32 % cells_per_row) * CELL_SIZE;
            let y = (index as u32 / cells_per_row) * CELL_SIZE;
            fill_rect(
                &mut data,
                width,
                height,
                x,
                y,
                CELL_SIZE,
                CELL_SIZE,
                cell.rgb(),
                range,
            );
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color_grid::HEADER_CELLS;
    use crate::yuv_conversion::{convert_i420_to_rgb_with_range, I420Frame};

    #[test]
    fn test_solid_frame_size_and_planes() {
        let data = i420_solid_frame(8, 4, Rgb::RED, ColorRange::Limited);
        assert_eq!(data.len(), i420_len(8, 4));

        let frame = I420Frame::new(&data, 8, 4).unwrap();
        assert!(frame.y_plane().iter().all(|&b| b == 81));
        assert!(frame.u_plane().iter().all(|&b| b == 90));
        assert!(frame.v_plane().iter().all(|&b| b == 240));
    }

    #[test]
    fn test_gradient_top_left_dark_right_light() {
        let data = i420_gradient_frame(16, 2);
        assert_eq!(data[0], 16);
        assert!(data[15] > 200);
    }

    #[test]
    fn test_split_frame_halves() {
        let data = i420_split_frame(8, 4, Rgb::BLACK, Rgb::WHITE, ColorRange::Full);
        let frame = I420Frame::new(&data, 8, 4).unwrap();

        assert_eq!(frame.rgb_at(0, 0, ColorRange::Full), Rgb::BLACK);
        assert_eq!(frame.rgb_at(3, 3, ColorRange::Full), Rgb::BLACK);
        assert_eq!(frame.rgb_at(4, 0, ColorRange::Full), Rgb::WHITE);
        assert_eq!(frame.rgb_at(7, 3, ColorRange::Full), Rgb::WHITE);
    }

    #[test]
    fn test_color_bars_first_white_last_black() {
        let data = i420_color_bars_frame(64, 4, ColorRange::Limited);
        let rgb = convert_i420_to_rgb_with_range(&data, 64, 4, ColorRange::Limited).unwrap();

        assert!(rgb[..3].iter().all(|&c| c >= 250), "First bar is white");
        let last = (64 - 1) * 3;
        assert!(rgb[last..last + 3].iter().all(|&c| c <= 5), "Last bar is black");
    }

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut data = i420_solid_frame(4, 4, Rgb::BLACK, ColorRange::Limited);
        fill_rect(&mut data, 4, 4, 2, 2, 10, 10, Rgb::WHITE, ColorRange::Limited);

        assert_eq!(data.len(), i420_len(4, 4));
        assert_eq!(data[0], 16, "Top-left untouched");
        assert_eq!(data[15], 235, "Bottom-right painted");
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_i420_len_does_not_wrap() {
        assert_eq!(i420_len(65536, 65536), 6_442_450_944);
        assert_eq!(
            Ok(i420_len(65536, 65536)),
            crate::yuv_conversion::i420_frame_size(65536, 65536)
        );
    }

    #[test]
    fn test_fill_rect_saturates_extent() {
        let mut data = i420_solid_frame(4, 4, Rgb::BLACK, ColorRange::Limited);
        let (w, h) = (u32::MAX, u32::MAX);
        fill_rect(&mut data, 4, 4, 2, 2, w, h, Rgb::WHITE, ColorRange::Limited);
        assert_eq!(data[15], 235);
    }

    #[test]
    fn test_grid_builder_cell_count() {
        let builder = GridFrameBuilder::new("abc");
        assert_eq!(builder.cells().len(), HEADER_CELLS + 3 * 4);
    }

    #[test]
    fn test_grid_builder_paints_cells_in_row_major_order() {
        // 'a' = 0b01_10_00_01: purple, yellow, black, purple
        let data = GridFrameBuilder::new("").build(64, 16, ColorRange::Full);
        let frame = I420Frame::new(&data, 64, 16).unwrap();

        assert!(frame.rgb_at(0, 0, ColorRange::Full).max_channel_diff(&Rgb::PURPLE) <= 2);
        assert!(frame.rgb_at(5, 2, ColorRange::Full).max_channel_diff(&Rgb::YELLOW) <= 2);
        assert_eq!(frame.rgb_at(9, 1, ColorRange::Full), Rgb::BLACK);
        assert!(frame.rgb_at(15, 3, ColorRange::Full).max_channel_diff(&Rgb::PURPLE) <= 2);
    }

    #[test]
    fn test_grid_builder_drops_cells_that_do_not_fit() {
        let data = GridFrameBuilder::new("a long body that will not fit").build(
            8,
            8,
            ColorRange::Limited,
        );
        assert_eq!(data.len(), i420_len(8, 8));
    }
}
