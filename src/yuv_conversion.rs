//! I420 to RGB conversion utilities
//!
//! Platform-independent color space conversion for decoded video frames.
//! Frames arrive as planar YUV 4:2:0 (I420) and leave as packed RGB24.
//!
//! # Layout
//!
//! - **I420 input**: Y plane (`width * height`), then U and V planes
//!   (`width/2 * height/2` each). Width and height must be positive and even.
//! - **RGB24 output**: 3 bytes per pixel, R-G-B order, same row-major order
//!   as the Y plane.
//!
//! # Arithmetic
//!
//! The transform uses BT.601 coefficients in 16.16 fixed point. Each channel
//! is rounded to nearest before it is clamped to `0..=255`, so the output is
//! bit-exact across platforms and free of the systematic darkening that
//! truncation causes.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error type for conversion failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Width/height are zero, odd, or inconsistent with a buffer length
    #[error("InvalidDimensions: {0}")]
    InvalidDimensions(String),
}

/// Quantization range of the Y/U/V samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRange {
    /// BT.601 video range: Y in 16-235, U/V in 16-240
    #[default]
    Limited,
    /// JPEG range: Y, U and V span 0-255
    Full,
}

impl ColorRange {
    /// Parse from environment variable string
    pub fn from_env_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "limited" | "tv" | "video" => Self::Limited,
            "full" | "pc" | "jpeg" => Self::Full,
            _ => {
                log::warn!("Unknown color range '{}', defaulting to 'limited'", s);
                Self::Limited
            }
        }
    }

    /// Fixed-point coefficients for this range
    ///
    /// Limited range folds the 255/219 luma and 255/224 chroma expansion
    /// into the full-range BT.601 coefficients.
    const fn coefficients(self) -> Coefficients {
        match self {
            // R = Y + 1.402 V, G = Y - 0.344136 U - 0.714136 V, B = Y + 1.772 U
            Self::Full => Coefficients {
                y_offset: 0,
                y: 65536,
                r_v: 91881,
                g_u: 22553,
                g_v: 46802,
                b_u: 116130,
            },
            // 1.164383, 1.596027, 0.391762, 0.812968, 2.017232
            Self::Limited => Coefficients {
                y_offset: 16,
                y: 76309,
                r_v: 104597,
                g_u: 25675,
                g_v: 53279,
                b_u: 132201,
            },
        }
    }
}

/// 16.16 fixed-point YUV to RGB coefficients
#[derive(Debug, Clone, Copy)]
struct Coefficients {
    y_offset: i32,
    y: i32,
    r_v: i32,
    g_u: i32,
    g_v: i32,
    b_u: i32,
}

const FIXED_SHIFT: u32 = 16;
const FIXED_HALF: i32 = 1 << (FIXED_SHIFT - 1);

/// RGB color value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl Rgb {
    /// Pure red color
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    /// Pure green color
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    /// Pure blue color
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    /// Pure white color
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    /// Pure black color
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// Medium gray color
    pub const GRAY: Rgb = Rgb::new(128, 128, 128);
    /// Yellow color
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    /// Purple color
    pub const PURPLE: Rgb = Rgb::new(128, 0, 128);

    /// Create a color from its components
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Euclidean distance to another color, truncated to an integer
    pub fn distance(&self, other: &Rgb) -> u32 {
        let dr = i32::from(self.r) - i32::from(other.r);
        let dg = i32::from(self.g) - i32::from(other.g);
        let db = i32::from(self.b) - i32::from(other.b);
        f64::from(dr * dr + dg * dg + db * db).sqrt() as u32
    }

    /// Largest per-channel absolute difference to another color
    pub fn max_channel_diff(&self, other: &Rgb) -> u8 {
        self.r
            .abs_diff(other.r)
            .max(self.g.abs_diff(other.g))
            .max(self.b.abs_diff(other.b))
    }

    /// Convert RGB to (Y, U, V) using BT.601 coefficients for the given range
    pub fn to_yuv(&self, range: ColorRange) -> (u8, u8, u8) {
        let r = f32::from(self.r) / 255.0;
        let g = f32::from(self.g) / 255.0;
        let b = f32::from(self.b) / 255.0;

        let (y, u, v) = match range {
            ColorRange::Limited => (
                16.0 + 65.481 * r + 128.553 * g + 24.966 * b,
                128.0 - 37.797 * r - 74.203 * g + 112.0 * b,
                128.0 + 112.0 * r - 93.786 * g - 18.214 * b,
            ),
            ColorRange::Full => (
                255.0 * (0.299 * r + 0.587 * g + 0.114 * b),
                128.0 + 255.0 * (-0.168736 * r - 0.331264 * g + 0.5 * b),
                128.0 + 255.0 * (0.5 * r - 0.418688 * g - 0.081312 * b),
            ),
        };

        (
            y.round().clamp(0.0, 255.0) as u8,
            u.round().clamp(0.0, 255.0) as u8,
            v.round().clamp(0.0, 255.0) as u8,
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Clamp a value to the 0-255 range
#[inline]
fn clamp_u8(val: i32) -> u8 {
    val.clamp(0, 255) as u8
}

/// Convert a single Y/U/V sample triple to RGB
///
/// Rounds to nearest in fixed point, then clamps each channel.
#[inline]
pub fn yuv_to_rgb(y: u8, u: u8, v: u8, range: ColorRange) -> Rgb {
    let c = range.coefficients();
    let y = (i32::from(y) - c.y_offset) * c.y;
    let u = i32::from(u) - 128;
    let v = i32::from(v) - 128;

    let r = (y + c.r_v * v + FIXED_HALF) >> FIXED_SHIFT;
    let g = (y - c.g_u * u - c.g_v * v + FIXED_HALF) >> FIXED_SHIFT;
    let b = (y + c.b_u * u + FIXED_HALF) >> FIXED_SHIFT;

    Rgb::new(clamp_u8(r), clamp_u8(g), clamp_u8(b))
}

/// Size in bytes of an I420 frame with the given dimensions
///
/// # Errors
/// Returns `ConversionError::InvalidDimensions` if either dimension is zero
/// or odd, or the size does not fit in `usize`.
pub fn i420_frame_size(width: u32, height: u32) -> Result<usize, ConversionError> {
    if width == 0 || height == 0 || width % 2 != 0 || height % 2 != 0 {
        return Err(ConversionError::InvalidDimensions(format!(
            "{}x{} must be positive and even",
            width, height
        )));
    }

    let y_size = (width as usize).checked_mul(height as usize);
    y_size
        .and_then(|y| y.checked_add(y / 2))
        .ok_or_else(|| {
            ConversionError::InvalidDimensions(format!("{}x{} is too large", width, height))
        })
}

/// Borrowed view over an I420 frame with validated dimensions
#[derive(Debug, Clone, Copy)]
pub struct I420Frame<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    y_size: usize,
    uv_size: usize,
}

impl<'a> I420Frame<'a> {
    /// Wrap raw I420 bytes
    ///
    /// # Errors
    /// Returns `ConversionError::InvalidDimensions` if the dimensions are not
    /// positive and even, or `data` is not exactly
    /// `width*height + 2*(width/2)*(height/2)` bytes long.
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Result<Self, ConversionError> {
        let expected_size = i420_frame_size(width, height)?;
        if data.len() != expected_size {
            return Err(ConversionError::InvalidDimensions(format!(
                "I420 data is {} bytes, expected {} bytes for {}x{}",
                data.len(),
                expected_size,
                width,
                height
            )));
        }

        let y_size = width as usize * height as usize;
        Ok(Self {
            data,
            width,
            height,
            y_size,
            uv_size: y_size / 4,
        })
    }

    /// Frame width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total frame size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: a validated frame holds at least one 2x2 block
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Luma plane
    pub fn y_plane(&self) -> &'a [u8] {
        &self.data[..self.y_size]
    }

    /// Blue-difference chroma plane
    pub fn u_plane(&self) -> &'a [u8] {
        &self.data[self.y_size..self.y_size + self.uv_size]
    }

    /// Red-difference chroma plane
    pub fn v_plane(&self) -> &'a [u8] {
        &self.data[self.y_size + self.uv_size..]
    }

    /// Raw Y/U/V samples for the pixel at (x, y)
    ///
    /// # Panics
    /// Panics if `x >= width` or `y >= height`.
    pub fn yuv_at(&self, x: u32, y: u32) -> (u8, u8, u8) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) outside {}x{} frame",
            x,
            y,
            self.width,
            self.height
        );
        let y_idx = y as usize * self.width as usize + x as usize;
        let uv_idx = (y / 2) as usize * (self.width / 2) as usize + (x / 2) as usize;
        (
            self.data[y_idx],
            self.data[self.y_size + uv_idx],
            self.data[self.y_size + self.uv_size + uv_idx],
        )
    }

    /// RGB color of the pixel at (x, y)
    ///
    /// # Panics
    /// Panics if `x >= width` or `y >= height`.
    pub fn rgb_at(&self, x: u32, y: u32, range: ColorRange) -> Rgb {
        let (y_val, u, v) = self.yuv_at(x, y);
        yuv_to_rgb(y_val, u, v, range)
    }

    /// Size in bytes of the packed RGB24 image for this frame
    pub fn rgb_len(&self) -> usize {
        self.y_size * 3
    }

    /// Convert the whole frame into `out` as packed RGB24
    ///
    /// # Errors
    /// Returns `ConversionError::InvalidDimensions` if `out` is not exactly
    /// `width * height * 3` bytes. Nothing is written in that case.
    pub fn write_rgb(&self, range: ColorRange, out: &mut [u8]) -> Result<(), ConversionError> {
        if out.len() != self.rgb_len() {
            return Err(ConversionError::InvalidDimensions(format!(
                "RGB buffer is {} bytes, expected {} bytes for {}x{}",
                out.len(),
                self.rgb_len(),
                self.width,
                self.height
            )));
        }

        let width = self.width as usize;
        let uv_width = width / 2;
        let y_plane = self.y_plane();
        let u_plane = self.u_plane();
        let v_plane = self.v_plane();

        for (row, rgb_row) in out.chunks_exact_mut(width * 3).enumerate() {
            let y_row = &y_plane[row * width..(row + 1) * width];
            let uv_row_start = (row / 2) * uv_width;
            let u_row = &u_plane[uv_row_start..uv_row_start + uv_width];
            let v_row = &v_plane[uv_row_start..uv_row_start + uv_width];

            for (col, pixel) in rgb_row.chunks_exact_mut(3).enumerate() {
                let rgb = yuv_to_rgb(y_row[col], u_row[col / 2], v_row[col / 2], range);
                pixel[0] = rgb.r;
                pixel[1] = rgb.g;
                pixel[2] = rgb.b;
            }
        }

        log::trace!(
            "I420 conversion: {}x{}, {:?} range, {} bytes -> RGB {} bytes",
            self.width,
            self.height,
            range,
            self.data.len(),
            out.len()
        );

        Ok(())
    }
}

/// Convert I420 (planar YUV420) frame to RGB using the default (limited) range
///
/// # Arguments
///
/// * `yuv_data` - Raw I420 planar data
/// * `width` - Frame width in pixels
/// * `height` - Frame height in pixels
///
/// # Returns
///
/// RGB24 data (3 bytes per pixel, R-G-B order)
///
/// # Errors
/// Returns `ConversionError::InvalidDimensions` if the dimensions are odd or
/// zero, or the input length does not match them.
pub fn convert_i420_to_rgb(
    yuv_data: &[u8],
    width: u32,
    height: u32,
) -> Result<Vec<u8>, ConversionError> {
    convert_i420_to_rgb_with_range(yuv_data, width, height, ColorRange::default())
}

/// Convert I420 frame to RGB with an explicit sample range
///
/// # Errors
/// Returns `ConversionError::InvalidDimensions` if the dimensions are odd or
/// zero, or the input length does not match them.
pub fn convert_i420_to_rgb_with_range(
    yuv_data: &[u8],
    width: u32,
    height: u32,
    range: ColorRange,
) -> Result<Vec<u8>, ConversionError> {
    let frame = I420Frame::new(yuv_data, width, height).inspect_err(|e| {
        log::warn!("Rejected I420 frame: {}", e);
    })?;

    let mut rgb_buffer = vec![0u8; frame.rgb_len()];
    frame.write_rgb(range, &mut rgb_buffer)?;
    Ok(rgb_buffer)
}

/// Convert I420 frame into a caller-owned RGB24 buffer
///
/// `out` must be exactly `width * height * 3` bytes. All validation happens
/// before the first byte is written.
///
/// # Errors
/// Returns `ConversionError::InvalidDimensions` if the dimensions are odd or
/// zero, or either buffer length does not match them.
pub fn convert_i420_to_rgb_into(
    yuv_data: &[u8],
    width: u32,
    height: u32,
    range: ColorRange,
    out: &mut [u8],
) -> Result<(), ConversionError> {
    let frame = I420Frame::new(yuv_data, width, height).inspect_err(|e| {
        log::warn!("Rejected I420 frame: {}", e);
    })?;
    frame.write_rgb(range, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test I420 frame
    ///
    /// Y increases left-to-right and U/V are neutral (128), giving a
    /// grayscale gradient.
    fn create_test_i420_frame(width: u32, height: u32) -> Vec<u8> {
        let y_size = (width * height) as usize;
        let uv_size = y_size / 4;
        let mut data = vec![128u8; y_size + uv_size * 2];

        for row in 0..height {
            for col in 0..width {
                let idx = (row * width + col) as usize;
                data[idx] = ((col * 255) / width) as u8;
            }
        }

        data
    }

    /// Create an I420 frame with every sample set to the given triple
    fn create_uniform_i420_frame(width: u32, height: u32, y: u8, u: u8, v: u8) -> Vec<u8> {
        let y_size = (width * height) as usize;
        let uv_size = y_size / 4;
        let mut data = vec![y; y_size];
        data.extend(std::iter::repeat(u).take(uv_size));
        data.extend(std::iter::repeat(v).take(uv_size));
        data
    }

    #[test]
    fn test_i420_basic() {
        let width = 4u32;
        let height = 4u32;
        let yuv_data = create_test_i420_frame(width, height);

        let result = convert_i420_to_rgb(&yuv_data, width, height);
        assert!(result.is_ok(), "I420 conversion should succeed");

        let rgb = result.unwrap();
        assert_eq!(rgb.len(), (width * height * 3) as usize);
    }

    #[test]
    fn test_i420_rejects_too_small_data() {
        let width = 640u32;
        let height = 480u32;
        let yuv_data = vec![0u8; 100];

        let result = convert_i420_to_rgb(&yuv_data, width, height);
        assert!(result.is_err(), "Should reject data that is too small");

        let err = result.unwrap_err();
        assert!(matches!(err, ConversionError::InvalidDimensions(_)));
        assert!(err.to_string().starts_with("InvalidDimensions: "));
    }

    #[test]
    fn test_i420_rejects_oversized_data() {
        let mut yuv_data = create_test_i420_frame(4, 4);
        yuv_data.push(0);

        let result = convert_i420_to_rgb(&yuv_data, 4, 4);
        assert!(
            result.is_err(),
            "Trailing bytes mean the dimensions are wrong"
        );
    }

    #[test]
    fn test_i420_rejects_odd_and_zero_dimensions() {
        let data = vec![128u8; 64];
        for (width, height) in [(3, 4), (4, 3), (0, 4), (4, 0), (0, 0)] {
            let err = convert_i420_to_rgb(&data, width, height).unwrap_err();
            assert!(
                err.to_string().contains("positive and even"),
                "{}x{} should be rejected, got: {}",
                width,
                height,
                err
            );
        }
    }

    #[test]
    fn test_frame_size_overflow_is_rejected() {
        // The luma product fits in 64 bits, adding the chroma planes does not
        let result = i420_frame_size(u32::MAX - 1, u32::MAX - 1);
        assert!(result.is_err(), "Oversized frame should be rejected");
        assert!(result.unwrap_err().to_string().ends_with("is too large"));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_frame_size_large_but_representable() {
        assert_eq!(i420_frame_size(65536, 65536), Ok(6_442_450_944));
    }

    #[test]
    fn test_reference_white_limited_range() {
        let data = create_uniform_i420_frame(4, 4, 235, 128, 128);
        let rgb = convert_i420_to_rgb(&data, 4, 4).unwrap();

        for pixel in rgb.chunks_exact(3) {
            for &channel in pixel {
                assert!(channel >= 253, "White should convert to ~255, got {}", channel);
            }
        }
    }

    #[test]
    fn test_reference_black_limited_range() {
        let data = create_uniform_i420_frame(4, 4, 16, 128, 128);
        let rgb = convert_i420_to_rgb(&data, 4, 4).unwrap();
        assert!(rgb.iter().all(|&c| c <= 2), "Black should convert to ~0");
    }

    #[test]
    fn test_golden_vectors() {
        // Pinned outputs of the fixed-point transform (round, then clamp)
        let cases = [
            ((235, 128, 128), ColorRange::Limited, Rgb::new(255, 255, 255)),
            ((16, 128, 128), ColorRange::Limited, Rgb::new(0, 0, 0)),
            ((128, 128, 128), ColorRange::Limited, Rgb::new(130, 130, 130)),
            ((81, 90, 240), ColorRange::Limited, Rgb::new(254, 0, 0)),
            ((235, 128, 128), ColorRange::Full, Rgb::new(235, 235, 235)),
            ((128, 128, 128), ColorRange::Full, Rgb::new(128, 128, 128)),
            ((100, 128, 200), ColorRange::Full, Rgb::new(201, 49, 100)),
            ((100, 200, 128), ColorRange::Full, Rgb::new(100, 75, 228)),
        ];

        for ((y, u, v), range, expected) in cases {
            assert_eq!(
                yuv_to_rgb(y, u, v, range),
                expected,
                "YUV({}, {}, {}) in {:?} range",
                y,
                u,
                v,
                range
            );
        }
    }

    #[test]
    fn test_rounding_does_not_truncate() {
        // 100 - 1.402 = 98.598 and 100 + 0.714136 = 100.714 round up to 99 / 101
        let rgb = yuv_to_rgb(100, 128, 127, ColorRange::Full);
        assert_eq!(rgb.r, 99);
        assert_eq!(rgb.g, 101);
        assert_eq!(rgb.b, 100);
    }

    #[test]
    fn test_chroma_is_shared_by_2x2_block() {
        // 4x2 frame: Y all 128, left block blue-ish, right block red-ish
        let mut data = vec![128u8; 8];
        data.extend_from_slice(&[200, 128]); // U
        data.extend_from_slice(&[128, 200]); // V

        let rgb = convert_i420_to_rgb_with_range(&data, 4, 2, ColorRange::Full).unwrap();
        let pixel = |x: usize, y: usize| {
            let i = (y * 4 + x) * 3;
            Rgb::new(rgb[i], rgb[i + 1], rgb[i + 2])
        };

        assert_eq!(pixel(0, 0), pixel(1, 1), "Left 2x2 block shares chroma");
        assert_eq!(pixel(2, 0), pixel(3, 1), "Right 2x2 block shares chroma");
        assert!(pixel(0, 0).b > pixel(0, 0).r, "Left block should be blue-ish");
        assert!(pixel(2, 0).r > pixel(2, 0).b, "Right block should be red-ish");
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let data: Vec<u8> = (0..96u32).map(|i| (i * 37 % 256) as u8).collect();
        let first = convert_i420_to_rgb(&data, 8, 8).unwrap();
        let second = convert_i420_to_rgb(&data, 8, 8).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_into_matches_owned_output() {
        let data = create_test_i420_frame(8, 4);
        let owned = convert_i420_to_rgb(&data, 8, 4).unwrap();

        let mut out = vec![0u8; 8 * 4 * 3];
        convert_i420_to_rgb_into(&data, 8, 4, ColorRange::Limited, &mut out).unwrap();
        assert_eq!(owned, out);
    }

    #[test]
    fn test_into_rejects_wrong_output_size_without_writing() {
        let data = create_test_i420_frame(4, 4);
        let mut out = vec![7u8; 4 * 4 * 3 - 1];

        let result = convert_i420_to_rgb_into(&data, 4, 4, ColorRange::Limited, &mut out);
        assert!(result.is_err());
        assert!(out.iter().all(|&b| b == 7), "Output must stay untouched");
    }

    #[test]
    fn test_into_rejects_bad_input_without_writing() {
        let data = vec![0u8; 10];
        let mut out = vec![7u8; 4 * 4 * 3];

        let result = convert_i420_to_rgb_into(&data, 4, 4, ColorRange::Limited, &mut out);
        assert!(result.is_err());
        assert!(out.iter().all(|&b| b == 7), "Output must stay untouched");
    }

    #[test]
    fn test_frame_planes() {
        let data = create_uniform_i420_frame(4, 2, 1, 2, 3);
        let frame = I420Frame::new(&data, 4, 2).unwrap();

        assert_eq!(frame.y_plane(), &[1; 8]);
        assert_eq!(frame.u_plane(), &[2; 2]);
        assert_eq!(frame.v_plane(), &[3; 2]);
        assert_eq!(frame.yuv_at(3, 1), (1, 2, 3));
        assert_eq!(frame.len(), 12);
        assert!(!frame.is_empty());
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_yuv_at_out_of_bounds_panics() {
        let data = create_uniform_i420_frame(4, 2, 1, 2, 3);
        let frame = I420Frame::new(&data, 4, 2).unwrap();
        frame.yuv_at(4, 0);
    }

    /// Grayscale input must produce neutral colors
    #[test]
    fn test_grayscale_conversion_produces_neutral_colors() {
        let data = create_test_i420_frame(16, 4);
        let rgb = convert_i420_to_rgb(&data, 16, 4).unwrap();

        for pixel in rgb.chunks_exact(3) {
            assert!(
                pixel[0] == pixel[1] && pixel[1] == pixel[2],
                "Grayscale pixel should have equal R, G, B values: {:?}",
                pixel
            );
        }
    }

    #[test]
    fn test_rgb_to_yuv_round_trips_primaries() {
        for range in [ColorRange::Limited, ColorRange::Full] {
            for color in [
                Rgb::RED,
                Rgb::GREEN,
                Rgb::BLUE,
                Rgb::WHITE,
                Rgb::BLACK,
                Rgb::YELLOW,
                Rgb::PURPLE,
            ] {
                let (y, u, v) = color.to_yuv(range);
                let back = yuv_to_rgb(y, u, v, range);
                assert!(
                    back.max_channel_diff(&color) <= 4,
                    "{} in {:?} range came back as {}",
                    color,
                    range,
                    back
                );
            }
        }
    }

    #[test]
    fn test_rgb_display_and_distance() {
        assert_eq!(Rgb::new(255, 8, 171).to_string(), "#FF08AB");
        assert_eq!(Rgb::BLACK.distance(&Rgb::new(3, 4, 0)), 5);
        assert_eq!(Rgb::BLACK.distance(&Rgb::WHITE), 441);
        assert_eq!(Rgb::new(10, 20, 30).max_channel_diff(&Rgb::new(15, 5, 31)), 15);
    }

    #[test]
    fn test_color_range_from_env_str() {
        assert_eq!(ColorRange::from_env_str("limited"), ColorRange::Limited);
        assert_eq!(ColorRange::from_env_str("FULL"), ColorRange::Full);
        assert_eq!(ColorRange::from_env_str("pc"), ColorRange::Full);
        assert_eq!(ColorRange::from_env_str("bogus"), ColorRange::Limited);
        assert_eq!(ColorRange::default(), ColorRange::Limited);
    }
}
