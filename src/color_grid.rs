//! Color grid message decoding
//!
//! Some streams carry a short text message painted into the video itself.
//! The frame is tiled into 4x4-pixel cells, row-major, and every cell is
//! filled with one of four palette colors, each worth 2 bits. Four cells make
//! one byte, most significant bits first.
//!
//! # Message Layout
//!
//! ```text
//! [magic: 4 bytes "amed"][version: 4][body len: 4][checksum: 4][body: len bytes]
//! ```
//!
//! Integer fields are big-endian signed 32-bit values spread over 16 cells.
//! The checksum is the sum of the body bytes taken as signed 8-bit values.
//!
//! Decoding is lossy-tolerant: each cell is voted on by the 90% of its pixels
//! that best match a palette entry, so compression noise along cell edges
//! does not flip bits.

use thiserror::Error;

use crate::classification::{self, ClassificationResult};
use crate::yuv_conversion::{ColorRange, ConversionError, I420Frame, Rgb};

/// Magic bytes opening every message
pub const GRID_MAGIC: [u8; 4] = *b"amed";

/// Edge length of a grid cell in pixels
pub const CELL_SIZE: u32 = 4;

/// Size of each header field in bytes
pub const FIELD_BYTES: usize = 4;

/// Bits carried by one cell
pub const BITS_PER_CELL: u32 = 2;

/// Cells needed for one byte
pub const CELLS_PER_BYTE: usize = (u8::BITS / BITS_PER_CELL) as usize;

/// Cells taken by the four header fields
pub const HEADER_CELLS: usize = 4 * FIELD_BYTES * CELLS_PER_BYTE;

const PIXELS_PER_CELL: usize = (CELL_SIZE * CELL_SIZE) as usize;

/// Share of a cell's best-matching pixels that count towards its score
const CELL_VOTE_PERCENT: usize = 90;

/// Four-entry palette; the discriminant is the 2-bit value a cell carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PaletteColor {
    /// `0b00`, (0, 0, 0)
    Black = 0b00,
    /// `0b01`, (128, 0, 128)
    Purple = 0b01,
    /// `0b10`, (255, 255, 0)
    Yellow = 0b10,
    /// `0b11`, (255, 255, 255)
    White = 0b11,
}

impl PaletteColor {
    /// All palette entries in code order
    pub const ALL: [PaletteColor; 4] = [Self::Black, Self::Purple, Self::Yellow, Self::White];

    /// 2-bit code of this entry
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Palette entry for the low 2 bits of `bits`
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Self::Black,
            0b01 => Self::Purple,
            0b10 => Self::Yellow,
            _ => Self::White,
        }
    }

    /// Reference color of this entry
    pub fn rgb(self) -> Rgb {
        match self {
            Self::Black => Rgb::BLACK,
            Self::Purple => Rgb::PURPLE,
            Self::Yellow => Rgb::YELLOW,
            Self::White => Rgb::WHITE,
        }
    }
}

/// Split a byte into cells, most significant bits first
pub fn byte_to_cells(byte: u8) -> [PaletteColor; CELLS_PER_BYTE] {
    std::array::from_fn(|i| {
        let shift = (CELLS_PER_BYTE - 1 - i) as u32 * BITS_PER_CELL;
        PaletteColor::from_bits(byte >> shift)
    })
}

/// Split a 32-bit header field into cells, most significant bits first
pub fn i32_to_cells(value: i32) -> [PaletteColor; FIELD_BYTES * CELLS_PER_BYTE] {
    let bits = value as u32;
    std::array::from_fn(|i| {
        let shift = (FIELD_BYTES * CELLS_PER_BYTE - 1 - i) as u32 * BITS_PER_CELL;
        PaletteColor::from_bits((bits >> shift) as u8)
    })
}

/// Join cells back into bytes; a trailing partial byte is dropped
pub fn cells_to_bytes(cells: &[PaletteColor]) -> Vec<u8> {
    cells
        .chunks_exact(CELLS_PER_BYTE)
        .map(|chunk| {
            chunk
                .iter()
                .fold(0u8, |acc, cell| (acc << BITS_PER_CELL) | cell.bits())
        })
        .collect()
}

/// Join 16 cells back into a 32-bit header field
pub fn cells_to_i32(cells: &[PaletteColor]) -> i32 {
    cells
        .iter()
        .fold(0u32, |acc, cell| (acc << BITS_PER_CELL) | u32::from(cell.bits())) as i32
}

/// Checksum of a message body: sum of bytes as signed 8-bit values
pub fn body_checksum(body: &[u8]) -> i32 {
    body.iter()
        .fold(0i32, |acc, &b| acc.wrapping_add(i32::from(b as i8)))
}

/// A decoded grid message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMessage {
    /// Protocol version from the header (always positive)
    pub version: i32,
    /// Message body text
    pub body: String,
}

/// Errors that can occur while decoding a grid message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridDecodeError {
    /// Frame dimensions or buffer length are invalid.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Frame has fewer cells than the message needs.
    #[error("frame too small: {needed} grid cells required, {available} available")]
    FrameTooSmall {
        /// Cells required up to the end of the field being read.
        needed: usize,
        /// Cells the frame holds.
        available: usize,
    },

    /// Frame does not start with the message magic.
    #[error("invalid magic: {0}")]
    InvalidMagic(String),

    /// Version field is zero or negative.
    #[error("invalid version: {0}")]
    InvalidVersion(i32),

    /// Body length is negative or larger than the frame could hold.
    #[error("invalid body len: {len}")]
    InvalidBodyLength {
        /// Length read from the header.
        len: i32,
        /// Largest plausible length for this frame.
        max: usize,
    },

    /// Body does not sum to the header checksum.
    #[error("checksum not equal, expect:{expected}, actual: {actual}")]
    ChecksumMismatch {
        /// Checksum read from the header.
        expected: i32,
        /// Checksum computed over the body.
        actual: i32,
    },

    /// Body bytes are not valid UTF-8.
    #[error("invalid body encoding: {0}")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),
}

/// Decodes grid messages from I420 frames
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorGridDecoder {
    range: ColorRange,
}

impl ColorGridDecoder {
    /// Create a decoder for frames with the given sample range
    pub fn new(range: ColorRange) -> Self {
        Self { range }
    }

    /// Number of whole cells in a frame
    pub fn cell_capacity(frame: &I420Frame<'_>) -> usize {
        (frame.width() / CELL_SIZE) as usize * (frame.height() / CELL_SIZE) as usize
    }

    /// Decode the message carried by `frame`
    ///
    /// # Errors
    /// Returns a `GridDecodeError` describing the first header or body check
    /// that failed.
    pub fn decode(&self, frame: &I420Frame<'_>) -> Result<GridMessage, GridDecodeError> {
        let mut reader = CellReader::new(self, frame);

        let magic = cells_to_bytes(&reader.read(FIELD_BYTES * CELLS_PER_BYTE)?);
        if magic != GRID_MAGIC {
            return Err(GridDecodeError::InvalidMagic(
                String::from_utf8_lossy(&magic).into_owned(),
            ));
        }

        let version = cells_to_i32(&reader.read(FIELD_BYTES * CELLS_PER_BYTE)?);
        if version <= 0 {
            return Err(GridDecodeError::InvalidVersion(version));
        }

        let body_len = cells_to_i32(&reader.read(FIELD_BYTES * CELLS_PER_BYTE)?);
        let max_body_len = frame.len() / 3 / CELLS_PER_BYTE;
        let body_len = usize::try_from(body_len)
            .ok()
            .filter(|&len| len <= max_body_len)
            .ok_or(GridDecodeError::InvalidBodyLength {
                len: body_len,
                max: max_body_len,
            })?;

        let expected = cells_to_i32(&reader.read(FIELD_BYTES * CELLS_PER_BYTE)?);

        let body = cells_to_bytes(&reader.read(body_len * CELLS_PER_BYTE)?);
        let actual = body_checksum(&body);
        if actual != expected {
            return Err(GridDecodeError::ChecksumMismatch { expected, actual });
        }

        let body = String::from_utf8(body)?;
        log::debug!(
            "Decoded color grid message: version={}, {} bytes",
            version,
            body.len()
        );
        Ok(GridMessage { version, body })
    }

    /// Palette entry that best matches the cell at `index`
    ///
    /// # Panics
    /// Panics if `index` is not below [`ColorGridDecoder::cell_capacity`].
    pub fn decode_cell(&self, frame: &I420Frame<'_>, index: usize) -> PaletteColor {
        let cells_per_row = (frame.width() / CELL_SIZE) as usize;
        let x0 = (index % cells_per_row) as u32 * CELL_SIZE;
        let y0 = (index / cells_per_row) as u32 * CELL_SIZE;

        let pixels: [Rgb; PIXELS_PER_CELL] = std::array::from_fn(|i| {
            let dx = i as u32 % CELL_SIZE;
            let dy = i as u32 / CELL_SIZE;
            frame.rgb_at(x0 + dx, y0 + dy, self.range)
        });

        let voters = (PIXELS_PER_CELL * CELL_VOTE_PERCENT).div_ceil(100);
        let mut best = PaletteColor::Black;
        let mut best_score = u32::MAX;
        for color in PaletteColor::ALL {
            let target = color.rgb();
            let mut scores = pixels.map(|pixel| pixel.distance(&target));
            scores.sort_unstable();
            let score: u32 = scores[..voters].iter().sum();
            // Strict comparison keeps the lower code on ties
            if score < best_score {
                best = color;
                best_score = score;
            }
        }
        best
    }
}

/// Sequential cell cursor over a frame
struct CellReader<'d, 'f> {
    decoder: &'d ColorGridDecoder,
    frame: &'f I420Frame<'f>,
    capacity: usize,
    next: usize,
}

impl<'d, 'f> CellReader<'d, 'f> {
    fn new(decoder: &'d ColorGridDecoder, frame: &'f I420Frame<'f>) -> Self {
        Self {
            decoder,
            frame,
            capacity: ColorGridDecoder::cell_capacity(frame),
            next: 0,
        }
    }

    fn read(&mut self, count: usize) -> Result<Vec<PaletteColor>, GridDecodeError> {
        let end = self.next + count;
        if end > self.capacity {
            return Err(GridDecodeError::FrameTooSmall {
                needed: end,
                available: self.capacity,
            });
        }

        let cells = (self.next..end)
            .map(|index| self.decoder.decode_cell(self.frame, index))
            .collect();
        self.next = end;
        Ok(cells)
    }
}

/// Decode the grid message in a raw I420 buffer
///
/// Uses the default (limited) sample range. The message body becomes the
/// result content; any validation or protocol error becomes the result's
/// error message.
pub fn parse_from_yuv(yuv_data: &[u8], width: u32, height: u32) -> ClassificationResult {
    let decoder = ColorGridDecoder::default();
    classification::guard("color grid decoding", || {
        let outcome = I420Frame::new(yuv_data, width, height)
            .map_err(GridDecodeError::from)
            .and_then(|frame| decoder.decode(&frame))
            .map(|message| message.body);
        ClassificationResult::from_outcome(outcome)
    })
}
