//! Frame content classification for UI backdrop decisions
//!
//! Classifies an I420 frame without converting the whole image:
//! - **Dominant color**: samples a fixed lattice of pixels and decides whether
//!   the frame is effectively one solid color
//! - **Color grid**: decodes a text message painted into the frame as a
//!   4-color cell grid (see [`crate::color_grid`])
//!
//! Configurable via `FRAME_COLOR_*` environment variables or JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::classification::{self, ClassificationResult};
use crate::color_grid::{ColorGridDecoder, GridDecodeError};
use crate::yuv_conversion::{ColorRange, ConversionError, I420Frame, Rgb};

/// Default samples per axis
const DEFAULT_SAMPLE_GRID: u32 = 8;
/// Largest accepted samples per axis (bounds the work per frame)
const MAX_SAMPLE_GRID: u32 = 64;
/// Default per-channel tolerance around the reference color
const DEFAULT_TOLERANCE: u8 = 16;
/// Default share of samples that must match for a solid verdict
const DEFAULT_MIN_COVERAGE: f32 = 0.9;

/// What a classification call looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationMode {
    /// Solid color detection
    #[default]
    DominantColor,
    /// Color grid message decoding
    ColorGrid,
}

impl ClassificationMode {
    /// Parse from environment variable string
    pub fn from_env_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dominant" | "dominant_color" | "color" => Self::DominantColor,
            "grid" | "color_grid" | "message" => Self::ColorGrid,
            _ => {
                log::warn!(
                    "Unknown classification mode '{}', defaulting to 'dominant'",
                    s
                );
                Self::DominantColor
            }
        }
    }
}

/// Classifier settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// What to look for
    pub mode: ClassificationMode,
    /// Sample range of incoming frames
    pub range: ColorRange,
    /// Samples per axis for dominant color detection (1-64)
    pub sample_grid: u32,
    /// Largest per-channel difference from the reference that still matches
    pub tolerance: u8,
    /// Share of samples (0.0-1.0) that must match for a solid verdict
    pub min_coverage: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            mode: ClassificationMode::default(),
            range: ColorRange::default(),
            sample_grid: DEFAULT_SAMPLE_GRID,
            tolerance: DEFAULT_TOLERANCE,
            min_coverage: DEFAULT_MIN_COVERAGE,
        }
    }
}

impl ClassifierConfig {
    /// Load settings from `FRAME_COLOR_*` environment variables
    ///
    /// Unset variables keep their defaults; unparsable ones log a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(mode) = lookup("FRAME_COLOR_MODE") {
            config.mode = ClassificationMode::from_env_str(&mode);
        }
        if let Some(range) = lookup("FRAME_COLOR_RANGE") {
            config.range = ColorRange::from_env_str(&range);
        }
        if let Some(grid) = lookup("FRAME_COLOR_SAMPLE_GRID") {
            match grid.trim().parse() {
                Ok(grid) => config.sample_grid = grid,
                Err(_) => log::warn!(
                    "Invalid sample grid '{}', using {}",
                    grid,
                    config.sample_grid
                ),
            }
        }
        if let Some(tolerance) = lookup("FRAME_COLOR_TOLERANCE") {
            match tolerance.trim().parse() {
                Ok(tolerance) => config.tolerance = tolerance,
                Err(_) => log::warn!(
                    "Invalid tolerance '{}', using {}",
                    tolerance,
                    config.tolerance
                ),
            }
        }
        if let Some(coverage) = lookup("FRAME_COLOR_MIN_COVERAGE") {
            match coverage.trim().parse() {
                Ok(coverage) => config.min_coverage = coverage,
                Err(_) => log::warn!(
                    "Invalid minimum coverage '{}', using {}",
                    coverage,
                    config.min_coverage
                ),
            }
        }

        config.sanitized()
    }

    /// Parse settings from a JSON object; missing fields keep their defaults
    ///
    /// # Errors
    /// Returns the `serde_json` error if the JSON is malformed or a field has
    /// the wrong type.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Clamp out-of-range values into their accepted ranges
    fn sanitized(mut self) -> Self {
        let grid = self.sample_grid.clamp(1, MAX_SAMPLE_GRID);
        if grid != self.sample_grid {
            log::warn!(
                "Sample grid {} out of range, clamped to {}",
                self.sample_grid,
                grid
            );
            self.sample_grid = grid;
        }

        if !(0.0..=1.0).contains(&self.min_coverage) {
            let coverage = if self.min_coverage.is_nan() {
                DEFAULT_MIN_COVERAGE
            } else {
                self.min_coverage.clamp(0.0, 1.0)
            };
            log::warn!(
                "Minimum coverage {} out of range, using {}",
                self.min_coverage,
                coverage
            );
            self.min_coverage = coverage;
        }

        self
    }
}

/// Detected frame content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameContent {
    /// Frame is effectively one color
    SolidColor(Rgb),
    /// No single color dominates
    Mixed,
}

impl fmt::Display for FrameContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SolidColor(color) => write!(f, "solid color {}", color),
            Self::Mixed => write!(f, "mixed content"),
        }
    }
}

/// Per-frame sample statistics behind a dominant color verdict
#[derive(Debug, Clone, PartialEq)]
pub struct SampleStats {
    /// Number of pixels sampled
    pub samples: usize,
    /// Samples within tolerance of the reference color
    pub inliers: usize,
    /// Per-channel median of all samples
    pub reference: Rgb,
    /// Rounded mean of the inlier samples
    pub mean: Rgb,
}

impl SampleStats {
    /// Share of samples that matched the reference
    pub fn coverage(&self) -> f32 {
        if self.samples == 0 {
            return 0.0;
        }
        self.inliers as f32 / self.samples as f32
    }
}

/// Stateless frame classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClassifier {
    config: ClassifierConfig,
}

impl FrameClassifier {
    /// Create a classifier with the given settings
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config: config.sanitized(),
        }
    }

    /// Create a classifier configured from the environment
    pub fn from_env() -> Self {
        Self::new(ClassifierConfig::from_env())
    }

    /// Active settings
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify a raw I420 frame
    ///
    /// Always returns a well-formed result: invalid input, protocol errors and
    /// internal faults all become `Failure` values.
    pub fn classify(&self, yuv_data: &[u8], width: u32, height: u32) -> ClassificationResult {
        let result = classification::guard("frame classification", || match self.config.mode {
            ClassificationMode::DominantColor => {
                ClassificationResult::from_outcome(self.detect(yuv_data, width, height))
            }
            ClassificationMode::ColorGrid => {
                let outcome = I420Frame::new(yuv_data, width, height)
                    .map_err(GridDecodeError::from)
                    .and_then(|frame| ColorGridDecoder::new(self.config.range).decode(&frame))
                    .map(|message| message.body);
                ClassificationResult::from_outcome(outcome)
            }
        });

        log::debug!(
            "Classified {}x{} frame ({:?}): {}",
            width,
            height,
            self.config.mode,
            result
        );
        result
    }

    /// Detect the dominant color of a raw I420 frame
    ///
    /// # Errors
    /// Returns `ConversionError::InvalidDimensions` if the dimensions are odd
    /// or zero, or the buffer length does not match them.
    pub fn detect(
        &self,
        yuv_data: &[u8],
        width: u32,
        height: u32,
    ) -> Result<FrameContent, ConversionError> {
        let frame = I420Frame::new(yuv_data, width, height)?;
        Ok(self.detect_frame(&frame))
    }

    /// Detect the dominant color of a validated frame
    pub fn detect_frame(&self, frame: &I420Frame<'_>) -> FrameContent {
        let stats = self.sample_stats(frame);
        if stats.inliers > 0 && stats.coverage() >= self.config.min_coverage {
            FrameContent::SolidColor(stats.mean)
        } else {
            FrameContent::Mixed
        }
    }

    /// Sample the frame and compute match statistics
    pub fn sample_stats(&self, frame: &I420Frame<'_>) -> SampleStats {
        let samples = self.sample(frame);
        let reference = channel_median(&samples);
        let tolerance = self.config.tolerance;

        let mut inliers = 0usize;
        let mut sums = [0u32; 3];
        for color in samples
            .iter()
            .filter(|color| color.max_channel_diff(&reference) <= tolerance)
        {
            inliers += 1;
            sums[0] += u32::from(color.r);
            sums[1] += u32::from(color.g);
            sums[2] += u32::from(color.b);
        }

        let mean = if inliers == 0 {
            reference
        } else {
            let n = inliers as u32;
            let avg = |sum: u32| ((sum + n / 2) / n) as u8;
            Rgb::new(avg(sums[0]), avg(sums[1]), avg(sums[2]))
        };

        SampleStats {
            samples: samples.len(),
            inliers,
            reference,
            mean,
        }
    }

    /// Colors at the centers of a `grid x grid` lattice
    ///
    /// The lattice never exceeds the frame size, so tiny frames are sampled
    /// pixel by pixel.
    fn sample(&self, frame: &I420Frame<'_>) -> Vec<Rgb> {
        let cols = self.config.sample_grid.min(frame.width());
        let rows = self.config.sample_grid.min(frame.height());

        let mut samples = Vec::with_capacity((cols * rows) as usize);
        for row in 0..rows {
            let y = lattice_coord(row, rows, frame.height());
            for col in 0..cols {
                let x = lattice_coord(col, cols, frame.width());
                samples.push(frame.rgb_at(x, y, self.config.range));
            }
        }
        samples
    }
}

/// Center of cell `index` when `extent` pixels are split into `count` cells
fn lattice_coord(index: u32, count: u32, extent: u32) -> u32 {
    ((u64::from(2 * index + 1) * u64::from(extent)) / u64::from(2 * count)) as u32
}

/// Per-channel median of a color set (lower median for even counts)
fn channel_median(samples: &[Rgb]) -> Rgb {
    if samples.is_empty() {
        return Rgb::BLACK;
    }

    let mut histograms = [[0u32; 256]; 3];
    for color in samples {
        histograms[0][color.r as usize] += 1;
        histograms[1][color.g as usize] += 1;
        histograms[2][color.b as usize] += 1;
    }

    let target = (samples.len() as u32).div_ceil(2);
    let median = |histogram: &[u32; 256]| {
        let mut seen = 0u32;
        for (value, &count) in histogram.iter().enumerate() {
            seen += count;
            if seen >= target {
                return value as u8;
            }
        }
        u8::MAX
    };

    Rgb::new(
        median(&histograms[0]),
        median(&histograms[1]),
        median(&histograms[2]),
    )
}

/// Classify a raw I420 frame with default settings
pub fn classify(yuv_data: &[u8], width: u32, height: u32) -> ClassificationResult {
    FrameClassifier::default().classify(yuv_data, width, height)
}
