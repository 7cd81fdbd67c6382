//! `frame-color` - Frame color classification for live video playback
//!
//! Converts decoded I420 frames to RGB and classifies their content so a UI
//! can react to what is on screen (tint a backdrop to a solid frame color,
//! or read a message painted into the video as a color grid).
//!
//! Every classification entry point is synchronous, stateless and safe to
//! call from any thread. Invalid input and internal faults are reported in
//! the returned [`ClassificationResult`], never by panicking.

pub mod classification;
pub mod color_grid;
pub mod frame_classifier;
#[doc(hidden)]
pub mod test_utils;
pub mod yuv_conversion;

pub use classification::{ClassificationResult, ProcessingFault};
pub use color_grid::{parse_from_yuv, ColorGridDecoder, GridDecodeError, GridMessage};
pub use frame_classifier::{
    classify, ClassificationMode, ClassifierConfig, FrameClassifier, FrameContent,
};
pub use yuv_conversion::{
    convert_i420_to_rgb, convert_i420_to_rgb_into, convert_i420_to_rgb_with_range, ColorRange,
    ConversionError, I420Frame, Rgb,
};

/// Initialize logging for the host platform
///
/// Uses logcat on Android and `env_logger` (filter from `RUST_LOG`, default
/// `info`) elsewhere. Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    #[cfg(target_os = "android")]
    {
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(log::LevelFilter::Debug)
                .with_tag("FrameColor"),
        );
    }

    #[cfg(not(target_os = "android"))]
    {
        if env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init()
            .is_err()
        {
            log::debug!("Logger already initialized");
        }
    }

    log::info!("frame-color {} ready", env!("CARGO_PKG_VERSION"));
}
