use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame, RgbImage};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::AssembleError;

/// Frame duration used when the caller does not pick one.
pub const DEFAULT_FRAME_DURATION_MS: u32 = 500;

/// Extensions offered by the image picker and accepted by [`is_image_file`].
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tiff", "tif"];

pub const GIF_EXTENSION: &str = "gif";

/// GIF stores frame delays in hundredths of a second.
pub const GIF_DELAY_RESOLUTION_MS: u32 = 10;

// NeuQuant sampling factor, 1 (best, slowest) to 30 (fastest)
const ENCODER_SPEED: i32 = 10;

/// What was written by a successful [`FrameAssembler::assemble`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GifSummary {
    pub path: PathBuf,
    pub frame_count: usize,
    pub frame_duration_ms: u32,
    pub bytes_written: u64,
}

/// Turns an ordered list of still images into one animated GIF.
///
/// Every frame is shown for the same duration and the animation always
/// loops forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameAssembler {
    frame_duration_ms: u32,
}

impl Default for FrameAssembler {
    fn default() -> Self {
        Self {
            frame_duration_ms: DEFAULT_FRAME_DURATION_MS,
        }
    }
}

impl FrameAssembler {
    pub fn with_frame_duration(mut self, frame_duration_ms: u32) -> Self {
        self.frame_duration_ms = frame_duration_ms;
        self
    }

    pub fn frame_duration_ms(&self) -> u32 {
        self.frame_duration_ms
    }

    /// Decodes `frames` in order, normalizes them to RGB and writes the
    /// animation to `output`, replacing any existing file.
    ///
    /// Fails on the first unreadable frame. Nothing is written unless every
    /// frame decoded and the encoder succeeded.
    pub fn assemble(&self, frames: &[PathBuf], output: &Path) -> Result<GifSummary, AssembleError> {
        if frames.is_empty() {
            return Err(AssembleError::InvalidInput("no frames supplied".to_string()));
        }
        check_frame_duration(self.frame_duration_ms)?;
        check_output_directory(output)?;

        let total_frames = frames.len();
        let results: Vec<Result<RgbImage, AssembleError>> = frames
            .par_iter()
            .enumerate()
            .map(|(i, path)| -> Result<RgbImage, AssembleError> {
                let rgb = decode_frame(path)?;
                debug!(
                    "Decoded frame {}/{}: {} ({}x{})",
                    i + 1,
                    total_frames,
                    path.display(),
                    rgb.width(),
                    rgb.height()
                );
                Ok(rgb)
            })
            .collect();

        // Report the first failure in list order
        let decoded = results.into_iter().collect::<Result<Vec<_>, _>>()?;

        let bytes = encode_frames(decoded, self.frame_duration_ms)?;
        write_output(output, &bytes)?;

        info!("GIF saved as {}", output.display());
        Ok(GifSummary {
            path: output.to_path_buf(),
            frame_count: total_frames,
            frame_duration_ms: self.frame_duration_ms,
            bytes_written: bytes.len() as u64,
        })
    }
}

/// Shorthand for `FrameAssembler::default().with_frame_duration(..).assemble(..)`.
pub fn assemble_gif(
    frames: &[PathBuf],
    output: &Path,
    frame_duration_ms: u32,
) -> Result<GifSummary, AssembleError> {
    FrameAssembler::default()
        .with_frame_duration(frame_duration_ms)
        .assemble(frames, output)
}

/// Opens one frame and converts it to 8-bit RGB.
pub fn decode_frame(path: &Path) -> Result<RgbImage, AssembleError> {
    let img = image::open(path).map_err(|source| AssembleError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(normalize_frame(img))
}

/// Brings any decoded image to full-colour RGB so every frame handed to the
/// encoder shares one pixel format. Alpha is discarded.
pub fn normalize_frame(img: DynamicImage) -> RgbImage {
    // Rgb8 buffers are moved out as-is
    img.into_rgb8()
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

fn check_frame_duration(frame_duration_ms: u32) -> Result<(), AssembleError> {
    if frame_duration_ms < GIF_DELAY_RESOLUTION_MS {
        return Err(AssembleError::InvalidInput(format!(
            "frame duration must be at least {} ms, got {} ms",
            GIF_DELAY_RESOLUTION_MS, frame_duration_ms
        )));
    }
    if frame_duration_ms % GIF_DELAY_RESOLUTION_MS != 0 {
        return Err(AssembleError::InvalidInput(format!(
            "frame duration must be a multiple of {} ms, got {} ms",
            GIF_DELAY_RESOLUTION_MS, frame_duration_ms
        )));
    }
    Ok(())
}

fn check_output_directory(output: &Path) -> Result<(), AssembleError> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if dir.is_dir() {
        Ok(())
    } else {
        Err(AssembleError::io(
            dir,
            io::Error::new(io::ErrorKind::NotFound, "output directory does not exist"),
        ))
    }
}

fn encode_frames(frames: Vec<RgbImage>, frame_duration_ms: u32) -> Result<Vec<u8>, AssembleError> {
    let delay = Delay::from_numer_denom_ms(frame_duration_ms, 1);
    let mut bytes = Vec::new();
    {
        // The trailer is written when the encoder is dropped
        let mut encoder = GifEncoder::new_with_speed(&mut bytes, ENCODER_SPEED);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(AssembleError::Encode)?;
        encoder
            .encode_frames(frames.into_iter().map(|rgb| {
                let rgba = DynamicImage::ImageRgb8(rgb).into_rgba8();
                Frame::from_parts(rgba, 0, 0, delay)
            }))
            .map_err(AssembleError::Encode)?;
    }
    Ok(bytes)
}

fn write_output(output: &Path, bytes: &[u8]) -> Result<(), AssembleError> {
    if let Err(err) = fs::write(output, bytes) {
        if output.is_file() {
            if let Err(remove_err) = fs::remove_file(output) {
                warn!(
                    "Could not remove partial output {}: {}",
                    output.display(),
                    remove_err
                );
            }
        }
        return Err(AssembleError::io(output, err));
    }
    Ok(())
}
