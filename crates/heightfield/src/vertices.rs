//! Position and color buffers derived from a [`PixelField`].

use crate::error::{HeightfieldError, Result};
use crate::pixels::{expected_samples, Channel, PixelField, SAMPLES_PER_PIXEL};

/// Scale applied to a normalized sample to get its elevation.
pub const HEIGHT_SCALE: f32 = 255.0;

/// Maps one channel of `samples` to grid positions.
///
/// Vertex `i` sits at grid cell `(x, y) = (i % width, i / width)` and becomes
/// `(x - width/2, sample * 255, -(y - height/2))`: the image lies in the XZ
/// plane centered on the origin, with image rows running toward `-z`.
pub fn build_vertices(
    width: u32,
    height: u32,
    samples: &[f32],
    channel: Channel,
) -> Result<Vec<[f32; 3]>> {
    let expected = expected_samples(width, height)?;
    if samples.len() as u64 != expected {
        return Err(HeightfieldError::SampleCountMismatch {
            expected,
            actual: samples.len() as u64,
        });
    }

    let half_w = width as f32 / 2.0;
    let half_h = height as f32 / 2.0;
    let offset = channel.offset();

    let mut positions = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        let z = -(y as f32 - half_h);
        let row = y as usize * width as usize;
        for x in 0..width {
            let sample = samples[(row + x as usize) * SAMPLES_PER_PIXEL + offset];
            positions.push([x as f32 - half_w, sample * HEIGHT_SCALE, z]);
        }
    }

    log::debug!(
        "built {} positions from the {} channel ({}x{})",
        positions.len(),
        channel,
        width,
        height
    );

    Ok(positions)
}

/// Convenience wrapper over [`build_vertices`] for a whole field.
pub fn field_vertices(field: &PixelField, channel: Channel) -> Result<Vec<[f32; 3]>> {
    build_vertices(field.width(), field.height(), field.samples(), channel)
}

/// Reshapes flat RGBA samples into one color per vertex, unchanged.
///
/// A trailing partial pixel is rejected rather than dropped.
pub fn build_colors(samples: &[f32]) -> Result<Vec<[f32; 4]>> {
    if samples.len() % SAMPLES_PER_PIXEL != 0 {
        let whole = samples.len() / SAMPLES_PER_PIXEL;
        return Err(HeightfieldError::SampleCountMismatch {
            expected: ((whole + 1) * SAMPLES_PER_PIXEL) as u64,
            actual: samples.len() as u64,
        });
    }

    Ok(samples
        .chunks_exact(SAMPLES_PER_PIXEL)
        .map(|px| [px[0], px[1], px[2], px[3]])
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2x2 image, row-major, RGBA.
    const SAMPLES: [f32; 16] = [
        0.0, 0.5, 1.0, 1.0, // (0,0)
        1.0, 0.25, 0.0, 1.0, // (1,0)
        0.5, 0.0, 0.75, 1.0, // (0,1)
        0.25, 1.0, 0.5, 0.0, // (1,1)
    ];

    #[test]
    fn positions_match_hand_computed_values() {
        let red = build_vertices(2, 2, &SAMPLES, Channel::Red).unwrap();
        assert_eq!(
            red,
            vec![
                [-1.0, 0.0, 1.0],
                [0.0, 255.0, 1.0],
                [-1.0, 127.5, 0.0],
                [0.0, 63.75, 0.0],
            ]
        );

        let blue = build_vertices(2, 2, &SAMPLES, Channel::Blue).unwrap();
        let heights: Vec<f32> = blue.iter().map(|p| p[1]).collect();
        assert_eq!(heights, vec![255.0, 0.0, 191.25, 127.5]);
    }

    #[test]
    fn odd_dimensions_use_fractional_centering() {
        let samples = vec![0.0; 12];
        let pos = build_vertices(3, 1, &samples, Channel::Green).unwrap();
        assert_eq!(pos, vec![[-1.5, 0.0, 0.5], [-0.5, 0.0, 0.5], [0.5, 0.0, 0.5]]);
    }

    #[test]
    fn alpha_channel_is_a_valid_offset() {
        let pos = build_vertices(2, 2, &SAMPLES, Channel::Alpha).unwrap();
        assert_eq!(pos[3][1], 0.0);
        assert_eq!(pos[0][1], 255.0);
    }

    #[test]
    fn sample_length_is_validated() {
        assert!(matches!(
            build_vertices(2, 2, &SAMPLES[..12], Channel::Red),
            Err(HeightfieldError::SampleCountMismatch { expected: 16, actual: 12 })
        ));
        assert!(matches!(
            build_vertices(0, 2, &[], Channel::Red),
            Err(HeightfieldError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn colors_are_copied_through() {
        let colors = build_colors(&SAMPLES).unwrap();
        assert_eq!(colors.len(), 4);
        assert_eq!(colors[2], [0.5, 0.0, 0.75, 1.0]);
        assert!(build_colors(&SAMPLES[..6]).is_err());
    }
}
