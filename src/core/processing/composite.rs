//! Three-band RGBA compositing.
//!
//! Each band is capped at `nan_max(band) * gamma`, reoriented to ascending
//! storage, passed through the logistic curve and cast to bytes. Alpha comes
//! from the blue band only: a NaN blue sample makes the pixel transparent,
//! whatever red and green hold. The output carries the red band's `x` ticks
//! and its `y` ticks reversed.
use ndarray::Array2;
use tracing::debug;

use crate::core::band::Band;
use crate::core::params::CompositeParams;
use crate::core::processing::normalize::{nan_max, normalize, quantize_u8};
use crate::core::processing::orient::orient_array;
use crate::error::{Error, Result};
use crate::types::{Axis, Channel};

/// 8-bit RGBA image keyed by `x` and (reversed) `y` ticks
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeImage {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub r: Array2<u8>,
    pub g: Array2<u8>,
    pub b: Array2<u8>,
    pub a: Array2<u8>,
}

impl CompositeImage {
    pub fn width(&self) -> usize {
        self.r.ncols()
    }

    pub fn height(&self) -> usize {
        self.r.nrows()
    }

    pub fn channel(&self, channel: Channel) -> &Array2<u8> {
        match channel {
            Channel::R => &self.r,
            Channel::G => &self.g,
            Channel::B => &self.b,
            Channel::A => &self.a,
        }
    }

    pub fn pixel(&self, row: usize, col: usize) -> [u8; 4] {
        [
            self.r[[row, col]],
            self.g[[row, col]],
            self.b[[row, col]],
            self.a[[row, col]],
        ]
    }

    /// Row-major interleaved RGBA bytes
    pub fn to_rgba_interleaved(&self) -> Vec<u8> {
        let mut rgba = vec![0u8; self.width() * self.height() * 4];
        for (offset, channel) in Channel::ALL.into_iter().enumerate() {
            for (dst, &src) in rgba[offset..]
                .iter_mut()
                .step_by(4)
                .zip(self.channel(channel).iter())
            {
                *dst = src;
            }
        }
        rgba
    }

    /// Number of pixels with alpha 0
    pub fn transparent_count(&self) -> usize {
        self.a.iter().filter(|&&v| v == 0).count()
    }
}

fn check_shape(name: &str, band: &Band, expected: (usize, usize)) -> Result<()> {
    if band.dim() != expected {
        return Err(Error::ShapeMismatch {
            band: name.to_string(),
            expected,
            got: band.dim(),
        });
    }
    Ok(())
}

fn check_alignment(name: &str, band: &Band, reference: &Band) -> Result<()> {
    for axis in [Axis::X, Axis::Y] {
        if band.coords(axis) != reference.coords(axis) {
            return Err(Error::MisalignedCoordinates {
                band: name.to_string(),
                axis,
            });
        }
    }
    Ok(())
}

pub fn combine_bands(r: &Band, g: &Band, b: &Band, params: &CompositeParams) -> Result<CompositeImage> {
    let shape = r.dim();
    check_shape("green", g, shape)?;
    check_shape("blue", b, shape)?;
    if params.strict_alignment {
        check_alignment("green", g, r)?;
        check_alignment("blue", b, r)?;
    }

    let rmax = nan_max(r.data()) * params.gamma;
    let gmax = nan_max(g.data()) * params.gamma;
    let bmax = nan_max(b.data()) * params.gamma;
    debug!(
        "combine_bands: {}x{} rmax={} gmax={} bmax={} gamma={}",
        shape.1, shape.0, rmax, gmax, bmax, params.gamma
    );

    let xs = r.x().to_vec();
    let ys: Vec<f64> = r.y().iter().rev().copied().collect();

    // Orientation follows each band's own ticks; they match the red band's when aligned.
    let [r_arr, g_arr, b_arr] = [r, g, b].map(|band| orient_array(band.data(), band.x(), band.y()));

    let a = b_arr.mapv(|v| if v.is_nan() { 0u8 } else { 255u8 });
    let norm = &params.normalize;
    let r8 = quantize_u8(&normalize(&r_arr, rmax, norm));
    let g8 = quantize_u8(&normalize(&g_arr, gmax, norm));
    let b8 = quantize_u8(&normalize(&b_arr, bmax, norm));

    Ok(CompositeImage {
        x: xs,
        y: ys,
        r: r8,
        g: g8,
        b: b8,
        a,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn band(data: Array2<f64>) -> Band {
        Band::new(data, vec![0.0, 1.0], vec![0.0, 1.0]).unwrap()
    }

    fn scenario() -> (Band, Band, Band) {
        (
            band(array![[0.0, 10.0], [20.0, 30.0]]),
            band(array![[0.0, 5.0], [10.0, 15.0]]),
            band(array![[0.0, 2.0], [4.0, f64::NAN]]),
        )
    }

    #[test]
    fn reference_scenario() {
        let (r, g, b) = scenario();
        let img = combine_bands(&r, &g, &b, &CompositeParams::default()).unwrap();

        assert_eq!(img.a, array![[255u8, 255], [255, 0]]);
        // 255 / (1 + e^2.75) = 15.32 for every zero sample
        assert_eq!(img.r, array![[15u8, 254], [254, 254]]);
        assert_eq!(img.g, array![[15u8, 254], [254, 254]]);
        assert_eq!(img.b, array![[15u8, 254], [254, 0]]);
    }

    #[test]
    fn y_reversed_x_kept() {
        let data = Array2::from_elem((3, 2), 1.0);
        let r = Band::new(data, vec![5.0, 6.0], vec![1.0, 2.0, 3.0]).unwrap();
        let img = combine_bands(&r, &r, &r, &CompositeParams::default()).unwrap();
        assert_eq!(img.x, vec![5.0, 6.0]);
        assert_eq!(img.y, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn alpha_ignores_red_and_green_nans() {
        let r = band(array![[f64::NAN, 1.0], [1.0, 1.0]]);
        let g = band(array![[1.0, f64::NAN], [1.0, 1.0]]);
        let b = band(array![[1.0, 1.0], [1.0, 1.0]]);
        let img = combine_bands(&r, &g, &b, &CompositeParams::default()).unwrap();
        assert_eq!(img.a, array![[255u8, 255], [255, 255]]);
        assert_eq!(img.r[[0, 0]], 0);
        assert_eq!(img.g[[0, 1]], 0);
        assert_eq!(img.transparent_count(), 0);
    }

    #[test]
    fn deterministic() {
        let (r, g, b) = scenario();
        let p = CompositeParams::default();
        let first = combine_bands(&r, &g, &b, &p).unwrap();
        let second = combine_bands(&r, &g, &b, &p).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_rgba_interleaved(), second.to_rgba_interleaved());
    }

    #[test]
    fn shape_mismatch_is_an_error() {
        let (r, g, _) = scenario();
        let b = Band::from_pixels(Array2::zeros((3, 2)));
        match combine_bands(&r, &g, &b, &CompositeParams::default()) {
            Err(Error::ShapeMismatch { band, expected, got }) => {
                assert_eq!(band, "blue");
                assert_eq!(expected, (2, 2));
                assert_eq!(got, (3, 2));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn strict_alignment_rejects_shifted_grid() {
        let (r, g, b) = scenario();
        let shifted = Band::new(b.data().clone(), vec![0.5, 1.5], vec![0.0, 1.0]).unwrap();

        let lenient = CompositeParams::default();
        assert!(combine_bands(&r, &g, &shifted, &lenient).is_ok());

        let strict = CompositeParams {
            strict_alignment: true,
            ..lenient
        };
        assert!(matches!(
            combine_bands(&r, &g, &shifted, &strict),
            Err(Error::MisalignedCoordinates { axis: Axis::X, .. })
        ));
        assert!(combine_bands(&r, &g, &b, &strict).is_ok());
    }

    #[test]
    fn descending_y_is_stored_ascending() {
        let data = array![[30.0], [0.0]];
        let r = Band::new(data, vec![0.0], vec![1.0, 0.0]).unwrap();
        let img = combine_bands(&r, &r, &r, &CompositeParams::default()).unwrap();
        // Row 0 now holds the y=0 sample
        assert_eq!(img.r[[0, 0]], 15);
        assert_eq!(img.r[[1, 0]], 254);
        assert_eq!(img.y, vec![0.0, 1.0]);
    }

    #[test]
    fn interleaved_layout() {
        let (r, g, b) = scenario();
        let img = combine_bands(&r, &g, &b, &CompositeParams::default()).unwrap();
        let rgba = img.to_rgba_interleaved();
        assert_eq!(rgba.len(), 16);
        assert_eq!(&rgba[12..16], &img.pixel(1, 1));
        assert_eq!(img.pixel(1, 1), [254, 254, 0, 0]);
        assert_eq!(img.channel(Channel::A), &img.a);
    }

    #[test]
    fn interleaved_follows_channel_order() {
        let img = CompositeImage {
            x: vec![0.0, 1.0, 2.0],
            y: vec![1.0, 0.0],
            r: ndarray::array![[1u8, 2, 3], [4, 5, 6]],
            g: ndarray::array![[10u8, 20, 30], [40, 50, 60]],
            b: ndarray::array![[11u8, 21, 31], [41, 51, 61]],
            a: ndarray::array![[255u8, 0, 255], [0, 255, 0]],
        };
        let rgba = img.to_rgba_interleaved();
        assert_eq!(rgba.len(), 24);
        for row in 0..2 {
            for col in 0..3 {
                let base = (row * 3 + col) * 4;
                for (offset, channel) in Channel::ALL.into_iter().enumerate() {
                    assert_eq!(rgba[base + offset], img.channel(channel)[[row, col]]);
                }
            }
        }
        assert_eq!(&rgba[4..8], &[2, 20, 21, 0]);
    }
}
