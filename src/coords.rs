//! Reconstruction of Cartesian coordinates from dump coordinates.
use glam::{DVec3, IVec3};

/// How the coordinate columns of a dump are to be interpreted.
///
/// A run has exactly one mode. LAMMPS writes fractional coordinates for the `xs ys zs` columns
/// and real coordinates for `x y z`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CoordinateMode {
    /// Fractional coordinates, nominally in `[0, 1]`.
    #[default]
    Scaled,
    /// Coordinates already in box units.
    Absolute,
}

/// Map a fractional coordinate and its image offset onto the real axis spanned by `lo..hi`.
#[inline]
pub fn real(scaled: f64, image: i32, lo: f64, hi: f64) -> f64 {
    lo + (hi - lo) * (scaled + image as f64)
}

/// Express a real coordinate as a fraction of the `lo..hi` axis.
///
/// This is the inverse of [`real`] with a zero image offset.
#[inline]
pub fn to_scaled(x: f64, lo: f64, hi: f64) -> f64 {
    (x - lo) / (hi - lo)
}

impl CoordinateMode {
    /// Reconstruct a single real coordinate according to this mode.
    #[inline]
    pub fn real(self, value: f64, image: i32, lo: f64, hi: f64) -> f64 {
        let scaled = match self {
            CoordinateMode::Scaled => value,
            CoordinateMode::Absolute => to_scaled(value, lo, hi),
        };
        real(scaled, image, lo, hi)
    }
}

/// The orthogonal simulation box of a single frame.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SimulationBox {
    pub lo: DVec3,
    pub hi: DVec3,
}

impl SimulationBox {
    pub fn new(lo: DVec3, hi: DVec3) -> Self {
        Self { lo, hi }
    }

    /// Reconstruct a Cartesian position from dump coordinates and image offsets.
    pub fn position(&self, mode: CoordinateMode, coords: DVec3, image: IVec3) -> DVec3 {
        DVec3::new(
            mode.real(coords.x, image.x, self.lo.x, self.hi.x),
            mode.real(coords.y, image.y, self.lo.y, self.hi.y),
            mode.real(coords.z, image.z, self.lo.z, self.hi.z),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * f64::max(1.0, a.abs().max(b.abs()))
    }

    #[test]
    fn scaled_to_real() {
        assert_eq!(real(0.0, 0, 0.0, 10.0), 0.0);
        assert_eq!(real(1.0, 0, 0.0, 10.0), 10.0);
        assert!(close(real(0.1, 0, 0.0, 10.0), 1.0));
        assert!(close(real(0.25, 0, -4.0, 4.0), -2.0));
    }

    #[test]
    fn image_offsets_shift_by_box_length() {
        let (lo, hi) = (-2.5, 7.5);
        for image in -3..=3 {
            let shifted = real(0.3, image, lo, hi);
            let base = real(0.3, 0, lo, hi);
            assert!(close(shifted - base, image as f64 * (hi - lo)));
        }
    }

    #[test]
    fn monotonic_in_scaled() {
        let (lo, hi) = (-13.7, 42.1);
        let mut previous = f64::NEG_INFINITY;
        for step in -100..=200 {
            let scaled = step as f64 / 100.0;
            let value = real(scaled, 0, lo, hi);
            assert!(value > previous, "real must increase with scaled ({scaled})");
            previous = value;
        }
    }

    #[test]
    fn absolute_mode_recovers_input() {
        let (lo, hi) = (-3.0, 17.0);
        for step in 0..=40 {
            let x = lo + step as f64 * 0.5;
            assert!(close(CoordinateMode::Absolute.real(x, 0, lo, hi), x));
            assert!(close(real(to_scaled(x, lo, hi), 0, lo, hi), x));
        }
    }

    #[test]
    fn absolute_mode_applies_images() {
        let mode = CoordinateMode::Absolute;
        assert!(close(mode.real(2.0, 1, 0.0, 10.0), 12.0));
        assert!(close(mode.real(2.0, -2, 0.0, 10.0), -18.0));
    }

    #[test]
    fn box_positions() {
        let boxvec = SimulationBox::new(DVec3::ZERO, DVec3::new(10.0, 20.0, 40.0));
        let pos = boxvec.position(
            CoordinateMode::Scaled,
            DVec3::new(0.5, 0.5, 0.25),
            IVec3::new(0, 1, 0),
        );
        assert!(close(pos.x, 5.0));
        assert!(close(pos.y, 30.0));
        assert!(close(pos.z, 10.0));
    }
}
