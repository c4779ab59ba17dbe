/// Sampler — maps a time value to an interpolated keyframe value.
///
/// Owns the keyframe times, the index-aligned values, and a
/// [`KeyframeIndex`] over the times. Immutable after construction.

use glam::{Quat, Vec3, Vec4};
use crate::error::Galaxy3dResult;
use crate::{engine_err, engine_warn};
use super::keyframe_index::KeyframeIndex;

/// How values between two keyframes are computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Component-wise blend weighted by position between the two keyframes
    #[default]
    Linear,
    /// Value of the temporally closest keyframe (ties go to the later one)
    Step,
    /// Accepted as input, but NOT evaluated as a spline: sampling falls back
    /// to the `Step` rule. Tangent data is not stored.
    CubicSpline,
}

impl Interpolation {
    /// True for modes that are evaluated with a simpler rule than their name says
    pub fn is_fallback(&self) -> bool {
        matches!(self, Interpolation::CubicSpline)
    }
}

/// How times outside `[start_time, end_time]` are mapped back into range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatMode {
    /// Hold the first/last value
    #[default]
    Clamp,
    /// Wrap around, anchored at the first keyframe time
    Repeat,
    /// Play forward, then backward, with a period of `end_time`
    Mirror,
}

/// Values a [`Sampler`] can blend.
pub trait Interpolate: Copy {
    /// Blend from `self` (weight 0) to `other` (weight 1)
    fn interpolate(&self, other: &Self, weight: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, weight: f32) -> Self {
        self + (other - self) * weight
    }
}

impl Interpolate for Vec3 {
    fn interpolate(&self, other: &Self, weight: f32) -> Self {
        self.lerp(*other, weight)
    }
}

impl Interpolate for Vec4 {
    fn interpolate(&self, other: &Self, weight: f32) -> Self {
        self.lerp(*other, weight)
    }
}

impl Interpolate for Quat {
    /// Component-wise blend along the shorter arc, renormalized
    fn interpolate(&self, other: &Self, weight: f32) -> Self {
        self.lerp(*other, weight)
    }
}

/// Keyframe sampler.
///
/// ```ignore
/// let sampler = Sampler::new(vec![0.0, 1.0, 2.0], vec![0.0, 10.0, 0.0],
///     Interpolation::Linear, RepeatMode::Clamp)?;
/// assert_eq!(sampler.value_at(0.5), 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct Sampler<T> {
    times: Vec<f32>,
    values: Vec<T>,
    interpolation: Interpolation,
    repeat: RepeatMode,
    index: KeyframeIndex<f32, usize>,
}

impl<T: Interpolate> Sampler<T> {
    /// Create a sampler from index-aligned times and values.
    ///
    /// # Errors
    ///
    /// `Galaxy3dError::InvalidKeyframes` if the arrays are empty, differ in length,
    /// or if `times` is not strictly ascending.
    pub fn new(
        times: Vec<f32>,
        values: Vec<T>,
        interpolation: Interpolation,
        repeat: RepeatMode,
    ) -> Galaxy3dResult<Self> {
        if times.is_empty() {
            return Err(engine_err!("galaxy3d::Sampler",
                InvalidKeyframes => "Sampler requires at least one keyframe"));
        }
        if times.len() != values.len() {
            return Err(engine_err!("galaxy3d::Sampler",
                InvalidKeyframes => "{} keyframe times but {} values", times.len(), values.len()));
        }
        if let Some(pos) = times.windows(2).position(|w| !(w[0] < w[1])) {
            return Err(engine_err!("galaxy3d::Sampler",
                InvalidKeyframes => "Keyframe times not strictly ascending at index {} ({} then {})",
                pos + 1, times[pos], times[pos + 1]));
        }

        if interpolation.is_fallback() {
            engine_warn!("galaxy3d::Sampler",
                "Cubic spline interpolation is not supported, sampling {} keyframes with nearest-keyframe rule",
                times.len());
        }

        let entries: Vec<(f32, usize)> = times.iter().copied().zip(0..).collect();
        let index = KeyframeIndex::new(&entries)?;

        Ok(Self {
            times,
            values,
            interpolation,
            repeat,
            index,
        })
    }

    /// Sample the animated value at time `t`.
    ///
    /// A single keyframe is returned as is, without any time remapping.
    pub fn value_at(&self, t: f32) -> T {
        if self.times.len() == 1 {
            return self.values[0];
        }

        let t = self.remap_time(t);
        let (low, high) = self.index.query(t);
        let (v0, v1) = (&self.values[low.value], &self.values[high.value]);

        match self.interpolation {
            Interpolation::Linear => {
                let span = high.key - low.key;
                if span <= 0.0 {
                    return *v0;
                }
                v0.interpolate(v1, (t - low.key) / span)
            }
            Interpolation::Step | Interpolation::CubicSpline => {
                if t - low.key < high.key - t { *v0 } else { *v1 }
            }
        }
    }
}

impl<T> Sampler<T> {
    /// Map `t` into the keyframe range according to the repeat mode
    pub fn remap_time(&self, t: f32) -> f32 {
        let start = self.start_time();
        let end = self.end_time();

        match self.repeat {
            RepeatMode::Clamp => t.clamp(start, end),
            RepeatMode::Repeat => start + (t - start).rem_euclid(end - start),
            RepeatMode::Mirror => {
                // Back-and-forth with period `end`, counted from time zero
                let periods = (t / end).floor();
                let local = t - periods * end;
                if periods.rem_euclid(2.0) == 1.0 {
                    end - local
                } else {
                    local
                }
            }
        }
    }

    pub fn times(&self) -> &[f32] {
        &self.times
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// Time of the first keyframe
    pub fn start_time(&self) -> f32 {
        self.times[0]
    }

    /// Time of the last keyframe
    pub fn end_time(&self) -> f32 {
        self.times[self.times.len() - 1]
    }

    pub fn duration(&self) -> f32 {
        self.end_time() - self.start_time()
    }

    pub fn keyframe_count(&self) -> usize {
        self.times.len()
    }
}

#[cfg(test)]
#[path = "sampler_tests.rs"]
mod tests;
