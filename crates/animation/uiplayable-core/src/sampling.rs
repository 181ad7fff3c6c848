//! Track sampling.
//!
//! Keypoints carry normalized stamps in [0,1]. Values are linearly interpolated between
//! neighbouring keypoints and held constant before the first and after the last one.

use crate::clip::{Keypoint, Track};

/// Find the segment [i, i+1] that contains normalized time u, and return (i, i+1, local_t).
/// Outside the keyed range both indices point at the nearest end keypoint.
fn find_segment(points: &[Keypoint], u: f32) -> (usize, usize, f32) {
    let n = points.len();
    if n == 1 || u <= points[0].stamp {
        return (0, 0, 0.0);
    }
    if u >= points[n - 1].stamp {
        return (n - 1, n - 1, 0.0);
    }
    // First keypoint strictly after u; stamps are non-decreasing.
    let hi = points.partition_point(|p| p.stamp <= u);
    let lo = hi - 1;
    let denom = (points[hi].stamp - points[lo].stamp).max(f32::EPSILON);
    let lt = (u - points[lo].stamp) / denom;
    (lo, hi, lt.clamp(0.0, 1.0))
}

/// Sample a single track at normalized time u ∈ [0,1].
/// Returns `None` for a track without keypoints. A non-finite `u` samples the first keypoint.
pub fn sample_track(track: &Track, u: f32) -> Option<f32> {
    let points = &track.points;
    if points.is_empty() {
        return None;
    }
    if !u.is_finite() {
        return Some(points[0].value);
    }
    let (i0, i1, lt) = find_segment(points, u.clamp(0.0, 1.0));
    let a = points[i0].value;
    let b = points[i1].value;
    Some(a + (b - a) * lt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) {
        assert!((a - b).abs() <= 1e-5, "left={a} right={b}");
    }

    #[test]
    fn empty_track_samples_nothing() {
        assert_eq!(sample_track(&Track::new("x", &[]), 0.5), None);
    }

    #[test]
    fn interpolates_linearly_between_keys() {
        let track = Track::new("x", &[(0.0, 0.0), (0.5, 10.0), (1.0, 0.0)]);
        approx(sample_track(&track, 0.25).unwrap(), 5.0);
        approx(sample_track(&track, 0.5).unwrap(), 10.0);
        approx(sample_track(&track, 0.75).unwrap(), 5.0);
    }

    #[test]
    fn holds_ends_outside_keyed_range() {
        let track = Track::new("x", &[(0.2, 1.0), (0.8, 3.0)]);
        approx(sample_track(&track, 0.0).unwrap(), 1.0);
        approx(sample_track(&track, 1.0).unwrap(), 3.0);
        approx(sample_track(&track, 7.0).unwrap(), 3.0);
    }

    #[test]
    fn non_finite_time_samples_first_key() {
        let track = Track::new("x", &[(0.0, 2.0), (1.0, 4.0)]);
        approx(sample_track(&track, f32::NAN).unwrap(), 2.0);
        approx(sample_track(&track, f32::INFINITY).unwrap(), 2.0);
        approx(sample_track(&track, f32::NEG_INFINITY).unwrap(), 2.0);
    }
}
