use std::cmp::Ordering;

use crate::error::{Error, Result};

pub const DEFAULT_DISTANCE: usize = 1500;
pub const DEFAULT_PROMINENCE: f64 = 20.0;

/// Peak calling parameters
///
/// distance - minimum spacing (in positions) between reported peaks
/// prominence - minimum drop in depth required on both sides of a peak
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakParams {
    distance: usize,
    prominence: f64,
}

impl PeakParams {
    pub fn new(distance: usize, prominence: f64) -> Result<Self> {
        if distance == 0 {
            Err(Error::Config("peak distance must be at least 1".to_owned()))
        } else if prominence.is_nan() || prominence < 0.0 {
            Err(Error::Config(format!(
                "peak prominence must be non-negative (got {})",
                prominence
            )))
        } else {
            Ok(Self {
                distance,
                prominence,
            })
        }
    }

    pub fn distance(&self) -> usize {
        self.distance
    }

    pub fn prominence(&self) -> f64 {
        self.prominence
    }
}

impl Default for PeakParams {
    fn default() -> Self {
        Self {
            distance: DEFAULT_DISTANCE,
            prominence: DEFAULT_PROMINENCE,
        }
    }
}

/// Find all local maxima in `x`
///
/// A sample is a maximum if its left neighbour is strictly lower and the flat
/// run it starts is followed by a strictly lower sample.  For plateaus the
/// middle sample is reported (the left one of the two middle samples if the
/// width is even).  The first and last samples can not be maxima.
pub fn local_maxima(x: &[f64]) -> Vec<usize> {
    let mut v = Vec::new();
    if x.len() < 3 {
        return v;
    }
    let last = x.len() - 1;
    let mut i = 1;
    while i < last {
        if x[i - 1] < x[i] {
            // Find end of plateau (if any)
            let mut j = i + 1;
            while j < last && x[j] == x[i] {
                j += 1;
            }
            if x[j] < x[i] {
                v.push((i + j - 1) >> 1);
                i = j;
                continue;
            }
        }
        i += 1;
    }
    v
}

/// Thin out `peaks` (sorted ascending) so that no two remaining peaks lie
/// closer than `distance`.  Peaks are considered in order of decreasing height
/// (leftmost first on ties); each retained peak removes its lower neighbours.
pub fn select_by_distance(x: &[f64], peaks: &[usize], distance: usize) -> Vec<usize> {
    let n = peaks.len();
    if distance <= 1 || n < 2 {
        return peaks.to_vec();
    }
    let mut keep = vec![true; n];
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|a, b| {
        x[peaks[*b]]
            .partial_cmp(&x[peaks[*a]])
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(b))
    });

    for &j in order.iter() {
        if !keep[j] {
            continue;
        }
        let pj = peaks[j];
        // Remove lower peaks to the left and right
        for k in (0..j).rev() {
            if pj - peaks[k] >= distance {
                break;
            }
            keep[k] = false;
        }
        for k in j + 1..n {
            if peaks[k] - pj >= distance {
                break;
            }
            keep[k] = false;
        }
    }
    peaks
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| if k { Some(*p) } else { None })
        .collect()
}

/// Prominence of the peak at `peak`
///
/// The search extends to each side until a strictly higher sample (or the end
/// of the data) is met.  The lowest point on each side gives a base and the
/// prominence is the height of the peak above the higher of the two bases.
pub fn prominence(x: &[f64], peak: usize) -> f64 {
    let h = x[peak];
    let mut left_min = h;
    for &z in x[..peak].iter().rev() {
        if z > h {
            break;
        }
        left_min = left_min.min(z);
    }
    let mut right_min = h;
    for &z in x[peak + 1..].iter() {
        if z > h {
            break;
        }
        right_min = right_min.min(z);
    }
    h - left_min.max(right_min)
}

/// Find peaks in depth data
///
/// Local maxima are first thinned out by distance, and the survivors
/// filtered by prominence.  Returned positions are zero-based and
/// strictly increasing.
pub fn find_peaks(x: &[f64], params: &PeakParams) -> Vec<usize> {
    let cand = local_maxima(x);
    trace!("{} local maxima found", cand.len());
    let cand = select_by_distance(x, &cand, params.distance());
    trace!(
        "{} local maxima remaining after distance filter",
        cand.len()
    );
    cand.into_iter()
        .filter(|p| prominence(x, *p) >= params.prominence())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn spikes(len: usize, s: &[(usize, f64)]) -> Vec<f64> {
        let mut v = vec![0.0; len];
        for (i, z) in s {
            v[*i] = *z;
        }
        v
    }

    #[test]
    fn all_zero_gives_no_peaks() {
        let x = vec![0.0; 10_000];
        assert!(find_peaks(&x, &PeakParams::default()).is_empty());
    }

    #[test]
    fn single_spike() {
        // Spike at 1-based position 1000
        let x = spikes(5000, &[(999, 50.0)]);
        assert_eq!(find_peaks(&x, &PeakParams::default()), vec![999]);
    }

    #[test]
    fn close_spikes_keep_highest() {
        let x = spikes(5000, &[(1999, 30.0), (2499, 50.0)]);
        assert_eq!(find_peaks(&x, &PeakParams::default()), vec![2499]);
        let x = spikes(5000, &[(1999, 50.0), (2499, 30.0)]);
        assert_eq!(find_peaks(&x, &PeakParams::default()), vec![1999]);
    }

    #[test]
    fn distance_filter_favours_height() {
        let x = spikes(10_000, &[(1000, 50.0), (2500, 30.0), (3999, 40.0)]);
        // 2500 lies within 1500 of the higher peak at 3999
        assert_eq!(find_peaks(&x, &PeakParams::default()), vec![1000, 3999]);
        let p = PeakParams::new(1499, 20.0).unwrap();
        assert_eq!(find_peaks(&x, &p), vec![1000, 2500, 3999]);
    }

    #[test]
    fn equal_heights_leftmost_wins() {
        let x = spikes(5000, &[(1000, 50.0), (1200, 50.0)]);
        assert_eq!(find_peaks(&x, &PeakParams::default()), vec![1000]);
    }

    #[test]
    fn low_prominence_rejected() {
        // Bump of 15 on a background of 10
        let mut x = vec![10.0; 5000];
        x[2000] = 25.0;
        assert!(find_peaks(&x, &PeakParams::default()).is_empty());
        x[2000] = 30.0;
        assert_eq!(find_peaks(&x, &PeakParams::default()), vec![2000]);
    }

    #[test]
    fn prominence_uses_higher_base() {
        //            0    1    2    3     4    5    6
        let x = [0.0, 40.0, 25.0, 30.0, 10.0, 50.0, 0.0];
        // Right search runs to the 50 and bottoms out at 10
        assert_eq!(prominence(&x, 1), 30.0);
        // Left search stops at 40, right at 50; bases 25 and 10
        assert_eq!(prominence(&x, 3), 5.0);
        assert_eq!(prominence(&x, 5), 50.0);
    }

    #[rstest]
    #[case(&[0.0, 1.0, 0.0], vec![1])]
    #[case(&[0.0, 2.0, 2.0, 0.0], vec![1])]
    #[case(&[0.0, 2.0, 2.0, 2.0, 0.0], vec![2])]
    #[case(&[0.0, 1.0, 1.0], vec![])]
    #[case(&[3.0, 1.0, 0.0], vec![])]
    #[case(&[0.0, 1.0, 2.0, 3.0], vec![])]
    #[case(&[0.0, 2.0, 1.0, 3.0, 0.0], vec![1, 3])]
    #[case(&[1.0, 1.0], vec![])]
    fn maxima(#[case] x: &[f64], #[case] exp: Vec<usize>) {
        assert_eq!(local_maxima(x), exp);
    }

    #[test]
    fn spacing_is_respected() {
        // Saw tooth with a peak every 100 positions, heights varying
        let x: Vec<f64> = (0..20_000)
            .map(|i| {
                let k = i / 100;
                let h = 20.0 + ((k * 37) % 50) as f64;
                if i % 100 == 50 {
                    h
                } else {
                    0.0
                }
            })
            .collect();
        let p = PeakParams::new(1500, 20.0).unwrap();
        let v = find_peaks(&x, &p);
        assert!(!v.is_empty());
        for w in v.windows(2) {
            assert!(w[1] > w[0]);
            assert!(w[1] - w[0] >= 1500);
        }
    }

    #[rstest]
    #[case(0, 20.0)]
    #[case(100, -1.0)]
    #[case(100, f64::NAN)]
    fn invalid_params(#[case] d: usize, #[case] p: f64) {
        assert!(matches!(PeakParams::new(d, p), Err(Error::Config(_))));
    }
}
