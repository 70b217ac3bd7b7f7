use num_complex::Complex64;

use crate::config::Normalization;
use crate::data::model::DataPoint;

/// `cos θ + i·sin θ`.
pub fn unit_vector(angle: f64) -> Complex64 {
    Complex64::from_polar(1.0, angle)
}

/// Sum of each measurement scaled onto its axis direction (radians).
pub fn resultant(point: &DataPoint, angles: &[f64; 3]) -> Complex64 {
    point
        .iter()
        .zip(angles.iter())
        .map(|(&value, &angle)| value * unit_vector(angle))
        .sum()
}

/// Resultant of a row, or `None` for an all-zero row that is not plotted.
pub fn row_resultant(point: &DataPoint, angles: &[f64; 3]) -> Option<Complex64> {
    if point.iter().all(|&v| v == 0.0) {
        None
    } else {
        Some(resultant(point, angles))
    }
}

/// Map values into `[0, 1]`.
///
/// `Linear` is a min–max rescale over the whole input; constant input maps to
/// zero. `Sigmoid` is the logistic function applied element-wise.
pub fn normalize(values: &[f64], method: Normalization) -> Vec<f64> {
    match method {
        Normalization::Sigmoid => values.iter().map(|&x| 1.0 / (1.0 + (-x).exp())).collect(),
        Normalization::Linear => {
            let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let range = max - min;
            if range.abs() < f64::EPSILON {
                vec![0.0; values.len()]
            } else {
                values.iter().map(|&x| (x - min) / range).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-12;

    fn angles() -> [f64; 3] {
        [90.0_f64, 210.0, 330.0].map(f64::to_radians)
    }

    #[test]
    fn single_axis_resultant_is_scaled_unit_vector() {
        let theta = angles()[1];
        let v = 2.5;
        let r = resultant(&[0.0, v, 0.0], &angles());
        assert!((r.re - v * theta.cos()).abs() < EPS);
        assert!((r.im - v * theta.sin()).abs() < EPS);
    }

    #[test]
    fn balanced_point_cancels_out() {
        let r = resultant(&[1.0, 1.0, 1.0], &angles());
        assert!(r.norm() < 1e-9);
    }

    #[test]
    fn zero_row_is_excluded() {
        assert_eq!(row_resultant(&[0.0, 0.0, 0.0], &angles()), None);
        let r = row_resultant(&[1.0, 0.0, 0.0], &angles()).unwrap();
        assert!((r.arg() - PI / 2.0).abs() < EPS);
        assert!((r.norm() - 1.0).abs() < EPS);
    }

    #[test]
    fn sigmoid_of_zero_is_half() {
        let out = normalize(&[0.0, 100.0, -100.0], Normalization::Sigmoid);
        assert!((out[0] - 0.5).abs() < EPS);
        assert!(out[1] > 0.999);
        assert!(out[2] < 0.001);
    }

    #[test]
    fn linear_spans_unit_interval() {
        assert_eq!(normalize(&[2.0, 4.0, 3.0], Normalization::Linear), vec![0.0, 1.0, 0.5]);
        assert_eq!(normalize(&[7.0, 7.0], Normalization::Linear), vec![0.0, 0.0]);
    }
}
