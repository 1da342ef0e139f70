use nalgebra::Vector2;

/// Closed-form forward kinematics for a planar serial chain.
///
/// The solver works on link lengths only. Angles are relative to the previous
/// link, except for the first which is taken in the world frame.
pub struct ForwardKinematics {
    lengths: Vec<f32>,
}

impl ForwardKinematics {
    /// Construct a two-link solver.
    pub fn new(l1: f32, l2: f32) -> Self {
        Self {
            lengths: vec![l1, l2],
        }
    }

    pub fn from_lengths(lengths: impl IntoIterator<Item = f32>) -> Self {
        Self {
            lengths: lengths.into_iter().collect(),
        }
    }

    #[inline]
    pub fn lengths(&self) -> &[f32] {
        &self.lengths
    }

    /// Solve the tool offset relative to the base.
    ///
    /// For two links this is the textbook formula:
    ///
    /// ```text
    /// x = L1·cos(Q1) + L2·cos(Q1 + Q2)
    /// y = L1·sin(Q1) + L2·sin(Q1 + Q2)
    /// ```
    ///
    /// Links without a matching angle are ignored.
    pub fn solve(&self, angles: &[f32]) -> Vector2<f32> {
        let mut theta = 0.0_f32;

        self.lengths
            .iter()
            .zip(angles)
            .fold(Vector2::zeros(), |offset, (length, angle)| {
                theta += *angle;
                offset + Vector2::new(length * theta.cos(), length * theta.sin())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_two_link_formula() {
        let fk = ForwardKinematics::new(50.0, 30.0);

        let (q1, q2) = (0.3_f32, -1.1_f32);
        let offset = fk.solve(&[q1, q2]);

        let fk_x = (50.0 * q1.cos()) + (30.0 * (q1 + q2).cos());
        let fk_y = (50.0 * q1.sin()) + (30.0 * (q1 + q2).sin());

        assert!((offset.x - fk_x).abs() < 1e-4);
        assert!((offset.y - fk_y).abs() < 1e-4);
    }

    #[test]
    fn test_folded_arm() {
        let fk = ForwardKinematics::new(50.0, 50.0);

        let offset = fk.solve(&[0.0, PI]);
        assert!(offset.norm() < 1e-4);
    }

    #[test]
    fn test_three_links() {
        let fk = ForwardKinematics::from_lengths([10.0, 10.0, 10.0]);
        assert_eq!(fk.lengths().len(), 3);

        let offset = fk.solve(&[0.0, PI / 2.0, PI / 2.0]);
        assert!((offset.x - 0.0).abs() < 1e-4);
        assert!((offset.y - 10.0).abs() < 1e-4);
    }
}
