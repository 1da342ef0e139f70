use nalgebra::Point2;

use crate::geometry::{project, to_degrees, to_radians, ROOT_OFFSET};

/// Index of a joint within its chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JointId(pub(crate) usize);

impl JointId {
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for JointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "joint_{}", self.0 + 1)
    }
}

/// One rigid link and its rotational degree of freedom.
///
/// The joint only stores its commanded angle. The absolute angle and both
/// endpoints are derived and only refreshed by `update`.
#[derive(Clone, Debug)]
pub struct Joint {
    length: f32,
    self_angle: f32,
    absolute_angle: f32,
    start: Point2<f32>,
    end: Point2<f32>,
    parent: Option<JointId>,
    pub(crate) child: Option<JointId>,
}

impl Joint {
    /// Construct the base joint of a chain.
    ///
    /// The start point is fixed at `anchor` for the lifetime of the joint.
    pub fn root(anchor: Point2<f32>, length: f32, angle: f32) -> crate::Result<Self> {
        validate_length(length)?;

        let self_angle = to_radians(angle);

        let mut this = Self {
            length,
            self_angle,
            absolute_angle: self_angle + ROOT_OFFSET,
            start: anchor,
            end: anchor,
            parent: None,
            child: None,
        };
        this.calculate_end_point();

        Ok(this)
    }

    /// Construct a joint attached to the end of `parent`.
    ///
    /// The geometry is taken from the parent as it is right now. If the parent
    /// changes before the next update pass this joint will lag behind.
    pub(crate) fn child(
        parent_id: JointId,
        parent: &Joint,
        length: f32,
        angle: f32,
    ) -> crate::Result<Self> {
        validate_length(length)?;

        let self_angle = to_radians(angle);

        let mut this = Self {
            length,
            self_angle,
            absolute_angle: self_angle + parent.absolute_angle,
            start: parent.end,
            end: parent.end,
            parent: Some(parent_id),
            child: None,
        };
        this.calculate_end_point();

        Ok(this)
    }

    /// Set the commanded angle in radians.
    ///
    /// Geometry is not recalculated until the next update pass.
    #[inline]
    pub fn set_angle(&mut self, angle: f32) {
        self.self_angle = angle;
    }

    /// Set the commanded angle in degrees.
    #[inline]
    pub fn set_angle_degrees(&mut self, angle: f32) {
        self.set_angle(to_radians(angle));
    }

    /// Recalculate the derived geometry.
    ///
    /// The parent must already be updated in this pass, otherwise this joint
    /// picks up a stale frame.
    pub fn update(&mut self, parent: Option<&Joint>) {
        match parent {
            Some(parent) => {
                self.start = parent.end;
                self.absolute_angle = self.self_angle + parent.absolute_angle;
            }
            None => {
                self.absolute_angle = self.self_angle + ROOT_OFFSET;
            }
        }

        self.calculate_end_point();
    }

    fn calculate_end_point(&mut self) {
        self.end = project(&self.start, self.length, self.absolute_angle);
    }

    #[inline]
    pub fn start(&self) -> Point2<f32> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point2<f32> {
        self.end
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Commanded angle in radians.
    #[inline]
    pub fn angle(&self) -> f32 {
        self.self_angle
    }

    /// Commanded angle in whole degrees, for display.
    pub fn angle_degrees(&self) -> f32 {
        to_degrees(self.self_angle).round()
    }

    /// Orientation in the world frame as of the last update.
    #[inline]
    pub fn absolute_angle(&self) -> f32 {
        self.absolute_angle
    }

    #[inline]
    pub fn parent(&self) -> Option<JointId> {
        self.parent
    }

    #[inline]
    pub fn child_id(&self) -> Option<JointId> {
        self.child
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

impl std::fmt::Display for Joint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:.2}, {:.2}] -> [{:.2}, {:.2}] {:.2}rad/{}°",
            self.start.x,
            self.start.y,
            self.end.x,
            self.end.y,
            self.self_angle,
            self.angle_degrees()
        )
    }
}

fn validate_length(length: f32) -> crate::Result<()> {
    if length.is_finite() && length >= 0.0 {
        Ok(())
    } else {
        Err(crate::Error::InvalidLength(length))
    }
}
