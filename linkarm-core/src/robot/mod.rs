use nalgebra::Point2;

use crate::algorithm::ForwardKinematics;
use crate::geometry::{round_point, to_degrees, ROOT_OFFSET};

pub use joint::{Joint, JointId};

mod joint;

/// Link description as found in configuration files.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LinkConfig {
    /// Link length.
    pub length: f32,
    /// Initial commanded angle in degrees.
    #[serde(default)]
    pub angle: f32,
}

/// Chain description as found in configuration files.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChainConfig {
    /// Fixed base of the first link.
    pub anchor: [f32; 2],
    /// Links from root to tip.
    pub links: Vec<LinkConfig>,
}

/// Planar serial chain.
///
/// The chain owns all joints. Joints refer to their parent and child by index
/// only, and a parent is always stored before its children.
#[derive(Clone)]
pub struct Chain {
    joints: Vec<Joint>,
}

impl Chain {
    /// Construct the reference two-link arm.
    ///
    /// Both joints start at zero degrees, which points the arm straight up.
    pub fn new(anchor: Point2<f32>, l1: f32, l2: f32) -> crate::Result<Self> {
        ChainBuilder::new(anchor)
            .add_link(l1, 0.0)
            .add_link(l2, 0.0)
            .build()
    }

    /// Recalculate all joints, root first.
    ///
    /// Every joint is updated after its parent. Calling this repeatedly without
    /// changing any angle yields the same geometry.
    pub fn update_all(&mut self) {
        let mut next = Some(JointId(0));

        while let Some(id) = next {
            let (head, tail) = self.joints.split_at_mut(id.0);
            let joint = &mut tail[0];

            let parent = joint.parent().map(|parent| &head[parent.0]);
            joint.update(parent);

            next = joint.child_id();
        }
    }

    /// Iterate over the joints from root to tip.
    pub fn iter(&self) -> Links<'_> {
        Links {
            chain: self,
            next: Some(JointId(0)),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    /// Always false for an assembled chain.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    pub fn joint(&self, id: JointId) -> Option<&Joint> {
        self.joints.get(id.0)
    }

    pub fn joint_mut(&mut self, id: JointId) -> Option<&mut Joint> {
        self.joints.get_mut(id.0)
    }

    /// Identifier of the joint at `index`, counting from the root.
    pub fn joint_id(&self, index: usize) -> Option<JointId> {
        (index < self.joints.len()).then_some(JointId(index))
    }

    #[inline]
    pub fn root(&self) -> &Joint {
        &self.joints[0]
    }

    #[inline]
    pub fn tip(&self) -> &Joint {
        &self.joints[self.joints.len() - 1]
    }

    /// Set the commanded angle of a joint in radians.
    pub fn set_joint_angle(&mut self, id: JointId, angle: f32) -> crate::Result<()> {
        self.joint_mut(id)
            .ok_or(crate::Error::NoSuchJoint(id))?
            .set_angle(angle);
        Ok(())
    }

    /// Set the commanded angle of a joint in degrees.
    pub fn set_joint_angle_degrees(&mut self, id: JointId, angle: f32) -> crate::Result<()> {
        self.joint_mut(id)
            .ok_or(crate::Error::NoSuchJoint(id))?
            .set_angle_degrees(angle);
        Ok(())
    }

    /// Set the commanded angles of all joints in degrees, root first.
    ///
    /// Extra angles are ignored. Joints without an angle keep their current
    /// commanded angle.
    pub fn set_joint_angles_degrees(&mut self, angles: &[f32]) {
        for (joint, angle) in self.joints.iter_mut().zip(angles) {
            joint.set_angle_degrees(*angle);
        }
    }

    /// Closed-form solver for this chain.
    pub fn forward_kinematics(&self) -> ForwardKinematics {
        ForwardKinematics::from_lengths(self.iter().map(Joint::length))
    }

    /// Tool position derived from the forward kinematics formula.
    ///
    /// This does not walk the joint geometry and therefore does not depend on
    /// `update_all`. The result is rounded to whole units.
    pub fn tool_position(&self) -> Point2<f32> {
        let angles = self
            .iter()
            .map(|joint| {
                if joint.is_root() {
                    joint.angle() + ROOT_OFFSET
                } else {
                    joint.angle()
                }
            })
            .collect::<Vec<_>>();

        let offset = self.forward_kinematics().solve(&angles);

        log::trace!("Tool offset: [{:.2}, {:.2}]", offset.x, offset.y);

        round_point(self.root().start() + offset)
    }

    /// Tool position as of the last update pass.
    #[inline]
    pub fn end_effector(&self) -> Point2<f32> {
        self.tip().end()
    }
}

impl TryFrom<&ChainConfig> for Chain {
    type Error = crate::Error;

    fn try_from(config: &ChainConfig) -> Result<Self, Self::Error> {
        let [x, y] = config.anchor;

        config
            .links
            .iter()
            .fold(ChainBuilder::new(Point2::new(x, y)), |builder, link| {
                builder.add_link(link.length, link.angle)
            })
            .build()
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let point = self.end_effector();

        write!(f, "[{:.2}, {:.2}]", point.x, point.y)
    }
}

impl std::fmt::Debug for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let point = self.end_effector();

        let mut s = String::new();

        for (idx, joint) in self.iter().enumerate() {
            s.push_str(&format!(
                "{}={:.2}rad/{:5.2}° ",
                JointId(idx),
                joint.angle(),
                to_degrees(joint.angle())
            ));
        }

        write!(f, "{s} Endpoint [{:.2}, {:.2}]", point.x, point.y)
    }
}

/// Root-to-tip traversal following child links.
pub struct Links<'a> {
    chain: &'a Chain,
    next: Option<JointId>,
}

impl<'a> Iterator for Links<'a> {
    type Item = &'a Joint;

    fn next(&mut self) -> Option<Self::Item> {
        let joint = self.chain.joint(self.next?)?;
        self.next = joint.child_id();
        Some(joint)
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a Joint;
    type IntoIter = Links<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct ChainBuilder {
    anchor: Point2<f32>,
    links: Vec<(f32, f32)>,
}

impl ChainBuilder {
    pub fn new(anchor: Point2<f32>) -> Self {
        Self {
            anchor,
            links: Vec::new(),
        }
    }

    /// Append a link to the tip of the chain.
    ///
    /// The angle is in degrees.
    pub fn add_link(mut self, length: f32, angle: f32) -> Self {
        self.links.push((length, angle));
        self
    }

    /// Assemble the chain.
    ///
    /// Fails on the first invalid link. No chain is created in that case.
    pub fn build(self) -> crate::Result<Chain> {
        let mut links = self.links.into_iter();

        let (length, angle) = links.next().ok_or(crate::Error::EmptyChain)?;

        let mut joints = vec![Joint::root(self.anchor, length, angle)?];

        for (length, angle) in links {
            let parent_id = JointId(joints.len() - 1);
            let joint = Joint::child(parent_id, &joints[parent_id.0], length, angle)?;

            joints[parent_id.0].child = Some(JointId(joints.len()));
            joints.push(joint);
        }

        log::debug!("Assembled chain with {} joints", joints.len());

        let mut chain = Chain { joints };
        chain.update_all();

        Ok(chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::to_radians;

    fn assert_point_eq(lhs: Point2<f32>, rhs: Point2<f32>, tolerance: f32) {
        assert!(
            (lhs.x - rhs.x).abs() <= tolerance && (lhs.y - rhs.y).abs() <= tolerance,
            "[{}, {}] != [{}, {}]",
            lhs.x,
            lhs.y,
            rhs.x,
            rhs.y
        );
    }

    fn arm() -> Chain {
        Chain::new(Point2::origin(), 50.0, 50.0).unwrap()
    }

    #[test]
    fn test_zero_angle() {
        let mut chain = arm();
        chain.update_all();

        let joint_1 = chain.joint(JointId(0)).unwrap();
        assert_point_eq(joint_1.end(), Point2::new(0.0, -50.0), 1e-4);
        assert_point_eq(chain.end_effector(), Point2::new(0.0, -100.0), 1e-4);
        assert_eq!(chain.tool_position(), Point2::new(0.0, -100.0));
    }

    #[test]
    fn test_root_convention() {
        let mut chain = arm();
        chain.set_joint_angle_degrees(JointId(0), 90.0).unwrap();
        chain.update_all();

        let joint_1 = chain.root();
        assert!(joint_1.absolute_angle().abs() < 1e-6);
        assert_point_eq(joint_1.end(), Point2::new(50.0, 0.0), 1e-4);
        assert_eq!(chain.tool_position(), Point2::new(100.0, 0.0));
    }

    #[test]
    fn test_consistency() {
        let mut chain = Chain::new(Point2::new(300.0, 200.0), 80.0, 35.0).unwrap();

        for theta_1 in (-360..=360).step_by(15) {
            for theta_2 in (-180..=180).step_by(10) {
                chain.set_joint_angle_degrees(JointId(0), theta_1 as f32).unwrap();
                chain.set_joint_angle_degrees(JointId(1), theta_2 as f32).unwrap();
                chain.update_all();

                assert_point_eq(chain.end_effector(), chain.tool_position(), 1.0);
            }
        }
    }

    #[test]
    fn test_consistency_many_links() {
        let mut chain = ChainBuilder::new(Point2::new(-20.0, 5.0))
            .add_link(30.0, 10.0)
            .add_link(20.0, -45.0)
            .add_link(10.0, 120.0)
            .add_link(0.0, 33.0)
            .build()
            .unwrap();

        assert_eq!(chain.len(), 4);

        chain.set_joint_angles_degrees(&[725.0, -30.0, 15.0, 90.0]);
        chain.update_all();

        assert_point_eq(chain.end_effector(), chain.tool_position(), 1.0);
    }

    #[test]
    fn test_idempotent_update() {
        let mut chain = arm();
        chain.set_joint_angle(JointId(0), 0.7).unwrap();
        chain.set_joint_angle(JointId(1), -1.3).unwrap();

        chain.update_all();
        let first = chain.iter().map(|j| (j.start(), j.end())).collect::<Vec<_>>();

        chain.update_all();
        let second = chain.iter().map(|j| (j.start(), j.end())).collect::<Vec<_>>();

        assert_eq!(first, second);
    }

    #[test]
    fn test_setter_order_commutes() {
        let mut lhs = arm();
        lhs.set_joint_angle_degrees(JointId(0), 30.0).unwrap();
        lhs.set_joint_angle_degrees(JointId(1), 60.0).unwrap();
        lhs.update_all();

        let mut rhs = arm();
        rhs.set_joint_angle_degrees(JointId(1), 60.0).unwrap();
        rhs.set_joint_angle_degrees(JointId(0), 30.0).unwrap();
        rhs.update_all();

        assert_eq!(lhs.end_effector(), rhs.end_effector());
        assert_eq!(lhs.tool_position(), rhs.tool_position());
    }

    #[test]
    fn test_propagation() {
        let mut chain = arm();
        chain.set_joint_angle_degrees(JointId(1), 45.0).unwrap();
        chain.update_all();

        let before = chain.joint(JointId(1)).unwrap().clone();

        chain.set_joint_angle_degrees(JointId(0), 20.0).unwrap();
        chain.update_all();

        let after = chain.joint(JointId(1)).unwrap();

        assert_ne!(before.start(), after.start());
        assert_eq!(before.angle(), after.angle());
        assert!((after.angle() - to_radians(45.0)).abs() < f32::EPSILON);
        assert_eq!(after.start(), chain.root().end());
    }

    #[test]
    fn test_stale_until_update() {
        let mut chain = arm();
        chain.set_joint_angle_degrees(JointId(0), 90.0).unwrap();

        assert_point_eq(chain.end_effector(), Point2::new(0.0, -100.0), 1e-4);
        assert_eq!(chain.tool_position(), Point2::new(100.0, 0.0));

        chain.update_all();
        assert_point_eq(chain.end_effector(), Point2::new(100.0, 0.0), 1e-3);
    }

    #[test]
    fn test_traversal() {
        let chain = ChainBuilder::new(Point2::origin())
            .add_link(1.0, 0.0)
            .add_link(2.0, 0.0)
            .add_link(3.0, 0.0)
            .build()
            .unwrap();

        let lengths = chain.iter().map(Joint::length).collect::<Vec<_>>();
        assert_eq!(lengths, vec![1.0, 2.0, 3.0]);

        assert!(chain.root().is_root());
        assert_eq!(chain.tip().child_id(), None);

        for (idx, joint) in chain.iter().enumerate().skip(1) {
            let parent = joint.parent().unwrap();
            assert_eq!(parent, JointId(idx - 1));
            assert_eq!(chain.joint(parent).unwrap().child_id(), Some(JointId(idx)));
            assert_eq!(joint.start(), chain.joint(parent).unwrap().end());
        }
        assert_eq!((&chain).into_iter().count(), chain.len());
    }

    #[test]
    fn test_degree_rounding() {
        let mut chain = arm();
        chain.set_joint_angle_degrees(JointId(1), 44.6).unwrap();

        assert_eq!(chain.joint(JointId(1)).unwrap().angle_degrees(), 45.0);
    }

    #[test]
    fn test_invalid_construction() {
        assert_eq!(
            Chain::new(Point2::origin(), 50.0, -1.0).err(),
            Some(crate::Error::InvalidLength(-1.0))
        );
        assert_eq!(
            ChainBuilder::new(Point2::origin()).build().err(),
            Some(crate::Error::EmptyChain)
        );
    }

    #[test]
    fn test_no_such_joint() {
        let mut chain = arm();

        assert_eq!(chain.joint_id(2), None);
        assert_eq!(
            chain.set_joint_angle(JointId(5), 1.0),
            Err(crate::Error::NoSuchJoint(JointId(5)))
        );
    }

    #[test]
    fn test_from_config() {
        let config = ChainConfig {
            anchor: [0.0, 0.0],
            links: vec![
                LinkConfig {
                    length: 50.0,
                    angle: 90.0,
                },
                LinkConfig {
                    length: 50.0,
                    angle: 0.0,
                },
            ],
        };

        let chain = Chain::try_from(&config).unwrap();
        assert_point_eq(chain.end_effector(), Point2::new(100.0, 0.0), 1e-3);

        let config = ChainConfig {
            anchor: [0.0, 0.0],
            links: vec![],
        };
        assert!(Chain::try_from(&config).is_err());
    }

    #[test]
    fn test_display() {
        let chain = arm();

        assert!(chain.to_string().ends_with(", -100.00]"));
        assert!(format!("{:?}", chain).starts_with("joint_1="));

        let mut chain = arm();
        chain.set_joint_angle_degrees(JointId(1), 45.0).unwrap();
        assert!(format!("{:?}", chain).contains("joint_2=0.79rad/45.00°"));
    }
}
