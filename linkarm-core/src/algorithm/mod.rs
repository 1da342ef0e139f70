pub use fk::ForwardKinematics;

mod fk;
