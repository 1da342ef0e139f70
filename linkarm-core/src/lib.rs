// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

/// The `linkarm-core` library models a planar, serially linked manipulator.
///
/// A `Chain` owns its joints in root-to-tip order. Each `Joint` carries a fixed
/// link length and a commanded angle relative to its parent. Geometry is lazy:
/// commanded angles can be changed at any time, but joint endpoints only
/// reflect them after `Chain::update_all` has walked the chain.
///
/// The tool position can be read in two ways: through the endpoint of the last
/// joint, or through the closed-form `ForwardKinematics` solver. After an
/// update pass both agree up to rounding.
pub mod algorithm;
pub mod geometry;
pub mod robot;

mod error;

pub use self::error::{Error, Result};

pub use nalgebra;
