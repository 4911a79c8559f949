/*
   Copyright 2017 Takashi Ogura

   Licensed under the Apache License, Version 2.0 (the "License");
   you may not use this file except in compliance with the License.
   You may obtain a copy of the License at

       http://www.apache.org/licenses/LICENSE-2.0

   Unless required by applicable law or agreed to in writing, software
   distributed under the License is distributed on an "AS IS" BASIS,
   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
   See the License for the specific language governing permissions and
   limitations under the License.
*/
use na::{Matrix4, RealField, Vector3};
use nalgebra as na;
use std::fmt::{self, Display};

use crate::errors::*;
use crate::joint::*;

/// Serial kinematic chain described by DH parameters
///
/// Joints are ordered from the base. Frame 0 is the fixed base frame and
/// frame `i` is the frame at the end of the `i`-th joint.
///
/// # Examples
///
/// ```
/// use geojac::*;
///
/// let mut chain = Chain::from_dh(
///     &[[1.0, 0.0, 0.0, 0.0], [1.0, 0.0, 0.0, 0.0]],
///     &[JointType::Revolute, JointType::Revolute],
/// )
/// .unwrap();
/// assert_eq!(chain.dof(), 2);
///
/// // Get joint positions
/// let positions = chain.joint_positions();
/// assert_eq!(positions, vec![0.0, 0.0]);
///
/// // Initial joint transforms
/// let transforms = chain.frame_transforms();
/// assert_eq!(transforms.len(), 2);
/// assert_eq!(transforms[0][(0, 3)], 1.0);
/// assert_eq!(transforms[1][(0, 3)], 2.0);
///
/// // Set joint positions
/// chain.set_joint_positions(&[0.0, std::f64::consts::FRAC_PI_2]).unwrap();
/// let end = chain.end_position();
/// assert!((end.x - 1.0).abs() < 1e-12);
/// assert!((end.y - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Chain<T: RealField> {
    joints: Vec<Joint<T>>,
}

impl<T> Chain<T>
where
    T: RealField + Copy,
{
    /// Create Chain from joints, ordered from the base
    ///
    /// It fails if there is no joint.
    ///
    /// # Examples
    ///
    /// ```
    /// use geojac::*;
    ///
    /// let j0 = JointBuilder::<f64>::new().name("j0").link_length(0.5).finalize();
    /// let j1 = JointBuilder::new().name("j1").joint_type(JointType::Prismatic).finalize();
    /// let chain = Chain::new(vec![j0, j1]).unwrap();
    /// assert_eq!(chain.dof(), 2);
    /// assert!(Chain::<f64>::new(vec![]).is_err());
    /// ```
    pub fn new(joints: Vec<Joint<T>>) -> Result<Self, Error> {
        if joints.is_empty() {
            return Err(Error::EmptyChain);
        }
        Ok(Chain { joints })
    }
    /// Create Chain from raw `[a, alpha, d, theta]` tuples and a parallel list of types
    ///
    /// Joints are named `joint1`, `joint2`, ... from the base.
    ///
    /// # Examples
    ///
    /// ```
    /// use geojac::*;
    ///
    /// let params = [[0.5, 0.0, 0.0, 0.0]; 3];
    /// assert!(Chain::from_dh(&params, &[JointType::Revolute; 3]).is_ok());
    /// // every joint needs its type
    /// assert!(Chain::from_dh(&params, &[JointType::Revolute; 2]).is_err());
    /// ```
    pub fn from_dh(params: &[[T; 4]], joint_types: &[JointType]) -> Result<Self, Error> {
        if params.len() != joint_types.len() {
            return Err(Error::DimensionMismatch {
                input: joint_types.len(),
                required: params.len(),
            });
        }
        Self::new(
            params
                .iter()
                .zip(joint_types.iter())
                .enumerate()
                .map(|(i, (param, joint_type))| {
                    Joint::new(&format!("joint{}", i + 1), *joint_type, (*param).into())
                })
                .collect(),
        )
    }
    /// Iterate for all joints from the base
    pub fn iter(&self) -> impl Iterator<Item = &Joint<T>> {
        self.joints.iter()
    }
    /// Calculate the degree of freedom (every joint is movable)
    pub fn dof(&self) -> usize {
        self.joints.len()
    }
    /// Types of the joints, from the base
    pub fn joint_types(&self) -> Vec<JointType> {
        self.iter().map(|joint| joint.joint_type).collect()
    }
    /// Find the joint by name
    pub fn find(&self, joint_name: &str) -> Option<&Joint<T>> {
        self.iter().find(|joint| joint.name == joint_name)
    }
    /// Get the positions of the joints
    pub fn joint_positions(&self) -> Vec<T> {
        self.iter().map(|joint| joint.joint_position()).collect()
    }
    /// Set the positions of the joints
    ///
    /// The input number must be equal with `dof()`.
    pub fn set_joint_positions(&mut self, positions_vec: &[T]) -> Result<(), Error> {
        if positions_vec.len() != self.dof() {
            return Err(Error::DimensionMismatch {
                input: positions_vec.len(),
                required: self.dof(),
            });
        }
        for (joint, position) in self.joints.iter_mut().zip(positions_vec.iter()) {
            joint.set_joint_position(*position);
        }
        Ok(())
    }
    /// Copy of this chain at other positions
    pub fn with_joint_positions(&self, positions_vec: &[T]) -> Result<Self, Error> {
        let mut chain = self.clone();
        chain.set_joint_positions(positions_vec)?;
        Ok(chain)
    }
    /// Transforms from the base to the end of each joint (frame 1..n)
    ///
    /// This is the input of `jacobian_from_transforms`.
    pub fn frame_transforms(&self) -> Vec<Matrix4<T>> {
        self.iter()
            .scan(Matrix4::identity(), |trans, joint| {
                *trans *= joint.local_transform();
                Some(*trans)
            })
            .collect()
    }
    /// Calculate transform of the end joint
    pub fn end_transform(&self) -> Matrix4<T> {
        self.iter().fold(Matrix4::identity(), |trans, joint| {
            trans * joint.local_transform()
        })
    }
    /// Position of the end effector in the base frame
    pub fn end_position(&self) -> Vector3<T> {
        translation(&self.end_transform())
    }
}

/// Third column of the rotation part of a homogeneous transform
#[inline]
pub(crate) fn z_axis<T: RealField + Copy>(trans: &Matrix4<T>) -> Vector3<T> {
    trans.fixed_view::<3, 1>(0, 2).into_owned()
}

/// Translation part of a homogeneous transform
#[inline]
pub(crate) fn translation<T: RealField + Copy>(trans: &Matrix4<T>) -> Vector3<T> {
    trans.fixed_view::<3, 1>(0, 3).into_owned()
}

impl<T: RealField> Display for Chain<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (level, joint) in self.joints.iter().enumerate() {
            writeln!(f, "{}{}", "    ".repeat(level), joint)?;
        }
        Ok(())
    }
}

#[test]
fn it_works() {
    let mut chain = Chain::from_dh(
        &[
            [0.0, std::f64::consts::FRAC_PI_2, 0.3, 0.0],
            [0.4, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.1, 0.0],
        ],
        &[JointType::Revolute, JointType::Revolute, JointType::Prismatic],
    )
    .unwrap();
    assert_eq!(chain.dof(), 3);
    assert_eq!(chain.joint_positions(), vec![0.0, 0.0, 0.1]);

    let transforms = chain.frame_transforms();
    assert_eq!(transforms.len(), 3);
    let end = chain.end_transform();
    for r in 0..4 {
        for c in 0..4 {
            assert!((transforms[2][(r, c)] - end[(r, c)]).abs() < 1e-12);
        }
    }
    assert!((translation(&transforms[0]).z - 0.3).abs() < 1e-12);
    // the twisted first joint turns z of frame 1 onto -y of the base
    assert!((z_axis(&transforms[0]).y + 1.0).abs() < 1e-12);

    assert!(chain.set_joint_positions(&[0.1, 0.2]).is_err());
    chain.set_joint_positions(&[0.1, 0.2, 0.7]).unwrap();
    assert_eq!(chain.joint_positions(), vec![0.1, 0.2, 0.7]);
    assert_eq!(chain.find("joint3").unwrap().dh.d, 0.7);
    assert!(chain.find("joint4").is_none());
}

#[test]
fn test_display_chain() {
    let chain = Chain::from_dh(
        &[[1.0f32, 0.0, 0.0, 0.0], [1.0, 0.0, 0.0, 0.0]],
        &[JointType::Revolute, JointType::Prismatic],
    )
    .unwrap();
    assert_eq!(format!("{}", chain), "joint1 [⚙+Z]\n    joint2 [↕+Z]\n");
}
