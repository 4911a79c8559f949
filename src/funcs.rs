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
use crate::chain::*;
use crate::errors::*;
use crate::inverse::Verbosity;
use crate::joint::*;
use na::{DMatrix, Matrix4, Point3, RealField, Vector3, Vector4};
use nalgebra as na;
use tracing::debug;

/// Position of the end effector in the base frame
///
/// Homogeneous coordinates are accepted too; the last component is dropped.
#[derive(Copy, Debug, Clone, PartialEq)]
pub enum EndPosition<T: RealField> {
    Cartesian(Vector3<T>),
    Homogeneous(Vector4<T>),
}

impl<T> EndPosition<T>
where
    T: RealField + Copy,
{
    /// The first three components
    pub fn xyz(&self) -> Vector3<T> {
        match self {
            EndPosition::Cartesian(p) => *p,
            EndPosition::Homogeneous(p) => p.xyz(),
        }
    }
}

impl<T: RealField> From<Vector3<T>> for EndPosition<T> {
    fn from(p: Vector3<T>) -> Self {
        EndPosition::Cartesian(p)
    }
}

impl<T: RealField> From<Point3<T>> for EndPosition<T> {
    fn from(p: Point3<T>) -> Self {
        EndPosition::Cartesian(p.coords)
    }
}

impl<T: RealField> From<Vector4<T>> for EndPosition<T> {
    fn from(p: Vector4<T>) -> Self {
        EndPosition::Homogeneous(p)
    }
}

impl<T> TryFrom<&[T]> for EndPosition<T>
where
    T: RealField + Copy,
{
    type Error = Error;

    /// # Examples
    ///
    /// ```
    /// use geojac::EndPosition;
    /// use std::convert::TryFrom;
    ///
    /// let p = EndPosition::try_from(&[1.0, 2.0, 3.0, 1.0][..]).unwrap();
    /// assert_eq!(p.xyz().z, 3.0);
    /// assert!(EndPosition::try_from(&[1.0, 2.0][..]).is_err());
    /// ```
    fn try_from(p: &[T]) -> Result<Self, Self::Error> {
        match p.len() {
            3 => Ok(EndPosition::Cartesian(Vector3::from_column_slice(p))),
            4 => Ok(EndPosition::Homogeneous(Vector4::from_column_slice(p))),
            len => Err(Error::DimensionMismatch {
                input: len,
                required: 3,
            }),
        }
    }
}

/// One Jacobian column from the frame before the joint
///
/// revolute: `[z x (pe - p); z]`, prismatic: `[z; 0]`
fn jacobian_column<T>(
    joint_type: JointType,
    prev_transform: &Matrix4<T>,
    end_position: &Vector3<T>,
    verbosity: Verbosity,
) -> [T; 6]
where
    T: RealField + Copy,
{
    let z = z_axis(prev_transform);
    if verbosity >= Verbosity::Debug {
        let p = translation(prev_transform);
        debug!(?joint_type, "z = {:?}, p = {:?}", z.as_slice(), p.as_slice());
    }
    match joint_type {
        JointType::Prismatic => [z[0], z[1], z[2], T::zero(), T::zero(), T::zero()],
        JointType::Revolute => {
            let p = translation(prev_transform);
            let dp = z.cross(&(end_position - p));
            [dp[0], dp[1], dp[2], z[0], z[1], z[2]]
        }
    }
}

fn assemble<T>(columns: &[[T; 6]]) -> DMatrix<T>
where
    T: RealField + Copy,
{
    DMatrix::from_fn(6, columns.len(), |r, c| columns[c][r])
}

/// Calculate the geometric Jacobian of the serial chain (manipulator)
///
/// The result is 6 x dof. The upper three rows are the linear velocity and
/// the lower three rows are the angular velocity of the end, both in the base frame.
///
/// # Examples
///
/// ```
/// use geojac::*;
///
/// let chain = Chain::from_dh(&[[1.0f64, 0.0, 0.0, 0.0]], &[JointType::Revolute]).unwrap();
/// let j = jacobian(&chain);
/// assert_eq!(j.shape(), (6, 1));
/// // the tip at (1, 0, 0) moves along +y
/// assert!((j[(1, 0)] - 1.0).abs() < 1e-12);
/// assert_eq!(j[(5, 0)], 1.0);
/// ```
pub fn jacobian<T>(chain: &Chain<T>) -> DMatrix<T>
where
    T: RealField + Copy,
{
    jacobian_with_verbosity(chain, Verbosity::Silent)
}

/// `jacobian` which reports the end position and the axis of each joint
/// with `debug!` on `Verbosity::Debug`
pub fn jacobian_with_verbosity<T>(chain: &Chain<T>, verbosity: Verbosity) -> DMatrix<T>
where
    T: RealField + Copy,
{
    let p_n = chain.end_position();
    if verbosity >= Verbosity::Debug {
        debug!("pe = {:?}", p_n.as_slice());
    }
    // base -> frame (j - 1), starting from the base itself
    let mut t_prev = Matrix4::identity();
    let columns = chain
        .iter()
        .map(|joint| {
            let column = jacobian_column(joint.joint_type, &t_prev, &p_n, verbosity);
            t_prev *= joint.local_transform();
            column
        })
        .collect::<Vec<_>>();
    assemble(&columns)
}

/// Calculate the geometric Jacobian from the world transforms of the joint frames
///
/// `transforms[i]` is the transform from the base to the end of joint `i + 1`.
/// The column of joint `i + 1` is calculated from `transforms[i - 1]` (the base
/// frame for the first joint), so the last transform is not used.
/// `transforms` is only read.
///
/// # Examples
///
/// ```
/// use geojac::*;
///
/// let chain = Chain::from_dh(&[[0.5, 0.0, 0.0, 0.3]; 3], &[JointType::Revolute; 3]).unwrap();
/// let transforms = chain.frame_transforms();
/// let j = jacobian_from_transforms(&transforms, chain.end_position(), &chain.joint_types()).unwrap();
/// assert_eq!(j.shape(), (6, 3));
/// assert_eq!(transforms.len(), 3);
/// ```
pub fn jacobian_from_transforms<T, P>(
    transforms: &[Matrix4<T>],
    end_position: P,
    joint_types: &[JointType],
) -> Result<DMatrix<T>, Error>
where
    T: RealField + Copy,
    P: Into<EndPosition<T>>,
{
    jacobian_from_transforms_with_verbosity(
        transforms,
        end_position,
        joint_types,
        Verbosity::Silent,
    )
}

/// `jacobian_from_transforms` with `debug!` events as `jacobian_with_verbosity`
pub fn jacobian_from_transforms_with_verbosity<T, P>(
    transforms: &[Matrix4<T>],
    end_position: P,
    joint_types: &[JointType],
    verbosity: Verbosity,
) -> Result<DMatrix<T>, Error>
where
    T: RealField + Copy,
    P: Into<EndPosition<T>>,
{
    if transforms.is_empty() {
        return Err(Error::EmptyChain);
    }
    if transforms.len() != joint_types.len() {
        return Err(Error::DimensionMismatch {
            input: joint_types.len(),
            required: transforms.len(),
        });
    }
    let p_n = end_position.into().xyz();
    if verbosity >= Verbosity::Debug {
        debug!("pe = {:?}", p_n.as_slice());
    }
    let base = Matrix4::identity();
    let columns = std::iter::once(&base)
        .chain(transforms.iter())
        .zip(joint_types.iter())
        .map(|(t_prev, joint_type)| jacobian_column(*joint_type, t_prev, &p_n, verbosity))
        .collect::<Vec<_>>();
    Ok(assemble(&columns))
}

#[test]
fn test_prismatic_column() {
    let chain = Chain::from_dh(
        &[[0.0, -std::f64::consts::FRAC_PI_2, 0.0, 0.4], [0.0, 0.0, 0.2, 0.0]],
        &[JointType::Revolute, JointType::Prismatic],
    )
    .unwrap();
    let j = jacobian(&chain);
    let z1 = z_axis(&chain.frame_transforms()[0]);
    for r in 0..3 {
        assert_eq!(j[(r, 1)], z1[r]);
        assert_eq!(j[(r + 3, 1)], 0.0);
    }
    // revolute joint at the base rotates around the base z
    assert_eq!(j[(3, 0)], 0.0);
    assert_eq!(j[(4, 0)], 0.0);
    assert_eq!(j[(5, 0)], 1.0);
}

#[test]
fn test_transforms_mismatch() {
    let transforms = vec![Matrix4::<f64>::identity(); 2];
    let result = jacobian_from_transforms(
        &transforms,
        Vector3::new(0.0, 0.0, 0.0),
        &[JointType::Revolute],
    );
    assert_eq!(
        result,
        Err(Error::DimensionMismatch {
            input: 1,
            required: 2
        })
    );
    let result =
        jacobian_from_transforms::<f64, _>(&[], Vector3::new(0.0, 0.0, 0.0), &[]);
    assert_eq!(result, Err(Error::EmptyChain));
}
