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
use super::dh::*;
use super::joint_type::*;
use na::{Matrix4, RealField};
use nalgebra as na;
use std::fmt::{self, Display};

/// Joint with type and DH parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Joint<T: RealField> {
    /// Name of this joint
    pub name: String,
    /// Type of this joint
    pub joint_type: JointType,
    /// Geometry of this joint. The joint variable is baked in.
    pub dh: DhParameters<T>,
}

impl<T> Joint<T>
where
    T: RealField + Copy,
{
    /// Create new Joint with name, type and DH parameters
    ///
    /// # Examples
    ///
    /// ```
    /// use geojac::joint::{DhParameters, Joint, JointType};
    ///
    /// let rot = Joint::new("r0", JointType::Revolute, DhParameters::new(1.0, 0.0, 0.0, 0.3));
    /// assert_eq!(rot.joint_position(), 0.3);
    ///
    /// let lin = Joint::new("l0", JointType::Prismatic, DhParameters::new(0.0, 0.0, 0.5, 0.0));
    /// assert_eq!(lin.joint_position(), 0.5);
    /// ```
    pub fn new(name: &str, joint_type: JointType, dh: DhParameters<T>) -> Joint<T> {
        Joint {
            name: name.to_string(),
            joint_type,
            dh,
        }
    }
    /// Returns the position (angle for revolute, length for prismatic)
    #[inline]
    pub fn joint_position(&self) -> T {
        match self.joint_type {
            JointType::Revolute => self.dh.theta,
            JointType::Prismatic => self.dh.d,
        }
    }
    /// Set the position of the joint
    ///
    /// # Examples
    ///
    /// ```
    /// use geojac::joint::{DhParameters, Joint, JointType};
    ///
    /// let mut lin = Joint::new("l0", JointType::Prismatic, DhParameters::new(0.0, 0.0, 0.0, 0.2));
    /// lin.set_joint_position(-1.0);
    /// assert_eq!(lin.dh.d, -1.0);
    /// // theta is a constant for prismatic joints
    /// assert_eq!(lin.dh.theta, 0.2);
    /// ```
    pub fn set_joint_position(&mut self, position: T) {
        match self.joint_type {
            JointType::Revolute => self.dh.theta = position,
            JointType::Prismatic => self.dh.d = position,
        }
    }
    /// Calculate and returns the transform from the end of this joint to its parent frame
    #[inline]
    pub fn local_transform(&self) -> Matrix4<T> {
        self.dh.transform()
    }
}

impl<T: RealField> Display for Joint<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.name, self.joint_type)
    }
}

/// Build `Joint` step by step
///
/// The default is an unnamed revolute joint with all DH parameters zero.
///
/// # Examples
///
/// ```
/// use geojac::joint::{JointBuilder, JointType};
///
/// let joint = JointBuilder::<f64>::new()
///     .name("elbow")
///     .joint_type(JointType::Revolute)
///     .link_length(0.5)
///     .link_twist(std::f64::consts::FRAC_PI_2)
///     .finalize();
/// assert_eq!(joint.name, "elbow");
/// assert_eq!(joint.dh.a, 0.5);
/// assert_eq!(joint.joint_position(), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct JointBuilder<T: RealField> {
    name: String,
    joint_type: JointType,
    dh: DhParameters<T>,
}

impl<T> Default for JointBuilder<T>
where
    T: RealField + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> JointBuilder<T>
where
    T: RealField + Copy,
{
    pub fn new() -> JointBuilder<T> {
        JointBuilder {
            name: "".to_string(),
            joint_type: JointType::Revolute,
            dh: DhParameters::new(T::zero(), T::zero(), T::zero(), T::zero()),
        }
    }
    /// Set the name of the `Joint`
    pub fn name(mut self, name: &str) -> JointBuilder<T> {
        self.name = name.to_string();
        self
    }
    pub fn joint_type(mut self, joint_type: JointType) -> JointBuilder<T> {
        self.joint_type = joint_type;
        self
    }
    /// Set all the DH parameters at once
    pub fn dh(mut self, dh: DhParameters<T>) -> JointBuilder<T> {
        self.dh = dh;
        self
    }
    pub fn link_length(mut self, a: T) -> JointBuilder<T> {
        self.dh.a = a;
        self
    }
    pub fn link_twist(mut self, alpha: T) -> JointBuilder<T> {
        self.dh.alpha = alpha;
        self
    }
    pub fn link_offset(mut self, d: T) -> JointBuilder<T> {
        self.dh.d = d;
        self
    }
    pub fn joint_angle(mut self, theta: T) -> JointBuilder<T> {
        self.dh.theta = theta;
        self
    }
    /// Create `Joint` instance
    pub fn finalize(self) -> Joint<T> {
        Joint::new(&self.name, self.joint_type, self.dh)
    }
}

#[test]
fn test_display() {
    let joint = JointBuilder::<f32>::new()
        .name("slider")
        .joint_type(JointType::Prismatic)
        .finalize();
    assert_eq!(format!("{}", joint), "slider [↕+Z]");
}
