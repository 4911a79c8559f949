/*
  Copyright 2020 Takashi Ogura

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
use crate::errors::*;
use std::fmt::{self, Display};
use std::str::FromStr;

/// Type of Joint, `Revolute` and `Prismatic` are supported
///
/// Both types move along (or around) the local z axis of the DH frame.
#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash)]
pub enum JointType {
    /// Rotational joint. Its position is the DH angle `theta` [rad].
    Revolute,
    /// Linear joint. Its position is the DH offset `d`.
    Prismatic,
}

impl JointType {
    /// Parse all the tags in order, failing on the first unknown one
    ///
    /// # Examples
    ///
    /// ```
    /// use geojac::JointType;
    ///
    /// let types = JointType::parse_all(&["R", "revolute", "p"]).unwrap();
    /// assert_eq!(types, vec![JointType::Revolute, JointType::Revolute, JointType::Prismatic]);
    /// assert!(JointType::parse_all(&["r", "ball"]).is_err());
    /// ```
    pub fn parse_all<S: AsRef<str>>(tags: &[S]) -> Result<Vec<JointType>, Error> {
        tags.iter().map(|tag| tag.as_ref().parse()).collect()
    }
}

impl FromStr for JointType {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "r" | "revolute" | "rotational" => Ok(JointType::Revolute),
            "p" | "prismatic" | "linear" => Ok(JointType::Prismatic),
            _ => Err(Error::UnknownJointType {
                tag: tag.to_owned(),
            }),
        }
    }
}

impl Display for JointType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JointType::Revolute => write!(f, "[⚙+Z]"),
            JointType::Prismatic => write!(f, "[↕+Z]"),
        }
    }
}

#[test]
fn test_parse_joint_type() {
    assert_eq!("R".parse::<JointType>().unwrap(), JointType::Revolute);
    assert_eq!(" Prismatic ".parse::<JointType>().unwrap(), JointType::Prismatic);
    assert_eq!("linear".parse::<JointType>().unwrap(), JointType::Prismatic);
    match "".parse::<JointType>() {
        Err(Error::UnknownJointType { tag }) => assert_eq!(tag, ""),
        other => panic!("unexpected {:?}", other),
    }
}
