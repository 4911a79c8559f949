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
//! # Geometric Jacobian of serial manipulators using [nalgebra](http://nalgebra.org).
//!
//! `geojac` has below functionalities
//!
//! 1. Jacobian from Denavit-Hartenberg parameters (`jacobian`)
//! 1. Jacobian from the world transforms of the joint frames (`jacobian_from_transforms`)
//! 1. Exact inverse of square Jacobians (`exact_inverse`)
//! 1. SVD pseudo inverse with rank and condition number (`pseudo_inverse`)
//!
//! See `Chain` as the description of the manipulator.
//!
//! ```
//! use geojac::*;
//!
//! // three link planar arm
//! let chain = Chain::from_dh(&[[1.0, 0.0, 0.0, 0.1]; 3], &[JointType::Revolute; 3]).unwrap();
//! let j = jacobian(&chain);
//! let pinv = pseudo_inverse(&j, &InverseConfig::default()).unwrap();
//! assert_eq!(pinv.matrix.shape(), (3, 6));
//! assert_eq!(pinv.rank, 3);
//! println!("{}", format_matrix(&pinv.matrix));
//! ```
mod chain;
mod errors;
mod format;
mod funcs;
mod inverse;
use nalgebra as na;
pub mod joint;
pub mod math;

pub use self::chain::*;
pub use self::errors::*;
pub use self::format::*;
pub use self::funcs::*;
pub use self::inverse::*;
pub use self::joint::{DhParameters, Joint, JointBuilder, JointType};

// re-export from nalgebra
pub use na::{DMatrix, DVector, Matrix4, RealField, Vector3, Vector4};
pub use simba::scalar::{SubsetOf, SupersetOf};
