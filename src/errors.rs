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
use thiserror::Error;

/// The reason of the failure of Jacobian assembly or inversion
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// Two inputs which must have the same length do not.
    #[error("size mismatch input = {input}, required = {required}")]
    DimensionMismatch { input: usize, required: usize },
    /// Exact inversion needs a square matrix.
    #[error("matrix is not square ({rows}x{cols})")]
    NotSquare { rows: usize, cols: usize },
    /// A chain needs at least one joint.
    #[error("chain has no joints")]
    EmptyChain,
    /// The joint type tag is neither revolute nor prismatic.
    #[error("unknown joint type {tag:?}")]
    UnknownJointType { tag: String },
    /// LU or SVD did not produce a result. This is reported as is.
    #[error("linear algebra kernel failed: {0}")]
    KernelFailure(String),
}

#[test]
fn test_error_messages() {
    let err = Error::DimensionMismatch {
        input: 2,
        required: 3,
    };
    assert_eq!(err.to_string(), "size mismatch input = 2, required = 3");
    let err = Error::NotSquare { rows: 6, cols: 7 };
    assert_eq!(err.to_string(), "matrix is not square (6x7)");
    let err = Error::UnknownJointType {
        tag: "spherical".to_owned(),
    };
    assert_eq!(err.to_string(), "unknown joint type \"spherical\"");
}
