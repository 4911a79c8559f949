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
use approx::AbsDiffEq;
use na::{DMatrix, DVector, RealField, LU, SVD};
use nalgebra as na;
use simba::scalar::SubsetOf;
use std::fmt::{self, Display};
use tracing::{debug, warn};

use crate::errors::*;
use crate::format::*;
use crate::math::*;

/// How much the inverse functions tell through `tracing`
#[derive(Copy, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Verbosity {
    /// No events
    #[default]
    Silent,
    /// `warn!` for each returned `Warning`
    Warnings,
    /// `Warnings` and `debug!` dumps of the decomposition
    Debug,
}

/// Advisory result of the pseudo inverse. It never stops the calculation.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// The condition number is over the limit.
    ///
    /// `condition_number` is infinite if all singular values are negligible.
    NearSingularity {
        condition_number: f64,
        threshold: f64,
        rank: usize,
    },
}

impl Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Warning::NearSingularity {
                condition_number,
                threshold,
                rank,
            } => write!(
                f,
                "near singular: condition number {} > {} (rank {})",
                condition_number, threshold, rank
            ),
        }
    }
}

/// Thresholds for the inverse functions
#[derive(Debug, Clone)]
pub struct InverseConfig<T: RealField> {
    /// Singular values at or under this do not count for rank and condition number
    pub rank_tolerance: T,
    /// Singular values at or under this are dropped from the inverse
    pub inversion_tolerance: T,
    /// `Warning::NearSingularity` is returned over this condition number
    pub condition_limit: T,
    /// Convergence threshold of the SVD iterations
    pub svd_epsilon: T,
    /// 0 means no limit
    pub max_svd_iterations: usize,
    pub verbosity: Verbosity,
}

impl<T> Default for InverseConfig<T>
where
    T: RealField + Copy,
{
    fn default() -> Self {
        InverseConfigBuilder::new().finalize()
    }
}

/// Build `InverseConfig`
///
/// # Examples
///
/// ```
/// use geojac::{InverseConfigBuilder, Verbosity};
///
/// let config = InverseConfigBuilder::<f64>::new()
///     .condition_limit(100.0)
///     .verbosity(Verbosity::Warnings)
///     .finalize();
/// assert_eq!(config.condition_limit, 100.0);
/// assert_eq!(config.rank_tolerance, 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct InverseConfigBuilder<T>
where
    T: RealField,
{
    rank_tolerance: T,
    inversion_tolerance: T,
    condition_limit: T,
    svd_epsilon: T,
    max_svd_iterations: usize,
    verbosity: Verbosity,
}

impl<T> Default for InverseConfigBuilder<T>
where
    T: RealField + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InverseConfigBuilder<T>
where
    T: RealField + Copy,
{
    pub fn new() -> Self {
        InverseConfigBuilder {
            rank_tolerance: na::convert(NEGLIGIBLE_SINGULAR_VALUE),
            inversion_tolerance: na::convert(INVERTIBLE_SINGULAR_VALUE),
            condition_limit: na::convert(CONDITION_NUMBER_LIMIT),
            svd_epsilon: <T as AbsDiffEq>::default_epsilon(),
            max_svd_iterations: 1000,
            verbosity: Verbosity::Silent,
        }
    }
    pub fn rank_tolerance(&mut self, tolerance: T) -> &mut Self {
        self.rank_tolerance = tolerance;
        self
    }
    pub fn inversion_tolerance(&mut self, tolerance: T) -> &mut Self {
        self.inversion_tolerance = tolerance;
        self
    }
    pub fn condition_limit(&mut self, limit: T) -> &mut Self {
        self.condition_limit = limit;
        self
    }
    pub fn svd_epsilon(&mut self, epsilon: T) -> &mut Self {
        self.svd_epsilon = epsilon;
        self
    }
    pub fn max_svd_iterations(&mut self, max_iterations: usize) -> &mut Self {
        self.max_svd_iterations = max_iterations;
        self
    }
    pub fn verbosity(&mut self, verbosity: Verbosity) -> &mut Self {
        self.verbosity = verbosity;
        self
    }
    pub fn finalize(&self) -> InverseConfig<T> {
        InverseConfig {
            rank_tolerance: self.rank_tolerance,
            inversion_tolerance: self.inversion_tolerance,
            condition_limit: self.condition_limit,
            svd_epsilon: self.svd_epsilon,
            max_svd_iterations: self.max_svd_iterations,
            verbosity: self.verbosity,
        }
    }
}

/// `J = U * diag(S) * V^T`
///
/// With `J` of m x n and k = min(m, n), `u` is m x k, `v` is n x k.
/// The singular values are in the order of the SVD kernel.
#[derive(Debug, Clone)]
pub struct SingularValueDecomposition<T: RealField> {
    pub u: DMatrix<T>,
    pub singular_values: DVector<T>,
    pub v: DMatrix<T>,
}

/// Result of `pseudo_inverse`
#[derive(Debug, Clone)]
pub struct PseudoInverse<T: RealField> {
    /// n x m pseudo inverse of the m x n input
    pub matrix: DMatrix<T>,
    pub rank: usize,
    /// `None` if all singular values are negligible
    pub condition_number: Option<T>,
    pub singular_values: DVector<T>,
    pub warnings: Vec<Warning>,
}

impl<T> PseudoInverse<T>
where
    T: RealField + Copy,
{
    /// Joint velocities which make the requested end effector twist
    ///
    /// `twist` is `[vx, vy, vz, wx, wy, wz]` for a full Jacobian.
    pub fn joint_velocities(&self, twist: &DVector<T>) -> Result<DVector<T>, Error> {
        if twist.len() != self.matrix.ncols() {
            return Err(Error::DimensionMismatch {
                input: twist.len(),
                required: self.matrix.ncols(),
            });
        }
        Ok(&self.matrix * twist)
    }
    /// `true` if the input was near singular
    pub fn is_near_singular(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Inverse of a square Jacobian using LU decomposition
///
/// The input must be full rank. It is not checked: a nearly singular input
/// gives huge values, and only an exactly zero pivot is reported as
/// `Error::KernelFailure`.
///
/// # Examples
///
/// ```
/// let j = nalgebra::DMatrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 4.0]);
/// let inv = geojac::exact_inverse(&j).unwrap();
/// assert_eq!(inv[(0, 0)], 0.5);
/// assert_eq!(inv[(1, 1)], 0.25);
///
/// let wide = nalgebra::DMatrix::<f64>::zeros(6, 7);
/// assert!(geojac::exact_inverse(&wide).is_err());
/// ```
pub fn exact_inverse<T>(jacobian: &DMatrix<T>) -> Result<DMatrix<T>, Error>
where
    T: RealField + Copy,
{
    exact_inverse_with_verbosity(jacobian, Verbosity::Silent)
}

/// `exact_inverse` which dumps the input and the result with `debug!` on `Verbosity::Debug`
pub fn exact_inverse_with_verbosity<T>(
    jacobian: &DMatrix<T>,
    verbosity: Verbosity,
) -> Result<DMatrix<T>, Error>
where
    T: RealField + Copy,
{
    let (rows, cols) = jacobian.shape();
    if rows != cols {
        return Err(Error::NotSquare { rows, cols });
    }
    check_finite(jacobian)?;
    let inverse = LU::new(jacobian.clone())
        .try_inverse()
        .ok_or_else(|| Error::KernelFailure("LU decomposition hit a zero pivot".to_owned()))?;
    if verbosity >= Verbosity::Debug {
        debug!("J:\n{}", format_nested(jacobian));
        debug!("J^-1:\n{}", format_nested(&inverse));
    }
    Ok(inverse)
}

/// NaN or infinity makes the kernels panic or loop
fn check_finite<T>(jacobian: &DMatrix<T>) -> Result<(), Error>
where
    T: RealField + Copy,
{
    match jacobian.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(Error::KernelFailure(format!(
            "non finite value at ({}, {})",
            index % jacobian.nrows(),
            index / jacobian.nrows()
        ))),
        None => Ok(()),
    }
}

/// Singular value decomposition of a copy of `jacobian`
///
/// Non finite entries are rejected as `Error::KernelFailure`.
pub fn decompose<T>(
    jacobian: &DMatrix<T>,
    config: &InverseConfig<T>,
) -> Result<SingularValueDecomposition<T>, Error>
where
    T: RealField + Copy,
{
    if jacobian.is_empty() {
        return Err(Error::DimensionMismatch {
            input: 0,
            required: 1,
        });
    }
    check_finite(jacobian)?;
    let svd = SVD::try_new(
        jacobian.clone(),
        true,
        true,
        config.svd_epsilon,
        config.max_svd_iterations,
    )
    .ok_or_else(|| {
        Error::KernelFailure(format!(
            "SVD did not converge in {} iterations",
            config.max_svd_iterations
        ))
    })?;
    let u = svd
        .u
        .ok_or_else(|| Error::KernelFailure("SVD returned no U".to_owned()))?;
    let v_t = svd
        .v_t
        .ok_or_else(|| Error::KernelFailure("SVD returned no V".to_owned()))?;
    Ok(SingularValueDecomposition {
        u,
        singular_values: svd.singular_values,
        v: v_t.transpose(),
    })
}

/// Moore-Penrose pseudo inverse `V * diag(1/S) * U^T` with rank and conditioning
///
/// Any shape is accepted. Singular values at or under `inversion_tolerance`
/// are silently zeroed in the inverse, and ones at or under `rank_tolerance`
/// do not count for rank and condition number. A condition number over
/// `condition_limit` adds `Warning::NearSingularity` to the result.
///
/// # Examples
///
/// ```
/// use geojac::*;
///
/// let j = nalgebra::DMatrix::from_row_slice(2, 3, &[1.0f64, 0.0, 0.0, 0.0, 2.0, 0.0]);
/// let pinv = pseudo_inverse(&j, &InverseConfig::default()).unwrap();
/// assert_eq!(pinv.matrix.shape(), (3, 2));
/// assert_eq!(pinv.rank, 2);
/// assert!((pinv.matrix[(1, 1)] - 0.5).abs() < 1e-12);
/// assert!((pinv.condition_number.unwrap() - 2.0).abs() < 1e-12);
/// assert!(pinv.warnings.is_empty());
/// ```
pub fn pseudo_inverse<T>(
    jacobian: &DMatrix<T>,
    config: &InverseConfig<T>,
) -> Result<PseudoInverse<T>, Error>
where
    T: RealField + Copy + SubsetOf<f64>,
{
    let svd = decompose(jacobian, config)?;
    let singular_values = svd.singular_values.as_slice();
    let rank = rank(singular_values, config.rank_tolerance);
    let condition_number = condition_number(singular_values, config.rank_tolerance);

    let mut warnings = Vec::new();
    let near_singular = match condition_number {
        Some(c) => c > config.condition_limit,
        None => true,
    };
    if near_singular {
        let warning = Warning::NearSingularity {
            condition_number: condition_number.map_or(f64::INFINITY, na::convert),
            threshold: na::convert(config.condition_limit),
            rank,
        };
        if config.verbosity >= Verbosity::Warnings {
            warn!("{}", warning);
        }
        warnings.push(warning);
    }

    let inverse_diagonal = svd.singular_values.map(|s| {
        if s.abs() > config.inversion_tolerance {
            T::one() / s
        } else {
            T::zero()
        }
    });
    let matrix = &svd.v * DMatrix::from_diagonal(&inverse_diagonal) * svd.u.transpose();

    if config.verbosity >= Verbosity::Debug {
        debug!("U:\n{}", format_nested(&svd.u));
        let s_row = DMatrix::from_row_slice(1, singular_values.len(), singular_values);
        debug!("S: {}", format_matrix(&s_row));
        debug!("V:\n{}", format_nested(&svd.v));
        debug!(rank, "condition number = {:?}", condition_number);
    }

    Ok(PseudoInverse {
        matrix,
        rank,
        condition_number,
        singular_values: svd.singular_values,
        warnings,
    })
}

#[test]
fn test_rank_deficient_is_truncated() {
    // the second column is twice the first
    let j = DMatrix::from_row_slice(3, 2, &[1.0f64, 2.0, 0.0, 0.0, 0.0, 0.0]);
    let pinv = pseudo_inverse(&j, &InverseConfig::default()).unwrap();
    assert_eq!(pinv.rank, 1);
    assert!(pinv.matrix.iter().all(|v| v.is_finite()));
    // 1 x 2 row has pinv [1, 2]^T / 5
    assert!((pinv.matrix[(0, 0)] - 0.2).abs() < 1e-12);
    assert!((pinv.matrix[(1, 0)] - 0.4).abs() < 1e-12);
    // only the non negligible value is used for the condition number
    assert!((pinv.condition_number.unwrap() - 1.0).abs() < 1e-12);
}

#[test]
fn test_zero_matrix_warns() {
    let j = DMatrix::<f64>::zeros(6, 3);
    let pinv = pseudo_inverse(&j, &InverseConfig::default()).unwrap();
    assert_eq!(pinv.rank, 0);
    assert_eq!(pinv.condition_number, None);
    assert_eq!(pinv.matrix, DMatrix::zeros(3, 6));
    assert!(pinv.is_near_singular());
    match &pinv.warnings[0] {
        Warning::NearSingularity {
            condition_number,
            threshold,
            rank,
        } => {
            assert!(condition_number.is_infinite());
            assert_eq!(*threshold, 900.0);
            assert_eq!(*rank, 0);
        }
    }
}

#[test]
fn test_joint_velocities_size() {
    let j = DMatrix::<f64>::identity(6, 6);
    let pinv = pseudo_inverse(&j, &InverseConfig::default()).unwrap();
    let twist = DVector::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let qd = pinv.joint_velocities(&twist).unwrap();
    for i in 0..6 {
        assert!((qd[i] - twist[i]).abs() < 1e-12);
    }
    assert!(pinv
        .joint_velocities(&DVector::from_vec(vec![1.0, 2.0]))
        .is_err());
}

#[test]
fn test_non_finite_input_is_rejected() {
    let mut j = DMatrix::<f64>::identity(2, 2);
    j[(1, 0)] = f64::NAN;
    let config = InverseConfig::default();
    assert!(matches!(decompose(&j, &config), Err(Error::KernelFailure(_))));
    assert!(matches!(pseudo_inverse(&j, &config), Err(Error::KernelFailure(_))));
    assert!(matches!(exact_inverse(&j), Err(Error::KernelFailure(_))));
    j[(1, 0)] = f64::INFINITY;
    assert_eq!(
        decompose(&j, &config).unwrap_err().to_string(),
        "linear algebra kernel failed: non finite value at (1, 0)"
    );
}

#[test]
fn test_exact_inverse_with_verbosity() {
    let j = DMatrix::from_row_slice(2, 2, &[2.0f64, 1.0, 0.0, 4.0]);
    let silent = exact_inverse(&j).unwrap();
    let dumped = exact_inverse_with_verbosity(&j, Verbosity::Debug).unwrap();
    assert_eq!(silent, dumped);
    assert!((dumped[(0, 1)] + 0.125).abs() < 1e-12);
}
