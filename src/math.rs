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
//! Diagnostics on singular values
use na::RealField;
use nalgebra as na;

/// Singular values at or under this are not counted for rank and conditioning
pub const NEGLIGIBLE_SINGULAR_VALUE: f64 = 1e-6;
/// Singular values at or under this are not inverted (their inverse is set to 0)
pub const INVERTIBLE_SINGULAR_VALUE: f64 = 1e-12;
/// Condition numbers over this are reported as near singular
pub const CONDITION_NUMBER_LIMIT: f64 = 900.0;

/// Count the singular values whose magnitude is over `tolerance`
///
/// # Examples
///
/// ```
/// let s = [3.0, 1.0, 1e-9, 0.0];
/// assert_eq!(geojac::math::rank(&s, 1e-6), 2);
/// ```
pub fn rank<T: RealField + Copy>(singular_values: &[T], tolerance: T) -> usize {
    singular_values
        .iter()
        .filter(|s| s.abs() > tolerance)
        .count()
}

/// Largest singular value divided by the smallest one over `tolerance`
///
/// Values at or under `tolerance` are skipped in the search of the minimum.
/// Returns `None` if no value is over `tolerance`.
///
/// # Examples
///
/// ```
/// let s = [0.5, 4.0, 1e-9];
/// assert_eq!(geojac::math::condition_number(&s, 1e-6), Some(8.0));
/// assert_eq!(geojac::math::condition_number(&[0.0, 1e-9], 1e-6), None);
/// ```
pub fn condition_number<T: RealField + Copy>(singular_values: &[T], tolerance: T) -> Option<T> {
    let max = singular_values
        .iter()
        .copied()
        .reduce(|a, b| if b > a { b } else { a })?;
    let min = singular_values
        .iter()
        .copied()
        .filter(|s| *s > tolerance)
        .reduce(|a, b| if b < a { b } else { a })?;
    Some(max / min)
}

#[test]
fn test_rank_drops_with_small_values() {
    let mut s = vec![5.0, 4.0, 3.0, 2.0, 1.0, 0.5];
    assert_eq!(rank(&s, NEGLIGIBLE_SINGULAR_VALUE), 6);
    s[1] = 1e-7;
    s[4] = -1e-8;
    assert_eq!(rank(&s, NEGLIGIBLE_SINGULAR_VALUE), 4);
    // exactly at the threshold is negligible
    s[0] = NEGLIGIBLE_SINGULAR_VALUE;
    assert_eq!(rank(&s, NEGLIGIBLE_SINGULAR_VALUE), 3);
}

#[test]
fn test_condition_number_ignores_negligible() {
    let s = [1e-8, 2.0, 10.0];
    assert_eq!(condition_number(&s, NEGLIGIBLE_SINGULAR_VALUE), Some(5.0));
    assert_eq!(
        condition_number::<f64>(&[], NEGLIGIBLE_SINGULAR_VALUE),
        None
    );
}
