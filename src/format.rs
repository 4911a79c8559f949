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
//! Text rendering of matrices for debugging
use na::{DMatrix, RealField};
use nalgebra as na;

/// One line per row, entries with four decimals
///
/// # Examples
///
/// ```
/// let m = nalgebra::DMatrix::from_row_slice(2, 2, &[1.0, -0.5, 0.0, 500.0]);
/// assert_eq!(geojac::format_matrix(&m), "1.0000 -0.5000\n0.0000 500.0000");
/// ```
pub fn format_matrix<T: RealField>(matrix: &DMatrix<T>) -> String {
    matrix
        .row_iter()
        .map(|row| {
            row.iter()
                .map(|v| format!("{:.4}", v))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Nested array literal, one row per line
///
/// # Examples
///
/// ```
/// let m = nalgebra::DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(geojac::format_nested(&m), "[\n    [1,2],\n    [3,4]\n];");
/// ```
pub fn format_nested<T: RealField>(matrix: &DMatrix<T>) -> String {
    let rows = matrix
        .row_iter()
        .map(|row| {
            let values = row.iter().map(|v| v.to_string()).collect::<Vec<_>>();
            format!("    [{}]", values.join(","))
        })
        .collect::<Vec<_>>();
    format!("[\n{}\n];", rows.join(",\n"))
}

#[test]
fn test_format_column() {
    let m = DMatrix::from_column_slice(3, 1, &[-500.0f32, 0.0, 1.0]);
    assert_eq!(format_matrix(&m), "-500.0000\n0.0000\n1.0000");
    assert_eq!(format_nested(&m), "[\n    [-500],\n    [0],\n    [1]\n];");
}
