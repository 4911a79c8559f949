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
use nalgebra::{Matrix4, RealField};

/// Denavit-Hartenberg parameters of a joint (standard convention)
///
/// The tuple order is `[a, alpha, d, theta]`.
#[derive(Copy, Debug, Clone, PartialEq)]
pub struct DhParameters<T: RealField> {
    /// link length
    pub a: T,
    /// link twist [rad]
    pub alpha: T,
    /// link offset
    pub d: T,
    /// joint angle [rad]
    pub theta: T,
}

impl<T> DhParameters<T>
where
    T: RealField + Copy,
{
    pub fn new(a: T, alpha: T, d: T, theta: T) -> Self {
        DhParameters { a, alpha, d, theta }
    }
    /// Homogeneous transform from the frame of this joint to the previous one
    ///
    /// # Examples
    ///
    /// ```
    /// use geojac::joint::DhParameters;
    ///
    /// let dh = DhParameters::new(2.0, 0.0, 0.5, std::f64::consts::FRAC_PI_2);
    /// let t = dh.transform();
    /// assert!(t[(0, 3)].abs() < 1e-12);
    /// assert!((t[(1, 3)] - 2.0).abs() < 1e-12);
    /// assert_eq!(t[(2, 3)], 0.5);
    /// assert_eq!(t[(3, 3)], 1.0);
    /// ```
    pub fn transform(&self) -> Matrix4<T> {
        let (st, ct) = self.theta.sin_cos();
        let (sa, ca) = self.alpha.sin_cos();
        let zero = T::zero();
        #[rustfmt::skip]
        let transform = Matrix4::new(
            ct,   -st * ca,  st * sa, self.a * ct,
            st,    ct * ca, -ct * sa, self.a * st,
            zero,  sa,       ca,      self.d,
            zero,  zero,     zero,    T::one(),
        );
        transform
    }
}

impl<T> From<[T; 4]> for DhParameters<T>
where
    T: RealField + Copy,
{
    fn from(params: [T; 4]) -> Self {
        DhParameters::new(params[0], params[1], params[2], params[3])
    }
}

#[test]
fn test_twisted_transform_is_rigid() {
    let dh = DhParameters::<f64>::new(0.3, -0.7, 0.2, 1.1);
    let t = dh.transform();
    let rot = t.fixed_view::<3, 3>(0, 0).into_owned();
    let should_be_identity = rot.transpose() * rot;
    for r in 0..3 {
        for c in 0..3 {
            let expected = if r == c { 1.0 } else { 0.0 };
            assert!((should_be_identity[(r, c)] - expected).abs() < 1e-12);
        }
    }
    assert_eq!(t[(3, 0)], 0.0);
    assert_eq!(t[(3, 3)], 1.0);
    assert!((t[(2, 1)] - (-0.7f64).sin()).abs() < 1e-12);
}
