use geojac::*;
use std::f64::consts::PI;

const EPS: f64 = 1e-6;

fn three_link_planar_arm() -> Chain<f64> {
    let a = 500.0;
    Chain::from_dh(
        &[
            [a, 0.0, 0.0, PI],
            [a, 0.0, 0.0, -PI / 2.0],
            [a, 0.0, 0.0, -PI / 2.0],
        ],
        &[JointType::Revolute; 3],
    )
    .unwrap()
}

// 7 DoF arm with alternating twists
fn seven_dof_arm(angles: &[f64]) -> Chain<f64> {
    let half_pi = PI / 2.0;
    let params = [
        [0.0, -half_pi, 0.34, 0.0],
        [0.0, half_pi, 0.0, 0.0],
        [0.0, half_pi, 0.4, 0.0],
        [0.0, -half_pi, 0.0, 0.0],
        [0.0, -half_pi, 0.4, 0.0],
        [0.0, half_pi, 0.0, 0.0],
        [0.0, 0.0, 0.126, 0.0],
    ];
    let mut chain = Chain::from_dh(&params, &[JointType::Revolute; 7]).unwrap();
    chain.set_joint_positions(angles).unwrap();
    chain
}

#[test]
fn test_planar_arm_reference() {
    let j = jacobian(&three_link_planar_arm());
    #[rustfmt::skip]
    let expected = DMatrix::from_row_slice(6, 3, &[
        -500.0, -500.0,   0.0,
           0.0,  500.0, 500.0,
           0.0,    0.0,   0.0,
           0.0,    0.0,   0.0,
           0.0,    0.0,   0.0,
           1.0,    1.0,   1.0,
    ]);
    assert_eq!(j.shape(), (6, 3));
    for r in 0..6 {
        for c in 0..3 {
            assert!(
                (j[(r, c)] - expected[(r, c)]).abs() < EPS,
                "j[{},{}] = {}, expected {}",
                r,
                c,
                j[(r, c)],
                expected[(r, c)]
            );
        }
    }
}

#[test]
fn test_shape_follows_dof() {
    for n in 1..9 {
        let chain = Chain::from_dh(&vec![[0.3, 0.2, 0.1, 0.5]; n], &vec![JointType::Revolute; n])
            .unwrap();
        assert_eq!(jacobian(&chain).shape(), (6, n));
    }
}

#[test]
fn test_angular_part_is_joint_axis() {
    let chain = Chain::from_dh(
        &[
            [0.1, 0.4, 0.2, 0.3],
            [0.2, -1.0, 0.0, 0.7],
            [0.0, 0.5, 0.3, -0.2],
            [0.3, 0.0, 0.1, 1.1],
        ],
        &[
            JointType::Revolute,
            JointType::Prismatic,
            JointType::Revolute,
            JointType::Prismatic,
        ],
    )
    .unwrap();
    let j = jacobian(&chain);
    let transforms = chain.frame_transforms();
    let mut prev = Matrix4::identity();
    for (i, joint) in chain.iter().enumerate() {
        match joint.joint_type {
            JointType::Revolute => {
                for r in 0..3 {
                    assert_eq!(j[(r + 3, i)], prev[(r, 2)]);
                }
            }
            JointType::Prismatic => {
                for r in 0..3 {
                    assert_eq!(j[(r + 3, i)], 0.0);
                    assert_eq!(j[(r, i)], prev[(r, 2)]);
                }
            }
        }
        prev = transforms[i];
    }
}

#[test]
fn test_from_transforms_matches_chain() {
    let chain = seven_dof_arm(&[0.3, -0.4, 0.5, 1.2, -0.6, 0.7, 0.1]);
    let transforms = chain.frame_transforms();
    let end = chain.end_position();
    let from_chain = jacobian(&chain);

    let cartesian =
        jacobian_from_transforms(&transforms, end, &chain.joint_types()).unwrap();
    let homogeneous = jacobian_from_transforms(
        &transforms,
        Vector4::new(end.x, end.y, end.z, 1.0),
        &chain.joint_types(),
    )
    .unwrap();
    assert_eq!(cartesian, homogeneous);
    for (a, b) in from_chain.iter().zip(cartesian.iter()) {
        assert!((a - b).abs() < 1e-12);
    }
}

#[test]
fn test_from_transforms_keeps_input() {
    let chain = three_link_planar_arm();
    let transforms = chain.frame_transforms();
    let copied = transforms.clone();
    let end = [0.0, 500.0, 0.0, 1.0];
    let j = jacobian_from_transforms(
        &transforms,
        EndPosition::try_from(&end[..]).unwrap(),
        &JointType::parse_all(&["r", "r", "r"]).unwrap(),
    )
    .unwrap();
    assert!((j[(0, 0)] + 500.0).abs() < EPS);
    assert_eq!(transforms.len(), 3);
    assert_eq!(transforms, copied);
    // identity for the base frame is not left in the input
    assert!(transforms[0] != Matrix4::identity());
}

#[test]
fn test_mismatched_types() {
    let chain = three_link_planar_arm();
    let transforms = chain.frame_transforms();
    let result = jacobian_from_transforms(
        &transforms,
        chain.end_position(),
        &[JointType::Revolute, JointType::Revolute],
    );
    assert_eq!(
        result,
        Err(Error::DimensionMismatch {
            input: 2,
            required: 3
        })
    );
    assert!(matches!(
        Chain::<f64>::from_dh(&[[1.0, 0.0, 0.0, 0.0]], &[]),
        Err(Error::DimensionMismatch { .. })
    ));
    assert!(matches!(
        JointType::parse_all(&["r", "spherical"]),
        Err(Error::UnknownJointType { .. })
    ));
    assert!(EndPosition::<f64>::try_from(&[0.0; 5][..]).is_err());
}

#[test]
fn test_single_joint_uses_base_frame() {
    let chain = Chain::from_dh(&[[0.0, 0.0, 0.7, 0.0]], &[JointType::Prismatic]).unwrap();
    let j = jacobian(&chain);
    assert_eq!(
        j.as_slice(),
        &[0.0, 0.0, 1.0, 0.0, 0.0, 0.0]
    );
}

#[test]
fn test_debug_verbosity_gives_same_jacobian() {
    let chain = seven_dof_arm(&[0.1, 0.2, -0.3, 0.4, 0.5, -0.6, 0.7]);
    let silent = jacobian(&chain);
    assert_eq!(jacobian_with_verbosity(&chain, Verbosity::Debug), silent);
    let from_transforms = jacobian_from_transforms_with_verbosity(
        &chain.frame_transforms(),
        chain.end_position(),
        &chain.joint_types(),
        Verbosity::Debug,
    )
    .unwrap();
    for (a, b) in from_transforms.iter().zip(silent.iter()) {
        assert!((a - b).abs() < 1e-12);
    }
}
