use geojac::*;

fn scara() -> Chain<f64> {
    let j0 = JointBuilder::new()
        .name("shoulder")
        .link_length(0.4)
        .link_offset(0.3)
        .finalize();
    let j1 = JointBuilder::new()
        .name("elbow")
        .link_length(0.3)
        .link_twist(std::f64::consts::PI)
        .finalize();
    let j2 = JointBuilder::new()
        .name("quill")
        .joint_type(JointType::Prismatic)
        .link_offset(0.1)
        .finalize();
    let j3 = JointBuilder::new().name("wrist").finalize();
    Chain::new(vec![j0, j1, j2, j3]).unwrap()
}

#[test]
fn test_chain() {
    let chain = scara();
    assert_eq!(chain.dof(), 4);
    let names = chain.iter().map(|j| j.name.clone()).collect::<Vec<_>>();
    assert_eq!(names, ["shoulder", "elbow", "quill", "wrist"]);
    assert_eq!(
        chain.joint_types(),
        vec![
            JointType::Revolute,
            JointType::Revolute,
            JointType::Prismatic,
            JointType::Revolute
        ]
    );
    assert_eq!(chain.joint_positions(), vec![0.0, 0.0, 0.1, 0.0]);

    // stretched along x, the quill goes down from 0.3
    let end = chain.end_position();
    assert!((end.x - 0.7).abs() < 1e-12);
    assert!(end.y.abs() < 1e-12);
    assert!((end.z - 0.2).abs() < 1e-12);
}

#[test]
fn test_with_joint_positions_keeps_original() {
    let chain = scara();
    let moved = chain.with_joint_positions(&[0.5, -0.5, 0.2, 1.0]).unwrap();
    assert_eq!(chain.joint_positions(), vec![0.0, 0.0, 0.1, 0.0]);
    assert_eq!(moved.joint_positions(), vec![0.5, -0.5, 0.2, 1.0]);
    assert_eq!(moved.find("quill").unwrap().dh.d, 0.2);
    assert_eq!(
        chain.with_joint_positions(&[0.0; 3]),
        Err(Error::DimensionMismatch {
            input: 3,
            required: 4
        })
    );
}

#[test]
fn test_scara_jacobian() {
    let chain = scara().with_joint_positions(&[0.3, 0.6, 0.15, -0.2]).unwrap();
    let j = jacobian(&chain);
    // the quill moves along -z of the base
    for r in 0..3 {
        let expected = [0.0, 0.0, -1.0][r];
        assert!((j[(r, 2)] - expected).abs() < 1e-12);
        assert_eq!(j[(r + 3, 2)], 0.0);
    }
    // shoulder and elbow turn around +z, the wrist around -z
    assert_eq!(j[(5, 0)], 1.0);
    assert_eq!(j[(5, 1)], 1.0);
    assert!((j[(5, 3)] + 1.0).abs() < 1e-12);
    // no joint moves the wrist point along z except the quill
    assert!(j[(2, 0)].abs() < 1e-12);
    assert!(j[(2, 1)].abs() < 1e-12);
    assert!(j[(2, 3)].abs() < 1e-12);
}

#[test]
fn test_empty_chain() {
    assert_eq!(Chain::<f32>::new(vec![]), Err(Error::EmptyChain));
    assert_eq!(Chain::<f32>::from_dh(&[], &[]), Err(Error::EmptyChain));
}
