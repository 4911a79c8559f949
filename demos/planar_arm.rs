use geojac::*;
use std::f64::consts::PI;

fn main() {
    let a = 500.0;
    let chain = Chain::from_dh(
        &[
            [a, 0.0, 0.0, PI],
            [a, 0.0, 0.0, -PI / 2.0],
            [a, 0.0, 0.0, -PI / 2.0],
        ],
        &[JointType::Revolute; 3],
    )
    .unwrap();
    println!("{}", chain);

    let j = jacobian(&chain);
    println!("J:\n{}", format_matrix(&j));

    let config = InverseConfigBuilder::new()
        .verbosity(Verbosity::Warnings)
        .finalize();
    let pinv = pseudo_inverse(&j, &config).unwrap();
    println!("J+:\n{}", format_nested(&pinv.matrix));
    println!(
        "rank = {}, condition number = {:?}",
        pinv.rank, pinv.condition_number
    );
    for warning in &pinv.warnings {
        println!("{}", warning);
    }
}
