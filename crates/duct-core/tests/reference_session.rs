use duct_core::report::Report;
use duct_core::{analyze, Dataset, Method, PhysicalConstants, PORT_COUNT};

fn rounded(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[test]
fn test_case_1_port_6_end_to_end() {
    let data = Dataset::reference().unwrap();
    let analysis = analyze(&data, &PhysicalConstants::default()).unwrap();
    let case_1 = &analysis.cases[0];
    assert_eq!(case_1.case.inlet_velocity(), 10.0);
    assert_eq!(case_1.continuity.method, Method::Continuity);
    assert_eq!(case_1.bernoulli.method, Method::Bernoulli);

    let continuity = case_1.continuity.velocities[5];
    let bernoulli = case_1.bernoulli.velocities[5];
    assert!((rounded(continuity) - 15.00).abs() < 1e-2, "continuity = {continuity}");
    assert!((rounded(bernoulli) - 14.87).abs() < 1e-2, "bernoulli = {bernoulli}");
}

#[test]
fn test_full_profiles_match_hand_calculation() {
    let data = Dataset::reference().unwrap();
    let analysis = analyze(&data, &PhysicalConstants::default()).unwrap();

    let expected_continuity_10 = [
        10.07, 11.33, 12.95, 15.00, 15.00, 15.00, 13.72, 12.57, 11.59, 10.76, 10.04,
    ];
    let expected_bernoulli_10 = [
        10.00, 11.11, 12.74, 14.41, 14.81, 14.87, 14.11, 13.25, 12.54, 11.85, 11.49,
    ];
    let expected_bernoulli_20 = [
        20.00, 21.89, 24.80, 28.29, 29.74, 29.88, 28.43, 26.51, 25.34, 24.01, 23.23,
    ];

    for i in 0..PORT_COUNT {
        let c1 = &analysis.cases[0];
        let c2 = &analysis.cases[1];
        assert!((rounded(c1.continuity.velocities[i]) - expected_continuity_10[i]).abs() < 1e-9);
        assert!((rounded(c1.bernoulli.velocities[i]) - expected_bernoulli_10[i]).abs() < 1e-9);
        assert!((rounded(c2.bernoulli.velocities[i]) - expected_bernoulli_20[i]).abs() < 1e-9);
        // Continuity scales linearly with inlet velocity.
        let ratio = c2.continuity.velocities[i] / c1.continuity.velocities[i];
        assert!((ratio - 2.0).abs() < 1e-12);
    }
}

#[test]
fn test_report_layout() {
    let data = Dataset::reference().unwrap();
    let analysis = analyze(&data, &PhysicalConstants::default()).unwrap();
    let text = Report(&analysis).to_string();

    let headers: Vec<&str> = text
        .lines()
        .filter(|l| l.starts_with("Case "))
        .collect();
    assert_eq!(
        headers,
        [
            "Case 1: Inlet Velocity = 10 m/s",
            "Case 2: Inlet Velocity = 20 m/s"
        ]
    );
    // Banner, blank, header, columns, 11 rows, twice.
    assert_eq!(text.lines().count(), 1 + 2 * (1 + 1 + 1 + PORT_COUNT));
    assert!(!text.contains("NaN"));
}
