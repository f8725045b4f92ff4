//! End-to-end pass over the helper pipeline: a parameter file goes in, daily
//! profiles, a scenario results table and report artifacts come out.

use epitools::data_management::{load_profile_parms, profile_rows, write_profile};
use epitools::infection::{he_infection_profile, home_daily_infectivity, GammaParams};
use epitools::registry::Registry;
use epitools::report::{swaplevel, Figure, PdfDeck, TextFigure};
use epitools::sampling::{categorical_one, seeded_rng};
use epitools::scenarios::named_product;
use std::collections::HashMap;
use std::env;
use std::fs;

const PARM_YAML: &str = "
infection_profile:
  period: 14
  gamma:
    shape: 2.0
    loc: 0.0
    scale: 3.0
";

#[test]
fn parameter_file_to_daily_profiles() {
    let parm_path = env::temp_dir().join("epitools_pipeline_parms.yaml");
    fs::write(&parm_path, PARM_YAML).unwrap();
    let parms = load_profile_parms(&parm_path).unwrap();

    let mass = he_infection_profile(parms.period, &parms.gamma);
    let infectivity = home_daily_infectivity(&mass);
    assert_eq!(mass.len(), 14);
    assert!((mass.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    assert!((infectivity.iter().sum::<f64>() - 1.0).abs() < 1e-9);

    // the daily mass is a valid categorical distribution over days
    let mut rng = seeded_rng(99);
    let day = categorical_one(&mass, &mut rng).unwrap();
    assert!(day < parms.period);

    let csv_path = env::temp_dir().join("epitools_pipeline_profile.csv");
    write_profile(&csv_path, &profile_rows(&mass, &infectivity)).unwrap();
    let written = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(written.trim_end().lines().count(), 15);

    let _ = fs::remove_file(&parm_path);
    let _ = fs::remove_file(&csv_path);
}

#[test]
fn scenario_grid_to_report_deck() {
    // sweep the onset distribution over a small named grid
    let mut profiles: Registry<Vec<f64>> = Registry::new();
    for combo in named_product(vec![
        ("shape", vec![1.5, 2.5]),
        ("scale", vec![2.0, 3.0]),
    ]) {
        let shape = *combo.get("shape").unwrap();
        let scale = *combo.get("scale").unwrap();
        let gamma = GammaParams::new(shape, 0.0, scale).unwrap();
        let name = format!("Shape{}-Scale{}", shape, scale);
        profiles.register(&name, he_infection_profile(14, &gamma));
    }
    assert_eq!(profiles.len(), 4);
    // lookups ignore the casing used at registration time
    let reference = profiles.get("shape1.5-scale2").unwrap();
    assert_eq!(reference.len(), 14);

    // summarize each scenario, then flip the table to metric-major order
    let mut results: HashMap<String, HashMap<&str, f64>> = HashMap::new();
    for name in &["shape1.5-scale2", "shape1.5-scale3", "shape2.5-scale2", "shape2.5-scale3"] {
        let mass = profiles.get(name).unwrap();
        let mut row = HashMap::new();
        row.insert("mass_day0", mass[0]);
        row.insert("peak_mass", mass.iter().cloned().fold(0.0, f64::max));
        results.insert(name.to_string(), row);
    }
    let by_metric = swaplevel(&results).unwrap();
    assert_eq!(by_metric.len(), 2);
    assert_eq!(by_metric["peak_mass"].len(), 4);

    // one summary page per metric
    let figs: Vec<Box<dyn Figure>> = by_metric
        .iter()
        .map(|(metric, row)| {
            let lines = row
                .iter()
                .map(|(scenario, value)| format!("{} - {:.4}", scenario, value))
                .collect();
            Box::new(TextFigure::new(metric, lines)) as Box<dyn Figure>
        })
        .collect();
    let pdf_path = env::temp_dir().join("epitools_pipeline_report.pdf");
    PdfDeck::save_as_pdf(figs, &pdf_path).unwrap();
    assert!(pdf_path.metadata().unwrap().len() > 0);
    let _ = fs::remove_file(&pdf_path);
}
