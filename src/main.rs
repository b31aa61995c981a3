use anyhow::{Context, bail};
use ehr_reader::{LoaderConfig, PatientQueries, load_with_config};
use log::{info, warn};
use std::path::PathBuf;
use std::time::Instant;

const USAGE: &str = "usage: ehr-reader <patients.txt> <labs.txt> <patient-id> [<lab-name> <op> <value>]";

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 3 && args.len() != 6 {
        bail!(USAGE);
    }

    let patient_path = PathBuf::from(&args[0]);
    let lab_path = PathBuf::from(&args[1]);
    let patient_id = args[2].as_str();

    let start = Instant::now();
    let config = LoaderConfig::default().with_progress(true);
    let dataset = load_with_config(&patient_path, &lab_path, &config)
        .with_context(|| format!("Failed to load {} and {}", patient_path.display(), lab_path.display()))?;
    info!(
        "Loaded {} patients and {} lab results in {:?}",
        dataset.patient_count(),
        dataset.lab_count(),
        start.elapsed()
    );

    let patient = dataset
        .patient(patient_id)
        .with_context(|| format!("Patient {patient_id} not found"))?;
    println!("{}", serde_json::to_string_pretty(patient)?);

    println!("age: {}", dataset.age(patient_id)?);
    match dataset.age_at_first_test(patient_id) {
        Ok(years) => println!("age at first test: {years}"),
        Err(e) => warn!("{e}"),
    }

    if let [lab_name, operator, value] = &args[3..] {
        let threshold: f64 = value
            .parse()
            .with_context(|| format!("Invalid threshold: {value}"))?;
        let sick = dataset.is_sick(patient_id, lab_name, operator, threshold)?;
        println!("is sick ({lab_name} {operator} {threshold}): {sick}");
    }

    Ok(())
}
