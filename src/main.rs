use std::{env, io};

use log::info;

use active_learning_data::PrepareConfig;

fn main() -> io::Result<()> {
    env_logger::init();

    let Some(path) = env::args().nth(1) else {
        let bin = env::args().next().unwrap_or_else(|| "prepare".into());
        eprintln!("Usage: {bin} <config.json>");
        std::process::exit(2);
    };

    let config = PrepareConfig::from_json_file(&path)?;
    info!("loaded config from {path}: {config:?}");

    let dataset = config.prepare()?;
    let (negatives, positives) = dataset.class_counts();

    info!(
        n_train = dataset.n_train(),
        n_test = dataset.n_test(),
        n_features = dataset.n_features(),
        positives = positives,
        negatives = negatives;
        "dataset prepared"
    );
    info!(
        known = dataset.indices_known().len(),
        unknown = dataset.indices_unknown().len();
        "start state: known={:?}",
        dataset.indices_known()
    );

    Ok(())
}
