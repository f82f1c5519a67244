use std::sync::Arc;

use tf_idf_dedup::{DetectorConfig, ModelKey, ModelRegistry, TrainedModel};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rows = [
        "Apple iPhone 13 Pro 128GB",
        "Apple iPhone 13 Pro Max",
        "Samsung Galaxy S21",
        "Dell XPS 13 laptop computer",
    ];
    let config = DetectorConfig::new(0.5, 5000)?;

    // train once, query many times
    let model: TrainedModel = TrainedModel::train_with(&rows, &config)?;
    let (result, report) = model.check("iphone 13 pro", config.threshold)?;
    println!("{:#?}", result);
    for f in &report.shared_features {
        println!("{:<12} {:.4}", f.term, f.product);
    }
    println!("{:?}", report.statistics);

    // session-scoped active model
    let registry = ModelRegistry::new();
    let key = ModelKey::new("demo", "title", config.max_features);
    let active = registry.train(key.clone(), &rows, &config)?;
    assert!(Arc::ptr_eq(&active, &registry.get(&key).ok_or("missing model")?));
    println!("unique? {}", active.query("wireless mouse", 0.5)?.is_unique());
    Ok(())
}
