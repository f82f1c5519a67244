use std::sync::Arc;

use tf_idf_dedup::{loader::Dataset, DetectorConfig, ModelKey, ModelRegistry};

const PRODUCTS: &str = r#"[
    {"id": 1, "product_name": "Apple iPhone 13 Pro", "price": 999},
    {"id": 2, "product_name": "Apple iPhone 13 Pro Max", "price": 1099},
    {"id": 3, "product_name": null, "price": 10},
    {"id": 4, "product_name": "Dell XPS laptop", "price": 1299}
]"#;

#[test]
fn dataset_column_feeds_training() {
    let data = Dataset::from_json_array(PRODUCTS).unwrap();
    let rows = data.column_text("product_name").unwrap();
    assert_eq!(rows[2], "");

    let config = DetectorConfig::new(0.7, 5000).unwrap();
    let registry = ModelRegistry::new();
    let key = ModelKey::new("products.json", "product_name", config.max_features);
    let model = registry.train(key.clone(), &rows, &config).unwrap();

    let result = model.query("iPhone 13 Pro", config.threshold).unwrap();
    assert_eq!(result.matches[0].index, 0);
    assert_eq!(result.matches[0].text, "Apple iPhone 13 Pro");
    assert_eq!(result.all_scores[2], 0.0);
    assert!(Arc::ptr_eq(&registry.get(&key).unwrap(), &model));
}

#[test]
fn numeric_column_is_text_without_terms() {
    let data = Dataset::from_json_array(PRODUCTS).unwrap();
    let rows = data.column_text("price").unwrap();
    assert_eq!(rows, vec!["999", "1099", "10", "1299"]);

    let registry = ModelRegistry::new();
    let err = registry
        .train(ModelKey::new("products.json", "price", 10), &rows, &DetectorConfig::default())
        .unwrap_err();
    assert!(matches!(err, tf_idf_dedup::DetectError::EmptyVocabulary { documents: 4 }));
    assert!(registry.is_empty());
}
