use rusty_sunspots::{Catalog, DType, DatasetConfig, DatasetSchema, SunspotDataset, Value};

fn data_rows_in_bundled_file(dataset: &SunspotDataset) -> usize {
    let text = std::fs::read_to_string(dataset.data_file()).unwrap();
    text.lines().filter(|l| !l.trim().is_empty()).count() - 1
}

#[test]
fn bundled_file_loads_as_month_and_sunspots() {
    let dataset = SunspotDataset::new();
    let (table, _) = dataset.load_data().unwrap();

    assert_eq!(table.column_names(), vec!["month", "sunspots"]);
    assert_eq!(table.num_rows(), data_rows_in_bundled_file(&dataset));
    assert_eq!(table.column("month").unwrap().dtype, DType::Text);

    let counts = table.column("sunspots").unwrap();
    assert_eq!(counts.dtype, DType::Float);
    assert!(counts
        .values
        .iter()
        .all(|v| v.as_f64().is_some_and(|n| n >= 0.0)));

    assert_eq!(
        table.row(0),
        Some(vec![&Value::String("1749-01".into()), &Value::Float(58.0)])
    );
}

#[test]
fn bundled_months_are_chronological() {
    let (table, _) = SunspotDataset::new().load_data().unwrap();
    let months: Vec<&str> = table
        .column("month")
        .unwrap()
        .values
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(months.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn metadata_matches_published_record() {
    let (_, schema) = SunspotDataset::new().load_data().unwrap();
    let expected: DatasetSchema = serde_json::from_value(serde_json::json!({
        "name": "sunspots",
        "description": "monthly count of the number of observed sunspots for just over 230 years (1749-1983)",
        "timestamp": "month",
        "targets": ["sunspots"],
        "frequency": "M",
        "external_regressors": []
    }))
    .unwrap();
    assert_eq!(schema, expected);
}

#[test]
fn loads_are_idempotent() {
    let dataset = SunspotDataset::new();
    assert_eq!(dataset.load_data().unwrap(), dataset.load_data().unwrap());
}

#[test]
fn catalog_loader_matches_dedicated_dataset() {
    let config = DatasetConfig::default();
    let loader = Catalog::builtin().loader("sunspots", &config).unwrap();
    let dataset = SunspotDataset::with_config(&config);

    assert_eq!(loader.data_file(), dataset.data_file());
    assert_eq!(loader.load_data().unwrap(), dataset.load_data().unwrap());
}

#[test]
fn paths_are_canonical() {
    let dataset = SunspotDataset::new();
    assert!(dataset.data_folder().is_absolute());
    assert_eq!(
        dataset.data_file(),
        std::fs::canonicalize(dataset.data_file()).unwrap()
    );
    assert_eq!(dataset.data_file().parent(), Some(dataset.data_folder()));
}

#[test]
#[ignore = "needs the full 1749-1983 series at data/sunspots_data/sunspots.csv"]
fn bundled_file_is_the_full_series() {
    let (table, _) = SunspotDataset::new().load_data().unwrap();
    assert_eq!(table.num_rows(), 2820);

    let months = &table.column("month").unwrap().values;
    assert_eq!(months.first().and_then(Value::as_str), Some("1749-01"));
    assert_eq!(months.last().and_then(Value::as_str), Some("1983-12"));
}
