//! End-to-end pipeline tests: generate data, load it, classify, render,
//! and write the report, without touching the network.

use stocksage::data::sample::{write_sample_data, SampleSpec};
use stocksage::data::Dataset;
use stocksage::{pipeline, DataConfig, LLMConfig, LoggingConfig, ReportConfig, Settings};
use tempfile::TempDir;

fn settings_in(dir: &TempDir) -> Settings {
    Settings {
        llm: LLMConfig {
            model: "moonshot-v1-8k".to_string(),
            api_base: "http://127.0.0.1:1".to_string(),
            temperature: 0.7,
            max_tokens: 1024,
            timeout_secs: 5,
        },
        data: DataConfig {
            inventory: dir.path().join("inventory.csv"),
            products: dir.path().join("products.csv"),
            sales: dir.path().join("sales_records.csv"),
        },
        report: ReportConfig {
            output: dir.path().join("inventory_report.md"),
            preview_chars: 500,
        },
        logging: LoggingConfig {
            level: "info".to_string(),
        },
    }
}

#[tokio::test]
async fn quick_report_end_to_end() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(&dir);

    write_sample_data(
        &settings.data,
        &SampleSpec {
            num_products: 20,
            days: 10,
        },
    )
    .unwrap();

    let run = pipeline::run_report(&settings, None).await.unwrap();

    assert_eq!(run.total_products, 20);
    let written = std::fs::read_to_string(&settings.report.output).unwrap();
    assert_eq!(written, run.content);
    assert!(written.starts_with("# Inventory Management Report"));
    assert!(written.contains("**Key figures:**"));
    assert!(written.contains("Total products: 20"));
}

#[tokio::test]
async fn report_is_overwritten_on_rerun() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(&dir);

    write_sample_data(
        &settings.data,
        &SampleSpec {
            num_products: 5,
            days: 3,
        },
    )
    .unwrap();

    let first = pipeline::run_report(&settings, None).await.unwrap();
    let second = pipeline::run_report(&settings, None).await.unwrap();

    // Same inputs, same classification, same bytes on disk.
    assert_eq!(first.content, second.content);
    assert_eq!(
        std::fs::read_to_string(&settings.report.output).unwrap(),
        second.content
    );
}

#[tokio::test]
async fn missing_input_aborts_without_writing_a_report() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(&dir);

    let err = pipeline::run_report(&settings, None).await.unwrap_err();

    assert!(err.to_string().contains("inventory"));
    assert!(!settings.report.output.exists());
}

#[tokio::test]
async fn classified_sets_match_the_loaded_view() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(&dir);

    write_sample_data(
        &settings.data,
        &SampleSpec {
            num_products: 50,
            days: 10,
        },
    )
    .unwrap();

    let dataset = Dataset::load(&settings.data).unwrap();
    let joined = dataset.joined();
    assert_eq!(joined.len(), dataset.inventory.len());

    let classification = stocksage::analysis::classify(&joined);
    assert!(classification.low_stock.len() + classification.high_stock.len() <= joined.len());

    // Sorted descending within each set.
    assert!(classification
        .low_stock
        .windows(2)
        .all(|w| w[0].out_of_stock_risk >= w[1].out_of_stock_risk));
    assert!(classification
        .high_stock
        .windows(2)
        .all(|w| w[0].overstock_risk >= w[1].overstock_risk));
}
