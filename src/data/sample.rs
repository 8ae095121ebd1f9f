//! Synthetic demo data generator.
//!
//! One-shot sampler that writes the three input CSVs so the pipeline can
//! be exercised without real data. The core pipeline never calls this.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Duration, Local};
use rand::Rng;

use super::records::{InventoryRecord, Product, SalesRecord};
use crate::config::DataConfig;

const CATEGORIES: &[&str] = &[
    "Electronics",
    "Apparel",
    "Food",
    "Home",
    "Sports",
    "Books",
    "Toys",
    "Beauty",
    "Appliances",
    "Stationery",
];

/// Multiplier applied to mean daily sales for stable products.
const STABLE_SAFETY_MULTIPLIER: f64 = 5.0;
/// Multiplier applied to max daily sales for volatile products.
const VOLATILE_SAFETY_MULTIPLIER: f64 = 3.0;
/// Share of products seeded below their safety stock.
const LOW_STOCK_PROBABILITY: f64 = 0.3;

pub struct SampleSpec {
    pub num_products: usize,
    pub days: usize,
}

impl Default for SampleSpec {
    fn default() -> Self {
        Self {
            num_products: 100,
            days: 30,
        }
    }
}

/// Generate the sales, products, and inventory CSVs at the configured paths.
pub fn write_sample_data(config: &DataConfig, spec: &SampleSpec) -> Result<()> {
    let mut rng = rand::thread_rng();

    let product_ids: Vec<String> = (1..=spec.num_products).map(|i| format!("P{:03}", i)).collect();
    let today = Local::now().date_naive();

    let mut sales = Vec::new();
    // (mean, max) daily sales per product, reused for safety stock below.
    let mut observed: Vec<(f64, u32)> = Vec::with_capacity(product_ids.len());

    for product_id in &product_ids {
        let avg_sales = rng.gen_range(5..100) as f64;
        let volatility: f64 = rng.gen_range(0.2..0.8);
        let low = (avg_sales * (1.0 - volatility)).max(0.0);
        let high = avg_sales * (1.0 + volatility);

        let mut total: u64 = 0;
        let mut max_seen: u32 = 0;
        for offset in (0..spec.days).rev() {
            let date = today - Duration::days(offset as i64);
            let quantity_sold = rng.gen_range(low..=high).round() as u32;
            total += u64::from(quantity_sold);
            max_seen = max_seen.max(quantity_sold);
            sales.push(SalesRecord {
                product_id: product_id.clone(),
                date,
                quantity_sold,
            });
        }
        observed.push((total as f64 / spec.days.max(1) as f64, max_seen));
    }

    let products: Vec<Product> = product_ids
        .iter()
        .map(|product_id| {
            let category = CATEGORIES[rng.gen_range(0..CATEGORIES.len())];
            let cost_price = round2(rng.gen_range(5.0..200.0));
            let selling_price = round2(cost_price * rng.gen_range(1.2..3.0));
            Product {
                product_id: product_id.clone(),
                name: format!("{} item {}", category, &product_id[1..]),
                category: category.to_string(),
                cost_price,
                selling_price,
                supplier_lead_time: rng.gen_range(3..15),
            }
        })
        .collect();

    let now = Local::now().naive_local();
    let inventory: Vec<InventoryRecord> = product_ids
        .iter()
        .zip(&observed)
        .map(|(product_id, (avg_daily, max_daily))| {
            let is_stable = rng.gen_bool(0.5);
            let safety_stock = if is_stable {
                avg_daily * STABLE_SAFETY_MULTIPLIER
            } else {
                f64::from(*max_daily) * VOLATILE_SAFETY_MULTIPLIER
            };
            let current_stock = if rng.gen_bool(LOW_STOCK_PROBABILITY) {
                rng.gen_range(0..(safety_stock * 0.7).max(1.0) as i64)
            } else {
                let floor = (safety_stock * 1.2) as i64;
                rng.gen_range(floor..(safety_stock * 3.0).max(floor as f64 + 1.0) as i64)
            };
            InventoryRecord {
                product_id: product_id.clone(),
                current_stock,
                safety_stock,
                last_updated: now,
            }
        })
        .collect();

    write_csv(&config.sales, &sales)?;
    write_csv(&config.products, &products)?;
    write_csv(&config.inventory, &inventory)?;

    tracing::info!(
        "[sample] Wrote {} products, {} inventory rows, {} sales rows",
        products.len(),
        inventory.len(),
        sales.len()
    );

    Ok(())
}

fn write_csv<T: serde::Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    Ok(())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;
    use tempfile::TempDir;

    #[test]
    fn generated_files_load_back() {
        let dir = TempDir::new().unwrap();
        let config = DataConfig {
            inventory: dir.path().join("inventory.csv"),
            products: dir.path().join("products.csv"),
            sales: dir.path().join("sales_records.csv"),
        };
        let spec = SampleSpec {
            num_products: 10,
            days: 5,
        };

        write_sample_data(&config, &spec).unwrap();
        let dataset = Dataset::load(&config).unwrap();

        assert_eq!(dataset.products.len(), 10);
        assert_eq!(dataset.inventory.len(), 10);
        assert_eq!(dataset.sales.len(), 50);
        assert!(dataset.inventory.iter().all(|r| r.safety_stock > 0.0));
        assert!(dataset.inventory.iter().all(|r| r.current_stock >= 0));
        assert_eq!(dataset.joined().len(), 10);
    }
}
