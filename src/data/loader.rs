//! CSV loading, the inventory/product left join, and per-product sales
//! aggregation.
//!
//! All three sources must load completely before the pipeline proceeds;
//! a missing file, a malformed row, or a missing column aborts the run
//! with a `LoadError` naming the offending source.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::records::{InventoryRecord, JoinedRow, Product, SalesAggregate, SalesRecord};
use crate::config::DataConfig;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {source_name} file at {path}: {source}")]
    Open {
        source_name: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {source_name} file at {path}: {source}")]
    Parse {
        source_name: &'static str,
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// The three inputs of one report run, loaded whole.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub inventory: Vec<InventoryRecord>,
    pub products: Vec<Product>,
    pub sales: Vec<SalesRecord>,
}

impl Dataset {
    pub fn load(config: &DataConfig) -> Result<Self, LoadError> {
        let inventory = read_csv("inventory", &config.inventory)?;
        let products = read_csv("products", &config.products)?;
        let sales = read_csv("sales", &config.sales)?;

        tracing::info!(
            "[Dataset] Loaded {} inventory records, {} products, {} sales rows",
            inventory.len(),
            products.len(),
            sales.len()
        );

        Ok(Self {
            inventory,
            products,
            sales,
        })
    }

    /// Mean, max, sum, and count of `quantity_sold` per product. Products
    /// with no sales rows are absent from the map, not zero-filled.
    pub fn sales_aggregates(&self) -> HashMap<String, SalesAggregate> {
        let mut totals: HashMap<String, (u64, u32, usize)> = HashMap::new();
        for sale in &self.sales {
            let entry = totals.entry(sale.product_id.clone()).or_insert((0, 0, 0));
            entry.0 += u64::from(sale.quantity_sold);
            entry.1 = entry.1.max(sale.quantity_sold);
            entry.2 += 1;
        }

        totals
            .into_iter()
            .map(|(product_id, (total, max, days))| {
                let aggregate = SalesAggregate {
                    avg_daily_sales: total as f64 / days as f64,
                    max_daily_sales: max,
                    total_sales: total,
                    sales_days: days,
                };
                (product_id, aggregate)
            })
            .collect()
    }

    /// One row per inventory record, left-joined with product attributes
    /// and the sales aggregate. Input order is preserved; the joined view
    /// always has exactly as many rows as the inventory snapshot.
    pub fn joined(&self) -> Vec<JoinedRow> {
        let products: HashMap<&str, &Product> = self
            .products
            .iter()
            .map(|p| (p.product_id.as_str(), p))
            .collect();
        let aggregates = self.sales_aggregates();

        self.inventory
            .iter()
            .map(|record| {
                let product = products.get(record.product_id.as_str());
                JoinedRow {
                    product_id: record.product_id.clone(),
                    current_stock: record.current_stock,
                    safety_stock: record.safety_stock,
                    name: product.map(|p| p.name.clone()),
                    category: product.map(|p| p.category.clone()),
                    cost_price: product.map(|p| p.cost_price),
                    selling_price: product.map(|p| p.selling_price),
                    supplier_lead_time: product.map(|p| p.supplier_lead_time),
                    sales: aggregates.get(&record.product_id).cloned(),
                }
            })
            .collect()
    }
}

fn read_csv<T>(source_name: &'static str, path: &Path) -> Result<Vec<T>, LoadError>
where
    T: serde::de::DeserializeOwned,
{
    let file = std::fs::File::open(path).map_err(|source| LoadError::Open {
        source_name,
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: T = result.map_err(|source| LoadError::Parse {
            source_name,
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(row);
    }

    Ok(rows)
}
