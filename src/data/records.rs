//! Row types for the three tabular inputs and the derived joined view.
//!
//! Each input struct maps 1:1 onto a CSV header; deserialization happens
//! through serde so a missing or malformed column surfaces as a parse
//! error naming the source file.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Immutable product reference data, keyed by `product_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub name: String,
    pub category: String,
    pub cost_price: f64,
    pub selling_price: f64,
    pub supplier_lead_time: u32,
}

/// Point-in-time stock snapshot for one product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub product_id: String,
    pub current_stock: i64,
    pub safety_stock: f64,
    #[serde(
        deserialize_with = "de_naive_datetime",
        serialize_with = "ser_naive_datetime"
    )]
    pub last_updated: NaiveDateTime,
}

/// One day of sales for one product. Identity is (product_id, date).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRecord {
    pub product_id: String,
    pub date: NaiveDate,
    pub quantity_sold: u32,
}

/// Per-product aggregate over all of its sales rows.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesAggregate {
    pub avg_daily_sales: f64,
    pub max_daily_sales: u32,
    pub total_sales: u64,
    pub sales_days: usize,
}

/// One inventory record left-joined with product attributes and sales
/// aggregates. Descriptive fields are `None` when the product or its
/// sales history is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRow {
    pub product_id: String,
    pub current_stock: i64,
    pub safety_stock: f64,
    pub name: Option<String>,
    pub category: Option<String>,
    pub cost_price: Option<f64>,
    pub selling_price: Option<f64>,
    pub supplier_lead_time: Option<u32>,
    pub sales: Option<SalesAggregate>,
}

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The inventory file carries `last_updated` as "YYYY-MM-DD HH:MM:SS",
/// which chrono's default serde impl does not accept.
fn de_naive_datetime<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
}

fn ser_naive_datetime<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
}
