//! Chart planning for the Q&A assistant.
//!
//! The engine decides which charts a question calls for by keyword
//! matching; actually drawing them is the job of an external collaborator
//! behind the `ChartRenderer` trait (tabular data in, image file plus
//! caption out). Without a renderer configured the plans are reported
//! caption-only.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::data::Dataset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    InventoryDistribution,
    SalesTrend,
    CategoryBreakdown,
    LowStockRisk,
    ProfitMargins,
    Overview,
}

impl ChartKind {
    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::InventoryDistribution => "inventory distribution",
            ChartKind::SalesTrend => "sales trend",
            ChartKind::CategoryBreakdown => "category breakdown",
            ChartKind::LowStockRisk => "low-stock risk",
            ChartKind::ProfitMargins => "profit margins",
            ChartKind::Overview => "overview",
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            ChartKind::InventoryDistribution => {
                "Current stock versus safety stock for each product"
            }
            ChartKind::SalesTrend => "Total daily sales across the observed window",
            ChartKind::CategoryBreakdown => "Stock and sales volume per product category",
            ChartKind::LowStockRisk => "Stock-out risk of products below their safety stock",
            ChartKind::ProfitMargins => "Average profit margin per product category",
            ChartKind::Overview => "Combined view of stock levels and sales activity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartPlan {
    pub kind: ChartKind,
}

/// A rendered chart on disk.
#[derive(Debug, Clone)]
pub struct ChartArtifact {
    pub path: PathBuf,
    pub caption: String,
}

#[async_trait]
pub trait ChartRenderer: Send + Sync {
    async fn render(&self, dataset: &Dataset, plan: &ChartPlan) -> anyhow::Result<ChartArtifact>;
}

/// Pick charts by keyword containment on the lowercased question. Several
/// can match at once; a question matching nothing gets the overview.
pub fn select_charts(question: &str) -> Vec<ChartPlan> {
    let question = question.to_lowercase();
    let mut plans = Vec::new();

    let matches = |keywords: &[&str]| keywords.iter().any(|k| question.contains(k));

    if matches(&["inventory", "stock", "distribution"]) {
        plans.push(ChartPlan {
            kind: ChartKind::InventoryDistribution,
        });
    }
    if matches(&["sale", "trend"]) {
        plans.push(ChartPlan {
            kind: ChartKind::SalesTrend,
        });
    }
    if matches(&["category", "categories"]) {
        plans.push(ChartPlan {
            kind: ChartKind::CategoryBreakdown,
        });
    }
    if matches(&["low stock", "out of stock", "stockout", "shortage"]) {
        plans.push(ChartPlan {
            kind: ChartKind::LowStockRisk,
        });
    }
    if matches(&["profit", "margin", "revenue", "income"]) {
        plans.push(ChartPlan {
            kind: ChartKind::ProfitMargins,
        });
    }

    if plans.is_empty() {
        plans.push(ChartPlan {
            kind: ChartKind::Overview,
        });
    }

    plans
}
