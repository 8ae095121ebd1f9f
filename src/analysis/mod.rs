pub mod classifier;

pub use classifier::{
    classify, overstock_band, promotion_actions, replenishment_actions, stockout_band,
    ActionPriority, Classification, HighStockItem, LowStockItem, PromotionAction,
    ReplenishmentAction, RiskBand,
};
