//! # CPR Cache
//!
//! 計算結果緩存與輸入髒標記追蹤

pub mod dirty_tracking;
pub mod result_cache;

// Re-export 主要類型
pub use dirty_tracking::DirtyTracker;
pub use result_cache::ResultCache;
