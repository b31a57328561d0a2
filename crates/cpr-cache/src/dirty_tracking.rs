//! 輸入集合的髒標記追蹤

use std::collections::HashSet;

/// 髒標記追蹤器
///
/// 以輸入集合名稱（例如 "ordenes"、"stock"）為單位記錄變動，
/// 有任何髒標記時緩存的計算結果即失效
pub struct DirtyTracker {
    dirty_collections: HashSet<String>,
}

impl DirtyTracker {
    /// 創建新的追蹤器
    pub fn new() -> Self {
        Self {
            dirty_collections: HashSet::new(),
        }
    }

    /// 標記集合為髒
    pub fn mark_dirty(&mut self, collection: impl Into<String>) {
        self.dirty_collections.insert(collection.into());
    }

    /// 檢查集合是否為髒
    pub fn is_dirty(&self, collection: &str) -> bool {
        self.dirty_collections.contains(collection)
    }

    /// 是否有任何集合變動
    pub fn any_dirty(&self) -> bool {
        !self.dirty_collections.is_empty()
    }

    /// 清除所有髒標記
    pub fn clear(&mut self) {
        self.dirty_collections.clear();
    }

    /// 獲取所有髒集合
    pub fn dirty_collections(&self) -> Vec<String> {
        self.dirty_collections.iter().cloned().collect()
    }
}

impl Default for DirtyTracker {
    fn default() -> Self {
        Self::new()
    }
}
