//! 計算結果緩存

use std::collections::HashMap;

use cpr_calc::CprResult;
use cpr_core::RangoFechas;

use crate::dirty_tracking::DirtyTracker;

/// 以日期範圍為鍵的 CPR 計算結果緩存
///
/// 搭配 [`DirtyTracker`] 使用：輸入有變動時呼叫 [`ResultCache::invalidate`]
/// 清空緩存並重置髒標記
pub struct ResultCache {
    resultados: HashMap<RangoFechas, CprResult>,
    tracker: DirtyTracker,
}

impl ResultCache {
    /// 創建空的緩存
    pub fn new() -> Self {
        Self {
            resultados: HashMap::new(),
            tracker: DirtyTracker::new(),
        }
    }

    /// 記錄某輸入集合已變動
    pub fn mark_dirty(&mut self, collection: impl Into<String>) {
        self.tracker.mark_dirty(collection);
    }

    /// 查詢緩存結果
    ///
    /// 有髒標記時一律視為未命中
    pub fn get(&self, rango: &RangoFechas) -> Option<&CprResult> {
        if self.tracker.any_dirty() {
            return None;
        }
        self.resultados.get(rango)
    }

    /// 存入計算結果
    ///
    /// 存入前若有髒標記，先清空既有緩存再重置標記
    pub fn insert(&mut self, rango: RangoFechas, resultado: CprResult) {
        if self.tracker.any_dirty() {
            self.invalidate();
        }
        self.resultados.insert(rango, resultado);
    }

    /// 清空緩存並重置髒標記
    pub fn invalidate(&mut self) {
        self.resultados.clear();
        self.tracker.clear();
    }

    /// 緩存筆數
    pub fn len(&self) -> usize {
        self.resultados.len()
    }

    /// 緩存是否為空
    pub fn is_empty(&self) -> bool {
        self.resultados.is_empty()
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}
