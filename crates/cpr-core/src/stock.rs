//! 備料庫存快照與揀貨狀態模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::orden::OrdenFabricacion;

/// 備料庫存快照（毛庫存，以備料ID為鍵）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockElaboraciones {
    cantidades: HashMap<String, Decimal>,
}

impl StockElaboraciones {
    /// 創建空的庫存快照
    pub fn new() -> Self {
        Self {
            cantidades: HashMap::new(),
        }
    }

    /// 設置某備料的毛庫存
    pub fn set(&mut self, elaboracion_id: String, cantidad: Decimal) {
        self.cantidades.insert(elaboracion_id, cantidad);
    }

    /// 取得某備料的毛庫存（無記錄視為 0）
    pub fn bruto(&self, elaboracion_id: &str) -> Decimal {
        self.cantidades
            .get(elaboracion_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

impl FromIterator<(String, Decimal)> for StockElaboraciones {
    fn from_iter<T: IntoIterator<Item = (String, Decimal)>>(iter: T) -> Self {
        Self {
            cantidades: iter.into_iter().collect(),
        }
    }
}

/// 已揀貨的工單批次
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoteAsignado {
    /// 工單ID
    pub of_id: String,

    /// 容器ID
    pub container_id: String,

    /// 揀貨數量
    pub cantidad: Decimal,
}

impl LoteAsignado {
    pub fn new(of_id: String, container_id: String, cantidad: Decimal) -> Self {
        Self {
            of_id,
            container_id,
            cantidad,
        }
    }
}

/// 服務單的揀貨狀態
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickingState {
    /// 服務單ID
    pub os_id: String,

    /// 已揀貨批次
    pub item_states: Vec<LoteAsignado>,
}

impl PickingState {
    pub fn new(os_id: String) -> Self {
        Self {
            os_id,
            item_states: Vec::new(),
        }
    }

    /// 建構器模式：設置已揀貨批次
    pub fn with_item_states(mut self, item_states: Vec<LoteAsignado>) -> Self {
        self.item_states = item_states;
        self
    }
}

/// 揀貨批次的位置資訊
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickingRef {
    /// 服務單ID
    pub os_id: String,

    /// 容器ID
    pub container_id: String,
}

/// 計算全域已保留庫存：每個備料被揀貨批次佔用的總量
///
/// 揀貨批次只記工單ID，需經工單取得對應的備料ID；找不到工單的批次忽略
pub fn stock_asignado_global(
    picking_states: &[PickingState],
    ordenes: &[OrdenFabricacion],
) -> HashMap<String, Decimal> {
    let orden_map: HashMap<&str, &OrdenFabricacion> =
        ordenes.iter().map(|of| (of.id.as_str(), of)).collect();

    let mut asignado: HashMap<String, Decimal> = HashMap::new();
    for state in picking_states {
        for lote in &state.item_states {
            if let Some(of) = orden_map.get(lote.of_id.as_str()) {
                *asignado
                    .entry(of.elaboracion_id.clone())
                    .or_insert(Decimal::ZERO) += lote.cantidad;
            }
        }
    }
    asignado
}

/// 查找某工單被揀貨到哪張服務單、哪個容器
pub fn picking_info(picking_states: &[PickingState], of_id: &str) -> Option<PickingRef> {
    for state in picking_states {
        if let Some(lote) = state.item_states.iter().find(|l| l.of_id == of_id) {
            return Some(PickingRef {
                os_id: state.os_id.clone(),
                container_id: lote.container_id.clone(),
            });
        }
    }
    None
}
