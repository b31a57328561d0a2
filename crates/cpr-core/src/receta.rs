//! 食譜（Receta）模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 食譜中引用的備料
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElaboracionEnReceta {
    /// 備料ID
    pub elaboracion_id: String,

    /// 備料名稱（快照）
    pub nombre: String,

    /// 每份用量
    pub cantidad: Decimal,
}

impl ElaboracionEnReceta {
    pub fn new(elaboracion_id: String, nombre: String, cantidad: Decimal) -> Self {
        Self {
            elaboracion_id,
            nombre,
            cantidad,
        }
    }
}

/// 食譜（可販售的菜單項目）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receta {
    /// 食譜ID
    pub id: String,

    /// 名稱
    pub nombre: String,

    /// 引用的備料清單
    pub elaboraciones: Vec<ElaboracionEnReceta>,
}

impl Receta {
    /// 創建新的食譜
    pub fn new(id: String, nombre: String) -> Self {
        Self {
            id,
            nombre,
            elaboraciones: Vec::new(),
        }
    }

    /// 建構器模式：設置備料清單
    pub fn with_elaboraciones(mut self, elaboraciones: Vec<ElaboracionEnReceta>) -> Self {
        self.elaboraciones = elaboraciones;
        self
    }

    /// 添加備料引用
    pub fn add_elaboracion(&mut self, elaboracion: ElaboracionEnReceta) {
        self.elaboraciones.push(elaboracion);
    }
}
