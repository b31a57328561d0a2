//! 備料（Elaboración）模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 計量單位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnidadMedida {
    /// 公斤
    Kg,
    /// 公升
    L,
    /// 個數
    Ud,
}

impl UnidadMedida {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnidadMedida::Kg => "KG",
            UnidadMedida::L => "L",
            UnidadMedida::Ud => "UD",
        }
    }
}

/// 生產工段（partida）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartidaProduccion {
    /// 冷盤區
    Frio,
    /// 熱食區
    Caliente,
    /// 甜點區
    Pasteleria,
    /// 出貨區
    Expedicion,
}

/// 所有生產工段
pub const PARTIDAS: [PartidaProduccion; 4] = [
    PartidaProduccion::Frio,
    PartidaProduccion::Caliente,
    PartidaProduccion::Pasteleria,
    PartidaProduccion::Expedicion,
];

impl PartidaProduccion {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartidaProduccion::Frio => "FRIO",
            PartidaProduccion::Caliente => "CALIENTE",
            PartidaProduccion::Pasteleria => "PASTELERIA",
            PartidaProduccion::Expedicion => "EXPEDICION",
        }
    }
}

/// 出貨保存方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipoExpedicion {
    /// 冷藏
    Refrigerado,
    /// 冷凍
    Congelado,
    /// 常溫
    Seco,
}

/// 組件類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipoComponente {
    /// 內部食材
    Ingrediente,
    /// 另一個備料（巢狀 BOM）
    Elaboracion,
}

/// 備料的組件（BOM 項目）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponenteElaboracion {
    /// 組件類型
    pub tipo: TipoComponente,

    /// 組件ID（食材ID或備料ID）
    pub componente_id: String,

    /// 組件名稱
    pub nombre: String,

    /// 每批次淨用量
    pub cantidad: Decimal,

    /// 損耗率（merma）
    pub merma: Decimal,
}

impl ComponenteElaboracion {
    /// 創建食材組件
    pub fn ingrediente(componente_id: String, nombre: String, cantidad: Decimal) -> Self {
        Self {
            tipo: TipoComponente::Ingrediente,
            componente_id,
            nombre,
            cantidad,
            merma: Decimal::ZERO,
        }
    }

    /// 創建備料組件（巢狀）
    pub fn elaboracion(componente_id: String, nombre: String, cantidad: Decimal) -> Self {
        Self {
            tipo: TipoComponente::Elaboracion,
            componente_id,
            nombre,
            cantidad,
            merma: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置損耗率
    pub fn with_merma(mut self, merma: Decimal) -> Self {
        self.merma = merma;
        self
    }
}

/// 備料（半成品批次）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Elaboracion {
    /// 備料ID
    pub id: String,

    /// 名稱
    pub nombre: String,

    /// 每批次總產量
    pub produccion_total: Decimal,

    /// 生產單位
    pub unidad_produccion: UnidadMedida,

    /// 生產工段
    pub partida_produccion: PartidaProduccion,

    /// 出貨保存方式
    pub tipo_expedicion: TipoExpedicion,

    /// 組件清單（BOM）
    pub componentes: Vec<ComponenteElaboracion>,
}

impl Elaboracion {
    /// 創建新的備料
    pub fn new(
        id: String,
        nombre: String,
        produccion_total: Decimal,
        unidad_produccion: UnidadMedida,
        partida_produccion: PartidaProduccion,
    ) -> Self {
        Self {
            id,
            nombre,
            produccion_total,
            unidad_produccion,
            partida_produccion,
            tipo_expedicion: TipoExpedicion::Refrigerado,
            componentes: Vec::new(),
        }
    }

    /// 建構器模式：設置出貨保存方式
    pub fn with_tipo_expedicion(mut self, tipo: TipoExpedicion) -> Self {
        self.tipo_expedicion = tipo;
        self
    }

    /// 建構器模式：設置組件清單
    pub fn with_componentes(mut self, componentes: Vec<ComponenteElaboracion>) -> Self {
        self.componentes = componentes;
        self
    }

    /// 添加組件
    pub fn add_componente(&mut self, componente: ComponenteElaboracion) {
        self.componentes.push(componente);
    }

    /// 計算需求量對批次產量的比例
    ///
    /// 批次產量為零時以 1 作為除數，避免除以零
    pub fn ratio_lote(&self, cantidad_requerida: Decimal) -> Decimal {
        let divisor = if self.produccion_total.is_zero() {
            Decimal::ONE
        } else {
            self.produccion_total
        };
        cantidad_requerida / divisor
    }
}
