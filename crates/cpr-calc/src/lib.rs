//! # CPR Calculation Engine
//!
//! 核心 CPR 生產計劃彙總引擎

pub mod aggregator;
pub mod calculator;
pub mod explosion;
pub mod filtering;
pub mod netting;
pub mod ordenes;
pub mod report;

// Re-export 主要類型
pub use aggregator::{DesgloseDiario, NecesidadDesgloseItem, NecesidadItem, NeedsAggregator};
pub use calculator::{CprCalculator, CprInputs};
pub use explosion::{
    lineas_pedido, IngredienteDeCompra, LineaCompra, LineaPedido, ProveedorConLista,
    PurchaseListBuilder, UsoIngrediente,
};
pub use filtering::{gastro_orders_en_rango, FiltroOrdenes};
pub use netting::{NettingCalculator, NettingResult};
pub use ordenes::generar_ofs;
pub use report::{ReportBuilder, ReporteData, ReporteProduccionItem, ReporteResumen};

/// CPR 計算結果
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CprResult {
    /// 淨需求（需開立新工單）
    pub necesidades: Vec<NecesidadItem>,

    /// 已覆蓋需求（庫存與既有工單足以滿足）
    pub necesidades_cubiertas: Vec<NecesidadItem>,

    /// 採購清單（按供應商分組）
    pub lista_de_la_compra: Vec<ProveedorConLista>,

    /// 採購清單（攤平形式）
    pub lista_compra_plana: Vec<LineaCompra>,

    /// 逐日生產報表
    pub reporte: ReporteData,

    /// 計算過程中略過項目的診斷
    pub avisos: Vec<AvisoCalculo>,

    /// 計算耗時（毫秒）
    #[serde(skip)]
    pub calculation_time_ms: Option<u128>,
}

impl CprResult {
    /// 添加診斷
    pub fn add_aviso(&mut self, aviso: AvisoCalculo) {
        self.avisos.push(aviso);
    }
}

/// 計算診斷（取代來源系統靜默吞掉的略過項目）
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AvisoCalculo {
    /// 相關實體ID（訂單、食譜或備料）
    pub origen: String,
    pub mensaje: String,
    pub severidad: Severidad,
}

impl AvisoCalculo {
    pub fn new(origen: String, mensaje: String, severidad: Severidad) -> Self {
        Self {
            origen,
            mensaje,
            severidad,
        }
    }

    pub fn aviso(origen: String, mensaje: String) -> Self {
        Self::new(origen, mensaje, Severidad::Aviso)
    }

    pub fn error(origen: String, mensaje: String) -> Self {
        Self::new(origen, mensaje, Severidad::Error)
    }
}

/// Aviso：資料缺漏但計算繼續；Error：採購項目因此遺失
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Severidad {
    Aviso,
    Error,
}
