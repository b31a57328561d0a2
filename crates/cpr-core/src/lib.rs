//! # CPR Core
//!
//! 中央生產核心（CPR）的資料模型與類型定義

pub mod compra;
pub mod elaboracion;
pub mod evento;
pub mod orden;
pub mod personal;
pub mod rango;
pub mod receta;
pub mod stock;

// Re-export 主要類型
pub use compra::{ArticuloERP, IngredienteInterno, Proveedor};
pub use elaboracion::{
    ComponenteElaboracion, Elaboracion, PartidaProduccion, TipoComponente, TipoExpedicion,
    UnidadMedida, PARTIDAS,
};
pub use evento::{
    ComercialBriefing, ComercialBriefingItem, EstadoServicio, GastronomyOrder, GastronomyOrderItem,
    ServiceOrder, TipoLinea,
};
pub use orden::{EstadoOrden, OrdenFabricacion, ESTADOS_ORDEN};
pub use personal::{personal_cpr, Personal};
pub use rango::RangoFechas;
pub use receta::{ElaboracionEnReceta, Receta};
pub use stock::{
    picking_info, stock_asignado_global, LoteAsignado, PickingRef, PickingState,
    StockElaboraciones,
};

/// CPR 錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum CprError {
    #[error("BOM 出現循環，備料: {0}")]
    BomCiclica(String),

    #[error("無效的日期範圍: {0}")]
    RangoInvalido(String),
}

pub type Result<T> = std::result::Result<T, CprError>;
