//! # CPR
//!
//! 活動餐飲的中央生產計劃（CPR）彙總引擎：
//! 彙總日期範圍內的美食訂單、扣除庫存與既有工單、
//! 展開 BOM 產出供應商採購清單與逐日生產報表

pub use cpr_core::*;

pub use cpr_calc::{
    generar_ofs, lineas_pedido, AvisoCalculo, CprCalculator, CprInputs, CprResult, DesgloseDiario,
    FiltroOrdenes, IngredienteDeCompra, LineaCompra, LineaPedido, NecesidadDesgloseItem,
    NecesidadItem, ProveedorConLista, ReporteData, Severidad,
};

pub use cpr_cache::{DirtyTracker, ResultCache};
