//! 淨額計算：需求扣除庫存與既有工單

use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

use cpr_core::{OrdenFabricacion, RangoFechas, StockElaboraciones};

use crate::aggregator::NecesidadItem;

/// 淨額計算結果
#[derive(Debug, Clone)]
pub struct NettingResult {
    /// 淨需求（需開立新工單）
    pub netas: Vec<NecesidadItem>,

    /// 已覆蓋需求
    pub cubiertas: Vec<NecesidadItem>,
}

/// 淨額計算器
pub struct NettingCalculator;

impl NettingCalculator {
    /// 淨需求判定閾值（小於等於此值視為已覆蓋）
    pub fn epsilon() -> Decimal {
        Decimal::new(1, 3)
    }

    /// 對每個需求扣除可用庫存與範圍內既有工單的已計劃量
    ///
    /// 可用庫存 = max(0, 毛庫存 - 已保留)；套用量 = min(需求, 可用)。
    /// 淨需求下限為零，不產生負值
    pub fn calculate(
        necesidades: BTreeMap<String, NecesidadItem>,
        ordenes: &[OrdenFabricacion],
        stock: &StockElaboraciones,
        stock_asignado: &HashMap<String, Decimal>,
        rango: &RangoFechas,
    ) -> NettingResult {
        let mut netas = Vec::new();
        let mut cubiertas = Vec::new();

        for (_, mut necesidad) in necesidades {
            // 範圍內既有工單的有效數量總和
            let planificada: Decimal = ordenes
                .iter()
                .filter(|of| {
                    of.elaboracion_id == necesidad.id
                        && rango.contiene(of.fecha_produccion_prevista)
                })
                .map(|of| of.cantidad_efectiva())
                .sum();

            let bruto = stock.bruto(&necesidad.id);
            let asignado = stock_asignado
                .get(&necesidad.id)
                .copied()
                .unwrap_or(Decimal::ZERO);
            let disponible = (bruto - asignado).max(Decimal::ZERO);
            let a_utilizar = necesidad.cantidad_necesaria_total.min(disponible);

            let neta = (necesidad.cantidad_necesaria_total - a_utilizar - planificada)
                .max(Decimal::ZERO);

            necesidad.stock_disponible = a_utilizar;
            necesidad.cantidad_planificada = planificada;
            necesidad.cantidad_neta = neta;
            necesidad.desglose_diario.sort_by_key(|d| d.fecha);

            if neta > Self::epsilon() {
                netas.push(necesidad);
            } else {
                cubiertas.push(necesidad);
            }
        }

        NettingResult { netas, cubiertas }
    }
}
