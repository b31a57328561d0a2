//! 從淨需求開立生產工單

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::collections::HashSet;
use uuid::Uuid;

use cpr_core::OrdenFabricacion;

use crate::aggregator::NecesidadItem;

/// 為選取的淨需求開立工單
///
/// 只處理淨需求大於零的項目；工單帶出需求的單位、工段、
/// 保存方式與涉及的服務單
pub fn generar_ofs(
    necesidades: &[NecesidadItem],
    seleccion: &HashSet<String>,
    fecha_produccion: NaiveDate,
    creado: NaiveDateTime,
) -> Vec<OrdenFabricacion> {
    necesidades
        .iter()
        .filter(|n| seleccion.contains(&n.id) && n.cantidad_neta > Decimal::ZERO)
        .map(|necesidad| {
            OrdenFabricacion::new(
                Uuid::new_v4().to_string(),
                creado,
                fecha_produccion,
                necesidad.id.clone(),
                necesidad.nombre.clone(),
                necesidad.cantidad_neta,
                necesidad.unidad,
                necesidad.partida,
                necesidad.tipo_expedicion,
            )
            .with_os_ids(necesidad.os_ids.iter().cloned().collect())
        })
        .collect()
}
