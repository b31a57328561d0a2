//! 逐日生產報表

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use cpr_core::{
    Elaboracion, GastronomyOrder, PartidaProduccion, RangoFechas, Receta, ServiceOrder, TipoLinea,
    UnidadMedida,
};

/// 報表中食譜的組成備料
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponenteReporte {
    pub nombre: String,

    /// 每份用量
    pub cantidad: Decimal,

    /// 備料主檔解析不到時為空
    pub unidad: Option<UnidadMedida>,

    /// 範圍內累計用量
    pub cantidad_total: Decimal,
}

/// 備料被哪個食譜使用
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsadoEn {
    pub nombre: String,

    /// 食譜份數
    pub cantidad: Decimal,

    /// 固定為份數單位
    pub unidad: UnidadMedida,
}

/// 報表行（食譜或備料）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReporteProduccionItem {
    pub id: String,
    pub nombre: String,
    pub partida: PartidaProduccion,

    /// 範圍內總量
    pub ud_totales: Decimal,

    pub unidad: UnidadMedida,

    /// 逐日數量
    pub necesidades_por_dia: BTreeMap<NaiveDate, Decimal>,

    /// 組成備料（僅食譜行）
    pub componentes: Option<Vec<ComponenteReporte>>,

    /// 使用此備料的食譜（僅備料行）
    pub usado_en: Option<Vec<UsadoEn>>,
}

/// 報表摘要
///
/// 明細與人數欄位的資料來源尚未接上，維持空值
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReporteResumen {
    /// 涉及的服務單數
    pub contratos: usize,
    pub contratos_detalle: Vec<String>,

    /// 範圍內美食訂單數
    pub servicios: usize,
    pub servicios_detalle: Vec<String>,

    pub comensales: u32,

    /// 食譜行數
    pub referencias: usize,

    /// 食譜總份數
    pub unidades: Decimal,

    /// 備料行數
    pub elaboraciones: usize,

    pub resumen_por_partida: BTreeMap<String, Decimal>,
}

/// 逐日生產報表
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReporteData {
    /// 範圍內的每一天
    pub fechas: Vec<NaiveDate>,

    pub resumen: ReporteResumen,

    /// 食譜行
    pub referencias: Vec<ReporteProduccionItem>,

    /// 備料行
    pub elaboraciones: Vec<ReporteProduccionItem>,
}

/// 報表建構器
pub struct ReportBuilder;

impl ReportBuilder {
    /// 從範圍內的美食訂單建構逐日報表
    pub fn build(
        orders_en_rango: &[&GastronomyOrder],
        os_map: &HashMap<&str, &ServiceOrder>,
        recetas: &HashMap<String, Receta>,
        elaboraciones: &HashMap<String, Elaboracion>,
        rango: &RangoFechas,
    ) -> ReporteData {
        let mut referencias: Vec<ReporteProduccionItem> = Vec::new();
        let mut elaboraciones_reporte: Vec<ReporteProduccionItem> = Vec::new();

        for order in orders_en_rango {
            let Some(os) = os_map.get(order.os_id.as_str()) else {
                continue;
            };
            let Some(fecha) = os.start_date else {
                continue;
            };

            for item in &order.items {
                if item.tipo != TipoLinea::Item {
                    continue;
                }
                let Some(receta) = recetas.get(&item.receta_id) else {
                    continue;
                };

                let qty = item.cantidad();

                let ref_idx = match referencias.iter().position(|r| r.id == receta.id) {
                    Some(idx) => idx,
                    None => {
                        referencias.push(ReporteProduccionItem {
                            id: receta.id.clone(),
                            nombre: receta.nombre.clone(),
                            partida: PartidaProduccion::Expedicion,
                            ud_totales: Decimal::ZERO,
                            unidad: UnidadMedida::Ud,
                            necesidades_por_dia: BTreeMap::new(),
                            componentes: Some(
                                receta
                                    .elaboraciones
                                    .iter()
                                    .map(|e| {
                                        let elab = elaboraciones.get(&e.elaboracion_id);
                                        ComponenteReporte {
                                            nombre: elab
                                                .map(|el| el.nombre.clone())
                                                .unwrap_or_else(|| "?".to_string()),
                                            cantidad: e.cantidad,
                                            unidad: elab.map(|el| el.unidad_produccion),
                                            cantidad_total: Decimal::ZERO,
                                        }
                                    })
                                    .collect(),
                            ),
                            usado_en: None,
                        });
                        referencias.len() - 1
                    }
                };
                let ref_item = &mut referencias[ref_idx];

                ref_item.ud_totales += qty;
                *ref_item
                    .necesidades_por_dia
                    .entry(fecha)
                    .or_insert(Decimal::ZERO) += qty;
                if let Some(componentes) = &mut ref_item.componentes {
                    for comp in componentes {
                        comp.cantidad_total += comp.cantidad * qty;
                    }
                }

                for elab_en_receta in &receta.elaboraciones {
                    let Some(elab) = elaboraciones.get(&elab_en_receta.elaboracion_id) else {
                        continue;
                    };

                    let elab_idx =
                        match elaboraciones_reporte.iter().position(|e| e.id == elab.id) {
                            Some(idx) => idx,
                            None => {
                                elaboraciones_reporte.push(ReporteProduccionItem {
                                    id: elab.id.clone(),
                                    nombre: elab.nombre.clone(),
                                    partida: elab.partida_produccion,
                                    ud_totales: Decimal::ZERO,
                                    unidad: elab.unidad_produccion,
                                    necesidades_por_dia: BTreeMap::new(),
                                    componentes: None,
                                    usado_en: Some(Vec::new()),
                                });
                                elaboraciones_reporte.len() - 1
                            }
                        };
                    let elab_item = &mut elaboraciones_reporte[elab_idx];

                    let elab_qty = qty * elab_en_receta.cantidad;
                    elab_item.ud_totales += elab_qty;
                    *elab_item
                        .necesidades_por_dia
                        .entry(fecha)
                        .or_insert(Decimal::ZERO) += elab_qty;

                    if let Some(usado_en) = &mut elab_item.usado_en {
                        match usado_en.iter_mut().find(|u| u.nombre == receta.nombre) {
                            Some(usado) => usado.cantidad += qty,
                            None => usado_en.push(UsadoEn {
                                nombre: receta.nombre.clone(),
                                cantidad: qty,
                                unidad: UnidadMedida::Ud,
                            }),
                        }
                    }
                }
            }
        }

        let contratos: BTreeSet<&str> = orders_en_rango
            .iter()
            .map(|o| o.os_id.as_str())
            .collect();
        let unidades: Decimal = referencias.iter().map(|r| r.ud_totales).sum();

        ReporteData {
            fechas: rango.dias(),
            resumen: ReporteResumen {
                contratos: contratos.len(),
                contratos_detalle: Vec::new(),
                servicios: orders_en_rango.len(),
                servicios_detalle: Vec::new(),
                comensales: 0,
                referencias: referencias.len(),
                unidades,
                elaboraciones: elaboraciones_reporte.len(),
                resumen_por_partida: BTreeMap::new(),
            },
            referencias,
            elaboraciones: elaboraciones_reporte,
        }
    }
}
