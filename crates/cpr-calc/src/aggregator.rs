//! 需求彙總：把範圍內的美食訂單展開成每個備料的需求

use chrono::NaiveDate;
use cpr_core::{
    ComercialBriefing, Elaboracion, GastronomyOrder, PartidaProduccion, Receta, ServiceOrder,
    TipoExpedicion, TipoLinea, UnidadMedida,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::AvisoCalculo;

/// 需求的完整追溯記錄（每筆對應一個 活動×節點×食譜 組合）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NecesidadDesgloseItem {
    /// 服務單ID
    pub os_id: String,

    /// 服務單編號
    pub os_number: String,

    /// 活動場地
    pub os_space: String,

    /// 簡報節點ID（無法對應時為空）
    pub hito_id: Option<String>,

    /// 節點描述
    pub hito_descripcion: Option<String>,

    /// 節點日期
    pub fecha_hito: Option<NaiveDate>,

    /// 食譜ID
    pub receta_id: String,

    /// 食譜名稱
    pub receta_nombre: String,

    /// 食譜份數
    pub cantidad_receta: Decimal,

    /// 換算後的備料需求量
    pub cantidad_necesaria: Decimal,
}

/// 單日需求
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesgloseDiario {
    pub fecha: NaiveDate,
    pub cantidad: Decimal,
}

/// 備料需求彙總項目
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NecesidadItem {
    /// 備料ID
    pub id: String,

    /// 備料名稱
    pub nombre: String,

    /// 彙總後總需求量
    pub cantidad_necesaria_total: Decimal,

    /// 生產單位
    pub unidad: UnidadMedida,

    /// 貢獻需求的服務單ID集合
    pub os_ids: BTreeSet<String>,

    /// 生產工段
    pub partida: PartidaProduccion,

    /// 出貨保存方式
    pub tipo_expedicion: TipoExpedicion,

    /// 套用的庫存量（淨額計算後填入）
    pub stock_disponible: Decimal,

    /// 既有工單已計劃數量（淨額計算後填入）
    pub cantidad_planificada: Decimal,

    /// 淨需求量（淨額計算後填入）
    pub cantidad_neta: Decimal,

    /// 逐日需求
    pub desglose_diario: Vec<DesgloseDiario>,

    /// 使用到此備料的食譜名稱
    pub recetas: Vec<String>,

    /// 完整追溯記錄
    pub desglose_completo: Vec<NecesidadDesgloseItem>,
}

impl NecesidadItem {
    /// 依備料主檔創建空的需求項目
    fn nueva(elaboracion: &Elaboracion) -> Self {
        Self {
            id: elaboracion.id.clone(),
            nombre: elaboracion.nombre.clone(),
            cantidad_necesaria_total: Decimal::ZERO,
            unidad: elaboracion.unidad_produccion,
            os_ids: BTreeSet::new(),
            partida: elaboracion.partida_produccion,
            tipo_expedicion: elaboracion.tipo_expedicion,
            stock_disponible: Decimal::ZERO,
            cantidad_planificada: Decimal::ZERO,
            cantidad_neta: Decimal::ZERO,
            desglose_diario: Vec::new(),
            recetas: Vec::new(),
            desglose_completo: Vec::new(),
        }
    }
}

/// 需求彙總器
pub struct NeedsAggregator;

impl NeedsAggregator {
    /// 彙總範圍內訂單的備料需求
    ///
    /// 解析不到的資料（簡報、食譜、備料）會略過該項並留下診斷，
    /// 不會中斷整體計算
    pub fn aggregate(
        orders_en_rango: &[&GastronomyOrder],
        os_map: &HashMap<&str, &ServiceOrder>,
        briefings: &[ComercialBriefing],
        recetas: &HashMap<String, Receta>,
        elaboraciones: &HashMap<String, Elaboracion>,
    ) -> (BTreeMap<String, NecesidadItem>, Vec<AvisoCalculo>) {
        let mut necesidades: BTreeMap<String, NecesidadItem> = BTreeMap::new();
        let mut avisos = Vec::new();

        for order in orders_en_rango {
            let Some(os) = os_map.get(order.os_id.as_str()) else {
                continue;
            };
            let Some(fecha) = os.start_date else {
                continue;
            };

            let Some(briefing) = briefings.iter().find(|b| b.os_id == order.os_id) else {
                avisos.push(AvisoCalculo::aviso(
                    order.os_id.clone(),
                    "服務單缺少商務簡報，整張訂單略過".to_string(),
                ));
                continue;
            };

            for item in &order.items {
                if item.tipo != TipoLinea::Item {
                    continue;
                }

                let Some(receta) = recetas.get(&item.receta_id) else {
                    avisos.push(AvisoCalculo::aviso(
                        item.receta_id.clone(),
                        format!("找不到食譜 ({})，訂單行略過", item.nombre),
                    ));
                    continue;
                };

                for elab_en_receta in &receta.elaboraciones {
                    let Some(elab) = elaboraciones.get(&elab_en_receta.elaboracion_id) else {
                        avisos.push(AvisoCalculo::aviso(
                            elab_en_receta.elaboracion_id.clone(),
                            format!("找不到備料 ({})，引用略過", elab_en_receta.nombre),
                        ));
                        continue;
                    };

                    let necesidad = necesidades
                        .entry(elab.id.clone())
                        .or_insert_with(|| NecesidadItem::nueva(elab));

                    let cantidad_necesaria = item.cantidad() * elab_en_receta.cantidad;
                    necesidad.cantidad_necesaria_total += cantidad_necesaria;
                    necesidad.os_ids.insert(order.os_id.clone());

                    if !necesidad.recetas.contains(&receta.nombre) {
                        necesidad.recetas.push(receta.nombre.clone());
                    }

                    match necesidad
                        .desglose_diario
                        .iter_mut()
                        .find(|d| d.fecha == fecha)
                    {
                        Some(dia) => dia.cantidad += cantidad_necesaria,
                        None => necesidad.desglose_diario.push(DesgloseDiario {
                            fecha,
                            cantidad: cantidad_necesaria,
                        }),
                    }

                    let hito = briefing.hito(&order.id);
                    necesidad.desglose_completo.push(NecesidadDesgloseItem {
                        os_id: os.id.clone(),
                        os_number: os.service_number.clone(),
                        os_space: os.space.clone(),
                        hito_id: hito.map(|h| h.id.clone()),
                        hito_descripcion: hito.map(|h| h.descripcion.clone()),
                        fecha_hito: hito.and_then(|h| h.fecha),
                        receta_id: receta.id.clone(),
                        receta_nombre: receta.nombre.clone(),
                        cantidad_receta: item.cantidad(),
                        cantidad_necesaria,
                    });
                }
            }
        }

        (necesidades, avisos)
    }
}
