//! CPR 計算引擎入口

use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info};

use cpr_core::{
    stock_asignado_global, ArticuloERP, ComercialBriefing, Elaboracion, GastronomyOrder,
    IngredienteInterno, OrdenFabricacion, PickingState, Proveedor, RangoFechas, Receta, Result,
    ServiceOrder, StockElaboraciones,
};

use crate::aggregator::NeedsAggregator;
use crate::explosion::PurchaseListBuilder;
use crate::filtering::gastro_orders_en_rango;
use crate::netting::NettingCalculator;
use crate::report::ReportBuilder;
use crate::CprResult;

/// 一次計算的輸入快照（交易性資料）
#[derive(Debug, Clone, Copy)]
pub struct CprInputs<'a> {
    pub service_orders: &'a [ServiceOrder],
    pub gastronomy_orders: &'a [GastronomyOrder],
    pub briefings: &'a [ComercialBriefing],
    pub ordenes: &'a [OrdenFabricacion],
    pub stock: &'a StockElaboraciones,
    pub picking_states: &'a [PickingState],
}

/// CPR 計算器（持有主檔目錄）
pub struct CprCalculator {
    elaboraciones: HashMap<String, Elaboracion>,
    recetas: HashMap<String, Receta>,
    ingredientes: HashMap<String, IngredienteInterno>,
    /// 以 ERP 參照ID 為鍵
    articulos_erp: HashMap<String, ArticuloERP>,
    /// 以 ERP 端供應商ID 為鍵
    proveedores: HashMap<String, Proveedor>,
}

impl CprCalculator {
    /// 以主檔目錄創建計算器
    pub fn new(
        elaboraciones: Vec<Elaboracion>,
        recetas: Vec<Receta>,
        ingredientes: Vec<IngredienteInterno>,
        articulos_erp: Vec<ArticuloERP>,
        proveedores: Vec<Proveedor>,
    ) -> Self {
        Self {
            elaboraciones: elaboraciones.into_iter().map(|e| (e.id.clone(), e)).collect(),
            recetas: recetas.into_iter().map(|r| (r.id.clone(), r)).collect(),
            ingredientes: ingredientes.into_iter().map(|i| (i.id.clone(), i)).collect(),
            articulos_erp: articulos_erp
                .into_iter()
                .map(|a| {
                    let clave = if a.id_referencia_erp.is_empty() {
                        a.id.clone()
                    } else {
                        a.id_referencia_erp.clone()
                    };
                    (clave, a)
                })
                .collect(),
            proveedores: proveedores
                .into_iter()
                .map(|p| (p.id_erp.clone(), p))
                .collect(),
        }
    }

    /// 查詢備料主檔
    pub fn elaboracion(&self, id: &str) -> Option<&Elaboracion> {
        self.elaboraciones.get(id)
    }

    /// 查詢食譜主檔
    pub fn receta(&self, id: &str) -> Option<&Receta> {
        self.recetas.get(id)
    }

    /// 執行完整的 CPR 計算
    ///
    /// 流程：範圍篩選、需求彙總、淨額計算、BOM 展開成採購清單、
    /// 逐日報表。只有 BOM 循環與無效範圍會讓整體計算失敗，
    /// 其餘資料缺漏以診斷回報
    pub fn calculate(&self, inputs: &CprInputs, rango: &RangoFechas) -> Result<CprResult> {
        let inicio = Instant::now();
        info!(
            desde = %rango.desde,
            hasta = %rango.hasta,
            "開始 CPR 計算"
        );

        // Step 1: 範圍篩選
        let os_map: HashMap<&str, &ServiceOrder> = inputs
            .service_orders
            .iter()
            .map(|os| (os.id.as_str(), os))
            .collect();
        let orders_en_rango = gastro_orders_en_rango(inputs.gastronomy_orders, &os_map, rango);
        debug!("Step 1: 範圍內美食訂單 {} 張", orders_en_rango.len());

        // Step 2: 需求彙總
        let (necesidades, mut avisos) = NeedsAggregator::aggregate(
            &orders_en_rango,
            &os_map,
            inputs.briefings,
            &self.recetas,
            &self.elaboraciones,
        );
        debug!("Step 2: 彙總出 {} 項備料需求", necesidades.len());

        // Step 3: 淨額計算
        let stock_asignado = stock_asignado_global(inputs.picking_states, inputs.ordenes);
        let netting = NettingCalculator::calculate(
            necesidades,
            inputs.ordenes,
            inputs.stock,
            &stock_asignado,
            rango,
        );
        debug!(
            "Step 3: 淨需求 {} 項，已覆蓋 {} 項",
            netting.netas.len(),
            netting.cubiertas.len()
        );

        // Step 4: BOM 展開成採購清單（無淨需求時為空）
        let (lista_de_la_compra, lista_compra_plana) = if netting.netas.is_empty() {
            (Vec::new(), Vec::new())
        } else {
            let builder = PurchaseListBuilder::new(
                &self.elaboraciones,
                &self.ingredientes,
                &self.articulos_erp,
                &self.proveedores,
            );
            let (lista, plana, avisos_compra) = builder.build(&netting.netas)?;
            avisos.extend(avisos_compra);
            (lista, plana)
        };
        debug!(
            "Step 4: 採購清單涉及 {} 家供應商",
            lista_de_la_compra.len()
        );

        // Step 5: 逐日報表
        let reporte = ReportBuilder::build(
            &orders_en_rango,
            &os_map,
            &self.recetas,
            &self.elaboraciones,
            rango,
        );
        debug!(
            "Step 5: 報表含 {} 個食譜行、{} 個備料行",
            reporte.referencias.len(),
            reporte.elaboraciones.len()
        );

        let transcurrido = inicio.elapsed().as_millis();
        info!(ms = transcurrido, avisos = avisos.len(), "CPR 計算完成");

        Ok(CprResult {
            necesidades: netting.netas,
            necesidades_cubiertas: netting.cubiertas,
            lista_de_la_compra,
            lista_compra_plana,
            reporte,
            avisos,
            calculation_time_ms: Some(transcurrido),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use cpr_core::{
        ComercialBriefingItem, ComponenteElaboracion, ElaboracionEnReceta, GastronomyOrderItem,
        PartidaProduccion, UnidadMedida,
    };
    use rust_decimal::Decimal;

    fn fecha() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn rango() -> RangoFechas {
        RangoFechas::new(
            NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        )
        .unwrap()
    }

    fn calculadora() -> CprCalculator {
        let elaboraciones = vec![Elaboracion::new(
            "ELAB-1".to_string(),
            "Sofrito".to_string(),
            Decimal::from(5),
            UnidadMedida::Kg,
            PartidaProduccion::Caliente,
        )
        .with_componentes(vec![ComponenteElaboracion::ingrediente(
            "ING-1".to_string(),
            "Arroz bomba".to_string(),
            Decimal::ONE,
        )])];

        let recetas = vec![Receta::new("REC-1".to_string(), "Paella".to_string())
            .with_elaboraciones(vec![ElaboracionEnReceta::new(
                "ELAB-1".to_string(),
                "Sofrito".to_string(),
                Decimal::from(2),
            )])];

        let ingredientes = vec![IngredienteInterno::new(
            "ING-1".to_string(),
            "Arroz bomba".to_string(),
            "ERP-1".to_string(),
        )];

        let articulos = vec![ArticuloERP::new(
            "ART-1".to_string(),
            "ERP-1".to_string(),
            "PROV-ERP-A".to_string(),
            "Arroz bomba saco".to_string(),
            UnidadMedida::Kg,
            Decimal::from(25),
            Decimal::from(40),
        )];

        let proveedores = vec![Proveedor::new(
            "PROV-1".to_string(),
            "PROV-ERP-A".to_string(),
            "Arrocera Delta".to_string(),
        )];

        CprCalculator::new(elaboraciones, recetas, ingredientes, articulos, proveedores)
    }

    struct Datos {
        service_orders: Vec<ServiceOrder>,
        gastronomy_orders: Vec<GastronomyOrder>,
        briefings: Vec<ComercialBriefing>,
        stock: StockElaboraciones,
    }

    fn datos() -> Datos {
        Datos {
            service_orders: vec![ServiceOrder::new(
                "OS-1".to_string(),
                "2026-031".to_string(),
                "Finca Mar".to_string(),
            )
            .with_start_date(fecha())],
            gastronomy_orders: vec![GastronomyOrder::new(
                "HITO-1".to_string(),
                "OS-1".to_string(),
            )
            .with_items(vec![GastronomyOrderItem::item(
                "REC-1".to_string(),
                "Paella".to_string(),
                Decimal::from(10),
            )])],
            briefings: vec![ComercialBriefing::new("OS-1".to_string()).with_items(vec![
                ComercialBriefingItem::new("HITO-1".to_string(), "Almuerzo".to_string())
                    .with_fecha(fecha()),
            ])],
            stock: StockElaboraciones::new(),
        }
    }

    #[test]
    fn test_pipeline_completo() {
        let calculadora = calculadora();
        let datos = datos();
        let inputs = CprInputs {
            service_orders: &datos.service_orders,
            gastronomy_orders: &datos.gastronomy_orders,
            briefings: &datos.briefings,
            ordenes: &[],
            stock: &datos.stock,
            picking_states: &[],
        };

        let result = calculadora.calculate(&inputs, &rango()).unwrap();

        // 10 份 × 2/份 = 20，無庫存無工單 → 淨需求 20
        assert_eq!(result.necesidades.len(), 1);
        assert_eq!(result.necesidades[0].cantidad_neta, Decimal::from(20));
        assert!(result.necesidades_cubiertas.is_empty());

        // 20 / 批次 5 = ratio 4 → 食材 4 KG
        assert_eq!(result.lista_de_la_compra.len(), 1);
        let item = &result.lista_de_la_compra[0].lista_compra[0];
        assert_eq!(item.necesidad_neta, Decimal::from(4));

        assert_eq!(result.reporte.resumen.servicios, 1);
        assert!(result.avisos.is_empty());
        assert!(result.calculation_time_ms.is_some());
    }

    #[test]
    fn test_stock_cubre_sin_lista_compra() {
        // 庫存 25 覆蓋需求 20：無淨需求，採購清單為空
        let calculadora = calculadora();
        let mut datos = datos();
        datos.stock.set("ELAB-1".to_string(), Decimal::from(25));
        let inputs = CprInputs {
            service_orders: &datos.service_orders,
            gastronomy_orders: &datos.gastronomy_orders,
            briefings: &datos.briefings,
            ordenes: &[],
            stock: &datos.stock,
            picking_states: &[],
        };

        let result = calculadora.calculate(&inputs, &rango()).unwrap();

        assert!(result.necesidades.is_empty());
        assert_eq!(result.necesidades_cubiertas.len(), 1);
        assert_eq!(
            result.necesidades_cubiertas[0].stock_disponible,
            Decimal::from(20)
        );
        assert!(result.lista_de_la_compra.is_empty());
        assert!(result.lista_compra_plana.is_empty());
    }

    #[test]
    fn test_calculo_idempotente() {
        let calculadora = calculadora();
        let datos = datos();
        let inputs = CprInputs {
            service_orders: &datos.service_orders,
            gastronomy_orders: &datos.gastronomy_orders,
            briefings: &datos.briefings,
            ordenes: &[],
            stock: &datos.stock,
            picking_states: &[],
        };

        let mut primero = calculadora.calculate(&inputs, &rango()).unwrap();
        let mut segundo = calculadora.calculate(&inputs, &rango()).unwrap();

        // 除了耗時以外，重複計算必須得到完全相同的結果
        primero.calculation_time_ms = None;
        segundo.calculation_time_ms = None;
        assert_eq!(primero, segundo);
    }

    #[test]
    fn test_rango_sin_actividad() {
        let calculadora = calculadora();
        let datos = datos();
        let inputs = CprInputs {
            service_orders: &datos.service_orders,
            gastronomy_orders: &datos.gastronomy_orders,
            briefings: &datos.briefings,
            ordenes: &[],
            stock: &datos.stock,
            picking_states: &[],
        };

        // 活動在 3/14，範圍選在四月：一切為空
        let rango_vacio = RangoFechas::new(
            NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 4, 7).unwrap(),
        )
        .unwrap();
        let result = calculadora.calculate(&inputs, &rango_vacio).unwrap();

        assert!(result.necesidades.is_empty());
        assert!(result.necesidades_cubiertas.is_empty());
        assert!(result.lista_de_la_compra.is_empty());
        assert_eq!(result.reporte.resumen.servicios, 0);
    }
}
