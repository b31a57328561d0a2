//! 範圍篩選與工單清單過濾

use std::collections::HashMap;

use cpr_core::{
    EstadoOrden, GastronomyOrder, OrdenFabricacion, PartidaProduccion, RangoFechas, ServiceOrder,
};

/// 選出活動開始日期落在範圍內的美食訂單
///
/// 服務單缺漏或沒有開始日期的訂單不納入
pub fn gastro_orders_en_rango<'a>(
    orders: &'a [GastronomyOrder],
    os_map: &HashMap<&str, &ServiceOrder>,
    rango: &RangoFechas,
) -> Vec<&'a GastronomyOrder> {
    orders
        .iter()
        .filter(|order| {
            os_map
                .get(order.os_id.as_str())
                .and_then(|os| os.start_date)
                .is_some_and(|fecha| rango.contiene(fecha))
        })
        .collect()
}

/// 工單清單的過濾條件
#[derive(Debug, Clone, Default)]
pub struct FiltroOrdenes {
    /// 文字搜尋（工單ID、備料名稱或負責人，不分大小寫）
    pub texto: Option<String>,

    pub estado: Option<EstadoOrden>,

    pub partida: Option<PartidaProduccion>,

    /// 以參考日期過濾
    pub rango: Option<RangoFechas>,
}

impl FiltroOrdenes {
    fn acepta(&self, orden: &OrdenFabricacion) -> bool {
        if let Some(texto) = &self.texto {
            if !texto.is_empty() {
                let buscado = texto.to_lowercase();
                let coincide = orden.id.to_lowercase().contains(&buscado)
                    || orden.elaboracion_nombre.to_lowercase().contains(&buscado)
                    || orden
                        .responsable
                        .as_deref()
                        .unwrap_or("")
                        .to_lowercase()
                        .contains(&buscado);
                if !coincide {
                    return false;
                }
            }
        }

        if let Some(estado) = self.estado {
            if orden.estado != estado {
                return false;
            }
        }

        if let Some(partida) = self.partida {
            if orden.partida_asignada != partida {
                return false;
            }
        }

        if let Some(rango) = &self.rango {
            if !rango.contiene(orden.fecha_referencia()) {
                return false;
            }
        }

        true
    }

    /// 過濾並按建立時間由新到舊排序
    pub fn filtrar_y_ordenar<'a>(
        &self,
        ordenes: &'a [OrdenFabricacion],
    ) -> Vec<&'a OrdenFabricacion> {
        let mut resultado: Vec<&OrdenFabricacion> =
            ordenes.iter().filter(|of| self.acepta(of)).collect();
        resultado.sort_by(|a, b| b.fecha_creacion.cmp(&a.fecha_creacion));
        resultado
    }
}
