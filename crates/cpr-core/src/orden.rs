//! 生產工單（Orden de Fabricación）模型

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::elaboracion::{PartidaProduccion, TipoExpedicion, UnidadMedida};

/// 工單狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstadoOrden {
    /// 待處理
    Pendiente,
    /// 已指派
    Asignada,
    /// 生產中
    EnProceso,
    /// 已完成
    Finalizado,
    /// 有異常
    Incidencia,
    /// 品管已驗收
    Validado,
}

/// 所有工單狀態
pub const ESTADOS_ORDEN: [EstadoOrden; 6] = [
    EstadoOrden::Pendiente,
    EstadoOrden::Asignada,
    EstadoOrden::EnProceso,
    EstadoOrden::Finalizado,
    EstadoOrden::Incidencia,
    EstadoOrden::Validado,
];

impl EstadoOrden {
    /// 是否已完成生產（含品管驗收）
    pub fn es_finalizado(&self) -> bool {
        matches!(self, EstadoOrden::Finalizado | EstadoOrden::Validado)
    }

    /// 是否尚未開始生產
    pub fn es_previo_a_produccion(&self) -> bool {
        matches!(self, EstadoOrden::Pendiente | EstadoOrden::Asignada)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoOrden::Pendiente => "Pendiente",
            EstadoOrden::Asignada => "Asignada",
            EstadoOrden::EnProceso => "En Proceso",
            EstadoOrden::Finalizado => "Finalizado",
            EstadoOrden::Incidencia => "Incidencia",
            EstadoOrden::Validado => "Validado",
        }
    }
}

/// 生產工單
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdenFabricacion {
    /// 工單ID
    pub id: String,

    /// 建立時間
    pub fecha_creacion: NaiveDateTime,

    /// 預計生產日期
    pub fecha_produccion_prevista: NaiveDate,

    /// 指派時間
    pub fecha_asignacion: Option<NaiveDateTime>,

    /// 完成日期
    pub fecha_finalizacion: Option<NaiveDate>,

    /// 備料ID
    pub elaboracion_id: String,

    /// 備料名稱（快照）
    pub elaboracion_nombre: String,

    /// 計劃生產數量
    pub cantidad_total: Decimal,

    /// 實際生產數量（完成後回報）
    pub cantidad_real: Option<Decimal>,

    /// 單位
    pub unidad: UnidadMedida,

    /// 指派的生產工段
    pub partida_asignada: PartidaProduccion,

    /// 出貨保存方式
    pub tipo_expedicion: TipoExpedicion,

    /// 負責人
    pub responsable: Option<String>,

    /// 狀態
    pub estado: EstadoOrden,

    /// 涉及的服務單ID
    pub os_ids: Vec<String>,
}

impl OrdenFabricacion {
    /// 創建新的工單（狀態為待處理）
    pub fn new(
        id: String,
        fecha_creacion: NaiveDateTime,
        fecha_produccion_prevista: NaiveDate,
        elaboracion_id: String,
        elaboracion_nombre: String,
        cantidad_total: Decimal,
        unidad: UnidadMedida,
        partida_asignada: PartidaProduccion,
        tipo_expedicion: TipoExpedicion,
    ) -> Self {
        Self {
            id,
            fecha_creacion,
            fecha_produccion_prevista,
            fecha_asignacion: None,
            fecha_finalizacion: None,
            elaboracion_id,
            elaboracion_nombre,
            cantidad_total,
            cantidad_real: None,
            unidad,
            partida_asignada,
            tipo_expedicion,
            responsable: None,
            estado: EstadoOrden::Pendiente,
            os_ids: Vec::new(),
        }
    }

    /// 建構器模式：設置涉及的服務單
    pub fn with_os_ids(mut self, os_ids: Vec<String>) -> Self {
        self.os_ids = os_ids;
        self
    }

    /// 建構器模式：設置狀態
    pub fn with_estado(mut self, estado: EstadoOrden) -> Self {
        self.estado = estado;
        self
    }

    /// 建構器模式：設置實際生產數量
    pub fn with_cantidad_real(mut self, cantidad_real: Decimal) -> Self {
        self.cantidad_real = Some(cantidad_real);
        self
    }

    /// 建構器模式：設置完成日期
    pub fn with_fecha_finalizacion(mut self, fecha: NaiveDate) -> Self {
        self.fecha_finalizacion = Some(fecha);
        self
    }

    /// 建構器模式：設置負責人
    pub fn with_responsable(mut self, responsable: String) -> Self {
        self.responsable = Some(responsable);
        self
    }

    /// 有效數量：已完成且有回報時採用實際數量，否則採用計劃數量
    pub fn cantidad_efectiva(&self) -> Decimal {
        match (self.estado.es_finalizado(), self.cantidad_real) {
            (true, Some(real)) => real,
            _ => self.cantidad_total,
        }
    }

    /// 指派負責人（狀態轉為已指派）
    pub fn asignar_responsable(&mut self, responsable: String, fecha: NaiveDateTime) {
        self.responsable = Some(responsable);
        self.estado = EstadoOrden::Asignada;
        self.fecha_asignacion = Some(fecha);
    }

    /// 清單過濾用的參考日期：未開始生產看預計日期，否則看完成日期（缺漏時退回預計日期）
    pub fn fecha_referencia(&self) -> NaiveDate {
        if self.estado.es_previo_a_produccion() {
            self.fecha_produccion_prevista
        } else {
            self.fecha_finalizacion
                .unwrap_or(self.fecha_produccion_prevista)
        }
    }
}
