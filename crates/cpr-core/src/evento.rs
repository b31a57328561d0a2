//! 活動（服務單、美食訂單與商務簡報）模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 服務單狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstadoServicio {
    /// 草稿
    Borrador,
    /// 待確認
    Pendiente,
    /// 已確認
    Confirmado,
    /// 已取消
    Anulado,
}

/// 服務單（一場活動）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceOrder {
    /// 服務單ID
    pub id: String,

    /// 服務單編號
    pub service_number: String,

    /// 活動場地
    pub space: String,

    /// 活動開始日期（資料來源可能缺漏）
    pub start_date: Option<NaiveDate>,

    /// 狀態
    pub status: EstadoServicio,
}

impl ServiceOrder {
    /// 創建新的服務單（狀態為已確認）
    pub fn new(id: String, service_number: String, space: String) -> Self {
        Self {
            id,
            service_number,
            space,
            start_date: None,
            status: EstadoServicio::Confirmado,
        }
    }

    /// 建構器模式：設置開始日期
    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// 建構器模式：設置狀態
    pub fn with_status(mut self, status: EstadoServicio) -> Self {
        self.status = status;
        self
    }
}

/// 訂單行類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipoLinea {
    /// 食譜行
    Item,
    /// 分隔行（不參與計算）
    Separador,
}

/// 美食訂單行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GastronomyOrderItem {
    /// 食譜ID
    pub receta_id: String,

    /// 行類型
    pub tipo: TipoLinea,

    /// 名稱（快照）
    pub nombre: String,

    /// 份數（缺漏時視為 1）
    pub quantity: Option<Decimal>,
}

impl GastronomyOrderItem {
    /// 創建食譜行
    pub fn item(receta_id: String, nombre: String, quantity: Decimal) -> Self {
        Self {
            receta_id,
            tipo: TipoLinea::Item,
            nombre,
            quantity: Some(quantity),
        }
    }

    /// 創建分隔行
    pub fn separador(nombre: String) -> Self {
        Self {
            receta_id: String::new(),
            tipo: TipoLinea::Separador,
            nombre,
            quantity: None,
        }
    }

    /// 取得份數（缺漏時為 1）
    pub fn cantidad(&self) -> Decimal {
        self.quantity.unwrap_or(Decimal::ONE)
    }
}

/// 美食訂單（掛在商務簡報的一個節點之下）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GastronomyOrder {
    /// 訂單ID（即簡報節點ID）
    pub id: String,

    /// 所屬服務單ID
    pub os_id: String,

    /// 訂單行
    pub items: Vec<GastronomyOrderItem>,
}

impl GastronomyOrder {
    /// 創建新的美食訂單
    pub fn new(id: String, os_id: String) -> Self {
        Self {
            id,
            os_id,
            items: Vec::new(),
        }
    }

    /// 建構器模式：設置訂單行
    pub fn with_items(mut self, items: Vec<GastronomyOrderItem>) -> Self {
        self.items = items;
        self
    }
}

/// 商務簡報節點（hito，活動中的一個時段）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComercialBriefingItem {
    /// 節點ID
    pub id: String,

    /// 節點日期
    pub fecha: Option<NaiveDate>,

    /// 描述
    pub descripcion: String,
}

impl ComercialBriefingItem {
    pub fn new(id: String, descripcion: String) -> Self {
        Self {
            id,
            fecha: None,
            descripcion,
        }
    }

    /// 建構器模式：設置日期
    pub fn with_fecha(mut self, fecha: NaiveDate) -> Self {
        self.fecha = Some(fecha);
        self
    }
}

/// 商務簡報（每張服務單一份）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComercialBriefing {
    /// 所屬服務單ID
    pub os_id: String,

    /// 節點清單
    pub items: Vec<ComercialBriefingItem>,
}

impl ComercialBriefing {
    /// 創建新的商務簡報
    pub fn new(os_id: String) -> Self {
        Self {
            os_id,
            items: Vec::new(),
        }
    }

    /// 建構器模式：設置節點清單
    pub fn with_items(mut self, items: Vec<ComercialBriefingItem>) -> Self {
        self.items = items;
        self
    }

    /// 依節點ID查找（美食訂單ID即其簡報節點ID）
    pub fn hito(&self, id: &str) -> Option<&ComercialBriefingItem> {
        self.items.iter().find(|h| h.id == id)
    }
}
