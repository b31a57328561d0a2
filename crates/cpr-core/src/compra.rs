//! 採購主檔：內部食材、ERP 商品與供應商

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::elaboracion::UnidadMedida;

/// 內部食材（廚房使用的原料，連結到 ERP 商品）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredienteInterno {
    /// 食材ID
    pub id: String,

    /// 食材名稱
    pub nombre_ingrediente: String,

    /// 連結的 ERP 商品參照ID
    pub producto_erp_link_id: String,
}

impl IngredienteInterno {
    pub fn new(id: String, nombre_ingrediente: String, producto_erp_link_id: String) -> Self {
        Self {
            id,
            nombre_ingrediente,
            producto_erp_link_id,
        }
    }
}

/// ERP 商品（可採購的供應商品項）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticuloERP {
    /// 商品ID
    pub id: String,

    /// ERP 參照ID（內部食材以此連結）
    pub id_referencia_erp: String,

    /// 供應商 ERP ID
    pub id_proveedor: String,

    /// 商品名稱
    pub nombre_producto_erp: String,

    /// 供應商品號
    pub referencia_proveedor: String,

    /// 計量單位
    pub unidad: UnidadMedida,

    /// 採購包裝換算量（每採購單位含多少計量單位）
    pub unidad_conversion: Decimal,

    /// 採購單價
    pub precio_compra: Decimal,

    /// 折扣（百分比）
    pub descuento: Decimal,
}

impl ArticuloERP {
    /// 創建新的 ERP 商品
    pub fn new(
        id: String,
        id_referencia_erp: String,
        id_proveedor: String,
        nombre_producto_erp: String,
        unidad: UnidadMedida,
        unidad_conversion: Decimal,
        precio_compra: Decimal,
    ) -> Self {
        Self {
            id,
            id_referencia_erp,
            id_proveedor,
            nombre_producto_erp,
            referencia_proveedor: String::new(),
            unidad,
            unidad_conversion,
            precio_compra,
            descuento: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置供應商品號
    pub fn with_referencia_proveedor(mut self, referencia: String) -> Self {
        self.referencia_proveedor = referencia;
        self
    }

    /// 建構器模式：設置折扣
    pub fn with_descuento(mut self, descuento: Decimal) -> Self {
        self.descuento = descuento;
        self
    }

    /// 採購包裝描述（例如 "5 KG"）
    pub fn formato_compra(&self) -> String {
        format!("{} {}", self.unidad_conversion, self.unidad.as_str())
    }
}

/// 供應商
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proveedor {
    /// 供應商ID
    pub id: String,

    /// ERP 端的供應商ID（商品以此連結）
    pub id_erp: String,

    /// 商號名稱
    pub nombre_comercial: String,

    /// 聯絡信箱
    pub email_contacto: String,

    /// 聯絡電話
    pub telefono_contacto: String,
}

impl Proveedor {
    /// 創建新的供應商
    pub fn new(id: String, id_erp: String, nombre_comercial: String) -> Self {
        Self {
            id,
            id_erp,
            nombre_comercial,
            email_contacto: String::new(),
            telefono_contacto: String::new(),
        }
    }

    /// 建構器模式：設置聯絡方式
    pub fn with_contacto(mut self, email: String, telefono: String) -> Self {
        self.email_contacto = email;
        self.telefono_contacto = telefono;
        self
    }
}
