//! 人員主檔

use serde::{Deserialize, Serialize};

/// 員工（工單負責人的候選名單來源）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Personal {
    /// 員工ID
    pub id: String,

    /// 姓名
    pub nombre: String,

    /// 部門
    pub departamento: String,
}

impl Personal {
    pub fn new(id: String, nombre: String, departamento: String) -> Self {
        Self {
            id,
            nombre,
            departamento,
        }
    }

    /// 是否屬於中央生產部門
    pub fn es_cpr(&self) -> bool {
        self.departamento == "CPR"
    }
}

/// 過濾出中央生產部門的員工（可指派為工單負責人）
pub fn personal_cpr(personal: &[Personal]) -> Vec<&Personal> {
    personal.iter().filter(|p| p.es_cpr()).collect()
}
