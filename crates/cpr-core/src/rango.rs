//! 日期範圍（計算窗口）

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{CprError, Result};

/// 閉區間日期範圍
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangoFechas {
    /// 起日（含）
    pub desde: NaiveDate,

    /// 迄日（含）
    pub hasta: NaiveDate,
}

impl RangoFechas {
    /// 創建日期範圍
    pub fn new(desde: NaiveDate, hasta: NaiveDate) -> Result<Self> {
        if hasta < desde {
            return Err(CprError::RangoInvalido(format!(
                "迄日 {} 早於起日 {}",
                hasta, desde
            )));
        }
        Ok(Self { desde, hasta })
    }

    /// 創建單日範圍
    pub fn dia(fecha: NaiveDate) -> Self {
        Self {
            desde: fecha,
            hasta: fecha,
        }
    }

    /// 是否為單日範圍
    pub fn es_un_dia(&self) -> bool {
        self.desde == self.hasta
    }

    /// 日期是否落在範圍內
    pub fn contiene(&self, fecha: NaiveDate) -> bool {
        self.desde <= fecha && fecha <= self.hasta
    }

    /// 列舉範圍內的每一天（含首尾）
    pub fn dias(&self) -> Vec<NaiveDate> {
        let mut fechas = Vec::new();
        let mut actual = self.desde;
        while actual <= self.hasta {
            fechas.push(actual);
            match actual.succ_opt() {
                Some(siguiente) => actual = siguiente,
                None => break,
            }
        }
        fechas
    }
}
