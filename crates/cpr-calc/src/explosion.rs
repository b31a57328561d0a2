//! BOM 展開：淨需求遞迴展開成供應商採購清單

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use cpr_core::{
    ArticuloERP, CprError, Elaboracion, IngredienteInterno, Proveedor, Result, TipoComponente,
    UnidadMedida,
};

use crate::aggregator::NecesidadItem;
use crate::AvisoCalculo;

/// 食材被哪個食譜、哪個備料消耗多少
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsoIngrediente {
    pub receta: String,
    pub elaboracion: String,
    pub cantidad: Decimal,
}

/// 採購清單中的一個食材項目
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredienteDeCompra {
    /// ERP 參照ID
    pub erp_id: String,

    /// 商品名稱
    pub nombre_producto: String,

    /// 供應商品號
    pub ref_proveedor: String,

    /// 採購包裝描述
    pub formato_compra: String,

    /// 淨需求量（計量單位）
    pub necesidad_neta: Decimal,

    /// 計量單位
    pub unidad_neta: UnidadMedida,

    /// 採購包裝換算量
    pub unidad_conversion: Decimal,

    /// 採購單價
    pub precio_compra: Decimal,

    /// 折扣
    pub descuento: Decimal,

    /// 用途追溯（依數量降冪）
    pub desglose_uso: Vec<UsoIngrediente>,
}

/// 依供應商分組的採購清單
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProveedorConLista {
    pub proveedor: Proveedor,
    pub lista_compra: Vec<IngredienteDeCompra>,
}

/// 攤平的採購清單行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineaCompra {
    pub proveedor_nombre: String,

    #[serde(flatten)]
    pub item: IngredienteDeCompra,
}

/// 採購下單表的一行（換算成採購包裝數）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineaPedido {
    pub proveedor_nombre: String,
    pub nombre_producto: String,
    pub ref_proveedor: String,

    /// 採購包裝數（可選無條件進位）
    pub cantidad_a_comprar: Decimal,

    pub formato_compra: String,
    pub necesidad_neta: Decimal,
    pub unidad_neta: UnidadMedida,
}

/// 攤平清單換算成下單表
///
/// 包裝換算量為零時以 1 作為除數，避免除以零
pub fn lineas_pedido(lista_plana: &[LineaCompra], redondear: bool) -> Vec<LineaPedido> {
    lista_plana
        .iter()
        .map(|linea| {
            let divisor = if linea.item.unidad_conversion.is_zero() {
                Decimal::ONE
            } else {
                linea.item.unidad_conversion
            };
            let exacta = linea.item.necesidad_neta / divisor;
            let cantidad_a_comprar = if redondear { exacta.ceil() } else { exacta };

            LineaPedido {
                proveedor_nombre: linea.proveedor_nombre.clone(),
                nombre_producto: linea.item.nombre_producto.clone(),
                ref_proveedor: linea.item.ref_proveedor.clone(),
                cantidad_a_comprar,
                formato_compra: linea.item.formato_compra.clone(),
                necesidad_neta: linea.item.necesidad_neta,
                unidad_neta: linea.item.unidad_neta,
            }
        })
        .collect()
}

/// 食材需求累計
#[derive(Debug, Default)]
struct AcumuladoIngrediente {
    cantidad: Decimal,
    desglose_uso: Vec<UsoIngrediente>,
}

/// 採購清單建構器（持有主檔索引）
pub struct PurchaseListBuilder<'a> {
    elaboraciones: &'a HashMap<String, Elaboracion>,
    ingredientes: &'a HashMap<String, IngredienteInterno>,
    /// 以 ERP 參照ID 為鍵
    articulos: &'a HashMap<String, ArticuloERP>,
    /// 以 ERP 端供應商ID 為鍵
    proveedores: &'a HashMap<String, Proveedor>,
}

impl<'a> PurchaseListBuilder<'a> {
    pub fn new(
        elaboraciones: &'a HashMap<String, Elaboracion>,
        ingredientes: &'a HashMap<String, IngredienteInterno>,
        articulos: &'a HashMap<String, ArticuloERP>,
        proveedores: &'a HashMap<String, Proveedor>,
    ) -> Self {
        Self {
            elaboraciones,
            ingredientes,
            articulos,
            proveedores,
        }
    }

    /// 從淨需求清單建構供應商採購清單與攤平清單
    ///
    /// BOM 出現循環時整體計算失敗；主檔解析不到的項目略過並留下診斷
    pub fn build(
        &self,
        necesidades_netas: &[NecesidadItem],
    ) -> Result<(Vec<ProveedorConLista>, Vec<LineaCompra>, Vec<AvisoCalculo>)> {
        let mut acumulado: BTreeMap<String, AcumuladoIngrediente> = BTreeMap::new();
        let mut avisos = Vec::new();

        for necesidad in necesidades_netas {
            for desglose in &necesidad.desglose_completo {
                let mut camino = Vec::new();
                self.explotar(
                    &necesidad.id,
                    desglose.cantidad_necesaria,
                    &desglose.receta_nombre,
                    &mut camino,
                    &mut acumulado,
                    &mut avisos,
                )?;
            }
        }

        let mut por_proveedor: BTreeMap<String, ProveedorConLista> = BTreeMap::new();

        for (ing_id, data) in acumulado {
            let Some(ingrediente) = self.ingredientes.get(&ing_id) else {
                avisos.push(AvisoCalculo::error(
                    ing_id.clone(),
                    "找不到內部食材，採購項目遺失".to_string(),
                ));
                continue;
            };

            let Some(articulo) = self.articulos.get(&ingrediente.producto_erp_link_id) else {
                avisos.push(AvisoCalculo::error(
                    ingrediente.id.clone(),
                    format!(
                        "食材 {} 未連結到 ERP 商品，採購項目遺失",
                        ingrediente.nombre_ingrediente
                    ),
                ));
                continue;
            };

            let Some(proveedor) = self.proveedores.get(&articulo.id_proveedor) else {
                avisos.push(AvisoCalculo::error(
                    articulo.id.clone(),
                    format!(
                        "商品 {} 找不到供應商，採購項目遺失",
                        articulo.nombre_producto_erp
                    ),
                ));
                continue;
            };

            let entrada = por_proveedor
                .entry(proveedor.id.clone())
                .or_insert_with(|| ProveedorConLista {
                    proveedor: proveedor.clone(),
                    lista_compra: Vec::new(),
                });

            let erp_id = if articulo.id_referencia_erp.is_empty() {
                articulo.id.clone()
            } else {
                articulo.id_referencia_erp.clone()
            };

            match entrada
                .lista_compra
                .iter_mut()
                .find(|item| item.erp_id == erp_id)
            {
                Some(existente) => {
                    existente.necesidad_neta += data.cantidad;
                    existente.desglose_uso.extend(data.desglose_uso);
                }
                None => entrada.lista_compra.push(IngredienteDeCompra {
                    erp_id,
                    nombre_producto: articulo.nombre_producto_erp.clone(),
                    ref_proveedor: articulo.referencia_proveedor.clone(),
                    formato_compra: articulo.formato_compra(),
                    necesidad_neta: data.cantidad,
                    unidad_neta: articulo.unidad,
                    unidad_conversion: articulo.unidad_conversion,
                    precio_compra: articulo.precio_compra,
                    descuento: articulo.descuento,
                    desglose_uso: data.desglose_uso,
                }),
            }
        }

        let mut lista: Vec<ProveedorConLista> = por_proveedor.into_values().collect();
        for proveedor in &mut lista {
            for item in &mut proveedor.lista_compra {
                item.desglose_uso
                    .sort_by(|a, b| b.cantidad.cmp(&a.cantidad));
            }
        }
        lista.sort_by(|a, b| a.proveedor.nombre_comercial.cmp(&b.proveedor.nombre_comercial));

        let mut plana: Vec<LineaCompra> = lista
            .iter()
            .flat_map(|p| {
                p.lista_compra.iter().map(|item| LineaCompra {
                    proveedor_nombre: p.proveedor.nombre_comercial.clone(),
                    item: item.clone(),
                })
            })
            .collect();
        plana.sort_by(|a, b| {
            a.proveedor_nombre
                .cmp(&b.proveedor_nombre)
                .then_with(|| a.item.nombre_producto.cmp(&b.item.nombre_producto))
        });

        Ok((lista, plana, avisos))
    }

    /// 遞迴展開一個備料的 BOM
    ///
    /// `camino` 記錄目前展開路徑，重複出現即為循環
    fn explotar(
        &self,
        elab_id: &str,
        cantidad_requerida: Decimal,
        receta_nombre: &str,
        camino: &mut Vec<String>,
        acumulado: &mut BTreeMap<String, AcumuladoIngrediente>,
        avisos: &mut Vec<AvisoCalculo>,
    ) -> Result<()> {
        if camino.iter().any(|id| id == elab_id) {
            let ciclo = format!("{} -> {}", camino.join(" -> "), elab_id);
            return Err(CprError::BomCiclica(ciclo));
        }

        let Some(elaboracion) = self.elaboraciones.get(elab_id) else {
            avisos.push(AvisoCalculo::aviso(
                elab_id.to_string(),
                "找不到備料，BOM 分支略過".to_string(),
            ));
            return Ok(());
        };

        camino.push(elab_id.to_string());
        let ratio = elaboracion.ratio_lote(cantidad_requerida);

        for comp in &elaboracion.componentes {
            let cantidad_componente = comp.cantidad * ratio;
            match comp.tipo {
                TipoComponente::Ingrediente => {
                    let entrada = acumulado.entry(comp.componente_id.clone()).or_default();
                    entrada.cantidad += cantidad_componente;
                    entrada.desglose_uso.push(UsoIngrediente {
                        receta: receta_nombre.to_string(),
                        elaboracion: elaboracion.nombre.clone(),
                        cantidad: cantidad_componente,
                    });
                }
                TipoComponente::Elaboracion => {
                    self.explotar(
                        &comp.componente_id,
                        cantidad_componente,
                        receta_nombre,
                        camino,
                        acumulado,
                        avisos,
                    )?;
                }
            }
        }

        camino.pop();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpr_core::{ComponenteElaboracion, PartidaProduccion, TipoExpedicion};
    use std::collections::BTreeSet;

    fn necesidad_con_desglose(elab_id: &str, cantidad: Decimal) -> NecesidadItem {
        NecesidadItem {
            id: elab_id.to_string(),
            nombre: format!("Elab {elab_id}"),
            cantidad_necesaria_total: cantidad,
            unidad: UnidadMedida::Kg,
            os_ids: BTreeSet::new(),
            partida: PartidaProduccion::Caliente,
            tipo_expedicion: TipoExpedicion::Refrigerado,
            stock_disponible: Decimal::ZERO,
            cantidad_planificada: Decimal::ZERO,
            cantidad_neta: cantidad,
            desglose_diario: Vec::new(),
            recetas: vec!["Paella".to_string()],
            desglose_completo: vec![crate::aggregator::NecesidadDesgloseItem {
                os_id: "OS-1".to_string(),
                os_number: "2026-031".to_string(),
                os_space: "Finca Mar".to_string(),
                hito_id: None,
                hito_descripcion: None,
                fecha_hito: None,
                receta_id: "REC-1".to_string(),
                receta_nombre: "Paella".to_string(),
                cantidad_receta: Decimal::from(10),
                cantidad_necesaria: cantidad,
            }],
        }
    }

    fn catalogo_compra() -> (
        HashMap<String, IngredienteInterno>,
        HashMap<String, ArticuloERP>,
        HashMap<String, Proveedor>,
    ) {
        let ingredientes = HashMap::from([
            (
                "ING-1".to_string(),
                IngredienteInterno::new(
                    "ING-1".to_string(),
                    "Arroz bomba".to_string(),
                    "ERP-1".to_string(),
                ),
            ),
            (
                "ING-2".to_string(),
                IngredienteInterno::new(
                    "ING-2".to_string(),
                    "Aceite de oliva".to_string(),
                    "ERP-2".to_string(),
                ),
            ),
        ]);

        let articulos = HashMap::from([
            (
                "ERP-1".to_string(),
                ArticuloERP::new(
                    "ART-1".to_string(),
                    "ERP-1".to_string(),
                    "PROV-ERP-A".to_string(),
                    "Arroz bomba saco".to_string(),
                    UnidadMedida::Kg,
                    Decimal::from(25),
                    Decimal::from(40),
                ),
            ),
            (
                "ERP-2".to_string(),
                ArticuloERP::new(
                    "ART-2".to_string(),
                    "ERP-2".to_string(),
                    "PROV-ERP-B".to_string(),
                    "Aceite garrafa".to_string(),
                    UnidadMedida::L,
                    Decimal::from(5),
                    Decimal::from(28),
                ),
            ),
        ]);

        let proveedores = HashMap::from([
            (
                "PROV-ERP-A".to_string(),
                Proveedor::new(
                    "PROV-1".to_string(),
                    "PROV-ERP-A".to_string(),
                    "Arrocera Delta".to_string(),
                ),
            ),
            (
                "PROV-ERP-B".to_string(),
                Proveedor::new(
                    "PROV-2".to_string(),
                    "PROV-ERP-B".to_string(),
                    "Aceites Serra".to_string(),
                ),
            ),
        ]);

        (ingredientes, articulos, proveedores)
    }

    #[test]
    fn test_nested_explosion() {
        // ELAB-A（批次 5）需求 20 → ratio 4
        //   食材 ING-1 × 1 → 4
        //   備料 ELAB-B × 2 → 8；ELAB-B（批次 4）ratio 2，食材 ING-2 × 1 → 2
        let elab_a = Elaboracion::new(
            "ELAB-A".to_string(),
            "Sofrito".to_string(),
            Decimal::from(5),
            UnidadMedida::Kg,
            PartidaProduccion::Caliente,
        )
        .with_componentes(vec![
            ComponenteElaboracion::ingrediente(
                "ING-1".to_string(),
                "Arroz bomba".to_string(),
                Decimal::ONE,
            ),
            ComponenteElaboracion::elaboracion(
                "ELAB-B".to_string(),
                "Fondo".to_string(),
                Decimal::from(2),
            ),
        ]);
        let elab_b = Elaboracion::new(
            "ELAB-B".to_string(),
            "Fondo".to_string(),
            Decimal::from(4),
            UnidadMedida::L,
            PartidaProduccion::Caliente,
        )
        .with_componentes(vec![ComponenteElaboracion::ingrediente(
            "ING-2".to_string(),
            "Aceite de oliva".to_string(),
            Decimal::ONE,
        )]);

        let elaboraciones = HashMap::from([
            ("ELAB-A".to_string(), elab_a),
            ("ELAB-B".to_string(), elab_b),
        ]);
        let (ingredientes, articulos, proveedores) = catalogo_compra();
        let builder =
            PurchaseListBuilder::new(&elaboraciones, &ingredientes, &articulos, &proveedores);

        let netas = vec![necesidad_con_desglose("ELAB-A", Decimal::from(20))];
        let (lista, plana, avisos) = builder.build(&netas).unwrap();

        assert!(avisos.is_empty());
        assert_eq!(lista.len(), 2);

        // 供應商按商號名稱排序
        assert_eq!(lista[0].proveedor.nombre_comercial, "Aceites Serra");
        assert_eq!(lista[1].proveedor.nombre_comercial, "Arrocera Delta");

        let aceite = &lista[0].lista_compra[0];
        assert_eq!(aceite.necesidad_neta, Decimal::from(2));
        assert_eq!(aceite.desglose_uso[0].elaboracion, "Fondo");

        let arroz = &lista[1].lista_compra[0];
        assert_eq!(arroz.necesidad_neta, Decimal::from(4));
        assert_eq!(arroz.formato_compra, "25 KG");

        // 攤平清單排序：供應商、商品
        assert_eq!(plana.len(), 2);
        assert_eq!(plana[0].proveedor_nombre, "Aceites Serra");
    }

    #[test]
    fn test_cycle_detection() {
        let elab_a = Elaboracion::new(
            "ELAB-A".to_string(),
            "A".to_string(),
            Decimal::from(5),
            UnidadMedida::Kg,
            PartidaProduccion::Frio,
        )
        .with_componentes(vec![ComponenteElaboracion::elaboracion(
            "ELAB-B".to_string(),
            "B".to_string(),
            Decimal::ONE,
        )]);
        let elab_b = Elaboracion::new(
            "ELAB-B".to_string(),
            "B".to_string(),
            Decimal::from(5),
            UnidadMedida::Kg,
            PartidaProduccion::Frio,
        )
        .with_componentes(vec![ComponenteElaboracion::elaboracion(
            "ELAB-A".to_string(),
            "A".to_string(),
            Decimal::ONE,
        )]);

        let elaboraciones = HashMap::from([
            ("ELAB-A".to_string(), elab_a),
            ("ELAB-B".to_string(), elab_b),
        ]);
        let (ingredientes, articulos, proveedores) = catalogo_compra();
        let builder =
            PurchaseListBuilder::new(&elaboraciones, &ingredientes, &articulos, &proveedores);

        let netas = vec![necesidad_con_desglose("ELAB-A", Decimal::from(10))];
        let result = builder.build(&netas);

        assert!(matches!(result, Err(CprError::BomCiclica(_))));
    }

    #[test]
    fn test_zero_yield_no_panic() {
        // 批次產量為零：以 1 作為除數，組件量 = 需求 × 組件單位量
        let elab = Elaboracion::new(
            "ELAB-A".to_string(),
            "Sin lote".to_string(),
            Decimal::ZERO,
            UnidadMedida::Kg,
            PartidaProduccion::Frio,
        )
        .with_componentes(vec![ComponenteElaboracion::ingrediente(
            "ING-1".to_string(),
            "Arroz bomba".to_string(),
            Decimal::ONE,
        )]);

        let elaboraciones = HashMap::from([("ELAB-A".to_string(), elab)]);
        let (ingredientes, articulos, proveedores) = catalogo_compra();
        let builder =
            PurchaseListBuilder::new(&elaboraciones, &ingredientes, &articulos, &proveedores);

        let netas = vec![necesidad_con_desglose("ELAB-A", Decimal::from(10))];
        let (lista, _, _) = builder.build(&netas).unwrap();

        assert_eq!(lista[0].lista_compra[0].necesidad_neta, Decimal::from(10));
    }

    #[test]
    fn test_unlinked_ingredient_leaves_aviso() {
        let elab = Elaboracion::new(
            "ELAB-A".to_string(),
            "Elab".to_string(),
            Decimal::from(5),
            UnidadMedida::Kg,
            PartidaProduccion::Frio,
        )
        .with_componentes(vec![ComponenteElaboracion::ingrediente(
            "ING-X".to_string(),
            "Misterioso".to_string(),
            Decimal::ONE,
        )]);

        let elaboraciones = HashMap::from([("ELAB-A".to_string(), elab)]);
        let (ingredientes, articulos, proveedores) = catalogo_compra();
        let builder =
            PurchaseListBuilder::new(&elaboraciones, &ingredientes, &articulos, &proveedores);

        let netas = vec![necesidad_con_desglose("ELAB-A", Decimal::from(10))];
        let (lista, plana, avisos) = builder.build(&netas).unwrap();

        assert!(lista.is_empty());
        assert!(plana.is_empty());
        assert_eq!(avisos.len(), 1);
        assert_eq!(avisos[0].origen, "ING-X");
        // 採購項目因此遺失，屬於 Error 級診斷
        assert_eq!(avisos[0].severidad, crate::Severidad::Error);
    }

    #[test]
    fn test_merge_mismo_articulo_entre_necesidades() {
        // 兩個淨需求透過不同內部食材連到同一 ERP 商品：
        //   ELAB-A（批次 5）需求 20 → ratio 4，ING-1  × 1 → 4
        //   ELAB-B（批次 4）需求 4  → ratio 1，ING-1B × 2 → 2
        // 同一 ERP 商品合併為一行：淨需求 6，用途追溯兩筆依數量降冪
        let elab_a = Elaboracion::new(
            "ELAB-A".to_string(),
            "Sofrito".to_string(),
            Decimal::from(5),
            UnidadMedida::Kg,
            PartidaProduccion::Caliente,
        )
        .with_componentes(vec![ComponenteElaboracion::ingrediente(
            "ING-1".to_string(),
            "Arroz bomba".to_string(),
            Decimal::ONE,
        )]);
        let elab_b = Elaboracion::new(
            "ELAB-B".to_string(),
            "Arroz meloso".to_string(),
            Decimal::from(4),
            UnidadMedida::Kg,
            PartidaProduccion::Caliente,
        )
        .with_componentes(vec![ComponenteElaboracion::ingrediente(
            "ING-1B".to_string(),
            "Arroz bomba eco".to_string(),
            Decimal::from(2),
        )]);

        let elaboraciones = HashMap::from([
            ("ELAB-A".to_string(), elab_a),
            ("ELAB-B".to_string(), elab_b),
        ]);
        let (mut ingredientes, articulos, proveedores) = catalogo_compra();
        ingredientes.insert(
            "ING-1B".to_string(),
            IngredienteInterno::new(
                "ING-1B".to_string(),
                "Arroz bomba eco".to_string(),
                "ERP-1".to_string(),
            ),
        );
        let builder =
            PurchaseListBuilder::new(&elaboraciones, &ingredientes, &articulos, &proveedores);

        let netas = vec![
            necesidad_con_desglose("ELAB-A", Decimal::from(20)),
            necesidad_con_desglose("ELAB-B", Decimal::from(4)),
        ];
        let (lista, plana, avisos) = builder.build(&netas).unwrap();

        assert!(avisos.is_empty());
        assert_eq!(lista.len(), 1);

        let arroz = &lista[0].lista_compra[0];
        assert_eq!(arroz.necesidad_neta, Decimal::from(6));

        // 用途追溯合併後依數量降冪
        assert_eq!(arroz.desglose_uso.len(), 2);
        assert_eq!(arroz.desglose_uso[0].elaboracion, "Sofrito");
        assert_eq!(arroz.desglose_uso[0].cantidad, Decimal::from(4));
        assert_eq!(arroz.desglose_uso[1].elaboracion, "Arroz meloso");
        assert_eq!(arroz.desglose_uso[1].cantidad, Decimal::from(2));

        // 攤平清單同樣只有合併後的一行
        assert_eq!(plana.len(), 1);
        assert_eq!(plana[0].item.necesidad_neta, Decimal::from(6));
    }

    #[test]
    fn test_lineas_pedido_redondeo() {
        let item = IngredienteDeCompra {
            erp_id: "ERP-1".to_string(),
            nombre_producto: "Arroz bomba saco".to_string(),
            ref_proveedor: "AB-25".to_string(),
            formato_compra: "25 KG".to_string(),
            necesidad_neta: Decimal::from(30),
            unidad_neta: UnidadMedida::Kg,
            unidad_conversion: Decimal::from(25),
            precio_compra: Decimal::from(40),
            descuento: Decimal::ZERO,
            desglose_uso: Vec::new(),
        };
        let plana = vec![LineaCompra {
            proveedor_nombre: "Arrocera Delta".to_string(),
            item,
        }];

        // 30 / 25 = 1.2；進位 → 2
        let exactas = lineas_pedido(&plana, false);
        assert_eq!(exactas[0].cantidad_a_comprar, Decimal::new(12, 1));

        let redondeadas = lineas_pedido(&plana, true);
        assert_eq!(redondeadas[0].cantidad_a_comprar, Decimal::from(2));
    }

    #[test]
    fn test_lineas_pedido_conversion_cero() {
        let item = IngredienteDeCompra {
            erp_id: "ERP-9".to_string(),
            nombre_producto: "Producto".to_string(),
            ref_proveedor: String::new(),
            formato_compra: "0 KG".to_string(),
            necesidad_neta: Decimal::from(7),
            unidad_neta: UnidadMedida::Kg,
            unidad_conversion: Decimal::ZERO,
            precio_compra: Decimal::ZERO,
            descuento: Decimal::ZERO,
            desglose_uso: Vec::new(),
        };
        let plana = vec![LineaCompra {
            proveedor_nombre: "Prov".to_string(),
            item,
        }];

        // 換算量為零：不除以零，直接採用淨需求
        let lineas = lineas_pedido(&plana, false);
        assert_eq!(lineas[0].cantidad_a_comprar, Decimal::from(7));
    }
}
