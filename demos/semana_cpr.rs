//! 一週 CPR 計算示例

use anyhow::Result;
use chrono::NaiveDate;
use cpr_calc::{lineas_pedido, CprCalculator, CprInputs};
use cpr_core::{
    ArticuloERP, ComercialBriefing, ComercialBriefingItem, ComponenteElaboracion, Elaboracion,
    ElaboracionEnReceta, GastronomyOrder, GastronomyOrderItem, IngredienteInterno,
    PartidaProduccion, Proveedor, RangoFechas, Receta, ServiceOrder, StockElaboraciones,
    UnidadMedida,
};
use rust_decimal::Decimal;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    println!("=== 一週 CPR 計算示例 ===\n");

    // 主檔
    let sofrito = Elaboracion::new(
        "ELAB-SOFRITO".to_string(),
        "Sofrito de verduras".to_string(),
        Decimal::from(5),
        UnidadMedida::Kg,
        PartidaProduccion::Caliente,
    )
    .with_componentes(vec![ComponenteElaboracion::ingrediente(
        "ING-ARROZ".to_string(),
        "Arroz bomba".to_string(),
        Decimal::ONE,
    )]);

    let recetas = vec![Receta::new("REC-PAELLA".to_string(), "Paella".to_string())
        .with_elaboraciones(vec![ElaboracionEnReceta::new(
            "ELAB-SOFRITO".to_string(),
            "Sofrito de verduras".to_string(),
            Decimal::from(2),
        )])];

    let ingredientes = vec![IngredienteInterno::new(
        "ING-ARROZ".to_string(),
        "Arroz bomba".to_string(),
        "ERP-ARROZ".to_string(),
    )];

    let articulos = vec![ArticuloERP::new(
        "ART-ARROZ".to_string(),
        "ERP-ARROZ".to_string(),
        "PROV-ERP-DELTA".to_string(),
        "Arroz bomba saco 25kg".to_string(),
        UnidadMedida::Kg,
        Decimal::from(25),
        Decimal::from(40),
    )];

    let proveedores = vec![Proveedor::new(
        "PROV-DELTA".to_string(),
        "PROV-ERP-DELTA".to_string(),
        "Arrocera Delta".to_string(),
    )];

    let calculadora = CprCalculator::new(
        vec![sofrito],
        recetas,
        ingredientes,
        articulos,
        proveedores,
    );

    // 一場活動：3/14 午宴，120 份 Paella
    let fecha = NaiveDate::from_ymd_opt(2026, 3, 14)
        .ok_or_else(|| anyhow::anyhow!("fecha inválida"))?;
    let service_orders = vec![ServiceOrder::new(
        "OS-1".to_string(),
        "2026-031".to_string(),
        "Finca Mar".to_string(),
    )
    .with_start_date(fecha)];
    let gastronomy_orders = vec![GastronomyOrder::new(
        "HITO-ALMUERZO".to_string(),
        "OS-1".to_string(),
    )
    .with_items(vec![GastronomyOrderItem::item(
        "REC-PAELLA".to_string(),
        "Paella".to_string(),
        Decimal::from(120),
    )])];
    let briefings = vec![ComercialBriefing::new("OS-1".to_string()).with_items(vec![
        ComercialBriefingItem::new("HITO-ALMUERZO".to_string(), "Almuerzo".to_string())
            .with_fecha(fecha),
    ])];

    let mut stock = StockElaboraciones::new();
    stock.set("ELAB-SOFRITO".to_string(), Decimal::from(40));

    let rango = RangoFechas::new(
        NaiveDate::from_ymd_opt(2026, 3, 9).ok_or_else(|| anyhow::anyhow!("fecha inválida"))?,
        NaiveDate::from_ymd_opt(2026, 3, 15).ok_or_else(|| anyhow::anyhow!("fecha inválida"))?,
    )?;

    let inputs = CprInputs {
        service_orders: &service_orders,
        gastronomy_orders: &gastronomy_orders,
        briefings: &briefings,
        ordenes: &[],
        stock: &stock,
        picking_states: &[],
    };

    let result = calculadora.calculate(&inputs, &rango)?;

    println!("淨需求:");
    for necesidad in &result.necesidades {
        println!(
            "  - {}: 需求 {} {}，庫存套用 {}，淨需求 {}",
            necesidad.nombre,
            necesidad.cantidad_necesaria_total,
            necesidad.unidad.as_str(),
            necesidad.stock_disponible,
            necesidad.cantidad_neta
        );
    }

    println!("\n採購清單:");
    for proveedor in &result.lista_de_la_compra {
        println!("  {}:", proveedor.proveedor.nombre_comercial);
        for item in &proveedor.lista_compra {
            println!(
                "    - {} ({}): {} {}",
                item.nombre_producto,
                item.formato_compra,
                item.necesidad_neta,
                item.unidad_neta.as_str()
            );
        }
    }

    println!("\n下單表（進位到整包）:");
    for linea in lineas_pedido(&result.lista_compra_plana, true) {
        println!(
            "  - {} | {} × {}",
            linea.proveedor_nombre, linea.cantidad_a_comprar, linea.formato_compra
        );
    }

    if let Some(ms) = result.calculation_time_ms {
        println!("\n計算耗時 {ms} ms，診斷 {} 筆", result.avisos.len());
    }

    Ok(())
}
