use crate::domain::model::{Document, Row};
use serde_json::Value;

pub const MATERIALES_HEADERS: [&str; 9] = [
    "Fecha",
    "TipoDoc",
    "Serie",
    "NroDoc",
    "Cuenta",
    "Obra",
    "Direccion",
    "Total",
    "Moneda",
];

pub fn materiales_headers() -> Vec<String> {
    MATERIALES_HEADERS.iter().map(|h| h.to_string()).collect()
}

/// 1 = pesos, 2 = dólares; anything else is written as-is.
pub fn moneda_label(moneda: &Value) -> String {
    match currency_code(moneda) {
        Some(1) => return "Pesos".to_string(),
        Some(2) => return "Dólares".to_string(),
        _ => {}
    }
    match moneda {
        Value::Null => "0".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// 1.0 與 1 視為同一個代碼
fn currency_code(moneda: &Value) -> Option<i64> {
    moneda.as_i64().or_else(|| {
        moneda
            .as_f64()
            .filter(|f| f.fract() == 0.0)
            .map(|f| f as i64)
    })
}

fn trimmed(field: &Option<String>) -> Value {
    Value::String(field.as_deref().unwrap_or("").trim().to_string())
}

fn date_only(fecha: &Option<String>) -> Value {
    let fecha = fecha.as_deref().unwrap_or("");
    let date = fecha.split('T').next().unwrap_or(fecha);
    Value::String(date.to_string())
}

/// 將單據轉為固定九欄的 materiales 資料列
pub fn document_to_row(doc: &Document) -> Row {
    vec![
        date_only(&doc.fecha),
        trimmed(&doc.tipo_doc),
        trimmed(&doc.serie),
        trimmed(&doc.numero),
        trimmed(&doc.cuenta),
        trimmed(&doc.desc_cuenta),
        trimmed(&doc.dir_cuenta),
        doc.total.clone(),
        Value::String(moneda_label(&doc.moneda)),
    ]
}

pub fn documents_to_rows(docs: &[Document]) -> Vec<Row> {
    docs.iter().map(document_to_row).collect()
}
