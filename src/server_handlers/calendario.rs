use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::api_json::{ejecutar_calendario, parse_calendario_value};

/// POST /calendario
/// Devuelve la grilla de 42 celdas del mes de `fecha` con las sesiones ubicadas.
pub async fn calendario_handler(body: web::Json<serde_json::Value>) -> impl Responder {
    let params = match parse_calendario_value(body.into_inner()) {
        Ok(p) => p,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("entrada inválida: {}", e)})),
    };
    match ejecutar_calendario(&params) {
        Ok(grilla) => HttpResponse::Ok().json(grilla),
        Err(e) => HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
    }
}
