use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::api_json::{ejecutar_preview, parse_preview_value, validar_limites};
use crate::server::EstadoApp;

/// POST /preview
/// Expande los patrones, los clasifica y devuelve la vista previa. Conflictos
/// y feriados vienen marcados en cada sesión; sólo la entrada inválida da 400,
/// incluido un patrón con más días que `max_dias`.
pub async fn preview_handler(estado: web::Data<EstadoApp>, body: web::Json<serde_json::Value>) -> impl Responder {
    let params = match parse_preview_value(body.into_inner()) {
        Ok(p) => p,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("entrada inválida: {}", e)})),
    };
    if let Err(e) = validar_limites(&params, estado.max_dias) {
        log::warn!("vista previa rechazada: {}", e);
        return HttpResponse::BadRequest().json(json!({"error": e.to_string()}));
    }

    // Con muchos patrones la expansión puede tardar: fuera del worker async.
    let estado = estado.into_inner();
    let blocking = tokio::task::spawn_blocking(move || ejecutar_preview(&params, &estado.feriados));

    match blocking.await {
        Ok(Ok(vista)) => HttpResponse::Ok().json(vista),
        Ok(Err(e)) => {
            log::warn!("vista previa rechazada: {}", e);
            HttpResponse::BadRequest().json(json!({"error": e.to_string()}))
        }
        Err(e) => {
            log::error!("tarea de vista previa falló: {}", e);
            HttpResponse::InternalServerError().json(json!({"error": "error interno al generar la vista previa"}))
        }
    }
}
