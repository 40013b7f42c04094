use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::server::EstadoApp;

/// GET /feriados
/// Lista los feriados cargados al iniciar el servidor.
pub async fn feriados_handler(estado: web::Data<EstadoApp>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "total": estado.feriados.len(),
        "feriados": estado.feriados.iter().collect::<Vec<_>>()
    }))
}
