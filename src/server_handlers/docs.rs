use actix_web::{HttpResponse, Responder};
use serde_json::json;

use crate::api_json::ejemplo_preview;

pub async fn help_handler() -> impl Responder {
    let help = json!({
        "description": "API de vista previa de planificación. POST /preview expande patrones de recurrencia y marca conflictos y feriados. POST /calendario arma la grilla mensual. GET /feriados lista los feriados cargados.",
        "post_preview_example": ejemplo_preview(),
        "post_calendario_example": {"fecha": "2024-11-15", "sesiones": []},
        "note": "dias_semana usa 0=domingo .. 6=sábado. frecuencia: semanal | quincenal | mensual. modalidad: presencial | virtual | hibrida.",
        "estados": ["normal", "conflicto", "feriado", "feriado_con_conflicto"]
    });

    HttpResponse::Ok().json(help)
}
