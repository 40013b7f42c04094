use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::algorithm::{construir_grilla_mes, generar_vista_previa, GrillaMes, SolicitudPatron, VistaPrevia};
use crate::error::ErrorPlanificacion;
use crate::models::{CalendarioFeriados, ConjuntoCompromisos, Feriado, Sesion};

/// Parámetros de entrada para la vista previa de una planificación
///
/// # Estructura del JSON esperado:
/// ```json
/// {
///   "patrones": [
///     {
///       "patron": {
///         "fecha_inicio": "2024-11-01",
///         "fecha_fin": "2024-11-30",
///         "dias_semana": [5],
///         "frecuencia": "semanal",
///         "omitir_feriados": false,
///         "fechas_excepcion": [],
///         "fechas_adicionales": [],
///         "cantidad_objetivo": null
///       },
///       "plantilla": {
///         "hora_inicio": "08:30",
///         "hora_fin": "10:00",
///         "curso": "CIT3313",
///         "grupo": "01",
///         "docente": "doc-17",
///         "sala": "B-204",
///         "modalidad": "presencial"
///       }
///     }
///   ],
///   "compromisos": {
///     "docentes": [{"recurso": "doc-17", "nombre": "Ana Rojas", "fecha": "2024-11-08", "hora_inicio": "09:00", "hora_fin": "11:00"}],
///     "salas": []
///   },
///   "feriados": [{"fecha": "2024-11-15", "nombre": "Aniversario", "tipo": "institucional"}]
/// }
/// ```
///
/// # Campos:
/// - `patrones`: uno o más patrones con su plantilla de sesión (requerido)
/// - `compromisos`: agenda existente de docentes y salas (opcional)
/// - `feriados`: feriados extra que se suman a los cargados en el servidor (opcional)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewParams {
    pub patrones: Vec<SolicitudPatron>,
    #[serde(default)]
    pub compromisos: ConjuntoCompromisos,
    #[serde(default)]
    pub feriados: Vec<Feriado>,
}

/// Parámetros para la grilla mensual: `{"fecha": "2024-11-15", "sesiones": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarioParams {
    pub fecha: NaiveDate,
    #[serde(default)]
    pub sesiones: Vec<Sesion>,
}

pub fn parse_preview_input(json_str: &str) -> Result<PreviewParams, serde_json::Error> {
    serde_json::from_str::<PreviewParams>(json_str)
}

pub fn parse_preview_value(value: serde_json::Value) -> Result<PreviewParams, serde_json::Error> {
    serde_json::from_value::<PreviewParams>(value)
}

pub fn parse_calendario_input(json_str: &str) -> Result<CalendarioParams, serde_json::Error> {
    serde_json::from_str::<CalendarioParams>(json_str)
}

pub fn parse_calendario_value(value: serde_json::Value) -> Result<CalendarioParams, serde_json::Error> {
    serde_json::from_value::<CalendarioParams>(value)
}

/// Ejecuta la vista previa combinando los feriados del servidor con los de la
/// solicitud.
pub fn ejecutar_preview(params: &PreviewParams, base: &CalendarioFeriados) -> Result<VistaPrevia, ErrorPlanificacion> {
    if params.feriados.is_empty() {
        generar_vista_previa(&params.patrones, base, &params.compromisos)
    } else {
        let feriados = base.combinar(params.feriados.iter().cloned());
        generar_vista_previa(&params.patrones, &feriados, &params.compromisos)
    }
}

/// Aplica el tope de días por patrón antes de expandir nada.
pub fn validar_limites(params: &PreviewParams, max_dias: u32) -> Result<(), ErrorPlanificacion> {
    params
        .patrones
        .iter()
        .try_for_each(|s| s.patron.validar_largo(max_dias))
}

pub fn ejecutar_calendario(params: &CalendarioParams) -> Result<GrillaMes, ErrorPlanificacion> {
    construir_grilla_mes(params.fecha, &params.sesiones)
}

/// Solicitud de ejemplo usada por `/help`.
pub fn ejemplo_preview() -> serde_json::Value {
    serde_json::json!({
        "patrones": [{
            "patron": {
                "fecha_inicio": "2024-11-01",
                "fecha_fin": "2024-11-30",
                "dias_semana": [5],
                "frecuencia": "semanal",
                "omitir_feriados": false
            },
            "plantilla": {
                "hora_inicio": "08:30",
                "hora_fin": "10:00",
                "curso": "CIT3313",
                "grupo": "01",
                "docente": "doc-17",
                "sala": "B-204",
                "modalidad": "presencial"
            }
        }],
        "compromisos": {
            "docentes": [{"recurso": "doc-17", "nombre": "Ana Rojas", "fecha": "2024-11-08", "hora_inicio": "09:00", "hora_fin": "11:00"}],
            "salas": []
        }
    })
}
