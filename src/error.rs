//! Errores del planificador.
//!
//! Sólo la entrada mal formada es un error. Los conflictos, feriados y la
//! generación de menos sesiones de las pedidas son resultados normales.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ErrorPlanificacion {
    #[error("rango de fechas inválido: inicio {inicio} posterior a fin {fin}")]
    RangoFechasInvalido { inicio: NaiveDate, fin: NaiveDate },

    #[error("rango de {dias} días excede el máximo permitido de {maximo}")]
    RangoDemasiadoLargo { dias: i64, maximo: u32 },

    #[error("fecha fuera del rango representable: {0}")]
    FechaFueraDeRango(NaiveDate),

    #[error("el patrón no tiene días de la semana")]
    SinDiasSemana,

    #[error("día de la semana inválido: {0} (se espera 0=domingo .. 6=sábado)")]
    DiaSemanaInvalido(u8),

    #[error("horario inválido en {contexto}: inicio {inicio} no es anterior a fin {fin}")]
    HorarioInvalido {
        inicio: NaiveTime,
        fin: NaiveTime,
        contexto: String,
    },

    #[error("se requiere al menos un patrón")]
    SinPatrones,

    #[error("configuración inválida: {0}")]
    Configuracion(String),

    #[error("error de lectura: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON inválido: {0}")]
    Json(#[from] serde_json::Error),
}
