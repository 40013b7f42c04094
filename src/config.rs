//! Configuración del servicio desde variables de entorno (y `.env` si existe).
//!
//! - `PLANIFICADOR_BIND`: dirección de escucha (por defecto `127.0.0.1:8080`)
//! - `PLANIFICADOR_FERIADOS`: ruta a un JSON con la lista de feriados
//! - `PLANIFICADOR_CORS_ORIGIN`: origen permitido para el front-end
//! - `PLANIFICADOR_WORKERS`: cantidad de workers HTTP (por defecto, núcleos)
//! - `PLANIFICADOR_MAX_DIAS`: días máximos del rango de cada patrón en `/preview`

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ErrorPlanificacion;
use crate::models::{CalendarioFeriados, Feriado};

pub const BIND_POR_DEFECTO: &str = "127.0.0.1:8080";
/// Unos diez años de calendario.
pub const MAX_DIAS_POR_DEFECTO: u32 = 3660;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuracion {
    pub bind: String,
    pub ruta_feriados: Option<PathBuf>,
    pub cors_origin: Option<String>,
    pub workers: usize,
    pub max_dias: u32,
}

impl Configuracion {
    pub fn desde_entorno() -> Result<Self, ErrorPlanificacion> {
        let _ = dotenv::dotenv();
        Self::desde_variables(|k| env::var(k).ok())
    }

    /// Versión parametrizable para pruebas: `leer` reemplaza a `env::var`.
    pub fn desde_variables<F>(leer: F) -> Result<Self, ErrorPlanificacion>
    where
        F: Fn(&str) -> Option<String>,
    {
        let no_vacia = |k: &str| leer(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let workers = match no_vacia("PLANIFICADOR_WORKERS") {
            Some(v) => entero_positivo("PLANIFICADOR_WORKERS", &v)?,
            None => num_cpus::get().max(1),
        };
        let max_dias = match no_vacia("PLANIFICADOR_MAX_DIAS") {
            Some(v) => entero_positivo("PLANIFICADOR_MAX_DIAS", &v)?,
            None => MAX_DIAS_POR_DEFECTO,
        };

        Ok(Self {
            bind: no_vacia("PLANIFICADOR_BIND").unwrap_or_else(|| BIND_POR_DEFECTO.to_string()),
            ruta_feriados: no_vacia("PLANIFICADOR_FERIADOS").map(PathBuf::from),
            cors_origin: no_vacia("PLANIFICADOR_CORS_ORIGIN"),
            workers,
            max_dias,
        })
    }

    /// Carga el calendario de feriados configurado; vacío si no hay ruta.
    pub fn cargar_feriados(&self) -> Result<CalendarioFeriados, ErrorPlanificacion> {
        match &self.ruta_feriados {
            Some(ruta) => leer_feriados(ruta),
            None => {
                log::warn!("PLANIFICADOR_FERIADOS no definido: calendario de feriados vacío");
                Ok(CalendarioFeriados::default())
            }
        }
    }
}

fn entero_positivo<T>(clave: &str, valor: &str) -> Result<T, ErrorPlanificacion>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match valor.parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(ErrorPlanificacion::Configuracion(format!(
            "{} debe ser un entero positivo, se recibió '{}'",
            clave, valor
        ))),
    }
}

/// Lee un JSON con la forma `[{"fecha": "2024-09-18", "nombre": "...", "tipo": "nacional"}]`.
pub fn leer_feriados(ruta: &Path) -> Result<CalendarioFeriados, ErrorPlanificacion> {
    let texto = fs::read_to_string(ruta)?;
    let lista: Vec<Feriado> = serde_json::from_str(&texto)?;
    let calendario = CalendarioFeriados::new(lista);
    log::info!("{} feriados cargados desde {}", calendario.len(), ruta.display());
    Ok(calendario)
}
