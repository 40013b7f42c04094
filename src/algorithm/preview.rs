//! Vista previa de una planificación: expande varios patrones, asigna docente
//! y sala, ordena por `(fecha, hora_inicio)` y clasifica todo como un solo lote
//! para detectar también choques entre patrones distintos.

use serde::{Deserialize, Serialize};

use crate::algorithm::conflict::clasificar_sesiones;
use crate::algorithm::expansion::expandir_patron;
use crate::error::ErrorPlanificacion;
use crate::models::{CalendarioFeriados, ConjuntoCompromisos, EstadoSesion, PatronRecurrencia, PlantillaSesion, Sesion};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolicitudPatron {
    pub patron: PatronRecurrencia,
    pub plantilla: PlantillaSesion,
}

/// Conteo por estado, para las insignias de la vista previa.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResumenEstados {
    pub normal: usize,
    pub conflicto: usize,
    pub feriado: usize,
    pub feriado_con_conflicto: usize,
    pub total: usize,
}

impl ResumenEstados {
    pub fn contar(sesiones: &[Sesion]) -> Self {
        let mut r = ResumenEstados::default();
        for s in sesiones {
            match s.estado {
                EstadoSesion::Normal => r.normal += 1,
                EstadoSesion::Conflicto => r.conflicto += 1,
                EstadoSesion::Feriado => r.feriado += 1,
                EstadoSesion::FeriadoConConflicto => r.feriado_con_conflicto += 1,
            }
        }
        r.total = sesiones.len();
        r
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VistaPrevia {
    pub sesiones: Vec<Sesion>,
    pub resumen: ResumenEstados,
    /// Avisos informativos (p.ej. menos sesiones de las solicitadas).
    pub avisos: Vec<String>,
}

/// Orden estable por fecha y hora de inicio.
pub fn ordenar_sesiones(sesiones: &mut [Sesion]) {
    sesiones.sort_by_key(|s| (s.fecha, s.hora_inicio));
}

pub fn generar_vista_previa(
    solicitudes: &[SolicitudPatron],
    feriados: &CalendarioFeriados,
    compromisos: &ConjuntoCompromisos,
) -> Result<VistaPrevia, ErrorPlanificacion> {
    if solicitudes.is_empty() {
        return Err(ErrorPlanificacion::SinPatrones);
    }

    let mut todas: Vec<Sesion> = Vec::new();
    let mut avisos: Vec<String> = Vec::new();
    for (idx, sol) in solicitudes.iter().enumerate() {
        let expansion = expandir_patron(&sol.patron, &sol.plantilla, feriados)?;
        if let Some(aviso) = expansion.aviso() {
            avisos.push(format!("patrón {} ({} grupo {}): {}", idx + 1, sol.plantilla.curso, sol.plantilla.grupo, aviso));
        }
        todas.extend(expansion.sesiones.into_iter().map(|mut s| {
            s.asignar(&sol.plantilla.docente, &sol.plantilla.sala);
            s
        }));
    }

    ordenar_sesiones(&mut todas);
    let sesiones = clasificar_sesiones(todas, compromisos)?;
    let resumen = ResumenEstados::contar(&sesiones);
    log::info!(
        "vista previa: {} patrones, {} sesiones ({} con conflicto, {} en feriado)",
        solicitudes.len(),
        resumen.total,
        resumen.conflicto + resumen.feriado_con_conflicto,
        resumen.feriado + resumen.feriado_con_conflicto
    );

    Ok(VistaPrevia { sesiones, resumen, avisos })
}
