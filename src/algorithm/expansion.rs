//! Expansión de un patrón de recurrencia en sesiones concretas.
//!
//! La expansión es pura: mismo patrón y mismo calendario de feriados producen
//! siempre la misma secuencia, ordenada por fecha de forma estrictamente
//! creciente. Docente y sala no se asignan aquí; lo hace quien llama antes de
//! clasificar conflictos.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::Serialize;

use crate::algorithm::calendario::{dia_semana_desde_indice, dias_desde, indice_dia_semana, primer_dia_mes};
use crate::error::ErrorPlanificacion;
use crate::models::{CalendarioFeriados, Frecuencia, Motivo, PatronRecurrencia, PlantillaSesion, Sesion};

/// Resultado de expandir un patrón.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expansion {
    pub sesiones: Vec<Sesion>,
    pub solicitadas: Option<usize>,
    pub omitidas_por_feriado: Vec<NaiveDate>,
    pub omitidas_por_excepcion: Vec<NaiveDate>,
}

impl Expansion {
    pub fn generadas(&self) -> usize {
        self.sesiones.len()
    }

    /// Sesiones pedidas que no cupieron en el rango (0 si no hay objetivo).
    pub fn faltantes(&self) -> usize {
        self.solicitadas
            .map(|n| n.saturating_sub(self.generadas()))
            .unwrap_or(0)
    }

    /// Mensaje informativo cuando el rango se agotó antes del objetivo.
    pub fn aviso(&self) -> Option<String> {
        let solicitadas = self.solicitadas?;
        if self.faltantes() == 0 {
            return None;
        }
        Some(format!(
            "sólo se pudieron programar {} de {} sesiones solicitadas dentro del rango indicado",
            self.generadas(),
            solicitadas
        ))
    }
}

/// Expande `patron` usando `plantilla` para la hora, curso, grupo y modalidad.
///
/// - fechas en `fechas_excepcion` nunca producen sesión
/// - feriado con `omitir_feriados`: la fecha se omite
/// - feriado sin `omitir_feriados`: la sesión se emite marcada como feriado
/// - `cantidad_objetivo` corta la emisión (cuentan todos los estados)
pub fn expandir_patron(
    patron: &PatronRecurrencia,
    plantilla: &PlantillaSesion,
    feriados: &CalendarioFeriados,
) -> Result<Expansion, ErrorPlanificacion> {
    patron.validar()?;
    plantilla.validar()?;

    let mut out = Expansion {
        sesiones: Vec::new(),
        solicitadas: patron.cantidad_objetivo,
        omitidas_por_feriado: Vec::new(),
        omitidas_por_excepcion: Vec::new(),
    };

    for fecha in fechas_candidatas(patron) {
        if patron.cantidad_objetivo.is_some_and(|n| out.sesiones.len() >= n) {
            break;
        }
        if patron.fechas_excepcion.contains(&fecha) {
            out.omitidas_por_excepcion.push(fecha);
            continue;
        }
        let mut sesion = plantilla.instanciar(fecha);
        if let Some(feriado) = feriados.buscar(fecha) {
            if patron.omitir_feriados {
                log::debug!("omitiendo {} por feriado '{}'", fecha, feriado.nombre);
                out.omitidas_por_feriado.push(fecha);
                continue;
            }
            sesion.fijar_motivos(vec![Motivo::feriado(feriado)]);
        }
        out.sesiones.push(sesion);
    }

    log::debug!(
        "patrón {}..{} ({:?}) -> {} sesiones, {} excepciones, {} feriados omitidos",
        patron.fecha_inicio,
        patron.fecha_fin,
        patron.frecuencia,
        out.sesiones.len(),
        out.omitidas_por_excepcion.len(),
        out.omitidas_por_feriado.len()
    );
    Ok(out)
}

/// Atajo que devuelve sólo las sesiones.
pub fn expandir(
    patron: &PatronRecurrencia,
    plantilla: &PlantillaSesion,
    feriados: &CalendarioFeriados,
) -> Result<Vec<Sesion>, ErrorPlanificacion> {
    expandir_patron(patron, plantilla, feriados).map(|e| e.sesiones)
}

/// Fechas que coinciden con la regla del patrón más las fechas adicionales,
/// sin duplicados y en orden creciente. No aplica excepciones ni feriados.
pub fn fechas_candidatas(patron: &PatronRecurrencia) -> Vec<NaiveDate> {
    let mut fechas = match patron.frecuencia {
        Frecuencia::Semanal => fechas_cada_n_semanas(patron, 1),
        Frecuencia::Quincenal => fechas_cada_n_semanas(patron, 2),
        Frecuencia::Mensual => fechas_mensuales(patron),
    };
    fechas.extend(patron.fechas_adicionales.iter().copied());
    fechas.into_iter().collect()
}

// La semana 0 es la semana (domingo a sábado) de la primera fecha que
// coincide desde `fecha_inicio`, igual que el ancla mensual. Sólo entran las
// semanas múltiplo de `paso`.
fn fechas_cada_n_semanas(patron: &PatronRecurrencia, paso: i64) -> BTreeSet<NaiveDate> {
    let mut coincidencias = dias_desde(patron.fecha_inicio)
        .take_while(|f| *f <= patron.fecha_fin)
        .filter(|f| patron.dias_semana.contains(&indice_dia_semana(*f)))
        .peekable();
    let Some(&primera) = coincidencias.peek() else {
        return BTreeSet::new();
    };
    let desfase = i64::from(indice_dia_semana(primera));
    coincidencias
        .filter(|f| (((*f - primera).num_days() + desfase) / 7) % paso == 0)
        .collect()
}

// Para cada día de la semana el ancla es su primera aparición desde
// `fecha_inicio`; cada mes se repite el mismo ordinal (p.ej. "2° martes").
// Si el mes no tiene ese ordinal (un 5° viernes) el mes se salta.
fn fechas_mensuales(patron: &PatronRecurrencia) -> BTreeSet<NaiveDate> {
    let mut fechas = BTreeSet::new();
    let dia_inicio = i64::from(indice_dia_semana(patron.fecha_inicio));

    for &dia in &patron.dias_semana {
        let Some(weekday) = dia_semana_desde_indice(dia) else { continue };
        let desfase = (i64::from(dia) - dia_inicio).rem_euclid(7);
        let Some(ancla) = patron.fecha_inicio.checked_add_signed(Duration::days(desfase)) else {
            continue;
        };
        if ancla > patron.fecha_fin {
            continue;
        }
        let ordinal = (ancla.day0() / 7 + 1) as u8;

        let mut mes = primer_dia_mes(ancla);
        while mes <= patron.fecha_fin {
            match NaiveDate::from_weekday_of_month_opt(mes.year(), mes.month(), weekday, ordinal) {
                Some(f) if f >= patron.fecha_inicio && f <= patron.fecha_fin => {
                    fechas.insert(f);
                }
                Some(_) => {}
                None => log::debug!("{}-{:02} no tiene {}° {:?}, se salta", mes.year(), mes.month(), ordinal, weekday),
            }
            mes = match mes.checked_add_months(Months::new(1)) {
                Some(m) => m,
                None => break,
            };
        }
    }
    fechas
}
