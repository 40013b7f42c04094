//! Grilla mensual para la vista de calendario.
//!
//! La grilla siempre tiene 6 semanas completas (42 celdas) empezando en el
//! domingo anterior o igual al primer día del mes, así la altura de la vista
//! no cambia al navegar entre meses.

use std::collections::HashMap;

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use serde::Serialize;

use crate::error::ErrorPlanificacion;
use crate::models::Sesion;

pub const DIAS_SEMANA: usize = 7;
pub const SEMANAS_GRILLA: usize = 6;
pub const CELDAS_GRILLA: usize = DIAS_SEMANA * SEMANAS_GRILLA;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CeldaCalendario {
    pub fecha: NaiveDate,
    /// false para los días de relleno del mes anterior o siguiente
    pub es_mes_actual: bool,
    pub sesiones: Vec<Sesion>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrillaMes {
    pub anio: i32,
    pub mes: u32,
    pub celdas: Vec<CeldaCalendario>,
}

impl GrillaMes {
    /// Filas de 7 celdas, de domingo a sábado.
    pub fn semanas(&self) -> impl Iterator<Item = &[CeldaCalendario]> {
        self.celdas.chunks(DIAS_SEMANA)
    }

    pub fn celda(&self, fecha: NaiveDate) -> Option<&CeldaCalendario> {
        let primera = self.celdas.first()?.fecha;
        let idx = usize::try_from((fecha - primera).num_days()).ok()?;
        self.celdas.get(idx)
    }
}

/// Índice del día de la semana con 0 = domingo .. 6 = sábado.
pub fn indice_dia_semana(fecha: NaiveDate) -> u8 {
    fecha.weekday().num_days_from_sunday() as u8
}

pub fn dia_semana_desde_indice(indice: u8) -> Option<Weekday> {
    match indice {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

pub fn primer_dia_mes(fecha: NaiveDate) -> NaiveDate {
    fecha - Duration::days(i64::from(fecha.day0()))
}

/// Domingo igual o anterior a `fecha`; `None` si cae antes de `NaiveDate::MIN`.
pub fn inicio_semana(fecha: NaiveDate) -> Option<NaiveDate> {
    fecha.checked_sub_signed(Duration::days(i64::from(fecha.weekday().num_days_from_sunday())))
}

/// Días consecutivos desde `inicio`, incluido `NaiveDate::MAX` (que
/// `NaiveDate::iter_days` no entrega).
pub fn dias_desde(inicio: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(inicio), |f| f.succ_opt())
}

/// Primer día del mes siguiente (navegación "siguiente").
pub fn mes_siguiente(fecha: NaiveDate) -> Option<NaiveDate> {
    primer_dia_mes(fecha).checked_add_months(Months::new(1))
}

/// Primer día del mes anterior (navegación "anterior").
pub fn mes_anterior(fecha: NaiveDate) -> Option<NaiveDate> {
    primer_dia_mes(fecha).checked_sub_months(Months::new(1))
}

/// Construye la grilla del mes que contiene `fecha_referencia` y ubica cada
/// sesión en la celda de su fecha, conservando el orden de entrada.
///
/// Falla con `FechaFueraDeRango` en los meses extremos de chrono, donde las
/// 42 celdas no caben entre `NaiveDate::MIN` y `NaiveDate::MAX`.
pub fn construir_grilla_mes(fecha_referencia: NaiveDate, sesiones: &[Sesion]) -> Result<GrillaMes, ErrorPlanificacion> {
    let primero = primer_dia_mes(fecha_referencia);
    let inicio = inicio_semana(primero)
        .filter(|i| i.checked_add_signed(Duration::days(CELDAS_GRILLA as i64 - 1)).is_some())
        .ok_or(ErrorPlanificacion::FechaFueraDeRango(fecha_referencia))?;

    let mut por_fecha: HashMap<NaiveDate, Vec<&Sesion>> = HashMap::new();
    for s in sesiones {
        por_fecha.entry(s.fecha).or_default().push(s);
    }

    let celdas = dias_desde(inicio)
        .take(CELDAS_GRILLA)
        .map(|fecha| {
            let sesiones = por_fecha
                .get(&fecha)
                .map(|v| v.iter().map(|s| (*s).clone()).collect())
                .unwrap_or_default();
            CeldaCalendario {
                fecha,
                es_mes_actual: fecha.year() == primero.year() && fecha.month() == primero.month(),
                sesiones,
            }
        })
        .collect();

    Ok(GrillaMes {
        anio: primero.year(),
        mes: primero.month(),
        celdas,
    })
}
