// Clasificación de sesiones: normal, conflicto o feriado.
//
// Un conflicto no es un error: es parte del resultado que se muestra al
// usuario. Sólo se rechaza la entrada mal formada (inicio >= fin), y se
// valida completa antes de clasificar.
use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};

use crate::error::ErrorPlanificacion;
use crate::models::{Compromiso, ConjuntoCompromisos, Motivo, Recurso, Sesion, TipoFeriado};

/// Intervalos semiabiertos [inicio, fin): dos bloques contiguos no chocan.
pub fn se_solapan(a_inicio: NaiveTime, a_fin: NaiveTime, b_inicio: NaiveTime, b_fin: NaiveTime) -> bool {
    a_inicio < b_fin && b_inicio < a_fin
}

fn choca_con(sesion: &Sesion, c: &Compromiso) -> bool {
    c.fecha == sesion.fecha && se_solapan(sesion.hora_inicio, sesion.hora_fin, c.hora_inicio, c.hora_fin)
}

/// Valida sesiones y compromisos sin clasificar nada.
pub fn validar_entrada(sesiones: &[Sesion], compromisos: &ConjuntoCompromisos) -> Result<(), ErrorPlanificacion> {
    sesiones.iter().try_for_each(Sesion::validar)?;
    compromisos.validar()
}

/// Clasifica cada sesión contra la agenda de docentes, la de salas y el resto
/// del mismo lote. Se reporta el primer choque encontrado, en ese orden.
///
/// Las sesiones `Virtual` no ocupan sala: se saltan los choques de sala
/// (agenda y lote) aunque traigan `sala`; los de docente sí aplican.
///
/// Las marcas de feriado se conservan: una sesión puede quedar como
/// `FeriadoConConflicto` con ambas razones en `motivos`. Si una sesión llega
/// con `estado` de feriado pero sin `Motivo::Feriado` (p.ej. armada a mano),
/// el feriado se reconstruye desde `motivo`. Las razones de conflicto previas
/// se descartan y se recalculan.
pub fn clasificar_sesiones(
    sesiones: Vec<Sesion>,
    compromisos: &ConjuntoCompromisos,
) -> Result<Vec<Sesion>, ErrorPlanificacion> {
    validar_entrada(&sesiones, compromisos)?;

    let mut por_fecha: HashMap<NaiveDate, Vec<usize>> = HashMap::new();
    for (i, s) in sesiones.iter().enumerate() {
        por_fecha.entry(s.fecha).or_default().push(i);
    }

    let choques: Vec<Option<Motivo>> = (0..sesiones.len())
        .map(|i| buscar_choque(i, &sesiones, &por_fecha, compromisos))
        .collect();

    let mut out = sesiones;
    let mut n_conflictos = 0usize;
    for (sesion, choque) in out.iter_mut().zip(choques) {
        let mut motivos: Vec<Motivo> = sesion.motivos.iter().filter(|m| m.es_feriado()).cloned().collect();
        if motivos.is_empty() && sesion.estado.es_feriado() {
            motivos.push(feriado_desde_estado(sesion));
        }
        if let Some(m) = choque {
            n_conflictos += 1;
            motivos.push(m);
        }
        sesion.fijar_motivos(motivos);
    }
    log::debug!("clasificadas {} sesiones, {} con conflicto", out.len(), n_conflictos);
    Ok(out)
}

// El nombre del feriado es el primer tramo de `motivo` ("nombre; choque ...").
fn feriado_desde_estado(sesion: &Sesion) -> Motivo {
    let nombre = sesion
        .motivo
        .as_deref()
        .and_then(|m| m.split("; ").next())
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("feriado");
    Motivo::Feriado {
        nombre: nombre.to_string(),
        tipo_feriado: TipoFeriado::default(),
    }
}

fn buscar_choque(
    i: usize,
    sesiones: &[Sesion],
    por_fecha: &HashMap<NaiveDate, Vec<usize>>,
    compromisos: &ConjuntoCompromisos,
) -> Option<Motivo> {
    let s = &sesiones[i];

    if !s.docente.is_empty() {
        if let Some(c) = compromisos.docentes.iter().find(|c| c.recurso == s.docente && choca_con(s, c)) {
            return Some(Motivo::ChoqueDocente {
                nombre: c.nombre_visible().to_string(),
                inicio: c.hora_inicio,
                fin: c.hora_fin,
            });
        }
    }

    if s.ocupa_sala() {
        if let Some(c) = compromisos.salas.iter().find(|c| c.recurso == s.sala && choca_con(s, c)) {
            return Some(Motivo::ChoqueSala {
                nombre: c.nombre_visible().to_string(),
                inicio: c.hora_inicio,
                fin: c.hora_fin,
            });
        }
    }

    let mismas_fecha = por_fecha.get(&s.fecha)?;
    for &j in mismas_fecha {
        if j == i {
            continue;
        }
        let otra = &sesiones[j];
        if !se_solapan(s.hora_inicio, s.hora_fin, otra.hora_inicio, otra.hora_fin) {
            continue;
        }
        let recurso = if !s.docente.is_empty() && s.docente == otra.docente {
            Some((Recurso::Docente, &s.docente))
        } else if s.ocupa_sala() && otra.ocupa_sala() && s.sala == otra.sala {
            Some((Recurso::Sala, &s.sala))
        } else {
            None
        };
        if let Some((recurso, id)) = recurso {
            return Some(Motivo::ChoqueLote {
                recurso,
                id: id.clone(),
                curso: otra.curso.clone(),
                grupo: otra.grupo.clone(),
                inicio: otra.hora_inicio,
                fin: otra.hora_fin,
            });
        }
    }
    None
}
