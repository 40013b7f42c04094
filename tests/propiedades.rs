// Propiedades del motor sobre entradas aleatorias.
use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use planificador::algorithm::{clasificar_sesiones, construir_grilla_mes, expandir, se_solapan};
use planificador::models::{
    CalendarioFeriados, ConjuntoCompromisos, EstadoSesion, Feriado, Frecuencia, Modalidad, PatronRecurrencia,
    PlantillaSesion, Sesion, TipoFeriado,
};
use proptest::prelude::*;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn fecha() -> impl Strategy<Value = NaiveDate> {
    (0i64..730).prop_map(|n| base() + Duration::days(n))
}

fn frecuencia() -> impl Strategy<Value = Frecuencia> {
    prop_oneof![Just(Frecuencia::Semanal), Just(Frecuencia::Quincenal), Just(Frecuencia::Mensual)]
}

fn patron() -> impl Strategy<Value = PatronRecurrencia> {
    (
        fecha(),
        0i64..200,
        prop::collection::btree_set(0u8..7, 1..4),
        frecuencia(),
        any::<bool>(),
        prop::collection::btree_set(fecha(), 0..6),
        prop::option::of(0usize..40),
    )
        .prop_map(|(inicio, largo, dias, frecuencia, omitir, excepciones, objetivo)| {
            let mut p = PatronRecurrencia::new(inicio, inicio + Duration::days(largo))
                .con_dias(dias)
                .con_frecuencia(frecuencia)
                .omitiendo_feriados(omitir);
            p.fechas_excepcion = excepciones;
            p.cantidad_objetivo = objetivo;
            p
        })
}

fn feriados() -> impl Strategy<Value = CalendarioFeriados> {
    prop::collection::vec(fecha(), 0..20).prop_map(|fechas| {
        CalendarioFeriados::new(
            fechas.into_iter().map(|f| Feriado::new(f, "Feriado", TipoFeriado::Nacional)),
        )
    })
}

fn plantilla() -> PlantillaSesion {
    PlantillaSesion {
        hora_inicio: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
        hora_fin: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        curso: "MAT101".to_string(),
        grupo: "01".to_string(),
        docente: String::new(),
        sala: String::new(),
        modalidad: Modalidad::Presencial,
    }
}

fn sesion() -> impl Strategy<Value = Sesion> {
    (0i64..3, 7u32..18, 1u32..4, 0usize..3, 0usize..3, any::<bool>()).prop_map(|(dia, hora, largo, doc, sala, virtual_)| {
        let inicio = NaiveTime::from_hms_opt(hora, 0, 0).unwrap();
        let fin = NaiveTime::from_hms_opt(hora + largo, 0, 0).unwrap();
        Sesion {
            fecha: base() + Duration::days(dia),
            hora_inicio: inicio,
            hora_fin: fin,
            curso: "CUR".to_string(),
            grupo: "01".to_string(),
            docente: format!("doc-{}", doc),
            sala: format!("sala-{}", sala),
            modalidad: if virtual_ { Modalidad::Virtual } else { Modalidad::Presencial },
            estado: EstadoSesion::Normal,
            motivo: None,
            motivos: Vec::new(),
        }
    })
}

proptest! {
    #[test]
    fn grilla_cubre_el_mes(referencia in fecha()) {
        let g = construir_grilla_mes(referencia, &[]).unwrap();
        prop_assert_eq!(g.celdas.len(), 42);
        for par in g.celdas.windows(2) {
            prop_assert_eq!(par[1].fecha, par[0].fecha + Duration::days(1));
        }
        for c in &g.celdas {
            let mismo_mes = c.fecha.year() == referencia.year() && c.fecha.month() == referencia.month();
            prop_assert_eq!(c.es_mes_actual, mismo_mes);
        }
        let dias_del_mes: BTreeSet<u32> = g.celdas.iter().filter(|c| c.es_mes_actual).map(|c| c.fecha.day()).collect();
        let ultimo = *dias_del_mes.iter().max().unwrap();
        prop_assert_eq!(dias_del_mes.len() as u32, ultimo);
        prop_assert!(dias_del_mes.contains(&1));
        prop_assert!((28..=31).contains(&ultimo));
    }

    #[test]
    fn expansion_determinista_acotada_y_ordenada(p in patron(), f in feriados()) {
        let a = expandir(&p, &plantilla(), &f).unwrap();
        let b = expandir(&p, &plantilla(), &f).unwrap();
        prop_assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());

        for s in &a {
            prop_assert!(s.fecha >= p.fecha_inicio && s.fecha <= p.fecha_fin);
            prop_assert!(!p.fechas_excepcion.contains(&s.fecha));
            if f.es_feriado(s.fecha) {
                prop_assert!(!p.omitir_feriados);
                prop_assert_eq!(s.estado, EstadoSesion::Feriado);
            } else {
                prop_assert_eq!(s.estado, EstadoSesion::Normal);
            }
        }
        for par in a.windows(2) {
            prop_assert!(par[0].fecha < par[1].fecha);
        }
        if let Some(n) = p.cantidad_objetivo {
            prop_assert!(a.len() <= n);
        }
    }

    #[test]
    fn feriado_nunca_queda_normal(p in patron(), f in feriados()) {
        let mut p = p;
        p.omitir_feriados = false;
        let sesiones = expandir(&p, &plantilla(), &f).unwrap();
        let clasificadas = clasificar_sesiones(sesiones, &ConjuntoCompromisos::default()).unwrap();
        for s in clasificadas.iter().filter(|s| f.es_feriado(s.fecha)) {
            prop_assert!(s.estado.es_feriado());
            prop_assert!(s.motivo.is_some());
        }
    }

    #[test]
    fn conflictos_simetricos(sesiones in prop::collection::vec(sesion(), 0..12)) {
        let out = clasificar_sesiones(sesiones, &ConjuntoCompromisos::default()).unwrap();
        for (i, a) in out.iter().enumerate() {
            for (j, b) in out.iter().enumerate() {
                if i == j || a.fecha != b.fecha {
                    continue;
                }
                if !se_solapan(a.hora_inicio, a.hora_fin, b.hora_inicio, b.hora_fin) {
                    continue;
                }
                let mismo_docente = a.docente == b.docente;
                let misma_sala = a.modalidad != Modalidad::Virtual
                    && b.modalidad != Modalidad::Virtual
                    && a.sala == b.sala;
                if mismo_docente || misma_sala {
                    prop_assert_eq!(a.estado, EstadoSesion::Conflicto);
                    prop_assert_eq!(b.estado, EstadoSesion::Conflicto);
                }
            }
            prop_assert_eq!(a.estado == EstadoSesion::Normal, a.motivo.is_none());
        }
    }
}
