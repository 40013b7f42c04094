// Estructuras de datos principales del planificador de sesiones.
pub mod hora;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ErrorPlanificacion;
use self::hora::formatear_rango;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modalidad {
    #[default]
    Presencial,
    Virtual,
    Hibrida,
}

impl Modalidad {
    /// Las sesiones virtuales no ocupan una sala física.
    pub fn ocupa_sala(self) -> bool {
        !matches!(self, Modalidad::Virtual)
    }
}

/// Estado derivado de una sesión. Se recalcula en cada clasificación.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoSesion {
    #[default]
    Normal,
    Conflicto,
    Feriado,
    FeriadoConConflicto,
}

impl EstadoSesion {
    pub fn es_feriado(self) -> bool {
        matches!(self, EstadoSesion::Feriado | EstadoSesion::FeriadoConConflicto)
    }

    pub fn tiene_conflicto(self) -> bool {
        matches!(self, EstadoSesion::Conflicto | EstadoSesion::FeriadoConConflicto)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipoFeriado {
    #[default]
    Nacional,
    Institucional,
}

impl fmt::Display for TipoFeriado {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TipoFeriado::Nacional => write!(f, "nacional"),
            TipoFeriado::Institucional => write!(f, "institucional"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurso {
    Docente,
    Sala,
}

impl fmt::Display for Recurso {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recurso::Docente => write!(f, "docente"),
            Recurso::Sala => write!(f, "sala"),
        }
    }
}

/// Razón por la que una sesión no quedó en estado normal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tipo", rename_all = "snake_case")]
pub enum Motivo {
    Feriado {
        nombre: String,
        tipo_feriado: TipoFeriado,
    },
    /// Compromiso ya agendado del docente.
    ChoqueDocente {
        nombre: String,
        #[serde(with = "hora")]
        inicio: NaiveTime,
        #[serde(with = "hora")]
        fin: NaiveTime,
    },
    /// Reserva ya existente de la sala.
    ChoqueSala {
        nombre: String,
        #[serde(with = "hora")]
        inicio: NaiveTime,
        #[serde(with = "hora")]
        fin: NaiveTime,
    },
    /// Otra sesión del mismo lote de generación.
    ChoqueLote {
        recurso: Recurso,
        id: String,
        curso: String,
        grupo: String,
        #[serde(with = "hora")]
        inicio: NaiveTime,
        #[serde(with = "hora")]
        fin: NaiveTime,
    },
}

impl Motivo {
    pub fn feriado(feriado: &Feriado) -> Self {
        Motivo::Feriado {
            nombre: feriado.nombre.clone(),
            tipo_feriado: feriado.tipo,
        }
    }

    pub fn es_feriado(&self) -> bool {
        matches!(self, Motivo::Feriado { .. })
    }
}

impl fmt::Display for Motivo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Motivo::Feriado { nombre, .. } => write!(f, "{}", nombre),
            Motivo::ChoqueDocente { nombre, inicio, fin } => {
                write!(f, "docente {} ocupado {}", nombre, formatear_rango(inicio, fin))
            }
            Motivo::ChoqueSala { nombre, inicio, fin } => {
                write!(f, "sala {} ocupada {}", nombre, formatear_rango(inicio, fin))
            }
            Motivo::ChoqueLote { recurso, id, curso, grupo, inicio, fin } => write!(
                f,
                "choque con {} grupo {} ({} {}) {}",
                curso,
                grupo,
                recurso,
                id,
                formatear_rango(inicio, fin)
            ),
        }
    }
}

/// Una sesión concreta (clase fechada) producida al expandir un patrón.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sesion {
    pub fecha: NaiveDate,
    #[serde(with = "hora")]
    pub hora_inicio: NaiveTime,
    #[serde(with = "hora")]
    pub hora_fin: NaiveTime,
    pub curso: String,
    pub grupo: String,
    #[serde(default)]
    pub docente: String,
    #[serde(default)]
    pub sala: String,
    #[serde(default)]
    pub modalidad: Modalidad,
    #[serde(default)]
    pub estado: EstadoSesion,
    /// Presente sii `estado != Normal`; varias razones se unen con "; ".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivo: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub motivos: Vec<Motivo>,
}

impl Sesion {
    /// Asigna docente y sala antes de clasificar.
    pub fn asignar(&mut self, docente: &str, sala: &str) {
        self.docente = docente.to_string();
        self.sala = sala.to_string();
    }

    pub fn ocupa_sala(&self) -> bool {
        self.modalidad.ocupa_sala() && !self.sala.is_empty()
    }

    pub fn validar(&self) -> Result<(), ErrorPlanificacion> {
        validar_horario(
            self.hora_inicio,
            self.hora_fin,
            || format!("sesión {} grupo {} del {}", self.curso, self.grupo, self.fecha),
        )
    }

    /// Reemplaza las razones y recalcula `estado` y `motivo`.
    pub fn fijar_motivos(&mut self, motivos: Vec<Motivo>) {
        let feriado = motivos.iter().any(Motivo::es_feriado);
        let conflicto = motivos.iter().any(|m| !m.es_feriado());
        self.estado = match (feriado, conflicto) {
            (false, false) => EstadoSesion::Normal,
            (false, true) => EstadoSesion::Conflicto,
            (true, false) => EstadoSesion::Feriado,
            (true, true) => EstadoSesion::FeriadoConConflicto,
        };
        self.motivo = if motivos.is_empty() {
            None
        } else {
            Some(
                motivos
                    .iter()
                    .map(|m| m.to_string())
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        };
        self.motivos = motivos;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frecuencia {
    #[default]
    Semanal,
    Quincenal,
    Mensual,
}

/// Regla de recurrencia ingresada por el usuario.
///
/// `dias_semana` usa 0 = domingo .. 6 = sábado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatronRecurrencia {
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub dias_semana: BTreeSet<u8>,
    #[serde(default)]
    pub frecuencia: Frecuencia,
    #[serde(default)]
    pub omitir_feriados: bool,
    #[serde(default)]
    pub fechas_excepcion: BTreeSet<NaiveDate>,
    /// Fechas puntuales agregadas fuera de la regla (recuperaciones, cambios urgentes).
    #[serde(default)]
    pub fechas_adicionales: BTreeSet<NaiveDate>,
    #[serde(default)]
    pub cantidad_objetivo: Option<usize>,
}

impl PatronRecurrencia {
    pub fn new(fecha_inicio: NaiveDate, fecha_fin: NaiveDate) -> Self {
        Self {
            fecha_inicio,
            fecha_fin,
            dias_semana: BTreeSet::new(),
            frecuencia: Frecuencia::Semanal,
            omitir_feriados: false,
            fechas_excepcion: BTreeSet::new(),
            fechas_adicionales: BTreeSet::new(),
            cantidad_objetivo: None,
        }
    }

    pub fn con_dias(mut self, dias: impl IntoIterator<Item = u8>) -> Self {
        self.dias_semana.extend(dias);
        self
    }

    pub fn con_frecuencia(mut self, frecuencia: Frecuencia) -> Self {
        self.frecuencia = frecuencia;
        self
    }

    pub fn omitiendo_feriados(mut self, omitir: bool) -> Self {
        self.omitir_feriados = omitir;
        self
    }

    pub fn con_excepcion(mut self, fecha: NaiveDate) -> Self {
        self.fechas_excepcion.insert(fecha);
        self
    }

    pub fn con_fecha_adicional(mut self, fecha: NaiveDate) -> Self {
        self.fechas_adicionales.insert(fecha);
        self
    }

    pub fn con_cantidad_objetivo(mut self, cantidad: usize) -> Self {
        self.cantidad_objetivo = Some(cantidad);
        self
    }

    pub fn validar(&self) -> Result<(), ErrorPlanificacion> {
        if self.fecha_inicio > self.fecha_fin {
            return Err(ErrorPlanificacion::RangoFechasInvalido {
                inicio: self.fecha_inicio,
                fin: self.fecha_fin,
            });
        }
        if self.dias_semana.is_empty() {
            return Err(ErrorPlanificacion::SinDiasSemana);
        }
        if let Some(&dia) = self.dias_semana.iter().find(|&&d| d > 6) {
            return Err(ErrorPlanificacion::DiaSemanaInvalido(dia));
        }
        Ok(())
    }

    /// Días del rango contando ambos extremos (0 o negativo si está invertido).
    pub fn dias_rango(&self) -> i64 {
        (self.fecha_fin - self.fecha_inicio).num_days() + 1
    }

    /// Rechaza rangos más largos que `maximo` días.
    pub fn validar_largo(&self, maximo: u32) -> Result<(), ErrorPlanificacion> {
        let dias = self.dias_rango();
        if dias > i64::from(maximo) {
            return Err(ErrorPlanificacion::RangoDemasiadoLargo { dias, maximo });
        }
        Ok(())
    }
}

/// Datos comunes a todas las sesiones de un patrón.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantillaSesion {
    #[serde(with = "hora")]
    pub hora_inicio: NaiveTime,
    #[serde(with = "hora")]
    pub hora_fin: NaiveTime,
    pub curso: String,
    pub grupo: String,
    #[serde(default)]
    pub docente: String,
    #[serde(default)]
    pub sala: String,
    #[serde(default)]
    pub modalidad: Modalidad,
}

impl PlantillaSesion {
    pub fn validar(&self) -> Result<(), ErrorPlanificacion> {
        validar_horario(self.hora_inicio, self.hora_fin, || {
            format!("plantilla {} grupo {}", self.curso, self.grupo)
        })
    }

    /// Sesión normal en `fecha`, sin docente ni sala asignados.
    pub fn instanciar(&self, fecha: NaiveDate) -> Sesion {
        Sesion {
            fecha,
            hora_inicio: self.hora_inicio,
            hora_fin: self.hora_fin,
            curso: self.curso.clone(),
            grupo: self.grupo.clone(),
            docente: String::new(),
            sala: String::new(),
            modalidad: self.modalidad,
            estado: EstadoSesion::Normal,
            motivo: None,
            motivos: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feriado {
    pub fecha: NaiveDate,
    pub nombre: String,
    #[serde(default)]
    pub tipo: TipoFeriado,
}

impl Feriado {
    pub fn new(fecha: NaiveDate, nombre: &str, tipo: TipoFeriado) -> Self {
        Self { fecha, nombre: nombre.to_string(), tipo }
    }
}

/// Calendario de feriados de sólo lectura. Si una fecha se repite gana la primera.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Feriado>", into = "Vec<Feriado>")]
pub struct CalendarioFeriados {
    por_fecha: BTreeMap<NaiveDate, Feriado>,
}

impl CalendarioFeriados {
    pub fn new(feriados: impl IntoIterator<Item = Feriado>) -> Self {
        let mut por_fecha = BTreeMap::new();
        for f in feriados {
            por_fecha.entry(f.fecha).or_insert(f);
        }
        Self { por_fecha }
    }

    pub fn buscar(&self, fecha: NaiveDate) -> Option<&Feriado> {
        self.por_fecha.get(&fecha)
    }

    pub fn es_feriado(&self, fecha: NaiveDate) -> bool {
        self.por_fecha.contains_key(&fecha)
    }

    /// Nuevo calendario con `extra` agregados; las fechas ya presentes se conservan.
    pub fn combinar(&self, extra: impl IntoIterator<Item = Feriado>) -> Self {
        Self::new(self.iter().cloned().chain(extra))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feriado> {
        self.por_fecha.values()
    }

    pub fn len(&self) -> usize {
        self.por_fecha.len()
    }

    pub fn is_empty(&self) -> bool {
        self.por_fecha.is_empty()
    }
}

impl From<Vec<Feriado>> for CalendarioFeriados {
    fn from(v: Vec<Feriado>) -> Self {
        Self::new(v)
    }
}

impl From<CalendarioFeriados> for Vec<Feriado> {
    fn from(c: CalendarioFeriados) -> Self {
        c.por_fecha.into_values().collect()
    }
}

/// Franja ya agendada de un docente o de una sala.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compromiso {
    /// Identificador del docente o sala.
    pub recurso: String,
    /// Nombre legible; si falta se usa `recurso`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    pub fecha: NaiveDate,
    #[serde(with = "hora")]
    pub hora_inicio: NaiveTime,
    #[serde(with = "hora")]
    pub hora_fin: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
}

impl Compromiso {
    pub fn new(recurso: &str, fecha: NaiveDate, hora_inicio: NaiveTime, hora_fin: NaiveTime) -> Self {
        Self {
            recurso: recurso.to_string(),
            nombre: None,
            fecha,
            hora_inicio,
            hora_fin,
            descripcion: None,
        }
    }

    pub fn con_nombre(mut self, nombre: &str) -> Self {
        self.nombre = Some(nombre.to_string());
        self
    }

    pub fn nombre_visible(&self) -> &str {
        self.nombre.as_deref().unwrap_or(&self.recurso)
    }

    pub fn validar(&self) -> Result<(), ErrorPlanificacion> {
        validar_horario(self.hora_inicio, self.hora_fin, || {
            format!("compromiso de {} del {}", self.recurso, self.fecha)
        })
    }
}

/// Agenda existente de docentes y salas. El motor nunca la modifica.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConjuntoCompromisos {
    #[serde(default)]
    pub docentes: Vec<Compromiso>,
    #[serde(default)]
    pub salas: Vec<Compromiso>,
}

impl ConjuntoCompromisos {
    pub fn validar(&self) -> Result<(), ErrorPlanificacion> {
        self.docentes.iter().chain(self.salas.iter()).try_for_each(Compromiso::validar)
    }
}

fn validar_horario<F>(inicio: NaiveTime, fin: NaiveTime, contexto: F) -> Result<(), ErrorPlanificacion>
where
    F: FnOnce() -> String,
{
    if inicio < fin {
        Ok(())
    } else {
        Err(ErrorPlanificacion::HorarioInvalido { inicio, fin, contexto: contexto() })
    }
}
