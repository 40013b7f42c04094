// Serialización de horas del día como "HH:MM".
//
// Se usa con `#[serde(with = "crate::models::hora")]`. Al leer acepta también
// "HH:MM:SS" y el separador '.' ("08.30"), igual que las planillas de horario.
use chrono::NaiveTime;
use serde::{de, Deserialize, Deserializer, Serializer};

/// Parsea "08:30", "8:30", "08.30" o "08:30:00".
pub fn parse_hora(texto: &str) -> Option<NaiveTime> {
    let tok = texto.trim().replace('.', ":");
    NaiveTime::parse_from_str(&tok, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(&tok, "%H:%M"))
        .ok()
}

pub fn formatear_hora(hora: &NaiveTime) -> String {
    hora.format("%H:%M").to_string()
}

/// "08:30-10:00"
pub fn formatear_rango(inicio: &NaiveTime, fin: &NaiveTime) -> String {
    format!("{}-{}", formatear_hora(inicio), formatear_hora(fin))
}

pub fn serialize<S: Serializer>(hora: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&formatear_hora(hora))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
    let texto = String::deserialize(deserializer)?;
    parse_hora(&texto)
        .ok_or_else(|| de::Error::custom(format!("hora inválida '{}', se espera HH:MM", texto)))
}
