// Biblioteca raíz del crate `planificador`.
// Reexporta el motor de planificación (grilla mensual, expansión de patrones,
// clasificación de conflictos) y el servicio HTTP de vista previa.
pub mod algorithm;
pub mod api_json;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
mod server_handlers;

pub use error::ErrorPlanificacion;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
