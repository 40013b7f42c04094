// Motor de planificación: grilla mensual, expansión de patrones y conflictos.
pub mod calendario;
pub mod conflict;
pub mod expansion;
pub mod preview;

// Reexportar la API pública del motor
pub use calendario::{construir_grilla_mes, CeldaCalendario, GrillaMes};
pub use conflict::{clasificar_sesiones, se_solapan};
pub use expansion::{expandir, expandir_patron, Expansion};
pub use preview::{generar_vista_previa, ordenar_sesiones, ResumenEstados, SolicitudPatron, VistaPrevia};
