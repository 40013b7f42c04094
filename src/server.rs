use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};

use crate::config::{Configuracion, MAX_DIAS_POR_DEFECTO};
use crate::models::CalendarioFeriados;
use crate::server_handlers::{calendario_handler, feriados_handler, help_handler, preview_handler};

/// Estado compartido de sólo lectura entre workers.
#[derive(Debug, Clone)]
pub struct EstadoApp {
    pub feriados: CalendarioFeriados,
    /// Tope de días por patrón en `/preview`.
    pub max_dias: u32,
}

impl EstadoApp {
    pub fn new(feriados: CalendarioFeriados) -> Self {
        Self {
            feriados,
            max_dias: MAX_DIAS_POR_DEFECTO,
        }
    }

    pub fn con_max_dias(mut self, max_dias: u32) -> Self {
        self.max_dias = max_dias;
        self
    }
}

impl Default for EstadoApp {
    fn default() -> Self {
        Self::new(CalendarioFeriados::default())
    }
}

/// Registra las rutas del servicio (también usado por los tests).
pub fn configurar_rutas(cfg: &mut web::ServiceConfig) {
    cfg.route("/preview", web::post().to(preview_handler))
        .route("/calendario", web::post().to(calendario_handler))
        .route("/feriados", web::get().to(feriados_handler))
        .route("/help", web::get().to(help_handler));
}

fn cors_para(origen: Option<&str>) -> Cors {
    match origen {
        Some(o) => Cors::default()
            .allowed_origin(o)
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header()
            .max_age(3600),
        None => Cors::permissive(),
    }
}

pub async fn run_server(config: Configuracion) -> std::io::Result<()> {
    // El calendario de feriados se carga una vez; si el archivo es inválido no arrancamos.
    let feriados = config
        .cargar_feriados()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let estado = web::Data::new(EstadoApp::new(feriados).con_max_dias(config.max_dias));
    let cors_origin = config.cors_origin.clone();

    log::info!(
        "escuchando en http://{} con {} workers (máx. {} días por patrón)",
        config.bind,
        config.workers,
        config.max_dias
    );
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(cors_para(cors_origin.as_deref()))
            .app_data(estado.clone())
            .configure(configurar_rutas)
    })
    .workers(config.workers)
    .bind(config.bind.as_str())?
    .run()
    .await
}
