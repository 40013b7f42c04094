// --- Planificador de sesiones - Archivo principal ---

use planificador::config::Configuracion;
use planificador::run_server;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("=== Planificador de sesiones (API) ===");
    let config = Configuracion::desde_entorno().map_err(|e| {
        log::error!("{}", e);
        std::io::Error::other(e.to_string())
    })?;
    run_server(config).await
}
