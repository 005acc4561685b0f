//! # Configuración del Binario de Demo
//! src/config.rs
//!
//! La librería no necesita configuración: quien la embebe crea el listener.
//! Esta configuración solo la usa `src/main.rs`.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./httpmux --port 8080 --host 0.0.0.0 --log debug
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTPMUX_PORT=8080 HTTPMUX_TEMPLATE=./index.html ./httpmux
//! ```

use clap::Parser;

/// Configuración del servidor de demo
#[derive(Debug, Clone, Parser)]
#[command(name = "httpmux")]
#[command(about = "Servidor HTTP/1.1 mínimo con router y keep-alive")]
#[command(version)]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTPMUX_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTPMUX_HOST")]
    pub host: String,

    /// Filtro de logging (`info`, `debug`, `httpmux=trace`, ...)
    #[arg(long = "log", default_value = "info", env = "HTTPMUX_LOG")]
    pub log_level: String,

    /// Archivo HTML servido en `/page` (opcional)
    #[arg(long, env = "HTTPMUX_TEMPLATE")]
    pub template: Option<String>,
}

impl Config {
    /// Obtiene la dirección completa para bind (host:port)
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Host must not be empty".to_string());
        }
        if self.log_level.trim().is_empty() {
            return Err("Log level must not be empty".to_string());
        }
        if let Some(path) = &self.template {
            if path.trim().is_empty() {
                return Err("Template path must not be empty".to_string());
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            template: None,
        }
    }
}
