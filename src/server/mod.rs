//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Acepta conexiones sobre un listener creado por el llamador
//! 2. Lanza un thread por conexión
//! 3. Lee y parsea requests HTTP en un loop por conexión
//! 4. Genera y envía responses HTTP, con keep-alive opcional

pub mod connection;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use connection::Connection;
pub use tcp::Server;
