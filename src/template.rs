//! # Templates HTML
//! src/template.rs
//!
//! Template respaldado por un archivo: se lee una vez con [`Template::parse`]
//! y cada [`Template::execute`] lo escribe como body HTML de la respuesta.
//! No hay sustitución de variables.

use crate::http::Response;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Could not read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Template {0} was executed before being parsed")]
    NotParsed(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Template {
    path: PathBuf,
    content: Option<String>,
}

impl Template {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            content: None,
        }
    }

    /// Lee el archivo y guarda su contenido
    pub fn parse(&mut self) -> Result<(), TemplateError> {
        let content = fs::read_to_string(&self.path).map_err(|source| TemplateError::Io {
            path: self.path.clone(),
            source,
        })?;
        self.content = Some(content);
        Ok(())
    }

    /// Escribe el template en la respuesta como `text/html`
    pub fn execute(&self, w: &mut Response) -> Result<(), TemplateError> {
        let content = self
            .content
            .as_deref()
            .ok_or_else(|| TemplateError::NotParsed(self.path.clone()))?;

        w.write_header("Content-Type", "text/html");
        w.write_string(content);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
