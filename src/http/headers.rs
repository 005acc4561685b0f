//! # Headers HTTP
//! src/http/headers.rs
//!
//! Mapa de headers que conserva el orden de inserción.
//!
//! Las claves se comparan tal cual llegaron (case-sensitive): `Connection` y
//! `connection` son headers distintos. Insertar una clave existente reemplaza
//! su valor en la misma posición, así que "el último gana" sin duplicados.

/// Colección ordenada de pares `Name: Value`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Crea un mapa vacío
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserta o reemplaza un header
    ///
    /// Retorna el valor anterior si la clave ya existía.
    ///
    /// # Ejemplo
    /// ```
    /// use httpmux::http::Headers;
    ///
    /// let mut headers = Headers::new();
    /// headers.insert("Content-Type", "text/plain");
    /// let old = headers.insert("Content-Type", "text/html");
    ///
    /// assert_eq!(old.as_deref(), Some("text/plain"));
    /// assert_eq!(headers.get("Content-Type"), Some("text/html"));
    /// assert_eq!(headers.len(), 1);
    /// ```
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Obtiene el valor de un header
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Elimina un header y retorna su valor
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Elimina los headers cuyo nombre coincide con `name` ignorando
    /// mayúsculas, salvo el que tiene exactamente esa escritura
    ///
    /// Retorna cuántos se eliminaron.
    pub fn remove_case_variants(&mut self, name: &str) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|(key, _)| key == name || !key.eq_ignore_ascii_case(name));
        before - self.entries.len()
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Itera en orden de inserción
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}
