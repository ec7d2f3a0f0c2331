//! # Headers HTTP
//! src/http/headers.rs
//!
//! Mapa de headers con búsqueda case-insensitive. Se conserva el orden
//! de inserción para que la serialización de respuestas sea determinista.

/// Colección de headers `Name: Value`
///
/// Los nombres se comparan sin distinguir mayúsculas (`Host` == `host`).
/// Insertar un nombre que ya existe reemplaza el valor: gana el último.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Crea una colección vacía
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Inserta o reemplaza un header
    ///
    /// # Ejemplo
    /// ```
    /// use mini_http::http::Headers;
    ///
    /// let mut headers = Headers::new();
    /// headers.insert("Content-Type", "text/plain");
    /// headers.insert("content-type", "application/octet-stream");
    ///
    /// assert_eq!(headers.len(), 1);
    /// assert_eq!(headers.get("CONTENT-TYPE"), Some("application/octet-stream"));
    /// ```
    pub fn insert(&mut self, name: &str, value: &str) {
        match self.position(name) {
            Some(i) => self.entries[i].1 = value.to_string(),
            None => self.entries.push((name.to_string(), value.to_string())),
        }
    }

    /// Obtiene el valor de un header (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.entries[i].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Itera en orden de inserción
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(name))
    }
}
