//! Tolerant header matching
//!
//! Headers and candidate names are compared after trimming, uppercasing and
//! folding accented Latin letters, so " placa ", "PLACA" and "Placa" all
//! resolve to the same column, and "Veiculo" matches "Veículo".

use std::collections::HashMap;

use frota_types::{Error, FieldRole, Result, TableKind};
use tracing::debug;

/// Normalized form of a column name used for matching
pub fn normalize_header(name: &str) -> String {
    name.trim().to_uppercase().chars().map(fold_accent).collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'Ç' => 'C',
        'Ñ' => 'N',
        other => other,
    }
}

/// Lookup from normalized header to the real header text
#[derive(Debug)]
pub struct ColumnResolver<'a> {
    by_normalized: HashMap<String, &'a str>,
}

impl<'a> ColumnResolver<'a> {
    pub fn new(headers: &'a [String]) -> Self {
        let mut by_normalized = HashMap::new();
        for header in headers {
            // leftmost header wins on collisions
            by_normalized
                .entry(normalize_header(header))
                .or_insert(header.as_str());
        }
        Self { by_normalized }
    }

    /// First candidate present in the headers, as the real header text
    pub fn resolve<S: AsRef<str>>(&self, candidates: &[S]) -> Option<&'a str> {
        candidates
            .iter()
            .find_map(|c| self.by_normalized.get(&normalize_header(c.as_ref())).copied())
    }

    pub fn resolve_required<S: AsRef<str>>(
        &self,
        candidates: &[S],
        role: FieldRole,
        table: TableKind,
    ) -> Result<&'a str> {
        match self.resolve(candidates) {
            Some(header) => {
                debug!(%role, %table, header, "resolved column");
                Ok(header)
            }
            None => Err(Error::MissingColumn { role, table }),
        }
    }
}

/// Resolve a single role against a header list
pub fn resolve<'a, S: AsRef<str>>(headers: &'a [String], candidates: &[S]) -> Option<&'a str> {
    ColumnResolver::new(headers).resolve(candidates)
}

/// Column position of the first matching candidate
pub fn resolve_index<S: AsRef<str>>(headers: &[String], candidates: &[S]) -> Option<usize> {
    let header = resolve(headers, candidates)?;
    headers.iter().position(|h| h == header)
}
