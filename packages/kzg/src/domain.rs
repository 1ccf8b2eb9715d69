use std::path::Path;

use serde::Deserialize;

use crate::{BYTES_PER_FIELD_ELEMENT, Error, FIELD_ELEMENTS_PER_BLOB, Result};

/// The 4096 roots of unity of the BLS12-381 scalar field, in the
/// bit-reversal-permutation order blobs are evaluated over. Opening a blob
/// polynomial at `point(i)` yields field element `i` of the blob.
pub struct EvaluationDomain {
    roots: Vec<[u8; 32]>,
}

#[derive(Deserialize)]
struct DomainTable {
    domain_size: usize,
    roots: Vec<String>,
}

impl EvaluationDomain {
    pub fn from_json(json: &str) -> Result<Self> {
        let table: DomainTable = serde_json::from_str(json)?;

        if table.domain_size != FIELD_ELEMENTS_PER_BLOB {
            return Err(Error::Domain(format!(
                "expected domain size {FIELD_ELEMENTS_PER_BLOB}, table says {}",
                table.domain_size
            )));
        }
        if table.roots.len() != table.domain_size {
            return Err(Error::Domain(format!(
                "table declares {} roots but holds {}",
                table.domain_size,
                table.roots.len()
            )));
        }

        let roots = table
            .roots
            .iter()
            .map(|root| parse_scalar(root))
            .collect::<Result<_>>()?;

        Ok(Self { roots })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn point(&self, index: usize) -> Result<[u8; 32]> {
        self.roots
            .get(index)
            .copied()
            .ok_or_else(|| {
                Error::Domain(format!(
                    "field element index {index} out of range 0..{}",
                    self.roots.len()
                ))
            })
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

fn parse_scalar(hex_str: &str) -> Result<[u8; 32]> {
    let digits = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    let bytes = hex::decode(digits)?;

    bytes.try_into().map_err(|bytes: Vec<u8>| {
        Error::Domain(format!(
            "scalar must be {BYTES_PER_FIELD_ELEMENT} bytes, got {}",
            bytes.len()
        ))
    })
}
