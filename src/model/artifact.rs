use super::markup::FormMarkup;
use crate::error::ArtifactError;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};

/// A fully migrated form, frozen for distribution.
///
/// The markup is stored as its JSON rendition inside the binary envelope:
/// component models carry a flattened extra-property map, which needs a
/// self-describing format.
#[derive(Serialize, Deserialize, Debug)]
pub struct CompiledForm {
    pub markup_json: String,
    /// Component type to migration version the markup was settled at.
    pub component_versions: Vec<(String, u32)>,
}

impl CompiledForm {
    pub fn new(markup: &FormMarkup, component_versions: Vec<(String, u32)>) -> Result<Self, ArtifactError> {
        let markup_json = markup
            .to_json()
            .map_err(|e| ArtifactError::Generic(format!("Markup serialization failed: {}", e)))?;
        Ok(Self {
            markup_json,
            component_versions,
        })
    }

    pub fn markup(&self) -> Result<FormMarkup, ArtifactError> {
        FormMarkup::from_json(&self.markup_json)
            .map_err(|e| ArtifactError::Generic(format!("Markup deserialization failed: {}", e)))
    }

    /// Saves the compiled form to a file using the bincode format.
    pub fn save(&self, path: &str) -> Result<(), ArtifactError> {
        let bytes = encode_to_vec(self, standard())
            .map_err(|e| ArtifactError::Generic(format!("Serialization failed: {}", e)))?;
        let mut file = fs::File::create(path).map_err(|e| {
            ArtifactError::Generic(format!("Could not create file '{}': {}", path, e))
        })?;
        file.write_all(&bytes).map_err(|e| {
            ArtifactError::Generic(format!("Could not write to file '{}': {}", path, e))
        })?;
        Ok(())
    }

    /// Loads a compiled form from a file.
    pub fn from_file(path: &str) -> Result<Self, ArtifactError> {
        let mut file = fs::File::open(path)
            .map_err(|e| ArtifactError::Generic(format!("Could not open file '{}': {}", path, e)))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| {
            ArtifactError::Generic(format!("Could not read from file '{}': {}", path, e))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Deserializes a compiled form from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        decode_from_slice(bytes, standard())
            .map(|(form, _)| form) // bincode 2 returns a tuple (data, bytes_read)
            .map_err(|e| ArtifactError::Generic(format!("Deserialization failed: {}", e)))
    }
}
