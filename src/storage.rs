use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::model::{PlantShift, RequestId, RequestStatus, ShiftChangeRequest};
use crate::search::RequestRepository;

/// Instantánea de una planta: planilla y solicitudes de sus miembros.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Plant {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub shifts: Vec<PlantShift>,
    #[serde(default)]
    pub requests: Vec<ShiftChangeRequest>,
}

impl RequestRepository for Plant {
    fn list(&self) -> anyhow::Result<Vec<ShiftChangeRequest>> {
        Ok(self.requests.clone())
    }

    fn get(&self, id: &RequestId) -> anyhow::Result<Option<ShiftChangeRequest>> {
        Ok(self.requests.iter().find(|r| &r.id == id).cloned())
    }

    fn insert(&mut self, request: ShiftChangeRequest) -> anyhow::Result<()> {
        self.requests.push(request);
        Ok(())
    }

    fn update_if(
        &mut self,
        expected: RequestStatus,
        request: &ShiftChangeRequest,
    ) -> anyhow::Result<bool> {
        match self.requests.iter_mut().find(|r| r.id == request.id) {
            Some(stored) if stored.status == expected => {
                *stored = request.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

pub trait Storage {
    /// Carga una planta desde un soporte.
    fn load(&self) -> anyhow::Result<Plant>;
    /// Guardado atómico.
    fn save(&self, plant: &Plant) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Plant> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let plant: Plant = serde_json::from_slice(&data).with_context(|| "parsing plant.json")?;
        Ok(plant)
    }

    fn save(&self, plant: &Plant) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(plant)?;
        let mut tmp = NamedTempFile::new_in(self.path.parent().unwrap_or_else(|| Path::new(".")))
            .with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}
