use crate::model::PlanData;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge un jeu de données depuis un support.
    fn load(&self) -> anyhow::Result<PlanData>;
    /// Sauvegarde de manière atomique.
    fn save(&self, data: &PlanData) -> anyhow::Result<()>;
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

    /// Charge le fichier s'il existe, sinon un jeu de données vide.
    pub fn load_or_default(&self) -> anyhow::Result<PlanData> {
        if self.path.exists() {
            self.load()
        } else {
            Ok(PlanData::default())
        }
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<PlanData> {
        let raw =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let data: PlanData = serde_json::from_slice(&raw)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(data)
    }

    fn save(&self, data: &PlanData) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(data)?;
        let mut tmp =
            NamedTempFile::new_in(self.path.parent().unwrap_or_else(|| Path::new(".")))
                .with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}
