// core/src/models/ruangan.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Ruangan {
  pub id: Uuid,
  pub nama: String,
  pub lokasi: Option<String>,
  pub deskripsi: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRuangan {
  pub nama: String,
  pub lokasi: Option<String>,
  pub deskripsi: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuanganPatch {
  #[serde(default)]
  pub nama: Option<String>,
  #[serde(default, deserialize_with = "crate::models::double_option")]
  pub lokasi: Option<Option<String>>,
  #[serde(default, deserialize_with = "crate::models::double_option")]
  pub deskripsi: Option<Option<String>>,
}

impl RuanganPatch {
  pub fn blanks_required(&self) -> bool {
    super::blanked(&self.nama)
  }

  pub fn apply_to(self, ruangan: &mut Ruangan) {
    if let Some(nama) = self.nama {
      ruangan.nama = nama;
    }
    if let Some(lokasi) = self.lokasi {
      ruangan.lokasi = lokasi;
    }
    if let Some(deskripsi) = self.deskripsi {
      ruangan.deskripsi = deskripsi;
    }
  }
}
