// core/src/models/kategori.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Kategori {
  pub id: Uuid,
  pub nama: String,
  pub deskripsi: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewKategori {
  pub nama: String,
  pub deskripsi: Option<String>,
}

/// Partial update body. Only mutable columns are accepted; anything else in
/// the request (`id`, timestamps) is ignored during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KategoriPatch {
  #[serde(default)]
  pub nama: Option<String>,
  #[serde(default, deserialize_with = "crate::models::double_option")]
  pub deskripsi: Option<Option<String>>,
}

impl KategoriPatch {
  pub fn blanks_required(&self) -> bool {
    super::blanked(&self.nama)
  }

  pub fn apply_to(self, kategori: &mut Kategori) {
    if let Some(nama) = self.nama {
      kategori.nama = nama;
    }
    if let Some(deskripsi) = self.deskripsi {
      kategori.deskripsi = deskripsi;
    }
  }
}
