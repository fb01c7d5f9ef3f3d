// core/src/models/barang.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Condition recorded when a create request leaves `kondisi` out.
/// Other observed values are `rusak_ringan` and `rusak_berat`; the column stays an open string.
pub const DEFAULT_KONDISI: &str = "baik";

pub const DEFAULT_JUMLAH: i32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Barang {
  pub id: Uuid,
  pub nama: String,
  pub deskripsi: Option<String>,
  pub kategori_id: Uuid,
  pub ruangan_id: Uuid,
  pub jumlah: i32,
  pub kondisi: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// `{id, nama}` of a joined category or room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
  pub id: Uuid,
  pub nama: String,
}

/// An item as listed: the row itself plus the names of its category and room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarangDetail {
  #[serde(flatten)]
  pub barang: Barang,
  pub kategori: Option<NamedRef>,
  pub ruangan: Option<NamedRef>,
}

#[derive(Debug, Clone)]
pub struct NewBarang {
  pub nama: String,
  pub deskripsi: Option<String>,
  pub kategori_id: Uuid,
  pub ruangan_id: Uuid,
  pub jumlah: i32,
  pub kondisi: String,
}

impl NewBarang {
  /// Builds an insert payload, substituting defaults for a missing or zero
  /// `jumlah` and a missing or empty `kondisi`.
  pub fn new(
    nama: String,
    deskripsi: Option<String>,
    kategori_id: Uuid,
    ruangan_id: Uuid,
    jumlah: Option<i32>,
    kondisi: Option<String>,
  ) -> Self {
    let jumlah = match jumlah {
      Some(0) | None => DEFAULT_JUMLAH,
      Some(n) => n,
    };
    let kondisi = kondisi
      .filter(|k| !k.is_empty())
      .unwrap_or_else(|| DEFAULT_KONDISI.to_string());

    Self {
      nama,
      deskripsi,
      kategori_id,
      ruangan_id,
      jumlah,
      kondisi,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BarangPatch {
  #[serde(default)]
  pub nama: Option<String>,
  #[serde(default, deserialize_with = "crate::models::double_option")]
  pub deskripsi: Option<Option<String>>,
  #[serde(default, deserialize_with = "crate::models::blank_as_none")]
  pub kategori_id: Option<Uuid>,
  #[serde(default, deserialize_with = "crate::models::blank_as_none")]
  pub ruangan_id: Option<Uuid>,
  #[serde(default)]
  pub jumlah: Option<i32>,
  #[serde(default)]
  pub kondisi: Option<String>,
}

impl BarangPatch {
  pub fn blanks_required(&self) -> bool {
    super::blanked(&self.nama)
  }

  pub fn apply_to(self, barang: &mut Barang) {
    if let Some(nama) = self.nama {
      barang.nama = nama;
    }
    if let Some(deskripsi) = self.deskripsi {
      barang.deskripsi = deskripsi;
    }
    if let Some(kategori_id) = self.kategori_id {
      barang.kategori_id = kategori_id;
    }
    if let Some(ruangan_id) = self.ruangan_id {
      barang.ruangan_id = ruangan_id;
    }
    if let Some(jumlah) = self.jumlah {
      barang.jumlah = jumlah;
    }
    if let Some(kondisi) = self.kondisi {
      barang.kondisi = kondisi;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_barang_falls_back_to_defaults() {
    let k = Uuid::new_v4();
    let r = Uuid::new_v4();

    let omitted = NewBarang::new("Proyektor".into(), None, k, r, None, None);
    assert_eq!(omitted.jumlah, DEFAULT_JUMLAH);
    assert_eq!(omitted.kondisi, DEFAULT_KONDISI);

    let zeroed = NewBarang::new("Proyektor".into(), None, k, r, Some(0), Some(String::new()));
    assert_eq!(zeroed.jumlah, 1);
    assert_eq!(zeroed.kondisi, "baik");

    let explicit = NewBarang::new("Proyektor".into(), None, k, r, Some(4), Some("rusak_ringan".into()));
    assert_eq!(explicit.jumlah, 4);
    assert_eq!(explicit.kondisi, "rusak_ringan");
  }

  #[test]
  fn patch_distinguishes_absent_from_null() {
    let absent: BarangPatch = serde_json::from_str(r#"{"jumlah": 3}"#).unwrap();
    assert!(absent.deskripsi.is_none());
    assert_eq!(absent.jumlah, Some(3));

    let cleared: BarangPatch = serde_json::from_str(r#"{"deskripsi": null}"#).unwrap();
    assert_eq!(cleared.deskripsi, Some(None));
  }

  #[test]
  fn patch_reads_blank_ids_as_absent() {
    let patch: BarangPatch = serde_json::from_str(r#"{"kategori_id": "", "ruangan_id": null}"#).unwrap();
    assert!(patch.kategori_id.is_none());
    assert!(patch.ruangan_id.is_none());

    let id = Uuid::new_v4();
    let patch: BarangPatch = serde_json::from_str(&format!(r#"{{"ruangan_id": "{}"}}"#, id)).unwrap();
    assert_eq!(patch.ruangan_id, Some(id));

    assert!(serde_json::from_str::<BarangPatch>(r#"{"kategori_id": "bukan-uuid"}"#).is_err());
  }

  #[test]
  fn patch_ignores_immutable_columns() {
    let patch: BarangPatch = serde_json::from_str(
      r#"{"id": "00000000-0000-0000-0000-000000000000", "created_at": "2020-01-01T00:00:00Z", "nama": "Kursi"}"#,
    )
    .unwrap();
    assert_eq!(patch.nama.as_deref(), Some("Kursi"));
  }

  #[test]
  fn detail_serializes_flat_with_lookups() {
    let now = Utc::now();
    let kategori_id = Uuid::new_v4();
    let detail = BarangDetail {
      barang: Barang {
        id: Uuid::new_v4(),
        nama: "Meja".into(),
        deskripsi: None,
        kategori_id,
        ruangan_id: Uuid::new_v4(),
        jumlah: 2,
        kondisi: DEFAULT_KONDISI.into(),
        created_at: now,
        updated_at: now,
      },
      kategori: Some(NamedRef {
        id: kategori_id,
        nama: "Furnitur".into(),
      }),
      ruangan: None,
    };

    let value = serde_json::to_value(&detail).unwrap();
    assert_eq!(value["nama"], "Meja");
    assert_eq!(value["kategori"]["nama"], "Furnitur");
    assert!(value["ruangan"].is_null());
  }
}
