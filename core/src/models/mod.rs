// core/src/models/mod.rs

//! Records persisted by an `InventoryStore`, with their create payloads and patches.

pub mod barang;
pub mod kategori;
pub mod ruangan;
pub mod user;

pub use barang::{Barang, BarangDetail, BarangPatch, NamedRef, NewBarang, DEFAULT_JUMLAH, DEFAULT_KONDISI};
pub use kategori::{Kategori, KategoriPatch, NewKategori};
pub use ruangan::{NewRuangan, Ruangan, RuanganPatch};
pub use user::{NewUser, User, UserPatch};

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Keeps "field absent" apart from "field explicitly null" in a patch body.
/// Use with `#[serde(default, deserialize_with = "inventaris_core::models::double_option")]`.
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(deserializer).map(Some)
}

/// Reads an id field from a form body where an unselected `<select>` sends `""`.
/// A blank id counts as absent.
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
  D: Deserializer<'de>,
{
  match Option::<String>::deserialize(deserializer)? {
    None => Ok(None),
    Some(raw) if raw.is_empty() => Ok(None),
    Some(raw) => Uuid::parse_str(&raw).map(Some).map_err(serde::de::Error::custom),
  }
}

/// True when a patch would overwrite a required text column with an empty value.
pub(crate) fn blanked(field: &Option<String>) -> bool {
  matches!(field.as_deref(), Some(""))
}
