// tests/lookup_tables_tests.rs
mod common;
use common::*;
use inventaris_core::{InventoryStore, KategoriPatch, MemoryStore, NewRuangan, RuanganPatch, StoreError};
use uuid::Uuid;

#[tokio::test]
async fn test_kategori_listed_by_name() {
  setup_tracing();
  let store = MemoryStore::new();
  seed_kategori(&store, "Elektronik").await;
  seed_kategori(&store, "Alat Tulis").await;
  seed_kategori(&store, "Furnitur").await;

  let names: Vec<String> = store.list_kategori().await.unwrap().into_iter().map(|k| k.nama).collect();
  assert_eq!(names, vec!["Alat Tulis", "Elektronik", "Furnitur"]);
}

#[tokio::test]
async fn test_ruangan_create_keeps_optional_columns_null() {
  setup_tracing();
  let store = MemoryStore::new();
  let created = store
    .create_ruangan(NewRuangan {
      nama: "Lab A".to_string(),
      lokasi: None,
      deskripsi: None,
    })
    .await
    .unwrap();

  assert_eq!(created.nama, "Lab A");
  assert!(created.lokasi.is_none());
  assert!(created.deskripsi.is_none());
  assert_eq!(store.get_ruangan(created.id).await.unwrap(), created);
}

#[tokio::test]
async fn test_partial_update_only_touches_submitted_fields() {
  setup_tracing();
  let store = MemoryStore::new();
  let ruangan = store
    .create_ruangan(NewRuangan {
      nama: "Gudang".to_string(),
      lokasi: Some("Lantai 1".to_string()),
      deskripsi: Some("Penyimpanan".to_string()),
    })
    .await
    .unwrap();

  let updated = store
    .update_ruangan(
      ruangan.id,
      RuanganPatch {
        lokasi: Some(Some("Lantai 2".to_string())),
        ..Default::default()
      },
    )
    .await
    .unwrap();

  assert_eq!(updated.nama, "Gudang");
  assert_eq!(updated.lokasi.as_deref(), Some("Lantai 2"));
  assert_eq!(updated.deskripsi.as_deref(), Some("Penyimpanan"));
  assert_eq!(updated.created_at, ruangan.created_at);
  assert!(updated.updated_at >= ruangan.updated_at);

  let cleared = store
    .update_ruangan(
      ruangan.id,
      RuanganPatch {
        deskripsi: Some(None),
        ..Default::default()
      },
    )
    .await
    .unwrap();
  assert!(cleared.deskripsi.is_none());
  assert_eq!(cleared.lokasi.as_deref(), Some("Lantai 2"));
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
  setup_tracing();
  let store = MemoryStore::new();
  let kategori = seed_kategori(&store, "Kebersihan").await;

  store.delete_kategori(kategori.id).await.unwrap();
  let err = store.get_kategori(kategori.id).await.unwrap_err();
  assert!(matches!(err, StoreError::NotFound));

  // Deleting again is not an error.
  store.delete_kategori(kategori.id).await.unwrap();
}

#[tokio::test]
async fn test_update_missing_id_is_not_found() {
  setup_tracing();
  let store = MemoryStore::new();
  let result = store
    .update_kategori(
      Uuid::new_v4(),
      KategoriPatch {
        nama: Some("Apa saja".to_string()),
        ..Default::default()
      },
    )
    .await;
  assert!(matches!(result, Err(StoreError::NotFound)));
}

#[tokio::test]
async fn test_clones_share_tables() {
  setup_tracing();
  let store = MemoryStore::new();
  let handle = store.clone();
  seed_ruangan(&store, "Aula").await;
  assert_eq!(handle.list_ruangan().await.unwrap().len(), 1);
}
