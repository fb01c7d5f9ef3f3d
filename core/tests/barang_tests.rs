// tests/barang_tests.rs
mod common;
use common::*;
use inventaris_core::{BarangPatch, InventoryStore, MemoryStore, NewBarang, StoreError, DEFAULT_KONDISI};
use uuid::Uuid;

#[tokio::test]
async fn test_create_and_fetch_joins_lookup_names() {
  setup_tracing();
  let store = MemoryStore::new();
  let kategori = seed_kategori(&store, "Elektronik").await;
  let ruangan = seed_ruangan(&store, "Lab A").await;

  let barang = store
    .create_barang(NewBarang::new(
      "Proyektor".to_string(),
      Some("Epson".to_string()),
      kategori.id,
      ruangan.id,
      None,
      None,
    ))
    .await
    .unwrap();
  assert_eq!(barang.jumlah, 1);
  assert_eq!(barang.kondisi, DEFAULT_KONDISI);

  let detail = store.get_barang(barang.id).await.unwrap();
  assert_eq!(detail.barang, barang);
  assert_eq!(detail.kategori.as_ref().map(|k| k.nama.as_str()), Some("Elektronik"));
  assert_eq!(detail.ruangan.as_ref().map(|r| r.id), Some(ruangan.id));
}

#[tokio::test]
async fn test_list_is_newest_first() {
  setup_tracing();
  let store = MemoryStore::new();
  let kategori = seed_kategori(&store, "Elektronik").await;
  let ruangan = seed_ruangan(&store, "Lab A").await;

  for nama in ["Pertama", "Kedua", "Ketiga"] {
    store
      .create_barang(NewBarang::new(nama.to_string(), None, kategori.id, ruangan.id, Some(2), None))
      .await
      .unwrap();
  }

  let names: Vec<String> = store
    .list_barang()
    .await
    .unwrap()
    .into_iter()
    .map(|d| d.barang.nama)
    .collect();
  assert_eq!(names, vec!["Ketiga", "Kedua", "Pertama"]);
}

#[tokio::test]
async fn test_create_rejects_dangling_references() {
  setup_tracing();
  let store = MemoryStore::new();
  let ruangan = seed_ruangan(&store, "Lab A").await;

  let result = store
    .create_barang(NewBarang::new("Kursi".to_string(), None, Uuid::new_v4(), ruangan.id, None, None))
    .await;
  assert!(matches!(result, Err(StoreError::Constraint(_))));
  assert!(store.list_barang().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_referenced_lookup_rows_cannot_be_deleted() {
  setup_tracing();
  let store = MemoryStore::new();
  let kategori = seed_kategori(&store, "Elektronik").await;
  let ruangan = seed_ruangan(&store, "Lab A").await;
  let barang = store
    .create_barang(NewBarang::new("Laptop".to_string(), None, kategori.id, ruangan.id, None, None))
    .await
    .unwrap();

  assert!(matches!(store.delete_kategori(kategori.id).await, Err(StoreError::Constraint(_))));
  assert!(matches!(store.delete_ruangan(ruangan.id).await, Err(StoreError::Constraint(_))));

  store.delete_barang(barang.id).await.unwrap();
  store.delete_kategori(kategori.id).await.unwrap();
  store.delete_ruangan(ruangan.id).await.unwrap();
}

#[tokio::test]
async fn test_update_moves_item_and_keeps_other_fields() {
  setup_tracing();
  let store = MemoryStore::new();
  let kategori = seed_kategori(&store, "Elektronik").await;
  let lab = seed_ruangan(&store, "Lab A").await;
  let gudang = seed_ruangan(&store, "Gudang").await;
  let barang = store
    .create_barang(NewBarang::new(
      "Monitor".to_string(),
      None,
      kategori.id,
      lab.id,
      Some(5),
      Some("rusak_ringan".to_string()),
    ))
    .await
    .unwrap();

  let moved = store
    .update_barang(
      barang.id,
      BarangPatch {
        ruangan_id: Some(gudang.id),
        ..Default::default()
      },
    )
    .await
    .unwrap();
  assert_eq!(moved.ruangan_id, gudang.id);
  assert_eq!(moved.jumlah, 5);
  assert_eq!(moved.kondisi, "rusak_ringan");

  let dangling = store
    .update_barang(
      barang.id,
      BarangPatch {
        kategori_id: Some(Uuid::new_v4()),
        ..Default::default()
      },
    )
    .await;
  assert!(matches!(dangling, Err(StoreError::Constraint(_))));
  assert_eq!(store.get_barang(barang.id).await.unwrap().barang.kategori_id, kategori.id);
}
