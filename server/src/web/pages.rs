// server/src/web/pages.rs

//! HTML shells for the admin panel. Pages carry no data; their scripts call
//! the JSON API. A resource page embeds a `PageSpec` that tells
//! `resource.js` which columns to show and which form fields to build.

use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use rust_embed::RustEmbed;
use serde::Serialize;
use tracing::{error, instrument};

use crate::errors::AppError;

/// Scripts and the stylesheet, served under `/assets/{file}`.
#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
  Text,
  Email,
  Password,
  Number,
  Textarea,
  Select,
}

#[derive(Debug, Serialize)]
pub struct Column {
  /// Dotted paths reach into joined lookups, e.g. `kategori.nama`.
  pub key: &'static str,
  pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Field {
  pub name: &'static str,
  pub label: &'static str,
  pub kind: FieldKind,
  pub required: bool,
  /// Fixed choices for a `Select`.
  #[serde(skip_serializing_if = "no_options")]
  pub options: &'static [&'static str],
  /// Name of a `Lookup` whose records fill a `Select`.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub lookup: Option<&'static str>,
  /// Left out of an edit submission when blank (passwords).
  pub omit_blank_on_edit: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub default: Option<&'static str>,
}

fn no_options(options: &&'static [&'static str]) -> bool {
  options.is_empty()
}

impl Field {
  fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
    Self {
      name,
      label,
      kind,
      required: false,
      options: &[],
      lookup: None,
      omit_blank_on_edit: false,
      default: None,
    }
  }

  fn required(mut self) -> Self {
    self.required = true;
    self
  }

  fn options(mut self, options: &'static [&'static str]) -> Self {
    self.options = options;
    self
  }

  fn lookup(mut self, lookup: &'static str) -> Self {
    self.lookup = Some(lookup);
    self
  }

  fn default_value(mut self, value: &'static str) -> Self {
    self.default = Some(value);
    self
  }
}

#[derive(Debug, Serialize)]
pub struct Lookup {
  pub name: &'static str,
  pub endpoint: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PageSpec {
  pub resource: &'static str,
  pub title: &'static str,
  pub singular: &'static str,
  pub endpoint: &'static str,
  /// Record keys matched by the search box.
  pub search: &'static [&'static str],
  /// Record key shown in the delete confirmation.
  pub label_key: &'static str,
  pub columns: Vec<Column>,
  pub fields: Vec<Field>,
  pub lookups: Vec<Lookup>,
}

const KONDISI_OPTIONS: &[&str] = &["baik", "rusak_ringan", "rusak_berat"];
const ROLE_OPTIONS: &[&str] = &["user", "admin"];

fn col(key: &'static str, label: &'static str) -> Column {
  Column { key, label }
}

/// The page description for `/dashboard/{resource}`, or `None` for an unknown resource.
pub fn page_spec(resource: &str) -> Option<PageSpec> {
  let page = match resource {
    "barang" => PageSpec {
      resource: "barang",
      title: "Data Barang",
      singular: "Barang",
      endpoint: "/api/barang",
      search: &["nama", "deskripsi"],
      label_key: "nama",
      columns: vec![
        col("nama", "Nama"),
        col("kategori.nama", "Kategori"),
        col("ruangan.nama", "Ruangan"),
        col("jumlah", "Jumlah"),
        col("kondisi", "Kondisi"),
      ],
      fields: vec![
        Field::new("nama", "Nama Barang", FieldKind::Text).required(),
        Field::new("deskripsi", "Deskripsi", FieldKind::Textarea),
        Field::new("kategori_id", "Kategori", FieldKind::Select)
          .required()
          .lookup("kategori"),
        Field::new("ruangan_id", "Ruangan", FieldKind::Select)
          .required()
          .lookup("ruangan"),
        Field::new("jumlah", "Jumlah", FieldKind::Number).default_value("1"),
        Field::new("kondisi", "Kondisi", FieldKind::Select)
          .options(KONDISI_OPTIONS)
          .default_value("baik"),
      ],
      lookups: vec![
        Lookup {
          name: "kategori",
          endpoint: "/api/kategori",
        },
        Lookup {
          name: "ruangan",
          endpoint: "/api/ruangan",
        },
      ],
    },
    "kategori" => PageSpec {
      resource: "kategori",
      title: "Kategori",
      singular: "Kategori",
      endpoint: "/api/kategori",
      search: &["nama", "deskripsi"],
      label_key: "nama",
      columns: vec![col("nama", "Nama"), col("deskripsi", "Deskripsi")],
      fields: vec![
        Field::new("nama", "Nama Kategori", FieldKind::Text).required(),
        Field::new("deskripsi", "Deskripsi", FieldKind::Textarea),
      ],
      lookups: Vec::new(),
    },
    "ruangan" => PageSpec {
      resource: "ruangan",
      title: "Ruangan",
      singular: "Ruangan",
      endpoint: "/api/ruangan",
      search: &["nama", "lokasi"],
      label_key: "nama",
      columns: vec![
        col("nama", "Nama"),
        col("lokasi", "Lokasi"),
        col("deskripsi", "Deskripsi"),
      ],
      fields: vec![
        Field::new("nama", "Nama Ruangan", FieldKind::Text).required(),
        Field::new("lokasi", "Lokasi", FieldKind::Text),
        Field::new("deskripsi", "Deskripsi", FieldKind::Textarea),
      ],
      lookups: Vec::new(),
    },
    "users" => PageSpec {
      resource: "users",
      title: "Manajemen User",
      singular: "User",
      endpoint: "/api/users",
      search: &["name", "email"],
      label_key: "name",
      columns: vec![col("name", "Nama"), col("email", "Email"), col("role", "Role")],
      fields: vec![
        Field::new("name", "Nama Lengkap", FieldKind::Text).required(),
        Field::new("email", "Email", FieldKind::Email).required(),
        Field {
          omit_blank_on_edit: true,
          ..Field::new("password", "Password", FieldKind::Password).required()
        },
        Field::new("role", "Role", FieldKind::Select)
          .required()
          .options(ROLE_OPTIONS)
          .default_value("user"),
      ],
      lookups: Vec::new(),
    },
    _ => return None,
  };
  Some(page)
}

/// JSON placed inside a `<script>` element must not be able to close it.
fn script_safe_json(page: &PageSpec) -> Result<String, AppError> {
  serde_json::to_string(page)
    .map(|json| json.replace("</", "<\\/"))
    .map_err(|e| {
      error!(error = %e, "Failed to serialize page description.");
      AppError::Internal(format!("Page description serialization failed: {}", e))
    })
}

const NAV: &[(&str, &str)] = &[
  ("/dashboard", "Dashboard"),
  ("/dashboard/barang", "Barang"),
  ("/dashboard/kategori", "Kategori"),
  ("/dashboard/ruangan", "Ruangan"),
  ("/dashboard/users", "Users"),
];

fn head(title: &str) -> Markup {
  html! {
    head {
      meta charset="utf-8";
      meta name="viewport" content="width=device-width, initial-scale=1";
      title { (title) " · Inventaris" }
      link rel="stylesheet" href="/assets/app.css";
    }
  }
}

/// Sidebar shell shared by every dashboard page.
fn layout(title: &str, content: Markup, script: Option<&str>) -> Markup {
  html! {
    (DOCTYPE)
    html lang="id" {
      (head(title))
      body class="shell" {
        aside class="sidebar" {
          div class="brand" { "Inventaris" }
          nav {
            @for (href, label) in NAV {
              a href=(href) { (label) }
            }
          }
          div class="account" {
            img id="current-avatar" class="avatar" alt="" hidden;
            div {
              div id="current-name" class="account-name" {}
              div id="current-role" class="account-role" {}
            }
            button id="logout" type="button" class="btn btn-ghost" { "Keluar" }
          }
        }
        main class="content" { (content) }
        script src="/assets/app.js" {}
        @if let Some(src) = script {
          script src=(src) {}
        }
      }
    }
  }
}

fn login_markup() -> Markup {
  html! {
    (DOCTYPE)
    html lang="id" {
      (head("Masuk"))
      body class="login" {
        form id="login-form" class="card" {
          h1 { "Inventaris" }
          p class="muted" { "Masuk untuk mengelola data inventaris." }
          label {
            "Email"
            input name="email" type="email" autocomplete="username" required;
          }
          label {
            "Password"
            input name="password" type="password" autocomplete="current-password" required;
          }
          p id="login-error" class="error" hidden {}
          button id="login-submit" type="submit" class="btn btn-primary" { "Masuk" }
        }
        script src="/assets/login.js" {}
      }
    }
  }
}

fn dashboard_markup() -> Markup {
  let stats = html! {
    header class="page-header" {
      h1 { "Dashboard" }
      p id="greeting" class="muted" { "Memuat…" }
    }
    section class="stats" {
      @for (href, label) in &NAV[1..] {
        a class="stat" href=(href) {
          span class="stat-label" { (label) }
          span class="stat-value" data-count=(href.replacen("/dashboard", "/api", 1)) { "-" }
        }
      }
    }
  };
  layout("Dashboard", stats, None)
}

fn resource_markup(page: &PageSpec, page_json: &str) -> Markup {
  let content = html! {
    header class="page-header" {
      h1 { (page.title) }
      button id="create" type="button" class="btn btn-primary" { "Tambah " (page.singular) }
    }
    div class="toolbar" {
      input id="search" type="search" placeholder="Cari…" autocomplete="off";
    }
    table class="table" {
      thead id="table-head" {}
      tbody id="table-body" {
        tr { td class="muted" { "Memuat…" } }
      }
    }
    dialog id="form-dialog" {
      form id="record-form" method="dialog" {
        h2 id="form-title" {}
        div id="form-fields" {}
        div class="dialog-actions" {
          button type="button" class="btn btn-ghost" data-close="" { "Batal" }
          button id="form-submit" type="submit" class="btn btn-primary" { "Simpan" }
        }
      }
    }
    dialog id="delete-dialog" {
      h2 { "Hapus " (page.singular) }
      p {
        "Yakin ingin menghapus "
        strong id="delete-label" {}
        "? Tindakan ini tidak dapat dibatalkan."
      }
      div class="dialog-actions" {
        button type="button" class="btn btn-ghost" data-close="" { "Batal" }
        button id="delete-confirm" type="button" class="btn btn-danger" { "Hapus" }
      }
    }
    // Already escaped by `script_safe_json`.
    script id="page-spec" type="application/json" { (PreEscaped(page_json)) }
  };
  layout(page.title, content, Some("/assets/resource.js"))
}

fn html_response(markup: Markup) -> HttpResponse {
  HttpResponse::Ok()
    .content_type(ContentType::html())
    .body(markup.into_string())
}

pub async fn login_page() -> HttpResponse {
  html_response(login_markup())
}

pub async fn dashboard_page() -> HttpResponse {
  html_response(dashboard_markup())
}

#[instrument(name = "page::resource", skip(path), fields(resource = %path.as_str()))]
pub async fn resource_page(path: web::Path<String>) -> Result<HttpResponse, AppError> {
  let page = page_spec(path.as_str()).ok_or_else(|| AppError::NotFound("Halaman tidak ditemukan".to_string()))?;
  let page_json = script_safe_json(&page)?;
  Ok(html_response(resource_markup(&page, &page_json)))
}

pub async fn asset(path: web::Path<String>) -> Result<HttpResponse, AppError> {
  let file = Assets::get(path.as_str()).ok_or_else(|| AppError::NotFound("Berkas tidak ditemukan".to_string()))?;
  Ok(HttpResponse::Ok()
    .content_type(file.metadata.mimetype())
    .body(file.data.into_owned()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_dashboard_resource_has_a_page() {
    for resource in ["barang", "kategori", "ruangan", "users"] {
      let page = page_spec(resource).unwrap();
      assert_eq!(page.endpoint, format!("/api/{}", resource));
      assert!(page.fields.iter().any(|f| f.required));
    }
    assert!(page_spec("settings").is_none());
  }

  #[test]
  fn barang_form_uses_lookups_for_references() {
    let page = page_spec("barang").unwrap();
    let kategori = page.fields.iter().find(|f| f.name == "kategori_id").unwrap();
    assert_eq!(kategori.kind, FieldKind::Select);
    assert_eq!(kategori.lookup, Some("kategori"));
    assert!(page.lookups.iter().any(|l| l.endpoint == "/api/ruangan"));
  }

  #[test]
  fn embedded_json_cannot_close_the_script_tag() {
    let mut page = page_spec("kategori").unwrap();
    page.title = "</script><script>alert(1)";
    let json = script_safe_json(&page).unwrap();
    assert!(!json.contains("</script>"));
    assert!(json.contains("<\\/script>"));
  }

  #[test]
  fn resource_markup_embeds_the_page_description_unescaped() {
    let page = page_spec("ruangan").unwrap();
    let page_json = script_safe_json(&page).unwrap();
    let markup = resource_markup(&page, &page_json).into_string();
    assert!(markup.starts_with("<!DOCTYPE html>"));
    assert!(markup.contains("\"endpoint\":\"/api/ruangan\""));
    assert!(markup.contains("Tambah Ruangan"));
    assert!(markup.contains("/assets/resource.js"));
  }

  #[test]
  fn layout_escapes_text() {
    let markup = layout("<b>Barang</b>", html! {}, None).into_string();
    assert!(markup.contains("&lt;b&gt;Barang&lt;/b&gt; · Inventaris"));
    assert!(!markup.contains("<b>Barang"));
  }

  #[test]
  fn dashboard_counts_point_at_the_api() {
    let markup = dashboard_markup().into_string();
    for resource in ["barang", "kategori", "ruangan", "users"] {
      assert!(markup.contains(&format!("data-count=\"/api/{}\"", resource)));
    }
  }

  #[test]
  fn every_script_and_stylesheet_is_embedded() {
    for file in ["app.css", "app.js", "login.js", "resource.js"] {
      assert!(Assets::get(file).is_some(), "missing asset {}", file);
    }
    assert!(Assets::get("layout.html").is_none());
  }
}
