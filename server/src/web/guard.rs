// server/src/web/guard.rs

//! Redirects for the HTML pages. API routes never pass through here; they
//! answer 401 from the `AuthenticatedUser` extractor instead.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::LOCATION;
use actix_web::middleware::Next;
use actix_web::{web, HttpResponse};
use tracing::debug;

use crate::services::session_service::SESSION_COOKIE;
use crate::state::AppState;

#[derive(Debug, PartialEq, Eq)]
pub enum PageAccess {
  Allow,
  Redirect(&'static str),
}

/// Decides whether `path` may be served to a visitor who is (or is not)
/// signed in.
pub fn page_access(path: &str, authenticated: bool) -> PageAccess {
  let dashboard = path == "/dashboard" || path.starts_with("/dashboard/");
  match path {
    "/" => PageAccess::Redirect("/dashboard"),
    "/login" if authenticated => PageAccess::Redirect("/dashboard"),
    _ if dashboard && !authenticated => PageAccess::Redirect("/login"),
    _ => PageAccess::Allow,
  }
}

/// `from_fn` middleware wrapping the page scope. Only the token itself is
/// checked (signature and expiry); the store is not consulted.
pub async fn page_guard(
  req: ServiceRequest,
  next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
  let authenticated = match (req.app_data::<web::Data<AppState>>(), req.cookie(SESSION_COOKIE)) {
    (Some(app_state), Some(cookie)) => app_state.sessions.verify(cookie.value()).is_some(),
    _ => false,
  };

  match page_access(req.path(), authenticated) {
    PageAccess::Allow => next.call(req).await.map(|res| res.map_into_left_body()),
    PageAccess::Redirect(location) => {
      debug!(path = %req.path(), location, "Redirecting page request.");
      let (request, _) = req.into_parts();
      let response = HttpResponse::Found().insert_header((LOCATION, location)).finish();
      Ok(ServiceResponse::new(request, response).map_into_right_body())
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn anonymous_visitors_are_sent_to_login() {
    assert_eq!(page_access("/dashboard", false), PageAccess::Redirect("/login"));
    assert_eq!(page_access("/dashboard/barang", false), PageAccess::Redirect("/login"));
    assert_eq!(page_access("/", false), PageAccess::Redirect("/dashboard"));
    assert_eq!(page_access("/login", false), PageAccess::Allow);
    assert_eq!(page_access("/assets/app.js", false), PageAccess::Allow);
  }

  #[test]
  fn signed_in_visitors_skip_login() {
    assert_eq!(page_access("/login", true), PageAccess::Redirect("/dashboard"));
    assert_eq!(page_access("/", true), PageAccess::Redirect("/dashboard"));
    assert_eq!(page_access("/dashboard/users", true), PageAccess::Allow);
  }

  #[test]
  fn prefix_must_be_a_path_segment() {
    assert_eq!(page_access("/dashboards", false), PageAccess::Allow);
  }
}
