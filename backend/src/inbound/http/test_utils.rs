//! Test helpers for inbound HTTP components.
//!
//! Sessions are normally issued by the authentication service; tests stand
//! in for it through a sign-in route that writes the user id into the
//! cookie session.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};

use crate::domain::{Error, User, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, configure_api};
use crate::middleware::Trace;

const SIGN_IN_PATH: &str = "/test/sign-in";

/// Build a session middleware configured for tests.
///
/// Uses a fresh key per invocation, names the cookie `session` and disables
/// the `Secure` flag for plain HTTP.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

async fn sign_in(path: web::Path<String>, session: SessionContext) -> ApiResult<HttpResponse> {
    let user_id = UserId::new(path.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::NoContent().finish())
}

/// The full API over `state`, plus the sign-in route.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .wrap(Trace)
        .route(
            &format!("{SIGN_IN_PATH}/{{user_id}}"),
            web::post().to(sign_in),
        )
        .service(web::scope("/api/v1").configure(configure_api))
}

/// Request signing `user` in.
pub fn sign_in_request(user: &User) -> test::TestRequest {
    test::TestRequest::post().uri(&format!("{SIGN_IN_PATH}/{}", user.id()))
}

/// Extract the session cookie set on `response`.
///
/// # Panics
/// Panics when the response carries no session cookie.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}
