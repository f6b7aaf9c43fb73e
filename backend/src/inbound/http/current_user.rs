//! Extractor resolving the session's user id into the acting account.
//!
//! Handlers that take [`CurrentUser`] reject requests without a session, or
//! whose user no longer exists, with `401 Unauthorized`.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{Error, User, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// The authenticated account making the request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    /// Identifier of the signed-in account.
    pub fn id(&self) -> UserId {
        self.0.id()
    }

    /// Take the resolved account.
    pub fn into_inner(self) -> User {
        self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let user_id = session.await.map_err(Error::from)?.require_user_id()?;
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let user = state.users.find_by_id(&user_id).await?;
            user.map(Self).ok_or_else(|| {
                debug!(user_id = %user_id, "session refers to an unknown user");
                Error::unauthorized("login required")
            })
        })
    }
}
