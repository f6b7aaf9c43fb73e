//! Port for resolving user accounts owned by the authentication service.

use async_trait::async_trait;

use crate::domain::{Error, PhoneNumber, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user directory adapters.
    pub enum UserDirectoryError {
        /// Directory connection could not be established.
        Connection { message: String } => "user directory connection failed: {message}",
        /// Lookup failed during execution.
        Query { message: String } => "user directory query failed: {message}",
    }
}

/// Read-only view of the user registry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserDirectoryError>;

    /// Fetch the user registered with `phone_number`.
    async fn find_by_phone_number(
        &self,
        phone_number: &PhoneNumber,
    ) -> Result<Option<User>, UserDirectoryError>;
}

impl From<UserDirectoryError> for Error {
    fn from(err: UserDirectoryError) -> Self {
        match err {
            UserDirectoryError::Connection { message } => Error::service_unavailable(message),
            UserDirectoryError::Query { message } => Error::internal(message),
        }
    }
}
