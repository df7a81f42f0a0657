//! Request Identity
//!
//! Authentication happens upstream; the gateway forwards the verified caller
//! in headers. Handlers extract an [`Identity`] and check the role before
//! touching any data.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use fieldline_core::engine::Actor;
use uuid::Uuid;

use crate::api::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_NAME_HEADER: &str = "x-user-name";
pub const COMPANY_ID_HEADER: &str = "x-company-id";
pub const ROLE_HEADER: &str = "x-role";

/// The authenticated caller
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub user_name: String,
    pub company_id: Uuid,
    pub role: Role,
}

/// What the caller is allowed to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Dispatcher,
    Technician,
}

impl Role {
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "dispatcher" => Some(Role::Dispatcher),
            "technician" => Some(Role::Technician),
            _ => None,
        }
    }
}

impl Identity {
    /// The caller as an activity-log actor
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id, self.user_name.clone())
    }

    pub fn require_dispatcher(&self) -> Result<(), ApiError> {
        if self.role != Role::Dispatcher {
            return Err(ApiError::Forbidden("dispatcher role required".to_string()));
        }
        Ok(())
    }

    pub fn require_technician(&self) -> Result<(), ApiError> {
        if self.role != Role::Technician {
            return Err(ApiError::Forbidden("technician role required".to_string()));
        }
        Ok(())
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = uuid_header(parts, USER_ID_HEADER)?;
        let user_name = header_value(parts, USER_NAME_HEADER)?.to_string();
        let company_id = uuid_header(parts, COMPANY_ID_HEADER)?;
        let role = header_value(parts, ROLE_HEADER)?;
        let role = Role::parse(role).ok_or_else(|| {
            ApiError::Unauthorized(format!("invalid {} header", ROLE_HEADER))
        })?;

        Ok(Identity {
            user_id,
            user_name,
            company_id,
            role,
        })
    }
}

fn header_value<'a>(parts: &'a Parts, name: &str) -> Result<&'a str, ApiError> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::Unauthorized(format!("missing {} header", name)))
}

fn uuid_header(parts: &Parts, name: &str) -> Result<Uuid, ApiError> {
    header_value(parts, name)?
        .parse()
        .map_err(|_| ApiError::Unauthorized(format!("invalid {} header", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/jobs");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_extracts_identity_from_headers() {
        let user_id = Uuid::new_v4();
        let company_id = Uuid::new_v4();
        let mut parts = parts(&[
            (USER_ID_HEADER, &user_id.to_string()),
            (USER_NAME_HEADER, "Dana Dispatcher"),
            (COMPANY_ID_HEADER, &company_id.to_string()),
            (ROLE_HEADER, "dispatcher"),
        ]);

        let identity = Identity::from_request_parts(&mut parts, &()).await.unwrap();

        assert_eq!(identity.user_id, user_id);
        assert_eq!(identity.user_name, "Dana Dispatcher");
        assert_eq!(identity.company_id, company_id);
        assert_eq!(identity.role, Role::Dispatcher);
    }

    #[tokio::test]
    async fn test_missing_header_is_rejected() {
        let mut parts = parts(&[
            (USER_ID_HEADER, &Uuid::new_v4().to_string()),
            (USER_NAME_HEADER, "Bob"),
            (ROLE_HEADER, "technician"),
        ]);

        let result = Identity::from_request_parts(&mut parts, &()).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unknown_role_is_rejected() {
        let mut parts = parts(&[
            (USER_ID_HEADER, &Uuid::new_v4().to_string()),
            (USER_NAME_HEADER, "Bob"),
            (COMPANY_ID_HEADER, &Uuid::new_v4().to_string()),
            (ROLE_HEADER, "admin"),
        ]);

        let result = Identity::from_request_parts(&mut parts, &()).await;

        assert!(result.is_err());
    }

    #[test]
    fn test_role_checks() {
        let identity = Identity {
            user_id: Uuid::new_v4(),
            user_name: "Bob".to_string(),
            company_id: Uuid::new_v4(),
            role: Role::Technician,
        };

        assert!(identity.require_technician().is_ok());
        assert!(identity.require_dispatcher().is_err());
    }
}
