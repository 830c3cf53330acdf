use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use kernel::model::{id::UserId, role::Role};
use shared::error::{AppError, AppResult};

/// Set by the gateway once the caller has been authenticated.
pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizedUser {
    user_id: UserId,
    role: Role,
}

impl AuthorizedUser {
    pub fn id(&self) -> UserId {
        self.user_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn require(&self, role: Role) -> AppResult<()> {
        if self.role == role {
            Ok(())
        } else {
            Err(AppError::ForbiddenOperation(format!(
                "this operation requires the {role} role"
            )))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthorizedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header(parts, USER_ID_HEADER)?
            .parse::<i64>()
            .map(UserId::from)
            .map_err(|_| AppError::UnauthenticatedError(format!("malformed {USER_ID_HEADER}")))?;
        let role = header(parts, USER_ROLE_HEADER)?
            .parse::<Role>()
            .map_err(|_| AppError::UnauthenticatedError(format!("unknown {USER_ROLE_HEADER}")))?;

        Ok(Self { user_id, role })
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> AppResult<&'a str> {
    parts
        .headers
        .get(name)
        .ok_or_else(|| AppError::UnauthenticatedError(format!("missing {name}")))?
        .to_str()
        .map(str::trim)
        .map_err(|_| AppError::UnauthenticatedError(format!("malformed {name}")))
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn extract(headers: &[(&str, &str)]) -> AppResult<AuthorizedUser> {
        let mut builder = Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        AuthorizedUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn reads_identity_headers() {
        let user = extract(&[(USER_ID_HEADER, "42"), (USER_ROLE_HEADER, "tenant")])
            .await
            .unwrap();
        assert_eq!(user.id(), UserId::from(42));
        assert_eq!(user.role(), Role::Tenant);
        assert!(user.require(Role::Tenant).is_ok());
        assert!(matches!(
            user.require(Role::Owner),
            Err(AppError::ForbiddenOperation(_))
        ));
    }

    #[tokio::test]
    async fn rejects_missing_or_malformed_identity() {
        for headers in [
            vec![],
            vec![(USER_ID_HEADER, "42")],
            vec![(USER_ROLE_HEADER, "owner")],
            vec![(USER_ID_HEADER, "forty-two"), (USER_ROLE_HEADER, "owner")],
            vec![(USER_ID_HEADER, "42"), (USER_ROLE_HEADER, "admin")],
        ] {
            assert!(
                matches!(
                    extract(&headers).await,
                    Err(AppError::UnauthenticatedError(_))
                ),
                "{headers:?}"
            );
        }
    }
}
