use crate::{error::NudgeError, shared::usecase::execute, user::create_user::CreateUserUseCase};
use actix_web::HttpRequest;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use nudge_domain::User;
use nudge_infra::NudgeContext;
use serde::{Deserialize, Serialize};

pub const CRON_SECRET_HEADER: &str = "nudge-cron-secret";

/// Claims of the session tokens issued by the authentication provider
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub email: String,
}

fn parse_authtoken_header(token_header_value: &str) -> String {
    token_header_value
        .replace("Bearer", "")
        .replace("bearer", "")
        .trim()
        .to_string()
}

fn decode_token(token: &str, secret: &str) -> anyhow::Result<Claims> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let claims = decode::<Claims>(token, &decoding_key, &Validation::new(Algorithm::HS256))?.claims;

    Ok(claims)
}

async fn create_user_if_not_exists(email: &str, ctx: &NudgeContext) -> Option<User> {
    let email = email.trim().to_lowercase();
    if let Some(user) = ctx.repos.users.find_by_email(&email).await {
        return Some(user);
    }

    let usecase = CreateUserUseCase {
        email: email.clone(),
    };
    match execute(usecase, ctx).await {
        Ok(user) => Some(user),
        // Another request might have created the user in the meantime
        Err(_) => ctx.repos.users.find_by_email(&email).await,
    }
}

pub async fn auth_user_req(req: &HttpRequest, ctx: &NudgeContext) -> Option<User> {
    let token = req.headers().get("authorization")?;
    let token = match token.to_str() {
        Ok(token) => parse_authtoken_header(token),
        Err(_) => return None,
    };
    match decode_token(&token, &ctx.config.session_secret) {
        Ok(claims) => create_user_if_not_exists(&claims.email, ctx).await,
        Err(_) => None,
    }
}

/// Resolves the calling `User` from the session token
pub async fn protect_route(req: &HttpRequest, ctx: &NudgeContext) -> Result<User, NudgeError> {
    match auth_user_req(req, ctx).await {
        Some(user) => Ok(user),
        None => Err(NudgeError::Unauthorized(
            "Unable to find user from credentials".into(),
        )),
    }
}

/// Resolves the calling `User` and requires it to be an admin
pub async fn protect_admin_route(
    req: &HttpRequest,
    ctx: &NudgeContext,
) -> Result<User, NudgeError> {
    let user = protect_route(req, ctx).await?;
    if !ctx.config.is_admin(&user.email) {
        return Err(NudgeError::Forbidden(
            "Admin privileges are required".into(),
        ));
    }
    Ok(user)
}

pub fn protect_cron_route(req: &HttpRequest, ctx: &NudgeContext) -> Result<(), NudgeError> {
    let secret = match req.headers().get(CRON_SECRET_HEADER) {
        Some(secret) => match secret.to_str() {
            Ok(secret) => secret,
            Err(_) => {
                return Err(NudgeError::Unauthorized(
                    "Malformed cron secret provided".to_string(),
                ))
            }
        },
        None => {
            return Err(NudgeError::Unauthorized(format!(
                "Unable to find cron secret in {} header",
                CRON_SECRET_HEADER
            )))
        }
    };

    if secret != ctx.config.cron_secret {
        return Err(NudgeError::Unauthorized(format!(
            "Invalid cron secret provided in {} header",
            CRON_SECRET_HEADER
        )));
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::test::TestRequest;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn get_token(email: &str, expired: bool, secret: &str) -> String {
        let exp = if expired {
            100 // year 1970
        } else {
            5609418990 // year 2147
        };
        let claims = Claims {
            exp,
            email: email.to_string(),
        };
        let enc_key = EncodingKey::from_secret(secret.as_bytes());
        encode(&Header::new(Algorithm::HS256), &claims, &enc_key).unwrap()
    }

    fn request_with_token(token: &str) -> HttpRequest {
        TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request()
    }

    #[actix_web::main]
    #[test]
    async fn decodes_valid_token_and_creates_user_if_not_found() {
        let ctx = NudgeContext::create_inmemory();
        let token = get_token("Cool@Example.com", false, &ctx.config.session_secret);

        let user = protect_route(&request_with_token(&token), &ctx)
            .await
            .expect("Valid token");
        assert_eq!(user.email, "cool@example.com");
        assert!(ctx.repos.users.find(&user.id).await.is_some());
    }

    #[actix_web::main]
    #[test]
    async fn decodes_valid_token_for_existing_user() {
        let ctx = NudgeContext::create_inmemory();
        let user = User::new("cool@example.com".into(), Utc::now());
        ctx.repos.users.insert(&user).await.unwrap();
        let token = get_token(&user.email, false, &ctx.config.session_secret);

        let res = protect_route(&request_with_token(&token), &ctx).await;
        assert_eq!(res.unwrap().id, user.id);
        assert_eq!(ctx.repos.users.find_all().await.unwrap().len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_expired_token() {
        let ctx = NudgeContext::create_inmemory();
        let token = get_token("cool@example.com", true, &ctx.config.session_secret);

        let res = protect_route(&request_with_token(&token), &ctx).await;
        assert!(res.is_err());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_token_with_wrong_secret() {
        let ctx = NudgeContext::create_inmemory();
        let token = get_token("cool@example.com", false, "not-the-session-secret");

        let res = protect_route(&request_with_token(&token), &ctx).await;
        assert!(res.is_err());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_garbage_token_and_missing_header() {
        let ctx = NudgeContext::create_inmemory();

        let res = protect_route(&request_with_token("sajfosajfposajfopaso12"), &ctx).await;
        assert!(res.is_err());
        let res = protect_route(&TestRequest::default().to_http_request(), &ctx).await;
        assert!(res.is_err());
    }

    #[actix_web::main]
    #[test]
    async fn admin_route_requires_admin_email() {
        let mut ctx = NudgeContext::create_inmemory();
        ctx.config.admin_emails = vec!["admin@example.com".into()];

        let token = get_token("admin@example.com", false, &ctx.config.session_secret);
        assert!(protect_admin_route(&request_with_token(&token), &ctx)
            .await
            .is_ok());

        let token = get_token("user@example.com", false, &ctx.config.session_secret);
        let res = protect_admin_route(&request_with_token(&token), &ctx).await;
        assert!(matches!(res, Err(NudgeError::Forbidden(_))));
    }

    #[test]
    fn cron_route_requires_secret() {
        let ctx = NudgeContext::create_inmemory();

        let req = TestRequest::default()
            .insert_header((CRON_SECRET_HEADER, ctx.config.cron_secret.clone()))
            .to_http_request();
        assert!(protect_cron_route(&req, &ctx).is_ok());

        let req = TestRequest::default()
            .insert_header((CRON_SECRET_HEADER, "wrong"))
            .to_http_request();
        assert!(protect_cron_route(&req, &ctx).is_err());

        assert!(protect_cron_route(&TestRequest::default().to_http_request(), &ctx).is_err());
    }
}
