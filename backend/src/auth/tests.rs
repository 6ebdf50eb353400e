use super::*;
use axum::http::Request;
use std::env;

const SECRET: &str = "supersecretjwtsecretforunittesting123";
const REFRESH_SECRET: &str = "anothersecretusedonlyforrefreshtokens";

fn set_env_vars() {
    unsafe {
        env::set_var("JWT_ADMIN_SECRET", SECRET);
        env::set_var("JWT_ADMIN_REFRESH_SECRET", REFRESH_SECRET);
    }
}

fn keys() -> SessionKeys {
    SessionKeys::new(
        AdminSecret {
            secret: SECRET.to_string(),
            refresh_secret: REFRESH_SECRET.to_string(),
        },
        &SessionLifetime {
            access_ttl_minutes: 60,
            refresh_ttl_days: 7,
        },
    )
}

fn admin() -> AdminEntity {
    let now = Utc::now();
    AdminEntity {
        id: Uuid::parse_str("123e4567-e89b-12d3-a456-426614174000").unwrap(),
        name: "Ops Lead".to_string(),
        email: "ops@example.com".to_string(),
        password_hash: "$argon2id$stub".to_string(),
        role: "admin".to_string(),
        is_active: true,
        created_by: None,
        last_login: None,
        created_at: now,
        updated_at: now,
    }
}

fn token_with(claims: &AdminClaims, secret: &str) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn claims(exp: usize, token_use: &str) -> AdminClaims {
    AdminClaims {
        sub: "123e4567-e89b-12d3-a456-426614174000".to_string(),
        email: "ops@example.com".to_string(),
        role: "admin".to_string(),
        token_use: token_use.to_string(),
        iat: 0,
        exp,
    }
}

#[test]
fn test_issued_access_token_validates() {
    let now = Utc::now();
    let tokens = keys().issue(&admin(), now).unwrap();

    let claims = validate_access_token(&tokens.access_token, SECRET).expect("Valid token should pass");
    assert_eq!(claims.sub, admin().id.to_string());
    assert_eq!(claims.role, "admin");
    assert_eq!(tokens.expires_at, now + Duration::minutes(60));
    assert_eq!(tokens.refresh_expires_at, now + Duration::days(7));
}

#[test]
fn test_refresh_token_validates_only_as_refresh() {
    let tokens = keys().issue(&admin(), Utc::now()).unwrap();

    assert!(keys().validate_refresh_token(&tokens.refresh_token).is_ok());
    assert!(validate_access_token(&tokens.refresh_token, SECRET).is_err());
    assert!(keys().validate_refresh_token(&tokens.access_token).is_err());
}

#[test]
fn test_token_use_is_checked_even_with_shared_secret() {
    let token = token_with(&claims(9999999999, REFRESH_TOKEN_USE), SECRET);
    assert!(validate_access_token(&token, SECRET).is_err());
}

#[test]
fn test_expired_token_is_rejected() {
    let token = token_with(&claims(1, ACCESS_TOKEN_USE), SECRET);
    assert!(validate_access_token(&token, SECRET).is_err());
}

#[test]
fn test_invalid_signature_is_rejected() {
    let token = token_with(&claims(9999999999, ACCESS_TOKEN_USE), "wrongsecret");
    assert!(validate_access_token(&token, SECRET).is_err());
}

#[test]
fn test_claims_with_unknown_role_do_not_authenticate() {
    let mut claims = claims(9999999999, ACCESS_TOKEN_USE);
    claims.role = "operator".to_string();
    assert!(AuthAdmin::try_from(claims).is_err());
}

#[tokio::test]
async fn test_extractor_accepts_bearer_access_token() {
    set_env_vars();
    let tokens = keys().issue(&admin(), Utc::now()).unwrap();

    let (mut parts, _) = Request::builder()
        .header("Authorization", format!("Bearer {}", tokens.access_token))
        .body(())
        .unwrap()
        .into_parts();

    let auth = AuthAdmin::from_request_parts(&mut parts, &()).await.unwrap();
    assert_eq!(auth.admin_id, admin().id);
    assert_eq!(auth.role, AdminRole::Admin);
}

#[tokio::test]
async fn test_extractor_rejects_missing_or_malformed_header() {
    set_env_vars();

    let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();
    assert!(matches!(
        AuthAdmin::from_request_parts(&mut parts, &()).await,
        Err(AppError::Unauthorized)
    ));

    let (mut parts, _) = Request::builder()
        .header("Authorization", "Token abc")
        .body(())
        .unwrap()
        .into_parts();
    assert!(matches!(
        AuthAdmin::from_request_parts(&mut parts, &()).await,
        Err(AppError::Unauthorized)
    ));
}
