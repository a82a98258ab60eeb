//! Login flow tests

use std::sync::Arc;

use crate::domain::entities::account::Account;
use crate::domain::value_objects::{OutcomeStatus, RedirectTarget};
use crate::errors::AuthError;
use crate::repositories::{AccountRepository, MockAccountRepository, MockProfileRepository};
use crate::services::auth::{hash_password, AuthFlowService, LoginRequest};
use crate::services::cache::CacheStore;

use super::mocks::*;

fn login(email: &str, password: &str, remember: bool, ip: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
        remember,
        ip: ip.to_string(),
    }
}

#[tokio::test]
async fn test_individual_login_lands_on_pet_registration() {
    let h = Harness::new();
    let account = h.seed_individual("maria@example.com", "Senha#123").await;

    let outcome = h
        .service
        .login(&login("maria@example.com", "Senha#123", false, "10.0.0.1"))
        .await
        .unwrap();

    assert!(outcome.is_success());
    assert_eq!(outcome.redirect, RedirectTarget::PetRegistration);
    assert!(outcome.message.contains("Bem-vindo(a), Maria"));

    let session = outcome.session.expect("login must grant a session");
    assert_eq!(session.account_id, account.id);
    assert_eq!(session.ttl_seconds, None);
}

#[tokio::test]
async fn test_organization_login_lands_on_dashboard() {
    let h = Harness::new();
    h.seed_organization("ong@example.com", "Senha#123").await;

    let outcome = h
        .service
        .login(&login("ong@example.com", "Senha#123", false, "10.0.0.1"))
        .await
        .unwrap();

    assert!(outcome.is_success());
    assert_eq!(outcome.redirect, RedirectTarget::OrgDashboard);
    assert!(outcome.message.contains("Abrigo Esperança"));
}

#[tokio::test]
async fn test_remember_me_extends_the_session() {
    let h = Harness::new();
    h.seed_individual("maria@example.com", "Senha#123").await;

    let outcome = h
        .service
        .login(&login("maria@example.com", "Senha#123", true, "10.0.0.1"))
        .await
        .unwrap();

    let session = outcome.session.expect("login must grant a session");
    assert_eq!(session.ttl_seconds, Some(2_592_000));
}

#[tokio::test]
async fn test_login_is_case_insensitive_on_email() {
    let h = Harness::new();
    h.seed_individual("maria@example.com", "Senha#123").await;

    let outcome = h
        .service
        .login(&login("  MARIA@Example.COM ", "Senha#123", false, "10.0.0.1"))
        .await
        .unwrap();

    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_are_indistinguishable() {
    let h = Harness::new();
    h.seed_individual("maria@example.com", "Senha#123").await;

    let wrong_password = h
        .service
        .login(&login("maria@example.com", "Errada#999", false, "10.0.0.1"))
        .await
        .unwrap();
    let unknown_email = h
        .service
        .login(&login("ghost@example.com", "Errada#999", false, "10.0.0.1"))
        .await
        .unwrap();

    assert!(wrong_password.is_failure());
    assert!(unknown_email.is_failure());
    assert_eq!(wrong_password.message, unknown_email.message);
    assert_eq!(
        wrong_password.message,
        AuthError::InvalidCredentials.to_string()
    );
    assert_eq!(wrong_password.redirect, RedirectTarget::Login);
    assert!(wrong_password.session.is_none());
}

#[tokio::test]
async fn test_malformed_email_fails_before_the_limiter() {
    let h = Harness::new();

    let outcome = h
        .service
        .login(&login("not-an-email", "Senha#123", false, "10.0.0.1"))
        .await
        .unwrap();

    assert!(outcome.is_failure());
    assert!(outcome.message.contains("Formato de email inválido"));
    // nothing recorded for an address that cannot exist
    assert!(h.store.is_empty().await);
}

#[tokio::test]
async fn test_login_limited_per_address_after_five_failures() {
    let h = Harness::new();

    for _ in 0..5 {
        let outcome = h
            .service
            .login(&login("ghost@example.com", "Errada#999", false, "10.0.0.1"))
            .await
            .unwrap();
        assert_eq!(outcome.message, AuthError::InvalidCredentials.to_string());
    }

    let outcome = h
        .service
        .login(&login("ghost@example.com", "Errada#999", false, "10.0.0.1"))
        .await
        .unwrap();

    assert!(outcome.is_failure());
    assert!(outcome.message.contains("Muitas tentativas"));
    assert!(outcome.message.contains("15 minutos"));
    assert!(!outcome.message.contains("para este email"));
}

#[tokio::test]
async fn test_login_limited_per_email_across_addresses() {
    let h = Harness::new();
    h.seed_individual("maria@example.com", "Senha#123").await;

    // five failures against the account, each from a fresh address
    for i in 0..5 {
        let ip = format!("10.0.0.{i}");
        h.service
            .login(&login("maria@example.com", "Errada#999", false, &ip))
            .await
            .unwrap();
    }

    // even the right password is held at the gate
    let outcome = h
        .service
        .login(&login("maria@example.com", "Senha#123", false, "10.0.9.9"))
        .await
        .unwrap();

    assert!(outcome.is_failure());
    assert!(outcome.message.contains("para este email"));
    assert!(outcome.session.is_none());
}

#[tokio::test]
async fn test_successful_login_clears_both_gates() {
    let h = Harness::new();
    h.seed_individual("maria@example.com", "Senha#123").await;

    for _ in 0..2 {
        h.service
            .login(&login("maria@example.com", "Errada#999", false, "10.0.0.1"))
            .await
            .unwrap();
    }
    assert!(h
        .store
        .get("rate_limit:ip:10.0.0.1")
        .await
        .unwrap()
        .is_some());

    let outcome = h
        .service
        .login(&login("maria@example.com", "Senha#123", false, "10.0.0.1"))
        .await
        .unwrap();
    assert!(outcome.is_success());

    assert_eq!(h.store.get("rate_limit:ip:10.0.0.1").await.unwrap(), None);
    assert_eq!(
        h.store
            .get("rate_limit:email:maria@example.com")
            .await
            .unwrap(),
        None
    );
}

#[tokio::test]
async fn test_login_without_profile_still_grants_a_session() {
    let h = Harness::new();
    let account = h.seed_account_only("ana@example.com", "Senha#123").await;

    let outcome = h
        .service
        .login(&login("ana@example.com", "Senha#123", false, "10.0.0.1"))
        .await
        .unwrap();

    assert_eq!(outcome.status, OutcomeStatus::Success);
    assert!(outcome.message.contains("Perfil incompleto"));
    assert_eq!(outcome.redirect, RedirectTarget::Login);
    assert_eq!(
        outcome.session.expect("still an authenticated login").account_id,
        account.id
    );
}

#[tokio::test]
async fn test_successful_login_stamps_last_login() {
    let h = Harness::new();
    h.seed_individual("maria@example.com", "Senha#123").await;

    h.service
        .login(&login("maria@example.com", "Senha#123", false, "10.0.0.1"))
        .await
        .unwrap();

    let stored = h
        .accounts
        .find_by_email("maria@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(stored.last_login_at.is_some());
}

#[tokio::test]
async fn test_login_fails_closed_when_the_limiter_store_is_down() {
    let accounts = Arc::new(MockAccountRepository::new());
    let profiles = Arc::new(MockProfileRepository::new());
    let store = Arc::new(FlakyCacheStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let service = AuthFlowService::new(
        Arc::clone(&accounts),
        Arc::clone(&profiles),
        Arc::clone(&store),
        Arc::clone(&notifier),
        test_config(),
    );

    let hash = hash_password("Senha#123", 4).unwrap();
    accounts
        .insert_account(Account::new(
            "maria@example.com",
            "Maria",
            "da Silva",
            "11987654321",
            hash,
        ))
        .await;

    store.set_fail(true);

    // correct credentials, but the gate cannot be checked
    let outcome = service
        .login(&login("maria@example.com", "Senha#123", false, "10.0.0.1"))
        .await
        .unwrap();

    assert!(outcome.is_failure());
    assert!(outcome.message.contains("Muitas tentativas"));
    assert!(outcome.message.contains("15 minutos"));
    assert!(outcome.session.is_none());
}
