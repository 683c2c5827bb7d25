use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;

use qv_app::{AppContext, AppDeps, ChangePasswordOutcome, LoginOutcome};
use qv_core::auth::AuthSession;
use qv_core::explore::{Business, BusinessService, SortBy};
use qv_core::ids::{BusinessId, ServiceId};
use qv_core::ports::{ClockPort, PreferenceStorePort, Route};
use qv_core::preferences::{Theme, AUTH_TOKEN_KEY, THEME_KEY, USER_DATA_KEY};
use qv_core::registration::DraftUpdate;
use qv_core::validation::{Field, ValidationError};
use qv_infra::presentation::Alert;
use qv_infra::{
    FilePreferenceStore, FixedClock, InMemoryBusinessCatalog, RouteStackNavigator,
    SimulatedAuthGateway, ThreadRandom, TracingAlertSink,
};

struct Harness {
    context: AppContext,
    navigator: Arc<RouteStackNavigator>,
    alerts: Arc<TracingAlertSink>,
    store: Arc<FilePreferenceStore>,
}

fn harness(dir: &TempDir) -> Harness {
    let clock: Arc<dyn ClockPort> = Arc::new(FixedClock::new(
        NaiveDate::from_ymd_opt(2025, 8, 20).unwrap(),
    ));
    let navigator = Arc::new(RouteStackNavigator::default());
    let alerts = Arc::new(TracingAlertSink::new());
    let store = Arc::new(FilePreferenceStore::new(
        dir.path().join("preferences.json"),
    ));

    let deps = AppDeps {
        auth: Arc::new(SimulatedAuthGateway::instant(clock.clone())),
        catalog: Arc::new(InMemoryBusinessCatalog::new(catalog())),
        navigation: navigator.clone(),
        alerts: alerts.clone(),
        preferences: store.clone(),
        clock,
        random: Arc::new(ThreadRandom),
    };

    Harness {
        context: AppContext::new(deps),
        navigator,
        alerts,
        store,
    }
}

fn catalog() -> Vec<Business> {
    let haircut = BusinessService {
        id: ServiceId::from("s1"),
        name: "Haircut".into(),
        price: 500.0,
        duration: 45,
        description: "Cut and style".into(),
    };
    let facial = BusinessService {
        id: ServiceId::from("s2"),
        name: "Facial".into(),
        price: 1200.0,
        duration: 60,
        description: "Deep cleanse".into(),
    };
    vec![
        Business {
            id: BusinessId::from("1"),
            name: "Glow & Glam Salon".into(),
            category: "Beauty & Wellness".into(),
            rating: 4.8,
            review_count: 127,
            distance_km: 0.8,
            services: vec![haircut, facial],
        },
        Business {
            id: BusinessId::from("2"),
            name: "Spice Garden".into(),
            category: "Restaurant".into(),
            rating: 4.5,
            review_count: 342,
            distance_km: 1.2,
            services: Vec::new(),
        },
    ]
}

async fn login(h: &Harness) -> AuthSession {
    match h
        .context
        .login()
        .execute("john@example.com", "password1".into())
        .await
        .unwrap()
    {
        LoginOutcome::SignedIn(session) => session,
        other => panic!("expected sign in, got {other:?}"),
    }
}

#[tokio::test]
async fn test_init_without_stored_session_starts_at_splash() {
    let dir = TempDir::new().unwrap();
    let h = harness(&dir);
    assert!(h.context.is_loading());

    let startup = h.context.init().await;

    assert!(!h.context.is_loading());
    assert_eq!(startup.theme, Theme::Light);
    assert_eq!(startup.session, None);
    assert_eq!(startup.initial_route, Route::Splash);
}

#[tokio::test]
async fn test_login_session_is_restored_by_next_launch() {
    let dir = TempDir::new().unwrap();
    let first = harness(&dir);
    first.context.init().await;
    let session = login(&first).await;
    assert_eq!(first.navigator.stack().await, vec![Route::Home]);

    let second = harness(&dir);
    let startup = second.context.init().await;

    assert_eq!(startup.session, Some(session));
    assert_eq!(startup.initial_route, Route::Home);
    assert!(second.context.session().is_authenticated().await);
}

#[tokio::test]
async fn test_logout_clears_storage_and_shows_login() {
    let dir = TempDir::new().unwrap();
    let h = harness(&dir);
    login(&h).await;

    h.context.logout().await.unwrap();

    assert_eq!(h.store.get(AUTH_TOKEN_KEY).await.unwrap(), None);
    assert_eq!(h.store.get(USER_DATA_KEY).await.unwrap(), None);
    assert_eq!(h.navigator.current().await, Some(Route::Login));
    assert!(!h.context.session().is_authenticated().await);
}

#[tokio::test]
async fn test_theme_toggle_persists_across_launches() {
    let dir = TempDir::new().unwrap();
    let first = harness(&dir);
    first.context.init().await;
    assert_eq!(first.context.theme().toggle().await, Theme::Dark);
    assert_eq!(
        first.store.get(THEME_KEY).await.unwrap().as_deref(),
        Some("dark")
    );

    let second = harness(&dir);
    assert_eq!(second.context.init().await.theme, Theme::Dark);
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let dir = TempDir::new().unwrap();
    let h = harness(&dir);

    let outcome = h.context.login().execute("", "".into()).await.unwrap();

    assert_eq!(
        outcome,
        LoginOutcome::InvalidFields(vec![
            ValidationError::Required {
                field: Field::EmailOrPhone
            },
            ValidationError::Required {
                field: Field::Password
            },
        ])
    );
    let LoginOutcome::InvalidFields(errors) = outcome else {
        unreachable!()
    };
    assert_eq!(errors[0].to_string(), "Email or phone number is required");
    assert_eq!(errors[1].to_string(), "Password is required");
}

#[tokio::test]
async fn test_login_rejection_alerts_login_failed() {
    let dir = TempDir::new().unwrap();
    let h = harness(&dir);

    let outcome = h
        .context
        .login()
        .execute("9876543210", "password1".into())
        .await
        .unwrap();

    assert!(matches!(outcome, LoginOutcome::Failed(_)));
    assert_eq!(
        h.alerts.last().await,
        Some(Alert {
            title: "Login Failed".into(),
            message: "Invalid email format".into(),
        })
    );
    assert!(!h.context.login().is_submitting());
}

#[tokio::test]
async fn test_start_registration_pushes_signup_and_shutdown_closes_it() {
    let dir = TempDir::new().unwrap();
    let h = harness(&dir);
    h.context.init().await;

    let registration = h.context.start_registration().await.unwrap();
    assert_eq!(h.navigator.current().await, Some(Route::Signup));

    registration
        .update(DraftUpdate::FirstName("Asha".into()))
        .await
        .unwrap();
    registration
        .update(DraftUpdate::LastName("Rao".into()))
        .await
        .unwrap();
    registration
        .update(DraftUpdate::PhoneNumber("9876543210".into()))
        .await
        .unwrap();
    registration.request_code().await.unwrap();
    assert!(registration.is_countdown_running().await);

    h.context.shutdown().await;
    assert!(!registration.is_countdown_running().await);
}

#[tokio::test]
async fn test_start_password_reset_pushes_forgot_password() {
    let dir = TempDir::new().unwrap();
    let h = harness(&dir);
    h.context.open_login().await.unwrap();

    let reset = h.context.start_password_reset().await.unwrap();

    assert_eq!(
        h.navigator.stack().await,
        vec![Route::Splash, Route::Login, Route::ForgotPassword]
    );
    reset.back().await.unwrap();
    assert_eq!(h.navigator.current().await, Some(Route::Login));
}

#[tokio::test]
async fn test_change_password_alerts_each_outcome() {
    let dir = TempDir::new().unwrap();
    let h = harness(&dir);
    let change = h.context.change_password();

    let outcome = change
        .execute(&"old".into(), &"new-pass".into(), &"new-pas".into())
        .await
        .unwrap();
    assert!(matches!(outcome, ChangePasswordOutcome::Rejected(_)));
    assert_eq!(
        h.alerts.last().await,
        Some(Alert {
            title: "Error".into(),
            message: "New passwords do not match".into(),
        })
    );

    let outcome = change
        .execute(&"old".into(), &"new-pass".into(), &"new-pass".into())
        .await
        .unwrap();
    assert_eq!(outcome, ChangePasswordOutcome::Updated);
    assert_eq!(
        h.alerts.last().await,
        Some(Alert {
            title: "Success".into(),
            message: "Password updated successfully".into(),
        })
    );
}

#[tokio::test]
async fn test_explore_sorts_catalog_by_popularity() {
    let dir = TempDir::new().unwrap();
    let h = harness(&dir);

    let nearest: Vec<String> = h
        .context
        .explore()
        .results()
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert_eq!(nearest, ["Glow & Glam Salon", "Spice Garden"]);

    h.context.explore().set_sort_by(SortBy::Popularity).await;
    let popular = h.context.explore().results().await.unwrap();
    assert_eq!(popular[0].name, "Spice Garden");
}

#[tokio::test]
async fn test_join_and_leave_queues() {
    let dir = TempDir::new().unwrap();
    let h = harness(&dir);
    let queue = h.context.queue();

    queue.open_business(&BusinessId::from("1")).await.unwrap();
    queue.toggle_service(ServiceId::from("s1")).await;
    queue.toggle_service(ServiceId::from("s2")).await;
    let issued = queue.join().await.unwrap();

    assert_eq!(issued.len(), 2);
    for ticket in &issued {
        assert!((1..=20).contains(&ticket.position));
        assert!((5..=19).contains(&ticket.queue_count));
        assert!((15..=44).contains(&ticket.wait_minutes));
        assert_eq!(ticket.business_name, "Glow & Glam Salon");
        assert_eq!(ticket.total, ticket.service.price);
    }
    assert_eq!(issued[1].id.as_str(), "1755648000000-s2");

    queue.leave(&issued[0].id).await.unwrap();
    let remaining = queue.active().await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].service.name, "Facial");
}
