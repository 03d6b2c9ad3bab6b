use std::sync::Arc;

use tokio::sync::Notify;

use super::*;
use crate::directory::StaticDirectory;
use crate::storage::MemoryStorage;

// =============================================================================
// Test doubles
// =============================================================================

/// Storage whose writes always fail, as with an exhausted quota.
struct FullStorage;

impl SessionStorage for FullStorage {
    fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn save(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Write("quota exceeded".into()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Storage that cannot be reached at all.
struct DisabledStorage;

impl SessionStorage for DisabledStorage {
    fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("disabled".into()))
    }

    fn save(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disabled".into()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disabled".into()))
    }
}

/// Directory that blocks each lookup until the gate is opened.
struct GatedDirectory {
    inner: StaticDirectory,
    gate: Arc<Notify>,
}

#[async_trait::async_trait(?Send)]
impl IdentityDirectory for GatedDirectory {
    async fn resolve(&self, email: &str) -> Option<Identity> {
        self.gate.notified().await;
        self.inner.find(email).cloned()
    }
}

fn store_with(storage: Arc<dyn SessionStorage>) -> SessionStore {
    SessionStore::new(Arc::new(StaticDirectory::demo()), storage)
}

fn sample_identity() -> Identity {
    Identity {
        id: "u-42".to_owned(),
        name: "Ana".to_owned(),
        email: "ana@x.com".to_owned(),
        role: Role::Caregiver,
        avatar: Some("/avatars/ana.png".to_owned()),
    }
}

async fn wait_until_in_flight(store: &SessionStore) {
    while !store.state().in_flight {
        tokio::task::yield_now().await;
    }
}

// =============================================================================
// initialize
// =============================================================================

#[test]
fn state_before_initialize_is_loading() {
    let store = store_with(Arc::new(MemoryStorage::new()));
    let state = store.state();
    assert!(!state.initialized);
    assert!(state.in_flight);
    assert!(state.identity.is_none());
}

#[test]
fn initialize_restores_valid_record() {
    let identity = sample_identity();
    let raw = serde_json::to_string(&identity).unwrap();
    let store = store_with(Arc::new(MemoryStorage::with_entry(SESSION_RECORD_KEY, &raw)));

    let state = store.initialize();
    assert!(state.initialized);
    assert!(!state.in_flight);
    assert_eq!(state.identity, Some(identity));
}

#[test]
fn initialize_without_record_is_unauthenticated() {
    let store = store_with(Arc::new(MemoryStorage::new()));
    let state = store.initialize();
    assert!(state.initialized);
    assert!(!state.is_authenticated());
}

#[test]
fn initialize_discards_malformed_records() {
    let cases = [
        "not json",
        r#"{"id":"u1","name":"Ana","email":"ana@x.com""#,
        r#"{"id":"u1","name":"Ana"}"#,
        r#"{"id":"u1","name":"Ana","email":"ana@x.com","role":"nurse"}"#,
        r#"{"id":"","name":"Ana","email":"ana@x.com","role":"teacher"}"#,
        r#"{"id":"u1","name":"Ana","email":"  ","role":"teacher"}"#,
        "[1,2,3]",
        "null",
    ];
    for raw in cases {
        let storage = Arc::new(MemoryStorage::with_entry(SESSION_RECORD_KEY, raw));
        let store = store_with(storage.clone());
        let state = store.initialize();
        assert!(state.initialized, "case {raw:?}");
        assert!(state.identity.is_none(), "case {raw:?}");
        assert_eq!(storage.load(SESSION_RECORD_KEY), Ok(None), "case {raw:?} should be removed");
    }
}

#[test]
fn initialize_tolerates_unreachable_storage() {
    let store = store_with(Arc::new(DisabledStorage));
    let state = store.initialize();
    assert!(state.initialized);
    assert!(state.identity.is_none());
}

#[test]
fn decode_record_reports_empty_fields() {
    let err = decode_record(r#"{"id":" ","name":"A","email":"a@x.com","role":"admin"}"#).unwrap_err();
    assert!(matches!(err, RecordError::EmptyField("id")));
    let err = decode_record(r#"{"id":"u1","name":"","email":"a@x.com","role":"admin"}"#).unwrap_err();
    assert!(matches!(err, RecordError::EmptyField("name")));
}

// =============================================================================
// login
// =============================================================================

#[tokio::test]
async fn login_known_email_sets_and_persists_identity() {
    let storage = Arc::new(MemoryStorage::new());
    let store = store_with(storage.clone());
    store.initialize();

    let identity = store.login("teacher@carebridge.dev", "pw").await.unwrap();
    assert_eq!(identity.role, Role::Teacher);
    assert_eq!(store.identity(), Some(identity.clone()));

    let raw = storage.load(SESSION_RECORD_KEY).unwrap().expect("record written");
    assert_eq!(decode_record(&raw).unwrap(), identity);
}

#[tokio::test]
async fn login_ignores_secret_value() {
    let store = store_with(Arc::new(MemoryStorage::new()));
    store.initialize();
    assert!(store.login("admin@carebridge.dev", "").await.is_ok());
    store.logout();
    assert!(store.login("admin@carebridge.dev", "anything at all").await.is_ok());
}

#[tokio::test]
async fn login_unknown_email_keeps_previous_identity() {
    let storage = Arc::new(MemoryStorage::new());
    let store = store_with(storage.clone());
    store.initialize();
    let previous = store.login("therapist@carebridge.dev", "pw").await.unwrap();
    let stored_before = storage.load(SESSION_RECORD_KEY).unwrap();

    let err = store.login("stranger@x.com", "pw").await.unwrap_err();
    assert_eq!(err, SessionError::InvalidCredentials);
    assert_eq!(store.identity(), Some(previous));
    assert_eq!(storage.load(SESSION_RECORD_KEY).unwrap(), stored_before);
    assert!(!store.state().in_flight);
}

#[tokio::test]
async fn login_unknown_email_when_logged_out_writes_nothing() {
    let storage = Arc::new(MemoryStorage::new());
    let store = store_with(storage.clone());
    store.initialize();

    assert_eq!(store.login("nobody@x.com", "pw").await, Err(SessionError::InvalidCredentials));
    assert!(store.identity().is_none());
    assert_eq!(storage.load(SESSION_RECORD_KEY), Ok(None));
}

#[tokio::test]
async fn login_persistence_failure_keeps_in_memory_identity() {
    let store = store_with(Arc::new(FullStorage));
    store.initialize();

    let err = store.login("hr@carebridge.dev", "pw").await.unwrap_err();
    assert!(matches!(err, SessionError::PersistenceFailure(StorageError::Write(_))));
    assert_eq!(store.state().role(), Some(Role::Hr));
}

#[tokio::test]
async fn second_login_while_pending_is_busy() {
    let gate = Arc::new(Notify::new());
    let directory = GatedDirectory { inner: StaticDirectory::demo(), gate: gate.clone() };
    let store = SessionStore::new(Arc::new(directory), Arc::new(MemoryStorage::new()));
    store.initialize();

    let (first, second) = tokio::join!(store.login("teacher@carebridge.dev", "pw"), async {
        wait_until_in_flight(&store).await;
        let second = store.login("admin@carebridge.dev", "pw").await;
        let register = store.register("B", "b@x.com", "pw", Role::Admin);
        gate.notify_one();
        (second, register)
    });

    assert_eq!(second.0, Err(SessionError::Busy));
    assert_eq!(second.1, Err(SessionError::Busy));
    assert_eq!(first.unwrap().role, Role::Teacher);
    assert_eq!(store.state().role(), Some(Role::Teacher));
    assert!(!store.state().in_flight);
}

#[tokio::test]
async fn login_resolving_after_logout_is_superseded() {
    let gate = Arc::new(Notify::new());
    let directory = GatedDirectory { inner: StaticDirectory::demo(), gate: gate.clone() };
    let storage = Arc::new(MemoryStorage::new());
    let store = SessionStore::new(Arc::new(directory), storage.clone());
    store.initialize();

    let (result, ()) = tokio::join!(store.login("caregiver@carebridge.dev", "pw"), async {
        wait_until_in_flight(&store).await;
        store.logout();
        gate.notify_one();
    });

    assert_eq!(result, Err(SessionError::Superseded));
    assert!(store.identity().is_none());
    assert_eq!(storage.load(SESSION_RECORD_KEY), Ok(None));
}

// =============================================================================
// register
// =============================================================================

#[test]
fn register_uses_supplied_role_and_fresh_ids() {
    let store = store_with(Arc::new(MemoryStorage::new()));
    store.initialize();

    let a = store.register("A", "a@x.com", "pw", Role::Teacher).unwrap();
    let b = store.register("A", "a@x.com", "pw", Role::Teacher).unwrap();
    assert_eq!(a.role, Role::Teacher);
    assert_eq!(b.role, Role::Teacher);
    assert_ne!(a.id, b.id);
    assert_eq!(store.identity(), Some(b));
}

#[test]
fn register_trims_name_and_email() {
    let store = store_with(Arc::new(MemoryStorage::new()));
    let identity = store.register("  Ana ", " ana@x.com ", "pw", Role::Caregiver).unwrap();
    assert_eq!(identity.name, "Ana");
    assert_eq!(identity.email, "ana@x.com");
}

#[test]
fn register_persistence_failure_is_reported() {
    let store = store_with(Arc::new(FullStorage));
    store.initialize();

    let err = store.register("A", "a@x.com", "pw", Role::Admin).unwrap_err();
    assert_eq!(err, SessionError::PersistenceFailure(StorageError::Write("quota exceeded".into())));
    assert_eq!(store.state().role(), Some(Role::Admin));
    assert!(!store.state().in_flight);
}

#[test]
fn register_then_reload_restores_identity() {
    let storage = Arc::new(MemoryStorage::new());
    let store = store_with(storage.clone());
    store.initialize();
    store.register("A", "a@x.com", "pw", Role::Teacher).unwrap();

    let reloaded = store_with(storage);
    let identity = reloaded.initialize().identity.expect("restored identity");
    assert_eq!(identity.email, "a@x.com");
    assert_eq!(identity.role, Role::Teacher);
}

#[test]
fn register_blank_email_is_rejected() {
    let storage = Arc::new(MemoryStorage::new());
    let store = store_with(storage.clone());
    store.initialize();

    let err = store.register("A", "   ", "pw", Role::Teacher).unwrap_err();
    assert_eq!(err, SessionError::MissingField("email"));
    assert_eq!(err.to_string(), "email is required");
    assert!(store.identity().is_none());
    assert!(!store.state().in_flight);
    assert_eq!(storage.load(SESSION_RECORD_KEY), Ok(None));
}

#[test]
fn register_blank_name_keeps_previous_identity() {
    let storage = Arc::new(MemoryStorage::new());
    let store = store_with(storage.clone());
    store.initialize();
    let first = store.register("A", "a@x.com", "pw", Role::Hr).unwrap();

    let err = store.register("  ", "b@x.com", "pw", Role::Admin).unwrap_err();
    assert_eq!(err, SessionError::MissingField("name"));
    assert_eq!(store.identity(), Some(first.clone()));

    let reloaded = store_with(storage);
    assert_eq!(reloaded.initialize().identity, Some(first));
}

// =============================================================================
// logout
// =============================================================================

#[tokio::test]
async fn logout_clears_identity_and_record() {
    let storage = Arc::new(MemoryStorage::new());
    let store = store_with(storage.clone());
    store.initialize();
    store.login("admin@carebridge.dev", "pw").await.unwrap();

    store.logout();
    assert!(store.identity().is_none());
    assert_eq!(storage.load(SESSION_RECORD_KEY), Ok(None));

    store.logout();
    assert!(store.identity().is_none());
    assert!(store.state().initialized);
}

#[test]
fn logout_with_unreachable_storage_still_clears_memory() {
    let store = store_with(Arc::new(DisabledStorage));
    store.initialize();
    let _ = store.register("A", "a@x.com", "pw", Role::Hr);
    store.logout();
    assert!(store.identity().is_none());
}

#[test]
fn independent_stores_do_not_share_state() {
    let a = store_with(Arc::new(MemoryStorage::new()));
    let b = store_with(Arc::new(MemoryStorage::new()));
    a.register("A", "a@x.com", "pw", Role::Teacher).unwrap();
    b.initialize();
    assert!(b.identity().is_none());
}
