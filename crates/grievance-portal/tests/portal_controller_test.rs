//! Integration tests for the portal controller over in-memory SurrealDB
//! and a scripted notifier.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use grievance_core::error::PortalError;
use grievance_core::models::grievance::{DEFAULT_MOOD, GrievanceStatus};
use grievance_core::notification::{
    FailureCause, NotificationError, NotificationMessage, NotificationReceipt, Notifier,
};
use grievance_core::repository::GrievanceRepository;
use grievance_db::repository::{SurrealGrievanceRepository, SurrealUserRepository};
use grievance_portal::{GrievanceForm, NotificationState, Page, PortalConfig, PortalController};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

/// Records every message and answers with a fixed outcome.
#[derive(Clone, Default)]
struct ScriptedNotifier {
    sent: Arc<Mutex<Vec<NotificationMessage>>>,
    failure: Option<NotificationError>,
    hang: bool,
}

impl ScriptedNotifier {
    fn failing(err: NotificationError) -> Self {
        Self {
            failure: Some(err),
            ..Default::default()
        }
    }

    /// Never resolves, like a request stuck on a dead connection.
    fn hanging() -> Self {
        Self {
            hang: true,
            ..Default::default()
        }
    }

    fn sent(&self) -> Vec<NotificationMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for ScriptedNotifier {
    async fn send(
        &self,
        message: NotificationMessage,
    ) -> Result<NotificationReceipt, NotificationError> {
        self.sent.lock().unwrap().push(message);
        if self.hang {
            std::future::pending::<()>().await;
        }
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(NotificationReceipt {
                status: 200,
                text: "OK".into(),
            }),
        }
    }
}

type Controller =
    PortalController<SurrealUserRepository<Db>, SurrealGrievanceRepository<Db>, ScriptedNotifier>;

async fn setup_with(notifier: ScriptedNotifier, config: PortalConfig) -> Controller {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    grievance_db::run_migrations(&db).await.unwrap();

    let controller = PortalController::new(
        SurrealUserRepository::new(db.clone()),
        SurrealGrievanceRepository::new(db),
        notifier,
        config,
    );
    controller.initialize().await.unwrap();
    controller
}

async fn setup(notifier: ScriptedNotifier) -> Controller {
    setup_with(notifier, PortalConfig::default()).await
}

fn loud_ac() -> GrievanceForm {
    GrievanceForm {
        title: "Loud AC".into(),
        complaint: "Noisy office".into(),
        severity: "New AC unit".into(),
    }
}

// -----------------------------------------------------------------------
// Login
// -----------------------------------------------------------------------

#[tokio::test]
async fn login_moves_to_portal_home() {
    let mut portal = setup(ScriptedNotifier::default()).await;
    assert_eq!(portal.page(), Page::Login);

    let user = portal.login("  RANI ", "rani123").await.unwrap();
    assert_eq!(user.name, "Rani");
    assert_eq!(portal.page(), Page::PortalHome);
    assert_eq!(portal.session_user().map(|u| u.username.as_str()), Some("rani"));
    assert!(!portal.login_error());
}

#[tokio::test]
async fn failed_login_stays_and_allows_retry() {
    let mut portal = setup(ScriptedNotifier::default()).await;

    for _ in 0..3 {
        let err = portal.login("rani", "RANI123").await.unwrap_err();
        assert!(matches!(err, PortalError::AuthenticationFailed { .. }));
        assert_eq!(portal.page(), Page::Login);
        assert!(portal.login_error());
        assert!(portal.session_user().is_none());
    }

    portal.login("rani", "rani123").await.unwrap();
    assert_eq!(portal.page(), Page::PortalHome);
    assert!(!portal.login_error());
}

#[tokio::test]
async fn logout_drops_session() {
    let mut portal = setup(ScriptedNotifier::default()).await;
    portal.login("rani", "rani123").await.unwrap();

    portal.logout();
    assert!(portal.session_user().is_none());
    assert_eq!(portal.page(), Page::Login);
}

// -----------------------------------------------------------------------
// Submission
// -----------------------------------------------------------------------

#[tokio::test]
async fn unset_mood_defaults_to_neutral() {
    let notifier = ScriptedNotifier::default();
    let mut portal = setup(notifier.clone()).await;

    portal.go_to(Page::GrievanceForm);
    *portal.draft_mut() = loud_ac();
    let receipt = portal.submit_grievance().await.unwrap();

    let stored = portal.grievances().get_by_id(receipt.grievance.id).await.unwrap();
    assert_eq!(stored.mood, DEFAULT_MOOD);
    assert_eq!(stored.status, GrievanceStatus::Pending);
    assert_eq!(stored.submitted_by, "anonymous");
    assert_eq!(stored.submitted_by_name, "Anonymous");
    assert!(receipt.warning.is_none());
    assert_eq!(portal.page(), Page::ThankYou);
}

#[tokio::test]
async fn submission_records_session_user_and_mood() {
    let mut portal = setup(ScriptedNotifier::default()).await;
    portal.login("rani", "rani123").await.unwrap();
    portal.go_to(Page::GrievanceForm);
    portal.select_mood("😡");
    *portal.draft_mut() = loud_ac();

    let receipt = portal.submit_grievance().await.unwrap();
    assert_eq!(receipt.grievance.mood, "😡");
    assert_eq!(receipt.grievance.submitted_by, "rani");
    assert_eq!(receipt.grievance.submitted_by_name, "Rani");

    // Form state is cleared for the next submission.
    assert_eq!(portal.draft(), &GrievanceForm::default());
    assert!(portal.selected_mood().is_none());
}

#[tokio::test]
async fn notification_carries_stored_id() {
    let notifier = ScriptedNotifier::default();
    let mut portal = setup(notifier.clone()).await;
    *portal.draft_mut() = loud_ac();

    let receipt = portal.submit_grievance().await.unwrap();

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert!(
        sent[0]
            .body
            .contains(&format!("#{}", receipt.grievance.id))
    );
    assert_eq!(sent[0].recipient_name, "Anonymous");
    assert!(matches!(
        portal.notification_state(),
        NotificationState::Delivered(_)
    ));
}

#[tokio::test]
async fn failed_notification_keeps_record() {
    let notifier = ScriptedNotifier::failing(NotificationError::http(429, "Too Many Requests"));
    let mut portal = setup(notifier.clone()).await;
    portal.go_to(Page::GrievanceForm);
    *portal.draft_mut() = loud_ac();

    let receipt = portal.submit_grievance().await.unwrap();

    assert!(receipt.warning.is_some());
    let err = receipt.notification.unwrap_err();
    assert_eq!(err.cause(), FailureCause::RateLimited);

    assert_eq!(portal.grievances().count().await.unwrap(), 1);
    assert_eq!(portal.page(), Page::ThankYou);
    assert!(!portal.submit_busy());
    assert!(matches!(
        portal.notification_state(),
        NotificationState::Failed(e) if e.status == Some(429)
    ));
    assert_eq!(notifier.sent().len(), 1, "exactly one attempt, no retry");
}

#[tokio::test]
async fn empty_complaint_is_rejected_before_storage() {
    let notifier = ScriptedNotifier::default();
    let mut portal = setup(notifier.clone()).await;
    portal.go_to(Page::GrievanceForm);
    *portal.draft_mut() = GrievanceForm {
        complaint: "   ".into(),
        ..loud_ac()
    };

    let err = portal.submit_grievance().await.unwrap_err();

    assert!(matches!(err, PortalError::Validation { .. }));
    assert_eq!(portal.grievances().count().await.unwrap(), 0);
    assert_eq!(portal.page(), Page::GrievanceForm);
    assert!(portal.notice().is_some());
    assert!(notifier.sent().is_empty());
    assert_eq!(portal.notification_state(), &NotificationState::Idle);
    // The draft is kept so the submitter can fix it.
    assert_eq!(portal.draft().title, "Loud AC");
}

#[tokio::test]
async fn form_is_reachable_without_login() {
    let mut portal = setup(ScriptedNotifier::default()).await;
    portal.go_to(Page::GrievanceForm);
    assert_eq!(portal.page(), Page::GrievanceForm);
    assert!(portal.session_user().is_none());
}

#[tokio::test]
async fn every_valid_submission_adds_one_record() {
    let mut portal = setup(ScriptedNotifier::failing(NotificationError::transport("offline"))).await;

    for i in 0..3 {
        *portal.draft_mut() = GrievanceForm {
            title: format!("g{i}"),
            ..loud_ac()
        };
        portal.submit_grievance().await.unwrap();
        assert_eq!(portal.grievances().count().await.unwrap(), i + 1);
    }
}

// -----------------------------------------------------------------------
// Listing, clearing, stats, export
// -----------------------------------------------------------------------

#[tokio::test]
async fn list_is_newest_first_and_escaped() {
    let mut portal = setup(ScriptedNotifier::default()).await;
    for title in ["first", "<b>second</b>"] {
        *portal.draft_mut() = GrievanceForm {
            title: title.into(),
            ..loud_ac()
        };
        portal.submit_grievance().await.unwrap();
    }

    let view = portal.show_grievances().await.unwrap();

    assert_eq!(portal.page(), Page::GrievanceList);
    let titles: Vec<&str> = view.items.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(titles, ["<b>second</b>", "first"]);

    let stored = portal.grievances().list().await.unwrap();
    let reversed: Vec<_> = stored.into_iter().rev().collect();
    assert_eq!(view.items, reversed);

    assert!(!view.html.contains("<b>"));
    assert!(view.html.contains("&lt;b&gt;second&lt;/b&gt;"));
    assert!(view.html.find("second").unwrap() < view.html.find("first").unwrap());
}

#[tokio::test]
async fn empty_list_renders_placeholder() {
    let mut portal = setup(ScriptedNotifier::default()).await;
    let view = portal.show_grievances().await.unwrap();
    assert!(view.items.is_empty());
    assert!(view.html.contains("No grievances submitted yet!"));
}

#[tokio::test]
async fn clear_requires_confirmation() {
    let mut portal = setup(ScriptedNotifier::default()).await;
    *portal.draft_mut() = loud_ac();
    portal.submit_grievance().await.unwrap();

    assert!(!portal.clear_grievances(false).await.unwrap());
    assert_eq!(portal.grievances().count().await.unwrap(), 1);

    assert!(portal.clear_grievances(true).await.unwrap());
    assert_eq!(portal.grievances().count().await.unwrap(), 0);
    assert!(portal.grievances().list().await.unwrap().is_empty());
    assert_eq!(portal.page(), Page::GrievanceList);
}

#[tokio::test]
async fn stats_follow_status_updates() {
    let mut portal = setup(ScriptedNotifier::default()).await;
    let mut ids = Vec::new();
    for _ in 0..2 {
        *portal.draft_mut() = loud_ac();
        ids.push(portal.submit_grievance().await.unwrap().grievance.id);
    }

    let before = portal.stats().await.unwrap();
    assert_eq!((before.total, before.pending, before.resolved), (2, 2, 0));

    portal
        .grievances()
        .update_status(ids[0], GrievanceStatus::Resolved)
        .await
        .unwrap();

    let after = portal.stats().await.unwrap();
    assert_eq!((after.total, after.pending, after.resolved), (2, 1, 1));
}

#[tokio::test]
async fn export_writes_into_configured_dir() {
    let dir = tempfile::tempdir().unwrap();
    let config = PortalConfig {
        export_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let mut portal = setup_with(ScriptedNotifier::default(), config).await;
    *portal.draft_mut() = loud_ac();
    portal.submit_grievance().await.unwrap();

    let path = portal.export().await.unwrap();
    assert_eq!(path.parent(), Some(dir.path()));

    let body = std::fs::read_to_string(&path).unwrap();
    let parsed: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed[0]["title"], "Loud AC");
}

#[tokio::test]
async fn test_notification_uses_fixed_recipient() {
    let notifier = ScriptedNotifier::default();
    let portal = setup(notifier.clone()).await;

    portal.send_test_notification().await.unwrap();

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient_name, "Test User");
    assert_eq!(portal.grievances().count().await.unwrap(), 0);
}

#[tokio::test]
async fn busy_only_between_store_and_outcome() {
    let mut portal = setup(ScriptedNotifier::default()).await;
    *portal.draft_mut() = loud_ac();
    assert!(!portal.submit_busy());

    let pending = portal.begin_submit().await.unwrap();
    assert!(portal.submit_busy());
    assert_eq!(portal.notification_state(), &NotificationState::Pending);
    assert_eq!(portal.grievances().count().await.unwrap(), 1);

    let outcome = Err(NotificationError::transport("connection reset"));
    let receipt = portal.finish_submit(pending, outcome);

    assert!(!portal.submit_busy());
    assert!(receipt.warning.is_some());
    assert_eq!(portal.page(), Page::ThankYou);
}

#[tokio::test]
async fn dropped_submission_settles_state() {
    let notifier = ScriptedNotifier::hanging();
    let mut portal = setup(notifier.clone()).await;
    portal.go_to(Page::GrievanceForm);
    portal.select_mood("😡");
    *portal.draft_mut() = loud_ac();

    let elapsed = tokio::time::timeout(Duration::from_millis(50), portal.submit_grievance()).await;
    assert!(elapsed.is_err(), "notifier should never resolve");

    assert!(!portal.submit_busy());
    assert_eq!(portal.notification_state(), &NotificationState::Cancelled);
    assert_eq!(portal.page(), Page::ThankYou);
    assert_eq!(portal.draft(), &GrievanceForm::default());
    assert!(portal.selected_mood().is_none());
    assert_eq!(portal.grievances().count().await.unwrap(), 1);
    assert_eq!(notifier.sent().len(), 1);
}
