//! Portal controller — mediates page actions against storage and the
//! notification collaborator.
//!
//! Submission always persists before it notifies. A failed notification
//! is reported as a warning and never removes the stored record.

use std::path::PathBuf;

use grievance_core::error::{PortalError, PortalResult};
use grievance_core::models::grievance::{
    CreateGrievance, Grievance, GrievanceId, GrievanceStats, GrievanceStatus,
};
use grievance_core::models::user::User;
use grievance_core::notification::{
    NotificationError, NotificationMessage, NotificationReceipt, Notifier,
};
use grievance_core::repository::{GrievanceRepository, UserRepository};
use grievance_db::clock;
use tracing::{info, warn};

use crate::config::PortalConfig;
use crate::page::Page;
use crate::render;

/// Warning shown when the record was stored but the alert was not sent.
pub const NOTIFICATION_WARNING: &str = "Your grievance has been saved successfully! However, \
    we couldn't send the email notification right now. Your grievance is safe and you can \
    try again later.";

/// Fields the submitter types. Mood is tracked separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrievanceForm {
    pub title: String,
    pub complaint: String,
    /// Requested resolution ("what would help").
    pub severity: String,
}

/// Outcome of the most recent notification attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NotificationState {
    #[default]
    Idle,
    Pending,
    Delivered(NotificationReceipt),
    Failed(NotificationError),
    /// The attempt was dropped before it settled. The record is kept.
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    /// The stored record, including the assigned id.
    pub grievance: Grievance,
    pub notification: Result<NotificationReceipt, NotificationError>,
    /// Non-blocking warning for the submitter, set when notification failed.
    pub warning: Option<String>,
}

/// A stored grievance whose notification has not settled yet.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub grievance: Grievance,
    pub message: NotificationMessage,
}

#[derive(Debug, Clone)]
pub struct GrievanceListView {
    /// Newest first.
    pub items: Vec<Grievance>,
    pub html: String,
}

/// Page-level state that lives only as long as the process.
#[derive(Debug, Default)]
struct SessionState {
    page: Page,
    session_user: Option<User>,
    selected_mood: Option<String>,
    draft: GrievanceForm,
    login_error: bool,
    notice: Option<String>,
    submit_busy: bool,
    notification: NotificationState,
}

impl SessionState {
    fn go_to(&mut self, page: Page) {
        self.page = page;
        self.login_error = false;
        self.notice = None;
    }

    /// Leave the form once the record is stored, whatever the
    /// notification did.
    fn settle(&mut self, notification: NotificationState) {
        self.submit_busy = false;
        self.notification = notification;
        self.draft = GrievanceForm::default();
        self.selected_mood = None;
        self.go_to(Page::ThankYou);
    }
}

/// Settles the session as cancelled if the notification future is
/// dropped before it resolves.
struct InFlight<'a> {
    session: &'a mut SessionState,
    id: GrievanceId,
    armed: bool,
}

impl InFlight<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!(id = self.id, "Grievance notification cancelled; record kept");
            self.session.settle(NotificationState::Cancelled);
        }
    }
}

/// Holds the transient session state: current page, session user,
/// selected mood and the form draft. None of it is persisted.
pub struct PortalController<U: UserRepository, G: GrievanceRepository, N: Notifier> {
    users: U,
    grievances: G,
    notifier: N,
    config: PortalConfig,
    session: SessionState,
}

impl<U: UserRepository, G: GrievanceRepository, N: Notifier> PortalController<U, G, N> {
    pub fn new(users: U, grievances: G, notifier: N, config: PortalConfig) -> Self {
        Self {
            users,
            grievances,
            notifier,
            config,
            session: SessionState::default(),
        }
    }

    /// Ensure both stored collections exist.
    pub async fn initialize(&self) -> PortalResult<()> {
        grievance_db::initialize(&self.users, &self.grievances).await?;
        info!("Grievance portal initialized");
        Ok(())
    }

    pub fn page(&self) -> Page {
        self.session.page
    }

    pub fn session_user(&self) -> Option<&User> {
        self.session.session_user.as_ref()
    }

    pub fn selected_mood(&self) -> Option<&str> {
        self.session.selected_mood.as_deref()
    }

    pub fn draft(&self) -> &GrievanceForm {
        &self.session.draft
    }

    pub fn draft_mut(&mut self) -> &mut GrievanceForm {
        &mut self.session.draft
    }

    /// Inline "invalid credentials" indicator on the login page.
    pub fn login_error(&self) -> bool {
        self.session.login_error
    }

    /// Blocking notice raised by the last rejected submission.
    pub fn notice(&self) -> Option<&str> {
        self.session.notice.as_deref()
    }

    /// True only while a notification attempt is in flight.
    pub fn submit_busy(&self) -> bool {
        self.session.submit_busy
    }

    pub fn notification_state(&self) -> &NotificationState {
        &self.session.notification
    }

    pub fn grievances(&self) -> &G {
        &self.grievances
    }

    /// Show `page`. Any page is reachable; the form is not gated on a
    /// session user.
    pub fn go_to(&mut self, page: Page) {
        self.session.go_to(page);
    }

    /// Check credentials. On failure the login page stays up with its
    /// error indicator set; retries are unlimited.
    pub async fn login(&mut self, username: &str, password: &str) -> PortalResult<&User> {
        let username = username.trim();
        match self.users.authenticate(username, password).await? {
            Some(user) => {
                info!(user = %user.name, "User logged in");
                self.go_to(Page::PortalHome);
                Ok(self.session.session_user.insert(user))
            }
            None => {
                warn!(username, "Login rejected");
                self.session.login_error = true;
                Err(PortalError::AuthenticationFailed {
                    reason: "invalid credentials".into(),
                })
            }
        }
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.session.session_user.take() {
            info!(user = %user.name, "User logged out");
        }
        self.go_to(Page::Login);
    }

    pub fn select_mood(&mut self, mood: impl Into<String>) {
        self.session.selected_mood = Some(mood.into());
    }

    /// Submit the current draft.
    ///
    /// Validation failures leave the form and storage untouched. A valid
    /// draft is stored first, then one notification attempt is made; the
    /// page moves to the thank-you page whatever that attempt returns,
    /// including when this future is dropped mid-send.
    pub async fn submit_grievance(&mut self) -> PortalResult<SubmissionReceipt> {
        let pending = self.begin_submit().await?;

        let guard = InFlight {
            session: &mut self.session,
            id: pending.grievance.id,
            armed: true,
        };
        let outcome = self.notifier.send(pending.message.clone()).await;
        guard.disarm();

        Ok(self.finish_submit(pending, outcome))
    }

    /// Validate and store the draft, then mark the submit control busy
    /// until [`finish_submit`](Self::finish_submit) is called with the
    /// notification outcome.
    pub async fn begin_submit(&mut self) -> PortalResult<PendingSubmission> {
        let input = self.build_input();
        if let Err(err) = input.validate() {
            warn!(error = %err, "Submission rejected");
            self.session.notice = Some("Please fill in all required fields".into());
            return Err(err);
        }

        let grievance = self.grievances.create(input).await?;
        info!(id = grievance.id, "Grievance saved");

        self.session.submit_busy = true;
        self.session.notification = NotificationState::Pending;
        let message = NotificationMessage::for_grievance(&grievance, clock::now_locale());
        Ok(PendingSubmission { grievance, message })
    }

    /// Record the notification outcome, clear the form and show the
    /// thank-you page. A failure only adds a warning.
    pub fn finish_submit(
        &mut self,
        pending: PendingSubmission,
        outcome: Result<NotificationReceipt, NotificationError>,
    ) -> SubmissionReceipt {
        let grievance = pending.grievance;
        let (state, warning) = match &outcome {
            Ok(receipt) => {
                info!(id = grievance.id, "Grievance notification sent");
                (NotificationState::Delivered(receipt.clone()), None)
            }
            Err(err) => {
                warn!(id = grievance.id, error = %err, cause = %err.cause(), "Grievance notification failed; record kept");
                (
                    NotificationState::Failed(err.clone()),
                    Some(NOTIFICATION_WARNING.to_string()),
                )
            }
        };
        self.session.settle(state);

        SubmissionReceipt {
            grievance,
            notification: outcome,
            warning,
        }
    }

    /// Render all stored grievances, newest first, and show the list page.
    pub async fn show_grievances(&mut self) -> PortalResult<GrievanceListView> {
        let mut items = self.grievances.list().await?;
        items.reverse();
        let html = render::render_list(&items);
        self.go_to(Page::GrievanceList);
        Ok(GrievanceListView { items, html })
    }

    /// Clear every stored grievance, but only when `confirmed`. Returns
    /// whether anything was cleared.
    pub async fn clear_grievances(&mut self, confirmed: bool) -> PortalResult<bool> {
        if !confirmed {
            return Ok(false);
        }
        self.grievances.clear_all().await?;
        info!("All grievances cleared");
        self.show_grievances().await?;
        Ok(true)
    }

    pub async fn stats(&self) -> PortalResult<GrievanceStats> {
        Ok(GrievanceStats {
            total: self.grievances.count().await?,
            pending: self.grievances.count_by_status(GrievanceStatus::Pending).await?,
            resolved: self.grievances.count_by_status(GrievanceStatus::Resolved).await?,
        })
    }

    /// Write a backup of every grievance into the configured directory.
    pub async fn export(&self) -> PortalResult<PathBuf> {
        grievance_db::export_all(&self.grievances, &self.config.export_dir).await
    }

    /// Send the fixed diagnostic message to check the collaborator setup.
    pub async fn send_test_notification(&self) -> Result<NotificationReceipt, NotificationError> {
        let outcome = self
            .notifier
            .send(NotificationMessage::diagnostic(clock::now_locale()))
            .await;
        match &outcome {
            Ok(_) => info!("Test notification sent"),
            Err(err) => warn!(error = %err, cause = %err.cause(), "Test notification failed"),
        }
        outcome
    }

    fn build_input(&self) -> CreateGrievance {
        let (submitted_by, submitted_by_name) = match &self.session.session_user {
            Some(user) => (user.username.clone(), user.name.clone()),
            None => (
                self.config.anonymous_username.clone(),
                self.config.anonymous_name.clone(),
            ),
        };
        let mood = self
            .session
            .selected_mood
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| self.config.default_mood.clone());

        CreateGrievance {
            title: self.session.draft.title.trim().to_string(),
            complaint: self.session.draft.complaint.trim().to_string(),
            mood,
            severity: self.session.draft.severity.clone(),
            submitted_by,
            submitted_by_name,
        }
    }
}
