//! # Expense Submission Service

use async_trait::async_trait;
use ed_01_collection_store::LocalCollectionStore;
use parking_lot::Mutex;
use shared_notify::NotificationChannel;
use shared_types::{Expense, GatewayError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::SubmissionConfig;
use crate::domain::{messages, validate, DraftField, ExpenseDraft, SubmissionError};
use crate::ports::{ExpenseGateway, ExpenseSubmissionApi};

/// Clears the in-progress flag on every exit path.
struct SubmittingGuard<'a>(&'a AtomicBool);

impl<'a> SubmittingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Expense Submission Service - owns the draft and the in-progress flag.
pub struct ExpenseSubmissionService<G: ExpenseGateway> {
    config: SubmissionConfig,
    gateway: Arc<G>,
    store: Arc<LocalCollectionStore>,
    notifications: NotificationChannel,
    draft: Mutex<ExpenseDraft>,
    submitting: AtomicBool,
}

impl<G: ExpenseGateway> ExpenseSubmissionService<G> {
    /// Create a new expense submission service with an empty draft.
    pub fn new(
        config: SubmissionConfig,
        gateway: Arc<G>,
        store: Arc<LocalCollectionStore>,
        notifications: NotificationChannel,
    ) -> Self {
        Self {
            config,
            gateway,
            store,
            notifications,
            draft: Mutex::new(ExpenseDraft::default()),
            submitting: AtomicBool::new(false),
        }
    }

    async fn send(&self, draft: &ExpenseDraft) -> Result<(), GatewayError> {
        match tokio::time::timeout(
            self.config.request_timeout(),
            self.gateway.create_expense(draft),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(GatewayError::Network(format!(
                "request timed out after {}s",
                self.config.request_timeout_secs
            ))),
        }
    }
}

#[async_trait]
impl<G: ExpenseGateway + 'static> ExpenseSubmissionApi for ExpenseSubmissionService<G> {
    async fn submit(&self) -> Result<Expense, SubmissionError> {
        let draft = self.draft.lock().clone();
        let validated = validate(&draft).map_err(|err| {
            debug!("[ed-03] Draft rejected: {}", err);
            err
        })?;

        let Some(_guard) = SubmittingGuard::acquire(&self.submitting) else {
            debug!("[ed-03] Submit rejected, already in flight");
            return Err(SubmissionError::InProgress);
        };

        info!(
            "[ed-03] Submitting expense of {} on {}",
            validated.amount, validated.date
        );

        match self.send(&validated.to_request()).await {
            Ok(()) => {
                self.notifications.success(messages::EXPENSE_CREATED);
                *self.draft.lock() = ExpenseDraft::default();

                let expense = validated.into_expense();
                self.store.expenses().insert_front(expense.clone());
                info!("[ed-03] Expense {} inserted locally", expense.id);
                Ok(expense)
            }
            Err(source) => {
                warn!("[ed-03] Create expense failed: {}", source);
                self.notifications
                    .error(source.user_message(messages::EXPENSE_FAILED));
                Err(SubmissionError::Gateway(source))
            }
        }
    }

    fn set_field(&self, field: &str, value: &str) -> Result<(), SubmissionError> {
        let field: DraftField = field.parse().map_err(SubmissionError::UnknownField)?;
        self.draft.lock().set(field, value);
        Ok(())
    }

    fn draft(&self) -> ExpenseDraft {
        self.draft.lock().clone()
    }

    fn reset_draft(&self) {
        *self.draft.lock() = ExpenseDraft::default();
    }

    fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockExpenseGateway;
    use rust_decimal::Decimal;
    use shared_notify::NotificationKind;

    struct Harness {
        service: Arc<ExpenseSubmissionService<MockExpenseGateway>>,
        gateway: Arc<MockExpenseGateway>,
        store: Arc<LocalCollectionStore>,
        notifications: NotificationChannel,
    }

    fn harness() -> Harness {
        let gateway = Arc::new(MockExpenseGateway::new());
        let store = Arc::new(LocalCollectionStore::new());
        let notifications = NotificationChannel::new();
        let service = Arc::new(ExpenseSubmissionService::new(
            SubmissionConfig::for_testing(),
            gateway.clone(),
            store.clone(),
            notifications.clone(),
        ));
        Harness {
            service,
            gateway,
            store,
            notifications,
        }
    }

    fn fill_valid(service: &ExpenseSubmissionService<MockExpenseGateway>) {
        for (field, value) in [
            ("account_id", "acc-meals"),
            ("amount", "18.75"),
            ("paid_through_account_id", "acc-cash"),
            ("date", "2024-05-02"),
            ("description", "Team lunch"),
        ] {
            service.set_field(field, value).unwrap();
        }
    }

    #[tokio::test]
    async fn test_successful_submit() {
        let h = harness();
        h.store.expenses().insert_front(Expense {
            id: "older".to_string(),
            account_id: "acc-meals".to_string(),
            paid_through_account_id: "acc-cash".to_string(),
            amount: Decimal::ONE,
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            description: String::new(),
            customer_id: None,
        });
        fill_valid(&h.service);

        let created = h.service.submit().await.unwrap();

        assert!(h.service.draft().is_empty());
        let expenses = h.store.expenses().snapshot();
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0], created);
        assert_eq!(created.amount, Decimal::new(1875, 2));
        let shown = h.notifications.current().unwrap();
        assert_eq!(shown.kind, NotificationKind::Success);
        assert_eq!(shown.message, "Expense created successfully!");
        assert!(!h.service.is_submitting());
    }

    #[tokio::test]
    async fn test_request_body_matches_local_record() {
        let h = harness();
        fill_valid(&h.service);
        h.service.set_field("account_id", " acc-meals ").unwrap();
        h.service.set_field("amount", " 18.75 ").unwrap();

        let created = h.service.submit().await.unwrap();

        let requests = h.gateway.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].account_id, "acc-meals");
        assert_eq!(requests[0].amount, "18.75");
        assert_eq!(requests[0].account_id, created.account_id);
        assert_eq!(requests[0].amount, created.amount.to_string());
        assert_eq!(requests[0].date, "2024-05-02");
    }

    #[tokio::test]
    async fn test_negative_amount_never_hits_network() {
        let h = harness();
        fill_valid(&h.service);
        h.service.set_field("amount", "-5").unwrap();

        let err = h.service.submit().await.unwrap_err();

        match err {
            SubmissionError::Validation(validation) => {
                assert!(validation.mentions(DraftField::Amount))
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(h.gateway.call_count(), 0);
        assert!(h.store.expenses().is_empty());
        assert_eq!(h.service.draft().amount, "-5");
    }

    #[tokio::test]
    async fn test_failure_preserves_draft_and_shows_server_message() {
        let h = harness();
        h.gateway
            .fail_with(GatewayError::remote(400, "Account is inactive"));
        fill_valid(&h.service);
        let before = h.service.draft();

        let err = h.service.submit().await.unwrap_err();

        assert!(matches!(err, SubmissionError::Gateway(_)));
        assert_eq!(h.service.draft(), before);
        assert!(h.store.expenses().is_empty());
        let shown = h.notifications.current().unwrap();
        assert_eq!(shown.kind, NotificationKind::Error);
        assert_eq!(shown.message, "Account is inactive");
        assert!(!h.service.is_submitting());
    }

    #[tokio::test]
    async fn test_failure_without_message_uses_generic_text() {
        let h = harness();
        h.gateway.fail_with(GatewayError::status(502));
        fill_valid(&h.service);

        assert!(h.service.submit().await.is_err());
        assert_eq!(
            h.notifications.current().unwrap().message,
            "Failed to create expense"
        );
    }

    #[tokio::test]
    async fn test_duplicate_submit_rejected_while_in_flight() {
        let h = harness();
        let gate = h.gateway.gate();
        fill_valid(&h.service);

        let service = h.service.clone();
        let first = tokio::spawn(async move { service.submit().await });
        for _ in 0..100 {
            if h.service.is_submitting() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(h.service.is_submitting());

        let second = h.service.submit().await;
        assert_eq!(second, Err(SubmissionError::InProgress));
        assert_eq!(h.gateway.call_count(), 1);

        gate.notify_one();
        first.await.unwrap().unwrap();
        assert_eq!(h.store.expenses().len(), 1);
        assert!(!h.service.is_submitting());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_request_times_out() {
        let h = harness();
        let _gate = h.gateway.gate();
        fill_valid(&h.service);

        let err = h.service.submit().await.unwrap_err();
        assert!(matches!(
            err,
            SubmissionError::Gateway(GatewayError::Network(_))
        ));
        assert!(!h.service.is_submitting());
        assert!(!h.service.draft().is_empty());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let h = harness();
        let err = h.service.set_field("vendor", "Acme").unwrap_err();
        assert_eq!(err, SubmissionError::UnknownField("vendor".to_string()));
        assert!(h.service.draft().is_empty());
    }

    #[test]
    fn test_reset_draft() {
        let h = harness();
        fill_valid(&h.service);
        h.service.reset_draft();
        assert!(h.service.draft().is_empty());
    }
}
