//! # Dashboard
//!
//! Holds the store, the notification channel and the three services, all
//! sharing the same store and channel.
//!
//! ```text
//!                 ┌──────────────────────┐
//!  sync/refresh → │ ResourceSyncService  │──┐
//!                 ├──────────────────────┤  │    ┌──────────────────────┐
//!  submit       → │ ExpenseSubmission    │──┼──→ │ LocalCollectionStore │
//!                 ├──────────────────────┤  │    └──────────────────────┘
//!  upload/delete→ │ ReceiptLifecycle     │──┘    ┌──────────────────────┐
//!                 └──────────────────────┘ ────→ │ NotificationChannel  │
//!                                                └──────────────────────┘
//! ```
//!
//! Every operation is counted in the Prometheus registry.

use std::sync::Arc;

use tracing::warn;

use desk_telemetry::{log_event, record_expense, record_notification, record_receipt, record_sync};
use ed_01_collection_store::{DashboardStats, LocalCollectionStore};
use ed_02_resource_sync::{ResourceSyncApi, ResourceSyncService, SyncError, SyncGateway, SyncReport, SyncState};
use ed_03_expense_submission::{
    ExpenseDraft, ExpenseGateway, ExpenseSubmissionApi, ExpenseSubmissionService, SubmissionError,
};
use ed_04_receipt_lifecycle::{
    ReceiptError, ReceiptFile, ReceiptGateway, ReceiptLifecycleApi, ReceiptLifecycleService,
    ReceiptMetadata,
};
use shared_notify::{AutoDismissGuard, Notification, NotificationChannel};
use shared_types::{Account, Contact, Expense, Receipt, ResourceKey};

use crate::adapters::{HttpBackend, ReceiptBackend};
use crate::container::config::{ConfigError, DeskConfig};

/// Dashboard wired to the HTTP backend.
pub type HttpDashboard = Dashboard<HttpBackend, HttpBackend, ReceiptBackend>;

/// Every component of the dashboard behind one handle.
pub struct Dashboard<S, E, R>
where
    S: SyncGateway + 'static,
    E: ExpenseGateway + 'static,
    R: ReceiptGateway + 'static,
{
    config: DeskConfig,
    store: Arc<LocalCollectionStore>,
    notifications: NotificationChannel,
    sync: ResourceSyncService<S>,
    expenses: ExpenseSubmissionService<E>,
    receipts: ReceiptLifecycleService<R>,
}

impl HttpDashboard {
    /// Build the dashboard against the backend in `config`.
    pub fn connect(config: DeskConfig) -> Result<Self, ConfigError> {
        let backend = Arc::new(HttpBackend::new(&config.backend)?);
        let receipts = Arc::new(ReceiptBackend::from_config(&config.backend)?);
        if receipts.is_placeholder() {
            log_event!(info, "runtime", "No receipt endpoint configured, receipts stay local");
        }
        Ok(Self::new(config, backend.clone(), backend, receipts))
    }
}

impl<S, E, R> Dashboard<S, E, R>
where
    S: SyncGateway + 'static,
    E: ExpenseGateway + 'static,
    R: ReceiptGateway + 'static,
{
    /// Wire the services to the given gateways.
    pub fn new(
        config: DeskConfig,
        sync_gateway: Arc<S>,
        expense_gateway: Arc<E>,
        receipt_gateway: Arc<R>,
    ) -> Self {
        if let Err(e) = desk_telemetry::register_metrics() {
            warn!("Metrics unavailable: {}", e);
        }

        let store = Arc::new(LocalCollectionStore::new());
        let notifications = NotificationChannel::new();
        notifications.on_notify(|notification| record_notification(notification.kind.as_str()));

        let sync = ResourceSyncService::new(
            config.sync.clone(),
            sync_gateway,
            store.clone(),
            notifications.clone(),
        );
        let expenses = ExpenseSubmissionService::new(
            config.submission.clone(),
            expense_gateway,
            store.clone(),
            notifications.clone(),
        );
        let receipts = ReceiptLifecycleService::new(
            config.receipts.clone(),
            receipt_gateway,
            store.clone(),
            notifications.clone(),
        );

        Self {
            config,
            store,
            notifications,
            sync,
            expenses,
            receipts,
        }
    }

    // =========================================================================
    // SHARED STATE
    // =========================================================================

    /// The local collections.
    pub fn store(&self) -> &Arc<LocalCollectionStore> {
        &self.store
    }

    /// The notification channel.
    pub fn notifications(&self) -> &NotificationChannel {
        &self.notifications
    }

    /// Notification currently shown.
    pub fn current_notification(&self) -> Option<Notification> {
        self.notifications.current()
    }

    /// Start expiring notifications after the configured duration.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_auto_dismiss(&self) -> AutoDismissGuard {
        self.notifications
            .spawn_auto_dismiss(self.config.notification_duration())
    }

    // =========================================================================
    // RESOURCE SYNC
    // =========================================================================

    /// Trigger a remote sync of `resource` and replace the local copy.
    pub async fn sync(&self, resource: ResourceKey) -> Result<SyncReport, SyncError> {
        let result = self.sync.sync(resource).await;
        let outcome = match &result {
            Ok(_) => "success",
            Err(SyncError::InProgress(_)) => "rejected",
            Err(_) => "failure",
        };
        record_sync(resource.as_str(), outcome);
        result
    }

    /// Refetch `resource` without a remote sync.
    pub async fn refresh(&self, resource: ResourceKey) -> Result<SyncReport, SyncError> {
        self.sync.refresh(resource).await
    }

    /// Fetch accounts and contacts concurrently.
    pub async fn load_initial(
        &self,
    ) -> (
        Result<SyncReport, SyncError>,
        Result<SyncReport, SyncError>,
    ) {
        let (accounts, contacts) = tokio::join!(
            self.refresh(ResourceKey::ChartOfAccounts),
            self.refresh(ResourceKey::Contacts)
        );
        log_event!(
            info,
            "runtime",
            "Initial load finished",
            accounts = self.store.accounts().len(),
            contacts = self.store.contacts().len()
        );
        (accounts, contacts)
    }

    /// Whether a sync of `resource` is in flight.
    pub fn is_busy(&self, resource: ResourceKey) -> bool {
        self.sync.is_busy(resource)
    }

    /// Sync state of `resource`.
    pub fn sync_state(&self, resource: ResourceKey) -> SyncState {
        self.sync.sync_state(resource)
    }

    // =========================================================================
    // EXPENSES
    // =========================================================================

    /// Update one expense draft field by name.
    pub fn set_expense_field(&self, field: &str, value: &str) -> Result<(), SubmissionError> {
        self.expenses.set_field(field, value)
    }

    /// Snapshot of the expense draft.
    pub fn expense_draft(&self) -> ExpenseDraft {
        self.expenses.draft()
    }

    /// Validate and submit the expense draft.
    pub async fn submit_expense(&self) -> Result<Expense, SubmissionError> {
        let result = self.expenses.submit().await;
        let outcome = match &result {
            Ok(_) => "success",
            Err(SubmissionError::Gateway(_)) => "failure",
            Err(_) => "rejected",
        };
        record_expense(outcome);
        result
    }

    /// Whether an expense submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.expenses.is_submitting()
    }

    // =========================================================================
    // RECEIPTS
    // =========================================================================

    /// Upload a receipt.
    pub async fn upload_receipt(
        &self,
        file: Option<ReceiptFile>,
        metadata: ReceiptMetadata,
    ) -> Result<Receipt, ReceiptError> {
        let result = self.receipts.upload(file, metadata).await;
        record_receipt("upload", receipt_outcome(&result));
        result
    }

    /// Delete a receipt.
    pub async fn delete_receipt(&self, id: &str) -> Result<Receipt, ReceiptError> {
        let result = self.receipts.delete(id).await;
        record_receipt("delete", receipt_outcome(&result));
        result
    }

    /// Whether any receipt upload is in flight.
    pub fn is_uploading(&self) -> bool {
        self.receipts.is_uploading()
    }

    // =========================================================================
    // READ MODELS
    // =========================================================================

    /// Counts and totals over the local collections.
    pub fn stats(&self) -> DashboardStats {
        self.store.stats()
    }

    /// Accounts an expense can be booked against.
    pub fn expense_accounts(&self) -> Vec<Account> {
        self.store.expense_accounts()
    }

    /// Bank and cash accounts an expense can be paid through.
    pub fn paid_through_accounts(&self) -> Vec<Account> {
        self.store.paid_through_accounts()
    }

    /// Accounts matching `term`.
    pub fn search_accounts(&self, term: &str) -> Vec<Account> {
        self.store.search_accounts(term)
    }

    /// Contacts matching `term`.
    pub fn search_contacts(&self, term: &str) -> Vec<Contact> {
        self.store.search_contacts(term)
    }
}

fn receipt_outcome<T>(result: &Result<T, ReceiptError>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(err) if err.is_local() => "rejected",
        Err(_) => "failure",
    }
}
