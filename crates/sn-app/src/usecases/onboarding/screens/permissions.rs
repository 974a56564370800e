use std::sync::Arc;

use tracing::{info, warn};

use sn_core::ports::{AuthorizationPort, BluetoothNurseryPort, RemoteNotificationPort, UiQueuePort};
use sn_core::AuthorizationStatus;

use crate::usecases::onboarding::ContinuationCallback;

/// Permission request screen shown for [`sn_core::FlowState::Permissions`].
pub struct PermissionsScreen {
    authorization: Arc<dyn AuthorizationPort>,
    remote_notifications: Arc<dyn RemoteNotificationPort>,
    nursery: Arc<dyn BluetoothNurseryPort>,
    ui_queue: Arc<dyn UiQueuePort>,
    on_continue: ContinuationCallback,
}

impl PermissionsScreen {
    pub fn new(
        authorization: Arc<dyn AuthorizationPort>,
        remote_notifications: Arc<dyn RemoteNotificationPort>,
        nursery: Arc<dyn BluetoothNurseryPort>,
        ui_queue: Arc<dyn UiQueuePort>,
        on_continue: ContinuationCallback,
    ) -> Self {
        Self {
            authorization,
            remote_notifications,
            nursery,
            ui_queue,
            on_continue,
        }
    }

    /// User tapped "continue": trigger the OS prompts, then hand control back.
    ///
    /// Prompt failures are logged only. Whatever the outcome, the next
    /// resolution decides which screen follows.
    pub async fn request_permissions(&self) {
        if let Err(err) = self.nursery.start().await {
            warn!(error = %err, "failed to start bluetooth nursery");
        }

        let bluetooth = self.authorization.bluetooth();
        if bluetooth == AuthorizationStatus::Allowed {
            match self.remote_notifications.request_authorization().await {
                Ok(granted) => info!(granted, "notification authorization answered"),
                Err(err) => warn!(error = %err, "notification authorization request failed"),
            }
        } else {
            info!(%bluetooth, "skipping notification prompt until bluetooth is allowed");
        }

        let on_continue = Arc::clone(&self.on_continue);
        self.ui_queue.dispatch(Box::new(move || on_continue()));
    }
}
