use std::sync::Arc;

use tracing::{info, info_span, Instrument};

use qv_core::ports::AlertPort;
use qv_core::security::SecretString;
use qv_core::validation::{validate_password_change, ValidationError};

const PASSWORD_UPDATED: &str = "Password updated successfully";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangePasswordOutcome {
    /// An error alert was shown; the fields are kept.
    Rejected(ValidationError),
    /// A success alert was shown; the form should be cleared.
    Updated,
}

/// Password change from the security settings of a signed-in user.
///
/// Nothing is sent anywhere: the account backend has no endpoint for it,
/// so a valid change only confirms to the user.
pub struct ChangePassword {
    alerts: Arc<dyn AlertPort>,
}

impl ChangePassword {
    pub fn new(alerts: Arc<dyn AlertPort>) -> Self {
        Self { alerts }
    }

    pub async fn execute(
        &self,
        current: &SecretString,
        new: &SecretString,
        confirmation: &SecretString,
    ) -> anyhow::Result<ChangePasswordOutcome> {
        let span = info_span!("usecase.change_password.execute");
        self.confirm(current, new, confirmation)
            .instrument(span)
            .await
    }

    async fn confirm(
        &self,
        current: &str,
        new: &str,
        confirmation: &str,
    ) -> anyhow::Result<ChangePasswordOutcome> {
        match validate_password_change(current, new, confirmation) {
            Err(error) => {
                self.alerts
                    .show_alert(error.title(), &error.to_string())
                    .await?;
                Ok(ChangePasswordOutcome::Rejected(error))
            }
            Ok(()) => {
                info!("password change accepted");
                self.alerts.show_alert("Success", PASSWORD_UPDATED).await?;
                Ok(ChangePasswordOutcome::Updated)
            }
        }
    }
}
