//! Login wizard: `Login -> VerifyOtp -> Success -> Redirect`
//!
//! Time only moves when [`LoginWizard::tick`] is called, once per second.
//! Failed requests leave the wizard in the step it was in.

use anyhow::Result;
use tracing::{debug, info};

use super::countdown::Countdown;
use crate::api::{ApiClient, ApiError, ApiResult, LoginResponse, VerifyResponse};
use crate::session::SessionManager;
use crate::validate;

/// Seconds before a new OTP may be requested
pub const OTP_RESEND_SECS: u32 = 300;

/// Seconds the success popup waits before redirecting
pub const REDIRECT_SECS: u32 = 60;

pub const DASHBOARD_ROUTE: &str = "/dashboard";

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Login,
    VerifyOtp {
        vendor_id: String,
        code: String,
        resend: Countdown,
        /// OTP echoed by the server, offered for autofill
        autofill: Option<String>,
    },
    Success {
        redirect: Countdown,
    },
    Redirect {
        route: &'static str,
    },
}

#[derive(Debug)]
pub struct LoginWizard {
    step: Step,
    error: Option<String>,
}

impl Default for LoginWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginWizard {
    pub fn new() -> Self {
        Self {
            step: Step::Login,
            error: None,
        }
    }

    pub fn step(&self) -> &Step {
        &self.step
    }

    /// Message from the last failed action
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn vendor_id(&self) -> Option<&str> {
        match &self.step {
            Step::VerifyOtp { vendor_id, .. } => Some(vendor_id),
            _ => None,
        }
    }

    pub fn autofill(&self) -> Option<&str> {
        match &self.step {
            Step::VerifyOtp { autofill, .. } => autofill.as_deref(),
            _ => None,
        }
    }

    pub fn can_resend(&self) -> bool {
        matches!(&self.step, Step::VerifyOtp { resend, .. } if resend.is_done())
    }

    /// Route to navigate to once the wizard is finished
    pub fn redirect(&self) -> Option<&'static str> {
        match self.step {
            Step::Redirect { route } => Some(route),
            _ => None,
        }
    }

    /// Advance all running countdowns by one second
    pub fn tick(&mut self) {
        match &mut self.step {
            Step::VerifyOtp { resend, .. } => {
                if resend.tick() {
                    debug!("otp resend unlocked");
                }
            }
            Step::Success { redirect } => {
                if redirect.tick() {
                    self.step = Step::Redirect {
                        route: DASHBOARD_ROUTE,
                    };
                }
            }
            Step::Login | Step::Redirect { .. } => {}
        }
    }

    /// Close the success popup without waiting for the countdown
    pub fn acknowledge(&mut self) {
        if matches!(self.step, Step::Success { .. }) {
            self.step = Step::Redirect {
                route: DASHBOARD_ROUTE,
            };
        }
    }

    pub fn set_code(&mut self, value: &str) {
        if let Step::VerifyOtp { code, .. } = &mut self.step {
            *code = value.trim().to_string();
        }
    }

    /// Submit credentials
    pub async fn submit_login(
        &mut self,
        api: &ApiClient,
        email: &str,
        password: &str,
    ) -> ApiResult<()> {
        if self.step != Step::Login {
            return Err(ApiError::Validation("Already logged in".to_string()));
        }
        let outcome = self.check_credentials(email, password);
        let outcome = match outcome {
            Ok(()) => api.login(email.trim(), password).await,
            Err(e) => Err(e),
        };
        match outcome {
            Ok(response) => {
                self.on_login(response);
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn check_credentials(&self, email: &str, password: &str) -> ApiResult<()> {
        validate::email(email)?;
        validate::password(password)
    }

    /// Move to OTP entry after the server accepted the credentials
    pub fn on_login(&mut self, response: LoginResponse) {
        info!(vendor_id = %response.vendor_id, "credentials accepted, awaiting otp");
        self.error = None;
        self.step = Step::VerifyOtp {
            vendor_id: response.vendor_id,
            code: String::new(),
            resend: Countdown::new(OTP_RESEND_SECS),
            autofill: response.otp,
        };
    }

    /// Verify the entered code; on success the session is written
    pub async fn submit_otp(
        &mut self,
        api: &ApiClient,
        session: &mut SessionManager,
    ) -> Result<()> {
        let (vendor_id, code) = match &self.step {
            Step::VerifyOtp {
                vendor_id, code, ..
            } => (vendor_id.clone(), code.clone()),
            _ => return Err(ApiError::Validation("No OTP was requested".to_string()).into()),
        };

        if let Err(e) = validate::otp(&code) {
            return Err(self.fail(e).into());
        }

        match api.verify_otp(&vendor_id, &code).await {
            Ok(verified) => {
                self.on_verified(verified, session)?;
                Ok(())
            }
            Err(e) => Err(self.fail(e).into()),
        }
    }

    /// Persist the vendor and open the success popup
    pub fn on_verified(
        &mut self,
        verified: VerifyResponse,
        session: &mut SessionManager,
    ) -> Result<()> {
        session.sign_in(verified.token, verified.vendor)?;
        info!("otp verified");
        self.error = None;
        self.step = Step::Success {
            redirect: Countdown::new(REDIRECT_SECS),
        };
        Ok(())
    }

    /// Request a new OTP once the countdown has run out
    pub async fn resend(&mut self, api: &ApiClient) -> ApiResult<()> {
        let vendor_id = match &self.step {
            Step::VerifyOtp { vendor_id, .. } => vendor_id.clone(),
            _ => return Err(ApiError::Validation("No OTP was requested".to_string())),
        };
        if !self.can_resend() {
            return Err(self.fail(ApiError::Validation(
                "Please wait before requesting a new OTP".to_string(),
            )));
        }

        match api.resend_otp(&vendor_id).await {
            Ok(response) => {
                if let Step::VerifyOtp {
                    code,
                    resend,
                    autofill,
                    ..
                } = &mut self.step
                {
                    code.clear();
                    resend.reset(OTP_RESEND_SECS);
                    *autofill = response.otp;
                }
                self.error = None;
                info!("otp resent");
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn fail(&mut self, err: ApiError) -> ApiError {
        self.error = Some(err.to_string());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Vendor;
    use crate::session::KvStore;

    fn awaiting_otp() -> LoginWizard {
        let mut wizard = LoginWizard::new();
        wizard.on_login(LoginResponse {
            vendor_id: "v1".to_string(),
            otp: Some("4321".to_string()),
            message: None,
        });
        wizard
    }

    #[test]
    fn test_login_moves_to_otp_with_full_countdown() {
        let wizard = awaiting_otp();
        match wizard.step() {
            Step::VerifyOtp { resend, code, .. } => {
                assert_eq!(resend.remaining(), OTP_RESEND_SECS);
                assert!(code.is_empty());
            }
            other => panic!("unexpected step: {:?}", other),
        }
        assert_eq!(wizard.vendor_id(), Some("v1"));
        assert_eq!(wizard.autofill(), Some("4321"));
        assert!(!wizard.can_resend());
    }

    #[test]
    fn test_resend_unlocks_after_countdown() {
        let mut wizard = awaiting_otp();
        for _ in 0..OTP_RESEND_SECS - 1 {
            wizard.tick();
        }
        assert!(!wizard.can_resend());
        wizard.tick();
        assert!(wizard.can_resend());
    }

    #[test]
    fn test_success_redirects_at_zero() {
        let mut wizard = LoginWizard::new();
        let mut session = SessionManager::load(KvStore::open_in_memory().unwrap()).unwrap();
        wizard
            .on_verified(
                VerifyResponse {
                    token: Some("tok".to_string()),
                    vendor: Vendor {
                        id: "v1".to_string(),
                        ..Default::default()
                    },
                },
                &mut session,
            )
            .unwrap();

        assert!(session.current().is_some());
        for _ in 0..REDIRECT_SECS - 1 {
            wizard.tick();
        }
        assert_eq!(wizard.redirect(), None);
        wizard.tick();
        assert_eq!(wizard.redirect(), Some(DASHBOARD_ROUTE));
    }

    #[test]
    fn test_acknowledge_skips_countdown() {
        let mut wizard = LoginWizard::new();
        wizard.step = Step::Success {
            redirect: Countdown::new(REDIRECT_SECS),
        };
        wizard.acknowledge();
        assert_eq!(wizard.redirect(), Some(DASHBOARD_ROUTE));
    }

    #[test]
    fn test_set_code_ignored_outside_otp_step() {
        let mut wizard = LoginWizard::new();
        wizard.set_code("1234");
        assert_eq!(wizard.step(), &Step::Login);
    }
}
