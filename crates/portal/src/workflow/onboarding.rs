//! Merchant self-registration as a multi-step wizard.
//!
//! Ordered steps Company → Integration → Branding → Done. Step 1 creates the
//! tenant account immediately; the final commit re-posts the full form,
//! including branding assets, to finalize the tenant. The form is monotonic:
//! navigating backwards never discards entered values, only `reset()` does.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use returnwiz_core::TenantHandle;

use crate::api::PortalApi;
use crate::api::types::RegisterTenantRequest;
use crate::error::PortalError;

/// User-facing message for missing step 1 fields.
const COMPANY_FIELDS_REQUIRED: &str = "Company name, email, and password are required.";

/// Fallback when the backend rejects registration without a detail message.
const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";

/// The wizard's current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OnboardingStep {
    /// Company details and login credentials.
    Company,
    /// Shopify and carrier integration details.
    Integration,
    /// Portal branding (logo, banner, colors).
    Branding,
    /// The tenant is fully set up. Terminal.
    Done,
}

/// A branding image captured locally during onboarding.
///
/// Held in memory with its raw bytes until the final commit uploads it; the
/// preview representation is a base64 data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandingAsset {
    /// Original file name, for display.
    pub file_name: String,
    /// MIME type, e.g. `image/png`.
    pub content_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl BrandingAsset {
    /// The in-memory preview (and upload) representation: a data URL.
    #[must_use]
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            BASE64.encode(&self.bytes)
        )
    }
}

/// Everything the wizard accumulates across its three steps.
///
/// Secrets are wrapped so `Debug` output never reveals them.
#[derive(Default)]
pub struct OnboardingForm {
    // Step 1: Company
    pub company_name: String,
    pub cvr_number: String,
    pub webshop_handle: String,
    pub email: String,
    pub password: Option<SecretString>,

    // Step 2: Integration
    pub shopify_url: String,
    pub carrier_api_user: String,
    pub carrier_api_key: Option<SecretString>,
    pub carrier_customer_id: String,

    // Step 3: Branding
    pub logo: Option<BrandingAsset>,
    pub banner: Option<BrandingAsset>,
    pub primary_color: Option<String>,
}

impl std::fmt::Debug for OnboardingForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnboardingForm")
            .field("company_name", &self.company_name)
            .field("cvr_number", &self.cvr_number)
            .field("webshop_handle", &self.webshop_handle)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("shopify_url", &self.shopify_url)
            .field("carrier_api_user", &self.carrier_api_user)
            .field(
                "carrier_api_key",
                &self.carrier_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("carrier_customer_id", &self.carrier_customer_id)
            .field("logo", &self.logo.as_ref().map(|a| a.file_name.as_str()))
            .field("banner", &self.banner.as_ref().map(|a| a.file_name.as_str()))
            .field("primary_color", &self.primary_color)
            .finish()
    }
}

/// A field-level merge update for the onboarding form.
///
/// Only `Some` fields are applied, so each step patches just the fields it
/// owns and never clobbers the others.
#[derive(Debug, Default)]
pub struct FormUpdate {
    pub company_name: Option<String>,
    pub cvr_number: Option<String>,
    pub webshop_handle: Option<String>,
    pub email: Option<String>,
    pub password: Option<SecretString>,
    pub shopify_url: Option<String>,
    pub carrier_api_user: Option<String>,
    pub carrier_api_key: Option<SecretString>,
    pub carrier_customer_id: Option<String>,
    pub logo: Option<BrandingAsset>,
    pub banner: Option<BrandingAsset>,
    pub primary_color: Option<String>,
}

impl OnboardingForm {
    fn apply(&mut self, update: FormUpdate) {
        macro_rules! merge {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = update.$field {
                    self.$field = value;
                })*
            };
        }
        merge!(
            company_name,
            cvr_number,
            webshop_handle,
            email,
            shopify_url,
            carrier_api_user,
            carrier_customer_id,
        );
        if update.password.is_some() {
            self.password = update.password;
        }
        if update.carrier_api_key.is_some() {
            self.carrier_api_key = update.carrier_api_key;
        }
        if update.logo.is_some() {
            self.logo = update.logo;
        }
        if update.banner.is_some() {
            self.banner = update.banner;
        }
        if update.primary_color.is_some() {
            self.primary_color = update.primary_color;
        }
    }

    fn password_value(&self) -> String {
        self.password
            .as_ref()
            .map(|p| p.expose_secret().to_string())
            .unwrap_or_default()
    }
}

/// The merchant onboarding workflow.
///
/// One instance drives one onboarding session; the form is owned by the
/// workflow until `reset()` or a successful commit.
pub struct OnboardingWorkflow<A> {
    api: A,
    step: OnboardingStep,
    form: OnboardingForm,
    tenant_domain: String,
    error: Option<String>,
}

impl<A: PortalApi> OnboardingWorkflow<A> {
    /// Create a workflow at the Company step with an empty form.
    ///
    /// `tenant_domain` is the suffix under which the finished portal is
    /// published, e.g. `returnwiz.dk`.
    pub fn new(api: A, tenant_domain: impl Into<String>) -> Self {
        Self {
            api,
            step: OnboardingStep::Company,
            form: OnboardingForm::default(),
            tenant_domain: tenant_domain.into(),
            error: None,
        }
    }

    /// The current step.
    #[must_use]
    pub const fn step(&self) -> OnboardingStep {
        self.step
    }

    /// The accumulated form.
    #[must_use]
    pub const fn form(&self) -> &OnboardingForm {
        &self.form
    }

    /// The message of the last failed action, cleared by the next action.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Merge field values into the form. Monotonic: values are only ever
    /// replaced by newer values, never dropped, until `reset()`.
    pub fn update(&mut self, update: FormUpdate) {
        self.form.apply(update);
    }

    /// Advance to the next step.
    ///
    /// From Company this performs the tenant-registration call and only
    /// advances on success; the backend's `detail` message is surfaced
    /// verbatim on failure. From Integration it advances unconditionally.
    ///
    /// # Errors
    ///
    /// `Validation` if company name, email, or password is empty (no network
    /// call is made), `Registration` if the backend rejects the account,
    /// `InvalidAction` from Branding or Done (use [`Self::finish`]).
    pub async fn next(&mut self) -> Result<(), PortalError> {
        match self.step {
            OnboardingStep::Company => {
                self.error = None;

                if self.form.company_name.trim().is_empty()
                    || self.form.email.trim().is_empty()
                    || self.form.password_value().is_empty()
                {
                    return Err(
                        self.fail(PortalError::Validation(COMPANY_FIELDS_REQUIRED.to_string()))
                    );
                }

                let request = self.build_request(false);
                match self.api.register_tenant(&request).await {
                    Ok(record) => {
                        info!(tenant = %record.name, "tenant account created");
                        self.step = OnboardingStep::Integration;
                        Ok(())
                    }
                    Err(err) => {
                        let message = err
                            .detail()
                            .map_or_else(|| REGISTRATION_FAILED.to_string(), ToOwned::to_owned);
                        Err(self.fail(PortalError::Registration(message)))
                    }
                }
            }
            OnboardingStep::Integration => {
                self.error = None;
                self.step = OnboardingStep::Branding;
                Ok(())
            }
            OnboardingStep::Branding | OnboardingStep::Done => Err(PortalError::InvalidAction),
        }
    }

    /// Go back one step. A no-op from Company and Done. Entered field values
    /// are kept.
    pub fn back(&mut self) {
        self.step = match self.step {
            OnboardingStep::Integration => OnboardingStep::Company,
            OnboardingStep::Branding => OnboardingStep::Integration,
            step @ (OnboardingStep::Company | OnboardingStep::Done) => step,
        };
    }

    /// Final commit: assemble the full form into one payload and finalize
    /// the tenant. Only valid from Branding.
    ///
    /// Branding assets are uploaded here, as data URLs, not before. On
    /// failure the workflow stays on Branding and the payload may be
    /// resubmitted unchanged; there is no partial-commit tracking.
    ///
    /// # Errors
    ///
    /// `Registration` if the backend rejects the payload, `InvalidAction`
    /// outside Branding.
    pub async fn finish(&mut self) -> Result<(), PortalError> {
        if self.step != OnboardingStep::Branding {
            return Err(PortalError::InvalidAction);
        }
        self.error = None;

        let request = self.build_request(true);
        match self.api.register_tenant(&request).await {
            Ok(record) => {
                info!(tenant = %record.name, "onboarding committed");
                self.step = OnboardingStep::Done;
                Ok(())
            }
            Err(err) => {
                let message = err
                    .detail()
                    .map_or_else(|| REGISTRATION_FAILED.to_string(), ToOwned::to_owned);
                Err(self.fail(PortalError::Registration(message)))
            }
        }
    }

    /// The finished portal's hostname, derived from the webshop handle.
    /// Present once the workflow is Done and the handle is usable.
    #[must_use]
    pub fn destination(&self) -> Option<String> {
        if self.step != OnboardingStep::Done {
            return None;
        }
        let handle = TenantHandle::parse(&self.form.webshop_handle).ok()?;
        Some(format!("https://{handle}.{}", self.tenant_domain))
    }

    /// Reset to the Company step with an empty form, clearing error state.
    pub fn reset(&mut self) {
        self.step = OnboardingStep::Company;
        self.form = OnboardingForm::default();
        self.error = None;
    }

    fn fail(&mut self, err: PortalError) -> PortalError {
        self.error = Some(err.to_string());
        err
    }

    fn build_request(&self, include_integration_and_branding: bool) -> RegisterTenantRequest {
        let mut request = RegisterTenantRequest {
            name: self.form.company_name.trim().to_string(),
            email: self.form.email.trim().to_string(),
            password: self.form.password_value(),
            cvr_number: non_empty(&self.form.cvr_number),
            webshop_name: non_empty(&self.form.webshop_handle),
            ..RegisterTenantRequest::default()
        };

        if include_integration_and_branding {
            request.shopify_url = non_empty(&self.form.shopify_url);
            request.bring_api_user = non_empty(&self.form.carrier_api_user);
            request.bring_api_key = self
                .form
                .carrier_api_key
                .as_ref()
                .map(|k| k.expose_secret().to_string())
                .filter(|k| !k.is_empty());
            request.bring_customer_id = non_empty(&self.form.carrier_customer_id);
            request.logo_url = self.form.logo.as_ref().map(BrandingAsset::data_url);
            request.banner_url = self.form.banner.as_ref().map(BrandingAsset::data_url);
        }

        request
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
