//! Main authentication flow implementation

use std::sync::Arc;

use chrono::Utc;

use pnr_shared::config::rate_limit::RateLimitPolicy;
use pnr_shared::utils::birth_date::{parse_birth_date, validate_birth_date};
use pnr_shared::utils::document::{is_valid_cnpj, is_valid_cpf, normalize_document};
use pnr_shared::utils::email::{email_domain, is_valid_email_format, mask_email, normalize_email};
use pnr_shared::utils::password::validate_password_strength;
use pnr_shared::utils::phone::{is_valid_br_phone, normalize_phone};

use crate::domain::entities::account::{split_display_name, Account};
use crate::domain::entities::profile::{IndividualProfile, OrganizationProfile, Profile};
use crate::domain::value_objects::{Outcome, RedirectTarget, SessionGrant};
use crate::errors::{AuthError, DomainError, DomainResult, RateLimitError, RecoveryError};
use crate::repositories::{AccountRepository, ProfileRepository};
use crate::services::cache::CacheStore;
use crate::services::rate_limit::{
    code_verification_identifier, login_email_identifier, login_ip_identifier,
    recovery_request_identifier, registration_identifier, RateLimitDecision, RateLimiter,
};
use crate::services::recovery::{CodeCheck, RecoveryService};

use super::config::AuthFlowConfig;
use super::dns::{DnsResolver, NoOpDnsResolver};
use super::notifier::Notifier;
use super::password::{hash_password, verify_password};
use super::types::{
    CodeSubmission, LoginRequest, NewPasswordSubmission, PasswordResetRequest,
    RegisterIndividualRequest, RegisterOrganizationRequest,
};

// User-facing messages, bilingual like the error Displays. PT half is what
// the portal shows; EN half feeds logs and API consumers.
const MSG_INVALID_EMAIL: &str = "Invalid email format | Formato de email inválido";
const MSG_EMAIL_DOMAIN_NOT_FOUND: &str =
    "Email domain not found | Domínio de email não encontrado";
const MSG_ALL_FIELDS_REQUIRED: &str =
    "All fields are required | Todos os campos são obrigatórios";
const MSG_INVALID_BIRTH_DATE: &str = "Invalid birth date | Data de nascimento inválida";
const MSG_INVALID_CPF: &str = "Invalid CPF | CPF inválido";
const MSG_INVALID_RESPONSIBLE_CPF: &str =
    "Invalid responsible person's CPF | CPF do responsável inválido";
const MSG_INVALID_CNPJ: &str = "Invalid CNPJ | CNPJ inválido";
const MSG_INVALID_INSTITUTIONAL_EMAIL: &str =
    "Invalid institutional email format | Formato de email institucional inválido";
const MSG_INVALID_PHONE: &str =
    "Invalid phone number. Use the format (XX) XXXXX-XXXX | Telefone inválido. Use o formato (XX) XXXXX-XXXX";
const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match | As senhas não coincidem";
const MSG_EMAIL_TAKEN: &str =
    "This email is already registered | Este email já está cadastrado";
const MSG_CPF_TAKEN: &str = "This CPF is already registered | Este CPF já está cadastrado";
const MSG_CNPJ_TAKEN: &str =
    "This CNPJ is already registered | Este CNPJ já está cadastrado";
const MSG_INSTITUTIONAL_EMAIL_TAKEN: &str =
    "This institutional email is already registered | Este email institucional já está cadastrado";
const MSG_INDIVIDUAL_REGISTERED: &str =
    "Registration complete! Please log in | Cadastro realizado com sucesso! Faça login";
const MSG_ORGANIZATION_REGISTERED: &str =
    "Organization registered! Please log in | ONG cadastrada com sucesso! Faça login";
const MSG_RESET_SENT: &str =
    "If the email is registered, you will receive recovery instructions | Se o email estiver cadastrado, você receberá instruções de recuperação";
const MSG_CODE_VERIFIED: &str =
    "Code verified! Choose a new password | Código verificado! Escolha uma nova senha";
const MSG_PASSWORD_CHANGED: &str =
    "Password changed! Please log in with your new password | Senha alterada! Faça login com sua nova senha";

/// Authentication flow service for the account lifecycle
///
/// Covers login, the two registration forms and the three-step password
/// recovery. Every operation answers with an [`Outcome`] carrying the
/// user-facing message and the page to render next; `Err` is reserved for
/// store failures the user can only retry.
pub struct AuthFlowService<A, P, C, N, D = NoOpDnsResolver>
where
    A: AccountRepository,
    P: ProfileRepository,
    C: CacheStore,
    N: Notifier,
    D: DnsResolver,
{
    /// Account repository for credential storage
    accounts: Arc<A>,
    /// Profile repository deciding the post-login landing page
    profiles: Arc<P>,
    /// Delivery channel for recovery codes
    notifier: Arc<N>,
    /// Sliding-window limiter shared by all gates
    rate_limiter: RateLimiter<C>,
    /// Recovery code/token lifecycle
    recovery: RecoveryService<C>,
    /// Optional resolver behind the email deliverability probe
    dns: Option<Arc<D>>,
    /// Service configuration
    config: AuthFlowConfig,
}

impl<A, P, C, N> AuthFlowService<A, P, C, N>
where
    A: AccountRepository,
    P: ProfileRepository,
    C: CacheStore,
    N: Notifier,
{
    /// Create a new authentication flow service
    ///
    /// The email deliverability probe stays off; use
    /// [`with_dns_probe`](AuthFlowService::with_dns_probe) to attach a
    /// resolver.
    pub fn new(
        accounts: Arc<A>,
        profiles: Arc<P>,
        store: Arc<C>,
        notifier: Arc<N>,
        config: AuthFlowConfig,
    ) -> Self {
        Self {
            accounts,
            profiles,
            notifier,
            rate_limiter: RateLimiter::new(Arc::clone(&store), config.rate_limit.clone()),
            recovery: RecoveryService::new(store, config.recovery.clone()),
            dns: None,
            config,
        }
    }
}

impl<A, P, C, N, D> AuthFlowService<A, P, C, N, D>
where
    A: AccountRepository,
    P: ProfileRepository,
    C: CacheStore,
    N: Notifier,
    D: DnsResolver,
{
    /// Create a service with an email deliverability probe attached
    ///
    /// The probe still only runs when `auth.dns_probe_enabled` is set, so
    /// the resolver can be wired unconditionally at startup.
    pub fn with_dns_probe(
        accounts: Arc<A>,
        profiles: Arc<P>,
        store: Arc<C>,
        notifier: Arc<N>,
        dns: Arc<D>,
        config: AuthFlowConfig,
    ) -> Self {
        Self {
            accounts,
            profiles,
            notifier,
            rate_limiter: RateLimiter::new(Arc::clone(&store), config.rate_limit.clone()),
            recovery: RecoveryService::new(store, config.recovery.clone()),
            dns: Some(dns),
            config,
        }
    }

    /// Log a user in
    ///
    /// This method:
    /// 1. Rejects malformed email addresses outright
    /// 2. Checks the per-address and per-account login gates
    /// 3. Looks up the account and verifies the password
    /// 4. Records the attempt on both gates when credentials fail
    /// 5. On success clears both gates, stamps the login and grants a session
    /// 6. Picks the landing page from the profile attached to the account
    ///
    /// Unknown email and wrong password produce the same message, so the
    /// response never confirms whether an address is registered.
    ///
    /// # Arguments
    ///
    /// * `request` - The login form as submitted, plus the client address
    ///
    /// # Returns
    ///
    /// * `Ok(Outcome)` - Result to render; carries the session on success
    /// * `Err(DomainError)` - A store failed mid-flow
    pub async fn login(&self, request: &LoginRequest) -> DomainResult<Outcome> {
        let email = normalize_email(&request.email);

        // Step 1: a malformed address can never match an account, so answer
        // before touching the limiter or the database
        if !is_valid_email_format(&email) {
            return Ok(Outcome::failure(MSG_INVALID_EMAIL, RedirectTarget::Login));
        }

        // Step 2: admission gates. The limiter failing closed here keeps
        // credential guessing blocked while the store is down.
        let ip_key = login_ip_identifier(&request.ip);
        let email_key = login_email_identifier(&email);

        if let RateLimitDecision::Limited {
            retry_after_seconds,
        } = self
            .checked_gate(&ip_key, &self.config.rate_limit.login_per_ip)
            .await
        {
            tracing::warn!(
                ip = %request.ip,
                scope = "ip",
                event = "login_rate_limited",
                "Login blocked by the per-address gate"
            );
            return Ok(Outcome::failure(
                RateLimitError::from_retry_after(retry_after_seconds).to_string(),
                RedirectTarget::Login,
            ));
        }

        if let RateLimitDecision::Limited {
            retry_after_seconds,
        } = self
            .checked_gate(&email_key, &self.config.rate_limit.login_per_email)
            .await
        {
            tracing::warn!(
                email = %mask_email(&email),
                scope = "email",
                event = "login_rate_limited",
                "Login blocked by the per-account gate"
            );
            let minutes = retry_minutes(retry_after_seconds);
            return Ok(Outcome::failure(
                format!(
                    "Too many attempts for this email. Please try again in {minutes} minutes | Muitas tentativas para este email. Tente novamente em {minutes} minutos"
                ),
                RedirectTarget::Login,
            ));
        }

        // Step 3: account lookup
        let account = match self.accounts.find_by_email(&email).await? {
            Some(account) => account,
            None => {
                self.record_login_attempt(&ip_key, &email_key).await;
                tracing::info!(
                    email = %mask_email(&email),
                    reason = "unknown_email",
                    event = "login_failed",
                    "Login failed"
                );
                return Ok(Outcome::failure(
                    AuthError::InvalidCredentials.to_string(),
                    RedirectTarget::Login,
                ));
            }
        };

        // Step 4: password check
        if !verify_password(&request.password, &account.password_hash)? {
            self.record_login_attempt(&ip_key, &email_key).await;
            tracing::info!(
                email = %mask_email(&email),
                reason = "wrong_password",
                event = "login_failed",
                "Login failed"
            );
            return Ok(Outcome::failure(
                AuthError::InvalidCredentials.to_string(),
                RedirectTarget::Login,
            ));
        }

        // Step 5: success bookkeeping. The user is authenticated from here
        // on; a failing cleanup write is logged but does not undo that.
        for key in [&ip_key, &email_key] {
            if let Err(e) = self.rate_limiter.clear(key).await {
                tracing::error!(
                    identifier = %key,
                    error = %e,
                    "Failed to clear login gate after success"
                );
            }
        }
        if let Err(e) = self.accounts.update_last_login(account.id).await {
            tracing::error!(
                account_id = %account.id,
                error = %e,
                "Failed to stamp last login"
            );
        }

        let session = SessionGrant {
            account_id: account.id,
            ttl_seconds: request
                .remember
                .then(|| self.config.auth.session_ttl_remember_seconds),
        };

        // Step 6: the attached profile decides the landing page
        let profile = self.profiles.find_by_account(account.id).await?;

        tracing::info!(
            account_id = %account.id,
            email = %mask_email(&email),
            remember = request.remember,
            event = "login_succeeded",
            "Login succeeded"
        );

        let outcome = match profile {
            Some(Profile::Individual(_)) => Outcome::success(
                format!(
                    "Welcome, {name}! | Bem-vindo(a), {name}!",
                    name = account.first_name
                ),
                RedirectTarget::PetRegistration,
            ),
            Some(Profile::Organization(org)) => Outcome::success(
                format!(
                    "Welcome, {name}! | Bem-vinda, {name}!",
                    name = org.org_name
                ),
                RedirectTarget::OrgDashboard,
            ),
            None => {
                // Registration that never finished. Still a login; send the
                // user back to complete it.
                tracing::warn!(
                    account_id = %account.id,
                    event = "login_incomplete_profile",
                    "Login on an account with no profile"
                );
                Outcome::success(
                    AuthError::IncompleteProfile.to_string(),
                    RedirectTarget::Login,
                )
            }
        };

        Ok(outcome.with_session(session))
    }

    /// Register an individual (pessoa física) account
    ///
    /// Validation runs in form order and stops at the first failure, so the
    /// user corrects one field at a time the way the portal always worked.
    /// Account and profile are persisted in a single unit of work.
    pub async fn register_individual(
        &self,
        request: &RegisterIndividualRequest,
    ) -> DomainResult<Outcome> {
        const FORM: RedirectTarget = RedirectTarget::RegisterIndividual;

        // Step 1: admission gate per client address; every submission counts
        let gate = registration_identifier(&request.ip);
        if let Some(outcome) = self.registration_gate(&gate, &request.ip, FORM).await? {
            return Ok(outcome);
        }

        // Step 2: field validation, first failure wins
        if !all_present(&[
            &request.full_name,
            &request.email,
            &request.phone,
            &request.birth_date,
            &request.cpf,
            &request.address,
            &request.password,
            &request.password_confirm,
        ]) {
            return Ok(Outcome::failure(MSG_ALL_FIELDS_REQUIRED, FORM));
        }

        let email = normalize_email(&request.email);
        if !is_valid_email_format(&email) {
            return Ok(Outcome::failure(MSG_INVALID_EMAIL, FORM));
        }
        if !self.email_deliverable(&email).await {
            return Ok(Outcome::failure(MSG_EMAIL_DOMAIN_NOT_FOUND, FORM));
        }

        let birth_date = match parse_birth_date(&request.birth_date) {
            Some(date) => date,
            None => return Ok(Outcome::failure(MSG_INVALID_BIRTH_DATE, FORM)),
        };
        if let Err(problem) = validate_birth_date(birth_date, Utc::now().date_naive()) {
            return Ok(Outcome::failure(problem.to_string(), FORM));
        }

        let cpf = normalize_document(&request.cpf);
        if !is_valid_cpf(&cpf) {
            return Ok(Outcome::failure(MSG_INVALID_CPF, FORM));
        }

        let phone = normalize_phone(&request.phone);
        if !is_valid_br_phone(&phone) {
            return Ok(Outcome::failure(MSG_INVALID_PHONE, FORM));
        }

        if request.password != request.password_confirm {
            return Ok(Outcome::failure(MSG_PASSWORD_MISMATCH, FORM));
        }
        if let Err(problem) = validate_password_strength(&request.password) {
            return Ok(Outcome::failure(problem.to_string(), FORM));
        }

        // Step 3: duplicates. Registration names the conflicting field; the
        // anti-enumeration stance only applies to login and recovery.
        if self.accounts.exists_by_email(&email).await? {
            return Ok(Outcome::failure(MSG_EMAIL_TAKEN, FORM));
        }
        if self.profiles.exists_by_cpf(&cpf).await? {
            return Ok(Outcome::failure(MSG_CPF_TAKEN, FORM));
        }

        // Step 4: persist account and profile atomically
        let password_hash = hash_password(&request.password, self.config.auth.bcrypt_cost)?;
        let (first_name, last_name) = split_display_name(&request.full_name);
        let account = Account::new(&email, first_name, last_name, phone, password_hash);
        let profile = IndividualProfile {
            account_id: account.id,
            cpf,
            birth_date,
            address: request.address.trim().to_string(),
        };

        match self.accounts.create_individual(&account, &profile).await {
            Ok(()) => {}
            Err(DomainError::Duplicate { resource }) => {
                // Lost a race with a concurrent registration; the unique
                // constraint is the authority
                tracing::warn!(
                    resource = %resource,
                    event = "registration_duplicate_race",
                    "Registration hit a unique constraint after the duplicate checks"
                );
                return Ok(Outcome::failure(duplicate_message(&resource), FORM));
            }
            Err(e) => return Err(e),
        }

        tracing::info!(
            account_id = %account.id,
            email = %mask_email(&email),
            kind = "individual",
            event = "registration_completed",
            "Account registered"
        );
        Ok(Outcome::success(
            MSG_INDIVIDUAL_REGISTERED,
            RedirectTarget::Login,
        ))
    }

    /// Register an animal-welfare organization (ONG) account
    ///
    /// The responsible person becomes the login user: their name is split
    /// into the account's name parts and their CPF is validated like an
    /// individual's. The organization's own identity (CNPJ, institutional
    /// email) lives on the profile.
    pub async fn register_organization(
        &self,
        request: &RegisterOrganizationRequest,
    ) -> DomainResult<Outcome> {
        const FORM: RedirectTarget = RedirectTarget::RegisterOrganization;

        // Step 1: same admission gate as the individual form
        let gate = registration_identifier(&request.ip);
        if let Some(outcome) = self.registration_gate(&gate, &request.ip, FORM).await? {
            return Ok(outcome);
        }

        // Step 2: field validation, first failure wins
        if !all_present(&[
            &request.org_name,
            &request.email,
            &request.phone,
            &request.cnpj,
            &request.address,
            &request.institutional_email,
            &request.responsible_name,
            &request.responsible_cpf,
            &request.password,
            &request.password_confirm,
        ]) {
            return Ok(Outcome::failure(MSG_ALL_FIELDS_REQUIRED, FORM));
        }

        let email = normalize_email(&request.email);
        if !is_valid_email_format(&email) {
            return Ok(Outcome::failure(MSG_INVALID_EMAIL, FORM));
        }
        if !self.email_deliverable(&email).await {
            return Ok(Outcome::failure(MSG_EMAIL_DOMAIN_NOT_FOUND, FORM));
        }

        // The institutional address is contact data, not a login; format
        // check only, no deliverability probe
        let institutional_email = normalize_email(&request.institutional_email);
        if !is_valid_email_format(&institutional_email) {
            return Ok(Outcome::failure(MSG_INVALID_INSTITUTIONAL_EMAIL, FORM));
        }

        let cnpj = normalize_document(&request.cnpj);
        if !is_valid_cnpj(&cnpj) {
            return Ok(Outcome::failure(MSG_INVALID_CNPJ, FORM));
        }

        let responsible_cpf = normalize_document(&request.responsible_cpf);
        if !is_valid_cpf(&responsible_cpf) {
            return Ok(Outcome::failure(MSG_INVALID_RESPONSIBLE_CPF, FORM));
        }

        let phone = normalize_phone(&request.phone);
        if !is_valid_br_phone(&phone) {
            return Ok(Outcome::failure(MSG_INVALID_PHONE, FORM));
        }

        if request.password != request.password_confirm {
            return Ok(Outcome::failure(MSG_PASSWORD_MISMATCH, FORM));
        }
        if let Err(problem) = validate_password_strength(&request.password) {
            return Ok(Outcome::failure(problem.to_string(), FORM));
        }

        // Step 3: duplicates across login email, CNPJ and institutional email
        if self.accounts.exists_by_email(&email).await? {
            return Ok(Outcome::failure(MSG_EMAIL_TAKEN, FORM));
        }
        if self.profiles.exists_by_cnpj(&cnpj).await? {
            return Ok(Outcome::failure(MSG_CNPJ_TAKEN, FORM));
        }
        if self
            .profiles
            .exists_by_institutional_email(&institutional_email)
            .await?
        {
            return Ok(Outcome::failure(MSG_INSTITUTIONAL_EMAIL_TAKEN, FORM));
        }

        // Step 4: persist. The responsible person is the account holder.
        let password_hash = hash_password(&request.password, self.config.auth.bcrypt_cost)?;
        let (first_name, last_name) = split_display_name(&request.responsible_name);
        let account = Account::new(&email, first_name, last_name, phone, password_hash);
        let profile = OrganizationProfile {
            account_id: account.id,
            org_name: request.org_name.trim().to_string(),
            cnpj,
            address: request.address.trim().to_string(),
            institutional_email,
            responsible_name: request.responsible_name.trim().to_string(),
            responsible_cpf,
        };

        match self.accounts.create_organization(&account, &profile).await {
            Ok(()) => {}
            Err(DomainError::Duplicate { resource }) => {
                tracing::warn!(
                    resource = %resource,
                    event = "registration_duplicate_race",
                    "Registration hit a unique constraint after the duplicate checks"
                );
                return Ok(Outcome::failure(duplicate_message(&resource), FORM));
            }
            Err(e) => return Err(e),
        }

        tracing::info!(
            account_id = %account.id,
            email = %mask_email(&email),
            kind = "organization",
            event = "registration_completed",
            "Account registered"
        );
        Ok(Outcome::success(
            MSG_ORGANIZATION_REGISTERED,
            RedirectTarget::Login,
        ))
    }

    /// Open a password recovery: step one of three
    ///
    /// This method:
    /// 1. Answers malformed addresses with the same non-committal message,
    ///    without touching the limiter
    /// 2. Checks and records the per-address recovery gate
    /// 3. For registered addresses, issues a code/token pair and emails the
    ///    code
    /// 4. Always answers "if registered, instructions were sent"
    ///
    /// The browser token rides back in `Outcome::recovery_token` only when
    /// issuance actually happened; the message never changes, so responses
    /// stay identical for known and unknown addresses.
    ///
    /// # Arguments
    ///
    /// * `request` - The requesting email plus the client address
    pub async fn request_reset(&self, request: &PasswordResetRequest) -> DomainResult<Outcome> {
        let email = normalize_email(&request.email);

        // Step 1: malformed addresses get the standard answer without
        // consuming gate capacity
        if !is_valid_email_format(&email) {
            return Ok(Outcome::info(MSG_RESET_SENT, RedirectTarget::ResetVerify));
        }

        // Step 2: admission gate per client address
        let gate = recovery_request_identifier(&request.ip);
        if let RateLimitDecision::Limited {
            retry_after_seconds,
        } = self
            .rate_limiter
            .check(&gate, &self.config.rate_limit.recovery_request)
            .await?
        {
            tracing::warn!(
                ip = %request.ip,
                event = "recovery_rate_limited",
                "Recovery request blocked by the per-address gate"
            );
            let minutes = retry_minutes(retry_after_seconds);
            return Ok(Outcome::failure(
                format!(
                    "Too many recovery attempts. Please try again in {minutes} minutes | Muitas tentativas de recuperação. Tente novamente em {minutes} minutos"
                ),
                RedirectTarget::ResetRequest,
            ));
        }

        // Step 3: the attempt counts whether or not the email is registered
        self.rate_limiter.record(&gate).await?;

        // Step 4: issue and send only for registered addresses
        let account = self.accounts.find_by_email(&email).await?;
        let mut issued_token = None;
        if account.is_some() {
            let issued = self.recovery.issue(&email).await?;
            if let Err(e) = self.notifier.send_recovery_code(&email, &issued.code).await {
                tracing::error!(
                    email = %mask_email(&email),
                    error = %e,
                    event = "recovery_mail_failed",
                    "Failed to send recovery code"
                );
                // The code never left the server; close the recovery so the
                // pair cannot linger half-delivered
                if let Err(rollback) = self.recovery.consume(&email, &issued.token).await {
                    tracing::error!(
                        email = %mask_email(&email),
                        error = %rollback,
                        "Failed to roll back recovery state; TTLs will clear it"
                    );
                }
                return Ok(Outcome::failure(
                    AuthError::MailServiceFailure.to_string(),
                    RedirectTarget::ResetRequest,
                ));
            }
            tracing::info!(
                email = %mask_email(&email),
                event = "reset_requested",
                "Recovery code issued and sent"
            );
            issued_token = Some(issued.token);
        } else {
            tracing::info!(
                email = %mask_email(&email),
                event = "reset_requested_unknown_email",
                "Recovery requested for an unregistered email"
            );
        }

        // Step 5: identical answer either way
        let outcome = Outcome::info(MSG_RESET_SENT, RedirectTarget::ResetVerify);
        Ok(match issued_token {
            Some(token) => outcome.with_recovery_token(token),
            None => outcome,
        })
    }

    /// Check the emailed code: step two of three
    ///
    /// Wrong digits leave the code live and name the remaining attempt
    /// budget; a dead token or expired code sends the user back to the
    /// start.
    pub async fn submit_code(&self, request: &CodeSubmission) -> DomainResult<Outcome> {
        let email = normalize_email(&request.email);

        // Step 1: guessing gate, scoped to address and account together
        let gate = code_verification_identifier(&request.ip, &email);
        let remaining = match self
            .rate_limiter
            .check(&gate, &self.config.rate_limit.code_verification)
            .await?
        {
            RateLimitDecision::Limited {
                retry_after_seconds,
            } => {
                tracing::warn!(
                    ip = %request.ip,
                    email = %mask_email(&email),
                    event = "code_verification_rate_limited",
                    "Code submission blocked by the guessing gate"
                );
                return Ok(Outcome::failure(
                    RateLimitError::from_retry_after(retry_after_seconds).to_string(),
                    RedirectTarget::ResetVerify,
                ));
            }
            RateLimitDecision::Allowed { remaining } => remaining,
        };

        // Step 2: the attempt counts before the code is inspected
        self.rate_limiter.record(&gate).await?;

        // Step 3: check the code against the recovery state
        match self
            .recovery
            .verify_code(&email, &request.token, &request.code)
            .await?
        {
            CodeCheck::Verified => {
                // Guessing is over for this recovery
                if let Err(e) = self.rate_limiter.clear(&gate).await {
                    tracing::error!(
                        identifier = %gate,
                        error = %e,
                        "Failed to clear the verification gate"
                    );
                }
                tracing::info!(
                    email = %mask_email(&email),
                    event = "code_accepted",
                    "Recovery code verified"
                );
                Ok(Outcome::success(
                    MSG_CODE_VERIFIED,
                    RedirectTarget::ResetNewPassword,
                ))
            }
            CodeCheck::WrongCode => {
                tracing::info!(
                    email = %mask_email(&email),
                    remaining = remaining,
                    reason = "wrong_code",
                    event = "code_rejected",
                    "Recovery code rejected"
                );
                Ok(Outcome::failure(
                    format!(
                        "Incorrect code. {remaining} attempts remaining | Código incorreto. {remaining} tentativas restantes"
                    ),
                    RedirectTarget::ResetVerify,
                ))
            }
            CodeCheck::Expired => {
                tracing::info!(
                    email = %mask_email(&email),
                    reason = "expired",
                    event = "code_rejected",
                    "Recovery code rejected"
                );
                Ok(Outcome::failure(
                    RecoveryError::CodeExpired.to_string(),
                    RedirectTarget::ResetRequest,
                ))
            }
            CodeCheck::InvalidToken => {
                tracing::info!(
                    email = %mask_email(&email),
                    reason = "invalid_token",
                    event = "code_rejected",
                    "Recovery code rejected"
                );
                Ok(Outcome::failure(
                    RecoveryError::InvalidToken.to_string(),
                    RedirectTarget::ResetRequest,
                ))
            }
        }
    }

    /// Replace the password: step three of three
    ///
    /// The recovery must be verified before anything else is looked at.
    /// A dead token restarts the flow; a live token that skipped code entry
    /// goes back to step two.
    pub async fn submit_new_password(
        &self,
        request: &NewPasswordSubmission,
    ) -> DomainResult<Outcome> {
        let email = normalize_email(&request.email);

        // Step 1: precondition before any password validation
        if !self.recovery.verify_token(&email, &request.token).await? {
            tracing::info!(
                email = %mask_email(&email),
                reason = "invalid_token",
                event = "password_reset_rejected",
                "Password reset rejected"
            );
            return Ok(Outcome::failure(
                RecoveryError::InvalidToken.to_string(),
                RedirectTarget::ResetRequest,
            ));
        }
        if !self.recovery.is_verified(&email, &request.token).await? {
            tracing::info!(
                email = %mask_email(&email),
                reason = "not_verified",
                event = "password_reset_rejected",
                "Password reset rejected"
            );
            return Ok(Outcome::failure(
                RecoveryError::NotVerified.to_string(),
                RedirectTarget::ResetVerify,
            ));
        }

        // Step 2: the replacement password is held to the same policy as
        // registration
        if request.password != request.password_confirm {
            return Ok(Outcome::failure(
                MSG_PASSWORD_MISMATCH,
                RedirectTarget::ResetNewPassword,
            ));
        }
        if let Err(problem) = validate_password_strength(&request.password) {
            return Ok(Outcome::failure(
                problem.to_string(),
                RedirectTarget::ResetNewPassword,
            ));
        }

        // Step 3: persist the new hash
        let password_hash = hash_password(&request.password, self.config.auth.bcrypt_cost)?;
        let updated = self
            .accounts
            .update_password_by_email(&email, &password_hash)
            .await?;
        if !updated {
            // Account deleted mid-flow; nothing to reset
            tracing::warn!(
                email = %mask_email(&email),
                reason = "unknown_account",
                event = "password_reset_rejected",
                "Password reset rejected"
            );
            return Ok(Outcome::failure(
                RecoveryError::InvalidToken.to_string(),
                RedirectTarget::ResetRequest,
            ));
        }

        // Step 4: single use. The password is already changed; a failing
        // delete is logged and left to the TTLs.
        if let Err(e) = self.recovery.consume(&email, &request.token).await {
            tracing::error!(
                email = %mask_email(&email),
                error = %e,
                "Failed to consume recovery state after password change"
            );
        }

        tracing::info!(
            email = %mask_email(&email),
            event = "password_reset_completed",
            "Password changed through recovery"
        );
        Ok(Outcome::success(MSG_PASSWORD_CHANGED, RedirectTarget::Login))
    }

    /// Gate check that fails closed when the limiter store is unreachable
    async fn checked_gate(&self, identifier: &str, policy: &RateLimitPolicy) -> RateLimitDecision {
        match self.rate_limiter.check(identifier, policy).await {
            Ok(decision) => decision,
            Err(e) => {
                tracing::error!(
                    identifier = identifier,
                    error = %e,
                    event = "rate_limit_store_failure",
                    "Limiter store unavailable, failing closed"
                );
                RateLimitDecision::Limited {
                    retry_after_seconds: policy.window_seconds().max(60) as u64,
                }
            }
        }
    }

    /// Check and record the registration gate; `Some` is the outcome that
    /// ends the operation
    async fn registration_gate(
        &self,
        gate: &str,
        ip: &str,
        form: RedirectTarget,
    ) -> DomainResult<Option<Outcome>> {
        if let RateLimitDecision::Limited {
            retry_after_seconds,
        } = self
            .rate_limiter
            .check(gate, &self.config.rate_limit.registration)
            .await?
        {
            tracing::warn!(
                ip = %ip,
                event = "registration_rate_limited",
                "Registration blocked by the per-address gate"
            );
            return Ok(Some(Outcome::failure(
                RateLimitError::from_retry_after(retry_after_seconds).to_string(),
                form,
            )));
        }
        self.rate_limiter.record(gate).await?;
        Ok(None)
    }

    /// Record a failed login on both gates; best effort
    async fn record_login_attempt(&self, ip_key: &str, email_key: &str) {
        for key in [ip_key, email_key] {
            if let Err(e) = self.rate_limiter.record(key).await {
                tracing::error!(
                    identifier = %key,
                    error = %e,
                    "Failed to record login attempt"
                );
            }
        }
    }

    /// Whether the address's domain can receive mail
    ///
    /// Skipped unless the probe is enabled and a resolver is attached.
    /// Resolver errors count as deliverable so a DNS hiccup never blocks a
    /// registration.
    async fn email_deliverable(&self, email: &str) -> bool {
        if !self.config.auth.dns_probe_enabled {
            return true;
        }
        let Some(dns) = &self.dns else {
            return true;
        };
        let Some(domain) = email_domain(email) else {
            // Format validation has already run; nothing left to probe
            return true;
        };
        match dns.has_mail_exchanger(&domain).await {
            Ok(found) => {
                if !found {
                    tracing::info!(
                        domain = %domain,
                        event = "dns_probe_rejected",
                        "Email domain has no mail exchanger"
                    );
                }
                found
            }
            Err(e) => {
                tracing::warn!(
                    domain = %domain,
                    error = %e,
                    event = "dns_probe_failed",
                    "DNS probe failed, treating the domain as deliverable"
                );
                true
            }
        }
    }
}

/// Every field non-blank after trimming
fn all_present(fields: &[&str]) -> bool {
    fields.iter().all(|field| !field.trim().is_empty())
}

/// Whole minutes to report for a retry-after, rounded up, at least one
fn retry_minutes(retry_after_seconds: u64) -> u64 {
    retry_after_seconds.div_ceil(60).max(1)
}

/// Map a unique-constraint resource to the matching form message
fn duplicate_message(resource: &str) -> &'static str {
    match resource {
        "cpf" => MSG_CPF_TAKEN,
        "cnpj" => MSG_CNPJ_TAKEN,
        "institutional_email" => MSG_INSTITUTIONAL_EMAIL_TAKEN,
        _ => MSG_EMAIL_TAKEN,
    }
}
