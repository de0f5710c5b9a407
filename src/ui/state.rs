use chrono::{DateTime, Utc};

use crate::common::validation::{
    BidField, FieldError, check_exceeds_highest, parse_amount, validate_fields,
};
use crate::common::{
    ApiCommand, ApiEvent, Bid, BidRejection, BidSnapshot, NewBid, RequestKind, SessionGrant,
};

use super::format::format_brl;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Auction,
    Admin,
}

/// Progress of the latest/highest fetch on the auction page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
}

#[derive(Debug, Default)]
pub struct BidForm {
    pub name: String,
    pub contact: String,
    pub amount: String,
}

impl BidForm {
    fn clear(&mut self) {
        self.name.clear();
        self.contact.clear();
        self.amount.clear();
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct FormErrors {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub amount: Option<String>,
    /// Errors that belong to no single field
    pub general: Option<String>,
}

impl From<Vec<FieldError>> for FormErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        let mut form_errors = FormErrors::default();
        for error in errors {
            let slot = match error.field {
                BidField::Name => &mut form_errors.name,
                BidField::Contact => &mut form_errors.contact,
                BidField::Amount => &mut form_errors.amount,
            };
            slot.get_or_insert(error.message);
        }
        form_errors
    }
}

#[derive(Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub error: Option<String>,
}

/// Local UI state for both the auction page and the admin page.
pub struct AppState {
    pub view: View,
    pub auction_ends_at: DateTime<Utc>,
    pub snapshot: BidSnapshot,
    pub snapshot_state: LoadState,
    pub form: BidForm,
    pub form_errors: FormErrors,
    pub submitting: bool,
    pub notice: Option<String>,
    pub login: LoginForm,
    pub session: Option<SessionGrant>,
    pub admin_bids: Vec<Bid>,
    pub admin_loading: bool,
}

impl AppState {
    pub fn new(auction_ends_at: DateTime<Utc>) -> Self {
        Self {
            view: View::Auction,
            auction_ends_at,
            snapshot: BidSnapshot::default(),
            snapshot_state: LoadState::Idle,
            form: BidForm::default(),
            form_errors: FormErrors::default(),
            submitting: false,
            notice: None,
            login: LoginForm::default(),
            session: None,
            admin_bids: Vec::new(),
            admin_loading: false,
        }
    }

    pub fn auction_is_open(&self, now: DateTime<Utc>) -> bool {
        now <= self.auction_ends_at
    }

    pub fn begin_snapshot_load(&mut self) -> ApiCommand {
        self.snapshot_state = LoadState::Loading;
        ApiCommand::RefreshSnapshot
    }

    /// Validate the form; `Some` means the bid may be sent to the server.
    pub fn prepare_submission(&mut self, now: DateTime<Utc>) -> Option<NewBid> {
        if !self.auction_is_open(now) {
            self.form_errors = FormErrors {
                general: Some("The auction is closed".to_string()),
                ..FormErrors::default()
            };
            return None;
        }
        if self.submitting {
            return None;
        }

        let highest = self.snapshot.highest_amount();
        let validated = validate_fields(
            &self.form.name,
            &self.form.contact,
            parse_amount(&self.form.amount),
        )
        .and_then(|(name, contact, amount)| {
            check_exceeds_highest(amount, highest)
                .map(|()| (name, contact, amount))
                .map_err(|error| vec![error])
        });

        match validated {
            Ok((name, contact, amount)) => {
                self.form_errors = FormErrors::default();
                self.notice = None;
                self.submitting = true;
                Some(NewBid {
                    name,
                    contact,
                    amount,
                    timestamp: now,
                })
            }
            Err(errors) => {
                self.form_errors = FormErrors::from(errors);
                None
            }
        }
    }

    pub fn has_active_session(&self, now: DateTime<Utc>) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.is_valid_at(now))
    }

    /// Switch to the admin page; fetches the listing when a session is live.
    pub fn open_admin(&mut self, now: DateTime<Utc>) -> Option<ApiCommand> {
        self.view = View::Admin;
        if !self.has_active_session(now) {
            self.session = None;
            self.admin_bids.clear();
            return None;
        }
        self.fetch_admin_bids()
    }

    pub fn fetch_admin_bids(&mut self) -> Option<ApiCommand> {
        let token = self.session.as_ref()?.token.clone();
        self.admin_loading = true;
        Some(ApiCommand::FetchAllBids { token })
    }

    pub fn prepare_login(&mut self) -> Option<ApiCommand> {
        let username = self.login.username.trim();
        if username.is_empty() || self.login.password.is_empty() {
            self.login.error = Some("Username and password are required".to_string());
            return None;
        }

        self.login.error = None;
        Some(ApiCommand::Login {
            username: username.to_string(),
            password: self.login.password.clone(),
        })
    }

    pub fn logout(&mut self) -> Option<ApiCommand> {
        self.admin_bids.clear();
        self.admin_loading = false;
        self.session
            .take()
            .map(|session| ApiCommand::Logout {
                token: session.token,
            })
    }

    /// Fold an API result into the state, returning any follow-up request.
    pub fn handle_event(&mut self, event: ApiEvent) -> Option<ApiCommand> {
        match event {
            ApiEvent::SnapshotLoaded(snapshot) => {
                self.snapshot = snapshot;
                self.snapshot_state = LoadState::Ready;
                None
            }
            ApiEvent::BidAccepted(bid) => {
                self.submitting = false;
                self.form.clear();
                self.notice = Some(format!("Bid of {} received", format_brl(bid.amount)));
                Some(self.begin_snapshot_load())
            }
            ApiEvent::BidRejected(rejection) => {
                self.submitting = false;
                match rejection {
                    BidRejection::TooLow(message) => self.form_errors.amount = Some(message),
                    BidRejection::AuctionClosed(message) | BidRejection::Invalid(message) => {
                        self.form_errors.general = Some(message)
                    }
                }
                Some(self.begin_snapshot_load())
            }
            ApiEvent::LoggedIn(grant) => {
                self.login.password.clear();
                self.login.error = None;
                self.session = Some(grant);
                self.view = View::Admin;
                self.fetch_admin_bids()
            }
            ApiEvent::LoginFailed(message) => {
                self.login.error = Some(message);
                None
            }
            ApiEvent::BidsLoaded(bids) => {
                self.admin_bids = bids;
                self.admin_loading = false;
                None
            }
            ApiEvent::SessionExpired => {
                self.session = None;
                self.admin_bids.clear();
                self.admin_loading = false;
                self.login.error = Some("Session expired, please log in again".to_string());
                None
            }
            ApiEvent::RequestFailed { request, message } => {
                match request {
                    RequestKind::SubmitBid => {
                        self.submitting = false;
                        self.form_errors.general = Some(message);
                    }
                    // Keep whatever was last shown; an empty snapshot renders as "no bids yet"
                    RequestKind::Snapshot => self.snapshot_state = LoadState::Ready,
                    RequestKind::BidListing => self.admin_loading = false,
                }
                None
            }
        }
    }
}
