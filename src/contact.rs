//! Contact form submission through the third-party email relay.
//!
//! A submission moves `Idle -> Sending -> Succeeded | Failed`; `Succeeded`
//! falls back to `Idle` after [`SUCCESS_RESET_DELAY`]. Each attempt carries a
//! [`SubmitTicket`]; messages for an older ticket are ignored, which is how a
//! new submission cancels the previous one's pending reset.
//!
//! Tickets are issued by a [`SubmitGate`] that lives beside the rendered
//! state, so two submits handled before a re-render cannot both reach the
//! relay.

use std::{cell::RefCell, future::Future, time::Duration};

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::logging::{LogLevel, Logger};

pub const EMAIL_RELAY_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";
pub const SUCCESS_RESET_DELAY: Duration = Duration::from_millis(3_000);

const SERVICE_ID_KEY: &str = "EMAILJS_SERVICE_ID";
const TEMPLATE_ID_KEY: &str = "EMAILJS_TEMPLATE_ID";
const PUBLIC_KEY_KEY: &str = "EMAILJS_PUBLIC_KEY";

/// Relay identifiers. Unset values are empty strings; the relay rejects them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RelayConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl RelayConfig {
    /// Values baked into the browser bundle at compile time.
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| {
            let value = match key {
                SERVICE_ID_KEY => option_env!("EMAILJS_SERVICE_ID"),
                TEMPLATE_ID_KEY => option_env!("EMAILJS_TEMPLATE_ID"),
                PUBLIC_KEY_KEY => option_env!("EMAILJS_PUBLIC_KEY"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .unwrap_or_default()
        };

        Self {
            service_id: read(SERVICE_ID_KEY),
            template_id: read(TEMPLATE_ID_KEY),
            public_key: read(PUBLIC_KEY_KEY),
        }
    }

    pub fn missing_keys(&self) -> Vec<&'static str> {
        [
            (SERVICE_ID_KEY, &self.service_id),
            (TEMPLATE_ID_KEY, &self.template_id),
            (PUBLIC_KEY_KEY, &self.public_key),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(key, _)| key)
        .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Message => self.message = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }
}

/// JSON body accepted by the relay's send endpoint.
#[derive(Debug, Serialize)]
pub struct RelayRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a ContactFields,
}

impl<'a> RelayRequest<'a> {
    pub fn new(config: &'a RelayConfig, fields: &'a ContactFields) -> Self {
        Self {
            service_id: &config.service_id,
            template_id: &config.template_id,
            user_id: &config.public_key,
            template_params: fields,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    #[error("relay request could not be sent: {0}")]
    Transport(String),
    #[error("relay rejected the message with status {status}")]
    Rejected { status: u16 },
}

impl RelayError {
    pub fn class(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Rejected { .. } => "rejected",
        }
    }
}

pub trait EmailRelay {
    fn send(&self, request: &RelayRequest<'_>) -> impl Future<Output = Result<(), RelayError>>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitStatus {
    #[default]
    Idle,
    Sending,
    Succeeded,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmitTicket(u64);

/// Sole issuer of tickets. Holds at most one claimed ticket until its relay
/// call settles.
#[derive(Debug, Default)]
pub struct SubmitGate {
    issued: u64,
    claimed: Option<SubmitTicket>,
}

impl SubmitGate {
    /// Next ticket, or `None` while an earlier one is still sending.
    pub fn claim(&mut self) -> Option<SubmitTicket> {
        if self.claimed.is_some() {
            return None;
        }

        self.issued += 1;
        let ticket = SubmitTicket(self.issued);
        self.claimed = Some(ticket);
        Some(ticket)
    }

    pub fn holds(&self, ticket: SubmitTicket) -> bool {
        self.claimed == Some(ticket)
    }

    pub fn release(&mut self, ticket: SubmitTicket) -> bool {
        if !self.holds(ticket) {
            return false;
        }

        self.claimed = None;
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Delivered,
    Failed,
}

/// Messages the relay task posts back to the state owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionEvent {
    Settled {
        ticket: SubmitTicket,
        outcome: SubmitOutcome,
    },
    SuccessExpired(SubmitTicket),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    status: SubmitStatus,
    generation: u64,
}

impl Submission {
    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn in_flight(&self) -> bool {
        self.status == SubmitStatus::Sending
    }

    pub fn succeeded(&self) -> bool {
        self.status == SubmitStatus::Succeeded
    }

    /// Accepts only a ticket newer than every earlier one, and never while
    /// another attempt is sending.
    pub fn begin(&mut self, ticket: SubmitTicket) -> bool {
        if self.in_flight() || ticket.0 <= self.generation {
            return false;
        }

        self.generation = ticket.0;
        self.status = SubmitStatus::Sending;
        true
    }

    pub fn settle(&mut self, ticket: SubmitTicket, outcome: SubmitOutcome) -> bool {
        if !self.in_flight() || ticket.0 != self.generation {
            return false;
        }

        self.status = match outcome {
            SubmitOutcome::Delivered => SubmitStatus::Succeeded,
            SubmitOutcome::Failed => SubmitStatus::Failed,
        };
        true
    }

    pub fn expire(&mut self, ticket: SubmitTicket) -> bool {
        if !self.succeeded() || ticket.0 != self.generation {
            return false;
        }

        self.status = SubmitStatus::Idle;
        true
    }
}

/// Sends one attempt and posts its settlement, then on success waits
/// [`SUCCESS_RESET_DELAY`] via `sleep` and posts the reset.
///
/// `ticket` must be held by `gate`; anything else is dropped without touching
/// the relay. The gate is released before the settlement is posted.
#[allow(clippy::too_many_arguments)]
pub async fn run_submission<R, S, F, P>(
    relay: &R,
    gate: &RefCell<SubmitGate>,
    config: &RelayConfig,
    fields: ContactFields,
    ticket: SubmitTicket,
    logger: &Logger,
    sleep: S,
    mut post: P,
) where
    R: EmailRelay,
    S: FnOnce(Duration) -> F,
    F: Future<Output = ()>,
    P: FnMut(SubmissionEvent),
{
    if !gate.borrow().holds(ticket) {
        logger.event(
            LogLevel::Warn,
            "contact_submit_rejected",
            json!({
                "ticket": ticket.0,
                "reason": "unclaimed_ticket",
            }),
        );
        return;
    }

    let missing = config.missing_keys();
    if !missing.is_empty() {
        logger.event(
            LogLevel::Warn,
            "contact_relay_config_incomplete",
            json!({
                "ticket": ticket.0,
                "missing": missing,
            }),
        );
    }

    logger.event(
        LogLevel::Info,
        "contact_submit_start",
        json!({
            "ticket": ticket.0,
            "message_chars": fields.message.chars().count(),
        }),
    );

    let result = relay.send(&RelayRequest::new(config, &fields)).await;
    gate.borrow_mut().release(ticket);

    match result {
        Ok(()) => {
            logger.event(
                LogLevel::Info,
                "contact_submit_succeeded",
                json!({ "ticket": ticket.0 }),
            );
            post(SubmissionEvent::Settled {
                ticket,
                outcome: SubmitOutcome::Delivered,
            });

            sleep(SUCCESS_RESET_DELAY).await;

            logger.event(
                LogLevel::Debug,
                "contact_success_reset",
                json!({ "ticket": ticket.0 }),
            );
            post(SubmissionEvent::SuccessExpired(ticket));
        }
        Err(err) => {
            logger.event(
                LogLevel::Warn,
                "contact_submit_failed",
                json!({
                    "ticket": ticket.0,
                    "error_class": err.class(),
                    "error": err.to_string(),
                }),
            );
            post(SubmissionEvent::Settled {
                ticket,
                outcome: SubmitOutcome::Failed,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::{cell::RefCell, collections::HashMap};

    struct ScriptedRelay {
        result: Result<(), RelayError>,
        seen: RefCell<Vec<serde_json::Value>>,
    }

    impl ScriptedRelay {
        fn new(result: Result<(), RelayError>) -> Self {
            Self {
                result,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl EmailRelay for ScriptedRelay {
        async fn send(&self, request: &RelayRequest<'_>) -> Result<(), RelayError> {
            self.seen
                .borrow_mut()
                .push(serde_json::to_value(request).expect("request serializes"));
            self.result.clone()
        }
    }

    fn test_config() -> RelayConfig {
        RelayConfig {
            service_id: "service_abc".to_string(),
            template_id: "template_xyz".to_string(),
            public_key: "pk_123".to_string(),
        }
    }

    fn filled_fields() -> ContactFields {
        ContactFields {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            message: "Hello".to_string(),
        }
    }

    fn quiet_logger() -> Logger {
        Logger::new(LogLevel::Warn)
    }

    #[test]
    fn relay_request_matches_send_endpoint_body() {
        let config = test_config();
        let fields = filled_fields();

        let body = serde_json::to_value(RelayRequest::new(&config, &fields)).expect("serializes");

        assert_eq!(
            body,
            json!({
                "service_id": "service_abc",
                "template_id": "template_xyz",
                "user_id": "pk_123",
                "template_params": {
                    "name": "John Doe",
                    "email": "john@example.com",
                    "message": "Hello",
                },
            })
        );
    }

    #[test]
    fn unset_or_blank_config_values_become_empty() {
        let env: HashMap<&str, &str> =
            HashMap::from([(SERVICE_ID_KEY, " service_abc "), (TEMPLATE_ID_KEY, "   ")]);

        let config = RelayConfig::from_lookup(|key| env.get(key).map(|value| value.to_string()));

        assert_eq!(config.service_id, "service_abc");
        assert_eq!(config.template_id, "");
        assert_eq!(config.public_key, "");
        assert_eq!(config.missing_keys(), vec![TEMPLATE_ID_KEY, PUBLIC_KEY_KEY]);
    }

    #[test]
    fn second_submit_while_sending_is_rejected() {
        let mut gate = SubmitGate::default();
        let mut submission = Submission::default();
        let first = gate.claim().expect("idle gate issues a ticket");

        assert!(submission.begin(first));
        assert_eq!(gate.claim(), None);
        assert!(!submission.begin(first));
        assert!(submission.in_flight());
    }

    #[test]
    fn sending_state_refuses_any_other_ticket() {
        let mut submission = Submission::default();

        assert!(submission.begin(SubmitTicket(1)));
        assert!(!submission.begin(SubmitTicket(2)));
        assert_eq!(submission.status(), SubmitStatus::Sending);
    }

    #[test]
    fn gate_releases_only_the_claimed_ticket() {
        let mut gate = SubmitGate::default();
        let first = gate.claim().expect("idle gate issues a ticket");

        assert!(!gate.release(SubmitTicket(7)));
        assert!(gate.holds(first));
        assert!(gate.release(first));
        assert!(!gate.release(first));

        let second = gate.claim().expect("released gate issues a ticket");
        assert_ne!(second, first);
    }

    #[test]
    fn failed_attempt_waits_for_manual_resubmit() {
        let mut gate = SubmitGate::default();
        let mut submission = Submission::default();
        let first = gate.claim().expect("idle gate issues a ticket");
        submission.begin(first);
        gate.release(first);
        submission.settle(first, SubmitOutcome::Failed);

        assert_eq!(submission.status(), SubmitStatus::Failed);
        assert!(!submission.expire(first));

        let retry = gate.claim().expect("failed attempt frees the gate");
        assert!(submission.begin(retry));
        assert_eq!(submission.status(), SubmitStatus::Sending);
    }

    #[test]
    fn new_submission_cancels_pending_reset() {
        let mut submission = Submission::default();
        let (first, second) = (SubmitTicket(1), SubmitTicket(2));
        submission.begin(first);
        submission.settle(first, SubmitOutcome::Delivered);

        assert!(submission.begin(second));
        submission.settle(second, SubmitOutcome::Delivered);

        assert!(!submission.expire(first));
        assert!(submission.succeeded());
        assert!(submission.expire(second));
        assert_eq!(submission.status(), SubmitStatus::Idle);
    }

    #[test]
    fn stale_settlement_is_ignored() {
        let mut submission = Submission::default();
        let (first, second) = (SubmitTicket(1), SubmitTicket(2));
        submission.begin(first);
        submission.settle(first, SubmitOutcome::Failed);
        submission.begin(second);

        assert!(!submission.settle(first, SubmitOutcome::Delivered));
        assert!(submission.in_flight());
    }

    #[test]
    fn older_ticket_cannot_restart_after_newer_one() {
        let mut submission = Submission::default();
        submission.begin(SubmitTicket(2));
        submission.settle(SubmitTicket(2), SubmitOutcome::Failed);

        assert!(!submission.begin(SubmitTicket(1)));
        assert!(!submission.begin(SubmitTicket(2)));
        assert_eq!(submission.status(), SubmitStatus::Failed);
    }

    #[tokio::test(start_paused = true)]
    async fn delivered_message_posts_reset_after_delay() {
        let relay = ScriptedRelay::new(Ok(()));
        let gate = RefCell::new(SubmitGate::default());
        let ticket = gate.borrow_mut().claim().expect("idle gate issues a ticket");
        let posted = RefCell::new(Vec::new());
        let started = tokio::time::Instant::now();

        run_submission(
            &relay,
            &gate,
            &test_config(),
            filled_fields(),
            ticket,
            &quiet_logger(),
            tokio::time::sleep,
            |event| posted.borrow_mut().push((event, started.elapsed())),
        )
        .await;

        let posted = posted.into_inner();
        assert_eq!(posted.len(), 2);
        assert_eq!(
            posted[0].0,
            SubmissionEvent::Settled {
                ticket,
                outcome: SubmitOutcome::Delivered,
            }
        );
        assert_eq!(posted[1].0, SubmissionEvent::SuccessExpired(ticket));

        let gap = posted[1].1 - posted[0].1;
        assert!(gap >= SUCCESS_RESET_DELAY);
        assert!(gap < SUCCESS_RESET_DELAY + Duration::from_millis(50));
        assert_eq!(relay.seen.borrow().len(), 1);
        assert!(!gate.borrow().holds(ticket));
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_message_posts_single_failure() {
        let relay = ScriptedRelay::new(Err(RelayError::Rejected { status: 400 }));
        let gate = RefCell::new(SubmitGate::default());
        let ticket = gate.borrow_mut().claim().expect("idle gate issues a ticket");
        let mut posted = Vec::new();

        run_submission(
            &relay,
            &gate,
            &RelayConfig::default(),
            filled_fields(),
            ticket,
            &quiet_logger(),
            tokio::time::sleep,
            |event| posted.push(event),
        )
        .await;

        assert_eq!(
            posted,
            vec![SubmissionEvent::Settled {
                ticket,
                outcome: SubmitOutcome::Failed,
            }]
        );
        assert_eq!(relay.seen.borrow()[0]["service_id"], "");
        assert!(gate.borrow_mut().claim().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn double_submit_from_one_render_sends_once() {
        let relay = ScriptedRelay::new(Ok(()));
        let gate = RefCell::new(SubmitGate::default());
        let mut submission = Submission::default();
        let mut sent_tickets = Vec::new();

        for _ in 0..2 {
            let Some(ticket) = gate.borrow_mut().claim() else {
                continue;
            };
            assert!(submission.begin(ticket));
            sent_tickets.push(ticket);
        }
        assert_eq!(sent_tickets.len(), 1);

        run_submission(
            &relay,
            &gate,
            &test_config(),
            filled_fields(),
            sent_tickets[0],
            &quiet_logger(),
            tokio::time::sleep,
            |event| {
                if let SubmissionEvent::Settled { ticket, outcome } = event {
                    submission.settle(ticket, outcome);
                }
            },
        )
        .await;

        assert_eq!(relay.seen.borrow().len(), 1);
        assert!(submission.succeeded());
    }

    #[tokio::test(start_paused = true)]
    async fn unclaimed_ticket_never_reaches_the_relay() {
        let relay = ScriptedRelay::new(Ok(()));
        let gate = RefCell::new(SubmitGate::default());
        let first = gate.borrow_mut().claim().expect("idle gate issues a ticket");
        gate.borrow_mut().release(first);
        let mut posted = Vec::new();

        for ticket in [first, SubmitTicket(9)] {
            run_submission(
                &relay,
                &gate,
                &test_config(),
                filled_fields(),
                ticket,
                &quiet_logger(),
                tokio::time::sleep,
                |event| posted.push(event),
            )
            .await;
        }

        assert!(relay.seen.borrow().is_empty());
        assert!(posted.is_empty());
    }

    #[test]
    fn relay_error_classes() {
        assert_eq!(RelayError::Transport("offline".into()).class(), "transport");
        assert_eq!(RelayError::Rejected { status: 412 }.class(), "rejected");
        assert_eq!(
            RelayError::Rejected { status: 412 }.to_string(),
            "relay rejected the message with status 412"
        );
    }
}
