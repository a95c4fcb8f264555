use std::time::Duration;

use pretty_assertions::assert_eq;
use secret_santa::config::ClientConfig;
use secret_santa::name_check::{
    NameCheckError, NameCheckOutcome, NameCheckRequest, NameCheckResponse, NameChecker,
    RenameContext, RenameForm, RenameTarget, SubmitDecision,
};
use secret_santa::test_util::{MockReply, MockTransport, sample_server_url};
use secret_santa::validity::ValidityError;


const TIMEOUT: Duration = Duration::from_secs(5);

fn checker(transport: MockTransport) -> NameChecker<MockTransport> {
    NameChecker::new(transport, sample_server_url(), TIMEOUT)
}

fn participant_context() -> RenameContext {
    RenameContext {
        exchange_slug: "family-2024".to_owned(),
        old_name: "Bob".to_owned(),
    }
}

fn exchange_request(name: &str) -> NameCheckRequest {
    NameCheckRequest::Exchange { name: name.to_owned(), current_name: None }
}

#[test]
fn exchange_endpoint() {
    let url = exchange_request("Family & Friends").endpoint_url(&sample_server_url()).unwrap();
    assert_eq!(url.path(), "/check_name");
    assert_eq!(
        url.query_pairs().into_owned().collect::<Vec<_>>(),
        vec![("name".to_owned(), "Family & Friends".to_owned())]
    );
}

#[test]
fn participant_endpoint() {
    let request = NameCheckRequest::Participant {
        context: participant_context(),
        new_name: "Bobby".to_owned(),
    };
    let url = request.endpoint_url(&sample_server_url()).unwrap();
    assert_eq!(url.path(), "/check_participant_name");
    assert_eq!(
        url.query(),
        Some("exchangeslug=family-2024&newname=Bobby&oldname=Bob")
    );
}

#[test]
fn endpoint_ignores_base_path() {
    let base = url::Url::parse("http://santa.test/family-2024/Bob/").unwrap();
    let url = exchange_request("x").endpoint_url(&base).unwrap();
    assert_eq!(url.as_str(), "http://santa.test/check_name?name=x");
}

#[test]
fn response_format() {
    let response: NameCheckResponse = serde_json::from_str(r#"{"nameAvailable": true}"#).unwrap();
    assert!(response.name_available);
}

#[test]
fn local_prechecks() {
    assert_eq!(exchange_request("").precheck(), Err(ValidityError::EmptyName));
    assert_eq!(exchange_request("/admin").precheck(), Err(ValidityError::ReservedPrefix));
    let unchanged = NameCheckRequest::Participant {
        context: participant_context(),
        new_name: "Bob".to_owned(),
    };
    assert_eq!(unchanged.precheck(), Err(ValidityError::NameUnchanged));
    let unchanged_exchange = NameCheckRequest::Exchange {
        name: "Family".to_owned(),
        current_name: Some("Family".to_owned()),
    };
    assert_eq!(unchanged_exchange.precheck(), Err(ValidityError::NameUnchanged));
    assert_eq!(exchange_request("Family").precheck(), Ok(()));
}

#[async_std::test]
async fn available_name() {
    let checker = checker(MockTransport::available(true));
    assert_eq!(checker.check(&exchange_request("Family")).await, NameCheckOutcome::Available);
}

#[async_std::test]
async fn taken_name() {
    let checker = checker(MockTransport::available(false));
    assert_eq!(
        checker.check(&exchange_request("Family")).await,
        NameCheckOutcome::Rejected(ValidityError::NameTaken)
    );
}

#[async_std::test]
async fn precheck_skips_server() {
    let transport = MockTransport::available(true);
    let checker = checker(transport);
    assert_eq!(
        checker.check(&exchange_request("/etc")).await,
        NameCheckOutcome::Rejected(ValidityError::ReservedPrefix)
    );
    assert_eq!(
        checker.query(&exchange_request("Family")).await,
        Ok(true),
        "the reply must still be unused"
    );
}

#[async_std::test]
async fn transport_failure() {
    let checker = checker(MockTransport::new([MockReply::Fail("connection refused".to_owned())]));
    let outcome = checker.check(&exchange_request("Family")).await;
    assert_eq!(
        outcome,
        NameCheckOutcome::Failed(NameCheckError::Transport("connection refused".to_owned()))
    );
    assert_eq!(outcome.validity_error(), Some(ValidityError::CheckFailed));
}

#[async_std::test]
async fn hung_server_times_out() {
    let checker = checker(MockTransport::new([MockReply::Hang]));
    assert_eq!(
        checker.check(&exchange_request("Family")).await,
        NameCheckOutcome::Failed(NameCheckError::Timeout(TIMEOUT))
    );
}

#[test]
fn checker_from_config() {
    let config = ClientConfig::default().with_server_url("not a url");
    assert!(matches!(
        NameChecker::from_config(MockTransport::available(true), &config),
        Err(NameCheckError::InvalidUrl(_))
    ));
}

#[async_std::test]
async fn rename_form_submits_available_name() {
    let checker = checker(MockTransport::available(true));
    let mut form = RenameForm::new(RenameTarget::Participant(participant_context()));
    form.set_value("Bobby");
    let request = form.begin_submit().unwrap();
    assert!(form.is_pending());
    let outcome = checker.check(&request).await;
    assert_eq!(form.finish_submit(&outcome), SubmitDecision::Submit);
    assert!(!form.is_pending());
    assert_eq!(form.validity(), None);
}

#[async_std::test]
async fn rename_form_reports_taken_name() {
    let checker = checker(MockTransport::available(false));
    let mut form = RenameForm::new(RenameTarget::Exchange { current_name: None });
    form.set_value("Family");
    let request = form.begin_submit().unwrap();
    let outcome = checker.check(&request).await;
    assert_eq!(
        form.finish_submit(&outcome),
        SubmitDecision::Report(ValidityError::NameTaken)
    );
    assert_eq!(form.validity(), Some(ValidityError::NameTaken));

    // Editing the input clears the message.
    form.set_value("Family 2");
    assert_eq!(form.validity(), None);
}

#[test]
fn rename_form_never_overlaps_checks() {
    let mut form = RenameForm::new(RenameTarget::Exchange { current_name: None });
    form.set_value("Family");
    assert!(form.begin_submit().is_some());
    assert_eq!(form.begin_submit(), None);
    form.finish_submit(&NameCheckOutcome::Failed(NameCheckError::Timeout(TIMEOUT)));
    assert!(form.begin_submit().is_some());
}

#[test]
fn rename_form_retries_after_failed_check() {
    let mut form = RenameForm::new(RenameTarget::Exchange { current_name: None });
    form.set_value("Family");
    assert!(form.begin_submit().is_some());
    assert_eq!(
        form.finish_submit(&NameCheckOutcome::Failed(NameCheckError::Timeout(TIMEOUT))),
        SubmitDecision::Report(ValidityError::CheckFailed)
    );
    assert_eq!(form.value(), "Family");
    assert_eq!(form.validity(), None);
    let request = form.begin_submit().unwrap();
    assert_eq!(request.candidate(), "Family");
}
