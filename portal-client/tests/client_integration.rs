use std::sync::Arc;

use payment_form::FormSession;
use payment_form::traits::{DirectoryService, OrderGateway, PortalShell, PromoVerifier};
use portal_client::{ClientError, PortalClient, PortalConfig};
use shared::ErrorCode;

struct NullShell;

#[async_trait::async_trait]
impl PortalShell for NullShell {
    async fn navigate(&self, _url: &str) {}
}

#[test]
fn test_client_construction() {
    let config = PortalConfig::new("https://portal.example.com/api/").with_timeout(5);
    let client = PortalClient::new(&config);
    assert_eq!(client.base_url(), "https://portal.example.com/api/");
}

#[test]
fn test_client_serves_every_engine_seam() {
    let client = Arc::new(PortalClient::new(&PortalConfig::default()));
    let _directory: Arc<dyn DirectoryService> = client.clone();
    let _promo: Arc<dyn PromoVerifier> = client.clone();
    let _gateway: Arc<dyn OrderGateway> = client;
}

#[test]
fn test_session_wires_up_from_one_client() {
    let config = PortalConfig::default().with_return_urls("https://p/ok", "https://p/fail");
    let client = Arc::new(PortalClient::new(&config));

    let session = FormSession::new(
        client.clone(),
        client.clone(),
        client,
        Arc::new(NullShell),
        config.return_urls(),
    );

    assert!(!session.submitting());
    assert!(session.department().is_none());
}

#[tokio::test]
async fn test_unreachable_backend_surfaces_as_http_error() {
    // Nothing listens on the discard port, connect is refused immediately
    let config = PortalConfig::new("http://127.0.0.1:9").with_timeout(2);
    let client = PortalClient::new(&config);

    let err = client.departments().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_backend_maps_to_directory_unavailable() {
    let config = PortalConfig::new("http://127.0.0.1:9").with_timeout(2);
    let client = Arc::new(PortalClient::new(&config));
    let directory: Arc<dyn DirectoryService> = client;

    let err = directory.list_departments().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::DirectoryUnavailable);
}

#[tokio::test]
async fn test_submit_against_dead_backend_reopens_gate() {
    let config = PortalConfig::new("http://127.0.0.1:9").with_timeout(2);
    let client = Arc::new(PortalClient::new(&config));
    let mut session = FormSession::new(
        client.clone(),
        client.clone(),
        client,
        Arc::new(NullShell),
        config.return_urls(),
    );

    session.select_department(shared::models::Department {
        id: "dep-1".to_string(),
        name: "Tuition".to_string(),
        department_type: shared::models::DepartmentType::SelfPay,
        additional_fields: Default::default(),
    });
    session.set_fullname("Aigerim Bekova");
    session.set_email("aigerim@example.com");
    session.set_cellphone("+7 701 555 0101");
    session.set_amount(2500.0);

    let err = session.submit().await.unwrap_err();
    assert_ne!(err.code, ErrorCode::SubmissionInFlight);
    assert!(!session.submitting());

    // The gate reopened, a retry reaches the network again
    let err = session.submit().await.unwrap_err();
    assert_ne!(err.code, ErrorCode::SubmissionInFlight);
}
