use adsam::error::LoginError;
use adsam::idp::{Credentials, IdentityProvider, adfs::AdfsProvider};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RELYING_PARTY: &str = "urn:amazon:webservices";
const ASSERTION: &str = "PHNhbWxwOlJlc3BvbnNlPg==";

fn login_page(action: &str) -> String {
    format!(
        r#"<html><body>
            <form id="loginForm" action="{action}" method="post">
                <input name="UserName" type="email" value="" />
                <input name="Password" type="password" value="" />
                <input name="AuthMethod" type="hidden" value="FormsAuthentication" />
            </form>
        </body></html>"#
    )
}

fn assertion_page() -> String {
    format!(
        r#"<html><body>
            <form action="https://signin.aws.amazon.com/saml" method="post">
                <input type="hidden" name="SAMLResponse" value="{ASSERTION}" />
                <input type="submit" value="Continue" />
            </form>
        </body></html>"#
    )
}

fn credentials(hostname: String) -> Credentials {
    Credentials {
        username: "alice".to_string(),
        password: "s3cr3t".to_string(),
        hostname,
    }
}

async fn mount_sign_on_page(server: &MockServer, page: String) {
    Mock::given(method("GET"))
        .and(path("/adfs/ls/IdpInitiatedSignOn.aspx"))
        .and(query_param("loginToRp", RELYING_PARTY))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "MSISSamlRequest=session-abc123; Path=/; HttpOnly")
                .set_body_string(page),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_login_round_trip_returns_assertion() {
    let server = MockServer::start().await;
    mount_sign_on_page(&server, login_page("/adfs/ls/")).await;

    Mock::given(method("POST"))
        .and(path("/adfs/ls/"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("UserName=alice"))
        .and(body_string_contains("Password=s3cr3t"))
        .and(body_string_contains("AuthMethod=FormsAuthentication"))
        .respond_with(ResponseTemplate::new(200).set_body_string(assertion_page()))
        .expect(1)
        .mount(&server)
        .await;

    let idp = IdentityProvider::Adfs(AdfsProvider::new(RELYING_PARTY.to_string()));
    let assertion = idp.login(&credentials(server.uri())).await.unwrap();

    assert_eq!(assertion, ASSERTION);
}

#[tokio::test]
async fn test_login_replays_session_cookie_on_post() {
    let server = MockServer::start().await;
    mount_sign_on_page(&server, login_page("/adfs/ls/")).await;

    // The cookie set on the GET response must come back on the POST,
    // or AD FS loses the sign-on session.
    Mock::given(method("POST"))
        .and(path("/adfs/ls/"))
        .and(header("cookie", "MSISSamlRequest=session-abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(assertion_page()))
        .expect(1)
        .mount(&server)
        .await;

    let provider = AdfsProvider::new(RELYING_PARTY.to_string());
    provider.login(&credentials(server.uri())).await.unwrap();
}

#[tokio::test]
async fn test_login_follows_absolute_form_action() {
    let server = MockServer::start().await;
    let action = format!("{}/adfs/ls/submit", server.uri());
    mount_sign_on_page(&server, login_page(&action)).await;

    Mock::given(method("POST"))
        .and(path("/adfs/ls/submit"))
        .respond_with(ResponseTemplate::new(200).set_body_string(assertion_page()))
        .expect(1)
        .mount(&server)
        .await;

    let provider = AdfsProvider::new(RELYING_PARTY.to_string());
    provider.login(&credentials(server.uri())).await.unwrap();
}

#[tokio::test]
async fn test_login_fails_when_sign_on_page_has_no_form() {
    let server = MockServer::start().await;
    mount_sign_on_page(
        &server,
        "<html><body><p>Service unavailable</p></body></html>".to_string(),
    )
    .await;

    let provider = AdfsProvider::new(RELYING_PARTY.to_string());
    let err = provider.login(&credentials(server.uri())).await.unwrap_err();

    assert!(matches!(err, LoginError::NotFound("login form")));
}

#[tokio::test]
async fn test_login_fails_when_result_page_has_no_assertion() {
    let server = MockServer::start().await;
    mount_sign_on_page(&server, login_page("/adfs/ls/")).await;

    // Wrong credentials: AD FS re-renders the sign-on form instead of the
    // assertion page. Must fail, not return an empty string.
    Mock::given(method("POST"))
        .and(path("/adfs/ls/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(login_page("/adfs/ls/")))
        .mount(&server)
        .await;

    let provider = AdfsProvider::new(RELYING_PARTY.to_string());
    let err = provider.login(&credentials(server.uri())).await.unwrap_err();

    assert!(matches!(err, LoginError::NotFound("SAML response")));
}

#[tokio::test]
async fn test_login_surfaces_transport_errors() {
    // Nothing is listening on this port
    let provider = AdfsProvider::new(RELYING_PARTY.to_string());
    let err = provider
        .login(&credentials("http://127.0.0.1:9".to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, LoginError::Transport(_)));
}
