use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::constants::SAML_RESPONSE_FIELD;
use crate::error::LoginError;
use crate::idp::Credentials;

static FORM_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("form").expect("static selector"));

static INPUT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("input").expect("static selector"));

static SAML_INPUT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(&format!(r#"input[name="{SAML_RESPONSE_FIELD}"]"#)).expect("static selector")
});

/// One discovered `<input>` element. Missing attributes read as empty
/// strings; names may be empty or duplicated across a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub value: String,
}

/// The scraped sign-on page: the first form's `action` attribute and every
/// input element in the document.
#[derive(Debug, Clone)]
pub struct LoginPage {
    pub action: String,
    pub inputs: Vec<FormInput>,
}

/// Locate the sign-on form and collect the page's input elements.
///
/// Inputs are collected document-wide rather than scoped to the form: some
/// AD FS themes render hidden inputs outside the form element.
pub fn scrape_login_page(body: &str) -> Result<LoginPage, LoginError> {
    let document = Html::parse_document(body);

    let form = document
        .select(&FORM_SELECTOR)
        .next()
        .ok_or(LoginError::NotFound("login form"))?;

    let inputs = document
        .select(&INPUT_SELECTOR)
        .map(|input| FormInput {
            name: input.attr("name").unwrap_or_default().to_string(),
            value: input.attr("value").unwrap_or_default().to_string(),
        })
        .collect();

    Ok(LoginPage {
        action: form.attr("action").unwrap_or_default().to_string(),
        inputs,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Password,
    Username,
    Passthrough,
}

/// Ordered classification rules, evaluated top to bottom against the
/// lower-cased field name. No match means the field keeps its own value.
const FIELD_RULES: &[(&str, FieldKind)] = &[
    ("password", FieldKind::Password),
    ("username", FieldKind::Username),
];

fn classify(name: &str) -> FieldKind {
    let name = name.to_ascii_lowercase();
    FIELD_RULES
        .iter()
        .find(|(needle, _)| name.contains(needle))
        .map_or(FieldKind::Passthrough, |&(_, kind)| kind)
}

/// Build the url-encoded submission payload from the discovered inputs.
///
/// Credential fields are matched heuristically by name; every other field
/// passes its own value through unchanged (hidden state such as CSRF tokens
/// or `AuthMethod`). A duplicated name keeps the position of its first
/// occurrence and the value of its last. A form with no recognizable
/// username or password field cannot carry a login, so that is an error
/// rather than a silent empty injection.
pub fn build_payload(
    inputs: &[FormInput],
    credentials: &Credentials,
) -> Result<Vec<(String, String)>, LoginError> {
    let mut payload: Vec<(String, String)> = Vec::with_capacity(inputs.len());
    let mut has_username = false;
    let mut has_password = false;

    for input in inputs {
        let value = match classify(&input.name) {
            FieldKind::Password => {
                has_password = true;
                credentials.password.clone()
            }
            FieldKind::Username => {
                has_username = true;
                credentials.username.clone()
            }
            FieldKind::Passthrough => input.value.clone(),
        };

        match payload.iter_mut().find(|(name, _)| *name == input.name) {
            Some(slot) => slot.1 = value,
            None => payload.push((input.name.clone(), value)),
        }
    }

    if !has_username {
        return Err(LoginError::NotFound("username field in login form"));
    }
    if !has_password {
        return Err(LoginError::NotFound("password field in login form"));
    }

    Ok(payload)
}

/// Extract the base64 SAML assertion from the page returned by the form
/// submission. A matching input without a `value` attribute counts as
/// missing: an empty assertion is never reported as success.
pub fn scrape_saml_response(body: &str) -> Result<String, LoginError> {
    let document = Html::parse_document(body);

    document
        .select(&SAML_INPUT_SELECTOR)
        .next()
        .and_then(|input| input.attr("value"))
        .map(str::to_string)
        .ok_or(LoginError::NotFound("SAML response"))
}
