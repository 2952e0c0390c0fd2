use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use refwidget_config::Credentials;

/// `Authorization` header value: `Basic base64(account_sid:api_key)`.
pub fn basic_authorization(credentials: &Credentials) -> String {
    let raw = format!(
        "{}:{}",
        credentials.account_sid.expose(),
        credentials.api_key.expose()
    );
    format!("Basic {}", STANDARD.encode(raw))
}
