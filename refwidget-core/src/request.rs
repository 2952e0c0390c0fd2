//! Builds the widget upsert request. Pure construction: nothing here touches
//! the network.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use refwidget_config::{ApiConfig, IdentityField};

use crate::identity::{Identity, UpsertPayload};

/// Characters left untouched in query values; everything else, `/` included,
/// is percent-encoded.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// A fully built upsert call: target URL and JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetRequest {
    pub url: String,
    pub body: UpsertPayload,
}

/// Build the upsert request for `identity` under the configured tenant.
///
/// The tenant alias and identifiers are interpolated into the path as given.
/// Malformed values produce a malformed URL, which the API answers with an
/// error status.
pub fn build_upsert_request(
    api: &ApiConfig,
    identity: &Identity,
    include: &[IdentityField],
) -> WidgetRequest {
    WidgetRequest {
        url: upsert_url(api, identity),
        body: identity.payload(include),
    }
}

pub fn upsert_url(api: &ApiConfig, identity: &Identity) -> String {
    format!(
        "{base}/api/v1/{tenant}/widget/account/{account}/user/{user}/upsert?widgetType={widget_type}&engagementMedium={medium}",
        base = api.base_url.trim_end_matches('/'),
        tenant = api.tenant_alias,
        account = identity.account_id(),
        user = identity.id(),
        widget_type = utf8_percent_encode(&api.widget_type, QUERY_VALUE),
        medium = utf8_percent_encode(&api.engagement_medium, QUERY_VALUE),
    )
}
