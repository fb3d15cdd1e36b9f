//! crates/subscription_core/src/share.rs
//!
//! Encodes dashboard state into a URL query and decodes it back.
//!
//! A link is either durable (only `reportId`, everything else comes from the
//! stored report) or ephemeral (view, metric, step and the active filters
//! carried inline). Decoding never fails: unknown or malformed values are
//! dropped and the field keeps its default.

use url::{form_urlencoded, Url};

use crate::domain::{Metric, Step, ViewMode};
use crate::filter::FilterState;

pub const REPORT_ID_PARAM: &str = "reportId";
const VIEW_PARAM: &str = "view";
const METRIC_PARAM: &str = "metric";
const STEP_PARAM: &str = "step";
const CATEGORY_PARAM: &str = "category";
const BILLING_PARAM: &str = "billing";
const STATUS_PARAM: &str = "status";

/// UI state carried by an ephemeral link. `None` fields were absent or unrecognized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiParams {
    pub view: Option<ViewMode>,
    pub metric: Option<Metric>,
    pub step: Option<Step>,
    pub filters: FilterState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareLink {
    Durable { report_id: String },
    Ephemeral(UiParams),
}

impl Default for ShareLink {
    fn default() -> Self {
        ShareLink::Ephemeral(UiParams::default())
    }
}

/// Serializes a link into a query string (no leading `?`).
pub fn encode_query(link: &ShareLink) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    match link {
        ShareLink::Durable { report_id } => {
            query.append_pair(REPORT_ID_PARAM, report_id);
        }
        ShareLink::Ephemeral(params) => {
            query.append_pair(VIEW_PARAM, params.view.unwrap_or_default().as_str());
            query.append_pair(METRIC_PARAM, params.metric.unwrap_or_default().as_str());
            query.append_pair(STEP_PARAM, params.step.unwrap_or_default().as_str());
            let filters = [
                (CATEGORY_PARAM, &params.filters.category),
                (BILLING_PARAM, &params.filters.billing),
                (STATUS_PARAM, &params.filters.status),
            ];
            for (name, value) in filters {
                if let Some(value) = value {
                    query.append_pair(name, value);
                }
            }
        }
    }
    query.finish()
}

/// Parses a query string (with or without a leading `?`).
///
/// A non-empty `reportId` wins over every other parameter.
pub fn decode_query(query: &str) -> ShareLink {
    let query = query.strip_prefix('?').unwrap_or(query);
    let pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let first = |name: &str| -> Option<String> {
        pairs
            .iter()
            .find(|(k, v)| k == name && !v.is_empty())
            .map(|(_, v)| v.clone())
    };

    if let Some(report_id) = first(REPORT_ID_PARAM) {
        return ShareLink::Durable { report_id };
    }

    let mut params = UiParams {
        view: first(VIEW_PARAM).as_deref().and_then(ViewMode::parse),
        metric: first(METRIC_PARAM).as_deref().and_then(Metric::parse),
        step: first(STEP_PARAM)
            .filter(|s| s == Step::Analytics.as_str())
            .map(|_| Step::Analytics),
        filters: FilterState::default(),
    };
    params.filters.set_category(first(CATEGORY_PARAM));
    params.filters.set_billing(first(BILLING_PARAM));
    params.filters.set_status(first(STATUS_PARAM));

    ShareLink::Ephemeral(params)
}

/// Builds the shareable URL on `base`, replacing any query it already had.
pub fn share_url(base: &Url, link: &ShareLink) -> Url {
    let mut url = base.clone();
    url.set_query(Some(&encode_query(link)));
    url.set_fragment(None);
    url
}

pub fn decode_url(url: &Url) -> ShareLink {
    decode_query(url.query().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durable_link_carries_only_the_report_id() {
        let link = ShareLink::Durable {
            report_id: "0b8f3a2e-8d59-4c1e-9d7c-4d3f0f2b6a11".into(),
        };
        assert_eq!(
            encode_query(&link),
            "reportId=0b8f3a2e-8d59-4c1e-9d7c-4d3f0f2b6a11"
        );
        assert_eq!(decode_query(&encode_query(&link)), link);
    }

    #[test]
    fn report_id_overrides_legacy_parameters() {
        let link = decode_query("?view=swarm&step=2&category=Music&reportId=abc");
        assert_eq!(link, ShareLink::Durable { report_id: "abc".into() });
    }

    #[test]
    fn ephemeral_link_replays_view_and_filters() {
        let link = decode_query("view=bubble&metric=count&step=2&category=Streaming&status=Active");
        let ShareLink::Ephemeral(params) = link else {
            panic!("expected an ephemeral link");
        };
        assert_eq!(params.view, Some(ViewMode::Bubble));
        assert_eq!(params.metric, Some(Metric::Count));
        assert_eq!(params.step, Some(Step::Analytics));
        assert_eq!(params.filters.category.as_deref(), Some("Streaming"));
        assert_eq!(params.filters.billing, None);
        assert_eq!(params.filters.status.as_deref(), Some("Active"));
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let link = decode_query("view=pie&metric=profit&step=3&reportId=&billing=");
        assert_eq!(link, ShareLink::Ephemeral(UiParams::default()));
    }

    #[test]
    fn unrecognized_filter_value_is_kept_verbatim() {
        let ShareLink::Ephemeral(params) = decode_query("category=Podcasts%20%26%20Radio") else {
            panic!("expected an ephemeral link");
        };
        assert_eq!(params.filters.category.as_deref(), Some("Podcasts & Radio"));
    }

    #[test]
    fn share_url_replaces_existing_query() {
        let base = Url::parse("https://subs.example.com/?view=swarm#top").unwrap();
        let mut params = UiParams::default();
        params.filters.set_billing(Some("Annual".into()));
        let url = share_url(&base, &ShareLink::Ephemeral(params.clone()));
        assert_eq!(
            url.as_str(),
            "https://subs.example.com/?view=treemap&metric=revenue&step=1&billing=Annual"
        );
        let ShareLink::Ephemeral(decoded) = decode_url(&url) else {
            panic!("expected an ephemeral link");
        };
        assert_eq!(decoded.filters, params.filters);
        assert_eq!(decoded.step, None, "step=1 is not meaningful on decode");
    }
}
