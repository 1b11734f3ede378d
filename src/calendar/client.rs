use super::models::{CalendarEvent, TitleFilter};
use super::time::{format_query_date, month_bounds, year_bounds};
use crate::config::Config;
use crate::error::{calendar_error, CalResult};
use chrono::{Duration, Local, NaiveDate};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;
use url::Url;

/// Client for the borough DPCalendar events endpoint.
///
/// Stateless beyond the configured session and title filter; every call
/// fetches fresh data and returns it to the caller.
#[derive(Debug, Clone)]
pub struct CalendarClient {
    client: Client,
    base_api: String,
    headers: HeaderMap,
    filter: TitleFilter,
}

impl CalendarClient {
    /// Create a client with a fresh HTTP session and no title filter
    pub fn new(base_api: impl Into<String>) -> Self {
        Self::with_session(base_api, None, None)
    }

    /// Create a client reusing an existing session and filtering titles.
    ///
    /// The session is used as-is; any timeout the caller wants must already
    /// be configured on it. Filter words are expected in lowercase.
    pub fn with_session(
        base_api: impl Into<String>,
        session: Option<Client>,
        filter: Option<Vec<String>>,
    ) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Self {
            client: session.unwrap_or_default(),
            base_api: base_api.into(),
            headers,
            filter: TitleFilter::new(filter.unwrap_or_default()),
        }
    }

    /// Create a client from the application config
    pub fn from_config(config: &Config, session: Option<Client>) -> Self {
        Self::with_session(
            config.base_url.clone(),
            session,
            Some(config.title_filter.clone()),
        )
    }

    /// Fetch the raw events payload for an inclusive date range.
    ///
    /// Whether `date_start <= date_end` holds is the caller's concern; the
    /// range is passed to the API as-is. The returned body keeps the
    /// document's key order.
    pub async fn get_items(
        &self,
        date_start: NaiveDate,
        date_end: NaiveDate,
        item_id: u32,
        limit: u32,
    ) -> CalResult<Value> {
        let query = build_query(date_start, date_end, item_id, limit);
        let response = self
            .call_api(Method::GET, &self.base_api, &query, None)
            .await?;

        let body: Value = response.json().await?;
        Ok(body)
    }

    /// Titles of today's matching events
    pub async fn get_todays_items(&self, item_id: u32, limit: u32) -> CalResult<Vec<String>> {
        self.items_on(Local::now().date_naive(), item_id, limit)
            .await
    }

    /// Titles of tomorrow's matching events
    pub async fn get_tomorrows_items(&self, item_id: u32, limit: u32) -> CalResult<Vec<String>> {
        self.items_on(Local::now().date_naive() + Duration::days(1), item_id, limit)
            .await
    }

    /// Matching titles for the current year, grouped by start date
    pub async fn get_the_years_items(
        &self,
        item_id: u32,
        limit: u32,
    ) -> CalResult<BTreeMap<NaiveDate, Vec<String>>> {
        let (first, last) = year_bounds(Local::now().date_naive())
            .ok_or_else(|| calendar_error("Failed to compute year bounds"))?;

        let body = self.get_items(first, last, item_id, limit).await?;
        titles_by_date(&body, &self.filter)
    }

    /// Fetch the month around `anchor` and keep titles starting on it
    async fn items_on(
        &self,
        anchor: NaiveDate,
        item_id: u32,
        limit: u32,
    ) -> CalResult<Vec<String>> {
        let (first, last) = month_bounds(anchor)
            .ok_or_else(|| calendar_error("Failed to compute month bounds"))?;

        let body = self.get_items(first, last, item_id, limit).await?;
        titles_on(&body, anchor, &self.filter)
    }

    /// Issue a request with the stored headers merged with per-call overrides
    async fn call_api(
        &self,
        method: Method,
        url: &str,
        query: &[(String, String)],
        extra_headers: Option<HeaderMap>,
    ) -> CalResult<reqwest::Response> {
        let mut url = Url::parse(url)?;
        for (key, value) in query {
            url.query_pairs_mut().append_pair(key, value);
        }

        let mut headers = self.headers.clone();
        if let Some(extra) = extra_headers {
            headers.extend(extra);
        }

        debug!("Requesting {}", url);

        let response = self
            .client
            .request(method, url)
            .headers(headers)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(calendar_error(&format!(
                "Failed to fetch events: HTTP {} - {}",
                status, error_body
            )));
        }

        Ok(response)
    }
}

/// Query parameters for the events view, dates formatted as the API expects
pub fn build_query(
    date_start: NaiveDate,
    date_end: NaiveDate,
    item_id: u32,
    limit: u32,
) -> Vec<(String, String)> {
    vec![
        ("option".to_string(), "com_dpcalendar".to_string()),
        ("view".to_string(), "events".to_string()),
        ("format".to_string(), "raw".to_string()),
        ("limit".to_string(), limit.to_string()),
        ("ItemId".to_string(), item_id.to_string()),
        ("date-start".to_string(), format_query_date(date_start)),
        ("date-end".to_string(), format_query_date(date_end)),
    ]
}

/// Events from the `data` array of a response body
fn events_in(body: &Value) -> CalResult<Vec<CalendarEvent>> {
    let entries = body
        .get("data")
        .and_then(|d| d.as_array())
        .ok_or_else(|| calendar_error("No data in response"))?;

    entries.iter().map(CalendarEvent::from_value).collect()
}

/// Titles of events starting on `anchor` that pass the filter
pub fn titles_on(body: &Value, anchor: NaiveDate, filter: &TitleFilter) -> CalResult<Vec<String>> {
    let mut titles = Vec::new();
    for event in events_in(body)? {
        if event.start_date()? == anchor && filter.matches(&event.title) {
            titles.push(event.title);
        }
    }
    Ok(titles)
}

/// Titles passing the filter, grouped by start date. Events whose title
/// fails the filter are dropped entirely, never left as an empty key.
pub fn titles_by_date(
    body: &Value,
    filter: &TitleFilter,
) -> CalResult<BTreeMap<NaiveDate, Vec<String>>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();
    for event in events_in(body)? {
        let date = event.start_date()?;
        if filter.matches(&event.title) {
            grouped.entry(date).or_default().push(event.title);
        }
    }
    Ok(grouped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_build_query() {
        let query = build_query(date(2023, 1, 1), date(2023, 1, 31), 965, 0);

        let pairs: Vec<(&str, &str)> = query
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("option", "com_dpcalendar"),
                ("view", "events"),
                ("format", "raw"),
                ("limit", "0"),
                ("ItemId", "965"),
                ("date-start", "2023-01-01T00:00:00"),
                ("date-end", "2023-01-31T00:00:00"),
            ]
        );
    }

    #[test]
    fn test_titles_on_filters_by_date_and_title() {
        let body = json!({
            "data": [
                { "title": "Boroughwide Cleanup", "start": "2023-01-01T10:00:00" },
                { "title": "Rec Meeting", "start": "2023-01-01T19:00:00" },
                { "title": "Boroughwide Paper Drive", "start": "2023-01-08T09:00:00" },
            ]
        });

        let filter = TitleFilter::new(vec!["boroughwide".to_string()]);
        let titles = titles_on(&body, date(2023, 1, 1), &filter).unwrap();
        assert_eq!(titles, vec!["Boroughwide Cleanup".to_string()]);

        // Without a filter both events on the anchor date come back
        let titles = titles_on(&body, date(2023, 1, 1), &TitleFilter::default()).unwrap();
        assert_eq!(
            titles,
            vec!["Boroughwide Cleanup".to_string(), "Rec Meeting".to_string()]
        );

        // No events on the anchor date
        let titles = titles_on(&body, date(2023, 1, 2), &TitleFilter::default()).unwrap();
        assert!(titles.is_empty());
    }

    #[test]
    fn test_titles_by_date_groups_and_filters() {
        let body = json!({
            "data": [
                { "title": "Boroughwide Cleanup", "start": "2023-01-01T10:00:00" },
                { "title": "Rec Meeting", "start": "2023-01-01T10:00:00" },
            ]
        });

        let filter = TitleFilter::new(vec!["boroughwide".to_string()]);
        let grouped = titles_by_date(&body, &filter).unwrap();

        // The failing title is dropped, not kept as an empty placeholder
        assert_eq!(grouped.len(), 1);
        assert_eq!(
            grouped.get(&date(2023, 1, 1)).unwrap(),
            &vec!["Boroughwide Cleanup".to_string()]
        );
    }

    #[test]
    fn test_titles_by_date_multiple_days() {
        let body = json!({
            "data": [
                { "title": "Council Meeting", "start": "2023-03-14T19:30:00" },
                { "title": "Council Meeting", "start": "2023-04-11T19:30:00" },
                { "title": "Shredding Day", "start": "2023-04-11T09:00:00" },
            ]
        });

        let grouped = titles_by_date(&body, &TitleFilter::default()).unwrap();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped.get(&date(2023, 3, 14)).unwrap().len(), 1);
        assert_eq!(
            grouped.get(&date(2023, 4, 11)).unwrap(),
            &vec!["Council Meeting".to_string(), "Shredding Day".to_string()]
        );
    }

    #[test]
    fn test_malformed_payloads_error() {
        let filter = TitleFilter::default();

        // No data key at all
        assert!(titles_by_date(&json!({ "messages": [] }), &filter).is_err());

        // Entry missing its title
        let body = json!({ "data": [ { "start": "2023-01-01T10:00:00" } ] });
        assert!(titles_on(&body, date(2023, 1, 1), &filter).is_err());

        // Entry with an unparsable start
        let body = json!({ "data": [ { "title": "Rec Meeting", "start": "soon" } ] });
        assert!(titles_by_date(&body, &filter).is_err());
    }
}
