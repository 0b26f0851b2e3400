// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Blocking HTTP implementation of [`TicketSource`].

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::HelpdeskSettings;
use crate::error::{Error, Result};

use super::source::{ReplyList, TicketPage, TicketQuery, TicketSource};

/// Ticket source backed by the helpdesk REST API.
pub struct HttpTicketSource {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpTicketSource {
    /// Build a client for the configured helpdesk.
    pub fn new(settings: &HelpdeskSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(settings.timeout)
            .default_headers(headers)
            .build()?;

        Ok(HttpTicketSource {
            client,
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
        })
    }

    pub fn tickets_url(&self) -> String {
        format!("{}/tickets", self.base_url)
    }

    pub fn replies_url(&self, ticket_id: i64) -> String {
        format!("{}/tickets/{}/replies", self.base_url, ticket_id)
    }

    fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&'static str, String)],
        resource: String,
    ) -> Result<T> {
        tracing::debug!(%resource, "GET {}", url);
        let response = self
            .client
            .get(url)
            .query(&[("auth_token", self.api_key.as_str())])
            .query(params)
            .send()
            .map_err(|e| transport(&resource, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::Fetch {
                resource,
                status: status.as_u16(),
            });
        }
        response.json().map_err(|e| transport(&resource, e))
    }
}

/// Transport failures drop the request URL, which carries the API key.
fn transport(resource: &str, error: reqwest::Error) -> Error {
    Error::Transport {
        resource: resource.to_string(),
        source: error.without_url(),
    }
}

impl TicketSource for HttpTicketSource {
    fn fetch_tickets(&mut self, query: &TicketQuery) -> Result<TicketPage> {
        let resource = format!("GET /tickets page {}", query.page);
        self.get(&self.tickets_url(), &query.to_params(), resource)
    }

    fn fetch_replies(&mut self, ticket_id: i64) -> Result<Vec<Value>> {
        let resource = format!("GET /tickets/{ticket_id}/replies");
        let list: ReplyList = self.get(&self.replies_url(ticket_id), &[], resource)?;
        Ok(list.replies)
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
