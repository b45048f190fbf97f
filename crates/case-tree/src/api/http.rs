//! HTTP Client
//!
//! `reqwest` implementation of [`CaseApi`] against the case manager backend.

use async_trait::async_trait;
use log::{info, warn};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::wire::{CaseOrder, CaseReparentBody, ErrorBody, MilestoneList, SuiteOrder, SuiteReparentBody};
use super::CaseApi;
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::model::{Case, CaseTree, CaseUpdate, Milestone, NewCase, NewSuite};

/// Characters left as-is in a project code path segment
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Bearer-authenticated JSON client
#[derive(Debug, Clone)]
pub struct HttpCaseApi {
    client: Client,
    config: ClientConfig,
}

impl HttpCaseApi {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    fn project_path(project_code: &str, rest: &str) -> String {
        format!("/{}{}", utf8_percent_encode(project_code, SEGMENT_ENCODE_SET), rest)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.config.endpoint(path));
        match &self.config.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await.map_err(|e| {
            warn!("request failed before a response: {}", e);
            ApiError::from(e)
        })?;
        check_status(response).await
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        Ok(self.send(builder).await?.json::<T>().await?)
    }

    async fn send_unit(&self, builder: RequestBuilder) -> ApiResult<()> {
        self.send(builder).await.map(|_| ())
    }
}

/// Map 401 and other non-2xx responses to errors
async fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        warn!("{} answered 401", response.url());
        return Err(ApiError::Unauthorized);
    }
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unexpected status").to_string());
    warn!("{} answered {}: {}", url, status.as_u16(), message);
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait(?Send)]
impl CaseApi for HttpCaseApi {
    async fn fetch_tree(&self, project_code: &str) -> ApiResult<CaseTree> {
        let path = format!("/projects{}", Self::project_path(project_code, "/cases"));
        self.send_json(self.request(Method::GET, &path)).await
    }

    async fn fetch_milestones(&self, project_code: &str) -> ApiResult<Vec<Milestone>> {
        let path = Self::project_path(project_code, "/milestones");
        let list: MilestoneList = self.send_json(self.request(Method::GET, &path)).await?;
        Ok(list.entities)
    }

    async fn reparent_case(&self, case_id: u32, suite_id: u32) -> ApiResult<()> {
        info!("moving case {} into suite {}", case_id, suite_id);
        let body = CaseReparentBody { test_suite_id: suite_id };
        self.send_unit(self.request(Method::PUT, &format!("/cases/{}", case_id)).json(&body))
            .await
    }

    async fn reorder_cases(&self, project_code: &str, order: &CaseOrder) -> ApiResult<()> {
        info!("reordering suite {} cases: {:?}", order.test_suite_id, order.case_ids());
        let path = Self::project_path(project_code, "/cases/bulk");
        self.send_unit(self.request(Method::PUT, &path).json(order)).await
    }

    async fn reparent_suite(&self, suite_id: u32, parent_id: Option<u32>) -> ApiResult<()> {
        info!("moving suite {} under {:?}", suite_id, parent_id);
        let body = SuiteReparentBody { parent_id };
        self.send_unit(self.request(Method::PUT, &format!("/suites/{}", suite_id)).json(&body))
            .await
    }

    async fn reorder_suites(&self, project_code: &str, order: &SuiteOrder) -> ApiResult<()> {
        info!("reordering children of {:?}: {:?}", order.parent_id, order.suite_ids());
        let path = Self::project_path(project_code, "/suites/bulk");
        self.send_unit(self.request(Method::PUT, &path).json(order)).await
    }

    async fn create_case(&self, case: &NewCase) -> ApiResult<Case> {
        self.send_json(self.request(Method::POST, "/cases").json(case)).await
    }

    async fn update_case(&self, case_id: u32, update: &CaseUpdate) -> ApiResult<Case> {
        self.send_json(self.request(Method::PUT, &format!("/cases/{}", case_id)).json(update))
            .await
    }

    async fn delete_case(&self, case_id: u32) -> ApiResult<()> {
        self.send_unit(self.request(Method::DELETE, &format!("/cases/{}", case_id)))
            .await
    }

    async fn create_suite(&self, suite: &NewSuite) -> ApiResult<()> {
        self.send_unit(self.request(Method::POST, "/suites").json(suite)).await
    }

    async fn delete_suite(&self, suite_id: u32) -> ApiResult<()> {
        self.send_unit(self.request(Method::DELETE, &format!("/suites/{}", suite_id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_code_is_encoded() {
        assert_eq!(HttpCaseApi::project_path("web-app", "/cases"), "/web-app/cases");
        assert_eq!(HttpCaseApi::project_path("a b/c", "/cases"), "/a%20b%2Fc/cases");
    }
}
