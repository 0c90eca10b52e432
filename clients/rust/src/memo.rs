use crate::{APIResponse, BaseClient};
use duewatch_api_structs::*;
use duewatch_domain::{MemoFilter, MemoState, ID};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct MemoClient {
    base: Arc<BaseClient>,
}

pub struct CreateMemoInput {
    pub title: String,
    pub description: String,
    pub recipient: String,
    /// Required by the server, left as an option to exercise validation
    pub deadline: Option<i64>,
    pub reminder_minutes: Option<i64>,
}

#[derive(Default)]
pub struct UpdateMemoInput {
    pub memo_id: ID,
    pub title: Option<String>,
    pub description: Option<String>,
    pub recipient: Option<String>,
    pub deadline: Option<i64>,
    pub reminder_minutes: Option<i64>,
    pub state: Option<MemoState>,
}

#[derive(Default)]
pub struct GetMemosInput {
    pub status: Option<MemoFilter>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl GetMemosInput {
    fn to_query_string(&self) -> String {
        let mut params = Vec::new();
        if let Some(status) = &self.status {
            params.push(format!("status={}", status.as_str()));
        }
        if let Some(page) = self.page {
            params.push(format!("page={}", page));
        }
        if let Some(page_size) = self.page_size {
            params.push(format!("pageSize={}", page_size));
        }
        params.join("&")
    }
}

impl MemoClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, input: CreateMemoInput) -> APIResponse<create_memo::APIResponse> {
        let body = create_memo::RequestBody {
            title: input.title,
            description: input.description,
            recipient: input.recipient,
            deadline: input.deadline,
            reminder_minutes: input.reminder_minutes,
        };
        self.base
            .post(body, "memos".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, memo_id: ID) -> APIResponse<get_memo::APIResponse> {
        self.base
            .get(format!("memos/{}", memo_id), StatusCode::OK)
            .await
    }

    pub async fn list(&self, input: GetMemosInput) -> APIResponse<get_memos::APIResponse> {
        self.base
            .get(format!("memos?{}", input.to_query_string()), StatusCode::OK)
            .await
    }

    pub async fn update(&self, input: UpdateMemoInput) -> APIResponse<update_memo::APIResponse> {
        let body = update_memo::RequestBody {
            title: input.title,
            description: input.description,
            recipient: input.recipient,
            deadline: input.deadline,
            reminder_minutes: input.reminder_minutes,
            state: input.state,
        };
        self.base
            .put(body, format!("memos/{}", input.memo_id), StatusCode::OK)
            .await
    }

    pub async fn delete(&self, memo_id: ID) -> APIResponse<delete_memo::APIResponse> {
        self.base
            .delete(format!("memos/{}", memo_id), StatusCode::OK)
            .await
    }

    pub async fn postpone(
        &self,
        memo_id: ID,
        days: i64,
    ) -> APIResponse<postpone_memo::APIResponse> {
        let body = postpone_memo::RequestBody { days };
        self.base
            .post(body, format!("memos/{}/postpone", memo_id), StatusCode::OK)
            .await
    }
}
