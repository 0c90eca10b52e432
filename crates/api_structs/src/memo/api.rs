use crate::dtos::MemoDTO;
use duewatch_domain::{Memo, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoResponse {
    pub memo: MemoDTO,
}

impl MemoResponse {
    pub fn new(memo: Memo, now: i64) -> Self {
        Self {
            memo: MemoDTO::new(memo, now),
        }
    }
}

#[derive(Deserialize, Serialize)]
pub struct MemoPathParams {
    pub memo_id: ID,
}

pub mod create_memo {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        #[serde(default)]
        pub description: String,
        pub recipient: String,
        #[serde(default, alias = "dueDate", alias = "due_date")]
        pub deadline: Option<i64>,
        #[serde(default, alias = "reminder_minutes")]
        pub reminder_minutes: Option<i64>,
    }

    pub type APIResponse = MemoResponse;
}

pub mod get_memo {
    use super::*;

    pub type PathParams = MemoPathParams;

    pub type APIResponse = MemoResponse;
}

pub mod get_memos {
    use super::*;
    use duewatch_domain::{MemoFilter, MemoStats};

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub status: Option<MemoFilter>,
        pub page: Option<usize>,
        #[serde(alias = "page_size")]
        pub page_size: Option<usize>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub memos: Vec<MemoDTO>,
        /// Counts over all memos, regardless of the filter
        pub stats: MemoStats,
        pub page: usize,
        pub page_size: usize,
        pub total: usize,
        pub total_pages: usize,
    }
}

pub mod update_memo {
    use super::*;
    use duewatch_domain::MemoState;

    pub type PathParams = MemoPathParams;

    #[derive(Deserialize, Serialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub title: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub recipient: Option<String>,
        #[serde(default, alias = "dueDate", alias = "due_date")]
        pub deadline: Option<i64>,
        #[serde(default, alias = "reminder_minutes")]
        pub reminder_minutes: Option<i64>,
        #[serde(default)]
        pub state: Option<MemoState>,
    }

    pub type APIResponse = MemoResponse;
}

pub mod delete_memo {
    use super::*;

    pub type PathParams = MemoPathParams;

    pub type APIResponse = MemoResponse;
}

pub mod postpone_memo {
    use super::*;

    pub type PathParams = MemoPathParams;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub days: i64,
    }

    pub type APIResponse = MemoResponse;
}
