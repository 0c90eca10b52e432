use crate::dtos::MonitorDTO;
use duewatch_domain::{Monitor, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorResponse {
    pub monitor: MonitorDTO,
}

impl MonitorResponse {
    pub fn new(monitor: Monitor, now: i64) -> Self {
        Self {
            monitor: MonitorDTO::new(monitor, now),
        }
    }
}

#[derive(Deserialize, Serialize)]
pub struct MonitorPathParams {
    pub monitor_id: ID,
}

pub mod create_monitor {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub name: String,
        #[serde(alias = "download_url")]
        pub download_url: String,
        pub recipient: String,
        #[serde(default, alias = "version_label", alias = "version")]
        pub version_label: String,
    }

    pub type APIResponse = MonitorResponse;
}

pub mod get_monitor {
    use super::*;

    pub type PathParams = MonitorPathParams;

    pub type APIResponse = MonitorResponse;
}

pub mod get_monitors {
    use super::*;
    use duewatch_domain::MonitorStats;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub monitors: Vec<MonitorDTO>,
        pub stats: MonitorStats,
    }
}

pub mod update_monitor {
    use super::*;

    pub type PathParams = MonitorPathParams;

    #[derive(Deserialize, Serialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default, alias = "download_url")]
        pub download_url: Option<String>,
        #[serde(default)]
        pub recipient: Option<String>,
        #[serde(default, alias = "version_label", alias = "version")]
        pub version_label: Option<String>,
        #[serde(default)]
        pub enabled: Option<bool>,
    }

    pub type APIResponse = MonitorResponse;
}

pub mod delete_monitor {
    use super::*;

    pub type PathParams = MonitorPathParams;

    pub type APIResponse = MonitorResponse;
}

pub mod postpone_monitor {
    use super::*;

    pub type PathParams = MonitorPathParams;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub days: i64,
    }

    pub type APIResponse = MonitorResponse;
}

pub mod check_monitors {
    use crate::dtos::CheckReportDTO;

    pub type APIResponse = CheckReportDTO;
}

pub mod check_monitor {
    use super::*;
    use crate::dtos::CheckReportDTO;

    pub type PathParams = MonitorPathParams;

    pub type APIResponse = CheckReportDTO;
}

pub mod get_monitor_logs {
    use super::*;
    use crate::dtos::VerificationLogDTO;

    pub type PathParams = MonitorPathParams;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub page: Option<usize>,
        #[serde(alias = "page_size")]
        pub page_size: Option<usize>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub logs: Vec<VerificationLogDTO>,
        pub page: usize,
        pub page_size: usize,
        pub total: usize,
        pub total_pages: usize,
    }
}
