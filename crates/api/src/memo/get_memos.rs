use super::subscribers::DispatchRemindersOnMemosListed;
use crate::error::DuewatchError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use duewatch_api_structs::dtos::MemoDTO;
use duewatch_api_structs::get_memos::*;
use duewatch_domain::{DeriveStatus, Memo, MemoFilter, MemoStats};
use duewatch_infra::{DuewatchContext, Page, PageQuery};

const DEFAULT_PAGE_SIZE: usize = 100;

fn handle_error(e: UseCaseError) -> DuewatchError {
    match e {
        UseCaseError::StorageError => DuewatchError::InternalError,
    }
}

pub async fn get_memos_controller(
    query: web::Query<QueryParams>,
    ctx: web::Data<DuewatchContext>,
) -> Result<HttpResponse, DuewatchError> {
    let now = ctx.sys.get_timestamp_millis();
    let usecase = GetMemosUseCase {
        filter: query.status.unwrap_or_default(),
        page: PageQuery::new(query.page, query.page_size, DEFAULT_PAGE_SIZE),
        now,
    };

    execute(usecase, &ctx)
        .await
        .map(|listing| {
            let total_pages = listing.memos.total_pages();
            let page = listing.memos.map(|memo| MemoDTO::new(memo, now));
            HttpResponse::Ok().json(APIResponse {
                memos: page.items,
                stats: listing.stats,
                page: page.page,
                page_size: page.page_size,
                total: page.total,
                total_pages,
            })
        })
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct GetMemosUseCase {
    pub filter: MemoFilter,
    pub page: PageQuery,
    pub now: i64,
}

#[derive(Debug)]
pub struct MemoListing {
    /// Memos matching the filter, ordered by deadline
    pub memos: Page<Memo>,
    /// Counts over every memo
    pub stats: MemoStats,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetMemosUseCase {
    type Response = MemoListing;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &DuewatchContext) -> Result<Self::Response, Self::Errors> {
        let memos = ctx
            .repos
            .memos
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let now = self.now;
        let stats = MemoStats::tally(memos.iter().map(|memo| memo.status(now)));
        let filter = self.filter;
        let matching = memos
            .into_iter()
            .filter(|memo| filter.accepts(memo.status(now)))
            .collect::<Vec<_>>();

        Ok(MemoListing {
            memos: Page::from_all(matching, self.page),
            stats,
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(DispatchRemindersOnMemosListed)]
    }
}
