use duewatch_infra::DuewatchContext;
use futures::future::join_all;
use std::fmt::Debug;
use tracing::error;

/// Follow-up work run after a use case succeeded, e.g. delivering a memo
/// reminder that became due when the memo was read. Failures stay inside
/// the subscriber and never change the use case's response.
#[async_trait::async_trait(?Send)]
pub trait Subscriber<U: UseCase> {
    async fn notify(&self, e: &U::Response, ctx: &DuewatchContext);
}

/// One memo or monitor operation. Handlers build it from the request and
/// hand it to `execute`, the scheduler jobs do the same with their sweeps.
#[async_trait::async_trait(?Send)]
pub trait UseCase: Debug {
    type Response;
    type Errors;

    async fn execute(&mut self, ctx: &DuewatchContext) -> Result<Self::Response, Self::Errors>;

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        Default::default()
    }
}

/// Runs the use case, then its subscribers concurrently when it succeeded
#[tracing::instrument(name = "Executing usecase", skip(ctx))]
pub async fn execute<U>(mut usecase: U, ctx: &DuewatchContext) -> Result<U::Response, U::Errors>
where
    U: UseCase,
    U::Errors: Debug,
{
    let res = usecase.execute(ctx).await;

    match &res {
        Ok(res) => {
            let subscribers = U::subscribers();
            join_all(subscribers.iter().map(|s| s.notify(res, ctx))).await;
        }
        Err(e) => {
            error!("{:?} failed: {:?}", usecase, e);
        }
    }

    res
}
