use std::pin::pin;

use futures::{future, StreamExt, TryStreamExt};
use octocrab::Page;
use serde::de::DeserializeOwned;

pub(crate) trait PageExt<I>
where
    I: DeserializeOwned + 'static,
{
    /// Walk this and all following pages, keeping the items matching `pred`.
    async fn filter_all<F: Fn(&I) -> bool>(
        self,
        github_api: &octocrab::Octocrab,
        pred: F,
    ) -> octocrab::Result<Vec<I>>;
}

impl<I> PageExt<I> for Page<I>
where
    I: DeserializeOwned + 'static,
{
    async fn filter_all<F: Fn(&I) -> bool>(
        self,
        github_api: &octocrab::Octocrab,
        pred: F,
    ) -> octocrab::Result<Vec<I>> {
        let items = pin!(self.into_stream(github_api));
        items
            .filter(|r| future::ready(r.as_ref().map_or(true, &pred)))
            .try_collect()
            .await
    }
}
