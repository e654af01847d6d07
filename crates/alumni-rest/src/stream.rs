//! Walk a whole collection page by page.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::Stream;
use tracing::debug;

use alumni_core::list::{ListPage, PageQuery, PaginationState};
use alumni_core::{Entity, EntityId, Fetcher, Result};

/// Stream of consecutive pages of one collection.
///
/// Ends after the page that reaches the server-reported total, after an
/// empty page, or after the first error.
pub struct PageStream<E> {
    inner: Pin<Box<dyn Stream<Item = Result<ListPage<E>>> + Send>>,
}

impl<E: Entity> PageStream<E> {
    /// Stream pages of `page_size` records from `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if `page_size` is zero.
    pub fn new<F>(source: F, page_size: u32, user_id: Option<EntityId>) -> Result<Self>
    where
        F: Fetcher<E> + 'static,
    {
        let mut cursor = PaginationState::new(page_size)?;

        let stream = async_stream::stream! {
            while cursor.has_more() {
                let query = PageQuery::new(cursor.next_page(), page_size).with_user(user_id.clone());
                match source.fetch_page(&query).await {
                    Ok(page) => {
                        cursor.advance();
                        cursor.set_total(page.total);
                        let exhausted = page.is_empty();
                        debug!(
                            resource = E::RESOURCE,
                            page = cursor.current_page(),
                            records = page.len(),
                            "Streamed page"
                        );
                        yield Ok(page);
                        if exhausted {
                            break;
                        }
                    }
                    Err(e) => {
                        yield Err(e);
                        break;
                    }
                }
            }
        };

        Ok(Self {
            inner: Box::pin(stream),
        })
    }
}

impl<E> Stream for PageStream<E> {
    type Item = Result<ListPage<E>>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}
