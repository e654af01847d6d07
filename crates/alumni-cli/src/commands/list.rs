//! Shared list view: fetch pages, filter, print.

use anyhow::{Context, Result, bail};
use clap::Args;
use serde::Serialize;

use alumni_core::list::{ApplyOutcome, FilterState, Filterable, ListController, Selector};
use alumni_core::{Entity, EntityId, Fetcher};

use super::Source;
use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Case-insensitive text filter on the name or title
    #[arg(long, short = 's', default_value = "")]
    pub search: String,

    /// Exact category to keep ("ALL" for any)
    #[arg(long, default_value = Selector::ALL)]
    pub category: Selector,

    /// Number of pages to fetch
    #[arg(long, default_value_t = 1)]
    pub pages: u32,

    /// Fetch every page
    #[arg(long, conflicts_with = "pages")]
    pub all: bool,

    /// Print at most this many rows
    #[arg(long)]
    pub limit: Option<usize>,

    /// Only entries related to the signed-in member
    #[arg(long)]
    pub mine: bool,

    /// Print one JSON object per line
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    fn filter(&self, kind: Selector) -> FilterState {
        FilterState {
            search_query: self.search.clone(),
            category: self.category.clone(),
            kind,
        }
    }

    fn pages_wanted(&self) -> u32 {
        if self.all { u32::MAX } else { self.pages.max(1) }
    }
}

/// Fetch, filter and print one collection.
pub async fn run<E>(
    settings: &Settings,
    args: &ListArgs,
    kind: Selector,
    render: impl Fn(&E),
) -> Result<()>
where
    E: Entity + Filterable + Serialize,
{
    let source = Source::open(settings).await?;

    let user = if args.mine {
        match source.member_id() {
            Some(id) => Some(id.clone()),
            None => bail!("--mine needs an active session. Run 'alumni login' first."),
        }
    } else {
        None
    };

    match &source {
        Source::Session(session) => show(session, settings, args, kind, user, render).await,
        Source::Anonymous(api) => show(api, settings, args, kind, user, render).await,
    }
}

async fn show<E, F>(
    source: &F,
    settings: &Settings,
    args: &ListArgs,
    kind: Selector,
    user: Option<EntityId>,
    render: impl Fn(&E),
) -> Result<()>
where
    E: Entity + Filterable + Serialize,
    F: Fetcher<E> + ?Sized,
{
    let mut list = ListController::new(settings.page_size).context("Invalid page size")?;
    if let Some(user) = user {
        list = list.for_user(user);
    }
    list.set_filter(args.filter(kind));

    list.refresh(source)
        .await
        .with_context(|| format!("Failed to fetch {}", E::RESOURCE))?;

    let wanted = args.pages_wanted();
    let mut exhausted = false;
    while list.cursor().current_page() < wanted && list.has_more() {
        match list.load_more(source).await {
            Ok(Some(ApplyOutcome::Applied { added })) if added > 0 => {}
            Ok(_) => {
                // The server reports more than it serves; stop here.
                tracing::debug!(
                    total = ?list.cursor().total(),
                    held = list.len(),
                    "Empty page before reported total"
                );
                exhausted = true;
                break;
            }
            Err(e) => {
                output::error(&format!("Failed to fetch more {}: {}", E::RESOURCE, e));
                break;
            }
        }
    }

    let visible = list.filtered();
    if visible.is_empty() {
        output::note(&format!("No {} found.", E::RESOURCE));
    }

    let shown = args.limit.map_or(visible.len(), |limit| limit.min(visible.len()));
    for entity in &visible[..shown] {
        if args.json {
            output::json(entity)?;
        } else {
            render(entity);
        }
    }

    let total = list
        .cursor()
        .total()
        .map_or_else(|| "?".to_string(), |t| t.to_string());
    output::note(&format!(
        "{} shown, {} fetched of {} {}",
        shown,
        list.len(),
        total,
        E::RESOURCE
    ));
    if list.has_more() && !exhausted {
        output::note(&format!(
            "More available: rerun with --pages {}",
            list.cursor().next_page()
        ));
    }

    Ok(())
}
