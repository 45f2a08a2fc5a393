use std::sync::Arc;

use tracing::{error, info};

use crate::models::Catalog;

use super::card::build_activity_card;
use super::source::ActivitySource;
use super::view::{ViewHandles, LOAD_FAILED_NOTICE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Rendered { cards: usize },
    Failed,
}

/// Full fetch-and-render pass over the activities container and the activity
/// drop-down.
pub struct CatalogRenderer<S> {
    source: Arc<S>,
    view: ViewHandles,
}

impl<S: ActivitySource> CatalogRenderer<S> {
    pub fn new(source: Arc<S>, view: ViewHandles) -> Self {
        Self { source, view }
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        match self.source.fetch_catalog().await {
            Ok(catalog) => render_catalog(&self.view, &catalog),
            Err(e) => {
                error!(error = %e, "Error fetching activities");
                // The drop-down keeps whatever it showed before.
                self.view.activities_list().show_notice(LOAD_FAILED_NOTICE);
                RefreshOutcome::Failed
            }
        }
    }
}

/// Rebuilds every card and select option from `catalog`, in catalog order.
pub fn render_catalog(view: &ViewHandles, catalog: &Catalog) -> RefreshOutcome {
    let mut list = view.activities_list();
    let mut select = view.activity_select();

    list.clear();
    select.reset();
    for (name, activity) in catalog.iter() {
        let card = build_activity_card(list.ids(), name, activity);
        list.append_card(card);
        select.push_activity(name);
    }

    let cards = list.cards().len();
    info!(cards, "rendered activities");
    RefreshOutcome::Rendered { cards }
}
