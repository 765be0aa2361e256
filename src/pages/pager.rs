use std::collections::BTreeSet;
use tracing::{debug, info, warn};
use crate::api::client::PageSource;
use crate::api::types::PageRequest;
use crate::config::PageConfig;
use crate::dom::{ElementId, Host, Patch};
use crate::errors::PageError;
use crate::models::{ChannelContext, LoadMoreResponse};
use crate::render::VideoCard;

/// Analyze forms the pager knows about, by card id. Only these forms put the
/// page into its loading state, and only their buttons get locked.
#[derive(Debug, Default, Clone)]
pub struct SubmitRegistry {
    cards: BTreeSet<usize>,
}

impl SubmitRegistry {
    pub fn register(&mut self, card_id: usize) {
        self.cards.insert(card_id);
    }

    pub fn contains(&self, card_id: usize) -> bool {
        self.cards.contains(&card_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    fn disable_all(&self) -> impl Iterator<Item = Patch> + '_ {
        self.cards.iter().map(|&id| Patch::SetDisabled {
            target: ElementId::AnalyzeButton(id),
            disabled: true,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PagerState {
    pub context: ChannelContext,
    /// A request is in flight and the load-more button is disabled.
    pub busy: bool,
    /// A request failed; pagination is over until the page is reloaded.
    pub halted: bool,
    pub load_more_visible: bool,
    next_card_id: usize,
}

#[derive(Debug)]
pub enum LoadStep {
    /// Nothing left to load; apply the patches and stop.
    Skip(Vec<Patch>),
    /// The button is disabled while a request is in flight.
    Ignored,
    /// Apply the patches, fetch `request`, then call `finish_load_more`.
    Fetch { request: PageRequest, patches: Vec<Patch> },
}

/// Controller for the channel page's video grid and its "load more" button.
pub struct ChannelVideoPager {
    config: PageConfig,
    state: PagerState,
    registry: SubmitRegistry,
}

impl ChannelVideoPager {
    /// `existing_cards` is how many cards the server already rendered; they
    /// are expected to use ids `0..existing_cards`.
    pub fn new(config: PageConfig, context: ChannelContext, existing_cards: usize) -> Self {
        let mut registry = SubmitRegistry::default();
        for id in 0..existing_cards {
            registry.register(id);
        }

        ChannelVideoPager {
            config,
            state: PagerState {
                context,
                busy: false,
                halted: false,
                load_more_visible: true,
                next_card_id: existing_cards,
            },
            registry,
        }
    }

    pub fn state(&self) -> &PagerState {
        &self.state
    }

    pub fn registry(&self) -> &SubmitRegistry {
        &self.registry
    }

    /// Hide the button up front when the first page was also the last.
    pub fn init(&mut self) -> Vec<Patch> {
        if self.state.context.next_page_token.is_empty() {
            debug!(channel_id = %self.state.context.channel_id, "single page channel, hiding load more");
            self.state.load_more_visible = false;
            vec![hide_load_more()]
        } else {
            Vec::new()
        }
    }

    pub fn on_submit(&mut self, form: &ElementId) -> Vec<Patch> {
        if self.registry.is_empty() {
            return Vec::new();
        }

        let card_id = match form {
            ElementId::AnalyzeForm(id) if self.registry.contains(*id) => *id,
            _ => return Vec::new(),
        };

        info!(card_id, locked = self.registry.len(), "analyze form submitted");
        let mut patches = vec![self.overlay(true)];
        patches.extend(self.registry.disable_all());
        patches
    }

    pub fn begin_load_more(&mut self) -> LoadStep {
        if self.state.busy {
            return LoadStep::Ignored;
        }

        let token = self.state.context.next_page_token.clone();
        if token.is_empty() || self.state.halted {
            self.state.load_more_visible = false;
            return LoadStep::Skip(vec![hide_load_more()]);
        }

        self.state.busy = true;
        info!(channel_id = %self.state.context.channel_id, page_token = %token, "loading more videos");

        let request = PageRequest {
            channel_id: self.state.context.channel_id.clone(),
            page_token: token,
        };
        let patches = vec![
            Patch::SetDisabled { target: ElementId::LoadMoreButton, disabled: true },
            Patch::SetText {
                target: ElementId::LoadMoreButton,
                text: self.config.copy.loading_label.clone(),
            },
            self.overlay(true),
        ];

        LoadStep::Fetch { request, patches }
    }

    pub fn finish_load_more(&mut self, result: Result<LoadMoreResponse, PageError>) -> Vec<Patch> {
        let mut patches = match result {
            Ok(page) => self.append_page(page),
            Err(e) => {
                warn!(channel_id = %self.state.context.channel_id, error = %e, "error loading more videos");
                self.state.halted = true;
                self.state.load_more_visible = false;
                vec![
                    Patch::Alert(format!("{}: {}", self.config.copy.load_error_prefix, e)),
                    hide_load_more(),
                ]
            }
        };

        self.state.busy = false;
        patches.extend([
            Patch::SetDisabled { target: ElementId::LoadMoreButton, disabled: false },
            Patch::SetText {
                target: ElementId::LoadMoreButton,
                text: self.config.copy.load_more_label.clone(),
            },
            self.overlay(false),
        ]);
        patches
    }

    /// Run one click of the load-more button against `source`, applying every
    /// patch to `host` as it is produced.
    pub async fn load_more<S, H>(&mut self, source: &S, host: &mut H)
    where
        S: PageSource + ?Sized,
        H: Host,
    {
        match self.begin_load_more() {
            LoadStep::Ignored => {}
            LoadStep::Skip(patches) => host.apply_all(patches),
            LoadStep::Fetch { request, patches } => {
                host.apply_all(patches);
                let result = source.fetch_page(&request).await;
                let patches = self.finish_load_more(result);
                host.apply_all(patches);
            }
        }
    }

    fn append_page(&mut self, page: LoadMoreResponse) -> Vec<Patch> {
        let mut patches = Vec::with_capacity(page.videos.len() + 2);

        for video in &page.videos {
            let card_id = self.state.next_card_id;
            self.state.next_card_id += 1;
            let html = VideoCard::new(video, &self.state.context, &self.config).render(card_id);
            self.registry.register(card_id);
            patches.push(Patch::AppendHtml { target: ElementId::VideoGrid, html });
        }

        let has_more = !page.next_page_token.is_empty();
        info!(
            channel_id = %self.state.context.channel_id,
            added = page.videos.len(),
            has_more,
            "appended videos"
        );

        patches.push(Patch::SetData {
            target: ElementId::VideoContainer,
            key: ChannelContext::NEXT_PAGE_TOKEN_KEY.to_string(),
            value: page.next_page_token.as_str().to_string(),
        });
        patches.push(Patch::SetVisible { target: ElementId::LoadMoreButton, visible: has_more });

        self.state.context.next_page_token = page.next_page_token;
        self.state.load_more_visible = has_more;
        patches
    }

    fn overlay(&self, on: bool) -> Patch {
        Patch::SetClass {
            target: ElementId::LoadingOverlay,
            class: self.config.overlay_class.clone(),
            on,
        }
    }
}

fn hide_load_more() -> Patch {
    Patch::SetVisible { target: ElementId::LoadMoreButton, visible: false }
}
