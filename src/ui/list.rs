/// Catalog list view: filter panel, card grid, pagination
///
/// Data flows one way: collection → filter → paginate → render. Raw filter
/// input is debounced by the panel and only a committed state re-filters.

use std::collections::HashMap;

use iced::widget::image::Handle;
use iced::widget::scrollable::{self, AbsoluteOffset};
use iced::widget::{button, checkbox, column, container, row, text, text_input, Column, Space};
use iced::{Alignment, Element, Length, Task};
use iced_aw::Wrap;

use crate::api::{CatalogClient, FetchError};
use crate::config::Settings;
use crate::state::data::{CatalogKind, Entity, EntityId, FacetKind, FacetValue};
use crate::state::filter::matching_indices;
use crate::state::paging::{Page, PageState};
use crate::state::panel::{FilterInput, FilterPanel};
use crate::state::schedule::{self, Ticket};
use crate::state::store::{EntityStore, LoadState};
use crate::ui::widgets;

const CARD_WIDTH: f32 = 225.0;
const CARD_IMAGE_HEIGHT: f32 = 250.0;
const ICON_SIZE: f32 = 20.0;

#[derive(Debug, Clone)]
pub enum Message {
    Loaded(Ticket, Result<Vec<Entity>, FetchError>),
    OptionsLoaded(Ticket, FacetKind, Result<Vec<FacetValue>, FetchError>),
    ImageLoaded(Ticket, String, Result<Vec<u8>, FetchError>),
    Filter(FilterInput),
    FilterSettled(Ticket),
    PageSelected(usize),
    PreviousPage,
    NextPage,
    /// Handled by the application: open the detail view
    Open(CatalogKind, EntityId),
}

/// What the content area shows; each state renders distinctly
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListStatus {
    Loading,
    Loaded,
    EmptyAfterFilter,
    Failed(String),
}

#[derive(Debug)]
pub struct ListView {
    kind: CatalogKind,
    client: CatalogClient,
    store: EntityStore,
    panel: FilterPanel,
    page: PageState,
    /// Indices into the store's collection passing the committed filter
    matches: Vec<usize>,
    images: HashMap<String, Handle>,
    window_threshold: usize,
    skeleton_cards: usize,
}

impl ListView {
    pub fn new(kind: CatalogKind, settings: &Settings, client: CatalogClient) -> Self {
        Self {
            kind,
            client,
            store: EntityStore::new(),
            panel: FilterPanel::new(kind.facet_kinds(), settings.debounce()),
            page: PageState::new(settings.page_size),
            matches: Vec::new(),
            images: HashMap::new(),
            window_threshold: settings.window_threshold,
            skeleton_cards: settings.skeleton_cards,
        }
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    /// Fetch the collection and every facet option list
    pub fn mount(&mut self) -> Task<Message> {
        log::debug!("Mounting {} list", self.kind);
        let ticket = self.store.begin_fetch();

        let collection = Task::perform(
            self.client.clone().fetch_collection(self.kind),
            move |result| Message::Loaded(ticket, result),
        );
        let options = self.panel.kinds().iter().map(|&facet| {
            Task::perform(self.client.clone().fetch_facet_values(facet), move |result| {
                Message::OptionsLoaded(ticket, facet, result)
            })
        });

        Task::batch(std::iter::once(collection).chain(options))
    }

    /// Drop in-flight fetches and any pending filter commit
    pub fn unmount(&mut self) {
        log::debug!("Unmounting {} list", self.kind);
        self.store.detach();
        self.panel.cancel();
    }

    pub fn status(&self) -> ListStatus {
        match self.store.load_state() {
            LoadState::Loading => ListStatus::Loading,
            LoadState::Failed(error) => ListStatus::Failed(error.clone()),
            LoadState::Loaded if self.matches.is_empty() => ListStatus::EmptyAfterFilter,
            LoadState::Loaded => ListStatus::Loaded,
        }
    }

    pub fn current_page(&self) -> Page {
        self.page.paginate(self.matches.len(), self.window_threshold)
    }

    /// Entities on the current page, in collection order
    pub fn visible(&self) -> impl Iterator<Item = &Entity> {
        let all = self.store.entities();
        self.matches[self.current_page().slice]
            .iter()
            .map(move |&index| &all[index])
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Loaded(ticket, result) => {
                if !self.store.is_live(ticket) {
                    log::debug!("Discarding stale {} collection", self.kind);
                    return Task::none();
                }
                if let Err(e) = &result {
                    log::error!("Error fetching {}: {}", self.kind, e);
                }
                self.store.complete(ticket, result);
                if let Some(at) = self.store.fetched_at() {
                    log::info!(
                        "Loaded {} {} at {}",
                        self.store.entities().len(),
                        self.kind,
                        at.format("%H:%M:%S")
                    );
                }
                self.refilter();
                self.load_page_images()
            }
            Message::OptionsLoaded(ticket, facet, result) => {
                if !self.store.is_live(ticket) {
                    return Task::none();
                }
                match result {
                    Ok(values) => {
                        let icons = self.missing_icons(&values);
                        self.panel.set_options(facet, values);
                        self.fetch_images(ticket, icons)
                    }
                    Err(e) => {
                        log::error!("Error fetching {}: {}", facet.title(), e);
                        Task::none()
                    }
                }
            }
            Message::ImageLoaded(ticket, url, result) => {
                if self.store.is_live(ticket) {
                    match result {
                        Ok(bytes) => {
                            self.images.insert(url, Handle::from_bytes(bytes));
                        }
                        Err(e) => log::warn!("{}", e),
                    }
                }
                Task::none()
            }
            Message::Filter(input) => {
                let ticket = self.panel.input(input);
                schedule::after(self.panel.delay(), ticket, Message::FilterSettled)
            }
            Message::FilterSettled(ticket) => {
                if self.panel.settle(ticket).is_none() {
                    return Task::none();
                }
                self.refilter();
                log::debug!("{} filter committed: {} matches", self.kind, self.matches.len());
                Task::batch([self.load_page_images(), scroll_to_top()])
            }
            Message::PageSelected(number) => {
                self.page.go_to(number, self.matches.len());
                Task::batch([self.load_page_images(), scroll_to_top()])
            }
            Message::PreviousPage => {
                self.page.previous(self.matches.len());
                Task::batch([self.load_page_images(), scroll_to_top()])
            }
            Message::NextPage => {
                self.page.next(self.matches.len());
                Task::batch([self.load_page_images(), scroll_to_top()])
            }
            Message::Open(..) => Task::none(),
        }
    }

    /// Re-apply the committed filter and return to page 1
    fn refilter(&mut self) {
        self.matches = matching_indices(self.store.entities(), self.panel.committed());
        self.page.reset();
    }

    /// Fetch cover images of the current page that are not loaded yet
    fn load_page_images(&self) -> Task<Message> {
        let Some(ticket) = self.store.current_ticket() else {
            return Task::none();
        };
        let wanted: Vec<String> = self
            .visible()
            .filter_map(|entity| entity.cover())
            .map(|cover| cover.url.clone())
            .filter(|url| !self.images.contains_key(url))
            .collect();

        self.fetch_images(ticket, wanted)
    }

    /// Icon URLs of `values` not loaded yet, deduplicated
    fn missing_icons(&self, values: &[FacetValue]) -> Vec<String> {
        let mut icons: Vec<String> = values
            .iter()
            .filter_map(|value| value.icon.clone())
            .filter(|url| !self.images.contains_key(url))
            .collect();
        icons.sort();
        icons.dedup();
        icons
    }

    fn fetch_images(&self, ticket: Ticket, urls: Vec<String>) -> Task<Message> {
        Task::batch(urls.into_iter().map(|url| {
            let request = self.client.clone().fetch_media(url.clone());
            Task::perform(request, move |result| {
                Message::ImageLoaded(ticket, url.clone(), result)
            })
        }))
    }

    pub fn view(&self) -> Element<'_, Message> {
        row![self.filter_panel(), self.content()]
            .spacing(12)
            .into()
    }

    fn filter_panel(&self) -> Element<'_, Message> {
        let pending = self.panel.pending();
        let mut panel = Column::new()
            .spacing(12)
            .padding([16, 24])
            .width(280)
            .push(
                row![
                    text("Filters").size(26),
                    text(if self.panel.is_settling() { "Applying…" } else { "" }).size(14),
                ]
                .spacing(12),
            )
            .push(
                text_input("Name", pending.name_query())
                    .on_input(|query| Message::Filter(FilterInput::Query(query))),
            );

        for &facet in self.panel.kinds() {
            let options = self.panel.options(facet).iter().fold(
                Column::new().spacing(8),
                |group, value| {
                    let label = value.label.clone();
                    let toggle = checkbox(value.label.as_str(), pending.is_selected(facet, &value.label))
                        .on_toggle(move |_| {
                            Message::Filter(FilterInput::Toggle(facet, label.clone()))
                        });
                    match &value.icon {
                        Some(url) => group.push(
                            row![
                                toggle,
                                widgets::media_image(Some(url.as_str()), &self.images, ICON_SIZE, ICON_SIZE),
                            ]
                            .spacing(8)
                            .align_y(Alignment::Center),
                        ),
                        None => group.push(toggle),
                    }
                },
            );
            let title = match pending.selected(facet).count() {
                0 => facet.title().to_owned(),
                n => format!("{} ({})", facet.title(), n),
            };
            panel = panel.push(text(title).size(20)).push(options);
        }

        scrollable::Scrollable::new(panel).height(Length::Fill).into()
    }

    fn content(&self) -> Element<'_, Message> {
        let body: Element<'_, Message> = match self.status() {
            ListStatus::Loading => Wrap::with_elements(
                (0..self.skeleton_cards).map(|_| skeleton_card()).collect(),
            )
            .spacing(24.0)
            .line_spacing(24.0)
            .into(),
            ListStatus::Failed(error) => widgets::load_failed(&self.kind.title().to_lowercase(), &error),
            ListStatus::EmptyAfterFilter => widgets::no_matches(),
            ListStatus::Loaded => Wrap::with_elements(self.visible().map(|e| self.card(e)).collect())
                .spacing(24.0)
                .line_spacing(24.0)
                .into(),
        };

        let page = self.current_page();
        let bar = widgets::pagination_bar(
            &page,
            Message::PageSelected,
            Message::PreviousPage,
            Message::NextPage,
        );

        scrollable::Scrollable::new(column![body, bar].spacing(24).padding(24))
            .id(grid_id())
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn card<'a>(&'a self, entity: &'a Entity) -> Element<'a, Message> {
        let cover = widgets::media_image(
            entity.cover().map(|m| m.url.as_str()),
            &self.images,
            CARD_WIDTH,
            CARD_IMAGE_HEIGHT,
        );
        button(
            column![cover, text(entity.name.as_str()).size(18)]
                .spacing(8)
                .width(CARD_WIDTH),
        )
        .style(button::secondary)
        .on_press(Message::Open(entity.kind, entity.id.clone()))
        .into()
    }
}

fn skeleton_card<'a>() -> Element<'a, Message> {
    column![
        container(Space::new(CARD_WIDTH, CARD_IMAGE_HEIGHT)).style(container::rounded_box),
        container(Space::new(CARD_WIDTH, 20.0)).style(container::rounded_box),
    ]
    .spacing(12)
    .into()
}

fn grid_id() -> scrollable::Id {
    scrollable::Id::new("catalog-grid")
}

fn scroll_to_top() -> Task<Message> {
    scrollable::scroll_to(grid_id(), AbsoluteOffset { x: 0.0, y: 0.0 })
}
