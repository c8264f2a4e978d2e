/// Entity detail view: attributes, media carousel, cross-references

use std::collections::HashMap;

use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, scrollable, text, Column, Row};
use iced::{Element, Length, Task};
use iced_aw::Wrap;

use crate::api::{CatalogClient, FetchError};
use crate::config::Settings;
use crate::state::carousel::{Carousel, Step};
use crate::state::data::{CatalogKind, Entity, EntityId, EntityRef};
use crate::state::schedule::{self, Generations, Ticket};
use crate::state::store::LoadState;
use crate::ui::widgets;

const REF_WIDTH: f32 = 250.0;
const REF_HEIGHT: f32 = 128.0;
const ICON_SIZE: f32 = 24.0;

#[derive(Debug, Clone)]
pub enum Message {
    Loaded(Ticket, Result<Entity, FetchError>),
    ImageLoaded(Ticket, String, Result<Vec<u8>, FetchError>),
    Slide(Step),
    Tick(Ticket),
    /// Handled by the application: open a referenced entity
    Open(CatalogKind, EntityId),
}

#[derive(Debug)]
pub struct DetailView {
    kind: CatalogKind,
    id: EntityId,
    client: CatalogClient,
    entity: Option<Entity>,
    load: LoadState,
    fetches: Generations,
    live: Option<Ticket>,
    carousel: Carousel,
    images: HashMap<String, Handle>,
}

impl DetailView {
    pub fn new(kind: CatalogKind, id: EntityId, settings: &Settings, client: CatalogClient) -> Self {
        Self {
            kind,
            id,
            client,
            entity: None,
            load: LoadState::Loading,
            fetches: Generations::new(),
            live: None,
            carousel: Carousel::new(settings.carousel_interval()),
            images: HashMap::new(),
        }
    }

    pub fn mount(&mut self) -> Task<Message> {
        log::debug!("Mounting {} detail {}", self.kind, self.id);
        let ticket = self.fetches.issue();
        self.live = Some(ticket);
        self.load = LoadState::Loading;

        Task::perform(
            self.client.clone().fetch_entity_detail(self.kind, self.id.0.clone()),
            move |result| Message::Loaded(ticket, result),
        )
    }

    /// Cancel the fetch liveness and the carousel timer
    pub fn unmount(&mut self) {
        log::debug!("Unmounting {} detail {}", self.kind, self.id);
        self.fetches.cancel();
        self.live = None;
        if self.carousel.is_running() {
            log::debug!("Stopping carousel of {}", self.id);
        }
        self.carousel.stop();
    }

    pub fn entity(&self) -> Option<&Entity> {
        self.entity.as_ref()
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    fn is_live(&self, ticket: Ticket) -> bool {
        self.fetches.is_live(ticket)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Loaded(ticket, result) => {
                if !self.is_live(ticket) {
                    log::debug!("Discarding stale detail for {}", self.id);
                    return Task::none();
                }
                match result {
                    Ok(entity) => {
                        let timer = self.carousel.load(entity.media.len());
                        self.entity = Some(entity);
                        self.load = LoadState::Loaded;
                        let tick = match timer {
                            Some(t) => schedule::after(self.carousel.interval(), t, Message::Tick),
                            None => Task::none(),
                        };
                        Task::batch([tick, self.load_images(ticket)])
                    }
                    Err(e) => {
                        log::error!("Error fetching {} {}: {}", self.kind, self.id, e);
                        self.entity = None;
                        self.carousel.stop();
                        self.load = LoadState::Failed(e.to_string());
                        Task::none()
                    }
                }
            }
            Message::ImageLoaded(ticket, url, result) => {
                if self.is_live(ticket) {
                    match result {
                        Ok(bytes) => {
                            self.images.insert(url, Handle::from_bytes(bytes));
                        }
                        Err(e) => log::warn!("{}", e),
                    }
                }
                Task::none()
            }
            Message::Slide(step) => {
                self.carousel.step(step);
                widgets::scroll_to_slide(&self.carousel)
            }
            Message::Tick(ticket) => match self.carousel.tick(ticket) {
                Some(next) => Task::batch([
                    widgets::scroll_to_slide(&self.carousel),
                    schedule::after(self.carousel.interval(), next, Message::Tick),
                ]),
                None => Task::none(),
            },
            Message::Open(..) => Task::none(),
        }
    }

    /// Every slide, facet icon and cross-reference thumbnail of the entity
    fn image_urls(&self) -> Vec<String> {
        let Some(entity) = &self.entity else {
            return Vec::new();
        };
        let mut urls: Vec<String> = entity
            .media
            .iter()
            .map(|m| m.url.clone())
            .chain(entity.facet_icons().map(str::to_owned))
            .chain(
                entity
                    .references
                    .iter()
                    .flat_map(|section| section.entries.iter())
                    .filter_map(|entry| entry.thumbnail.clone()),
            )
            .collect();
        urls.sort();
        urls.dedup();
        urls
    }

    fn load_images(&self, ticket: Ticket) -> Task<Message> {
        Task::batch(self.image_urls().into_iter().map(|url| {
            let request = self.client.clone().fetch_media(url.clone());
            Task::perform(request, move |result| {
                Message::ImageLoaded(ticket, url.clone(), result)
            })
        }))
    }

    pub fn view(&self) -> Element<'_, Message> {
        let content: Element<'_, Message> = match (&self.load, &self.entity) {
            (LoadState::Failed(error), _) => widgets::load_failed(&self.kind.title().to_lowercase(), error),
            (LoadState::Loaded, Some(entity)) => self.entity_view(entity),
            _ => text("Loading…").size(20).into(),
        };

        scrollable(container(content).padding(24).width(Length::Fill))
            .height(Length::Fill)
            .into()
    }

    fn entity_view<'a>(&'a self, entity: &'a Entity) -> Element<'a, Message> {
        let mut header = Column::new()
            .spacing(8)
            .width(Length::Fill)
            .push(text(entity.name.as_str()).size(44));
        if let Some(alias) = &entity.alias {
            header = header.push(text(alias.as_str()).size(20));
        }

        let attributes = entity.attributes.iter().fold(Column::new().spacing(6), |list, attribute| {
            list.push(
                row![
                    text(format!("{}:", attribute.label)).size(16),
                    text(attribute.value.as_deref().unwrap_or("N/A")).size(16),
                ]
                .spacing(6),
            )
        });
        header = header.push(text("Biography").size(28)).push(attributes);

        // Facet kinds that carry icons (clan symbols, natures, kekkei genkai)
        for (kind, values) in &entity.facets {
            if values.iter().all(|value| value.icon.is_none()) {
                continue;
            }
            let badges = values
                .iter()
                .map(|value| widgets::facet_badge(value, &self.images, ICON_SIZE))
                .collect();
            header = header.push(
                row![
                    text(format!("{}:", kind.title())).size(16),
                    Wrap::with_elements(badges).spacing(12.0).line_spacing(6.0),
                ]
                .spacing(6),
            );
        }

        if let Some(description) = &entity.description {
            header = header
                .push(text("Description").size(28))
                .push(text(description.as_str()));
        }

        let carousel = widgets::carousel_frame(
            &self.carousel,
            &entity.media,
            &self.images,
            Message::Slide(Step::Previous),
            Message::Slide(Step::Next),
        );

        let mut page = Column::new()
            .spacing(32)
            .push(Row::new().spacing(24).push(header).push(carousel));

        for section in &entity.references {
            let entries = section.entries.iter().map(|entry| self.reference(entry)).collect();
            page = page.push(
                column![
                    text(section.title.as_str()).size(28),
                    Wrap::with_elements(entries).spacing(12.0).line_spacing(12.0),
                ]
                .spacing(12),
            );
        }

        page.into()
    }

    fn reference<'a>(&'a self, entry: &'a EntityRef) -> Element<'a, Message> {
        button(
            column![
                widgets::media_image(entry.thumbnail.as_deref(), &self.images, REF_WIDTH, REF_HEIGHT),
                text(entry.name.as_str()).size(16),
            ]
            .spacing(6)
            .width(REF_WIDTH),
        )
        .style(button::secondary)
        .on_press(Message::Open(entry.kind, entry.id.clone()))
        .into()
    }
}
