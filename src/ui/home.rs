/// Landing page: header record plus entry points to both catalogs

use iced::widget::image::Handle;
use iced::widget::{button, column, row, text, Column};
use iced::{Alignment, Element, Length, Task};

use crate::api::{CatalogClient, FetchError};
use crate::state::data::{CatalogKind, Header};
use crate::state::schedule::{Generations, Ticket};
use crate::ui::widgets;

const FALLBACK_TITLE: &str = "Shinobi Catalog";

#[derive(Debug, Clone)]
pub enum Message {
    Loaded(Ticket, Result<Header, FetchError>),
    BannerLoaded(Ticket, Result<Vec<u8>, FetchError>),
    /// Handled by the application
    Open(CatalogKind),
}

#[derive(Debug)]
pub struct HomeView {
    client: CatalogClient,
    header: Option<Header>,
    banner: Option<Handle>,
    loading: bool,
    fetches: Generations,
}

impl HomeView {
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            header: None,
            banner: None,
            loading: true,
            fetches: Generations::new(),
        }
    }

    pub fn mount(&mut self) -> Task<Message> {
        let ticket = self.fetches.issue();
        self.loading = true;
        Task::perform(self.client.clone().fetch_header(), move |result| {
            Message::Loaded(ticket, result)
        })
    }

    pub fn unmount(&mut self) {
        self.fetches.cancel();
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Loaded(ticket, result) => {
                if !self.fetches.is_live(ticket) {
                    return Task::none();
                }
                self.loading = false;
                match result {
                    Ok(header) => {
                        let banner = header.image.clone();
                        self.header = Some(header);
                        if let Some(url) = banner {
                            return Task::perform(self.client.clone().fetch_media(url), move |result| {
                                Message::BannerLoaded(ticket, result)
                            });
                        }
                    }
                    Err(e) => log::error!("Error fetching header: {}", e),
                }
                Task::none()
            }
            Message::BannerLoaded(ticket, result) => {
                if self.fetches.is_live(ticket) {
                    match result {
                        Ok(bytes) => self.banner = Some(Handle::from_bytes(bytes)),
                        Err(e) => log::warn!("{}", e),
                    }
                }
                Task::none()
            }
            Message::Open(_) => Task::none(),
        }
    }

    pub fn title(&self) -> &str {
        self.header
            .as_ref()
            .map(|h| h.title.as_str())
            .unwrap_or(FALLBACK_TITLE)
    }

    pub fn view(&self) -> Element<'_, Message> {
        let subtitle = match (&self.header, self.loading) {
            (_, true) => "Loading…",
            (Some(header), false) => header.subtitle.as_deref().unwrap_or(""),
            (None, false) => "Browse characters and their jutsus",
        };

        let mut page = Column::new()
            .spacing(20)
            .padding(40)
            .width(Length::Fill)
            .align_x(Alignment::Center);
        if let Some(banner) = &self.banner {
            page = page.push(widgets::banner(banner));
        }

        page.push(column![
            text(self.title()).size(48),
            text(subtitle).size(18),
            row![
                button(text("Characters"))
                    .padding(10)
                    .on_press(Message::Open(CatalogKind::Characters)),
                button(text("Jutsus"))
                    .padding(10)
                    .on_press(Message::Open(CatalogKind::Abilities)),
            ]
            .spacing(12),
        ]
        .spacing(20)
        .align_x(Alignment::Center))
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn home() -> HomeView {
        HomeView::new(CatalogClient::new(&Settings::default()))
    }

    #[test]
    fn test_failed_header_falls_back() {
        let mut home = home();
        let _ = home.mount();
        let ticket = home.fetches.issue();
        let _ = home.update(Message::Loaded(
            ticket,
            Err(FetchError::Transport {
                resource: "header".into(),
                message: "connection refused".into(),
            }),
        ));
        assert_eq!(home.title(), FALLBACK_TITLE);
        assert!(!home.loading);
    }

    #[test]
    fn test_header_title_is_used() {
        let mut home = home();
        let _ = home.mount();
        let ticket = home.fetches.issue();
        let header = Header {
            title: "Shinobi Archive".into(),
            subtitle: None,
            image: None,
        };
        let _ = home.update(Message::Loaded(ticket, Ok(header)));
        assert_eq!(home.title(), "Shinobi Archive");
    }
}
