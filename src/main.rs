use env_logger::{Builder, Target};
use iced::widget::{button, column, container, horizontal_rule, row, text};
use iced::{Alignment, Element, Length, Task, Theme};
use log::LevelFilter;

mod api;
mod config;
mod state;
mod ui;

use api::CatalogClient;
use config::Settings;
use state::data::{CatalogKind, EntityId};
use ui::{detail, home, list};

/// Where the user is in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
enum Route {
    Home,
    Catalog(CatalogKind),
    Entity(CatalogKind, EntityId),
}

/// The mounted screen; dropping it without `unmount` would leave timers live
#[derive(Debug)]
enum Screen {
    Home(home::HomeView),
    List(list::ListView),
    Detail(detail::DetailView),
}

/// Main application state
struct CatalogBrowser {
    settings: Settings,
    client: CatalogClient,
    screen: Screen,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    Navigate(Route),
    Home(home::Message),
    List(list::Message),
    Detail(detail::Message),
}

impl CatalogBrowser {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();
        log::info!("Catalog browser using API at {}", settings.api_url);

        let client = CatalogClient::new(&settings);
        let mut home = home::HomeView::new(client.clone());
        let task = home.mount().map(Message::Home);

        (
            CatalogBrowser {
                settings,
                client,
                screen: Screen::Home(home),
            },
            task,
        )
    }

    /// Unmount the current screen and mount the one for `route`
    fn navigate(&mut self, route: Route) -> Task<Message> {
        match &mut self.screen {
            Screen::Home(view) => view.unmount(),
            Screen::List(view) => view.unmount(),
            Screen::Detail(view) => view.unmount(),
        }

        log::debug!("Navigating to {:?}", route);
        match route {
            Route::Home => {
                let mut view = home::HomeView::new(self.client.clone());
                let task = view.mount().map(Message::Home);
                self.screen = Screen::Home(view);
                task
            }
            Route::Catalog(kind) => {
                let mut view = list::ListView::new(kind, &self.settings, self.client.clone());
                let task = view.mount().map(Message::List);
                self.screen = Screen::List(view);
                task
            }
            Route::Entity(kind, id) => {
                let mut view = detail::DetailView::new(kind, id, &self.settings, self.client.clone());
                let task = view.mount().map(Message::Detail);
                self.screen = Screen::Detail(view);
                task
            }
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match (message, &mut self.screen) {
            (Message::Navigate(route), _) => self.navigate(route),

            (Message::Home(home::Message::Open(kind)), _) => self.navigate(Route::Catalog(kind)),
            (Message::List(list::Message::Open(kind, id)), _)
            | (Message::Detail(detail::Message::Open(kind, id)), _) => {
                self.navigate(Route::Entity(kind, id))
            }

            (Message::Home(message), Screen::Home(view)) => view.update(message).map(Message::Home),
            (Message::List(message), Screen::List(view)) => view.update(message).map(Message::List),
            (Message::Detail(message), Screen::Detail(view)) => {
                view.update(message).map(Message::Detail)
            }

            // Late callbacks addressed to a screen that is no longer mounted
            (message, _) => {
                log::debug!("Dropping message for unmounted screen: {:?}", message);
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let active = |route: Route| {
            let current = match &self.screen {
                Screen::Home(_) => Route::Home,
                Screen::List(view) => Route::Catalog(view.kind()),
                Screen::Detail(_) => return false,
            };
            current == route
        };
        let nav_button = |label: &'static str, route: Route| {
            button(text(label))
                .style(if active(route.clone()) { button::primary } else { button::text })
                .on_press(Message::Navigate(route))
        };

        let navbar = row![
            nav_button("Home", Route::Home),
            nav_button("Characters", Route::Catalog(CatalogKind::Characters)),
            nav_button("Jutsus", Route::Catalog(CatalogKind::Abilities)),
        ]
        .spacing(8)
        .padding(8)
        .align_y(Alignment::Center);

        let screen = match &self.screen {
            Screen::Home(view) => view.view().map(Message::Home),
            Screen::List(view) => view.view().map(Message::List),
            Screen::Detail(view) => view.view().map(Message::Detail),
        };

        column![
            navbar,
            horizontal_rule(1),
            container(screen).width(Length::Fill).height(Length::Fill),
        ]
        .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn init_logger() {
    Builder::new()
        .target(Target::Stdout)
        .filter_level(LevelFilter::Warn)
        .filter_module(module_path!(), LevelFilter::Debug)
        .init();
}

fn main() -> iced::Result {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    iced::application(
        "Shinobi Catalog",
        CatalogBrowser::update,
        CatalogBrowser::view,
    )
    .theme(CatalogBrowser::theme)
    .centered()
    .run_with(CatalogBrowser::new)
}
