/// Reusable view fragments: pagination bar, carousel frame, status banners

use std::collections::HashMap;

use iced::widget::image::Handle;
use iced::widget::scrollable::{self, AbsoluteOffset, Direction, Scrollbar};
use iced::widget::{button, column, container, image, row, text, Row, Space};
use iced::{Alignment, ContentFit, Element, Length, Task};

use crate::state::carousel::{Carousel, SlideState};
use crate::state::data::{FacetValue, MediaItem};
use crate::state::paging::{Page, PageWindowEntry};

/// Width of one carousel slide in logical pixels
pub const SLIDE_WIDTH: f32 = 640.0;
pub const SLIDE_HEIGHT: f32 = 420.0;

/// Previous/next plus the page window; previous/next are always present
pub fn pagination_bar<'a, M: Clone + 'a>(
    page: &Page,
    on_select: impl Fn(usize) -> M,
    previous: M,
    next: M,
) -> Element<'a, M> {
    let mut bar = Row::new()
        .spacing(6)
        .align_y(Alignment::Center)
        .push(button(text("‹ Previous")).style(button::text).on_press(previous));

    for entry in &page.window {
        bar = match *entry {
            PageWindowEntry::Page { number, current } => bar.push(
                button(text(number.to_string()))
                    .style(if current { button::primary } else { button::secondary })
                    .on_press(on_select(number)),
            ),
            PageWindowEntry::LeadingEllipsis | PageWindowEntry::TrailingEllipsis => {
                bar.push(text("…"))
            }
        };
    }

    bar.push(button(text("Next ›")).style(button::text).on_press(next))
        .into()
}

/// Image for `url` if its bytes have arrived, else a sized placeholder
pub fn media_image<'a, M: 'a>(
    url: Option<&str>,
    images: &HashMap<String, Handle>,
    width: f32,
    height: f32,
) -> Element<'a, M> {
    match url.and_then(|url| images.get(url)) {
        Some(handle) => image::Image::<Handle>::new(handle.clone())
            .width(width)
            .height(height)
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(text(if url.is_some() { "Loading image…" } else { "No image" }).size(14))
            .width(width)
            .height(height)
            .center_x(width)
            .center_y(height)
            .style(container::rounded_box)
            .into(),
    }
}

/// Facet label preceded by its icon, when it has one
pub fn facet_badge<'a, M: 'a>(
    value: &'a FacetValue,
    images: &HashMap<String, Handle>,
    size: f32,
) -> Element<'a, M> {
    let label = text(value.label.as_str()).size(14);
    match &value.icon {
        Some(url) => row![media_image(Some(url.as_str()), images, size, size), label]
            .spacing(6)
            .align_y(Alignment::Center)
            .into(),
        None => label.into(),
    }
}

/// Full-width landing image
pub fn banner<'a, M: 'a>(handle: &Handle) -> Element<'a, M> {
    image::Image::<Handle>::new(handle.clone())
        .width(Length::Fill)
        .height(320.0)
        .content_fit(ContentFit::Cover)
        .into()
}

pub fn carousel_id() -> scrollable::Id {
    scrollable::Id::new("media-carousel")
}

/// Scroll the slide strip so the current slide is in view
pub fn scroll_to_slide<M: 'static>(carousel: &Carousel) -> Task<M> {
    let x = carousel.offset_percent() / 100.0 * SLIDE_WIDTH;
    scrollable::scroll_to(carousel_id(), AbsoluteOffset { x, y: 0.0 })
}

/// Horizontal slide strip with optional previous/next controls
pub fn carousel_frame<'a, M: Clone + 'a>(
    carousel: &Carousel,
    media: &'a [MediaItem],
    images: &HashMap<String, Handle>,
    previous: M,
    next: M,
) -> Element<'a, M> {
    if media.is_empty() {
        return container(text("No images").size(16))
            .width(SLIDE_WIDTH)
            .height(SLIDE_HEIGHT)
            .center_x(SLIDE_WIDTH)
            .center_y(SLIDE_HEIGHT)
            .style(container::rounded_box)
            .into();
    }

    let slides = media.iter().fold(Row::new(), |strip, item| {
        let mut slide = column![media_image(Some(item.url.as_str()), images, SLIDE_WIDTH, SLIDE_HEIGHT)]
            .width(SLIDE_WIDTH)
            .spacing(6);
        if let Some(caption) = &item.caption {
            slide = slide.push(text(caption.as_str()).size(14));
        }
        strip.push(slide)
    });

    let strip = scrollable::Scrollable::new(slides)
        .id(carousel_id())
        .direction(Direction::Horizontal(Scrollbar::new().width(0.0).scroller_width(0.0)))
        .width(SLIDE_WIDTH);

    if !carousel.shows_controls() {
        return strip.into();
    }

    let position = match carousel.state() {
        SlideState::AtIndex(i) => format!("{} / {}", i + 1, carousel.len()),
        SlideState::Inactive => String::new(),
    };

    column![
        strip,
        row![
            button(text("‹")).on_press(previous),
            Space::with_width(Length::Fill),
            text(position).size(14),
            Space::with_width(Length::Fill),
            button(text("›")).on_press(next),
        ]
        .width(SLIDE_WIDTH)
        .align_y(Alignment::Center),
    ]
    .spacing(8)
    .into()
}

/// Shown when a filter leaves nothing to display
pub fn no_matches<'a, M: 'a>() -> Element<'a, M> {
    container(text("No matches").style(text::danger))
        .padding([8, 12])
        .style(container::rounded_box)
        .into()
}

/// Shown when the collection could not be fetched
pub fn load_failed<'a, M: 'a>(what: &str, error: &str) -> Element<'a, M> {
    container(
        column![
            text(format!("Could not load {}", what)).size(18).style(text::danger),
            text(error.to_owned()).size(13),
        ]
        .spacing(4),
    )
    .padding([8, 12])
    .style(container::bordered_box)
    .into()
}
