use iced::widget::image::Handle;
use iced::widget::{button, column, container, image, text};
use iced::{Alignment, ContentFit, Element, Length};

use super::{panel, EMERALD_600, EMERALD_900, STONE_500};
use crate::state::data::SearchResult;
use crate::Message;

const CARD_WIDTH: f32 = 260.0;
const IMAGE_HEIGHT: f32 = 180.0;

/// Plant card: photo (or placeholder), names, one-line summary
///
/// The whole card is a button that emits `on_press`.
pub fn plant_card<'a>(
    plant: &'a SearchResult,
    photo: Option<Handle>,
    on_press: Message,
) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match photo {
        Some(handle) => image(handle)
            .width(Length::Fill)
            .height(Length::Fixed(IMAGE_HEIGHT))
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(text("🌿").size(56))
            .width(Length::Fill)
            .height(Length::Fixed(IMAGE_HEIGHT))
            .center_x(Length::Fill)
            .center_y(Length::Fixed(IMAGE_HEIGHT))
            .into(),
    };

    let body = column![
        text(&plant.name).size(22).color(EMERALD_900),
        text(&plant.scientific_name).size(14).color(STONE_500),
        text(&plant.short_description).size(14),
        text("查看详情 ›").size(14).color(EMERALD_600),
    ]
    .spacing(6)
    .padding(16);

    let card = container(column![picture, body].align_x(Alignment::Start))
        .width(Length::Fixed(CARD_WIDTH))
        .style(panel);

    button(card)
        .on_press(on_press)
        .padding(0)
        .style(button::text)
        .into()
}
