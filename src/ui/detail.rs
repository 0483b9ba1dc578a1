use iced::widget::{button, column, container, row, text, Column};
use iced::{Alignment, Element, Length, Pixels};
use iced_aw::Wrap;

use super::{back_button, chip, hero, page, panel, EMERALD_300, EMERALD_900, STONE_500};
use crate::state::data::PlantData;
use crate::state::fetch::Fetch;
use crate::state::view::{DetailState, Navigation};
use crate::Message;

/// Encyclopedia entry, or its loading / failure placeholder
pub fn view(detail: &DetailState) -> Element<'_, Message> {
    match &detail.data {
        Fetch::Ready(plant) => entry(plant),
        Fetch::Failed => failure(),
        Fetch::Idle | Fetch::Loading(_) => loading(&detail.plant_name),
    }
}

fn loading(plant_name: &str) -> Element<'_, Message> {
    container(
        column![
            text(plant_name).size(28).color(EMERALD_900),
            text("正在生成植物百科数据...").size(16).color(STONE_500),
        ]
        .spacing(16)
        .align_x(Alignment::Center),
    )
    .padding([160, 24])
    .center_x(Length::Fill)
    .style(page)
    .into()
}

fn failure<'a>() -> Element<'a, Message> {
    container(
        column![
            text("无法获取数据，请稍后重试。").size(18),
            button(text("返回").size(16))
                .on_press(Message::Navigate(Navigation::Back))
                .padding([10, 28])
                .style(button::success),
        ]
        .spacing(20)
        .align_x(Alignment::Center),
    )
    .padding([160, 24])
    .center_x(Length::Fill)
    .style(page)
    .into()
}

fn entry(plant: &PlantData) -> Element<'_, Message> {
    let header = container(
        column![
            back_button(),
            container(text(format!("{} Care", plant.difficulty)).size(13))
                .padding([4, 12])
                .style(chip),
            text(&plant.name).size(44),
            text(&plant.scientific_name).size(18).color(EMERALD_300),
        ]
        .spacing(12),
    )
    .padding([40, 32])
    .width(Length::Fill)
    .style(hero);

    let tags: Vec<Element<'_, Message>> = plant
        .tags
        .iter()
        .map(|tag| {
            container(text(format!("#{tag}")).size(13))
                .padding([4, 12])
                .style(chip)
                .into()
        })
        .collect();

    let about = container(
        column![
            text("关于植物").size(24).color(EMERALD_900),
            text(&plant.description).size(16),
            Wrap::with_elements(tags).spacing(Pixels(8.0)).line_spacing(Pixels(8.0)),
        ]
        .spacing(16),
    )
    .padding(28)
    .width(Length::Fill)
    .style(panel);

    let care = &plant.care;
    let care_cards = vec![
        care_card("☀️", "光照", care.light.clone()),
        care_card("💧", "浇水", care.water.clone()),
        care_card("🌡️", "温度", care.temperature.clone()),
        care_card("🌬️", "湿度", care.humidity.clone()),
        care_card("🌱", "土壤 & 施肥", format!("{} {}", care.soil, care.fertilizer)),
    ];

    let body = Column::new()
        .push(about)
        .push(text("养护指南").size(24).color(EMERALD_900))
        .push(Wrap::with_elements(care_cards).spacing(Pixels(20.0)).line_spacing(Pixels(20.0)))
        .spacing(28)
        .padding([32, 32]);

    container(column![header, body])
        .width(Length::Fill)
        .style(page)
        .into()
}

fn care_card<'a>(icon: &'a str, title: &'a str, description: String) -> Element<'a, Message> {
    container(
        row![
            text(icon).size(28),
            column![
                text(title).size(17).color(EMERALD_900),
                text(description).size(14).color(STONE_500),
            ]
            .spacing(6)
            .width(Length::Fill),
        ]
        .spacing(14),
    )
    .padding(22)
    .width(Length::Fixed(340.0))
    .style(panel)
    .into()
}
