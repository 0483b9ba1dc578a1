use iced::widget::{button, column, container, row, text, text_input, Column};
use iced::{Alignment, Element, Length, Pixels};
use iced_aw::Wrap;

use super::card::plant_card;
use super::{hero, page, EMERALD_300, EMERALD_600, EMERALD_900, STONE_500};
use crate::state::view::{HomeState, Navigation};
use crate::Message;

/// Home screen: hero with search and quick actions, then the plant grid
pub fn view(home: &HomeState) -> Element<'_, Message> {
    column![banner(home), listing(home), footer()]
        .width(Length::Fill)
        .into()
}

fn banner(home: &HomeState) -> Element<'_, Message> {
    let search = text_input("搜索植物名称 (例如: 龟背竹, 仙人掌...)", &home.query)
        .on_input(Message::SearchChanged)
        .on_submit(Message::SearchSubmitted)
        .padding(14)
        .size(16);

    let submit = button(text("搜索").size(16))
        .on_press_maybe(home.can_search().then_some(Message::SearchSubmitted))
        .padding([12, 24])
        .style(button::success);

    let actions = row![
        button(text("📷 拍照识花").size(16))
            .on_press(Message::Navigate(Navigation::OpenIdentify))
            .padding([12, 24])
            .style(button::success),
        button(text("🩺 植物急救").size(16))
            .on_press(Message::Navigate(Navigation::OpenDoctor))
            .padding([12, 24])
            .style(button::secondary),
    ]
    .spacing(16);

    let content = column![
        text("GreenSpace Encyclopedia").size(18).color(EMERALD_300),
        row![text("打造您的 ").size(48), text("室内森林").size(48).color(EMERALD_300)],
        text("探索数千种室内植物的养护指南，或使用 AI 专家诊断植物健康问题。").size(18),
        row![search, submit].spacing(8).width(Length::Fixed(600.0)),
        actions,
    ]
    .spacing(20)
    .padding([64, 24])
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .style(hero)
        .into()
}

fn listing(home: &HomeState) -> Element<'_, Message> {
    let (title, subtitle) = if home.has_query() {
        ("搜索结果".to_string(), format!("关于 \"{}\" 的植物", home.query.trim()))
    } else {
        ("热门植物".to_string(), "为您精选的室内绿植".to_string())
    };

    let mut header = row![column![
        text(title).size(30).color(EMERALD_900),
        text(subtitle).size(15).color(STONE_500),
    ]
    .spacing(6)
    .width(Length::Fill)]
    .align_y(Alignment::End);

    if home.has_query() {
        header = header.push(
            button(text("清除搜索").size(14).color(EMERALD_600))
                .on_press(Message::SearchCleared)
                .style(button::text),
        );
    }

    let body: Element<'_, Message> = if home.is_searching() {
        centered_note("正在搜索植物...")
    } else if home.plants.is_empty() {
        centered_note("未找到相关植物，请尝试其他关键词。")
    } else {
        let cards = home
            .plants
            .iter()
            .map(|plant| {
                plant_card(
                    plant,
                    None,
                    Message::Navigate(Navigation::OpenDetail(plant.name.clone())),
                )
            })
            .collect();
        Wrap::with_elements(cards).spacing(Pixels(32.0)).line_spacing(Pixels(32.0)).into()
    };

    container(Column::new().push(header).push(body).spacing(32))
        .padding([48, 24])
        .width(Length::Fill)
        .style(page)
        .into()
}

fn centered_note(note: &str) -> Element<'_, Message> {
    container(text(note).size(16).color(STONE_500))
        .padding([80, 0])
        .center_x(Length::Fill)
        .into()
}

fn footer<'a>() -> Element<'a, Message> {
    container(
        column![
            text("🌱 GreenSpace").size(22).color(EMERALD_900),
            text("© 2024 GreenSpace Encyclopedia. Powered by Google Gemini.")
                .size(13)
                .color(STONE_500),
        ]
        .spacing(12)
        .align_x(Alignment::Center),
    )
    .padding(48)
    .center_x(Length::Fill)
    .into()
}
