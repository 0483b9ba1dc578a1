use iced::widget::{button, column, container, image, text, Column};
use iced::{Alignment, ContentFit, Element, Length};

use super::card::plant_card;
use super::{back_button, hero, page, panel, EMERALD_900, RED_600, STONE_500};
use crate::state::fetch::Fetch;
use crate::state::view::{IdentifyState, Navigation, UploadTarget};
use crate::Message;

/// Photo identification: upload, identify, then jump to the encyclopedia
pub fn view<'a>(identify: &'a IdentifyState, notice: Option<&'a str>) -> Element<'a, Message> {
    let header = container(
        column![
            back_button(),
            text("🔍").size(40),
            text("拍照识花").size(36),
            text("上传植物照片，AI 立即告诉您它的名字和习性。").size(16),
        ]
        .spacing(12)
        .align_x(Alignment::Center),
    )
    .padding([32, 24])
    .width(Length::Fill)
    .style(hero);

    let busy = identify.result.is_loading();

    let photo: Element<'a, Message> = match &identify.upload {
        Some(upload) => image(upload.preview.clone())
            .height(Length::Fixed(280.0))
            .content_fit(ContentFit::Contain)
            .into(),
        None => text("📷 点击上传植物照片").size(16).color(STONE_500).into(),
    };
    let picker = button(container(photo).padding(24).center_x(Length::Fill))
        .on_press_maybe((!busy).then_some(Message::PickImage(UploadTarget::Identify)))
        .width(Length::Fill)
        .style(button::secondary);

    let submit = button(
        container(text(if busy { "正在识别..." } else { "开始识别" }).size(17))
            .center_x(Length::Fill),
    )
    .on_press_maybe(identify.can_identify().then_some(Message::Identify))
    .width(Length::Fill)
    .padding(14)
    .style(button::primary);

    let mut form = Column::new().push(picker).push(submit).spacing(14);
    if let Some(notice) = notice {
        form = form.push(text(notice).size(14).color(RED_600));
    }

    let mut body = Column::new()
        .push(container(form).padding(28).width(Length::Fill).style(panel))
        .spacing(28)
        .padding([32, 24])
        .max_width(720.0)
        .align_x(Alignment::Center);

    match &identify.result {
        Fetch::Ready(plant) => {
            let preview = identify.upload.as_ref().map(|upload| upload.preview.clone());
            body = body.push(
                column![
                    text("🔍 识别结果").size(24).color(EMERALD_900),
                    plant_card(
                        plant,
                        preview,
                        Message::Navigate(Navigation::OpenDetail(plant.name.clone())),
                    ),
                    text("点击卡片查看详细百科").size(14).color(STONE_500),
                ]
                .spacing(16)
                .align_x(Alignment::Center),
            );
        }
        Fetch::Failed => {
            body = body.push(text("未能识别该植物，请换一张照片重试。").size(16).color(RED_600));
        }
        Fetch::Idle if identify.upload.is_some() => {
            body = body.push(text("点击\"开始识别\"按钮进行分析").size(14).color(STONE_500));
        }
        Fetch::Idle | Fetch::Loading(_) => {}
    }

    container(column![header, container(body).center_x(Length::Fill)])
        .width(Length::Fill)
        .style(page)
        .into()
}
