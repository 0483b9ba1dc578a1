use iced::widget::{button, column, container, image, text, text_input, Column};
use iced::{Alignment, ContentFit, Element, Length};

use super::{back_button, hero, page, panel, EMERALD_900, RED_600, STONE_500};
use crate::state::data::DiagnosisResult;
use crate::state::fetch::Fetch;
use crate::state::view::{DoctorState, UploadTarget};
use crate::Message;

/// Plant doctor: optional photo, symptom text, diagnosis report
pub fn view<'a>(doctor: &'a DoctorState, notice: Option<&'a str>) -> Element<'a, Message> {
    let header = container(
        column![
            back_button(),
            text("🩺").size(40),
            text("AI 植得拯救").size(36),
            text("上传照片或描述症状，AI 专家为您诊断。").size(16),
        ]
        .spacing(12)
        .align_x(Alignment::Center),
    )
    .padding([32, 24])
    .width(Length::Fill)
    .style(hero);

    let busy = doctor.report.is_loading();

    let photo: Element<'a, Message> = match &doctor.upload {
        Some(upload) => image(upload.preview.clone())
            .height(Length::Fixed(240.0))
            .content_fit(ContentFit::Contain)
            .into(),
        None => text("📷 点击上传照片").size(16).color(STONE_500).into(),
    };
    let picker = button(container(photo).padding(24).center_x(Length::Fill))
        .on_press_maybe((!busy).then_some(Message::PickImage(UploadTarget::Doctor)))
        .width(Length::Fill)
        .style(button::secondary);

    let description = text_input("例如：叶子边缘发黄，最近浇水比较多...", &doctor.description)
        .on_input(Message::DescriptionChanged)
        .padding(14)
        .size(16);

    let submit = button(
        container(text(if busy { "正在诊断..." } else { "开始诊断" }).size(17))
            .center_x(Length::Fill),
    )
    .on_press_maybe(doctor.can_diagnose().then_some(Message::Diagnose))
    .width(Length::Fill)
    .padding(14)
    .style(button::success);

    let mut form = Column::new()
        .push(text("1. 上传照片 (可选)").size(15).color(EMERALD_900))
        .push(picker)
        .push(text("2. 症状描述").size(15).color(EMERALD_900))
        .push(description)
        .push(submit)
        .spacing(14);
    if let Some(notice) = notice {
        form = form.push(text(notice).size(14).color(RED_600));
    }

    let mut body = Column::new()
        .push(container(form).padding(28).width(Length::Fill).style(panel))
        .spacing(28)
        .padding([32, 24])
        .max_width(720.0);

    match &doctor.report {
        Fetch::Ready(report) => body = body.push(report_panel(report)),
        Fetch::Failed => {
            body = body.push(text("诊断失败，请稍后重试。").size(16).color(RED_600))
        }
        Fetch::Idle | Fetch::Loading(_) => {}
    }

    container(column![header, container(body).center_x(Length::Fill)])
        .width(Length::Fill)
        .style(page)
        .into()
}

fn report_panel(report: &DiagnosisResult) -> Element<'_, Message> {
    container(
        column![
            text("🩺 诊断报告").size(24).color(EMERALD_900),
            finding("问题诊断", &report.diagnosis),
            finding("解决方案", &report.solution),
            finding("预防措施", &report.prevention),
        ]
        .spacing(20),
    )
    .padding(28)
    .width(Length::Fill)
    .style(panel)
    .into()
}

fn finding<'a>(title: &'a str, body: &'a str) -> Element<'a, Message> {
    column![
        text(title).size(17).color(EMERALD_900),
        text(body).size(15).color(STONE_500),
    ]
    .spacing(6)
    .into()
}
