use iced::widget::{container, scrollable};
use iced::{Element, Length, Task, Theme};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod config;
mod gemini;
mod image_input;
mod state;
mod ui;

use gemini::{GeminiClient, ImagePart, PlantService};
use state::data::{DiagnosisResult, PlantData, SearchResult};
use state::fetch::{Ticket, Tickets};
use state::view::{HomeState, Navigation, Screen, Upload, UploadTarget};

/// Main application state
struct GreenSpace {
    /// Gateway to the model, shared with background tasks
    service: PlantService,
    /// Search box and listing; kept across navigation
    home: HomeState,
    /// The screen currently shown
    screen: Screen,
    /// Problem with the last photo upload, shown under the form
    notice: Option<String>,
    /// Issues one ticket per background request
    tickets: Tickets,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Move between screens
    Navigate(Navigation),
    /// Search box edited
    SearchChanged(String),
    /// Enter pressed or search button clicked
    SearchSubmitted,
    /// "清除搜索" clicked
    SearchCleared,
    /// Background search finished
    SearchCompleted(Ticket, Vec<SearchResult>),
    /// Background encyclopedia fetch finished
    DetailLoaded(Ticket, Option<PlantData>),
    /// Symptom text edited on the doctor screen
    DescriptionChanged(String),
    /// Photo picker requested for a screen
    PickImage(UploadTarget),
    /// Picked photo finished loading
    ImageLoaded(UploadTarget, Result<ImagePart, String>),
    /// "开始诊断" clicked
    Diagnose,
    /// Background diagnosis finished
    DiagnosisComplete(Ticket, Option<DiagnosisResult>),
    /// "开始识别" clicked
    Identify,
    /// Background identification finished
    IdentificationComplete(Ticket, Option<SearchResult>),
}

impl GreenSpace {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = config::Config::load();
        tracing::info!("🌿 GreenSpace starting (model: {})", config.model);

        let service = PlantService::new(Arc::new(GeminiClient::new(&config)));

        (
            GreenSpace {
                service,
                home: HomeState::default(),
                screen: Screen::default(),
                notice: None,
                tickets: Tickets::default(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(navigation) => {
                let from = self.screen.name();
                self.screen = std::mem::take(&mut self.screen).transition(navigation);
                self.notice = None;
                tracing::debug!("🧭 {} → {}", from, self.screen.name());

                // Entering the detail screen kicks off its fetch
                match self.screen.begin_detail(&mut self.tickets) {
                    Some((ticket, plant_name)) => {
                        let service = self.service.clone();
                        Task::perform(
                            async move { service.plant_details(&plant_name).await },
                            move |data| Message::DetailLoaded(ticket, data),
                        )
                    }
                    None => Task::none(),
                }
            }
            Message::SearchChanged(query) => {
                self.home.query = query;
                Task::none()
            }
            Message::SearchSubmitted => match self.home.begin_search(&mut self.tickets) {
                Some((ticket, query)) => {
                    tracing::info!("🔍 Searching for {:?}", query);
                    let service = self.service.clone();
                    Task::perform(
                        async move { service.search_plants(&query).await },
                        move |plants| Message::SearchCompleted(ticket, plants),
                    )
                }
                None => Task::none(),
            },
            Message::SearchCleared => {
                self.home.clear();
                Task::none()
            }
            Message::SearchCompleted(ticket, plants) => {
                let count = plants.len();
                if self.home.finish_search(ticket, plants) {
                    tracing::info!("📊 Search returned {} plants", count);
                } else {
                    tracing::debug!("Dropped stale search results ({:?})", ticket);
                }
                Task::none()
            }
            Message::DetailLoaded(ticket, data) => {
                if !self.screen.apply_detail(ticket, data) {
                    tracing::debug!("Dropped stale details ({:?})", ticket);
                }
                Task::none()
            }
            Message::DescriptionChanged(description) => {
                if let Screen::Doctor(doctor) = &mut self.screen {
                    doctor.description = description;
                }
                Task::none()
            }
            Message::PickImage(target) => {
                // Show the native file picker
                if let Some(path) = image_input::pick_image("选择植物照片") {
                    return Task::perform(image_input::load_image(path), move |result| {
                        Message::ImageLoaded(target, result.map_err(|e| e.to_string()))
                    });
                }
                Task::none()
            }
            Message::ImageLoaded(target, result) => {
                match result {
                    Ok(image) => {
                        self.notice = None;
                        if !self.screen.attach_upload(target, Upload::new(image)) {
                            tracing::debug!("Dropped photo picked for {:?}", target);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("⚠️  Could not load photo: {}", e);
                        self.notice = Some(format!("无法读取照片：{e}"));
                    }
                }
                Task::none()
            }
            Message::Diagnose => match self.screen.begin_diagnosis(&mut self.tickets) {
                Some((ticket, description, image)) => {
                    let service = self.service.clone();
                    Task::perform(
                        async move { service.diagnose(&description, image).await },
                        move |report| Message::DiagnosisComplete(ticket, report),
                    )
                }
                None => Task::none(),
            },
            Message::DiagnosisComplete(ticket, report) => {
                if !self.screen.apply_diagnosis(ticket, report) {
                    tracing::debug!("Dropped stale diagnosis ({:?})", ticket);
                }
                Task::none()
            }
            Message::Identify => match self.screen.begin_identification(&mut self.tickets) {
                Some((ticket, image)) => {
                    let service = self.service.clone();
                    Task::perform(
                        async move { service.identify(image).await },
                        move |plant| Message::IdentificationComplete(ticket, plant),
                    )
                }
                None => Task::none(),
            },
            Message::IdentificationComplete(ticket, plant) => {
                if !self.screen.apply_identification(ticket, plant) {
                    tracing::debug!("Dropped stale identification ({:?})", ticket);
                }
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let notice = self.notice.as_deref();
        let content = match &self.screen {
            Screen::Home => ui::home::view(&self.home),
            Screen::Detail(detail) => ui::detail::view(detail),
            Screen::Doctor(doctor) => ui::doctor::view(doctor, notice),
            Screen::Identify(identify) => ui::identify::view(identify, notice),
        };

        container(scrollable(content).height(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(ui::page)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("greenspace=info")),
        )
        .with_target(false)
        .init();

    iced::application("GreenSpace 室内植物百科", GreenSpace::update, GreenSpace::view)
        .theme(GreenSpace::theme)
        .window_size((1200.0, 860.0))
        .centered()
        .run_with(GreenSpace::new)
}
