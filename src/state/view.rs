/// Screen state and navigation
///
/// The app is always on exactly one `Screen`. Detail, doctor and identify
/// screens own their inputs and fetch slots, so leaving a screen drops
/// them. The home listing lives in `HomeState` and survives navigation.

use iced::widget::image::Handle;

use super::data::{default_plants, DiagnosisResult, PlantData, SearchResult};
use super::fetch::{Fetch, Ticket, Tickets};
use crate::gemini::ImagePart;

/// Home screen: search box and plant grid
#[derive(Debug, Clone)]
pub struct HomeState {
    pub query: String,
    pub plants: Vec<SearchResult>,
    /// Search whose results the listing is waiting for
    pub pending: Option<Ticket>,
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            query: String::new(),
            plants: default_plants(),
            pending: None,
        }
    }
}

impl HomeState {
    pub fn has_query(&self) -> bool {
        !self.query.trim().is_empty()
    }

    pub fn is_searching(&self) -> bool {
        self.pending.is_some()
    }

    pub fn can_search(&self) -> bool {
        !self.is_searching()
    }

    /// Start a search for the current query
    ///
    /// Returns the ticket and query to send, or `None` when the query is
    /// blank, in which case the default listing is restored immediately.
    pub fn begin_search(&mut self, tickets: &mut Tickets) -> Option<(Ticket, String)> {
        if !self.can_search() {
            return None;
        }
        if !self.has_query() {
            self.plants = default_plants();
            return None;
        }
        let ticket = tickets.issue();
        self.pending = Some(ticket);
        Some((ticket, self.query.clone()))
    }

    /// Store search results; ignored unless `ticket` is the pending search
    pub fn finish_search(&mut self, ticket: Ticket, plants: Vec<SearchResult>) -> bool {
        if self.pending != Some(ticket) {
            return false;
        }
        self.plants = plants;
        self.pending = None;
        true
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.plants = default_plants();
        self.pending = None;
    }
}

/// A photo the user picked, with its on-screen preview
#[derive(Debug, Clone)]
pub struct Upload {
    pub image: ImagePart,
    pub preview: Handle,
}

impl Upload {
    pub fn new(image: ImagePart) -> Self {
        let preview = Handle::from_bytes(image.bytes().to_vec());
        Self { image, preview }
    }
}

/// Which screen a picked photo belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTarget {
    Doctor,
    Identify,
}

#[derive(Debug, Clone)]
pub struct DetailState {
    pub plant_name: String,
    pub data: Fetch<PlantData>,
}

#[derive(Debug, Clone, Default)]
pub struct DoctorState {
    pub description: String,
    pub upload: Option<Upload>,
    pub report: Fetch<DiagnosisResult>,
}

impl DoctorState {
    /// Needs a symptom description or a photo, and nothing in flight
    pub fn can_diagnose(&self) -> bool {
        !self.report.is_loading()
            && (!self.description.trim().is_empty() || self.upload.is_some())
    }
}

#[derive(Debug, Clone, Default)]
pub struct IdentifyState {
    pub upload: Option<Upload>,
    pub result: Fetch<SearchResult>,
}

impl IdentifyState {
    /// Needs a photo, and nothing in flight
    pub fn can_identify(&self) -> bool {
        !self.result.is_loading() && self.upload.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub enum Screen {
    #[default]
    Home,
    Detail(DetailState),
    Doctor(DoctorState),
    Identify(IdentifyState),
}

/// User-initiated moves between screens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Open the encyclopedia entry for a plant name
    OpenDetail(String),
    OpenDoctor,
    OpenIdentify,
    Back,
}

impl Screen {
    /// Pure transition function
    ///
    /// Moves that are not allowed from the current screen leave it as is.
    /// Entering a screen always starts from fresh state.
    pub fn transition(self, navigation: Navigation) -> Screen {
        match (self, navigation) {
            (Screen::Home | Screen::Identify(_), Navigation::OpenDetail(plant_name)) => {
                Screen::Detail(DetailState { plant_name, data: Fetch::Idle })
            }
            (Screen::Home, Navigation::OpenDoctor) => Screen::Doctor(DoctorState::default()),
            (Screen::Home, Navigation::OpenIdentify) => Screen::Identify(IdentifyState::default()),
            (_, Navigation::Back) => Screen::Home,
            (current, _) => current,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Detail(_) => "detail",
            Screen::Doctor(_) => "doctor",
            Screen::Identify(_) => "identify",
        }
    }

    /// Start the encyclopedia fetch for a freshly opened detail screen
    pub fn begin_detail(&mut self, tickets: &mut Tickets) -> Option<(Ticket, String)> {
        match self {
            Screen::Detail(detail) if detail.data == Fetch::Idle => {
                let ticket = tickets.issue();
                detail.data = Fetch::Loading(ticket);
                Some((ticket, detail.plant_name.clone()))
            }
            _ => None,
        }
    }

    /// Store an encyclopedia entry if we are still waiting for it
    pub fn apply_detail(&mut self, ticket: Ticket, data: Option<PlantData>) -> bool {
        match self {
            Screen::Detail(detail) => detail.data.settle(ticket, data),
            _ => false,
        }
    }

    /// Store a diagnosis if the doctor screen is still waiting for it
    pub fn apply_diagnosis(&mut self, ticket: Ticket, report: Option<DiagnosisResult>) -> bool {
        match self {
            Screen::Doctor(doctor) => doctor.report.settle(ticket, report),
            _ => false,
        }
    }

    /// Store an identification if the identify screen is still waiting for it
    pub fn apply_identification(&mut self, ticket: Ticket, plant: Option<SearchResult>) -> bool {
        match self {
            Screen::Identify(identify) => identify.result.settle(ticket, plant),
            _ => false,
        }
    }

    /// Attach a picked photo to the screen it was picked for
    ///
    /// A new photo on the identify screen clears the previous result.
    /// Photos are refused while a request is in flight.
    pub fn attach_upload(&mut self, target: UploadTarget, upload: Upload) -> bool {
        match (self, target) {
            (Screen::Doctor(doctor), UploadTarget::Doctor) if !doctor.report.is_loading() => {
                doctor.upload = Some(upload);
                true
            }
            (Screen::Identify(identify), UploadTarget::Identify)
                if !identify.result.is_loading() =>
            {
                identify.upload = Some(upload);
                identify.result = Fetch::Idle;
                true
            }
            _ => false,
        }
    }

    /// Mark the doctor screen as loading and hand back the request inputs
    pub fn begin_diagnosis(
        &mut self,
        tickets: &mut Tickets,
    ) -> Option<(Ticket, String, Option<ImagePart>)> {
        match self {
            Screen::Doctor(doctor) if doctor.can_diagnose() => {
                let ticket = tickets.issue();
                doctor.report = Fetch::Loading(ticket);
                Some((
                    ticket,
                    doctor.description.clone(),
                    doctor.upload.as_ref().map(|u| u.image.clone()),
                ))
            }
            _ => None,
        }
    }

    /// Mark the identify screen as loading and hand back the photo
    pub fn begin_identification(&mut self, tickets: &mut Tickets) -> Option<(Ticket, ImagePart)> {
        match self {
            Screen::Identify(identify) if identify.can_identify() => {
                let image = identify.upload.as_ref()?.image.clone();
                let ticket = tickets.issue();
                identify.result = Fetch::Loading(ticket);
                Some((ticket, image))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{Difficulty, PlantCare};

    fn upload() -> Upload {
        Upload::new(ImagePart::new("image/jpeg", vec![0xff, 0xd8, 0xff]).unwrap())
    }

    fn plant(name: &str) -> SearchResult {
        SearchResult {
            name: name.to_string(),
            scientific_name: "Ficus lyrata".to_string(),
            short_description: "叶片如提琴".to_string(),
            image_url: None,
        }
    }

    fn plant_data(name: &str) -> PlantData {
        let care = |s: &str| s.to_string();
        PlantData {
            name: name.to_string(),
            scientific_name: "Monstera deliciosa".to_string(),
            description: "原产于中美洲。".to_string(),
            difficulty: Difficulty::Easy,
            care: PlantCare {
                light: care("散射光"),
                water: care("见干见湿"),
                soil: care("疏松"),
                temperature: care("18-30°C"),
                humidity: care("高"),
                fertilizer: care("薄肥勤施"),
            },
            tags: vec!["网红".to_string()],
            image_url: None,
        }
    }

    #[test]
    fn test_initial_screen_is_home() {
        assert!(matches!(Screen::default(), Screen::Home));
    }

    #[test]
    fn test_home_transitions() {
        let detail = Screen::Home.transition(Navigation::OpenDetail("绿萝".into()));
        match &detail {
            Screen::Detail(d) => {
                assert_eq!(d.plant_name, "绿萝");
                assert_eq!(d.data, Fetch::Idle);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(Screen::Home.transition(Navigation::OpenDoctor), Screen::Doctor(_)));
        assert!(matches!(Screen::Home.transition(Navigation::OpenIdentify), Screen::Identify(_)));
        assert!(matches!(Screen::Home.transition(Navigation::Back), Screen::Home));
    }

    #[test]
    fn test_detail_fetch_starts_once() {
        let mut tickets = Tickets::default();
        let mut screen = Screen::Home.transition(Navigation::OpenDetail("绿萝".into()));

        let (ticket, plant_name) = screen.begin_detail(&mut tickets).unwrap();
        assert_eq!(plant_name, "绿萝");
        assert!(screen.begin_detail(&mut tickets).is_none());

        // A refused move keeps the screen and does not refetch
        let mut screen = screen.transition(Navigation::OpenDoctor);
        assert!(screen.begin_detail(&mut tickets).is_none());
        assert!(screen.apply_detail(ticket, Some(plant_data("绿萝"))));
    }

    #[test]
    fn test_back_returns_home_from_every_screen() {
        for nav in [
            Navigation::OpenDetail("龟背竹".into()),
            Navigation::OpenDoctor,
            Navigation::OpenIdentify,
        ] {
            let screen = Screen::Home.transition(nav);
            assert!(matches!(screen.transition(Navigation::Back), Screen::Home));
        }
    }

    #[test]
    fn test_identify_can_jump_to_detail() {
        let mut tickets = Tickets::default();
        let mut screen = Screen::Home.transition(Navigation::OpenIdentify);
        assert!(screen.attach_upload(UploadTarget::Identify, upload()));
        let (ticket, _) = screen.begin_identification(&mut tickets).unwrap();
        assert!(screen.apply_identification(ticket, Some(plant("琴叶榕"))));

        match screen.transition(Navigation::OpenDetail("琴叶榕".into())) {
            Screen::Detail(d) => assert_eq!(d.plant_name, "琴叶榕"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_disallowed_moves_are_ignored() {
        let doctor = Screen::Home.transition(Navigation::OpenDoctor);
        assert!(matches!(doctor.transition(Navigation::OpenIdentify), Screen::Doctor(_)));

        let doctor = Screen::Home.transition(Navigation::OpenDoctor);
        assert!(matches!(
            doctor.transition(Navigation::OpenDetail("绿萝".into())),
            Screen::Doctor(_)
        ));

        let detail = Screen::Home.transition(Navigation::OpenDetail("绿萝".into()));
        assert!(matches!(detail.transition(Navigation::OpenDoctor), Screen::Detail(_)));
    }

    #[test]
    fn test_screens_reset_when_left() {
        let mut tickets = Tickets::default();
        let mut screen = Screen::Home.transition(Navigation::OpenDoctor);
        if let Screen::Doctor(doctor) = &mut screen {
            doctor.description = "叶子发黄".to_string();
        }
        assert!(screen.begin_diagnosis(&mut tickets).is_some());

        let screen = screen.transition(Navigation::Back).transition(Navigation::OpenDoctor);
        match screen {
            Screen::Doctor(doctor) => {
                assert!(doctor.description.is_empty());
                assert_eq!(doctor.report, Fetch::Idle);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_detail_failure_shows_fallback_and_back_works() {
        let mut tickets = Tickets::default();
        let mut screen = Screen::Home.transition(Navigation::OpenDetail("不存在的植物".into()));
        let (ticket, _) = screen.begin_detail(&mut tickets).unwrap();
        assert!(screen.apply_detail(ticket, None));
        match &screen {
            Screen::Detail(d) => assert_eq!(d.data, Fetch::Failed),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(screen.transition(Navigation::Back), Screen::Home));
    }

    #[test]
    fn test_stale_results_are_dropped() {
        let mut tickets = Tickets::default();

        // Detail for a plant we opened before
        let mut screen = Screen::Home.transition(Navigation::OpenDetail("龟背竹".into()));
        let (old, _) = screen.begin_detail(&mut tickets).unwrap();
        let mut screen = screen
            .transition(Navigation::Back)
            .transition(Navigation::OpenDetail("绿萝".into()));
        let (current, _) = screen.begin_detail(&mut tickets).unwrap();
        assert!(!screen.apply_detail(old, Some(plant_data("龟背竹"))));
        assert!(screen.apply_detail(current, Some(plant_data("绿萝"))));
        // Second delivery for the same request
        assert!(!screen.apply_detail(current, None));

        // Results for screens we already left
        let mut home = Screen::Home;
        assert!(!home.apply_diagnosis(current, None));
        assert!(!home.apply_identification(current, Some(plant("琴叶榕"))));
        assert!(!home.apply_detail(current, None));
    }

    #[test]
    fn test_diagnosis_from_left_screen_is_dropped_on_reentry() {
        let mut tickets = Tickets::default();
        let mut screen = Screen::Home.transition(Navigation::OpenDoctor);
        if let Screen::Doctor(doctor) = &mut screen {
            doctor.description = "黄叶".to_string();
        }
        let (old, _, _) = screen.begin_diagnosis(&mut tickets).unwrap();

        let mut screen = screen.transition(Navigation::Back).transition(Navigation::OpenDoctor);
        if let Screen::Doctor(doctor) = &mut screen {
            doctor.description = "虫害".to_string();
        }
        let (current, description, _) = screen.begin_diagnosis(&mut tickets).unwrap();
        assert_eq!(description, "虫害");

        let stale = DiagnosisResult {
            diagnosis: "缺铁性黄化".to_string(),
            solution: "补充铁肥".to_string(),
            prevention: "定期施肥".to_string(),
        };
        assert!(!screen.apply_diagnosis(old, Some(stale)));
        match &screen {
            Screen::Doctor(doctor) => assert_eq!(doctor.report, Fetch::Loading(current)),
            other => panic!("unexpected {other:?}"),
        }

        let fresh = DiagnosisResult {
            diagnosis: "红蜘蛛".to_string(),
            solution: "喷洒杀螨剂".to_string(),
            prevention: "保持通风".to_string(),
        };
        assert!(screen.apply_diagnosis(current, Some(fresh.clone())));
        match &screen {
            Screen::Doctor(doctor) => assert_eq!(doctor.report, Fetch::Ready(fresh)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_identification_from_left_screen_is_dropped_on_reentry() {
        let mut tickets = Tickets::default();
        let mut screen = Screen::Home.transition(Navigation::OpenIdentify);
        screen.attach_upload(UploadTarget::Identify, upload());
        let (old, _) = screen.begin_identification(&mut tickets).unwrap();

        let mut screen = screen.transition(Navigation::Back).transition(Navigation::OpenIdentify);
        screen.attach_upload(UploadTarget::Identify, upload());
        let (current, _) = screen.begin_identification(&mut tickets).unwrap();

        assert!(!screen.apply_identification(old, Some(plant("金琥"))));
        assert!(screen.apply_identification(current, Some(plant("琴叶榕"))));
        match &screen {
            Screen::Identify(identify) => assert_eq!(identify.result, Fetch::Ready(plant("琴叶榕"))),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_diagnose_enablement() {
        let mut tickets = Tickets::default();
        let mut doctor = DoctorState::default();
        assert!(!doctor.can_diagnose());

        doctor.description = "   ".to_string();
        assert!(!doctor.can_diagnose());

        doctor.description = "叶尖焦枯".to_string();
        assert!(doctor.can_diagnose());

        doctor.description.clear();
        doctor.upload = Some(upload());
        assert!(doctor.can_diagnose());

        doctor.report = Fetch::Loading(tickets.issue());
        assert!(!doctor.can_diagnose());
    }

    #[test]
    fn test_identify_enablement() {
        let mut tickets = Tickets::default();
        let mut identify = IdentifyState::default();
        assert!(!identify.can_identify());

        identify.upload = Some(upload());
        assert!(identify.can_identify());

        identify.result = Fetch::Loading(tickets.issue());
        assert!(!identify.can_identify());
    }

    #[test]
    fn test_new_photo_clears_identification() {
        let mut tickets = Tickets::default();
        let mut screen = Screen::Home.transition(Navigation::OpenIdentify);
        screen.attach_upload(UploadTarget::Identify, upload());
        let (ticket, _) = screen.begin_identification(&mut tickets).unwrap();

        // No swapping photos mid-request
        assert!(!screen.attach_upload(UploadTarget::Identify, upload()));

        screen.apply_identification(ticket, Some(plant("琴叶榕")));
        assert!(screen.attach_upload(UploadTarget::Identify, upload()));
        match &screen {
            Screen::Identify(identify) => assert_eq!(identify.result, Fetch::Idle),
            other => panic!("unexpected {other:?}"),
        }

        // Photo picked for the wrong screen
        assert!(!screen.attach_upload(UploadTarget::Doctor, upload()));
    }

    #[test]
    fn test_blank_search_restores_default_listing() {
        let mut tickets = Tickets::default();
        let mut home = HomeState {
            query: " \t ".to_string(),
            plants: vec![plant("琴叶榕")],
            pending: None,
        };
        assert_eq!(home.begin_search(&mut tickets), None);
        assert_eq!(home.plants, default_plants());
        assert!(!home.is_searching());
    }

    #[test]
    fn test_search_lifecycle() {
        let mut tickets = Tickets::default();
        let mut home = HomeState::default();
        home.query = "绿萝".to_string();
        let (ticket, query) = home.begin_search(&mut tickets).unwrap();
        assert_eq!(query, "绿萝");
        assert!(!home.can_search());
        assert_eq!(home.begin_search(&mut tickets), None);

        assert!(home.finish_search(ticket, vec![plant("绿萝")]));
        assert_eq!(home.plants.len(), 1);
        assert!(home.can_search());
    }

    #[test]
    fn test_clear_discards_in_flight_search() {
        let mut tickets = Tickets::default();
        let mut home = HomeState::default();
        home.query = "仙人掌".to_string();
        let (ticket, _) = home.begin_search(&mut tickets).unwrap();
        home.clear();

        assert!(!home.finish_search(ticket, vec![plant("金琥")]));
        assert_eq!(home.plants, default_plants());
        assert!(home.query.is_empty());
    }

    #[test]
    fn test_search_after_clear_keeps_only_newest_results() {
        let mut tickets = Tickets::default();
        let mut home = HomeState::default();
        home.query = "仙人掌".to_string();
        let (old, _) = home.begin_search(&mut tickets).unwrap();
        home.clear();

        home.query = "绿萝".to_string();
        let (current, _) = home.begin_search(&mut tickets).unwrap();

        assert!(!home.finish_search(old, vec![plant("金琥")]));
        assert!(home.is_searching());

        assert!(home.finish_search(current, vec![plant("绿萝")]));
        assert_eq!(home.plants, vec![plant("绿萝")]);
        assert_eq!(home.query, "绿萝");
        assert!(!home.is_searching());
    }
}
