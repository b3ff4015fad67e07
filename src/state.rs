use std::collections::VecDeque;

use crate::assessment::{AssessmentResult, Corner, GuidedAssessment, CORNERS};
use crate::assessment_fetch::{run_assessment, AssessmentConfig};
use crate::model::{
    generate_id, now_iso, today_iso, AttendanceRecord, AttendanceStatus, CalendarEvent,
    CornerReport, EventType, GameResult, Player, Position, SkillRating, SkillScores,
};
use crate::roster::{self, NewPlayer};
use crate::settings::{self, CoachSession, TeamSettings};
use crate::store::{
    Store, KEY_API_KEY, KEY_ATTENDANCE, KEY_CORNER_REPORTS, KEY_EVENTS, KEY_PLAYERS, KEY_SEEDED,
    KEY_SETTINGS, KEY_SKILL_RATINGS,
};
use crate::{attendance, schedule, seed, skills};

/// All persisted collections plus the store they round-trip through. Every
/// mutating method rewrites the affected key before returning.
#[derive(Debug)]
pub struct AppData {
    store: Store,
    pub players: Vec<Player>,
    pub events: Vec<CalendarEvent>,
    pub ratings: Vec<SkillRating>,
    pub attendance: Vec<AttendanceRecord>,
    pub reports: Vec<CornerReport>,
    pub settings: TeamSettings,
    pending_logs: Vec<String>,
}

impl AppData {
    pub fn load(store: Store) -> AppData {
        let mut data = AppData {
            players: store.get(KEY_PLAYERS).unwrap_or_default(),
            events: store.get(KEY_EVENTS).unwrap_or_default(),
            ratings: store.get(KEY_SKILL_RATINGS).unwrap_or_default(),
            attendance: store.get(KEY_ATTENDANCE).unwrap_or_default(),
            reports: store.get(KEY_CORNER_REPORTS).unwrap_or_default(),
            settings: store.get(KEY_SETTINGS).unwrap_or_default(),
            store,
            pending_logs: Vec::new(),
        };
        data.seed_if_empty();
        data
    }

    /// First launch only: put a starter roster in place so every screen has
    /// something to show. The marker survives a coach deleting everything.
    fn seed_if_empty(&mut self) {
        if self.store.get::<bool>(KEY_SEEDED).unwrap_or(false) {
            return;
        }
        self.players = seed::seed_players();
        self.events = seed::seed_events();
        self.ratings = seed::seed_ratings();
        self.attendance = seed::seed_attendance();
        self.persist(KEY_PLAYERS);
        self.persist(KEY_EVENTS);
        self.persist(KEY_SKILL_RATINGS);
        self.persist(KEY_ATTENDANCE);
        if let Err(err) = self.store.set(KEY_SEEDED, &true) {
            self.pending_logs.push(format!("[WARN] Save failed: {err:#}"));
        }
    }

    fn persist(&mut self, key: &str) {
        let result = match key {
            KEY_PLAYERS => self.store.set(key, &self.players),
            KEY_EVENTS => self.store.set(key, &self.events),
            KEY_SKILL_RATINGS => self.store.set(key, &self.ratings),
            KEY_ATTENDANCE => self.store.set(key, &self.attendance),
            KEY_CORNER_REPORTS => self.store.set(key, &self.reports),
            KEY_SETTINGS => self.store.set(key, &self.settings),
            _ => Ok(()),
        };
        if let Err(err) = result {
            self.pending_logs.push(format!("[WARN] Save failed: {err:#}"));
        }
    }

    pub fn take_pending_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_logs)
    }

    // -- players ------------------------------------------------------------

    pub fn add_player(&mut self, new: NewPlayer) -> Player {
        let player = roster::add_player(&mut self.players, new);
        self.persist(KEY_PLAYERS);
        player
    }

    pub fn update_player(&mut self, id: &str, apply: impl FnOnce(&mut Player)) {
        roster::update_player(&mut self.players, id, apply);
        self.persist(KEY_PLAYERS);
    }

    /// Removing a player takes their ratings, attendance, and reports with
    /// them; orphaned child records would silently skew attendance math.
    pub fn delete_player(&mut self, id: &str) {
        roster::delete_player(&mut self.players, id);
        self.ratings.retain(|r| r.player_id != id);
        self.attendance.retain(|r| r.player_id != id);
        self.reports.retain(|r| r.player_id != id);
        self.persist(KEY_PLAYERS);
        self.persist(KEY_SKILL_RATINGS);
        self.persist(KEY_ATTENDANCE);
        self.persist(KEY_CORNER_REPORTS);
    }

    // -- events -------------------------------------------------------------

    pub fn add_event(&mut self, event: CalendarEvent) -> CalendarEvent {
        let event = schedule::add_event(&mut self.events, event);
        self.persist(KEY_EVENTS);
        event
    }

    pub fn update_event(&mut self, id: &str, apply: impl FnOnce(&mut CalendarEvent)) {
        schedule::update_event(&mut self.events, id, apply);
        self.persist(KEY_EVENTS);
    }

    pub fn delete_event(&mut self, id: &str) {
        schedule::delete_event(&mut self.events, id);
        self.attendance.retain(|r| r.event_id != id);
        self.persist(KEY_EVENTS);
        self.persist(KEY_ATTENDANCE);
    }

    // -- skill ratings ------------------------------------------------------

    pub fn add_rating(&mut self, rating: SkillRating) -> SkillRating {
        let rating = skills::add_rating(&mut self.ratings, rating);
        self.persist(KEY_SKILL_RATINGS);
        rating
    }

    pub fn delete_rating(&mut self, id: &str) {
        skills::delete_rating(&mut self.ratings, id);
        self.persist(KEY_SKILL_RATINGS);
    }

    // -- attendance ---------------------------------------------------------

    pub fn mark_attendance(
        &mut self,
        event_id: &str,
        player_id: &str,
        status: AttendanceStatus,
        notes: Option<String>,
    ) -> AttendanceRecord {
        let record =
            attendance::mark_attendance(&mut self.attendance, event_id, player_id, status, notes);
        self.persist(KEY_ATTENDANCE);
        record
    }

    // -- corner reports -----------------------------------------------------

    pub fn add_report(
        &mut self,
        player_id: &str,
        assessed_by: &str,
        result: &AssessmentResult,
    ) -> CornerReport {
        let report = CornerReport {
            id: generate_id(),
            player_id: player_id.to_string(),
            assessed_at: now_iso(),
            assessed_by: assessed_by.to_string(),
            technical: result.technical.clone(),
            tactical: result.tactical.clone(),
            physical: result.physical.clone(),
            psychological: result.psychological.clone(),
            strengths: result.strengths.clone(),
            areas_to_improve: result.areas_to_improve.clone(),
            drills: result.drills.clone(),
            summary: result.summary.clone(),
            demo: result.demo,
        };
        self.reports.push(report.clone());
        self.persist(KEY_CORNER_REPORTS);
        report
    }

    pub fn delete_report(&mut self, id: &str) {
        self.reports.retain(|r| r.id != id);
        self.persist(KEY_CORNER_REPORTS);
    }

    /// Newest first.
    pub fn reports_for_player(&self, player_id: &str) -> Vec<&CornerReport> {
        let mut out: Vec<&CornerReport> = self
            .reports
            .iter()
            .filter(|r| r.player_id == player_id)
            .collect();
        out.sort_by(|a, b| {
            b.assessed_at
                .cmp(&a.assessed_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        out
    }

    pub fn latest_report_for_player(&self, player_id: &str) -> Option<&CornerReport> {
        self.reports_for_player(player_id).first().copied()
    }

    // -- settings & credentials --------------------------------------------

    pub fn update_settings(&mut self, apply: impl FnOnce(&mut TeamSettings)) {
        apply(&mut self.settings);
        self.persist(KEY_SETTINGS);
    }

    pub fn assessment_config(&self) -> AssessmentConfig {
        AssessmentConfig::resolve(&self.store)
    }

    pub fn set_api_key(&mut self, key: Option<&str>) {
        let trimmed = key.map(str::trim).filter(|k| !k.is_empty());
        let result = match trimmed {
            Some(k) => self.store.set(KEY_API_KEY, &k.to_string()),
            None => self.store.remove(KEY_API_KEY),
        };
        if let Err(err) = result {
            self.pending_logs.push(format!("[WARN] Save failed: {err:#}"));
        }
    }

    pub fn has_stored_api_key(&self) -> bool {
        self.store.get::<String>(KEY_API_KEY).is_some()
    }

    // -- backup -------------------------------------------------------------

    pub fn export_backup(&self) -> anyhow::Result<String> {
        self.store.export_backup()
    }

    /// Wholesale key overwrite, then reload every collection from the store
    /// so the in-memory snapshots match what was imported.
    pub fn import_backup(&mut self, raw: &str) -> anyhow::Result<()> {
        self.store.import_backup(raw)?;
        self.players = self.store.get(KEY_PLAYERS).unwrap_or_default();
        self.events = self.store.get(KEY_EVENTS).unwrap_or_default();
        self.ratings = self.store.get(KEY_SKILL_RATINGS).unwrap_or_default();
        self.attendance = self.store.get(KEY_ATTENDANCE).unwrap_or_default();
        self.reports = self.store.get(KEY_CORNER_REPORTS).unwrap_or_default();
        self.settings = self.store.get(KEY_SETTINGS).unwrap_or_default();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Terminal UI state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Login,
    Roster,
    Schedule,
    Attendance,
    Corner,
    Settings,
    Parent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleView {
    Upcoming,
    Past,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CornerStage {
    PickPlayer,
    /// Index into CORNERS.
    Checklist(usize),
    Result,
    History,
}

#[derive(Debug, Clone)]
enum Flow {
    CoachPin,
    ParentCode,
    ApiKey,
    AddPlayer,
    AddEvent,
    RateSkills { player_id: String },
    RecordResult { event_id: String },
    CornerNotes { corner: Corner },
    EditSettings,
    ImportBackup,
    ExportBackup,
}

/// One single-line prompt; multi-field forms advance `step` through the
/// field list until the flow commits.
#[derive(Debug, Clone)]
pub struct PromptState {
    pub label: String,
    pub buffer: String,
    pub masked: bool,
    flow: Flow,
    step: usize,
    collected: Vec<String>,
}

const ADD_PLAYER_FIELDS: [&str; 9] = [
    "First name",
    "Last name",
    "Jersey number (1-99)",
    "Date of birth (YYYY-MM-DD)",
    "Position (GK/Def/Mid/Fwd/Any)",
    "Parent name",
    "Parent email",
    "Parent phone",
    "Coach notes",
];

const ADD_EVENT_FIELDS: [&str; 6] = [
    "Type (Game/Practice/Tournament)",
    "Title",
    "Date (YYYY-MM-DD)",
    "Time (HH:MM)",
    "Location",
    "Opponent (blank for none)",
];

// Session label + 8 skills + coach notes.
const RATE_SKILLS_PROMPTS: usize = 10;

const RECORD_RESULT_FIELDS: [&str; 3] = [
    "Result (Win/Loss/Draw)",
    "Goals for",
    "Goals against",
];

const SETTINGS_FIELDS: [&str; 5] = [
    "Team name",
    "Season",
    "Coach name",
    "Coach PIN (4 digits)",
    "Team color (hex)",
];

pub struct AppState {
    pub data: AppData,
    pub screen: Screen,
    pub session: Option<CoachSession>,
    pub schedule_view: ScheduleView,
    pub selected: usize,
    /// Event being taken attendance for, when drilled in.
    pub attendance_event: Option<String>,
    pub corner_stage: CornerStage,
    pub corner_player: Option<String>,
    pub guided: GuidedAssessment,
    pub last_result: Option<AssessmentResult>,
    pub parent_player: Option<String>,
    pub prompt: Option<PromptState>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl AppState {
    pub fn new(data: AppData) -> AppState {
        let mut state = AppState {
            data,
            screen: Screen::Login,
            session: None,
            schedule_view: ScheduleView::Upcoming,
            selected: 0,
            attendance_event: None,
            corner_stage: CornerStage::PickPlayer,
            corner_player: None,
            guided: GuidedAssessment::default(),
            last_result: None,
            parent_player: None,
            prompt: None,
            logs: VecDeque::with_capacity(64),
            help_overlay: false,
        };
        state.drain_data_logs();
        state
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 100;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    fn drain_data_logs(&mut self) {
        for line in self.data.take_pending_logs() {
            self.push_log(line);
        }
    }

    pub fn logout(&mut self) {
        self.session = None;
        self.parent_player = None;
        self.screen = Screen::Login;
        self.selected = 0;
        self.push_log("[INFO] Logged out");
    }

    // -- selection ----------------------------------------------------------

    fn list_len(&self) -> usize {
        match self.screen {
            Screen::Roster => roster::active_players(&self.data.players).len(),
            Screen::Schedule => match self.schedule_view {
                ScheduleView::Upcoming => schedule::upcoming(&self.data.events, &today_iso()).len(),
                ScheduleView::Past => schedule::past(&self.data.events, &today_iso()).len(),
            },
            Screen::Attendance => match &self.attendance_event {
                Some(_) => roster::active_players(&self.data.players).len(),
                None => self.data.events.len(),
            },
            Screen::Corner => match self.corner_stage {
                CornerStage::PickPlayer => roster::active_players(&self.data.players).len(),
                CornerStage::Checklist(step) => crate::assessment::guide_items(CORNERS[step]).len(),
                CornerStage::History => self
                    .corner_player
                    .as_deref()
                    .map(|id| self.data.reports_for_player(id).len())
                    .unwrap_or(0),
                CornerStage::Result => 0,
            },
            _ => 0,
        }
    }

    pub fn select_next(&mut self) {
        let total = self.list_len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let total = self.list_len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        if self.selected == 0 {
            self.selected = total - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn clamp_selection(&mut self) {
        let total = self.list_len();
        if total == 0 {
            self.selected = 0;
        } else if self.selected >= total {
            self.selected = total - 1;
        }
    }

    pub fn selected_player_id(&self) -> Option<String> {
        roster::active_players(&self.data.players)
            .get(self.selected)
            .map(|p| p.id.clone())
    }

    pub fn selected_event_id(&self) -> Option<String> {
        match self.screen {
            Screen::Schedule => {
                let today = today_iso();
                let list = match self.schedule_view {
                    ScheduleView::Upcoming => schedule::upcoming(&self.data.events, &today),
                    ScheduleView::Past => schedule::past(&self.data.events, &today),
                };
                list.get(self.selected).map(|e| e.id.clone())
            }
            Screen::Attendance => self.data.events.get(self.selected).map(|e| e.id.clone()),
            _ => None,
        }
    }

    pub fn toggle_schedule_view(&mut self) {
        self.schedule_view = match self.schedule_view {
            ScheduleView::Upcoming => ScheduleView::Past,
            ScheduleView::Past => ScheduleView::Upcoming,
        };
        self.selected = 0;
    }

    // -- attendance ---------------------------------------------------------

    pub fn open_attendance_event(&mut self) {
        if let Some(id) = self.selected_event_id() {
            self.attendance_event = Some(id);
            self.selected = 0;
        }
    }

    pub fn close_attendance_event(&mut self) {
        self.attendance_event = None;
        self.selected = 0;
    }

    pub fn mark_selected_attendance(&mut self, status: AttendanceStatus) {
        let Some(event_id) = self.attendance_event.clone() else {
            return;
        };
        let Some(player_id) = self.selected_player_id() else {
            return;
        };
        self.data
            .mark_attendance(&event_id, &player_id, status, None);
        self.drain_data_logs();
        self.push_log(format!("[INFO] Marked {}", status.label()));
    }

    pub fn toggle_event_completed(&mut self) {
        if let Some(id) = self.selected_event_id() {
            self.data
                .update_event(&id, |e| e.is_completed = !e.is_completed);
            self.drain_data_logs();
        }
    }

    // -- roster actions -----------------------------------------------------

    pub fn deactivate_selected_player(&mut self) {
        // The roster list only shows active players, so this always revokes.
        if let Some(id) = self.selected_player_id() {
            self.data.update_player(&id, |p| p.is_active = false);
            self.drain_data_logs();
            self.clamp_selection();
            self.push_log("[INFO] Player deactivated; parent code disabled");
        }
    }

    pub fn delete_selected_player(&mut self) {
        if let Some(id) = self.selected_player_id() {
            self.data.delete_player(&id);
            self.drain_data_logs();
            self.clamp_selection();
            self.push_log("[INFO] Player removed along with their records");
        }
    }

    pub fn delete_selected_event(&mut self) {
        if let Some(id) = self.selected_event_id() {
            self.data.delete_event(&id);
            self.drain_data_logs();
            self.clamp_selection();
            self.push_log("[INFO] Event removed");
        }
    }

    // -- coaches corner -----------------------------------------------------

    pub fn corner_reset(&mut self) {
        self.corner_stage = CornerStage::PickPlayer;
        self.corner_player = None;
        self.guided = GuidedAssessment::default();
        self.last_result = None;
        self.selected = 0;
    }

    pub fn corner_start_checklist(&mut self) {
        if let Some(id) = self.selected_player_id() {
            self.corner_player = Some(id);
            self.corner_stage = CornerStage::Checklist(0);
            self.guided = GuidedAssessment::default();
            self.selected = 0;
        }
    }

    pub fn corner_toggle_item(&mut self) {
        let CornerStage::Checklist(step) = self.corner_stage else {
            return;
        };
        let corner = CORNERS[step];
        let items = crate::assessment::guide_items(corner);
        if let Some(item) = items.get(self.selected) {
            self.guided.toggle(corner, item);
        }
    }

    pub fn corner_next(&mut self) {
        if let CornerStage::Checklist(step) = self.corner_stage {
            if step + 1 < CORNERS.len() {
                self.corner_stage = CornerStage::Checklist(step + 1);
                self.selected = 0;
            }
        }
    }

    pub fn corner_prev(&mut self) {
        match self.corner_stage {
            CornerStage::Checklist(0) => {
                self.corner_stage = CornerStage::PickPlayer;
                self.selected = 0;
            }
            CornerStage::Checklist(step) => {
                self.corner_stage = CornerStage::Checklist(step - 1);
                self.selected = 0;
            }
            _ => {}
        }
    }

    pub fn corner_open_history(&mut self) {
        if self.corner_player.is_none() {
            self.corner_player = self.selected_player_id();
        }
        if self.corner_player.is_some() {
            self.corner_stage = CornerStage::History;
            self.selected = 0;
        }
    }

    pub fn corner_delete_history_entry(&mut self) {
        let Some(player_id) = self.corner_player.clone() else {
            return;
        };
        let id = self
            .data
            .reports_for_player(&player_id)
            .get(self.selected)
            .map(|r| r.id.clone());
        if let Some(id) = id {
            self.data.delete_report(&id);
            self.drain_data_logs();
            self.clamp_selection();
            self.push_log("[INFO] Report deleted");
        }
    }

    /// The one network-touching action in the app. Blocks the event loop
    /// until the remote answers or the transport gives up.
    pub fn corner_generate(&mut self) {
        let config = self.data.assessment_config();
        self.corner_generate_with(&config);
    }

    pub fn corner_generate_with(&mut self, config: &AssessmentConfig) {
        let Some(player_id) = self.corner_player.clone() else {
            return;
        };
        let Some(player) = roster::find_player(&self.data.players, &player_id).cloned() else {
            self.push_log("[WARN] Player no longer on the roster");
            self.corner_reset();
            return;
        };

        let mode = if config.api_key.is_some() { "live" } else { "demo" };
        self.push_log(format!("[INFO] Generating {mode} report..."));

        let today = chrono::Utc::now().date_naive();
        let age_group = player.age_group(today);
        match run_assessment(
            &self.guided,
            &player.full_name(),
            player.position.label(),
            age_group,
            config,
        ) {
            Ok(result) => {
                let coach = self
                    .session
                    .as_ref()
                    .map(|s| s.coach_name.clone())
                    .unwrap_or_else(|| self.data.settings.coach_name.clone());
                self.data.add_report(&player_id, &coach, &result);
                self.drain_data_logs();
                self.last_result = Some(result);
                self.corner_stage = CornerStage::Result;
                self.push_log("[INFO] Report saved");
            }
            Err(err) => {
                self.push_log(format!("[ERROR] {err}"));
            }
        }
    }

    // -- prompts ------------------------------------------------------------

    fn open_prompt(&mut self, flow: Flow, label: String, masked: bool) {
        self.prompt = Some(PromptState {
            label,
            buffer: String::new(),
            masked,
            flow,
            step: 0,
            collected: Vec::new(),
        });
    }

    pub fn begin_pin_prompt(&mut self) {
        self.open_prompt(Flow::CoachPin, "Coach PIN".to_string(), true);
    }

    pub fn begin_parent_prompt(&mut self) {
        self.open_prompt(Flow::ParentCode, "Parent access code".to_string(), false);
    }

    pub fn begin_api_key_prompt(&mut self) {
        self.open_prompt(
            Flow::ApiKey,
            "Claude API key (blank to clear)".to_string(),
            true,
        );
    }

    pub fn begin_add_player(&mut self) {
        self.open_prompt(Flow::AddPlayer, ADD_PLAYER_FIELDS[0].to_string(), false);
    }

    pub fn begin_add_event(&mut self) {
        self.open_prompt(Flow::AddEvent, ADD_EVENT_FIELDS[0].to_string(), false);
    }

    pub fn begin_rate_skills(&mut self) {
        if let Some(player_id) = self.selected_player_id() {
            self.open_prompt(
                Flow::RateSkills { player_id },
                "Session label".to_string(),
                false,
            );
        }
    }

    pub fn begin_record_result(&mut self) {
        let Some(event_id) = self.selected_event_id() else {
            return;
        };
        let is_practice = schedule::find_event(&self.data.events, &event_id)
            .map(|e| e.event_type == EventType::Practice)
            .unwrap_or(true);
        if is_practice {
            self.push_log("[WARN] Practices have no result to record");
            return;
        }
        self.open_prompt(
            Flow::RecordResult { event_id },
            RECORD_RESULT_FIELDS[0].to_string(),
            false,
        );
    }

    pub fn begin_corner_notes(&mut self) {
        if let CornerStage::Checklist(step) = self.corner_stage {
            let corner = CORNERS[step];
            self.open_prompt(
                Flow::CornerNotes { corner },
                format!("{} notes", corner.label()),
                false,
            );
        }
    }

    pub fn begin_edit_settings(&mut self) {
        self.open_prompt(
            Flow::EditSettings,
            format!("{} [{}]", SETTINGS_FIELDS[0], self.data.settings.team_name),
            false,
        );
    }

    pub fn begin_export_backup(&mut self) {
        self.open_prompt(
            Flow::ExportBackup,
            "Export backup to path".to_string(),
            false,
        );
    }

    pub fn begin_import_backup(&mut self) {
        self.open_prompt(
            Flow::ImportBackup,
            "Import backup from path".to_string(),
            false,
        );
    }

    pub fn prompt_char(&mut self, c: char) {
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.buffer.push(c);
        }
    }

    pub fn prompt_backspace(&mut self) {
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.buffer.pop();
        }
    }

    pub fn prompt_cancel(&mut self) {
        self.prompt = None;
    }

    pub fn prompt_submit(&mut self) {
        let Some(mut prompt) = self.prompt.take() else {
            return;
        };
        let entry = prompt.buffer.trim().to_string();
        prompt.buffer.clear();

        match prompt.flow.clone() {
            Flow::CoachPin => match settings::login(&self.data.settings, &entry) {
                Some(session) => {
                    self.session = Some(session);
                    self.screen = Screen::Roster;
                    self.selected = 0;
                    self.push_log("[INFO] Coach logged in");
                }
                None => self.push_log("[WARN] Wrong PIN"),
            },
            Flow::ParentCode => match roster::find_by_access_code(&self.data.players, &entry) {
                Some(player) => {
                    self.parent_player = Some(player.id.clone());
                    self.screen = Screen::Parent;
                    self.push_log("[INFO] Parent view opened");
                }
                None => self.push_log("[WARN] Access code not recognized"),
            },
            Flow::ApiKey => {
                let value = if entry.is_empty() {
                    None
                } else {
                    Some(entry.as_str())
                };
                let cleared = value.is_none();
                self.data.set_api_key(value);
                self.drain_data_logs();
                self.push_log(if cleared {
                    "[INFO] API key cleared; reports use demo mode"
                } else {
                    "[INFO] API key saved"
                });
            }
            Flow::CornerNotes { corner } => {
                self.guided.corner_mut(corner).notes = entry;
            }
            Flow::ExportBackup => {
                if entry.is_empty() {
                    self.push_log("[WARN] Export needs a file path");
                } else {
                    match self
                        .data
                        .export_backup()
                        .and_then(|doc| std::fs::write(&entry, doc).map_err(Into::into))
                    {
                        Ok(()) => self.push_log(format!("[INFO] Backup written to {entry}")),
                        Err(err) => self.push_log(format!("[ERROR] Export failed: {err:#}")),
                    }
                }
            }
            Flow::ImportBackup => {
                if entry.is_empty() {
                    self.push_log("[WARN] Import needs a file path");
                } else {
                    let result = std::fs::read_to_string(&entry)
                        .map_err(anyhow::Error::from)
                        .and_then(|raw| self.data.import_backup(&raw));
                    match result {
                        Ok(()) => {
                            self.clamp_selection();
                            self.push_log("[INFO] Backup imported; collections replaced");
                        }
                        Err(err) => self.push_log(format!("[ERROR] Import failed: {err:#}")),
                    }
                }
            }
            Flow::AddPlayer
            | Flow::AddEvent
            | Flow::RateSkills { .. }
            | Flow::RecordResult { .. }
            | Flow::EditSettings => {
                prompt.collected.push(entry);
                prompt.step += 1;
                if let Some(label) = self.next_form_label(&prompt) {
                    prompt.label = label;
                    self.prompt = Some(prompt);
                } else {
                    self.commit_form(prompt);
                }
            }
        }
    }

    fn next_form_label(&self, prompt: &PromptState) -> Option<String> {
        match &prompt.flow {
            Flow::AddPlayer => ADD_PLAYER_FIELDS.get(prompt.step).map(|s| s.to_string()),
            Flow::AddEvent => ADD_EVENT_FIELDS.get(prompt.step).map(|s| s.to_string()),
            Flow::RecordResult { .. } => RECORD_RESULT_FIELDS
                .get(prompt.step)
                .map(|s| s.to_string()),
            Flow::RateSkills { .. } => {
                if prompt.step >= RATE_SKILLS_PROMPTS {
                    return None;
                }
                if prompt.step <= 8 {
                    let key = crate::model::SKILL_KEYS[prompt.step - 1];
                    Some(format!("{} (1-5)", key.label()))
                } else {
                    Some("Coach notes".to_string())
                }
            }
            Flow::EditSettings => {
                let current = match prompt.step {
                    1 => &self.data.settings.season,
                    2 => &self.data.settings.coach_name,
                    3 => &self.data.settings.coach_pin,
                    4 => &self.data.settings.team_color,
                    _ => return None,
                };
                SETTINGS_FIELDS
                    .get(prompt.step)
                    .map(|s| format!("{s} [{current}]"))
            }
            _ => None,
        }
    }

    fn commit_form(&mut self, prompt: PromptState) {
        match prompt.flow {
            Flow::AddPlayer => {
                let f = &prompt.collected;
                let jersey = f[2].parse::<u8>().unwrap_or(0).clamp(1, 99);
                let position = Position::parse(&f[4]).unwrap_or(Position::Any);
                let player = self.data.add_player(NewPlayer {
                    first_name: f[0].clone(),
                    last_name: f[1].clone(),
                    jersey_number: jersey,
                    date_of_birth: f[3].clone(),
                    position,
                    parent_name: f[5].clone(),
                    parent_email: f[6].clone(),
                    parent_phone: f[7].clone(),
                    notes: f[8].clone(),
                });
                self.drain_data_logs();
                self.push_log(format!(
                    "[INFO] Added #{} {} (parent code {})",
                    player.jersey_number,
                    player.full_name(),
                    player.parent_access_code
                ));
            }
            Flow::AddEvent => {
                let f = &prompt.collected;
                let event_type = match f[0].to_ascii_lowercase().as_str() {
                    t if t.starts_with('g') => EventType::Game,
                    t if t.starts_with('t') => EventType::Tournament,
                    _ => EventType::Practice,
                };
                let opponent = if f[5].is_empty() {
                    None
                } else {
                    Some(f[5].clone())
                };
                let event = self.data.add_event(CalendarEvent {
                    id: String::new(),
                    event_type,
                    title: f[1].clone(),
                    date: f[2].clone(),
                    time: f[3].clone(),
                    location: f[4].clone(),
                    opponent,
                    home_or_away: None,
                    result: None,
                    goals_for: None,
                    goals_against: None,
                    notes: String::new(),
                    is_completed: false,
                });
                self.drain_data_logs();
                self.push_log(format!("[INFO] Added {} on {}", event.title, event.date));
            }
            Flow::RateSkills { player_id } => {
                let f = &prompt.collected;
                let mut scores = SkillScores::default();
                for (i, key) in crate::model::SKILL_KEYS.iter().enumerate() {
                    let value = f[i + 1].parse::<u8>().unwrap_or(3);
                    scores.set(*key, value);
                }
                let coach = self
                    .session
                    .as_ref()
                    .map(|s| s.coach_name.clone())
                    .unwrap_or_else(|| self.data.settings.coach_name.clone());
                let label = if f[0].is_empty() {
                    today_iso()
                } else {
                    f[0].clone()
                };
                self.data.add_rating(SkillRating {
                    id: String::new(),
                    player_id,
                    assessed_by: coach,
                    assessed_at: now_iso(),
                    session_label: label,
                    ratings: scores,
                    coach_notes: f[9].clone(),
                });
                self.drain_data_logs();
                self.push_log("[INFO] Skill rating saved");
            }
            Flow::RecordResult { event_id } => {
                let f = &prompt.collected;
                let result = match f[0].to_ascii_lowercase().chars().next() {
                    Some('w') => GameResult::Win,
                    Some('l') => GameResult::Loss,
                    Some('d') => GameResult::Draw,
                    _ => GameResult::Upcoming,
                };
                let goals_for = f[1].parse::<u8>().ok();
                let goals_against = f[2].parse::<u8>().ok();
                self.data.update_event(&event_id, |e| {
                    e.result = Some(result);
                    e.goals_for = goals_for;
                    e.goals_against = goals_against;
                    e.is_completed = true;
                });
                self.drain_data_logs();
                self.push_log(format!("[INFO] Result recorded: {}", result.label()));
            }
            Flow::EditSettings => {
                let f = prompt.collected;
                self.data.update_settings(|s| {
                    let keep_or = |current: &str, entry: &str| {
                        if entry.is_empty() {
                            current.to_string()
                        } else {
                            entry.to_string()
                        }
                    };
                    s.team_name = keep_or(&s.team_name, &f[0]);
                    s.season = keep_or(&s.season, &f[1]);
                    s.coach_name = keep_or(&s.coach_name, &f[2]);
                    if f[3].len() == 4 && f[3].chars().all(|c| c.is_ascii_digit()) {
                        s.coach_pin = f[3].clone();
                    }
                    s.team_color = keep_or(&s.team_color, &f[4]);
                });
                self.drain_data_logs();
                self.push_log("[INFO] Settings updated");
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_state() -> AppState {
        AppState::new(AppData::load(Store::in_memory()))
    }

    #[test]
    fn first_load_seeds_the_roster_once() {
        let state = fresh_state();
        assert_eq!(state.data.players.len(), 6);
        assert_eq!(state.data.events.len(), 8);
        assert_eq!(state.data.ratings.len(), 12);
    }

    #[test]
    fn deleting_a_player_cascades_to_child_records() {
        let mut state = fresh_state();
        let before_ratings = state.data.ratings.len();
        state.data.delete_player("p2");
        assert!(state.data.players.iter().all(|p| p.id != "p2"));
        assert!(state.data.ratings.iter().all(|r| r.player_id != "p2"));
        assert!(state.data.attendance.iter().all(|r| r.player_id != "p2"));
        assert_eq!(state.data.ratings.len(), before_ratings - 2);
    }

    #[test]
    fn pin_prompt_gates_the_coach_screens() {
        let mut state = fresh_state();
        state.begin_pin_prompt();
        for c in "9999".chars() {
            state.prompt_char(c);
        }
        state.prompt_submit();
        assert!(state.session.is_none());
        assert_eq!(state.screen, Screen::Login);

        state.begin_pin_prompt();
        for c in "1234".chars() {
            state.prompt_char(c);
        }
        state.prompt_submit();
        assert!(state.session.is_some());
        assert_eq!(state.screen, Screen::Roster);
    }

    #[test]
    fn parent_code_prompt_opens_the_parent_view() {
        let mut state = fresh_state();
        state.begin_parent_prompt();
        for c in "aj9999".chars() {
            state.prompt_char(c);
        }
        state.prompt_submit();
        assert_eq!(state.screen, Screen::Parent);
        assert_eq!(state.parent_player.as_deref(), Some("p4"));
    }

    #[test]
    fn add_player_flow_walks_every_field_then_commits() {
        let mut state = fresh_state();
        state.begin_add_player();
        let entries = [
            "Maya",
            "Okafor",
            "8",
            "2016-08-02",
            "mid",
            "Ada Okafor",
            "ada@email.com",
            "555-0107",
            "new this season",
        ];
        for entry in entries {
            for c in entry.chars() {
                state.prompt_char(c);
            }
            state.prompt_submit();
        }
        assert!(state.prompt.is_none());
        let added = state
            .data
            .players
            .iter()
            .find(|p| p.first_name == "Maya")
            .expect("player added");
        assert_eq!(added.jersey_number, 8);
        assert_eq!(added.position, Position::Midfielder);
        assert!(!added.parent_access_code.is_empty());
    }

    #[test]
    fn corner_checklist_generates_and_stores_a_demo_report() {
        let mut state = fresh_state();
        state.screen = Screen::Corner;
        state.selected = 0; // jersey order puts Liam (p1) first
        state.corner_start_checklist();
        assert_eq!(state.corner_stage, CornerStage::Checklist(0));

        // Tick the first three technical items.
        for i in 0..3 {
            state.selected = i;
            state.corner_toggle_item();
        }
        // Force the offline path regardless of any ambient API key.
        state.corner_generate_with(&AssessmentConfig { api_key: None });

        assert_eq!(state.corner_stage, CornerStage::Result);
        let result = state.last_result.as_ref().expect("result kept");
        assert!(result.demo);
        assert_eq!(result.technical.score, 3);
        assert_eq!(state.data.reports.len(), 1);
        assert_eq!(state.data.reports[0].player_id, "p1");
    }

    #[test]
    fn record_result_flow_completes_the_game() {
        let mut state = fresh_state();
        // The attendance event list indexes raw collection order; e6 is the
        // unplayed Northside game.
        state.screen = Screen::Attendance;
        state.selected = 5;
        state.begin_record_result();
        assert!(state.prompt.is_some());
        for entry in ["Win", "2", "1"] {
            for c in entry.chars() {
                state.prompt_char(c);
            }
            state.prompt_submit();
        }
        let event = state
            .data
            .events
            .iter()
            .find(|e| e.id == "e6")
            .expect("seeded game");
        assert_eq!(event.result, Some(GameResult::Win));
        assert_eq!(event.goals_for, Some(2));
        assert_eq!(event.goals_against, Some(1));
        assert!(event.is_completed);
    }

    #[test]
    fn practices_refuse_a_result() {
        let mut state = fresh_state();
        state.screen = Screen::Attendance;
        state.selected = 0; // e1 is a practice
        state.begin_record_result();
        assert!(state.prompt.is_none());
    }

    #[test]
    fn attendance_marking_is_an_upsert_through_the_app_layer() {
        let mut state = fresh_state();
        state.screen = Screen::Attendance;
        state.attendance_event = Some("e5".to_string());
        state.selected = 0;
        state.mark_selected_attendance(AttendanceStatus::Present);
        state.mark_selected_attendance(AttendanceStatus::Excused);
        let marks: Vec<&AttendanceRecord> = state
            .data
            .attendance
            .iter()
            .filter(|r| r.event_id == "e5")
            .collect();
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].status, AttendanceStatus::Excused);
    }
}
