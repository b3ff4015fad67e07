use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use touchline_terminal::assessment::{guide_items, CornerObservations, CORNERS};
use touchline_terminal::attendance::{attendance_rate, event_summary, status_for};
use touchline_terminal::model::{star_label, today_iso, AttendanceStatus, Player, SKILL_KEYS};
use touchline_terminal::roster::active_players;
use touchline_terminal::skills::{
    latest_for_player, overall_score, previous_for_player, radar_rows, session_rows,
};
use touchline_terminal::state::{AppData, AppState, CornerStage, ScheduleView, Screen};
use touchline_terminal::store::Store;
use touchline_terminal::{roster, schedule};

struct App {
    state: AppState,
    should_quit: bool,
}

impl App {
    fn new(state: AppState) -> Self {
        Self {
            state,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.help_overlay {
            self.state.help_overlay = false;
            return;
        }

        if self.state.prompt.is_some() {
            match key.code {
                KeyCode::Enter => self.state.prompt_submit(),
                KeyCode::Esc => self.state.prompt_cancel(),
                KeyCode::Backspace => self.state.prompt_backspace(),
                KeyCode::Char(c) => self.state.prompt_char(c),
                _ => {}
            }
            return;
        }

        // Global keys outside prompts.
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') => {
                self.state.help_overlay = true;
                return;
            }
            _ => {}
        }

        if self.state.session.is_some() {
            match key.code {
                KeyCode::Char('1') => {
                    self.state.screen = Screen::Roster;
                    self.state.selected = 0;
                    return;
                }
                KeyCode::Char('2') => {
                    self.state.screen = Screen::Schedule;
                    self.state.selected = 0;
                    return;
                }
                KeyCode::Char('3') => {
                    self.state.screen = Screen::Attendance;
                    self.state.close_attendance_event();
                    return;
                }
                KeyCode::Char('4') => {
                    self.state.screen = Screen::Corner;
                    self.state.corner_reset();
                    return;
                }
                KeyCode::Char('5') => {
                    self.state.screen = Screen::Settings;
                    return;
                }
                KeyCode::Char('L') => {
                    self.state.logout();
                    return;
                }
                _ => {}
            }
        }

        match self.state.screen {
            Screen::Login => self.on_key_login(key),
            Screen::Roster => self.on_key_roster(key),
            Screen::Schedule => self.on_key_schedule(key),
            Screen::Attendance => self.on_key_attendance(key),
            Screen::Corner => self.on_key_corner(key),
            Screen::Settings => self.on_key_settings(key),
            Screen::Parent => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                    self.state.logout();
                }
            }
        }
    }

    fn on_key_login(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Enter => self.state.begin_pin_prompt(),
            KeyCode::Char('p') => self.state.begin_parent_prompt(),
            _ => {}
        }
    }

    fn on_key_roster(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('a') => self.state.begin_add_player(),
            KeyCode::Char('r') => self.state.begin_rate_skills(),
            KeyCode::Char('d') => self.state.deactivate_selected_player(),
            KeyCode::Char('D') => self.state.delete_selected_player(),
            _ => {}
        }
    }

    fn on_key_schedule(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('u') => self.state.toggle_schedule_view(),
            KeyCode::Char('a') => self.state.begin_add_event(),
            KeyCode::Char('c') => self.state.toggle_event_completed(),
            KeyCode::Char('r') => self.state.begin_record_result(),
            KeyCode::Char('D') => self.state.delete_selected_event(),
            _ => {}
        }
    }

    fn on_key_attendance(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Enter if self.state.attendance_event.is_none() => {
                self.state.open_attendance_event()
            }
            KeyCode::Esc => self.state.close_attendance_event(),
            KeyCode::Char('p') => {
                self.state
                    .mark_selected_attendance(AttendanceStatus::Present)
            }
            KeyCode::Char('a') => self.state.mark_selected_attendance(AttendanceStatus::Absent),
            KeyCode::Char('e') => {
                self.state
                    .mark_selected_attendance(AttendanceStatus::Excused)
            }
            _ => {}
        }
    }

    fn on_key_corner(&mut self, key: KeyEvent) {
        match self.state.corner_stage.clone() {
            CornerStage::PickPlayer => match key.code {
                KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
                KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
                KeyCode::Enter => self.state.corner_start_checklist(),
                KeyCode::Char('h') => self.state.corner_open_history(),
                _ => {}
            },
            CornerStage::Checklist(step) => match key.code {
                KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
                KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
                KeyCode::Char(' ') => self.state.corner_toggle_item(),
                KeyCode::Char('n') => self.state.begin_corner_notes(),
                KeyCode::Left => self.state.corner_prev(),
                KeyCode::Right => self.state.corner_next(),
                KeyCode::Enter => {
                    if step + 1 < CORNERS.len() {
                        self.state.corner_next();
                    } else {
                        self.state.corner_generate();
                    }
                }
                KeyCode::Esc => self.state.corner_reset(),
                _ => {}
            },
            CornerStage::Result => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    self.state.corner_reset();
                }
            }
            CornerStage::History => match key.code {
                KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
                KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
                KeyCode::Char('D') => self.state.corner_delete_history_entry(),
                KeyCode::Esc => self.state.corner_reset(),
                _ => {}
            },
        }
    }

    fn on_key_settings(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('e') => self.state.begin_edit_settings(),
            KeyCode::Char('k') => self.state.begin_api_key_prompt(),
            KeyCode::Char('x') => self.state.begin_export_backup(),
            KeyCode::Char('i') => self.state.begin_import_backup(),
            _ => {}
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let data = AppData::load(Store::open_default());
    let mut app = App::new(AppState::new(data));
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Login => render_login(frame, chunks[1], &app.state),
        Screen::Roster => render_roster(frame, chunks[1], &app.state),
        Screen::Schedule => render_schedule(frame, chunks[1], &app.state),
        Screen::Attendance => render_attendance(frame, chunks[1], &app.state),
        Screen::Corner => render_corner(frame, chunks[1], &app.state),
        Screen::Settings => render_settings(frame, chunks[1], &app.state),
        Screen::Parent => render_parent(frame, chunks[1], &app.state),
    }

    let footer = Paragraph::new(footer_text(&app.state))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);

    if let Some(prompt) = &app.state.prompt {
        render_prompt(frame, frame.size(), prompt.label.as_str(), {
            if prompt.masked {
                "*".repeat(prompt.buffer.len())
            } else {
                prompt.buffer.clone()
            }
        });
    }

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let screen = match state.screen {
        Screen::Login => "Welcome",
        Screen::Roster => "Roster",
        Screen::Schedule => "Schedule",
        Screen::Attendance => "Attendance",
        Screen::Corner => "Coaches Corner",
        Screen::Settings => "Settings",
        Screen::Parent => "Parent View",
    };
    format!(
        "TOUCHLINE | {} | {} | {}",
        state.data.settings.team_name, state.data.settings.season, screen
    )
}

fn footer_text(state: &AppState) -> String {
    if state.prompt.is_some() {
        return "Enter Submit | Esc Cancel".to_string();
    }
    match state.screen {
        Screen::Login => "c/Enter Coach login | p Parent access | ? Help | q Quit".to_string(),
        Screen::Roster => {
            "1-5 Screens | j/k Move | a Add | r Rate skills | d Deactivate | D Delete | L Logout | q Quit"
                .to_string()
        }
        Screen::Schedule => {
            "1-5 Screens | j/k Move | u Upcoming/Past | a Add | c Completed | r Result | D Delete | q Quit"
                .to_string()
        }
        Screen::Attendance => match state.attendance_event {
            Some(_) => "j/k Move | p Present | a Absent | e Excused | Esc Back | q Quit".to_string(),
            None => "j/k Move | Enter Take attendance | 1-5 Screens | q Quit".to_string(),
        },
        Screen::Corner => match state.corner_stage {
            CornerStage::PickPlayer => {
                "j/k Move | Enter Start | h History | 1-5 Screens | q Quit".to_string()
            }
            CornerStage::Checklist(_) => {
                "j/k Move | Space Tick | n Notes | Left/Right Step | Enter Next/Generate | Esc Reset"
                    .to_string()
            }
            CornerStage::Result => "Enter New assessment | 1-5 Screens | q Quit".to_string(),
            CornerStage::History => "j/k Move | D Delete | Esc Back | q Quit".to_string(),
        },
        Screen::Settings => {
            "e Edit team | k API key | x Export backup | i Import backup | 1-5 Screens | q Quit"
                .to_string()
        }
        Screen::Parent => "Esc Back | q Quit".to_string(),
    }
}

fn selected_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn render_login(frame: &mut Frame, area: Rect, state: &AppState) {
    let lines = vec![
        Line::from(""),
        Line::from(format!(
            "  {} - {}",
            state.data.settings.team_name, state.data.settings.season
        )),
        Line::from(""),
        Line::from("  Coach: press c and enter your 4-digit PIN."),
        Line::from("  Parent: press p and enter your child's access code."),
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", last_log(state)),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_roster(frame: &mut Frame, area: Rect, state: &AppState) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let players = active_players(&state.data.players);
    let mut lines = Vec::with_capacity(players.len() + 1);
    if players.is_empty() {
        lines.push(Line::from(Span::styled(
            "No active players. Press a to add one.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (idx, player) in players.iter().enumerate() {
        let rate = attendance_rate(&player.id, &state.data.attendance, &state.data.events);
        let overall = latest_for_player(&state.data.ratings, &player.id)
            .map(|r| format!("{:.1}", overall_score(r)))
            .unwrap_or_else(|| "-".to_string());
        lines.push(Line::styled(
            format!(
                " #{:<2} {:<20} {:<11} att {:>3}%  skill {}",
                player.jersey_number,
                player.full_name(),
                player.position.label(),
                rate,
                overall
            ),
            selected_style(idx == state.selected),
        ));
    }
    let list = Paragraph::new(lines).block(Block::default().borders(Borders::RIGHT));
    frame.render_widget(list, halves[0]);

    if let Some(player) = players.get(state.selected) {
        render_player_detail(frame, halves[1], state, player);
    }
}

fn render_player_detail(frame: &mut Frame, area: Rect, state: &AppState, player: &Player) {
    let today = chrono::Utc::now().date_naive();
    let mut lines = vec![
        Line::from(Span::styled(
            format!(
                " {} #{} | {} | {}",
                player.full_name(),
                player.jersey_number,
                player.position.label(),
                player.age_group(today)
            ),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            " Parent: {} ({}) code {}",
            player.parent_name, player.parent_phone, player.parent_access_code
        )),
        Line::from(format!(" Joined {} | DOB {}", player.joined_date, player.date_of_birth)),
    ];
    if !player.notes.is_empty() {
        lines.push(Line::from(format!(" Notes: {}", player.notes)));
    }
    lines.push(Line::from(""));

    let latest = latest_for_player(&state.data.ratings, &player.id);
    let previous = previous_for_player(&state.data.ratings, &player.id);
    match latest {
        Some(current) => {
            lines.push(Line::from(Span::styled(
                format!(
                    " Skills ({})  overall {:.1}",
                    current.session_label,
                    overall_score(current)
                ),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for row in radar_rows(current, previous) {
                let bar = "#".repeat(row.value as usize);
                let delta = match row.previous {
                    Some(prev) if row.value > prev => " (up)",
                    Some(prev) if row.value < prev => " (down)",
                    _ => "",
                };
                lines.push(Line::from(format!(
                    " {:<16} {:<5} {}/{}{}",
                    row.skill, bar, row.value, row.full_mark, delta
                )));
            }
        }
        None => lines.push(Line::from(Span::styled(
            " No skill ratings yet. Press r to rate this player.",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    let history = session_rows(&state.data.ratings, &player.id);
    if history.len() > 1 {
        lines.push(Line::from(""));
        lines.push(Line::from(format!(" {} rated sessions on file", history.len())));
    }

    if let Some(report) = state.data.latest_report_for_player(&player.id) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                " Last 4-corner report {}{}",
                &report.assessed_at[..10.min(report.assessed_at.len())],
                if report.demo { " (demo)" } else { "" }
            ),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!(
            "  T{} Ta{} Ph{} Ps{}",
            report.technical.score,
            report.tactical.score,
            report.physical.score,
            report.psychological.score
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_schedule(frame: &mut Frame, area: Rect, state: &AppState) {
    let today = today_iso();
    let (title, events) = match state.schedule_view {
        ScheduleView::Upcoming => ("Upcoming", schedule::upcoming(&state.data.events, &today)),
        ScheduleView::Past => ("Past", schedule::past(&state.data.events, &today)),
    };

    let mut lines = vec![Line::from(Span::styled(
        format!(" {title} events"),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if events.is_empty() {
        lines.push(Line::from(Span::styled(
            " Nothing here. Press a to add an event.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (idx, event) in events.iter().enumerate() {
        let summary = event_summary(&state.data.attendance, &event.id);
        let mark = if event.is_completed { "x" } else { " " };
        let mut tail = String::new();
        if let Some(side) = event.home_or_away {
            tail.push_str(&format!("  ({})", side.label()));
        }
        if let (Some(result), Some(gf), Some(ga)) =
            (event.result, event.goals_for, event.goals_against)
        {
            tail.push_str(&format!("  {} {}-{}", result.label(), gf, ga));
        }
        if summary.total > 0 {
            tail.push_str(&format!(
                "  [{} present / {} marked]",
                summary.present, summary.total
            ));
        }
        lines.push(Line::styled(
            format!(
                " [{}] {} {}  {:<10} {:<24} {}{}",
                mark,
                event.date,
                event.time,
                event.event_type.label(),
                event.title,
                event.location,
                tail
            ),
            selected_style(idx == state.selected),
        ));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_attendance(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut lines = Vec::new();
    match &state.attendance_event {
        None => {
            lines.push(Line::from(Span::styled(
                " Pick an event to take attendance",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for (idx, event) in state.data.events.iter().enumerate() {
                let summary = event_summary(&state.data.attendance, &event.id);
                lines.push(Line::styled(
                    format!(
                        " {} {:<10} {:<24} {} marked",
                        event.date,
                        event.event_type.label(),
                        event.title,
                        summary.total
                    ),
                    selected_style(idx == state.selected),
                ));
            }
        }
        Some(event_id) => {
            if let Some(event) = schedule::find_event(&state.data.events, event_id) {
                lines.push(Line::from(Span::styled(
                    format!(" {} - {} ({})", event.date, event.title, event.location),
                    Style::default().add_modifier(Modifier::BOLD),
                )));
            }
            for (idx, player) in active_players(&state.data.players).iter().enumerate() {
                let status = status_for(&state.data.attendance, event_id, &player.id)
                    .map(|s| s.label())
                    .unwrap_or("-");
                lines.push(Line::styled(
                    format!(
                        " #{:<2} {:<22} {}",
                        player.jersey_number,
                        player.full_name(),
                        status
                    ),
                    selected_style(idx == state.selected),
                ));
            }
        }
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_corner(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut lines = Vec::new();
    match &state.corner_stage {
        CornerStage::PickPlayer => {
            lines.push(Line::from(Span::styled(
                " Who are you assessing?",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            if state.data.assessment_config().api_key.is_none() {
                lines.push(Line::from(Span::styled(
                    " Demo mode: results use coaching frameworks, not live AI. Set a key in Settings.",
                    Style::default().fg(Color::Yellow),
                )));
            }
            for (idx, player) in active_players(&state.data.players).iter().enumerate() {
                let reports = state.data.reports_for_player(&player.id);
                let tail = match reports.first() {
                    Some(latest) => format!(
                        "  last assessed {} ({} on file)",
                        &latest.assessed_at[..10.min(latest.assessed_at.len())],
                        reports.len()
                    ),
                    None => String::new(),
                };
                lines.push(Line::styled(
                    format!(
                        " #{:<2} {:<22} {}{}",
                        player.jersey_number,
                        player.full_name(),
                        player.position.label(),
                        tail
                    ),
                    selected_style(idx == state.selected),
                ));
            }
        }
        CornerStage::Checklist(step) => {
            let corner = CORNERS[*step];
            let area_data: &CornerObservations = state.guided.corner(corner);
            lines.push(Line::from(Span::styled(
                format!(
                    " Step {}/4: {} ({})",
                    step + 1,
                    corner.label(),
                    corner.subtitle()
                ),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(" Tick everything you observed during the session:"));
            for (idx, item) in guide_items(corner).iter().enumerate() {
                let ticked = area_data.checked.iter().any(|c| c == item);
                lines.push(Line::styled(
                    format!(" [{}] {}", if ticked { "x" } else { " " }, item),
                    selected_style(idx == state.selected),
                ));
            }
            lines.push(Line::from(format!(
                " {} of {} ticked",
                area_data.checked.len(),
                guide_items(corner).len()
            )));
            if !area_data.notes.is_empty() {
                lines.push(Line::from(format!(" Notes: {}", area_data.notes)));
            }
        }
        CornerStage::Result => {
            if let Some(result) = &state.last_result {
                if result.demo {
                    lines.push(Line::from(Span::styled(
                        " Demo report - set a Claude API key in Settings for live AI analysis",
                        Style::default().fg(Color::Yellow),
                    )));
                }
                for corner in CORNERS {
                    let rating = result.corner(corner);
                    lines.push(Line::from(Span::styled(
                        format!(" {}: {}/5 {}", corner.label(), rating.score, rating.label),
                        Style::default().add_modifier(Modifier::BOLD),
                    )));
                    lines.push(Line::from(format!("   {}", rating.observation)));
                }
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    " Strengths",
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                for s in &result.strengths {
                    lines.push(Line::from(format!("  + {s}")));
                }
                lines.push(Line::from(Span::styled(
                    " Areas to develop",
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                for a in &result.areas_to_improve {
                    lines.push(Line::from(format!("  > {a}")));
                }
                lines.push(Line::from(Span::styled(
                    " Recommended drills",
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                for (i, drill) in result.drills.iter().enumerate() {
                    lines.push(Line::from(format!("  {}. {}: {}", i + 1, drill.name, drill.description)));
                }
                lines.push(Line::from(""));
                lines.push(Line::from(format!(" {}", result.summary)));
            }
        }
        CornerStage::History => {
            lines.push(Line::from(Span::styled(
                " Past assessments",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            if let Some(player_id) = &state.corner_player {
                let reports = state.data.reports_for_player(player_id);
                if reports.is_empty() {
                    lines.push(Line::from(Span::styled(
                        " No reports yet for this player.",
                        Style::default().fg(Color::DarkGray),
                    )));
                }
                for (idx, report) in reports.iter().enumerate() {
                    lines.push(Line::styled(
                        format!(
                            " {}  T{} Ta{} Ph{} Ps{}{}  by {}",
                            &report.assessed_at[..10.min(report.assessed_at.len())],
                            report.technical.score,
                            report.tactical.score,
                            report.physical.score,
                            report.psychological.score,
                            if report.demo { " (demo)" } else { "" },
                            report.assessed_by
                        ),
                        selected_style(idx == state.selected),
                    ));
                }
                if let Some(report) = reports.get(state.selected) {
                    lines.push(Line::from(""));
                    lines.push(Line::from(format!(" {}", report.summary)));
                }
            }
        }
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_settings(frame: &mut Frame, area: Rect, state: &AppState) {
    let settings = &state.data.settings;
    let key_status = if state.data.assessment_config().api_key.is_some() {
        if state.data.has_stored_api_key() {
            "configured"
        } else {
            "from environment"
        }
    } else {
        "not set (demo mode)"
    };
    let lines = vec![
        Line::from(Span::styled(
            " Team settings",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(" Team name:  {}", settings.team_name)),
        Line::from(format!(" Season:     {}", settings.season)),
        Line::from(format!(" Coach:      {}", settings.coach_name)),
        Line::from(format!(" Coach PIN:  {}", "*".repeat(settings.coach_pin.len()))),
        Line::from(format!(" Team color: {}", settings.team_color)),
        Line::from(""),
        Line::from(Span::styled(
            " AI assessments",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(" Claude API key: {key_status}")),
        Line::from(""),
        Line::from(Span::styled(
            " Backup",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(" x exports every stored collection to a JSON file; i imports one wholesale."),
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", last_log(state)),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_parent(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(player) = state
        .parent_player
        .as_deref()
        .and_then(|id| roster::find_player(&state.data.players, id))
    else {
        frame.render_widget(Paragraph::new(" Access revoked."), area);
        return;
    };

    let today = chrono::Utc::now().date_naive();
    let rate = attendance_rate(&player.id, &state.data.attendance, &state.data.events);
    let mut lines = vec![
        Line::from(Span::styled(
            format!(
                " {} #{} | {} | {}",
                player.full_name(),
                player.jersey_number,
                player.position.label(),
                player.age_group(today)
            ),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(" Attendance rate: {rate}%")),
        Line::from(""),
    ];

    let latest = latest_for_player(&state.data.ratings, &player.id);
    match latest {
        Some(current) => {
            lines.push(Line::from(Span::styled(
                format!(" Latest skills ({}): overall {:.1}/5", current.session_label, overall_score(current)),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for key in SKILL_KEYS {
                let value = current.ratings.get(key);
                lines.push(Line::from(format!(
                    "  {:<16} {}/5  {}",
                    key.label(),
                    value,
                    star_label(value)
                )));
            }
        }
        None => lines.push(Line::from(" No skill ratings recorded yet.")),
    }

    if let Some(report) = state.data.latest_report_for_player(&player.id) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " Latest development summary",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!("  {}", report.summary)));
        for s in &report.strengths {
            lines.push(Line::from(format!("  + {s}")));
        }
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_prompt(frame: &mut Frame, area: Rect, label: &str, shown: String) {
    let width = area.width.saturating_sub(8).min(70).max(20);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + area.height / 2,
        width,
        height: 3,
    };
    frame.render_widget(Clear, popup);
    let input = Paragraph::new(format!(" {shown}_"))
        .block(Block::default().borders(Borders::ALL).title(label.to_string()));
    frame.render_widget(input, popup);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let width = area.width.saturating_sub(10).min(76).max(30);
    let height = 14.min(area.height);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, popup);
    let lines = vec![
        Line::from(" Screens: 1 Roster | 2 Schedule | 3 Attendance | 4 Coaches Corner | 5 Settings"),
        Line::from(""),
        Line::from(" Roster:     a add, r rate skills, d deactivate, D delete"),
        Line::from(" Schedule:   u upcoming/past, a add, c toggle completed, D delete"),
        Line::from(" Attendance: Enter pick event, then p/a/e to mark"),
        Line::from(" Corner:     Enter walks the 4 checklists, then generates a report"),
        Line::from(" Settings:   e edit team, k API key, x export, i import"),
        Line::from(""),
        Line::from(" L logs the coach out; parents only ever see their own player."),
        Line::from(""),
        Line::from(" Press any key to close."),
    ];
    let help = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Help"));
    frame.render_widget(help, popup);
}

fn last_log(state: &AppState) -> String {
    state
        .logs
        .back()
        .cloned()
        .unwrap_or_else(|| "[INFO] Ready".to_string())
}
