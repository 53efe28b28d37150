use std::{path::PathBuf, time::Instant};

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, warn};
use tokio::sync::mpsc;

use crate::{
    app::{
        events::{AppEvent, start_frame_task},
        host::TerminalHost,
        settings::{RuntimeSettings, load_runtime_settings, save_runtime_settings},
    },
    backdrop::{AnimatorState, ParticleFieldAnimator, env::MotionPreference},
    cli::Cli,
    orders::{LocalBackend, OrderDesk, OrderDraft, Principal, ServiceChoice, UserProfile},
    ui::raster::{CellMetrics, CellRaster, TerminalSurface},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Browsing,
    Composing,
    ProfileSetup,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Service,
    OtherText,
    Details,
}

#[derive(Debug)]
pub struct AppState {
    pub mode: AppMode,
    pub running: bool,
    pub animator: ParticleFieldAnimator<TerminalSurface>,
    pub host: TerminalHost,
    pub desk: OrderDesk<LocalBackend>,
    pub draft: OrderDraft,
    pub focus: FormField,
    pub profile_name: String,
    pub settings: RuntimeSettings,
    settings_path: Option<PathBuf>,
    metrics: CellMetrics,
    pixel_ratio: f32,
    drawable: bool,
}

impl AppState {
    pub fn new(cli: &Cli) -> Self {
        let (settings, settings_path) = load_runtime_settings(cli, !cfg!(test));
        Self::with_settings(cli, settings, settings_path)
    }

    pub fn with_settings(
        cli: &Cli,
        settings: RuntimeSettings,
        settings_path: Option<PathBuf>,
    ) -> Self {
        let backend = LocalBackend::new(Principal::new(cli.user.trim()));
        Self {
            mode: AppMode::Browsing,
            running: true,
            animator: ParticleFieldAnimator::new(settings.effect),
            host: TerminalHost::new(settings.reduced_motion),
            desk: OrderDesk::new(Some(backend)),
            draft: OrderDraft::default(),
            focus: FormField::Service,
            profile_name: String::new(),
            settings,
            settings_path,
            metrics: CellMetrics {
                width: cli.cell_width,
                height: cli.cell_height,
            },
            pixel_ratio: cli.pixel_ratio,
            drawable: !cli.no_backdrop,
        }
    }

    pub async fn handle_event(
        &mut self,
        event: AppEvent,
        tx: &mpsc::Sender<AppEvent>,
        cli: &Cli,
    ) -> Result<()> {
        match event {
            AppEvent::Bootstrap => {
                cli.validate()?;
                start_frame_task(tx.clone(), cli.fps);
                self.load_account().await;
            }
            AppEvent::TickFrame => self.handle_tick_frame(Instant::now()),
            AppEvent::Input(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                self.handle_key(key).await;
            }
            AppEvent::Input(Event::Resize(cols, rows)) => self.handle_resize(cols, rows),
            AppEvent::Input(_) => {}
            AppEvent::Quit => self.mode = AppMode::Quit,
        }
        Ok(())
    }

    /// Loads orders, profile and role; asks for a name when there is no profile yet.
    pub async fn load_account(&mut self) {
        self.desk.refresh_orders().await;
        self.desk.load_profile().await;
        self.desk.load_role().await;
        if matches!(self.desk.profile().data(), Some(None)) {
            self.mode = AppMode::ProfileSetup;
        }
    }

    pub fn handle_tick_frame(&mut self, now: Instant) {
        self.desk.notices_mut().prune(now);
        for token in self.host.fire_frames() {
            self.animator.handle_frame(&token, &mut self.host);
        }
    }

    /// The first known size mounts the backdrop; later ones resize it.
    pub fn handle_resize(&mut self, cols: u16, rows: u16) {
        if self.animator.state() == AnimatorState::Detached {
            let mut surface = self.new_surface();
            surface.set_area(cols, rows);
            self.animator.mount(surface, &mut self.host);
            return;
        }
        if let Some(surface) = self.animator.surface_mut() {
            surface.set_area(cols, rows);
        }
        if self.host.resize_listening() {
            self.animator.handle_resize(&mut self.host);
        }
    }

    /// Swaps in the next backdrop effect on the same surface.
    pub fn cycle_effect(&mut self) {
        let next = self.animator.variant().next();
        let surface = self.animator.unmount(&mut self.host);
        self.animator = ParticleFieldAnimator::new(next);
        if let Some(surface) = surface {
            self.animator.mount(surface, &mut self.host);
        }
        debug!("backdrop effect is now {}", next.label());
        self.settings.effect = next;
        self.persist_settings();
    }

    pub fn toggle_reduced_motion(&mut self) {
        let reduced = !self.host.prefers_reduced_motion();
        if self.host.set_reduced_motion(reduced) && self.host.motion_listening() {
            self.animator.handle_motion_change(reduced, &mut self.host);
        }
        self.settings.reduced_motion = reduced;
        self.persist_settings();
    }

    #[must_use]
    pub fn backdrop_raster(&self) -> Option<&CellRaster> {
        self.animator.surface().and_then(TerminalSurface::raster)
    }

    fn new_surface(&self) -> TerminalSurface {
        TerminalSurface::new(self.metrics, self.pixel_ratio, self.drawable)
    }

    fn persist_settings(&self) {
        let Some(path) = self.settings_path.as_deref() else {
            return;
        };
        if let Err(err) = save_runtime_settings(path, &self.settings) {
            warn!("{err:#}");
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.mode = AppMode::Quit;
            return;
        }
        match self.mode {
            AppMode::Browsing => self.handle_browsing_key(key).await,
            AppMode::Composing => self.handle_form_key(key).await,
            AppMode::ProfileSetup => self.handle_profile_key(key).await,
            AppMode::Quit => {}
        }
    }

    async fn handle_browsing_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.mode = AppMode::Quit;
            return;
        }
        match command_char(key) {
            Some('q') => self.mode = AppMode::Quit,
            Some('n') => {
                self.mode = AppMode::Composing;
                self.focus = FormField::Service;
            }
            Some('r') => self.desk.refresh_orders().await,
            Some('e') => self.cycle_effect(),
            Some('m') => self.toggle_reduced_motion(),
            Some('p') => {
                self.profile_name = self
                    .desk
                    .profile()
                    .data()
                    .and_then(|profile| profile.as_ref())
                    .map(|profile| profile.name.clone())
                    .unwrap_or_default();
                self.mode = AppMode::ProfileSetup;
            }
            _ => {}
        }
    }

    async fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = AppMode::Browsing,
            KeyCode::Tab => self.focus = self.next_field(true),
            KeyCode::BackTab => self.focus = self.next_field(false),
            KeyCode::Enter => {
                if self.desk.submit(&mut self.draft).await.is_some() {
                    self.mode = AppMode::Browsing;
                    self.focus = FormField::Service;
                }
            }
            code if self.focus == FormField::Service => match code {
                KeyCode::Left | KeyCode::Up => {
                    self.draft.choice = Some(step_choice(self.draft.choice, false));
                }
                KeyCode::Right | KeyCode::Down | KeyCode::Char(' ') => {
                    self.draft.choice = Some(step_choice(self.draft.choice, true));
                }
                KeyCode::Char(ch @ '1'..='4') => {
                    let idx = usize::from(ch as u8 - b'1');
                    self.draft.choice = ServiceChoice::ALL.get(idx).copied();
                }
                _ => {}
            },
            _ => {
                let target = match self.focus {
                    FormField::OtherText => &mut self.draft.other_text,
                    _ => &mut self.draft.details,
                };
                edit_text(target, key);
            }
        }
    }

    async fn handle_profile_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = AppMode::Browsing,
            KeyCode::Enter => {
                let profile = UserProfile {
                    name: self.profile_name.trim().to_string(),
                };
                if self.desk.save_profile(profile).await {
                    self.mode = AppMode::Browsing;
                }
            }
            _ => edit_text(&mut self.profile_name, key),
        }
    }

    /// Form fields in tab order. The free-text type is only reachable for `Other`.
    fn next_field(&self, forward: bool) -> FormField {
        let fields: &[FormField] = if self.draft.choice == Some(ServiceChoice::Other) {
            &[FormField::Service, FormField::OtherText, FormField::Details]
        } else {
            &[FormField::Service, FormField::Details]
        };
        let idx = fields
            .iter()
            .position(|field| *field == self.focus)
            .unwrap_or(0);
        let len = fields.len();
        let next = if forward {
            (idx + 1) % len
        } else {
            (idx + len - 1) % len
        };
        fields[next]
    }
}

fn command_char(key: KeyEvent) -> Option<char> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
    {
        return None;
    }
    if let KeyCode::Char(ch) = key.code {
        Some(ch.to_ascii_lowercase())
    } else {
        None
    }
}

fn step_choice(current: Option<ServiceChoice>, forward: bool) -> ServiceChoice {
    let all = ServiceChoice::ALL;
    let Some(idx) = current.and_then(|choice| all.iter().position(|c| *c == choice)) else {
        return if forward { all[0] } else { all[all.len() - 1] };
    };
    if forward {
        all[(idx + 1) % all.len()]
    } else {
        all[(idx + all.len() - 1) % all.len()]
    }
}

fn edit_text(target: &mut String, key: KeyEvent) {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return;
    }
    match key.code {
        KeyCode::Char(ch) if !ch.is_control() => target.push(ch),
        KeyCode::Backspace => {
            target.pop();
        }
        _ => {}
    }
}
